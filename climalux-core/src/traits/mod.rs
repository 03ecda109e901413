//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and the sensor drivers.

pub mod sensor;

pub use sensor::{ClimateSensor, DecodeError, HwError, LightSensor};
