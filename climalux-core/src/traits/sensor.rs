//! Sensor traits and error kinds

use crate::reading::ClimateMeasurement;

/// Failures of one single-wire decode attempt
///
/// Each wait phase has its own kind so a field log tells a disconnected
/// sensor apart from a noisy one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Sensor never pulled the line low after the reset pulse
    NoResponse,
    /// Sensor's low/high acknowledgement pulse did not end in time
    ResponseTimeout,
    /// A data bit edge did not arrive in time
    EdgeTimeout,
    /// Checksum byte does not match the sum of the data bytes
    ChecksumError,
}

/// Peripheral failure reported by a collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HwError {
    /// ADC conversion failed
    Adc,
    /// GPIO configuration or access failed
    Gpio,
}

/// Trait for temperature/humidity sensors
///
/// Takes `&mut self` because a decode attempt owns the data line for its
/// whole duration.
pub trait ClimateSensor {
    /// Run one full decode attempt
    fn read_climate(&mut self) -> Result<ClimateMeasurement, DecodeError>;
}

/// Trait for ambient light sensors
pub trait LightSensor {
    /// Read the raw light level
    fn read_level(&mut self) -> Result<u16, HwError>;
}
