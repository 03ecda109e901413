//! RP2040-specific HAL for the light & climate monitor
//!
//! This crate provides RP2040 implementations of the shared
//! `climalux-hal` traits:
//!
//! - Single-wire data line over a [`embassy_rp::gpio::Flex`] pin
//! - Microsecond clock over the embassy time driver
//! - Blocking ADC channel reads
//! - Pin bank for config-driven pin assignment

#![no_std]

pub mod adc;
pub mod clock;
pub mod line;
pub mod pins;

pub use adc::AdcInput;
pub use clock::EmbassyClock;
pub use line::FlexLine;
pub use pins::{PinBank, PinError};

// Re-export shared traits from climalux-hal for convenience
pub use climalux_hal::{AnalogInput, Clock, OneWireLine};
