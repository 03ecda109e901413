//! Climalux Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware capabilities the sensor drivers
//! consume. Chip-specific HALs (currently RP2040) implement them, and tests
//! implement them with scripted fakes so protocol timing can be exercised
//! without hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Drivers (climalux-drivers)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  climalux-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ climalux-hal- │       │  test fakes   │
//! │    rp2040     │       │ (host only)   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OneWireLine`] - Bidirectional single-wire data line
//! - [`clock::Clock`] - Monotonic microsecond time source
//! - [`adc::AnalogInput`] - Raw ADC samples

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod adc;
pub mod clock;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use adc::{AdcError, AnalogInput};
pub use clock::Clock;
pub use gpio::{OneWireLine, PinMode};
