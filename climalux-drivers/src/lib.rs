//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the sensor traits
//! defined in climalux-core, written against the capability traits of
//! climalux-hal:
//!
//! - Single-wire temperature/humidity sensors (DHT11, DHT22)
//! - Analog light sensors (photoresistor divider on the ADC)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sensor;
