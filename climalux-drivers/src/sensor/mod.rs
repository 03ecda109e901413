//! Sensor drivers

pub mod dht;
pub mod light;

#[cfg(test)]
mod sim;

pub use dht::{classify_bit, Dht, Frame};
pub use light::Photoresistor;
