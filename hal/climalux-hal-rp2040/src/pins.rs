//! Config-driven pin assignment
//!
//! The climate sensor's data pin comes from the config file, so the
//! firmware hands the free GPIOs to a [`PinBank`] and takes the sensor
//! pin out by number at startup.

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;

/// Number of GPIOs on the RP2040
pub const GPIO_COUNT: usize = 30;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for another function (console, ADC)
    Reserved,
}

/// GPIOs available for assignment by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
    /// Bit per GPIO handed out by `take`
    taken: u32,
}

impl PinBank {
    /// Create a bank from `(number, pin)` pairs
    ///
    /// Numbers that never appear are treated as reserved.
    pub fn new<const N: usize>(pins: [(u8, Peri<'static, AnyPin>); N]) -> Self {
        let mut bank = Self {
            pins: [const { None }; GPIO_COUNT],
            taken: 0,
        };
        for (num, pin) in pins {
            if let Some(slot) = bank.pins.get_mut(num as usize) {
                *slot = Some(pin);
            }
        }
        bank
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        let slot = self
            .pins
            .get_mut(pin_num as usize)
            .ok_or(PinError::InvalidPin)?;
        match slot.take() {
            Some(pin) => {
                self.taken |= 1 << pin_num;
                Ok(pin)
            }
            None if self.taken & (1 << pin_num) != 0 => Err(PinError::AlreadyTaken),
            None => Err(PinError::Reserved),
        }
    }
}
