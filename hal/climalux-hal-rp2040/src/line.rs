//! Single-wire data line on a bidirectional GPIO

use climalux_hal::{OneWireLine, PinMode};
use embassy_rp::gpio::{Flex, Pull};

/// Data line backed by a [`Flex`] pin
///
/// Input mode enables the internal pull-up so the line idles high even
/// without an external resistor.
pub struct FlexLine<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexLine<'d> {
    /// Wrap a flex pin, starting released
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_as_input();
        Self { pin }
    }
}

impl OneWireLine for FlexLine<'_> {
    fn set_mode(&mut self, mode: PinMode) {
        match mode {
            PinMode::Output => self.pin.set_as_output(),
            PinMode::InputPullUp => {
                self.pin.set_pull(Pull::Up);
                self.pin.set_as_input();
            }
        }
    }

    fn write(&mut self, high: bool) {
        if high {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }

    fn is_high(&mut self) -> bool {
        self.pin.is_high()
    }
}
