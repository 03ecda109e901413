//! GPIO pin abstractions
//!
//! Single-wire sensors share one line for both directions: the host drives
//! it to signal a reset, then lets go and listens to the sensor's pulses.

/// Direction of a bidirectional pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Pin drives the line with the last written level
    Output,
    /// Pin floats and the line is held high by a pull-up
    InputPullUp,
}

/// Bidirectional data line of a single-wire bus
///
/// Implementations should handle the actual direction and pull
/// configuration for the specific chip.
pub trait OneWireLine {
    /// Switch the pin direction
    fn set_mode(&mut self, mode: PinMode);

    /// Set the driven level (only meaningful in [`PinMode::Output`])
    fn write(&mut self, high: bool);

    /// Sample the current line level
    fn is_high(&mut self) -> bool;

    /// Sample the current line level, inverted
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }

    /// Drive the line low
    ///
    /// The level is latched before the direction switch so the line never
    /// glitches to a stale output level.
    fn drive_low(&mut self) {
        self.write(false);
        self.set_mode(PinMode::Output);
    }

    /// Drive the line high
    fn drive_high(&mut self) {
        self.write(true);
        self.set_mode(PinMode::Output);
    }

    /// Stop driving and let the pull-up and the sensor own the line
    fn release(&mut self) {
        self.set_mode(PinMode::InputPullUp);
    }
}
