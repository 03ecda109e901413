//! Microsecond clock on the embassy time driver

use climalux_hal::Clock;
use embassy_time::{block_for, Duration, Instant};

/// Monotonic clock reading the embassy time driver
///
/// The RP2040 timer ticks at 1 MHz, so [`Instant`] has the microsecond
/// resolution pulse measurement needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_micros(&mut self) -> u64 {
        Instant::now().as_micros()
    }

    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }
}
