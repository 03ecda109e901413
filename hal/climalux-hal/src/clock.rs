//! Monotonic time source
//!
//! Protocol decoders measure pulse widths by polling, so the clock needs
//! microsecond resolution and must never go backwards.

/// Monotonic microsecond clock
pub trait Clock {
    /// Microseconds since an arbitrary fixed origin
    fn now_micros(&mut self) -> u64;

    /// Busy-wait for at least `us` microseconds
    ///
    /// The default spins on [`Clock::now_micros`]. Implementations may
    /// override it with a cheaper platform delay.
    fn delay_us(&mut self, us: u32) {
        let start = self.now_micros();
        while self.now_micros().wrapping_sub(start) < us as u64 {}
    }

    /// Microseconds elapsed since `start`
    fn elapsed_since(&mut self, start: u64) -> u64 {
        self.now_micros().wrapping_sub(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counter that advances 3 µs per read
    struct Ticking(u64);

    impl Clock for Ticking {
        fn now_micros(&mut self) -> u64 {
            self.0 += 3;
            self.0
        }
    }

    #[test]
    fn test_default_delay_waits_at_least_requested() {
        let mut clock = Ticking(0);
        clock.delay_us(40);
        assert!(clock.0 >= 40);
        assert!(clock.0 < 50);
    }

    #[test]
    fn test_elapsed_since() {
        let mut clock = Ticking(100);
        let start = clock.now_micros();
        assert_eq!(clock.elapsed_since(start), 3);
    }

    #[test]
    fn test_zero_delay_returns() {
        let mut clock = Ticking(0);
        clock.delay_us(0);
        assert!(clock.0 <= 6);
    }
}
