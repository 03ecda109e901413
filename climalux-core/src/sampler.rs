//! Sampling task glue
//!
//! Turns one sensor result into the [`Reading`] a sampling task publishes.
//! Failures never escape a sampler: they become `valid: false` readings
//! and bump the counters here.

use crate::reading::{ClimateMeasurement, ClimateReading, LightReading, Reading};
use crate::traits::{DecodeError, HwError};

/// Per-sampler counters
///
/// Channel drops are counted by the sampler's [`Outlet`](crate::pipeline::Outlet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerStats {
    /// Sampling attempts
    pub attempts: u32,
    /// Attempts that produced a valid reading
    pub successes: u32,
}

impl SamplerStats {
    /// Record one sampling attempt
    pub fn record(&mut self, reading: &Reading) {
        self.attempts = self.attempts.wrapping_add(1);
        if reading.is_valid() {
            self.successes = self.successes.wrapping_add(1);
        }
    }

    /// Success rate in percent (0 before the first attempt)
    pub fn success_pct(&self) -> u8 {
        if self.attempts == 0 {
            return 0;
        }
        (self.successes as u64 * 100 / self.attempts as u64) as u8
    }
}

/// Wrap an ADC result as a light reading
///
/// An ADC fault becomes an invalid reading with level 0.
pub fn light_reading(result: Result<u16, HwError>, timestamp_ms: u64) -> Reading {
    match result {
        Ok(level) => LightReading::new(level, timestamp_ms).into(),
        Err(_) => LightReading::invalid(timestamp_ms).into(),
    }
}

/// Wrap a decode result as a climate reading
///
/// Every decode error becomes an invalid reading with zeroed fields.
pub fn climate_reading(
    result: Result<ClimateMeasurement, DecodeError>,
    timestamp_ms: u64,
) -> Reading {
    match result {
        Ok(m) => ClimateReading::new(m, timestamp_ms).into(),
        Err(_) => ClimateReading::invalid(timestamp_ms).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_reading_ok() {
        let r = light_reading(Ok(512), 1000);
        assert_eq!(r, Reading::Light(LightReading::new(512, 1000)));
    }

    #[test]
    fn test_light_reading_fault() {
        match light_reading(Err(HwError::Adc), 1000) {
            Reading::Light(l) => {
                assert!(!l.valid);
                assert_eq!(l.level, 0);
                assert_eq!(l.timestamp_ms, 1000);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_climate_reading_every_error_is_invalid() {
        for err in [
            DecodeError::NoResponse,
            DecodeError::ResponseTimeout,
            DecodeError::EdgeTimeout,
            DecodeError::ChecksumError,
        ] {
            let r = climate_reading(Err(err), 3000);
            assert_eq!(r, Reading::Climate(ClimateReading::invalid(3000)));
        }
    }

    #[test]
    fn test_climate_reading_ok() {
        let r = climate_reading(Ok(ClimateMeasurement::new(23.5, 60.2)), 3000);
        assert!(r.is_valid());
        assert_eq!(r.timestamp_ms(), 3000);
    }

    #[test]
    fn test_stats() {
        let mut stats = SamplerStats::default();
        assert_eq!(stats.success_pct(), 0);

        stats.record(&light_reading(Ok(1), 0));
        stats.record(&light_reading(Err(HwError::Adc), 1));
        stats.record(&light_reading(Ok(1), 2));
        stats.record(&light_reading(Ok(1), 3));

        assert_eq!(stats.attempts, 4);
        assert_eq!(stats.successes, 3);
        assert_eq!(stats.success_pct(), 75);
    }
}
