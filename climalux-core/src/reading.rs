//! Sensor readings
//!
//! A [`Reading`] is what a sampling task hands to the aggregator: one value
//! per sampling period, tagged with the monotonic time it was taken.
//! Readings are plain `Copy` values moved through the channels by value.

/// Converted output of one successful climate decode
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateMeasurement {
    /// Temperature in degrees Celsius
    pub celsius: f32,
    /// Temperature in degrees Fahrenheit (derived from Celsius)
    pub fahrenheit: f32,
    /// Relative humidity in percent
    pub humidity_pct: f32,
}

impl ClimateMeasurement {
    /// Build a measurement from Celsius and humidity, deriving Fahrenheit
    pub fn new(celsius: f32, humidity_pct: f32) -> Self {
        Self {
            celsius,
            fahrenheit: celsius_to_fahrenheit(celsius),
            humidity_pct,
        }
    }
}

/// F = C * 9/5 + 32
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Light level sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightReading {
    /// Raw ADC level (0 when the sample is invalid)
    pub level: u16,
    /// False when the ADC failed to produce a sample
    pub valid: bool,
    /// Monotonic time the sample was taken (ms)
    pub timestamp_ms: u64,
}

impl LightReading {
    /// A valid light sample
    pub fn new(level: u16, timestamp_ms: u64) -> Self {
        Self {
            level,
            valid: true,
            timestamp_ms,
        }
    }

    /// A failed light sample
    pub fn invalid(timestamp_ms: u64) -> Self {
        Self {
            level: 0,
            valid: false,
            timestamp_ms,
        }
    }
}

/// Temperature and humidity sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateReading {
    /// Temperature in degrees Celsius
    pub celsius: f32,
    /// Temperature in degrees Fahrenheit
    pub fahrenheit: f32,
    /// Relative humidity in percent
    pub humidity_pct: f32,
    /// False when the decode attempt failed
    pub valid: bool,
    /// Monotonic time the sample was taken (ms)
    pub timestamp_ms: u64,
}

impl ClimateReading {
    /// A valid climate sample from a decoded measurement
    pub fn new(measurement: ClimateMeasurement, timestamp_ms: u64) -> Self {
        Self {
            celsius: measurement.celsius,
            fahrenheit: measurement.fahrenheit,
            humidity_pct: measurement.humidity_pct,
            valid: true,
            timestamp_ms,
        }
    }

    /// A failed climate sample
    ///
    /// Distinguishes "sampling attempted but failed" from "never sampled".
    pub fn invalid(timestamp_ms: u64) -> Self {
        Self {
            celsius: 0.0,
            fahrenheit: 0.0,
            humidity_pct: 0.0,
            valid: false,
            timestamp_ms,
        }
    }
}

/// One sample from either producer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// From the light sampling task
    Light(LightReading),
    /// From the climate sampling task
    Climate(ClimateReading),
}

impl Reading {
    /// Monotonic time the sample was taken (ms)
    pub fn timestamp_ms(&self) -> u64 {
        match self {
            Reading::Light(r) => r.timestamp_ms,
            Reading::Climate(r) => r.timestamp_ms,
        }
    }

    /// Whether the sample carries real values
    pub fn is_valid(&self) -> bool {
        match self {
            Reading::Light(r) => r.valid,
            Reading::Climate(r) => r.valid,
        }
    }
}

impl From<LightReading> for Reading {
    fn from(r: LightReading) -> Self {
        Reading::Light(r)
    }
}

impl From<ClimateReading> for Reading {
    fn from(r: ClimateReading) -> Self {
        Reading::Climate(r)
    }
}
