//! Configuration type definitions
//!
//! Every protocol timing constant and sampling period is a named field
//! with a named default, so sensor variants can be accommodated from the
//! config file instead of by editing code.

/// Default GPIO for the single-wire climate sensor
pub const DEFAULT_CLIMATE_PIN: u8 = 15;

/// Default light sampling period (ms)
pub const DEFAULT_LIGHT_PERIOD_MS: u32 = 1000;

/// Default climate sampling period (ms)
pub const DEFAULT_CLIMATE_PERIOD_MS: u32 = 3000;

/// Default sensor warm-up before the first decode (ms)
pub const DEFAULT_WARMUP_MS: u32 = 2000;

/// Default aggregator cycle period (ms)
pub const DEFAULT_DASHBOARD_PERIOD_MS: u32 = 100;

/// Default bounded wait for a channel send (ms)
pub const DEFAULT_SEND_TIMEOUT_MS: u32 = 100;

/// Default interrupt priority of the climate sampler (1 = highest usable)
pub const DEFAULT_CLIMATE_PRIORITY: u8 = 2;

/// Default interrupt priority of the light sampler
pub const DEFAULT_LIGHT_PRIORITY: u8 = 3;

/// Host holds the line low this long to wake a DHT11 (µs)
pub const DHT11_RESET_LOW_US: u32 = 18_000;

/// Host holds the line low this long to wake a DHT22 (µs)
pub const DHT22_RESET_LOW_US: u32 = 3_000;

/// Host drives the line high this long after the reset pulse (µs)
pub const RESET_HIGH_US: u32 = 40;

/// Bound on each wait for the sensor's low acknowledgement (µs)
pub const RESPONSE_LOW_TIMEOUT_US: u32 = 100;

/// Bound on the wait for the sensor's high acknowledgement (µs)
pub const RESPONSE_HIGH_TIMEOUT_US: u32 = 100;

/// Bound on each data bit edge (µs)
pub const EDGE_TIMEOUT_US: u32 = 100;

/// High pulses longer than this are a 1 bit (µs)
///
/// Sits between the 26-28 µs "0" and the 70 µs "1" encodings.
pub const BIT_THRESHOLD_US: u32 = 40;

/// Single-wire sensor variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorModel {
    /// DHT11: integer + tenths byte pairs
    #[default]
    Dht11,
    /// DHT22 / AM2302: 16-bit tenths, sign bit on temperature
    Dht22,
}

impl SensorModel {
    /// Shortest interval the sensor tolerates between reads (ms)
    pub const fn min_period_ms(self) -> u32 {
        match self {
            SensorModel::Dht11 => 1000,
            SensorModel::Dht22 => 2000,
        }
    }
}

/// Single-wire protocol timing (all microseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderTiming {
    /// Reset pulse: line held low
    pub reset_low_us: u32,
    /// Reset pulse: line driven high before release
    pub reset_high_us: u32,
    /// Timeout for the sensor pulling low, and for its low ack to end
    pub response_low_timeout_us: u32,
    /// Timeout for the sensor's high ack to end
    pub response_high_timeout_us: u32,
    /// Timeout for each edge while reading data bits
    pub edge_timeout_us: u32,
    /// High pulses strictly longer than this decode as 1
    pub bit_threshold_us: u32,
}

impl DecoderTiming {
    /// Default timing for a sensor model
    pub const fn for_model(model: SensorModel) -> Self {
        let reset_low_us = match model {
            SensorModel::Dht11 => DHT11_RESET_LOW_US,
            SensorModel::Dht22 => DHT22_RESET_LOW_US,
        };
        Self {
            reset_low_us,
            reset_high_us: RESET_HIGH_US,
            response_low_timeout_us: RESPONSE_LOW_TIMEOUT_US,
            response_high_timeout_us: RESPONSE_HIGH_TIMEOUT_US,
            edge_timeout_us: EDGE_TIMEOUT_US,
            bit_threshold_us: BIT_THRESHOLD_US,
        }
    }
}

impl Default for DecoderTiming {
    fn default() -> Self {
        Self::for_model(SensorModel::Dht11)
    }
}

/// Light sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightConfig {
    /// Sampling period (ms)
    pub period_ms: u32,
    /// Bounded wait before dropping a reading (ms)
    pub send_timeout_ms: u32,
    /// Interrupt priority of the sampler's executor (1-3, lower is more urgent)
    pub priority: u8,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_LIGHT_PERIOD_MS,
            send_timeout_ms: DEFAULT_SEND_TIMEOUT_MS,
            priority: DEFAULT_LIGHT_PRIORITY,
        }
    }
}

/// Climate sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateConfig {
    /// GPIO number of the data line
    pub pin: u8,
    /// Sensor variant
    pub model: SensorModel,
    /// Sampling period (ms)
    pub period_ms: u32,
    /// Delay before the first decode after power-up (ms)
    pub warmup_ms: u32,
    /// Bounded wait before dropping a reading (ms)
    pub send_timeout_ms: u32,
    /// Interrupt priority of the sampler's executor (1-3, lower is more urgent)
    pub priority: u8,
    /// Protocol timing
    pub timing: DecoderTiming,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            pin: DEFAULT_CLIMATE_PIN,
            model: SensorModel::Dht11,
            period_ms: DEFAULT_CLIMATE_PERIOD_MS,
            warmup_ms: DEFAULT_WARMUP_MS,
            send_timeout_ms: DEFAULT_SEND_TIMEOUT_MS,
            priority: DEFAULT_CLIMATE_PRIORITY,
            timing: DecoderTiming::for_model(SensorModel::Dht11),
        }
    }
}

/// Aggregator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DashboardConfig {
    /// Aggregator cycle period (ms)
    pub period_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_DASHBOARD_PERIOD_MS,
        }
    }
}

/// Configuration validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A period is zero
    ZeroPeriod,
    /// Climate period shorter than the sensor's minimum re-sample interval
    PeriodTooShort,
    /// Bit threshold not strictly below the edge timeout
    ThresholdAboveTimeout,
    /// Priority outside 1..=3
    InvalidPriority,
    /// Light sampler more urgent than the climate sampler, so it could
    /// preempt a decode in progress
    PriorityInversion,
}

/// Complete monitor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// Light sampler
    pub light: LightConfig,
    /// Climate sampler
    pub climate: ClimateConfig,
    /// Aggregator / console
    pub dashboard: DashboardConfig,
}

impl MonitorConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.light.period_ms == 0 || self.climate.period_ms == 0 || self.dashboard.period_ms == 0
        {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.climate.period_ms < self.climate.model.min_period_ms() {
            return Err(ConfigError::PeriodTooShort);
        }
        let timing = &self.climate.timing;
        if timing.bit_threshold_us >= timing.edge_timeout_us {
            return Err(ConfigError::ThresholdAboveTimeout);
        }
        if !(1..=3).contains(&self.climate.priority) || !(1..=3).contains(&self.light.priority) {
            return Err(ConfigError::InvalidPriority);
        }
        if self.light.priority < self.climate.priority {
            return Err(ConfigError::PriorityInversion);
        }
        Ok(())
    }
}
