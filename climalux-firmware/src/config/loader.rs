//! Embedded configuration loader
//!
//! Parses and validates the embedded `climalux.toml`. Any failure falls
//! back to the compiled-in defaults so the monitor always starts.

use defmt::*;

use climalux_core::config::{parse_config, MonitorConfig};

/// Embedded configuration (compiled into firmware)
/// Edit climalux.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../climalux.toml");

/// Load the embedded configuration, or defaults if it is unusable
pub fn load_config() -> MonitorConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            // build.rs rejects malformed files, so this only fires if the
            // two parsers disagree
            error!("Failed to parse embedded config: {}", e);
            error!("Using default configuration");
            return MonitorConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Invalid embedded config: {}", e);
        error!("Using default configuration");
        return MonitorConfig::default();
    }

    log_config_summary(&config);
    config
}

fn log_config_summary(config: &MonitorConfig) {
    info!(
        "Light: every {} ms, send timeout {} ms",
        config.light.period_ms, config.light.send_timeout_ms
    );
    info!(
        "Climate: {} on GPIO{}, every {} ms after {} ms warm-up, priority {}",
        config.climate.model,
        config.climate.pin,
        config.climate.period_ms,
        config.climate.warmup_ms,
        config.climate.priority
    );
    debug!("Climate timing: {}", config.climate.timing);
    info!("Dashboard: every {} ms", config.dashboard.period_ms);
}
