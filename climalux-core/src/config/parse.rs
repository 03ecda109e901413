//! Simple TOML parser for monitor configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the monitor configuration. It does NOT support the full TOML spec and
//! needs no allocator.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - [section.subsection] headers
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys outside section headers

use super::types::{DecoderTiming, MonitorConfig, SensorModel};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Line is not a `key = value` pair
    InvalidLine,
    /// Invalid value type or out of range
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Light,
    Climate,
    ClimateTiming,
    Dashboard,
}

/// Parse TOML configuration into MonitorConfig
///
/// Keys that are absent keep their defaults. Unless `reset_low_us` is set
/// explicitly, it follows the selected sensor model.
pub fn parse_config(input: &str) -> Result<MonitorConfig, ParseError> {
    let mut config = MonitorConfig::new();
    let mut section = Section::Root;
    let mut reset_low_explicit = false;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        if section == Section::ClimateTiming && key == "reset_low_us" {
            reset_low_explicit = true;
        }
        apply_value(section, key, value, &mut config)?;
    }

    if !reset_low_explicit {
        config.climate.timing.reset_low_us =
            DecoderTiming::for_model(config.climate.model).reset_low_us;
    }

    Ok(config)
}

/// Parse section header like "climate" or "climate.timing"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "light" => Ok(Section::Light),
        "climate" => Ok(Section::Climate),
        "climate.timing" => Ok(Section::ClimateTiming),
        "dashboard" => Ok(Section::Dashboard),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut MonitorConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::UnknownKey),
        Section::Light => {
            let light = &mut config.light;
            match key {
                "period_ms" => light.period_ms = parse_int(value)?,
                "send_timeout_ms" => light.send_timeout_ms = parse_int(value)?,
                "priority" => light.priority = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Climate => {
            let climate = &mut config.climate;
            match key {
                "pin" => climate.pin = parse_pin(value)?,
                "model" => climate.model = parse_model(value)?,
                "period_ms" => climate.period_ms = parse_int(value)?,
                "warmup_ms" => climate.warmup_ms = parse_int(value)?,
                "send_timeout_ms" => climate.send_timeout_ms = parse_int(value)?,
                "priority" => climate.priority = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::ClimateTiming => {
            let timing = &mut config.climate.timing;
            match key {
                "reset_low_us" => timing.reset_low_us = parse_int(value)?,
                "reset_high_us" => timing.reset_high_us = parse_int(value)?,
                "response_low_timeout_us" => timing.response_low_timeout_us = parse_int(value)?,
                "response_high_timeout_us" => timing.response_high_timeout_us = parse_int(value)?,
                "edge_timeout_us" => timing.edge_timeout_us = parse_int(value)?,
                "bit_threshold_us" => timing.bit_threshold_us = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Dashboard => match key {
            "period_ms" => config.dashboard.period_ms = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
    }
    Ok(())
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        // Make sure # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin given as `15` or `"gpio15"`
fn parse_pin(value: &str) -> Result<u8, ParseError> {
    let s = parse_string(value);
    let digits = s.strip_prefix("gpio").unwrap_or(s);
    let pin: u8 = digits.parse().map_err(|_| ParseError::InvalidPin)?;
    if pin >= 30 {
        return Err(ParseError::InvalidPin);
    }
    Ok(pin)
}

/// Parse sensor model (case-insensitive)
fn parse_model(value: &str) -> Result<SensorModel, ParseError> {
    let name = parse_string(value);
    if name.eq_ignore_ascii_case("dht11") {
        Ok(SensorModel::Dht11)
    } else if name.eq_ignore_ascii_case("dht22") || name.eq_ignore_ascii_case("am2302") {
        Ok(SensorModel::Dht22)
    } else {
        Err(ParseError::InvalidValue)
    }
}
