//! Build script for climalux-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates climalux.toml at compile time, with the same parser the
//!   firmware runs at boot

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use climalux_core::config::{parse_config, ConfigError, ParseError};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate climalux.toml configuration at compile time
fn validate_config() {
    // Re-run if climalux.toml changes
    println!("cargo:rerun-if-changed=climalux.toml");

    let config_path = Path::new("climalux.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: climalux.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds climalux.toml at build time.                ║\n\
            ║  Please create one in the climalux-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read climalux.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    if let Err(e) = toml::from_str::<toml::Value>(&config_content) {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid TOML syntax in climalux.toml                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&e.to_string())
        );
    }

    // The firmware reads the file with this same parser at boot, so
    // anything it rejects must fail the build instead of silently falling
    // back to defaults on the device.
    let monitor = match parse_config(&config_content) {
        Ok(monitor) => monitor,
        Err(e) => {
            let line = failing_line(&config_content, e);
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: climalux.toml rejected by the firmware parser            ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&format!(
                    "{}\nline {}: {}",
                    describe_parse_error(e),
                    line.0,
                    line.1
                ))
            );
        }
    };

    if let Err(e) = monitor.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in climalux.toml                   ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(describe_config_error(e))
        );
    }

    println!("cargo:warning=climalux.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Find the first line whose inclusion makes the parser fail with `err`
fn failing_line(content: &str, err: ParseError) -> (usize, String) {
    let mut prefix = String::new();
    for (i, line) in content.lines().enumerate() {
        prefix.push_str(line);
        prefix.push('\n');
        if parse_config(&prefix) == Err(err) {
            return (i + 1, line.trim().to_string());
        }
    }
    (0, String::new())
}

fn describe_parse_error(err: ParseError) -> &'static str {
    match err {
        ParseError::InvalidSection => "unknown section (use light, climate, climate.timing, dashboard)",
        ParseError::UnknownKey => "unknown key (inline tables and dotted keys are not supported)",
        ParseError::InvalidLine => "expected `key = value`",
        ParseError::InvalidValue => "invalid value (numbers must be plain unsigned integers)",
        ParseError::InvalidPin => "invalid pin (use 0-29 or \"gpioN\")",
    }
}

fn describe_config_error(err: ConfigError) -> &'static str {
    match err {
        ConfigError::ZeroPeriod => "period_ms must be greater than 0",
        ConfigError::PeriodTooShort => "[climate] period_ms is below the sensor model's minimum",
        ConfigError::ThresholdAboveTimeout => "[climate.timing] bit_threshold_us must be < edge_timeout_us",
        ConfigError::InvalidPriority => "priority must be 1-3",
        ConfigError::PriorityInversion => "[light] priority must not be more urgent than [climate]",
    }
}
