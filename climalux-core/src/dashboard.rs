//! Dashboard rendering
//!
//! Pure projection of a [`Snapshot`] to console text. Invalid or missing
//! fields render as `--` placeholders, never as numbers.
//!
//! ```text
//! ---------------------------
//! [ Sensor Dashboard ]
//! Timestamp: 3000 ms
//! Light Level (ADC): 512
//! Temperature: 23.5°C / 74.3°F
//! Humidity: 60.2%
//! ---------------------------
//! ```

use core::fmt::Write;

use heapless::String;

use crate::snapshot::Snapshot;

/// ANSI clear screen + cursor home, sent before each redraw
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Horizontal rule framing the block
pub const RULE: &str = "---------------------------";

/// Line terminator for serial consoles
pub const EOL: &str = "\r\n";

/// Capacity of the rendered block in bytes
pub const DASHBOARD_CAPACITY: usize = 256;

/// Rendered dashboard text
pub type Dashboard = String<DASHBOARD_CAPACITY>;

/// Displayed values saturate at this magnitude
///
/// Keeps every line bounded so the block always fits in
/// [`DASHBOARD_CAPACITY`], whatever the snapshot holds.
pub const DISPLAY_LIMIT: f32 = 999.9;

/// Render a snapshot to console text
pub fn render(snapshot: &Snapshot) -> Dashboard {
    let mut out = Dashboard::new();
    let result = write_dashboard(&mut out, snapshot);
    debug_assert!(result.is_ok(), "dashboard exceeds capacity");
    out
}

/// Clamp a value to the displayable range; NaN passes through as "NaN"
fn shown(value: f32) -> f32 {
    value.clamp(-DISPLAY_LIMIT, DISPLAY_LIMIT)
}

fn write_dashboard<W: Write>(out: &mut W, snapshot: &Snapshot) -> core::fmt::Result {
    write!(out, "{RULE}{EOL}")?;
    write!(out, "[ Sensor Dashboard ]{EOL}")?;
    write!(out, "Timestamp: {} ms{EOL}", snapshot.timestamp_ms)?;

    match snapshot.light {
        Some(l) if l.valid => write!(out, "Light Level (ADC): {}{EOL}", l.level)?,
        _ => write!(out, "Light Level (ADC): --{EOL}")?,
    }

    match snapshot.climate {
        Some(c) if c.valid => {
            write!(
                out,
                "Temperature: {:.1}°C / {:.1}°F{EOL}",
                shown(c.celsius),
                shown(c.fahrenheit)
            )?;
            write!(out, "Humidity: {:.1}%{EOL}", shown(c.humidity_pct))?;
        }
        _ => {
            write!(out, "Temperature: --°C / --°F{EOL}")?;
            write!(out, "Humidity: --%{EOL}")?;
        }
    }

    write!(out, "{RULE}{EOL}")
}
