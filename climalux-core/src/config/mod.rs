//! Configuration types
//!
//! Board-agnostic monitor configuration plus the TOML-subset parser used
//! to read it from the firmware's embedded config file.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
