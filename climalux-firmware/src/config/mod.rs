//! Configuration loading
//!
//! The configuration is embedded at compile time and parsed with the
//! no_std parser from `climalux-core`.

pub mod loader;

pub use loader::load_config;
