//! Inter-task communication channels
//!
//! One bounded channel per sampling task, both drained by the aggregator.
//! The climate sampler runs on the interrupt executor, so the channels
//! are guarded by a critical-section mutex.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use climalux_core::pipeline::{ReadingChannel, CLIMATE_CHANNEL_CAPACITY, LIGHT_CHANNEL_CAPACITY};

/// Light readings from the light sampler
pub static LIGHT_CHANNEL: ReadingChannel<CriticalSectionRawMutex, LIGHT_CHANNEL_CAPACITY> =
    Channel::new();

/// Climate readings from the climate sampler
pub static CLIMATE_CHANNEL: ReadingChannel<CriticalSectionRawMutex, CLIMATE_CHANNEL_CAPACITY> =
    Channel::new();
