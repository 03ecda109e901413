//! Climate sampling task
//!
//! Runs on the interrupt executor so the busy-wait decode is not
//! interrupted by the thread-mode tasks. Waits for the sensor to warm up,
//! then decodes one frame every period.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker, Timer};

use climalux_core::config::ClimateConfig;
use climalux_core::pipeline::{ChannelFull, Outlet};
use climalux_core::sampler::{climate_reading, SamplerStats};
use climalux_core::traits::ClimateSensor;
use climalux_core::Reading;
use climalux_drivers::sensor::Dht;
use climalux_hal_rp2040::{EmbassyClock, FlexLine};

use crate::channels::CLIMATE_CHANNEL;

/// Sensor type driven by this task
pub type ClimateDriver = Dht<FlexLine<'static>, EmbassyClock>;

/// Climate sampler task
#[embassy_executor::task]
pub async fn climate_task(mut sensor: ClimateDriver, config: ClimateConfig) {
    info!(
        "Climate task started, warming up for {} ms",
        config.warmup_ms
    );
    Timer::after_millis(config.warmup_ms as u64).await;

    let mut outlet = Outlet::new(CLIMATE_CHANNEL.sender());
    let mut stats = SamplerStats::default();
    let mut ticker = Ticker::every(Duration::from_millis(config.period_ms as u64));

    loop {
        let result = sensor.read_climate();
        if let Err(e) = result {
            warn!("Climate decode failed: {}", e);
        }

        let reading = climate_reading(result, Instant::now().as_millis());
        stats.record(&reading);
        if let Reading::Climate(c) = reading {
            if c.valid {
                debug!(
                    "Climate: {} C, {} %RH",
                    c.celsius, c.humidity_pct
                );
            }
        }

        let deadline = Timer::after_millis(config.send_timeout_ms as u64);
        if let Err(ChannelFull) = outlet.offer(reading, deadline).await {
            warn!("Climate channel full, reading dropped ({} total)", outlet.dropped());
        }

        info!(
            "Climate: {}/{} ok ({}%)",
            stats.successes,
            stats.attempts,
            stats.success_pct()
        );

        ticker.next().await;
    }
}
