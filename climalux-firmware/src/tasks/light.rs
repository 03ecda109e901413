//! Light sampling task
//!
//! Reads the photoresistor on the ADC every period and publishes the
//! result. ADC faults become invalid readings.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker, Timer};

use climalux_core::config::LightConfig;
use climalux_core::pipeline::{ChannelFull, Outlet};
use climalux_core::sampler::{light_reading, SamplerStats};
use climalux_core::traits::LightSensor;
use climalux_drivers::sensor::Photoresistor;
use climalux_hal_rp2040::AdcInput;

use crate::channels::LIGHT_CHANNEL;

/// Light sampler task
#[embassy_executor::task]
pub async fn light_task(mut sensor: Photoresistor<AdcInput<'static>>, config: LightConfig) {
    info!("Light task started");

    let mut outlet = Outlet::new(LIGHT_CHANNEL.sender());
    let mut stats = SamplerStats::default();
    let mut ticker = Ticker::every(Duration::from_millis(config.period_ms as u64));

    loop {
        let result = sensor.read_level();
        if let Err(e) = result {
            warn!("Light sensor fault: {}", e);
        }

        let reading = light_reading(result, Instant::now().as_millis());
        stats.record(&reading);
        trace!("Light reading: {}", reading);

        let deadline = Timer::after_millis(config.send_timeout_ms as u64);
        if let Err(ChannelFull) = outlet.offer(reading, deadline).await {
            warn!("Light channel full, reading dropped ({} total)", outlet.dropped());
        }

        debug!(
            "Light: {}/{} ok ({}%)",
            stats.successes,
            stats.attempts,
            stats.success_pct()
        );

        ticker.next().await;
    }
}
