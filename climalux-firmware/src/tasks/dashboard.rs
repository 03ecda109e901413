//! Aggregator and console task
//!
//! Drains both reading channels each cycle and redraws the dashboard on
//! the UART console whenever the snapshot changes.

use defmt::*;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;

use climalux_core::config::DashboardConfig;
use climalux_core::dashboard::{render, CLEAR_SCREEN};
use climalux_core::{Aggregator, Snapshot};

use crate::channels::{CLIMATE_CHANNEL, LIGHT_CHANNEL};

/// Aggregator task - sole consumer of both channels
#[embassy_executor::task]
pub async fn dashboard_task(mut tx: BufferedUartTx<'static, UART0>, config: DashboardConfig) {
    info!("Dashboard task started");

    let mut aggregator = Aggregator::new();
    let light = LIGHT_CHANNEL.receiver();
    let climate = CLIMATE_CHANNEL.receiver();
    let mut ticker = Ticker::every(Duration::from_millis(config.period_ms as u64));

    // Draw the placeholder dashboard before the first reading arrives
    send_dashboard(&mut tx, aggregator.snapshot()).await;

    loop {
        ticker.next().await;

        if let Some(snapshot) = aggregator.poll(&light, &climate) {
            send_dashboard(&mut tx, &snapshot).await;

            let stats = aggregator.stats();
            trace!(
                "Aggregator: {} received, {} invalid rejected, {} renders",
                stats.received,
                stats.rejected_invalid,
                stats.renders
            );
        }
    }
}

/// Clear the console and write the rendered snapshot
async fn send_dashboard(tx: &mut BufferedUartTx<'static, UART0>, snapshot: &Snapshot) {
    let text = render(snapshot);

    if let Err(e) = tx.write_all(CLEAR_SCREEN.as_bytes()).await {
        warn!("Failed to clear console: {:?}", e);
        return;
    }
    if let Err(e) = tx.write_all(text.as_bytes()).await {
        warn!("Failed to write dashboard: {:?}", e);
    }
}
