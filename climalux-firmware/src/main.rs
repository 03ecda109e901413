//! Climalux - Light & Climate Monitor Firmware
//!
//! Main firmware binary for RP2040-based boards. Samples a photoresistor
//! on the ADC and a single-wire temperature/humidity sensor, and keeps a
//! dashboard of the latest values on the UART console.
//!
//! Three executors share the core, one per task:
//! - `SWI_IRQ_1` interrupt executor: climate sampler, so its busy-wait
//!   decode preempts everything else
//! - `SWI_IRQ_0` interrupt executor: light sampler, preempts the dashboard
//! - Thread mode: dashboard (aggregator), lowest priority

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use climalux_core::config::DEFAULT_CLIMATE_PIN;
use climalux_drivers::sensor::{Dht, Photoresistor};
use climalux_hal_rp2040::{AdcInput, EmbassyClock, FlexLine, PinBank};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

static EXECUTOR_CLIMATE: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LIGHT: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_MAIN: StaticCell<Executor> = StaticCell::new();

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    // SAFETY: only called from the ISR, which `start()` enables
    unsafe { EXECUTOR_CLIMATE.on_interrupt() }
}

#[interrupt]
unsafe fn SWI_IRQ_0() {
    // SAFETY: only called from the ISR, which `start()` enables
    unsafe { EXECUTOR_LIGHT.on_interrupt() }
}

/// Main entry point
#[entry]
fn main() -> ! {
    info!("Climalux firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();

    // UART0 console (GPIO0 TX, GPIO1 RX), 115200 baud default
    let tx_buf = TX_BUF.init([0u8; 512]);
    let rx_buf = RX_BUF.init([0u8; 16]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();
    info!("UART console initialized");

    // Light sensor on ADC0 (GPIO26)
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let light_channel = AdcChannel::new_pin(p.PIN_26, Pull::None);
    let light = Photoresistor::new(AdcInput::new(adc, light_channel));
    info!("ADC initialized");

    // Climate sensor on the configured GPIO. UART0, ADC0 and the
    // board-internal pins (23-25, 29) are not offered.
    let mut pins = PinBank::new([
        (2, p.PIN_2.into()),
        (3, p.PIN_3.into()),
        (4, p.PIN_4.into()),
        (5, p.PIN_5.into()),
        (6, p.PIN_6.into()),
        (7, p.PIN_7.into()),
        (8, p.PIN_8.into()),
        (9, p.PIN_9.into()),
        (10, p.PIN_10.into()),
        (11, p.PIN_11.into()),
        (12, p.PIN_12.into()),
        (13, p.PIN_13.into()),
        (14, p.PIN_14.into()),
        (15, p.PIN_15.into()),
        (16, p.PIN_16.into()),
        (17, p.PIN_17.into()),
        (18, p.PIN_18.into()),
        (19, p.PIN_19.into()),
        (20, p.PIN_20.into()),
        (21, p.PIN_21.into()),
        (22, p.PIN_22.into()),
        (27, p.PIN_27.into()),
        (28, p.PIN_28.into()),
    ]);
    let climate_pin = match pins.take(config.climate.pin) {
        Ok(pin) => pin,
        Err(e) => {
            error!(
                "GPIO{} unavailable for climate sensor ({}), using GPIO{}",
                config.climate.pin, e, DEFAULT_CLIMATE_PIN
            );
            unwrap!(pins.take(DEFAULT_CLIMATE_PIN))
        }
    };
    let line = FlexLine::new(Flex::new(climate_pin));
    let climate = Dht::with_timing(
        line,
        EmbassyClock,
        config.climate.model,
        config.climate.timing,
    );
    info!("Climate sensor initialized");

    // Climate sampler on the most urgent interrupt executor
    interrupt::SWI_IRQ_1.set_priority(nvic_priority(config.climate.priority));
    let climate_spawner = EXECUTOR_CLIMATE.start(interrupt::SWI_IRQ_1);
    climate_spawner
        .spawn(tasks::climate_task(climate, config.climate))
        .unwrap();

    // Light sampler preempts the dashboard but never the climate decode
    interrupt::SWI_IRQ_0.set_priority(nvic_priority(config.light.priority));
    let light_spawner = EXECUTOR_LIGHT.start(interrupt::SWI_IRQ_0);
    light_spawner
        .spawn(tasks::light_task(light, config.light))
        .unwrap();

    // Dashboard in thread mode
    let executor = EXECUTOR_MAIN.init(Executor::new());
    executor.run(|spawner| {
        spawner
            .spawn(tasks::dashboard_task(tx, config.dashboard))
            .unwrap();
        info!("All tasks spawned, firmware running");
    })
}

/// Map a configured priority (1-3) to an NVIC level
///
/// P0 stays free for the HAL's own interrupts.
fn nvic_priority(priority: u8) -> Priority {
    match priority {
        1 => Priority::P1,
        2 => Priority::P2,
        _ => Priority::P3,
    }
}
