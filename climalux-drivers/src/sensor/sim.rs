//! Scripted single-wire bus for host tests
//!
//! A virtual microsecond counter shared by a fake line and a fake clock.
//! Every clock read advances time by 1 µs, so a busy-wait loop makes
//! progress; delays jump ahead. Once the host releases the line, its
//! level follows a scripted waveform measured from the release instant.

use core::cell::Cell;

use climalux_hal::{Clock, OneWireLine, PinMode};
use heapless::Vec;

/// Sensor latency between host release and the response pulse
const RESPONSE_LATENCY_US: u32 = 20;

/// Scripted sensor output after release
#[derive(Debug, Clone)]
pub struct Waveform {
    segments: Vec<(bool, u32), 96>,
    idle_high: bool,
}

impl Waveform {
    /// Empty script; the pull-up holds the line high
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            idle_high: true,
        }
    }

    /// Complete frame: response, 40 bits, trailing low, then idle
    pub fn frame(bytes: [u8; 5]) -> Self {
        Self::new().sensor_ack().bits(&bytes).hold(false, 50)
    }

    /// Hold a level for `us` microseconds
    pub fn hold(mut self, high: bool, us: u32) -> Self {
        self.segments.push((high, us)).expect("waveform too long");
        self
    }

    /// Line stays low after the script ends
    pub fn idle_low(mut self) -> Self {
        self.idle_high = false;
        self
    }

    /// Latency, then the 80 µs low / 80 µs high acknowledgement
    pub fn sensor_ack(self) -> Self {
        self.hold(true, RESPONSE_LATENCY_US)
            .hold(false, 80)
            .hold(true, 80)
    }

    /// Data bits, MSB first: 50 µs low, then 26 µs (0) or 70 µs (1) high
    pub fn bits(mut self, bytes: &[u8]) -> Self {
        for byte in bytes {
            for i in (0..8).rev() {
                let one = byte & (1 << i) != 0;
                self = self.hold(false, 50).hold(true, if one { 70 } else { 26 });
            }
        }
        self
    }

    fn level_at(&self, offset_us: u64) -> bool {
        let mut t = 0u64;
        for &(high, us) in &self.segments {
            t += us as u64;
            if offset_us < t {
                return high;
            }
        }
        self.idle_high
    }
}

/// Shared state of the simulated bus
pub struct SimBus {
    now: Cell<u64>,
    mode: Cell<PinMode>,
    driven_high: Cell<bool>,
    released_at: Cell<u64>,
    waveform: Waveform,
}

impl SimBus {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            now: Cell::new(0),
            mode: Cell::new(PinMode::InputPullUp),
            driven_high: Cell::new(true),
            released_at: Cell::new(0),
            waveform,
        }
    }

    pub fn line(&self) -> SimLine<'_> {
        SimLine { bus: self }
    }

    pub fn clock(&self) -> SimClock<'_> {
        SimClock { bus: self }
    }

    /// Virtual time elapsed (µs)
    pub fn now(&self) -> u64 {
        self.now.get()
    }

    /// Whether the host has let go of the line
    pub fn is_released(&self) -> bool {
        self.mode.get() == PinMode::InputPullUp
    }
}

pub struct SimLine<'a> {
    bus: &'a SimBus,
}

impl OneWireLine for SimLine<'_> {
    fn set_mode(&mut self, mode: PinMode) {
        if mode == PinMode::InputPullUp && self.bus.mode.get() == PinMode::Output {
            self.bus.released_at.set(self.bus.now.get());
        }
        self.bus.mode.set(mode);
    }

    fn write(&mut self, high: bool) {
        self.bus.driven_high.set(high);
    }

    fn is_high(&mut self) -> bool {
        match self.bus.mode.get() {
            PinMode::Output => self.bus.driven_high.get(),
            PinMode::InputPullUp => {
                let offset = self.bus.now.get() - self.bus.released_at.get();
                self.bus.waveform.level_at(offset)
            }
        }
    }
}

pub struct SimClock<'a> {
    bus: &'a SimBus,
}

impl Clock for SimClock<'_> {
    fn now_micros(&mut self) -> u64 {
        let t = self.bus.now.get();
        self.bus.now.set(t + 1);
        t
    }

    fn delay_us(&mut self, us: u32) {
        self.bus.now.set(self.bus.now.get() + us as u64);
    }
}
