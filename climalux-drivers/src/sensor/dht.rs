//! DHT11 / DHT22 single-wire temperature and humidity sensor
//!
//! The sensor has no clock line. One decode attempt runs this sequence,
//! busy-waiting on a [`Clock`] with every wait bounded:
//!
//! ```text
//! host:   ‾‾‾\______ reset low ______/‾‾ reset high ‾‾\ release
//! sensor:                                              ‾\__80us__/‾‾80us‾‾\
//! bit:    \__50us__/‾‾ 26us (0) or 70us (1) ‾‾\   x40, MSB first
//! ```
//!
//! The 40 bits form five bytes: four data bytes and a checksum equal to
//! their sum modulo 256.

use climalux_core::config::{DecoderTiming, SensorModel};
use climalux_core::reading::ClimateMeasurement;
use climalux_core::traits::{ClimateSensor, DecodeError};
use climalux_hal::{Clock, OneWireLine};

/// Bits in one frame
pub const FRAME_BITS: usize = 40;

/// Bytes in one frame (4 data + checksum)
pub const FRAME_BYTES: usize = 5;

/// Classify one data bit from its high-pulse width
///
/// A pulse strictly longer than the threshold is a 1. A pulse exactly at
/// the threshold is a 0. Widths between the two canonical encodings are
/// not rejected; they fall on whichever side of the threshold they land.
pub const fn classify_bit(high_us: u32, threshold_us: u32) -> bool {
    high_us > threshold_us
}

/// Sum of bytes modulo 256
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// Bit buffer for one decode attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    bytes: [u8; FRAME_BYTES],
    bits: u8,
}

impl Frame {
    /// Create an empty frame
    pub const fn new() -> Self {
        Self {
            bytes: [0; FRAME_BYTES],
            bits: 0,
        }
    }

    /// Create a complete frame from raw bytes
    pub const fn from_bytes(bytes: [u8; FRAME_BYTES]) -> Self {
        Self {
            bytes,
            bits: FRAME_BITS as u8,
        }
    }

    /// Append the next bit, MSB first; bits past the 40th are ignored
    pub fn push_bit(&mut self, one: bool) {
        let index = self.bits as usize;
        if index >= FRAME_BITS {
            return;
        }
        if one {
            self.bytes[index / 8] |= 1 << (7 - index % 8);
        }
        self.bits += 1;
    }

    /// Whether all 40 bits have been received
    pub fn is_complete(&self) -> bool {
        self.bits as usize == FRAME_BITS
    }

    /// Raw bytes received so far
    pub fn bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.bytes
    }

    /// Check the checksum byte against the four data bytes
    pub fn verify(&self) -> Result<(), DecodeError> {
        if checksum(&self.bytes[..4]) == self.bytes[4] {
            Ok(())
        } else {
            Err(DecodeError::ChecksumError)
        }
    }

    /// Convert the data bytes for the given sensor model
    pub fn measurement(&self, model: SensorModel) -> ClimateMeasurement {
        let [b0, b1, b2, b3, _] = self.bytes;
        match model {
            SensorModel::Dht11 => {
                // Integer byte followed by a tenths byte
                let humidity = b0 as f32 + b1 as f32 / 10.0;
                let celsius = b2 as f32 + b3 as f32 / 10.0;
                ClimateMeasurement::new(celsius, humidity)
            }
            SensorModel::Dht22 => {
                // 16-bit tenths, temperature sign in the top bit
                let humidity = u16::from_be_bytes([b0, b1]) as f32 / 10.0;
                let magnitude = u16::from_be_bytes([b2 & 0x7F, b3]) as f32 / 10.0;
                let celsius = if b2 & 0x80 != 0 { -magnitude } else { magnitude };
                ClimateMeasurement::new(celsius, humidity)
            }
        }
    }
}

/// Single-wire temperature/humidity sensor decoder
///
/// Owns the data line for its lifetime, so two decode attempts can never
/// overlap on the same pin.
pub struct Dht<L, C> {
    line: L,
    clock: C,
    model: SensorModel,
    timing: DecoderTiming,
}

impl<L: OneWireLine, C: Clock> Dht<L, C> {
    /// Create a decoder with the model's default timing
    pub fn new(line: L, clock: C, model: SensorModel) -> Self {
        Self::with_timing(line, clock, model, DecoderTiming::for_model(model))
    }

    /// Create a decoder with explicit timing
    pub fn with_timing(mut line: L, clock: C, model: SensorModel, timing: DecoderTiming) -> Self {
        line.release();
        Self {
            line,
            clock,
            model,
            timing,
        }
    }

    /// Sensor model
    pub fn model(&self) -> SensorModel {
        self.model
    }

    /// Protocol timing in use
    pub fn timing(&self) -> &DecoderTiming {
        &self.timing
    }

    /// Give the line and clock back
    pub fn release(self) -> (L, C) {
        (self.line, self.clock)
    }

    /// Run one decode attempt
    ///
    /// Never retries: a failure returns immediately and the line is left
    /// released. The caller's next sampling period is the retry.
    pub fn decode(&mut self) -> Result<ClimateMeasurement, DecodeError> {
        self.send_reset();
        let result = self.await_response().and_then(|()| self.read_frame());
        self.line.release();

        let frame = result?;
        frame.verify()?;
        Ok(frame.measurement(self.model))
    }

    /// Reset: drive low, drive high briefly, then release
    fn send_reset(&mut self) {
        self.line.drive_low();
        self.clock.delay_us(self.timing.reset_low_us);
        self.line.drive_high();
        self.clock.delay_us(self.timing.reset_high_us);
        self.line.release();
    }

    /// Sensor answers with a low pulse then a high pulse
    fn await_response(&mut self) -> Result<(), DecodeError> {
        let t = self.timing;
        self.hold_time(true, t.response_low_timeout_us)
            .ok_or(DecodeError::NoResponse)?;
        self.hold_time(false, t.response_low_timeout_us)
            .ok_or(DecodeError::ResponseTimeout)?;
        self.hold_time(true, t.response_high_timeout_us)
            .ok_or(DecodeError::ResponseTimeout)?;
        Ok(())
    }

    /// Read 40 bits: each is a low gap followed by a width-coded high pulse
    fn read_frame(&mut self) -> Result<Frame, DecodeError> {
        let t = self.timing;
        let mut frame = Frame::new();

        for _ in 0..FRAME_BITS {
            self.hold_time(false, t.edge_timeout_us)
                .ok_or(DecodeError::EdgeTimeout)?;
            let high_us = self
                .hold_time(true, t.edge_timeout_us)
                .ok_or(DecodeError::EdgeTimeout)?;
            frame.push_bit(classify_bit(high_us, t.bit_threshold_us));
        }

        Ok(frame)
    }

    /// Spin while the line stays at `high`, returning how long it held
    ///
    /// Returns None once more than `timeout_us` has elapsed.
    fn hold_time(&mut self, high: bool, timeout_us: u32) -> Option<u32> {
        let start = self.clock.now_micros();
        loop {
            let elapsed = self.clock.elapsed_since(start);
            if self.line.is_high() != high {
                return Some(elapsed.min(u32::MAX as u64) as u32);
            }
            if elapsed > timeout_us as u64 {
                return None;
            }
        }
    }
}

impl<L: OneWireLine, C: Clock> ClimateSensor for Dht<L, C> {
    fn read_climate(&mut self) -> Result<ClimateMeasurement, DecodeError> {
        self.decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::sim::{SimBus, Waveform};
    use proptest::prelude::*;

    /// Valid DHT11 frame for 60.2 %RH, 23.5 °C
    const FRAME_23_5: [u8; 5] = [60, 2, 23, 5, 90];

    fn decode_with(waveform: Waveform, model: SensorModel) -> (Result<ClimateMeasurement, DecodeError>, u64) {
        let bus = SimBus::new(waveform);
        let mut dht = Dht::new(bus.line(), bus.clock(), model);
        let result = dht.decode();
        (result, bus.now())
    }

    fn with_checksum(data: [u8; 4]) -> [u8; 5] {
        [data[0], data[1], data[2], data[3], checksum(&data)]
    }

    #[test]
    fn test_classify_canonical_widths() {
        assert!(!classify_bit(26, 40));
        assert!(classify_bit(70, 40));
    }

    #[test]
    fn test_classify_threshold_is_zero() {
        assert!(!classify_bit(40, 40));
        assert!(classify_bit(41, 40));
    }

    #[test]
    fn test_frame_packs_msb_first() {
        let mut frame = Frame::new();
        for bit in [true, false, false, false, false, false, false, true] {
            frame.push_bit(bit);
        }
        assert_eq!(frame.bytes()[0], 0b1000_0001);
        assert!(!frame.is_complete());

        for _ in 0..40 {
            frame.push_bit(true);
        }
        assert!(frame.is_complete());
        assert_eq!(frame.bytes()[4], 0xFF);
    }

    #[test]
    fn test_checksum_wraps() {
        assert_eq!(checksum(&[200, 100, 0, 0]), 44);
        assert_eq!(Frame::from_bytes([200, 100, 0, 0, 44]).verify(), Ok(()));
    }

    #[test]
    fn test_dht11_measurement() {
        let m = Frame::from_bytes(FRAME_23_5).measurement(SensorModel::Dht11);
        assert!((m.celsius - 23.5).abs() < 0.001);
        assert!((m.fahrenheit - 74.3).abs() < 0.001);
        assert!((m.humidity_pct - 60.2).abs() < 0.001);
    }

    #[test]
    fn test_dht22_measurement() {
        // 65.2 %RH, -10.1 °C
        let m = Frame::from_bytes(with_checksum([0x02, 0x8C, 0x80, 0x65]))
            .measurement(SensorModel::Dht22);
        assert!((m.humidity_pct - 65.2).abs() < 0.001);
        assert!((m.celsius + 10.1).abs() < 0.001);
    }

    #[test]
    fn test_decode_valid_frame() {
        let (result, _) = decode_with(Waveform::frame(FRAME_23_5), SensorModel::Dht11);
        let m = result.unwrap();
        assert!((m.celsius - 23.5).abs() < 0.001);
        assert!((m.humidity_pct - 60.2).abs() < 0.001);
    }

    #[test]
    fn test_decode_dht22_frame() {
        let bytes = with_checksum([0x01, 0xF4, 0x00, 0xFA]); // 50.0 %RH, 25.0 °C
        let (result, _) = decode_with(Waveform::frame(bytes), SensorModel::Dht22);
        let m = result.unwrap();
        assert!((m.humidity_pct - 50.0).abs() < 0.001);
        assert!((m.celsius - 25.0).abs() < 0.001);
    }

    #[test]
    fn test_decode_bad_checksum() {
        let mut bytes = FRAME_23_5;
        bytes[4] ^= 0x01;
        let (result, _) = decode_with(Waveform::frame(bytes), SensorModel::Dht11);
        assert_eq!(result, Err(DecodeError::ChecksumError));
    }

    #[test]
    fn test_no_response_is_bounded() {
        // Nothing on the bus: the pull-up keeps the line high
        let (result, elapsed) = decode_with(Waveform::new(), SensorModel::Dht11);
        assert_eq!(result, Err(DecodeError::NoResponse));

        let t = DecoderTiming::default();
        assert!(elapsed < (t.reset_low_us + t.reset_high_us + 2 * t.response_low_timeout_us) as u64);
    }

    #[test]
    fn test_line_stuck_low_after_response() {
        let waveform = Waveform::new().hold(true, 20).idle_low();
        let (result, elapsed) = decode_with(waveform, SensorModel::Dht11);
        assert_eq!(result, Err(DecodeError::ResponseTimeout));
        assert!(elapsed < 20_000);
    }

    #[test]
    fn test_ack_high_never_ends() {
        let waveform = Waveform::new().hold(true, 20).hold(false, 80);
        let (result, _) = decode_with(waveform, SensorModel::Dht11);
        assert_eq!(result, Err(DecodeError::ResponseTimeout));
    }

    #[test]
    fn test_truncated_frame_is_edge_timeout() {
        let waveform = Waveform::new().sensor_ack().bits(&[0xA5, 0x5A]);
        let (result, elapsed) = decode_with(waveform, SensorModel::Dht11);
        assert_eq!(result, Err(DecodeError::EdgeTimeout));
        assert!(elapsed < 25_000);
    }

    #[test]
    fn test_line_released_after_decode() {
        let bus = SimBus::new(Waveform::new());
        let mut dht = Dht::new(bus.line(), bus.clock(), SensorModel::Dht11);
        let _ = dht.decode();
        assert!(bus.is_released());
    }

    #[test]
    fn test_custom_timing_is_used() {
        let timing = DecoderTiming {
            reset_low_us: 1_000,
            ..DecoderTiming::default()
        };
        let bus = SimBus::new(Waveform::new());
        let mut dht = Dht::with_timing(bus.line(), bus.clock(), SensorModel::Dht11, timing);
        assert_eq!(dht.read_climate(), Err(DecodeError::NoResponse));
        assert!(bus.now() < 2_000);
    }

    #[test]
    fn test_silent_sensor_keeps_last_good_climate_on_dashboard() {
        use climalux_core::sampler::climate_reading;
        use climalux_core::{Aggregator, Reading};

        let mut agg = Aggregator::new();

        let (good, _) = decode_with(Waveform::frame(FRAME_23_5), SensorModel::Dht11);
        let first = agg.cycle(None, Some(climate_reading(good, 3000)));
        assert!(first.is_some());

        // Sensor unplugged: nothing answers the reset
        let (failed, _) = decode_with(Waveform::new(), SensorModel::Dht11);
        assert_eq!(failed, Err(DecodeError::NoResponse));
        let reading = climate_reading(failed, 6000);
        assert!(matches!(reading, Reading::Climate(c) if !c.valid));

        assert!(agg.cycle(None, Some(reading)).is_none());
        let c = agg.snapshot().climate.unwrap();
        assert!(c.valid);
        assert!((c.celsius - 23.5).abs() < 0.001);
        assert!((c.humidity_pct - 60.2).abs() < 0.001);
        assert_eq!(c.timestamp_ms, 3000);
        assert_eq!(agg.stats().rejected_invalid, 1);
    }

    proptest! {
        #[test]
        fn prop_valid_frames_decode(data in any::<[u8; 4]>()) {
            let (result, _) = decode_with(Waveform::frame(with_checksum(data)), SensorModel::Dht11);
            let m = result.unwrap();
            prop_assert_eq!(m.humidity_pct, data[0] as f32 + data[1] as f32 / 10.0);
            prop_assert_eq!(m.celsius, data[2] as f32 + data[3] as f32 / 10.0);
        }

        #[test]
        fn prop_flipped_checksum_bit_fails(data in any::<[u8; 4]>(), bit in 0u8..8) {
            let mut bytes = with_checksum(data);
            bytes[4] ^= 1 << bit;
            let (result, _) = decode_with(Waveform::frame(bytes), SensorModel::Dht11);
            prop_assert_eq!(result, Err(DecodeError::ChecksumError));
        }
    }
}
