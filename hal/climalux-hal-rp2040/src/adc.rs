//! ADC channel reads
//!
//! RP2040 has a single ADC with 5 channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//! - ADC4: Internal temperature sensor

use climalux_hal::{AdcError, AnalogInput};
use embassy_rp::adc::{Adc, Blocking, Channel};

/// One ADC channel with exclusive use of the converter
pub struct AdcInput<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> AdcInput<'d> {
    /// Pair the converter with the channel it will sample
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogInput for AdcInput<'_> {
    fn read_raw(&mut self) -> Result<u16, AdcError> {
        self.adc
            .blocking_read(&mut self.channel)
            .map_err(|_| AdcError::ConversionFailed)
    }
}

