//! Photoresistor light sensor
//!
//! An LDR in a divider on one ADC channel. The driver reports the raw
//! sample; scaling to lux is left to the consumer.

use climalux_core::traits::{HwError, LightSensor};
use climalux_hal::AnalogInput;

/// Largest sample a 12-bit ADC can produce
pub const ADC_MAX: u16 = 4095;

/// Light sensor on an ADC channel
pub struct Photoresistor<ADC> {
    adc: ADC,
}

impl<ADC: AnalogInput> Photoresistor<ADC> {
    /// Create a new light sensor on an ADC channel
    pub fn new(adc: ADC) -> Self {
        Self { adc }
    }

    /// Give the ADC channel back
    pub fn release(self) -> ADC {
        self.adc
    }
}

impl<ADC: AnalogInput> LightSensor for Photoresistor<ADC> {
    fn read_level(&mut self) -> Result<u16, HwError> {
        let raw = self.adc.read_raw().map_err(|_| HwError::Adc)?;
        // More than 12 bits means the conversion is garbage
        if raw > ADC_MAX {
            return Err(HwError::Adc);
        }
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climalux_hal::AdcError;

    /// Dummy ADC for testing (returns a fixed result)
    struct DummyAdc(Result<u16, AdcError>);

    impl AnalogInput for DummyAdc {
        fn read_raw(&mut self) -> Result<u16, AdcError> {
            self.0
        }
    }

    #[test]
    fn test_reads_raw_level() {
        let mut sensor = Photoresistor::new(DummyAdc(Ok(512)));
        assert_eq!(sensor.read_level(), Ok(512));
    }

    #[test]
    fn test_adc_failure_is_hardware_fault() {
        let mut sensor = Photoresistor::new(DummyAdc(Err(AdcError::ConversionFailed)));
        assert_eq!(sensor.read_level(), Err(HwError::Adc));
    }

    #[test]
    fn test_out_of_range_sample() {
        let mut sensor = Photoresistor::new(DummyAdc(Ok(4096)));
        assert_eq!(sensor.read_level(), Err(HwError::Adc));

        let mut sensor = Photoresistor::new(DummyAdc(Ok(ADC_MAX)));
        assert_eq!(sensor.read_level(), Ok(ADC_MAX));
    }
}
