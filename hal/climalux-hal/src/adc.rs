//! ADC abstractions

/// ADC conversion failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// The converter did not produce a sample
    ConversionFailed,
}

/// Single ADC channel returning raw samples
pub trait AnalogInput {
    /// Read one raw sample (12-bit on RP2040, 0-4095)
    fn read_raw(&mut self) -> Result<u16, AdcError>;
}
