//! ADC port - abstraction for sampling the internal temperature sensor
//!
//! This trait lets the sensor service read the temperature channel without
//! knowing which HAL (or fake) performs the conversion.

use crate::domain::variant::{Variant, ADC_AVERAGING, ADC_RESOLUTION_BITS};
use crate::domain::UniqueId;

/// Voltage reference the ADC converts against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VoltageReference {
    /// Internal 1.2V bandgap (VREF_OUT)
    Internal,
    /// Supply voltage (VDD)
    Supply,
}

/// ADC settings for a temperature reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcConfig {
    /// Channel wired to the temperature sensor
    pub channel: u8,
    /// Conversion reference
    pub reference: VoltageReference,
    /// Sample resolution in bits
    pub resolution_bits: u8,
    /// Number of conversions averaged into one sample
    pub averaging: u8,
}

impl AdcConfig {
    /// Settings used for the internal temperature sensor of `variant`
    pub const fn for_variant(variant: Variant) -> Self {
        Self {
            channel: variant.sensor_channel(),
            reference: VoltageReference::Internal,
            resolution_bits: ADC_RESOLUTION_BITS,
            averaging: ADC_AVERAGING,
        }
    }

    /// Count corresponding to the reference voltage (`1 << resolution_bits`)
    pub const fn full_scale(&self) -> u32 {
        1 << self.resolution_bits
    }
}

/// Port for sampling the temperature channel
///
/// Implementations block until the averaged sample is ready.
///
/// # Example Implementation
///
/// ```ignore
/// impl TemperatureAdc for KinetisAdc {
///     type Error = Infallible;
///
///     fn configure(&mut self, config: &AdcConfig) -> Result<(), Infallible> {
///         self.adc.set_reference(config.reference);
///         self.adc.set_resolution(config.resolution_bits);
///         self.adc.set_averaging(config.averaging);
///         self.channel = config.channel;
///         Ok(())
///     }
///
///     fn read_averaged(&mut self) -> Result<u16, Infallible> {
///         Ok(self.adc.read(self.channel))
///     }
///
///     fn unique_id(&self) -> UniqueId { UniqueId(self.sim.uidl.read()) }
/// }
/// ```
pub trait TemperatureAdc {
    /// Adapter fault, passed through to callers unchanged
    type Error;

    /// Select channel, reference, resolution and averaging
    fn configure(&mut self, config: &AdcConfig) -> Result<(), Self::Error>;

    /// Read one averaged sample at the configured resolution
    fn read_averaged(&mut self) -> Result<u16, Self::Error>;

    /// Read the device unique identifier
    fn unique_id(&self) -> UniqueId;

    /// Keep the bandgap reference powered in low-power run modes
    ///
    /// Only needed on parts whose bandgap is gated in VLPR.
    fn enable_bandgap(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_for_variant() {
        let config = AdcConfig::for_variant(Variant::Teensy35);
        assert_eq!(config.channel, 70);
        assert_eq!(config.reference, VoltageReference::Internal);
        assert_eq!(config.resolution_bits, 16);
        assert_eq!(config.averaging, 32);
        assert_eq!(config.full_scale(), 0x10000);
    }
}
