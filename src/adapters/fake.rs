//! Fake ADC for host-side testing
//!
//! Returns a settable sample instead of touching hardware and records what
//! the sensor service asked of it.

use core::fmt;

use crate::domain::{UniqueId, Variant};
use crate::ports::adc::{AdcConfig, TemperatureAdc};

/// Error injected with [`FakeAdc::set_fault`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FakeAdcFault;

impl fmt::Display for FakeAdcFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fake ADC fault")
    }
}

/// A fake ADC that always returns the same sample
#[derive(Clone, Debug)]
pub struct FakeAdc {
    sample: u16,
    unique_id: UniqueId,
    config: Option<AdcConfig>,
    bandgap_enabled: bool,
    reads: u32,
    fault: bool,
}

impl FakeAdc {
    pub fn new(sample: u16, unique_id: UniqueId) -> Self {
        Self {
            sample,
            unique_id,
            config: None,
            bandgap_enabled: false,
            reads: 0,
            fault: false,
        }
    }

    /// Sample a real `variant` would return for `volts` on its sensor channel
    pub fn sample_for(variant: Variant, volts: f32) -> u16 {
        let full_scale = AdcConfig::for_variant(variant).full_scale() as f32;
        let counts = volts / variant.adc_reference_voltage() * full_scale + 0.5;
        if counts >= f32::from(u16::MAX) {
            u16::MAX
        } else if counts > 0.0 {
            counts as u16
        } else {
            0
        }
    }

    pub fn set_sample(&mut self, sample: u16) {
        self.sample = sample;
    }

    /// Set the sample to the one closest to `volts`
    pub fn set_voltage(&mut self, variant: Variant, volts: f32) {
        self.sample = Self::sample_for(variant, volts);
    }

    /// Make subsequent operations fail (or succeed again)
    pub fn set_fault(&mut self, fault: bool) {
        self.fault = fault;
    }

    /// Last configuration applied
    pub fn config(&self) -> Option<AdcConfig> {
        self.config
    }

    pub fn bandgap_enabled(&self) -> bool {
        self.bandgap_enabled
    }

    /// Number of successful reads
    pub fn reads(&self) -> u32 {
        self.reads
    }

    fn check(&self) -> Result<(), FakeAdcFault> {
        if self.fault {
            Err(FakeAdcFault)
        } else {
            Ok(())
        }
    }
}

impl TemperatureAdc for FakeAdc {
    type Error = FakeAdcFault;

    fn configure(&mut self, config: &AdcConfig) -> Result<(), Self::Error> {
        self.check()?;
        self.config = Some(*config);
        Ok(())
    }

    fn read_averaged(&mut self) -> Result<u16, Self::Error> {
        self.check()?;
        self.reads += 1;
        Ok(self.sample)
    }

    fn unique_id(&self) -> UniqueId {
        self.unique_id
    }

    fn enable_bandgap(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.bandgap_enabled = true;
        Ok(())
    }
}
