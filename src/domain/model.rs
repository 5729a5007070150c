//! Temperature model
//!
//! Holds the calibrated parameters for one sensor and guards their ranges.
//! Every mutation goes through [`TemperatureModel::set_reference_voltage`]
//! or [`TemperatureModel::set_slope`] (or the all-or-nothing
//! [`TemperatureModel::restore`]).

use core::fmt;
use core::ops::RangeInclusive;

use crate::domain::parameters::Parameters;
use crate::domain::variant::Variant;

/// Accepted range for the reference voltage (volts)
pub const REFERENCE_VOLTAGE_RANGE: RangeInclusive<f32> = 0.0..=5.0;

/// Error returned when a parameter update is rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterError {
    /// Candidate value is NaN or infinite
    NotFinite,
    /// Reference voltage outside 0-5V
    ReferenceVoltageOutOfRange,
    /// Slope more than a decade away from the variant default
    SlopeOutOfRange,
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::NotFinite => f.write_str("parameter is not finite"),
            ParameterError::ReferenceVoltageOutOfRange => {
                f.write_str("reference voltage outside 0-5V")
            }
            ParameterError::SlopeOutOfRange => {
                f.write_str("slope more than a factor of 10 from default")
            }
        }
    }
}

/// Linear voltage-to-temperature model with validated parameters
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureModel {
    variant: Variant,
    current: Parameters,
}

impl TemperatureModel {
    /// Create a model initialised to the variant's factory parameters
    pub const fn new(variant: Variant) -> Self {
        Self {
            variant,
            current: Self::factory(variant),
        }
    }

    const fn factory(variant: Variant) -> Parameters {
        Parameters::new(variant.default_reference_voltage(), variant.default_slope())
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Current reference voltage at 25C (volts)
    pub fn reference_voltage(&self) -> f32 {
        self.current.reference_voltage
    }

    /// Current slope (volts/C)
    pub fn slope(&self) -> f32 {
        self.current.slope
    }

    /// Current parameter pair
    pub fn parameters(&self) -> Parameters {
        self.current
    }

    /// Factory parameter pair for this variant
    pub fn defaults(&self) -> Parameters {
        Self::factory(self.variant)
    }

    /// Accepted slope range: one decade either side of the default
    pub fn slope_range(&self) -> RangeInclusive<f32> {
        let default = self.variant.default_slope();
        (default / 10.0)..=(default * 10.0)
    }

    /// Convert a sensor voltage to Celsius with the calibrated parameters
    #[inline]
    pub fn convert(&self, voltage: f32) -> f32 {
        self.current.convert(voltage)
    }

    /// Convert a sensor voltage to Celsius with the factory parameters
    #[inline]
    pub fn convert_uncalibrated(&self, voltage: f32) -> f32 {
        self.defaults().convert(voltage)
    }

    pub fn check_reference_voltage(&self, volts: f32) -> Result<(), ParameterError> {
        if !volts.is_finite() {
            return Err(ParameterError::NotFinite);
        }
        if !REFERENCE_VOLTAGE_RANGE.contains(&volts) {
            return Err(ParameterError::ReferenceVoltageOutOfRange);
        }
        Ok(())
    }

    pub fn check_slope(&self, volts_per_degree: f32) -> Result<(), ParameterError> {
        if !volts_per_degree.is_finite() {
            return Err(ParameterError::NotFinite);
        }
        if !self.slope_range().contains(&volts_per_degree) {
            return Err(ParameterError::SlopeOutOfRange);
        }
        Ok(())
    }

    /// Set the reference voltage, leaving it unchanged if out of range
    pub fn set_reference_voltage(&mut self, volts: f32) -> Result<(), ParameterError> {
        self.check_reference_voltage(volts)?;
        self.current.reference_voltage = volts;
        Ok(())
    }

    /// Set the slope, leaving it unchanged if out of range
    pub fn set_slope(&mut self, volts_per_degree: f32) -> Result<(), ParameterError> {
        self.check_slope(volts_per_degree)?;
        self.current.slope = volts_per_degree;
        Ok(())
    }

    /// Replace both parameters, e.g. from a stored calibration
    ///
    /// Both values are validated before either is written.
    pub fn restore(&mut self, parameters: Parameters) -> Result<(), ParameterError> {
        self.check_slope(parameters.slope)?;
        self.check_reference_voltage(parameters.reference_voltage)?;
        self.current = parameters;
        Ok(())
    }

    /// Return to the factory parameters
    pub fn reset(&mut self) {
        self.current = self.defaults();
    }
}
