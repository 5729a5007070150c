//! Internal temperature sensor service
//!
//! Ties an ADC adapter to the temperature model: reads the sensor voltage,
//! converts it, and exposes calibration on top.

use core::fmt;

use crate::domain::{
    CalibrationBase, CalibrationError, CalibrationPoint, CalibrationRecord, ParameterError,
    TemperatureModel, UniqueId, Unit, Variant,
};
use crate::ports::adc::{AdcConfig, TemperatureAdc};

/// CPU power mode the application runs in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Normal run mode
    #[default]
    Normal,
    /// Very-low-power run (VLPR), including a 2 MHz core clock
    LowPower,
}

/// Error returned when restoring a stored calibration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RestoreError {
    /// Record was taken on a different unit
    ForeignUnit,
    /// Stored parameters failed validation
    Parameter(ParameterError),
}

impl From<ParameterError> for RestoreError {
    fn from(e: ParameterError) -> Self {
        RestoreError::Parameter(e)
    }
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestoreError::ForeignUnit => f.write_str("calibration record is for another unit"),
            RestoreError::Parameter(e) => write!(f, "stored calibration rejected: {}", e),
        }
    }
}

/// Internal temperature sensor of one Teensy board
///
/// Reads go through the ADC adapter `A`; calibration only touches the model.
pub struct InternalTemperature<A> {
    /// ADC adapter
    adc: A,
    /// ADC settings for this board
    config: AdcConfig,
    /// Calibrated model
    model: TemperatureModel,
}

impl<A: TemperatureAdc> InternalTemperature<A> {
    /// Create a sensor with factory calibration
    ///
    /// Call [`Self::begin`] before reading.
    pub fn new(adc: A, variant: Variant) -> Self {
        Self {
            adc,
            config: AdcConfig::for_variant(variant),
            model: TemperatureModel::new(variant),
        }
    }

    /// Prepare the ADC for temperature readings
    ///
    /// In low-power mode the bandgap is switched on first on parts that
    /// gate it.
    pub fn begin(&mut self, power_mode: PowerMode) -> Result<(), A::Error> {
        let variant = self.model.variant();

        if power_mode == PowerMode::LowPower && variant.has_switchable_bandgap() {
            debug!("enabling bandgap for low-power mode");
            self.adc.enable_bandgap()?;
        }

        self.adc.configure(&self.config)?;

        info!(
            "{} internal temperature: v25 = {}, slope = {}",
            variant,
            self.model.reference_voltage(),
            self.model.slope()
        );
        Ok(())
    }

    pub fn variant(&self) -> Variant {
        self.model.variant()
    }

    /// Sample the sensor and return its output in volts
    pub fn read_raw_voltage(&mut self) -> Result<f32, A::Error> {
        let sample = self.adc.read_averaged()?;
        let volts_per_count =
            self.variant().adc_reference_voltage() / self.config.full_scale() as f32;
        let volts = volts_per_count * f32::from(sample);

        trace!("sample {} = {} V", sample, volts);
        Ok(volts)
    }

    /// Read the calibrated temperature in `unit`
    pub fn read_temperature(&mut self, unit: Unit) -> Result<f32, A::Error> {
        let volts = self.read_raw_voltage()?;
        let celsius = self.model.convert(volts);
        Ok(unit.convert_celsius(celsius))
    }

    /// Read the temperature in `unit` using factory parameters
    pub fn read_uncalibrated_temperature(&mut self, unit: Unit) -> Result<f32, A::Error> {
        let volts = self.read_raw_voltage()?;
        let celsius = self.model.convert_uncalibrated(volts);
        Ok(unit.convert_celsius(celsius))
    }

    pub fn read_temperature_celsius(&mut self) -> Result<f32, A::Error> {
        self.read_temperature(Unit::Celsius)
    }

    pub fn read_temperature_fahrenheit(&mut self) -> Result<f32, A::Error> {
        self.read_temperature(Unit::Fahrenheit)
    }

    pub fn read_uncalibrated_temperature_celsius(&mut self) -> Result<f32, A::Error> {
        self.read_uncalibrated_temperature(Unit::Celsius)
    }

    pub fn read_uncalibrated_temperature_fahrenheit(&mut self) -> Result<f32, A::Error> {
        self.read_uncalibrated_temperature(Unit::Fahrenheit)
    }

    /// Convert a sensor voltage to Celsius with the calibrated parameters
    pub fn convert_temperature_celsius(&self, volts: f32) -> f32 {
        self.model.convert(volts)
    }

    /// Convert a sensor voltage to Celsius with factory parameters
    pub fn convert_uncalibrated_temperature_celsius(&self, volts: f32) -> f32 {
        self.model.convert_uncalibrated(volts)
    }

    pub fn single_point_calibration_celsius(
        &mut self,
        actual: f32,
        measured: f32,
        base: CalibrationBase,
    ) -> Result<(), CalibrationError> {
        self.model
            .single_point_calibration(CalibrationPoint::new(actual, measured), base)
    }

    pub fn single_point_calibration_fahrenheit(
        &mut self,
        actual: f32,
        measured: f32,
        base: CalibrationBase,
    ) -> Result<(), CalibrationError> {
        self.model
            .single_point_calibration_fahrenheit(CalibrationPoint::new(actual, measured), base)
    }

    pub fn dual_point_calibration_celsius(
        &mut self,
        first: CalibrationPoint,
        second: CalibrationPoint,
        base: CalibrationBase,
    ) -> Result<(), CalibrationError> {
        self.model.dual_point_calibration(first, second, base)
    }

    pub fn dual_point_calibration_fahrenheit(
        &mut self,
        first: CalibrationPoint,
        second: CalibrationPoint,
        base: CalibrationBase,
    ) -> Result<(), CalibrationError> {
        self.model
            .dual_point_calibration_fahrenheit(first, second, base)
    }

    pub fn reference_voltage(&self) -> f32 {
        self.model.reference_voltage()
    }

    pub fn slope(&self) -> f32 {
        self.model.slope()
    }

    pub fn set_reference_voltage(&mut self, volts: f32) -> Result<(), ParameterError> {
        self.model.set_reference_voltage(volts)
    }

    pub fn set_slope(&mut self, volts_per_degree: f32) -> Result<(), ParameterError> {
        self.model.set_slope(volts_per_degree)
    }

    /// Device unique ID, for keying stored calibrations
    pub fn unique_id(&self) -> UniqueId {
        self.adc.unique_id()
    }

    /// Current calibration, tagged with this unit's ID
    pub fn calibration_record(&self) -> CalibrationRecord {
        CalibrationRecord::new(self.unique_id(), self.model.parameters())
    }

    /// Apply a stored calibration taken on this unit
    pub fn restore(&mut self, record: &CalibrationRecord) -> Result<(), RestoreError> {
        if !record.matches(self.unique_id()) {
            warn!(
                "ignoring calibration for unit {}",
                record.unique_id.value()
            );
            return Err(RestoreError::ForeignUnit);
        }
        self.model.restore(record.parameters)?;
        Ok(())
    }

    pub fn model(&self) -> &TemperatureModel {
        &self.model
    }

    pub fn adc(&self) -> &A {
        &self.adc
    }

    /// Release the ADC adapter
    pub fn release(self) -> A {
        self.adc
    }
}
