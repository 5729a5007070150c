//! Temperature calibration domain service
//!
//! Derives new model parameters from readings of a reference thermometer
//! taken alongside the device's own readings.
//!
//! - Single-point calibration shifts only the reference voltage.
//! - Dual-point calibration derives both slope and reference voltage.
//!
//! Either procedure can start from the current parameters (calibrations
//! compound) or from the factory parameters (each calibration starts fresh).

use core::fmt;

use crate::domain::model::{ParameterError, TemperatureModel};
use crate::domain::parameters::{Parameters, REFERENCE_TEMPERATURE_C};
use crate::domain::units::Unit;

/// Parameters a calibration is computed relative to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationBase {
    /// The model's current (possibly already calibrated) parameters
    #[default]
    Current,
    /// The variant's factory parameters
    Factory,
}

/// One reference reading paired with the device's reading at the same instant
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationPoint {
    /// Temperature reported by the reference thermometer
    pub actual: f32,
    /// Temperature reported by the device
    pub measured: f32,
}

impl CalibrationPoint {
    pub const fn new(actual: f32, measured: f32) -> Self {
        Self { actual, measured }
    }

    /// Reinterpret a point given in `unit` in Celsius
    pub fn in_celsius(self, unit: Unit) -> Self {
        Self {
            actual: unit.to_celsius(self.actual),
            measured: unit.to_celsius(self.measured),
        }
    }
}

/// Error returned when a calibration is rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Both dual-point readings were taken at the same actual temperature
    IdenticalActualTemperatures,
    /// Derived parameter failed validation
    Parameter(ParameterError),
}

impl From<ParameterError> for CalibrationError {
    fn from(e: ParameterError) -> Self {
        CalibrationError::Parameter(e)
    }
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::IdenticalActualTemperatures => {
                f.write_str("dual-point calibration needs two different actual temperatures")
            }
            CalibrationError::Parameter(e) => write!(f, "calibration rejected: {}", e),
        }
    }
}

/// Reference voltage implied by a single (actual, measured) pair
pub fn single_point(base: Parameters, point: CalibrationPoint) -> Parameters {
    let delta_temperature = point.measured - point.actual;
    let delta_voltage = delta_temperature * base.slope;

    Parameters::new(base.reference_voltage - delta_voltage, base.slope)
}

/// Slope and reference voltage implied by two (actual, measured) pairs
///
/// The slope scales by the ratio of measured to actual temperature change.
/// The reference voltage is then chosen so the voltage that produced the
/// first measured reading maps to the first actual temperature:
///
/// ```text
/// old: v = base_v25 - (measured1 - 25) * base_slope
/// new: v = new_v25  - (actual1   - 25) * new_slope
/// ```
pub fn dual_point(
    base: Parameters,
    first: CalibrationPoint,
    second: CalibrationPoint,
) -> Result<Parameters, CalibrationError> {
    let delta_actual = second.actual - first.actual;
    let delta_measured = second.measured - first.measured;

    if delta_actual == 0.0 {
        return Err(CalibrationError::IdenticalActualTemperatures);
    }

    let slope = base.slope * delta_measured / delta_actual;
    let reference_voltage = base.reference_voltage
        - (first.measured - REFERENCE_TEMPERATURE_C) * base.slope
        + (first.actual - REFERENCE_TEMPERATURE_C) * slope;

    Ok(Parameters::new(reference_voltage, slope))
}

impl TemperatureModel {
    fn base(&self, base: CalibrationBase) -> Parameters {
        match base {
            CalibrationBase::Current => self.parameters(),
            CalibrationBase::Factory => self.defaults(),
        }
    }

    /// Shift the reference voltage so `point.measured` reads as `point.actual`
    ///
    /// Temperatures in Celsius. The slope is kept from `base`; on error
    /// nothing changes.
    pub fn single_point_calibration(
        &mut self,
        point: CalibrationPoint,
        base: CalibrationBase,
    ) -> Result<(), CalibrationError> {
        let candidate = single_point(self.base(base), point);

        match self.set_reference_voltage(candidate.reference_voltage) {
            Ok(()) => {
                debug!(
                    "single-point calibration: v25 = {}",
                    candidate.reference_voltage
                );
                Ok(())
            }
            Err(e) => {
                warn!("single-point calibration rejected: {}", e);
                Err(e.into())
            }
        }
    }

    /// [`Self::single_point_calibration`] with temperatures in Fahrenheit
    pub fn single_point_calibration_fahrenheit(
        &mut self,
        point: CalibrationPoint,
        base: CalibrationBase,
    ) -> Result<(), CalibrationError> {
        self.single_point_calibration(point.in_celsius(Unit::Fahrenheit), base)
    }

    /// Derive slope and reference voltage from readings at two temperatures
    ///
    /// Temperatures in Celsius. The two actual temperatures must differ.
    /// Both derived values are validated before either is written, so a
    /// rejected calibration leaves the model untouched.
    pub fn dual_point_calibration(
        &mut self,
        first: CalibrationPoint,
        second: CalibrationPoint,
        base: CalibrationBase,
    ) -> Result<(), CalibrationError> {
        let result = dual_point(self.base(base), first, second)
            .and_then(|candidate| self.restore(candidate).map(|()| candidate).map_err(Into::into));

        match result {
            Ok(candidate) => {
                debug!(
                    "dual-point calibration: v25 = {}, slope = {}",
                    candidate.reference_voltage,
                    candidate.slope
                );
                Ok(())
            }
            Err(e) => {
                warn!("dual-point calibration rejected: {}", e);
                Err(e)
            }
        }
    }

    /// [`Self::dual_point_calibration`] with temperatures in Fahrenheit
    pub fn dual_point_calibration_fahrenheit(
        &mut self,
        first: CalibrationPoint,
        second: CalibrationPoint,
        base: CalibrationBase,
    ) -> Result<(), CalibrationError> {
        self.dual_point_calibration(
            first.in_celsius(Unit::Fahrenheit),
            second.in_celsius(Unit::Fahrenheit),
            base,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::units::to_celsius;
    use crate::domain::variant::Variant;

    const EPS: f32 = 1e-6;

    fn model() -> TemperatureModel {
        // 0.716 V, 0.00162 V/C
        TemperatureModel::new(Variant::Teensy36)
    }

    #[test]
    fn test_point_in_celsius() {
        let point = CalibrationPoint::new(212.0, 32.0).in_celsius(Unit::Fahrenheit);
        assert!((point.actual - 100.0).abs() < 1e-4);
        assert!(point.measured.abs() < 1e-4);

        let point = CalibrationPoint::new(20.0, 19.0);
        assert_eq!(point.in_celsius(Unit::Celsius), point);
    }

    #[test]
    fn test_single_point_from_factory() {
        let mut model = model();
        let before = model.convert_uncalibrated(0.716);

        let result = model.single_point_calibration(
            CalibrationPoint::new(20.0, 19.0),
            CalibrationBase::Factory,
        );

        assert_eq!(result, Ok(()));
        assert!((model.reference_voltage() - 0.71762).abs() < EPS);
        assert_eq!(model.slope(), 0.00162);
        assert!((model.convert(0.716) - (before + 1.0)).abs() < 1e-3);
    }

    #[test]
    fn test_single_point_no_delta() {
        let mut model = model();
        model.set_reference_voltage(0.73).unwrap();

        model
            .single_point_calibration(CalibrationPoint::new(22.5, 22.5), CalibrationBase::Current)
            .unwrap();
        assert_eq!(model.reference_voltage(), 0.73);

        model
            .single_point_calibration(CalibrationPoint::new(22.5, 22.5), CalibrationBase::Factory)
            .unwrap();
        assert_eq!(model.reference_voltage(), 0.716);
    }

    #[test]
    fn test_single_point_compounds_from_current() {
        let mut model = model();
        let point = CalibrationPoint::new(20.0, 19.0);

        model.single_point_calibration(point, CalibrationBase::Current).unwrap();
        model.single_point_calibration(point, CalibrationBase::Current).unwrap();
        assert!((model.reference_voltage() - (0.716 + 2.0 * 0.00162)).abs() < EPS);

        // Factory base is idempotent
        model.single_point_calibration(point, CalibrationBase::Factory).unwrap();
        model.single_point_calibration(point, CalibrationBase::Factory).unwrap();
        assert!((model.reference_voltage() - 0.71762).abs() < EPS);
    }

    #[test]
    fn test_single_point_out_of_range() {
        let mut model = model();
        // 1000C delta at 10mV/C pushes v25 well above 5V
        model.set_slope(0.01).unwrap();
        let result = model.single_point_calibration(
            CalibrationPoint::new(0.0, -1000.0),
            CalibrationBase::Current,
        );
        assert_eq!(
            result,
            Err(CalibrationError::Parameter(
                ParameterError::ReferenceVoltageOutOfRange
            ))
        );
        assert_eq!(model.reference_voltage(), 0.716);
    }

    #[test]
    fn test_single_point_fahrenheit_matches_celsius() {
        let mut celsius = model();
        let mut fahrenheit = model();

        fahrenheit
            .single_point_calibration_fahrenheit(
                CalibrationPoint::new(75.0, 76.8),
                CalibrationBase::Current,
            )
            .unwrap();
        celsius
            .single_point_calibration(
                CalibrationPoint::new(to_celsius(75.0), to_celsius(76.8)),
                CalibrationBase::Current,
            )
            .unwrap();

        assert!((fahrenheit.reference_voltage() - celsius.reference_voltage()).abs() < EPS);
        assert_eq!(fahrenheit.slope(), celsius.slope());
    }

    #[test]
    fn test_dual_point_recovers_true_sensor() {
        // A sensor whose true parameters differ from the factory ones
        let truth = Parameters::new(0.705, 0.00180);
        let mut model = model();
        let factory = model.defaults();

        // Device readings the factory model produces at two true temperatures
        let reading_at = |actual: f32| {
            let voltage = truth.reference_voltage - (actual - 25.0) * truth.slope;
            CalibrationPoint::new(actual, factory.convert(voltage))
        };

        model
            .dual_point_calibration(reading_at(10.0), reading_at(60.0), CalibrationBase::Factory)
            .unwrap();

        assert!((model.slope() - truth.slope).abs() < 1e-7);
        assert!((model.reference_voltage() - truth.reference_voltage).abs() < 1e-5);
        assert!((model.convert(0.705) - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_dual_point_identical_actual_rejected() {
        let mut model = model();
        model.set_reference_voltage(0.72).unwrap();

        let result = model.dual_point_calibration(
            CalibrationPoint::new(25.0, 25.0),
            CalibrationPoint::new(25.0, 19.0),
            CalibrationBase::Factory,
        );

        assert_eq!(result, Err(CalibrationError::IdenticalActualTemperatures));
        assert_eq!(model.reference_voltage(), 0.72);
        assert_eq!(model.slope(), 0.00162);
    }

    #[test]
    fn test_dual_point_bad_slope_leaves_model() {
        let mut model = model();

        // Measured span 20x the actual span
        let result = model.dual_point_calibration(
            CalibrationPoint::new(20.0, 20.0),
            CalibrationPoint::new(21.0, 40.0),
            CalibrationBase::Factory,
        );

        assert_eq!(
            result,
            Err(CalibrationError::Parameter(ParameterError::SlopeOutOfRange))
        );
        assert_eq!(model.parameters(), model.defaults());
    }

    #[test]
    fn test_dual_point_is_transactional() {
        let mut model = model();

        // Slope doubles (in range) but the offset lands far below 0V
        let first = CalibrationPoint::new(-500.0, -500.0);
        let second = CalibrationPoint::new(-490.0, -480.0);
        let candidate = dual_point(model.defaults(), first, second).unwrap();
        assert!(model.check_slope(candidate.slope).is_ok());
        assert!(candidate.reference_voltage < 0.0);

        let result = model.dual_point_calibration(first, second, CalibrationBase::Factory);

        assert_eq!(
            result,
            Err(CalibrationError::Parameter(
                ParameterError::ReferenceVoltageOutOfRange
            ))
        );
        assert_eq!(model.slope(), 0.00162);
        assert_eq!(model.reference_voltage(), 0.716);
    }

    #[test]
    fn test_dual_point_fahrenheit_matches_celsius() {
        let mut celsius = model();
        let mut fahrenheit = model();
        let (a1, m1, a2, m2) = (46.2, 42.3, 70.5, 68.6);

        fahrenheit
            .dual_point_calibration_fahrenheit(
                CalibrationPoint::new(a1, m1),
                CalibrationPoint::new(a2, m2),
                CalibrationBase::Factory,
            )
            .unwrap();
        celsius
            .dual_point_calibration(
                CalibrationPoint::new(to_celsius(a1), to_celsius(m1)),
                CalibrationPoint::new(to_celsius(a2), to_celsius(m2)),
                CalibrationBase::Factory,
            )
            .unwrap();

        assert!((fahrenheit.slope() - celsius.slope()).abs() < 1e-9);
        assert!((fahrenheit.reference_voltage() - celsius.reference_voltage()).abs() < EPS);
    }
}
