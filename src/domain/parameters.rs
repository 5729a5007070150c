//! Calibration parameters and persisted calibration records
//!
//! The temperature model is linear:
//! `temperature = 25 - (voltage - reference_voltage) / slope`
//! and these two values are all a calibration produces.

/// Temperature at which `reference_voltage` is specified (degrees Celsius)
pub const REFERENCE_TEMPERATURE_C: f32 = 25.0;

/// Convert a sensor voltage to degrees Celsius
///
/// Pure. Any finite input is accepted, including voltages far outside what
/// the sensor can physically produce.
#[inline]
pub fn convert_temperature(voltage: f32, reference_voltage: f32, slope: f32) -> f32 {
    REFERENCE_TEMPERATURE_C - (voltage - reference_voltage) / slope
}

/// The two parameters of the linear sensor model
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameters {
    /// Sensor output at 25C (volts)
    pub reference_voltage: f32,
    /// Sensor output change per degree Celsius (volts/C)
    pub slope: f32,
}

impl Parameters {
    pub const fn new(reference_voltage: f32, slope: f32) -> Self {
        Self {
            reference_voltage,
            slope,
        }
    }

    /// Convert a sensor voltage to degrees Celsius with these parameters
    #[inline]
    pub fn convert(&self, voltage: f32) -> f32 {
        convert_temperature(voltage, self.reference_voltage, self.slope)
    }
}

/// Device unique identifier (low word of the SIM UID register)
///
/// Used to tie stored calibration values to one physical chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniqueId(pub u32);

impl UniqueId {
    pub const fn value(&self) -> u32 {
        self.0
    }
}

/// Calibration parameters bound to the unit they were measured on
///
/// Storing the record is up to the application (EEPROM, flash, host).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationRecord {
    pub unique_id: UniqueId,
    pub parameters: Parameters,
}

impl CalibrationRecord {
    pub const fn new(unique_id: UniqueId, parameters: Parameters) -> Self {
        Self {
            unique_id,
            parameters,
        }
    }

    /// Whether this record was taken on the unit identified by `unique_id`
    pub fn matches(&self, unique_id: UniqueId) -> bool {
        self.unique_id == unique_id
    }
}
