//! Domain layer - pure calibration logic independent of hardware
//!
//! This module contains the temperature model, the calibration procedures
//! that adjust it, and the per-board constants it is built from.

pub mod calibration;
pub mod model;
pub mod parameters;
pub mod units;
pub mod variant;

pub use calibration::{CalibrationBase, CalibrationError, CalibrationPoint};
pub use model::{ParameterError, TemperatureModel};
pub use parameters::{convert_temperature, CalibrationRecord, Parameters, UniqueId};
pub use units::{to_celsius, to_fahrenheit, Unit};
pub use variant::Variant;
