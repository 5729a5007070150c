//! Teensy Internal Temperature Library
//!
//! This library reads and calibrates the internal temperature sensor of the
//! Kinetis chips on Teensy 3.x / LC boards, using a hexagonal architecture
//! so the calibration math runs and tests without hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - TemperatureModel entity                                       │
//! │  - Single/dual-point calibration service                        │
//! │  - Variant constants, unit conversion                           │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - TemperatureAdc: sample sensor channel, read unique ID        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters                                     │
//! │  - OneShotAdc: embedded-hal ADC                                 │
//! │  - FakeAdc: fixed sample for host tests                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`InternalTemperature`] wires an adapter to the model and is what
//! applications use.
//!
//! # Example
//!
//! ```ignore
//! let mut sensor = InternalTemperature::new(adc, Variant::Teensy36);
//! sensor.begin(PowerMode::Normal)?;
//!
//! // Device read 19.0C while a reference thermometer read 20.0C
//! sensor.single_point_calibration_celsius(20.0, 19.0, CalibrationBase::Factory)?;
//! let celsius = sensor.read_temperature_celsius()?;
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

// ============================================================================
// Hexagonal Architecture
// ============================================================================

/// Domain layer - pure calibration logic
pub mod domain;

/// Ports - traits defining the hardware boundary
pub mod ports;

/// Adapters - concrete implementations
pub mod adapters;

/// Application service combining an adapter and the model
pub mod sensor;

// Re-export key domain types
pub use domain::{
    convert_temperature, to_celsius, to_fahrenheit, CalibrationBase, CalibrationError,
    CalibrationPoint, CalibrationRecord, ParameterError, Parameters, TemperatureModel, UniqueId,
    Unit, Variant,
};

// Re-export key port traits
pub use ports::{AdcConfig, TemperatureAdc, VoltageReference};

// Re-export adapters
pub use adapters::OneShotAdc;

#[cfg(any(test, feature = "fake"))]
pub use adapters::FakeAdc;

pub use sensor::{InternalTemperature, PowerMode, RestoreError};
