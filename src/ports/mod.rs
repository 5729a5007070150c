//! Ports (interfaces) defining the hardware boundary
//!
//! Ports are traits that define how the domain reaches the outside world.
//! They keep the calibration logic independent of any particular HAL.
//!
//! - **TemperatureAdc**: how we sample the sensor channel and read the
//!   device unique ID (embedded-hal ADC, fake)

pub mod adc;

pub use adc::{AdcConfig, TemperatureAdc, VoltageReference};
