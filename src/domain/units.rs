//! Temperature unit conversion
//!
//! All calibration math runs in degrees Celsius. Fahrenheit inputs are
//! converted at the edges with these helpers.

/// Convert degrees Fahrenheit to degrees Celsius
#[inline]
pub fn to_celsius(fahrenheit: f32) -> f32 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Convert degrees Celsius to degrees Fahrenheit
#[inline]
pub fn to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Unit a temperature value is expressed in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    Celsius,
    Fahrenheit,
}

impl Unit {
    /// Express `value` (given in this unit) in degrees Celsius
    #[inline]
    pub fn to_celsius(self, value: f32) -> f32 {
        match self {
            Unit::Celsius => value,
            Unit::Fahrenheit => to_celsius(value),
        }
    }

    /// Express a Celsius value in this unit
    #[inline]
    pub fn convert_celsius(self, celsius: f32) -> f32 {
        match self {
            Unit::Celsius => celsius,
            Unit::Fahrenheit => to_fahrenheit(celsius),
        }
    }
}
