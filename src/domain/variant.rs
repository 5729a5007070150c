//! Hardware variants
//!
//! Each supported board carries the constants the temperature model and the
//! ADC need. The set is closed: pick the variant once at startup.

/// ADC resolution used for temperature readings (bits)
pub const ADC_RESOLUTION_BITS: u8 = 16;

/// Number of hardware-averaged samples per reading
pub const ADC_AVERAGING: u8 = 32;

/// Supported Teensy boards and their Kinetis chips
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// Teensy 3.0 (MK20DX128)
    Teensy30,
    /// Teensy 3.1 / 3.2 (MK20DX256)
    Teensy32,
    /// Teensy 3.5 (MK64FX512)
    Teensy35,
    /// Teensy 3.6 (MK66FX1M0)
    Teensy36,
    /// Teensy LC (MKL26Z64)
    TeensyLc,
}

impl Variant {
    /// Sensor output at 25C (volts), from the chip reference manual
    pub const fn default_reference_voltage(self) -> f32 {
        match self {
            Variant::Teensy30 | Variant::Teensy32 => 0.719,
            Variant::Teensy35 | Variant::Teensy36 | Variant::TeensyLc => 0.716,
        }
    }

    /// Sensor slope (volts per degree Celsius), from the chip reference manual
    pub const fn default_slope(self) -> f32 {
        match self {
            Variant::Teensy30 | Variant::Teensy32 => 0.00172,
            Variant::Teensy35 | Variant::Teensy36 | Variant::TeensyLc => 0.00162,
        }
    }

    /// ADC channel wired to the internal temperature sensor
    pub const fn sensor_channel(self) -> u8 {
        match self {
            Variant::Teensy35 | Variant::Teensy36 => 70,
            Variant::Teensy30 | Variant::Teensy32 | Variant::TeensyLc => 38,
        }
    }

    /// Voltage corresponding to a full-scale ADC count (volts)
    ///
    /// The 3.x parts sample against the 1.195V internal bandgap; the LC has
    /// no usable internal reference and samples against VDD.
    pub const fn adc_reference_voltage(self) -> f32 {
        match self {
            Variant::TeensyLc => 3.3,
            _ => 1.195,
        }
    }

    /// Whether the bandgap must be switched on explicitly in low-power mode
    pub const fn has_switchable_bandgap(self) -> bool {
        !matches!(self, Variant::TeensyLc)
    }

    /// Kinetis part number
    pub const fn chip(self) -> &'static str {
        match self {
            Variant::Teensy30 => "MK20DX128",
            Variant::Teensy32 => "MK20DX256",
            Variant::Teensy35 => "MK64FX512",
            Variant::Teensy36 => "MK66FX1M0",
            Variant::TeensyLc => "MKL26Z64",
        }
    }
}

impl core::fmt::Display for Variant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.chip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mk20_defaults() {
        for variant in [Variant::Teensy30, Variant::Teensy32] {
            assert_eq!(variant.default_reference_voltage(), 0.719);
            assert_eq!(variant.default_slope(), 0.00172);
            assert_eq!(variant.sensor_channel(), 38);
        }
    }

    #[test]
    fn test_channel_and_reference() {
        assert_eq!(Variant::Teensy36.sensor_channel(), 70);
        assert_eq!(Variant::Teensy35.adc_reference_voltage(), 1.195);
        assert_eq!(Variant::TeensyLc.adc_reference_voltage(), 3.3);
        assert!(!Variant::TeensyLc.has_switchable_bandgap());
        for variant in [
            Variant::Teensy30,
            Variant::Teensy32,
            Variant::Teensy35,
            Variant::Teensy36,
        ] {
            assert!(variant.has_switchable_bandgap());
        }
    }

    #[test]
    fn test_display_is_chip() {
        assert_eq!(format!("{}", Variant::Teensy36), "MK66FX1M0");
        assert_eq!(format!("{}", Variant::TeensyLc), Variant::TeensyLc.chip());
    }
}
