//! embedded-hal ADC adapter
//!
//! This adapter implements the TemperatureAdc port on top of any HAL that
//! provides an embedded-hal 0.2 `OneShot` ADC and a temperature sensor
//! channel. Averaging is done in software.

use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};

use crate::domain::UniqueId;
use crate::ports::adc::{AdcConfig, TemperatureAdc};

/// Temperature sensor sampled through an embedded-hal `OneShot` ADC
///
/// The channel is fixed by the `PIN` type; the HAL owns reference selection.
pub struct OneShotAdc<ADC, A, PIN> {
    /// ADC peripheral
    adc: A,
    /// Temperature sensor channel
    pin: PIN,
    /// Resolution of the samples the HAL returns (bits)
    hal_bits: u8,
    /// Active configuration
    config: Option<AdcConfig>,
    /// Unique ID read by the board at startup
    unique_id: UniqueId,
    _adc: PhantomData<ADC>,
}

impl<ADC, A, PIN> OneShotAdc<ADC, A, PIN>
where
    A: OneShot<ADC, u16, PIN>,
    PIN: Channel<ADC, ID = u8>,
{
    /// Create a new adapter
    ///
    /// # Arguments
    ///
    /// * `adc` - ADC peripheral
    /// * `pin` - Temperature sensor channel
    /// * `hal_bits` - Resolution of samples returned by `adc`
    /// * `unique_id` - Device unique ID, read by the board support code
    pub fn new(adc: A, pin: PIN, hal_bits: u8, unique_id: UniqueId) -> Self {
        Self {
            adc,
            pin,
            hal_bits,
            config: None,
            unique_id,
            _adc: PhantomData,
        }
    }

    /// Active configuration, if `configure` has run
    pub fn config(&self) -> Option<AdcConfig> {
        self.config
    }

    /// Release the ADC peripheral and channel
    pub fn free(self) -> (A, PIN) {
        (self.adc, self.pin)
    }
}

/// Shift `sample` from `from` bits to `to` bits, saturating at `u16::MAX`
fn rescale(sample: u32, from: u8, to: u8) -> u16 {
    let scaled = if to >= from {
        sample << (to - from)
    } else {
        sample >> (from - to)
    };
    u16::try_from(scaled).unwrap_or(u16::MAX)
}

impl<ADC, A, PIN> TemperatureAdc for OneShotAdc<ADC, A, PIN>
where
    A: OneShot<ADC, u16, PIN>,
    PIN: Channel<ADC, ID = u8>,
{
    type Error = A::Error;

    fn configure(&mut self, config: &AdcConfig) -> Result<(), Self::Error> {
        let mut config = *config;
        let channel = PIN::channel();
        if config.channel != channel {
            warn!(
                "ADC: channel {} requested, pin samples channel {}",
                config.channel,
                channel
            );
            config.channel = channel;
        }

        debug!(
            "ADC: channel {}, {} bits, {}x averaging",
            config.channel,
            config.resolution_bits,
            config.averaging
        );
        self.config = Some(config);
        Ok(())
    }

    fn read_averaged(&mut self) -> Result<u16, Self::Error> {
        let (count, bits) = match self.config {
            Some(config) => (config.averaging.max(1), config.resolution_bits),
            None => (1, self.hal_bits),
        };

        let mut sum: u32 = 0;
        for _ in 0..count {
            sum += u32::from(nb::block!(self.adc.read(&mut self.pin))?);
        }

        Ok(rescale(sum / u32::from(count), self.hal_bits, bits))
    }

    fn unique_id(&self) -> UniqueId {
        self.unique_id
    }
}
