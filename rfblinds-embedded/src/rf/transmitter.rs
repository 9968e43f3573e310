use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use rfblinds_api::models::PulseProfile;

use super::{Level, Pulse, Transmit, encode};
use crate::{Error, Result};

/// Bit-bangs RF codes onto a single output pin.
///
/// The delay source is the only timing reference; scheduling latency between
/// pin writes is not compensated.
pub struct RfTransmitter<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pin: P,
    delay: D,
    profile: PulseProfile,
}

impl<P, D> RfTransmitter<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D, profile: PulseProfile) -> Result<Self> {
        if !profile.is_valid() {
            return Err(Error::InvalidProfile);
        }

        Ok(Self {
            pin,
            delay,
            profile,
        })
    }

    pub fn profile(&self) -> &PulseProfile {
        &self.profile
    }

    /// Gives the pin and delay back to the caller.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    fn set_level(&mut self, level: Level) -> Result<()> {
        let result = match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        };

        result.map_err(|_| Error::TransmitFailure)
    }

    fn drive(&mut self, pulse: &Pulse) -> Result<()> {
        self.set_level(pulse.level)?;
        self.delay.delay_us(pulse.duration_us);
        Ok(())
    }
}

impl<P, D> Transmit for RfTransmitter<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn transmit(&mut self, code: u64) -> Result<()> {
        log::debug!(
            "Transmitting RF code {} ({:b}) x{} on pin {}",
            code,
            code,
            self.profile.repeat_count,
            self.profile.pin
        );

        let pulses = encode(code, &self.profile);

        let result = self.set_level(Level::Low).and_then(|()| {
            pulses.iter().try_for_each(|pulse| self.drive(pulse))
        });

        if result.is_err() {
            log::warn!("RF code {} aborted, releasing pin {}", code, self.profile.pin);
            // Best effort, the pin already reported a failure.
            let _ = self.pin.set_low();
        }

        result
    }
}
