use rfblinds_api::models::PulseProfile;
use rfblinds_embedded::{Error, RfTransmitter, Transmit};

/// Claims the configured BCM pin as a low output and wraps it in a transmitter.
#[cfg(feature = "rpi")]
pub fn open_transmitter(profile: &PulseProfile) -> Result<Box<dyn Transmit + Send>, Error> {
    use rppal::gpio::Gpio;
    use rppal::hal::Delay;

    let pin = Gpio::new()
        .and_then(|gpio| gpio.get(profile.pin))
        .map_err(|e| {
            tracing::error!("Failed to claim GPIO {}: {}", profile.pin, e);
            Error::PinUnavailable
        })?
        .into_output_low();

    tracing::info!("RF transmitter on GPIO {}", profile.pin);

    Ok(Box::new(RfTransmitter::new(pin, Delay::new(), profile.clone())?))
}

/// Host build without GPIO access: pulses are only traced.
#[cfg(not(feature = "rpi"))]
pub fn open_transmitter(profile: &PulseProfile) -> Result<Box<dyn Transmit + Send>, Error> {
    tracing::warn!(
        "Built without GPIO support, RF codes for pin {} are simulated",
        profile.pin
    );

    let pin = simulated::SimulatedPin::new(profile.pin);
    Ok(Box::new(RfTransmitter::new(pin, simulated::ThreadDelay, profile.clone())?))
}

#[cfg(not(feature = "rpi"))]
mod simulated {
    use std::convert::Infallible;
    use std::time::Duration;

    use embedded_hal::delay::DelayNs;
    use embedded_hal::digital::{ErrorType, OutputPin};

    pub struct SimulatedPin {
        pin: u8,
    }

    impl SimulatedPin {
        pub fn new(pin: u8) -> Self {
            Self { pin }
        }
    }

    impl ErrorType for SimulatedPin {
        type Error = Infallible;
    }

    impl OutputPin for SimulatedPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            tracing::trace!("GPIO {} low", self.pin);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            tracing::trace!("GPIO {} high", self.pin);
            Ok(())
        }
    }

    pub struct ThreadDelay;

    impl DelayNs for ThreadDelay {
        fn delay_ns(&mut self, ns: u32) {
            std::thread::sleep(Duration::from_nanos(u64::from(ns)));
        }
    }
}
