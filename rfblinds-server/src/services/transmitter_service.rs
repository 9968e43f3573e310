use std::sync::Arc;

use rfblinds_embedded::{Error, Transmit};
use tokio::sync::Mutex;

/// Single entry point to the RF transmitter shared by every covering.
///
/// The lock is held for the whole pulse train, so at most one code is on air
/// at any time.
pub struct TransmitterService {
    transmitter: Arc<Mutex<Box<dyn Transmit + Send>>>,
}

impl TransmitterService {
    pub fn new(transmitter: Box<dyn Transmit + Send>) -> Self {
        Self {
            transmitter: Arc::new(Mutex::new(transmitter)),
        }
    }

    pub async fn transmit(&self, code: u64) -> Result<(), Error> {
        let mut transmitter = self.transmitter.clone().lock_owned().await;

        tracing::info!("Transmitting RF code: {}", code);

        // The guard moves into the blocking task and is released when the train ends.
        tokio::task::spawn_blocking(move || transmitter.transmit(code))
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Transmission of RF code {} aborted: {}", code, e);
                Err(Error::TransmitFailure)
            })
    }
}

#[cfg(test)]
mod tests {
    use rfblinds_embedded::{Level, encode};

    use super::*;
    use crate::tests::{PinEvent, recording_transmitter, test_profile};

    fn expected_events(code: u64) -> Vec<PinEvent> {
        let mut events = vec![PinEvent::Low];
        for pulse in encode(code, &test_profile()) {
            events.push(match pulse.level {
                Level::High => PinEvent::High,
                Level::Low => PinEvent::Low,
            });
            events.push(PinEvent::Delay(pulse.duration_us));
        }
        events
    }

    #[tokio::test]
    async fn test_transmit_records_pulse_train() {
        let (service, log) = recording_transmitter(test_profile());

        service.transmit(5).await.unwrap();

        assert_eq!(*log.lock().unwrap(), expected_events(5));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_transmissions_do_not_interleave() {
        let (service, log) = recording_transmitter(test_profile());
        let service = Arc::new(service);
        let codes: Vec<u64> = vec![1, 0b10, 0b101, 0b1011, 0b11011, 0b101101, 0b1110001, 0xff];

        let handles: Vec<_> = codes
            .iter()
            .map(|&code| {
                let service = service.clone();
                tokio::spawn(async move { service.transmit(code).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let log = log.lock().unwrap().clone();
        let mut remaining = codes.clone();
        let mut offset = 0;

        // Shorter codes are prefixes of longer ones, so take the longest complete match.
        while offset < log.len() {
            let position = remaining
                .iter()
                .enumerate()
                .filter(|&(_, &code)| log[offset..].starts_with(&expected_events(code)))
                .max_by_key(|&(_, &code)| expected_events(code).len())
                .map(|(position, _)| position)
                .unwrap_or_else(|| panic!("Interleaved pulse train at event {}", offset));
            let code = remaining.swap_remove(position);
            offset += expected_events(code).len();
        }

        assert!(remaining.is_empty(), "Codes never transmitted: {:?}", remaining);
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let (service, sent) = crate::tests::scripted_transmitter(Some(0));

        assert_eq!(service.transmit(5).await, Err(Error::TransmitFailure));
        assert!(sent.lock().unwrap().is_empty());
    }
}
