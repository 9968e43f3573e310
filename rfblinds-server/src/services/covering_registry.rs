use std::collections::BTreeMap;
use std::sync::Arc;

use rfblinds_api::models::CoveringConfig;

use crate::errors::CoveringError;
use crate::services::{CoveringController, TransmitterService};

/// All configured coverings keyed by serial number. They share one transmitter.
pub struct CoveringRegistry {
    coverings: BTreeMap<String, Arc<CoveringController>>,
}

impl CoveringRegistry {
    pub fn new(
        configs: Vec<CoveringConfig>,
        transmitter: Arc<TransmitterService>,
    ) -> Result<Self, CoveringError> {
        let mut coverings = BTreeMap::new();

        for config in configs {
            let serial_number = config.serial_number.clone();
            if coverings.contains_key(&serial_number) {
                return Err(CoveringError::DuplicateCovering(serial_number));
            }

            let controller = CoveringController::new(config, transmitter.clone());
            coverings.insert(serial_number, Arc::new(controller));
        }

        Ok(Self { coverings })
    }

    pub fn get(&self, serial_number: &str) -> Result<Arc<CoveringController>, CoveringError> {
        self.coverings
            .get(serial_number)
            .cloned()
            .ok_or_else(|| CoveringError::UnknownCovering(serial_number.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CoveringController>> {
        self.coverings.values()
    }

    pub fn len(&self) -> usize {
        self.coverings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coverings.is_empty()
    }

    /// Marks every covering that has not been exposed yet as registered and
    /// returns their serial numbers.
    pub async fn register_pending(&self) -> Vec<String> {
        let mut registered = Vec::new();

        for covering in self.coverings.values() {
            if !covering.is_registered().await {
                covering.set_registered(true).await;
                registered.push(covering.serial_number().to_string());
            }
        }

        registered
    }

    /// Marks a previously exposed covering as registered again.
    pub async fn restore(&self, serial_number: &str) -> Result<(), CoveringError> {
        let covering = self.get(serial_number).inspect_err(|_| {
            tracing::warn!("Cannot restore unknown covering {}", serial_number);
        })?;

        tracing::info!("Restoring covering: {}", covering.config().name);
        covering.set_registered(true).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rfblinds_api::models::MotionState;

    use super::*;
    use crate::tests::{CodeLog, scripted_transmitter, test_covering};

    fn registry(serials: &[&str]) -> Result<CoveringRegistry, CoveringError> {
        recording_registry(serials).map(|(registry, _)| registry)
    }

    fn recording_registry(serials: &[&str]) -> Result<(CoveringRegistry, CodeLog), CoveringError> {
        let (service, sent) = scripted_transmitter(None);
        let registry = CoveringRegistry::new(
            serials.iter().map(|serial| test_covering(serial)).collect(),
            Arc::new(service),
        )?;
        Ok((registry, sent))
    }

    async fn wait_until_stopped(covering: &CoveringController) {
        for _ in 0..100 {
            if covering.get_motion_state().await == MotionState::Stopped {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("{} never stopped", covering.serial_number());
    }

    #[test]
    fn test_lookup_by_serial_number() {
        let registry = registry(&["BLIND-1", "BLIND-2"]).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("BLIND-2").unwrap().serial_number(), "BLIND-2");
        assert!(matches!(
            registry.get("BLIND-3"),
            Err(CoveringError::UnknownCovering(serial)) if serial == "BLIND-3"
        ));
    }

    #[test]
    fn test_duplicate_serial_numbers_rejected() {
        let result = registry(&["BLIND-1", "BLIND-1"]);
        assert!(matches!(result, Err(CoveringError::DuplicateCovering(_))));
    }

    #[tokio::test]
    async fn test_register_pending_only_once() {
        let registry = registry(&["BLIND-1", "BLIND-2", "BLIND-3"]).unwrap();
        registry.restore("BLIND-2").await.unwrap();

        let registered = registry.register_pending().await;
        assert_eq!(registered, vec!["BLIND-1".to_string(), "BLIND-3".to_string()]);

        assert!(registry.register_pending().await.is_empty());
        for covering in registry.iter() {
            assert!(covering.is_registered().await);
        }
    }

    #[tokio::test]
    async fn test_restore_unknown_covering() {
        let registry = registry(&["BLIND-1"]).unwrap();

        let result = registry.restore("missing").await;
        assert!(matches!(result, Err(CoveringError::UnknownCovering(_))));
    }

    #[tokio::test]
    async fn test_coverings_are_independent() {
        let registry = registry(&["BLIND-1", "BLIND-2"]).unwrap();

        let error = registry.get("BLIND-1").unwrap().set_target_position(120).await;
        assert!(error.is_err());

        let other = registry.get("BLIND-2").unwrap();
        assert!(other.set_target_position(0).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_coverings_move_concurrently() {
        let (registry, sent) = recording_registry(&["BLIND-1", "BLIND-2"]).unwrap();
        let first = registry.get("BLIND-1").unwrap();
        let second = registry.get("BLIND-2").unwrap();

        // 3s and 7s of travel through the same transmitter
        let (a, b) = tokio::join!(first.set_target_position(30), second.set_target_position(70));
        a.unwrap();
        b.unwrap();

        assert_eq!(*sent.lock().unwrap(), vec![0b1011, 0b1011]);
        assert_eq!(first.get_motion_state().await, MotionState::Increasing);
        assert_eq!(second.get_motion_state().await, MotionState::Increasing);

        tokio::time::sleep(Duration::from_millis(3_000)).await;
        wait_until_stopped(&first).await;

        assert_eq!(*sent.lock().unwrap(), vec![0b1011, 0b1011, 0b1010]);
        assert_eq!(first.get_current_position().await, 30);
        assert_eq!(second.get_motion_state().await, MotionState::Increasing);
        assert_eq!(second.get_current_position().await, 0);

        tokio::time::sleep(Duration::from_millis(4_000)).await;
        wait_until_stopped(&second).await;

        assert_eq!(*sent.lock().unwrap(), vec![0b1011, 0b1011, 0b1010, 0b1010]);
        assert_eq!(first.get_current_position().await, 30);
        assert_eq!(second.get_current_position().await, 70);
        assert_eq!(second.get_target_position().await, 70);
    }
}
