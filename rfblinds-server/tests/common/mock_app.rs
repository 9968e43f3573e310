use std::sync::Arc;

use axum::Router;
use rfblinds_server::app::create_app;
use rfblinds_server::services::CoveringRegistry;
use rfblinds_server::tests::{CodeLog, scripted_transmitter, test_covering};

pub struct MockApp {
    pub router: Router,
    pub registry: Arc<CoveringRegistry>,
    pub sent: CodeLog,
}

impl MockApp {
    pub fn new() -> Self {
        Self::with_failures(None)
    }

    /// Transmitter that fails once `fail_after` codes have been sent.
    pub fn with_failures(fail_after: Option<usize>) -> Self {
        let (transmitter, sent) = scripted_transmitter(fail_after);
        let registry = Arc::new(
            CoveringRegistry::new(
                vec![test_covering("BLIND-1"), test_covering("BLIND-2")],
                Arc::new(transmitter),
            )
            .unwrap(),
        );

        Self {
            router: create_app(registry.clone()),
            registry,
            sent,
        }
    }
}
