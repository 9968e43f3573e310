use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::app::create_app;
use crate::configs::Settings;
use crate::services::{CoveringRegistry, TransmitterService};

pub mod app;
pub mod configs;
pub mod errors;
pub mod handles;
pub mod hardware;
pub mod services;


pub async fn run(settings: &Arc<Settings>) -> anyhow::Result<()> {
    let transmitter = hardware::open_transmitter(&settings.transmitter)?;
    let transmitter = Arc::new(TransmitterService::new(transmitter));

    let registry = Arc::new(CoveringRegistry::new(
        settings.coverings.clone(),
        transmitter,
    )?);

    for serial_number in registry.register_pending().await {
        tracing::info!("Registered covering {}", serial_number);
    }

    let app = create_app(registry);

    let ip_addr = settings.server.host.parse::<IpAddr>()?;

    let address = SocketAddr::from((ip_addr, settings.server.port));

    let listener = TcpListener::bind(&address).await?;

    tracing::info!("listening on {:?}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
