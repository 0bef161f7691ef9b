use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

mod config;
mod dbus_interface;
mod store;

use config::{BusKind, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("kioskd starting");
    let config = Config::from_env();

    let catalog = match &config.catalog_path {
        Some(path) => kiosk_core::load_catalog(path)
            .with_context(|| format!("loading catalog from {}", path.display()))?,
        None => kiosk_core::sample_catalog().context("building sample catalog")?,
    };
    tracing::info!(
        groups = catalog.groups().len(),
        items = catalog.all_items().count(),
        source = if config.catalog_path.is_some() { "file" } else { "sample" },
        "catalog ready"
    );

    let store = store::spawn_store(catalog, config.request_queue)?;
    let service = dbus_interface::CatalogService::new(store);

    let builder = match config.bus {
        BusKind::Session => zbus::connection::Builder::session()?,
        BusKind::System => zbus::connection::Builder::system()?,
    };
    let _conn = builder
        .name(config.bus_name.as_str())?
        .serve_at(dbus_interface::OBJECT_PATH, service)?
        .build()
        .await
        .context("registering on the message bus")?;

    tracing::info!(bus = ?config.bus, name = %config.bus_name, "kioskd ready");

    // Keep running until signaled
    tokio::signal::ctrl_c().await?;
    tracing::info!("kioskd shutting down");

    Ok(())
}
