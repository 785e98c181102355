//! Gearbook server binary.
//!
//! Wires configuration, logging, metrics, the selected sheet store, and the
//! network module, then serves until SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gearbook_server::config::{ServerConfig, StoreBackend};
use gearbook_server::network::NetworkModule;
use gearbook_server::storage::{
    GoogleSheetConfig, GoogleSheetStore, MemorySheetStore, RecordStore, ServiceAccountAuth,
    SheetStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_tracing(config.log_json);

    if let Some(addr) = config.metrics_addr {
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("installing prometheus exporter")?;
        info!(%addr, "prometheus exporter listening");
    }

    let sheet = build_sheet_store(&config).await?;
    let records = Arc::new(RecordStore::new(sheet));
    let roster = Arc::new(config.roster.clone());

    let mut network = NetworkModule::new(config.network(), records, roster);
    let port = network.start().await?;
    info!(host = %config.host, port, store = ?config.store, "gearbook serving");

    network.serve(shutdown_signal()).await
}

/// Builds the configured sheet store.
///
/// The memory store starts with the reserved title/header region so it
/// behaves like a freshly provisioned production document.
async fn build_sheet_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn SheetStore>> {
    match config.store {
        StoreBackend::Memory => Ok(Arc::new(MemorySheetStore::seeded(
            &gearbook_core::sheet::SheetLayout::default(),
        ))),
        StoreBackend::Google => {
            let spreadsheet_id = config
                .spreadsheet_id
                .clone()
                .context("--spreadsheet-id is required with the google store")?;
            let http = reqwest::Client::new();
            let auth = ServiceAccountAuth::from_key_file(&config.credentials_path, http.clone())
                .await
                .context("loading service-account credentials")?;

            Ok(Arc::new(GoogleSheetStore::new(
                GoogleSheetConfig {
                    spreadsheet_id,
                    sheet_title: config.sheet_title.clone(),
                    sheet_grid_id: config.sheet_grid_id,
                },
                auth,
                http,
            )))
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Resolves on SIGINT (Ctrl-C) or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
