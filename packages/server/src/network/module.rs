//! Network module with deferred startup lifecycle.
//!
//! `new()` creates resources, `start()` binds the TCP listener, and
//! `serve()` accepts connections until shutdown. The separation lets the
//! binary log the bound port (which may be OS-assigned) before serving.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use crate::storage::RecordStore;

use super::config::NetworkConfig;
use super::handlers::records::{
    __path_create_record_handler, __path_delete_record_handler, __path_list_records_handler,
    __path_update_record_handler,
};
use super::handlers::roster::__path_roster_handler;
use super::handlers::{
    create_record_handler, delete_record_handler, health_handler, list_records_handler,
    liveness_handler, readiness_handler, roster_handler, update_record_handler, AppState,
};
use super::middleware::build_http_layers;
use super::shutdown::ShutdownController;

/// OpenAPI document root; paths and schemas are collected by the router.
#[derive(OpenApi)]
#[openapi(info(
    title = "Gearbook API",
    description = "Device sign-out records over a sheet-backed store",
))]
struct ApiDoc;

/// Manages the full HTTP server lifecycle.
///
/// 1. `new()` -- allocates shared state (record store, roster, shutdown
///    controller)
/// 2. `start()` -- binds the TCP listener to the configured address
/// 3. `serve()` -- accepts connections until shutdown is signalled, then
///    drains in-flight requests
pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    records: Arc<RecordStore>,
    roster: Arc<Vec<String>>,
    shutdown: Arc<ShutdownController>,
}

impl NetworkModule {
    /// Creates a new network module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, records: Arc<RecordStore>, roster: Arc<Vec<String>>) -> Self {
        Self {
            config,
            listener: None,
            records,
            roster,
            shutdown: Arc::new(ShutdownController::new()),
        }
    }

    /// Returns a shared reference to the shutdown controller.
    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.shutdown)
    }

    /// Assembles the axum router with all routes and middleware.
    ///
    /// Routes:
    /// - `GET /records` -- list/search records
    /// - `POST /records` -- create a record
    /// - `PUT /records/{index}` -- update by display index
    /// - `DELETE /records/{index}` -- delete by display index
    /// - `GET /roster` -- configured holder names
    /// - `GET /health`, `/health/live`, `/health/ready` -- health endpoints
    /// - `/docs` -- Swagger UI over the generated OpenAPI document
    #[must_use]
    pub fn build_router(&self) -> Router {
        let state = AppState {
            records: Arc::clone(&self.records),
            roster: Arc::clone(&self.roster),
            shutdown: Arc::clone(&self.shutdown),
            config: Arc::new(self.config.clone()),
            start_time: Instant::now(),
        };

        let layers = build_http_layers(&self.config);

        let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .routes(routes!(list_records_handler, create_record_handler))
            .routes(routes!(update_record_handler, delete_record_handler))
            .routes(routes!(roster_handler))
            .split_for_parts();

        router
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .route("/health/ready", get(readiness_handler))
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api))
            .layer(layers)
            .with_state(state)
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the actual bound port, which may differ from the configured
    /// port when port 0 is used (OS-assigned ephemeral port).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., port in use).
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves connections until the shutdown future resolves, then drains.
    ///
    /// Consumes `self` because the listener moves into the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server encounters a fatal I/O error.
    ///
    /// # Panics
    ///
    /// Panics if `start()` was not called before `serve()`.
    pub async fn serve(
        mut self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let listener = self
            .listener
            .take()
            .expect("start() must be called before serve()");
        let shutdown_ctrl = Arc::clone(&self.shutdown);
        let drain_timeout = self.config.drain_timeout;

        let router = self.build_router();

        // Readiness probes pass from here on.
        shutdown_ctrl.set_ready();

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        shutdown_ctrl.trigger_shutdown();
        if shutdown_ctrl.wait_for_drain(drain_timeout).await {
            info!("all in-flight requests drained");
        } else {
            warn!("drain timeout expired with in-flight requests remaining");
        }
        Ok(())
    }
}
