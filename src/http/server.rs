//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the dashboard API handlers
//! - Wire up middleware (tracing, limits, request ID)
//! - Swap in a rebuilt gateway client when the config file changes
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    routing::{any, get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::DashboardConfig;
use crate::gateway::{GatewayClient, GatewayError};
use crate::http::{handlers, proxy, request};
use crate::templates::TemplateCatalog;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ArcSwap<GatewayClient>>,
    pub templates: Arc<TemplateCatalog>,
}

/// HTTP server for the dashboard API.
pub struct HttpServer {
    router: Router,
    state: AppState,
    config: DashboardConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: DashboardConfig, templates: TemplateCatalog) -> Result<Self, GatewayError> {
        let client = GatewayClient::new(&config.gateway)?;
        let state = AppState {
            gateway: Arc::new(ArcSwap::from_pointee(client)),
            templates: Arc::new(templates),
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            state,
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DashboardConfig, state: AppState) -> Router {
        let api = Router::new()
            .route("/status", get(handlers::get_status))
            .route("/health", get(handlers::health))
            .route("/proxy/{*path}", any(proxy::proxy_handler))
            .route("/templates", get(handlers::list_templates))
            .route("/templates/{plugin}", get(handlers::get_template))
            .route("/recipes", get(handlers::list_recipes))
            .route("/recipes/{id}", get(handlers::get_recipe))
            .route("/config/diff", post(handlers::diff_documents))
            .route("/config/export", get(handlers::export_config))
            .route("/config/plan", post(handlers::plan_config))
            .route("/config/apply", post(handlers::apply_config));

        Router::new()
            .nest("/api", api)
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(request::propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %request::request_id(req),
                )
            }))
            .layer(request::set_request_id_layer())
    }

    /// Router with state and middleware applied, for serving or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Each validated config from `config_updates` replaces the gateway
    /// client; requests already in flight keep the client they started with.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<DashboardConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            key_header = %self.config.gateway.key_header,
            templates = self.state.templates.len(),
            "HTTP server starting"
        );

        let gateway = self.state.gateway.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                match GatewayClient::new(&new_config.gateway) {
                    Ok(client) => {
                        gateway.store(Arc::new(client));
                        tracing::info!(
                            timeout_secs = new_config.gateway.timeout_secs,
                            key_header = %new_config.gateway.key_header,
                            "Gateway client reloaded"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to rebuild gateway client, keeping current one")
                    }
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}
