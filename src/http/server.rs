//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the resolve handler and admin API
//! - Wire up middleware (request ID, tracing, timeout)
//! - Resolve every request against the site-aware router
//! - Swap in a new router generation when the config changes
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin;
use crate::config::SiteRouterConfig;
use crate::http::request::{RequestIdExt, propagate_request_id_layer, set_request_id_layer};
use crate::http::response::{MatchResponse, NotFoundResponse};
use crate::observability::metrics;
use crate::routing::{PatternError, SiteAwareRouter, SiteResolver};

/// One immutable generation of configuration and routes.
#[derive(Debug)]
pub struct SiteState {
    pub config: SiteRouterConfig,
    pub router: SiteAwareRouter,
}

impl SiteState {
    pub fn build(config: SiteRouterConfig) -> Result<Self, PatternError> {
        let router = SiteAwareRouter::from_config(&config)?;
        metrics::record_routes(&router);
        Ok(Self { config, router })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<SiteState>>,
}

impl AppState {
    pub fn new(state: SiteState) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(state)),
        }
    }

    /// Build a new generation from `config` and publish it.
    /// The current generation stays live if the build fails.
    pub fn reload(&self, config: SiteRouterConfig) -> Result<(), PatternError> {
        let next = SiteState::build(config)?;
        self.inner.store(Arc::new(next));
        Ok(())
    }
}

/// HTTP front for the site router.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: SiteRouterConfig) -> Result<Self, PatternError> {
        let state = AppState::new(SiteState::build(config)?);
        let router = {
            let current = state.inner.load();
            Self::build_router(&current.config, state.clone())
        };
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SiteRouterConfig, state: AppState) -> Router {
        let mut app = Router::new();
        if config.admin.enabled {
            app = app.merge(admin::setup_admin_router(state.clone()));
        }

        app.fallback(resolve_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The Axum router, for embedding or in-process testing.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` fires, applying config updates as they arrive.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<SiteRouterConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                match state.reload(config) {
                    Ok(()) => {
                        metrics::record_reload(true);
                        tracing::info!("Routes reloaded");
                    }
                    Err(e) => {
                        metrics::record_reload(false);
                        tracing::error!(error = %e, "Reload rejected, keeping current routes");
                    }
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the request path in its own site's route table.
async fn resolve_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let path = request.uri().path().to_string();
    let current = state.inner.load();
    let router = &current.router;

    match router.match_path(&path) {
        Some(matched) => {
            tracing::debug!(
                request_id = %request.request_id(),
                path = %path,
                route = %matched.route,
                locale = %matched.locale,
                "Route matched"
            );
            metrics::record_request(&matched.locale, true, start_time);
            let alternates = router.alternates(&matched);
            Json(MatchResponse { matched, alternates }).into_response()
        }
        None => {
            let locale = router.sites().locale_for_path(&path);
            tracing::debug!(
                request_id = %request.request_id(),
                path = %path,
                locale = %locale,
                "No route matched"
            );
            metrics::record_request(locale, false, start_time);
            NotFoundResponse::new(locale, path.as_str()).into_response()
        }
    }
}
