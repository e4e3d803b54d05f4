use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tokio_util::sync::CancellationToken;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

pub mod auth;
mod config;
pub mod error;
pub mod request_id;
pub mod shutdown;
mod web;

pub use auth::AuthState;
pub use config::ApiGatewayConfig;

/// API gateway — owns the HTTP server and composes the request pipeline
/// around the mounted API routes.
pub struct ApiGateway {
    // Lock-free config using arc-swap for read-mostly access
    config: ArcSwap<ApiGatewayConfig>,
    auth: AuthState,
}

impl ApiGateway {
    /// Create a gateway with the given configuration and bearer-token set.
    pub fn new(config: ApiGatewayConfig, tokens: impl IntoIterator<Item = String>) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            auth: AuthState::new(tokens),
        }
    }

    /// Get the current configuration (cheap clone from ArcSwap)
    pub fn get_config(&self) -> ApiGatewayConfig {
        (**self.config.load()).clone()
    }

    /// Wrap the API routes with the gateway pipeline and the health endpoint.
    pub fn build_router(&self, api: Router) -> Router {
        let cfg = self.get_config();
        let mut router = api.route("/health", get(web::health_check));

        // Layers are added innermost-first; the effective order, outermost to
        // innermost: SetRequestId -> PropagateRequestId ->
        // push_req_id_to_extensions -> auth gate -> panic translation ->
        // trace -> timeout -> CORS -> body limit -> handlers.
        router = router.layer(RequestBodyLimitLayer::new(cfg.max_body_bytes));
        if cfg.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            cfg.request_timeout_sec,
        )));
        router = router.layer(request_id::create_trace_layer());
        router = router.layer(CatchPanicLayer::custom(error::handle_panic));
        router = router.layer(from_fn_with_state(
            self.auth.clone(),
            auth::require_bearer_token,
        ));
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));

        // Propagate copies the request id onto the response, so it must sit
        // inside SetRequestId to observe generated ids.
        let x_request_id = request_id::header();
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        router
    }

    /// Bind the socket and serve until the token is cancelled.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<()> {
        let cfg = self.get_config();
        let addr: SocketAddr = cfg
            .bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", cfg.bind_addr, e))?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server bound on {}", listener.local_addr()?);

        // Graceful shutdown on cancel
        let shutdown = {
            let cancel = cancel.clone();
            async move {
                cancel.cancelled().await;
                tracing::info!("HTTP server shutting down gracefully (cancellation)");
            }
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
