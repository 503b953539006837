//! Axum-based HTTP server.

use std::future::Future;
use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use gauss_service::{PollService, ServiceConfig};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::error::RpcError;
use crate::handlers;

/// Header names carrying the proxy-authenticated identity.
#[derive(Clone, Debug)]
pub struct IdentityHeaders {
    pub email: String,
    pub name: String,
}

impl IdentityHeaders {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            email: config.identity_email_header.to_ascii_lowercase(),
            name: config.identity_name_header.to_ascii_lowercase(),
        }
    }
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PollService>,
    pub identity: IdentityHeaders,
}

/// Build the API router.
pub fn router(state: AppState, cors_allow_any: bool) -> Router {
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/polls", get(handlers::upcoming_polls))
        .route("/polls/adhoc", get(handlers::adhoc_polls))
        .route("/votes", get(handlers::all_votes).post(handlers::submit_vote))
        .route("/margin-options/:match_id", get(handlers::margin_options))
        .route("/leaderboard", get(handlers::leaderboard))
        .route("/picks", get(handlers::ai_picks))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_allow_any {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE]);
        app.layer(cors)
    } else {
        app
    }
}

/// The HTTP server bound to the configured address.
pub struct RpcServer {
    pub addr: String,
    pub state: AppState,
    pub cors_allow_any: bool,
}

impl RpcServer {
    pub fn new(config: &ServiceConfig, service: Arc<PollService>) -> Self {
        Self {
            addr: config.listen_addr(),
            state: AppState {
                service,
                identity: IdentityHeaders::from_config(config),
            },
            cors_allow_any: config.cors_allow_any,
        }
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn start<F>(self, shutdown: F) -> Result<(), RpcError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = router(self.state, self.cors_allow_any);
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| RpcError::Server(format!("bind {}: {e}", self.addr)))?;
        info!(addr = %self.addr, "HTTP server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!("HTTP server stopped");
        Ok(())
    }
}
