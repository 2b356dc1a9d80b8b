//! typeahead-server: the HTTP surface in front of [`SearchService`].
//!
//! One route, `POST /api/search`, wrapped in a CORS layer that answers
//! preflight requests itself. All matching, ranking and rate limiting lives
//! in `typeahead-core`; this crate parses bodies, works out who is calling and
//! turns [`typeahead_core::SearchError`] into status codes.

pub mod client;
pub mod cors;
pub mod handlers;

use axum::routing::post;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use typeahead_core::{Config, SearchService};

pub use client::ClientKey;
pub use cors::CorsPolicy;
pub use handlers::{ApiError, SearchRequest};

/// Path of the search endpoint.
pub const SEARCH_PATH: &str = "/api/search";

/// State shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<SearchService>,
    pub cors: Arc<CorsPolicy>,
}

impl AppState {
    pub fn new(service: SearchService, config: &Config) -> Self {
        Self {
            service: Arc::new(service),
            cors: Arc::new(CorsPolicy::from_config(config)),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(SEARCH_PATH, post(handlers::search))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            cors::apply,
        ))
        .with_state(state)
}

/// Serve `state` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, path = SEARCH_PATH, "listening");

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    tracing::info!("server stopped");
    Ok(())
}
