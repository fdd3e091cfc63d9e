use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use governor::{clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config;
pub mod error;
pub mod handlers {
    pub mod style_advisor;
    pub mod style_advisor_dtos;
}
pub mod api {
    pub mod gemini;
}

use api::gemini::StyleModel;
use config::Config;
use handlers::style_advisor;
use handlers::style_advisor_dtos::MAX_REQUEST_BYTES;

pub type ClientLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// How often idle clients are dropped from the limiter.
pub const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

pub struct AppState {
    pub style_model: Arc<dyn StyleModel>,
    pub advisor_limiter: ClientLimiter,
    pub trust_forwarded_for: bool,
}

impl AppState {
    pub fn new(style_model: Arc<dyn StyleModel>, requests_per_minute: NonZeroU32) -> Self {
        Self {
            style_model,
            advisor_limiter: RateLimiter::keyed(Quota::per_minute(requests_per_minute)),
            trust_forwarded_for: false,
        }
    }

    pub fn trusting_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    /// Forgets clients whose quota has fully replenished. Returns how many remain.
    pub fn prune_limiter(&self) -> usize {
        self.advisor_limiter.retain_recent();
        self.advisor_limiter.shrink_to_fit();
        self.advisor_limiter.len()
    }
}

/// Prunes the advisor limiter in the background for as long as the server runs.
pub fn spawn_limiter_pruning(state: Arc<AppState>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let remaining = state.prune_limiter();
            tracing::debug!("Advisor limiter tracks {} clients", remaining);
        }
    })
}

async fn health_check() -> &'static str {
    "OK"
}

/// The JSON API on its own, without static files or browser-facing layers.
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/style-advisor",
            post(style_advisor::recommend_styles).layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES)),
        )
        .with_state(state)
}

pub fn build_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let frontend_origin: HeaderValue = config.frontend_url.parse()?;
    let index = format!("{}/index.html", config.frontend_dist.trim_end_matches('/'));
    let static_files = ServeDir::new(&config.frontend_dist).fallback(ServeFile::new(index));

    Ok(api_routes(state)
        .fallback_service(static_files)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST, axum::http::Method::OPTIONS])
                .allow_origin(AllowOrigin::exact(frontend_origin))
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                    axum::http::header::ORIGIN,
                ])
        ))
}
