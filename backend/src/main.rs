use std::net::SocketAddr;
use std::sync::Arc;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use mankind_backend::{
    api::gemini::GeminiClient,
    build_router,
    config::Config,
    spawn_limiter_pruning,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::from_env()?;

    let _guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    });

    use tracing_subscriber::{fmt, EnvFilter};
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("info,mankind_backend=debug")
            .add_directive("hyper=warn".parse()?)
            .add_directive("reqwest=warn".parse()?),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let style_model = Arc::new(GeminiClient::new(&config));
    let state = Arc::new(
        AppState::new(style_model, config.advisor_requests_per_minute)
            .trusting_forwarded_for(config.trust_forwarded_for),
    );
    let _pruning = spawn_limiter_pruning(state.clone());
    let app = build_router(state, &config)?;

    tracing::info!(
        model = %config.gemini_model,
        dist = %config.frontend_dist,
        "Starting server on port {}",
        config.port
    );
    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
