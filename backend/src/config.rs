use std::num::NonZeroU32;
use anyhow::Context;
use nonzero_ext::nonzero;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub frontend_url: String,
    pub frontend_dist: String,
    pub port: u16,
    pub advisor_requests_per_minute: NonZeroU32,
    /// Only behind a reverse proxy that appends the caller to `x-forwarded-for`.
    pub trust_forwarded_for: bool,
    pub sentry_dsn: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY must be set")?;

        let port = match std::env::var("PORT") {
            Ok(port) => port.parse().with_context(|| format!("Invalid PORT: {}", port))?,
            Err(_) => 3000,
        };

        let advisor_requests_per_minute = match std::env::var("ADVISOR_REQUESTS_PER_MINUTE") {
            Ok(raw) => raw
                .parse::<NonZeroU32>()
                .with_context(|| format!("Invalid ADVISOR_REQUESTS_PER_MINUTE: {}", raw))?,
            Err(_) => nonzero!(5u32),
        };

        let trust_forwarded_for = matches!(
            std::env::var("TRUST_FORWARDED_FOR").as_deref(),
            Ok("1") | Ok("true")
        );

        Ok(Self {
            gemini_api_key,
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            frontend_url: std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
            frontend_dist: std::env::var("FRONTEND_DIST").unwrap_or_else(|_| "../frontend/dist".to_string()),
            port,
            advisor_requests_per_minute,
            trust_forwarded_for,
            sentry_dsn: std::env::var("SENTRY_DSN").ok().filter(|dsn| !dsn.is_empty()),
        })
    }
}
