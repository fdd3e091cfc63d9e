use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use uuid::Uuid;
use crate::error::AdvisorError;
use crate::handlers::style_advisor_dtos::{StyleAdvisorRequest, StyleAdvisorResponse};
use crate::AppState;

/// Identify the caller for rate limiting. The socket peer is used unless we
/// sit behind a trusted proxy, whose appended (last) `x-forwarded-for` hop
/// names the browser. Earlier hops are client-supplied and ignored.
fn client_key(peer: SocketAddr, headers: &HeaderMap, trust_forwarded_for: bool) -> IpAddr {
    if !trust_forwarded_for {
        return peer.ip();
    }
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.rsplit(',').next())
        .and_then(|hop| hop.trim().parse().ok())
        .unwrap_or_else(|| peer.ip())
}

pub async fn recommend_styles(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<StyleAdvisorRequest>,
) -> Result<Json<StyleAdvisorResponse>, AdvisorError> {
    let client = client_key(peer, &headers, state.trust_forwarded_for);
    if state.advisor_limiter.check_key(&client).is_err() {
        tracing::warn!("Style advisor rate limit exceeded for {}", client);
        return Err(AdvisorError::RateLimited);
    }

    let prompt = request.validate()?;
    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        has_image = prompt.image.is_some(),
        description_chars = prompt.description.chars().count(),
        "Style advisor request"
    );

    let recommendations = state.style_model.recommend(prompt).await?;
    tracing::debug!(%request_id, count = recommendations.len(), "Style advisor answered");

    Ok(Json(StyleAdvisorResponse { recommendations }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "192.0.2.10:51000".parse().unwrap()
    }

    fn forwarded(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn forwarded_header_is_ignored_without_a_trusted_proxy() {
        let key = client_key(peer(), &forwarded("203.0.113.7"), false);
        assert_eq!(key, peer().ip());
    }

    #[test]
    fn trusted_proxy_hop_is_the_last_entry() {
        let key = client_key(peer(), &forwarded("10.9.9.9, 203.0.113.7"), true);
        assert_eq!(key, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn unparsable_forwarded_hop_falls_back_to_peer() {
        assert_eq!(client_key(peer(), &forwarded("unknown"), true), peer().ip());
        assert_eq!(client_key(peer(), &HeaderMap::new(), true), peer().ip());
    }
}
