use serde::Deserialize;
use crate::advisor::state::{AdvisorFailure, StyleRecommendation, StyleRequest};
use crate::utils::api::Api;

#[derive(Deserialize)]
struct StyleAdvisorResponse {
    recommendations: Vec<StyleRecommendation>,
}

/// Accepts only `{"recommendations": [...]}` with every field present.
pub fn parse_style_response(text: &str) -> Result<Vec<StyleRecommendation>, AdvisorFailure> {
    let response: StyleAdvisorResponse =
        serde_json::from_str(text).map_err(|e| AdvisorFailure::Malformed(e.to_string()))?;
    if response.recommendations.is_empty() {
        return Err(AdvisorFailure::Empty);
    }
    Ok(response.recommendations)
}

pub async fn request_styles(request: &StyleRequest) -> Result<Vec<StyleRecommendation>, AdvisorFailure> {
    let response = Api::post("/api/style-advisor")
        .header("Accept", "application/json")
        .json(request)
        .map_err(|e| AdvisorFailure::Malformed(e.to_string()))?
        .send()
        .await
        .map_err(|e| AdvisorFailure::Network(e.to_string()))?;

    if !response.ok() {
        return Err(AdvisorFailure::Status(response.status()));
    }
    let text = response
        .text()
        .await
        .map_err(|e| AdvisorFailure::Network(e.to_string()))?;
    parse_style_response(&text)
}
