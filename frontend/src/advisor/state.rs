use std::fmt;
use std::rc::Rc;
use serde::{Deserialize, Serialize};
use yew::Reducible;

pub const MAX_DESCRIPTION_CHARS: usize = 1000;
pub const MAX_IMAGE_BYTES: f64 = 4.0 * 1024.0 * 1024.0;
pub const ALLOWED_MEDIA_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecommendation {
    pub style_name: String,
    pub description: String,
    pub suitability: String,
}

/// A photo as base64 without the data-URL prefix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub media_type: String,
    pub data: String,
}

impl InlineImage {
    /// Splits `data:<type>;base64,<payload>` as produced by FileReader.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (header, data) = rest.split_once(',')?;
        let media_type = header.strip_suffix(";base64")?;
        if media_type.is_empty() || data.is_empty() {
            return None;
        }
        Some(Self {
            media_type: media_type.to_string(),
            data: data.to_string(),
        })
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StyleRequest {
    pub description: String,
    pub image: Option<InlineImage>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AdvisorFailure {
    Network(String),
    Status(u16),
    Malformed(String),
    Empty,
}

impl fmt::Display for AdvisorFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorFailure::Network(e) => write!(f, "network error: {}", e),
            AdvisorFailure::Status(code) => write!(f, "backend returned {}", code),
            AdvisorFailure::Malformed(e) => write!(f, "unexpected response: {}", e),
            AdvisorFailure::Empty => write!(f, "no recommendations"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestStatus {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct PendingRequest {
    pub id: RequestId,
    pub payload: StyleRequest,
}

/// Inputs, lifecycle and results of the style consultation. At most one
/// request is in flight; a response is applied only if it answers that request.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvisorState {
    pub image: Option<InlineImage>,
    pub description: String,
    pub status: RequestStatus,
    pub recommendations: Vec<StyleRecommendation>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pending: Option<PendingRequest>,
    next_id: u64,
}

impl Default for AdvisorState {
    fn default() -> Self {
        Self {
            image: None,
            description: String::new(),
            status: RequestStatus::Idle,
            recommendations: Vec::new(),
            error: None,
            notice: None,
            pending: None,
            next_id: 1,
        }
    }
}

impl AdvisorState {
    pub fn can_submit(&self) -> bool {
        let has_input = self.image.is_some() || !self.description.trim().is_empty();
        has_input && self.status != RequestStatus::Loading
    }

    pub fn set_description(&mut self, text: &str) {
        self.description = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
    }

    pub fn set_image(&mut self, image: InlineImage) {
        self.notice = None;
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Starts a request if one is allowed. The returned payload must be sent exactly once.
    pub fn submit(&mut self) -> Option<PendingRequest> {
        if !self.can_submit() {
            return None;
        }
        let id = RequestId(self.next_id);
        self.next_id += 1;
        let pending = PendingRequest {
            id,
            payload: StyleRequest {
                description: self.description.trim().to_string(),
                image: self.image.clone(),
            },
        };
        self.status = RequestStatus::Loading;
        self.recommendations.clear();
        self.error = None;
        self.pending = Some(pending.clone());
        Some(pending)
    }

    /// Applies a response. Returns false when it belongs to an abandoned request.
    pub fn complete(&mut self, id: RequestId, result: Result<Vec<StyleRecommendation>, AdvisorFailure>) -> bool {
        if self.in_flight() != Some(id) {
            return false;
        }
        self.pending = None;
        match result {
            Ok(recommendations) if !recommendations.is_empty() => {
                self.recommendations = recommendations;
                self.status = RequestStatus::Success;
            }
            Ok(_) | Err(_) => {
                self.recommendations.clear();
                self.error = Some(GENERIC_FAILURE.to_string());
                self.status = RequestStatus::Error;
            }
        }
        true
    }

    /// Back to the empty form. Any request still in flight is abandoned.
    pub fn reset(&mut self) {
        let next_id = self.next_id;
        *self = Self {
            next_id,
            ..Self::default()
        };
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.pending.as_ref().map(|pending| pending.id)
    }

    pub fn pending(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }
}

pub enum AdvisorAction {
    Describe(String),
    AttachImage(InlineImage),
    RemoveImage,
    RejectInput(String),
    Submit,
    Complete {
        id: RequestId,
        result: Result<Vec<StyleRecommendation>, AdvisorFailure>,
    },
    Reset,
}

impl Reducible for AdvisorState {
    type Action = AdvisorAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AdvisorAction::Describe(text) => next.set_description(&text),
            AdvisorAction::AttachImage(image) => next.set_image(image),
            AdvisorAction::RemoveImage => next.clear_image(),
            AdvisorAction::RejectInput(message) => next.notice = Some(message),
            AdvisorAction::Submit => {
                if next.submit().is_none() {
                    return self;
                }
            }
            AdvisorAction::Complete { id, result } => {
                if let Err(e) = &result {
                    log::error!("Style advisor request failed: {}", e);
                }
                if !next.complete(id, result) {
                    log::debug!("Ignoring response for abandoned request {:?}", id);
                    return self;
                }
            }
            AdvisorAction::Reset => next.reset(),
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recs(names: &[&str]) -> Vec<StyleRecommendation> {
        names
            .iter()
            .map(|name| StyleRecommendation {
                style_name: name.to_string(),
                description: "works with the jawline".to_string(),
                suitability: "matte clay, ten minutes".to_string(),
            })
            .collect()
    }

    fn photo() -> InlineImage {
        InlineImage {
            media_type: "image/jpeg".to_string(),
            data: "/9j/4AAQ".to_string(),
        }
    }

    #[test]
    fn nothing_to_submit_without_input() {
        let mut state = AdvisorState::default();
        assert!(!state.can_submit());
        assert!(state.submit().is_none());

        state.set_description("   \n\t ");
        assert!(!state.can_submit());
        assert_eq!(state.status, RequestStatus::Idle);
    }

    #[test]
    fn description_only_success_keeps_order() {
        let mut state = AdvisorState::default();
        state.set_description("thick wavy hair, oval face, low maintenance");
        let pending = state.submit().unwrap();
        assert_eq!(state.status, RequestStatus::Loading);
        assert_eq!(pending.payload.image, None);
        assert!(!state.can_submit());

        assert!(state.complete(pending.id, Ok(recs(&["Textured Crop", "Side Part", "Mid Fade"]))));
        assert_eq!(state.status, RequestStatus::Success);
        let names: Vec<_> = state.recommendations.iter().map(|r| r.style_name.as_str()).collect();
        assert_eq!(names, ["Textured Crop", "Side Part", "Mid Fade"]);
    }

    #[test]
    fn image_only_request_carries_the_photo() {
        let mut state = AdvisorState::default();
        state.set_image(photo());
        let pending = state.submit().unwrap();
        assert_eq!(pending.payload.description, "");
        assert_eq!(pending.payload.image, Some(photo()));
    }

    #[test]
    fn failure_shows_generic_message_and_allows_retry() {
        let mut state = AdvisorState::default();
        state.set_description("beard advice");
        let first = state.submit().unwrap();
        state.complete(first.id, Err(AdvisorFailure::Malformed("missing field `suitability`".into())));
        assert_eq!(state.status, RequestStatus::Error);
        assert_eq!(state.error.as_deref(), Some(GENERIC_FAILURE));
        assert!(state.recommendations.is_empty());

        assert!(state.can_submit());
        let second = state.submit().unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(state.error, None);
    }

    #[test]
    fn empty_result_is_an_error() {
        let mut state = AdvisorState::default();
        state.set_description("anything");
        let pending = state.submit().unwrap();
        state.complete(pending.id, Ok(Vec::new()));
        assert_eq!(state.status, RequestStatus::Error);
    }

    #[test]
    fn reset_during_flight_discards_the_late_response() {
        let mut state = AdvisorState::default();
        state.set_image(photo());
        state.set_description("short sides");
        let pending = state.submit().unwrap();

        state.reset();
        assert_eq!(state.status, RequestStatus::Idle);
        assert_eq!(state.image, None);
        assert_eq!(state.description, "");

        assert!(!state.complete(pending.id, Ok(recs(&["Crew Cut"]))));
        assert_eq!(state.status, RequestStatus::Idle);
        assert!(state.recommendations.is_empty());
    }

    #[test]
    fn reset_after_success_clears_the_form_and_results() {
        let mut state = AdvisorState::default();
        state.set_image(photo());
        state.set_description("thick wavy hair");
        let pending = state.submit().unwrap();
        assert!(state.complete(pending.id, Ok(recs(&["Textured Crop", "Side Part", "Mid Fade"]))));
        assert_eq!(state.status, RequestStatus::Success);

        let state = Rc::new(state).reduce(AdvisorAction::Reset);
        assert_eq!(state.status, RequestStatus::Idle);
        assert!(state.recommendations.is_empty());
        assert_eq!(state.description, "");
        assert_eq!(state.image, None);
        assert_eq!(state.error, None);
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn stale_response_cannot_overwrite_a_newer_request() {
        let mut state = AdvisorState::default();
        state.set_description("first");
        let first = state.submit().unwrap();
        state.reset();
        state.set_description("second");
        let second = state.submit().unwrap();

        assert!(!state.complete(first.id, Ok(recs(&["Old"]))));
        assert_eq!(state.status, RequestStatus::Loading);
        assert!(state.complete(second.id, Ok(recs(&["New"]))));
        assert_eq!(state.recommendations[0].style_name, "New");
    }

    #[test]
    fn submit_while_loading_is_refused() {
        let mut state = AdvisorState::default();
        state.set_description("fade");
        assert!(state.submit().is_some());
        assert!(state.submit().is_none());
    }

    #[test]
    fn reducer_keeps_state_identity_for_ignored_actions() {
        let state = Rc::new(AdvisorState::default());
        let after = state.clone().reduce(AdvisorAction::Submit);
        assert!(Rc::ptr_eq(&state, &after));
    }

    #[test]
    fn description_is_capped() {
        let mut state = AdvisorState::default();
        state.set_description(&"a".repeat(MAX_DESCRIPTION_CHARS + 50));
        assert_eq!(state.description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn data_url_round_trip() {
        let image = InlineImage::from_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(image.media_type, "image/png");
        assert_eq!(image.data, "iVBORw0KGgo=");
        assert_eq!(image.data_url(), "data:image/png;base64,iVBORw0KGgo=");
        assert!(InlineImage::from_data_url("not a data url").is_none());
        assert!(InlineImage::from_data_url("data:image/png,plain").is_none());
    }

    #[test]
    fn request_serializes_in_the_backend_shape() {
        let request = StyleRequest {
            description: "fade".to_string(),
            image: Some(photo()),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["image"]["mediaType"], "image/jpeg");
        assert_eq!(value["description"], "fade");
    }
}
