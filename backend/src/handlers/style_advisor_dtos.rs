use serde::{Deserialize, Serialize};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::ImageFormat;
use crate::error::AdvisorError;

/// Longest free-form description forwarded to the model, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;
/// Largest accepted photo after base64 decoding.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;
/// Request body cap: a maximal photo in base64 plus room for the JSON envelope.
pub const MAX_REQUEST_BYTES: usize = MAX_IMAGE_BYTES / 3 * 4 + 64 * 1024;

const ALLOWED_MEDIA_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecommendation {
    pub style_name: String,
    pub description: String,
    pub suitability: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub media_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StyleAdvisorRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<InlineImage>,
}

#[derive(Debug, Serialize)]
pub struct StyleAdvisorResponse {
    pub recommendations: Vec<StyleRecommendation>,
}

/// A photo that passed the size and format checks. `data` is bare base64.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedImage {
    pub media_type: String,
    pub data: String,
}

/// Input that is safe to hand to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePrompt {
    pub description: String,
    pub image: Option<ValidatedImage>,
}

impl StyleAdvisorRequest {
    pub fn validate(self) -> Result<StylePrompt, AdvisorError> {
        let description = self.description.trim().to_string();
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(AdvisorError::DescriptionTooLong { max: MAX_DESCRIPTION_CHARS });
        }

        let image = match self.image {
            Some(image) => Some(validate_image(image)?),
            None => None,
        };

        if description.is_empty() && image.is_none() {
            return Err(AdvisorError::EmptyRequest);
        }

        Ok(StylePrompt { description, image })
    }
}

fn validate_image(image: InlineImage) -> Result<ValidatedImage, AdvisorError> {
    // Browsers hand us FileReader data URLs; accept those as well as bare base64.
    let data = match image.data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => image.data.as_str(),
    };
    let media_type = image.media_type.trim().to_ascii_lowercase();
    if !ALLOWED_MEDIA_TYPES.contains(&media_type.as_str()) {
        return Err(AdvisorError::InvalidImage(format!("unsupported media type {}", media_type)));
    }

    // Cheap length check before decoding anything.
    if data.len() / 4 * 3 > MAX_IMAGE_BYTES + 3 {
        return Err(AdvisorError::ImageTooLarge { max: MAX_IMAGE_BYTES });
    }
    let bytes = BASE64
        .decode(data)
        .map_err(|e| AdvisorError::InvalidImage(format!("invalid base64: {}", e)))?;
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AdvisorError::ImageTooLarge { max: MAX_IMAGE_BYTES });
    }

    let sniffed = image::guess_format(&bytes)
        .map_err(|_| AdvisorError::InvalidImage("unrecognised image data".to_string()))?;
    let sniffed_type = match sniffed {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::WebP => "image/webp",
        other => {
            return Err(AdvisorError::InvalidImage(format!("unsupported image format {:?}", other)));
        }
    };
    if sniffed_type != media_type {
        return Err(AdvisorError::InvalidImage(format!(
            "declared {} but data is {}",
            media_type, sniffed_type
        )));
    }

    Ok(ValidatedImage {
        media_type,
        data: data.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn png_base64() -> String {
        BASE64.encode(PNG_HEADER)
    }

    #[test]
    fn description_only_is_accepted_and_trimmed() {
        let prompt = StyleAdvisorRequest {
            description: "  thick wavy hair, oval face, low maintenance \n".to_string(),
            image: None,
        }
        .validate()
        .unwrap();
        assert_eq!(prompt.description, "thick wavy hair, oval face, low maintenance");
        assert!(prompt.image.is_none());
    }

    #[test]
    fn image_only_is_accepted() {
        let prompt = StyleAdvisorRequest {
            description: String::new(),
            image: Some(InlineImage { media_type: "image/png".to_string(), data: png_base64() }),
        }
        .validate()
        .unwrap();
        assert_eq!(prompt.description, "");
        assert_eq!(prompt.image.unwrap().media_type, "image/png");
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        let prompt = StyleAdvisorRequest {
            description: String::new(),
            image: Some(InlineImage {
                media_type: "IMAGE/PNG".to_string(),
                data: format!("data:image/png;base64,{}", png_base64()),
            }),
        }
        .validate()
        .unwrap();
        assert_eq!(prompt.image.unwrap().data, png_base64());
    }

    #[test]
    fn blank_request_is_rejected() {
        let err = StyleAdvisorRequest { description: "   ".to_string(), image: None }
            .validate()
            .unwrap_err();
        assert!(matches!(err, AdvisorError::EmptyRequest));
    }

    #[test]
    fn overlong_description_is_rejected() {
        let err = StyleAdvisorRequest { description: "a".repeat(MAX_DESCRIPTION_CHARS + 1), image: None }
            .validate()
            .unwrap_err();
        assert!(matches!(err, AdvisorError::DescriptionTooLong { .. }));
    }

    #[test]
    fn mismatched_media_type_is_rejected() {
        let err = StyleAdvisorRequest {
            description: String::new(),
            image: Some(InlineImage { media_type: "image/jpeg".to_string(), data: png_base64() }),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidImage(_)));
    }

    #[test]
    fn unsupported_media_type_is_rejected() {
        let err = StyleAdvisorRequest {
            description: "short fade".to_string(),
            image: Some(InlineImage { media_type: "image/gif".to_string(), data: png_base64() }),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidImage(_)));
    }

    #[test]
    fn oversized_image_is_rejected_before_decoding() {
        let err = StyleAdvisorRequest {
            description: String::new(),
            image: Some(InlineImage {
                media_type: "image/png".to_string(),
                data: "A".repeat(MAX_IMAGE_BYTES / 3 * 4 + 400),
            }),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AdvisorError::ImageTooLarge { .. }));
    }

    #[test]
    fn recommendation_uses_camel_case_on_the_wire() {
        let rec = StyleRecommendation {
            style_name: "Textured Crop".to_string(),
            description: "Short sides, loose top".to_string(),
            suitability: "Works with thick hair".to_string(),
        };
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["styleName"], "Textured Crop");
    }
}
