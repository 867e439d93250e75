//! Anthropic Messages request and response bodies for Bedrock `InvokeModel`.

use archgen_core::{Error, VlmRequest, VlmResponse};
use serde::{Deserialize, Serialize};

/// API version Bedrock expects in Anthropic Messages bodies.
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Request body of an Anthropic Messages invocation.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest<'a> {
    pub anthropic_version: &'static str,
    pub system: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
    pub messages: Vec<Message<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message<'a> {
    pub role: &'static str,
    pub content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageSource<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media_type: &'a str,
    pub data: String,
}

impl<'a> MessagesRequest<'a> {
    /// Builds the body for a single user turn: the image first, then the text.
    pub fn from_request(request: &'a VlmRequest) -> Self {
        let image = ContentBlock::Image {
            source: ImageSource {
                kind: "base64",
                media_type: request.image.media_type(),
                data: request.image.to_base64(),
            },
        };
        let text = ContentBlock::Text {
            text: &request.text,
        };

        Self {
            anthropic_version: ANTHROPIC_VERSION,
            system: &request.system,
            max_tokens: request.params.max_tokens,
            temperature: request.params.temperature,
            messages: vec![Message {
                role: "user",
                content: vec![image, text],
            }],
        }
    }

    /// Serializes the body to JSON bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(self).map_err(|e| {
            Error::serialization()
                .with_message("failed to encode model request body")
                .with_source(e)
        })
    }
}

/// Response body of an Anthropic Messages invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ResponseBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseBlock {
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Decodes a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(body).map_err(|e| {
            Error::serialization()
                .with_message("failed to decode model response body")
                .with_source(e)
        })
    }

    /// Extracts the text of the first content block.
    pub fn into_response(self) -> Result<VlmResponse, Error> {
        let text = self
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| {
                Error::external_error().with_message("model response carries no text content")
            })?;

        let response = VlmResponse::new(text);
        Ok(match self.stop_reason {
            Some(reason) => response.with_stop_reason(reason),
            None => response,
        })
    }
}

#[cfg(test)]
mod tests {
    use archgen_core::ImageAttachment;
    use serde_json::json;

    use super::*;

    #[test]
    fn request_body_shape() {
        let request = VlmRequest::new(
            "answer in yaml",
            "build the template",
            ImageAttachment::png(b"\x89PNG".to_vec()),
        );
        let body = MessagesRequest::from_request(&request);
        let value: serde_json::Value = serde_json::from_slice(&body.to_vec().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "anthropic_version": "bedrock-2023-05-31",
                "system": "answer in yaml",
                "max_tokens": 4096,
                "temperature": 0.0,
                "messages": [{
                    "role": "user",
                    "content": [
                        {
                            "type": "image",
                            "source": {
                                "type": "base64",
                                "media_type": "image/png",
                                "data": "iVBORw=="
                            }
                        },
                        { "type": "text", "text": "build the template" }
                    ]
                }]
            })
        );
    }

    #[test]
    fn response_takes_first_text_block() {
        let body = br#"{
            "id": "msg_01",
            "type": "message",
            "content": [
                {"type": "text", "text": "```yaml\nFoo: Bar\n```"},
                {"type": "text", "text": "ignored"}
            ],
            "stop_reason": "end_turn"
        }"#;

        let response = MessagesResponse::from_slice(body)
            .unwrap()
            .into_response()
            .unwrap();
        assert_eq!(response.text, "```yaml\nFoo: Bar\n```");
        assert!(!response.is_truncated());
    }

    #[test]
    fn response_without_content_is_an_error() {
        let response = MessagesResponse::from_slice(br#"{"content": []}"#).unwrap();
        assert!(response.into_response().is_err());
    }

    #[test]
    fn malformed_response_is_a_serialization_error() {
        let error = MessagesResponse::from_slice(b"not json").unwrap_err();
        assert_eq!(error.kind, archgen_core::ErrorKind::Serialization);
    }
}
