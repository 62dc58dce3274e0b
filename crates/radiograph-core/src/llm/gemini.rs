//! Gemini client using the `generateContent` REST API.
//!
//! Sends the prompt and a base64 inline image as two parts of one user turn.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::credential::Credential;
use super::provider::{ClientFactory, GenerateRequest, GenerateResponse, InferenceClient};
use crate::config::GeminiConfig;
use crate::error::{GenerationError, InitializationError};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider bound to one credential.
pub struct GeminiClient {
    endpoint: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Build a client. Fails if the credential cannot be sent as a header or
    /// the underlying HTTP client cannot be constructed.
    pub fn new(config: &GeminiConfig, credential: &Credential) -> Result<Self, InitializationError> {
        let mut key = HeaderValue::from_str(credential.expose())
            .map_err(|_| InitializationError::MalformedCredential)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| InitializationError::Client(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.endpoint, model)
    }

    /// Check that the service accepts the credential for `model`.
    pub async fn verify(&self, model: &str) -> Result<(), InitializationError> {
        let resp = self
            .client
            .get(self.model_url(model))
            .send()
            .await
            .map_err(|e| InitializationError::Unreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(InitializationError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

// --- Request types ---

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

// --- Response types ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    model_version: Option<String>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Join every text part of the first candidate, without trimming.
    fn into_text(self) -> Result<(String, Option<String>), GenerationError> {
        let model_version = self.model_version;
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map(|r| format!("prompt blocked ({r})"))
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(GenerationError::Empty(reason));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            let reason = candidate
                .finish_reason
                .map(|r| format!("no text content (finish reason {r})"))
                .unwrap_or_else(|| "no text content generated".to_string());
            return Err(GenerationError::Empty(reason));
        }
        Ok((text, model_version))
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, GenerationError> {
        let start = Instant::now();

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::Text {
                        text: request.prompt.as_str(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: &request.image.media_type,
                            data: &request.image.data,
                        },
                    },
                ],
            }],
        };

        let url = format!("{}:generateContent", self.model_url(&request.model));
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;
        let (text, model_version) = parsed.into_text()?;

        Ok(GenerateResponse {
            text,
            model: model_version.unwrap_or_else(|| request.model.clone()),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Factory producing `GeminiClient`s from the `[gemini]` config section.
pub struct GeminiClientFactory {
    config: GeminiConfig,
}

impl GeminiClientFactory {
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ClientFactory for GeminiClientFactory {
    async fn create(
        &self,
        credential: &Credential,
    ) -> Result<Box<dyn InferenceClient>, InitializationError> {
        let result = async {
            let client = GeminiClient::new(&self.config, credential)?;
            if self.config.verify_credential {
                client.verify(&self.config.model).await?;
            }
            Ok::<_, InitializationError>(client)
        }
        .await;

        match result {
            Ok(client) => {
                tracing::info!("Gemini client initialized successfully.");
                Ok(Box::new(client))
            }
            Err(e) => {
                tracing::error!("Failed to initialize Gemini client: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::LogBuffer;

    fn parse(json: &str) -> Result<(String, Option<String>), GenerationError> {
        serde_json::from_str::<GenerateContentResponse>(json)
            .unwrap()
            .into_text()
    }

    #[test]
    fn test_request_body_puts_prompt_before_image() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::Text { text: "fit?" },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/png",
                            data: "AAAA",
                        },
                    },
                ],
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "fit?");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "AAAA");
    }

    #[test]
    fn test_response_text_joins_parts_verbatim() {
        let (text, model) = parse(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"  fit"},{"text":"\n"}]}}],
               "modelVersion":"gemini-2.0-flash-001"}"#,
        )
        .unwrap();
        assert_eq!(text, "  fit\n");
        assert_eq!(model.as_deref(), Some("gemini-2.0-flash-001"));
    }

    #[test]
    fn test_response_without_candidates_reports_block_reason() {
        let err = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_response_without_text_is_empty() {
        let err = parse(r#"{"candidates":[{"finishReason":"RECITATION"}]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Empty(_)));
        assert!(err.to_string().contains("RECITATION"));
    }

    #[test]
    fn test_new_rejects_header_unsafe_credential() {
        let credential = Credential::new("bad\nkey").unwrap();
        let result = GeminiClient::new(&GeminiConfig::default(), &credential);
        assert!(matches!(result, Err(InitializationError::MalformedCredential)));
    }

    #[tokio::test]
    async fn test_factory_logs_initialization_failure() {
        let logs = LogBuffer::default();
        let _guard = logs.capture();
        let factory = GeminiClientFactory::new(GeminiConfig::default());

        let result = factory.create(&Credential::new("bad\nkey").unwrap()).await;

        assert!(matches!(result, Err(InitializationError::MalformedCredential)));
        let output = logs.contents();
        assert!(output.contains("ERROR"));
        assert!(output.contains("Failed to initialize Gemini client"));
        assert!(output.contains("cannot be sent in a header"));
        assert!(!output.contains("bad\nkey"));
    }

    #[test]
    fn test_model_url_trims_trailing_slash() {
        let config = GeminiConfig {
            endpoint: "http://localhost:1234/v1beta/".to_string(),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new(&config, &Credential::new("k").unwrap()).unwrap();
        assert_eq!(
            client.model_url("gemini-2.0-flash"),
            "http://localhost:1234/v1beta/models/gemini-2.0-flash"
        );
    }
}
