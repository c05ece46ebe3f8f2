// src/llm_provider.rs
// Generative-text provider abstraction - pluggable architecture
// Default: Google Gemini generateContent API

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::AppConfig;

/// LLM Provider trait - implement this to support new models
#[async_trait::async_trait]
pub trait LLMProvider: Send + Sync {
    /// One request/response round trip. An empty string is a valid reply.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LLMError>;
    fn model_name(&self) -> &str;
}

/// Error types for LLM operations
#[derive(Debug, Clone, Error)]
pub enum LLMError {
    #[error("LLM connection failed: {0}")]
    ConnectionFailed(String),

    #[error("LLM returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Sampling parameters sent with every generation call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for SamplingParams {
    /// Low temperature keeps rewrites near-deterministic; the large token
    /// ceiling keeps long passages from being cut off.
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub params: SamplingParams,
}

/// Header carrying the key; keeps it out of URLs and error messages.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini generateContent provider
pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: SamplingParams,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate, empty if there is none.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, LLMError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LLMError::ConfigError("GEMINI_API_KEY is empty".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LLMError::ConfigError(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait::async_trait]
impl LLMProvider for GeminiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LLMError> {
        debug!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            "Generating with Gemini"
        );

        let body = GeminiRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: &request.system_instruction,
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user"),
                parts: vec![GeminiPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: request.params,
        };

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::ConnectionFailed(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(model = %self.model, status = status.as_u16(), "Gemini returned an error status");
            return Err(LLMError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LLMError::InvalidResponse(e.without_url().to_string()))?;
        let text = parsed.into_text();

        info!(model = %self.model, response_len = text.len(), "Generation complete");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Factory: builds the configured provider, or `None` for fallback-only mode.
pub fn build_provider(config: &AppConfig) -> Option<Box<dyn LLMProvider>> {
    let Some(api_key) = config.gemini_api_key.as_deref() else {
        warn!("GEMINI_API_KEY not found. Using fallback algorithm.");
        return None;
    };

    match GeminiProvider::new(
        config.gemini_api_base.as_str(),
        api_key,
        config.gemini_model.as_str(),
        config.inference_timeout,
    ) {
        Ok(provider) => {
            info!(model = %config.gemini_model, "Gemini API initialized");
            Some(Box::new(provider))
        }
        Err(e) => {
            warn!(error = %e, "Gemini client init failed. Using fallback algorithm.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn request() -> GenerationRequest {
        GenerationRequest {
            system_instruction: "Be simple.".to_string(),
            prompt: "Rewrite: The committee convened.".to_string(),
            params: SamplingParams::default(),
        }
    }

    #[test]
    fn test_default_sampling_params() {
        let params = SamplingParams::default();
        assert_eq!(params.temperature, 0.2);
        assert_eq!(params.top_k, 40);
        assert_eq!(params.max_output_tokens, 8192);

        let value = serde_json::to_value(params).unwrap();
        assert_eq!(value["maxOutputTokens"], 8192);
        assert_eq!(value["topK"], 40);
    }

    #[test]
    fn test_empty_key_is_config_error() {
        let result = GeminiProvider::new("http://localhost", "  ", "gemini-test", None);
        assert!(matches!(result, Err(LLMError::ConfigError(_))));
    }

    #[test]
    fn test_build_provider_without_key() {
        let config = AppConfig::default();
        assert!(build_provider(&config).is_none());
    }

    #[tokio::test]
    async fn test_gemini_generate_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "secret")
            .match_query(Matcher::Missing)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Rewrite: The committee convened."}]}],
                "system_instruction": {"parts": [{"text": "Be simple."}]},
                "generationConfig": {"topK": 40}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"The group "},{"text":"met."}]}}]}"#,
            )
            .create_async()
            .await;

        let provider = GeminiProvider::new(server.url(), "secret", "gemini-test", None).unwrap();
        let text = provider.generate(&request()).await.unwrap();

        assert_eq!(text, "The group met.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_gemini_no_candidates_is_empty_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let provider = GeminiProvider::new(server.url(), "secret", "gemini-test", None).unwrap();
        assert_eq!(provider.generate(&request()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_gemini_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(429)
            .with_body("quota exceeded")
            .create_async()
            .await;

        let provider = GeminiProvider::new(server.url(), "secret", "gemini-test", None).unwrap();
        match provider.generate(&request()).await {
            Err(LLMError::HttpStatus { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("expected HttpStatus error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_gemini_undecodable_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let provider = GeminiProvider::new(server.url(), "SECRET123", "gemini-test", None).unwrap();
        match provider.generate(&request()).await {
            Err(err @ LLMError::InvalidResponse(_)) => {
                assert!(!err.to_string().contains("SECRET123"));
            }
            other => panic!("expected InvalidResponse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_hides_key() {
        // nothing listens on the discard port
        let provider = GeminiProvider::new("http://127.0.0.1:9", "SECRET123", "gemini-test", None).unwrap();
        let err = provider.generate(&request()).await.unwrap_err();

        assert!(matches!(err, LLMError::ConnectionFailed(_)));
        assert!(!err.to_string().contains("SECRET123"));
        assert!(!format!("{:?}", err).contains("SECRET123"));
    }
}
