// src/simplify/inference.rs
// Primary simplifier: one generative call with fidelity-preserving prompts

use std::sync::Arc;
use tracing::{error, info};

use super::fidelity::FidelityReport;
use super::prompt;
use crate::error::InferenceError;
use crate::llm_provider::{GenerationRequest, LLMProvider, SamplingParams};

#[derive(Clone)]
pub struct InferenceSimplifier {
    provider: Arc<dyn LLMProvider>,
    params: SamplingParams,
}

impl InferenceSimplifier {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            params: SamplingParams::default(),
        }
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Rewrites `text` at `grade`. No retries: a failed call is final.
    ///
    /// Fidelity checks run on the result but only log; the trimmed model
    /// output is returned as-is.
    pub async fn simplify(&self, text: &str, grade: u8) -> Result<String, InferenceError> {
        let request = GenerationRequest {
            system_instruction: prompt::system_instruction(grade),
            prompt: prompt::user_prompt(text, grade),
            params: self.params,
        };

        let model = self.provider.model_name().to_string();
        info!(model = %model, grade, text_len = text.len(), "Calling inference provider");

        let raw = self.provider.generate(&request).await.map_err(|source| {
            error!(model = %model, error = %source, "Inference call failed");
            InferenceError::ServiceFailure {
                model: model.clone(),
                source,
            }
        })?;

        let simplified = raw.trim();
        if simplified.is_empty() {
            error!(model = %model, "Inference returned an empty response");
            return Err(InferenceError::EmptyResponse { model });
        }

        FidelityReport::compare(text, simplified).log_warnings();

        Ok(simplified.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_provider::LLMError;
    use parking_lot::Mutex;

    struct ScriptedProvider {
        reply: Result<String, LLMError>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedProvider {
        fn new(reply: Result<String, LLMError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, LLMError> {
            self.seen.lock().push(request.clone());
            self.reply.clone()
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_returns_trimmed_text() {
        let provider = ScriptedProvider::new(Ok("  The group met.\n".to_string()));
        let simplifier = InferenceSimplifier::new(provider.clone());

        let out = simplifier.simplify("The committee convened.", 4).await.unwrap();
        assert_eq!(out, "The group met.");

        let seen = provider.seen.lock();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].prompt.contains("The committee convened."));
        assert!(seen[0].system_instruction.contains("Grade 4"));
        assert_eq!(seen[0].params, SamplingParams::default());
    }

    #[tokio::test]
    async fn test_blank_reply_is_empty_response() {
        let simplifier = InferenceSimplifier::new(ScriptedProvider::new(Ok("  \n".to_string())));
        let err = simplifier.simplify("Anything.", 5).await.unwrap_err();
        assert_eq!(err.kind(), "empty-response");
    }

    #[tokio::test]
    async fn test_provider_error_is_service_failure() {
        let provider = ScriptedProvider::new(Err(LLMError::ConnectionFailed("refused".to_string())));
        let err = InferenceSimplifier::new(provider)
            .simplify("Anything.", 5)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "service-failure");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn test_fidelity_warnings_do_not_block() {
        let provider = ScriptedProvider::new(Ok("Short.".to_string()));
        let out = InferenceSimplifier::new(provider)
            .simplify("Ada Lovelace wrote the first published algorithm in 1843 for Charles Babbage.", 6)
            .await
            .unwrap();
        assert_eq!(out, "Short.");
    }
}
