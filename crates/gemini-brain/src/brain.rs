//! GeminiBrain implementation using the Generative Language API.

use chat_core::{async_trait, prompt_fingerprint, ChatBackend, ChatError, ChatRequest};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::GeminiBrainConfig;

/// A chat backend that asks Google's Gemini models for each reply.
///
/// GeminiBrain is stateless: every call carries the whole transcript and the
/// system instruction. There is no retry and no streaming.
pub struct GeminiBrain {
    client: Client,
    config: GeminiBrainConfig,
}

impl GeminiBrain {
    /// Create a new GeminiBrain with the given configuration.
    pub fn new(config: GeminiBrainConfig) -> Result<Self, ChatError> {
        if config.api_key.trim().is_empty() {
            return Err(ChatError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| ChatError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!("GeminiBrain initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create a GeminiBrain from environment variables.
    ///
    /// See [`GeminiBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, ChatError> {
        let config = GeminiBrainConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiBrainConfig {
        &self.config
    }

    /// Build the request body for a chat request.
    fn build_request(&self, request: &ChatRequest) -> GenerateContentRequest {
        let contents = request.messages.iter().map(Content::from_message).collect();

        let system_instruction = if request.system_instruction.trim().is_empty() {
            None
        } else {
            Some(Content::instruction(request.system_instruction.clone()))
        };

        let generation_config =
            if self.config.temperature.is_none() && self.config.max_output_tokens.is_none() {
                None
            } else {
                Some(GenerationConfig {
                    temperature: self.config.temperature,
                    max_output_tokens: self.config.max_output_tokens,
                })
            };

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    /// Make a `generateContent` request.
    async fn generate_content(
        &self,
        body: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ChatError> {
        let url = self.config.generate_url();

        debug!(turns = body.contents.len(), "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => api_error.error.describe(),
                Err(_) => error_text,
            };

            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ChatBackend for GeminiBrain {
    async fn generate(&self, request: ChatRequest) -> Result<String, ChatError> {
        debug!(
            prompt = %prompt_fingerprint(&request.system_instruction),
            messages = request.messages.len(),
            "Generating chat reply"
        );

        let body = self.build_request(&request);
        let completion = self.generate_content(body).await?;

        if let Some(usage) = &completion.usage_metadata {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        completion.text().ok_or_else(|| {
            let reason = completion
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "none".to_string());
            warn!(finish_reason = %reason, "No text in Gemini response");
            ChatError::EmptyResponse
        })
    }

    fn name(&self) -> &str {
        "GeminiBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::ChatMessage;

    fn brain(config: GeminiBrainConfig) -> GeminiBrain {
        GeminiBrain::new(config).unwrap()
    }

    #[test]
    fn test_rejects_empty_api_key() {
        let result = GeminiBrain::new(GeminiBrainConfig::default());
        assert!(matches!(result, Err(ChatError::Configuration(_))));
    }

    #[test]
    fn test_build_request_carries_transcript_and_instruction() {
        let brain = brain(GeminiBrainConfig::builder().api_key("k").build());
        let request = ChatRequest::new(
            "Be polite.",
            vec![ChatMessage::assistant("Hello!"), ChatMessage::user("Hi")],
        );

        let body = brain.build_request(&request);
        assert_eq!(body.contents.len(), 2);
        assert_eq!(body.contents[0].role.as_deref(), Some("model"));
        assert_eq!(body.contents[1].role.as_deref(), Some("user"));
        assert!(body.system_instruction.is_some());
        assert!(body.generation_config.is_none());
    }

    #[test]
    fn test_build_request_generation_config() {
        let brain = brain(
            GeminiBrainConfig::builder()
                .api_key("k")
                .temperature(0.2)
                .build(),
        );
        let body = brain.build_request(&ChatRequest::new("", vec![ChatMessage::user("Hi")]));

        assert!(body.system_instruction.is_none());
        let generation = body.generation_config.unwrap();
        assert_eq!(generation.temperature, Some(0.2));
        assert_eq!(generation.max_output_tokens, None);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let brain = brain(
            GeminiBrainConfig::builder()
                .api_key("k")
                .api_url("http://127.0.0.1:1")
                .build(),
        );

        let result = brain
            .generate(ChatRequest::new("", vec![ChatMessage::user("Hi")]))
            .await;
        assert!(matches!(result, Err(ChatError::Network(_))));
    }

    #[test]
    fn test_brain_name() {
        let brain = brain(GeminiBrainConfig::builder().api_key("k").build());
        assert_eq!(brain.name(), "GeminiBrain");
    }
}
