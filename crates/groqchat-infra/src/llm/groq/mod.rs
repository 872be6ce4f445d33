//! Groq LLM provider implementation.
//!
//! Groq serves the OpenAI chat-completions protocol at
//! `https://api.groq.com/openai/v1`, so the provider is built on
//! [`async_openai`] for type-safe request/response handling and
//! built-in SSE streaming.

pub mod streaming;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, ChatCompletionStreamOptions,
    CreateChatCompletionRequest,
};
use secrecy::{ExposeSecret, SecretString};

use groqchat_core::llm::provider::{ChatProvider, EventStream};
use groqchat_types::llm::{ChatRequest, GroqModel, LlmError, MessageRole};

use self::streaming::map_groq_stream;

/// Base URL for Groq's OpenAI-compatible endpoint.
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Streaming chat provider for Groq's hosted inference API.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct GroqProvider {
    client: Client<OpenAIConfig>,
    model: GroqModel,
}

impl GroqProvider {
    /// Create a provider for the given credential and model.
    ///
    /// The key is exposed exactly once, into the client configuration.
    pub fn new(api_key: &SecretString, model: GroqModel) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(GROQ_API_BASE);

        Self {
            client: Client::with_config(config),
            model,
        }
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`ChatRequest`].
    fn build_request(&self, request: &ChatRequest) -> CreateChatCompletionRequest {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(ref system) = request.system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(system.clone()),
                    name: None,
                },
            ));
        }

        for msg in &request.messages {
            let mapped = match msg.role {
                MessageRole::System => {
                    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            msg.content.clone(),
                        )),
                        refusal: None,
                        name: None,
                        audio: None,
                        tool_calls: None,
                        function_call: None,
                    })
                }
            };
            messages.push(mapped);
        }

        // Fall back to the provider's configured model if the request
        // doesn't name one.
        let model = if request.model.is_empty() {
            self.model.id().to_string()
        } else {
            request.model.clone()
        };

        let mut req = CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        };

        if request.stream {
            req.stream = Some(true);
            req.stream_options = Some(ChatCompletionStreamOptions {
                include_usage: Some(true),
                include_obfuscation: None,
            });
        }

        req
    }
}

impl ChatProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        self.model.id()
    }

    fn stream(&self, request: ChatRequest) -> EventStream {
        let groq_request = self.build_request(&request);

        // Clone the client for the 'static stream closure
        let client = self.client.clone();

        Box::pin(async_stream::try_stream! {
            let groq_stream = client
                .chat()
                .create_stream(groq_request)
                .await
                .map_err(map_groq_error)?;

            let mut inner = map_groq_stream(groq_stream);

            use futures_util::StreamExt;
            while let Some(event) = inner.next().await {
                match event {
                    Ok(ev) => yield ev,
                    Err(e) => Err(e)?,
                }
            }
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_groq_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Invalid API Key")
                || api_err.message.contains("Incorrect API key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => {
            if let Some(status) = reqwest_err.status() {
                match status.as_u16() {
                    401 => LlmError::AuthenticationFailed,
                    429 => LlmError::RateLimited,
                    _ => LlmError::Provider {
                        message: err.to_string(),
                    },
                }
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::StreamError(stream_err) => LlmError::Stream(stream_err.to_string()),
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use groqchat_types::llm::Message;

    fn provider() -> GroqProvider {
        GroqProvider::new(&SecretString::from("gsk_test"), GroqModel::default())
    }

    fn request(messages: Vec<Message>, stream: bool) -> ChatRequest {
        ChatRequest {
            model: "llama-3.1-8b-instant".to_string(),
            messages,
            system: Some("Be helpful".to_string()),
            max_tokens: 1024,
            temperature: Some(0.7),
            stream,
        }
    }

    #[test]
    fn test_provider_identity() {
        let p = provider();
        assert_eq!(p.name(), "groq");
        assert_eq!(p.model(), "llama-3.1-8b-instant");
    }

    #[test]
    fn test_build_request_messages() {
        let p = provider();
        let req = request(
            vec![
                Message {
                    role: MessageRole::User,
                    content: "Hello".to_string(),
                },
                Message {
                    role: MessageRole::Assistant,
                    content: "Hi there!".to_string(),
                },
            ],
            false,
        );

        let groq_req = p.build_request(&req);
        assert_eq!(groq_req.model, "llama-3.1-8b-instant");
        // 1 system + 2 conversation = 3 messages
        assert_eq!(groq_req.messages.len(), 3);
        assert_eq!(groq_req.max_completion_tokens, Some(1024));
        assert!(groq_req.stream.is_none());
        assert!(groq_req.stream_options.is_none());
    }

    #[test]
    fn test_build_request_streaming() {
        let p = provider();
        let groq_req = p.build_request(&request(
            vec![Message {
                role: MessageRole::User,
                content: "Hello".to_string(),
            }],
            true,
        ));

        assert_eq!(groq_req.stream, Some(true));
        let opts = groq_req.stream_options.unwrap();
        assert_eq!(opts.include_usage, Some(true));
    }

    #[test]
    fn test_build_request_temperature_forwarded() {
        let p = provider();
        let groq_req = p.build_request(&request(vec![], false));
        assert!((groq_req.temperature.unwrap() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_build_request_empty_model_uses_default() {
        let p = GroqProvider::new(&SecretString::from("gsk_test"), GroqModel::Gemma2_9bIt);
        let mut req = request(vec![], false);
        req.model = String::new();

        let groq_req = p.build_request(&req);
        assert_eq!(groq_req.model, "gemma2-9b-it");
    }

    #[test]
    fn test_map_groq_error_api_auth() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Invalid API Key".to_string(),
            r#type: Some("authentication_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_groq_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[test]
    fn test_map_groq_error_rate_limit() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Rate limit reached".to_string(),
            r#type: Some("rate_limit_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_groq_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::RateLimited));
    }

    #[test]
    fn test_map_groq_error_invalid_argument() {
        use async_openai::error::OpenAIError;
        let err = map_groq_error(OpenAIError::InvalidArgument("bad arg".to_string()));
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }
}
