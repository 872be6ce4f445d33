//! Prompt assembly: the fixed system instruction plus a raw replay of
//! the transcript. No windowing, no summarization.

use groqchat_types::chat::TurnRole;
use groqchat_types::llm::{ChatRequest, Message, MessageRole};

use super::transcript::Transcript;

/// System instruction sent with every request.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant powered by Groq. Answer questions clearly and concisely.";

/// Sampling temperature, matching the hosted console default.
pub const TEMPERATURE: f64 = 0.7;

/// Output token ceiling per response.
pub const MAX_TOKENS: u32 = 1024;

/// Build a streaming request replaying the whole transcript in order.
///
/// The pending user turn is expected to already be on the transcript.
pub fn build_request(model: &str, transcript: &Transcript) -> ChatRequest {
    let messages = transcript
        .turns()
        .iter()
        .map(|turn| Message {
            role: match turn.role {
                TurnRole::User => MessageRole::User,
                TurnRole::Assistant => MessageRole::Assistant,
            },
            content: turn.content.clone(),
        })
        .collect();

    ChatRequest {
        model: model.to_string(),
        messages,
        system: Some(SYSTEM_PROMPT.to_string()),
        max_tokens: MAX_TOKENS,
        temperature: Some(TEMPERATURE),
        stream: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_replays_transcript() {
        let mut transcript = Transcript::new();
        transcript.push_user("Hello");
        transcript.push_assistant("Hi there");
        transcript.push_user("What is Groq?");

        let request = build_request("llama-3.1-8b-instant", &transcript);

        assert_eq!(request.model, "llama-3.1-8b-instant");
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.messages[0].content, "Hello");
        assert_eq!(request.messages[1].role, MessageRole::Assistant);
        assert_eq!(request.messages[2].content, "What is Groq?");
    }

    #[test]
    fn test_build_request_fixed_parameters() {
        let mut transcript = Transcript::new();
        transcript.push_user("Hello");

        let request = build_request("gemma2-9b-it", &transcript);

        assert_eq!(request.system.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, MAX_TOKENS);
        assert!(request.stream);
    }

    #[test]
    fn test_system_prompt_not_in_messages() {
        let mut transcript = Transcript::new();
        transcript.push_user("Hello");

        let request = build_request("llama-3.1-8b-instant", &transcript);
        assert!(request
            .messages
            .iter()
            .all(|m| m.role != MessageRole::System));
    }
}
