//! Turn-submission engine.
//!
//! One submission at a time: append the user turn, stream the
//! completion, feed fragments to the caller's sink as they arrive, and
//! append the finished text as the assistant turn. On a stream failure
//! the user turn stays on the transcript and no assistant turn is
//! recorded for that attempt -- the caller surfaces the error and the
//! session continues.

use std::sync::Arc;
use std::time::Instant;

use futures_util::StreamExt;
use tracing::{debug, warn};

use groqchat_types::llm::{LlmError, StopReason, StreamEvent, Usage};

use crate::llm::provider::ChatProvider;

use super::prompt;
use super::transcript::Transcript;

/// Result of one completed user/assistant exchange.
#[derive(Debug)]
pub struct TurnOutcome {
    pub reply: String,
    pub usage: Usage,
    pub stop_reason: StopReason,
    pub response_ms: u64,
}

/// Drives one streamed exchange against a provider.
pub struct ChatEngine {
    provider: Arc<dyn ChatProvider>,
}

impl ChatEngine {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    /// Model identifier of the underlying provider.
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Submit one user message and stream the reply.
    ///
    /// `on_fragment` is invoked for every text fragment, in arrival
    /// order, before the fragment is appended to the accumulated reply.
    pub async fn submit<F>(
        &self,
        transcript: &mut Transcript,
        text: &str,
        mut on_fragment: F,
    ) -> Result<TurnOutcome, LlmError>
    where
        F: FnMut(&str),
    {
        transcript.push_user(text);

        let request = prompt::build_request(self.provider.model(), transcript);
        debug!(
            model = %request.model,
            history = request.messages.len(),
            "submitting turn"
        );

        let start = Instant::now();
        let mut stream = self.provider.stream(request);

        let mut reply = String::new();
        let mut usage = Usage::default();
        let mut stop_reason = StopReason::EndTurn;

        while let Some(event) = stream.next().await {
            match event {
                Ok(StreamEvent::TextDelta { text }) => {
                    on_fragment(&text);
                    reply.push_str(&text);
                }
                Ok(StreamEvent::Usage(u)) => usage = u,
                Ok(StreamEvent::MessageDelta { stop_reason: sr }) => stop_reason = sr,
                Ok(StreamEvent::Done) => break,
                Ok(StreamEvent::Connected) => {}
                Err(e) => {
                    warn!(error = %e, "stream failed mid-turn");
                    return Err(e);
                }
            }
        }

        let response_ms = start.elapsed().as_millis() as u64;
        transcript.push_assistant(reply.clone());
        debug!(
            output_tokens = usage.output_tokens,
            response_ms, "turn completed"
        );

        Ok(TurnOutcome {
            reply,
            usage,
            stop_reason,
            response_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use groqchat_types::chat::TurnRole;
    use groqchat_types::llm::ChatRequest;

    use crate::llm::provider::EventStream;

    /// Provider that replays a fixed script of events on every call.
    struct ScriptedProvider {
        events: Vec<StreamEvent>,
        fail_with: Option<String>,
    }

    impl ScriptedProvider {
        fn fragments(fragments: &[&str]) -> Self {
            let mut events = vec![StreamEvent::Connected];
            for f in fragments {
                events.push(StreamEvent::TextDelta {
                    text: f.to_string(),
                });
            }
            events.push(StreamEvent::MessageDelta {
                stop_reason: StopReason::EndTurn,
            });
            events.push(StreamEvent::Usage(Usage {
                input_tokens: 12,
                output_tokens: 3,
            }));
            events.push(StreamEvent::Done);
            Self {
                events,
                fail_with: None,
            }
        }

        fn failing_after(fragment: &str) -> Self {
            Self {
                events: vec![
                    StreamEvent::Connected,
                    StreamEvent::TextDelta {
                        text: fragment.to_string(),
                    },
                ],
                fail_with: Some("connection reset".to_string()),
            }
        }
    }

    impl ChatProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "llama-3.1-8b-instant"
        }

        fn stream(&self, _request: ChatRequest) -> EventStream {
            let mut items: Vec<Result<StreamEvent, LlmError>> =
                self.events.iter().cloned().map(Ok).collect();
            if let Some(msg) = &self.fail_with {
                items.push(Err(LlmError::Stream(msg.clone())));
            }
            Box::pin(futures_util::stream::iter(items))
        }
    }

    #[tokio::test]
    async fn test_successful_turn_appends_user_then_assistant() {
        let engine = ChatEngine::new(Arc::new(ScriptedProvider::fragments(&["Hi", " there"])));
        let mut transcript = Transcript::new();
        let mut seen: Vec<String> = Vec::new();

        let outcome = engine
            .submit(&mut transcript, "Hello", |fragment| {
                seen.push(fragment.to_string());
            })
            .await
            .unwrap();

        assert_eq!(outcome.reply, "Hi there");
        assert_eq!(seen, vec!["Hi", " there"]);
        assert_eq!(outcome.usage.output_tokens, 3);
        assert_eq!(outcome.stop_reason, StopReason::EndTurn);

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].role, TurnRole::User);
        assert_eq!(transcript.turns()[0].content, "Hello");
        assert_eq!(transcript.turns()[1].role, TurnRole::Assistant);
        assert_eq!(transcript.turns()[1].content, "Hi there");
    }

    #[tokio::test]
    async fn test_stream_failure_keeps_user_turn_only() {
        let engine = ChatEngine::new(Arc::new(ScriptedProvider::failing_after("partial")));
        let mut transcript = Transcript::new();

        let err = engine
            .submit(&mut transcript, "Hello", |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Stream(_)));
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.turns()[0].role, TurnRole::User);
        assert_eq!(transcript.turns()[0].content, "Hello");
    }

    #[tokio::test]
    async fn test_turn_growth_is_monotonic() {
        let engine = ChatEngine::new(Arc::new(ScriptedProvider::fragments(&["ok"])));
        let mut transcript = Transcript::new();

        for i in 1..=3 {
            engine
                .submit(&mut transcript, &format!("msg {i}"), |_| {})
                .await
                .unwrap();
            assert_eq!(transcript.len(), i * 2);
        }
    }
}
