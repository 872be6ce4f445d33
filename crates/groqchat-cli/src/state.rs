//! Session state owned by the chat loop.
//!
//! Holds the two configurable values (credential, model) and the
//! memoized provider cache. The cache's builder is pinned to the
//! concrete `GroqProvider` here; everything below this layer works
//! against the `ChatProvider` trait.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use groqchat_core::chat::engine::ChatEngine;
use groqchat_core::llm::cache::ProviderCache;
use groqchat_core::llm::provider::ChatProvider;
use groqchat_infra::llm::groq::GroqProvider;
use groqchat_types::llm::GroqModel;
use groqchat_types::secret::Redacted;

/// Mutable session configuration plus the provider cache.
pub struct AppState {
    credential: Option<SecretString>,
    model: GroqModel,
    cache: ProviderCache,
}

impl AppState {
    /// Create session state; no provider is built until a message is sent.
    pub fn new(credential: Option<SecretString>, model: GroqModel) -> Self {
        let cache = ProviderCache::new(Box::new(|key, model| {
            Arc::new(GroqProvider::new(key, model)) as Arc<dyn ChatProvider>
        }));

        Self {
            credential,
            model,
            cache,
        }
    }

    pub fn model(&self) -> GroqModel {
        self.model
    }

    /// Switch to another model from the fixed menu. The cached provider
    /// is keyed on the model, so the next message rebuilds it.
    pub fn set_model(&mut self, model: GroqModel) {
        self.model = model;
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Replace the credential. Returns the masked form for display.
    pub fn set_credential(&mut self, key: SecretString) -> String {
        let masked = Redacted::new(key.expose_secret()).masked();
        self.credential = Some(key);
        masked
    }

    /// The completion capability for the current configuration, or
    /// `None` when no credential is set. Never issues network traffic
    /// by itself; construction only builds the HTTP client.
    pub fn engine(&mut self) -> Option<ChatEngine> {
        self.cache
            .get_or_build(self.credential.as_ref(), self.model)
            .map(ChatEngine::new)
    }
}
