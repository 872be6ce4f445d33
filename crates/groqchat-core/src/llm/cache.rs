//! Memoized provider construction.
//!
//! Building a provider means constructing an HTTP client, so the cache
//! holds the one built for the current (credential, model) pair and
//! rebuilds only when either changes. Without a credential the builder
//! is never invoked -- that is the gate that keeps unconfigured
//! sessions from ever issuing a request.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use groqchat_types::llm::GroqModel;

use super::provider::ChatProvider;

/// Builder invoked when the cache has no provider for the requested
/// configuration.
pub type ProviderBuilder =
    Box<dyn Fn(&SecretString, GroqModel) -> Arc<dyn ChatProvider> + Send + Sync>;

struct CacheSlot {
    credential: SecretString,
    model: GroqModel,
    provider: Arc<dyn ChatProvider>,
}

/// Single-slot keyed cache for the completion capability.
pub struct ProviderCache {
    build: ProviderBuilder,
    slot: Option<CacheSlot>,
}

impl ProviderCache {
    /// Create an empty cache with the given builder.
    pub fn new(build: ProviderBuilder) -> Self {
        Self { build, slot: None }
    }

    /// Return the provider for `(credential, model)`, building it if the
    /// configuration changed since the last call.
    ///
    /// Returns `None` without invoking the builder when no credential is
    /// configured.
    pub fn get_or_build(
        &mut self,
        credential: Option<&SecretString>,
        model: GroqModel,
    ) -> Option<Arc<dyn ChatProvider>> {
        let credential = credential?;

        if let Some(slot) = &self.slot {
            if slot.model == model
                && slot.credential.expose_secret() == credential.expose_secret()
            {
                return Some(Arc::clone(&slot.provider));
            }
        }

        debug!(model = %model, "building provider");
        let provider = (self.build)(credential, model);
        self.slot = Some(CacheSlot {
            credential: SecretString::from(credential.expose_secret()),
            model,
            provider: Arc::clone(&provider),
        });
        Some(provider)
    }

    /// Drop the cached provider, forcing a rebuild on next use.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}
