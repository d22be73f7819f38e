//! Provider registry mapping backend names to client factories.
//!
//! The configured provider name is resolved exactly once at startup.
//! Unknown names are an explicit error listing what is registered, so a
//! typo in the config cannot fall through to some implicit default.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::AiConfig;

use super::deepseek::DeepSeekClient;
use super::AiClient;

/// Factory signature: build a client from AI configuration.
pub type ProviderFactory = fn(&AiConfig) -> anyhow::Result<Arc<dyn AiClient>>;

/// Registry of known provider backends.
pub struct ProviderRegistry {
    factories: BTreeMap<&'static str, ProviderFactory>,
}

impl ProviderRegistry {
    /// Registry with the built-in backends registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            factories: BTreeMap::new(),
        };
        registry.register("deepseek", deepseek_factory);
        registry
    }

    /// Register (or replace) a factory under a provider name.
    pub fn register(&mut self, name: &'static str, factory: ProviderFactory) {
        self.factories.insert(name, factory);
    }

    /// Instantiate the provider the configuration names.
    ///
    /// # Errors
    ///
    /// Returns an error for an unregistered provider name, or when the
    /// factory itself fails (for example, a missing API key).
    pub fn create(&self, config: &AiConfig) -> anyhow::Result<Arc<dyn AiClient>> {
        let Some(factory) = self.factories.get(config.provider.as_str()) else {
            anyhow::bail!(
                "unknown AI provider '{}', available: {}",
                config.provider,
                self.available().join(", ")
            );
        };
        factory(config)
    }

    /// Registered provider names in sorted order.
    pub fn available(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

fn deepseek_factory(config: &AiConfig) -> anyhow::Result<Arc<dyn AiClient>> {
    let client = DeepSeekClient::from_config(config)?;
    Ok(Arc::new(client))
}
