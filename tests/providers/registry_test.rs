//! Provider registry resolution tests.

use std::sync::Arc;

use straylight::config::AiConfig;
use straylight::providers::registry::ProviderRegistry;
use straylight::providers::{AiClient, ProviderError};

#[test]
fn unknown_provider_is_an_explicit_error() {
    let registry = ProviderRegistry::with_defaults();
    let config = AiConfig {
        provider: "gpt9000".to_owned(),
        ..AiConfig::default()
    };
    let err = registry.create(&config).expect_err("name should be unknown");
    let msg = err.to_string();
    assert!(msg.contains("unknown AI provider 'gpt9000'"));
    assert!(msg.contains("deepseek"));
}

#[test]
fn deepseek_is_registered_by_default() {
    let registry = ProviderRegistry::with_defaults();
    assert_eq!(registry.available(), vec!["deepseek"]);
}

#[test]
fn deepseek_factory_requires_api_key() {
    let registry = ProviderRegistry::with_defaults();
    let config = AiConfig {
        api_key_env: "STRAYLIGHT_TEST_REGISTRY_UNSET".to_owned(),
        ..AiConfig::default()
    };
    let err = registry.create(&config).expect_err("key should be missing");
    assert!(err.to_string().contains("STRAYLIGHT_TEST_REGISTRY_UNSET"));
}

#[test]
fn deepseek_factory_builds_with_key_present() {
    std::env::set_var("STRAYLIGHT_TEST_REGISTRY_KEY", "sk-test");
    let registry = ProviderRegistry::with_defaults();
    let config = AiConfig {
        api_key_env: "STRAYLIGHT_TEST_REGISTRY_KEY".to_owned(),
        model: "deepseek-reasoner".to_owned(),
        ..AiConfig::default()
    };
    let client = registry.create(&config).expect("client should build");
    assert_eq!(client.model_id(), "deepseek-reasoner");
}

#[test]
fn custom_factories_can_be_registered() {
    struct CannedClient;

    #[async_trait::async_trait]
    impl AiClient for CannedClient {
        async fn reply(
            &self,
            _user_message: &str,
            _system_prompt: Option<&str>,
        ) -> Result<String, ProviderError> {
            Ok("canned".to_owned())
        }

        fn model_id(&self) -> &str {
            "canned-1"
        }
    }

    fn canned_factory(_config: &AiConfig) -> anyhow::Result<Arc<dyn AiClient>> {
        Ok(Arc::new(CannedClient))
    }

    let mut registry = ProviderRegistry::with_defaults();
    registry.register("canned", canned_factory);

    let config = AiConfig {
        provider: "canned".to_owned(),
        ..AiConfig::default()
    };
    let client = registry.create(&config).expect("client should build");
    assert_eq!(client.model_id(), "canned-1");
}
