use crate::utils::get_env_with_prefix;
use serde::{Deserialize, Serialize};

/// Webhook verification configuration
///
/// The secret is shared read-only across all verification calls. An empty
/// secret is not rejected at configuration time; it changes the HMAC input
/// and makes every real signature fail closed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WebhookConfig {
    /// Shared secret used to compute the expected HMAC-SHA256 signature
    #[serde(default)]
    pub secret: String,

    /// Optional mount path. When set, only requests under this prefix are
    /// verified; everything else passes through untouched.
    #[serde(default)]
    pub path: Option<String>,
}

impl WebhookConfig {
    /// Create a new WebhookConfig builder
    pub fn builder() -> WebhookConfigBuilder {
        WebhookConfigBuilder::new()
    }

    /// Create a configuration from a secret, applying to the full pipeline
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            path: None,
        }
    }

    /// Load webhook configuration from environment variables
    /// Checks BREAKWATER_ prefixed vars first, falls back to unprefixed
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(secret) = get_env_with_prefix("WEBHOOK_SECRET") {
            config.secret = secret;
        }

        if let Some(path) = get_env_with_prefix("WEBHOOK_PATH") {
            config.path = Some(path);
        }

        config
    }
}

/// Builder for WebhookConfig
#[must_use = "builder does nothing until you call build()"]
pub struct WebhookConfigBuilder {
    config: WebhookConfig,
}

impl WebhookConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: WebhookConfig::default(),
        }
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = secret.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.config.path = Some(path.into());
        self
    }

    pub fn build(self) -> WebhookConfig {
        self.config
    }
}

impl Default for WebhookConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
