//! Webhook verification middleware.
//!
//! Verifies inbound webhook notifications against an HMAC-SHA256 signature
//! computed over the raw request body, and attaches the webhook topic and
//! shop domain to the request for downstream handlers.

mod config;
mod layer;
mod types;
mod verification;

pub use config::{WebhookConfig, WebhookConfigBuilder};
pub use layer::{NoopHook, OnWebhook, WebhookVerificationLayer, WebhookVerificationService};
pub use types::{
    Topic, WEBHOOK_DOMAIN_HEADER, WEBHOOK_HMAC_HEADER, WEBHOOK_TOPIC_HEADER, WebhookState,
};
pub use verification::{HmacSha256Verifier, WebhookVerifier};
