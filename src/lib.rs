//! Breakwater - webhook verification and embedding protection for Axum
//!
//! Breakwater provides two small pieces of middleware glue for applications
//! that integrate with a commerce platform:
//!
//! - **Webhooks**: an HMAC-SHA256 verification filter for inbound webhook
//!   notifications, with timing-safe signature comparison and request-scoped
//!   webhook state for downstream handlers
//! - **Security**: a Content-Security-Policy `frame-ancestors` response layer
//!   restricting which origins may embed a page in a frame
//!
//! The two units are independent and can be used separately.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::{routing::post, Router};
//! use breakwater::webhooks::{WebhookConfig, WebhookVerificationLayer};
//! use breakwater::security::FrameAncestorsLayer;
//!
//! #[tokio::main]
//! async fn main() {
//!     breakwater::init_tracing();
//!
//!     let config = WebhookConfig::builder()
//!         .secret("my-webhook-secret")
//!         .path("/webhooks")
//!         .build();
//!
//!     let app: Router = Router::new()
//!         .route("/webhooks", post(|| async {}))
//!         .layer(WebhookVerificationLayer::new(config))
//!         .layer(FrameAncestorsLayer::new("https://admin.example.com"));
//!
//!     // ... serve the router
//!     let _ = app;
//! }
//! ```

mod error;
pub mod security;
pub mod utils;
pub mod webhooks;

// Re-exports for public API
pub use error::{BreakwaterError, Result};
pub use security::{CspDirective, CspSources, FrameAncestorsLayer};
pub use webhooks::{
    Topic, WebhookConfig, WebhookConfigBuilder, WebhookState, WebhookVerificationLayer,
};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging with sensible defaults
///
/// This should be called early in your application, typically in main()
/// before building the router.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "breakwater=debug")
/// - `BREAKWATER_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = std::env::var("BREAKWATER_LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
