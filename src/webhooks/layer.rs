use super::config::WebhookConfig;
use super::types::{
    Topic, WEBHOOK_DOMAIN_HEADER, WEBHOOK_HMAC_HEADER, WEBHOOK_TOPIC_HEADER, WebhookState,
};
use super::verification::{HmacSha256Verifier, WebhookVerifier};
use crate::error::{BreakwaterError, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use std::sync::Arc;
use tower::{Layer, Service};

/// Continuation invoked after a webhook has been accepted
///
/// Runs after the signature check passes and before the inner service is
/// called; the filter awaits its completion. It never runs for a rejected
/// request.
///
/// # Example
///
/// ```rust,ignore
/// use breakwater::webhooks::{OnWebhook, WebhookState};
///
/// struct EnqueueJob { queue: JobQueue }
///
/// #[async_trait]
/// impl OnWebhook for EnqueueJob {
///     async fn on_received(&self, webhook: &WebhookState, body: &[u8]) -> breakwater::Result<()> {
///         self.queue.push(webhook.topic.as_str(), body).await?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait OnWebhook: Send + Sync {
    /// Handle an accepted webhook notification
    async fn on_received(&self, webhook: &WebhookState, body: &[u8]) -> Result<()>;
}

/// Default continuation that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

#[async_trait]
impl OnWebhook for NoopHook {
    async fn on_received(&self, _webhook: &WebhookState, _body: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// Shared filter state: read-only across all requests
#[derive(Clone)]
struct FilterState {
    verifier: Arc<dyn WebhookVerifier>,
    hook: Arc<dyn OnWebhook>,
    path: Option<String>,
}

/// Tower layer that verifies inbound webhook notifications
///
/// The filter buffers the raw request body, recomputes the expected
/// HMAC-SHA256 signature, and compares it to the signature header in constant
/// time. Accepted requests carry a [`WebhookState`] extension and resolve with
/// `202 Accepted` unless a downstream handler sets its own status; rejected
/// requests resolve with an empty `403 Forbidden` and never reach the
/// continuation or the inner service.
#[derive(Clone)]
pub struct WebhookVerificationLayer {
    state: FilterState,
}

impl WebhookVerificationLayer {
    /// Build a verification layer from configuration
    pub fn new(config: WebhookConfig) -> Self {
        let verifier = Arc::new(HmacSha256Verifier::new(config.secret.into_bytes()));
        Self::with_verifier(verifier, config.path)
    }

    /// Build a verification layer around a custom verifier
    pub fn with_verifier(verifier: Arc<dyn WebhookVerifier>, path: Option<String>) -> Self {
        Self {
            state: FilterState {
                verifier,
                hook: Arc::new(NoopHook),
                path,
            },
        }
    }

    /// Set the continuation to run after each accepted webhook
    pub fn on_received(mut self, hook: impl OnWebhook + 'static) -> Self {
        self.state.hook = Arc::new(hook);
        self
    }
}

impl<S> Layer<S> for WebhookVerificationLayer {
    type Service = WebhookVerificationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        WebhookVerificationService {
            inner,
            state: self.state.clone(),
        }
    }
}

/// Tower service produced by [`WebhookVerificationLayer`]
#[derive(Clone)]
pub struct WebhookVerificationService<S> {
    inner: S,
    state: FilterState,
}

impl<S> Service<Request> for WebhookVerificationService<S>
where
    S: Service<Request> + Clone + Send + Sync + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let state = self.state.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Mount-path scoping: requests outside the configured prefix
            // never reach the verifier
            if let Some(prefix) = state.path.as_deref() {
                if !path_is_mounted(prefix, req.uri().path()) {
                    let response = inner.call(req).await?;
                    return Ok(response.into_response());
                }
            }

            // The signature is computed over the exact bytes transmitted, so
            // the raw body must be captured before any parsing
            let (parts, body) = req.into_parts();
            let bytes = match axum::body::to_bytes(body, usize::MAX).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    return Ok(
                        BreakwaterError::bad_request(format!("failed to read body: {}", err))
                            .into_response(),
                    );
                }
            };

            let signature = header_str(&parts.headers, WEBHOOK_HMAC_HEADER);
            let topic = header_str(&parts.headers, WEBHOOK_TOPIC_HEADER);
            let domain = header_str(&parts.headers, WEBHOOK_DOMAIN_HEADER);

            // A verifier error fails closed
            let accepted = match state.verifier.verify_signature(&bytes, signature).await {
                Ok(accepted) => accepted,
                Err(err) => {
                    tracing::debug!(error = %err, "Webhook verifier returned an error");
                    false
                }
            };

            if !accepted {
                return Ok(StatusCode::FORBIDDEN.into_response());
            }

            let webhook = WebhookState {
                topic: Topic::from_header_value(topic),
                domain: domain.to_string(),
            };

            if let Err(err) = state.hook.on_received(&webhook, &bytes).await {
                tracing::error!(
                    topic = webhook.topic.as_str(),
                    domain = %webhook.domain,
                    error = %err,
                    "Webhook continuation failed"
                );
                return Ok(err.into_response());
            }

            let mut req = Request::from_parts(parts, Body::from(bytes));
            req.extensions_mut().insert(webhook);

            let mut response = inner.call(req).await?.into_response();
            // A handler that leaves the default status acks with 202; one
            // that sets its own status keeps it
            if response.status() == StatusCode::OK {
                *response.status_mut() = StatusCode::ACCEPTED;
            }
            Ok(response)
        })
    }
}

/// Read a header as a string, treating absent or non-UTF-8 values as empty
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Mount semantics: the prefix itself, or any path nested under it
fn path_is_mounted(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ path_is_mounted tests ============

    #[test]
    fn test_path_is_mounted_exact() {
        assert!(path_is_mounted("/webhooks", "/webhooks"));
    }

    #[test]
    fn test_path_is_mounted_nested() {
        assert!(path_is_mounted("/webhooks", "/webhooks/orders"));
        assert!(path_is_mounted("/webhooks", "/webhooks/orders/create"));
    }

    #[test]
    fn test_path_is_mounted_rejects_siblings() {
        assert!(!path_is_mounted("/webhooks", "/webhooks2"));
        assert!(!path_is_mounted("/webhooks", "/web"));
        assert!(!path_is_mounted("/webhooks", "/other"));
    }

    #[test]
    fn test_path_is_mounted_root_prefix() {
        // Empty prefix mounts everything
        assert!(path_is_mounted("", "/anything"));
    }

    // ============ header_str tests ============

    #[test]
    fn test_header_str_present() {
        let mut headers = HeaderMap::new();
        headers.insert(WEBHOOK_TOPIC_HEADER, "orders/create".parse().unwrap());
        assert_eq!(header_str(&headers, WEBHOOK_TOPIC_HEADER), "orders/create");
    }

    #[test]
    fn test_header_str_absent_is_empty() {
        let headers = HeaderMap::new();
        assert_eq!(header_str(&headers, WEBHOOK_HMAC_HEADER), "");
    }

    #[test]
    fn test_header_str_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("x-shopify-shop-domain", "shop.example.com".parse().unwrap());
        assert_eq!(
            header_str(&headers, WEBHOOK_DOMAIN_HEADER),
            "shop.example.com"
        );
    }

    // ============ NoopHook tests ============

    #[tokio::test]
    async fn test_noop_hook_succeeds() {
        let hook = NoopHook;
        let webhook = WebhookState {
            topic: Topic::OrdersCreate,
            domain: "shop.example.com".to_string(),
        };
        assert!(hook.on_received(&webhook, b"{}").await.is_ok());
    }
}
