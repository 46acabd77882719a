use crate::error::Result;
use async_trait::async_trait;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Trait for verifying webhook signatures
///
/// The verification layer calls this once per request with the raw body bytes
/// and the value of the signature header. Implement it to support a provider
/// with a different signature scheme.
#[async_trait]
pub trait WebhookVerifier: Send + Sync {
    /// Verify the webhook signature
    ///
    /// # Arguments
    ///
    /// * `payload` - The raw webhook payload bytes, exactly as transmitted
    /// * `signature` - The signature from the webhook headers
    ///
    /// # Returns
    ///
    /// `Ok(true)` if signature is valid, `Ok(false)` if invalid, `Err` on error
    async fn verify_signature(&self, payload: &[u8], signature: &str) -> Result<bool>;
}

/// HMAC-SHA256 webhook verifier with timing-safe comparison
///
/// Computes `HMAC-SHA256(secret, payload)` and compares it against the
/// base64-encoded signature header. An absent or undecodable signature is a
/// mismatch, not an error; there is no distinct malformed-request class.
///
/// # Example
///
/// ```rust,ignore
/// use breakwater::webhooks::{HmacSha256Verifier, WebhookVerifier};
///
/// let verifier = HmacSha256Verifier::new("my-webhook-secret");
/// let payload = br#"{"id": 12345}"#;
/// let is_valid = verifier.verify_signature(payload, "oWvD1A...").await?;
/// ```
pub struct HmacSha256Verifier {
    secret: Vec<u8>,
}

impl HmacSha256Verifier {
    /// Create a new verifier from the shared secret
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Compute the expected HMAC-SHA256 signature for a payload
    fn compute_signature(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }

    /// Decode the base64 signature header into raw digest bytes
    fn decode_signature(signature: &str) -> Option<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(signature)
            .ok()
    }
}

/// Constant-time comparison to prevent timing attacks
///
/// Uses the `subtle` crate which provides compiler-optimization-resistant
/// constant-time operations. This prevents attackers from using timing
/// information to guess valid signatures byte-by-byte.
///
/// Unlike a naive XOR-and-fold implementation, the `subtle` crate uses
/// optimization barriers to prevent LLVM from converting bitwise operations
/// back into timing-leaking branches.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

#[async_trait]
impl WebhookVerifier for HmacSha256Verifier {
    async fn verify_signature(&self, payload: &[u8], signature: &str) -> Result<bool> {
        let provided = match Self::decode_signature(signature) {
            Some(bytes) => bytes,
            None => {
                tracing::debug!("Failed to decode webhook signature");
                return Ok(false);
            }
        };

        let expected = self.compute_signature(payload);

        let is_valid = constant_time_compare(&expected, &provided);

        if !is_valid {
            tracing::debug!("Webhook signature verification failed");
        }

        Ok(is_valid)
    }
}
