//! # Admin Request Signatures
//!
//! The administrative update channel is "some trusted write path": any caller
//! holding the shared admin secret may replace the rule set. Requests carry
//! an HMAC-SHA256 signature over the raw body in the `X-Toggle-Signature`
//! header:
//!
//! ```text
//! X-Toggle-Signature: t=1700000000,v1=5257a869e7...
//! ```
//!
//! where `v1` is `hex(hmac_sha256(secret, "{t}.{body}"))`. The timestamp must
//! be within a 5-minute tolerance to limit replay. Verification failure is
//! fatal for the request and leaves the rule set untouched.

use chrono::Utc;
use toggle_core::{ToggleError, ToggleResult};

/// Signature timestamp tolerance (5 minutes)
const TOLERANCE_SECS: i64 = 300;

/// Verifier for the admin write path
#[derive(Debug, Clone)]
pub struct AdminAuth {
    secret: String,
}

/// Parsed signature header parts
struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

impl AdminAuth {
    /// Create a verifier from the shared admin secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verify a signature header against the raw request body.
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> ToggleResult<()> {
        let parts = parse_signature_header(signature_header)?;

        let now = Utc::now().timestamp();
        if (now - parts.timestamp).abs() > TOLERANCE_SECS {
            return Err(ToggleError::SignatureVerificationFailed(
                "Timestamp outside tolerance".to_string(),
            ));
        }

        let expected = self.compute_signature(payload, parts.timestamp);

        let valid = parts
            .signatures
            .iter()
            .any(|sig| constant_time_compare(sig, &expected));

        if !valid {
            return Err(ToggleError::SignatureVerificationFailed(
                "Signature mismatch".to_string(),
            ));
        }

        Ok(())
    }

    /// Produce a full header value for a payload (client side, and tests)
    pub fn sign(&self, payload: &[u8], timestamp: i64) -> String {
        format!(
            "t={},v1={}",
            timestamp,
            self.compute_signature(payload, timestamp)
        )
    }

    fn compute_signature(&self, payload: &[u8], timestamp: i64) -> String {
        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
        compute_hmac_sha256(&self.secret, &signed_payload)
    }
}

fn parse_signature_header(header: &str) -> ToggleResult<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = value.parse::<i64>().ok();
            }
            Some(("v1", value)) => {
                signatures.push(value.to_string());
            }
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        ToggleError::SignatureVerificationFailed("Missing timestamp in signature".to_string())
    })?;

    if signatures.is_empty() {
        return Err(ToggleError::SignatureVerificationFailed(
            "No v1 signature found".to_string(),
        ));
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

fn compute_hmac_sha256(secret: &str, message: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
