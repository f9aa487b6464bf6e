//! HMAC-SHA256 signatures over raw webhook bodies.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Longest prefix of a received signature that may appear in diagnostics.
const DIAGNOSTIC_PREFIX_LEN: usize = 8;

/// Reason a signature check failed.
///
/// Messages never contain the secret or the expected signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureFailure {
    /// No webhook secret is configured.
    #[error("webhook secret is not configured")]
    MissingSecret,

    /// The signature header was absent or empty.
    #[error("signature is missing")]
    MissingSignature,

    /// The body was absent or empty.
    #[error("request body is missing")]
    MissingBody,

    /// The signature does not match the body.
    #[error("signature mismatch (received {received_prefix}...)")]
    Mismatch {
        /// First characters of the received signature
        received_prefix: String,
    },
}

impl SignatureFailure {
    pub(crate) fn mismatch(received: &str) -> Self {
        Self::Mismatch {
            received_prefix: received.chars().take(DIAGNOSTIC_PREFIX_LEN).collect(),
        }
    }
}

/// Computes the lowercase hex HMAC-SHA256 of `body` keyed by `secret`.
pub(crate) fn compute(secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(body);
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Compares two byte strings without short-circuiting on the first difference.
///
/// Lengths must match; every byte pair is XORed into the accumulator.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }

    diff == 0
}
