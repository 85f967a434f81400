//! Webhook signature verification.
//!
//! billing.io signs every delivery with the endpoint secret and sends the
//! result in the [`SIGNATURE_HEADER`] header as `t=<unix_seconds>,v1=<hex>`,
//! where `v1` is the HMAC-SHA256 of `"{t}.{raw body}"`. Verify the raw body
//! before trusting any of its contents:
//!
//! ```
//! use billingio::webhooks::{self, WebhookVerificationError};
//!
//! let result = webhooks::verify_signature(b"{}", "t=1,v1=00", "whsec_test");
//! assert!(matches!(
//!     result,
//!     Err(WebhookVerificationError::TimestampOutsideTolerance { .. })
//! ));
//! ```

mod errors;
mod header;
mod verifier;

pub use errors::WebhookVerificationError;
pub use header::SignatureHeader;
pub use verifier::{
    Clock, FixedClock, SystemClock, WebhookVerifier, compute_signature, signature_header,
};

use crate::types::WebhookEvent;

/// The HTTP header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "X-Billing-Signature";

/// Default maximum distance, in seconds, between an event timestamp and now.
pub const DEFAULT_TOLERANCE: u64 = 300;

/// Verify a webhook delivery with the default 300 second tolerance.
///
/// `payload` is the raw request body (do not parse it first), `header` the
/// value of [`SIGNATURE_HEADER`] and `secret` the endpoint signing secret.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
) -> Result<WebhookEvent, WebhookVerificationError> {
    verify_signature_with_tolerance(payload, header, secret, DEFAULT_TOLERANCE)
}

/// Like [`verify_signature`] with a custom tolerance in seconds.
///
/// A tolerance of `0` disables the timestamp check entirely.
pub fn verify_signature_with_tolerance(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance: u64,
) -> Result<WebhookEvent, WebhookVerificationError> {
    WebhookVerifier::new(secret)
        .with_tolerance(tolerance)
        .verify(payload, header)
}
