use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::{Choice, ConstantTimeEq};

use super::{DEFAULT_TOLERANCE, SignatureHeader, WebhookVerificationError};
use crate::types::WebhookEvent;

type HmacSha256 = Hmac<Sha256>;

/// Source of the current time, in Unix seconds.
pub trait Clock {
    fn now(&self) -> i64;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock frozen at the given Unix timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Verifies webhook deliveries signed with one endpoint secret.
///
/// Verification runs in a fixed order and stops at the first failure:
///
/// 1. Header and secret must be non-empty.
/// 2. The header must carry `t` and `v1`.
/// 3. `t` must lie within `tolerance` seconds of the clock (skipped when the
///    tolerance is 0).
/// 4. HMAC-SHA256 of `"{t}.{payload}"` must match a `v1` value, compared in
///    constant time.
/// 5. Only then is the payload decoded as a [`WebhookEvent`].
#[derive(Debug, Clone)]
pub struct WebhookVerifier<C = SystemClock> {
    secret: String,
    tolerance: u64,
    clock: C,
}

impl WebhookVerifier {
    /// A verifier with the default 300 second tolerance and the system clock.
    pub fn new(secret: impl Into<String>) -> Self {
        WebhookVerifier {
            secret: secret.into(),
            tolerance: DEFAULT_TOLERANCE,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> WebhookVerifier<C> {
    /// Maximum allowed distance, in seconds, between the event timestamp and
    /// now. `0` disables the check.
    pub fn with_tolerance(mut self, tolerance: u64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_clock<NewC: Clock>(self, clock: NewC) -> WebhookVerifier<NewC> {
        WebhookVerifier {
            secret: self.secret,
            tolerance: self.tolerance,
            clock,
        }
    }

    pub fn tolerance(&self) -> u64 {
        self.tolerance
    }

    /// Verify a delivery and decode its event.
    ///
    /// `payload` must be the raw request body exactly as received.
    pub fn verify(
        &self,
        payload: &[u8],
        header: &str,
    ) -> Result<WebhookEvent, WebhookVerificationError> {
        if header.is_empty() {
            return Err(WebhookVerificationError::MissingSignatureHeader);
        }
        if self.secret.is_empty() {
            return Err(WebhookVerificationError::MissingSecret);
        }

        let parsed = SignatureHeader::parse(header)?;

        if self.tolerance > 0 {
            let now = self.clock.now();
            if now.abs_diff(parsed.timestamp) > self.tolerance {
                return Err(WebhookVerificationError::TimestampOutsideTolerance {
                    timestamp: parsed.timestamp,
                    now,
                    tolerance: self.tolerance,
                });
            }
        }

        let expected = compute_signature(&self.secret, parsed.timestamp, payload);
        let matched = parsed
            .signatures
            .iter()
            .fold(Choice::from(0), |acc, candidate| {
                acc | constant_time_eq(expected.as_bytes(), candidate.as_bytes())
            });
        if !bool::from(matched) {
            return Err(WebhookVerificationError::SignatureMismatch);
        }

        let event: WebhookEvent =
            serde_json::from_slice(payload).map_err(WebhookVerificationError::InvalidPayload)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Webhook verified: event_id='{}', type='{}'",
            event.event_id,
            event.event_type.as_str()
        );

        Ok(event)
    }
}

/// Compute the lowercase hex HMAC-SHA256 of `"{timestamp}.{payload}"`.
///
/// The payload bytes are signed as-is, without any re-encoding.
pub fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Format a signature header as sent by billing.io.
pub fn signature_header(timestamp: i64, signature: &str) -> String {
    format!("t={timestamp},v1={signature}")
}

/// Equal-time comparison regardless of where the first mismatch occurs.
fn constant_time_eq(a: &[u8], b: &[u8]) -> Choice {
    if a.len() != b.len() {
        return Choice::from(0);
    }
    a.ct_eq(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_signature_known_vector() {
        // HMAC-SHA256(key="key", "0.The quick brown fox jumps over the lazy dog")
        let signature = compute_signature("key", 0, b"The quick brown fox jumps over the lazy dog");

        let mut mac = HmacSha256::new_from_slice(b"key").unwrap();
        mac.update(b"0.The quick brown fox jumps over the lazy dog");
        assert_eq!(signature, hex::encode(mac.finalize().into_bytes()));
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_compute_signature_signs_raw_bytes() {
        let utf8 = compute_signature("s", 1, "héllo".as_bytes());
        let invalid_utf8 = compute_signature("s", 1, &[0xff, 0xfe]);
        let lossy = compute_signature("s", 1, "\u{fffd}\u{fffd}".as_bytes());

        assert_ne!(utf8, invalid_utf8);
        assert_ne!(invalid_utf8, lossy);
    }

    #[test]
    fn test_constant_time_eq_cases() {
        assert!(bool::from(constant_time_eq(b"", b"")));
        assert!(bool::from(constant_time_eq(b"abc", b"abc")));
        assert!(!bool::from(constant_time_eq(b"abc", b"abd")));
        assert!(!bool::from(constant_time_eq(b"abc", b"ab")));
    }

    #[test]
    fn test_signature_header_format() {
        assert_eq!(signature_header(42, "ff00"), "t=42,v1=ff00");
    }

    #[test]
    fn test_with_clock_keeps_configuration() {
        let verifier = WebhookVerifier::new("whsec")
            .with_tolerance(10)
            .with_clock(FixedClock(5));

        assert_eq!(verifier.tolerance(), 10);
        assert_eq!(verifier.clock.now(), 5);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2023-11-14T22:13:20Z
        assert!(SystemClock.now() > 1_700_000_000);
    }
}
