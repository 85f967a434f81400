/// Why a webhook delivery was rejected.
///
/// Every variant is terminal: no event is returned alongside it.
#[derive(Debug, thiserror::Error)]
pub enum WebhookVerificationError {
    #[error("webhook verification failed: missing signature header")]
    MissingSignatureHeader,

    #[error("webhook verification failed: missing webhook secret")]
    MissingSecret,

    #[error("webhook verification failed: invalid signature header format: missing timestamp (t=)")]
    MissingTimestamp,

    #[error("webhook verification failed: invalid signature header format: non-numeric timestamp {0:?}")]
    InvalidTimestamp(String),

    #[error("webhook verification failed: invalid signature header format: missing signature (v1=)")]
    MissingSignature,

    #[error(
        "webhook verification failed: timestamp outside tolerance: event={timestamp}, now={now}, tolerance={tolerance}s"
    )]
    TimestampOutsideTolerance {
        timestamp: i64,
        now: i64,
        tolerance: u64,
    },

    #[error("webhook verification failed: signature mismatch")]
    SignatureMismatch,

    #[error("webhook verification failed: invalid JSON in webhook body: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

impl WebhookVerificationError {
    /// A stable, machine-readable classification tag.
    pub fn code(&self) -> &'static str {
        match self {
            WebhookVerificationError::MissingSignatureHeader => "missing_signature_header",
            WebhookVerificationError::MissingSecret => "missing_secret",
            WebhookVerificationError::MissingTimestamp => "malformed_header_no_timestamp",
            WebhookVerificationError::InvalidTimestamp(_) => "malformed_header_bad_timestamp",
            WebhookVerificationError::MissingSignature => "malformed_header_no_signature",
            WebhookVerificationError::TimestampOutsideTolerance { .. } => {
                "timestamp_outside_tolerance"
            }
            WebhookVerificationError::SignatureMismatch => "signature_mismatch",
            WebhookVerificationError::InvalidPayload(_) => "invalid_payload",
        }
    }
}
