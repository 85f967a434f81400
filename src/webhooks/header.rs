use super::WebhookVerificationError;

/// A parsed signature header of the form `t=<unix_seconds>,v1=<hex_hmac>`.
///
/// Unknown `key=value` segments are ignored, as is any segment that does not
/// contain exactly one `=`. Several `v1` segments may be present while a
/// signing secret is being rotated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub signatures: Vec<String>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> Result<Self, WebhookVerificationError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for segment in header.split(',') {
            let Some((key, value)) = segment.trim().split_once('=') else {
                continue;
            };
            if value.contains('=') {
                continue;
            }

            match key {
                "t" => timestamp = Some(value),
                "v1" if !value.is_empty() => signatures.push(value.to_string()),
                _ => {}
            }
        }

        let timestamp = timestamp
            .filter(|t| !t.is_empty())
            .ok_or(WebhookVerificationError::MissingTimestamp)?;
        let timestamp = timestamp
            .parse::<i64>()
            .map_err(|_| WebhookVerificationError::InvalidTimestamp(timestamp.to_string()))?;

        if signatures.is_empty() {
            return Err(WebhookVerificationError::MissingSignature);
        }

        Ok(SignatureHeader {
            timestamp,
            signatures,
        })
    }
}
