use bon::Builder;
use serde::{Deserialize, Serialize};

use super::{Chain, Record, Token};

/// Lifecycle state of a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    Pending,
    Detected,
    Confirming,
    Confirmed,
    Expired,
    Failed,
    /// A status added to the API after this crate was released.
    #[serde(untagged)]
    Other(String),
}

impl CheckoutStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CheckoutStatus::Pending => "pending",
            CheckoutStatus::Detected => "detected",
            CheckoutStatus::Confirming => "confirming",
            CheckoutStatus::Confirmed => "confirmed",
            CheckoutStatus::Expired => "expired",
            CheckoutStatus::Failed => "failed",
            CheckoutStatus::Other(status) => status,
        }
    }
}

/// A crypto payment checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    pub checkout_id: String,
    pub deposit_address: String,
    pub chain: Chain,
    pub token: Token,
    pub amount_usd: f64,
    /// Amount in the token's smallest unit.
    pub amount_atomic: String,
    pub status: CheckoutStatus,
    pub tx_hash: Option<String>,
    pub confirmations: u32,
    pub required_confirmations: u32,
    pub expires_at: String,
    pub detected_at: Option<String>,
    pub confirmed_at: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "std::collections::HashMap::is_empty")]
    pub metadata: Record<String>,
}

/// The lightweight status polling response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutStatusResponse {
    pub checkout_id: String,
    pub status: CheckoutStatus,
    pub tx_hash: Option<String>,
    pub confirmations: u32,
    pub required_confirmations: u32,
    pub detected_at: Option<String>,
    pub confirmed_at: Option<String>,
    /// Suggested delay before polling again.
    pub polling_interval_ms: u64,
}

/// Parameters for creating a checkout.
#[derive(Builder, Debug, Clone, PartialEq, Serialize)]
pub struct CreateCheckoutParams {
    pub amount_usd: f64,
    pub chain: Chain,
    pub token: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<u64>,
    #[builder(default)]
    #[serde(skip_serializing_if = "std::collections::HashMap::is_empty")]
    pub metadata: Record<String>,
    /// Sent as the `Idempotency-Key` header, never in the body.
    #[builder(into)]
    #[serde(skip)]
    pub idempotency_key: Option<String>,
}

/// Parameters for listing checkouts.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCheckoutsParams {
    #[builder(into)]
    pub cursor: Option<String>,
    pub limit: Option<u32>,
    pub status: Option<CheckoutStatus>,
}
