use bon::Builder;
use serde::{Deserialize, Serialize};

use super::EventType;

/// Status of a registered webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookEndpointStatus {
    Active,
    Disabled,
    #[serde(untagged)]
    Other(String),
}

/// A registered webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEndpoint {
    pub webhook_id: String,
    pub url: String,
    pub events: Vec<EventType>,
    /// The signing secret. Only present in the response to `create`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub description: Option<String>,
    pub status: WebhookEndpointStatus,
    pub created_at: String,
}

/// Parameters for registering a webhook endpoint.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateWebhookParams {
    #[builder(into)]
    pub url: String,
    #[builder(into)]
    pub events: Vec<EventType>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
