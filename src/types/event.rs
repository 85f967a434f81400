use bon::Builder;
use serde::{Deserialize, Serialize};

use super::Checkout;

/// Kinds of webhook events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "checkout.created")]
    CheckoutCreated,
    #[serde(rename = "checkout.payment_detected")]
    CheckoutPaymentDetected,
    #[serde(rename = "checkout.confirming")]
    CheckoutConfirming,
    #[serde(rename = "checkout.completed")]
    CheckoutCompleted,
    #[serde(rename = "checkout.expired")]
    CheckoutExpired,
    #[serde(rename = "checkout.failed")]
    CheckoutFailed,
    /// An event type added to the API after this crate was released.
    ///
    /// Signed deliveries of unknown types still verify; match on the raw
    /// string to handle them.
    #[serde(untagged)]
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::CheckoutCreated => "checkout.created",
            EventType::CheckoutPaymentDetected => "checkout.payment_detected",
            EventType::CheckoutConfirming => "checkout.confirming",
            EventType::CheckoutCompleted => "checkout.completed",
            EventType::CheckoutExpired => "checkout.expired",
            EventType::CheckoutFailed => "checkout.failed",
            EventType::Other(event_type) => event_type,
        }
    }
}

/// An event as returned by the events API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub checkout_id: String,
    /// Snapshot of the checkout when the event was emitted.
    pub data: Checkout,
    pub created_at: String,
}

/// The payload of an incoming webhook delivery.
///
/// Only produced by [`webhooks`](crate::webhooks) after the signature has been
/// verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub event_id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub checkout_id: String,
    pub data: Checkout,
    /// ISO-8601 timestamp, passed through unvalidated.
    pub created_at: String,
}

/// Parameters for listing events.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEventsParams {
    #[builder(into)]
    pub cursor: Option<String>,
    pub limit: Option<u32>,
    pub event_type: Option<EventType>,
    #[builder(into)]
    pub checkout_id: Option<String>,
}
