//! # billingio
//!
//! A typed async client for the billing.io API.
//!
//! ## Core Components Overview
//!
//! - **[`client`]**: The API [`Client`](client::Client), generic over an injected [`Transport`](transport::Transport).
//! - **[`transport`]**: The HTTP transport seam, with a reqwest-backed implementation behind the `reqwest-transport` feature.
//! - **[`resources`]**: Thin service handles for checkouts, events, webhook endpoints and health.
//! - **[`types`]**: Request parameters and response models.
//! - **[`pagination`]**: A lazy cursor-based [`PageIterator`](pagination::PageIterator) shared by every list endpoint.
//! - **[`webhooks`]**: Signature verification for inbound webhook deliveries.
//!
//! ## Auto-pagination
//!
//! ```no_run
//! use billingio::{client::Client, types::ListCheckoutsParams};
//!
//! # async fn run() -> Result<(), billingio::errors::Error> {
//! let client = Client::new("sk_live_...");
//!
//! let mut checkouts = client
//!     .checkouts()
//!     .list_auto_paginate(ListCheckoutsParams::default());
//!
//! while checkouts.advance().await {
//!     if let Some(checkout) = checkouts.current() {
//!         println!("{}", checkout.checkout_id);
//!     }
//! }
//! if let Some(err) = checkouts.last_error() {
//!     eprintln!("listing failed: {err}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Verifying Webhooks
//!
//! Pass the raw request body, never a re-serialized JSON value.
//!
//! ```
//! use billingio::webhooks::{
//!     FixedClock, WebhookVerifier, compute_signature, signature_header,
//! };
//!
//! let payload = br#"{"event_id":"evt_1","type":"checkout.completed","checkout_id":"co_1","data":{"checkout_id":"co_1","deposit_address":"T9y","chain":"tron","token":"USDT","amount_usd":49.99,"amount_atomic":"49990000","status":"confirmed","tx_hash":null,"confirmations":19,"required_confirmations":19,"expires_at":"2025-01-01T00:30:00Z","detected_at":null,"confirmed_at":null,"created_at":"2025-01-01T00:00:00Z"},"created_at":"2025-01-01T00:00:05Z"}"#;
//!
//! let signature = compute_signature("whsec_test", 1_735_689_605, payload);
//! let header = signature_header(1_735_689_605, &signature);
//!
//! let verifier = WebhookVerifier::new("whsec_test").with_clock(FixedClock(1_735_689_700));
//!
//! let event = verifier.verify(payload, &header).unwrap();
//! assert_eq!(event.event_id, "evt_1");
//! ```

pub mod client;
pub mod errors;
pub mod pagination;
pub mod resources;
pub mod transport;
pub mod types;
pub mod webhooks;
