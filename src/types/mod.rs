//! Request parameters and response models for the billing.io API.

mod checkout;
mod common;
mod event;
mod webhook_endpoint;

pub use checkout::*;
pub use common::*;
pub use event::*;
pub use webhook_endpoint::*;
