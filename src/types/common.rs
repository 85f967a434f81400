//! Miscellaneous common types shared by billing.io resources.

use serde::{Deserialize, Serialize};

use crate::pagination::Page;

/// A string-keyed map, used for free-form metadata.
pub type Record<V> = std::collections::HashMap<String, V>;

/// A supported blockchain network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Tron,
    Arbitrum,
    /// A chain this version of the crate does not know about yet.
    #[serde(untagged)]
    Other(String),
}

/// A supported stablecoin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    #[serde(rename = "USDT")]
    Usdt,
    #[serde(rename = "USDC")]
    Usdc,
    #[serde(untagged)]
    Other(String),
}

/// The paginated list envelope returned by every list endpoint.
///
/// ```
/// use billingio::types::List;
///
/// let list: List<String> = serde_json::from_value(serde_json::json!({
///     "data": ["a", "b"],
///     "has_more": true,
///     "next_cursor": "cur_2",
/// })).unwrap();
///
/// assert_eq!(list.data, vec!["a", "b"]);
/// assert!(list.has_more);
/// assert_eq!(list.next_cursor.as_deref(), Some("cur_2"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> From<List<T>> for Page<T> {
    fn from(list: List<T>) -> Self {
        Page {
            items: list.data,
            has_more: list.has_more,
            next_cursor: list.next_cursor,
        }
    }
}

/// Response of the health check endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Generic pagination parameters for list endpoints without extra filters.
#[derive(bon::Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    #[builder(into)]
    pub cursor: Option<String>,
    pub limit: Option<u32>,
}
