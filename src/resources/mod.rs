//! Thin service handles for billing.io resources.
//!
//! Each handle borrows the [`Client`] and maps one REST resource onto typed
//! calls. List endpoints also offer `list_auto_paginate`, which snapshots the
//! filter parameters and walks every page through a [`PageIterator`].

mod checkouts;
mod events;
mod health;
mod webhook_endpoints;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

pub use checkouts::Checkouts;
pub use events::Events;
pub use health::Health;
pub use webhook_endpoints::WebhookEndpoints;

use crate::{
    client::Client,
    errors::{Error, Result},
    pagination::{Page, PageFetcher, PageIterator},
    transport::Transport,
    types::{List, ListParams},
};

/// Filter parameters of a list endpoint.
pub trait ListQuery {
    fn set_cursor(&mut self, cursor: Option<String>);

    /// Query pairs to send; empty values are dropped by the client.
    fn query(&self) -> Vec<(&'static str, String)>;
}

impl ListQuery for ListParams {
    fn set_cursor(&mut self, cursor: Option<String>) {
        self.cursor = cursor;
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        pagination_query(&self.cursor, self.limit)
    }
}

pub(crate) fn pagination_query(
    cursor: &Option<String>,
    limit: Option<u32>,
) -> Vec<(&'static str, String)> {
    vec![
        ("cursor", cursor.clone().unwrap_or_default()),
        ("limit", limit.map(|l| l.to_string()).unwrap_or_default()),
    ]
}

pub(crate) async fn fetch_list<T, P, R>(
    client: &Client<T>,
    segments: &[&str],
    params: &P,
) -> Result<List<R>>
where
    T: Transport,
    P: ListQuery,
    R: DeserializeOwned,
{
    client.get(client.endpoint(segments, &params.query())?).await
}

/// A [`PageFetcher`] bound to one list endpoint and a snapshot of its filters.
///
/// Only the cursor changes between fetches.
pub struct ListFetcher<T: Transport, P, R> {
    client: Client<T>,
    segments: &'static [&'static str],
    params: P,
    _item: PhantomData<fn() -> R>,
}

impl<T: Transport, P: ListQuery, R: DeserializeOwned> ListFetcher<T, P, R> {
    pub fn new(client: Client<T>, segments: &'static [&'static str], params: P) -> Self {
        ListFetcher {
            client,
            segments,
            params,
            _item: PhantomData,
        }
    }
}

impl<T: Transport, P: ListQuery, R: DeserializeOwned> PageFetcher for ListFetcher<T, P, R> {
    type Item = R;
    type Error = Error;

    async fn fetch_page(&mut self, cursor: Option<String>) -> Result<Page<R>> {
        self.params.set_cursor(cursor);
        let list: List<R> = fetch_list(&self.client, self.segments, &self.params).await?;
        Ok(list.into())
    }
}

/// The iterator returned by every `list_auto_paginate`.
pub type AutoPaginate<T, P, R> = PageIterator<ListFetcher<T, P, R>>;
