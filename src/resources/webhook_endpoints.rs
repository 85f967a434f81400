use http::HeaderMap;

use super::{AutoPaginate, ListFetcher, fetch_list};
use crate::{
    client::Client,
    errors::Result,
    pagination::PageIterator,
    transport::Transport,
    types::{CreateWebhookParams, List, ListParams, WebhookEndpoint},
};

/// Webhook endpoint API calls.
pub struct WebhookEndpoints<'c, T: Transport> {
    client: &'c Client<T>,
}

impl<'c, T: Transport> WebhookEndpoints<'c, T> {
    pub(crate) fn new(client: &'c Client<T>) -> Self {
        WebhookEndpoints { client }
    }

    /// Register a webhook endpoint.
    ///
    /// The returned endpoint carries the signing secret; this is the only
    /// response that includes it.
    pub async fn create(&self, params: &CreateWebhookParams) -> Result<WebhookEndpoint> {
        self.client
            .post(self.client.endpoint(&["webhooks"], &[])?, params, HeaderMap::new())
            .await
    }

    pub async fn list(&self, params: &ListParams) -> Result<List<WebhookEndpoint>> {
        fetch_list(self.client, &["webhooks"], params).await
    }

    pub async fn get(&self, webhook_id: &str) -> Result<WebhookEndpoint> {
        self.client
            .get(self.client.endpoint(&["webhooks", webhook_id], &[])?)
            .await
    }

    pub async fn delete(&self, webhook_id: &str) -> Result<()> {
        self.client
            .delete(self.client.endpoint(&["webhooks", webhook_id], &[])?)
            .await
    }

    pub fn list_auto_paginate(&self, params: ListParams) -> AutoPaginate<T, ListParams, WebhookEndpoint>
    where
        T: Clone,
    {
        PageIterator::new(ListFetcher::new(self.client.clone(), &["webhooks"], params))
    }
}
