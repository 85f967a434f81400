use http::{HeaderMap, HeaderName, HeaderValue};

use super::{AutoPaginate, ListFetcher, ListQuery, fetch_list, pagination_query};
use crate::{
    client::Client,
    errors::Result,
    pagination::PageIterator,
    transport::Transport,
    types::{Checkout, CheckoutStatusResponse, CreateCheckoutParams, List, ListCheckoutsParams},
};

impl ListQuery for ListCheckoutsParams {
    fn set_cursor(&mut self, cursor: Option<String>) {
        self.cursor = cursor;
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = pagination_query(&self.cursor, self.limit);
        if let Some(status) = &self.status {
            query.push(("status", status.as_str().to_string()));
        }
        query
    }
}

/// Checkout API calls.
pub struct Checkouts<'c, T: Transport> {
    client: &'c Client<T>,
}

impl<'c, T: Transport> Checkouts<'c, T> {
    pub(crate) fn new(client: &'c Client<T>) -> Self {
        Checkouts { client }
    }

    /// Create a payment checkout.
    ///
    /// `params.idempotency_key`, when set, is sent as the `Idempotency-Key` header.
    pub async fn create(&self, params: &CreateCheckoutParams) -> Result<Checkout> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &params.idempotency_key {
            headers.insert(
                HeaderName::from_static("idempotency-key"),
                HeaderValue::from_str(key).map_err(http::Error::from)?,
            );
        }

        self.client
            .post(self.client.endpoint(&["checkouts"], &[])?, params, headers)
            .await
    }

    /// One page of checkouts, newest first.
    pub async fn list(&self, params: &ListCheckoutsParams) -> Result<List<Checkout>> {
        fetch_list(self.client, &["checkouts"], params).await
    }

    pub async fn get(&self, checkout_id: &str) -> Result<Checkout> {
        self.client
            .get(self.client.endpoint(&["checkouts", checkout_id], &[])?)
            .await
    }

    /// The lightweight polling status of a checkout.
    pub async fn status(&self, checkout_id: &str) -> Result<CheckoutStatusResponse> {
        self.client
            .get(self.client.endpoint(&["checkouts", checkout_id, "status"], &[])?)
            .await
    }

    /// Iterate over every checkout matching `params`, fetching pages lazily.
    pub fn list_auto_paginate(
        &self,
        params: ListCheckoutsParams,
    ) -> AutoPaginate<T, ListCheckoutsParams, Checkout>
    where
        T: Clone,
    {
        PageIterator::new(ListFetcher::new(
            self.client.clone(),
            &["checkouts"],
            params,
        ))
    }
}
