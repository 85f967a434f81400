use super::{AutoPaginate, ListFetcher, ListQuery, fetch_list, pagination_query};
use crate::{
    client::Client,
    errors::Result,
    pagination::PageIterator,
    transport::Transport,
    types::{Event, List, ListEventsParams},
};

impl ListQuery for ListEventsParams {
    fn set_cursor(&mut self, cursor: Option<String>) {
        self.cursor = cursor;
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = pagination_query(&self.cursor, self.limit);
        if let Some(event_type) = &self.event_type {
            query.push(("type", event_type.as_str().to_string()));
        }
        query.push(("checkout_id", self.checkout_id.clone().unwrap_or_default()));
        query
    }
}

/// Event API calls.
pub struct Events<'c, T: Transport> {
    client: &'c Client<T>,
}

impl<'c, T: Transport> Events<'c, T> {
    pub(crate) fn new(client: &'c Client<T>) -> Self {
        Events { client }
    }

    /// One page of events, newest first.
    pub async fn list(&self, params: &ListEventsParams) -> Result<List<Event>> {
        fetch_list(self.client, &["events"], params).await
    }

    pub async fn get(&self, event_id: &str) -> Result<Event> {
        self.client
            .get(self.client.endpoint(&["events", event_id], &[])?)
            .await
    }

    pub fn list_auto_paginate(
        &self,
        params: ListEventsParams,
    ) -> AutoPaginate<T, ListEventsParams, Event>
    where
        T: Clone,
    {
        PageIterator::new(ListFetcher::new(self.client.clone(), &["events"], params))
    }
}
