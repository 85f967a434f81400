use crate::{client::Client, errors::Result, transport::Transport, types::HealthResponse};

/// The health check endpoint.
pub struct Health<'c, T: Transport> {
    client: &'c Client<T>,
}

impl<'c, T: Transport> Health<'c, T> {
    pub(crate) fn new(client: &'c Client<T>) -> Self {
        Health { client }
    }

    /// Check API health. This endpoint does not require authentication.
    pub async fn get(&self) -> Result<HealthResponse> {
        self.client.get(self.client.endpoint(&["health"], &[])?).await
    }
}
