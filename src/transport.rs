//! The HTTP transport seam used by [`Client`](crate::client::Client).

use http::{Request, Response};

/// Sends a fully assembled HTTP request and returns the raw response.
///
/// Retries, timeouts and connection pooling are the transport's concern; the
/// client issues exactly one `send` per API call.
pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    fn send(
        &self,
        request: Request<Vec<u8>>,
    ) -> impl Future<Output = Result<Response<Vec<u8>>, Self::Error>>;
}

#[cfg(feature = "reqwest-transport")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest-transport")]
mod reqwest_transport {
    use http::{Request, Response};

    use super::Transport;

    /// A [`Transport`] backed by a [`reqwest::Client`].
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        pub client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(client: reqwest::Client) -> Self {
            ReqwestTransport { client }
        }
    }

    impl Transport for ReqwestTransport {
        type Error = reqwest::Error;

        async fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, Self::Error> {
            let response = self
                .client
                .execute(reqwest::Request::try_from(request)?)
                .await?;

            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();

            let mut result = Response::new(body);
            *result.status_mut() = status;
            *result.headers_mut() = headers;
            Ok(result)
        }
    }
}
