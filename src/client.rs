//! The billing.io API client.

use bon::Builder;
use http::{
    HeaderMap, HeaderValue, Method, Request,
    header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::{
    errors::{ApiError, Error, Result},
    resources::{Checkouts, Events, Health, WebhookEndpoints},
    transport::Transport,
};

pub const DEFAULT_BASE_URL: &str = "https://api.billing.io/v1";

const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}

fn default_user_agent() -> String {
    format!("billing-rust/{SDK_VERSION}")
}

/// The billing.io API client.
///
/// The client is generic over its [`Transport`]. With the default
/// `reqwest-transport` feature, [`Client::new`] builds one backed by reqwest;
/// any other transport can be supplied through the builder:
///
/// ```no_run
/// use billingio::{client::Client, transport::ReqwestTransport};
/// use url_macro::url;
///
/// let client = Client::builder()
///     .api_key("sk_test_...")
///     .base_url(url!("https://sandbox.billing.io/v1"))
///     .transport(ReqwestTransport::default())
///     .build();
/// ```
#[derive(Builder, Clone)]
pub struct Client<T: Transport> {
    #[builder(into)]
    api_key: String,
    #[builder(default = default_base_url())]
    base_url: Url,
    transport: T,
    #[builder(into, default = default_user_agent())]
    user_agent: String,
}

/// A [`Client`] using the reqwest transport.
#[cfg(feature = "reqwest-transport")]
pub type DefaultClient = Client<crate::transport::ReqwestTransport>;

#[cfg(feature = "reqwest-transport")]
impl Client<crate::transport::ReqwestTransport> {
    /// Create a client for the production API with a fresh reqwest client.
    pub fn new(api_key: impl Into<String>) -> Self {
        Client::builder()
            .api_key(api_key)
            .transport(crate::transport::ReqwestTransport::default())
            .build()
    }
}

impl<T: Transport> Client<T> {
    pub fn checkouts(&self) -> Checkouts<'_, T> {
        Checkouts::new(self)
    }

    pub fn events(&self) -> Events<'_, T> {
        Events::new(self)
    }

    pub fn webhook_endpoints(&self) -> WebhookEndpoints<'_, T> {
        WebhookEndpoints::new(self)
    }

    pub fn health(&self) -> Health<'_, T> {
        Health::new(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the URL for `segments` below the base URL.
    ///
    /// Segments are percent-encoded; query pairs with empty values are dropped.
    pub(crate) fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        let pairs: Vec<(&str, &str)> = query
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (*key, value.as_str()))
            .collect();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }

    pub(crate) async fn get<R: DeserializeOwned>(&self, url: Url) -> Result<R> {
        let body = self.execute(Method::GET, url, None, HeaderMap::new()).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub(crate) async fn post<B, R>(&self, url: Url, body: &B, headers: HeaderMap) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_vec(body)?;
        let response = self.execute(Method::POST, url, Some(body), headers).await?;
        Ok(serde_json::from_slice(&response)?)
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<()> {
        self.execute(Method::DELETE, url, None, HeaderMap::new())
            .await
            .map(|_| ())
    }

    /// Send one request and return the raw body of a 2xx response.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        headers: HeaderMap,
    ) -> Result<Vec<u8>> {
        let has_body = body.is_some();

        let mut request = Request::builder()
            .method(method)
            .uri(url.as_str())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(USER_AGENT, self.user_agent.as_str())
            .body(body.unwrap_or_default())?;

        if has_body {
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        request.headers_mut().extend(headers);

        #[cfg(feature = "tracing")]
        tracing::debug!("Sending request: {} {}", request.method(), url);

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|err| Error::Transport(Box::new(err)))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            #[cfg(feature = "tracing")]
            tracing::debug!("Request failed: status={} url={}", status, url);

            return Err(ApiError::from_response(status, response.body()).into());
        }

        Ok(response.into_body())
    }
}

impl<T: Transport + std::fmt::Debug> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
