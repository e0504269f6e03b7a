use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_PLACES_PATH: &str = "/abnamrocoesd/assignment-ios/main/locations.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings shared by every request
#[derive(Clone, Debug)]
pub struct NetworkConfig {
    pub base_url: String,
    pub places_path: String,
    pub timeout: Duration,
}

impl NetworkConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            places_path: DEFAULT_PLACES_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Remote resources known to the client
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Places,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Places => Method::GET,
        }
    }

    pub fn url(&self, config: &NetworkConfig) -> Result<Url, TransportError> {
        let path = match self {
            Endpoint::Places => &config.places_path,
        };
        Url::parse(&format!("{}{}", config.base_url, path)).map_err(|_| TransportError::InvalidUrl)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid URL")]
    InvalidUrl,

    /// Successful status without a body
    #[error("No data received")]
    NoData,

    #[error("{}", or_default(.0, "Decoding error"))]
    Decoding(String),

    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    /// Connectivity failures and timeouts
    #[error("{}", or_default(.0, "Network failure"))]
    NetworkFailure(String),

    #[error("Unknown error")]
    Unknown,
}

fn or_default<'a>(message: &'a str, default: &'a str) -> &'a str {
    if message.is_empty() {
        default
    } else {
        message
    }
}

/// JSON-over-HTTP client
///
/// Performs exactly one request per call; retries are left to the caller.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    config: NetworkConfig,
}

impl HttpClient {
    pub fn new(config: NetworkConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|err| TransportError::NetworkFailure(err.to_string()))?;

        Ok(Self::with_client(client, config))
    }

    /// Use a pre-built `reqwest` client, e.g. one configured without proxies
    pub fn with_client(client: Client, config: NetworkConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub async fn request<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, TransportError> {
        let url = endpoint.url(&self.config)?;
        debug!(%url, method = %endpoint.method(), "sending request");

        let response = self
            .client
            .request(endpoint.method(), url)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        debug!(status = status.as_u16(), "received response");
        if !status.is_success() {
            return Err(TransportError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(classify)?;
        if body.is_empty() {
            return Err(TransportError::NoData);
        }

        serde_json::from_slice(&body).map_err(|err| TransportError::Decoding(err.to_string()))
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::InvalidUrl
    } else if err.is_decode() {
        TransportError::Decoding(err.to_string())
    } else if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
        TransportError::NetworkFailure(err.to_string())
    } else {
        TransportError::Unknown
    }
}
