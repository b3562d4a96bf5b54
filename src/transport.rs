use std::future::Future;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::error::{Error, JSONError};

/// Status and raw body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn json(&self, url: &str) -> Result<serde_json::Value, Error> {
        serde_json::from_str(&self.body).map_err(|e| JSONError::new(url, e).into())
    }
}

/// Performs a GET with the given headers.
///
/// Implementations own connection handling, timeouts and the like; the
/// client calls `fetch` once per operation and never retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, Error>;
}

#[async_trait]
impl<F, Fut> Transport for F
where
    F: Fn(String, Vec<(String, String)>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send,
{
    async fn fetch(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, Error> {
        (self)(url.to_string(), headers.to_vec()).await
    }
}

/// Default transport backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));

        Ok(Self {
            client: reqwest::Client::builder()
                .default_headers(headers)
                .build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, Error> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
