use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::error::{ForwarderError, Result};

/// A fully built OpsGenie request, ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub api_key: String,
    pub body: Vec<u8>,
}

impl OutboundRequest {
    pub fn post(url: String, api_key: String, body: Vec<u8>) -> Self {
        Self {
            method: Method::POST,
            url,
            api_key,
            body,
        }
    }

    pub fn authorization(&self) -> String {
        format!("GenieKey {}", self.api_key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and hands back whatever the server answered.
///
/// Implementations must not retry. A non-2xx answer is a response, not an
/// error; only failing to build or deliver the request is.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse>;
}

/// reqwest-backed transport with the client's default timeouts.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ForwarderError::RequestBuild(format!("http client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse> {
        let response = self
            .client
            .request(request.method.clone(), &request.url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, request.authorization())
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    ForwarderError::RequestBuild(e.to_string())
                } else {
                    ForwarderError::Transport(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Ok(TransportResponse { status, body })
    }
}

/// Logs the request instead of sending it and reports an accepted alert.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunTransport;

pub const DRY_RUN_STATUS: u16 = 202;

#[async_trait]
impl Transport for DryRunTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse> {
        tracing::warn!(
            method = %request.method,
            url = %request.url,
            body = %String::from_utf8_lossy(&request.body),
            "dry run: request not sent"
        );
        Ok(TransportResponse {
            status: DRY_RUN_STATUS,
            body: String::new(),
        })
    }
}
