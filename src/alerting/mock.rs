use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{OutboundRequest, Transport, TransportResponse};
use crate::error::{ForwarderError, Result};

/// Mock transport for testing. Records every request and answers with a
/// fixed response, or fails as if the network were down.
#[derive(Debug)]
pub struct MockTransport {
    requests: RwLock<Vec<OutboundRequest>>,
    response: TransportResponse,
    failure: Option<String>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Answers like OpsGenie does for an accepted alert.
    pub fn new() -> Self {
        Self::with_response(
            202,
            r#"{"result":"Request will be processed","took":0.012,"requestId":"mock"}"#,
        )
    }

    pub fn with_response(status: u16, body: &str) -> Self {
        Self {
            requests: RwLock::new(Vec::new()),
            response: TransportResponse {
                status,
                body: body.to_string(),
            },
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    pub async fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.read().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse> {
        self.requests.write().await.push(request.clone());
        tracing::debug!(url = %request.url, "mock: recorded request");

        match &self.failure {
            Some(message) => Err(ForwarderError::Transport(message.clone())),
            None => Ok(self.response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_requests() {
        let transport = MockTransport::new();
        let request = OutboundRequest::post("https://edge.local/v2/alerts".into(), "k".into(), vec![]);

        let response = transport.send(&request).await.unwrap();
        assert_eq!(response.status, 202);
        assert_eq!(transport.sent_count().await, 1);
        assert_eq!(transport.requests().await[0], request);
    }

    #[tokio::test]
    async fn test_failing_still_records() {
        let transport = MockTransport::failing("connection refused");
        let request = OutboundRequest::post("https://edge.local/v2/alerts".into(), "k".into(), vec![]);

        let err = transport.send(&request).await.unwrap_err();
        assert!(matches!(err, ForwarderError::Transport(_)));
        assert_eq!(transport.sent_count().await, 1);
    }
}
