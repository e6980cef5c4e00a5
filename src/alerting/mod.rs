mod mock;
mod opsgenie;
mod transport;

pub use mock::*;
pub use opsgenie::*;
pub use transport::*;

use std::sync::Arc;

use crate::config::Settings;
use crate::domain::EventFields;
use crate::error::Result;

const REDACTED: &str = "***";

/// What to do with an event, decided by its trigger status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Close,
    None,
}

impl Action {
    pub fn from_status(status: &str) -> Self {
        match status {
            "PROBLEM" => Self::Create,
            "OK" => Self::Close,
            _ => Self::None,
        }
    }

    /// Target URL for the action, `None` when nothing should be sent.
    pub fn endpoint(&self, base_url: &str, fields: &EventFields) -> Option<String> {
        let base_url = base_url.trim_end_matches('/');
        match self {
            Self::Create => Some(format!("{}/v2/alerts", base_url)),
            Self::Close => Some(format!(
                "{}/v2/alerts/{}/close?identifierType=alias",
                base_url,
                urlencoding::encode(&fields.alias())
            )),
            Self::None => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Close => write!(f, "close"),
            Self::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The status matched no action; nothing was sent.
    Skipped,
    /// OpsGenie answered 2xx.
    Delivered { status: u16, body: String },
    /// OpsGenie answered, but not with 2xx.
    Rejected { status: u16, body: String },
}

/// Maps an event onto an OpsGenie alert and sends it through the transport.
pub struct Dispatcher {
    settings: Settings,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(settings: Settings, transport: Arc<dyn Transport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Resolve defaults, map, serialize and dispatch one event.
    pub async fn forward(&self, fields: EventFields) -> Result<DispatchOutcome> {
        let fields = fields.with_defaults(&self.settings);
        let payload = map_fields_to_alert(&fields, &self.settings);
        let body = serde_json::to_vec(&payload)?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!("dumping event payload");
            for (name, value) in fields.pairs() {
                let value = if name == "apiKey" && !value.is_empty() {
                    REDACTED
                } else {
                    value
                };
                tracing::debug!("{} : {}", name, value);
            }
        }

        self.dispatch(&fields, body).await
    }

    /// Send an already serialized payload according to the trigger status.
    /// `fields` must already have its defaults resolved.
    pub async fn dispatch(&self, fields: &EventFields, body: Vec<u8>) -> Result<DispatchOutcome> {
        let action = Action::from_status(&fields.trigger_status);
        let Some(url) = action.endpoint(self.settings.base_url(), fields) else {
            tracing::warn!(
                event_id = %fields.event_id,
                trigger_status = %fields.trigger_status,
                "no matching actions found for event"
            );
            return Ok(DispatchOutcome::Skipped);
        };

        let alias = fields.alias();
        tracing::debug!(url = %url, "posting event data");
        match action {
            Action::Create => tracing::warn!(alias = %alias, "creating alert"),
            _ => tracing::warn!(alias = %alias, "closing alert"),
        }

        let request = OutboundRequest::post(url, fields.api_key.clone(), body);
        let response = self.transport.send(&request).await?;

        if response.is_success() {
            tracing::warn!(
                status = response.status,
                body = %response.body,
                "successfully posted event to OpsGenie"
            );
            Ok(DispatchOutcome::Delivered {
                status: response.status,
                body: response.body,
            })
        } else {
            tracing::error!(
                status = response.status,
                body = %response.body,
                "failed to post data to OpsGenie"
            );
            Ok(DispatchOutcome::Rejected {
                status: response.status,
                body: response.body,
            })
        }
    }
}
