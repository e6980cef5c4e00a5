//! One invocation of the forwarder: settings, transport, dispatch.

use std::sync::Arc;

use crate::alerting::{DispatchOutcome, Dispatcher, DryRunTransport, HttpTransport, Transport};
use crate::config::Settings;
use crate::domain::EventFields;
use crate::error::Result;

/// Transport for this run: the real HTTP client, or one that only logs.
pub fn build_transport(dry_run: bool) -> Result<Arc<dyn Transport>> {
    if dry_run {
        tracing::warn!("dry run, nothing will be sent");
        return Ok(Arc::new(DryRunTransport));
    }
    Ok(Arc::new(HttpTransport::new()?))
}

/// Forward one event.
///
/// A settings error halts the run before any transport is built. An upstream
/// rejection is an outcome, not an error.
pub async fn run<F>(settings: Result<Settings>, event: EventFields, transport: F) -> Result<DispatchOutcome>
where
    F: FnOnce() -> Result<Arc<dyn Transport>>,
{
    let settings = settings?;
    let dispatcher = Dispatcher::new(settings, transport()?);

    let outcome = dispatcher.forward(event).await?;
    match &outcome {
        DispatchOutcome::Skipped => tracing::debug!("event skipped"),
        DispatchOutcome::Delivered { status, .. } => tracing::debug!(status, "event delivered"),
        DispatchOutcome::Rejected { status, .. } => tracing::debug!(status, "event rejected"),
    }
    Ok(outcome)
}

/// Process exit status for the result of [`run`].
pub fn exit_status(result: &Result<DispatchOutcome>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerting::MockTransport;
    use crate::error::ForwarderError;

    fn event(status: &str) -> EventFields {
        EventFields {
            trigger_status: status.into(),
            trigger_id: "123".into(),
            host_name: "web1".into(),
            event_id: "9001".into(),
            ..Default::default()
        }
    }

    fn settings() -> Settings {
        Settings {
            api_key: "config-key".into(),
            edge_app_url: "https://edge.local".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_config_halts_before_sending() {
        let dir = tempfile::tempdir().unwrap();
        let transport = Arc::new(MockTransport::new());

        let settings = Settings::load(dir.path().join("missing.json"));
        let mock = transport.clone();
        let result = run(settings, event("PROBLEM"), move || Ok(mock as Arc<dyn Transport>)).await;

        assert!(matches!(result, Err(ForwarderError::ConfigRead { .. })));
        assert_eq!(exit_status(&result), 1);
        assert_eq!(transport.sent_count().await, 0);
    }

    #[tokio::test]
    async fn test_config_error_skips_transport_setup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zabbix2opsgenie.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = run(Settings::load(&path), event("PROBLEM"), || {
            panic!("transport must not be built when the config is unusable")
        })
        .await;

        assert!(matches!(result, Err(ForwarderError::ConfigParse { .. })));
    }

    #[tokio::test]
    async fn test_rejection_still_succeeds() {
        let transport = Arc::new(MockTransport::with_response(500, "internal error"));
        let mock = transport.clone();

        let result = run(Ok(settings()), event("PROBLEM"), move || Ok(mock as Arc<dyn Transport>)).await;

        assert_eq!(
            result.as_ref().unwrap(),
            &DispatchOutcome::Rejected {
                status: 500,
                body: "internal error".into()
            }
        );
        assert_eq!(exit_status(&result), 0);
        assert_eq!(transport.sent_count().await, 1);
    }

    #[tokio::test]
    async fn test_skipped_event_succeeds() {
        let transport = Arc::new(MockTransport::new());
        let mock = transport.clone();

        let result = run(Ok(settings()), event("ACKNOWLEDGED"), move || Ok(mock as Arc<dyn Transport>)).await;

        assert_eq!(result.as_ref().unwrap(), &DispatchOutcome::Skipped);
        assert_eq!(exit_status(&result), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_fails_the_run() {
        let result = run(Ok(settings()), event("OK"), || {
            Ok(Arc::new(MockTransport::failing("connection refused")) as Arc<dyn Transport>)
        })
        .await;

        assert!(matches!(result, Err(ForwarderError::Transport(_))));
        assert_eq!(exit_status(&result), 1);
    }

    #[tokio::test]
    async fn test_dry_run_transport_sends_nothing() {
        let transport = build_transport(true).unwrap();
        let result = run(Ok(settings()), event("PROBLEM"), || Ok(transport)).await;
        assert!(matches!(result, Ok(DispatchOutcome::Delivered { status: 202, .. })));
    }
}
