#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use zabbix2opsgenie::config::Settings;
use zabbix2opsgenie::domain::EventFields;

pub fn test_settings(edge_app_url: &str) -> Settings {
    Settings {
        api_key: "test-api-key".to_string(),
        edge_app_url: edge_app_url.to_string(),
        teams: "ops,dba".to_string(),
        tags: "zabbix,prod".to_string(),
        log_level: "DEBUG".to_string(),
    }
}

/// Event for trigger 123 on host web1 with the given status.
pub fn test_event(status: &str) -> EventFields {
    EventFields {
        trigger_status: status.to_string(),
        trigger_id: "123".to_string(),
        host_name: "web1".to_string(),
        trigger_severity: "Disaster".to_string(),
        trigger_name: "Disk full".to_string(),
        trigger_description: "Free disk space is less than 5% on volume /".to_string(),
        trigger_value: "1".to_string(),
        ip_address: "192.0.2.10".to_string(),
        event_id: "9001".to_string(),
        item_key: "vfs.fs.size[/,pfree]".to_string(),
        item_value: "3.7".to_string(),
        ..Default::default()
    }
}

/// In-memory log sink, for asserting on the lines an operation emits.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Subscriber formatting every level down to DEBUG into this buffer.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let buffer = self.clone();
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || buffer.clone())
            .finish()
    }

    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(needle))
            .collect()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
