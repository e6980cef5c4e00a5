use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::domain::EventFields;

const SOURCE: &str = "Zabbix";
const MESSAGE_PREFIX: &str = "[Zabbix] ";
const RESPONDER_TYPE_TEAM: &str = "team";

/// Body of an OpsGenie `POST /v2/alerts` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPayload {
    pub alias: String,
    pub message: String,
    pub source: String,
    pub entity: String,
    pub description: String,
    pub user: String,
    pub note: String,
    /// P1..P5, or empty when the severity is not recognized.
    pub priority: String,
    pub tags: Vec<String>,
    pub details: Details,
    pub responders: Vec<Responder>,
}

/// Custom alert properties shown in the OpsGenie UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "Triggered Metric Value")]
    pub triggered_metric: String,
    #[serde(rename = "IP Address")]
    pub ip_address: String,
    #[serde(rename = "Hostname")]
    pub hostname: String,
    #[serde(rename = "Item Value")]
    pub item_value: String,
    #[serde(rename = "Item Key")]
    pub item_key: String,
    #[serde(rename = "Trigger ID")]
    pub trigger_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responder {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Responder {
    pub fn team(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RESPONDER_TYPE_TEAM.to_string(),
        }
    }
}

pub fn map_fields_to_alert(fields: &EventFields, settings: &Settings) -> AlertPayload {
    // defaults have to be in place before teams and tags are split
    let fields = fields.clone().with_defaults(settings);

    AlertPayload {
        alias: fields.alias(),
        message: format!("{}{}", MESSAGE_PREFIX, fields.trigger_name),
        source: SOURCE.to_string(),
        entity: fields.host_name.clone(),
        description: fields.trigger_description.clone(),
        user: SOURCE.to_string(),
        note: String::new(),
        priority: map_priority(&fields.trigger_severity).to_string(),
        tags: parse_tags(&fields.tags),
        responders: parse_responders(&fields.teams),
        details: Details {
            event_id: fields.event_id.clone(),
            triggered_metric: fields.trigger_value.clone(),
            ip_address: fields.ip_address.clone(),
            hostname: fields.host_name.clone(),
            item_value: fields.item_value.clone(),
            item_key: fields.item_key.clone(),
            trigger_id: fields.trigger_id.clone(),
        },
    }
}

/// Zabbix severity to OpsGenie priority. Case sensitive; anything unknown
/// (including "Not classified") maps to an empty priority.
pub fn map_priority(severity: &str) -> &'static str {
    match severity {
        "Information" => "P5",
        "Warning" => "P4",
        "Average" => "P3",
        "High" => "P2",
        "Disaster" => "P1",
        _ => "",
    }
}

/// One team responder per non-empty comma separated segment.
pub fn parse_responders(teams: &str) -> Vec<Responder> {
    teams
        .split(',')
        .filter(|team| !team.is_empty())
        .map(|team| {
            tracing::debug!(team = %team, "team slice parsed");
            Responder::team(team)
        })
        .collect()
}

/// Tags are split verbatim: no trimming, no dedup.
pub fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(',').map(String::from).collect()
}
