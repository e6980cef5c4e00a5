use std::ffi::OsString;

use crate::config::Settings;

/// Fields of one Zabbix event, as passed by the alert script.
///
/// Every field is optional on the command line and reads as an empty string
/// when absent. Nothing is validated here; empty values are left for
/// [`EventFields::with_defaults`] and the mapper to deal with.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct EventFields {
    /// OpsGenie API key, overrides the configured key
    #[arg(long = "apiKey", default_value = "", allow_hyphen_values = true)]
    pub api_key: String,

    /// Event field from Zabbix
    #[arg(long = "triggerName", default_value = "", allow_hyphen_values = true)]
    pub trigger_name: String,

    /// Event field from Zabbix
    #[arg(long = "triggerId", default_value = "", allow_hyphen_values = true)]
    pub trigger_id: String,

    /// Event field from Zabbix (PROBLEM or OK)
    #[arg(long = "triggerStatus", default_value = "", allow_hyphen_values = true)]
    pub trigger_status: String,

    /// Event field from Zabbix
    #[arg(long = "triggerSeverity", default_value = "", allow_hyphen_values = true)]
    pub trigger_severity: String,

    /// Event field from Zabbix
    #[arg(long = "triggerDescription", default_value = "", allow_hyphen_values = true)]
    pub trigger_description: String,

    /// Event field from Zabbix
    #[arg(long = "triggerUrl", default_value = "", allow_hyphen_values = true)]
    pub trigger_url: String,

    /// Event field from Zabbix
    #[arg(long = "triggerValue", default_value = "", allow_hyphen_values = true)]
    pub trigger_value: String,

    /// Event field from Zabbix
    #[arg(long = "triggerHostGroupName", default_value = "", allow_hyphen_values = true)]
    pub trigger_host_group_name: String,

    /// Event field from Zabbix
    #[arg(long = "hostName", default_value = "", allow_hyphen_values = true)]
    pub host_name: String,

    /// Event field from Zabbix
    #[arg(long = "ipAddress", default_value = "", allow_hyphen_values = true)]
    pub ip_address: String,

    /// Event field from Zabbix
    #[arg(long = "eventId", default_value = "", allow_hyphen_values = true)]
    pub event_id: String,

    /// Event field from Zabbix
    #[arg(long = "date", default_value = "", allow_hyphen_values = true)]
    pub date: String,

    /// Event field from Zabbix
    #[arg(long = "time", default_value = "", allow_hyphen_values = true)]
    pub time: String,

    /// Event field from Zabbix
    #[arg(long = "itemKey", default_value = "", allow_hyphen_values = true)]
    pub item_key: String,

    /// Event field from Zabbix
    #[arg(long = "itemValue", default_value = "", allow_hyphen_values = true)]
    pub item_value: String,

    /// Event field from Zabbix
    #[arg(long = "recoveryEventStatus", default_value = "", allow_hyphen_values = true)]
    pub recovery_event_status: String,

    /// Tags for the OpsGenie alert, comma separated
    #[arg(long = "tags", default_value = "", allow_hyphen_values = true)]
    pub tags: String,

    /// Recipients of the OpsGenie alert
    #[arg(long = "recipients", default_value = "", allow_hyphen_values = true)]
    pub recipients: String,

    /// Teams to assign the OpsGenie alert to, comma separated
    #[arg(long = "teams", default_value = "", allow_hyphen_values = true)]
    pub teams: String,
}

impl EventFields {
    /// Fill `teams`, `tags` and `apiKey` from the config when the event left
    /// them empty. A supplied value replaces the default, it is never merged.
    pub fn with_defaults(mut self, settings: &Settings) -> Self {
        if self.teams.is_empty() {
            self.teams = settings.teams.clone();
        }
        if self.tags.is_empty() {
            self.tags = settings.tags.clone();
        }
        if self.api_key.is_empty() {
            self.api_key = settings.api_key.clone();
        }
        self
    }

    /// OpsGenie alias correlating the create and close calls of one trigger
    /// on one host.
    pub fn alias(&self) -> String {
        format!("{}_{}", self.trigger_id, self.host_name)
    }

    /// Field names and values, in command line order.
    pub fn pairs(&self) -> [(&'static str, &str); 20] {
        [
            ("apiKey", self.api_key.as_str()),
            ("triggerName", self.trigger_name.as_str()),
            ("triggerId", self.trigger_id.as_str()),
            ("triggerStatus", self.trigger_status.as_str()),
            ("triggerSeverity", self.trigger_severity.as_str()),
            ("triggerDescription", self.trigger_description.as_str()),
            ("triggerUrl", self.trigger_url.as_str()),
            ("triggerValue", self.trigger_value.as_str()),
            ("triggerHostGroupName", self.trigger_host_group_name.as_str()),
            ("hostName", self.host_name.as_str()),
            ("ipAddress", self.ip_address.as_str()),
            ("eventId", self.event_id.as_str()),
            ("date", self.date.as_str()),
            ("time", self.time.as_str()),
            ("itemKey", self.item_key.as_str()),
            ("itemValue", self.item_value.as_str()),
            ("recoveryEventStatus", self.recovery_event_status.as_str()),
            ("tags", self.tags.as_str()),
            ("recipients", self.recipients.as_str()),
            ("teams", self.teams.as_str()),
        ]
    }
}

/// Long flags of the binary that take no value.
const SWITCHES: &[&str] = &["dry-run", "help", "version"];

/// Rewrite Go-style single dash long flags (`-hostName=web1`) into the
/// double dash form clap expects. Zabbix media type scripts are usually
/// configured with the single dash form.
///
/// The argument following a flag without `=` is its value and is copied
/// verbatim, even when it looks like a flag (`-triggerName "-Memory low"`).
/// Arguments after a bare `--` are passed through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    let mut value_pending = false;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || passthrough || value_pending {
            value_pending = false;
            out.push(arg);
            continue;
        }

        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some(s) => long_flag(s).map(|flag| {
                let name = flag.split('=').next().unwrap_or_default();
                value_pending = !flag.contains('=') && !SWITCHES.contains(&name);
                OsString::from(format!("--{}", flag))
            }),
            None => None,
        };
        out.push(rewritten.unwrap_or(arg));
    }

    out
}

/// `name[=value]` of an argument written as `-name[=value]` or
/// `--name[=value]`, where the name is a letter followed by more characters.
fn long_flag(arg: &str) -> Option<&str> {
    let rest = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'))?;
    let name = rest.split('=').next().unwrap_or_default();
    (name.len() > 1 && name.starts_with(|c: char| c.is_ascii_alphabetic())).then_some(rest)
}
