mod settings;

pub use settings::*;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/opsgenie/zabbix2opsgenie.json";

/// Default location of the log file. It sits next to the config because the
/// OEC directory is not writable by the Zabbix user.
pub const DEFAULT_LOG_PATH: &str = "/etc/opsgenie/zabbix2opsgenie.log";
