use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use zabbix2opsgenie::app;
use zabbix2opsgenie::config::{DEFAULT_CONFIG_PATH, DEFAULT_LOG_PATH, Settings};
use zabbix2opsgenie::domain::{EventFields, normalize_args};
use zabbix2opsgenie::observability::init_logging;

#[derive(Parser)]
#[command(
    name = "zabbix2opsgenie",
    about = "Forward Zabbix trigger events to OpsGenie",
    version
)]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, env = "ZABBIX2OPSGENIE_CONFIG")]
    config: PathBuf,

    /// Path to the log file (appended to)
    #[arg(long = "log-file", default_value = DEFAULT_LOG_PATH, env = "ZABBIX2OPSGENIE_LOG")]
    log_file: PathBuf,

    /// Build and log the request without sending it
    #[arg(long = "dry-run")]
    dry_run: bool,

    #[command(flatten)]
    event: EventFields,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let settings = Settings::load(&cli.config);
    let level = settings
        .as_ref()
        .map(Settings::log_level)
        .unwrap_or_default();

    let _log_guard = match init_logging(&cli.log_file, level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("[ERROR] could not open/create log file, check file/directory permissions: {}", e);
            None
        }
    };

    let dry_run = cli.dry_run;
    let result = app::run(settings, cli.event, || app::build_transport(dry_run)).await;
    let status = app::exit_status(&result);

    if let Err(e) = result.context("failed to send Zabbix event to OpsGenie") {
        tracing::error!("{:#}", e);
        eprintln!("error: {:#}", e);
    }
    ExitCode::from(status)
}
