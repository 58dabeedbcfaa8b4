use crate::domain::entities::{Action, InstallMode, SettingsOverrides};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fusion-services")]
#[command(about = "Install, uninstall, start and stop Fusion services through their service wrappers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Fusion installation directory. The camelCase spellings (`--fusionHome`,
    /// `--javaPath`, `--startSecs`, `--stopSecs`) are accepted too, but only
    /// with two dashes.
    #[arg(long, alias = "fusionHome")]
    pub fusion_home: PathBuf,

    /// start, stop, install, uninstall, restart or status
    #[arg(long)]
    pub action: Action,

    /// Program used to query service status (default: java)
    #[arg(long, alias = "javaPath")]
    pub status_runner: Option<String>,

    /// Argument placed before `status <service>` when running the status runner; repeatable
    #[arg(long = "status-runner-arg", allow_hyphen_values = true)]
    pub status_runner_args: Vec<String>,

    /// Seconds to wait for each service to start (default: 1200)
    #[arg(long, alias = "startSecs")]
    pub start_secs: Option<u64>,

    /// Seconds to wait for each service to stop (default: 600)
    #[arg(long, alias = "stopSecs")]
    pub stop_secs: Option<u64>,

    /// Delay between status checks in milliseconds (default: 1500)
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Seconds to wait for a service wrapper to exit (default: 500)
    #[arg(long)]
    pub wrapper_timeout_secs: Option<u64>,

    /// JSON settings file (default: <fusion-home>/conf/fusion-services.json if present)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Install option: `a` for one OS service per Fusion service, `b` for a single service
    #[arg(long, value_parser = ["a", "b"], ignore_case = true)]
    pub install_mode: Option<String>,

    /// Service account in DOMAIN\USERNAME form, used by install
    #[arg(long)]
    pub username: Option<String>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            start_secs: self.start_secs,
            stop_secs: self.stop_secs,
            poll_interval_ms: self.poll_interval_ms,
            wrapper_timeout_secs: self.wrapper_timeout_secs,
            status_runner: self.status_runner.clone(),
            status_runner_args: self.status_runner_args.clone(),
        }
    }

    pub fn install_mode(&self) -> Option<InstallMode> {
        self.install_mode.as_deref().map(InstallMode::from_choice)
    }
}
