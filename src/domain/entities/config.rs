use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_START_SECS: u64 = 1200;
pub const DEFAULT_STOP_SECS: u64 = 600;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1500;
pub const DEFAULT_WRAPPER_TIMEOUT_SECS: u64 = 500;
pub const DEFAULT_STATUS_RUNNER: &str = "java";

#[cfg(windows)]
pub const DEFAULT_WRAPPER_SUFFIX: &str = "-windows-service-wrapper.exe";
#[cfg(not(windows))]
pub const DEFAULT_WRAPPER_SUFFIX: &str = "-service-wrapper";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OrchestratorSettings {
    pub start_secs: u64,
    pub stop_secs: u64,
    pub poll_interval_ms: u64,
    pub wrapper_timeout_secs: u64,
    pub status_runner: String,
    /// Arguments placed before `status <service>`. When unset and the runner is
    /// a `java` executable, the bundled agent jar is used.
    pub status_runner_args: Option<Vec<String>>,
    pub wrapper_suffix: String,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            start_secs: DEFAULT_START_SECS,
            stop_secs: DEFAULT_STOP_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            wrapper_timeout_secs: DEFAULT_WRAPPER_TIMEOUT_SECS,
            status_runner: DEFAULT_STATUS_RUNNER.to_string(),
            status_runner_args: None,
            wrapper_suffix: DEFAULT_WRAPPER_SUFFIX.to_string(),
        }
    }
}

/// Values given on the command line. `None` leaves the underlying setting alone.
#[derive(Clone, Debug, Default)]
pub struct SettingsOverrides {
    pub start_secs: Option<u64>,
    pub stop_secs: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub wrapper_timeout_secs: Option<u64>,
    pub status_runner: Option<String>,
    pub status_runner_args: Vec<String>,
}

impl OrchestratorSettings {
    pub fn apply(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(secs) = overrides.start_secs {
            self.start_secs = secs;
        }
        if let Some(secs) = overrides.stop_secs {
            self.stop_secs = secs;
        }
        if let Some(ms) = overrides.poll_interval_ms {
            self.poll_interval_ms = ms;
        }
        if let Some(secs) = overrides.wrapper_timeout_secs {
            self.wrapper_timeout_secs = secs;
        }
        if let Some(runner) = overrides.status_runner {
            self.status_runner = runner;
        }
        if !overrides.status_runner_args.is_empty() {
            self.status_runner_args = Some(overrides.status_runner_args);
        }
        self
    }

    pub fn start_timeout(&self) -> Duration {
        Duration::from_secs(self.start_secs)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_secs(self.stop_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn wrapper_timeout(&self) -> Duration {
        Duration::from_secs(self.wrapper_timeout_secs)
    }

    pub fn status_args(&self, home: &FusionHome) -> Vec<String> {
        match &self.status_runner_args {
            Some(args) => args.clone(),
            None if runs_java(&self.status_runner) => vec![
                "-jar".to_string(),
                home.agent_jar().to_string_lossy().into_owned(),
            ],
            None => Vec::new(),
        }
    }
}

fn runs_java(runner: &str) -> bool {
    // Windows paths are split by hand so `C:\java\bin\java.exe` is recognised on any host.
    let file = runner
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(runner)
        .to_ascii_lowercase();
    file.strip_suffix(".exe").unwrap_or(&file) == DEFAULT_STATUS_RUNNER
}

/// Layout of an installation directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FusionHome {
    root: PathBuf,
}

impl FusionHome {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn properties_file(&self) -> PathBuf {
        self.root.join("conf").join("fusion.properties")
    }

    pub fn wrapper(&self, service: &str, suffix: &str) -> PathBuf {
        self.root.join("bin").join(format!("{}{}", service, suffix))
    }

    pub fn agent_jar(&self) -> PathBuf {
        self.root.join("apps").join("lucidworks-agent.jar")
    }
}
