use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Start,
    Stop,
    Install,
    Uninstall,
    Restart,
    Status,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Install => "install",
            Action::Uninstall => "uninstall",
            Action::Restart => "restart",
            Action::Status => "status",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown action '{0}' (expected start, stop, install, uninstall, restart or status)")]
pub struct ParseActionError(String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Action::Start),
            "stop" => Ok(Action::Stop),
            "install" => Ok(Action::Install),
            "uninstall" => Ok(Action::Uninstall),
            "restart" => Ok(Action::Restart),
            "status" => Ok(Action::Status),
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    /// Each service is registered as its own OS service (menu option `a`).
    PerService,
    /// All services run under the single `fusion` pseudo-service (menu option `b`).
    Combined,
}

impl InstallMode {
    /// Anything that does not start with `a` selects the combined install.
    pub fn from_choice(choice: &str) -> Self {
        if choice.trim_start().to_ascii_lowercase().starts_with('a') {
            InstallMode::PerService
        } else {
            InstallMode::Combined
        }
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    pub fn as_args(&self) -> Vec<String> {
        vec![self.username.clone(), self.password.clone()]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
