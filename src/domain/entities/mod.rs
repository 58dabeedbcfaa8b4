pub mod action;
pub mod config;
pub mod outcome;
pub mod service;

pub use action::{Action, Credentials, InstallMode, ParseActionError};
pub use config::{FusionHome, OrchestratorSettings, SettingsOverrides};
pub use outcome::{OperationReport, ServiceOutcome, ServiceResult};
pub use service::{COMBINED_SERVICE, PollState, ServiceName};
