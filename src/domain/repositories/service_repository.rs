use crate::domain::entities::{Action, ServiceName};
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperOutcome {
    Exited(Option<i32>),
    TimedOut,
}

/// Drives the external executables that control and report on one service.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Runs the service's wrapper with `action` and any extra arguments.
    async fn run_wrapper(
        &self,
        service: &ServiceName,
        action: Action,
        extra_args: &[String],
    ) -> Result<WrapperOutcome>;

    /// Returns the status executable's stdout for `service`.
    async fn query_status(&self, service: &ServiceName) -> Result<String>;
}
