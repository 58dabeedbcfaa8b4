use crate::application::UseCaseContainer;
use crate::application::dto::OperationReportDto;
use crate::domain::entities::{
    Action, Credentials, InstallMode, OperationReport, ServiceOutcome,
};
use anyhow::{Context, Result};
use std::sync::Arc;

#[derive(Debug)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
    pub report: OperationReport,
}

impl OperationResult {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&OperationReportDto::from(&self.report))
            .context("Failed to serialize the run report")
    }

    /// One line per service, in processing order.
    pub fn summary(&self) -> String {
        let mut lines = vec![self.message.clone()];
        let width = self
            .report
            .results
            .iter()
            .map(|r| r.service.as_str().len())
            .max()
            .unwrap_or(0);

        for result in &self.report.results {
            lines.push(format!(
                "  {:<9} {:<width$}  {}",
                result.action.as_str(),
                result.service.as_str(),
                describe(&result.outcome),
                width = width
            ));
        }
        lines.join("\n")
    }
}

fn describe(outcome: &ServiceOutcome) -> String {
    match outcome {
        ServiceOutcome::Completed { exit_code: Some(code) } => format!("completed (exit {})", code),
        ServiceOutcome::Completed { exit_code: None } => "completed (terminated by signal)".to_string(),
        ServiceOutcome::WrapperTimedOut => "timed out waiting for the service wrapper".to_string(),
        ServiceOutcome::Confirmed { polls, elapsed } => {
            format!("confirmed after {} check(s), {:.1}s", polls, elapsed.as_secs_f64())
        }
        ServiceOutcome::TimedOut { polls, elapsed } => {
            format!("timed out after {} check(s), {:.1}s", polls, elapsed.as_secs_f64())
        }
        ServiceOutcome::Reported { status } => status.lines().next().unwrap_or("").to_string(),
        ServiceOutcome::Skipped => "skipped".to_string(),
    }
}

pub struct OperationHandler {
    use_cases: Arc<UseCaseContainer>,
}

impl OperationHandler {
    pub fn new(use_cases: Arc<UseCaseContainer>) -> Self {
        Self { use_cases }
    }

    pub async fn install(
        &self,
        mode: InstallMode,
        credentials: Credentials,
    ) -> Result<OperationResult> {
        tracing::info!("Installing services ({:?})", mode);
        let report = self.use_cases.install.execute(mode, &credentials).await?;
        Ok(Self::conclude(report))
    }

    /// Runs every action that needs no interactive input.
    pub async fn run(&self, action: Action) -> Result<OperationResult> {
        tracing::info!("Running '{}' for all configured services", action);
        let report = match action {
            Action::Start => self.use_cases.start.execute().await?,
            Action::Stop => self.use_cases.stop.execute().await?,
            Action::Restart => self.use_cases.restart.execute().await?,
            Action::Uninstall => self.use_cases.uninstall.execute().await?,
            Action::Status => self.use_cases.status.execute().await?,
            Action::Install => anyhow::bail!("install needs credentials; use OperationHandler::install"),
        };
        Ok(Self::conclude(report))
    }

    fn conclude(report: OperationReport) -> OperationResult {
        let action = report.action;
        if report.has_failures() {
            let failed = report
                .results
                .iter()
                .filter(|r| r.outcome.is_timed_out())
                .count();
            let msg = format!("'{}' finished with {} timed-out service(s)", action, failed);
            tracing::warn!("{}", msg);
            OperationResult {
                success: false,
                message: msg,
                report,
            }
        } else {
            let msg = format!("'{}' finished for {} service(s)", action, report.results.len());
            tracing::info!("{}", msg);
            OperationResult {
                success: true,
                message: msg,
                report,
            }
        }
    }
}
