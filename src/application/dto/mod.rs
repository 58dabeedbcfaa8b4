use crate::domain::entities::{OperationReport, ServiceOutcome, ServiceResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResultDto {
    pub service: String,
    pub action: String,
    pub outcome: String,
    pub timed_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polls: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<&ServiceResult> for ServiceResultDto {
    fn from(result: &ServiceResult) -> Self {
        let mut dto = Self {
            service: result.service.to_string(),
            action: result.action.to_string(),
            outcome: result.outcome.label().to_string(),
            timed_out: result.outcome.is_timed_out(),
            polls: None,
            elapsed_ms: None,
            exit_code: None,
            status: None,
        };

        match &result.outcome {
            ServiceOutcome::Confirmed { polls, elapsed }
            | ServiceOutcome::TimedOut { polls, elapsed } => {
                dto.polls = Some(*polls);
                dto.elapsed_ms = Some(elapsed.as_millis() as u64);
            }
            ServiceOutcome::Completed { exit_code } => dto.exit_code = *exit_code,
            ServiceOutcome::Reported { status } => dto.status = Some(status.clone()),
            ServiceOutcome::WrapperTimedOut | ServiceOutcome::Skipped => {}
        }

        dto
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationReportDto {
    pub action: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub success: bool,
    pub services: Vec<ServiceResultDto>,
}

impl From<&OperationReport> for OperationReportDto {
    fn from(report: &OperationReport) -> Self {
        Self {
            action: report.action.to_string(),
            started_at: report.started_at,
            finished_at: report.finished_at,
            success: !report.has_failures(),
            services: report.results.iter().map(ServiceResultDto::from).collect(),
        }
    }
}
