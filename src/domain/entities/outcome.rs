use crate::domain::entities::{Action, ServiceName};
use chrono::{DateTime, Utc};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceOutcome {
    /// The wrapper exited within its wait bound.
    Completed { exit_code: Option<i32> },
    /// The wrapper was still running when its wait bound elapsed.
    WrapperTimedOut,
    /// The status output reported the expected state.
    Confirmed { polls: u32, elapsed: Duration },
    /// The poll budget ran out before the expected state was reported.
    TimedOut { polls: u32, elapsed: Duration },
    Reported { status: String },
    /// Never attempted because an earlier service failed.
    Skipped,
}

impl ServiceOutcome {
    pub fn is_timed_out(&self) -> bool {
        matches!(
            self,
            ServiceOutcome::WrapperTimedOut | ServiceOutcome::TimedOut { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceOutcome::Completed { .. } => "completed",
            ServiceOutcome::WrapperTimedOut => "wrapper-timed-out",
            ServiceOutcome::Confirmed { .. } => "confirmed",
            ServiceOutcome::TimedOut { .. } => "timed-out",
            ServiceOutcome::Reported { .. } => "reported",
            ServiceOutcome::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceResult {
    pub service: ServiceName,
    pub action: Action,
    pub outcome: ServiceOutcome,
}

#[derive(Debug, Clone)]
pub struct OperationReport {
    pub action: Action,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub results: Vec<ServiceResult>,
}

impl OperationReport {
    pub fn begin(action: Action) -> Self {
        Self {
            action,
            started_at: Utc::now(),
            finished_at: None,
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, service: ServiceName, action: Action, outcome: ServiceOutcome) {
        self.results.push(ServiceResult {
            service,
            action,
            outcome,
        });
    }

    pub fn skip_remaining<'a, I>(&mut self, services: I, action: Action)
    where
        I: IntoIterator<Item = &'a ServiceName>,
    {
        for service in services {
            self.record(service.clone(), action, ServiceOutcome::Skipped);
        }
    }

    /// Appends the results of a sub-operation, as a restart does with its stop and start halves.
    pub fn absorb(&mut self, other: OperationReport) {
        self.results.extend(other.results);
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn has_failures(&self) -> bool {
        self.results
            .iter()
            .any(|r| r.outcome.is_timed_out() || r.outcome == ServiceOutcome::Skipped)
    }

    /// Service names in the order they were processed.
    pub fn services(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.service.as_str()).collect()
    }
}
