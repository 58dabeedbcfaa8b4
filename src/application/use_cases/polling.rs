use crate::domain::{
    entities::{Action, OrchestratorSettings, PollState, ServiceName, ServiceOutcome},
    repositories::ServiceRepository,
    services::StatusMatcher,
};
use anyhow::Result;
use std::time::Duration;
use tokio::time::{Instant, sleep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTiming {
    pub start_timeout: Duration,
    pub stop_timeout: Duration,
    pub poll_interval: Duration,
}

impl PollTiming {
    pub fn from_settings(settings: &OrchestratorSettings) -> Self {
        Self {
            start_timeout: settings.start_timeout(),
            stop_timeout: settings.stop_timeout(),
            poll_interval: settings.poll_interval(),
        }
    }

    pub fn timeout_for(&self, action: Action) -> Duration {
        match action {
            Action::Stop => self.stop_timeout,
            _ => self.start_timeout,
        }
    }
}

impl Default for PollTiming {
    fn default() -> Self {
        Self::from_settings(&OrchestratorSettings::default())
    }
}

/// Polls the status executable until it reports the state `action` aims for,
/// or until the action's time budget is spent. The status is always checked at
/// least once, even with a zero budget.
pub async fn poll_until_settled(
    repository: &dyn ServiceRepository,
    service: &ServiceName,
    action: Action,
    timing: &PollTiming,
) -> Result<ServiceOutcome> {
    let matcher = StatusMatcher::for_action(action, service);
    let budget = timing.timeout_for(action);
    let started = Instant::now();
    let mut state = PollState::Issued;
    let mut polls = 0u32;

    while !state.is_terminal() {
        let status = repository.query_status(service).await?;
        polls += 1;
        tracing::info!(service = %service, "Service {} status = {}", service, status);

        if matcher.matches(&status) {
            state = state.advance(true, false);
            continue;
        }

        sleep(timing.poll_interval).await;
        state = state.advance(false, started.elapsed() >= budget);
    }

    let elapsed = started.elapsed();
    if state == PollState::Confirmed {
        tracing::debug!(service = %service, polls, "{} settled after {:?}", action, elapsed);
        Ok(ServiceOutcome::Confirmed { polls, elapsed })
    } else {
        tracing::warn!(
            service = %service,
            polls,
            "Timed out after {}s waiting for {} to {}",
            budget.as_secs(),
            service,
            action
        );
        Ok(ServiceOutcome::TimedOut { polls, elapsed })
    }
}
