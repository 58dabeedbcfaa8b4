use crate::application::use_cases::polling::{PollTiming, poll_until_settled};
use crate::domain::{
    entities::{Action, OperationReport, ServiceName, ServiceOutcome},
    repositories::{ServiceListRepository, ServiceRepository, WrapperOutcome},
};
use anyhow::{Context, Result};
use std::sync::Arc;

pub struct ServiceRepositoryUseCase {
    repository: Arc<dyn ServiceRepository>,
    service_list: Arc<dyn ServiceListRepository>,
}

impl ServiceRepositoryUseCase {
    pub fn new(
        repository: Arc<dyn ServiceRepository>,
        service_list: Arc<dyn ServiceListRepository>,
    ) -> Self {
        Self {
            repository,
            service_list,
        }
    }

    pub fn repository(&self) -> Arc<dyn ServiceRepository> {
        Arc::clone(&self.repository)
    }

    pub async fn services(&self) -> Result<Vec<ServiceName>> {
        self.service_list
            .load_services()
            .await
            .context("Failed to load the configured service list")
    }
}

/// Issues `action` to each service in turn and waits for the status
/// executable to confirm it before moving on.
async fn run_lifecycle(
    repository: &dyn ServiceRepository,
    services: &[ServiceName],
    action: Action,
    timing: &PollTiming,
) -> Result<OperationReport> {
    let mut report = OperationReport::begin(action);

    for service in services {
        let outcome = match repository.run_wrapper(service, action, &[]).await? {
            WrapperOutcome::TimedOut => {
                tracing::error!(
                    service = %service,
                    "Wrapper did not finish '{}' in time, skipping status checks for {}",
                    action,
                    service
                );
                ServiceOutcome::WrapperTimedOut
            }
            WrapperOutcome::Exited(_) => {
                poll_until_settled(repository, service, action, timing).await?
            }
        };
        report.record(service.clone(), action, outcome);
    }

    Ok(report.finish())
}

pub struct StartServices {
    use_case: ServiceRepositoryUseCase,
    timing: PollTiming,
}

impl StartServices {
    pub fn new(
        repository: Arc<dyn ServiceRepository>,
        service_list: Arc<dyn ServiceListRepository>,
        timing: PollTiming,
    ) -> Self {
        Self {
            use_case: ServiceRepositoryUseCase::new(repository, service_list),
            timing,
        }
    }

    pub async fn execute(&self) -> Result<OperationReport> {
        let services = self.use_case.services().await?;
        self.execute_for(&services).await
    }

    pub async fn execute_for(&self, services: &[ServiceName]) -> Result<OperationReport> {
        let repository = self.use_case.repository();
        run_lifecycle(repository.as_ref(), services, Action::Start, &self.timing).await
    }
}

pub struct StopServices {
    use_case: ServiceRepositoryUseCase,
    timing: PollTiming,
}

impl StopServices {
    pub fn new(
        repository: Arc<dyn ServiceRepository>,
        service_list: Arc<dyn ServiceListRepository>,
        timing: PollTiming,
    ) -> Self {
        Self {
            use_case: ServiceRepositoryUseCase::new(repository, service_list),
            timing,
        }
    }

    pub async fn execute(&self) -> Result<OperationReport> {
        let services = self.use_case.services().await?;
        self.execute_for(&services).await
    }

    pub async fn execute_for(&self, services: &[ServiceName]) -> Result<OperationReport> {
        let repository = self.use_case.repository();
        run_lifecycle(repository.as_ref(), services, Action::Stop, &self.timing).await
    }
}

pub struct RestartServices {
    use_case: ServiceRepositoryUseCase,
    stop: StopServices,
    start: StartServices,
}

impl RestartServices {
    pub fn new(
        repository: Arc<dyn ServiceRepository>,
        service_list: Arc<dyn ServiceListRepository>,
        timing: PollTiming,
    ) -> Self {
        Self {
            use_case: ServiceRepositoryUseCase::new(
                Arc::clone(&repository),
                Arc::clone(&service_list),
            ),
            stop: StopServices::new(Arc::clone(&repository), Arc::clone(&service_list), timing),
            start: StartServices::new(repository, service_list, timing),
        }
    }

    /// Stops every service, then starts every service.
    pub async fn execute(&self) -> Result<OperationReport> {
        let services = self.use_case.services().await?;
        let mut report = OperationReport::begin(Action::Restart);
        report.absorb(self.stop.execute_for(&services).await?);
        report.absorb(self.start.execute_for(&services).await?);
        Ok(report.finish())
    }
}

pub struct ServiceStatuses {
    use_case: ServiceRepositoryUseCase,
}

impl ServiceStatuses {
    pub fn new(
        repository: Arc<dyn ServiceRepository>,
        service_list: Arc<dyn ServiceListRepository>,
    ) -> Self {
        Self {
            use_case: ServiceRepositoryUseCase::new(repository, service_list),
        }
    }

    pub async fn execute(&self) -> Result<OperationReport> {
        let services = self.use_case.services().await?;
        let repository = self.use_case.repository();
        let mut report = OperationReport::begin(Action::Status);

        for service in services {
            let status = repository.query_status(&service).await?;
            tracing::info!(service = %service, "Service {} status = {}", service, status);
            report.record(service, Action::Status, ServiceOutcome::Reported { status });
        }

        Ok(report.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{
        FakeServiceList, FakeServiceRepository, Invocation,
    };
    use std::time::Duration;

    const SERVICES: &[&str] = &["solr", "zookeeper-server", "api"];

    fn timing() -> PollTiming {
        PollTiming {
            start_timeout: Duration::from_secs(20),
            stop_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(1500),
        }
    }

    fn fixtures(repo: FakeServiceRepository) -> (Arc<FakeServiceRepository>, Arc<FakeServiceList>) {
        (Arc::new(repo), Arc::new(FakeServiceList::new(SERVICES)))
    }

    #[tokio::test(start_paused = true)]
    async fn start_issues_and_polls_each_service_in_order() {
        let (repo, list) = fixtures(
            FakeServiceRepository::new()
                .with_statuses("solr", &["solr is running"])
                .with_statuses("zookeeper-server", &["starting", "zookeeper-server is running"])
                .with_statuses("api", &["api is running"]),
        );
        let start = StartServices::new(repo.clone(), list, timing());

        let report = start.execute().await.unwrap();

        let status = |s: &str| Invocation::Status {
            service: s.to_string(),
        };
        let wrapper = |s: &str| Invocation::Wrapper {
            service: s.to_string(),
            action: Action::Start,
            args: Vec::new(),
        };
        assert_eq!(
            repo.invocations(),
            vec![
                wrapper("solr"),
                status("solr"),
                wrapper("zookeeper-server"),
                status("zookeeper-server"),
                status("zookeeper-server"),
                wrapper("api"),
                status("api"),
            ]
        );
        assert_eq!(report.services(), SERVICES.to_vec());
        assert!(!report.has_failures());
    }

    #[tokio::test(start_paused = true)]
    async fn start_moves_on_after_poll_timeout() {
        let (repo, list) = fixtures(
            FakeServiceRepository::new()
                .with_default_status("still starting")
                .with_statuses("api", &["api is running"]),
        );
        let start = StartServices::new(repo.clone(), list, timing());

        let report = start.execute().await.unwrap();

        assert_eq!(repo.wrapper_calls().len(), 3);
        assert!(report.results[0].outcome.is_timed_out());
        assert!(report.results[1].outcome.is_timed_out());
        assert!(matches!(
            report.results[2].outcome,
            ServiceOutcome::Confirmed { polls: 1, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn wrapper_timeout_skips_polling_but_not_later_services() {
        let (repo, list) = fixtures(
            FakeServiceRepository::new()
                .with_default_status("x is running")
                .with_statuses("zookeeper-server", &["zookeeper-server is running"])
                .with_statuses("api", &["api is running"])
                .with_wrapper_timeout("solr", Action::Start),
        );
        let start = StartServices::new(repo.clone(), list, timing());

        let report = start.execute().await.unwrap();

        assert_eq!(repo.status_queries("solr"), 0);
        assert_eq!(report.results[0].outcome, ServiceOutcome::WrapperTimedOut);
        assert_eq!(repo.status_queries("zookeeper-server"), 1);
        assert_eq!(repo.status_queries("api"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_recognises_stopped_and_not_running() {
        let (repo, list) = fixtures(
            FakeServiceRepository::new()
                .with_statuses("solr", &["solr is running", "solr is stopped"])
                .with_statuses("zookeeper-server", &["zookeeper-server is not running"])
                .with_statuses("api", &["Stop failed"]),
        );
        let stop = StopServices::new(repo.clone(), list, timing());

        let report = stop.execute().await.unwrap();

        assert_eq!(repo.status_queries("solr"), 2);
        assert!(report
            .results
            .iter()
            .all(|r| matches!(r.outcome, ServiceOutcome::Confirmed { .. })));
        assert!(repo
            .wrapper_calls()
            .iter()
            .all(|(_, action)| *action == Action::Stop));
    }

    #[tokio::test(start_paused = true)]
    async fn status_query_errors_abort_the_run() {
        let (repo, list) = fixtures(FakeServiceRepository::new().with_failing_status("solr"));
        let start = StartServices::new(repo.clone(), list, timing());

        assert!(start.execute().await.is_err());
        assert_eq!(repo.wrapper_calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_stops_everything_before_starting() {
        let (repo, list) = fixtures(
            FakeServiceRepository::new()
                .with_default_status("failed"),
        );
        let restart = RestartServices::new(repo.clone(), list.clone(), timing());

        let report = restart.execute().await.unwrap();

        let calls = repo.wrapper_calls();
        let actions: Vec<Action> = calls.iter().map(|(_, a)| *a).collect();
        assert_eq!(
            actions,
            vec![
                Action::Stop,
                Action::Stop,
                Action::Stop,
                Action::Start,
                Action::Start,
                Action::Start
            ]
        );
        assert_eq!(report.action, Action::Restart);
        assert_eq!(report.results.len(), 6);
        assert_eq!(list.loads(), 1);
    }

    #[tokio::test]
    async fn status_reports_each_service_once() {
        let (repo, list) = fixtures(
            FakeServiceRepository::new()
                .with_default_status("not running")
                .with_statuses("solr", &["solr is running"]),
        );
        let statuses = ServiceStatuses::new(repo.clone(), list);

        let report = statuses.execute().await.unwrap();

        assert!(repo.wrapper_calls().is_empty());
        assert_eq!(
            report.results[0].outcome,
            ServiceOutcome::Reported {
                status: "solr is running".to_string()
            }
        );
        assert_eq!(report.results.len(), 3);
    }
}
