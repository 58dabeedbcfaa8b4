use crate::application::use_cases::service_operations::ServiceRepositoryUseCase;
use crate::domain::{
    entities::{Action, Credentials, InstallMode, OperationReport, ServiceName, ServiceOutcome},
    repositories::{ServiceListRepository, ServiceRepository, WrapperOutcome},
};
use anyhow::Result;
use std::sync::Arc;

/// Runs the wrapper for each service until one of them times out. Services
/// after the first timeout are recorded as skipped.
async fn run_until_timeout(
    repository: &dyn ServiceRepository,
    services: &[ServiceName],
    action: Action,
    extra_args: &[String],
    report: &mut OperationReport,
) -> Result<()> {
    for (index, service) in services.iter().enumerate() {
        match repository.run_wrapper(service, action, extra_args).await? {
            WrapperOutcome::TimedOut => {
                tracing::error!(
                    service = %service,
                    "Could not {} {} - timed out waiting for the service wrapper",
                    action,
                    service
                );
                report.record(service.clone(), action, ServiceOutcome::WrapperTimedOut);
                report.skip_remaining(&services[index + 1..], action);
                return Ok(());
            }
            WrapperOutcome::Exited(exit_code) => {
                report.record(service.clone(), action, ServiceOutcome::Completed { exit_code });
            }
        }
    }
    Ok(())
}

pub struct InstallServices {
    use_case: ServiceRepositoryUseCase,
}

impl InstallServices {
    pub fn new(
        repository: Arc<dyn ServiceRepository>,
        service_list: Arc<dyn ServiceListRepository>,
    ) -> Self {
        Self {
            use_case: ServiceRepositoryUseCase::new(repository, service_list),
        }
    }

    pub async fn execute(
        &self,
        mode: InstallMode,
        credentials: &Credentials,
    ) -> Result<OperationReport> {
        let services = match mode {
            InstallMode::PerService => self.use_case.services().await?,
            InstallMode::Combined => vec![ServiceName::combined()],
        };
        tracing::debug!(?mode, count = services.len(), "Installing services");

        let repository = self.use_case.repository();
        let mut report = OperationReport::begin(Action::Install);
        run_until_timeout(
            repository.as_ref(),
            &services,
            Action::Install,
            &credentials.as_args(),
            &mut report,
        )
        .await?;

        Ok(report.finish())
    }
}

pub struct UninstallServices {
    use_case: ServiceRepositoryUseCase,
}

impl UninstallServices {
    pub fn new(
        repository: Arc<dyn ServiceRepository>,
        service_list: Arc<dyn ServiceListRepository>,
    ) -> Self {
        Self {
            use_case: ServiceRepositoryUseCase::new(repository, service_list),
        }
    }

    /// Uninstalls in reverse start order, then the combined service.
    pub async fn execute(&self) -> Result<OperationReport> {
        let mut services = self.use_case.services().await?;
        services.reverse();
        services.push(ServiceName::combined());

        let repository = self.use_case.repository();
        let mut report = OperationReport::begin(Action::Uninstall);
        run_until_timeout(
            repository.as_ref(),
            &services,
            Action::Uninstall,
            &[],
            &mut report,
        )
        .await?;

        Ok(report.finish())
    }
}
