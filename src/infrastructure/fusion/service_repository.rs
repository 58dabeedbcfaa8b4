use crate::domain::{
    entities::{Action, FusionHome, OrchestratorSettings, ServiceName},
    repositories::{ServiceRepository, WrapperOutcome},
};
use crate::infrastructure::fusion::command::{CommandStatus, FusionCommand};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Controls services through the per-service wrapper executables under
/// `<home>/bin` and the status runner.
pub struct FusionServiceRepository {
    home: FusionHome,
    settings: OrchestratorSettings,
}

impl FusionServiceRepository {
    pub fn new(home: FusionHome, settings: OrchestratorSettings) -> Self {
        Self { home, settings }
    }

    fn status_command(&self, service: &ServiceName) -> (PathBuf, Vec<String>) {
        let mut args = self.settings.status_args(&self.home);
        args.push("status".to_string());
        args.push(service.to_string());
        (PathBuf::from(&self.settings.status_runner), args)
    }
}

#[async_trait]
impl ServiceRepository for FusionServiceRepository {
    async fn run_wrapper(
        &self,
        service: &ServiceName,
        action: Action,
        extra_args: &[String],
    ) -> Result<WrapperOutcome> {
        let program = self
            .home
            .wrapper(service.as_str(), &self.settings.wrapper_suffix);
        // extra_args may carry credentials, so only the action is logged.
        tracing::info!(
            service = %service,
            "Running {}{} {}",
            service,
            self.settings.wrapper_suffix,
            action
        );

        let mut args = Vec::with_capacity(extra_args.len() + 1);
        args.push(action.as_str().to_string());
        args.extend_from_slice(extra_args);

        let status = FusionCommand::run_logged(
            &program,
            &args,
            self.home.root(),
            self.settings.wrapper_timeout(),
            service.as_str(),
        )
        .await
        .with_context(|| format!("Failed to run the {} wrapper for {}", action, service))?;

        match status {
            CommandStatus::Exited(Some(0)) => Ok(WrapperOutcome::Exited(Some(0))),
            CommandStatus::Exited(code) => {
                tracing::warn!(
                    service = %service,
                    "{} wrapper exited with {:?} during {}",
                    service,
                    code,
                    action
                );
                Ok(WrapperOutcome::Exited(code))
            }
            CommandStatus::TimedOut => Ok(WrapperOutcome::TimedOut),
        }
    }

    async fn query_status(&self, service: &ServiceName) -> Result<String> {
        let (program, args) = self.status_command(service);
        tracing::debug!(service = %service, "Querying status via {}", program.display());

        let output = FusionCommand::capture_stdout(
            &program,
            &args,
            self.home.root(),
            self.settings.wrapper_timeout(),
            service.as_str(),
        )
        .await
        .with_context(|| format!("Failed to query the status of {}", service))?;

        Ok(output.unwrap_or_else(|| {
            tracing::warn!(service = %service, "Status runner did not finish in time");
            String::new()
        }))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::entities::SettingsOverrides;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn executable(path: &Path, body: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn settings(runner: &Path) -> OrchestratorSettings {
        OrchestratorSettings {
            wrapper_suffix: "-service-wrapper".to_string(),
            ..OrchestratorSettings::default()
        }
        .apply(SettingsOverrides {
            status_runner: Some(runner.display().to_string()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn wrapper_receives_action_and_extra_args() {
        let home = tempfile::tempdir().unwrap();
        let log = home.path().join("calls.log");
        executable(
            &home.path().join("bin").join("solr-service-wrapper"),
            &format!("printf '%s\\n' \"$*\" >> '{}'", log.display()),
        );
        let runner = home.path().join("agent");
        executable(&runner, "echo unused");
        let repo = FusionServiceRepository::new(FusionHome::new(home.path()), settings(&runner));

        let outcome = repo
            .run_wrapper(
                &ServiceName::new("solr").unwrap(),
                Action::Install,
                &["CORP\\svc".to_string(), "pw".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(outcome, WrapperOutcome::Exited(Some(0)));
        assert_eq!(fs::read_to_string(&log).unwrap().trim(), "install CORP\\svc pw");
    }

    #[tokio::test]
    async fn status_runner_gets_status_and_service() {
        let home = tempfile::tempdir().unwrap();
        let runner = home.path().join("agent");
        executable(&runner, "echo \"$2 is running\"; echo \"(via $1)\"");
        let repo = FusionServiceRepository::new(FusionHome::new(home.path()), settings(&runner));

        let status = repo
            .query_status(&ServiceName::new("api").unwrap())
            .await
            .unwrap();

        assert_eq!(status, "api is running\n(via status)");
    }

    #[tokio::test]
    async fn missing_wrapper_is_an_error() {
        let home = tempfile::tempdir().unwrap();
        let runner = home.path().join("agent");
        executable(&runner, "true");
        let repo = FusionServiceRepository::new(FusionHome::new(home.path()), settings(&runner));

        let result = repo
            .run_wrapper(&ServiceName::new("ghost").unwrap(), Action::Start, &[])
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn overrunning_status_runner_reads_as_empty() {
        let home = tempfile::tempdir().unwrap();
        let runner = home.path().join("agent");
        executable(&runner, "echo \"$2 is running\"; exec sleep 30");
        let settings = settings(&runner).apply(SettingsOverrides {
            wrapper_timeout_secs: Some(1),
            ..Default::default()
        });
        let repo = FusionServiceRepository::new(FusionHome::new(home.path()), settings);

        let status = repo
            .query_status(&ServiceName::new("api").unwrap())
            .await
            .unwrap();

        assert_eq!(status, "");
    }
}
