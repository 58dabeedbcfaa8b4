use crate::application::UseCaseContainer;
use crate::application::use_cases::PollTiming;
use crate::domain::entities::{Action, FusionHome};
use crate::infrastructure::{
    ConfigRepository, FusionServiceRepository, PropertiesServiceListRepository,
};
use crate::presentation::cli::Cli;
use crate::presentation::operation_handler::{OperationHandler, OperationResult};
use crate::presentation::prompt::{InstallPrompt, PromptError, TerminalPassword};
use anyhow::{Context, Result};
use std::io;
use std::sync::Arc;

pub struct FusionServicesApp {
    cli: Cli,
    handler: OperationHandler,
}

impl FusionServicesApp {
    /// Resolves settings (command line, then settings file, then defaults) and
    /// wires the repositories into the use cases.
    pub fn new(cli: Cli) -> Result<Self> {
        let home = FusionHome::new(&cli.fusion_home);
        let config_repository = match &cli.settings {
            Some(path) => ConfigRepository::explicit(path),
            None => ConfigRepository::for_home(&home),
        };
        let settings = config_repository.load()?.apply(cli.overrides());
        tracing::debug!(?settings, "Resolved settings");

        let service_repository = Arc::new(FusionServiceRepository::new(
            home.clone(),
            settings.clone(),
        ));
        let service_list_repository =
            Arc::new(PropertiesServiceListRepository::new(home.properties_file()));
        let use_cases = Arc::new(UseCaseContainer::new(
            service_repository,
            service_list_repository,
            PollTiming::from_settings(&settings),
        ));

        Ok(Self {
            cli,
            handler: OperationHandler::new(use_cases),
        })
    }

    pub async fn run(&self) -> Result<OperationResult> {
        match self.cli.action {
            Action::Install => {
                let mode = self.cli.install_mode();
                let username = self.cli.username.clone();
                let (mode, credentials) = run_blocking(move || {
                    let stdin = io::stdin();
                    let mut prompt = InstallPrompt::new(stdin.lock(), io::stdout());
                    prompt.collect(mode, username, &mut TerminalPassword)
                })
                .await?;
                self.handler.install(mode, credentials).await
            }
            action => self.handler.run(action).await,
        }
    }

    pub fn render(&self, result: &OperationResult) -> Result<String> {
        if self.cli.json {
            result.to_json()
        } else {
            Ok(result.summary())
        }
    }
}

/// Terminal reads block, so they run on the blocking pool instead of a
/// runtime worker.
async fn run_blocking<T, F>(interaction: F) -> Result<T>
where
    F: FnOnce() -> Result<T, PromptError> + Send + 'static,
    T: Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(interaction)
        .await
        .context("Install prompt did not complete")?;
    Ok(outcome?)
}
