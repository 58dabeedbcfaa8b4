use clap::Parser;
use fusion_services::presentation::{Cli, FusionServicesApp, logging};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    tracing::info!("Starting fusion-services v{}", env!("CARGO_PKG_VERSION"));

    let outcome: anyhow::Result<String> = async {
        let app = FusionServicesApp::new(cli)?;
        let result = app.run().await?;
        app.render(&result)
    }
    .await;

    match outcome {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
