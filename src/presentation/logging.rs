use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const CRATE_TARGET: &str = "fusion_services";

/// Installs the console logger. Must be called once, before any work starts.
pub fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(console_filter(verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Only this crate's events reach the console.
fn console_filter(verbose: bool) -> Targets {
    let level = if verbose || cfg!(feature = "verbose-logging") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    Targets::new().with_target(CRATE_TARGET, level)
}
