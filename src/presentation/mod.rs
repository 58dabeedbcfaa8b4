pub mod app;
pub mod cli;
pub mod logging;
pub mod operation_handler;
pub mod prompt;

pub use app::FusionServicesApp;
pub use cli::Cli;
