pub mod config_repository;
pub mod fusion;

pub use config_repository::ConfigRepository;
pub use fusion::{FusionServiceRepository, PropertiesServiceListRepository};
