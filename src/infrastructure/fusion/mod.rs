pub mod command;
pub mod service_list_repository;
pub mod service_repository;

pub use service_list_repository::PropertiesServiceListRepository;
pub use service_repository::FusionServiceRepository;
