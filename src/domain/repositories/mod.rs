pub mod service_list_repository;
pub mod service_repository;

pub use service_list_repository::ServiceListRepository;
pub use service_repository::{ServiceRepository, WrapperOutcome};
