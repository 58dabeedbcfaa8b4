use crate::application::use_cases::*;
use crate::domain::repositories::{ServiceListRepository, ServiceRepository};
use std::sync::Arc;

pub struct UseCaseContainer {
    pub install: Arc<InstallServices>,
    pub uninstall: Arc<UninstallServices>,
    pub start: Arc<StartServices>,
    pub stop: Arc<StopServices>,
    pub restart: Arc<RestartServices>,
    pub status: Arc<ServiceStatuses>,
}

impl UseCaseContainer {
    pub fn new(
        service_repository: Arc<dyn ServiceRepository>,
        service_list_repository: Arc<dyn ServiceListRepository>,
        timing: PollTiming,
    ) -> Self {
        Self {
            install: Arc::new(InstallServices::new(
                Arc::clone(&service_repository),
                Arc::clone(&service_list_repository),
            )),
            uninstall: Arc::new(UninstallServices::new(
                Arc::clone(&service_repository),
                Arc::clone(&service_list_repository),
            )),
            start: Arc::new(StartServices::new(
                Arc::clone(&service_repository),
                Arc::clone(&service_list_repository),
                timing,
            )),
            stop: Arc::new(StopServices::new(
                Arc::clone(&service_repository),
                Arc::clone(&service_list_repository),
                timing,
            )),
            restart: Arc::new(RestartServices::new(
                Arc::clone(&service_repository),
                Arc::clone(&service_list_repository),
                timing,
            )),
            status: Arc::new(ServiceStatuses::new(
                Arc::clone(&service_repository),
                Arc::clone(&service_list_repository),
            )),
        }
    }
}
