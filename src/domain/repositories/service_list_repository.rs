use crate::domain::entities::ServiceName;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ServiceListRepository: Send + Sync {
    /// Configured services, in the order they should be started.
    async fn load_services(&self) -> Result<Vec<ServiceName>>;
}
