use crate::domain::{entities::ServiceName, repositories::ServiceListRepository};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

const GROUP_KEY: &str = "group.default";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceListError {
    #[error("no 'group.default' entry found")]
    MissingGroup,
    #[error("entry '{0}' has no value")]
    MissingValue(String),
    #[error("entry '{0}' contains an empty service name")]
    EmptyServiceName(String),
}

/// Reads the default service group from `fusion.properties`.
pub struct PropertiesServiceListRepository {
    path: PathBuf,
}

impl PropertiesServiceListRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses the first line starting with `group.default`; its value is split on
    /// commas and each entry trimmed.
    pub fn parse_service_list(content: &str) -> Result<Vec<ServiceName>, ServiceListError> {
        let line = content
            .lines()
            .map(str::trim)
            .find(|line| line.starts_with(GROUP_KEY))
            .ok_or(ServiceListError::MissingGroup)?;

        let value = match line.split_once('=') {
            Some((_, value)) if !value.trim().is_empty() => value,
            _ => return Err(ServiceListError::MissingValue(line.to_string())),
        };

        value
            .split(',')
            .map(|entry| {
                ServiceName::new(entry)
                    .ok_or_else(|| ServiceListError::EmptyServiceName(line.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl ServiceListRepository for PropertiesServiceListRepository {
    async fn load_services(&self) -> Result<Vec<ServiceName>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let services = Self::parse_service_list(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        tracing::debug!(count = services.len(), "Loaded service list");
        Ok(services)
    }
}
