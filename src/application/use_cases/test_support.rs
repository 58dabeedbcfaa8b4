use crate::domain::{
    entities::{Action, ServiceName},
    repositories::{ServiceListRepository, ServiceRepository, WrapperOutcome},
};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Wrapper {
        service: String,
        action: Action,
        args: Vec<String>,
    },
    Status {
        service: String,
    },
}

/// Records every invocation and answers status queries from a script.
#[derive(Default)]
pub struct FakeServiceRepository {
    invocations: Mutex<Vec<Invocation>>,
    statuses: Mutex<HashMap<String, VecDeque<String>>>,
    default_status: String,
    wrapper_timeouts: HashSet<(String, Action)>,
    failing_status: HashSet<String>,
}

impl FakeServiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statuses returned in order; the last one repeats once the script runs out.
    pub fn with_statuses(self, service: &str, statuses: &[&str]) -> Self {
        self.statuses.lock().unwrap().insert(
            service.to_string(),
            statuses.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn with_default_status(mut self, status: &str) -> Self {
        self.default_status = status.to_string();
        self
    }

    pub fn with_wrapper_timeout(mut self, service: &str, action: Action) -> Self {
        self.wrapper_timeouts.insert((service.to_string(), action));
        self
    }

    pub fn with_failing_status(mut self, service: &str) -> Self {
        self.failing_status.insert(service.to_string());
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn wrapper_calls(&self) -> Vec<(String, Action)> {
        self.invocations()
            .into_iter()
            .filter_map(|call| match call {
                Invocation::Wrapper {
                    service, action, ..
                } => Some((service, action)),
                Invocation::Status { .. } => None,
            })
            .collect()
    }

    pub fn status_queries(&self, service: &str) -> usize {
        self.invocations()
            .iter()
            .filter(|call| matches!(call, Invocation::Status { service: s } if s == service))
            .count()
    }
}

#[async_trait]
impl ServiceRepository for FakeServiceRepository {
    async fn run_wrapper(
        &self,
        service: &ServiceName,
        action: Action,
        extra_args: &[String],
    ) -> Result<WrapperOutcome> {
        self.invocations.lock().unwrap().push(Invocation::Wrapper {
            service: service.to_string(),
            action,
            args: extra_args.to_vec(),
        });

        if self
            .wrapper_timeouts
            .contains(&(service.to_string(), action))
        {
            Ok(WrapperOutcome::TimedOut)
        } else {
            Ok(WrapperOutcome::Exited(Some(0)))
        }
    }

    async fn query_status(&self, service: &ServiceName) -> Result<String> {
        self.invocations.lock().unwrap().push(Invocation::Status {
            service: service.to_string(),
        });

        if self.failing_status.contains(service.as_str()) {
            return Err(anyhow!("failed to spawn status runner"));
        }

        let mut statuses = self.statuses.lock().unwrap();
        let status = match statuses.get_mut(service.as_str()) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        Ok(status.unwrap_or_else(|| self.default_status.clone()))
    }
}

pub struct FakeServiceList {
    services: Vec<ServiceName>,
    loads: Mutex<usize>,
}

impl FakeServiceList {
    pub fn new(names: &[&str]) -> Self {
        Self {
            services: names.iter().filter_map(|n| ServiceName::new(n)).collect(),
            loads: Mutex::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        *self.loads.lock().unwrap()
    }
}

#[async_trait]
impl ServiceListRepository for FakeServiceList {
    async fn load_services(&self) -> Result<Vec<ServiceName>> {
        *self.loads.lock().unwrap() += 1;
        Ok(self.services.clone())
    }
}
