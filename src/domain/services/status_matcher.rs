use crate::domain::entities::{Action, ServiceName};

/// Case-insensitive substrings that end polling for one service.
#[derive(Debug, Clone)]
pub struct StatusMatcher {
    needles: Vec<String>,
}

impl StatusMatcher {
    pub fn for_action(action: Action, service: &ServiceName) -> Self {
        let service = service.as_str().to_lowercase();
        let needles = match action {
            Action::Start => vec![format!("{} is running", service), "failed".to_string()],
            Action::Stop => vec![
                format!("{} is not running", service),
                format!("{} is stopped", service),
                "failed".to_string(),
            ],
            _ => Vec::new(),
        };
        Self { needles }
    }

    pub fn matches(&self, status: &str) -> bool {
        let status = status.to_lowercase();
        self.needles.iter().any(|needle| status.contains(needle))
    }
}
