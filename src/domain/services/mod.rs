pub mod status_matcher;
pub mod validation;

pub use status_matcher::StatusMatcher;
pub use validation::AccountValidator;
