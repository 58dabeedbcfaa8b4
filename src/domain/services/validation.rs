pub const DOMAIN_SEPARATOR: char = '\\';

pub struct AccountValidator;

impl AccountValidator {
    /// Accepts `DOMAIN\USERNAME`: the separator must follow at least one character.
    pub fn validate_username(username: &str) -> bool {
        matches!(username.find(DOMAIN_SEPARATOR), Some(index) if index >= 1)
    }
}
