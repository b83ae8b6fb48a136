//! Account password policy enforcement.

use sharebin_core::config::auth::AuthConfig;
use sharebin_core::error::AppError;

/// Validates new account passwords against configured policy.
///
/// Applies only to account registration; per-object retrieval passwords
/// are chosen freely by the uploader.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    /// Creates a new policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password, returning the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short_rejected() {
        let policy = PasswordPolicy::new(&AuthConfig::default());
        assert!(policy.validate("ab").is_err());
        assert!(policy.validate("longenough").is_ok());
    }
}
