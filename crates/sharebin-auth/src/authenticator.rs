//! The authenticator service: register, login, verify.

use std::sync::Arc;

use tracing::info;

use sharebin_core::config::auth::AuthConfig;
use sharebin_core::error::AppError;
use sharebin_database::UserStore;
use sharebin_entity::{CreateUser, User};

use crate::jwt::TokenCodec;
use crate::password::{PasswordHasher, PasswordPolicy};

/// Verifies credentials and issues session tokens.
#[derive(Debug, Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenCodec,
    policy: PasswordPolicy,
}

impl Authenticator {
    /// Creates a new authenticator over the given credential store.
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            tokens: TokenCodec::new(config),
            policy: PasswordPolicy::new(config),
        }
    }

    /// Registers a new user and mints a session token.
    ///
    /// The password is hashed before the user record exists; duplicate
    /// emails surface as `Conflict` from the store's atomic uniqueness
    /// check. The caller never sees the hash.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        profile_image: Option<String>,
    ) -> Result<(String, User), AppError> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(AppError::validation("Name and email are required"));
        }
        self.policy.validate(password)?;

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                // Fall back to the email so the SPA can render an identicon.
                profile_image: profile_image.or_else(|| Some(email.to_string())),
            })
            .await?;

        info!(user_id = %user.id, "User registered");

        let token = self.tokens.mint(user.id, &user.name)?;
        Ok((token, user))
    }

    /// Verifies credentials and mints a session token.
    ///
    /// An unknown email and a failed password check return the same
    /// `InvalidCredentials` error so accounts cannot be enumerated.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(AppError::invalid_credentials)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AppError::invalid_credentials());
        }

        info!(user_id = %user.id, "User logged in");

        let token = self.tokens.mint(user.id, &user.name)?;
        Ok((token, user))
    }

    /// Validates a session token and resolves it to the current user.
    ///
    /// Fails with `Unauthorized` if the signature is invalid, the token
    /// is malformed or expired, or the referenced user no longer exists.
    pub async fn verify(&self, token: &str) -> Result<User, AppError> {
        let claims = self.tokens.decode(token)?;
        self.user(claims.user_id()).await
    }

    /// Resolves an already-authenticated user id to the stored account.
    pub async fn user(&self, id: uuid::Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unknown user"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharebin_core::error::ErrorKind;
    use sharebin_database::memory::MemoryUserStore;

    fn authenticator() -> Authenticator {
        Authenticator::new(Arc::new(MemoryUserStore::new()), &AuthConfig::default())
    }

    #[tokio::test]
    async fn test_register_login_verify_flow() {
        let auth = authenticator();

        let (token, user) = auth
            .register("Alice", "alice@example.com", "hunter2x", None)
            .await
            .unwrap();
        assert_eq!(user.email, "alice@example.com");
        // Identicon fallback.
        assert_eq!(user.profile_image.as_deref(), Some("alice@example.com"));

        let verified = auth.verify(&token).await.unwrap();
        assert_eq!(verified.id, user.id);

        let (login_token, login_user) = auth.login("alice@example.com", "hunter2x").await.unwrap();
        assert_eq!(login_user.id, user.id);
        assert_eq!(auth.verify(&login_token).await.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let auth = authenticator();
        auth.register("Alice", "alice@example.com", "hunter2x", None)
            .await
            .unwrap();

        let err = auth
            .register("Other", "alice@example.com", "hunter2x", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let auth = authenticator();
        auth.register("Alice", "alice@example.com", "hunter2x", None)
            .await
            .unwrap();

        let unknown = auth.login("nobody@example.com", "hunter2x").await.unwrap_err();
        let wrong = auth.login("alice@example.com", "wrong-pass").await.unwrap_err();

        assert_eq!(unknown.kind, ErrorKind::InvalidCredentials);
        assert_eq!(wrong.kind, ErrorKind::InvalidCredentials);
        assert_eq!(unknown.message, wrong.message);
    }

    #[tokio::test]
    async fn test_short_password_rejected_before_any_write() {
        let auth = authenticator();
        let err = auth
            .register("Alice", "alice@example.com", "abc", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        // Email must remain available.
        auth.register("Alice", "alice@example.com", "hunter2x", None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_verify_rejects_garbage() {
        let auth = authenticator();
        let err = auth.verify("garbage").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
