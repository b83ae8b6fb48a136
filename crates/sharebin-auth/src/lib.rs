//! # sharebin-auth
//!
//! Credential handling for ShareBin: Argon2id password hashing, the
//! stateless JWT session token codec, the account password policy, and
//! the [`Authenticator`] service that ties them to the credential store.

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::Authenticator;
pub use jwt::{Claims, TokenCodec};
pub use password::{PasswordHasher, PasswordPolicy};
