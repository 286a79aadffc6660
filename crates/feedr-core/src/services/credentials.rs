//! Credential service - signup, login, and token-to-identity mapping.

use std::sync::Arc;

use crate::domain::{Identity, User};
use crate::error::DomainError;
use crate::ports::{PasswordService, TokenService, UserRepository};
use crate::validate;

/// Digest of a throwaway value, verified against on the unknown-email path
/// so a miss pays the same hashing cost as a wrong password and account
/// existence does not leak through response timing.
const DUMMY_DIGEST: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
    pub expires_in: i64,
}

/// Hashes and verifies passwords, issues and validates bearer tokens, and
/// maps a token to a caller identity.
pub struct CredentialService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl CredentialService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Create an account. Stores only the one-way digest of the password,
    /// never the raw value.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        validate::non_empty("name", name)?;
        validate::email(email)?;
        validate::password(password)?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(DomainError::DuplicateEmail(email.to_string()));
        }

        let digest = self.passwords.hash(password)?;
        let user = User::new(name.trim().to_string(), email.to_string(), digest);

        let saved = self.users.save(user).await?;
        tracing::info!(user_id = %saved.id, "account created");
        Ok(saved)
    }

    /// Exact-email lookup plus digest verification. An unknown email and a
    /// wrong password report the same error kind.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, DomainError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            let _ = self.passwords.verify(password, DUMMY_DIGEST);
            return Err(DomainError::BadCredentials);
        };

        if !self.passwords.verify(password, &user.password_hash)? {
            return Err(DomainError::BadCredentials);
        }

        let token = self.tokens.generate_token(user.id, &user.email)?;
        let expires_in = self.tokens.expiration_seconds();

        Ok(AuthSession {
            user,
            token,
            expires_in,
        })
    }

    /// Signature and expiry check only; no revocation list.
    pub fn identify(&self, token: &str) -> Result<Identity, DomainError> {
        let claims = self.tokens.validate_token(token)?;
        Ok(Identity::from(claims))
    }
}
