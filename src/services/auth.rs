//! Authentication service: registration, login sessions, role checks

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::RngCore;
use validator::Validate;

use crate::{
    config::{AdminConfig, SessionsConfig},
    error::{AppError, AppResult},
    models::user::{Credentials, RegisterUser, Role, UserInfo},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: SessionsConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: SessionsConfig) -> Self {
        Self { repository, config }
    }

    /// Create the bootstrap admin account if no admin exists yet
    pub async fn ensure_admin(&self, admin: &AdminConfig) -> AppResult<()> {
        if self.repository.users.admin_exists().await? {
            return Ok(());
        }

        let password_hash = self.hash_password(&admin.password)?;
        let id = self
            .repository
            .users
            .create(&admin.name, &admin.email, &password_hash, Role::Admin)
            .await?;

        tracing::warn!(
            "Created bootstrap admin account {} (id {}); change its password",
            admin.email,
            id
        );

        Ok(())
    }

    /// Register a new account with the default `user` role. Returns the new
    /// user's ID.
    pub async fn register(&self, request: RegisterUser) -> AppResult<i32> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.email_exists(&request.email, None).await? {
            return Err(AppError::Conflict(
                "User already exists with this email".to_string(),
            ));
        }

        let password_hash = self.hash_password(&request.password)?;

        self.repository
            .users
            .create(&request.name, &request.email, &password_hash, Role::User)
            .await
    }

    /// Authenticate credentials and open a session. Returns the session
    /// token and the user's public fields.
    ///
    /// Unknown email and wrong password produce the same error, so the
    /// response never reveals which one failed.
    pub async fn login(&self, credentials: &Credentials) -> AppResult<(String, UserInfo)> {
        let user = self
            .repository
            .users
            .get_by_email(&credentials.email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        if !self.verify_password(&user.password, &credentials.password)? {
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        let token = generate_token();
        self.repository
            .sessions
            .create(&token, user.id, self.config.ttl_hours)
            .await?;

        Ok((token, user.info()))
    }

    /// Close a session
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.repository.sessions.delete(token).await
    }

    /// Resolve a session token to the caller's user ID
    pub async fn resolve_session(&self, token: &str) -> AppResult<i32> {
        let session = self
            .repository
            .sessions
            .find_valid(token)
            .await?
            .ok_or_else(|| AppError::Authentication("Authentication required".to_string()))?;

        Ok(session.user_id)
    }

    /// Check that the caller holds the admin role. The role is read fresh
    /// from the store on every call rather than cached in the session.
    pub async fn require_admin(&self, user_id: i32) -> AppResult<()> {
        let role = self.repository.users.get_role(user_id).await?;

        if !role.is_admin() {
            return Err(AppError::Authorization(
                "Admin privileges required".to_string(),
            ));
        }

        Ok(())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash
    fn verify_password(&self, hash: &str, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Generate an opaque session token (32 random bytes, hex-encoded)
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_64_hex_chars_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
