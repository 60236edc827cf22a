//! User management service (admin operations)

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{ResetPassword, UpdateUser, UserInfo},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all users
    pub async fn list_users(&self) -> AppResult<Vec<UserInfo>> {
        self.repository.users.list().await
    }

    /// Get a user's public fields
    pub async fn get_user(&self, id: i32) -> AppResult<UserInfo> {
        let user = self.repository.users.get_by_id(id).await?;
        Ok(user.info())
    }

    /// Update a user's name, email and role
    pub async fn update_user(&self, id: i32, update: UpdateUser) -> AppResult<()> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self
            .repository
            .users
            .email_exists(&update.email, Some(id))
            .await?
        {
            return Err(AppError::Conflict(
                "Email already in use by another user".to_string(),
            ));
        }

        self.repository
            .users
            .update(id, &update.name, &update.email, update.role)
            .await
    }

    /// Reset a user's password
    pub async fn reset_password(&self, id: i32, request: ResetPassword) -> AppResult<()> {
        request
            .validate()
            .map_err(|_| {
                AppError::Validation("New password must be at least 6 characters long".to_string())
            })?;

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(request.new_password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?
            .to_string();

        self.repository.users.set_password(id, &hash).await
    }

    /// Delete a user and their closed loan history.
    ///
    /// The self-delete guard runs first, so an admin deleting their own
    /// account gets that error regardless of loan state.
    pub async fn delete_user(&self, caller_id: i32, id: i32) -> AppResult<()> {
        if caller_id == id {
            return Err(AppError::Conflict(
                "Cannot delete your own account".to_string(),
            ));
        }

        self.repository.users.delete(id).await
    }
}
