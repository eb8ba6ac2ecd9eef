use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    async fn insert(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Look up an active user by email or username
    async fn get_active_by_identifier(&self, identifier: &str) -> UserResult<Option<User>>;

    /// Check if a username is taken
    async fn username_exists(&self, username: &str) -> UserResult<bool>;

    /// Check if an email is registered
    async fn email_exists(&self, email: &str) -> UserResult<bool>;
}
