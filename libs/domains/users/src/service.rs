//! User Service - registration and credential verification

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{LoginUser, RegisterUser, User, UserResponse};
use crate::repository::UserRepository;

/// User service providing registration and login
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new member account
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterUser) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self.repository.username_exists(&input.username).await? {
            return Err(UserError::DuplicateUsername(input.username));
        }
        if self.repository.email_exists(&input.email).await? {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(input.fullname, input.username, input.email, password_hash);

        let created = self.repository.insert(user).await?;
        Ok(created.into())
    }

    /// Verify credentials by email or username, returning the user on
    /// success. Inactive accounts are invisible to login.
    #[instrument(skip(self, input), fields(identifier = %input.identifier))]
    pub async fn login(&self, input: LoginUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let user = self
            .repository
            .get_active_by_identifier(&input.identifier)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.verify_password(&input.password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Fetch the profile for an authenticated user
    #[instrument(skip(self))]
    pub async fn profile(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;

    fn register_input() -> RegisterUser {
        RegisterUser {
            fullname: "Jane Doe".to_string(),
            username: "janedoe".to_string(),
            email: "jane@example.com".to_string(),
            password: "Secret1x".to_string(),
            confirm_password: "Secret1x".to_string(),
        }
    }

    #[tokio::test]
    async fn register_hashes_password_and_returns_member() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_exists().returning(|_| Ok(false));
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_insert()
            .withf(|user| {
                user.password_hash != "Secret1x" && user.password_hash.starts_with("$argon2")
            })
            .returning(|user| Ok(user));

        let service = UserService::new(repo);
        let response = service.register(register_input()).await.unwrap();

        assert_eq!(response.username, "janedoe");
        assert!(response.is_active);
    }

    #[tokio::test]
    async fn register_rejects_taken_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_exists().returning(|_| Ok(true));
        repo.expect_insert().never();

        let service = UserService::new(repo);
        let result = service.register(register_input()).await;

        assert!(matches!(result, Err(UserError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn register_rejects_weak_password_before_lookups() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_exists().never();

        let service = UserService::new(repo);
        let result = service
            .register(RegisterUser {
                password: "weak".to_string(),
                confirm_password: "weak".to_string(),
                ..register_input()
            })
            .await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn login_succeeds_with_correct_password() {
        let service_for_hash = UserService::new(MockUserRepository::new());
        let hash = service_for_hash.hash_password("Secret1x").unwrap();

        let user = User::new(
            "Jane Doe".into(),
            "janedoe".into(),
            "jane@example.com".into(),
            hash,
        );

        let mut repo = MockUserRepository::new();
        repo.expect_get_active_by_identifier()
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(repo);
        let result = service
            .login(LoginUser {
                identifier: "janedoe".to_string(),
                password: "Secret1x".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let service_for_hash = UserService::new(MockUserRepository::new());
        let hash = service_for_hash.hash_password("Secret1x").unwrap();

        let user = User::new(
            "Jane Doe".into(),
            "janedoe".into(),
            "jane@example.com".into(),
            hash,
        );

        let mut repo = MockUserRepository::new();
        repo.expect_get_active_by_identifier()
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(repo);
        let result = service
            .login(LoginUser {
                identifier: "janedoe".to_string(),
                password: "Wrong1xx".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_rejects_unknown_identifier() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_active_by_identifier()
            .returning(|_| Ok(None));

        let service = UserService::new(repo);
        let result = service
            .login(LoginUser {
                identifier: "ghost".to_string(),
                password: "Secret1x".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }
}
