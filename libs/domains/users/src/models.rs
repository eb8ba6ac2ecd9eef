use axum_helpers::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// User entity - stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub fullname: String,
    pub username: String,
    pub email: String,
    /// Argon2 password hash (never exposed in API responses)
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create an active member account with an already-hashed password
    pub fn new(fullname: String, username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            fullname,
            username,
            email,
            password_hash,
            role: Role::Member,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public view of a user, without the password hash
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fullname: user.fullname,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Registration payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(length(min = 1, max = 100))]
    pub fullname: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_password_policy"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Password doesn't match"))]
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Login payload: `identifier` is an email or a username
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginUser {
    #[validate(length(min = 1))]
    pub identifier: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// At least 6 characters, one uppercase letter, one digit.
fn validate_password_policy(password: &str) -> Result<(), ValidationError> {
    if password.len() < 6 {
        return Err(ValidationError::new("password_too_short")
            .with_message("Password must be at least 6 characters".into()));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::new("password_needs_uppercase")
            .with_message("Contains at least one uppercase letter".into()));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("password_needs_number")
            .with_message("Contains at least one number".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_input(password: &str, confirm: &str) -> RegisterUser {
        RegisterUser {
            fullname: "Jane Doe".to_string(),
            username: "janedoe".to_string(),
            email: "jane@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(register_input("Secret1x", "Secret1x").validate().is_ok());
    }

    #[test]
    fn password_without_uppercase_fails() {
        assert!(register_input("secret1x", "secret1x").validate().is_err());
    }

    #[test]
    fn password_without_digit_fails() {
        assert!(register_input("Secretxx", "Secretxx").validate().is_err());
    }

    #[test]
    fn short_password_fails() {
        assert!(register_input("Se1", "Se1").validate().is_err());
    }

    #[test]
    fn mismatched_confirmation_fails() {
        assert!(register_input("Secret1x", "Secret2x").validate().is_err());
    }

    #[test]
    fn response_carries_no_password_hash() {
        let user = User::new(
            "Jane Doe".into(),
            "janedoe".into(),
            "jane@example.com".into(),
            "$argon2id$fake".into(),
        );
        let response: UserResponse = user.into();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "member");
        assert_eq!(json["is_active"], true);
    }
}
