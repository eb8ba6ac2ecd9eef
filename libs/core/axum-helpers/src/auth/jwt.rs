use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::JwtConfig;

/// User role carried inside the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Member => write!(f, "member"),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User role
    pub role: Role,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
}

/// Stateless HS256 JWT signer and verifier.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
    ttl_secs: i64,
}

impl JwtAuth {
    /// Create a new auth instance from config.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let config = JwtConfig::from_env()?;
    /// let auth = JwtAuth::new(&config);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            ttl_secs: config.ttl_secs,
        }
    }

    /// Issue a signed token for a user.
    pub fn issue_token(&self, user_id: Uuid, role: Role) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
            iat: now.timestamp(),
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify signature and expiry, returning the decoded claims.
    pub fn verify_token(&self, token: &str) -> eyre::Result<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("unit-test-secret-that-is-long-enough!!"))
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let auth = test_auth();
        let user_id = Uuid::now_v7();

        let token = auth.issue_token(user_id, Role::Member).unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, Role::Member);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let auth = test_auth();
        let other = JwtAuth::new(&JwtConfig::new("a-completely-different-secret-string!"));

        let token = auth.issue_token(Uuid::now_v7(), Role::Admin).unwrap();
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn verify_rejects_expired_token() {
        let config = JwtConfig::new("unit-test-secret-that-is-long-enough!!").with_ttl(-60);
        let auth = JwtAuth::new(&config);

        let token = auth.issue_token(Uuid::now_v7(), Role::Member).unwrap();
        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        let auth = test_auth();
        assert!(auth.verify_token("not-a-jwt").is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Member).unwrap(), "\"member\"");
    }
}
