//! User accounts and authentication claims

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::Role;
use crate::error::AppError;

/// Registered account as persisted in the local `Users` blob
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub role: Role,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub department: Option<String>,
}

/// Self-registration request. New accounts are always Staff.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    /// Defaults to the first configured department
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Account as shown to clients (no password hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserInfo {
    pub username: String,
    pub role: Role,
    pub department: Option<String>,
}

impl From<&RegisteredUser> for UserInfo {
    fn from(user: &RegisteredUser) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role,
            department: user.department.clone(),
        }
    }
}

impl From<&UserClaims> for UserInfo {
    fn from(claims: &UserClaims) -> Self {
        Self {
            username: claims.sub.clone(),
            role: claims.role,
            department: claims.department.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserInfo,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserClaims {
    /// Username
    pub sub: String,
    pub role: Role,
    pub department: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }

    /// Department the caller is restricted to, if any
    pub fn scoped_department(&self) -> Option<&str> {
        match self.role {
            Role::Admin => None,
            Role::Staff => self.department.as_deref().filter(|d| !d.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role, department: Option<&str>) -> UserClaims {
        UserClaims {
            sub: "nurse".into(),
            role,
            department: department.map(String::from),
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: chrono::Utc::now().timestamp(),
        }
    }

    #[test]
    fn token_round_trip() {
        let original = claims(Role::Staff, Some("ICU"));
        let token = original.create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.sub, "nurse");
        assert_eq!(parsed.department.as_deref(), Some("ICU"));
        assert!(UserClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn only_staff_with_department_is_scoped() {
        assert_eq!(claims(Role::Staff, Some("ER")).scoped_department(), Some("ER"));
        assert_eq!(claims(Role::Staff, None).scoped_department(), None);
        assert_eq!(claims(Role::Admin, Some("ER")).scoped_department(), None);
        assert!(claims(Role::Staff, None).require_admin().is_err());
    }
}
