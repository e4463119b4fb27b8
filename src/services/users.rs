//! Authentication and account service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        user::{LoginRequest, LoginResponse, RegisterRequest, UserInfo},
        RegisteredUser, Role, UserClaims,
    },
    repository::Repository,
};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Create a Staff account. An unknown department is added to the settings.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserInfo> {
        request.validate()?;
        let username = request.username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::Validation("Username is required".to_string()));
        }

        let department = match request.department.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => self
                .repository
                .settings
                .get()
                .await
                .departments
                .first()
                .cloned()
                .unwrap_or_default(),
        };

        let user = RegisteredUser {
            username,
            password_hash: hash_password(&request.password)?,
            role: Role::Staff,
            department: Some(department.clone()).filter(|d| !d.is_empty()),
        };
        let info = UserInfo::from(&user);
        self.repository.users_create(user).await?;

        let added = self
            .repository
            .settings
            .update(|settings| settings.add_department(&department))
            .await?;
        if added {
            tracing::info!("Added department {} from registration", department);
        }

        tracing::info!("Registered account {}", info.username);
        Ok(info)
    }

    /// Check credentials and issue a token
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let invalid = || AppError::Authentication("Invalid username or password".to_string());
        let user = self
            .repository
            .users_find(request.username.trim())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&user.password_hash, &request.password)? {
            return Err(invalid());
        }

        let now = Utc::now().timestamp();
        let expires_in = self.config.jwt_expiration_hours as i64 * 3600;
        let claims = UserClaims {
            sub: user.username.clone(),
            role: user.role,
            department: user.department.clone(),
            exp: now + expires_in,
            iat: now,
        };
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
            user: UserInfo::from(&user),
        })
    }

    /// Create the built-in admin account if it does not exist. Returns true
    /// when it was created.
    pub async fn ensure_default_admin(&self) -> AppResult<bool> {
        if self.repository.users_find(DEFAULT_ADMIN_USERNAME).await?.is_some() {
            return Ok(false);
        }
        let admin = RegisteredUser {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password_hash: hash_password(&self.config.default_admin_password)?,
            role: Role::Admin,
            department: None,
        };
        match self.repository.users_create(admin).await {
            Ok(()) => {
                tracing::warn!("Created default admin account, change its password");
                Ok(true)
            }
            Err(AppError::Conflict(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;

    fn register_request(username: &str, department: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            password: "secret1".into(),
            department: department.map(String::from),
        }
    }

    #[tokio::test]
    async fn duplicate_registration_does_not_grow_user_list() {
        let ctx = testing::context().await;
        let service = UsersService::new(ctx.repository.clone(), AuthConfig::default());

        service.register(register_request("nurse", Some("ICU"))).await.unwrap();
        let err = service.register(register_request("nurse", Some("ER"))).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(ctx.repository.users_list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn new_department_is_appended_to_settings() {
        let ctx = testing::context().await;
        let service = UsersService::new(ctx.repository.clone(), AuthConfig::default());

        let info = service.register(register_request("dentist", Some(" Dental "))).await.unwrap();
        assert_eq!(info.role, Role::Staff);
        assert_eq!(info.department.as_deref(), Some("Dental"));

        let settings = ctx.repository.settings.get().await;
        assert_eq!(settings.departments.last().map(String::as_str), Some("Dental"));

        let info = service.register(register_request("clerk", None)).await.unwrap();
        assert_eq!(info.department.as_deref(), Some("ER"));
    }

    #[tokio::test]
    async fn login_checks_password_and_issues_token() {
        let ctx = testing::context().await;
        let config = AuthConfig::default();
        let service = UsersService::new(ctx.repository.clone(), config.clone());
        service.register(register_request("nurse", Some("ICU"))).await.unwrap();

        let wrong = service
            .login(LoginRequest { username: "nurse".into(), password: "nope".into() })
            .await;
        assert!(matches!(wrong, Err(AppError::Authentication(_))));

        let response = service
            .login(LoginRequest { username: "nurse".into(), password: "secret1".into() })
            .await
            .unwrap();
        let claims = UserClaims::from_token(&response.token, &config.jwt_secret).unwrap();
        assert_eq!(claims.sub, "nurse");
        assert_eq!(claims.scoped_department(), Some("ICU"));
    }

    #[tokio::test]
    async fn default_admin_is_created_once() {
        let ctx = testing::context().await;
        let service = UsersService::new(ctx.repository.clone(), AuthConfig::default());

        assert!(service.ensure_default_admin().await.unwrap());
        assert!(!service.ensure_default_admin().await.unwrap());

        let response = service
            .login(LoginRequest { username: "admin".into(), password: "admin1234".into() })
            .await
            .unwrap();
        assert_eq!(response.user.role, Role::Admin);
    }
}
