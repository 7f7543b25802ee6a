use validator::Validate;
use zeroize::Zeroizing;

use crate::auth::password::verify_password;
use crate::entities::token::{LoginRequest, LoginResponse};
use crate::errors::AuthError;
use crate::repositories::token::TokenService;
use crate::settings::AppConfig;

/// The single administrator allowed to log in.
pub struct AdminCredentials {
    pub email: String,
    pub password_hash: Zeroizing<String>,
}

impl From<&AppConfig> for AdminCredentials {
    fn from(config: &AppConfig) -> Self {
        AdminCredentials {
            email: config.admin_email.trim().to_lowercase(),
            password_hash: Zeroizing::new(config.admin_password_hash.clone()),
        }
    }
}

pub struct AuthHandler<T>
where
    T: TokenService,
{
    pub admin: AdminCredentials,
    pub token_service: T,
}

impl<T> AuthHandler<T>
where
    T: TokenService,
{
    pub fn new(admin: AdminCredentials, token_service: T) -> Self {
        AuthHandler {
            admin,
            token_service
        }
    }

    /// Checks the admin credentials and issues a signed admin token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        request.validate()?;

        // Hashed before the email check: every rejection costs one verification
        let password_check = verify_password(&request.password, &self.admin.password_hash);

        if request.email.trim().to_lowercase() != self.admin.email {
            tracing::warn!("Login attempt with unknown email");
            return Err(AuthError::WrongCredentials);
        }

        let is_password_valid = password_check
            .map_err(|e| {
                tracing::error!("Admin password hash could not be checked: {}", e);
                AuthError::WrongCredentials
            })?;
        if !is_password_valid {
            tracing::warn!("Login attempt with wrong password");
            return Err(AuthError::WrongCredentials);
        }

        let token = self.token_service.create_admin_token(&self.admin.email)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        tracing::info!("Admin logged in successfully");
        Ok(LoginResponse::new(token, self.token_service.expires_in()))
    }
}
