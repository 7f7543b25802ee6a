use jsonwebtoken::TokenData;

use crate::{entities::token::Claims, errors::AuthError};

pub trait TokenService: Send + Sync {
    /// Signs an admin token for `subject`.
    fn create_admin_token(&self, subject: &str) -> Result<String, AuthError>;

    /// Verifies signature and expiry, returning the claims.
    fn decode_token(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;

    /// Lifetime of issued tokens, in seconds.
    fn expires_in(&self) -> i64;
}
