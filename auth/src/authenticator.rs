use thiserror::Error;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::TokenError;
use crate::token::TokenHandler;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Owns the signing secret (injected once at construction, read-only
/// thereafter) and the configured token lifetime.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_handler: TokenHandler,
    token_ttl_hours: Option<i64>,
}

/// Authentication operation errors.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl_hours` - Optional token lifetime; None issues
    ///   non-expiring tokens
    pub fn new(jwt_secret: &[u8], token_ttl_hours: Option<i64>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_handler: TokenHandler::new(jwt_secret),
            token_ttl_hours,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for the user.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - User identifier to bind into the token
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Password verification failed
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: impl ToString,
    ) -> Result<String, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(user_id)?)
    }

    /// Issue a token without password verification.
    ///
    /// Used after registration, where the caller has just created the
    /// credentials being asserted.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn issue_token(&self, user_id: impl ToString) -> Result<String, TokenError> {
        let claims = Claims::for_user(user_id, self.token_ttl_hours);
        self.token_handler.encode(&claims)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token validation or decoding failed
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_handler.decode(token)
    }
}
