use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}

/// Claims carried by a bearer token.
///
/// `sub` is the user id the token asserts. `exp` is only present when the
/// issuer was configured with a token lifetime; tokens without it never
/// expire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create claims binding a user id, with expiry when a lifetime is given.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `ttl_hours` - Optional hours until the token expires
    ///
    /// # Returns
    /// Claims with sub and iat set, and exp set when `ttl_hours` is Some
    pub fn for_user(user_id: impl ToString, ttl_hours: Option<i64>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: ttl_hours.map(|hours| (now + Duration::hours(hours)).timestamp()),
        }
    }
}

/// Signs and validates bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a process-wide secret.
pub struct TokenHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenHandler {
    /// Create a new token handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// Tokens without an `exp` claim are accepted; when `exp` is present it
    /// is enforced.
    ///
    /// # Errors
    /// * `Expired` - Token has an exp claim in the past
    /// * `InvalidToken` - Signature is invalid or token is malformed
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Tokens issued without a lifetime carry no 'exp' claim
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_and_decode() {
        let handler = TokenHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let claims = Claims::for_user("user123", None);

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
        assert!(decoded.exp.is_none());
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = TokenHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let result = handler.decode("invalid.token.here");
        assert!(matches!(result, Err(TokenError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = TokenHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = TokenHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .encode(&Claims::for_user("user123", None))
            .expect("Failed to encode token");

        // Foreign-secret-signed token must not verify
        let result = handler2.decode(&token);
        assert!(matches!(result, Err(TokenError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_tampered_token() {
        let handler = TokenHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let token = handler
            .encode(&Claims::for_user("user123", None))
            .expect("Failed to encode token");

        let mut tampered = token.clone();
        tampered.replace_range(..1, if token.starts_with('A') { "B" } else { "A" });

        assert!(handler.decode(&tampered).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let handler = TokenHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let claims = Claims {
            sub: "user123".to_string(),
            iat: Utc::now().timestamp() - 7200,
            exp: Some(Utc::now().timestamp() - 3600),
        };

        let token = handler.encode(&claims).expect("Failed to encode token");
        let result = handler.decode(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_claims_for_user_with_ttl() {
        let claims = Claims::for_user("user123", Some(24));

        assert_eq!(claims.sub, "user123");
        let exp = claims.exp.expect("exp should be set");
        assert_eq!(exp - claims.iat, 24 * 60 * 60);
    }
}
