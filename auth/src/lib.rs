//! Authentication utilities library
//!
//! Provides the credential and session-token infrastructure for the
//! favorites service:
//! - Password hashing (Argon2id, random salt per call)
//! - Bearer token issuance and verification (HS256 JWT)
//! - An authentication coordinator owning the signing secret
//!
//! The signing secret is injected once at construction and read-only
//! thereafter. Tokens carry the user id as `sub` and never hit storage;
//! verification is stateless per request.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Token Issuance and Verification
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", None);
//! let token = auth.issue_token("user123").unwrap();
//! let claims = auth.verify_token(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Login Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Some(24));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let token = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Per-request: verify token
//! let claims = auth.verify_token(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenHandler;
