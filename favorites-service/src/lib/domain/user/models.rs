use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::MediaIdError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Holds the stored credentials and both favorite-media lists. The lists are
/// semantically sets: no duplicates, order not significant.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub favorite_movies: Vec<MediaId>,
    pub favorite_series: Vec<MediaId>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
/// Comparison is case-sensitive exact match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque movie or series identifier.
///
/// The service does not resolve these against a catalog; the only constraint
/// is non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaId(String);

impl MediaId {
    /// Create a new media identifier.
    ///
    /// # Errors
    /// * `Empty` - Identifier is an empty string
    pub fn new(id: String) -> Result<Self, MediaIdError> {
        if id.is_empty() {
            Err(MediaIdError::Empty)
        } else {
            Ok(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub password: String,
}

impl RegisterUserCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(username: Username, password: String) -> Self {
        Self { username, password }
    }
}

/// Command describing a favorites mutation.
///
/// Either identifier may be absent; a command with neither is a no-op the
/// service accepts without touching storage.
#[derive(Debug, Clone)]
pub struct FavoritesCommand {
    pub movie_id: Option<MediaId>,
    pub series_id: Option<MediaId>,
}

impl FavoritesCommand {
    pub fn new(movie_id: Option<MediaId>, series_id: Option<MediaId>) -> Self {
        Self {
            movie_id,
            series_id,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movie_id.is_none() && self.series_id.is_none()
    }
}

/// A user's favorite-media lists, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorites {
    pub movies: Vec<MediaId>,
    pub series: Vec<MediaId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rejects_short_and_long() {
        assert!(matches!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { .. })
        ));
        assert!(matches!(
            Username::new("a".repeat(33)),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_username_rejects_invalid_chars() {
        assert!(matches!(
            Username::new("no spaces".to_string()),
            Err(UsernameError::InvalidCharacters)
        ));
        assert!(Username::new("ok_name-1".to_string()).is_ok());
    }

    #[test]
    fn test_media_id_rejects_empty() {
        assert!(matches!(
            MediaId::new(String::new()),
            Err(MediaIdError::Empty)
        ));
        assert_eq!(MediaId::new("m1".to_string()).unwrap().as_str(), "m1");
    }

    #[test]
    fn test_favorites_command_is_empty() {
        assert!(FavoritesCommand::new(None, None).is_empty());
        assert!(
            !FavoritesCommand::new(Some(MediaId::new("m1".to_string()).unwrap()), None).is_empty()
        );
    }
}
