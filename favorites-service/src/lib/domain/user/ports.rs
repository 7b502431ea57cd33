use async_trait::async_trait;

use crate::domain::user::models::Favorites;
use crate::domain::user::models::FavoritesCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with an empty favorites list.
    ///
    /// The password is hashed before anything is persisted; uniqueness of the
    /// username is enforced by the store, not by a prior existence check.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;

    /// Add the supplied identifiers to the user's favorite sets.
    ///
    /// Idempotent: identifiers already present are left alone. A command with
    /// neither identifier succeeds without touching storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn add_to_favorites(
        &self,
        id: &UserId,
        command: FavoritesCommand,
    ) -> Result<(), UserError>;

    /// Remove the supplied identifiers from the user's favorite sets.
    ///
    /// Removing an identifier that is not present is a no-op, not an error.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn remove_from_favorites(
        &self,
        id: &UserId,
        command: FavoritesCommand,
    ) -> Result<(), UserError>;

    /// Retrieve both favorite sets for a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist (verified token id no longer resolves)
    /// * `DatabaseError` - Database operation failed
    async fn get_favorites(&self, id: &UserId) -> Result<Favorites, UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// The store's unique constraint on username is the authority on
    /// duplicates; concurrent inserts of the same username yield exactly one
    /// success.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Atomically add identifiers to the user's favorite sets.
    ///
    /// Must be a single set-algebra update in the store (no read-modify-write)
    /// so concurrent mutations for the same user cannot lose writes.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn add_favorites(&self, id: &UserId, command: &FavoritesCommand)
        -> Result<(), UserError>;

    /// Atomically remove identifiers from the user's favorite sets.
    ///
    /// Same atomicity contract as `add_favorites`; absent identifiers are
    /// ignored.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn remove_favorites(
        &self,
        id: &UserId,
        command: &FavoritesCommand,
    ) -> Result<(), UserError>;
}
