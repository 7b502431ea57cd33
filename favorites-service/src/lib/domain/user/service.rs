use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::Favorites;
use crate::domain::user::models::FavoritesCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user and favorites operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            favorite_movies: Vec::new(),
            favorite_series: Vec::new(),
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }

    async fn add_to_favorites(
        &self,
        id: &UserId,
        command: FavoritesCommand,
    ) -> Result<(), UserError> {
        if command.is_empty() {
            // Nothing to add; still requires the user to exist
            return self
                .repository
                .find_by_id(id)
                .await?
                .map(|_| ())
                .ok_or(UserError::NotFound(id.to_string()));
        }

        self.repository.add_favorites(id, &command).await
    }

    async fn remove_from_favorites(
        &self,
        id: &UserId,
        command: FavoritesCommand,
    ) -> Result<(), UserError> {
        if command.is_empty() {
            return self
                .repository
                .find_by_id(id)
                .await?
                .map(|_| ())
                .ok_or(UserError::NotFound(id.to_string()));
        }

        self.repository.remove_favorites(id, &command).await
    }

    async fn get_favorites(&self, id: &UserId) -> Result<Favorites, UserError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        Ok(Favorites {
            movies: user.favorite_movies,
            series: user.favorite_series,
        })
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::MediaId;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn add_favorites(&self, id: &UserId, command: &FavoritesCommand) -> Result<(), UserError>;
            async fn remove_favorites(&self, id: &UserId, command: &FavoritesCommand) -> Result<(), UserError>;
        }
    }

    fn media(id: &str) -> MediaId {
        MediaId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_register_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && user.password_hash.starts_with("$argon2")
                    && user.favorite_movies.is_empty()
                    && user.favorite_series.is_empty()
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = RegisterUserCommand {
            username: Username::new("testuser".to_string()).unwrap(),
            password: "password123".to_string(),
        };

        let result = service.register_user(command).await;
        assert!(result.is_ok());

        let user = result.unwrap();
        assert_eq!(user.username.as_str(), "testuser");
        // Password is hashed with real Argon2; plaintext never stored
        assert!(user.password_hash.starts_with("$argon2"));
        assert_ne!(user.password_hash, "password123");
    }

    #[tokio::test]
    async fn test_register_user_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository));

        let command = RegisterUserCommand {
            username: Username::new("testuser".to_string()).unwrap(),
            password: "password456".to_string(),
        };

        let result = service.register_user(command).await;
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_get_user_by_username_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let username = Username::new("nonexistent".to_string()).unwrap();
        let result = service.get_user_by_username(&username).await;
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            UserError::NotFoundByUsername(_)
        ));
    }

    #[tokio::test]
    async fn test_add_to_favorites_delegates_to_atomic_update() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        repository
            .expect_add_favorites()
            .withf(move |id, command| {
                *id == user_id
                    && command.movie_id.as_ref().map(|m| m.as_str()) == Some("m1")
                    && command.series_id.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(()));
        // No find_by_id: mutation goes straight to the store's set update
        repository.expect_find_by_id().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = FavoritesCommand::new(Some(media("m1")), None);
        let result = service.add_to_favorites(&user_id, command).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_add_to_favorites_empty_command_checks_user() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let existing = User {
            id: user_id,
            username: Username::new("testuser".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            favorite_movies: vec![],
            favorite_series: vec![],
            created_at: Utc::now(),
        };

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_add_favorites().times(0);

        let service = UserService::new(Arc::new(repository));

        let result = service
            .add_to_favorites(&user_id, FavoritesCommand::new(None, None))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_add_to_favorites_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_add_favorites()
            .times(1)
            .returning(|id, _| Err(UserError::NotFound(id.to_string())));

        let service = UserService::new(Arc::new(repository));

        let result = service
            .add_to_favorites(&UserId::new(), FavoritesCommand::new(Some(media("m1")), None))
            .await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_from_favorites_delegates() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        repository
            .expect_remove_favorites()
            .withf(move |id, command| {
                *id == user_id && command.series_id.as_ref().map(|s| s.as_str()) == Some("s1")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UserService::new(Arc::new(repository));

        let result = service
            .remove_from_favorites(&user_id, FavoritesCommand::new(None, Some(media("s1"))))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_favorites_success() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let existing = User {
            id: user_id,
            username: Username::new("testuser".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            favorite_movies: vec![media("m1"), media("m2")],
            favorite_series: vec![media("s1")],
            created_at: Utc::now(),
        };

        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = UserService::new(Arc::new(repository));

        let favorites = service.get_favorites(&user_id).await.unwrap();
        assert_eq!(favorites.movies, vec![media("m1"), media("m2")]);
        assert_eq!(favorites.series, vec![media("s1")]);
    }

    #[tokio::test]
    async fn test_get_favorites_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_favorites(&UserId::new()).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }
}
