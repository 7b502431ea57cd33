use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::models::FavoritesCommand;
use crate::domain::user::models::MediaId;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User, UserError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;
    let username: String = row
        .try_get("username")
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;
    let favorite_movies: Vec<String> = row
        .try_get("favorite_movies")
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;
    let favorite_series: Vec<String> = row
        .try_get("favorite_series")
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

    Ok(User {
        id: UserId(id),
        username: Username::new(username)?,
        password_hash,
        favorite_movies: favorite_movies
            .into_iter()
            .map(MediaId::new)
            .collect::<Result<_, _>>()?,
        favorite_series: favorite_series
            .into_iter()
            .map(MediaId::new)
            .collect::<Result<_, _>>()?,
        created_at,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let movies: Vec<String> = user
            .favorite_movies
            .iter()
            .map(|m| m.as_str().to_string())
            .collect();
        let series: Vec<String> = user
            .favorite_series
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, favorite_movies, favorite_series, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(&movies)
        .bind(&series)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique constraint is the authority on duplicates; a prior
            // existence check would leave a check-then-act race open
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserError::UsernameAlreadyExists(user.username.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, favorite_movies, favorite_series, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, favorite_movies, favorite_series, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn add_favorites(
        &self,
        id: &UserId,
        command: &FavoritesCommand,
    ) -> Result<(), UserError> {
        // Single conditional array update: idempotent set-add with no
        // read-modify-write, so concurrent mutations cannot lose writes
        let result = sqlx::query(
            r#"
            UPDATE users
            SET favorite_movies = CASE
                    WHEN $2::text IS NULL OR favorite_movies @> ARRAY[$2::text]
                        THEN favorite_movies
                    ELSE array_append(favorite_movies, $2::text)
                END,
                favorite_series = CASE
                    WHEN $3::text IS NULL OR favorite_series @> ARRAY[$3::text]
                        THEN favorite_series
                    ELSE array_append(favorite_series, $3::text)
                END
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(command.movie_id.as_ref().map(|m| m.as_str()))
        .bind(command.series_id.as_ref().map(|s| s.as_str()))
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn remove_favorites(
        &self,
        id: &UserId,
        command: &FavoritesCommand,
    ) -> Result<(), UserError> {
        // array_remove on an absent element leaves the array unchanged
        let result = sqlx::query(
            r#"
            UPDATE users
            SET favorite_movies = CASE
                    WHEN $2::text IS NULL THEN favorite_movies
                    ELSE array_remove(favorite_movies, $2::text)
                END,
                favorite_series = CASE
                    WHEN $3::text IS NULL THEN favorite_series
                    ELSE array_remove(favorite_series, $3::text)
                END
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(command.movie_id.as_ref().map(|m| m.as_str()))
        .bind(command.series_id.as_ref().map(|s| s.as_str()))
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
