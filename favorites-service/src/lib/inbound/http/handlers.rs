use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::FavoritesCommand;
use crate::domain::user::models::MediaId;
use crate::user::errors::UserError;

pub mod add_to_favorites;
pub mod get_favorites;
pub mod login;
pub mod register;
pub mod remove_from_favorites;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                // Internal detail goes to the operator log, never to the client
                tracing::error!(detail = %detail, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByUsername(_) => {
                ApiError::NotFound("User not found".to_string())
            }
            UserError::UsernameAlreadyExists(_) => {
                ApiError::Conflict("Username already exists".to_string())
            }
            UserError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid username or password".to_string())
            }
            UserError::InvalidUsername(_)
            | UserError::InvalidMediaId(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

/// Wire shape for all error responses: `{"error": "<short message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Wire shape for plain acknowledgement responses: `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponseData {
    pub message: String,
}

/// Shared request body for both favorites mutations (raw JSON).
///
/// Both identifiers are optional; a body with neither is accepted as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FavoritesRequestBody {
    #[serde(rename = "movieId")]
    movie_id: Option<String>,
    #[serde(rename = "seriesId")]
    series_id: Option<String>,
}

impl FavoritesRequestBody {
    pub fn try_into_command(self) -> Result<FavoritesCommand, ApiError> {
        let movie_id = self
            .movie_id
            .map(MediaId::new)
            .transpose()
            .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid movieId: {}", e)))?;
        let series_id = self
            .series_id
            .map(MediaId::new)
            .transpose()
            .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid seriesId: {}", e)))?;

        Ok(FavoritesCommand::new(movie_id, series_id))
    }
}
