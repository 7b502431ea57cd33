use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::ApiError;
use super::ApiSuccess;
use super::FavoritesRequestBody;
use super::MessageResponseData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn add_to_favorites(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(body): Json<FavoritesRequestBody>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .user_service
        .add_to_favorites(&auth_user.user_id, command)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData {
            message: "Added to favorites successfully".to_string(),
        },
    ))
}
