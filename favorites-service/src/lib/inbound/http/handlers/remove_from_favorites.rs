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

pub async fn remove_from_favorites(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(body): Json<FavoritesRequestBody>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let command = body.try_into_command()?;

    // Removing identifiers that are not present is a no-op, not an error
    state
        .user_service
        .remove_from_favorites(&auth_user.user_id, command)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData {
            message: "Removed from favorites successfully".to_string(),
        },
    ))
}
