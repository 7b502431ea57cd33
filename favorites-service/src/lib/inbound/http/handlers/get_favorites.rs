use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Favorites;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_favorites(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<GetFavoritesResponseData>, ApiError> {
    state
        .user_service
        .get_favorites(&auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref favorites| ApiSuccess::new(StatusCode::OK, favorites.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetFavoritesResponseData {
    #[serde(rename = "favoriteMoviesIds")]
    pub favorite_movies_ids: Vec<String>,
    #[serde(rename = "favoriteSeriesIds")]
    pub favorite_series_ids: Vec<String>,
}

impl From<&Favorites> for GetFavoritesResponseData {
    fn from(favorites: &Favorites) -> Self {
        Self {
            favorite_movies_ids: favorites.movies.iter().map(|m| m.to_string()).collect(),
            favorite_series_ids: favorites.series.iter().map(|s| s.to_string()).collect(),
        }
    }
}
