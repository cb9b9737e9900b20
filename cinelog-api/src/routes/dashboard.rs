/// Dashboard endpoints: favourites and the usage ranking
///
/// # Endpoints
///
/// - `POST /api/my-movies` - Add a favourite (session required)
/// - `GET /api/my-movies` - List the caller's favourites (session required)
/// - `GET /api/stats` - Users ranked by number of `/api` requests

use crate::{
    app::AppState,
    error::ApiResult,
    middleware::intercept::CurrentUser,
};
use axum::{extract::State, Json};
use cinelog_shared::{
    models::{Movie, RankingRow},
    store::StoreError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Add favourite request
#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    /// Movie to mark
    #[serde(rename = "movieId")]
    pub movie_id: i64,
}

/// Add favourite response
#[derive(Debug, Serialize, Deserialize)]
pub struct AddFavoriteResponse {
    /// Always true
    pub success: bool,
}

/// Mark a movie as one of the caller's favourites
///
/// # Endpoint
///
/// ```text
/// POST /api/my-movies
/// Content-Type: application/json
///
/// { "movieId": 3 }
/// ```
///
/// Adding an existing favourite is a no-op. An unknown movie ID is ignored
/// the same way (logged at WARN).
///
/// # Errors
///
/// - `403 Forbidden`: no session
/// - `500 Internal Server Error`: storage failure
pub async fn add_favorite(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<AddFavoriteRequest>,
) -> ApiResult<Json<AddFavoriteResponse>> {
    match state.store.add_favorite(user.user_id, req.movie_id).await {
        Ok(()) => debug!(user_id = user.user_id, movie_id = req.movie_id, "Favourite added"),
        Err(StoreError::ForeignKeyViolation(reason)) => warn!(
            user_id = user.user_id,
            movie_id = req.movie_id,
            reason = %reason,
            "Favourite ignored"
        ),
        Err(e) => return Err(e.into()),
    }

    Ok(Json(AddFavoriteResponse { success: true }))
}

/// List the caller's favourite movies
pub async fn list_favorites(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Movie>>> {
    let movies = state.store.list_favorites(user.user_id).await?;
    Ok(Json(movies))
}

/// Usage ranking
///
/// # Response
///
/// ```json
/// [
///   { "username": "alice", "acessos": 12 },
///   { "username": "bob", "acessos": 3 }
/// ]
/// ```
///
/// Users without any logged request are not listed.
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<Vec<RankingRow>>> {
    let ranking = state.store.access_ranking().await?;
    Ok(Json(ranking))
}
