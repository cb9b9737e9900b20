/// Movie CRUD endpoints
///
/// # Endpoints
///
/// - `GET /api/movies` - List movies, newest first
/// - `POST /api/movies` - Create a movie
/// - `DELETE /api/movies/:id` - Delete a movie
///
/// No session is required. Storage failures are answered with 500 and the raw
/// storage message in `error`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use cinelog_shared::models::{CreateMovie, Movie};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Create movie response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMovieResponse {
    /// ID of the new movie
    pub id: i64,
}

/// Delete movie response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteMovieResponse {
    /// Always true, also for IDs that did not exist
    pub success: bool,
}

/// List every movie
///
/// # Response
///
/// ```json
/// [
///   { "id": 2, "title": "Alien", "director": "Ridley Scott", "year": 1979, "genre": "Horror" },
///   { "id": 1, "title": "Heat", "director": null, "year": null, "genre": null }
/// ]
/// ```
pub async fn list_movies(State(state): State<AppState>) -> ApiResult<Json<Vec<Movie>>> {
    let movies = state.store.list_movies().await.map_err(ApiError::database)?;
    Ok(Json(movies))
}

/// Create a movie
///
/// # Endpoint
///
/// ```text
/// POST /api/movies
/// Content-Type: application/json
///
/// { "title": "Alien", "director": "Ridley Scott", "year": 1979, "genre": "Horror" }
/// ```
///
/// Every field is optional and stored as sent.
///
/// # Response
///
/// ```json
/// { "id": 2 }
/// ```
pub async fn create_movie(
    State(state): State<AppState>,
    Json(req): Json<CreateMovie>,
) -> ApiResult<Json<CreateMovieResponse>> {
    let id = state.store.create_movie(req).await.map_err(ApiError::database)?;

    info!(movie_id = id, "Movie created");
    Ok(Json(CreateMovieResponse { id }))
}

/// Delete a movie and the favourites pointing at it
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteMovieResponse>> {
    let existed = state.store.delete_movie(id).await.map_err(ApiError::database)?;

    if existed {
        info!(movie_id = id, "Movie deleted");
    }

    Ok(Json(DeleteMovieResponse { success: true }))
}
