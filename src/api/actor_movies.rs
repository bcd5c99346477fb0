use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::info;

use super::people::decoded;
use crate::api::{ActorMovieBody, ApiError, ApiResponse, AppState, MoviesOfActorBody};
use crate::models::actor::ActorMovie;

pub const LINK_REJECTED: &str =
    "provided data is invalid or actor_id to movie_id assignment already exists";

/// `POST /actor_movie/save`
pub async fn save_actor_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ActorMovie>, JsonRejection>,
) -> Result<Json<ApiResponse<ActorMovieBody>>, ApiError> {
    let link = decoded(payload)?;
    info!(actor_id = link.actor_id, movie_id = link.movie_id, "Request body decoded");

    let actor_movie = state
        .actor_movie_service()
        .link(link)
        .await
        .map_err(ApiError::catalog(LINK_REJECTED))?;

    Ok(Json(ApiResponse::success(ActorMovieBody { actor_movie })))
}

/// `GET /actor_movie/list`
pub async fn list_actor_movies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<MoviesOfActorBody>>, ApiError> {
    let movies_of_actor = state
        .actor_movie_service()
        .list()
        .await
        .map_err(ApiError::catalog("Unable to get data from DB"))?;

    if movies_of_actor.is_empty() {
        info!("No data");
        return Err(ApiError::NoData);
    }

    Ok(Json(ApiResponse::success(MoviesOfActorBody { movies_of_actor })))
}
