use axum::{
    Json,
    extract::{Path, Query, RawQuery, State, rejection::JsonRejection, rejection::QueryRejection},
};
use std::sync::Arc;
use tracing::{debug, info};

use super::options::{NEXT_MOVIE_ID, parse_options, query_pairs};
use super::people::decoded;
use super::validation::{parse_id, validate_id};
use crate::api::{
    ApiError, ApiResponse, AppState, MovieBody, MoviesBody, MoviesPage, next_cursor,
};
use crate::db::Page;
use crate::models::movie::{Movie, MovieSearch, MovieUpdate, NewMovie};

const GET_FAILED: &str = "Unable to get data from DB";
const SAVE_FAILED: &str = "Unable to save movie data in DB";
const UPDATE_FAILED: &str = "Unable to update movie data in DB";
const DELETE_FAILED: &str = "Unable to delete data from DB";

fn movies_page(movies: Vec<Movie>) -> Result<Json<ApiResponse<MoviesPage>>, ApiError> {
    let Some(next_movie_id) = next_cursor(&movies, |m| m.id) else {
        info!("No data");
        return Err(ApiError::NoData);
    };

    Ok(Json(ApiResponse::success(MoviesPage {
        movies,
        next_movie_id,
    })))
}

/// `GET /movie/find/{id}`
pub async fn find_movie(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<MovieBody>>, ApiError> {
    let id = parse_id(&raw_id)?;

    let movie = state
        .movie_service()
        .find(id)
        .await
        .map_err(ApiError::catalog(GET_FAILED))?;

    Ok(Json(ApiResponse::success(MovieBody { movie })))
}

/// `GET /movie/find?title=…&actor_name=…`
///
/// Case-insensitive fragment search. Both fragments must match when both
/// are given.
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    search: Result<Query<MovieSearch>, QueryRejection>,
) -> Result<Json<ApiResponse<MoviesBody>>, ApiError> {
    let Query(search) = search.map_err(|rejection| {
        debug!(error = %rejection, "Failed to decode search query");
        ApiError::bad_request(rejection.body_text())
    })?;

    let movies = state
        .movie_service()
        .search(search)
        .await
        .map_err(ApiError::catalog(GET_FAILED))?;

    if movies.is_empty() {
        debug!("Search matched no movies");
        return Err(ApiError::NoData);
    }

    Ok(Json(ApiResponse::success(MoviesBody { movies })))
}

/// `POST /movie/save`
pub async fn save_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewMovie>, JsonRejection>,
) -> Result<Json<ApiResponse<MovieBody>>, ApiError> {
    let new_movie = decoded(payload)?;
    info!(title = %new_movie.title, "Request body decoded");

    let movie = state
        .movie_service()
        .save(new_movie)
        .await
        .map_err(ApiError::catalog(SAVE_FAILED))?;

    info!(id = movie.id, "Movie saved");
    Ok(Json(ApiResponse::success(MovieBody { movie })))
}

/// `PUT /movie/update`
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MovieUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<MovieBody>>, ApiError> {
    let changes = decoded(payload)?;
    info!(id = changes.id, "Request body decoded");
    validate_id(changes.id)?;

    let movie = state
        .movie_service()
        .update(changes)
        .await
        .map_err(ApiError::catalog(UPDATE_FAILED))?;

    Ok(Json(ApiResponse::success(MovieBody { movie })))
}

/// `DELETE /movie/delete/{id}`
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<MovieBody>>, ApiError> {
    let id = parse_id(&raw_id)?;

    let movie = state
        .movie_service()
        .delete(id)
        .await
        .map_err(ApiError::catalog(DELETE_FAILED))?;

    info!(id, "Movie deleted");
    Ok(Json(ApiResponse::success(MovieBody { movie })))
}

/// `GET /movies/list`
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<MoviesPage>>, ApiError> {
    let options = parse_options(query_pairs(query.as_deref()), NEXT_MOVIE_ID)?;

    let movies = state
        .movie_service()
        .list(options, Page::First)
        .await
        .map_err(ApiError::catalog(GET_FAILED))?;

    movies_page(movies)
}

/// `GET /movies/list/next?next_movie_id=N`
pub async fn next_movies(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<MoviesPage>>, ApiError> {
    let options = parse_options(query_pairs(query.as_deref()), NEXT_MOVIE_ID)?;

    let movies = state
        .movie_service()
        .list(options, Page::Next)
        .await
        .map_err(ApiError::catalog(GET_FAILED))?;

    movies_page(movies)
}
