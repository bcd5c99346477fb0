use axum::{
    Json,
    extract::{Path, RawQuery, State, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::{debug, info};

use super::options::{NEXT_ACTOR_ID, parse_options, query_pairs};
use super::people::decoded;
use super::validation::{parse_id, validate_id};
use crate::api::{ActorBody, ActorsPage, ApiError, ApiResponse, AppState, next_cursor};
use crate::db::Page;
use crate::models::actor::{Actor, ActorUpdate, NewActor};
use crate::services::CatalogError;

const GET_FAILED: &str = "Unable to get data from DB";
const SAVE_FAILED: &str = "Unable to save actor data in DB";
const UPDATE_FAILED: &str = "Unable to update actor data in DB";
const DELETE_FAILED: &str = "Unable to delete data from DB";

pub const ACTOR_EXISTS: &str = "actor already exists";
pub const INVALID_DATA: &str = "provided data is invalid";

fn save_error(err: CatalogError) -> ApiError {
    match err {
        CatalogError::AlreadyExists { .. } => {
            debug!(error = %err, "Failed to save data in DB");
            ApiError::Conflict(ACTOR_EXISTS.to_string())
        }
        CatalogError::InvalidData { .. } => {
            debug!(error = %err, "Failed to save data in DB");
            ApiError::BadRequest(INVALID_DATA.to_string())
        }
        other => ApiError::catalog(SAVE_FAILED)(other),
    }
}

fn actors_page(actors: Vec<Actor>) -> Result<Json<ApiResponse<ActorsPage>>, ApiError> {
    let Some(next_actor_id) = next_cursor(&actors, |a| a.id) else {
        info!("No data");
        return Err(ApiError::NoData);
    };

    Ok(Json(ApiResponse::success(ActorsPage {
        actors,
        next_actor_id,
    })))
}

/// `GET /actor/find/{id}`
pub async fn find_actor(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<ActorBody>>, ApiError> {
    let id = parse_id(&raw_id)?;

    let actor = state
        .actor_service()
        .find(id)
        .await
        .map_err(ApiError::catalog(format!("Database has NO actor with id = {id}")))?;

    Ok(Json(ApiResponse::success(ActorBody { actor })))
}

/// `POST /actor/save`
///
/// Actors are unique by name and surname; a second save of the same pair is
/// reported as a conflict.
pub async fn save_actor(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewActor>, JsonRejection>,
) -> Result<Json<ApiResponse<ActorBody>>, ApiError> {
    let new_actor = decoded(payload)?;
    info!(name = %new_actor.name, surname = %new_actor.surname, "Request body decoded");

    let actor = state
        .actor_service()
        .save(new_actor)
        .await
        .map_err(save_error)?;

    info!(id = actor.id, "Actor saved");
    Ok(Json(ApiResponse::success(ActorBody { actor })))
}

/// `PUT /actor/update`
pub async fn update_actor(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ActorUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<ActorBody>>, ApiError> {
    let changes = decoded(payload)?;
    info!(id = changes.id, "Request body decoded");
    validate_id(changes.id)?;

    let actor = state
        .actor_service()
        .update(changes)
        .await
        .map_err(ApiError::catalog(UPDATE_FAILED))?;

    Ok(Json(ApiResponse::success(ActorBody { actor })))
}

/// `DELETE /actor/delete/{id}`
pub async fn delete_actor(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<ActorBody>>, ApiError> {
    let id = parse_id(&raw_id)?;

    let actor = state
        .actor_service()
        .delete(id)
        .await
        .map_err(ApiError::catalog(DELETE_FAILED))?;

    info!(id, "Actor deleted");
    Ok(Json(ApiResponse::success(ActorBody { actor })))
}

/// `GET /actors/list`
pub async fn list_actors(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<ActorsPage>>, ApiError> {
    let options = parse_options(query_pairs(query.as_deref()), NEXT_ACTOR_ID)?;

    let actors = state
        .actor_service()
        .list(options, Page::First)
        .await
        .map_err(ApiError::catalog(GET_FAILED))?;

    actors_page(actors)
}

/// `GET /actors/list/next?next_actor_id=N`
pub async fn next_actors(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<ActorsPage>>, ApiError> {
    let options = parse_options(query_pairs(query.as_deref()), NEXT_ACTOR_ID)?;

    let actors = state
        .actor_service()
        .list(options, Page::Next)
        .await
        .map_err(ApiError::catalog(GET_FAILED))?;

    actors_page(actors)
}
