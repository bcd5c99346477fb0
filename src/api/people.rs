use axum::{
    Json,
    extract::{Path, RawQuery, State, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::{debug, info};

use super::error::DECODE_FAILED;
use super::options::{NEXT_PERSON_ID, parse_options, query_pairs};
use super::validation::{parse_id, validate_id};
use crate::api::{
    ApiError, ApiResponse, AppState, PeopleBody, PeoplePage, PersonBody, next_cursor,
};
use crate::db::Page;
use crate::models::person::{NewPerson, Person, PersonUpdate};

const GET_FAILED: &str = "Unable to get data from DB";
const SAVE_FAILED: &str = "Unable to save person data in DB";
const UPDATE_FAILED: &str = "Unable to update person data in DB";
const DELETE_FAILED: &str = "Unable to delete data from DB";

pub(super) fn decoded<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        debug!(error = %rejection, "Failed to decode request body");
        ApiError::bad_request(DECODE_FAILED)
    })
}

fn people_page(people: Vec<Person>) -> Result<Json<ApiResponse<PeoplePage>>, ApiError> {
    let Some(next_person_id) = next_cursor(&people, |p| p.id) else {
        info!("No data");
        return Err(ApiError::NoData);
    };

    Ok(Json(ApiResponse::success(PeoplePage {
        people,
        next_person_id,
    })))
}

/// `GET /person/find/{id}`
pub async fn find_person(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<PersonBody>>, ApiError> {
    let id = parse_id(&raw_id)?;

    let person = state
        .person_service()
        .find(id)
        .await
        .map_err(ApiError::catalog(GET_FAILED))?;

    Ok(Json(ApiResponse::success(PersonBody { person })))
}

/// `POST /person/save`
///
/// Stores the person after filling age, gender and nationality from the
/// lookup services. Lookups that fail leave their field empty.
pub async fn save_person(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewPerson>, JsonRejection>,
) -> Result<Json<ApiResponse<PersonBody>>, ApiError> {
    let new_person = decoded(payload)?;
    info!(name = %new_person.name, surname = %new_person.surname, "Request body decoded");

    let person = state
        .person_service()
        .save(new_person)
        .await
        .map_err(ApiError::catalog(SAVE_FAILED))?;

    info!(id = person.id, "Person saved");
    Ok(Json(ApiResponse::success(PersonBody { person })))
}

/// `PUT /person/update`
pub async fn update_person(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PersonUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<PersonBody>>, ApiError> {
    let changes = decoded(payload)?;
    info!(id = changes.id, "Request body decoded");
    validate_id(changes.id)?;

    let person = state
        .person_service()
        .update(changes)
        .await
        .map_err(ApiError::catalog(UPDATE_FAILED))?;

    Ok(Json(ApiResponse::success(PersonBody { person })))
}

/// `DELETE /person/delete/{id}`
pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<PersonBody>>, ApiError> {
    let id = parse_id(&raw_id)?;

    let person = state
        .person_service()
        .delete(id)
        .await
        .map_err(ApiError::catalog(DELETE_FAILED))?;

    info!(id, "Person deleted");
    Ok(Json(ApiResponse::success(PersonBody { person })))
}

/// `DELETE /people/delete?field=value…`
pub async fn delete_people(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<PeopleBody>>, ApiError> {
    let options = parse_options(query_pairs(query.as_deref()), NEXT_PERSON_ID)?;

    let people = state
        .person_service()
        .delete_matching(options.filter)
        .await
        .map_err(ApiError::catalog(DELETE_FAILED))?;

    if people.is_empty() {
        return Err(ApiError::NoData);
    }

    info!(count = people.len(), "People deleted");
    Ok(Json(ApiResponse::success(PeopleBody { people })))
}

/// `GET /people/list`
pub async fn list_people(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<PeoplePage>>, ApiError> {
    let options = parse_options(query_pairs(query.as_deref()), NEXT_PERSON_ID)?;

    let people = state
        .person_service()
        .list(options, Page::First)
        .await
        .map_err(ApiError::catalog(GET_FAILED))?;

    people_page(people)
}

/// `GET /people/list/next?next_person_id=N`
pub async fn next_people(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<PeoplePage>>, ApiError> {
    let options = parse_options(query_pairs(query.as_deref()), NEXT_PERSON_ID)?;

    let people = state
        .person_service()
        .list(options, Page::Next)
        .await
        .map_err(ApiError::catalog(GET_FAILED))?;

    people_page(people)
}
