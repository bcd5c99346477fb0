use axum::{
    Router,
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod actor_movies;
mod actors;
pub mod auth;
mod error;
mod movies;
mod observability;
pub mod options;
mod people;
mod types;
pub mod validation;

pub use error::{ApiError, EnvelopeError};
pub use types::*;

use crate::services::{ActorMovieService, ActorService, MovieService, PersonService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn person_service(&self) -> &Arc<dyn PersonService> {
        &self.shared.person_service
    }

    #[must_use]
    pub fn actor_service(&self) -> &Arc<dyn ActorService> {
        &self.shared.actor_service
    }

    #[must_use]
    pub fn movie_service(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }

    #[must_use]
    pub fn actor_movie_service(&self) -> &Arc<dyn ActorMovieService> {
        &self.shared.actor_movie_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let config = state.config();
    let cors_origins = config.server.cors_allowed_origins.clone();
    let request_timeout = Duration::from_secs(config.server.request_timeout_seconds);
    let uniform_status = config.server.uniform_status;

    let mut app = Router::new()
        .route("/health", get(observability::health))
        .route("/metrics", get(observability::get_metrics));

    if config.services.people {
        app = app.merge(people_router());
    }

    if config.services.filmoteka {
        app = app
            .merge(catalog_router())
            .merge(catalog_write_router(state.clone()));
    }

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let mut app = app
        .fallback(error::fallback)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(error::timeout_envelope_middleware));

    if uniform_status {
        app = app.layer(middleware::from_fn(error::uniform_status_middleware));
    }

    app.layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn people_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/person/find/{id}", get(people::find_person))
        .route("/person/save", post(people::save_person))
        .route("/person/update", put(people::update_person))
        .route("/person/delete/{id}", delete(people::delete_person))
        .route("/people/delete", delete(people::delete_people))
        .route("/people/list", get(people::list_people))
        .route("/people/list/", get(people::list_people))
        .route("/people/list/next", get(people::next_people))
}

fn catalog_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/actor/find/{id}", get(actors::find_actor))
        .route("/actors/list", get(actors::list_actors))
        .route("/actors/list/", get(actors::list_actors))
        .route("/actors/list/next", get(actors::next_actors))
        .route("/movie/find/{id}", get(movies::find_movie))
        .route("/movie/find_by_id/{id}", get(movies::find_movie))
        .route("/movie/find", get(movies::search_movies))
        .route("/movie/find/", get(movies::search_movies))
        .route("/movies/list", get(movies::list_movies))
        .route("/movies/list/", get(movies::list_movies))
        .route("/movies/list/next", get(movies::next_movies))
        .route("/actor_movie/list", get(actor_movies::list_actor_movies))
}

fn catalog_write_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/actor/save", post(actors::save_actor))
        .route("/actor/update", put(actors::update_actor))
        .route("/actor/delete/{id}", delete(actors::delete_actor))
        .route("/movie/save", post(movies::save_movie))
        .route("/movie/update", put(movies::update_movie))
        .route("/movie/delete/{id}", delete(movies::delete_movie))
        .route("/actor_movie/save", post(actor_movies::save_actor_movie))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::basic_auth_middleware,
        ))
}
