//! Actor to movie assignments.

use super::CatalogError;
use crate::db::Store;
use crate::models::actor::{ActorMovie, MoviesOfActor};
use async_trait::async_trait;

#[async_trait]
pub trait ActorMovieService: Send + Sync {
    /// # Errors
    ///
    /// [`CatalogError::AlreadyExists`] for a pair that is already linked,
    /// [`CatalogError::InvalidData`] when either id does not exist.
    async fn link(&self, link: ActorMovie) -> Result<ActorMovie, CatalogError>;

    async fn list(&self) -> Result<Vec<MoviesOfActor>, CatalogError>;
}

pub struct SeaOrmActorMovieService {
    store: Store,
}

impl SeaOrmActorMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActorMovieService for SeaOrmActorMovieService {
    async fn link(&self, link: ActorMovie) -> Result<ActorMovie, CatalogError> {
        self.store
            .link_actor_movie(link)
            .await
            .map_err(CatalogError::at("actor_movie.save"))
    }

    async fn list(&self) -> Result<Vec<MoviesOfActor>, CatalogError> {
        self.store
            .list_movies_of_actors()
            .await
            .map_err(CatalogError::at("actor_movie.list"))
    }
}
