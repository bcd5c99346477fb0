use super::{CatalogError, MovieService};
use crate::db::{Page, Store};
use crate::models::movie::{Movie, MovieSearch, MovieUpdate, NewMovie};
use crate::models::options::QueryOptions;
use async_trait::async_trait;

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn find(&self, id: i32) -> Result<Movie, CatalogError> {
        self.store
            .find_movie(id)
            .await
            .map_err(CatalogError::at("movie.find"))
    }

    async fn search(&self, search: MovieSearch) -> Result<Vec<Movie>, CatalogError> {
        self.store
            .search_movies(&search)
            .await
            .map_err(CatalogError::at("movie.search"))
    }

    async fn save(&self, movie: NewMovie) -> Result<Movie, CatalogError> {
        self.store
            .save_movie(&movie)
            .await
            .map_err(CatalogError::at("movie.save"))
    }

    async fn update(&self, changes: MovieUpdate) -> Result<Movie, CatalogError> {
        if changes.is_empty() {
            return Err(CatalogError::NothingToUpdate);
        }

        self.store
            .update_movie(&changes)
            .await
            .map_err(CatalogError::at("movie.update"))
    }

    async fn delete(&self, id: i32) -> Result<Movie, CatalogError> {
        self.store
            .delete_movie(id)
            .await
            .map_err(CatalogError::at("movie.delete"))
    }

    async fn list(&self, options: QueryOptions, page: Page) -> Result<Vec<Movie>, CatalogError> {
        self.store
            .list_movies(&options, page)
            .await
            .map_err(CatalogError::at("movies.list"))
    }
}
