use super::CatalogError;
use crate::db::Page;
use crate::models::movie::{Movie, MovieSearch, MovieUpdate, NewMovie};
use crate::models::options::QueryOptions;

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    async fn find(&self, id: i32) -> Result<Movie, CatalogError>;

    /// Movies matching a title fragment and/or the name of one of their actors.
    async fn search(&self, search: MovieSearch) -> Result<Vec<Movie>, CatalogError>;

    async fn save(&self, movie: NewMovie) -> Result<Movie, CatalogError>;

    async fn update(&self, changes: MovieUpdate) -> Result<Movie, CatalogError>;

    async fn delete(&self, id: i32) -> Result<Movie, CatalogError>;

    async fn list(&self, options: QueryOptions, page: Page) -> Result<Vec<Movie>, CatalogError>;
}
