use super::CatalogError;
use crate::db::Page;
use crate::models::actor::{Actor, ActorUpdate, NewActor};
use crate::models::options::QueryOptions;

#[async_trait::async_trait]
pub trait ActorService: Send + Sync {
    async fn find(&self, id: i32) -> Result<Actor, CatalogError>;

    /// # Errors
    ///
    /// [`CatalogError::AlreadyExists`] when an actor with the same name and
    /// surname is stored, [`CatalogError::InvalidData`] on other constraint
    /// violations.
    async fn save(&self, actor: NewActor) -> Result<Actor, CatalogError>;

    async fn update(&self, changes: ActorUpdate) -> Result<Actor, CatalogError>;

    async fn delete(&self, id: i32) -> Result<Actor, CatalogError>;

    async fn list(&self, options: QueryOptions, page: Page) -> Result<Vec<Actor>, CatalogError>;
}
