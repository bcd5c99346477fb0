use super::{ActorService, CatalogError};
use crate::db::{Page, Store};
use crate::models::actor::{Actor, ActorUpdate, NewActor};
use crate::models::options::QueryOptions;
use async_trait::async_trait;

pub struct SeaOrmActorService {
    store: Store,
}

impl SeaOrmActorService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActorService for SeaOrmActorService {
    async fn find(&self, id: i32) -> Result<Actor, CatalogError> {
        self.store
            .find_actor(id)
            .await
            .map_err(CatalogError::at("actor.find"))
    }

    async fn save(&self, actor: NewActor) -> Result<Actor, CatalogError> {
        self.store
            .save_actor(&actor)
            .await
            .map_err(CatalogError::at("actor.save"))
    }

    async fn update(&self, changes: ActorUpdate) -> Result<Actor, CatalogError> {
        if changes.is_empty() {
            return Err(CatalogError::NothingToUpdate);
        }

        self.store
            .update_actor(&changes)
            .await
            .map_err(CatalogError::at("actor.update"))
    }

    async fn delete(&self, id: i32) -> Result<Actor, CatalogError> {
        self.store
            .delete_actor(id)
            .await
            .map_err(CatalogError::at("actor.delete"))
    }

    async fn list(&self, options: QueryOptions, page: Page) -> Result<Vec<Actor>, CatalogError> {
        self.store
            .list_actors(&options, page)
            .await
            .map_err(CatalogError::at("actors.list"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depp() -> NewActor {
        NewActor {
            name: "Johnny".to_string(),
            surname: "Depp".to_string(),
            ..NewActor::default()
        }
    }

    #[tokio::test]
    async fn test_duplicate_actor_is_reported() {
        let service = SeaOrmActorService::new(Store::new("sqlite::memory:").await.unwrap());

        let first = service.save(depp()).await.unwrap();
        assert_eq!(first.id, 1);

        assert!(matches!(
            service.save(depp()).await,
            Err(CatalogError::AlreadyExists { op: "actor.save" })
        ));
    }
}
