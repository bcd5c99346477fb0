//! `SeaORM` implementation of the `PersonService` trait.

use super::enrichment::{self, Enricher, FanOut};
use super::{CatalogError, PersonService};
use crate::db::{Page, Store};
use crate::models::options::{Filter, QueryOptions};
use crate::models::person::{Enrichment, NewPerson, Person, PersonUpdate};
use async_trait::async_trait;
use std::sync::Arc;

pub struct SeaOrmPersonService {
    store: Store,
    enricher: Option<Arc<dyn Enricher>>,
    fan_out: FanOut,
}

impl SeaOrmPersonService {
    /// `enricher: None` stores people without derived fields.
    #[must_use]
    pub fn new(store: Store, enricher: Option<Arc<dyn Enricher>>, fan_out: FanOut) -> Self {
        Self {
            store,
            enricher,
            fan_out,
        }
    }
}

#[async_trait]
impl PersonService for SeaOrmPersonService {
    async fn find(&self, id: i32) -> Result<Person, CatalogError> {
        self.store
            .find_person(id)
            .await
            .map_err(CatalogError::at("person.find"))
    }

    async fn save(&self, person: NewPerson) -> Result<Person, CatalogError> {
        let enrichment = match &self.enricher {
            Some(enricher) => enrichment::enrich(enricher.as_ref(), &person.name, self.fan_out).await,
            None => Enrichment::default(),
        };

        self.store
            .save_person(&person, enrichment)
            .await
            .map_err(CatalogError::at("person.save"))
    }

    async fn update(&self, changes: PersonUpdate) -> Result<Person, CatalogError> {
        if changes.is_empty() {
            return Err(CatalogError::NothingToUpdate);
        }

        self.store
            .update_person(&changes)
            .await
            .map_err(CatalogError::at("person.update"))
    }

    async fn delete(&self, id: i32) -> Result<Person, CatalogError> {
        self.store
            .delete_person(id)
            .await
            .map_err(CatalogError::at("person.delete"))
    }

    async fn delete_matching(&self, filter: Filter) -> Result<Vec<Person>, CatalogError> {
        self.store
            .delete_people_matching(&filter)
            .await
            .map_err(CatalogError::at("people.delete"))
    }

    async fn list(&self, options: QueryOptions, page: Page) -> Result<Vec<Person>, CatalogError> {
        self.store
            .list_people(&options, page)
            .await
            .map_err(CatalogError::at("people.list"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::enrichment::tests::FakeEnricher;

    async fn service(enricher: FakeEnricher) -> SeaOrmPersonService {
        let store = Store::new("sqlite::memory:").await.unwrap();
        SeaOrmPersonService::new(store, Some(Arc::new(enricher)), FanOut::Concurrent)
    }

    fn leo() -> NewPerson {
        NewPerson {
            name: "Leo".to_string(),
            surname: "Kim".to_string(),
            patronymic: None,
        }
    }

    #[tokio::test]
    async fn test_save_stores_enriched_person() {
        let service = service(FakeEnricher::new(Some(1), Some(""), Some(""))).await;

        let person = service.save(leo()).await.unwrap();

        assert_eq!(person.id, 1);
        assert_eq!(person.age, Some(1));
        assert_eq!(person.gender.as_deref(), Some(""));
        assert_eq!(service.find(1).await.unwrap(), person);
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let service = service(FakeEnricher::new(None, None, None)).await;
        service.save(leo()).await.unwrap();

        let err = service
            .update(PersonUpdate {
                id: 1,
                ..PersonUpdate::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NothingToUpdate));
    }

    #[tokio::test]
    async fn test_missing_person_is_not_found() {
        let service = service(FakeEnricher::new(None, None, None)).await;

        assert!(matches!(
            service.delete(42).await,
            Err(CatalogError::NotFound { op: "person.delete" })
        ));
    }
}
