//! Use cases for the people-finder service.

use super::CatalogError;
use crate::db::Page;
use crate::models::options::{Filter, QueryOptions};
use crate::models::person::{NewPerson, Person, PersonUpdate};

#[async_trait::async_trait]
pub trait PersonService: Send + Sync {
    async fn find(&self, id: i32) -> Result<Person, CatalogError>;

    /// Enriches the new person with age, gender and nationality, then stores it.
    async fn save(&self, person: NewPerson) -> Result<Person, CatalogError>;

    /// Writes only the fields present in `changes`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NothingToUpdate`] before touching storage when
    /// no field is set.
    async fn update(&self, changes: PersonUpdate) -> Result<Person, CatalogError>;

    async fn delete(&self, id: i32) -> Result<Person, CatalogError>;

    /// Deletes every person matching `filter`. An empty filter is rejected.
    async fn delete_matching(&self, filter: Filter) -> Result<Vec<Person>, CatalogError>;

    async fn list(&self, options: QueryOptions, page: Page) -> Result<Vec<Person>, CatalogError>;
}
