use super::{delete_by_id, find_by_id, page, returning_all, update_by_id};
use crate::db::query::{self, Page};
use crate::db::StoreResult;
use crate::entities::{people, prelude::*};
use crate::models::options::{Filter, QueryOptions};
use crate::models::person::{Enrichment, NewPerson, Person, PersonUpdate};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, Value};
use tracing::info;

pub struct PersonRepository {
    conn: DatabaseConnection,
}

impl PersonRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn changes(update: &PersonUpdate) -> Vec<(people::Column, Value)> {
        let mut changes = Vec::new();

        if let Some(name) = &update.name {
            changes.push((people::Column::Name, Value::from(name.clone())));
        }
        if let Some(surname) = &update.surname {
            changes.push((people::Column::Surname, Value::from(surname.clone())));
        }
        if let Some(patronymic) = &update.patronymic {
            changes.push((people::Column::Patronymic, Value::from(patronymic.clone())));
        }
        if let Some(age) = update.age {
            changes.push((people::Column::Age, Value::from(age)));
        }
        if let Some(gender) = &update.gender {
            changes.push((people::Column::Gender, Value::from(gender.clone())));
        }
        if let Some(nationality) = &update.nationality {
            changes.push((people::Column::Nationality, Value::from(nationality.clone())));
        }

        changes
    }

    pub async fn find(&self, id: i32) -> StoreResult<Person> {
        Ok(find_by_id::<People>(&self.conn, id).await?.into())
    }

    pub async fn save(&self, person: &NewPerson, enrichment: Enrichment) -> StoreResult<Person> {
        let active_model = people::ActiveModel {
            name: Set(person.name.clone()),
            surname: Set(person.surname.clone()),
            patronymic: Set(person.patronymic.clone()),
            age: Set(enrichment.age),
            gender: Set(enrichment.gender),
            nationality: Set(enrichment.nationality),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        info!("Saved person {} {} with id {}", model.name, model.surname, model.id);
        Ok(model.into())
    }

    pub async fn update(&self, update: &PersonUpdate) -> StoreResult<Person> {
        let model = update_by_id::<People>(&self.conn, update.id, Self::changes(update)).await?;
        Ok(model.into())
    }

    pub async fn delete(&self, id: i32) -> StoreResult<Person> {
        Ok(delete_by_id::<People>(&self.conn, id).await?.into())
    }

    pub async fn delete_matching(&self, filter: &Filter) -> StoreResult<Vec<Person>> {
        let stmt = query::delete_matching::<People>(filter)?;
        let rows = returning_all::<People, _>(&self.conn, &stmt).await?;
        info!("Deleted {} people matching filter", rows.len());
        Ok(rows.into_iter().map(Person::from).collect())
    }

    pub async fn page(&self, options: &QueryOptions, page_kind: Page) -> StoreResult<Vec<Person>> {
        let rows = page::<People>(&self.conn, options, page_kind).await?;
        Ok(rows.into_iter().map(Person::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_contain_only_present_fields() {
        let update = PersonUpdate {
            id: 1,
            patronymic: Some("X".to_string()),
            ..PersonUpdate::default()
        };

        let changes = PersonRepository::changes(&update);
        assert_eq!(changes.len(), 1);
        assert!(matches!(changes[0].0, people::Column::Patronymic));
    }
}
