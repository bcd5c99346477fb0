use super::{delete_by_id, find_by_id, page, returning_one, update_by_id};
use crate::db::query::Page;
use crate::db::{StoreError, StoreResult};
use crate::entities::{actors, prelude::*};
use crate::models::actor::{Actor, ActorUpdate, NewActor};
use crate::models::options::QueryOptions;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryTrait, Set, Value};
use tracing::info;

pub struct ActorRepository {
    conn: DatabaseConnection,
}

impl ActorRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn changes(update: &ActorUpdate) -> Vec<(actors::Column, Value)> {
        let mut changes = Vec::new();

        if let Some(name) = &update.name {
            changes.push((actors::Column::Name, Value::from(name.clone())));
        }
        if let Some(surname) = &update.surname {
            changes.push((actors::Column::Surname, Value::from(surname.clone())));
        }
        if let Some(patronymic) = &update.patronymic {
            changes.push((actors::Column::Patronymic, Value::from(patronymic.clone())));
        }
        if let Some(gender) = &update.gender {
            changes.push((actors::Column::Gender, Value::from(gender.clone())));
        }
        if let Some(date_of_birth) = update.date_of_birth {
            changes.push((actors::Column::DateOfBirth, Value::from(date_of_birth)));
        }

        changes
    }

    pub async fn find(&self, id: i32) -> StoreResult<Actor> {
        Ok(find_by_id::<Actors>(&self.conn, id).await?.into())
    }

    /// Inserts unless an actor with the same name and surname exists.
    pub async fn save(&self, actor: &NewActor) -> StoreResult<Actor> {
        let active_model = actors::ActiveModel {
            name: Set(actor.name.clone()),
            surname: Set(actor.surname.clone()),
            patronymic: Set(actor.patronymic.clone()),
            gender: Set(actor.gender.clone()),
            date_of_birth: Set(actor.date_of_birth),
            ..Default::default()
        };

        let mut insert = Actors::insert(active_model)
            .on_conflict(
                OnConflict::columns([actors::Column::Name, actors::Column::Surname])
                    .do_nothing()
                    .to_owned(),
            )
            .into_query();
        insert.returning_all();

        let model = returning_one::<Actors, _>(&self.conn, &insert)
            .await?
            .ok_or(StoreError::AlreadyExists)?;

        info!("Saved actor {} {} with id {}", model.name, model.surname, model.id);
        Ok(model.into())
    }

    pub async fn update(&self, update: &ActorUpdate) -> StoreResult<Actor> {
        let model = update_by_id::<Actors>(&self.conn, update.id, Self::changes(update)).await?;
        Ok(model.into())
    }

    pub async fn delete(&self, id: i32) -> StoreResult<Actor> {
        Ok(delete_by_id::<Actors>(&self.conn, id).await?.into())
    }

    pub async fn page(&self, options: &QueryOptions, page_kind: Page) -> StoreResult<Vec<Actor>> {
        let rows = page::<Actors>(&self.conn, options, page_kind).await?;
        Ok(rows.into_iter().map(Actor::from).collect())
    }
}
