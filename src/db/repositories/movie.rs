use super::{delete_by_id, find_by_id, page, update_by_id};
use crate::db::query::Page;
use crate::db::StoreResult;
use crate::entities::{actors, actors_movies, movies, prelude::*};
use crate::models::movie::{Movie, MovieSearch, MovieUpdate, NewMovie};
use crate::models::options::QueryOptions;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, Value,
};
use tracing::info;

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn changes(update: &MovieUpdate) -> Vec<(movies::Column, Value)> {
        let mut changes = Vec::new();

        if let Some(title) = &update.title {
            changes.push((movies::Column::Title, Value::from(title.clone())));
        }
        if let Some(description) = &update.description {
            changes.push((movies::Column::Description, Value::from(description.clone())));
        }
        if let Some(release_date) = update.release_date {
            changes.push((movies::Column::ReleaseDate, Value::from(release_date)));
        }
        if let Some(rating) = update.rating {
            changes.push((movies::Column::Rating, Value::from(rating)));
        }

        changes
    }

    pub async fn find(&self, id: i32) -> StoreResult<Movie> {
        Ok(find_by_id::<Movies>(&self.conn, id).await?.into())
    }

    /// Movies whose title and (any) actor name contain the given fragments,
    /// compared case-insensitively. Only movies with at least one actor match.
    pub async fn search(&self, search: &MovieSearch) -> StoreResult<Vec<Movie>> {
        let mut select = Movies::find()
            .distinct()
            .join(JoinType::InnerJoin, movies::Relation::ActorsMovies.def())
            .join(JoinType::InnerJoin, actors_movies::Relation::Actor.def());

        if let Some(title) = search.title_fragment() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col((Movies, movies::Column::Title))))
                    .like(format!("%{}%", title.to_lowercase())),
            );
        }

        if let Some(actor_name) = search.actor_fragment() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col((Actors, actors::Column::Name))))
                    .like(format!("%{}%", actor_name.to_lowercase())),
            );
        }

        let rows = select
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn save(&self, movie: &NewMovie) -> StoreResult<Movie> {
        let active_model = movies::ActiveModel {
            title: Set(movie.title.clone()),
            description: Set(movie.description.clone()),
            release_date: Set(movie.release_date),
            rating: Set(movie.rating),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        info!("Saved movie '{}' with id {}", model.title, model.id);
        Ok(model.into())
    }

    pub async fn update(&self, update: &MovieUpdate) -> StoreResult<Movie> {
        let model = update_by_id::<Movies>(&self.conn, update.id, Self::changes(update)).await?;
        Ok(model.into())
    }

    pub async fn delete(&self, id: i32) -> StoreResult<Movie> {
        Ok(delete_by_id::<Movies>(&self.conn, id).await?.into())
    }

    pub async fn page(&self, options: &QueryOptions, page_kind: Page) -> StoreResult<Vec<Movie>> {
        let rows = page::<Movies>(&self.conn, options, page_kind).await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }
}
