use crate::db::{StoreError, StoreResult};
use crate::entities::{actors, actors_movies, movies, prelude::*};
use crate::models::actor::{ActorMovie, MoviesOfActor};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect,
    RelationTrait, Set,
};
use tracing::info;

#[derive(Debug, FromQueryResult)]
struct ActorMovieRow {
    actor_id: i32,
    actor_name: String,
    actor_surname: String,
    title: String,
}

pub struct ActorMovieRepository {
    conn: DatabaseConnection,
}

impl ActorMovieRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Links an actor to a movie in one statement. The pair's primary key
    /// rejects duplicates and the foreign keys reject unknown ids.
    pub async fn link(&self, link: ActorMovie) -> StoreResult<ActorMovie> {
        let active_model = actors_movies::ActiveModel {
            actor_id: Set(link.actor_id),
            movie_id: Set(link.movie_id),
        };

        let inserted = ActorsMovies::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    actors_movies::Column::ActorId,
                    actors_movies::Column::MovieId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        if inserted == 0 {
            return Err(StoreError::AlreadyExists);
        }

        info!(
            "Linked actor {} to movie {}",
            link.actor_id, link.movie_id
        );
        Ok(link)
    }

    pub async fn list(&self) -> StoreResult<Vec<MoviesOfActor>> {
        let rows = ActorsMovies::find()
            .select_only()
            .column_as(actors::Column::Id, "actor_id")
            .column_as(actors::Column::Name, "actor_name")
            .column_as(actors::Column::Surname, "actor_surname")
            .column_as(movies::Column::Title, "title")
            .join(JoinType::InnerJoin, actors_movies::Relation::Actor.def())
            .join(JoinType::InnerJoin, actors_movies::Relation::Movie.def())
            .order_by_asc(actors::Column::Id)
            .order_by_asc(movies::Column::Title)
            .into_model::<ActorMovieRow>()
            .all(&self.conn)
            .await?;

        Ok(group_by_actor(rows))
    }
}

fn group_by_actor(rows: Vec<ActorMovieRow>) -> Vec<MoviesOfActor> {
    let mut grouped: Vec<MoviesOfActor> = Vec::new();

    for row in rows {
        match grouped.last_mut() {
            Some(current) if current.actor_id == row.actor_id => current.movies.push(row.title),
            _ => grouped.push(MoviesOfActor {
                actor_id: row.actor_id,
                actor_name: row.actor_name,
                actor_surname: row.actor_surname,
                movies: vec![row.title],
            }),
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(actor_id: i32, title: &str) -> ActorMovieRow {
        ActorMovieRow {
            actor_id,
            actor_name: format!("name{actor_id}"),
            actor_surname: format!("surname{actor_id}"),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_group_by_actor_collects_titles() {
        let grouped = group_by_actor(vec![
            row(1, "Alien"),
            row(1, "Heat"),
            row(2, "Ronin"),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].movies, vec!["Alien", "Heat"]);
        assert_eq!(grouped[1].actor_name, "name2");
        assert_eq!(grouped[1].movies, vec!["Ronin"]);
    }
}
