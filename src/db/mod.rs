use crate::models::actor::{Actor, ActorMovie, ActorUpdate, MoviesOfActor, NewActor};
use crate::models::movie::{Movie, MovieSearch, MovieUpdate, NewMovie};
use crate::models::options::{Filter, QueryOptions};
use crate::models::person::{Enrichment, NewPerson, Person, PersonUpdate};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod query;
pub mod repositories;

pub use query::{Page, QueryError};

/// Failure of a single repository statement.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no rows in result set")]
    NoRows,

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("record already exists")]
    AlreadyExists,

    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                tracing::debug!(error = %msg, "Unique constraint violated");
                Self::AlreadyExists
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::Constraint(msg),
            _ => match err {
                DbErr::RecordNotFound(_) => Self::NoRows,
                other => Self::Database(other),
            },
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, PoolOptions::default()).await
    }

    pub async fn with_pool_options(db_url: &str, pool: PoolOptions) -> Result<Self> {
        ensure_sqlite_file(db_url).await?;

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(pool.max_connections)
            .min_connections(pool.min_connections)
            .connect_timeout(pool.connect_timeout)
            .acquire_timeout(pool.connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        let store = Self { conn };
        store.migrate().await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            pool.min_connections, pool.max_connections
        );

        Ok(store)
    }

    pub async fn migrate(&self) -> Result<()> {
        use sea_orm_migration::MigratorTrait;

        migrator::Migrator::up(&self.conn, None).await?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn person_repo(&self) -> repositories::person::PersonRepository {
        repositories::person::PersonRepository::new(self.conn.clone())
    }

    fn actor_repo(&self) -> repositories::actor::ActorRepository {
        repositories::actor::ActorRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn actor_movie_repo(&self) -> repositories::actor_movie::ActorMovieRepository {
        repositories::actor_movie::ActorMovieRepository::new(self.conn.clone())
    }

    pub async fn find_person(&self, id: i32) -> StoreResult<Person> {
        self.person_repo().find(id).await
    }

    pub async fn save_person(&self, person: &NewPerson, enrichment: Enrichment) -> StoreResult<Person> {
        self.person_repo().save(person, enrichment).await
    }

    pub async fn update_person(&self, changes: &PersonUpdate) -> StoreResult<Person> {
        self.person_repo().update(changes).await
    }

    pub async fn delete_person(&self, id: i32) -> StoreResult<Person> {
        self.person_repo().delete(id).await
    }

    pub async fn delete_people_matching(&self, filter: &Filter) -> StoreResult<Vec<Person>> {
        self.person_repo().delete_matching(filter).await
    }

    pub async fn list_people(&self, options: &QueryOptions, page: Page) -> StoreResult<Vec<Person>> {
        self.person_repo().page(options, page).await
    }

    pub async fn find_actor(&self, id: i32) -> StoreResult<Actor> {
        self.actor_repo().find(id).await
    }

    pub async fn save_actor(&self, actor: &NewActor) -> StoreResult<Actor> {
        self.actor_repo().save(actor).await
    }

    pub async fn update_actor(&self, changes: &ActorUpdate) -> StoreResult<Actor> {
        self.actor_repo().update(changes).await
    }

    pub async fn delete_actor(&self, id: i32) -> StoreResult<Actor> {
        self.actor_repo().delete(id).await
    }

    pub async fn list_actors(&self, options: &QueryOptions, page: Page) -> StoreResult<Vec<Actor>> {
        self.actor_repo().page(options, page).await
    }

    pub async fn find_movie(&self, id: i32) -> StoreResult<Movie> {
        self.movie_repo().find(id).await
    }

    pub async fn search_movies(&self, search: &MovieSearch) -> StoreResult<Vec<Movie>> {
        self.movie_repo().search(search).await
    }

    pub async fn save_movie(&self, movie: &NewMovie) -> StoreResult<Movie> {
        self.movie_repo().save(movie).await
    }

    pub async fn update_movie(&self, changes: &MovieUpdate) -> StoreResult<Movie> {
        self.movie_repo().update(changes).await
    }

    pub async fn delete_movie(&self, id: i32) -> StoreResult<Movie> {
        self.movie_repo().delete(id).await
    }

    pub async fn list_movies(&self, options: &QueryOptions, page: Page) -> StoreResult<Vec<Movie>> {
        self.movie_repo().page(options, page).await
    }

    pub async fn link_actor_movie(&self, link: ActorMovie) -> StoreResult<ActorMovie> {
        self.actor_movie_repo().link(link).await
    }

    pub async fn list_movies_of_actors(&self) -> StoreResult<Vec<MoviesOfActor>> {
        self.actor_movie_repo().list().await
    }
}

/// Creates the parent directory and file for on-disk SQLite URLs.
async fn ensure_sqlite_file(db_url: &str) -> Result<()> {
    let Some(rest) = db_url.strip_prefix("sqlite:") else {
        return Ok(());
    };

    let path_str = rest.trim_start_matches("//");
    let path_str = path_str.split('?').next().unwrap_or(path_str);
    if path_str.is_empty() || path_str.contains(":memory:") {
        return Ok(());
    }

    let path = Path::new(path_str);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }
    if !path.exists() {
        std::fs::File::create(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_migrates_and_pings() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        store.ping().await.unwrap();

        let people = store
            .list_people(&QueryOptions::default(), Page::First)
            .await
            .unwrap();
        assert!(people.is_empty());
    }

    #[test]
    fn test_record_not_found_maps_to_no_rows() {
        let err = StoreError::from(DbErr::RecordNotFound("people".to_string()));
        assert!(matches!(err, StoreError::NoRows));
    }
}
