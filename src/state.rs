use std::sync::Arc;
use std::time::Duration;

use crate::clients::EnrichClient;
use crate::config::Config;
use crate::db::{PoolOptions, Store};
use crate::services::{
    ActorMovieService, ActorService, Enricher, FanOut, MovieService, PersonService,
    SeaOrmActorMovieService, SeaOrmActorService, SeaOrmMovieService, SeaOrmPersonService,
};

/// Build the HTTP client shared by the enrichment lookups.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(concat!("filmoteka/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub person_service: Arc<dyn PersonService>,

    pub actor_service: Arc<dyn ActorService>,

    pub movie_service: Arc<dyn MovieService>,

    pub actor_movie_service: Arc<dyn ActorMovieService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let enricher: Option<Arc<dyn Enricher>> = if config.enrichment.enabled {
            let http_client =
                build_shared_http_client(config.enrichment.request_timeout_seconds)?;
            Some(Arc::new(EnrichClient::new(&http_client, &config.enrichment)))
        } else {
            None
        };

        Self::with_enricher(config, enricher).await
    }

    /// Same as [`SharedState::new`] with an explicit enrichment source.
    pub async fn with_enricher(
        config: Config,
        enricher: Option<Arc<dyn Enricher>>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.database.url,
            PoolOptions {
                max_connections: config.database.max_connections,
                min_connections: config.database.min_connections,
                connect_timeout: Duration::from_secs(config.database.connect_timeout_seconds),
            },
        )
        .await?;

        let fan_out = FanOut::from_flag(config.enrichment.concurrent);

        let person_service = Arc::new(SeaOrmPersonService::new(store.clone(), enricher, fan_out))
            as Arc<dyn PersonService>;
        let actor_service = Arc::new(SeaOrmActorService::new(store.clone())) as Arc<dyn ActorService>;
        let movie_service = Arc::new(SeaOrmMovieService::new(store.clone())) as Arc<dyn MovieService>;
        let actor_movie_service =
            Arc::new(SeaOrmActorMovieService::new(store.clone())) as Arc<dyn ActorMovieService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            person_service,
            actor_service,
            movie_service,
            actor_movie_service,
        })
    }
}
