pub mod error;
pub use error::CatalogError;

pub mod enrichment;
pub use enrichment::{Enricher, FanOut};

pub mod person_service;
pub use person_service::PersonService;

pub mod person_service_impl;
pub use person_service_impl::SeaOrmPersonService;

pub mod actor_service;
pub use actor_service::ActorService;

pub mod actor_service_impl;
pub use actor_service_impl::SeaOrmActorService;

pub mod movie_service;
pub use movie_service::MovieService;

pub mod movie_service_impl;
pub use movie_service_impl::SeaOrmMovieService;

pub mod actor_movie_service;
pub use actor_movie_service::{ActorMovieService, SeaOrmActorMovieService};
