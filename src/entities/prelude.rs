pub use super::actors::Entity as Actors;
pub use super::actors_movies::Entity as ActorsMovies;
pub use super::movies::Entity as Movies;
pub use super::people::Entity as People;
