pub mod prelude;

pub mod actors;
pub mod actors_movies;
pub mod movies;
pub mod people;
