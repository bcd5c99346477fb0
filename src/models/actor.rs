use crate::entities::{actors, actors_movies};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i32,
    pub name: String,
    pub surname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(
        default,
        with = "crate::models::date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<NaiveDate>,
}

impl From<actors::Model> for Actor {
    fn from(m: actors::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            surname: m.surname,
            patronymic: m.patronymic,
            gender: m.gender,
            date_of_birth: m.date_of_birth,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewActor {
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub patronymic: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, with = "crate::models::date")]
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorUpdate {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub patronymic: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, with = "crate::models::date")]
    pub date_of_birth: Option<NaiveDate>,
}

impl ActorUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.surname.is_none()
            && self.patronymic.is_none()
            && self.gender.is_none()
            && self.date_of_birth.is_none()
    }
}

/// One actor-to-movie assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorMovie {
    pub actor_id: i32,
    pub movie_id: i32,
}

impl From<actors_movies::Model> for ActorMovie {
    fn from(m: actors_movies::Model) -> Self {
        Self {
            actor_id: m.actor_id,
            movie_id: m.movie_id,
        }
    }
}

/// An actor together with the titles they appear in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoviesOfActor {
    pub actor_id: i32,
    pub actor_name: String,
    pub actor_surname: String,
    pub movies: Vec<String>,
}
