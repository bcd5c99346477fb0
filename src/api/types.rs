use crate::models::actor::{Actor, ActorMovie, MoviesOfActor};
use crate::models::movie::Movie;
use crate::models::person::Person;
use serde::Serialize;

pub const STATUS_OK: &str = "OK";
pub const STATUS_ERROR: &str = "Error";

/// Response envelope: `{"status": "OK", <payload fields>}` or
/// `{"status": "Error", "error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    #[serde(flatten)]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            status: STATUS_OK,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Cursor for the page after `rows`: one past the highest returned id.
///
/// Next pages select `id >= cursor`, so taking the maximum keeps them
/// disjoint from a page sorted by anything other than id.
pub fn next_cursor<T>(rows: &[T], id: impl Fn(&T) -> i32) -> Option<i32> {
    rows.iter().map(id).max().map(|max| max + 1)
}

#[derive(Debug, Serialize)]
pub struct PersonBody {
    pub person: Person,
}

#[derive(Debug, Serialize)]
pub struct PeoplePage {
    pub people: Vec<Person>,
    pub next_person_id: i32,
}

#[derive(Debug, Serialize)]
pub struct PeopleBody {
    pub people: Vec<Person>,
}

#[derive(Debug, Serialize)]
pub struct ActorBody {
    pub actor: Actor,
}

#[derive(Debug, Serialize)]
pub struct ActorsPage {
    pub actors: Vec<Actor>,
    pub next_actor_id: i32,
}

#[derive(Debug, Serialize)]
pub struct MovieBody {
    pub movie: Movie,
}

#[derive(Debug, Serialize)]
pub struct MoviesPage {
    pub movies: Vec<Movie>,
    pub next_movie_id: i32,
}

#[derive(Debug, Serialize)]
pub struct MoviesBody {
    pub movies: Vec<Movie>,
}

#[derive(Debug, Serialize)]
pub struct ActorMovieBody {
    pub actor_movie: ActorMovie,
}

#[derive(Debug, Serialize)]
pub struct MoviesOfActorBody {
    pub movies_of_actor: Vec<MoviesOfActor>,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub database: &'static str,
    pub uptime_seconds: u64,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_flattens_payload() {
        let body = ApiResponse::success(PeoplePage {
            people: vec![],
            next_person_id: 4,
        });

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"status": "OK", "people": [], "next_person_id": 4})
        );
    }

    #[test]
    fn test_error_envelope() {
        let body = ApiResponse::<PersonBody>::error("No data");

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"status": "Error", "error": "No data"})
        );
    }

    #[test]
    fn test_next_cursor_is_highest_id_plus_one() {
        assert_eq!(next_cursor(&[3, 7, 9], |id| *id), Some(10));
        assert_eq!(next_cursor(&[12, 11, 10, 3], |id| *id), Some(13));
        assert_eq!(next_cursor::<i32>(&[], |id| *id), None);
    }
}
