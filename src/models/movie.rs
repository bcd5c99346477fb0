use crate::entities::movies;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "crate::models::date",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl From<movies::Model> for Movie {
    fn from(m: movies::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            release_date: m.release_date,
            rating: m.rating,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMovie {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "crate::models::date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieUpdate {
    pub id: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "crate::models::date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl MovieUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.release_date.is_none()
            && self.rating.is_none()
    }
}

/// Fragment search over movie titles and actor names (`GET /movie/find`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieSearch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub actor_name: Option<String>,
}

impl MovieSearch {
    #[must_use]
    pub fn title_fragment(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn actor_fragment(&self) -> Option<&str> {
        self.actor_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
