//! Turns a raw query string into [`QueryOptions`].
//!
//! `sort_by`, `sort_order` and the route's cursor key are reserved; every
//! other key is a filter and repeated keys collect all of their values.

use thiserror::Error;

use super::ApiError;
use crate::models::options::{QueryOptions, SortDirection, SortKey};

pub const SORT_BY: &str = "sort_by";
pub const SORT_ORDER: &str = "sort_order";

pub const NEXT_PERSON_ID: &str = "next_person_id";
pub const NEXT_ACTOR_ID: &str = "next_actor_id";
pub const NEXT_MOVIE_ID: &str = "next_movie_id";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("incorrect sort order")]
    IncorrectSortOrder,

    #[error("couldn't read {0}")]
    Cursor(&'static str),
}

impl From<OptionsError> for ApiError {
    fn from(err: OptionsError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

/// Splits a raw query string into decoded `(key, value)` pairs.
pub fn query_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    raw.map(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    })
    .unwrap_or_default()
}

pub fn parse_options(
    pairs: Vec<(String, String)>,
    cursor_key: &'static str,
) -> Result<QueryOptions, OptionsError> {
    let mut options = QueryOptions::default();
    let mut sort_by = Vec::new();
    let mut sort_order = Vec::new();
    let mut cursor = None;

    for (key, value) in pairs {
        match key.as_str() {
            SORT_BY => sort_by.push(value),
            SORT_ORDER => sort_order.push(value),
            k if k == cursor_key => cursor = Some(value),
            _ => options.filter.entry(key).or_default().push(value),
        }
    }

    options.sort = sort_keys(sort_by, &sort_order)?;

    if let Some(raw) = cursor {
        options.cursor = raw
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|id| *id >= 0)
            .ok_or(OptionsError::Cursor(cursor_key))?;
    }

    Ok(options)
}

/// Pairs `sort_by` keys with directions. No `sort_order` at all means every
/// key sorts descending; a short `sort_order` list is padded with ascending.
fn sort_keys(sort_by: Vec<String>, sort_order: &[String]) -> Result<Vec<SortKey>, OptionsError> {
    let mut keys: Vec<SortKey> = Vec::with_capacity(sort_by.len());

    for (i, field) in sort_by.into_iter().enumerate() {
        let direction = if sort_order.is_empty() {
            SortDirection::Desc
        } else {
            match sort_order.get(i) {
                Some(raw) => {
                    SortDirection::parse(raw).ok_or(OptionsError::IncorrectSortOrder)?
                }
                None => SortDirection::Asc,
            }
        };

        if keys.iter().any(|key| key.field == field) {
            continue;
        }
        keys.push(SortKey { field, direction });
    }

    Ok(keys)
}
