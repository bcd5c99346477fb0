//! Error vocabulary shared by the catalog services.

use crate::db::{QueryError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    InvalidOptions(String),

    #[error("no fields to update")]
    NothingToUpdate,

    #[error("{op}: no rows in result set")]
    NotFound { op: &'static str },

    #[error("{op}: record already exists")]
    AlreadyExists { op: &'static str },

    #[error("{op}: provided data is invalid: {detail}")]
    InvalidData { op: &'static str, detail: String },

    #[error("{op}: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: StoreError,
    },
}

impl CatalogError {
    /// Tags a repository failure with the operation that produced it,
    /// keeping its classification.
    pub fn at(op: &'static str) -> impl Fn(StoreError) -> Self {
        move |err| match err {
            StoreError::Query(QueryError::NothingToUpdate) => Self::NothingToUpdate,
            StoreError::Query(query) => Self::InvalidOptions(query.to_string()),
            StoreError::NoRows => Self::NotFound { op },
            StoreError::AlreadyExists => Self::AlreadyExists { op },
            StoreError::Constraint(detail) => Self::InvalidData { op, detail },
            source @ StoreError::Database(_) => Self::Storage { op, source },
        }
    }
}

impl From<QueryError> for CatalogError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NothingToUpdate => Self::NothingToUpdate,
            other => Self::InvalidOptions(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_survives_tagging() {
        let tag = CatalogError::at("person.update");

        assert!(matches!(
            tag(StoreError::Query(QueryError::NothingToUpdate)),
            CatalogError::NothingToUpdate
        ));
        assert!(matches!(
            tag(StoreError::NoRows),
            CatalogError::NotFound { op: "person.update" }
        ));
        assert!(matches!(
            tag(StoreError::Query(QueryError::UnknownField("x".into()))),
            CatalogError::InvalidOptions(_)
        ));

        let err = tag(StoreError::Database(sea_orm::DbErr::Custom("boom".into())));
        let message = err.to_string();
        assert!(message.starts_with("person.update: database error"), "{message}");
        assert!(message.contains("boom"), "{message}");
    }
}
