//! Translates [`QueryOptions`] into SeaQuery statements.
//!
//! Field names coming from the query string are resolved against the entity's
//! own column enum, so only real columns ever reach the generated SQL. Values
//! are converted to the column's type and bound as parameters.

use crate::entities::{actors, movies, people};
use crate::models::date;
use crate::models::options::{Filter, QueryOptions, SortDirection};
use sea_orm::sea_query::{
    ConditionalStatement, DeleteStatement, Query, SimpleExpr, UpdateStatement, Value,
};
use sea_orm::{
    ColumnTrait, ColumnType, Condition, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("invalid value '{value}' for field '{field}'")]
    InvalidValue { field: String, value: String },

    #[error("no fields to update")]
    NothingToUpdate,

    #[error("a filter is required for this operation")]
    EmptyFilter,
}

/// Per-entity listing parameters.
pub trait Listing: EntityTrait {
    /// Maximum rows returned by one list or next-page query.
    const PAGE_SIZE: u64;

    fn id_column() -> Self::Column;

    /// Order used when the caller supplies no sort keys.
    fn default_order() -> (Self::Column, Order);
}

impl Listing for people::Entity {
    const PAGE_SIZE: u64 = 3;

    fn id_column() -> Self::Column {
        people::Column::Id
    }

    fn default_order() -> (Self::Column, Order) {
        (people::Column::Id, Order::Asc)
    }
}

impl Listing for actors::Entity {
    const PAGE_SIZE: u64 = 10;

    fn id_column() -> Self::Column {
        actors::Column::Id
    }

    fn default_order() -> (Self::Column, Order) {
        (actors::Column::Id, Order::Asc)
    }
}

impl Listing for movies::Entity {
    const PAGE_SIZE: u64 = 10;

    fn id_column() -> Self::Column {
        movies::Column::Id
    }

    fn default_order() -> (Self::Column, Order) {
        (movies::Column::Rating, Order::Desc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// `/list`: caller sort or the entity default.
    First,
    /// `/list/next`: keyset page starting at the cursor, ordered by id.
    Next,
}

pub fn column<E: Listing>(name: &str) -> Result<E::Column, QueryError> {
    E::Column::from_str(name.trim()).map_err(|_| QueryError::UnknownField(name.to_string()))
}

fn typed_value<E: Listing>(col: E::Column, field: &str, raw: &str) -> Result<Value, QueryError> {
    let invalid = || QueryError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
    };
    let trimmed = raw.trim();

    let value = match col.def().get_column_type() {
        ColumnType::TinyInteger | ColumnType::SmallInteger | ColumnType::Integer => trimmed
            .parse::<i32>()
            .map(Value::from)
            .map_err(|_| invalid())?,
        ColumnType::BigInteger => trimmed
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| invalid())?,
        ColumnType::Float | ColumnType::Double | ColumnType::Decimal(_) => trimmed
            .parse::<f64>()
            .map(Value::from)
            .map_err(|_| invalid())?,
        ColumnType::Date => date::parse(trimmed).map(Value::from).ok_or_else(invalid)?,
        _ => Value::from(raw.to_string()),
    };

    Ok(value)
}

const fn order_of(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

/// AND across fields, OR between the values of a single field.
pub fn filter_condition<E: Listing>(filter: &Filter) -> Result<Condition, QueryError> {
    let mut cond = Condition::all();

    for (field, raw_values) in filter {
        let col = column::<E>(field)?;
        let values = raw_values
            .iter()
            .map(|raw| typed_value::<E>(col, field, raw))
            .collect::<Result<Vec<_>, _>>()?;
        cond = cond.add(col.is_in(values));
    }

    Ok(cond)
}

pub fn select_page<E: Listing>(options: &QueryOptions, page: Page) -> Result<Select<E>, QueryError> {
    let mut cond = filter_condition::<E>(&options.filter)?;
    let mut select = E::find();

    let sort = options
        .sort
        .iter()
        .map(|key| column::<E>(&key.field).map(|col| (col, order_of(key.direction))))
        .collect::<Result<Vec<_>, _>>()?;

    match page {
        Page::First => {
            if options.cursor > 0 {
                cond = cond.add(E::id_column().gte(options.cursor));
            }
            if sort.is_empty() {
                let (col, order) = E::default_order();
                select = select.order_by(col, order);
            }
            for (col, order) in sort {
                select = select.order_by(col, order);
            }
            select = select.order_by(E::id_column(), Order::Asc);
        }
        Page::Next => {
            cond = cond.add(E::id_column().gte(options.cursor));
            select = select.order_by(E::id_column(), Order::Asc);
        }
    }

    Ok(select.filter(cond).limit(E::PAGE_SIZE))
}

/// `UPDATE … SET <changes> WHERE id = ? RETURNING *`.
pub fn update_by_id<E: Listing>(
    id: i32,
    changes: Vec<(E::Column, Value)>,
) -> Result<UpdateStatement, QueryError> {
    if changes.is_empty() {
        return Err(QueryError::NothingToUpdate);
    }

    let mut stmt = Query::update();
    stmt.table(E::default().table_ref())
        .values(
            changes
                .into_iter()
                .map(|(col, value)| (col, SimpleExpr::Value(value))),
        )
        .and_where(E::id_column().eq(id))
        .returning_all();

    Ok(stmt)
}

/// `DELETE … WHERE id = ? RETURNING *`.
pub fn delete_by_id<E: Listing>(id: i32) -> DeleteStatement {
    let mut stmt = Query::delete();
    stmt.from_table(E::default().table_ref())
        .and_where(E::id_column().eq(id))
        .returning_all();
    stmt
}

/// `DELETE … WHERE <filter> RETURNING *`. An empty filter is refused.
pub fn delete_matching<E: Listing>(filter: &Filter) -> Result<DeleteStatement, QueryError> {
    if filter.values().all(Vec::is_empty) {
        return Err(QueryError::EmptyFilter);
    }

    let cond = filter_condition::<E>(filter)?;

    let mut stmt = Query::delete();
    stmt.from_table(E::default().table_ref())
        .cond_where(cond)
        .returning_all();

    Ok(stmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::options::SortKey;
    use sea_orm::{DbBackend, QueryTrait};

    fn filter(pairs: &[(&str, &str)]) -> Filter {
        let mut filter = Filter::new();
        for (key, value) in pairs {
            filter
                .entry((*key).to_string())
                .or_default()
                .push((*value).to_string());
        }
        filter
    }

    #[test]
    fn test_next_page_filters_from_cursor_and_caps_rows() {
        let options = QueryOptions {
            filter: filter(&[("name", "Leo"), ("name", "Max")]),
            sort: vec![],
            cursor: 5,
        };

        let sql = select_page::<people::Entity>(&options, Page::Next)
            .unwrap()
            .build(DbBackend::Sqlite)
            .to_string();

        assert!(sql.contains(r#""people"."name" IN ("#), "{sql}");
        assert!(sql.contains("'Max'"), "{sql}");
        assert!(sql.contains(r#""people"."id" >= 5"#), "{sql}");
        assert!(sql.contains(r#"ORDER BY "people"."id" ASC"#), "{sql}");
        assert!(sql.ends_with("LIMIT 3"), "{sql}");
    }

    #[test]
    fn test_first_page_uses_default_order() {
        let sql = select_page::<movies::Entity>(&QueryOptions::default(), Page::First)
            .unwrap()
            .build(DbBackend::Sqlite)
            .to_string();

        assert!(sql.contains(r#"ORDER BY "movies"."rating" DESC"#), "{sql}");
        assert!(sql.ends_with("LIMIT 10"), "{sql}");
    }

    #[test]
    fn test_first_page_starts_at_cursor_when_given() {
        let options = QueryOptions {
            cursor: 1000,
            ..QueryOptions::default()
        };

        let sql = select_page::<people::Entity>(&options, Page::First)
            .unwrap()
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(sql.contains(r#""people"."id" >= 1000"#), "{sql}");

        let sql = select_page::<people::Entity>(&QueryOptions::default(), Page::First)
            .unwrap()
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(!sql.contains(">="), "{sql}");
    }

    #[test]
    fn test_first_page_honours_caller_sort() {
        let options = QueryOptions {
            sort: vec![SortKey {
                field: "surname".to_string(),
                direction: SortDirection::Desc,
            }],
            ..QueryOptions::default()
        };

        let sql = select_page::<actors::Entity>(&options, Page::First)
            .unwrap()
            .build(DbBackend::Sqlite)
            .to_string();

        assert!(sql.contains(r#"ORDER BY "actors"."surname" DESC"#), "{sql}");
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let options = QueryOptions {
            filter: filter(&[("name; DROP TABLE people", "x")]),
            ..QueryOptions::default()
        };
        assert!(matches!(
            select_page::<people::Entity>(&options, Page::First),
            Err(QueryError::UnknownField(_))
        ));

        let options = QueryOptions {
            sort: vec![SortKey {
                field: "password".to_string(),
                direction: SortDirection::Asc,
            }],
            ..QueryOptions::default()
        };
        assert_eq!(
            select_page::<people::Entity>(&options, Page::First).err(),
            Some(QueryError::UnknownField("password".to_string()))
        );
    }

    #[test]
    fn test_filter_values_follow_column_type() {
        let bad_age = filter(&[("age", "old")]);
        assert!(matches!(
            filter_condition::<people::Entity>(&bad_age),
            Err(QueryError::InvalidValue { .. })
        ));

        assert!(filter_condition::<people::Entity>(&filter(&[("age", "42")])).is_ok());

        let bad_date = filter(&[("release_date", "2003/02/01")]);
        assert!(filter_condition::<movies::Entity>(&bad_date).is_err());

        let dated = filter(&[("release_date", "01.02.2003"), ("rating", "7.5")]);
        assert!(filter_condition::<movies::Entity>(&dated).is_ok());
    }

    #[test]
    fn test_update_requires_changes() {
        assert_eq!(
            update_by_id::<people::Entity>(1, vec![]).err(),
            Some(QueryError::NothingToUpdate)
        );

        let stmt = update_by_id::<people::Entity>(
            1,
            vec![(people::Column::Patronymic, Value::from("X".to_string()))],
        )
        .unwrap();
        let sql = DbBackend::Sqlite.build(&stmt).to_string();

        assert!(sql.starts_with(r#"UPDATE "people" SET "patronymic" = 'X'"#), "{sql}");
        assert!(sql.contains(r#""people"."id" = 1"#), "{sql}");
        assert!(sql.contains("RETURNING *"), "{sql}");
    }

    #[test]
    fn test_delete_matching_refuses_empty_filter() {
        assert_eq!(
            delete_matching::<people::Entity>(&Filter::new()).err(),
            Some(QueryError::EmptyFilter)
        );

        let stmt = delete_matching::<people::Entity>(&filter(&[("surname", "Kim")])).unwrap();
        let sql = DbBackend::Sqlite.build(&stmt).to_string();
        assert!(sql.starts_with(r#"DELETE FROM "people""#), "{sql}");
        assert!(sql.contains("RETURNING *"), "{sql}");
    }
}
