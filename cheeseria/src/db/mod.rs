// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Database abstraction to manipulate the cheese catalog.

use crate::model::{Cheese, CheeseId, CheeseUpdate, Price};
use cheeseria_core::db::{DbError, DbResult, Executor, map_sqlx_error, run_schema};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;

#[cfg(test)]
mod tests;

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => run_schema::<sqlx::Postgres>(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => run_schema::<sqlx::Sqlite>(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Cheese {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(map_sqlx_error)?;
        let price: f64 = row.try_get("price").map_err(map_sqlx_error)?;

        Ok(Cheese::new(CheeseId::new(id), name, description, Price::new(price)?))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Cheese {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(map_sqlx_error)?;
        let price: f64 = row.try_get("price").map_err(map_sqlx_error)?;

        Ok(Cheese::new(CheeseId::new(id), name, description, Price::new(price)?))
    }
}

/// Gets all cheeses in the catalog, in no particular order.
pub(crate) async fn get_cheeses(ex: &mut Executor) -> DbResult<Vec<Cheese>> {
    let query_str = "SELECT id, name, description, price FROM cheeses";
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let rows = sqlx::query(query_str)
                .fetch_all(ex)
                .await
                .map_err(map_sqlx_error)?;
            rows.into_iter().map(Cheese::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let rows =
                sqlx::query(query_str).fetch_all(ex).await.map_err(map_sqlx_error)?;
            rows.into_iter().map(Cheese::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the cheese identified by `id`, or `None` if there is no such cheese.
pub(crate) async fn get_cheese(ex: &mut Executor, id: &CheeseId) -> DbResult<Option<Cheese>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, description, price FROM cheeses WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_optional(ex)
                .await
                .map_err(map_sqlx_error)?;
            row.map(Cheese::try_from).transpose()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, description, price FROM cheeses WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_optional(ex)
                .await
                .map_err(map_sqlx_error)?;
            row.map(Cheese::try_from).transpose()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Creates a new cheese with the given details and returns it, including its newly-assigned
/// identifier.
pub(crate) async fn create_cheese(
    ex: &mut Executor,
    name: String,
    description: String,
    price: Price,
) -> DbResult<Cheese> {
    let cheese = Cheese::new(CheeseId::generate(), name, description, price);

    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "INSERT INTO cheeses (id, name, description, price) VALUES ($1, $2, $3, $4)";
            let done = sqlx::query(query_str)
                .bind(cheese.id().as_str())
                .bind(cheese.name().as_str())
                .bind(cheese.description().as_str())
                .bind(cheese.price().as_f64())
                .execute(ex)
                .await
                .map_err(map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str =
                "INSERT INTO cheeses (id, name, description, price) VALUES (?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(cheese.id().as_str())
                .bind(cheese.name().as_str())
                .bind(cheese.description().as_str())
                .bind(cheese.price().as_f64())
                .execute(ex)
                .await
                .map_err(map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    if rows_affected != 1 {
        return Err(DbError::BackendError("Insertion affected more than one row".to_owned()));
    }
    Ok(cheese)
}

/// Inserts all `cheeses` in one go and returns how many were stored.
///
/// The cheeses must already carry their identifiers.
pub(crate) async fn create_cheeses(ex: &mut Executor, cheeses: &[Cheese]) -> DbResult<u64> {
    if cheeses.is_empty() {
        return Ok(0);
    }

    let query_str = "INSERT INTO cheeses (id, name, description, price) ";
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(query_str);
            builder.push_values(cheeses, |mut b, cheese| {
                b.push_bind(cheese.id().as_str())
                    .push_bind(cheese.name().as_str())
                    .push_bind(cheese.description().as_str())
                    .push_bind(cheese.price().as_f64());
            });
            let done = builder.build().execute(ex).await.map_err(map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let mut builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(query_str);
            builder.push_values(cheeses, |mut b, cheese| {
                b.push_bind(cheese.id().as_str())
                    .push_bind(cheese.name().as_str())
                    .push_bind(cheese.description().as_str())
                    .push_bind(cheese.price().as_f64());
            });
            let done = builder.build().execute(ex).await.map_err(map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    if rows_affected != cheeses.len() as u64 {
        return Err(DbError::BackendError(format!(
            "Bulk insertion affected {} rows but expected {}",
            rows_affected,
            cheeses.len()
        )));
    }
    Ok(rows_affected)
}

/// Applies `update` to the cheese identified by `id` and returns the modified cheese.
///
/// Fields not present in `update` keep their current values.
pub(crate) async fn update_cheese(
    ex: &mut Executor,
    id: &CheeseId,
    update: &CheeseUpdate,
) -> DbResult<Cheese> {
    let row = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE cheeses
                SET
                    name = COALESCE($1, name),
                    description = COALESCE($2, description),
                    price = COALESCE($3, price)
                WHERE id = $4
                RETURNING id, name, description, price";
            let row = sqlx::query(query_str)
                .bind(update.name())
                .bind(update.description())
                .bind(update.price().map(Price::as_f64))
                .bind(id.as_str())
                .fetch_optional(ex)
                .await
                .map_err(map_sqlx_error)?;
            row.map(Cheese::try_from).transpose()?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE cheeses
                SET
                    name = COALESCE(?, name),
                    description = COALESCE(?, description),
                    price = COALESCE(?, price)
                WHERE id = ?
                RETURNING id, name, description, price";
            let row = sqlx::query(query_str)
                .bind(update.name())
                .bind(update.description())
                .bind(update.price().map(Price::as_f64))
                .bind(id.as_str())
                .fetch_optional(ex)
                .await
                .map_err(map_sqlx_error)?;
            row.map(Cheese::try_from).transpose()?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    row.ok_or(DbError::NotFound)
}

/// Deletes the cheese identified by `id` and returns what it looked like before deletion.
pub(crate) async fn delete_cheese(ex: &mut Executor, id: &CheeseId) -> DbResult<Cheese> {
    let row = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                DELETE FROM cheeses
                WHERE id = $1
                RETURNING id, name, description, price";
            let row = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_optional(ex)
                .await
                .map_err(map_sqlx_error)?;
            row.map(Cheese::try_from).transpose()?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                DELETE FROM cheeses
                WHERE id = ?
                RETURNING id, name, description, price";
            let row = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_optional(ex)
                .await
                .map_err(map_sqlx_error)?;
            row.map(Cheese::try_from).transpose()?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    row.ok_or(DbError::NotFound)
}

/// Deletes all cheeses in the catalog and returns how many there were.
pub(crate) async fn delete_cheeses(ex: &mut Executor) -> DbResult<u64> {
    let query_str = "DELETE FROM cheeses";
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let done =
                sqlx::query(query_str).execute(ex).await.map_err(map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = sqlx::query(query_str).execute(ex).await.map_err(map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}
