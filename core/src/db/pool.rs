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

//! Executor shared by all the pool-based sqlx engines.

use crate::db::{DbError, DbResult};
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use sqlx::pool::PoolConnection;
use sqlx::{Database, Describe, Either, Execute, Transaction};

/// Converts a raw sqlx error into our generic error type.
///
/// Only the conditions that callers can act on get their own type.  Everything else, including
/// constraint violations, is a `BackendError`.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::RowNotFound => DbError::NotFound,
        sqlx::Error::ColumnDecode { index, source } => {
            DbError::DataIntegrityError(format!("Cannot decode column {}: {}", index, source))
        }
        e => DbError::BackendError(e.to_string()),
    }
}

/// An sqlx executor for engine `DB` that runs statements either on a connection borrowed from
/// the pool or inside a transaction.
#[derive(Debug)]
pub enum PoolExecutor<DB: Database> {
    /// Statements run on a pooled connection and take effect immediately.
    Direct(PoolConnection<DB>),

    /// Statements run inside a transaction.
    Tx(Transaction<'static, DB>),
}

impl<DB: Database> PoolExecutor<DB> {
    /// Returns the underlying connection.
    fn connection(&mut self) -> &mut DB::Connection {
        match self {
            PoolExecutor::Direct(conn) => &mut **conn,
            PoolExecutor::Tx(tx) => &mut **tx,
        }
    }

    /// Commits the transaction, if any.  Direct executors have nothing to commit.
    pub(super) async fn commit(self) -> DbResult<()> {
        match self {
            PoolExecutor::Direct(_) => Ok(()),
            PoolExecutor::Tx(tx) => tx.commit().await.map_err(map_sqlx_error),
        }
    }
}

impl<'c, DB> sqlx::Executor<'c> for &'c mut PoolExecutor<DB>
where
    DB: Database,
    for<'a> &'a mut DB::Connection: sqlx::Executor<'a, Database = DB>,
{
    type Database = DB;

    fn fetch_many<'e, 'q: 'e, E>(
        self,
        query: E,
    ) -> BoxStream<'e, Result<Either<DB::QueryResult, DB::Row>, sqlx::Error>>
    where
        'c: 'e,
        E: 'q + Execute<'q, Self::Database>,
    {
        sqlx::Executor::fetch_many(self.connection(), query)
    }

    fn fetch_optional<'e, 'q: 'e, E>(
        self,
        query: E,
    ) -> BoxFuture<'e, Result<Option<DB::Row>, sqlx::Error>>
    where
        'c: 'e,
        E: 'q + Execute<'q, Self::Database>,
    {
        sqlx::Executor::fetch_optional(self.connection(), query)
    }

    fn prepare_with<'e, 'q: 'e>(
        self,
        sql: &'q str,
        parameters: &'e [DB::TypeInfo],
    ) -> BoxFuture<'e, Result<DB::Statement<'q>, sqlx::Error>>
    where
        'c: 'e,
    {
        sqlx::Executor::prepare_with(self.connection(), sql, parameters)
    }

    fn describe<'e, 'q: 'e>(self, sql: &'q str) -> BoxFuture<'e, Result<Describe<DB>, sqlx::Error>>
    where
        'c: 'e,
    {
        sqlx::Executor::describe(self.connection(), sql)
    }
}

/// Runs the possibly multi-statement `sql` script on `ex`, discarding any results.
pub async fn run_schema<DB>(ex: &mut PoolExecutor<DB>, sql: &str) -> DbResult<()>
where
    DB: Database,
    for<'a> &'a mut DB::Connection: sqlx::Executor<'a, Database = DB>,
{
    sqlx::raw_sql(sql).execute(ex).await.map_err(map_sqlx_error)?;
    Ok(())
}
