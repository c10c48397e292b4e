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

//! Database access that is independent of the backing engine.
//!
//! Services hold a `Db` and ask it for `Executor`s, either direct ones or ones that run inside a
//! transaction.  An `Executor` must then be destructured to reach the engine-specific sqlx
//! executor, as sqlx needs to know the engine to type-check queries.
//!
//! PostgreSQL is the engine used in production.  SQLite backs the unit tests.

use crate::model::ModelError;
use async_trait::async_trait;

#[cfg(any(feature = "postgres", feature = "sqlite"))]
mod pool;
#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub use pool::{PoolExecutor, map_sqlx_error, run_schema};
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Database errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DbError {
    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates that data read from the database is not valid for our model.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// An executor for any of the supported database engines.
///
/// The wrapped executor may be talking to a connection taken from the pool or to an open
/// transaction.  Callers cannot tell the difference.
pub enum Executor {
    /// Executor for a PostgreSQL database.
    #[cfg(feature = "postgres")]
    Postgres(postgres::PostgresExecutor),

    /// Executor for a SQLite database.
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteExecutor),
}

/// An executor that runs all of its operations inside a single transaction.
///
/// Dropping this without calling `commit` rolls the transaction back.
pub struct TxExecutor(Executor);

impl TxExecutor {
    /// Gives access to the executor of the transaction.  Kept short as it is used everywhere.
    pub fn ex(&mut self) -> &mut Executor {
        &mut self.0
    }

    /// Commits the transaction.
    pub async fn commit(self) -> DbResult<()> {
        match self.0 {
            #[cfg(feature = "postgres")]
            Executor::Postgres(ex) => ex.commit().await,

            #[cfg(feature = "sqlite")]
            Executor::Sqlite(ex) => ex.commit().await,
        }
    }
}

/// A handle to a database.
#[async_trait]
pub trait Db {
    /// Obtains an executor that runs every statement on its own.  Kept short as it is used
    /// everywhere.
    async fn ex(&self) -> DbResult<Executor>;

    /// Opens a transaction.
    async fn begin(&self) -> DbResult<TxExecutor>;

    /// Closes the database once all outstanding connections have been released.
    async fn close(&self);
}

/// Helpers to run the same tests against more than one database engine.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    pub use paste::paste;

    /// Generates one `#[tokio::test]` per `name`, each calling `module::name` with a database
    /// obtained by evaluating `setup`.
    ///
    /// `attrs` is a bracketed, possibly empty, list of attributes to add to every generated test,
    /// such as `[#[ignore = "Needs a server"]]`.
    #[macro_export]
    macro_rules! generate_tests [
        ( @one $setup:expr, $module:path, [ $( #[$attr:meta] )* ], $name:ident ) => {
            $crate::db::testutils::paste! {
                #[tokio::test]
                $( #[$attr] )*
                async fn $name() {
                    $module :: [< $name >]($setup).await;
                }
            }
        };

        ( $setup:expr, $module:path, $attrs:tt, $( $name:ident ),+ $(,)? ) => {
            $(
                $crate::generate_tests!(@one $setup, $module, $attrs, $name);
            )+
        };
    ];

    pub use generate_tests;
}
