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

//! SQLite engine, used to back tests with in-memory databases.

use crate::db::{Db, DbResult, Executor, PoolExecutor, TxExecutor, map_sqlx_error};
use async_trait::async_trait;
use log::warn;
use sqlx::sqlite::{Sqlite, SqlitePool};

/// Executor for a SQLite database.
pub type SqliteExecutor = PoolExecutor<Sqlite>;

/// A SQLite database accessed through a connection pool.
pub struct SqliteDb {
    /// Connections to the database.
    pool: SqlitePool,
}

impl SqliteDb {
    /// Opens the database at `url`, which may be `:memory:` for a private in-memory database.
    pub async fn connect(url: &str) -> DbResult<Self> {
        let pool = SqlitePool::connect(url).await.map_err(map_sqlx_error)?;
        Ok(Self { pool })
    }
}

impl Drop for SqliteDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("SQLite database dropped while still open; call close() first");
        }
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<Executor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(Executor::Sqlite(PoolExecutor::Direct(conn)))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(Executor::Sqlite(PoolExecutor::Tx(tx))))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Test utilities for SQLite.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Opens a new, empty, in-memory database.
    pub async fn setup() -> SqliteDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        SqliteDb::connect(":memory:").await.unwrap()
    }
}
