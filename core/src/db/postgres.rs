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

//! PostgreSQL engine, used in production.

use crate::db::{Db, DbResult, Executor, PoolExecutor, TxExecutor, map_sqlx_error};
use crate::env::{EnvResult, get_optional_var, get_required_var};
use async_trait::async_trait;
use derivative::Derivative;
use log::warn;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, Postgres};

/// Executor for a PostgreSQL database.
pub type PostgresExecutor = PoolExecutor<Postgres>;

/// Connection settings for a PostgreSQL server.
#[derive(Derivative)]
#[derivative(Debug)]
#[cfg_attr(test, derivative(PartialEq))]
pub struct PostgresOptions {
    /// Name or address of the server.
    pub host: String,

    /// Port the server listens on.
    pub port: u16,

    /// Name of the database.
    pub database: String,

    /// Role to log in as.
    pub username: String,

    /// Password for `username`.
    #[derivative(Debug = "ignore")]
    pub password: String,

    /// Connections to keep open even when idle.  Uses the sqlx default if not set.
    pub min_connections: Option<u32>,

    /// Upper bound on open connections.  Uses the sqlx default if not set.
    pub max_connections: Option<u32>,
}

impl PostgresOptions {
    /// Reads the settings from the `<prefix>_HOST`, `<prefix>_PORT`, `<prefix>_DATABASE`,
    /// `<prefix>_USERNAME` and `<prefix>_PASSWORD` variables, all required, and from the optional
    /// `<prefix>_MIN_CONNECTIONS` and `<prefix>_MAX_CONNECTIONS` variables.
    pub fn from_env(prefix: &str) -> EnvResult<PostgresOptions> {
        Ok(PostgresOptions {
            host: get_required_var(prefix, "HOST")?,
            port: get_required_var(prefix, "PORT")?,
            database: get_required_var(prefix, "DATABASE")?,
            username: get_required_var(prefix, "USERNAME")?,
            password: get_required_var(prefix, "PASSWORD")?,
            min_connections: get_optional_var(prefix, "MIN_CONNECTIONS")?,
            max_connections: get_optional_var(prefix, "MAX_CONNECTIONS")?,
        })
    }
}

/// A PostgreSQL database accessed through a connection pool.
pub struct PostgresDb {
    /// Connections to the database.
    pool: PgPool,
}

impl PostgresDb {
    /// Prepares a pool for the server described by `opts`.
    ///
    /// Connections are opened on first use, so this cannot fail and does not block.
    pub fn connect(opts: PostgresOptions) -> Self {
        let mut pool_options = PgPoolOptions::new();
        if let Some(min_connections) = opts.min_connections {
            pool_options = pool_options.min_connections(min_connections);
        }
        if let Some(max_connections) = opts.max_connections {
            pool_options = pool_options.max_connections(max_connections);
        }

        let connect_options = PgConnectOptions::new()
            .host(&opts.host)
            .port(opts.port)
            .database(&opts.database)
            .username(&opts.username)
            .password(&opts.password);

        Self { pool: pool_options.connect_lazy_with(connect_options) }
    }
}

impl Drop for PostgresDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("PostgreSQL database dropped while still open; call close() first");
        }
    }
}

#[async_trait]
impl Db for PostgresDb {
    async fn ex(&self) -> DbResult<Executor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(Executor::Postgres(PoolExecutor::Direct(conn)))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(Executor::Postgres(PoolExecutor::Tx(tx))))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Test utilities for PostgreSQL.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Connects to the server described by the `PGSQL_TEST_*` variables.
    ///
    /// The pool is limited to one connection whose `search_path` points at `pg_temp`, so every
    /// table a test creates is private to it and vanishes on disconnection.
    pub async fn setup() -> PostgresDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();

        let mut opts = PostgresOptions::from_env("PGSQL_TEST").unwrap();
        opts.min_connections = Some(1);
        opts.max_connections = Some(1);
        let db = PostgresDb::connect(opts);

        let mut conn = db.pool.acquire().await.unwrap();
        sqlx::query("SET search_path TO pg_temp").execute(&mut *conn).await.unwrap();
        db
    }
}
