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

//! Entry point to the cheeseria service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use cheeseria::db::init_schema;
use cheeseria::{Config, serve};
use cheeseria_core::db::Db;
use cheeseria_core::db::postgres::{PostgresDb, PostgresOptions};
use std::sync::Arc;

/// Prefix of the environment variables that configure the server.
const CONFIG_PREFIX: &str = "CHEESERIA";

/// Prefix of the environment variables that configure the database connection.
const DB_PREFIX: &str = "PGSQL_PROD";

#[tokio::main]
async fn main() -> Result<(), String> {
    env_logger::init();

    let config = Config::from_env(CONFIG_PREFIX)?;

    let db_opts = PostgresOptions::from_env(DB_PREFIX)?;
    let db = PostgresDb::connect(db_opts);
    let mut ex = db.ex().await.map_err(|e| e.to_string())?;
    init_schema(&mut ex).await.map_err(|e| e.to_string())?;
    drop(ex);

    serve(config.bind_addr, Arc::new(db)).await.map_err(|e| e.to_string())
}
