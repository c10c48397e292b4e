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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::{Cheese, CheeseId, Price};
use crate::rest::app;
use axum::Router;
use cheeseria_core::db::Db;
use cheeseria_core::db::sqlite::testutils::setup;
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app, exposed for direct inspection.
    db: Arc<dyn Db + Send + Sync>,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes an in-memory database with the schema and an app on top of it.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::new(setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        let app = app(driver);
        Self { db, app }
    }

    /// Returns a copy of the app to issue one request against it.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Returns an app whose database is already closed, for tests that never reach it.
    pub(crate) async fn app_without_db() -> Router {
        let context = Self::setup().await;
        context.close_db().await;
        context.app
    }

    /// Closes the database.  Tests call this once done, or earlier to make the database fail.
    pub(crate) async fn close_db(&self) {
        self.db.close().await;
    }

    /// Stores a new cheese directly in the database.
    pub(crate) async fn create_cheese(&self, name: &str, description: &str, price: f64) -> Cheese {
        db::create_cheese(
            &mut self.db.ex().await.unwrap(),
            name.to_owned(),
            description.to_owned(),
            Price::new(price).unwrap(),
        )
        .await
        .unwrap()
    }

    /// Fetches a cheese directly from the database.
    pub(crate) async fn get_cheese(&self, id: &CheeseId) -> Option<Cheese> {
        db::get_cheese(&mut self.db.ex().await.unwrap(), id).await.unwrap()
    }

    /// Fetches all cheeses directly from the database, sorted by name.
    pub(crate) async fn get_cheeses(&self) -> Vec<Cheese> {
        let mut cheeses = db::get_cheeses(&mut self.db.ex().await.unwrap()).await.unwrap();
        cheeses.sort_by(|a, b| a.name().cmp(b.name()));
        cheeses
    }
}
