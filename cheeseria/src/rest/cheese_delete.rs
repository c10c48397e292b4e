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

//! API to delete a cheese.

use crate::driver::Driver;
use crate::model::CheeseId;
use crate::rest::{INIT_ID, not_found_or_internal_error};
use axum::extract::State;
use axum::http;
use cheeseria_core::rest::{PathParams, RestResult};

/// Deletes the cheese `id`.
async fn delete(driver: Driver, id: CheeseId) -> RestResult<http::StatusCode> {
    driver
        .delete_cheese(&id)
        .await
        .map_err(|e| not_found_or_internal_error(e, "Error deleting cheese"))?;
    Ok(http::StatusCode::NO_CONTENT)
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams(id): PathParams<CheeseId>,
) -> RestResult<http::StatusCode> {
    delete(driver, id).await
}

/// API handler for the `/cheeses/init` path, which shadows the cheese whose ID is `init`.
pub(crate) async fn init_handler(State(driver): State<Driver>) -> RestResult<http::StatusCode> {
    delete(driver, CheeseId::new(INIT_ID)).await
}
