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

//! API to get the details of one cheese.

use crate::driver::Driver;
use crate::model::{Cheese, CheeseId};
use crate::rest::{CHEESE_NOT_FOUND, INIT_ID, internal_error};
use axum::Json;
use axum::extract::State;
use cheeseria_core::rest::{PathParams, RestError, RestResult};

/// Fetches the cheese `id`.
async fn get(driver: Driver, id: CheeseId) -> RestResult<Json<Cheese>> {
    match driver.get_cheese(&id).await {
        Ok(Some(cheese)) => Ok(Json(cheese)),
        Ok(None) => Err(RestError::NotFound(CHEESE_NOT_FOUND.to_owned())),
        Err(e) => Err(internal_error(e, "Error fetching cheese")),
    }
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams(id): PathParams<CheeseId>,
) -> RestResult<Json<Cheese>> {
    get(driver, id).await
}

/// API handler for the `/cheeses/init` path, which shadows the cheese whose ID is `init`.
pub(crate) async fn init_handler(State(driver): State<Driver>) -> RestResult<Json<Cheese>> {
    get(driver, CheeseId::new(INIT_ID)).await
}
