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

//! API to list all cheeses.

use crate::driver::Driver;
use crate::model::Cheese;
use crate::rest::internal_error;
use axum::Json;
use axum::extract::State;
use cheeseria_core::rest::RestResult;

/// API handler.
pub(crate) async fn handler(State(driver): State<Driver>) -> RestResult<Json<Vec<Cheese>>> {
    let cheeses =
        driver.get_cheeses().await.map_err(|e| internal_error(e, "Error fetching cheeses"))?;
    Ok(Json(cheeses))
}
