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

//! API to create a new cheese.

use crate::driver::Driver;
use crate::model::Cheese;
use crate::rest::fields::{CheeseFields, non_blank, to_price, to_text};
use crate::rest::internal_error;
use axum::Json;
use axum::extract::State;
use axum::http;
use cheeseria_core::rest::{JsonBody, RestError, RestResult};
use serde_json::Value;

/// Message returned when a failure prevents creating the cheese.
const CREATE_ERROR: &str = "Error creating cheese";

/// API handler.
///
/// The name and description must not be blank and the price must be present, even if zero.
/// Fields that pass these checks but hold values of the wrong type are reported as a failure to
/// create the cheese, not as an invalid request.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(body): JsonBody<Value>,
) -> RestResult<(http::StatusCode, Json<Cheese>)> {
    let fields = CheeseFields::from_body(body)?;
    let (name, description, price) =
        match (non_blank(fields.name), non_blank(fields.description), fields.price) {
            (Some(name), Some(description), Some(price)) => (name, description, price),
            _ => return Err(RestError::InvalidRequest("Missing required fields".to_owned())),
        };

    let name = to_text("name", name).map_err(|e| internal_error(e, CREATE_ERROR))?;
    let description =
        to_text("description", description).map_err(|e| internal_error(e, CREATE_ERROR))?;
    let price = to_price(price).map_err(|e| internal_error(e, CREATE_ERROR))?;

    let cheese = driver
        .create_cheese(name, description, price)
        .await
        .map_err(|e| internal_error(e, CREATE_ERROR))?;
    Ok((http::StatusCode::CREATED, Json(cheese)))
}
