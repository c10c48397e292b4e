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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;
use cheeseria_core::driver::DriverError;
use cheeseria_core::rest::{RestError, fallback};
use log::error;
use std::fmt::Display;

mod cheese_delete;
mod cheese_get;
mod cheese_put;
mod cheeses_get;
mod cheeses_init_post;
mod cheeses_post;
mod fields;
mod health_get;
mod root_get;
#[cfg(test)]
mod testutils;

/// Message returned when an API refers to a cheese that does not exist.
const CHEESE_NOT_FOUND: &str = "Cheese not found";

/// Cheese ID that falls on the `/cheeses/init` route instead of on `/cheeses/:id`.
const INIT_ID: &str = "init";

/// Converts an error `e` into an internal error that only exposes `message` to the client.
///
/// The details of `e` are logged instead.
fn internal_error<E: Display>(e: E, message: &str) -> RestError {
    error!("{}: {}", message, e);
    RestError::InternalError(message.to_owned())
}

/// Same as `internal_error` but reports a `DriverError::NotFound` as a missing cheese.
fn not_found_or_internal_error(e: DriverError, message: &str) -> RestError {
    match e {
        DriverError::NotFound(_) => RestError::NotFound(CHEESE_NOT_FOUND.to_owned()),
        e => internal_error(e, message),
    }
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{get, post};
    Router::new()
        .route("/", get(root_get::handler))
        .route("/health", get(health_get::handler))
        .route("/cheeses", get(cheeses_get::handler).post(cheeses_post::handler))
        .route(
            "/cheeses/init",
            post(cheeses_init_post::handler)
                .get(cheese_get::init_handler)
                .put(cheese_put::init_handler)
                .delete(cheese_delete::init_handler),
        )
        .route(
            "/cheeses/:id",
            get(cheese_get::handler).put(cheese_put::handler).delete(cheese_delete::handler),
        )
        .with_state(driver)
        .layer(fallback::catch_panic_layer())
}
