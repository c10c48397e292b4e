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

//! Last-resort handling of failures that escape the API handlers.
//!
//! Every API handler is expected to catch its own errors and to turn them into meaningful
//! responses.  The facilities in this module exist for everything else: failures that happen
//! before a handler runs (such as malformed request bodies) and panics raised while handling a
//! request.  All of these are logged and reported to the client with the same generic message.

use crate::rest::RestError;
use axum::response::{IntoResponse, Response};
use log::error;
use std::any::Any;
use std::fmt;
use tower_http::catch_panic::CatchPanicLayer;

/// Message returned to clients for any failure that was not handled by an API.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Signature of the function that converts a panic payload into a response.
type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Records the unhandled error `e` and returns the generic error to report to the client.
pub fn unhandled<E: fmt::Display>(e: E) -> RestError {
    error!("Unhandled error: {}", e);
    RestError::InternalError(INTERNAL_SERVER_ERROR.to_owned())
}

/// Converts the `payload` of a panic raised while serving a request into a response.
///
/// Panic payloads can be of any type.  Only string payloads carry a message worth logging.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else {
        "non-string panic payload"
    };
    unhandled(format!("Handler panicked: {}", details)).into_response()
}

/// Creates a layer that intercepts panics in the wrapped services and answers them with the
/// generic internal error.
pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}
