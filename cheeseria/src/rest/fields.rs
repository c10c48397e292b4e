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

//! Interpretation of the cheese fields sent in request bodies.
//!
//! Bodies are accepted as free-form JSON so that the APIs, and not the body extractor, decide
//! what to do with fields that are missing or that have the wrong type.  A field counts as blank
//! when it is absent, `null`, `false`, `0` or the empty string.

use crate::model::Price;
use cheeseria_core::rest::{RestResult, fallback};
use serde::Deserialize;
use serde_json::Value;

/// Cheese fields of a request body, not yet validated.
#[derive(Debug, Default)]
pub(super) struct CheeseFields {
    /// Value of the `name` field, if present.
    pub(super) name: Option<Value>,

    /// Value of the `description` field, if present.
    pub(super) description: Option<Value>,

    /// Value of the `price` field, if present.
    pub(super) price: Option<Value>,
}

impl CheeseFields {
    /// Extracts the cheese fields from a request `body`.
    ///
    /// Arrays carry no fields.  Any other non-object body cannot be handled.
    pub(super) fn from_body(body: Value) -> RestResult<Self> {
        match body {
            Value::Object(mut map) => Ok(Self {
                name: map.remove("name"),
                description: map.remove("description"),
                price: map.remove("price"),
            }),
            Value::Array(_) => Ok(Self::default()),
            body => Err(fallback::unhandled(format!("Body is not a JSON object: {}", body))),
        }
    }
}

/// Returns true if `value` counts as not provided.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Discards `value` if it is absent or blank.
pub(super) fn non_blank(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !is_blank(v))
}

/// Interprets `value` as the text of the field `field`.
pub(super) fn to_text(field: &str, value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        value => Err(format!("Field {} must be a string but got {}", field, value)),
    }
}

/// Interprets `value` as a price.
pub(super) fn to_price(value: Value) -> Result<Price, String> {
    Price::deserialize(value).map_err(|e| format!("Invalid price: {}", e))
}
