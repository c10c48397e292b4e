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

//! High-level data types.

use cheeseria_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::{AsRef, Constructor};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque identifier of a cheese.
///
/// Identifiers received from clients are not validated in any way: an identifier that does not
/// look like the ones we generate simply does not match any cheese.
#[derive(AsRef, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct CheeseId(String);

impl CheeseId {
    /// Creates an identifier from its textual representation.
    pub(crate) fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    /// Generates a new random identifier for a cheese that is about to be stored.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns a string view of the identifier.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// The price of a cheese, which is always a finite and non-negative number.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Price(f64);

impl Price {
    /// Creates a new price from an untrusted `value`, making sure it is valid.
    pub(crate) fn new(value: f64) -> ModelResult<Self> {
        if !value.is_finite() {
            return Err(ModelError(format!("Price must be a finite number but got {}", value)));
        }
        if value < 0.0 {
            return Err(ModelError(format!("Price cannot be negative but got {}", value)));
        }
        Ok(Self(value))
    }

    /// Returns the price as a raw number.
    pub(crate) fn as_f64(self) -> f64 {
        self.0
    }

    /// Returns true if the price is zero.
    pub(crate) fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Price::new(value).map_err(serde::de::Error::custom)
    }
}

/// A cheese as stored in the catalog.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Cheese {
    /// Unique identifier assigned by the database when the cheese was created.
    id: CheeseId,

    /// Name of the cheese.
    name: String,

    /// Free-form description of the cheese.
    description: String,

    /// Price of the cheese.
    price: Price,
}

/// Set of changes to apply to an existing cheese.
///
/// Values that are empty (an empty string or a zero price) are treated as if they had not been
/// supplied, so an update can neither clear a text field nor make a cheese free.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CheeseUpdate {
    /// New name for the cheese, if any.
    name: Option<String>,

    /// New description for the cheese, if any.
    description: Option<String>,

    /// New price for the cheese, if any.
    price: Option<Price>,
}

impl CheeseUpdate {
    /// Creates a new set of changes, discarding all values that are empty.
    pub(crate) fn new(
        name: Option<String>,
        description: Option<String>,
        price: Option<Price>,
    ) -> Self {
        Self {
            name: name.filter(|name| !name.is_empty()),
            description: description.filter(|description| !description.is_empty()),
            price: price.filter(|price| !price.is_zero()),
        }
    }

    /// Returns the new name, if any.
    pub(crate) fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the new description, if any.
    pub(crate) fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the new price, if any.
    pub(crate) fn price(&self) -> Option<Price> {
        self.price
    }
}
