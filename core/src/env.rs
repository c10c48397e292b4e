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

//! Typed lookups of configuration values in the environment.
//!
//! Variables are always named `<prefix>_<suffix>` so that a single process can be configured for
//! more than one purpose (for example, a production database and a test database).  Errors are
//! plain strings meant to be shown to the operator as is.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Result type for this module.
pub type EnvResult<T> = Result<T, String>;

/// Computes the name of the variable identified by `prefix` and `suffix`.
fn var_name(prefix: &str, suffix: &str) -> String {
    format!("{}_{}", prefix, suffix)
}

/// Gets the environment variable `<prefix>_<suffix>` and parses it as a `T`.
///
/// Returns `None` if the variable is not set.  Variables that are set but empty are handed to the
/// parser like any other value.
pub fn get_optional_var<T>(prefix: &str, suffix: &str) -> EnvResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let name = var_name(prefix, suffix);
    let raw = match env::var(&name) {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(format!("{} does not contain valid UTF-8", name));
        }
    };
    match raw.parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(format!("Cannot parse {}={:?}: {}", name, raw, e)),
    }
}

/// Gets the environment variable `<prefix>_<suffix>` and parses it as a `T`, failing if it is not
/// set.
pub fn get_required_var<T>(prefix: &str, suffix: &str) -> EnvResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match get_optional_var(prefix, suffix)? {
        Some(value) => Ok(value),
        None => Err(format!("{} is required but is not set", var_name(prefix, suffix))),
    }
}
