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

//! Shared building blocks for the cheeseria service.
//!
//! The service is split in layers, each depending only on the ones listed before it:
//!
//! 1.  `model`: domain types.  Constructors validate their inputs and nothing else happens here.
//!
//! 1.  `db`: persistence.  Free functions take an `Executor` and run one query per engine.
//!
//! 1.  `driver`: business logic.  A cloneable `Driver` owns the database handle and groups the
//!     statements of each operation into transactions where needed.
//!
//! 1.  `rest`: HTTP.  One handler per route, backed by the `Driver` as the router state.
//!
//! 1.  `main`: reads the configuration from the environment and calls `serve`.
//!
//! Each layer has its own error type and errors bubble up with `?`, changing type at every
//! boundary until the REST layer turns them into status codes.  This crate holds the pieces of
//! each layer that do not depend on cheeses.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
