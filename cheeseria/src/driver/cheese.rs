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

//! Operations on one cheese.

use crate::db;
use crate::driver::Driver;
use crate::model::{Cheese, CheeseId, CheeseUpdate, Price};
use cheeseria_core::driver::DriverResult;

impl Driver {
    /// Gets the cheese identified by `id`, or `None` if it does not exist.
    pub(crate) async fn get_cheese(self, id: &CheeseId) -> DriverResult<Option<Cheese>> {
        let cheese = db::get_cheese(&mut self.db.ex().await?, id).await?;
        Ok(cheese)
    }

    /// Creates a new cheese and returns it with its newly-assigned identifier.
    pub(crate) async fn create_cheese(
        self,
        name: String,
        description: String,
        price: Price,
    ) -> DriverResult<Cheese> {
        let cheese = db::create_cheese(&mut self.db.ex().await?, name, description, price).await?;
        Ok(cheese)
    }

    /// Updates the cheese identified by `id` with whichever fields are provided.
    ///
    /// Empty strings and zero prices count as not provided, which means that these values can
    /// never be written via an update.
    pub(crate) async fn update_cheese(
        self,
        id: &CheeseId,
        name: Option<String>,
        description: Option<String>,
        price: Option<Price>,
    ) -> DriverResult<Cheese> {
        let update = CheeseUpdate::new(name, description, price);
        let cheese = db::update_cheese(&mut self.db.ex().await?, id, &update).await?;
        Ok(cheese)
    }

    /// Deletes the cheese identified by `id` and returns its last contents.
    pub(crate) async fn delete_cheese(self, id: &CheeseId) -> DriverResult<Cheese> {
        let cheese = db::delete_cheese(&mut self.db.ex().await?, id).await?;
        Ok(cheese)
    }
}
