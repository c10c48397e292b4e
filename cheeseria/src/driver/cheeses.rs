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

//! Operations on the whole cheese catalog.

use crate::db;
use crate::driver::Driver;
use crate::model::{Cheese, CheeseId, Price};
use cheeseria_core::driver::DriverResult;
use log::info;

/// Reference catalog installed by `reseed` as (name, description, price) tuples.
const CATALOG: &[(&str, &str, f64)] = &[
    ("Gouda", "A mild-flavored cheese from the Netherlands.", 12.99),
    ("Cheddar", "A popular cheese with a sharp taste.", 10.49),
    ("Brie", "A soft cheese with a creamy texture.", 14.99),
    ("Blue Cheese", "A cheese with blue veins and a strong flavor.", 15.99),
    ("Parmesan", "A hard, granular cheese often used for grating.", 13.49),
];

/// Instantiates the reference catalog with freshly-generated identifiers.
fn catalog() -> DriverResult<Vec<Cheese>> {
    let mut cheeses = Vec::with_capacity(CATALOG.len());
    for (name, description, price) in CATALOG {
        cheeses.push(Cheese::new(
            CheeseId::generate(),
            (*name).to_owned(),
            (*description).to_owned(),
            Price::new(*price)?,
        ));
    }
    Ok(cheeses)
}

impl Driver {
    /// Gets all cheeses in the catalog, in no particular order.
    pub(crate) async fn get_cheeses(self) -> DriverResult<Vec<Cheese>> {
        let cheeses = db::get_cheeses(&mut self.db.ex().await?).await?;
        Ok(cheeses)
    }

    /// Replaces the whole catalog with the reference catalog and returns how many cheeses were
    /// inserted.
    pub(crate) async fn reseed(self) -> DriverResult<u64> {
        let cheeses = catalog()?;

        let mut tx = self.db.begin().await?;
        let deleted = db::delete_cheeses(tx.ex()).await?;
        let inserted = db::create_cheeses(tx.ex(), &cheeses).await?;
        tx.commit().await?;

        info!("Reseeded catalog: deleted {} cheeses and inserted {}", deleted, inserted);
        Ok(inserted)
    }
}
