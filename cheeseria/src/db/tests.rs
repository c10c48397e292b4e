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

//! Common tests for any database implementation.

use crate::db::*;
use crate::model::{Cheese, CheeseId, CheeseUpdate, Price};
use cheeseria_core::db::{Db, DbError};

/// Syntactic sugar to create a cheese with a description derived from its `name`.
async fn create_simple_cheese(ex: &mut Executor, name: &'static str, price: f64) -> Cheese {
    create_cheese(ex, name.to_owned(), format!("The {} cheese", name), Price::new(price).unwrap())
        .await
        .unwrap()
}

/// Queries all cheeses and returns them sorted by name for stable comparisons.
async fn get_sorted_cheeses(ex: &mut Executor) -> Vec<Cheese> {
    let mut cheeses = get_cheeses(ex).await.unwrap();
    cheeses.sort_by(|a, b| a.name().cmp(b.name()));
    cheeses
}

async fn test_empty_catalog<D: Db>(db: D) {
    let mut ex = db.ex().await.unwrap();

    assert!(get_cheeses(&mut ex).await.unwrap().is_empty());
    assert_eq!(None, get_cheese(&mut ex, &CheeseId::new("123")).await.unwrap());
    drop(ex);
    db.close().await;
}

async fn test_create_and_get<D: Db>(db: D) {
    let mut ex = db.ex().await.unwrap();

    let cheese = create_cheese(
        &mut ex,
        "Brie".to_owned(),
        "A soft cheese".to_owned(),
        Price::new(14.99).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!("Brie", cheese.name());
    assert_eq!("A soft cheese", cheese.description());
    assert_eq!(14.99, cheese.price().as_f64());

    assert_eq!(Some(cheese.clone()), get_cheese(&mut ex, cheese.id()).await.unwrap());
    assert_eq!(vec![cheese], get_cheeses(&mut ex).await.unwrap());
    drop(ex);
    db.close().await;
}

async fn test_create_assigns_unique_ids<D: Db>(db: D) {
    let mut ex = db.ex().await.unwrap();

    let cheese1 = create_simple_cheese(&mut ex, "Gouda", 1.0).await;
    let cheese2 = create_simple_cheese(&mut ex, "Gouda", 1.0).await;
    assert_ne!(cheese1.id(), cheese2.id());

    assert_eq!(2, get_cheeses(&mut ex).await.unwrap().len());
    drop(ex);
    db.close().await;
}

async fn test_create_zero_price<D: Db>(db: D) {
    let mut ex = db.ex().await.unwrap();

    let cheese = create_simple_cheese(&mut ex, "Free", 0.0).await;
    let cheese = get_cheese(&mut ex, cheese.id()).await.unwrap().unwrap();
    assert_eq!(0.0, cheese.price().as_f64());
    drop(ex);
    db.close().await;
}

async fn test_update_some_fields<D: Db>(db: D) {
    let mut ex = db.ex().await.unwrap();

    let cheese = create_simple_cheese(&mut ex, "Cheddar", 10.49).await;
    let other = create_simple_cheese(&mut ex, "Parmesan", 13.49).await;

    let update = CheeseUpdate::new(None, Some("Sharp".to_owned()), Some(Price::new(9.0).unwrap()));
    let updated = update_cheese(&mut ex, cheese.id(), &update).await.unwrap();
    assert_eq!(
        Cheese::new(
            cheese.id().clone(),
            "Cheddar".to_owned(),
            "Sharp".to_owned(),
            Price::new(9.0).unwrap()
        ),
        updated
    );

    assert_eq!(vec![updated, other], get_sorted_cheeses(&mut ex).await);
    drop(ex);
    db.close().await;
}

async fn test_update_nothing<D: Db>(db: D) {
    let mut ex = db.ex().await.unwrap();

    let cheese = create_simple_cheese(&mut ex, "Brie", 14.99).await;
    let updated = update_cheese(&mut ex, cheese.id(), &CheeseUpdate::default()).await.unwrap();
    assert_eq!(cheese, updated);
    drop(ex);
    db.close().await;
}

async fn test_update_not_found<D: Db>(db: D) {
    let mut ex = db.ex().await.unwrap();

    create_simple_cheese(&mut ex, "Brie", 14.99).await;
    let update = CheeseUpdate::new(Some("Other".to_owned()), None, None);
    assert_eq!(
        DbError::NotFound,
        update_cheese(&mut ex, &CheeseId::new("999"), &update).await.unwrap_err()
    );
    drop(ex);
    db.close().await;
}

async fn test_delete_ok<D: Db>(db: D) {
    let mut ex = db.ex().await.unwrap();

    let cheese1 = create_simple_cheese(&mut ex, "Brie", 14.99).await;
    let cheese2 = create_simple_cheese(&mut ex, "Gouda", 12.99).await;

    assert_eq!(cheese1, delete_cheese(&mut ex, cheese1.id()).await.unwrap());

    assert_eq!(None, get_cheese(&mut ex, cheese1.id()).await.unwrap());
    assert_eq!(vec![cheese2], get_cheeses(&mut ex).await.unwrap());
    drop(ex);
    db.close().await;
}

async fn test_delete_not_found<D: Db>(db: D) {
    let mut ex = db.ex().await.unwrap();

    let cheese = create_simple_cheese(&mut ex, "Brie", 14.99).await;
    assert_eq!(DbError::NotFound, delete_cheese(&mut ex, &CheeseId::new("999")).await.unwrap_err());

    delete_cheese(&mut ex, cheese.id()).await.unwrap();
    assert_eq!(DbError::NotFound, delete_cheese(&mut ex, cheese.id()).await.unwrap_err());
    drop(ex);
    db.close().await;
}

async fn test_bulk_operations<D: Db>(db: D) {
    let mut ex = db.ex().await.unwrap();

    assert_eq!(0, delete_cheeses(&mut ex).await.unwrap());
    assert_eq!(0, create_cheeses(&mut ex, &[]).await.unwrap());

    let existing = create_simple_cheese(&mut ex, "Old", 1.0).await;
    assert_eq!(1, delete_cheeses(&mut ex).await.unwrap());
    assert_eq!(None, get_cheese(&mut ex, existing.id()).await.unwrap());

    let cheeses = vec![
        Cheese::new(CheeseId::generate(), "A".to_owned(), "a".to_owned(), Price::new(1.0).unwrap()),
        Cheese::new(CheeseId::generate(), "B".to_owned(), "b".to_owned(), Price::new(2.5).unwrap()),
    ];
    assert_eq!(2, create_cheeses(&mut ex, &cheeses).await.unwrap());
    assert_eq!(cheeses, get_sorted_cheeses(&mut ex).await);

    assert_eq!(2, delete_cheeses(&mut ex).await.unwrap());
    assert!(get_cheeses(&mut ex).await.unwrap().is_empty());
    drop(ex);
    db.close().await;
}

async fn test_bulk_duplicate_ids<D: Db>(db: D) {
    let mut ex = db.ex().await.unwrap();

    let id = CheeseId::generate();
    let cheeses = vec![
        Cheese::new(id.clone(), "A".to_owned(), "a".to_owned(), Price::new(1.0).unwrap()),
        Cheese::new(id, "B".to_owned(), "b".to_owned(), Price::new(2.0).unwrap()),
    ];
    match create_cheeses(&mut ex, &cheeses).await {
        Err(DbError::BackendError(_)) => (),
        e => panic!("Expected a BackendError but got {:?}", e),
    }
    assert!(get_cheeses(&mut ex).await.unwrap().is_empty());
    drop(ex);
    db.close().await;
}

async fn test_tx_rollback<D: Db>(db: D) {
    let cheese = create_simple_cheese(&mut db.ex().await.unwrap(), "Brie", 14.99).await;

    {
        let mut tx = db.begin().await.unwrap();
        assert_eq!(1, delete_cheeses(tx.ex()).await.unwrap());
        assert!(get_cheeses(tx.ex()).await.unwrap().is_empty());
    }

    assert_eq!(vec![cheese], get_cheeses(&mut db.ex().await.unwrap()).await.unwrap());
    db.close().await;
}

macro_rules! generate_db_tests [
    ( $setup:expr, $attrs:tt ) => {
        cheeseria_core::db::testutils::generate_tests!(
            $setup,
            $crate::db::tests,
            $attrs,
            test_empty_catalog,
            test_create_and_get,
            test_create_assigns_unique_ids,
            test_create_zero_price,
            test_update_some_fields,
            test_update_nothing,
            test_update_not_found,
            test_delete_ok,
            test_delete_not_found,
            test_bulk_operations,
            test_bulk_duplicate_ids,
            test_tx_rollback
        );
    }
];

#[cfg(feature = "postgres")]
mod postgres {
    use crate::db::init_schema;
    use cheeseria_core::db::Db;
    use cheeseria_core::db::postgres::PostgresDb;
    use cheeseria_core::db::postgres::testutils::setup;

    async fn setup_db() -> PostgresDb {
        let db = setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        db
    }

    generate_db_tests!(
        setup_db().await,
        [#[ignore = "Requires a PostgreSQL server configured via PGSQL_TEST_*"]]
    );
}

mod sqlite {
    use crate::db::init_schema;
    use cheeseria_core::db::Db;
    use cheeseria_core::db::sqlite::SqliteDb;
    use cheeseria_core::db::sqlite::testutils::setup;

    async fn setup_db() -> SqliteDb {
        let db = setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        db
    }

    generate_db_tests!(setup_db().await, []);
}
