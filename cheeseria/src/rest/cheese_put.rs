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

//! API to update an existing cheese.

use crate::driver::Driver;
use crate::model::{Cheese, CheeseId};
use crate::rest::fields::{CheeseFields, non_blank, to_price, to_text};
use crate::rest::{INIT_ID, internal_error, not_found_or_internal_error};
use axum::Json;
use axum::extract::State;
use cheeseria_core::rest::{JsonBody, PathParams, RestResult};
use serde_json::Value;

/// Message returned when a failure prevents updating the cheese.
const UPDATE_ERROR: &str = "Error updating cheese";

/// Updates the cheese `id` with the non-blank fields in `body`.
///
/// Blank fields leave the current values untouched.  Non-blank fields of the wrong type are
/// reported as a failure to update the cheese, even if the cheese does not exist.
async fn update(driver: Driver, id: CheeseId, body: Value) -> RestResult<Json<Cheese>> {
    let fields = CheeseFields::from_body(body)?;
    let name = non_blank(fields.name).map(|v| to_text("name", v)).transpose();
    let description = non_blank(fields.description).map(|v| to_text("description", v)).transpose();
    let price = non_blank(fields.price).map(to_price).transpose();
    let (name, description, price) = match (name, description, price) {
        (Ok(name), Ok(description), Ok(price)) => (name, description, price),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            return Err(internal_error(e, UPDATE_ERROR));
        }
    };

    let cheese = driver
        .update_cheese(&id, name, description, price)
        .await
        .map_err(|e| not_found_or_internal_error(e, UPDATE_ERROR))?;
    Ok(Json(cheese))
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams(id): PathParams<CheeseId>,
    JsonBody(body): JsonBody<Value>,
) -> RestResult<Json<Cheese>> {
    update(driver, id, body).await
}

/// API handler for the `/cheeses/init` path, which shadows the cheese whose ID is `init`.
pub(crate) async fn init_handler(
    State(driver): State<Driver>,
    JsonBody(body): JsonBody<Value>,
) -> RestResult<Json<Cheese>> {
    update(driver, CheeseId::new(INIT_ID), body).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Price;
    use crate::rest::testutils::*;
    use axum::http;
    use cheeseria_core::rest::testutils::*;
    use serde_json::json;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::PUT, format!("/cheeses/{}", id))
    }

    #[tokio::test]
    async fn test_all_fields() {
        let context = TestContext::setup().await;

        let brie = context.create_cheese("Brie", "Soft", 14.99).await;

        let request = json!({"name": "Camembert", "description": "Also soft", "price": 11.5});
        let response = OneShotBuilder::new(context.app(), route(brie.id().as_str()))
            .send_json(request)
            .await
            .expect_json::<Cheese>()
            .await;
        let exp_cheese = Cheese::new(
            brie.id().clone(),
            "Camembert".to_owned(),
            "Also soft".to_owned(),
            Price::new(11.5).unwrap(),
        );
        assert_eq!(exp_cheese, response);

        assert_eq!(Some(exp_cheese), context.get_cheese(brie.id()).await);
        context.close_db().await;
    }

    #[tokio::test]
    async fn test_some_fields() {
        let context = TestContext::setup().await;

        let brie = context.create_cheese("Brie", "Soft", 14.99).await;
        let gouda = context.create_cheese("Gouda", "Mild", 12.99).await;

        let request = json!({"price": 9.99});
        let response = OneShotBuilder::new(context.app(), route(brie.id().as_str()))
            .send_json(request)
            .await
            .expect_json::<Cheese>()
            .await;
        let exp_cheese = Cheese::new(
            brie.id().clone(),
            "Brie".to_owned(),
            "Soft".to_owned(),
            Price::new(9.99).unwrap(),
        );
        assert_eq!(exp_cheese, response);

        assert_eq!(vec![exp_cheese, gouda], context.get_cheeses().await);
        context.close_db().await;
    }

    #[tokio::test]
    async fn test_no_fields() {
        let context = TestContext::setup().await;

        let brie = context.create_cheese("Brie", "Soft", 14.99).await;

        let response = OneShotBuilder::new(context.app(), route(brie.id().as_str()))
            .send_json(json!({}))
            .await
            .expect_json::<Cheese>()
            .await;
        assert_eq!(brie, response);
        context.close_db().await;
    }

    #[tokio::test]
    async fn test_empty_values_are_ignored() {
        let context = TestContext::setup().await;

        let brie = context.create_cheese("Brie", "Soft", 14.99).await;

        // A zero price or an empty text field cannot be written through this API.
        for request in [
            json!({"name": "", "description": "", "price": 0}),
            json!({"name": null, "description": null, "price": null}),
        ] {
            let response = OneShotBuilder::new(context.app(), route(brie.id().as_str()))
                .send_json(request)
                .await
                .expect_json::<Cheese>()
                .await;
            assert_eq!(brie, response);
        }

        assert_eq!(Some(brie.clone()), context.get_cheese(brie.id()).await);
        context.close_db().await;
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        context.create_cheese("Brie", "Soft", 14.99).await;

        OneShotBuilder::new(context.app(), route("999"))
            .send_json(json!({"name": "X"}))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Cheese not found$")
            .await;
        context.close_db().await;
    }

    #[tokio::test]
    async fn test_blank_values_are_ignored_whatever_their_type() {
        let context = TestContext::setup().await;

        let brie = context.create_cheese("Brie", "Soft", 14.99).await;

        let response = OneShotBuilder::new(context.app(), route(brie.id().as_str()))
            .send_json(json!({"name": 0, "description": false, "price": ""}))
            .await
            .expect_json::<Cheese>()
            .await;
        assert_eq!(brie, response);

        context.close_db().await;
    }

    #[tokio::test]
    async fn test_bad_field_values() {
        let context = TestContext::setup().await;

        let brie = context.create_cheese("Brie", "Soft", 14.99).await;

        for request in [
            json!({"price": -3}),
            json!({"price": "12"}),
            json!({"price": true}),
            json!({"name": 5}),
            json!({"name": "Camembert", "description": ["Also", "soft"]}),
        ] {
            OneShotBuilder::new(context.app(), route(brie.id().as_str()))
                .send_json(&request)
                .await
                .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
                .expect_error("^Error updating cheese$")
                .await;
        }

        assert_eq!(Some(brie.clone()), context.get_cheese(brie.id()).await);
        context.close_db().await;
    }

    #[tokio::test]
    async fn test_bad_field_values_win_over_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("999"))
            .send_json(json!({"price": "12"}))
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("^Error updating cheese$")
            .await;

        context.close_db().await;
    }

    #[tokio::test]
    async fn test_init_is_an_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("init"))
            .send_json(json!({"name": "X"}))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Cheese not found$")
            .await;

        context.close_db().await;
    }

    #[tokio::test]
    async fn test_undecodable_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("%C3%28"))
            .send_json(json!({"name": "X"}))
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("^Internal server error$")
            .await;

        context.close_db().await;
    }

    #[tokio::test]
    async fn test_db_error() {
        let context = TestContext::setup().await;
        context.close_db().await;

        OneShotBuilder::new(context.app(), route("1"))
            .send_json(json!({"name": "X"}))
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("^Error updating cheese$")
            .await;
    }

    test_payload_must_be_json!(TestContext::app_without_db().await, route("1"));
}
