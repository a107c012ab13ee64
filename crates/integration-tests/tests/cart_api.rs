//! Cart lifecycle tests: merge-on-add, quantity floor, save-for-later,
//! clearing, and derived totals.

use axum::http::StatusCode;
use serde_json::json;

use clementine_integration_tests::{req, seeded_app, send};

#[tokio::test]
async fn cart_requires_a_resolved_user() {
    let app = seeded_app().await;
    let (status, _) = send(&app, req("GET", "/api/cart", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, req("DELETE", "/api/cart", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn add_to_cart_merges_duplicate_lines() {
    let app = seeded_app().await;

    let (status, first) = send(
        &app,
        req("POST", "/api/cart", Some(1), Some(json!({"productId": 1, "quantity": 2}))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["quantity"], 2);
    assert_eq!(first["product"]["slug"], "gopro-hero6-4k-action-camera");

    let (status, merged) = send(
        &app,
        req("POST", "/api/cart", Some(1), Some(json!({"productId": 1, "quantity": 3}))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(merged["id"], first["id"]);
    assert_eq!(merged["quantity"], 5);

    let (status, cart) = send(&app, req("GET", "/api/cart", Some(1), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn carts_are_per_user() {
    let app = seeded_app().await;

    send(
        &app,
        req("POST", "/api/cart", Some(1), Some(json!({"productId": 1}))),
    )
    .await;

    let (status, cart) = send(&app, req("GET", "/api/cart", Some(2), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart, json!([]));
}

#[tokio::test]
async fn adding_an_unknown_product_is_rejected() {
    let app = seeded_app().await;
    let (status, _) = send(
        &app,
        req("POST", "/api/cart", Some(1), Some(json!({"productId": 999}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quantity_updates_enforce_the_floor() {
    let app = seeded_app().await;

    let (_, item) = send(
        &app,
        req("POST", "/api/cart", Some(1), Some(json!({"productId": 2, "quantity": 2}))),
    )
    .await;
    let item_id = item["id"].as_i64().expect("id");

    let (status, body) = send(
        &app,
        req(
            "PUT",
            &format!("/api/cart/{item_id}"),
            Some(1),
            Some(json!({"quantity": 0})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid quantity value");

    // The stored quantity is unchanged after the rejected update.
    let (_, cart) = send(&app, req("GET", "/api/cart", Some(1), None)).await;
    assert_eq!(cart[0]["quantity"], 2);

    let (status, updated) = send(
        &app,
        req(
            "PUT",
            &format!("/api/cart/{item_id}"),
            Some(1),
            Some(json!({"quantity": 7})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 7);

    let (status, _) = send(
        &app,
        req("PUT", "/api/cart/999", Some(1), Some(json!({"quantity": 1}))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn removing_twice_reports_not_found() {
    let app = seeded_app().await;

    let (_, item) = send(
        &app,
        req("POST", "/api/cart", Some(1), Some(json!({"productId": 3}))),
    )
    .await;
    let item_id = item["id"].as_i64().expect("id");

    let (status, body) = send(
        &app,
        req("DELETE", &format!("/api/cart/{item_id}"), Some(1), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item removed from cart successfully");

    let (status, _) = send(
        &app,
        req("DELETE", &format!("/api/cart/{item_id}"), Some(1), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn clearing_spares_the_saved_list() {
    let app = seeded_app().await;

    send(
        &app,
        req("POST", "/api/cart", Some(1), Some(json!({"productId": 1, "quantity": 2}))),
    )
    .await;
    send(
        &app,
        req(
            "POST",
            "/api/cart",
            Some(1),
            Some(json!({"productId": 2, "savedForLater": true})),
        ),
    )
    .await;

    let (status, body) = send(&app, req("DELETE", "/api/cart", Some(1), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cart cleared successfully");

    let (_, cart) = send(&app, req("GET", "/api/cart", Some(1), None)).await;
    assert_eq!(cart, json!([]));

    let (_, saved) = send(&app, req("GET", "/api/saved-items", Some(1), None)).await;
    assert_eq!(saved.as_array().expect("array").len(), 1);
    assert_eq!(saved[0]["productId"], 2);

    // Clearing an empty cart still succeeds.
    let (status, _) = send(&app, req("DELETE", "/api/cart", Some(1), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn save_for_later_round_trip_preserves_quantity() {
    let app = seeded_app().await;

    let (_, item) = send(
        &app,
        req("POST", "/api/cart", Some(1), Some(json!({"productId": 4, "quantity": 3}))),
    )
    .await;
    let item_id = item["id"].as_i64().expect("id");

    let (status, saved) = send(
        &app,
        req(
            "POST",
            &format!("/api/cart/{item_id}/save-for-later"),
            Some(1),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["savedForLater"], true);

    let (_, cart) = send(&app, req("GET", "/api/cart", Some(1), None)).await;
    assert_eq!(cart, json!([]));

    let (status, restored) = send(
        &app,
        req(
            "POST",
            &format!("/api/saved-items/{item_id}/move-to-cart"),
            Some(1),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restored["savedForLater"], false);
    assert_eq!(restored["quantity"], 3);

    let (status, _) = send(
        &app,
        req("POST", "/api/saved-items/999/move-to-cart", Some(1), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn totals_match_the_worked_example() {
    let app = seeded_app().await;

    // A clean 100.00 product makes the 5%/10% math exact.
    let (status, product) = send(
        &app,
        req(
            "POST",
            "/api/products",
            None,
            Some(json!({
                "name": "Round Number Widget",
                "slug": "round-number-widget",
                "price": "100.00"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    send(
        &app,
        req(
            "POST",
            "/api/cart",
            Some(1),
            Some(json!({"productId": product["id"], "quantity": 2})),
        ),
    )
    .await;

    let (status, totals) = send(&app, req("GET", "/api/cart/totals", Some(1), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals["subtotal"], "200.00");
    assert_eq!(totals["discount"], "10.00");
    assert_eq!(totals["tax"], "19.00");
    assert_eq!(totals["total"], "209.00");
}

#[tokio::test]
async fn items_outlive_their_product() {
    let app = seeded_app().await;

    send(
        &app,
        req("POST", "/api/cart", Some(1), Some(json!({"productId": 8, "quantity": 1}))),
    )
    .await;

    let (status, _) = send(&app, req("DELETE", "/api/products/8", None, None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, cart) = send(&app, req("GET", "/api/cart", Some(1), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart.as_array().expect("array").len(), 1);
    assert_eq!(cart[0]["product"], serde_json::Value::Null);
}
