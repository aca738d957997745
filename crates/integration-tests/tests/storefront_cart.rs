//! Storefront cart flow tests against a running stack.

use almacen_integration_tests::TestContext;
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
async fn test_storefront_health() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let resp = ctx
        .client
        .get(ctx.storefront("/health"))
        .send()
        .await
        .expect("storefront unreachable");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_cart_starts_empty() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let cart: Value = ctx
        .client
        .get(ctx.storefront("/cart"))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid json");

    assert_eq!(cart["item_count"], 0);
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_remove_absent_line_is_noop() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let resp = ctx
        .client
        .post(ctx.storefront("/cart/remove"))
        .json(&json!({ "id": "does-not-exist" }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), 200);
    let cart: Value = resp.json().await.expect("invalid json");
    assert_eq!(cart["item_count"], 0);
}

#[tokio::test]
async fn test_update_absent_line_is_noop() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let resp = ctx
        .client
        .post(ctx.storefront("/cart/update"))
        .json(&json!({ "id": "does-not-exist", "quantity": 3 }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_add_unknown_product_is_404() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let resp = ctx
        .client
        .post(ctx.storefront("/cart/items"))
        .json(&json!({ "product_id": Uuid::new_v4(), "quantity": 1 }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_clear_cart() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let resp = ctx
        .client
        .post(ctx.storefront("/cart/clear"))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), 200);
    let cart: Value = resp.json().await.expect("invalid json");
    assert_eq!(cart["item_count"], 0);
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_is_rejected() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    // A fresh cookie jar means a fresh (empty) cart.
    let resp = ctx
        .client
        .post(ctx.storefront("/checkout"))
        .json(&json!({
            "name": "Ana García",
            "email": "ana@example.com",
            "shipping_address": "Av. Siempreviva 742"
        }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), 400);
}
