//! Admin API authorization tests against a running stack.

use almacen_integration_tests::TestContext;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_admin_health() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let resp = ctx
        .client
        .get(ctx.admin("/health"))
        .send()
        .await
        .expect("admin unreachable");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_reads_require_login() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    for path in ["/api/products", "/api/categories", "/api/orders", "/api/settings", "/api/users"] {
        let resp = ctx
            .client
            .get(ctx.admin(path))
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status(), 401, "expected 401 for {path}");
    }
}

#[tokio::test]
async fn test_mutations_require_login() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let resp = ctx
        .client
        .post(ctx.admin("/api/products"))
        .json(&json!({ "name": "Producto", "price": "100.00" }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), 401);

    let resp = ctx
        .client
        .delete(ctx.admin(&format!("/api/orders/{}", Uuid::new_v4())))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_login_with_bad_credentials_is_rejected() {
    let Some(ctx) = TestContext::from_env() else {
        return;
    };

    let resp = ctx
        .client
        .post(ctx.admin("/auth/login"))
        .json(&json!({
            "email": "nobody@example.com",
            "password": "definitely-wrong"
        }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), 401);
}
