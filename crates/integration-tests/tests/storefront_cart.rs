//! Integration tests for the storefront menu and cart flow.
//!
//! These tests require the storefront server running:
//! `cargo run -p masoro-storefront`
//!
//! Run with: `cargo test -p masoro-integration-tests -- --ignored`

use reqwest::{Client, StatusCode};

/// Base URL for the storefront (configurable via environment).
fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Client with a cookie store so the session cart survives across requests.
fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health() {
    let client = session_client();
    let resp = client
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_home_page_shows_featured_items() {
    let client = session_client();
    let resp = client
        .get(storefront_base_url())
        .send()
        .await
        .expect("Failed to get home page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Masoro Kitchen"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_menu_page_lists_categories() {
    let client = session_client();
    let resp = client
        .get(format!("{}/menu", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get menu page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Brochettes"));
    assert!(body.contains("RWF"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_menu_grid_filters_by_category() {
    let client = session_client();
    let resp = client
        .get(format!(
            "{}/menu/grid?category=burgers",
            storefront_base_url()
        ))
        .send()
        .await
        .expect("Failed to get menu grid");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("menu-card"));
    assert!(!body.contains("Primus"));
}

// ============================================================================
// Cart flow
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_add_and_remove_cart_item() {
    let client = session_client();
    let base_url = storefront_base_url();

    // Add item 1 twice
    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/cart/add"))
            .form(&[("item_id", "1")])
            .send()
            .await
            .expect("Failed to add to cart");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let count = client
        .get(format!("{base_url}/cart/count"))
        .send()
        .await
        .expect("Failed to get cart count")
        .text()
        .await
        .expect("Failed to read count");
    assert!(count.contains('2'));

    // Remove one unit
    let resp = client
        .post(format!("{base_url}/cart/remove"))
        .form(&[("item_id", "1")])
        .send()
        .await
        .expect("Failed to remove from cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let count = client
        .get(format!("{base_url}/cart/count"))
        .send()
        .await
        .expect("Failed to get cart count")
        .text()
        .await
        .expect("Failed to read count");
    assert!(count.contains('1'));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_add_unknown_item_returns_not_found() {
    let client = session_client();
    let resp = client
        .post(format!("{}/cart/add", storefront_base_url()))
        .form(&[("item_id", "99999")])
        .send()
        .await
        .expect("Failed to post to cart");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_remove_absent_item_is_noop() {
    let client = session_client();
    let resp = client
        .post(format!("{}/cart/remove", storefront_base_url()))
        .form(&[("item_id", "1")])
        .send()
        .await
        .expect("Failed to post to cart");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_dining_option_changes_totals() {
    let client = session_client();
    let base_url = storefront_base_url();

    client
        .post(format!("{base_url}/cart/add"))
        .form(&[("item_id", "1")])
        .send()
        .await
        .expect("Failed to add to cart");

    // Takeout is the default, so the delivery fee line is present
    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Delivery"));

    // Switching to dine-in drops the fee
    let resp = client
        .post(format!("{base_url}/cart/dining-option"))
        .form(&[("option", "dinein")])
        .send()
        .await
        .expect("Failed to set dining option");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let body = resp.text().await.expect("Failed to read response");
    assert!(!body.contains("Delivery fee"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_checkout_clears_cart() {
    let client = session_client();
    let base_url = storefront_base_url();

    client
        .post(format!("{base_url}/cart/add"))
        .form(&[("item_id", "1")])
        .send()
        .await
        .expect("Failed to add to cart");

    let resp = client
        .post(format!("{base_url}/checkout"))
        .send()
        .await
        .expect("Failed to checkout");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("ORD"));

    let count = client
        .get(format!("{base_url}/cart/count"))
        .send()
        .await
        .expect("Failed to get cart count")
        .text()
        .await
        .expect("Failed to read count");
    assert!(!count.contains("count-badge"));
}
