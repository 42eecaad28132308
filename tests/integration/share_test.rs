//! Share link behavior: creation, public resolution, inheritance.

use http::StatusCode;

use drivebox_core::types::ItemId;
use drivebox_database::ItemStore;
use drivebox_entity::item::ItemPatch;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_share_create_and_public_resolve() {
    let app = TestApp::new().await;
    let f1 = app.create_file("u1", "f1.png", "image/png", None).await;

    let response = app
        .request(
            "POST",
            "/api/shares",
            Some(serde_json::json!({ "item_id": f1 })),
            Some("u1"),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let token = response.body["share_id"].as_str().unwrap().to_string();
    assert!(
        response.body["share_url"]
            .as_str()
            .unwrap()
            .ends_with(&format!("/shared/{token}"))
    );

    // Resolution needs no identity header.
    let resolved = app
        .request("GET", &format!("/api/shares/{token}"), None, None)
        .await;
    assert_eq!(resolved.status, StatusCode::OK);
    assert_eq!(resolved.body["item"]["id"], f1);
    assert_eq!(resolved.body["item"]["is_public"], true);
    assert!(resolved.body["contents"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_share_is_idempotent_per_item() {
    let app = TestApp::new().await;
    let f1 = app.create_file("u1", "f1.png", "image/png", None).await;

    let first = app
        .request(
            "POST",
            "/api/shares",
            Some(serde_json::json!({ "item_id": f1 })),
            Some("u1"),
        )
        .await;
    let second = app
        .request(
            "POST",
            "/api/shares",
            Some(serde_json::json!({ "item_id": f1 })),
            Some("u1"),
        )
        .await;
    assert_eq!(first.body["share_id"], second.body["share_id"]);
}

#[tokio::test]
async fn test_only_the_owner_can_share() {
    let app = TestApp::new().await;
    let f1 = app.create_file("u1", "f1.png", "image/png", None).await;

    let response = app
        .request(
            "POST",
            "/api/shares",
            Some(serde_json::json!({ "item_id": f1 })),
            Some("u2"),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_and_private_tokens_are_indistinguishable() {
    let app = TestApp::new().await;
    let f1 = app.create_file("u1", "f1.png", "image/png", None).await;

    let created = app
        .request(
            "POST",
            "/api/shares",
            Some(serde_json::json!({ "item_id": f1 })),
            Some("u1"),
        )
        .await;
    let token = created.body["share_id"].as_str().unwrap().to_string();

    // Flip visibility off behind the gate's back.
    app.store
        .update(
            ItemId::from_raw(f1),
            &ItemPatch {
                is_public: Some(false),
                ..ItemPatch::default()
            },
        )
        .await
        .unwrap();

    let revoked = app
        .request("GET", &format!("/api/shares/{token}"), None, None)
        .await;
    let unknown = app
        .request("GET", "/api/shares/no-such-token", None, None)
        .await;
    assert_eq!(revoked.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(revoked.body["message"], unknown.body["message"]);
}

#[tokio::test]
async fn test_folder_share_exposes_children_without_their_own_flags() {
    let app = TestApp::new().await;
    let e = app.create_folder("u1", "E", None).await;
    let f2 = app.create_file("u1", "f2.pdf", "application/pdf", Some(e)).await;

    let created = app
        .request(
            "POST",
            "/api/shares",
            Some(serde_json::json!({ "item_id": e })),
            Some("u1"),
        )
        .await;
    let token = created.body["share_id"].as_str().unwrap().to_string();

    let resolved = app
        .request("GET", &format!("/api/shares/{token}"), None, None)
        .await;
    assert_eq!(resolved.status, StatusCode::OK);
    let contents = resolved.body["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0]["id"], f2);
    // Visibility is inherited from the shared folder, not per child.
    assert_eq!(contents[0]["is_public"], false);
}
