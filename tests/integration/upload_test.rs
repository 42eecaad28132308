//! The presigned upload flow end to end against the local provider:
//! presign, PUT the bytes, complete, download, refresh.

use http::StatusCode;

use crate::helpers::{TestApp, relative};

#[tokio::test]
async fn test_presign_put_complete_download_roundtrip() {
    let app = TestApp::new().await;

    // 1. Ask for an upload target.
    let presign = app
        .request(
            "POST",
            "/api/uploads/presign",
            Some(serde_json::json!({
                "name": "hello world.txt",
                "content_type": "text/plain",
                "size": 5,
            })),
            Some("u1"),
        )
        .await;
    assert_eq!(presign.status, StatusCode::OK);
    let upload_url = presign.body["data"]["upload_url"].as_str().unwrap();
    let object_key = presign.body["data"]["object_key"].as_str().unwrap();
    assert!(object_key.starts_with("uploads/"));
    assert!(object_key.ends_with("-hello_world.txt"));

    // 2. The browser PUTs the bytes straight to the issued URL.
    let status = app.put_bytes(&relative(upload_url), b"hello").await;
    assert_eq!(status, StatusCode::OK);

    // 3. Record the completed upload.
    let complete = app
        .request(
            "POST",
            "/api/uploads/complete",
            Some(serde_json::json!({
                "object_key": object_key,
                "name": "hello world.txt",
                "content_type": "text/plain",
                "size": 5,
            })),
            Some("u1"),
        )
        .await;
    assert_eq!(complete.status, StatusCode::OK);
    let item = &complete.body["data"];
    assert_eq!(item["kind"], "other");
    assert_eq!(item["size"], 5);
    assert_eq!(item["object_key"], object_key);
    let access_url = item["access_url"].as_str().unwrap().to_string();

    // 4. The issued access URL serves the bytes back.
    let (status, bytes) = app.get_raw(&relative(&access_url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"hello");
}

#[tokio::test]
async fn test_refresh_url_returns_fresh_working_url() {
    let app = TestApp::new().await;
    let id = app.create_file("u1", "pic.png", "image/png", None).await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{id}/refresh-url"),
            None,
            Some("u1"),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let url = response.body["url"].as_str().unwrap();
    assert!(url.contains("issued="));

    // Only the owner may refresh.
    let response = app
        .request(
            "POST",
            &format!("/api/files/{id}/refresh-url"),
            None,
            Some("u2"),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_expired_object_url_is_refused() {
    let app = TestApp::new().await;

    let presign = app
        .request(
            "POST",
            "/api/uploads/presign",
            Some(serde_json::json!({
                "name": "a.txt", "content_type": "text/plain", "size": 1,
            })),
            Some("u1"),
        )
        .await;
    let object_key = presign.body["data"]["object_key"].as_str().unwrap();

    let status = app
        .put_bytes(&format!("/objects/{object_key}?expires=1&issued=1"), b"x")
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .get_raw(&format!("/objects/{object_key}?expires=1&issued=1"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deleting_an_item_removes_its_object() {
    let app = TestApp::new().await;

    let presign = app
        .request(
            "POST",
            "/api/uploads/presign",
            Some(serde_json::json!({
                "name": "gone.txt", "content_type": "text/plain", "size": 4,
            })),
            Some("u1"),
        )
        .await;
    let upload_url = presign.body["data"]["upload_url"].as_str().unwrap();
    let object_key = presign.body["data"]["object_key"].as_str().unwrap();
    app.put_bytes(&relative(upload_url), b"gone").await;

    let complete = app
        .request(
            "POST",
            "/api/uploads/complete",
            Some(serde_json::json!({
                "object_key": object_key,
                "name": "gone.txt",
                "content_type": "text/plain",
                "size": 4,
            })),
            Some("u1"),
        )
        .await;
    let id = complete.body["data"]["id"].as_i64().unwrap();
    let access_url = complete.body["data"]["access_url"].as_str().unwrap().to_string();

    let response = app
        .request("DELETE", &format!("/api/items/{id}"), None, Some("u1"))
        .await;
    assert_eq!(response.body["data"]["deleted"], true);

    let (status, _) = app.get_raw(&relative(&access_url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_presign_requires_all_fields() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/uploads/presign",
            Some(serde_json::json!({
                "name": "x.txt", "content_type": "text/plain", "size": 0,
            })),
            Some("u1"),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_backends() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
    assert_eq!(response.body["storage_provider"], "local");
    assert_eq!(response.body["storage"], "available");
}
