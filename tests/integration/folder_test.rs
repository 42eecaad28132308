//! Folder tree behavior: creation, breadcrumbs, counts, move, delete.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_nested_folders_breadcrumbs_and_counts() {
    let app = TestApp::new().await;

    let a = app.create_folder("u1", "A", None).await;
    let b = app.create_folder("u1", "B", Some(a)).await;
    app.create_file("u1", "doc1", "text/plain", Some(b)).await;

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{b}/breadcrumbs"),
            None,
            Some("u1"),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let crumbs = response.body["data"].as_array().unwrap();
    assert_eq!(crumbs.len(), 3);
    assert_eq!(crumbs[0]["id"], "root");
    assert_eq!(crumbs[0]["name"], "My Drive");
    assert_eq!(crumbs[1]["name"], "A");
    assert_eq!(crumbs[2]["name"], "B");

    let a_item = app
        .request("GET", &format!("/api/items/{a}"), None, Some("u1"))
        .await;
    assert_eq!(a_item.body["data"]["item_count"], 1);
    let b_item = app
        .request("GET", &format!("/api/items/{b}"), None, Some("u1"))
        .await;
    assert_eq!(b_item.body["data"]["item_count"], 1);
}

#[tokio::test]
async fn test_children_are_listed_name_ascending() {
    let app = TestApp::new().await;
    let folder = app.create_folder("u1", "Docs", None).await;
    app.create_file("u1", "zeta.txt", "text/plain", Some(folder))
        .await;
    app.create_file("u1", "alpha.txt", "text/plain", Some(folder))
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{folder}/children"),
            None,
            Some("u1"),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha.txt", "zeta.txt"]);
}

#[tokio::test]
async fn test_cascade_delete_removes_whole_subtree() {
    let app = TestApp::new().await;

    let a = app.create_folder("u1", "A", None).await;
    let b = app.create_folder("u1", "B", Some(a)).await;
    let doc1 = app.create_file("u1", "doc1", "text/plain", Some(b)).await;

    let response = app
        .request("DELETE", &format!("/api/items/{a}"), None, Some("u1"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["deleted"], true);

    for id in [a, b, doc1] {
        let response = app
            .request("GET", &format!("/api/items/{id}"), None, Some("u1"))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = TestApp::new().await;
    let folder = app.create_folder("u1", "Once", None).await;

    let first = app
        .request("DELETE", &format!("/api/items/{folder}"), None, Some("u1"))
        .await;
    assert_eq!(first.body["data"]["deleted"], true);

    let second = app
        .request("DELETE", &format!("/api/items/{folder}"), None, Some("u1"))
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["data"]["deleted"], false);
}

#[tokio::test]
async fn test_move_into_own_descendant_is_rejected() {
    let app = TestApp::new().await;

    let c = app.create_folder("u1", "C", None).await;
    let d = app.create_folder("u1", "D", Some(c)).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/items/{c}/move"),
            Some(serde_json::json!({ "new_parent_id": d })),
            Some("u1"),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "CYCLE");

    // No partial state change: C is still a root item.
    let c_item = app
        .request("GET", &format!("/api/items/{c}"), None, Some("u1"))
        .await;
    assert!(c_item.body["data"]["parent_id"].is_null());
}

#[tokio::test]
async fn test_move_between_folders_updates_counts() {
    let app = TestApp::new().await;

    let src = app.create_folder("u1", "Src", None).await;
    let dst = app.create_folder("u1", "Dst", None).await;
    let file = app
        .create_file("u1", "f.txt", "text/plain", Some(src))
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/items/{file}/move"),
            Some(serde_json::json!({ "new_parent_id": dst })),
            Some("u1"),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let src_item = app
        .request("GET", &format!("/api/items/{src}"), None, Some("u1"))
        .await;
    let dst_item = app
        .request("GET", &format!("/api/items/{dst}"), None, Some("u1"))
        .await;
    assert_eq!(src_item.body["data"]["item_count"], 0);
    assert_eq!(dst_item.body["data"]["item_count"], 1);
}

#[tokio::test]
async fn test_rename_advances_modified_at() {
    let app = TestApp::new().await;
    let doc1 = app.create_file("u1", "doc1", "text/plain", None).await;

    let before = app
        .request("GET", &format!("/api/items/{doc1}"), None, Some("u1"))
        .await;
    let before_modified: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(before.body["data"]["modified_at"].clone()).unwrap();
    let before_parent = before.body["data"]["parent_id"].clone();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let response = app
        .request(
            "PUT",
            &format!("/api/items/{doc1}"),
            Some(serde_json::json!({ "name": "report.pdf" })),
            Some("u1"),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "report.pdf");
    assert_eq!(response.body["data"]["id"], doc1);
    assert_eq!(response.body["data"]["parent_id"], before_parent);
    let after_modified: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(response.body["data"]["modified_at"].clone()).unwrap();
    assert!(after_modified > before_modified);
}

#[tokio::test]
async fn test_blank_folder_name_is_rejected() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "name": "   " })),
            Some("u1"),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_owner_scoping_is_enforced() {
    let app = TestApp::new().await;
    let folder = app.create_folder("u1", "Private", None).await;

    // Another authenticated user cannot touch it.
    let response = app
        .request("GET", &format!("/api/items/{folder}"), None, Some("u2"))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // No identity at all is rejected outright.
    let response = app.request("GET", "/api/items", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
