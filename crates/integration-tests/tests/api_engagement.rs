//! Likes and comments over the in-process router.

use axum::http::StatusCode;
use integration_tests::{login, request, world};
use serde_json::json;

#[tokio::test]
async fn toggling_twice_over_http_likes_then_unlikes() {
    let world = world().await;
    let router = world.router();
    let token = login(&router, "user@example.com", "user123").await;

    let body = json!({ "item_id": "p1", "item_type": "project" });
    let (status, first) = request(
        &router,
        "POST",
        "/api/likes/toggle",
        Some(&token),
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["message"], "Liked!");
    assert_eq!(first["data"], json!({ "liked": true, "count": 1 }));

    let (_, second) = request(
        &router,
        "POST",
        "/api/likes/toggle",
        Some(&token),
        Some(body),
    )
    .await;
    assert_eq!(second["message"], "Unliked!");
    assert_eq!(second["data"], json!({ "liked": false, "count": 0 }));
}

#[tokio::test]
async fn anonymous_toggling_is_401() {
    let world = world().await;
    let router = world.router();

    let (status, _) = request(
        &router,
        "POST",
        "/api/likes/toggle",
        None,
        Some(json!({ "item_id": "p1", "item_type": "project" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn likes_summary_is_public_and_membership_aware() {
    let world = world().await;
    let router = world.router();
    let token = login(&router, "user@example.com", "user123").await;

    request(
        &router,
        "POST",
        "/api/likes/toggle",
        Some(&token),
        Some(json!({ "item_id": "s1", "item_type": "story" })),
    )
    .await;

    // Anonymous readers see the count but no membership.
    let (status, body) = request(&router, "GET", "/api/likes/story/s1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "count": 1, "user_liked": false }));

    let (_, body) = request(&router, "GET", "/api/likes/story/s1", Some(&token), None).await;
    assert_eq!(body["data"], json!({ "count": 1, "user_liked": true }));
}

#[tokio::test]
async fn batch_likes_cover_a_page_of_items() {
    let world = world().await;
    let router = world.router();
    let token = login(&router, "user@example.com", "user123").await;

    for item in ["p1", "p2"] {
        request(
            &router,
            "POST",
            "/api/likes/toggle",
            Some(&token),
            Some(json!({ "item_id": item, "item_type": "project" })),
        )
        .await;
    }

    let (status, body) = request(
        &router,
        "POST",
        "/api/likes/batch",
        Some(&token),
        Some(json!({ "items": [
            { "id": "p1", "type": "project" },
            { "id": "p2", "type": "project" },
            { "id": "p3", "type": "project" }
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["p1"], json!({ "count": 1, "user_liked": true }));
    assert_eq!(body["data"]["p3"], json!({ "count": 0, "user_liked": false }));
}

#[tokio::test]
async fn comment_lifecycle_enforces_authorship() {
    let world = world().await;
    let router = world.router();
    let author = login(&router, "user@example.com", "user123").await;
    let admin = login(&router, "admin@naedex.com", "admin123").await;

    let (status, body) = request(
        &router,
        "POST",
        "/api/comments",
        Some(&author),
        Some(json!({ "item_id": "p1", "item_type": "project", "text": "great work" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Someone else (even an admin) cannot delete it.
    let (status, _) = request(
        &router,
        "DELETE",
        &format!("/api/comments/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = request(&router, "GET", "/api/comments/project/p1", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // The author can.
    let (status, _) = request(
        &router,
        "DELETE",
        &format!("/api/comments/{id}"),
        Some(&author),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request(&router, "GET", "/api/comments/project/p1", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn comment_likes_toggle_over_http() {
    let world = world().await;
    let router = world.router();
    let token = login(&router, "user@example.com", "user123").await;

    let (_, body) = request(
        &router,
        "POST",
        "/api/comments",
        Some(&token),
        Some(json!({ "item_id": "p1", "item_type": "project", "text": "hello" })),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = request(
        &router,
        "POST",
        &format!("/api/comments/{id}/like"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Comment liked!");
    assert_eq!(body["data"], json!({ "liked": true, "count": 1 }));
}
