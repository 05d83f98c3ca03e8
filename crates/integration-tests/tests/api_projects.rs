//! The project endpoints over the in-process router: submission, the
//! moderation flow, and the admin gate.

use axum::http::StatusCode;
use integration_tests::{login, request, world};
use serde_json::json;

fn submission_body() -> serde_json::Value {
    json!({
        "title": "X",
        "description": "Y",
        "author": "A",
        "author_email": "a@x.com",
        "technologies": ["Rust"],
        "image_url": "http://i/1.png"
    })
}

#[tokio::test]
async fn submit_then_moderate_through_the_api() {
    let world = world().await;
    let router = world.router();
    let admin = login(&router, "admin@naedex.com", "admin123").await;

    let (status, body) =
        request(&router, "POST", "/api/projects", None, Some(submission_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Not approved yet, so the public list is empty.
    let (_, body) = request(&router, "GET", "/api/projects", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let (status, body) = request(
        &router,
        "POST",
        &format!("/api/projects/{id}/approve"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Project approved successfully!");

    let (_, body) = request(&router, "GET", "/api/projects", None, None).await;
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "X");
    assert_eq!(listed[0]["status"], "approved");

    let (_, body) =
        request(&router, "GET", "/api/projects/stats", Some(&admin), None).await;
    assert_eq!(body["data"], json!({ "total": 1, "pending": 0, "approved": 1, "rejected": 0 }));
}

#[tokio::test]
async fn invalid_submissions_are_rejected_inline() {
    let world = world().await;
    let router = world.router();

    let mut body = submission_body();
    body["image_url"] = json!("");
    let (status, body) = request(&router, "POST", "/api/projects", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("project image"));
}

#[tokio::test]
async fn moderation_endpoints_are_admin_gated() {
    let world = world().await;
    let router = world.router();

    // Anonymous: 401.
    let (status, _) = request(&router, "GET", "/api/projects/all", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Signed in, not an admin: 403.
    let token = login(&router, "user@example.com", "user123").await;
    let (status, _) = request(&router, "GET", "/api/projects/all", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = request(
        &router,
        "DELETE",
        &format!("/api/projects/{}", uuid::Uuid::new_v4()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn rejection_carries_optional_feedback() {
    let world = world().await;
    let router = world.router();
    let admin = login(&router, "admin@naedex.com", "admin123").await;

    let (_, body) =
        request(&router, "POST", "/api/projects", None, Some(submission_body())).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = request(
        &router,
        "POST",
        &format!("/api/projects/{id}/reject"),
        Some(&admin),
        Some(json!({ "feedback": "needs a live demo" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Project rejected");
    assert_eq!(body["data"]["status"], "rejected");

    // Feedback is not persisted on the project row.
    let (_, body) = request(
        &router,
        "GET",
        "/api/projects/status/rejected",
        Some(&admin),
        None,
    )
    .await;
    let row = &body["data"].as_array().unwrap()[0];
    assert!(row.get("feedback").is_none());
}

#[tokio::test]
async fn approving_a_missing_project_is_404() {
    let world = world().await;
    let router = world.router();
    let admin = login(&router, "admin@naedex.com", "admin123").await;

    let (status, body) = request(
        &router,
        "POST",
        &format!("/api/projects/{}/approve", uuid::Uuid::new_v4()),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}
