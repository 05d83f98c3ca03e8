//! Shared fixtures for the scenario tests: a fully assembled application
//! over the in-memory backend, a capturing mailer, and small HTTP helpers
//! for driving the router in-process.

use api_adapters::AppState;
use async_trait::async_trait;
use auth_adapters::MockAuth;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use domains::{Mailer, OutboundEmail, Profile, ProfileStore, Result, Role};
use services::{EngagementService, ModerationService, Notifier, SessionManager};
use std::sync::{Arc, Mutex};
use storage_adapters::MockStore;
use tower::ServiceExt;

/// Records every email handed to it.
#[derive(Default)]
pub struct CaptureMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl Mailer for CaptureMailer {
    async fn send(&self, message: OutboundEmail) -> Result<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

impl CaptureMailer {
    pub fn subjects(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|email| email.subject.clone())
            .collect()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

/// Always fails, for exercising the swallow-and-log path.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _message: OutboundEmail) -> Result<()> {
        Err(domains::AppError::Notification("mail service down".into()))
    }
}

pub struct World {
    pub state: AppState,
    pub notifier: Arc<Notifier>,
    pub mailer: Arc<CaptureMailer>,
    pub store: Arc<MockStore>,
}

impl World {
    pub fn router(&self) -> Router {
        api_adapters::router(self.state.clone())
    }
}

/// An application over an empty store, with the demo auth accounts'
/// profiles present so admin sessions resolve.
pub async fn world() -> World {
    let store = Arc::new(MockStore::empty());
    store
        .insert_profile(Profile {
            id: "1".into(),
            email: "admin@naedex.com".into(),
            name: "Admin User".into(),
            role: Role::Admin,
        })
        .await
        .unwrap();
    store
        .insert_profile(Profile {
            id: "2".into(),
            email: "user@example.com".into(),
            name: "Regular User".into(),
            role: Role::User,
        })
        .await
        .unwrap();
    world_over(store)
}

pub fn world_over(store: Arc<MockStore>) -> World {
    let mailer = Arc::new(CaptureMailer::default());
    let notifier = Arc::new(Notifier::new(mailer.clone()));
    let state = AppState {
        moderation: Arc::new(ModerationService::new(store.clone(), notifier.clone())),
        engagement: Arc::new(EngagementService::new(store.clone())),
        sessions: Arc::new(SessionManager::new(
            Arc::new(MockAuth::default()),
            store.clone(),
        )),
    };
    World {
        state,
        notifier,
        mailer,
        store,
    }
}

/// Lets spawned background tasks (mail dispatch, profile creation) run.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Drives one request through the router and decodes the JSON body.
pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Logs in through the API and returns the bearer token.
pub async fn login(router: &Router, email: &str, password: &str) -> String {
    let (status, body) = request(
        router,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}
