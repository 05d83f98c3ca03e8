//! Request handlers: thin orchestration between HTTP and the services.
//! Auth is a bearer token resolved through the session manager; the admin
//! gate is the single role flag, nothing finer.

use crate::error::ApiError;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use domains::{AppError, Comment, ItemType, NewComment, Project, ProjectStats, ProjectStatus,
    ProjectSubmission};
use serde::{Deserialize, Serialize};
use services::{
    CurrentUser, EngagementService, ItemEngagement, LikeToggle, ModerationService, Session,
    SessionManager, SignupOutcome,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Everything the handlers need, assembled once in the binary.
#[derive(Clone)]
pub struct AppState {
    pub moderation: Arc<ModerationService>,
    pub engagement: Arc<EngagementService>,
    pub sessions: Arc<SessionManager>,
}

#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        message: message.into(),
        data: Some(data),
    })
}

fn ok_empty(message: impl Into<String>) -> Json<Envelope<()>> {
    Json(Envelope {
        success: true,
        message: message.into(),
        data: None,
    })
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn require_user(state: &AppState, headers: &HeaderMap) -> Result<CurrentUser, ApiError> {
    bearer(headers)
        .and_then(|token| state.sessions.current(token))
        .ok_or_else(|| AppError::Unauthorized("sign in required".into()).into())
}

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<CurrentUser, ApiError> {
    let user = require_user(state, headers)?;
    if user.is_admin() {
        Ok(user)
    } else {
        Err(ApiError::Forbidden)
    }
}

fn maybe_user(state: &AppState, headers: &HeaderMap) -> Option<CurrentUser> {
    bearer(headers).and_then(|token| state.sessions.current(token))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ── Projects ────────────────────────────────────────────────────────────────

pub async fn list_approved(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Project>>>, ApiError> {
    Ok(ok("Approved projects", state.moderation.approved().await?))
}

pub async fn submit(
    State(state): State<AppState>,
    Json(submission): Json<ProjectSubmission>,
) -> Result<(StatusCode, Json<Envelope<Project>>), ApiError> {
    let project = state.moderation.submit(submission).await?;
    Ok((
        StatusCode::CREATED,
        ok(
            "Project submitted successfully! It will be reviewed by our team.",
            project,
        ),
    ))
}

pub async fn list_all(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Envelope<Vec<Project>>>, ApiError> {
    require_admin(&state, &headers)?;
    Ok(ok("All projects", state.moderation.all().await?))
}

pub async fn list_by_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(status): Path<String>,
) -> Result<Json<Envelope<Vec<Project>>>, ApiError> {
    require_admin(&state, &headers)?;
    let status: ProjectStatus = status.parse()?;
    Ok(ok(
        format!("Projects with status {status}"),
        state.moderation.by_status(status).await?,
    ))
}

pub async fn project_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Envelope<ProjectStats>>, ApiError> {
    require_admin(&state, &headers)?;
    Ok(ok("Project statistics", state.moderation.stats().await?))
}

pub async fn approve(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Project>>, ApiError> {
    require_admin(&state, &headers)?;
    let project = state.moderation.approve(id).await?;
    Ok(ok("Project approved successfully!", project))
}

#[derive(Deserialize, Default)]
pub struct RejectBody {
    pub feedback: Option<String>,
}

pub async fn reject(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    body: Option<Json<RejectBody>>,
) -> Result<Json<Envelope<Project>>, ApiError> {
    require_admin(&state, &headers)?;
    let feedback = body.as_ref().and_then(|b| b.feedback.as_deref());
    let project = state.moderation.reject(id, feedback).await?;
    Ok(ok("Project rejected", project))
}

pub async fn remove_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    require_admin(&state, &headers)?;
    state.moderation.delete(id).await?;
    Ok(ok_empty("Project deleted successfully"))
}

// ── Likes ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ToggleBody {
    pub item_id: String,
    pub item_type: ItemType,
}

pub async fn toggle_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ToggleBody>,
) -> Result<Json<Envelope<LikeToggle>>, ApiError> {
    let user = require_user(&state, &headers)?;
    let toggle = state
        .engagement
        .toggle_like(&user.email, &body.item_id, body.item_type)
        .await?;
    let message = if toggle.liked { "Liked!" } else { "Unliked!" };
    Ok(ok(message, toggle))
}

pub async fn likes_summary(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((item_type, item_id)): Path<(String, String)>,
) -> Result<Json<Envelope<ItemEngagement>>, ApiError> {
    let item_type: ItemType = item_type.parse()?;
    let count = state.engagement.likes_count(&item_id, item_type).await?;
    let user_liked = match maybe_user(&state, &headers) {
        Some(user) => {
            state
                .engagement
                .has_user_liked(&user.email, &item_id, item_type)
                .await?
        }
        None => false,
    };
    Ok(ok("Likes", ItemEngagement { count, user_liked }))
}

#[derive(Deserialize)]
pub struct BatchBody {
    pub items: Vec<BatchItem>,
}

#[derive(Deserialize)]
pub struct BatchItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
}

pub async fn likes_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<BatchBody>,
) -> Result<Json<Envelope<HashMap<String, ItemEngagement>>>, ApiError> {
    let user_email = maybe_user(&state, &headers)
        .map(|user| user.email)
        .unwrap_or_default();
    let item_ids: Vec<String> = body.items.into_iter().map(|item| item.id).collect();
    let engagement = state
        .engagement
        .likes_for_items(&user_email, &item_ids)
        .await?;
    Ok(ok("Likes for items", engagement))
}

// ── Comments ────────────────────────────────────────────────────────────────

pub async fn list_comments(
    State(state): State<AppState>,
    Path((item_type, item_id)): Path<(String, String)>,
) -> Result<Json<Envelope<Vec<Comment>>>, ApiError> {
    let item_type: ItemType = item_type.parse()?;
    Ok(ok(
        "Comments",
        state.engagement.comments(&item_id, item_type).await?,
    ))
}

#[derive(Deserialize)]
pub struct CommentBody {
    pub item_id: String,
    pub item_type: ItemType,
    pub text: String,
}

pub async fn add_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CommentBody>,
) -> Result<(StatusCode, Json<Envelope<Comment>>), ApiError> {
    let user = require_user(&state, &headers)?;
    let comment = state
        .engagement
        .add_comment(NewComment {
            user_email: user.email,
            user_name: user.name,
            item_id: body.item_id,
            item_type: body.item_type,
            text: body.text,
        })
        .await?;
    Ok((StatusCode::CREATED, ok("Comment added successfully", comment)))
}

pub async fn remove_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let user = require_user(&state, &headers)?;
    state.engagement.delete_comment(id, &user.email).await?;
    Ok(ok_empty("Comment deleted successfully"))
}

pub async fn toggle_comment_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<LikeToggle>>, ApiError> {
    let user = require_user(&state, &headers)?;
    let toggle = state
        .engagement
        .toggle_comment_like(id, &user.email)
        .await?;
    let message = if toggle.liked {
        "Comment liked!"
    } else {
        "Comment unliked!"
    };
    Ok(ok(message, toggle))
}

// ── Auth ────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<Envelope<Session>>, ApiError> {
    let session = state.sessions.login(&body.email, &body.password).await?;
    Ok(ok("Login successful", session))
}

#[derive(Deserialize)]
pub struct SignupBody {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupBody>,
) -> Result<(StatusCode, Json<Envelope<SignupOutcome>>), ApiError> {
    let outcome = state
        .sessions
        .signup(&body.email, &body.password, &body.name)
        .await?;
    let message = outcome
        .warning
        .clone()
        .unwrap_or_else(|| "Account created!".to_string());
    Ok((StatusCode::CREATED, ok(message, outcome)))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Envelope<()>>, ApiError> {
    if let Some(token) = bearer(&headers) {
        state.sessions.logout(token).await;
    }
    Ok(ok_empty("Signed out"))
}

pub async fn session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Envelope<CurrentUser>>, ApiError> {
    let user = require_user(&state, &headers)?;
    Ok(ok("Session active", user))
}

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Envelope<CurrentUser>>, ApiError> {
    let token =
        bearer(&headers).ok_or_else(|| AppError::Unauthorized("sign in required".to_string()))?;
    let user = state.sessions.refresh(token).await?;
    Ok(ok("Profile refreshed", user))
}
