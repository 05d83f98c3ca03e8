//! HTTP client for the hosted relational service's REST surface.
//!
//! Tables are addressed as `{base}/rest/v1/{table}` with `eq.`/`in.` query
//! operators, writes use `Prefer: return=representation`, and exact counts
//! come from `HEAD` + `Prefer: count=exact` via the `Content-Range` header.
//! Failures surface as `AppError::Backend` — there is no hidden retry and
//! no fallback to the mock here.

use async_trait::async_trait;
use chrono::Utc;
use configs::StoreConfig;
use domains::{
    AppError, Comment, EngagementStore, ItemType, Like, NewComment, Profile, ProfileStore,
    Project, ProjectStatus, ProjectStore, ProjectSubmission, Result,
};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub struct RemoteStore {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl RemoteStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|err| AppError::Backend(format!("http client setup failed: {err}")))?;
        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    fn rest(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = self
            .authed(builder)
            .send()
            .await
            .map_err(|err| AppError::Backend(format!("store request failed: {err}")))?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::Backend(format!(
                "store returned {status}: {body}"
            )))
        }
    }

    async fn rows<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Vec<T>> {
        self.send(builder)
            .await?
            .json()
            .await
            .map_err(|err| AppError::Backend(format!("malformed store response: {err}")))
    }

    async fn first<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Option<T>> {
        Ok(self.rows(builder).await?.into_iter().next())
    }

    /// One inserted row back from a `return=representation` write.
    async fn inserted<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        self.first(builder.header("Prefer", "return=representation"))
            .await?
            .ok_or_else(|| AppError::Backend("store returned no row for the insert".into()))
    }

    async fn count(&self, table: &str, query: &[(&str, String)]) -> Result<u64> {
        let response = self
            .send(
                self.http
                    .head(self.rest(table))
                    .query(query)
                    .header("Prefer", "count=exact"),
            )
            .await?;
        response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| AppError::Backend("missing or malformed content-range".into()))
    }
}

/// `"0-24/25"` or `"*/0"` → `25` / `0`.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.parse().ok()
}

fn eq(value: impl ToString) -> String {
    format!("eq.{}", value.to_string())
}

#[derive(Serialize)]
struct InsertProjectRow<'a> {
    title: &'a str,
    description: &'a str,
    author: &'a str,
    author_email: &'a str,
    technologies: &'a [String],
    github_url: Option<&'a str>,
    live_url: Option<&'a str>,
    image_url: Option<&'a str>,
    status: ProjectStatus,
}

#[derive(Deserialize)]
struct IdRow {
    id: Uuid,
}

#[async_trait]
impl ProjectStore for RemoteStore {
    async fn insert_project(&self, submission: ProjectSubmission) -> Result<Project> {
        let row = InsertProjectRow {
            title: &submission.title,
            description: &submission.description,
            author: &submission.author,
            author_email: &submission.author_email,
            technologies: &submission.technologies,
            github_url: submission.github_url.as_deref(),
            live_url: submission.live_url.as_deref(),
            image_url: submission.image_url.as_deref(),
            status: ProjectStatus::Pending,
        };
        self.inserted(self.http.post(self.rest("projects")).json(&row))
            .await
    }

    async fn project(&self, id: Uuid) -> Result<Option<Project>> {
        self.first(
            self.http
                .get(self.rest("projects"))
                .query(&[("select", "*".to_string()), ("id", eq(id))]),
        )
        .await
    }

    async fn set_project_status(&self, id: Uuid, status: ProjectStatus) -> Result<()> {
        self.send(
            self.http
                .patch(self.rest("projects"))
                .query(&[("id", eq(id))])
                .json(&serde_json::json!({
                    "status": status,
                    "updated_at": Utc::now(),
                })),
        )
        .await?;
        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> Result<()> {
        self.send(
            self.http
                .delete(self.rest("projects"))
                .query(&[("id", eq(id))]),
        )
        .await?;
        Ok(())
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        self.rows(self.http.get(self.rest("projects")).query(&[
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ]))
        .await
    }

    async fn projects_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>> {
        self.rows(self.http.get(self.rest("projects")).query(&[
            ("select", "*".to_string()),
            ("status", eq(status)),
            ("order", "created_at.desc".to_string()),
        ]))
        .await
    }
}

#[async_trait]
impl EngagementStore for RemoteStore {
    async fn find_like(
        &self,
        user_email: &str,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Option<Like>> {
        self.first(self.http.get(self.rest("likes")).query(&[
            ("select", "*".to_string()),
            ("user_email", eq(user_email)),
            ("item_id", eq(item_id)),
            ("item_type", eq(item_type)),
        ]))
        .await
    }

    async fn insert_like(
        &self,
        user_email: &str,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Like> {
        self.inserted(self.http.post(self.rest("likes")).json(&serde_json::json!({
            "user_email": user_email,
            "item_id": item_id,
            "item_type": item_type,
        })))
        .await
    }

    async fn delete_like(&self, id: Uuid) -> Result<()> {
        self.send(self.http.delete(self.rest("likes")).query(&[("id", eq(id))]))
            .await?;
        Ok(())
    }

    async fn count_likes(&self, item_id: &str, item_type: ItemType) -> Result<u64> {
        self.count(
            "likes",
            &[("item_id", eq(item_id)), ("item_type", eq(item_type))],
        )
        .await
    }

    async fn likes_for_items(&self, item_ids: &[String]) -> Result<Vec<Like>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.rows(self.http.get(self.rest("likes")).query(&[
            ("select", "*".to_string()),
            ("item_id", format!("in.({})", item_ids.join(","))),
        ]))
        .await
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment> {
        self.inserted(self.http.post(self.rest("comments")).json(&comment))
            .await
    }

    async fn comments(&self, item_id: &str, item_type: ItemType) -> Result<Vec<Comment>> {
        self.rows(self.http.get(self.rest("comments")).query(&[
            ("select", "*".to_string()),
            ("item_id", eq(item_id)),
            ("item_type", eq(item_type)),
            ("order", "created_at.asc".to_string()),
        ]))
        .await
    }

    async fn delete_comment(&self, id: Uuid, user_email: &str) -> Result<bool> {
        // Filtered delete; the returned representation tells us whether a
        // row actually matched both the id and the author.
        let removed: Vec<serde_json::Value> = self
            .rows(
                self.http
                    .delete(self.rest("comments"))
                    .query(&[("id", eq(id)), ("user_email", eq(user_email))])
                    .header("Prefer", "return=representation"),
            )
            .await?;
        Ok(!removed.is_empty())
    }

    async fn find_comment_like(
        &self,
        comment_id: Uuid,
        user_email: &str,
    ) -> Result<Option<Uuid>> {
        Ok(self
            .first::<IdRow>(self.http.get(self.rest("comment_likes")).query(&[
                ("select", "id".to_string()),
                ("comment_id", eq(comment_id)),
                ("user_email", eq(user_email)),
            ]))
            .await?
            .map(|row| row.id))
    }

    async fn insert_comment_like(&self, comment_id: Uuid, user_email: &str) -> Result<()> {
        self.send(
            self.http
                .post(self.rest("comment_likes"))
                .json(&serde_json::json!({
                    "comment_id": comment_id,
                    "user_email": user_email,
                })),
        )
        .await?;
        Ok(())
    }

    async fn delete_comment_like(&self, like_id: Uuid) -> Result<()> {
        self.send(
            self.http
                .delete(self.rest("comment_likes"))
                .query(&[("id", eq(like_id))]),
        )
        .await?;
        Ok(())
    }

    async fn count_comment_likes(&self, comment_id: Uuid) -> Result<u64> {
        self.count("comment_likes", &[("comment_id", eq(comment_id))])
            .await
    }
}

#[async_trait]
impl ProfileStore for RemoteStore {
    async fn profile(&self, user_id: &str) -> Result<Option<Profile>> {
        self.first(
            self.http
                .get(self.rest("profiles"))
                .query(&[("select", "*".to_string()), ("id", eq(user_id))]),
        )
        .await
    }

    async fn insert_profile(&self, profile: Profile) -> Result<()> {
        self.send(self.http.post(self.rest("profiles")).json(&profile))
            .await?;
        Ok(())
    }
}
