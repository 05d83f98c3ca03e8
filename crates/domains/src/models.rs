//! # Domain Models
//!
//! These structs mirror the rows of the hosted relational store
//! (`projects`, `likes`, `comments`, `comment_likes`, `profiles`), so the
//! serde representations double as the wire format of the remote adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Moderation lifecycle of a submitted project.
///
/// `Pending` is the only entry state; `Approved` and `Rejected` are
/// terminal (resubmission means a brand-new project row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Pending,
    Approved,
    Rejected,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = crate::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(crate::AppError::Validation(format!(
                "unknown project status: {other}"
            ))),
        }
    }
}

/// What a like or comment is attached to. Projects live in our store;
/// stories are externally identified, hence string item ids everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Project,
    Story,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Story => "story",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = crate::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(Self::Project),
            "story" => Ok(Self::Story),
            other => Err(crate::AppError::Validation(format!(
                "unknown item type: {other}"
            ))),
        }
    }
}

/// A community-submitted project on the showcase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author: String,
    pub author_email: String,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Derived from the likes table on read; never authoritative here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes_count: Option<u64>,
}

/// The fields a submitter provides. Validation happens in the moderation
/// service before any write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSubmission {
    pub title: String,
    pub description: String,
    pub author: String,
    pub author_email: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Counts over the full projects collection, computed by scanning it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

/// Existence of a row = "liked". At most one per (user, item, type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: Uuid,
    pub user_email: String,
    pub item_id: String,
    pub item_type: ItemType,
    pub created_at: DateTime<Utc>,
}

/// A comment under a project or story. Deleted only by its author,
/// never edited in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_email: String,
    pub user_name: String,
    pub item_id: String,
    pub item_type: ItemType,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes_count: Option<u64>,
}

/// Input for a new comment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub user_email: String,
    pub user_name: String,
    pub item_id: String,
    pub item_type: ItemType,
    pub text: String,
}

/// Role carried on a profile row. Never self-assignable; only an
/// out-of-band administrative action on the store changes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// The `profiles` row keyed by the identity provider's opaque user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

/// What the identity provider hands back on a successful sign-in/up.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

/// An email ready for the transactional-mail adapter.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            ProjectStatus::Pending,
            ProjectStatus::Approved,
            ProjectStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ProjectStatus>().unwrap(), status);
        }
        assert!("live".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn project_serializes_with_lowercase_status() {
        let project = Project {
            id: Uuid::new_v4(),
            title: "Task Management App".into(),
            description: "Drag-and-drop tasks".into(),
            author: "John Doe".into(),
            author_email: "john@example.com".into(),
            technologies: vec!["React".into(), "TypeScript".into()],
            github_url: None,
            live_url: None,
            image_url: Some("https://i/1.png".into()),
            status: ProjectStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            likes_count: None,
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["status"], "pending");
        // derived field stays off the wire until populated
        assert!(json.get("likes_count").is_none());
    }
}
