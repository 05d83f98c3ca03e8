//! # Core Traits (Ports)
//!
//! The contracts every backend must satisfy. The remote adapter and the
//! in-memory mock implement the identical surface, so calling code never
//! branches on which one is active — selection happens once at startup.

use crate::error::Result;
use crate::models::{
    AuthSession, Comment, ItemType, Like, NewComment, OutboundEmail, Profile, Project,
    ProjectStatus, ProjectSubmission,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence contract for the projects collection.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Inserts a new pending project and returns the stored row.
    async fn insert_project(&self, submission: ProjectSubmission) -> Result<Project>;

    async fn project(&self, id: Uuid) -> Result<Option<Project>>;

    /// Sets the status and touches `updated_at`.
    async fn set_project_status(&self, id: Uuid, status: ProjectStatus) -> Result<()>;

    /// Unconditional removal, any status.
    async fn delete_project(&self, id: Uuid) -> Result<()>;

    /// All projects, newest first.
    async fn projects(&self) -> Result<Vec<Project>>;

    /// Projects with the given status, newest first.
    async fn projects_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>>;
}

/// Persistence contract for likes, comments, and comment likes.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait EngagementStore: Send + Sync {
    async fn find_like(
        &self,
        user_email: &str,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Option<Like>>;

    async fn insert_like(
        &self,
        user_email: &str,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Like>;

    async fn delete_like(&self, id: Uuid) -> Result<()>;

    /// Exact count over the likes table; recomputed, never incremented.
    async fn count_likes(&self, item_id: &str, item_type: ItemType) -> Result<u64>;

    /// One bulk fetch of every like row touching the given items.
    async fn likes_for_items(&self, item_ids: &[String]) -> Result<Vec<Like>>;

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment>;

    /// Comments for an item in ascending creation-time order, unpaginated.
    async fn comments(&self, item_id: &str, item_type: ItemType) -> Result<Vec<Comment>>;

    /// Deletes only when `user_email` matches the author; returns whether a
    /// row was removed. The store's own row policy is the real enforcement
    /// point; this filter is the client-side half of it.
    async fn delete_comment(&self, id: Uuid, user_email: &str) -> Result<bool>;

    async fn find_comment_like(&self, comment_id: Uuid, user_email: &str)
        -> Result<Option<Uuid>>;

    async fn insert_comment_like(&self, comment_id: Uuid, user_email: &str) -> Result<()>;

    async fn delete_comment_like(&self, like_id: Uuid) -> Result<()>;

    async fn count_comment_likes(&self, comment_id: Uuid) -> Result<u64>;
}

/// Persistence contract for the profiles table.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn profile(&self, user_id: &str) -> Result<Option<Profile>>;

    async fn insert_profile(&self, profile: Profile) -> Result<()>;
}

/// Identity contract: the hosted auth service or the mock stand-in.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// Best-effort; callers log failures and carry on.
    async fn sign_out(&self, access_token: &str) -> Result<()>;
}

/// Outbound transactional mail. Implementations degrade to a logged no-op
/// when unconfigured so moderation flows are never blocked by mail setup.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: OutboundEmail) -> Result<()>;
}
