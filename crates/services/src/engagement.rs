//! # Social Engagement Layer
//!
//! Toggle-style likes on projects/stories, threaded comments, and likes on
//! comments. Counts are always recomputed with a full count query rather
//! than incremented, so they cannot drift.

use domains::{AppError, Comment, EngagementStore, ItemType, NewComment, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Result of a like toggle: the new membership state and the fresh count.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeToggle {
    pub liked: bool,
    pub count: u64,
}

/// Per-item engagement summary for bulk page loads.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ItemEngagement {
    pub count: u64,
    pub user_liked: bool,
}

pub struct EngagementService {
    store: Arc<dyn EngagementStore>,
}

impl EngagementService {
    pub fn new(store: Arc<dyn EngagementStore>) -> Self {
        Self { store }
    }

    /// Idempotent flip of the (user, item) like membership.
    ///
    /// The existence check and the insert/delete are two store calls, not
    /// one atomic flip; two rapid toggles from the same user can interleave.
    /// The store's unique (user, item, type) constraint is the backstop.
    pub async fn toggle_like(
        &self,
        user_email: &str,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<LikeToggle> {
        let liked = match self.store.find_like(user_email, item_id, item_type).await? {
            Some(existing) => {
                self.store.delete_like(existing.id).await?;
                false
            }
            None => {
                self.store.insert_like(user_email, item_id, item_type).await?;
                true
            }
        };
        let count = self.store.count_likes(item_id, item_type).await?;
        debug!(%item_id, %item_type, liked, count, "like toggled");
        Ok(LikeToggle { liked, count })
    }

    pub async fn has_user_liked(
        &self,
        user_email: &str,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<bool> {
        Ok(self
            .store
            .find_like(user_email, item_id, item_type)
            .await?
            .is_some())
    }

    pub async fn likes_count(&self, item_id: &str, item_type: ItemType) -> Result<u64> {
        self.store.count_likes(item_id, item_type).await
    }

    /// Engagement for a whole page of items in one row fetch, folded
    /// per item. `user_email` may be empty for anonymous visitors.
    pub async fn likes_for_items(
        &self,
        user_email: &str,
        item_ids: &[String],
    ) -> Result<HashMap<String, ItemEngagement>> {
        let likes = self.store.likes_for_items(item_ids).await?;
        let mut result: HashMap<String, ItemEngagement> = item_ids
            .iter()
            .map(|id| {
                (
                    id.clone(),
                    ItemEngagement {
                        count: 0,
                        user_liked: false,
                    },
                )
            })
            .collect();
        for like in likes {
            if let Some(entry) = result.get_mut(&like.item_id) {
                entry.count += 1;
                if like.user_email == user_email {
                    entry.user_liked = true;
                }
            }
        }
        Ok(result)
    }

    pub async fn add_comment(&self, comment: NewComment) -> Result<Comment> {
        if comment.text.trim().is_empty() {
            return Err(AppError::Validation("comment text is empty".into()));
        }
        self.store.insert_comment(comment).await
    }

    /// Comments in ascending creation-time order, unpaginated.
    pub async fn comments(&self, item_id: &str, item_type: ItemType) -> Result<Vec<Comment>> {
        let mut comments = self.store.comments(item_id, item_type).await?;
        for comment in &mut comments {
            comment.likes_count = Some(self.store.count_comment_likes(comment.id).await?);
        }
        Ok(comments)
    }

    /// Author-only deletion via a delete filtered on the author email.
    /// A filtered miss cannot tell "missing" from "not yours", so both
    /// report the same failure.
    pub async fn delete_comment(&self, id: Uuid, user_email: &str) -> Result<()> {
        if self.store.delete_comment(id, user_email).await? {
            Ok(())
        } else {
            Err(AppError::Unauthorized(
                "comment not found or not yours to delete".into(),
            ))
        }
    }

    /// Same toggle contract as item likes, scoped to a comment.
    pub async fn toggle_comment_like(
        &self,
        comment_id: Uuid,
        user_email: &str,
    ) -> Result<LikeToggle> {
        let liked = match self.store.find_comment_like(comment_id, user_email).await? {
            Some(like_id) => {
                self.store.delete_comment_like(like_id).await?;
                false
            }
            None => {
                self.store.insert_comment_like(comment_id, user_email).await?;
                true
            }
        };
        let count = self.store.count_comment_likes(comment_id).await?;
        Ok(LikeToggle { liked, count })
    }
}
