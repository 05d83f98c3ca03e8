//! In-memory implementation of the store ports, seeded with the demo
//! showcase. Each map emulates one table of the hosted store, including
//! the unique constraints the toggle flows lean on.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use domains::{
    AppError, Comment, EngagementStore, ItemType, Like, NewComment, Profile, ProfileStore,
    Project, ProjectStatus, ProjectStore, ProjectSubmission, Result, Role,
};
use uuid::Uuid;

struct CommentLikeRow {
    comment_id: Uuid,
    user_email: String,
}

pub struct MockStore {
    projects: DashMap<Uuid, Project>,
    likes: DashMap<Uuid, Like>,
    comments: DashMap<Uuid, Comment>,
    comment_likes: DashMap<Uuid, CommentLikeRow>,
    profiles: DashMap<String, Profile>,
}

impl MockStore {
    /// A store pre-seeded with the demo projects and demo accounts.
    pub fn new() -> Self {
        let store = Self::empty();
        for (age_days, (submission, status)) in demo_projects().into_iter().enumerate() {
            let now = Utc::now();
            // Spread creation times out so "newest first" is observable.
            let created_at = now - Duration::days(age_days as i64 + 1);
            store.projects.insert(
                Uuid::new_v4(),
                materialize(submission, status, created_at),
            );
        }
        store.profiles.insert(
            "1".to_string(),
            Profile {
                id: "1".into(),
                email: "admin@naedex.com".into(),
                name: "Admin User".into(),
                role: Role::Admin,
            },
        );
        store.profiles.insert(
            "2".to_string(),
            Profile {
                id: "2".into(),
                email: "user@example.com".into(),
                name: "Regular User".into(),
                role: Role::User,
            },
        );
        store
    }

    /// A completely empty store, for tests that want a clean slate.
    pub fn empty() -> Self {
        Self {
            projects: DashMap::new(),
            likes: DashMap::new(),
            comments: DashMap::new(),
            comment_likes: DashMap::new(),
            profiles: DashMap::new(),
        }
    }

    fn sorted_projects(&self, filter: Option<ProjectStatus>) -> Vec<Project> {
        let mut projects: Vec<Project> = self
            .projects
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|project| filter.map_or(true, |status| project.status == status))
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        projects
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

fn materialize(
    submission: ProjectSubmission,
    status: ProjectStatus,
    created_at: chrono::DateTime<Utc>,
) -> Project {
    Project {
        id: Uuid::new_v4(),
        title: submission.title,
        description: submission.description,
        author: submission.author,
        author_email: submission.author_email,
        technologies: submission.technologies,
        github_url: submission.github_url,
        live_url: submission.live_url,
        image_url: submission.image_url,
        status,
        created_at,
        updated_at: created_at,
        likes_count: None,
    }
}

/// The demo showcase rows, also used by `cmd/seed` to populate a real store.
pub fn demo_projects() -> Vec<(ProjectSubmission, ProjectStatus)> {
    let rows = [
        (
            "Task Management App",
            "A modern task management application with drag-and-drop boards, \
             real-time updates, and team collaboration.",
            "John Doe",
            "john@example.com",
            &["React", "TypeScript", "Node.js", "MongoDB"][..],
            Some("https://github.com/johndoe/task-app"),
            Some("https://task-app-demo.com"),
            ProjectStatus::Approved,
        ),
        (
            "Weather Dashboard",
            "A responsive weather dashboard with real-time conditions, \
             visualizations, and forecasts.",
            "Jane Smith",
            "jane@example.com",
            &["Vue.js", "JavaScript", "Chart.js", "OpenWeather API"][..],
            Some("https://github.com/janesmith/weather-dashboard"),
            Some("https://weather-dash.com"),
            ProjectStatus::Approved,
        ),
        (
            "E-commerce Platform",
            "Full-stack e-commerce solution with payment integration, \
             inventory management, and an admin dashboard.",
            "Mike Johnson",
            "mike@example.com",
            &["Next.js", "Prisma", "PostgreSQL", "Stripe"][..],
            Some("https://github.com/mikejohnson/ecommerce"),
            None,
            ProjectStatus::Approved,
        ),
        (
            "AI Chat Application",
            "A real-time chat application with smart replies, sentiment \
             analysis, and multi-language support.",
            "Alice Johnson",
            "alice@example.com",
            &["React", "Node.js", "OpenAI API", "Socket.io"][..],
            Some("https://github.com/alice/ai-chat"),
            Some("https://ai-chat-demo.com"),
            ProjectStatus::Pending,
        ),
    ];

    rows.into_iter()
        .map(
            |(title, description, author, email, technologies, github, live, status)| {
                (
                    ProjectSubmission {
                        title: title.to_string(),
                        description: description.to_string(),
                        author: author.to_string(),
                        author_email: email.to_string(),
                        technologies: technologies.iter().map(|t| t.to_string()).collect(),
                        github_url: github.map(str::to_string),
                        live_url: live.map(str::to_string),
                        image_url: Some(format!(
                            "https://images.example.com/showcase/{}.png",
                            title.to_lowercase().replace(' ', "-")
                        )),
                    },
                    status,
                )
            },
        )
        .collect()
}

#[async_trait]
impl ProjectStore for MockStore {
    async fn insert_project(&self, submission: ProjectSubmission) -> Result<Project> {
        let project = materialize(submission, ProjectStatus::Pending, Utc::now());
        self.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn project(&self, id: Uuid) -> Result<Option<Project>> {
        Ok(self.projects.get(&id).map(|entry| entry.value().clone()))
    }

    async fn set_project_status(&self, id: Uuid, status: ProjectStatus) -> Result<()> {
        let mut entry = self
            .projects
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("project", id))?;
        entry.status = status;
        entry.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> Result<()> {
        self.projects.remove(&id);
        Ok(())
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.sorted_projects(None))
    }

    async fn projects_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>> {
        Ok(self.sorted_projects(Some(status)))
    }
}

#[async_trait]
impl EngagementStore for MockStore {
    async fn find_like(
        &self,
        user_email: &str,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Option<Like>> {
        Ok(self
            .likes
            .iter()
            .find(|entry| {
                let like = entry.value();
                like.user_email == user_email
                    && like.item_id == item_id
                    && like.item_type == item_type
            })
            .map(|entry| entry.value().clone()))
    }

    async fn insert_like(
        &self,
        user_email: &str,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Like> {
        // Emulates the unique (user, item, type) constraint of the real table.
        if self.find_like(user_email, item_id, item_type).await?.is_some() {
            return Err(AppError::Backend("duplicate like row".into()));
        }
        let like = Like {
            id: Uuid::new_v4(),
            user_email: user_email.to_string(),
            item_id: item_id.to_string(),
            item_type,
            created_at: Utc::now(),
        };
        self.likes.insert(like.id, like.clone());
        Ok(like)
    }

    async fn delete_like(&self, id: Uuid) -> Result<()> {
        self.likes.remove(&id);
        Ok(())
    }

    async fn count_likes(&self, item_id: &str, item_type: ItemType) -> Result<u64> {
        Ok(self
            .likes
            .iter()
            .filter(|entry| {
                entry.value().item_id == item_id && entry.value().item_type == item_type
            })
            .count() as u64)
    }

    async fn likes_for_items(&self, item_ids: &[String]) -> Result<Vec<Like>> {
        Ok(self
            .likes
            .iter()
            .filter(|entry| item_ids.contains(&entry.value().item_id))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment> {
        let comment = Comment {
            id: Uuid::new_v4(),
            user_email: comment.user_email,
            user_name: comment.user_name,
            item_id: comment.item_id,
            item_type: comment.item_type,
            text: comment.text,
            created_at: Utc::now(),
            likes_count: None,
        };
        self.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn comments(&self, item_id: &str, item_type: ItemType) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|entry| {
                entry.value().item_id == item_id && entry.value().item_type == item_type
            })
            .map(|entry| entry.value().clone())
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn delete_comment(&self, id: Uuid, user_email: &str) -> Result<bool> {
        let owned = self
            .comments
            .get(&id)
            .is_some_and(|entry| entry.value().user_email == user_email);
        if !owned {
            return Ok(false);
        }
        self.comments.remove(&id);
        self.comment_likes
            .retain(|_, row| row.comment_id != id);
        Ok(true)
    }

    async fn find_comment_like(
        &self,
        comment_id: Uuid,
        user_email: &str,
    ) -> Result<Option<Uuid>> {
        Ok(self
            .comment_likes
            .iter()
            .find(|entry| {
                entry.value().comment_id == comment_id && entry.value().user_email == user_email
            })
            .map(|entry| *entry.key()))
    }

    async fn insert_comment_like(&self, comment_id: Uuid, user_email: &str) -> Result<()> {
        if self.find_comment_like(comment_id, user_email).await?.is_some() {
            return Err(AppError::Backend("duplicate comment like row".into()));
        }
        self.comment_likes.insert(
            Uuid::new_v4(),
            CommentLikeRow {
                comment_id,
                user_email: user_email.to_string(),
            },
        );
        Ok(())
    }

    async fn delete_comment_like(&self, like_id: Uuid) -> Result<()> {
        self.comment_likes.remove(&like_id);
        Ok(())
    }

    async fn count_comment_likes(&self, comment_id: Uuid) -> Result<u64> {
        Ok(self
            .comment_likes
            .iter()
            .filter(|entry| entry.value().comment_id == comment_id)
            .count() as u64)
    }
}

#[async_trait]
impl ProfileStore for MockStore {
    async fn profile(&self, user_id: &str) -> Result<Option<Profile>> {
        Ok(self.profiles.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn insert_profile(&self, profile: Profile) -> Result<()> {
        self.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_store_lists_newest_first() {
        let store = MockStore::new();
        let all = store.projects().await.unwrap();
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let approved = store
            .projects_by_status(ProjectStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.len(), 3);
    }

    #[tokio::test]
    async fn duplicate_like_insert_hits_the_constraint() {
        let store = MockStore::empty();
        store
            .insert_like("u1", "p1", ItemType::Project)
            .await
            .unwrap();
        let err = store
            .insert_like("u1", "p1", ItemType::Project)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Backend(_)));
    }

    #[tokio::test]
    async fn comment_deletion_is_filtered_on_the_author() {
        let store = MockStore::empty();
        let comment = store
            .insert_comment(NewComment {
                user_email: "author@example.com".into(),
                user_name: "Author".into(),
                item_id: "p1".into(),
                item_type: ItemType::Project,
                text: "nice!".into(),
            })
            .await
            .unwrap();

        assert!(!store
            .delete_comment(comment.id, "other@example.com")
            .await
            .unwrap());
        assert_eq!(
            store.comments("p1", ItemType::Project).await.unwrap().len(),
            1
        );

        assert!(store
            .delete_comment(comment.id, "author@example.com")
            .await
            .unwrap());
        assert!(store
            .comments("p1", ItemType::Project)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn seeded_demo_profiles_cover_both_roles() {
        let store = MockStore::new();
        let admin = store.profile("1").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.email, "admin@naedex.com");
        let user = store.profile("2").await.unwrap().unwrap();
        assert_eq!(user.role, Role::User);
    }
}
