//! # Project Moderation Engine
//!
//! Owns the project lifecycle: `pending → approved` and `pending → rejected`,
//! with no transition out of a terminal state other than deletion.
//! Approval and rejection fire toast + email notifications best-effort;
//! a failed dispatch never rolls back or fails the status change.

use crate::notify::Notifier;
use domains::{
    AppError, Project, ProjectStats, ProjectStatus, ProjectStore, ProjectSubmission, Result,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct ModerationService {
    projects: Arc<dyn ProjectStore>,
    notifier: Arc<Notifier>,
}

impl ModerationService {
    pub fn new(projects: Arc<dyn ProjectStore>, notifier: Arc<Notifier>) -> Self {
        Self { projects, notifier }
    }

    /// Validates and stores a new submission as `pending`.
    /// Validation failures abort before any write reaches the store.
    pub async fn submit(&self, submission: ProjectSubmission) -> Result<Project> {
        validate(&submission)?;
        let project = self.projects.insert_project(submission).await?;
        info!(id = %project.id, title = %project.title, "project submitted for review");
        Ok(project)
    }

    /// Approves a project and notifies its author. Calling this on an
    /// already-approved project succeeds and notifies again.
    pub async fn approve(&self, id: Uuid) -> Result<Project> {
        let project = self.transition(id, ProjectStatus::Approved).await?;
        self.notifier.project_approved(&project);
        Ok(project)
    }

    /// Rejects a project. `feedback` reaches the author's email only; it is
    /// never persisted on the project row.
    pub async fn reject(&self, id: Uuid, feedback: Option<&str>) -> Result<Project> {
        let project = self.transition(id, ProjectStatus::Rejected).await?;
        self.notifier.project_rejected(&project, feedback);
        Ok(project)
    }

    async fn transition(&self, id: Uuid, status: ProjectStatus) -> Result<Project> {
        let mut project = self
            .projects
            .project(id)
            .await?
            .ok_or_else(|| AppError::not_found("project", id))?;
        self.projects.set_project_status(id, status).await?;
        info!(%id, from = %project.status, to = %status, "project status changed");
        project.status = status;
        Ok(project)
    }

    /// Unconditional removal, any status. Intent confirmation is the
    /// caller's responsibility.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.projects.delete_project(id).await?;
        info!(%id, "project deleted");
        Ok(())
    }

    /// The public showcase: approved projects, newest first.
    pub async fn approved(&self) -> Result<Vec<Project>> {
        self.projects
            .projects_by_status(ProjectStatus::Approved)
            .await
    }

    pub async fn all(&self) -> Result<Vec<Project>> {
        self.projects.projects().await
    }

    pub async fn by_status(&self, status: ProjectStatus) -> Result<Vec<Project>> {
        self.projects.projects_by_status(status).await
    }

    /// Counts computed by scanning the full collection. Fine at community
    /// scale; not meant for large collections.
    pub async fn stats(&self) -> Result<ProjectStats> {
        let mut stats = ProjectStats::default();
        for project in self.projects.projects().await? {
            stats.total += 1;
            match project.status {
                ProjectStatus::Pending => stats.pending += 1,
                ProjectStatus::Approved => stats.approved += 1,
                ProjectStatus::Rejected => stats.rejected += 1,
            }
        }
        Ok(stats)
    }
}

fn validate(submission: &ProjectSubmission) -> Result<()> {
    let mut missing = Vec::new();
    if submission.title.trim().is_empty() {
        missing.push("title");
    }
    if submission.description.trim().is_empty() {
        missing.push("description");
    }
    if submission.author.trim().is_empty() {
        missing.push("author");
    }
    if submission.author_email.trim().is_empty() {
        missing.push("author email");
    }
    if submission
        .image_url
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .is_empty()
    {
        missing.push("project image");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}
