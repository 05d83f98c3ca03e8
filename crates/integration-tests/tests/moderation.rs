//! The moderation lifecycle end to end over the in-memory backend.

use domains::{AppError, ProjectStatus, ProjectSubmission};
use integration_tests::{settle, world};

fn submission() -> ProjectSubmission {
    ProjectSubmission {
        title: "X".into(),
        description: "Y".into(),
        author: "A".into(),
        author_email: "a@x.com".into(),
        technologies: vec!["Rust".into()],
        github_url: None,
        live_url: None,
        image_url: Some("http://i/1.png".into()),
    }
}

#[tokio::test]
async fn submit_then_list_shows_one_pending_project() {
    let world = world().await;
    world.state.moderation.submit(submission()).await.unwrap();

    let all = world.state.moderation.all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "X");
    assert_eq!(all[0].status, ProjectStatus::Pending);
}

#[tokio::test]
async fn approve_updates_status_fires_toast_and_stats_reflect_it() {
    let world = world().await;
    let mut toasts = world.notifier.subscribe();

    let project = world.state.moderation.submit(submission()).await.unwrap();
    let approved = world.state.moderation.approve(project.id).await.unwrap();
    assert_eq!(approved.status, ProjectStatus::Approved);

    let toast = toasts.recv().await.unwrap();
    assert_eq!(toast.title, "🎉 Project Approved!");

    let stats = world.state.moderation.stats().await.unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.approved, 1);
    assert_eq!(stats.rejected, 0);
}

#[tokio::test]
async fn double_approve_keeps_status_but_notifies_twice() {
    let world = world().await;
    let project = world.state.moderation.submit(submission()).await.unwrap();

    world.state.moderation.approve(project.id).await.unwrap();
    world.state.moderation.approve(project.id).await.unwrap();
    settle().await;

    let stored = world
        .state
        .moderation
        .all()
        .await
        .unwrap()
        .into_iter()
        .next()
        .unwrap();
    assert_eq!(stored.status, ProjectStatus::Approved);
    assert_eq!(world.mailer.sent_count(), 2);
    assert!(world
        .mailer
        .subjects()
        .iter()
        .all(|subject| subject == "🎉 Your project \"X\" has been approved!"));
}

#[tokio::test]
async fn rejection_email_differs_from_approval() {
    let world = world().await;
    let project = world.state.moderation.submit(submission()).await.unwrap();

    world
        .state
        .moderation
        .reject(project.id, Some("needs screenshots"))
        .await
        .unwrap();
    settle().await;

    assert_eq!(
        world.mailer.subjects(),
        vec!["📝 Your project \"X\" needs updates".to_string()]
    );
}

#[tokio::test]
async fn transitions_on_unknown_ids_are_not_found() {
    let world = world().await;
    let missing = uuid::Uuid::new_v4();

    let err = world.state.moderation.approve(missing).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("project", _)));
    let err = world
        .state
        .moderation
        .reject(missing, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("project", _)));
}

#[tokio::test]
async fn delete_removes_projects_in_any_status() {
    let world = world().await;
    let pending = world.state.moderation.submit(submission()).await.unwrap();
    let mut second = submission();
    second.title = "Z".into();
    let approved = world.state.moderation.submit(second).await.unwrap();
    world.state.moderation.approve(approved.id).await.unwrap();

    world.state.moderation.delete(pending.id).await.unwrap();
    world.state.moderation.delete(approved.id).await.unwrap();

    assert!(world.state.moderation.all().await.unwrap().is_empty());
}
