//! Notification side effects: best-effort dispatch that never changes the
//! outcome of the transition that triggered it.

use domains::{ProjectStatus, ProjectSubmission};
use integration_tests::{settle, world, world_over, FailingMailer};
use services::{ModerationService, Notifier};
use std::sync::Arc;
use storage_adapters::MockStore;

fn submission() -> ProjectSubmission {
    ProjectSubmission {
        title: "Lighthouse".into(),
        description: "Shines".into(),
        author: "A".into(),
        author_email: "a@x.com".into(),
        technologies: vec![],
        github_url: None,
        live_url: None,
        image_url: Some("http://i/1.png".into()),
    }
}

#[tokio::test]
async fn approval_email_goes_to_the_author() {
    let world = world().await;
    let project = world.state.moderation.submit(submission()).await.unwrap();
    world.state.moderation.approve(project.id).await.unwrap();
    settle().await;

    assert_eq!(world.mailer.sent_count(), 1);
    assert_eq!(
        world.mailer.subjects(),
        vec!["🎉 Your project \"Lighthouse\" has been approved!".to_string()]
    );
}

#[tokio::test]
async fn mail_failure_never_fails_the_approval() {
    let store = Arc::new(MockStore::empty());
    let notifier = Arc::new(Notifier::new(Arc::new(FailingMailer)));
    let moderation = ModerationService::new(store.clone(), notifier.clone());
    let mut toasts = notifier.subscribe();

    let project = moderation.submit(submission()).await.unwrap();
    let approved = moderation.approve(project.id).await.unwrap();
    settle().await;

    // The status change and the toast both landed despite the dead mailer.
    assert_eq!(approved.status, ProjectStatus::Approved);
    assert_eq!(toasts.recv().await.unwrap().title, "🎉 Project Approved!");
}

#[tokio::test]
async fn toasts_reach_every_subscriber() {
    let world = world_over(Arc::new(MockStore::empty()));
    let mut first = world.notifier.subscribe();
    let mut second = world.notifier.subscribe();

    let project = world.state.moderation.submit(submission()).await.unwrap();
    world
        .state
        .moderation
        .reject(project.id, None)
        .await
        .unwrap();

    assert_eq!(first.recv().await.unwrap().title, "📝 Project Needs Updates");
    assert_eq!(second.recv().await.unwrap().title, "📝 Project Needs Updates");
}
