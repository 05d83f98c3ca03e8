//! Session flows against the mock identity provider and in-memory profiles.

use auth_adapters::MockAuth;
use domains::{AppError, AuthProvider, Profile, ProfileStore, Role};
use integration_tests::{settle, world};
use services::SessionManager;
use std::sync::Arc;

#[tokio::test]
async fn demo_admin_login_resolves_the_admin_role() {
    let world = world().await;
    let session = world
        .state
        .sessions
        .login("admin@naedex.com", "admin123")
        .await
        .unwrap();

    assert_eq!(session.user.role, Role::Admin);
    assert!(world.state.sessions.is_admin(&session.token));
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let world = world().await;
    let err = world
        .state
        .sessions
        .login("admin@naedex.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn signup_creates_a_profile_and_a_live_session() {
    let world = world().await;
    let outcome = world
        .state
        .sessions
        .signup("mara.lin@example.com", "pw123", "")
        .await
        .unwrap();

    assert!(outcome.warning.is_none());
    // Name fell back to the email local-part.
    assert_eq!(outcome.session.user.name, "Mara Lin");

    let profile = world
        .store
        .profile(&outcome.session.user.id)
        .await
        .unwrap()
        .expect("profile row should exist");
    assert_eq!(profile.role, Role::User);
}

#[tokio::test]
async fn login_without_a_profile_row_falls_back_and_backfills() {
    let world = world().await;
    // An account that exists at the identity provider with no profile row.
    let auth = Arc::new(MockAuth::default());
    auth.sign_up("ghost@example.com", "pw").await.unwrap();
    let manager = SessionManager::new(auth, world.store.clone());

    let session = manager.login("ghost@example.com", "pw").await.unwrap();
    assert_eq!(session.user.role, Role::User);
    assert_eq!(session.user.name, "Ghost");

    // The missing row is backfilled in the background.
    settle().await;
    let profile = world.store.profile(&session.user.id).await.unwrap();
    assert_eq!(profile.expect("backfilled profile").email, "ghost@example.com");
}

#[tokio::test]
async fn refresh_picks_up_an_out_of_band_role_change() {
    let world = world().await;
    let session = world
        .state
        .sessions
        .login("user@example.com", "user123")
        .await
        .unwrap();
    assert!(!session.user.is_admin());

    // An administrative action on the store promotes the user.
    world
        .store
        .insert_profile(Profile {
            id: "2".into(),
            email: "user@example.com".into(),
            name: "Regular User".into(),
            role: Role::Admin,
        })
        .await
        .unwrap();

    let refreshed = world.state.sessions.refresh(&session.token).await.unwrap();
    assert!(refreshed.is_admin());
    assert!(world.state.sessions.is_admin(&session.token));
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let world = world().await;
    let session = world
        .state
        .sessions
        .login("user@example.com", "user123")
        .await
        .unwrap();
    assert!(world.state.sessions.current(&session.token).is_some());

    world.state.sessions.logout(&session.token).await;
    assert!(world.state.sessions.current(&session.token).is_none());
}
