//! # Session/Identity Manager
//!
//! Owns the session state explicitly: a token → user index plus a
//! user-id → profile cache with an `invalidate` contract, instead of
//! ambient storage side effects. Profile resolution is optimistic —
//! cached reads are served immediately and refreshed on demand.

use crate::names::name_from_email;
use dashmap::DashMap;
use domains::{AppError, AuthProvider, Profile, ProfileStore, Result, Role};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// The resolved identity attached to a live session.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    fn from_profile(profile: &Profile) -> Self {
        let name = if profile.name.trim().is_empty() {
            name_from_email(&profile.email)
        } else {
            profile.name.clone()
        };
        Self {
            id: profile.id.clone(),
            email: profile.email.clone(),
            name,
            role: profile.role,
        }
    }

    fn basic(user_id: &str, email: &str) -> Self {
        Self {
            id: user_id.to_string(),
            email: email.to_string(),
            name: name_from_email(email),
            role: Role::User,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub user: CurrentUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupOutcome {
    #[serde(flatten)]
    pub session: Session,
    /// Set when the account exists but the profile row could not be
    /// written; login availability wins over profile consistency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub struct SessionManager {
    auth: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileStore>,
    sessions: DashMap<String, CurrentUser>,
    profile_cache: DashMap<String, Profile>,
}

impl SessionManager {
    pub fn new(auth: Arc<dyn AuthProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            auth,
            profiles,
            sessions: DashMap::new(),
            profile_cache: DashMap::new(),
        }
    }

    /// Signs in against the identity provider and resolves the profile.
    /// A failed role lookup never blocks login — the session falls back to
    /// `role = user` and a background task attempts to create the profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let auth = self.auth.sign_in(email, password).await?;
        let user = self
            .resolve_profile(&auth.user_id, &auth.email, true)
            .await;
        info!(user_id = %user.id, role = ?user.role, "login complete");
        self.sessions.insert(auth.access_token.clone(), user.clone());
        Ok(Session {
            token: auth.access_token,
            user,
        })
    }

    /// Creates the identity, then the profile row. Profile insertion
    /// failure still reports success, with a warning.
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<SignupOutcome> {
        let auth = self.auth.sign_up(email, password).await?;
        let profile = Profile {
            id: auth.user_id.clone(),
            email: auth.email.clone(),
            name: if name.trim().is_empty() {
                name_from_email(&auth.email)
            } else {
                name.trim().to_string()
            },
            role: Role::User,
        };

        let warning = match self.profiles.insert_profile(profile.clone()).await {
            Ok(()) => None,
            Err(err) => {
                warn!(%err, "profile creation failed during signup; account still usable");
                Some(
                    "Account created! Some features may be limited until your profile \
                     is fully set up."
                        .to_string(),
                )
            }
        };

        self.profile_cache.insert(profile.id.clone(), profile.clone());
        let user = CurrentUser::from_profile(&profile);
        self.sessions.insert(auth.access_token.clone(), user.clone());
        Ok(SignupOutcome {
            session: Session {
                token: auth.access_token,
                user,
            },
            warning,
        })
    }

    /// Removes the session and invalidates the cached profile. Provider
    /// sign-out is best-effort.
    pub async fn logout(&self, token: &str) {
        if let Some((_, user)) = self.sessions.remove(token) {
            self.invalidate(&user.id);
        }
        if let Err(err) = self.auth.sign_out(token).await {
            warn!(%err, "provider sign-out failed");
        }
    }

    /// Drops the cached profile for a user.
    pub fn invalidate(&self, user_id: &str) {
        self.profile_cache.remove(user_id);
    }

    /// The session's user, served from the optimistic cache.
    pub fn current(&self, token: &str) -> Option<CurrentUser> {
        self.sessions.get(token).map(|entry| entry.clone())
    }

    pub fn is_authenticated(&self, token: &str) -> bool {
        self.sessions.contains_key(token)
    }

    pub fn is_admin(&self, token: &str) -> bool {
        self.current(token).is_some_and(|user| user.is_admin())
    }

    /// Re-resolves the profile bypassing the cache and applies any role
    /// change to the live session.
    pub async fn refresh(&self, token: &str) -> Result<CurrentUser> {
        let previous = self
            .current(token)
            .ok_or_else(|| AppError::Unauthorized("no active session".into()))?;
        let fresh = self
            .resolve_profile(&previous.id, &previous.email, false)
            .await;
        if fresh.role != previous.role {
            info!(user_id = %fresh.id, from = ?previous.role, to = ?fresh.role, "role change detected on refresh");
        }
        self.sessions.insert(token.to_string(), fresh.clone());
        Ok(fresh)
    }

    async fn resolve_profile(&self, user_id: &str, email: &str, use_cache: bool) -> CurrentUser {
        if use_cache {
            if let Some(cached) = self.profile_cache.get(user_id) {
                return CurrentUser::from_profile(&cached);
            }
        }

        match self.profiles.profile(user_id).await {
            Ok(Some(profile)) => {
                let user = CurrentUser::from_profile(&profile);
                self.profile_cache.insert(profile.id.clone(), profile);
                user
            }
            Ok(None) => {
                // No row yet: usable basic identity now, profile row later.
                self.create_profile_in_background(Profile {
                    id: user_id.to_string(),
                    email: email.to_string(),
                    name: name_from_email(email),
                    role: Role::User,
                });
                CurrentUser::basic(user_id, email)
            }
            Err(err) => {
                warn!(%err, "profile lookup failed; falling back to basic user");
                CurrentUser::basic(user_id, email)
            }
        }
    }

    fn create_profile_in_background(&self, profile: Profile) {
        let profiles = Arc::clone(&self.profiles);
        tokio::spawn(async move {
            let user_id = profile.id.clone();
            match profiles.insert_profile(profile).await {
                Ok(()) => info!(%user_id, "profile created in background"),
                Err(err) => warn!(%user_id, %err, "background profile creation failed"),
            }
        });
    }
}
