//! Mock identity provider for unconfigured deployments. Two fixed demo
//! accounts (matching the profiles the mock store seeds) plus open signup.

use async_trait::async_trait;
use dashmap::DashMap;
use domains::{AppError, AuthProvider, AuthSession, Result};
use tracing::info;
use uuid::Uuid;

const ADMIN_EMAIL: &str = "admin@naedex.com";
const ADMIN_PASSWORD: &str = "admin123";
const USER_EMAIL: &str = "user@example.com";
const USER_PASSWORD: &str = "user123";

#[derive(Default)]
pub struct MockAuth {
    /// Accounts created through `sign_up`: email → (user id, password).
    registered: DashMap<String, (String, String)>,
}

impl MockAuth {
    fn session(user_id: &str, email: &str) -> AuthSession {
        AuthSession {
            user_id: user_id.to_string(),
            email: email.to_string(),
            access_token: Uuid::new_v4().to_string(),
        }
    }
}

#[async_trait]
impl AuthProvider for MockAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        match (email, password) {
            (ADMIN_EMAIL, ADMIN_PASSWORD) => Ok(Self::session("1", ADMIN_EMAIL)),
            (USER_EMAIL, USER_PASSWORD) => Ok(Self::session("2", USER_EMAIL)),
            _ => {
                if let Some(entry) = self.registered.get(email) {
                    let (user_id, stored_password) = entry.value();
                    if stored_password == password {
                        return Ok(Self::session(user_id, email));
                    }
                }
                Err(AppError::Unauthorized("invalid email or password".into()))
            }
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession> {
        if self.registered.contains_key(email)
            || email == ADMIN_EMAIL
            || email == USER_EMAIL
        {
            return Err(AppError::Validation("email already registered".into()));
        }
        let user_id = Uuid::new_v4().to_string();
        self.registered
            .insert(email.to_string(), (user_id.clone(), password.to_string()));
        info!(%email, "mock account registered");
        Ok(Self::session(&user_id, email))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<()> {
        Ok(())
    }
}
