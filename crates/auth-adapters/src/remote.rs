//! Client for the hosted identity service: password-grant sign-in,
//! signup, and sign-out under `{base}/auth/v1/`.

use async_trait::async_trait;
use configs::StoreConfig;
use domains::{AppError, AuthProvider, AuthSession, Result};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

pub struct RemoteAuth {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    user: Option<AuthUser>,
}

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct AuthErrorBody {
    #[serde(alias = "error_description", alias = "msg")]
    message: Option<String>,
}

impl RemoteAuth {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|err| AppError::Backend(format!("http client setup failed: {err}")))?;
        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    async fn token_request(
        &self,
        url: String,
        email: &str,
        password: &str,
        fallback_email: &str,
    ) -> Result<AuthSession> {
        let response = self
            .http
            .post(url)
            .header("apikey", self.api_key.expose_secret())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|err| AppError::Backend(format!("auth request failed: {err}")))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let body: AuthErrorBody = response.json().await.unwrap_or(AuthErrorBody {
                message: None,
            });
            return Err(AppError::Unauthorized(
                body.message
                    .unwrap_or_else(|| "invalid email or password".to_string()),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Backend(format!(
                "auth service returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| AppError::Backend(format!("malformed auth response: {err}")))?;
        let user = token
            .user
            .ok_or_else(|| AppError::Backend("auth response carried no user".into()))?;
        // No session token usually means the provider is waiting on email
        // confirmation; surface that instead of inventing a session.
        let access_token = token.access_token.ok_or_else(|| {
            AppError::Backend(
                "auth succeeded but returned no session; email confirmation may be required"
                    .into(),
            )
        })?;
        Ok(AuthSession {
            user_id: user.id,
            email: user.email.unwrap_or_else(|| fallback_email.to_string()),
            access_token,
        })
    }
}

#[async_trait]
impl AuthProvider for RemoteAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.token_request(
            format!("{}?grant_type=password", self.endpoint("token")),
            email,
            password,
            email,
        )
        .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.token_request(self.endpoint("signup"), email, password, email)
            .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint("logout"))
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|err| AppError::Backend(format!("sign-out request failed: {err}")))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Backend(format!(
                "sign-out returned {}",
                response.status()
            )))
        }
    }
}
