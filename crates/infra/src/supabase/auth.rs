//! GoTrue identity provider adapter
//!
//! Implements the core `IdentityProvider` port against the hosted auth
//! service. Provider failures are classified into [`AuthErrorKind`] right
//! here, from the structured `error_code` field (with a fallback for older
//! gateways that only return message text), so nothing upstream ever
//! pattern-matches on human-readable strings.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mediatracker_core::{IdentityProvider, SignUpDetails};
use mediatracker_domain::{AuthErrorKind, MediaTrackerError, Result, Session};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use super::SupabaseEndpoints;
use crate::http::HttpClient;
use crate::session::SessionStore;

/// Refresh the access token when it expires within this many seconds.
const REFRESH_LEEWAY_SECS: i64 = 60;

/// Email/password auth client for the hosted identity service.
pub struct GoTrueClient {
    http: HttpClient,
    endpoints: SupabaseEndpoints,
    store: Arc<dyn SessionStore>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

/// Signup returns a full session when auto-confirm is on, or just the user
/// record when email confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    UserOnly(AuthUser),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_code: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
}

impl GoTrueClient {
    pub fn new(
        http: HttpClient,
        endpoints: SupabaseEndpoints,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self { http, endpoints, store }
    }

    fn session_from(&self, response: TokenResponse, fallback_email: &str) -> Session {
        Session {
            expires_at: Utc::now().timestamp() + response.expires_in,
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            user_id: response.user.id,
            email: response.user.email.unwrap_or_else(|| fallback_email.to_string()),
        }
    }

    async fn token_request(&self, grant_type: &str, body: serde_json::Value) -> Result<TokenResponse> {
        let mut url = self.endpoints.auth("token")?;
        url.query_pairs_mut().append_pair("grant_type", grant_type);

        let response = self.http.send(self.http.request(Method::POST, url).json(&body)).await?;

        if response.status().is_success() {
            return response.json::<TokenResponse>().await.map_err(|err| {
                MediaTrackerError::Internal(format!("malformed token response: {err}"))
            });
        }

        Err(auth_error(response).await)
    }

    async fn refresh(&self, session: &Session) -> Result<Session> {
        debug!(user_id = %session.user_id, "refreshing expired access token");
        let response = self
            .token_request(
                "refresh_token",
                json!({ "refresh_token": session.refresh_token }),
            )
            .await?;
        Ok(self.session_from(response, &session.email))
    }
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .token_request("password", json!({ "email": email, "password": password }))
            .await?;
        let session = self.session_from(response, email);
        self.store.save(&session)?;
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        details: &SignUpDetails,
    ) -> Result<Session> {
        let url = self.endpoints.auth("signup")?;
        let body = json!({
            "email": email,
            "password": password,
            "data": {
                "full_name": details.full_name,
                "role": details.role.as_str(),
                "state": details.state,
            },
        });

        let response = self.http.send(self.http.request(Method::POST, url).json(&body)).await?;

        if !response.status().is_success() {
            return Err(auth_error(response).await);
        }

        match response.json::<SignUpResponse>().await {
            Ok(SignUpResponse::Session(token)) => {
                let session = self.session_from(token, email);
                self.store.save(&session)?;
                Ok(session)
            }
            Ok(SignUpResponse::UserOnly(user)) => {
                // Identity exists but needs confirmation before a session
                // can be issued.
                info!(user_id = %user.id, "sign-up pending email confirmation");
                Err(MediaTrackerError::Auth(AuthErrorKind::UnconfirmedEmail))
            }
            Err(err) => {
                Err(MediaTrackerError::Internal(format!("malformed signup response: {err}")))
            }
        }
    }

    async fn current_session(&self) -> Result<Option<Session>> {
        let Some(session) = self.store.load()? else {
            return Ok(None);
        };

        if !session.expires_within(REFRESH_LEEWAY_SECS) {
            return Ok(Some(session));
        }

        match self.refresh(&session).await {
            Ok(refreshed) => {
                self.store.save(&refreshed)?;
                Ok(Some(refreshed))
            }
            Err(MediaTrackerError::Auth(kind)) => {
                // Refresh token revoked or expired: the session is gone.
                warn!(reason = %kind, "session refresh rejected, clearing stored session");
                self.store.clear()?;
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }

    async fn sign_out(&self) -> Result<()> {
        let session = self.store.load()?;
        // Local-first: the stored session is cleared before the remote
        // revocation is attempted.
        self.store.clear()?;

        if let Some(session) = session {
            let url = self.endpoints.auth("logout")?;
            let request = self
                .http
                .request(Method::POST, url)
                .header(AUTHORIZATION, format!("Bearer {}", session.access_token));
            let response = self.http.send(request).await?;

            if !response.status().is_success() && response.status() != StatusCode::UNAUTHORIZED {
                return Err(auth_error(response).await);
            }
        }

        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        let url = self.endpoints.auth("recover")?;
        let response = self
            .http
            .send(self.http.request(Method::POST, url).json(&json!({ "email": email })))
            .await?;

        if !response.status().is_success() {
            return Err(auth_error(response).await);
        }
        Ok(())
    }
}

/// Map a failed auth response into a typed category.
async fn auth_error(response: reqwest::Response) -> MediaTrackerError {
    let status = response.status();
    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    MediaTrackerError::Auth(classify(status, &body))
}

fn classify(status: StatusCode, body: &ErrorBody) -> AuthErrorKind {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return AuthErrorKind::RateLimited;
    }

    if let Some(code) = body.error_code.as_deref() {
        return match code {
            "invalid_credentials" | "invalid_grant" => AuthErrorKind::InvalidCredentials,
            "email_not_confirmed" => AuthErrorKind::UnconfirmedEmail,
            "user_already_exists" | "email_exists" => AuthErrorKind::DuplicateAccount,
            "weak_password" => AuthErrorKind::WeakPassword,
            "validation_failed" => AuthErrorKind::MalformedEmail,
            "over_request_rate_limit" | "over_email_send_rate_limit" => {
                AuthErrorKind::RateLimited
            }
            "refresh_token_not_found" | "session_expired" | "session_not_found" => {
                AuthErrorKind::SessionExpired
            }
            other => AuthErrorKind::Other(other.to_string()),
        };
    }

    // Legacy gateways only return message text; fall back to the known
    // phrasings once, here at the boundary.
    let text = body
        .msg
        .as_deref()
        .or(body.error_description.as_deref())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if text.contains("invalid login credentials") {
        AuthErrorKind::InvalidCredentials
    } else if text.contains("email not confirmed") {
        AuthErrorKind::UnconfirmedEmail
    } else if text.contains("already registered") {
        AuthErrorKind::DuplicateAccount
    } else if text.contains("password should be") {
        AuthErrorKind::WeakPassword
    } else if text.contains("valid email") || text.contains("invalid format") {
        AuthErrorKind::MalformedEmail
    } else {
        AuthErrorKind::Other(format!("{status}: {text}"))
    }
}
