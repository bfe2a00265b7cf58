//! Email/password accounts against a GoTrue-compatible auth API.
//!
//! The session is kept AES-encrypted in the data directory so that it
//! survives between invocations, and every change to it is published on the
//! session-change stream.

use super::error::{check, ApiError};
use super::{AuthProvider, BackendClient, SessionNotifier, SessionSubscription};
use crate::libs::messages::Message;
use crate::libs::secret::Secret;
use crate::libs::session::{Session, SignUpMetadata};
use crate::{msg_debug, msg_warning};
use anyhow::Result;
use serde::Serialize;

const SESSION_FILE: &str = ".session";
const TOKEN_PATH: &str = "auth/v1/token";
const SIGNUP_PATH: &str = "auth/v1/signup";
const LOGOUT_PATH: &str = "auth/v1/logout";

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a SignUpMetadata,
}

pub struct SupabaseAuth {
    client: BackendClient,
    notifier: SessionNotifier,
    storage: Secret,
}

impl SupabaseAuth {
    /// Creates the provider, seeding the stream with the stored session if there is one.
    pub fn new(client: BackendClient) -> Self {
        Self::with_storage(client, Secret::new(SESSION_FILE))
    }

    pub fn with_storage(client: BackendClient, storage: Secret) -> Self {
        let stored = Self::load(&storage);
        Self {
            client,
            notifier: SessionNotifier::new(stored),
            storage,
        }
    }

    fn load(storage: &Secret) -> Option<Session> {
        if !storage.exists() {
            return None;
        }
        match storage.read().and_then(|json| Ok(serde_json::from_str::<Session>(&json)?)) {
            Ok(session) => Some(session),
            Err(e) => {
                msg_debug!(Message::StoredSessionUnreadable(format!("{}: {}", storage.path().display(), e)));
                None
            }
        }
    }

    fn persist(&self, session: &Session) -> Result<()> {
        self.storage.write(&serde_json::to_string(session)?)
    }

    /// Stores and publishes a session, or clears both.
    fn set_session(&self, session: Option<Session>) -> Result<()> {
        match &session {
            Some(session) => self.persist(session)?,
            None => self.storage.delete()?,
        }
        self.notifier.publish(session);
        Ok(())
    }

    async fn token_request<T: Serialize>(&self, grant_type: &str, body: &T) -> Result<Session> {
        let req = self.client.post(TOKEN_PATH, None)?.query(&[("grant_type", grant_type)]).json(body);
        let res = check(req.send().await?).await?;
        let session = res.json::<Session>().await?;
        Ok(session.stamped())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        self.token_request("refresh_token", &RefreshGrant { refresh_token }).await
    }
}

/// True when the auth server answered and refused the refresh token.
fn rejects_session(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Remote { status, .. }) if status.is_client_error()
    )
}

impl AuthProvider for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<Session>> {
        let Some(session) = self.notifier.current().or_else(|| Self::load(&self.storage)) else {
            self.notifier.publish(None);
            return Ok(None);
        };

        if !session.is_expired() {
            self.notifier.publish(Some(session.clone()));
            return Ok(Some(session));
        }

        msg_debug!(Message::SessionRefreshing);
        match self.refresh(&session.refresh_token).await {
            Ok(fresh) => {
                self.set_session(Some(fresh.clone()))?;
                Ok(Some(fresh))
            }
            Err(e) if rejects_session(&e) => {
                msg_warning!(Message::SessionRefreshFailed(e.to_string()));
                self.set_session(None)?;
                Ok(None)
            }
            // Server unreachable: keep the stored session for the next attempt
            Err(e) => Err(e),
        }
    }

    fn on_session_change(&self) -> SessionSubscription {
        self.notifier.subscribe()
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.token_request("password", &PasswordCredentials { email, password }).await?;
        self.set_session(Some(session.clone()))?;
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str, metadata: &SignUpMetadata) -> Result<()> {
        let req = self.client.post(SIGNUP_PATH, None)?.json(&SignUpRequest {
            email,
            password,
            data: metadata,
        });
        check(req.send().await?).await?;
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        if let Some(session) = self.notifier.current() {
            let req = self.client.post(LOGOUT_PATH, Some(&session.access_token))?;
            let outcome = match req.send().await {
                Ok(res) => check(res).await.map(|_| ()),
                Err(e) => Err(ApiError::from(e)),
            };
            // The local session is dropped even when the server call fails
            if let Err(e) = outcome {
                msg_warning!(Message::RemoteSignOutFailed(e.to_string()));
            }
        }
        self.set_session(None)
    }
}
