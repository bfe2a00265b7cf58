//! Authentication state and the session controller.
//!
//! [`Session`] is the credential bundle returned by the auth provider.
//! [`SessionController`] subscribes to the provider's session-change stream
//! for its whole lifetime and treats the latest notification as the only
//! answer to "is someone signed in".

use crate::api::{AuthProvider, SessionSubscription};
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_error_anyhow};
use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name used in the greeting when the profile has no display name.
pub const DEFAULT_GREETING_NAME: &str = "User";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl User {
    /// Last word of the display name, or [`DEFAULT_GREETING_NAME`].
    pub fn greeting_name(&self) -> String {
        self.user_metadata
            .display_name
            .as_deref()
            .and_then(|name| name.split_whitespace().last())
            .unwrap_or(DEFAULT_GREETING_NAME)
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix timestamp (seconds) after which the access token is rejected.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub refresh_token: String,
    pub user: User,
}

impl Session {
    /// Seconds of slack before expiry at which the token counts as stale.
    pub const EXPIRY_MARGIN_SECS: i64 = 10;

    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// Fills `expires_at` from `expires_in` when the provider omitted it.
    pub fn stamped(mut self) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = self.expires_in.map(|secs| Utc::now().timestamp() + secs);
        }
        self
    }

    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now().timestamp() + Self::EXPIRY_MARGIN_SECS >= expires_at,
            None => false,
        }
    }
}

/// Profile data attached at sign-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignUpMetadata {
    pub display_name: String,
}

/// Owns the current session as last reported by the auth provider.
pub struct SessionController<A: AuthProvider> {
    provider: A,
    subscription: SessionSubscription,
}

impl<A: AuthProvider> SessionController<A> {
    /// Subscribes to the provider. The provider's current value counts as the
    /// initial notification.
    pub fn new(provider: A) -> Self {
        let subscription = provider.on_session_change();
        Self { provider, subscription }
    }

    pub fn provider(&self) -> &A {
        &self.provider
    }

    pub fn session(&self) -> Option<Session> {
        self.subscription.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.subscription.borrow().is_some()
    }

    /// Whether a notification arrived since the last call to [`Self::mark_seen`].
    pub fn has_changed(&self) -> bool {
        self.subscription.has_changed().unwrap_or(false)
    }

    pub fn mark_seen(&mut self) -> Option<Session> {
        self.subscription.borrow_and_update().clone()
    }

    /// Waits for the next session-change notification and returns the new value.
    pub async fn changed(&mut self) -> Result<Option<Session>> {
        self.subscription.changed().await.map_err(|_| msg_error_anyhow!(Message::SessionStreamClosed))?;
        Ok(self.subscription.borrow_and_update().clone())
    }

    /// Restores a stored session, if any, and publishes it.
    pub async fn restore(&mut self) -> Result<Option<Session>> {
        self.provider.get_session().await?;
        Ok(self.mark_seen())
    }

    /// Asks the provider for a usable session, refreshing an expired token.
    ///
    /// Unlike [`Self::restore`] the notification is left unseen, so a rotated
    /// token still shows up through [`Self::has_changed`].
    pub async fn ensure_fresh(&self) -> Result<Option<Session>> {
        self.provider.get_session().await
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        self.provider.sign_in_with_password(email, password).await?;
        Ok(())
    }

    /// Registers the account. The user still has to confirm by email and log in.
    pub async fn sign_up(&mut self, email: &str, password: &str, display_name: &str) -> Result<()> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            msg_bail_anyhow!(Message::DisplayNameRequired);
        }
        let metadata = SignUpMetadata {
            display_name: display_name.to_string(),
        };
        self.provider.sign_up(email, password, &metadata).await?;
        Ok(())
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.provider.sign_out().await?;
        Ok(())
    }
}
