//! Clients for the hosted backend.
//!
//! The controllers only see two traits: [`AuthProvider`] for accounts and
//! sessions and [`TaskStore`] for the `tasks` table. The Supabase-compatible
//! implementations live in [`auth`] (GoTrue) and [`rest`] (PostgREST).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskbase::api::{BackendClient, SupabaseAuth, SupabaseTasks};
//! use taskbase::libs::config::Config;
//!
//! let backend = Config::read()?.backend()?;
//! let client = BackendClient::new(&backend);
//! let auth = SupabaseAuth::new(client.clone());
//! let tasks = SupabaseTasks::new(client);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::config::BackendConfig;
use crate::libs::session::{Session, SignUpMetadata};
use crate::libs::task::{NewTask, Task, TaskOrder, TaskPatch, TaskPredicate};
use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use tokio::sync::watch;

pub mod auth;
pub mod error;
pub mod rest;

pub use auth::SupabaseAuth;
pub use error::ApiError;
pub use rest::SupabaseTasks;

/// Receiving end of the session-change stream. Dropping it unsubscribes.
pub type SessionSubscription = watch::Receiver<Option<Session>>;

/// Auth provider contract.
#[allow(async_fn_in_trait)]
pub trait AuthProvider {
    /// Returns the current session, restoring or refreshing it if needed.
    ///
    /// Publishes the result to subscribers when it differs from what they hold.
    async fn get_session(&self) -> Result<Option<Session>>;

    /// Subscribes to session changes. The current value is the initial notification.
    fn on_session_change(&self) -> SessionSubscription;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session>;

    /// Creates an account. Does not sign the user in.
    async fn sign_up(&self, email: &str, password: &str, metadata: &SignUpMetadata) -> Result<()>;

    async fn sign_out(&self) -> Result<()>;
}

/// Remote `tasks` table contract.
///
/// Every call carries the session whose access token authorizes it.
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    async fn insert(&self, session: &Session, task: &NewTask) -> Result<Task>;

    async fn select(&self, session: &Session, predicate: &TaskPredicate, order: TaskOrder) -> Result<Vec<Task>>;

    async fn update(&self, session: &Session, patch: &TaskPatch, predicate: &TaskPredicate) -> Result<Vec<Task>>;

    async fn delete(&self, session: &Session, predicate: &TaskPredicate) -> Result<Vec<Task>>;
}

/// Publishing side of the session-change stream, shared by provider implementations.
#[derive(Debug, Clone)]
pub struct SessionNotifier {
    sender: Arc<watch::Sender<Option<Session>>>,
}

impl SessionNotifier {
    pub fn new(initial: Option<Session>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender: Arc::new(sender) }
    }

    pub fn subscribe(&self) -> SessionSubscription {
        self.sender.subscribe()
    }

    pub fn current(&self) -> Option<Session> {
        self.sender.borrow().clone()
    }

    /// Replaces the held session and notifies subscribers if it changed.
    pub fn publish(&self, session: Option<Session>) {
        self.sender.send_if_modified(|held| {
            if *held == session {
                false
            } else {
                *held = session;
                true
            }
        });
    }
}

impl Default for SessionNotifier {
    fn default() -> Self {
        Self::new(None)
    }
}

/// HTTP client preconfigured with the project URL and anon key.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn headers(&self, bearer: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&self.config.anon_key)?);
        let token = bearer.unwrap_or(&self.config.anon_key);
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token))?);
        Ok(headers)
    }

    pub fn get(&self, path: &str, bearer: Option<&str>) -> Result<RequestBuilder> {
        Ok(self.client.get(self.url(path)).headers(self.headers(bearer)?))
    }

    pub fn post(&self, path: &str, bearer: Option<&str>) -> Result<RequestBuilder> {
        Ok(self.client.post(self.url(path)).headers(self.headers(bearer)?))
    }

    pub fn patch(&self, path: &str, bearer: Option<&str>) -> Result<RequestBuilder> {
        Ok(self.client.patch(self.url(path)).headers(self.headers(bearer)?))
    }

    pub fn delete(&self, path: &str, bearer: Option<&str>) -> Result<RequestBuilder> {
        Ok(self.client.delete(self.url(path)).headers(self.headers(bearer)?))
    }
}
