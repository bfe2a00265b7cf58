#![allow(dead_code)]

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use taskbase::api::{AuthProvider, SessionNotifier, SessionSubscription, TaskStore};
use taskbase::libs::session::{Session, SignUpMetadata, User, UserMetadata};
use taskbase::libs::task::{NewTask, Task, TaskOrder, TaskPatch, TaskPredicate};
use uuid::Uuid;

pub const PASSWORD: &str = "correct horse battery staple";

pub fn session_for(user_id: Uuid, display_name: Option<&str>) -> Session {
    Session {
        access_token: format!("access-{}", user_id),
        token_type: Some("bearer".to_string()),
        expires_in: Some(3600),
        expires_at: Some(Utc::now().timestamp() + 3600),
        refresh_token: format!("refresh-{}", user_id),
        user: User {
            id: user_id,
            email: Some("ada@example.com".to_string()),
            user_metadata: UserMetadata {
                display_name: display_name.map(str::to_string),
            },
        },
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap()
}

/// `tasks` table kept in memory. Rows get increasing ids and creation times.
#[derive(Default)]
pub struct InMemoryStore {
    rows: Mutex<Vec<Task>>,
    next_id: AtomicI64,
    pub selects: AtomicUsize,
    pub inserts: AtomicUsize,
    pub mutations: AtomicUsize,
    pub fail_selects: AtomicBool,
    /// While set, inserts never complete, like a request stuck on the network.
    pub hold_inserts: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<Task> {
        self.rows.lock().unwrap().clone()
    }

    pub fn selects(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    /// Adds a row directly, bypassing the counters.
    pub fn seed(&self, user_id: Uuid, title: &str, is_complete: bool, is_archived: bool) -> Task {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let task = Task {
            id,
            user_id,
            title: title.to_string(),
            description: None,
            due_date: None,
            priority: Default::default(),
            is_complete,
            is_archived,
            created_at: epoch() + Duration::minutes(id),
        };
        self.rows.lock().unwrap().push(task.clone());
        task
    }
}

impl TaskStore for InMemoryStore {
    async fn insert(&self, _session: &Session, task: &NewTask) -> Result<Task> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.hold_inserts.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = Task {
            id,
            user_id: task.user_id,
            title: task.title.clone(),
            description: Some(task.description.clone()),
            due_date: task.due_date,
            priority: task.priority,
            is_complete: false,
            is_archived: false,
            created_at: epoch() + Duration::minutes(id),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn select(&self, session: &Session, predicate: &TaskPredicate, order: TaskOrder) -> Result<Vec<Task>> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        if self.fail_selects.load(Ordering::SeqCst) {
            bail!("connection reset");
        }
        if session.is_expired() {
            bail!("JWT expired");
        }
        let mut rows: Vec<Task> = self.rows.lock().unwrap().iter().filter(|t| predicate.matches(t)).cloned().collect();
        match order {
            TaskOrder::CreatedAtDesc => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        Ok(rows)
    }

    async fn update(&self, _session: &Session, patch: &TaskPatch, predicate: &TaskPredicate) -> Result<Vec<Task>> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let mut updated = Vec::new();
        for task in self.rows.lock().unwrap().iter_mut().filter(|t| predicate.matches(t)) {
            if let Some(title) = &patch.title {
                task.title = title.clone();
            }
            if let Some(description) = &patch.description {
                task.description = Some(description.clone());
            }
            if let Some(due_date) = patch.due_date {
                task.due_date = due_date;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(is_complete) = patch.is_complete {
                task.is_complete = is_complete;
            }
            if let Some(is_archived) = patch.is_archived {
                task.is_archived = is_archived;
            }
            updated.push(task.clone());
        }
        Ok(updated)
    }

    async fn delete(&self, _session: &Session, predicate: &TaskPredicate) -> Result<Vec<Task>> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let (deleted, kept): (Vec<Task>, Vec<Task>) = rows.drain(..).partition(|t| predicate.matches(t));
        *rows = kept;
        Ok(deleted)
    }
}

/// The same user with a rotated access token valid for another hour.
pub fn refreshed(session: &Session) -> Session {
    Session {
        access_token: format!("{}-refreshed", session.access_token),
        expires_at: Some(Utc::now().timestamp() + 3600),
        ..session.clone()
    }
}

/// Auth provider with a single account that accepts [`PASSWORD`].
pub struct FakeAuth {
    pub notifier: SessionNotifier,
    pub account: Session,
    pub sign_ups: Mutex<Vec<(String, String)>>,
}

impl FakeAuth {
    pub fn new(account: Session) -> Self {
        Self {
            notifier: SessionNotifier::default(),
            account,
            sign_ups: Mutex::new(Vec::new()),
        }
    }

    /// Starts with `account` already signed in, like a restored session.
    pub fn signed_in(account: Session) -> Self {
        Self {
            notifier: SessionNotifier::new(Some(account.clone())),
            account,
            sign_ups: Mutex::new(Vec::new()),
        }
    }
}

impl AuthProvider for FakeAuth {
    /// Hands out a new access token when the current one has expired.
    async fn get_session(&self) -> Result<Option<Session>> {
        let current = self.notifier.current().map(|session| {
            if session.is_expired() {
                refreshed(&session)
            } else {
                session
            }
        });
        self.notifier.publish(current.clone());
        Ok(current)
    }

    fn on_session_change(&self) -> SessionSubscription {
        self.notifier.subscribe()
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        if Some(email) != self.account.user.email.as_deref() || password != PASSWORD {
            bail!("Invalid login credentials");
        }
        self.notifier.publish(Some(self.account.clone()));
        Ok(self.account.clone())
    }

    async fn sign_up(&self, email: &str, _password: &str, metadata: &SignUpMetadata) -> Result<()> {
        self.sign_ups.lock().unwrap().push((email.to_string(), metadata.display_name.clone()));
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        self.notifier.publish(None);
        Ok(())
    }
}
