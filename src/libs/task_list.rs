//! Task list state and the operations that change it.
//!
//! [`TaskList`] holds the rows of the last successful fetch for one filter,
//! plus the add and edit drafts. Every mutation is a single remote write
//! followed by a full re-fetch; nothing is patched locally, so the held rows
//! only ever change when a fetch succeeds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskbase::libs::task::{Priority, TaskFilter};
//! use taskbase::libs::task_list::TaskList;
//! # async fn run(store: taskbase::api::SupabaseTasks, session: taskbase::libs::session::Session) -> anyhow::Result<()> {
//! let mut list = TaskList::new(store, TaskFilter::Active);
//! list.fetch(Some(&session)).await?;
//! list.add(Some(&session), "Write report", "", "2026-11-01", Priority::High).await?;
//! for task in list.tasks() {
//!     println!("{} {}", task.priority, task.title);
//! }
//! # Ok(())
//! # }
//! ```

use crate::api::TaskStore;
use crate::libs::messages::Message;
use crate::libs::session::Session;
use crate::libs::task::{sort_by_priority, Priority, Task, TaskDraft, TaskFilter, TaskOrder, TaskPatch, TaskPredicate};
use crate::{msg_bail_anyhow, msg_debug, msg_error};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm};

/// Asks the user to approve a destructive action.
pub trait Confirmation {
    fn confirm(&self, prompt: &Message) -> Result<bool>;
}

/// Fixed answer, used for `--yes` and in tests.
impl Confirmation for bool {
    fn confirm(&self, _prompt: &Message) -> Result<bool> {
        Ok(*self)
    }
}

/// Interactive yes/no prompt, defaulting to "no".
pub struct PromptConfirmation;

impl Confirmation for PromptConfirmation {
    fn confirm(&self, prompt: &Message) -> Result<bool> {
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.to_string())
            .default(false)
            .interact()?)
    }
}

/// The task currently being edited and its pending values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub task_id: i64,
    pub draft: TaskDraft,
}

pub struct TaskList<S: TaskStore> {
    store: S,
    filter: TaskFilter,
    tasks: Vec<Task>,
    draft: TaskDraft,
    editing: Option<EditState>,
    loading: bool,
}

/// Holds the loading flag for the lifetime of a request. Clearing it on drop
/// covers a submit whose future is dropped before the insert completes.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

fn require_session(session: Option<&Session>) -> Result<&Session> {
    match session {
        Some(session) => Ok(session),
        None => msg_bail_anyhow!(Message::UserNotLoggedIn),
    }
}

impl<S: TaskStore> TaskList<S> {
    pub fn new(store: S, filter: TaskFilter) -> Self {
        Self {
            store,
            filter,
            tasks: Vec::new(),
            draft: TaskDraft::default(),
            editing: None,
            loading: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.draft
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    /// True while an insert is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn find(&self, task_id: i64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Replaces the held rows with the user's tasks under the current filter.
    ///
    /// Without a session the list is emptied and nothing is queried. A failed
    /// query is logged and returned, and the held rows stay as they were.
    pub async fn fetch(&mut self, session: Option<&Session>) -> Result<()> {
        let Some(session) = session else {
            self.tasks.clear();
            return Ok(());
        };

        let predicate = self.filter.predicate(session.user_id());
        let mut rows = match self.store.select(session, &predicate, TaskOrder::CreatedAtDesc).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(filter = %self.filter, error = %e, "task fetch failed");
                return Err(e);
            }
        };

        if self.filter.sorts_by_priority() {
            sort_by_priority(&mut rows);
        }
        msg_debug!(Message::TasksFetched(rows.len(), self.filter.to_string()));
        self.tasks = rows;
        Ok(())
    }

    /// Re-fetch after a successful write. The write already happened, so a
    /// failure here is reported but not returned.
    async fn refresh(&mut self, session: Option<&Session>) {
        if let Err(e) = self.fetch(session).await {
            msg_error!(Message::TaskFetchFailed(e.to_string()));
        }
    }

    pub async fn set_filter(&mut self, filter: TaskFilter, session: Option<&Session>) {
        self.filter = filter;
        self.refresh(session).await;
    }

    /// Fills the add draft and submits it.
    pub async fn add(
        &mut self,
        session: Option<&Session>,
        title: &str,
        description: &str,
        due_date: &str,
        priority: Priority,
    ) -> Result<Task> {
        self.draft = TaskDraft::new(title, description, due_date, priority);
        self.submit(session).await
    }

    /// Inserts the add draft. On success the draft is reset and the list re-fetched.
    pub async fn submit(&mut self, session: Option<&Session>) -> Result<Task> {
        if self.loading {
            msg_bail_anyhow!(Message::TaskSubmissionInFlight);
        }
        let session = require_session(session)?;
        let new_task = self.draft.to_new_task(session.user_id())?;

        let inserted = {
            let _in_flight = InFlight::start(&mut self.loading);
            self.store.insert(session, &new_task).await
        };
        let task = inserted?;

        self.draft = TaskDraft::default();
        self.refresh(Some(session)).await;
        Ok(task)
    }

    async fn patch_one(&mut self, session: Option<&Session>, task_id: i64, patch: TaskPatch) -> Result<()> {
        let session = require_session(session)?;
        let predicate = TaskPredicate::for_user(session.user_id()).id(task_id);
        let updated = self.store.update(session, &patch, &predicate).await?;
        if updated.is_empty() {
            msg_bail_anyhow!(Message::TaskNotFound(task_id));
        }
        self.refresh(Some(session)).await;
        Ok(())
    }

    /// Sets `is_complete` to `!current_status`.
    pub async fn toggle_complete(&mut self, session: Option<&Session>, task_id: i64, current_status: bool) -> Result<()> {
        self.patch_one(session, task_id, TaskPatch::complete(!current_status)).await
    }

    /// Sets `is_archived` to `!current_status`.
    pub async fn toggle_archive(&mut self, session: Option<&Session>, task_id: i64, current_status: bool) -> Result<()> {
        self.patch_one(session, task_id, TaskPatch::archive(!current_status)).await
    }

    /// Enters edit mode for `task`, seeding the draft from its current values.
    pub fn start_editing(&mut self, task: &Task) {
        self.editing = Some(EditState {
            task_id: task.id,
            draft: TaskDraft::from_task(task),
        });
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut TaskDraft> {
        self.editing.as_mut().map(|state| &mut state.draft)
    }

    pub fn cancel_editing(&mut self) {
        self.editing = None;
    }

    /// Writes the edit draft over the task's four descriptive fields.
    pub async fn save_edit(&mut self, session: Option<&Session>) -> Result<()> {
        let Some(state) = self.editing.clone() else {
            msg_bail_anyhow!(Message::NotEditing);
        };
        let patch = state.draft.to_patch()?;
        self.patch_one(session, state.task_id, patch).await?;
        self.editing = None;
        Ok(())
    }

    /// Overwrites title, description, due date and priority of one task.
    pub async fn edit(
        &mut self,
        session: Option<&Session>,
        task_id: i64,
        title: &str,
        description: &str,
        due_date: &str,
        priority: Priority,
    ) -> Result<()> {
        self.editing = Some(EditState {
            task_id,
            draft: TaskDraft::new(title, description, due_date, priority),
        });
        self.save_edit(session).await
    }

    /// Deletes one task once confirmed. Returns `false` when the user declined.
    pub async fn delete(&mut self, session: Option<&Session>, task_id: i64, confirmation: &impl Confirmation) -> Result<bool> {
        if !confirmation.confirm(&Message::ConfirmDeleteTask)? {
            return Ok(false);
        }
        let session = require_session(session)?;
        let predicate = TaskPredicate::for_user(session.user_id()).id(task_id);
        let deleted = self.store.delete(session, &predicate).await?;
        if deleted.is_empty() {
            msg_bail_anyhow!(Message::TaskNotFound(task_id));
        }
        self.refresh(Some(session)).await;
        Ok(true)
    }

    /// Deletes every completed task of the user, archived or not.
    ///
    /// Returns the number of deleted rows, or `None` when the user declined.
    pub async fn clear_completed(&mut self, session: Option<&Session>, confirmation: &impl Confirmation) -> Result<Option<usize>> {
        if !confirmation.confirm(&Message::ConfirmClearCompleted)? {
            return Ok(None);
        }
        let session = require_session(session)?;
        let predicate = TaskPredicate::for_user(session.user_id()).is_complete(true);
        let deleted = self.store.delete(session, &predicate).await?;
        self.refresh(Some(session)).await;
        Ok(Some(deleted.len()))
    }

    /// Finds a task among the held rows, falling back to a by-id query.
    pub async fn lookup(&self, session: Option<&Session>, task_id: i64) -> Result<Task> {
        if let Some(task) = self.find(task_id) {
            return Ok(task.clone());
        }
        let session = require_session(session)?;
        let predicate = TaskPredicate::for_user(session.user_id()).id(task_id);
        let mut rows = self.store.select(session, &predicate, TaskOrder::CreatedAtDesc).await?;
        match rows.pop() {
            Some(task) => Ok(task),
            None => msg_bail_anyhow!(Message::TaskNotFound(task_id)),
        }
    }
}
