//! Display implementation for taskbase messages.
//!
//! Every user-facing string in the application is produced here, so wording
//! stays consistent between the one-shot commands and the interactive menu.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' added", title),
            Message::TaskCreateFailed => "Failed to create task".to_string(),
            Message::TaskUpdated(id) => format!("Task {} updated", id),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskNotFound(id) => format!("Task with ID {} not found.", id),
            Message::TaskMarkedComplete(id) => format!("Task {} marked as complete", id),
            Message::TaskMarkedActive(id) => format!("Task {} marked as active", id),
            Message::TaskArchived(id) => format!("Task {} archived", id),
            Message::TaskUnarchived(id) => format!("Task {} restored from the archive", id),
            Message::CompletedTasksCleared(count) => format!("Deleted {} completed task(s)", count),
            Message::TaskTitleRequired => "Task title is required".to_string(),
            Message::TaskSubmissionInFlight => "A task is already being added, please wait".to_string(),
            Message::TaskFetchFailed(error) => format!("Error fetching tasks: {}", error),
            Message::TasksFetched(count, filter) => format!("Fetched {} task(s) for filter '{}'", count, filter),
            Message::TasksHeader(filter) => format!("Your Tasks ({})", filter),
            Message::NoTasksYet => "No tasks yet. Add one with `taskbase add <title>`!".to_string(),
            Message::NotEditing => "No task is being edited".to_string(),
            Message::EditingTask(title) => format!("Editing task: {}", title),
            Message::InvalidDueDate(input) => format!("Invalid due date '{}', expected YYYY-MM-DD", input),
            Message::InvalidPriority(input) => format!("Invalid priority '{}', expected Low, Medium or High", input),
            Message::TaskStatusActive => "Active".to_string(),
            Message::TaskStatusComplete => "Complete".to_string(),
            Message::ConfirmDeleteTask => "Are you sure you want to delete this task?".to_string(),
            Message::ConfirmClearCompleted => "Are you sure you want to delete all completed tasks?".to_string(),
            Message::UnscopedMutation => "Refusing to modify tasks without a filter".to_string(),

            // === SESSION MESSAGES ===
            Message::Welcome(name) => format!("Welcome, {}!", name),
            Message::SignedInAs(email) => format!("Signed in as {}", email),
            Message::UserNotLoggedIn => "User not logged in.".to_string(),
            Message::NotLoggedInHint => "You are not logged in. Run `taskbase login` or `taskbase signup` first.".to_string(),
            Message::LoggedOut => "Logged out".to_string(),
            Message::SignUpConfirmEmail => "Check your email for the login link!".to_string(),
            Message::DisplayNameRequired => "Display name is required".to_string(),
            Message::SessionRefreshing => "Access token expired, refreshing session".to_string(),
            Message::SessionRefreshFailed(error) => format!("Could not refresh the session, please log in again: {}", error),
            Message::StoredSessionUnreadable(error) => format!("Ignoring unreadable stored session: {}", error),
            Message::RemoteSignOutFailed(error) => format!("Server sign-out failed, local session removed anyway: {}", error),
            Message::SessionStreamClosed => "Session notifications are no longer available".to_string(),
            Message::LoginHeader => "Login".to_string(),
            Message::CreateAccountHeader => "Create Account".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleBackend => "Backend settings".to_string(),
            Message::ConfigModuleView => "View settings".to_string(),
            Message::BackendNotConfigured => {
                "Backend is not configured. Run `taskbase init` or set TASKBASE_URL and TASKBASE_ANON_KEY".to_string()
            }

            // === INTERACTIVE MENU ===
            Message::MenuLogin => "Login".to_string(),
            Message::MenuCreateAccount => "Create account".to_string(),
            Message::MenuAddTask => "Add task".to_string(),
            Message::MenuToggleComplete => "Toggle complete".to_string(),
            Message::MenuEditTask => "Edit task".to_string(),
            Message::MenuDeleteTask => "Delete task".to_string(),
            Message::MenuToggleArchive => "Archive / unarchive".to_string(),
            Message::MenuChangeFilter => "Change filter".to_string(),
            Message::MenuClearCompleted => "Clear completed".to_string(),
            Message::MenuRefresh => "Refresh".to_string(),
            Message::MenuLogout => "Logout".to_string(),
            Message::MenuQuit => "Quit".to_string(),
            Message::Goodbye => "Bye!".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select nodes to configure".to_string(),
            Message::PromptBackendUrl => "Enter the backend project URL".to_string(),
            Message::PromptBackendAnonKey => "Enter the backend anon key".to_string(),
            Message::PromptDefaultFilter => "Default task filter".to_string(),
            Message::PromptEmail => "Email".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptPasswordConfirm => "Repeat password".to_string(),
            Message::PromptPasswordMismatch => "Passwords do not match".to_string(),
            Message::PromptDisplayName => "Display Name".to_string(),
            Message::PromptTaskTitle => "Task Title".to_string(),
            Message::PromptTaskDescription => "Task Description (optional)".to_string(),
            Message::PromptTaskDueDate => "Due date, YYYY-MM-DD (optional)".to_string(),
            Message::PromptTaskPriority => "Priority".to_string(),
            Message::PromptSelectAction => "What next?".to_string(),
            Message::PromptSelectTask => "Select task".to_string(),
            Message::PromptSelectFilter => "Show".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
