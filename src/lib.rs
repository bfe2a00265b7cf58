//! # Taskbase - a task manager on a hosted backend
//!
//! A command-line client for a personal task list stored in a
//! Supabase-compatible backend: email/password accounts through the auth
//! service and a row-level-secured `tasks` table through the REST service.
//!
//! ## Features
//!
//! - **Accounts**: Sign up with a display name, log in, log out; the session is kept encrypted between runs
//! - **Tasks**: Add, edit, complete, archive and delete tasks with a due date and priority
//! - **Views**: All, active, completed and archived filters, priority-ordered where it helps
//! - **Interactive Mode**: A menu-driven app that reloads the list whenever the session changes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskbase::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
