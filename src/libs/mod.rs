//! Core library modules for taskbase.
//!
//! - **Model**: tasks, filters, predicates and drafts ([`task`])
//! - **Controllers**: authentication state ([`session`]) and the task list ([`task_list`])
//! - **Infrastructure**: configuration, local data directory, encrypted files, messaging
//! - **Presentation**: terminal tables ([`view`])
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskbase::libs::task::TaskFilter;
//!
//! let filter = TaskFilter::Active;
//! assert!(filter.sorts_by_priority());
//! ```

pub mod config;
pub mod data_storage;
pub mod messages;
pub mod secret;
pub mod session;
pub mod task;
pub mod task_list;
pub mod view;
