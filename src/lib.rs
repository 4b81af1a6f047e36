//! todo-core - in-memory task tracking
//!
//! This library is the core of a single-user todo application: it owns the
//! task records and everything that reads or changes them. Presentation
//! (menus, prompts, printing) lives outside and calls in.
//!
//! # Core Concepts
//!
//! - **Tasks**: titled records with priority, tags and optional deadlines
//! - **Store**: the only owner of tasks; assigns ids that are never reused
//! - **Recurrence**: completing a recurring task schedules its successor
//! - **Queries**: search, filter and sort over store snapshots
//! - **Reminders**: overdue / upcoming classification against "now"
//!
//! # Module Organization
//!
//! - `config`: Configuration loading from `.todo.toml`
//! - `error`: Error types and result aliases
//! - `validate`: Field-level input checks
//! - `task`: Task record, drafts and patches
//! - `store`: The task store
//! - `recurrence`: Recurrence patterns and due-date advancement
//! - `query`: Search, filter and sort
//! - `reminder`: Overdue and upcoming detection
//!
//! # Example
//!
//! ```
//! use todo_core::{Priority, Recurrence, TaskDraft, TaskStore};
//!
//! let mut store = TaskStore::new();
//! let id = store
//!     .add_task(
//!         TaskDraft::new("Water plants")
//!             .priority(Priority::High)
//!             .due_date("2025-01-01")
//!             .recurrence(Recurrence::Weekly),
//!     )
//!     .unwrap();
//!
//! let next = store.handle_completion(id).unwrap().unwrap();
//! assert_eq!(store.get_task_by_id(next).unwrap().due_date(), Some("2025-01-08"));
//! ```

pub mod config;
pub mod error;
pub mod query;
pub mod recurrence;
pub mod reminder;
pub mod store;
pub mod task;
pub mod validate;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use query::{SortKey, StatusFilter, TaskFilter};
pub use recurrence::Recurrence;
pub use reminder::Reminders;
pub use store::TaskStore;
pub use task::{Priority, Task, TaskDraft, TaskPatch};
pub use validate::TaskRef;
