//! SQLite storage backend for tasks.
//!
//! This crate persists [`Task`](task_manager_core::Task) records in a single
//! SQLite table and makes sure that table exists before first use.
//!
//! # Architecture
//!
//! The crate is organized into four modules:
//!
//! - **`schema`** — `CREATE TABLE` generation and namespace name checks
//! - **`init`** — schema initialization and status ([`initialize`], [`schema_status`])
//! - **`convert`** — `Task` ↔ SQL row transformations
//! - **`store`** — runtime task access ([`TaskStore`])
//!
//! # Quick start
//!
//! ```no_run
//! use task_manager_core::TaskState;
//! use task_manager_sqlite::{ConnectionConfig, TaskStore};
//!
//! let store = TaskStore::open(&ConnectionConfig::new("data"), "task_manager").unwrap();
//!
//! let id = store.add_raw("Task A", "Desc A", "pending").unwrap();
//! store.update_state(id, TaskState::InProgress).unwrap();
//! println!("{} tasks", store.list().unwrap().len());
//! ```
//!
//! # Namespaces
//!
//! Each namespace is a separate database file inside the configured data
//! directory, allowing isolated task lists side by side. Namespace names must
//! contain only alphanumeric characters and underscores.

mod convert;
mod error;
mod init;
mod schema;
mod store;

pub use error::{Result, SqliteError};
pub use init::{ConnectionConfig, SchemaStatus, initialize, initialize_connection, schema_status};
pub use schema::{TASKS_TABLE, generate_schema_sql};
pub use store::TaskStore;
