//! # offhours-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the [`DecisionLog`](offhours_app::ports::DecisionLog) port
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between invocation reports and database rows
//!
//! ## Dependency rule
//! Depends on `offhours-app` (for port traits) and `offhours-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod decision_log;
pub mod error;
pub mod pool;

pub use decision_log::SqliteDecisionLog;
pub use pool::{Config, Database};
