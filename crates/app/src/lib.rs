//! # offhours-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HolidaySource`: fetch the public-holiday calendar for a year
//!   - `Ec2Provider` / `LightsailProvider`: list resources, start and stop them
//!   - `DecisionLog`: append & query invocation reports
//! - Define **driving/inbound ports** as use-case structs:
//!   - `Scheduler`: fetch inputs, evaluate every rule, dispatch, record
//!   - `ReportService`: read back recorded invocations
//! - Orchestrate domain objects without knowing *how* providers or storage work
//!
//! ## Dependency rule
//! Depends on `offhours-domain` only (plus `tokio`/`futures` for concurrency).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod scheduler;
pub mod services;
