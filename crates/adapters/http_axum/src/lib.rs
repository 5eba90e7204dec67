//! # offhours-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small **JSON API** for operators and tooling:
//!   - `GET  /health`               : liveness probe
//!   - `GET  /api/rules`            : the loaded rule set
//!   - `POST /api/invocations`      : run the scheduler now (or at a given instant)
//!   - `GET  /api/invocations`      : recent invocation reports, newest first
//!   - `GET  /api/invocations/{id}` : one invocation report
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map [`OffhoursError`](offhours_domain::error::OffhoursError) into status codes
//!
//! ## Dependency rule
//! Depends on `offhours-app` (for port traits and services) and `offhours-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
