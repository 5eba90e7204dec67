//! # offhours-domain
//!
//! Pure domain model for the offhours power scheduler.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Rules** (when, on which weekdays, and what to do to which resource)
//! - Define the **Holiday calendar** and the **Resource snapshot** with one
//!   inventory per provider kind
//! - Define **Decisions** (fire or skip, with a machine-checkable reason)
//! - Contain the **decision engine**: window, weekday, holiday, lookup, and
//!   idempotency gates evaluated per rule
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod decision;
pub mod engine;
pub mod holiday;
pub mod report;
pub mod resource;
pub mod rule;
