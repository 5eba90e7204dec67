//! Common error types used across the workspace.
//!
//! Expected skip conditions (outside the fire window, holiday, already in the
//! target state, …) are **not** errors: they are reported as
//! [`Decision`](crate::decision::Decision)s. The variants below cover the
//! conditions that abort an operation.

/// Base error type for every offhours crate.
///
/// Each layer defines its own typed errors and converts into this one via
/// `From`.
#[derive(Debug, thiserror::Error)]
pub enum OffhoursError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A looked-up record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A collaborator that feeds the engine (holiday calendar, provider
    /// inventory) failed. Fatal to the whole invocation.
    #[error("upstream {source_name} failed")]
    Upstream {
        source_name: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A provider rejected or failed to acknowledge a start/stop command.
    #[error("dispatch to {target} failed")]
    Dispatch {
        target: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl OffhoursError {
    /// Wrap a collaborator failure.
    pub fn upstream(
        source_name: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Upstream {
            source_name,
            source: source.into(),
        }
    }

    /// Wrap a provider command failure for the given target.
    pub fn dispatch(
        target: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Dispatch {
            target: target.into(),
            source: source.into(),
        }
    }

    /// Render the message followed by every source, `outer: inner: root`.
    #[must_use]
    pub fn with_sources(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("resource id must not be empty")]
    EmptyResourceId,

    #[error("hour {0} is out of range (0-23)")]
    HourOutOfRange(u8),

    #[error("minute {0} is out of range (0-59)")]
    MinuteOutOfRange(u8),

    #[error("weekday {0} is out of range (0=Sunday..6=Saturday)")]
    WeekdayOutOfRange(u8),

    #[error("at least one operating weekday is required")]
    NoWeekdays,

    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

/// A record that was looked up by id does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
