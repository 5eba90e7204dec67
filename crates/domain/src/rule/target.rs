//! What a rule acts on: resource kind, requested action, and the resolved
//! operation.

use serde::{Deserialize, Serialize};

/// Provider family a resource belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// EC2 instance, identified by its instance id.
    #[serde(alias = "EC2")]
    Ec2,
    /// Lightsail instance, identified by its name.
    #[serde(alias = "Lightsail")]
    Lightsail,
}

impl ResourceKind {
    /// Short tag used in logs and rendered details.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ec2 => "ec2",
            Self::Lightsail => "lightsail",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Power transition requested by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    #[serde(alias = "Start")]
    Start,
    #[serde(alias = "Stop")]
    Stop,
}

impl PowerAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl std::fmt::Display for PowerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value read from a schedule document that is either one of the known
/// variants of `T` or an unrecognised label, kept verbatim for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Declared<T> {
    Known(T),
    Unrecognized(String),
}

impl<T> Declared<T> {
    /// The known value, if any.
    pub fn known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unrecognized(_) => None,
        }
    }
}

impl<T> From<T> for Declared<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Declared<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(value) => value.fmt(f),
            Self::Unrecognized(label) => f.write_str(label),
        }
    }
}

/// A supported `(kind, action)` pair, ready to be dispatched to a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    pub kind: ResourceKind,
    pub action: PowerAction,
}

impl Operation {
    /// Resolve the declared kind and action of a rule into a supported
    /// operation. Returns `None` when either side is unrecognised.
    ///
    /// Every known pair is supported; the provider dispatch in the app layer
    /// matches exhaustively on `(kind, action)`.
    #[must_use]
    pub fn resolve(kind: &Declared<ResourceKind>, action: &Declared<PowerAction>) -> Option<Self> {
        Some(Self {
            kind: *kind.known()?,
            action: *action.known()?,
        })
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.action)
    }
}
