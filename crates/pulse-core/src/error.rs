//! Error taxonomy for the engine.
//!
//! Every fallible operation returns [`StoreError`]; nothing panics and no
//! failure is fatal to the caller. Each variant maps to a stable `E####`
//! code so frontends and scripts can branch without parsing messages.

use thiserror::Error;

/// Which entity collection a lookup missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Item,
    Member,
    Report,
}

impl EntityKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Item => "work item",
            Self::Member => "team member",
            Self::Report => "report",
        }
    }
}

/// Failures surfaced by the store, query layer, and config loader.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced id does not exist in the store.
    #[error("{} {id} not found", kind.label())]
    NotFound { kind: EntityKind, id: u64 },

    /// Caller-supplied data failed validation (e.g. a blank title).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A string did not name a known enum value.
    #[error("invalid {field}: {value:?}")]
    InvalidEnumValue { field: &'static str, value: String },

    /// Engine config file could not be read or parsed.
    #[error("config error: {0}")]
    ConfigParse(String),
}

impl StoreError {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E1002",
            Self::NotFound { .. } => "E2001",
            Self::InvalidEnumValue { .. } => "E2005",
            Self::InvalidInput(_) => "E4001",
        }
    }

    /// Optional remediation hint surfaced alongside CLI errors.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => Some("List current ids with `pulse list`."),
            Self::InvalidInput(_) => None,
            Self::InvalidEnumValue { .. } => {
                Some("Use one of the documented priority/status values.")
            }
            Self::ConfigParse(_) => Some("Fix syntax in the config file and retry."),
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
