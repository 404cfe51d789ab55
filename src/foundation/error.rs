use std::fmt;

use crate::schema::validate::Diagnostic;

/// Convenience result type used across slidekit.
pub type SlideResult<T> = Result<T, SlideError>;

/// Kind of entity a weak reference points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceKind {
    /// A slide id.
    Slide,
    /// A layer id (scoped to one slide).
    Layer,
    /// A slide object id (scoped to one slide).
    Object,
    /// A project variable id.
    Variable,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Slide => "slide",
            Self::Layer => "layer",
            Self::Object => "object",
            Self::Variable => "variable",
        };
        f.write_str(s)
    }
}

/// Top-level error taxonomy used by slidekit APIs.
#[derive(thiserror::Error, Debug)]
pub enum SlideError {
    /// The serialized document is not parseable or its root object is malformed.
    #[error("format error: {0}")]
    Format(String),

    /// The validator rejected the project graph.
    #[error("validation error: {}", join_diagnostics(.0))]
    Validation(Vec<Diagnostic>),

    /// An id passed to the runtime does not resolve against the loaded project.
    #[error("dangling reference: {kind} '{id}'")]
    DanglingReference {
        /// What the id was expected to name.
        kind: ReferenceKind,
        /// The unresolved id.
        id: String,
    },

    /// The engine was driven in a way its state machine does not allow.
    #[error("state invariant violated: {0}")]
    StateInvariant(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideError {
    /// Build a [`SlideError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`SlideError::DanglingReference`] value.
    pub fn dangling(kind: ReferenceKind, id: impl Into<String>) -> Self {
        Self::DanglingReference {
            kind,
            id: id.into(),
        }
    }

    /// Build a [`SlideError::StateInvariant`] value.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::StateInvariant(msg.into())
    }

    /// Diagnostics carried by a [`SlideError::Validation`] value, empty otherwise.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Validation(d) => d,
            _ => &[],
        }
    }
}

fn join_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
