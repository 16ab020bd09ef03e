//! Recoverable generation diagnostics.
//!
//! Members and objects that cannot be emitted are skipped. Each skip is
//! recorded as a [`Diagnostic`] on the generated unit and logged at `warn`.

use ironidl_schema::MemberIssueKind;
use std::fmt;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A member uses a type or shape with no mapping.
    UnsupportedMember {
        /// Why the member was skipped.
        reason: String,
    },
    /// A declaration kind without a template.
    UnsupportedObject {
        /// Declared kind.
        kind: String,
    },
    /// Parent class missing from the registry. Inherited parts were omitted.
    UnresolvedParent {
        /// Parent class name.
        parent: String,
    },
    /// Pointer type naming a class missing from the registry.
    UnresolvedClass {
        /// Referenced class name.
        class: String,
    },
    /// Member rejected by the per-member schema checks.
    InvalidMember {
        /// What is wrong with it.
        issue: MemberIssueKind,
    },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedMember { reason } => write!(f, "unsupported member: {reason}"),
            Self::UnsupportedObject { kind } => write!(f, "unsupported declaration kind '{kind}'"),
            Self::UnresolvedParent { parent } => {
                write!(f, "unresolved parent '{parent}', inherited members omitted")
            }
            Self::UnresolvedClass { class } => write!(f, "unresolved class '{class}'"),
            Self::InvalidMember { issue } => write!(f, "{issue}, member skipped"),
        }
    }
}

/// One recoverable issue found while generating a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Unit filename.
    pub unit: String,
    /// Declared object name.
    pub object: String,
    /// Member name, when the issue concerns a single member.
    pub member: Option<String>,
    /// Issue.
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}: {}.{}: {}", self.unit, self.object, member, self.kind),
            None => write!(f, "{}: {}: {}", self.unit, self.object, self.kind),
        }
    }
}

/// Collects the diagnostics of one unit.
#[derive(Debug)]
pub struct DiagnosticSink {
    unit: String,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Creates an empty sink for a unit.
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Records and logs a diagnostic.
    pub fn report(&mut self, object: &str, member: Option<&str>, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            unit: self.unit.clone(),
            object: object.to_string(),
            member: member.map(str::to_string),
            kind,
        };
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Number of diagnostics recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Consumes the sink.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
