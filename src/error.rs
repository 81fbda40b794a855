//! Error types for the Sourcemint orchestration core.

use crate::operation::Operation;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`PmError`].
///
/// Attaching remediation to an error never changes its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Precondition,
    HandlerResolution,
    Delegation,
    InvalidState,
    Config,
    Io,
}

/// Canned guidance attached to failures the user can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    /// A clone failed after the target directory was prepared.
    CloneFailure,
}

impl Remediation {
    pub fn lines(&self) -> &'static [&'static str] {
        match self {
            Remediation::CloneFailure => &[
                "We had an error cloning.",
                "Try re-cloning with the -d flag to delete the target directory first (or delete yourself and try again).",
                "If cloning keeps failing due to GIT errors you need to resolve these. Like setting up SSH for accessing github.",
                "If cloning seems to fail due to a corrupt git repository or `sm` or `npm` error you can wipe the install cache (~/.sourcemint/*-cache) and try again.",
                "If problems persist email your clone URL to the mailing list for support (must be publicly accessible): http://groups.google.com/group/sourcemint",
            ],
        }
    }

    /// Render the guidance as plain text, one line per hint.
    pub fn help_text(&self) -> String {
        self.lines().join("\n")
    }

    /// Print the guidance to stderr in red.
    pub fn show_help(&self) {
        eprintln!();
        for line in self.lines() {
            eprintln!("{}", line.red());
        }
        eprintln!();
    }
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum PmError {
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("No backend handler registered for package manager type '{pm_type}'")]
    HandlerResolution { pm_type: String },

    #[error("No command registered for operation '{0}'")]
    CommandUnavailable(Operation),

    #[error("{operation} failed: {message}")]
    Delegation { operation: String, message: String },

    #[error("Command for operation '{0}' panicked: {1}")]
    CommandPanicked(Operation, String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{error}")]
    Remediable {
        error: Box<PmError>,
        remediation: Remediation,
    },
}

impl PmError {
    pub fn delegation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        PmError::Delegation {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PmError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PmError::Precondition(_) => ErrorKind::Precondition,
            PmError::HandlerResolution { .. } => ErrorKind::HandlerResolution,
            PmError::CommandUnavailable(_)
            | PmError::Delegation { .. }
            | PmError::CommandPanicked(..) => ErrorKind::Delegation,
            PmError::InvalidState(_) => ErrorKind::InvalidState,
            PmError::Config(_) => ErrorKind::Config,
            PmError::Io { .. } => ErrorKind::Io,
            PmError::Remediable { error, .. } => error.kind(),
        }
    }

    pub fn remediation(&self) -> Option<Remediation> {
        match self {
            PmError::Remediable { remediation, .. } => Some(*remediation),
            _ => None,
        }
    }

    /// Attach guidance to this error. An error that already carries guidance is
    /// returned unchanged.
    pub fn with_remediation(self, remediation: Remediation) -> Self {
        match self {
            PmError::Remediable { .. } => self,
            error => PmError::Remediable {
                error: Box::new(error),
                remediation,
            },
        }
    }

    /// The error with any attached guidance stripped.
    pub fn inner(&self) -> &PmError {
        match self {
            PmError::Remediable { error, .. } => error.inner(),
            other => other,
        }
    }
}

impl From<config::ConfigError> for PmError {
    fn from(err: config::ConfigError) -> Self {
        PmError::Config(err.to_string())
    }
}
