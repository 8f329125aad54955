//! Registry error types.

use thiserror::Error;

/// Errors raised while registering or rendering resources.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// Kind string is neither a script nor a stylesheet.
    #[error("invalid resource kind: {0:?} (expected \"js\" or \"css\")")]
    InvalidResourceKind(String),

    /// Form string is neither literal nor dependency.
    #[error("invalid resource form: {0:?} (expected \"raw\" or \"dependency\")")]
    InvalidForm(String),

    /// Attribute map key that cannot be rendered as an HTML attribute name.
    #[error("invalid attribute name: {0:?}")]
    InvalidAttributeName(String),

    /// Column-form descriptor with sequences of different lengths.
    #[error("column '{field}' has {found} entries, expected {expected}")]
    ColumnLengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// A package-relative script has no owning namespace.
    #[error("resource '{path}' has a package path but no namespace")]
    MissingNamespace { path: String },

    /// No version is known for a namespace.
    #[error("no version registered for package: {0}")]
    UnknownPackage(String),

    /// Malformed manifest entry.
    #[error("manifest error: {0}")]
    Manifest(String),
}
