//! Error types for menu inflation
//!
//! Only structural problems abort a build. Everything an individual item can
//! get wrong (unknown extension classes, bad attribute values) is logged and
//! absorbed by the inflater.

use thiserror::Error;

/// Fatal errors surfaced by [`crate::menu::MenuInflater::inflate`]
#[derive(Error, Debug)]
pub enum InflateError {
    #[error("expected menu root, found {}", found.as_deref().map(|n| format!("<{}>", n)).unwrap_or_else(|| "end of document".to_string()))]
    ExpectedMenuRoot { found: Option<String> },
    #[error("unexpected end of document")]
    UnexpectedEndOfDocument,
    #[error("malformed menu XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("failed to read menu resource: {0}")]
    Io(#[from] std::io::Error),
}

impl InflateError {
    /// Structural errors come from the document shape rather than the reader
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            InflateError::ExpectedMenuRoot { .. } | InflateError::UnexpectedEndOfDocument
        )
    }
}

/// Failure to construct an action view or action provider by class name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    #[error("no factory registered for class {0}")]
    UnknownClass(String),
    #[error("cannot instantiate class {class}: {reason}")]
    Construction { class: String, reason: String },
}
