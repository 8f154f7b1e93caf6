//! Protocol error types.

use openlink_core::BuildError;
use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that stop a stanza from being read or written at all.
///
/// Malformed values inside a recognizable stanza are never errors; they are
/// reported as diagnostics alongside the parsed stanza.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The wire text is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error while rendering.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid UTF-8 in XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Well-formed events that do not make up a single document tree.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The tree is not an `iq` wrapping an ad-hoc command.
    #[error("unexpected element '{found}', expected '{expected}'")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },

    /// The command node names a different operation than the one being read.
    #[error("unexpected command node '{found}', expected {expected}")]
    UnexpectedCommand {
        expected: &'static str,
        found: String,
    },

    /// The command node does not name a known OpenLink operation.
    #[error("unknown command node: {0}")]
    UnknownCommand(String),

    /// A builder rejected the stanza, e.g. a duplicate profile id.
    #[error(transparent)]
    Build(#[from] BuildError),
}
