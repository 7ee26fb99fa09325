use thiserror::Error;

/// Stable two-token status code for an unavailable resource, consumed by the
/// response-formatting layer.
pub const UNAVAILABLE_STATUS: &str = "1 3";

/// Errors raised while resolving a request path to an image source.
///
/// All variants surface to the boundary as a single "resource unavailable"
/// class; the original diagnostic text is preserved in the variant payload.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// The path is neither a regular file nor the stem of an image sequence.
    #[error("{path} is neither a file nor part of an image sequence")]
    NotFileNotSequence { path: String },

    /// Sequence discovery found more than one candidate extension.
    #[error("there are multiple file extensions matching {pattern}")]
    AmbiguousExtension { pattern: String },

    /// The detected extension maps to no built-in codec.
    #[error("unsupported image type: {extension}")]
    UnsupportedType { extension: String },

    /// The selected codec failed to open the source.
    #[error("unable to open {path}: {message}")]
    DecoderOpen { path: String, message: String },

    /// Filesystem error during probing or sequence discovery.
    #[error("I/O error: {0}")]
    Io(String),
}

impl ResolveError {
    /// Two-token status code for the response layer.
    ///
    /// Every resolution failure is an unavailable resource; the taxonomy is
    /// preserved in the diagnostic text, not the code.
    pub fn status_code(&self) -> &'static str {
        UNAVAILABLE_STATUS
    }

    /// Structured failure for the response-formatting layer: stable code plus
    /// the diagnostic string.
    pub fn status(&self) -> StatusReport {
        StatusReport {
            code: self.status_code(),
            diagnostic: self.to_string(),
        }
    }
}

/// A status code + diagnostic pair handed to the response formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub code: &'static str,
    pub diagnostic: String,
}

/// Errors reported by a codec collaborator's open operation.
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    /// The source exists but could not be opened (corrupt or unreadable).
    #[error("corrupt or unreadable image: {0}")]
    Open(String),
}

// =============================================================================
// Tests
// =============================================================================
