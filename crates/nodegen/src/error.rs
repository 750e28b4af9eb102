// crates/nodegen/src/error.rs

use crate::encode::SignalEncodeError;
use crate::util::literal::LiteralError;
use nodegen_model::ModelError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Coarse classification of an export failure, returned to callers that
/// only need a result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad Data Block, interface or Datapool index.
    Range,
    /// Wrong artifact kind, unknown format version or illegal scope request.
    Unsupported,
    /// Input entities that do not fit together.
    Structural,
    /// The destination could not be written.
    Io,
}

/// Errors that can occur while exporting a Data Block.
#[derive(Debug)]
pub enum ExportError {
    /// An index pointed past the end of a collection.
    Range {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// The request cannot be served for this configuration or format version.
    Unsupported(String),

    /// Paired data is missing or inconsistent.
    Structural(String),

    /// A numeric value has no valid C literal.
    Literal(LiteralError),

    /// Export options or the snapshot could not be (de)serialized.
    Json(serde_json::Error),

    /// A file could not be written.
    Io { path: PathBuf, source: io::Error },
}

impl ExportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::Range { .. } => ErrorKind::Range,
            ExportError::Unsupported(_) | ExportError::Json(_) => ErrorKind::Unsupported,
            ExportError::Structural(_) | ExportError::Literal(_) => ErrorKind::Structural,
            ExportError::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn structural(msg: impl Into<String>) -> Self {
        ExportError::Structural(msg.into())
    }

    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        ExportError::Unsupported(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<LiteralError> for ExportError {
    fn from(e: LiteralError) -> Self {
        ExportError::Literal(e)
    }
}

impl From<SignalEncodeError> for ExportError {
    fn from(e: SignalEncodeError) -> Self {
        ExportError::Structural(format!("signal cannot be encoded: {}", e))
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Json(e)
    }
}

impl From<ModelError> for ExportError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::IndexOutOfRange {
                collection,
                index,
                len,
            } => ExportError::Range {
                what: collection,
                index,
                len,
            },
            ModelError::Json(e) => ExportError::Json(e),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Range { what, index, len } => {
                write!(f, "Index {} out of range for {} (length {})", index, what, len)
            }
            ExportError::Unsupported(msg) => write!(f, "Unsupported configuration: {}", msg),
            ExportError::Structural(msg) => write!(f, "Inconsistent configuration: {}", msg),
            ExportError::Literal(e) => write!(f, "Literal error: {}", e),
            ExportError::Json(e) => write!(f, "Serialization error: {}", e),
            ExportError::Io { path, source } => {
                write!(f, "Could not write '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Literal(e) => Some(e),
            ExportError::Json(e) => Some(e),
            ExportError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_model_range_error() {
        let err: ExportError = ModelError::IndexOutOfRange {
            collection: "data blocks",
            index: 3,
            len: 1,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(
            err.to_string(),
            "Index 3 out of range for data blocks (length 1)"
        );
    }

    #[test]
    fn test_literal_error_is_structural() {
        let err: ExportError = LiteralError::NotFinite { value: f64::NAN }.into();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = ExportError::io("/nowhere/x.h", io::Error::other("denied"));
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("/nowhere/x.h"));
    }
}
