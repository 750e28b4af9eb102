// crates/nodegen-model/src/error.rs

use core::fmt;

/// Errors that can occur while loading or querying a configuration snapshot.
#[derive(Debug)]
pub enum ModelError {
    /// The JSON hand-off document could not be deserialized.
    Json(serde_json::Error),

    /// A lookup by index went past the end of a collection.
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::Json(e)
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Json(e) => write!(f, "Snapshot deserialization error: {}", e),
            ModelError::IndexOutOfRange {
                collection,
                index,
                len,
            } => write!(
                f,
                "Index {} is out of range for {} (length {})",
                index, collection, len
            ),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Json(e) => Some(e),
            ModelError::IndexOutOfRange { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ModelError;

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
        let err: ModelError = json_err.into();
        assert!(matches!(err, ModelError::Json(_)));
    }

    #[test]
    fn test_display_index_out_of_range() {
        let err = ModelError::IndexOutOfRange {
            collection: "data blocks",
            index: 4,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "Index 4 is out of range for data blocks (length 2)"
        );
    }
}
