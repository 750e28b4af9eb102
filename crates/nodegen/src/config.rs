// crates/nodegen/src/config.rs

use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Caller-supplied settings of an export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Directory the generated files are written to. Created if missing.
    pub output_dir: PathBuf,
    /// Emit factor/offset scaling macros where the format version supports them.
    pub scaling_support: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated"),
            scaling_support: true,
        }
    }
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Reads options from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = ExportOptions::from_json_str(r#"{ "output_dir": "out/app" }"#).unwrap();
        assert_eq!(options.output_dir, PathBuf::from("out/app"));
        assert!(options.scaling_support);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = ExportOptions::from_json_str("{ scaling_support: }").unwrap_err();
        assert!(matches!(err, ExportError::Json(_)));
    }
}
