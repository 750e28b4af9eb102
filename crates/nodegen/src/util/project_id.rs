// crates/nodegen/src/util/project_id.rs

use crate::error::ExportError;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Content hash shared by both halves of a generated file pair.
///
/// The header defines `<PREFIX>_PROJECT_ID_<ID>` as an empty function
/// definition and the implementation expands it. A header and an
/// implementation generated from different content therefore fail to
/// compile together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    /// Hashes the JSON serialization of `content`.
    pub fn compute<T: Serialize + ?Sized>(content: &T) -> Result<Self, ExportError> {
        let bytes = serde_json::to_vec(content)?;
        let digest = Sha256::digest(&bytes);
        Ok(ProjectId(hex::encode_upper(&digest[..4])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Header side of the idiom.
    pub fn define_lines(&self, prefix: &str) -> [String; 2] {
        [
            "///unique ID to ensure consistency between .h and .c files".to_string(),
            format!(
                "#define {}_PROJECT_ID_{} void {}_project_id_{}(void) {{}}",
                prefix.to_ascii_uppercase(),
                self.0,
                prefix.to_ascii_lowercase(),
                self.0.to_ascii_lowercase()
            ),
        ]
    }

    /// Implementation side of the idiom.
    pub fn check_line(&self, prefix: &str) -> String {
        format!("{}_PROJECT_ID_{}", prefix.to_ascii_uppercase(), self.0)
    }
}

impl core::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
