// crates/nodegen/src/util/writer.rs

//! Line lists for generated C files and their all-or-nothing persistence.

use crate::error::ExportError;
use log::{debug, error};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Width of separator lines and section headers.
pub const LINE_WIDTH: usize = 120;

/// Indentation unit of generated code.
pub const INDENT: &str = "   ";

/// `/* -- Title ----...--- */` padded to [`LINE_WIDTH`].
pub fn section_header(title: &str) -> String {
    let head = format!("/* -- {} ", title);
    let dashes = LINE_WIDTH.saturating_sub(head.len() + 3).max(3);
    format!("{}{} */", head, "-".repeat(dashes))
}

/// One entry of a brace initializer, optionally spanning several lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    lines: Vec<String>,
    comment: Option<String>,
}

impl Row {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            lines: vec![body.into()],
            comment: None,
        }
    }

    /// A nested initializer, e.g. produced by [`braced`].
    pub fn nested(lines: Vec<String>) -> Self {
        Self {
            lines,
            comment: None,
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Renders `rows` between braces, separating rows with commas.
pub fn braced(rows: &[Row]) -> Vec<String> {
    let mut out = vec!["{".to_string()];
    for (i, row) in rows.iter().enumerate() {
        let last_row = i + 1 == rows.len();
        for (j, line) in row.lines.iter().enumerate() {
            let mut text = format!("{}{}", INDENT, line);
            if j + 1 == row.lines.len() {
                if !last_row {
                    text.push(',');
                }
                if let Some(c) = &row.comment {
                    text.push_str(&format!(" /* {} */", c));
                }
            }
            out.push(text);
        }
    }
    out.push("}".to_string());
    out
}

/// `{ a, b, c }` on one line.
pub fn inline_braced<S: AsRef<str>>(items: &[S]) -> String {
    let joined: Vec<&str> = items.iter().map(|s| s.as_ref()).collect();
    format!("{{ {} }}", joined.join(", "))
}

/// The ordered lines of one generated file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFile {
    lines: Vec<String>,
}

impl SourceFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, lines: I) {
        self.lines.extend(lines);
    }

    /// Blank line followed by a section header.
    pub fn section(&mut self, title: &str) {
        self.blank();
        self.lines.push(section_header(title));
    }

    /// Doxygen file comment.
    pub fn file_comment(&mut self, brief: &str, details: &[String]) {
        let separator = format!("//{}", "-".repeat(LINE_WIDTH - 2));
        self.lines.push(separator.clone());
        self.lines.push("/*!".into());
        self.lines.push("   \\file".into());
        self.lines.push(format!("   \\brief       {}", brief));
        if !details.is_empty() {
            self.blank();
            for d in details {
                self.lines.push(format!("   {}", d));
            }
        }
        self.blank();
        self.lines
            .push("   This file was generated. Manual changes will be lost.".into());
        self.lines.push("*/".into());
        self.lines.push(separator);
    }

    pub fn open_guard(&mut self, guard: &str) {
        self.lines.push(format!("#ifndef {}", guard));
        self.lines.push(format!("#define {}", guard));
    }

    pub fn close_guard(&mut self) {
        self.blank();
        self.lines.push("#endif".into());
    }

    pub fn open_extern_c(&mut self) {
        self.blank();
        self.lines.push("#ifdef __cplusplus".into());
        self.lines.push("extern \"C\" {".into());
        self.lines.push("#endif".into());
    }

    pub fn close_extern_c(&mut self) {
        self.blank();
        self.lines.push("#ifdef __cplusplus".into());
        self.lines.push("} //end of extern \"C\"".into());
        self.lines.push("#endif".into());
    }

    /// `declaration =` followed by a braced initializer and `;`.
    pub fn initializer(&mut self, declaration: &str, rows: &[Row]) {
        self.lines.push(format!("{} =", declaration));
        let mut body = braced(rows);
        if let Some(last) = body.last_mut() {
            last.push(';');
        }
        self.lines.extend(body);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True if any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    pub fn render(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Header and implementation of one artifact, sharing a file stem.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePair {
    pub stem: String,
    pub header: SourceFile,
    pub source: SourceFile,
}

impl FilePair {
    pub fn header_name(&self) -> String {
        format!("{}.h", self.stem)
    }

    pub fn source_name(&self) -> String {
        format!("{}.c", self.stem)
    }
}

/// Writes both halves of `pair` into `dir`.
///
/// Both files are staged as temporaries in `dir` and only then moved into
/// place. If anything fails, nothing of this pair remains and no path is
/// returned.
pub fn write_pair(dir: &Path, pair: &FilePair) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;

    let header_path = dir.join(pair.header_name());
    let source_path = dir.join(pair.source_name());

    let staged_header = stage(dir, &header_path, &pair.header)?;
    let staged_source = stage(dir, &source_path, &pair.source)?;

    staged_header
        .persist(&header_path)
        .map_err(|e| ExportError::io(&header_path, e.error))?;
    if let Err(e) = staged_source.persist(&source_path) {
        error!(
            "Removing {} after failing to write its implementation",
            header_path.display()
        );
        let _ = fs::remove_file(&header_path);
        return Err(ExportError::io(&source_path, e.error));
    }

    debug!("Wrote {} and {}", header_path.display(), source_path.display());
    Ok(vec![header_path, source_path])
}

fn stage(dir: &Path, target: &Path, file: &SourceFile) -> Result<NamedTempFile, ExportError> {
    let mut staged = NamedTempFile::new_in(dir).map_err(|e| ExportError::io(target, e))?;
    staged
        .write_all(file.render().as_bytes())
        .and_then(|_| staged.flush())
        .map_err(|e| ExportError::io(target, e))?;
    Ok(staged)
}
