// crates/nodegen/src/util/mod.rs

pub mod literal;
pub mod naming;
pub mod project_id;
pub mod reference;
pub mod writer;

pub use literal::{LiteralError, format_value};
pub use project_id::ProjectId;
pub use reference::Reference;
pub use writer::{FilePair, Row, SourceFile, section_header, write_pair};
