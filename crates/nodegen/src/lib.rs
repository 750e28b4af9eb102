// crates/nodegen/src/lib.rs

#![doc = "Export engine for embedded communication node configurations."]
#![doc = ""]
#![doc = "Turns a read-only `nodegen_model::Node` snapshot into the C header and"]
#![doc = "implementation pairs a target firmware build compiles against the runtime"]
#![doc = "library. Entry points:"]
#![doc = "- `export_data_block`: all files of one Data Block."]
#![doc = "- `export_node`: all files of every active Data Block."]

// --- Foundation Modules ---
mod config;
mod error;
mod log;
pub mod version;

// --- Shared Helpers and Encoders ---
pub mod encode;
pub mod util;

// --- Domain Emitters ---
pub mod emit;

// --- Orchestration ---
mod export;

// --- Top-level Exports ---
pub use config::ExportOptions;
pub use error::{ErrorKind, ExportError};
pub use export::{export_data_block, export_node, rename_com_elements};
