// crates/nodegen/src/encode/mod.rs

pub mod concise;
pub mod signal;

pub use concise::{ConciseDcf, ConciseEntry};
pub use signal::{MuxGroup, SignalDescriptor, SignalEncodeError, group_by_mux};
