// crates/nodegen-model/src/lib.rs

#![doc = "Configuration snapshot of an embedded communication node."]
#![doc = ""]
#![doc = "The types in this crate are built and validated by the project layer and"]
#![doc = "handed to the export engine read-only. Every collection is a `Vec` or a"]
#![doc = "`BTreeMap` so that serializing a snapshot is deterministic."]

// --- Crate Modules ---

pub mod can;
pub mod canopen;
pub mod datapool;
mod error;
pub mod halc;
pub mod node;

// --- Public API Re-exports ---

pub use can::{
    ByteOrder, CanMessage, CanProtocol, CanSignal, MessageContainer, MuxRole, ProtocolType,
    TxMethod,
};
pub use canopen::{
    CanOpenDeviceId, CanOpenDeviceInfo, CanOpenManagerInfo, NmtErrorBehavior, OdAccess,
    OdEntry, ObjectDictionary,
};
pub use datapool::{
    Access, Content, DataSet, Datapool, DatapoolKind, Element, List, Value, ValueType,
};
pub use error::ModelError;
pub use halc::{HalcChannel, HalcConfig, HalcDomain, HalcParameter, HalcVariant, SafetyMode};
pub use node::{ComInterface, DataBlock, DataBlockKind, InterfaceKind, Node, ServerSettings};
