// crates/nodegen-model/src/node.rs

//! The root of a configuration snapshot.

use crate::can::CanProtocol;
use crate::canopen::CanOpenManagerInfo;
use crate::datapool::Datapool;
use crate::error::ModelError;
use crate::halc::HalcConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One embedded node: its applications, Datapools and communication setup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub data_blocks: Vec<DataBlock>,
    pub datapools: Vec<Datapool>,
    pub can_protocols: Vec<CanProtocol>,
    /// CANopen managers keyed by the CAN interface number they run on.
    #[serde(default)]
    pub canopen_managers: BTreeMap<u8, CanOpenManagerInfo>,
    #[serde(default)]
    pub halc_config: Option<HalcConfig>,
    #[serde(default)]
    pub com_interfaces: Vec<ComInterface>,
    #[serde(default)]
    pub server_settings: ServerSettings,
}

impl Node {
    /// Loads a snapshot from its JSON hand-off representation.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the snapshot back into JSON.
    pub fn to_json_string(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the Data Block at `index` or a range error.
    pub fn data_block(&self, index: usize) -> Result<&DataBlock, ModelError> {
        self.data_blocks
            .get(index)
            .ok_or(ModelError::IndexOutOfRange {
                collection: "data blocks",
                index,
                len: self.data_blocks.len(),
            })
    }

    /// Returns the Datapool at `index` or a range error.
    pub fn datapool(&self, index: usize) -> Result<&Datapool, ModelError> {
        self.datapools.get(index).ok_or(ModelError::IndexOutOfRange {
            collection: "datapools",
            index,
            len: self.datapools.len(),
        })
    }

    /// True if the Data Block at `index` hosts the diagnostic protocol driver.
    pub fn is_dpd_host(&self, data_block_index: usize) -> bool {
        self.server_settings.dpd_data_block == Some(data_block_index)
    }

    /// Indices of all Datapools owned by the given Data Block, in node order.
    pub fn datapools_owned_by(&self, data_block_index: usize) -> Vec<usize> {
        self.datapools
            .iter()
            .enumerate()
            .filter(|(_, dp)| dp.owner == Some(data_block_index))
            .map(|(i, _)| i)
            .collect()
    }

    /// Finds the CAN protocol backed by the Datapool at `datapool_index`.
    pub fn protocol_for_datapool(&self, datapool_index: usize) -> Option<&CanProtocol> {
        self.can_protocols
            .iter()
            .find(|p| p.datapool_index == datapool_index)
    }

    /// Finds the CAN interface with the given interface number.
    pub fn can_interface(&self, number: u8) -> Option<&ComInterface> {
        self.com_interfaces
            .iter()
            .find(|i| i.kind == InterfaceKind::Can && i.number == number)
    }
}

/// An application on the node, programmable or otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBlock {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    pub kind: DataBlockKind,
    /// Declared compatibility version of the generated code (1-6 are known).
    pub code_format_version: u16,
    /// Process ID used by the diagnostic protocol to address this application.
    pub process_id: u8,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// What a Data Block is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataBlockKind {
    /// An application compiled against generated code.
    Programmable,
    /// A HALC parameter set (no firmware build).
    ParameterSetHalc,
    /// A prebuilt binary; nothing can be generated for it.
    Binary,
}

/// Physical bus type of a communication interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterfaceKind {
    Can,
    Ethernet,
}

/// A communication interface of the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComInterface {
    pub kind: InterfaceKind,
    /// Zero-based interface number (CAN1 is 0).
    pub number: u8,
    /// Diagnostic node ID on this bus.
    pub node_id: u8,
    #[serde(default)]
    pub diagnosis_server: bool,
    #[serde(default)]
    pub routing: bool,
    #[serde(default)]
    pub bitrate_kbps: u32,
}

/// Settings of the diagnostic protocol driver (DPD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Data Block that hosts the DPD, if any.
    pub dpd_data_block: Option<usize>,
    pub max_clients: u8,
    pub max_parallel_transmissions: u8,
    pub max_tx_message_buffer_size: u16,
    pub max_rx_routing_message_buffer_size: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            dpd_data_block: None,
            max_clients: 1,
            max_parallel_transmissions: 64,
            max_tx_message_buffer_size: 585,
            max_rx_routing_message_buffer_size: 585,
        }
    }
}
