// crates/nodegen-model/src/can.rs

//! CAN protocols, messages and signals.

use crate::canopen::CanOpenDeviceId;
use serde::{Deserialize, Serialize};

/// Communication protocol running on a CAN interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProtocolType {
    Layer2,
    ECeS,
    ECoS,
    CanOpen,
    J1939,
}

/// How a message is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxMethod {
    Cyclic,
    OnChange,
    OnEvent,
    /// CANopen PDO transmission type 0 (synchronous, acyclic).
    CanOpenType0,
    /// CANopen PDO transmission types 1-240 (every n-th SYNC).
    CanOpenType1To240,
    /// CANopen PDO transmission type 254 (manufacturer specific event).
    CanOpenType254,
    /// CANopen PDO transmission type 255 (device profile event).
    CanOpenType255,
}

/// Bit numbering of a signal within the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ByteOrder {
    #[default]
    Intel,
    Motorola,
}

/// Multiplexing role of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MuxRole {
    #[default]
    None,
    Multiplexer,
    /// Present only when the multiplexer carries this value.
    Multiplexed(u16),
}

/// A signal inside a CAN message, backed by one Datapool element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanSignal {
    pub bit_start: u16,
    pub bit_length: u16,
    #[serde(default)]
    pub byte_order: ByteOrder,
    #[serde(default)]
    pub mux: MuxRole,
    /// Index of the backing element in the message direction's list.
    pub element_index: u32,
    /// Object mapped by this signal on a CANopen device.
    #[serde(default)]
    pub od_index: u16,
    #[serde(default)]
    pub od_sub_index: u8,
}

impl CanSignal {
    pub fn new(element_index: u32, bit_start: u16, bit_length: u16) -> Self {
        Self {
            bit_start,
            bit_length,
            byte_order: ByteOrder::Intel,
            mux: MuxRole::None,
            element_index,
            od_index: 0,
            od_sub_index: 0,
        }
    }
}

/// A CAN message definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanMessage {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    pub can_id: u32,
    #[serde(default)]
    pub is_extended: bool,
    pub dlc: u16,
    pub tx_method: TxMethod,
    /// SYNC count for CANopen transmission types 1-240.
    #[serde(default)]
    pub canopen_sync_count: u8,
    #[serde(default)]
    pub cycle_time_ms: u32,
    /// Minimum distance between two on-change transmissions.
    #[serde(default)]
    pub delay_time_ms: u16,
    /// Reception timeout, 0 disables monitoring.
    #[serde(default)]
    pub timeout_ms: u32,
    pub signals: Vec<CanSignal>,
    /// CANopen device this PDO belongs to.
    #[serde(default)]
    pub canopen_owner: Option<CanOpenDeviceId>,
    /// Zero-based PDO number on the device.
    #[serde(default)]
    pub canopen_pdo_index: u16,
    #[serde(default = "default_true")]
    pub canopen_active: bool,
}

fn default_true() -> bool {
    true
}

impl CanMessage {
    pub fn new(name: &str, can_id: u32, dlc: u16, tx_method: TxMethod) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            can_id,
            is_extended: false,
            dlc,
            tx_method,
            canopen_sync_count: 0,
            cycle_time_ms: 0,
            delay_time_ms: 0,
            timeout_ms: 0,
            signals: Vec::new(),
            canopen_owner: None,
            canopen_pdo_index: 0,
            canopen_active: true,
        }
    }

    /// The multiplexer signal, if the message is multiplexed.
    pub fn multiplexer(&self) -> Option<&CanSignal> {
        self.signals
            .iter()
            .find(|s| s.mux == MuxRole::Multiplexer)
    }

    pub fn is_multiplexed(&self) -> bool {
        self.multiplexer().is_some()
    }

    pub fn has_signals(&self) -> bool {
        !self.signals.is_empty()
    }
}

/// The messages of one protocol on one interface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageContainer {
    #[serde(default)]
    pub active: bool,
    pub tx_messages: Vec<CanMessage>,
    pub rx_messages: Vec<CanMessage>,
}

impl MessageContainer {
    pub fn message_count(&self) -> usize {
        self.tx_messages.len() + self.rx_messages.len()
    }

    /// True if at least one message of either direction carries a signal.
    pub fn has_signals(&self) -> bool {
        self.tx_messages
            .iter()
            .chain(self.rx_messages.iter())
            .any(CanMessage::has_signals)
    }
}

/// A protocol instance with one container per CAN interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanProtocol {
    pub protocol: ProtocolType,
    /// The COM Datapool holding the signal values.
    pub datapool_index: usize,
    /// Indexed by interface number.
    pub containers: Vec<MessageContainer>,
}

impl CanProtocol {
    /// List holding the Tx signal values of `interface`.
    pub fn tx_list_index(interface: u8) -> usize {
        interface as usize * 2
    }

    /// List holding the Rx signal values of `interface`.
    pub fn rx_list_index(interface: u8) -> usize {
        interface as usize * 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplexer_lookup() {
        let mut msg = CanMessage::new("Status", 0x100, 8, TxMethod::Cyclic);
        msg.signals.push(CanSignal::new(0, 8, 8));
        assert!(!msg.is_multiplexed());
        let mut mux = CanSignal::new(1, 0, 8);
        mux.mux = MuxRole::Multiplexer;
        msg.signals.push(mux);
        assert_eq!(msg.multiplexer().map(|s| s.element_index), Some(1));
    }

    #[test]
    fn test_list_indices_alternate_per_interface() {
        assert_eq!(CanProtocol::tx_list_index(0), 0);
        assert_eq!(CanProtocol::rx_list_index(0), 1);
        assert_eq!(CanProtocol::tx_list_index(2), 4);
        assert_eq!(CanProtocol::rx_list_index(2), 5);
    }

    #[test]
    fn test_container_without_signals() {
        let mut container = MessageContainer::default();
        container
            .rx_messages
            .push(CanMessage::new("Empty", 0x200, 0, TxMethod::Cyclic));
        assert_eq!(container.message_count(), 1);
        assert!(!container.has_signals());
    }
}
