// crates/nodegen-model/src/canopen.rs

//! CANopen manager and device settings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifies a CANopen device by the node it represents and the interface it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CanOpenDeviceId {
    pub node_index: u32,
    pub interface_number: u8,
}

/// Access rights of an object dictionary entry, as declared by the EDS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OdAccess {
    /// read only access
    ReadOnly,
    /// write only access
    WriteOnly,
    /// read and write access
    ReadWrite,
    /// read and write, mappable to RPDOs
    ReadWriteRpdo,
    /// read and write, mappable to TPDOs
    ReadWriteTpdo,
    /// read only access, value is constant
    Constant,
}

impl OdAccess {
    pub fn is_writable(self) -> bool {
        matches!(
            self,
            OdAccess::WriteOnly
                | OdAccess::ReadWrite
                | OdAccess::ReadWriteRpdo
                | OdAccess::ReadWriteTpdo
        )
    }
}

/// One sub-index of an object dictionary object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdEntry {
    #[serde(default)]
    pub name: String,
    pub access: OdAccess,
}

/// The EDS-derived object dictionary of a device.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectDictionary {
    /// Objects by index, then sub-index.
    pub objects: BTreeMap<u16, BTreeMap<u8, OdEntry>>,
}

impl ObjectDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, index: u16, sub_index: u8, access: OdAccess) {
        self.objects.entry(index).or_default().insert(
            sub_index,
            OdEntry {
                name: String::new(),
                access,
            },
        );
    }

    pub fn entry(&self, index: u16, sub_index: u8) -> Option<&OdEntry> {
        self.objects.get(&index).and_then(|o| o.get(&sub_index))
    }

    /// True if the entry exists and the manager may write it via SDO.
    pub fn is_writable(&self, index: u16, sub_index: u8) -> bool {
        self.entry(index, sub_index)
            .is_some_and(|e| e.access.is_writable())
    }

    /// Sub-indices above 0 declared for `index`, ascending.
    pub fn sub_indices(&self, index: u16) -> Vec<u8> {
        self.objects
            .get(&index)
            .map(|o| o.keys().copied().filter(|s| *s != 0).collect())
            .unwrap_or_default()
    }
}

/// Per-device settings held by the manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanOpenDeviceInfo {
    pub id: CanOpenDeviceId,
    pub name: String,
    /// CANopen node ID of the device.
    pub node_id: u8,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub no_initialization: bool,
    #[serde(default)]
    pub factory_settings_active: bool,
    /// Sub-index of 0x1011 used to restore factory settings.
    #[serde(default)]
    pub reset_node_sub_index: u8,
    #[serde(default)]
    pub heartbeat_producing: bool,
    #[serde(default)]
    pub heartbeat_producer_time_ms: u16,
    #[serde(default)]
    pub heartbeat_consuming: bool,
    #[serde(default)]
    pub heartbeat_consumer_time_ms: u16,
    #[serde(default)]
    pub object_dictionary: ObjectDictionary,
}

impl CanOpenDeviceInfo {
    pub fn new(id: CanOpenDeviceId, name: &str, node_id: u8) -> Self {
        Self {
            id,
            name: name.into(),
            node_id,
            optional: false,
            no_initialization: false,
            factory_settings_active: false,
            reset_node_sub_index: 0,
            heartbeat_producing: false,
            heartbeat_producer_time_ms: 0,
            heartbeat_consuming: false,
            heartbeat_consumer_time_ms: 0,
            object_dictionary: ObjectDictionary::new(),
        }
    }
}

/// What the manager does when a mandatory device fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NmtErrorBehavior {
    #[default]
    ResetAllDevices,
    ResetFailedDevice,
    StopAllDevices,
}

/// Settings of the CANopen manager on one interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanOpenManagerInfo {
    pub node_id: u8,
    #[serde(default)]
    pub autostart: bool,
    #[serde(default)]
    pub start_devices: bool,
    #[serde(default)]
    pub nmt_start_all: bool,
    #[serde(default)]
    pub nmt_error_behavior: NmtErrorBehavior,
    #[serde(default)]
    pub heartbeat_producing: bool,
    #[serde(default)]
    pub heartbeat_producer_time_ms: u16,
    #[serde(default)]
    pub sdo_timeout_ms: u16,
    #[serde(default)]
    pub sync_producing: bool,
    #[serde(default)]
    pub sync_cycle_time_us: u32,
    #[serde(default)]
    pub sync_window_length_us: u32,
    #[serde(default)]
    pub devices: Vec<CanOpenDeviceInfo>,
}

impl CanOpenManagerInfo {
    pub fn new(node_id: u8) -> Self {
        Self {
            node_id,
            autostart: true,
            start_devices: true,
            nmt_start_all: false,
            nmt_error_behavior: NmtErrorBehavior::ResetAllDevices,
            heartbeat_producing: false,
            heartbeat_producer_time_ms: 0,
            sdo_timeout_ms: 100,
            sync_producing: false,
            sync_cycle_time_us: 0,
            sync_window_length_us: 0,
            devices: Vec::new(),
        }
    }

    pub fn device(&self, id: &CanOpenDeviceId) -> Option<&CanOpenDeviceInfo> {
        self.devices.iter().find(|d| d.id == *id)
    }

    /// Position of a device in the manager's device table.
    pub fn device_position(&self, id: &CanOpenDeviceId) -> Option<usize> {
        self.devices.iter().position(|d| d.id == *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writability_query() {
        let mut od = ObjectDictionary::new();
        od.insert(0x1017, 0, OdAccess::ReadWrite);
        od.insert(0x1018, 1, OdAccess::ReadOnly);
        assert!(od.is_writable(0x1017, 0));
        assert!(!od.is_writable(0x1018, 1));
        assert!(!od.is_writable(0x1005, 0));
    }

    #[test]
    fn test_sub_indices_skip_zero() {
        let mut od = ObjectDictionary::new();
        od.insert(0x1016, 0, OdAccess::ReadOnly);
        od.insert(0x1016, 2, OdAccess::ReadWrite);
        od.insert(0x1016, 1, OdAccess::ReadWrite);
        assert_eq!(od.sub_indices(0x1016), vec![1, 2]);
        assert!(od.sub_indices(0x1A00).is_empty());
    }

    #[test]
    fn test_device_lookup() {
        let id = CanOpenDeviceId {
            node_index: 3,
            interface_number: 0,
        };
        let mut mgr = CanOpenManagerInfo::new(1);
        mgr.devices.push(CanOpenDeviceInfo::new(id, "IoModule", 5));
        assert_eq!(mgr.device(&id).map(|d| d.node_id), Some(5));
        assert_eq!(mgr.device_position(&id), Some(0));
    }
}
