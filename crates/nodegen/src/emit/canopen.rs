// crates/nodegen/src/emit/canopen.rs

//! CANopen manager configuration for one CAN interface
//! (`canopen_mgr_can<N>.h/.c`), including the concise DCF of every device.

use crate::emit::comm::Direction;
use crate::emit::datapool;
use crate::emit::{close_header, open_header, open_source};
use crate::encode::{ConciseDcf, ConciseEntry, SignalDescriptor};
use crate::error::ExportError;
use crate::log::{ArtifactContext, gen_debug, gen_error, gen_info};
use crate::util::literal::{flag, hex_u32};
use crate::util::naming::{can_bus_name, lower, upper};
use crate::util::writer::{Row, inline_braced};
use crate::util::{FilePair, ProjectId, Reference, SourceFile};
use nodegen_model::{
    CanMessage, CanOpenDeviceInfo, CanOpenManagerInfo, Datapool, List, MessageContainer,
    NmtErrorBehavior, TxMethod,
};

/// Runtime header declaring the CANopen manager configuration types.
pub const RUNTIME_HEADER: &str = "osy_com_canopen_configuration.h";

/// Highest PDO number a device may use (512 PDOs per direction).
pub const MAX_PDO_NUMBER: u16 = 511;

// --- Object Dictionary Indices (CiA 301) ---
const OD_SYNC_COB_ID: u16 = 0x1005;
const OD_COMMUNICATION_CYCLE_PERIOD: u16 = 0x1006;
const OD_SYNC_WINDOW_LENGTH: u16 = 0x1007;
const OD_EMCY_COB_ID: u16 = 0x1014;
const OD_HEARTBEAT_CONSUMER: u16 = 0x1016;
const OD_HEARTBEAT_PRODUCER: u16 = 0x1017;
const OD_RPDO_COMMUNICATION: u16 = 0x1400;
const OD_RPDO_MAPPING: u16 = 0x1600;
const OD_TPDO_COMMUNICATION: u16 = 0x1800;
const OD_TPDO_MAPPING: u16 = 0x1A00;

// --- PDO Communication Parameter Sub-indices ---
const PDO_SUB_COB_ID: u8 = 1;
const PDO_SUB_TRANSMISSION_TYPE: u8 = 2;
const PDO_SUB_INHIBIT_TIME: u8 = 3;
const PDO_SUB_EVENT_TIMER: u8 = 5;
const PDO_SUB_SYNC_START: u8 = 6;

// --- COB-ID Flags ---
const COB_ID_INVALID: u32 = 0x8000_0000;
const COB_ID_NO_RTR: u32 = 0x4000_0000;
const COB_ID_EXTENDED: u32 = 0x2000_0000;

/// Default SYNC COB-ID and EMCY base.
const SYNC_COB_ID: u32 = 0x80;
const EMCY_COB_ID_BASE: u32 = 0x80;

/// Everything the CANopen manager emitter needs for one interface.
#[derive(Debug, Clone)]
pub struct CanOpenExport<'a> {
    /// Name of the exporting Data Block, for diagnostics.
    pub data_block: &'a str,
    pub interface: u8,
    pub manager: &'a CanOpenManagerInfo,
    /// CANopen messages of this interface, seen from the manager.
    pub container: &'a MessageContainer,
    /// The COM Datapool holding the PDO signal values.
    pub datapool: &'a Datapool,
    /// CANopen subversion (see [`crate::version::canopen`]).
    pub version: u16,
    pub project_id: &'a ProjectId,
}

/// File stem of the manager files of a zero-based interface.
pub fn file_stem(interface: u8) -> String {
    format!("canopen_mgr_{}", lower(&can_bus_name(interface)))
}

/// Upper case symbol prefix of the manager files of a zero-based interface.
pub fn define_prefix(interface: u8) -> String {
    upper(&file_stem(interface))
}

/// Name of the manager record of a zero-based interface.
pub fn manager_symbol(interface: u8) -> String {
    format!("gt_{}_ManagerConfiguration", file_stem(interface))
}

/// Table sizes of one manager, as needed by the init aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerSummary {
    pub interface: u8,
    pub devices: usize,
    pub tx_pdos: usize,
    pub rx_pdos: usize,
}

impl ManagerSummary {
    pub fn new(interface: u8, manager: &CanOpenManagerInfo, container: &MessageContainer) -> Self {
        let active = |messages: &[CanMessage]| messages.iter().filter(|m| m.canopen_active).count();
        Self {
            interface,
            devices: manager.devices.len(),
            tx_pdos: active(&container.tx_messages),
            rx_pdos: active(&container.rx_messages),
        }
    }
}

/// PDO transmission type written to sub-index 2.
pub fn transmission_type(message: &CanMessage) -> Result<u8, ExportError> {
    match message.tx_method {
        TxMethod::CanOpenType0 => Ok(0),
        TxMethod::CanOpenType1To240 => match message.canopen_sync_count {
            n @ 1..=240 => Ok(n),
            n => Err(ExportError::structural(format!(
                "PDO '{}' has SYNC count {} outside 1..=240",
                message.name, n
            ))),
        },
        TxMethod::CanOpenType254 => Ok(254),
        TxMethod::CanOpenType255 => Ok(255),
        TxMethod::Cyclic | TxMethod::OnChange | TxMethod::OnEvent => {
            Err(ExportError::structural(format!(
                "PDO '{}' has no CANopen transmission type",
                message.name
            )))
        }
    }
}

/// COB-ID of a PDO with the "no RTR" and format bits set.
fn pdo_cob_id(message: &CanMessage) -> u32 {
    let mut cob_id = message.can_id | COB_ID_NO_RTR;
    if message.is_extended {
        cob_id |= COB_ID_EXTENDED;
    }
    cob_id
}

/// Generates the manager configuration of one interface.
pub fn create_source_code(input: &CanOpenExport<'_>) -> Result<FilePair, ExportError> {
    let stem = file_stem(input.interface);
    let ctx = ArtifactContext {
        data_block: input.data_block,
        artifact: &stem,
    };

    let emitter = CanOpenEmitter {
        input,
        prefix: stem.clone(),
        upper: upper(&stem),
    };
    let plan = emitter.plan().inspect_err(|e| gen_error!(ctx, "{}", e))?;
    for device in &plan.devices {
        gen_info!(
            ctx,
            "Device {} (node {}): {} concise entries, {} bytes",
            device.info.name,
            device.info.node_id,
            device.dcf.len(),
            device.dcf.size()
        );
    }

    let header = emitter.header(&plan);
    let source = emitter.source(&plan)?;
    gen_debug!(
        ctx,
        "Generated manager with {} devices, subversion {}",
        plan.devices.len(),
        input.version
    );
    Ok(FilePair {
        stem,
        header,
        source,
    })
}

/// A device together with its generated concise DCF.
#[derive(Debug)]
struct DevicePlan<'a> {
    info: &'a CanOpenDeviceInfo,
    dcf: ConciseDcf,
}

/// A PDO of the manager with its owning device.
#[derive(Debug)]
struct PdoPlan<'a> {
    message: &'a CanMessage,
    device_index: usize,
}

#[derive(Debug)]
struct ManagerPlan<'a> {
    devices: Vec<DevicePlan<'a>>,
    tx_pdos: Vec<PdoPlan<'a>>,
    rx_pdos: Vec<PdoPlan<'a>>,
}

struct CanOpenEmitter<'a> {
    input: &'a CanOpenExport<'a>,
    prefix: String,
    upper: String,
}

impl<'a> CanOpenEmitter<'a> {
    fn messages(&self, direction: Direction) -> &'a [CanMessage] {
        match direction {
            Direction::Tx => &self.input.container.tx_messages,
            Direction::Rx => &self.input.container.rx_messages,
        }
    }

    fn list(&self, direction: Direction) -> Result<&'a List, ExportError> {
        let index = direction.list_index(self.input.interface);
        self.input.datapool.lists.get(index).ok_or_else(|| {
            ExportError::structural(format!(
                "Datapool '{}' has no {} list for {}",
                self.input.datapool.name,
                direction.name(),
                can_bus_name(self.input.interface)
            ))
        })
    }

    /// Resolves PDO owners and builds every concise DCF.
    fn plan(&self) -> Result<ManagerPlan<'a>, ExportError> {
        let manager = self.input.manager;
        let mut tx_pdos = Vec::new();
        let mut rx_pdos = Vec::new();
        for (direction, pdos) in [(Direction::Tx, &mut tx_pdos), (Direction::Rx, &mut rx_pdos)] {
            self.list(direction)?;
            for message in self.messages(direction) {
                let owner = message.canopen_owner.ok_or_else(|| {
                    ExportError::structural(format!("PDO '{}' has no owning device", message.name))
                })?;
                let device_index = manager.device_position(&owner).ok_or_else(|| {
                    ExportError::structural(format!(
                        "PDO '{}' belongs to device {:?} which is not configured",
                        message.name, owner
                    ))
                })?;
                if message.canopen_pdo_index > MAX_PDO_NUMBER {
                    return Err(ExportError::structural(format!(
                        "PDO '{}' has number {}, the maximum is {}",
                        message.name, message.canopen_pdo_index, MAX_PDO_NUMBER
                    )));
                }
                if message.canopen_active {
                    pdos.push(PdoPlan {
                        message,
                        device_index,
                    });
                }
            }
        }

        let devices = manager
            .devices
            .iter()
            .map(|info| -> Result<DevicePlan<'a>, ExportError> {
                Ok(DevicePlan {
                    info,
                    dcf: self.device_dcf(info)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ManagerPlan {
            devices,
            tx_pdos,
            rx_pdos,
        })
    }

    fn device_dcf(&self, device: &CanOpenDeviceInfo) -> Result<ConciseDcf, ExportError> {
        let manager = self.input.manager;
        let od = &device.object_dictionary;
        let mut dcf = ConciseDcf::new();

        if od.is_writable(OD_SYNC_COB_ID, 0) {
            dcf.push(ConciseEntry::u32(OD_SYNC_COB_ID, 0, SYNC_COB_ID, "SYNC COB-ID"));
        }
        // SYNC timing only applies while the manager produces SYNC
        let (cycle, window) = sync_timing(manager);
        if od.is_writable(OD_COMMUNICATION_CYCLE_PERIOD, 0) {
            dcf.push(ConciseEntry::u32(
                OD_COMMUNICATION_CYCLE_PERIOD,
                0,
                cycle,
                "communication cycle period",
            ));
        }
        if od.is_writable(OD_SYNC_WINDOW_LENGTH, 0) {
            dcf.push(ConciseEntry::u32(
                OD_SYNC_WINDOW_LENGTH,
                0,
                window,
                "synchronous window length",
            ));
        }
        if od.is_writable(OD_EMCY_COB_ID, 0) {
            dcf.push(ConciseEntry::u32(
                OD_EMCY_COB_ID,
                0,
                EMCY_COB_ID_BASE + u32::from(device.node_id),
                "EMCY COB-ID",
            ));
        }
        for sub in od.sub_indices(OD_HEARTBEAT_CONSUMER) {
            if !od.is_writable(OD_HEARTBEAT_CONSUMER, sub) {
                continue;
            }
            let value = if sub == 1 {
                let time = if device.heartbeat_consuming {
                    u32::from(device.heartbeat_consumer_time_ms)
                } else {
                    0
                };
                time | (u32::from(manager.node_id) << 16)
            } else {
                0
            };
            dcf.push(ConciseEntry::u32(
                OD_HEARTBEAT_CONSUMER,
                sub,
                value,
                "heartbeat consumer time",
            ));
        }
        if od.is_writable(OD_HEARTBEAT_PRODUCER, 0) {
            let time = if device.heartbeat_producing {
                device.heartbeat_producer_time_ms
            } else {
                0
            };
            dcf.push(ConciseEntry::u16(
                OD_HEARTBEAT_PRODUCER,
                0,
                time,
                "heartbeat producer time",
            ));
        }

        // device RPDOs are the manager's Tx messages and vice versa
        for direction in [Direction::Tx, Direction::Rx] {
            let mut owned: Vec<&CanMessage> = self
                .messages(direction)
                .iter()
                .filter(|m| m.canopen_owner == Some(device.id))
                .collect();
            owned.sort_by_key(|m| m.canopen_pdo_index);
            for message in owned {
                self.pdo_entries(&mut dcf, device, message, direction == Direction::Rx)?;
            }
        }
        Ok(dcf)
    }

    fn pdo_entries(
        &self,
        dcf: &mut ConciseDcf,
        device: &CanOpenDeviceInfo,
        message: &CanMessage,
        device_tpdo: bool,
    ) -> Result<(), ExportError> {
        let od = &device.object_dictionary;
        let number = message.canopen_pdo_index;
        let (communication, mapping, kind) = if device_tpdo {
            (OD_TPDO_COMMUNICATION + number, OD_TPDO_MAPPING + number, "TPDO")
        } else {
            (OD_RPDO_COMMUNICATION + number, OD_RPDO_MAPPING + number, "RPDO")
        };
        let label = format!("{}{} {}", kind, number + 1, message.name);
        let cob_id = pdo_cob_id(message);
        let cob_id_writable = od.is_writable(communication, PDO_SUB_COB_ID);

        if cob_id_writable {
            dcf.push(ConciseEntry::u32(
                communication,
                PDO_SUB_COB_ID,
                cob_id | COB_ID_INVALID,
                format!("{}: disable", label),
            ));
        }

        if message.canopen_active {
            if od.is_writable(communication, PDO_SUB_TRANSMISSION_TYPE) {
                dcf.push(ConciseEntry::u8(
                    communication,
                    PDO_SUB_TRANSMISSION_TYPE,
                    transmission_type(message)?,
                    format!("{}: transmission type", label),
                ));
            }
            if od.is_writable(communication, PDO_SUB_INHIBIT_TIME) {
                // 100 us resolution
                let inhibit = u16::try_from(u32::from(message.delay_time_ms) * 10).map_err(|_| {
                    ExportError::structural(format!(
                        "inhibit time of PDO '{}' exceeds 6553 ms",
                        message.name
                    ))
                })?;
                dcf.push(ConciseEntry::u16(
                    communication,
                    PDO_SUB_INHIBIT_TIME,
                    inhibit,
                    format!("{}: inhibit time", label),
                ));
            }
            if od.is_writable(communication, PDO_SUB_EVENT_TIMER) {
                let time = if device_tpdo {
                    message.cycle_time_ms
                } else {
                    message.timeout_ms
                };
                let time = u16::try_from(time).map_err(|_| {
                    ExportError::structural(format!(
                        "event time of PDO '{}' exceeds 65535 ms",
                        message.name
                    ))
                })?;
                dcf.push(ConciseEntry::u16(
                    communication,
                    PDO_SUB_EVENT_TIMER,
                    time,
                    format!("{}: event time", label),
                ));
            }
            if device_tpdo && od.is_writable(communication, PDO_SUB_SYNC_START) {
                dcf.push(ConciseEntry::u8(
                    communication,
                    PDO_SUB_SYNC_START,
                    0,
                    format!("{}: SYNC start value", label),
                ));
            }
        }

        if od.is_writable(mapping, 0) && cob_id_writable {
            let count = u8::try_from(message.signals.len()).map_err(|_| ExportError::Range {
                what: "PDO mapping objects",
                index: message.signals.len(),
                len: usize::from(u8::MAX) + 1,
            })?;
            dcf.push(ConciseEntry::u8(
                mapping,
                0,
                0,
                format!("{}: clear mapping", label),
            ));
            for (sub, signal) in (1..=count).zip(&message.signals) {
                let entry = u32::from(signal.bit_length)
                    | (u32::from(signal.od_sub_index) << 8)
                    | (u32::from(signal.od_index) << 16);
                dcf.push(ConciseEntry::u32(
                    mapping,
                    sub,
                    entry,
                    format!(
                        "{}: map 0x{:04X}:{:02X}",
                        label, signal.od_index, signal.od_sub_index
                    ),
                ));
            }
            dcf.push(ConciseEntry::u8(
                mapping,
                0,
                count,
                format!("{}: number of mapped objects", label),
            ));
        }

        if message.canopen_active && cob_id_writable {
            dcf.push(ConciseEntry::u32(
                communication,
                PDO_SUB_COB_ID,
                cob_id,
                format!("{}: set and enable", label),
            ));
        }
        Ok(())
    }

    fn concise_symbol(&self, device: &CanOpenDeviceInfo) -> String {
        format!("mau8_{}_{}_ConciseData", self.prefix, device.name)
    }

    fn header(&self, plan: &ManagerPlan<'_>) -> SourceFile {
        let mut h = open_header(
            &self.prefix,
            &format!("CANopen manager configuration for {}", can_bus_name(self.input.interface)),
            &[RUNTIME_HEADER],
            self.input.project_id,
        );
        h.blank();
        h.push(format!("#define {}_NUMBER_OF_DEVICES ({}U)", self.upper, plan.devices.len()));
        h.push(format!("#define {}_NUMBER_OF_TX_PDOS ({}U)", self.upper, plan.tx_pdos.len()));
        h.push(format!("#define {}_NUMBER_OF_RX_PDOS ({}U)", self.upper, plan.rx_pdos.len()));
        h.blank();
        for (i, device) in plan.devices.iter().enumerate() {
            h.push(format!(
                "#define {}_DEVICE_INDEX_{} ({}U)",
                self.upper,
                upper(&device.info.name),
                i
            ));
        }

        h.section("Global Constants");
        h.push(format!(
            "extern const T_osy_com_canopen_manager_configuration {};",
            manager_symbol(self.input.interface)
        ));
        close_header(&mut h);
        h
    }

    fn source(&self, plan: &ManagerPlan<'_>) -> Result<SourceFile, ExportError> {
        let datapool_header = format!("{}.h", datapool::file_stem(self.input.datapool));
        let mut c = open_source(
            &self.prefix,
            &format!("CANopen manager configuration for {}", can_bus_name(self.input.interface)),
            &[&datapool_header],
            self.input.project_id,
        );

        c.section("Module Global Constants");
        for device in &plan.devices {
            c.blank();
            c.push(format!("///concise DCF of device {}", device.info.name));
            c.push(format!(
                "static const uint8 {}[{}] =",
                self.concise_symbol(device.info),
                device.dcf.size()
            ));
            c.push("{");
            c.extend(device.dcf.render_lines().into_iter().map(|l| format!("   {}", l)));
            c.push("};");
        }

        let device_rows: Vec<Row> = plan
            .devices
            .iter()
            .map(|d| Row::new(self.device_record(d)).comment(d.info.name.clone()))
            .collect();
        let devices_ref = Reference::slice(
            &format!("mat_{}_Devices", self.prefix),
            0,
            device_rows.len(),
        );
        if !device_rows.is_empty() {
            c.blank();
            c.initializer(
                &format!(
                    "static const T_osy_com_canopen_device_configuration mat_{}_Devices[{}]",
                    self.prefix,
                    device_rows.len()
                ),
                &device_rows,
            );
        }

        let tx_ref = self.pdo_tables(&mut c, Direction::Tx, &plan.tx_pdos)?;
        let rx_ref = self.pdo_tables(&mut c, Direction::Rx, &plan.rx_pdos)?;

        let manager = self.input.manager;
        let interface = self.input.interface;
        let heartbeat = if manager.heartbeat_producing {
            manager.heartbeat_producer_time_ms
        } else {
            0
        };
        let mut rows = vec![
            Row::new(format!("{}U", interface)).comment("CAN interface"),
            Row::new(format!("{}U", manager.node_id)).comment("manager node ID"),
            Row::new(flag(manager.autostart)).comment("autostart"),
            Row::new(nmt_start(manager)).comment("NMT start"),
            Row::new(nmt_error(manager.nmt_error_behavior)).comment("NMT error behaviour"),
            Row::new(format!("{}U", heartbeat)).comment("heartbeat producer time"),
            Row::new(format!("{}U", manager.sdo_timeout_ms)).comment("SDO timeout"),
        ];
        if self.input.version >= 2 {
            let (cycle, window) = sync_timing(manager);
            rows.push(Row::new(format!("{}UL", cycle)).comment("SYNC cycle time"));
            rows.push(Row::new(format!("{}UL", window)).comment("SYNC window length"));
        }
        rows.extend([
            Row::new(format!("&gt_{}_DataPool", self.input.datapool.name)),
            Row::new(format!("{}U", Direction::Tx.list_index(interface))).comment("Tx list index"),
            Row::new(format!("{}U", Direction::Rx.list_index(interface))).comment("Rx list index"),
            Row::new(format!("{}U", plan.devices.len())).comment("number of devices"),
            Row::new(devices_ref.render()),
            Row::new(format!("{}U", plan.tx_pdos.len())).comment("number of Tx PDOs"),
            Row::new(tx_ref.render()),
            Row::new(format!("{}U", plan.rx_pdos.len())).comment("number of Rx PDOs"),
            Row::new(rx_ref.render()),
        ]);

        c.section("Global Constants");
        c.initializer(
            &format!(
                "const T_osy_com_canopen_manager_configuration {}",
                manager_symbol(interface)
            ),
            &rows,
        );
        Ok(c)
    }

    fn device_record(&self, device: &DevicePlan<'_>) -> String {
        let info = device.info;
        let mut fields = vec![
            format!("{}U", info.node_id),
            flag(info.optional).to_string(),
            flag(info.no_initialization).to_string(),
        ];
        if self.input.version >= 2 {
            let sub = if info.factory_settings_active {
                info.reset_node_sub_index
            } else {
                0
            };
            fields.push(format!("{}U", sub));
        }
        let heartbeat = if info.heartbeat_producing {
            info.heartbeat_producer_time_ms
        } else {
            0
        };
        fields.push(format!("{}U", heartbeat));
        fields.push(format!("{}UL", device.dcf.size()));
        fields.push(format!("&{}[0]", self.concise_symbol(info)));
        inline_braced(&fields)
    }

    /// Emits the signal and PDO tables of one direction and returns the
    /// reference to the PDO table.
    fn pdo_tables(
        &self,
        c: &mut SourceFile,
        direction: Direction,
        pdos: &[PdoPlan<'_>],
    ) -> Result<Reference, ExportError> {
        if pdos.is_empty() {
            return Ok(Reference::Absent);
        }
        let list = self.list(direction)?;
        let signals_array = format!("mau32_{}_{}PdoSignals", self.prefix, direction.name());
        let pdos_array = format!("mat_{}_{}Pdos", self.prefix, direction.name());

        let mut signal_rows = Vec::new();
        let mut pdo_rows = Vec::new();
        for pdo in pdos {
            let message = pdo.message;
            let first = signal_rows.len();
            for signal in &message.signals {
                let element = list.elements.get(signal.element_index as usize).ok_or_else(|| {
                    ExportError::structural(format!(
                        "signal of PDO '{}' refers to missing element {} of list '{}'",
                        message.name, signal.element_index, list.name
                    ))
                })?;
                let descriptor = SignalDescriptor::from_signal(signal)?;
                signal_rows.push(Row::new(hex_u32(descriptor.encode())).comment(element.name.clone()));
            }
            pdo_rows.push(
                Row::new(inline_braced(&[
                    hex_u32(message.can_id),
                    flag(message.is_extended).to_string(),
                    format!("{}U", message.dlc),
                    format!("{}U", pdo.device_index),
                    format!("{}U", message.canopen_pdo_index),
                    format!("{}U", message.signals.len()),
                    Reference::slice(&signals_array, first, message.signals.len()).render(),
                ]))
                .comment(message.name.clone()),
            );
        }

        if !signal_rows.is_empty() {
            c.blank();
            c.initializer(
                &format!("static const uint32 {}[{}]", signals_array, signal_rows.len()),
                &signal_rows,
            );
        }
        c.blank();
        c.initializer(
            &format!(
                "static const T_osy_com_canopen_pdo_configuration {}[{}]",
                pdos_array,
                pdo_rows.len()
            ),
            &pdo_rows,
        );
        Ok(Reference::slice(&pdos_array, 0, pdo_rows.len()))
    }
}

/// SYNC cycle and window; both 0 while SYNC production is off.
fn sync_timing(manager: &CanOpenManagerInfo) -> (u32, u32) {
    if manager.sync_producing {
        (manager.sync_cycle_time_us, manager.sync_window_length_us)
    } else {
        (0, 0)
    }
}

fn nmt_start(manager: &CanOpenManagerInfo) -> &'static str {
    match (manager.start_devices, manager.nmt_start_all) {
        (false, _) => "OSY_COM_CANOPEN_NMT_START_NO",
        (true, false) => "OSY_COM_CANOPEN_NMT_START_YES",
        (true, true) => "OSY_COM_CANOPEN_NMT_START_ALL",
    }
}

fn nmt_error(behavior: NmtErrorBehavior) -> &'static str {
    match behavior {
        NmtErrorBehavior::ResetAllDevices => "OSY_COM_CANOPEN_NMT_ERROR_RESET_ALL",
        NmtErrorBehavior::ResetFailedDevice => "OSY_COM_CANOPEN_NMT_ERROR_RESET_FAILED",
        NmtErrorBehavior::StopAllDevices => "OSY_COM_CANOPEN_NMT_ERROR_STOP_ALL",
    }
}
