// crates/nodegen/src/emit/comm.rs

//! Communication stack configuration for one non-CANopen protocol on one CAN
//! interface (`comm_<protocol>_can<N>.h/.c`).

use crate::emit::datapool;
use crate::emit::{RamPlacement, close_header, open_header, open_source};
use crate::encode::{SignalDescriptor, group_by_mux};
use crate::error::ExportError;
use crate::log::{ArtifactContext, gen_debug, gen_error, gen_warn};
use crate::util::literal::{flag, hex_u32};
use crate::util::naming::{can_bus_name, lower, upper};
use crate::util::writer::{Row, inline_braced};
use crate::util::{FilePair, ProjectId, Reference, SourceFile};
use nodegen_model::{CanMessage, CanProtocol, Datapool, List, MessageContainer, ProtocolType, TxMethod};

/// Runtime header declaring the communication stack configuration types.
pub const RUNTIME_HEADER: &str = "osy_com_configuration.h";

/// Transmission direction seen from this node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Tx,
    Rx,
}

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Direction::Tx => "Tx",
            Direction::Rx => "Rx",
        }
    }

    /// Index of the Datapool list backing this direction on `interface`.
    pub fn list_index(self, interface: u8) -> usize {
        match self {
            Direction::Tx => CanProtocol::tx_list_index(interface),
            Direction::Rx => CanProtocol::rx_list_index(interface),
        }
    }
}

/// Everything the communication stack emitter needs for one interface.
#[derive(Debug, Clone)]
pub struct CommExport<'a> {
    /// Name of the exporting Data Block, for diagnostics.
    pub data_block: &'a str,
    pub protocol: ProtocolType,
    pub interface: u8,
    pub container: &'a MessageContainer,
    /// The COM Datapool holding the signal values.
    pub datapool: &'a Datapool,
    /// Communication stack subversion (see [`crate::version::comm`]).
    pub version: u16,
    pub project_id: &'a ProjectId,
}

/// Short protocol name used in file and symbol names.
pub fn protocol_symbol(protocol: ProtocolType) -> Result<&'static str, ExportError> {
    match protocol {
        ProtocolType::Layer2 => Ok("l2"),
        ProtocolType::ECeS => Ok("eces"),
        ProtocolType::ECoS => Ok("ecos"),
        ProtocolType::J1939 => Ok("j1939"),
        ProtocolType::CanOpen => Err(ExportError::unsupported(
            "CANopen is configured through the CANopen manager",
        )),
    }
}

fn protocol_tag(protocol: ProtocolType) -> Result<&'static str, ExportError> {
    match protocol {
        ProtocolType::Layer2 => Ok("OSY_COM_PROTOCOL_L2"),
        ProtocolType::ECeS => Ok("OSY_COM_PROTOCOL_ECES"),
        ProtocolType::ECoS => Ok("OSY_COM_PROTOCOL_ECOS"),
        ProtocolType::J1939 => Ok("OSY_COM_PROTOCOL_J1939"),
        ProtocolType::CanOpen => Err(ExportError::unsupported(
            "CANopen is configured through the CANopen manager",
        )),
    }
}

/// File stem for a protocol on a zero-based interface.
pub fn file_stem(protocol: ProtocolType, interface: u8) -> Result<String, ExportError> {
    Ok(format!(
        "comm_{}_{}",
        protocol_symbol(protocol)?,
        lower(&can_bus_name(interface))
    ))
}

/// Runtime trigger of a message.
fn trigger(message: &CanMessage) -> Result<&'static str, ExportError> {
    match message.tx_method {
        TxMethod::Cyclic => Ok("OSY_COM_TRIGGER_CYCLIC"),
        TxMethod::OnChange => Ok("OSY_COM_TRIGGER_ON_CHANGE"),
        TxMethod::OnEvent => Ok("OSY_COM_TRIGGER_ON_EVENT"),
        TxMethod::CanOpenType0
        | TxMethod::CanOpenType1To240
        | TxMethod::CanOpenType254
        | TxMethod::CanOpenType255 => Err(ExportError::structural(format!(
            "message '{}' uses a CANopen transmission type on a non-CANopen protocol",
            message.name
        ))),
    }
}

/// Expected number of missing counter steps of an ECeS message.
pub fn eces_counter_gap(message: &CanMessage) -> u32 {
    if message.cycle_time_ms == 0 {
        0
    } else {
        (message.timeout_ms / message.cycle_time_ms).saturating_sub(1)
    }
}

/// Generates the header and implementation for one protocol on one interface.
pub fn create_source_code(input: &CommExport<'_>) -> Result<FilePair, ExportError> {
    let stem = file_stem(input.protocol, input.interface)?;
    let ctx = ArtifactContext {
        data_block: input.data_block,
        artifact: &stem,
    };

    if !input.container.has_signals() {
        gen_error!(ctx, "No message on {} carries a signal", can_bus_name(input.interface));
        return Err(ExportError::structural(format!(
            "no message of {} carries a signal",
            stem
        )));
    }

    let emitter = CommEmitter {
        input,
        prefix: stem.clone(),
        upper: upper(&stem),
    };
    let tx = emitter.tables(Direction::Tx).inspect_err(|e| gen_error!(ctx, "{}", e))?;
    let rx = emitter.tables(Direction::Rx).inspect_err(|e| gen_error!(ctx, "{}", e))?;
    if input.protocol == ProtocolType::ECeS {
        for message in input.container.rx_messages.iter().filter(|m| m.timeout_ms == 0) {
            gen_warn!(ctx, "Safety message {} has no timeout monitoring", message.name);
        }
    }

    let header = emitter.header(&stem);
    let source = emitter.source(&stem, &tx, &rx)?;
    gen_debug!(
        ctx,
        "Generated {} Tx and {} Rx messages, subversion {}",
        input.container.tx_messages.len(),
        input.container.rx_messages.len(),
        input.version
    );
    Ok(FilePair {
        stem,
        header,
        source,
    })
}

/// Initializer rows of one direction.
#[derive(Debug, Default)]
struct DirectionTables {
    signals: Vec<Row>,
    mux_definitions: Vec<Row>,
    mux_status_count: usize,
    messages: Vec<Row>,
    counter_gaps: Vec<Row>,
}

struct CommEmitter<'a> {
    input: &'a CommExport<'a>,
    prefix: String,
    upper: String,
}

impl CommEmitter<'_> {
    fn messages(&self, direction: Direction) -> &[CanMessage] {
        match direction {
            Direction::Tx => &self.input.container.tx_messages,
            Direction::Rx => &self.input.container.rx_messages,
        }
    }

    fn list(&self, direction: Direction) -> Result<&List, ExportError> {
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

    fn array_name(&self, direction: Direction, what: &str) -> String {
        format!("ma{}_{}_{}{}", what_prefix(what), self.prefix, direction.name(), what)
    }

    fn tables(&self, direction: Direction) -> Result<DirectionTables, ExportError> {
        let list = self.list(direction)?;
        let version = self.input.version;
        let mut tables = DirectionTables::default();

        for message in self.messages(direction) {
            let trigger = trigger(message)?;
            if message.is_multiplexed() && version < 2 {
                return Err(ExportError::unsupported(format!(
                    "multiplexed message '{}' needs communication subversion 2 or newer",
                    message.name
                )));
            }

            let dlc = if self.input.protocol == ProtocolType::ECeS {
                message.dlc.saturating_sub(2)
            } else {
                message.dlc
            };
            let min_interval = match (direction, message.tx_method) {
                (Direction::Tx, TxMethod::OnChange) => u32::from(message.delay_time_ms),
                _ => 0,
            };
            let max_interval = match direction {
                Direction::Tx => message.cycle_time_ms,
                Direction::Rx => message.timeout_ms,
            };

            let mut fields = vec![
                hex_u32(message.can_id),
                flag(message.is_extended).to_string(),
                format!("{}U", dlc),
                trigger.to_string(),
                format!("{}U", min_interval),
                format!("{}UL", max_interval),
            ];

            if version < 2 {
                let first = tables.signals.len();
                for signal in &message.signals {
                    tables.signals.push(self.signal_row(list, message, signal)?);
                }
                fields.push(format!("{}U", message.signals.len()));
                fields.push(
                    Reference::slice(
                        &self.array_name(direction, "Signals"),
                        first,
                        message.signals.len(),
                    )
                    .render(),
                );
            } else {
                let groups = group_by_mux(&message.signals);
                let first_definition = tables.mux_definitions.len();
                for group in &groups {
                    let first_signal = tables.signals.len();
                    for &i in &group.signals {
                        tables
                            .signals
                            .push(self.signal_row(list, message, &message.signals[i])?);
                    }
                    tables.mux_definitions.push(
                        Row::new(inline_braced(&[
                            format!("{}U", group.value),
                            format!("{}U", group.signals.len()),
                            Reference::slice(
                                &self.array_name(direction, "Signals"),
                                first_signal,
                                group.signals.len(),
                            )
                            .render(),
                        ]))
                        .comment(message.name.clone()),
                    );
                }
                let status = if message.is_multiplexed() {
                    let first = tables.mux_status_count;
                    tables.mux_status_count += groups.len();
                    Reference::slice(&self.array_name(direction, "MuxStatus"), first, groups.len())
                } else {
                    Reference::Absent
                };
                fields.push(format!("{}U", groups.len()));
                fields.push(status.render());
                fields.push(
                    Reference::slice(
                        &self.array_name(direction, "MuxDefinitions"),
                        first_definition,
                        groups.len(),
                    )
                    .render(),
                );
            }
            tables
                .messages
                .push(Row::new(inline_braced(&fields)).comment(message.name.clone()));

            if direction == Direction::Rx && self.input.protocol == ProtocolType::ECeS {
                tables.counter_gaps.push(
                    Row::new(format!("{}UL", eces_counter_gap(message)))
                        .comment(message.name.clone()),
                );
            }
        }
        Ok(tables)
    }

    fn signal_row(
        &self,
        list: &List,
        message: &CanMessage,
        signal: &nodegen_model::CanSignal,
    ) -> Result<Row, ExportError> {
        let element = list
            .elements
            .get(signal.element_index as usize)
            .ok_or_else(|| {
                ExportError::structural(format!(
                    "signal of message '{}' refers to missing element {} of list '{}'",
                    message.name, signal.element_index, list.name
                ))
            })?;
        let descriptor = SignalDescriptor::from_signal(signal).map_err(|e| {
            ExportError::structural(format!(
                "signal '{}' of message '{}': {}",
                element.name, message.name, e
            ))
        })?;
        Ok(Row::new(hex_u32(descriptor.encode())).comment(element.name.clone()))
    }

    fn header(&self, stem: &str) -> SourceFile {
        let mut h = open_header(
            stem,
            &format!("Communication stack configuration for {}", can_bus_name(self.input.interface)),
            &[RUNTIME_HEADER],
            self.input.project_id,
        );

        for direction in [Direction::Tx, Direction::Rx] {
            let dir = upper(direction.name());
            let messages = self.messages(direction);
            h.blank();
            h.push(format!(
                "#define {}_NUMBER_OF_{}_MESSAGES ({}U)",
                self.upper,
                dir,
                messages.len()
            ));
            for (i, message) in messages.iter().enumerate() {
                h.push(format!(
                    "#define {}_{}_INDEX_{} ({}U)",
                    self.upper,
                    dir,
                    upper(&message.name),
                    i
                ));
            }
        }

        h.section("Global Constants");
        h.push(format!(
            "extern const T_osy_com_protocol_configuration gt_{}_ProtocolConfiguration;",
            self.prefix
        ));
        close_header(&mut h);
        h
    }

    fn source(
        &self,
        stem: &str,
        tx: &DirectionTables,
        rx: &DirectionTables,
    ) -> Result<SourceFile, ExportError> {
        let datapool_header = format!("{}.h", datapool::file_stem(self.input.datapool));
        let mut c = open_source(
            stem,
            &format!("Communication stack configuration for {}", can_bus_name(self.input.interface)),
            &[&datapool_header],
            self.input.project_id,
        );

        let has_status = tx.mux_status_count + rx.mux_status_count > 0;
        if self.input.version >= 2 && has_status {
            c.section("Module Global Variables");
            for (direction, tables) in [(Direction::Tx, tx), (Direction::Rx, rx)] {
                if tables.mux_status_count == 0 {
                    continue;
                }
                let declaration = format!(
                    "static uint8 {}[{}];",
                    self.array_name(direction, "MuxStatus"),
                    tables.mux_status_count
                );
                if self.input.version >= 3 {
                    RamPlacement::for_datapool(self.input.datapool).place(
                        &mut c,
                        true,
                        vec![declaration],
                    );
                } else {
                    c.push(declaration);
                }
            }
        }

        c.section("Module Global Constants");
        for (direction, tables) in [(Direction::Tx, tx), (Direction::Rx, rx)] {
            self.direction_tables(&mut c, direction, tables);
        }

        let gaps = if rx.counter_gaps.is_empty() {
            Reference::Absent
        } else {
            Reference::slice(&format!("mau32_{}_RxMessageCounterGaps", self.prefix), 0, 1)
        };
        if !gaps.is_absent() {
            c.blank();
            c.initializer(
                &format!(
                    "static const uint32 mau32_{}_RxMessageCounterGaps[{}]",
                    self.prefix,
                    rx.counter_gaps.len()
                ),
                &rx.counter_gaps,
            );
        }

        let messages_ref = |direction: Direction, tables: &DirectionTables| {
            Reference::slice(&self.array_name(direction, "Messages"), 0, tables.messages.len())
        };
        let interface = self.input.interface;
        c.section("Global Constants");
        c.initializer(
            &format!(
                "const T_osy_com_protocol_configuration gt_{}_ProtocolConfiguration",
                self.prefix
            ),
            &[
                Row::new(protocol_tag(self.input.protocol)?).comment("protocol"),
                Row::new(format!("{}U", interface)).comment("CAN interface"),
                Row::new(format!("&gt_{}_DataPool", self.input.datapool.name)),
                Row::new(format!("{}U", Direction::Tx.list_index(interface)))
                    .comment("Tx list index"),
                Row::new(format!("{}U", Direction::Rx.list_index(interface)))
                    .comment("Rx list index"),
                Row::new(format!("{}U", tx.messages.len())).comment("number of Tx messages"),
                Row::new(messages_ref(Direction::Tx, tx).render()),
                Row::new(format!("{}U", rx.messages.len())).comment("number of Rx messages"),
                Row::new(messages_ref(Direction::Rx, rx).render()),
                Row::new(gaps.render()).comment("Rx message counter gaps"),
            ],
        );
        Ok(c)
    }

    fn direction_tables(&self, c: &mut SourceFile, direction: Direction, tables: &DirectionTables) {
        if !tables.signals.is_empty() {
            c.blank();
            c.initializer(
                &format!(
                    "static const uint32 {}[{}]",
                    self.array_name(direction, "Signals"),
                    tables.signals.len()
                ),
                &tables.signals,
            );
        }
        if !tables.mux_definitions.is_empty() {
            c.blank();
            c.initializer(
                &format!(
                    "static const T_osy_com_mux_definition {}[{}]",
                    self.array_name(direction, "MuxDefinitions"),
                    tables.mux_definitions.len()
                ),
                &tables.mux_definitions,
            );
        }
        if !tables.messages.is_empty() {
            c.blank();
            c.initializer(
                &format!(
                    "static const T_osy_com_message_configuration {}[{}]",
                    self.array_name(direction, "Messages"),
                    tables.messages.len()
                ),
                &tables.messages,
            );
        }
    }
}

/// Variable type prefix of the generated arrays.
fn what_prefix(what: &str) -> &'static str {
    match what {
        "Signals" => "u32",
        "MuxStatus" => "u8",
        _ => "t",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use nodegen_model::{CanSignal, DatapoolKind, Element, MuxRole, Value};

    fn com_datapool(tx_elements: usize, rx_elements: usize) -> Datapool {
        let mut dp = Datapool::new("Com", DatapoolKind::Com, Some(0));
        for (name, count) in [("Tx", tx_elements), ("Rx", rx_elements)] {
            let mut list = List::new(name);
            for i in 0..count {
                list.elements.push(Element::scalar(
                    &format!("Sig{}", i),
                    Value::U8(0),
                    Value::U8(0),
                    Value::U8(255),
                ));
            }
            dp.lists.push(list);
        }
        dp
    }

    fn message(name: &str, id: u32, method: TxMethod, signals: Vec<CanSignal>) -> CanMessage {
        let mut m = CanMessage::new(name, id, 8, method);
        m.signals = signals;
        m
    }

    fn input<'a>(
        container: &'a MessageContainer,
        dp: &'a Datapool,
        protocol: ProtocolType,
        version: u16,
        id: &'a ProjectId,
    ) -> CommExport<'a> {
        CommExport {
            data_block: "App",
            protocol,
            interface: 0,
            container,
            datapool: dp,
            version,
            project_id: id,
        }
    }

    #[test]
    fn test_no_signals_is_structural() {
        let container = MessageContainer {
            active: true,
            tx_messages: vec![message("Empty", 0x100, TxMethod::Cyclic, vec![])],
            rx_messages: vec![],
        };
        let dp = com_datapool(0, 0);
        let id = ProjectId::compute("c").unwrap();
        let err = create_source_code(&input(&container, &dp, ProtocolType::Layer2, 3, &id))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_message_descriptor_fields() {
        let mut tx = message("Status", 0x185, TxMethod::OnChange, vec![CanSignal::new(0, 0, 8)]);
        tx.delay_time_ms = 20;
        tx.cycle_time_ms = 100;
        let mut rx = message("Command", 0x205, TxMethod::OnChange, vec![CanSignal::new(0, 0, 8)]);
        rx.delay_time_ms = 20;
        rx.timeout_ms = 300;
        let container = MessageContainer {
            active: true,
            tx_messages: vec![tx],
            rx_messages: vec![rx],
        };
        let dp = com_datapool(1, 1);
        let id = ProjectId::compute("c").unwrap();
        let pair = create_source_code(&input(&container, &dp, ProtocolType::Layer2, 3, &id)).unwrap();

        assert_eq!(pair.stem, "comm_l2_can1");
        assert!(pair.header.contains("#define COMM_L2_CAN1_TX_INDEX_STATUS (0U)"));
        assert!(pair.header.contains("#define COMM_L2_CAN1_NUMBER_OF_RX_MESSAGES (1U)"));
        assert!(pair.source.contains(
            "   { 0x00000185UL, 0U, 8U, OSY_COM_TRIGGER_ON_CHANGE, 20U, 100UL, 1U, NULL, &mat_comm_l2_can1_TxMuxDefinitions[0] } /* Status */"
        ));
        // min interval only applies to Tx
        assert!(pair.source.contains(
            "   { 0x00000205UL, 0U, 8U, OSY_COM_TRIGGER_ON_CHANGE, 0U, 300UL, 1U, NULL, &mat_comm_l2_can1_RxMuxDefinitions[0] } /* Command */"
        ));
        assert!(pair.source.contains("   &gt_Com_DataPool,"));
        assert!(pair.source.contains("   NULL /* Rx message counter gaps */"));
    }

    #[test]
    fn test_multiplexed_message_tables() {
        let mut m = CanSignal::new(0, 0, 8);
        m.mux = MuxRole::Multiplexer;
        let mut s1 = CanSignal::new(1, 8, 8);
        s1.mux = MuxRole::Multiplexed(0);
        let mut s2 = CanSignal::new(2, 8, 8);
        s2.mux = MuxRole::Multiplexed(1);
        let container = MessageContainer {
            active: true,
            tx_messages: vec![message("Mux", 0x300, TxMethod::Cyclic, vec![m, s1, s2])],
            rx_messages: vec![],
        };
        let dp = com_datapool(3, 0);
        let id = ProjectId::compute("c").unwrap();

        let pair = create_source_code(&input(&container, &dp, ProtocolType::Layer2, 3, &id)).unwrap();
        let c = pair.source.render();
        // multiplexer repeated at the start of both groups
        assert!(c.contains("static const uint32 mau32_comm_l2_can1_TxSignals[4]"));
        assert!(c.contains("   { 0U, 2U, &mau32_comm_l2_can1_TxSignals[0] }, /* Mux */"));
        assert!(c.contains("   { 1U, 2U, &mau32_comm_l2_can1_TxSignals[2] } /* Mux */"));
        assert!(c.contains("OSY_NON_SAFE_RAM_DATA_START\nstatic uint8 mau8_comm_l2_can1_TxMuxStatus[2];"));
        assert!(c.contains("2U, &mau8_comm_l2_can1_TxMuxStatus[0], &mat_comm_l2_can1_TxMuxDefinitions[0] } /* Mux */"));

        let v2 = create_source_code(&input(&container, &dp, ProtocolType::Layer2, 2, &id)).unwrap();
        assert!(v2.source.contains("static uint8 mau8_comm_l2_can1_TxMuxStatus[2];"));
        assert!(!v2.source.contains("OSY_NON_SAFE_RAM_DATA_START"));

        let err = create_source_code(&input(&container, &dp, ProtocolType::Layer2, 1, &id)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn test_raw_signal_pointer_at_subversion_1() {
        let container = MessageContainer {
            active: true,
            tx_messages: vec![
                message("Empty", 0x100, TxMethod::Cyclic, vec![]),
                message("Data", 0x101, TxMethod::Cyclic, vec![CanSignal::new(0, 0, 8), CanSignal::new(1, 8, 8)]),
            ],
            rx_messages: vec![],
        };
        let dp = com_datapool(2, 0);
        let id = ProjectId::compute("c").unwrap();
        let pair = create_source_code(&input(&container, &dp, ProtocolType::J1939, 1, &id)).unwrap();
        assert_eq!(pair.stem, "comm_j1939_can1");
        assert!(pair.source.contains("0U, 0UL, 0U, NULL }, /* Empty */"));
        assert!(pair.source.contains("0U, 0UL, 2U, &mau32_comm_j1939_can1_TxSignals[0] } /* Data */"));
        assert!(!pair.source.contains("MuxDefinitions"));
    }

    #[test]
    fn test_eces_adjustments() {
        let mut rx = message("Safe", 0x200, TxMethod::Cyclic, vec![CanSignal::new(0, 0, 8)]);
        rx.cycle_time_ms = 100;
        rx.timeout_ms = 350;
        let mut rx_fast = message("Fast", 0x201, TxMethod::Cyclic, vec![CanSignal::new(0, 0, 8)]);
        rx_fast.cycle_time_ms = 0;
        let container = MessageContainer {
            active: true,
            tx_messages: vec![],
            rx_messages: vec![rx, rx_fast],
        };
        let dp = com_datapool(0, 1);
        let id = ProjectId::compute("c").unwrap();
        let pair = create_source_code(&input(&container, &dp, ProtocolType::ECeS, 3, &id)).unwrap();
        let c = pair.source.render();
        // payload length excludes the two protocol bytes
        assert!(c.contains("{ 0x00000200UL, 0U, 6U,"));
        assert!(c.contains("static const uint32 mau32_comm_eces_can1_RxMessageCounterGaps[2] =\n{\n   2UL, /* Safe */\n   0UL /* Fast */\n};"));
        assert!(c.contains("   &mau32_comm_eces_can1_RxMessageCounterGaps[0] /* Rx message counter gaps */"));
    }

    #[test]
    fn test_counter_gap_saturates() {
        let mut m = CanMessage::new("X", 1, 8, TxMethod::Cyclic);
        m.cycle_time_ms = 100;
        m.timeout_ms = 50;
        assert_eq!(eces_counter_gap(&m), 0);
        m.timeout_ms = 1000;
        assert_eq!(eces_counter_gap(&m), 9);
    }

    #[test]
    fn test_canopen_transmission_type_rejected() {
        let container = MessageContainer {
            active: true,
            tx_messages: vec![message("Pdo", 0x180, TxMethod::CanOpenType254, vec![CanSignal::new(0, 0, 8)])],
            rx_messages: vec![],
        };
        let dp = com_datapool(1, 0);
        let id = ProjectId::compute("c").unwrap();
        let err = create_source_code(&input(&container, &dp, ProtocolType::ECoS, 3, &id)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_missing_element_is_structural() {
        let container = MessageContainer {
            active: true,
            tx_messages: vec![message("Data", 0x101, TxMethod::Cyclic, vec![CanSignal::new(5, 0, 8)])],
            rx_messages: vec![],
        };
        let dp = com_datapool(1, 0);
        let id = ProjectId::compute("c").unwrap();
        let err = create_source_code(&input(&container, &dp, ProtocolType::Layer2, 3, &id)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }
}
