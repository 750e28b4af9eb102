// crates/nodegen/tests/fixture/mod.rs

//! A representative controller node shared by the integration tests.
//!
//! Data Blocks:
//! - 0 `Main`: programmable, hosts the diagnostic driver, owns the NVM,
//!   COM, CANopen and safe HALC Datapools.
//! - 1 `Hmi`: programmable, owns one public and one private Datapool.
//! - 2 `HalcParams`: HALC parameter set owning the non-safe HALC Datapool.

#![allow(dead_code)]

use nodegen_model::{
    CanMessage, CanOpenDeviceId, CanOpenDeviceInfo, CanOpenManagerInfo, CanProtocol, CanSignal,
    ComInterface, DataBlock, DataBlockKind, Datapool, DatapoolKind, Element, HalcChannel,
    HalcConfig, HalcDomain, HalcParameter, InterfaceKind, List, MessageContainer, MuxRole, Node,
    OdAccess, ProtocolType, SafetyMode, ServerSettings, TxMethod, Value, ValueType,
};

pub const MAIN: usize = 0;
pub const HMI: usize = 1;
pub const HALC_PARAMS: usize = 2;

pub const DATAPOOL_COM: usize = 1;

pub const IO_MODULE: CanOpenDeviceId = CanOpenDeviceId {
    node_index: 4,
    interface_number: 1,
};

/// Installs the test logger; repeated calls are harmless.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn block(name: &str, kind: DataBlockKind, process_id: u8) -> DataBlock {
    DataBlock {
        name: name.into(),
        comment: String::new(),
        kind,
        code_format_version: 6,
        process_id,
        active: true,
    }
}

fn u8_element(name: &str) -> Element {
    Element::scalar(name, Value::U8(0), Value::U8(0), Value::U8(255))
}

fn list(name: &str, elements: &[&str]) -> List {
    let mut list = List::new(name);
    list.elements = elements.iter().map(|e| u8_element(e)).collect();
    list
}

fn datapool(name: &str, kind: DatapoolKind, owner: usize, lists: Vec<List>) -> Datapool {
    let mut dp = Datapool::new(name, kind, Some(owner));
    dp.lists = lists;
    dp
}

fn settings() -> Datapool {
    let mut gain = Element::scalar("Gain", Value::U16(100), Value::U16(0), Value::U16(1000));
    gain.factor = 0.5;
    gain.unit = "%".into();
    let mut params = List::new("Params");
    params.elements.push(gain);
    params.elements.push(Element::scalar(
        "Offset",
        Value::S16(0),
        Value::S16(i16::MIN),
        Value::S16(i16::MAX),
    ));
    let mut dp = datapool("Settings", DatapoolKind::Nvm, MAIN, vec![params]);
    dp.nvm_size = 64;
    dp
}

fn signal(element: u32, start: u16, length: u16, mux: MuxRole) -> CanSignal {
    let mut s = CanSignal::new(element, start, length);
    s.mux = mux;
    s
}

fn layer2() -> CanProtocol {
    let mut status = CanMessage::new("Status", 0x100, 8, TxMethod::Cyclic);
    status.cycle_time_ms = 100;
    status.signals = vec![
        signal(0, 0, 16, MuxRole::None),
        signal(1, 16, 8, MuxRole::Multiplexer),
        signal(2, 24, 8, MuxRole::Multiplexed(0)),
        signal(3, 24, 8, MuxRole::Multiplexed(1)),
    ];

    let mut command = CanMessage::new("Command", 0x200, 1, TxMethod::Cyclic);
    command.cycle_time_ms = 50;
    command.timeout_ms = 150;
    command.signals = vec![signal(0, 0, 8, MuxRole::None)];

    CanProtocol {
        protocol: ProtocolType::Layer2,
        datapool_index: DATAPOOL_COM,
        containers: vec![MessageContainer {
            active: true,
            tx_messages: vec![status],
            rx_messages: vec![command],
        }],
    }
}

fn canopen() -> CanProtocol {
    let mut feedback = CanMessage::new("IoFeedback", 0x184, 1, TxMethod::CanOpenType255);
    feedback.cycle_time_ms = 100;
    feedback.timeout_ms = 300;
    feedback.canopen_owner = Some(IO_MODULE);
    let mut inputs = CanSignal::new(0, 0, 8);
    inputs.od_index = 0x6000;
    inputs.od_sub_index = 1;
    feedback.signals.push(inputs);

    CanProtocol {
        protocol: ProtocolType::CanOpen,
        datapool_index: 2,
        containers: vec![
            MessageContainer::default(),
            MessageContainer {
                active: true,
                tx_messages: vec![],
                rx_messages: vec![feedback],
            },
        ],
    }
}

fn manager() -> CanOpenManagerInfo {
    let mut device = CanOpenDeviceInfo::new(IO_MODULE, "IoModule", 4);
    device.heartbeat_producing = true;
    device.heartbeat_producer_time_ms = 100;
    let od = &mut device.object_dictionary;
    od.insert(0x1005, 0, OdAccess::ReadWrite);
    od.insert(0x1017, 0, OdAccess::ReadWrite);
    od.insert(0x1018, 1, OdAccess::ReadOnly);
    for sub in [1, 2, 5] {
        od.insert(0x1800, sub, OdAccess::ReadWrite);
    }
    od.insert(0x1A00, 0, OdAccess::ReadWrite);
    od.insert(0x1A00, 1, OdAccess::ReadWrite);

    let mut manager = CanOpenManagerInfo::new(1);
    manager.heartbeat_producing = true;
    manager.heartbeat_producer_time_ms = 50;
    manager.devices.push(device);
    manager
}

fn halc_config() -> HalcConfig {
    let channel = |name: &str, safety_relevant: bool, filter: u8| HalcChannel {
        name: name.into(),
        comment: String::new(),
        safety_relevant,
        use_case: 2,
        values: vec![Value::U8(filter)],
    };
    HalcConfig {
        safety_mode: SafetyMode::TwoLevelsWithDropping,
        domains: vec![HalcDomain {
            name: "DigitalIn".into(),
            parameters: vec![HalcParameter {
                name: "Filter".into(),
                value_type: ValueType::U8,
            }],
            domain_values: vec![],
            channels: vec![
                channel("EmergencyStop", true, 5),
                channel("DoorContact", false, 10),
                channel("KeySwitch", false, 10),
            ],
        }],
    }
}

pub fn node() -> Node {
    let mut display = datapool("Display", DatapoolKind::Generic, HMI, vec![list("Screen", &["Page"])]);
    display.scope_is_private = false;
    let mut halc_safe = datapool(
        "HalcSafe",
        DatapoolKind::Halc,
        MAIN,
        vec![list("Inputs", &["EmergencyStop"])],
    );
    halc_safe.is_safety = true;

    let mut node = Node {
        name: "Controller".into(),
        data_blocks: vec![
            block("Main", DataBlockKind::Programmable, 1),
            block("Hmi", DataBlockKind::Programmable, 2),
            block("HalcParams", DataBlockKind::ParameterSetHalc, 3),
        ],
        datapools: vec![
            settings(),
            datapool(
                "Com1",
                DatapoolKind::Com,
                MAIN,
                vec![
                    list("Can1Tx", &["Speed", "Selector", "Temperature", "Pressure"]),
                    list("Can1Rx", &["Setpoint"]),
                ],
            ),
            datapool(
                "CanOpen",
                DatapoolKind::Com,
                MAIN,
                vec![
                    list("Can1Tx", &[]),
                    list("Can1Rx", &[]),
                    list("Can2Tx", &[]),
                    list("Can2Rx", &["Inputs"]),
                ],
            ),
            display,
            datapool("Panel", DatapoolKind::Generic, HMI, vec![list("Keys", &["Pressed"])]),
            halc_safe,
            datapool(
                "HalcNonSafe",
                DatapoolKind::Halc,
                HALC_PARAMS,
                vec![list("Inputs", &["DoorContact", "KeySwitch"])],
            ),
        ],
        can_protocols: vec![layer2(), canopen()],
        halc_config: Some(halc_config()),
        com_interfaces: vec![
            ComInterface {
                kind: InterfaceKind::Can,
                number: 0,
                node_id: 1,
                diagnosis_server: true,
                routing: false,
                bitrate_kbps: 250,
            },
            ComInterface {
                kind: InterfaceKind::Can,
                number: 1,
                node_id: 1,
                diagnosis_server: false,
                routing: false,
                bitrate_kbps: 500,
            },
        ],
        server_settings: ServerSettings {
            dpd_data_block: Some(MAIN),
            ..ServerSettings::default()
        },
        ..Node::default()
    };
    node.canopen_managers.insert(1, manager());
    node
}
