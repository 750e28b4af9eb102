// crates/nodegen/tests/export.rs

mod fixture;

use fixture::{HALC_PARAMS, HMI, MAIN};
use nodegen::{ErrorKind, ExportOptions, export_data_block, export_node};
use nodegen_model::{DataBlockKind, Node};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn options(dir: &Path) -> ExportOptions {
    ExportOptions::new(dir.join("out"))
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn read(dir: &Path, name: &str) -> String {
    let path = dir.join("out").join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e))
}

/// The `<PREFIX>_PROJECT_ID_<ID>` token defined by a generated header.
fn project_id_token(header: &str) -> String {
    header
        .lines()
        .find(|l| l.starts_with("#define ") && l.contains("_PROJECT_ID_"))
        .and_then(|l| l.split_whitespace().nth(1))
        .expect("header defines no project ID")
        .to_string()
}

#[test]
fn test_programmable_block_produces_artifacts_in_order() {
    fixture::init_logger();
    let tmp = TempDir::new().unwrap();
    let paths = export_data_block(&fixture::node(), MAIN, &options(tmp.path())).unwrap();

    let stems = [
        "osy_init",
        "settings_data_pool",
        "com1_data_pool",
        "canopen_data_pool",
        "display_data_pool",
        "panel_data_pool",
        "halcsafe_data_pool",
        "halcnonsafe_data_pool",
        "comm_l2_can1",
        "canopen_mgr_can2",
        "canopen_init",
        "halc_config_safe",
    ];
    let expected: Vec<String> = stems
        .iter()
        .flat_map(|s| [format!("{}.h", s), format!("{}.c", s)])
        .collect();
    assert_eq!(file_names(&paths), expected);
    assert!(paths.iter().all(|p| p.exists()));
}

#[test]
fn test_every_pair_shares_its_project_id() {
    fixture::init_logger();
    let tmp = TempDir::new().unwrap();
    let paths = export_data_block(&fixture::node(), MAIN, &options(tmp.path())).unwrap();

    for pair in paths.chunks(2) {
        let header = fs::read_to_string(&pair[0]).unwrap();
        let source = fs::read_to_string(&pair[1]).unwrap();
        let token = project_id_token(&header);
        assert!(
            source.lines().any(|l| l == token),
            "{:?} does not expand {}",
            pair[1],
            token
        );
    }

    // different content, different ID
    let init = project_id_token(&read(tmp.path(), "osy_init.h"));
    let settings = project_id_token(&read(tmp.path(), "settings_data_pool.h"));
    assert_ne!(init.rsplit('_').next(), settings.rsplit('_').next());
}

#[test]
fn test_export_is_deterministic() {
    fixture::init_logger();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let node = fixture::node();
    let a = export_data_block(&node, MAIN, &options(first.path())).unwrap();
    let b = export_data_block(&node, MAIN, &options(second.path())).unwrap();

    assert_eq!(file_names(&a), file_names(&b));
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(fs::read(x).unwrap(), fs::read(y).unwrap(), "{:?} differs", x);
    }
}

#[test]
fn test_snapshot_survives_json_hand_off() {
    fixture::init_logger();
    let node = fixture::node();
    let json = node.to_json_string().unwrap();
    let loaded = Node::from_json_str(&json).unwrap();
    assert_eq!(loaded, node);

    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let a = export_data_block(&node, MAIN, &options(first.path())).unwrap();
    let b = export_data_block(&loaded, MAIN, &options(second.path())).unwrap();
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(fs::read(x).unwrap(), fs::read(y).unwrap());
    }
}

#[test]
fn test_datapool_linkage_and_features() {
    fixture::init_logger();
    let tmp = TempDir::new().unwrap();
    export_data_block(&fixture::node(), MAIN, &options(tmp.path())).unwrap();

    let settings_h = read(tmp.path(), "settings_data_pool.h");
    assert!(settings_h.contains("#define SETTINGS_PARAMS_INDEX_GAIN (0U)"));
    assert!(settings_h.contains("#define SETTINGS_PARAMS_GAIN_GET_SCALED()"));
    assert!(!settings_h.contains("SETTINGS_PARAMS_OFFSET_GET_SCALED"));
    let settings_c = read(tmp.path(), "settings_data_pool.c");
    assert!(settings_c.contains("mau8_Settings_NvmScratchBuffer"));
    assert!(settings_c.contains("OSY_DPA_DATA_POOL_LOCAL"));

    // COM elements carry the message name
    let com_h = read(tmp.path(), "com1_data_pool.h");
    assert!(com_h.contains("#define COM1_CAN1TX_INDEX_STATUS_SPEED (0U)"));
    assert!(com_h.contains("#define COM1_CAN1RX_INDEX_COMMAND_SETPOINT (0U)"));

    let display_c = read(tmp.path(), "display_data_pool.c");
    assert!(display_c.contains("OSY_DPA_DATA_POOL_REMOTE_PUBLIC"));
    assert!(!display_c.contains("gt_Display_DataPoolValues"));
    let panel_c = read(tmp.path(), "panel_data_pool.c");
    assert!(panel_c.contains("OSY_DPA_DATA_POOL_REMOTE,"));
}

#[test]
fn test_non_host_application_sees_only_public_foreign_datapools() {
    fixture::init_logger();
    let tmp = TempDir::new().unwrap();
    let paths = export_data_block(&fixture::node(), HMI, &options(tmp.path())).unwrap();
    assert_eq!(
        file_names(&paths),
        [
            "osy_init.h",
            "osy_init.c",
            "display_data_pool.h",
            "display_data_pool.c",
            "panel_data_pool.h",
            "panel_data_pool.c"
        ]
    );
    let init_c = read(tmp.path(), "osy_init.c");
    assert!(!init_c.contains("DpdConfiguration"));
}

#[test]
fn test_communication_and_canopen_files() {
    fixture::init_logger();
    let tmp = TempDir::new().unwrap();
    export_data_block(&fixture::node(), MAIN, &options(tmp.path())).unwrap();

    let comm_h = read(tmp.path(), "comm_l2_can1.h");
    assert!(comm_h.contains("#define COMM_L2_CAN1_NUMBER_OF_TX_MESSAGES (1U)"));
    let comm_c = read(tmp.path(), "comm_l2_can1.c");
    assert!(comm_c.contains("mat_comm_l2_can1_TxMuxDefinitions"));
    assert!(comm_c.contains("OSY_NON_SAFE_RAM_DATA_START"));

    let mgr_c = read(tmp.path(), "canopen_mgr_can2.c");
    assert!(mgr_c.contains("static const uint8 mau8_canopen_mgr_can2_IoModule_ConciseData["));
    assert!(mgr_c.contains("/* 0x1800:01 TPDO1 IoFeedback: set and enable */"));
    assert!(mgr_c.contains("&gt_CanOpen_DataPool"));

    let init_h = read(tmp.path(), "canopen_init.h");
    assert!(init_h.contains(
        "#define CANOPEN_INIT_NUMBER_OF_DEVICES (CANOPEN_MGR_CAN2_NUMBER_OF_DEVICES)"
    ));

    let osy_init_c = read(tmp.path(), "osy_init.c");
    assert!(osy_init_c.contains("&gt_comm_l2_can1_ProtocolConfiguration"));
    assert!(osy_init_c.contains("&gt_canopen_init_InitConfig, /* CANopen */"));
    assert!(osy_init_c.contains("gt_osy_init_DpdConfiguration"));
}

#[test]
fn test_halc_variants_drop_foreign_channels() {
    fixture::init_logger();
    let node = fixture::node();

    let main = TempDir::new().unwrap();
    export_data_block(&node, MAIN, &options(main.path())).unwrap();
    let safe = read(main.path(), "halc_config_safe.c");
    assert!(safe.contains("EmergencyStop"));
    assert!(!safe.contains("DoorContact"));
    assert!(safe.contains("&mt_halc_config_safe_DigitalIn_Channel"));

    let params = TempDir::new().unwrap();
    let paths = export_data_block(&node, HALC_PARAMS, &options(params.path())).unwrap();
    assert_eq!(file_names(&paths), ["halc_config_nonsafe.h", "halc_config_nonsafe.c"]);
    let non_safe = read(params.path(), "halc_config_nonsafe.c");
    assert!(non_safe.contains("DoorContact"));
    assert!(non_safe.contains("KeySwitch"));
    assert!(!non_safe.contains("EmergencyStop"));
    assert!(non_safe.contains("&mat_halc_config_nonsafe_DigitalIn_Channels[0]"));
}

#[test]
fn test_protocol_without_signals_writes_nothing() {
    fixture::init_logger();
    let mut node = fixture::node();
    for container in &mut node.can_protocols[0].containers {
        for message in container.tx_messages.iter_mut().chain(container.rx_messages.iter_mut()) {
            message.signals.clear();
        }
    }
    let tmp = TempDir::new().unwrap();
    let err = export_data_block(&node, MAIN, &options(tmp.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn test_unknown_version_writes_nothing() {
    fixture::init_logger();
    let mut node = fixture::node();
    node.data_blocks[MAIN].code_format_version = 9;
    let tmp = TempDir::new().unwrap();
    let err = export_data_block(&node, MAIN, &options(tmp.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn test_bad_indices() {
    fixture::init_logger();
    let tmp = TempDir::new().unwrap();
    let err = export_data_block(&fixture::node(), 17, &options(tmp.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);

    let mut node = fixture::node();
    node.datapools[0].owner = Some(42);
    let err = export_data_block(&node, MAIN, &options(tmp.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn test_canopen_interface_without_manager() {
    fixture::init_logger();
    let mut node = fixture::node();
    node.canopen_managers.clear();
    let tmp = TempDir::new().unwrap();
    let err = export_data_block(&node, MAIN, &options(tmp.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
}

#[test]
fn test_canopen_manager_without_messages_is_skipped() {
    fixture::init_logger();
    let mut node = fixture::node();
    node.can_protocols[1].containers[1].rx_messages.clear();
    for list in &mut node.datapools[2].lists {
        list.elements.clear();
    }
    let tmp = TempDir::new().unwrap();
    let paths = export_data_block(&node, MAIN, &options(tmp.path())).unwrap();

    let names = file_names(&paths);
    for stem in ["canopen_data_pool", "canopen_mgr_can2", "canopen_init"] {
        assert!(!names.contains(&format!("{}.c", stem)), "{} was generated", stem);
    }
    let osy_init_c = read(tmp.path(), "osy_init.c");
    assert!(!osy_init_c.contains("gt_canopen_init_InitConfig"));
    assert!(!osy_init_c.contains("gt_CanOpen_DataPool"));
}

#[test]
fn test_protocol_messages_need_datapool_elements() {
    fixture::init_logger();
    let mut node = fixture::node();
    for list in &mut node.datapools[2].lists {
        list.elements.clear();
    }
    let tmp = TempDir::new().unwrap();
    let err = export_data_block(&node, MAIN, &options(tmp.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn test_protocol_messages_need_a_can_interface() {
    fixture::init_logger();
    let mut node = fixture::node();
    node.com_interfaces.retain(|i| i.number != 1);
    let tmp = TempDir::new().unwrap();
    let err = export_data_block(&node, MAIN, &options(tmp.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
}

#[test]
fn test_binary_block_is_unsupported() {
    fixture::init_logger();
    let mut node = fixture::node();
    node.data_blocks[HMI].kind = DataBlockKind::Binary;
    let tmp = TempDir::new().unwrap();
    let err = export_data_block(&node, HMI, &options(tmp.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}

#[test]
fn test_node_export_separates_data_blocks() {
    fixture::init_logger();
    let mut node = fixture::node();
    node.data_blocks[HMI].active = false;
    let tmp = TempDir::new().unwrap();
    let paths = export_node(&node, &options(tmp.path())).unwrap();

    let out = tmp.path().join("out");
    assert!(out.join("main").join("osy_init.c").exists());
    assert!(out.join("halcparams").join("halc_config_nonsafe.c").exists());
    assert!(!out.join("hmi").exists());
    assert_eq!(paths.len(), 24 + 2);
}
