// crates/nodegen/src/emit/canopen_init.rs

//! Aggregates the CANopen managers of all interfaces (`canopen_init.h/.c`).
//!
//! Totals are kept as preprocessor sums of the per-interface defines so that
//! a regenerated manager file changes the aggregate without regenerating it.

use crate::emit::canopen::{self, ManagerSummary};
use crate::emit::{RamPlacement, close_header, open_header, open_source};
use crate::error::ExportError;
use crate::log::{ArtifactContext, gen_debug, gen_error};
use crate::util::{FilePair, ProjectId, Reference, Row, SourceFile};

pub const FILE_STEM: &str = "canopen_init";
const UPPER: &str = "CANOPEN_INIT";

/// Everything the aggregator needs.
#[derive(Debug, Clone)]
pub struct CanOpenInitExport<'a> {
    pub data_block: &'a str,
    /// One entry per manager-bearing interface, ascending by interface.
    pub managers: &'a [ManagerSummary],
    /// CANopen subversion (see [`crate::version::canopen`]).
    pub version: u16,
    pub project_id: &'a ProjectId,
}

/// Symbolic sum of a per-manager define, e.g.
/// `(CANOPEN_MGR_CAN1_NUMBER_OF_DEVICES + CANOPEN_MGR_CAN2_NUMBER_OF_DEVICES)`.
pub fn symbolic_sum(managers: &[ManagerSummary], suffix: &str) -> String {
    let terms: Vec<String> = managers
        .iter()
        .map(|m| format!("{}_{}", canopen::define_prefix(m.interface), suffix))
        .collect();
    format!("({})", terms.join(" + "))
}

pub fn create_source_code(input: &CanOpenInitExport<'_>) -> Result<FilePair, ExportError> {
    let ctx = ArtifactContext {
        data_block: input.data_block,
        artifact: FILE_STEM,
    };
    if input.managers.is_empty() {
        let err = ExportError::structural("no CANopen manager to aggregate");
        gen_error!(ctx, "{}", err);
        return Err(err);
    }

    let manager_headers: Vec<String> = input
        .managers
        .iter()
        .map(|m| format!("{}.h", canopen::file_stem(m.interface)))
        .collect();
    let includes: Vec<&str> = std::iter::once(canopen::RUNTIME_HEADER)
        .chain(manager_headers.iter().map(String::as_str))
        .collect();

    let header = header(input, &includes);
    let source = source(input);
    gen_debug!(
        ctx,
        "Aggregated {} managers, subversion {}",
        input.managers.len(),
        input.version
    );
    Ok(FilePair {
        stem: FILE_STEM.to_string(),
        header,
        source,
    })
}

fn header(input: &CanOpenInitExport<'_>, includes: &[&str]) -> SourceFile {
    let mut h = open_header(FILE_STEM, "CANopen initialization", includes, input.project_id);
    h.blank();
    h.push(format!(
        "#define {}_NUMBER_OF_MANAGERS ({}U)",
        UPPER,
        input.managers.len()
    ));
    for suffix in ["NUMBER_OF_DEVICES", "NUMBER_OF_TX_PDOS", "NUMBER_OF_RX_PDOS"] {
        h.push(format!(
            "#define {}_{} {}",
            UPPER,
            suffix,
            symbolic_sum(input.managers, suffix)
        ));
    }

    h.section("Global Constants");
    h.push(format!(
        "extern const T_osy_com_canopen_init_configuration gt_{}_InitConfig;",
        FILE_STEM
    ));
    close_header(&mut h);
    h
}

fn source(input: &CanOpenInitExport<'_>) -> SourceFile {
    let mut c = open_source(FILE_STEM, "CANopen initialization", &[], input.project_id);

    c.section("Module Global Variables");
    // instance tables of an empty category are left out, the C array would have no size
    let instances = [
        ("ManagerInstances", "manager", "NUMBER_OF_MANAGERS", input.managers.len()),
        (
            "DeviceInstances",
            "device",
            "NUMBER_OF_DEVICES",
            input.managers.iter().map(|m| m.devices).sum(),
        ),
        (
            "TxPdoInstances",
            "pdo",
            "NUMBER_OF_TX_PDOS",
            input.managers.iter().map(|m| m.tx_pdos).sum(),
        ),
        (
            "RxPdoInstances",
            "pdo",
            "NUMBER_OF_RX_PDOS",
            input.managers.iter().map(|m| m.rx_pdos).sum(),
        ),
    ];
    let mut references = Vec::new();
    for (name, kind, size, total) in instances {
        let array = format!("mat_{}_{}", FILE_STEM, name);
        if total > 0 {
            RamPlacement::NonSafe.place(
                &mut c,
                input.version >= 2,
                vec![format!(
                    "static T_osy_com_canopen_{}_instance {}[{}_{}];",
                    kind, array, UPPER, size
                )],
            );
        }
        references.push(Reference::slice(&array, 0, total));
    }

    c.section("Module Global Constants");
    let configs: Vec<Row> = input
        .managers
        .iter()
        .map(|m| Row::new(format!("&{}", canopen::manager_symbol(m.interface))))
        .collect();
    c.initializer(
        &format!(
            "static const T_osy_com_canopen_manager_configuration * const mapt_{}_ManagerConfigs[{}_NUMBER_OF_MANAGERS]",
            FILE_STEM, UPPER
        ),
        &configs,
    );

    c.section("Global Constants");
    let mut rows = vec![
        Row::new(format!("{}_NUMBER_OF_MANAGERS", UPPER)),
        Row::new(format!("&mapt_{}_ManagerConfigs[0]", FILE_STEM)),
    ];
    rows.extend(references.iter().map(|r| Row::new(r.render())));
    c.initializer(
        &format!(
            "const T_osy_com_canopen_init_configuration gt_{}_InitConfig",
            FILE_STEM
        ),
        &rows,
    );
    c
}
