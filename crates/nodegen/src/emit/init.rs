// crates/nodegen/src/emit/init.rs

//! Runtime-init wrapper of an application (`osy_init.h/.c`).
//!
//! Collects the Datapools visible to the application and every generated
//! protocol configuration so that the runtime can be initialized from one
//! record. The application hosting the diagnostic protocol driver also gets
//! the server settings.

use crate::emit::{canopen_init, datapool, halc};
use crate::emit::{close_header, open_header, open_source};
use crate::error::ExportError;
use crate::log::{ArtifactContext, gen_debug, gen_info};
use crate::util::literal::flag;
use crate::util::naming::can_bus_name;
use crate::util::writer::inline_braced;
use crate::util::{FilePair, ProjectId, Reference, Row, SourceFile};
use nodegen_model::{ComInterface, Datapool, HalcVariant, InterfaceKind, ServerSettings};

pub const FILE_STEM: &str = "osy_init";
const UPPER: &str = "OSY_INIT";
const RUNTIME_HEADER: &str = "osy_init_configuration.h";

/// Settings of the diagnostic protocol driver host.
#[derive(Debug, Clone)]
pub struct DpdSettings<'a> {
    pub process_id: u8,
    pub server: &'a ServerSettings,
    /// Interfaces of the node; only those with the diagnostic server enabled are listed.
    pub interfaces: &'a [ComInterface],
}

/// Everything the runtime-init emitter needs.
#[derive(Debug, Clone)]
pub struct InitExport<'a> {
    pub data_block: &'a str,
    /// Datapools visible to the application, in application index order.
    pub datapools: &'a [&'a Datapool],
    /// File stems of the generated communication stack configurations.
    pub protocols: &'a [String],
    pub canopen: bool,
    pub halc: &'a [HalcVariant],
    pub dpd: Option<DpdSettings<'a>>,
    /// Runtime-init subversion (see [`crate::version::init`]).
    pub version: u16,
    pub project_id: &'a ProjectId,
}

fn interface_tag(kind: InterfaceKind) -> &'static str {
    match kind {
        InterfaceKind::Can => "OSY_DPD_INTERFACE_CAN",
        InterfaceKind::Ethernet => "OSY_DPD_INTERFACE_ETHERNET",
    }
}

fn interface_name(interface: &ComInterface) -> String {
    match interface.kind {
        InterfaceKind::Can => can_bus_name(interface.number),
        InterfaceKind::Ethernet => format!("ETH{}", u16::from(interface.number) + 1),
    }
}

pub fn create_source_code(input: &InitExport<'_>) -> Result<FilePair, ExportError> {
    let ctx = ArtifactContext {
        data_block: input.data_block,
        artifact: FILE_STEM,
    };
    if input.dpd.is_some() {
        gen_info!(ctx, "Application hosts the diagnostic protocol driver");
    }
    let pair = FilePair {
        stem: FILE_STEM.to_string(),
        header: header(input),
        source: source(input),
    };
    gen_debug!(
        ctx,
        "Generated init wrapper: {} Datapools, {} protocols, subversion {}",
        input.datapools.len(),
        input.protocols.len(),
        input.version
    );
    Ok(pair)
}

fn header(input: &InitExport<'_>) -> SourceFile {
    let mut includes = vec![RUNTIME_HEADER.to_string()];
    includes.extend(input.datapools.iter().map(|dp| format!("{}.h", datapool::file_stem(dp))));
    includes.extend(input.protocols.iter().map(|stem| format!("{}.h", stem)));
    if input.canopen {
        includes.push(format!("{}.h", canopen_init::FILE_STEM));
    }
    includes.extend(input.halc.iter().map(|v| format!("{}.h", halc::file_stem(*v))));
    let includes: Vec<&str> = includes.iter().map(String::as_str).collect();

    let mut h = open_header(FILE_STEM, "Runtime initialization", &includes, input.project_id);
    h.blank();
    h.push(format!(
        "#define {}_NUMBER_OF_DATA_POOLS ({}U)",
        UPPER,
        input.datapools.len()
    ));
    h.push(format!(
        "#define {}_NUMBER_OF_PROTOCOLS ({}U)",
        UPPER,
        input.protocols.len()
    ));

    h.section("Global Constants");
    h.push(format!(
        "extern const T_osy_init_configuration gt_{}_Configuration;",
        FILE_STEM
    ));
    if input.dpd.is_some() {
        h.push(format!(
            "extern const T_osy_dpd_configuration gt_{}_DpdConfiguration;",
            FILE_STEM
        ));
    }
    close_header(&mut h);
    h
}

fn source(input: &InitExport<'_>) -> SourceFile {
    let mut c = open_source(FILE_STEM, "Runtime initialization", &[], input.project_id);

    c.section("Module Global Constants");
    let datapools_array = format!("mapt_{}_DataPools", FILE_STEM);
    if !input.datapools.is_empty() {
        let rows: Vec<Row> = input
            .datapools
            .iter()
            .map(|dp| Row::new(format!("&gt_{}_DataPool", dp.name)))
            .collect();
        c.blank();
        c.initializer(
            &format!(
                "static const T_osy_dpa_data_pool * const {}[{}_NUMBER_OF_DATA_POOLS]",
                datapools_array, UPPER
            ),
            &rows,
        );
    }

    let protocols_array = format!("mapt_{}_Protocols", FILE_STEM);
    if !input.protocols.is_empty() {
        let rows: Vec<Row> = input
            .protocols
            .iter()
            .map(|stem| Row::new(format!("&gt_{}_ProtocolConfiguration", stem)))
            .collect();
        c.blank();
        c.initializer(
            &format!(
                "static const T_osy_com_protocol_configuration * const {}[{}_NUMBER_OF_PROTOCOLS]",
                protocols_array, UPPER
            ),
            &rows,
        );
    }

    c.section("Global Constants");
    if let Some(dpd) = &input.dpd {
        dpd_records(&mut c, dpd);
        c.blank();
    }

    let canopen_symbol = format!("gt_{}_InitConfig", canopen_init::FILE_STEM);
    let halc_ref = |variant: HalcVariant| {
        let symbol = halc::config_symbol(variant);
        Reference::optional(input.halc.contains(&variant).then_some(symbol.as_str())).render()
    };
    c.initializer(
        &format!("const T_osy_init_configuration gt_{}_Configuration", FILE_STEM),
        &[
            Row::new(format!("{}_NUMBER_OF_DATA_POOLS", UPPER)),
            Row::new(Reference::slice(&datapools_array, 0, input.datapools.len()).render()),
            Row::new(format!("{}_NUMBER_OF_PROTOCOLS", UPPER)),
            Row::new(Reference::slice(&protocols_array, 0, input.protocols.len()).render()),
            Row::new(
                Reference::optional(input.canopen.then_some(canopen_symbol.as_str())).render(),
            )
            .comment("CANopen"),
            Row::new(halc_ref(HalcVariant::Safe)).comment("safe HALC"),
            Row::new(halc_ref(HalcVariant::NonSafe)).comment("non-safe HALC"),
        ],
    );
    c
}

fn dpd_records(c: &mut SourceFile, dpd: &DpdSettings<'_>) {
    let interfaces: Vec<&ComInterface> =
        dpd.interfaces.iter().filter(|i| i.diagnosis_server).collect();
    let array = format!("mat_{}_DpdInterfaces", FILE_STEM);
    if !interfaces.is_empty() {
        let rows: Vec<Row> = interfaces
            .iter()
            .map(|i| {
                Row::new(inline_braced(&[
                    interface_tag(i.kind).to_string(),
                    format!("{}U", i.number),
                    format!("{}U", i.node_id),
                    flag(i.routing).to_string(),
                ]))
                .comment(interface_name(i))
            })
            .collect();
        c.initializer(
            &format!(
                "static const T_osy_dpd_interface_configuration {}[{}]",
                array,
                rows.len()
            ),
            &rows,
        );
        c.blank();
    }

    let server = dpd.server;
    c.initializer(
        &format!("const T_osy_dpd_configuration gt_{}_DpdConfiguration", FILE_STEM),
        &[
            Row::new(format!("{}U", dpd.process_id)).comment("process ID"),
            Row::new(format!("{}U", server.max_clients)).comment("maximum number of clients"),
            Row::new(format!("{}U", server.max_parallel_transmissions))
                .comment("maximum parallel transmissions"),
            Row::new(format!("{}U", server.max_tx_message_buffer_size))
                .comment("Tx message buffer size"),
            Row::new(format!("{}U", server.max_rx_routing_message_buffer_size))
                .comment("Rx routing message buffer size"),
            Row::new(format!("{}U", interfaces.len())).comment("number of interfaces"),
            Row::new(Reference::slice(&array, 0, interfaces.len()).render()),
        ],
    );
}
