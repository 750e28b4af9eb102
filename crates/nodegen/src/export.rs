// crates/nodegen/src/export.rs

//! Orchestration of one export run.
//!
//! Every artifact of a Data Block is planned and rendered in memory before
//! the first file is written, so configuration errors never leave a partial
//! set of files behind. Writing stops at the first I/O failure; pairs written
//! before it stay in place.

use crate::config::ExportOptions;
use crate::emit::canopen::{CanOpenExport, ManagerSummary};
use crate::emit::canopen_init::CanOpenInitExport;
use crate::emit::comm::CommExport;
use crate::emit::datapool::{DatapoolExport, Linkage};
use crate::emit::halc::HalcExport;
use crate::emit::init::{DpdSettings, InitExport};
use crate::emit::{canopen, canopen_init, comm, datapool, halc, init};
use crate::error::ExportError;
use crate::util::naming::can_bus_name;
use crate::util::{FilePair, ProjectId, write_pair};
use crate::version;
use log::{debug, error, info};
use nodegen_model::{
    CanOpenManagerInfo, CanProtocol, DataBlock, DataBlockKind, Datapool, DatapoolKind,
    HalcVariant, MessageContainer, Node, ProtocolType,
};
use std::path::PathBuf;

/// Generates every file of the Data Block at `data_block_index` into
/// `options.output_dir` and returns the written paths in generation order.
pub fn export_data_block(
    node: &Node,
    data_block_index: usize,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>, ExportError> {
    let block = node.data_block(data_block_index)?;
    let pairs = plan_data_block(node, data_block_index, options)
        .inspect_err(|e| error!("[data_block={}] Export aborted: {}", block.name, e))?;

    let mut written = Vec::with_capacity(pairs.len() * 2);
    for pair in &pairs {
        let paths = write_pair(&options.output_dir, pair)
            .inspect_err(|e| error!("[data_block={}] {}", block.name, e))?;
        written.extend(paths);
    }
    info!(
        "[data_block={}] Wrote {} files to {}",
        block.name,
        written.len(),
        options.output_dir.display()
    );
    Ok(written)
}

/// Exports every active Data Block that code can be generated for, in node
/// order, each into its own sub-directory named after the lower case Data
/// Block name. Binary Data Blocks are skipped.
pub fn export_node(node: &Node, options: &ExportOptions) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();
    for (index, block) in node.data_blocks.iter().enumerate() {
        if !block.active || block.kind == DataBlockKind::Binary {
            debug!("[data_block={}] Skipped ({:?}, active: {})", block.name, block.kind, block.active);
            continue;
        }
        let block_options = ExportOptions {
            output_dir: options.output_dir.join(block.name.to_ascii_lowercase()),
            ..options.clone()
        };
        written.extend(export_data_block(node, index, &block_options)?);
    }
    Ok(written)
}

/// Working copy of a COM Datapool with every element that backs a signal
/// renamed to `<Message>_<Element>`.
///
/// Elements not referenced by any message keep their names. Signals pointing
/// past the end of their list are left for the emitters to report.
pub fn rename_com_elements(datapool: &Datapool, protocol: &CanProtocol) -> Datapool {
    let mut renamed = datapool.clone();
    for (interface, container) in protocol.containers.iter().enumerate() {
        let Ok(interface) = u8::try_from(interface) else {
            break;
        };
        let directions = [
            (CanProtocol::tx_list_index(interface), &container.tx_messages),
            (CanProtocol::rx_list_index(interface), &container.rx_messages),
        ];
        for (list_index, messages) in directions {
            let Some(list) = renamed.lists.get_mut(list_index) else {
                continue;
            };
            for message in messages {
                for signal in &message.signals {
                    let original = datapool
                        .lists
                        .get(list_index)
                        .and_then(|l| l.elements.get(signal.element_index as usize));
                    if let (Some(original), Some(element)) =
                        (original, list.elements.get_mut(signal.element_index as usize))
                    {
                        element.name = format!("{}_{}", message.name, original.name);
                    }
                }
            }
        }
    }
    renamed
}

// --- Planning ---

/// A Datapool as seen by one application.
#[derive(Debug, Clone, Copy)]
struct VisibleDatapool<'a> {
    index: usize,
    datapool: &'a Datapool,
    linkage: Linkage,
}

/// How the application `block_index` reaches `datapool`, or `None` if it does not see it.
fn linkage_for(
    node: &Node,
    block_index: usize,
    datapool: &Datapool,
    version: u16,
) -> Result<Option<Linkage>, ExportError> {
    let Some(owner) = datapool.owner else {
        return Ok(None);
    };
    node.data_block(owner)?;
    if owner == block_index {
        return Ok(Some(Linkage::Local));
    }
    let dpd_host = node.is_dpd_host(block_index);
    let linkage = match (datapool.scope_is_private, version >= 4) {
        (true, _) if dpd_host => Some(Linkage::Remote),
        (false, true) => Some(Linkage::RemotePublic),
        (false, false) if dpd_host => Some(Linkage::Remote),
        _ => None,
    };
    Ok(linkage)
}

/// Non-empty Datapools visible to an application, in node order.
fn visible_datapools(
    node: &Node,
    block_index: usize,
    version: u16,
) -> Result<Vec<VisibleDatapool<'_>>, ExportError> {
    let mut visible = Vec::new();
    for (index, datapool) in node.datapools.iter().enumerate() {
        if datapool.is_empty() {
            continue;
        }
        if let Some(linkage) = linkage_for(node, block_index, datapool, version)? {
            visible.push(VisibleDatapool {
                index,
                datapool,
                linkage,
            });
        }
    }
    Ok(visible)
}

fn subversion(
    table: fn(u16) -> Option<u16>,
    domain: &str,
    block: &DataBlock,
) -> Result<u16, ExportError> {
    table(block.code_format_version).ok_or_else(|| {
        ExportError::unsupported(format!(
            "code format version {} of Data Block '{}' has no {} layout",
            block.code_format_version, block.name, domain
        ))
    })
}

/// A protocol interface that gets its own files.
struct ProtocolInterface<'a> {
    protocol: &'a CanProtocol,
    interface: u8,
    container: &'a MessageContainer,
}

/// Renders every artifact of a Data Block.
fn plan_data_block(
    node: &Node,
    block_index: usize,
    options: &ExportOptions,
) -> Result<Vec<FilePair>, ExportError> {
    let block = node.data_block(block_index)?;
    let version = block.code_format_version;
    if !version::is_known(version) {
        return Err(ExportError::unsupported(format!(
            "unknown code format version {} of Data Block '{}'",
            version, block.name
        )));
    }
    match block.kind {
        DataBlockKind::Programmable => plan_programmable(node, block_index, block, options),
        DataBlockKind::ParameterSetHalc => {
            let halc_pairs = plan_halc(node, block_index, block)?;
            Ok(halc_pairs.into_iter().map(|(_, pair)| pair).collect())
        }
        DataBlockKind::Binary => Err(ExportError::unsupported(format!(
            "Data Block '{}' is a binary, no code can be generated",
            block.name
        ))),
    }
}

fn plan_programmable(
    node: &Node,
    block_index: usize,
    block: &DataBlock,
    options: &ExportOptions,
) -> Result<Vec<FilePair>, ExportError> {
    let version = block.code_format_version;
    let datapools = visible_datapools(node, block_index, version)?;
    let interfaces = protocol_interfaces(node, block_index)?;
    debug!(
        "[data_block={}] Planned {} Datapools and {} protocol interfaces",
        block.name,
        datapools.len(),
        interfaces.len()
    );

    let mut datapool_pairs = Vec::new();
    for (index_in_application, visible) in datapools.iter().enumerate() {
        datapool_pairs.push(datapool_pair(node, block, visible, index_in_application, options)?);
    }

    let mut protocol_pairs = Vec::new();
    let mut protocol_stems = Vec::new();
    let mut managers = Vec::new();
    for entry in &interfaces {
        let datapool = com_datapool(node, entry.protocol)?;
        if entry.protocol.protocol == ProtocolType::CanOpen {
            let pair = canopen_pair(node, block, entry, &datapool)?;
            managers.push(ManagerSummary::new(
                entry.interface,
                manager(node, entry.interface)?,
                entry.container,
            ));
            protocol_pairs.push(pair);
        } else {
            let pair = comm_pair(block, entry, &datapool)?;
            protocol_stems.push(pair.stem.clone());
            protocol_pairs.push(pair);
        }
    }
    if !managers.is_empty() {
        protocol_pairs.push(canopen_init_pair(block, &managers)?);
    }

    let halc_pairs = plan_halc(node, block_index, block)?;
    let halc_variants: Vec<HalcVariant> = halc_pairs.iter().map(|(v, _)| *v).collect();

    let datapool_refs: Vec<&Datapool> = datapools.iter().map(|v| v.datapool).collect();
    let dpd = node.is_dpd_host(block_index).then(|| DpdSettings {
        process_id: block.process_id,
        server: &node.server_settings,
        interfaces: &node.com_interfaces,
    });
    let init_version = subversion(version::init, "runtime-init", block)?;
    let datapool_names: Vec<&str> = datapool_refs.iter().map(|d| d.name.as_str()).collect();
    let project_id = ProjectId::compute(&(
        &datapool_names,
        &protocol_stems,
        !managers.is_empty(),
        &halc_variants,
        dpd.as_ref()
            .map(|d| (d.process_id, d.server, d.interfaces)),
        init_version,
    ))?;
    let init_pair = init::create_source_code(&InitExport {
        data_block: &block.name,
        datapools: &datapool_refs,
        protocols: &protocol_stems,
        canopen: !managers.is_empty(),
        halc: &halc_variants,
        dpd,
        version: init_version,
        project_id: &project_id,
    })?;

    let mut pairs = vec![init_pair];
    pairs.extend(datapool_pairs);
    pairs.extend(protocol_pairs);
    pairs.extend(halc_pairs.into_iter().map(|(_, pair)| pair));
    Ok(pairs)
}

/// Protocol interfaces of the COM Datapools owned by this application.
fn protocol_interfaces(
    node: &Node,
    block_index: usize,
) -> Result<Vec<ProtocolInterface<'_>>, ExportError> {
    let mut interfaces = Vec::new();
    for protocol in &node.can_protocols {
        let datapool = node.datapool(protocol.datapool_index)?;
        if datapool.owner != Some(block_index) {
            continue;
        }
        for (number, container) in protocol.containers.iter().enumerate() {
            let interface = u8::try_from(number).map_err(|_| ExportError::Range {
                what: "CAN interfaces",
                index: number,
                len: usize::from(u8::MAX) + 1,
            })?;
            if !container.active || container.message_count() == 0 {
                continue;
            }
            if node.can_interface(interface).is_none() {
                return Err(ExportError::structural(format!(
                    "{:?} messages on {} but the node has no such CAN interface",
                    protocol.protocol,
                    can_bus_name(interface)
                )));
            }
            if datapool.is_empty() {
                return Err(ExportError::structural(format!(
                    "{:?} messages on {} are backed by Datapool '{}' which has no elements",
                    protocol.protocol,
                    can_bus_name(interface),
                    datapool.name
                )));
            }
            interfaces.push(ProtocolInterface {
                protocol,
                interface,
                container,
            });
        }
    }
    Ok(interfaces)
}

/// The renamed COM Datapool backing a protocol, after pairing checks.
fn com_datapool(node: &Node, protocol: &CanProtocol) -> Result<Datapool, ExportError> {
    let datapool = node.datapool(protocol.datapool_index)?;
    if datapool.kind != DatapoolKind::Com {
        return Err(ExportError::structural(format!(
            "{:?} protocol is backed by Datapool '{}' which is not a COM Datapool",
            protocol.protocol, datapool.name
        )));
    }
    Ok(rename_com_elements(datapool, protocol))
}

fn manager(node: &Node, interface: u8) -> Result<&CanOpenManagerInfo, ExportError> {
    node.canopen_managers.get(&interface).ok_or_else(|| {
        ExportError::structural(format!(
            "CANopen messages on {} have no manager",
            can_bus_name(interface)
        ))
    })
}

fn datapool_pair(
    node: &Node,
    block: &DataBlock,
    visible: &VisibleDatapool<'_>,
    index_in_application: usize,
    options: &ExportOptions,
) -> Result<FilePair, ExportError> {
    let datapool_version = subversion(version::datapool, "Datapool", block)?;
    let renamed = match (visible.datapool.kind, node.protocol_for_datapool(visible.index)) {
        (DatapoolKind::Com, Some(protocol)) => rename_com_elements(visible.datapool, protocol),
        _ => visible.datapool.clone(),
    };

    let (owner_process_id, index_in_owner) = match visible.datapool.owner {
        Some(owner) => {
            let owner_block = node.data_block(owner)?;
            let owner_view = visible_datapools(node, owner, owner_block.code_format_version)?;
            let position = owner_view
                .iter()
                .position(|v| v.index == visible.index)
                .ok_or_else(|| {
                    ExportError::structural(format!(
                        "Datapool '{}' is not visible to its owner '{}'",
                        visible.datapool.name, owner_block.name
                    ))
                })?;
            (owner_block.process_id, position)
        }
        None => (block.process_id, index_in_application),
    };

    let project_id = ProjectId::compute(&(
        &renamed,
        visible.linkage,
        owner_process_id,
        index_in_owner,
        index_in_application,
        options.scaling_support,
        datapool_version,
    ))?;
    crate::emit::datapool::create_source_code(&DatapoolExport {
        data_block: &block.name,
        datapool: &renamed,
        index_in_application,
        version: datapool_version,
        scaling_support: options.scaling_support,
        linkage: visible.linkage,
        owner_process_id,
        index_in_owner,
        project_id: &project_id,
    })
}

fn comm_pair(
    block: &DataBlock,
    entry: &ProtocolInterface<'_>,
    datapool: &Datapool,
) -> Result<FilePair, ExportError> {
    let comm_version = subversion(version::comm, "communication stack", block)?;
    let project_id = ProjectId::compute(&(
        entry.protocol.protocol,
        entry.interface,
        entry.container,
        datapool,
        comm_version,
    ))?;
    comm::create_source_code(&CommExport {
        data_block: &block.name,
        protocol: entry.protocol.protocol,
        interface: entry.interface,
        container: entry.container,
        datapool,
        version: comm_version,
        project_id: &project_id,
    })
}

fn canopen_pair(
    node: &Node,
    block: &DataBlock,
    entry: &ProtocolInterface<'_>,
    datapool: &Datapool,
) -> Result<FilePair, ExportError> {
    let canopen_version = subversion(version::canopen, "CANopen", block)?;
    let manager = manager(node, entry.interface)?;
    let project_id = ProjectId::compute(&(
        entry.interface,
        manager,
        entry.container,
        datapool,
        canopen_version,
    ))?;
    canopen::create_source_code(&CanOpenExport {
        data_block: &block.name,
        interface: entry.interface,
        manager,
        container: entry.container,
        datapool,
        version: canopen_version,
        project_id: &project_id,
    })
}

fn canopen_init_pair(block: &DataBlock, managers: &[ManagerSummary]) -> Result<FilePair, ExportError> {
    let canopen_version = subversion(version::canopen, "CANopen", block)?;
    let summary: Vec<(u8, usize, usize, usize)> = managers
        .iter()
        .map(|m| (m.interface, m.devices, m.tx_pdos, m.rx_pdos))
        .collect();
    let project_id = ProjectId::compute(&(summary, canopen_version))?;
    canopen_init::create_source_code(&CanOpenInitExport {
        data_block: &block.name,
        managers,
        version: canopen_version,
        project_id: &project_id,
    })
}

/// HALC configurations of the HALC Datapools owned by this application, at
/// most one per variant.
fn plan_halc(
    node: &Node,
    block_index: usize,
    block: &DataBlock,
) -> Result<Vec<(HalcVariant, FilePair)>, ExportError> {
    let mut pairs: Vec<(HalcVariant, FilePair)> = Vec::new();
    for index in node.datapools_owned_by(block_index) {
        let datapool = node.datapool(index)?;
        if !datapool.kind.is_halc() {
            continue;
        }
        let variant = HalcVariant::from_safety(datapool.is_safety);
        if pairs.iter().any(|(v, _)| *v == variant) {
            return Err(ExportError::structural(format!(
                "Data Block '{}' owns more than one {:?} HALC Datapool",
                block.name, variant
            )));
        }
        let config = node.halc_config.as_ref().ok_or_else(|| {
            ExportError::structural(format!(
                "HALC Datapool '{}' exists but the node has no HALC configuration",
                datapool.name
            ))
        })?;
        let halc_version = subversion(version::halc, "HALC", block)?;
        let project_id = ProjectId::compute(&(config, variant, &datapool.name, halc_version))?;
        let pair = halc::create_source_code(&HalcExport {
            data_block: &block.name,
            config,
            variant,
            datapool,
            version: halc_version,
            project_id: &project_id,
        })?;
        pairs.push((variant, pair));
    }
    Ok(pairs)
}
