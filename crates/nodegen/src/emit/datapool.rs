// crates/nodegen/src/emit/datapool.rs

//! Datapool definition files (`<datapool>_data_pool.h/.c`).

use crate::emit::{RamPlacement, close_header, open_header, open_source};
use crate::error::ExportError;
use crate::log::{ArtifactContext, gen_debug, gen_error};
use crate::util::literal::{flag, format_f64, format_value, rounded_f64};
use crate::util::naming::{c_type, element_type_tag, lower, member_declaration, member_name, upper};
use crate::util::writer::{Row, braced, inline_braced};
use crate::util::{FilePair, ProjectId, Reference, SourceFile};
use nodegen_model::{Content, Datapool, Element, List};
use serde::Serialize;

/// Runtime header declaring the Datapool descriptor types.
pub const RUNTIME_HEADER: &str = "osy_dpa_data_pool.h";

/// Most datasets a list can have; the runtime counts them in a byte.
pub const MAX_DATASETS: usize = 255;

/// How the exporting application reaches a Datapool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Linkage {
    /// Owned by the exporting application.
    Local,
    /// Owned by another application and accessed through the diagnostic driver.
    Remote,
    /// Owned by another application and publicly readable.
    RemotePublic,
}

impl Linkage {
    pub fn is_remote(self) -> bool {
        self != Linkage::Local
    }

    /// Encoding in the Datapool record.
    ///
    /// Subversions below 4 only know a remote flag.
    pub fn render(self, version: u16) -> &'static str {
        if version >= 4 {
            match self {
                Linkage::Local => "OSY_DPA_DATA_POOL_LOCAL",
                Linkage::Remote => "OSY_DPA_DATA_POOL_REMOTE",
                Linkage::RemotePublic => "OSY_DPA_DATA_POOL_REMOTE_PUBLIC",
            }
        } else {
            flag(self.is_remote())
        }
    }
}

/// Everything the Datapool emitter needs for one Datapool.
#[derive(Debug, Clone)]
pub struct DatapoolExport<'a> {
    /// Name of the exporting Data Block, for diagnostics.
    pub data_block: &'a str,
    pub datapool: &'a Datapool,
    /// Position of the Datapool within the exporting application.
    pub index_in_application: usize,
    /// Datapool subversion (see [`crate::version::datapool`]).
    pub version: u16,
    /// Whether scaling macros were requested.
    pub scaling_support: bool,
    pub linkage: Linkage,
    /// Process ID of the owning application.
    pub owner_process_id: u8,
    /// Position of the Datapool within the owning application.
    pub index_in_owner: usize,
    pub project_id: &'a ProjectId,
}

/// File stem of a Datapool's files.
pub fn file_stem(datapool: &Datapool) -> String {
    format!("{}_data_pool", lower(&datapool.name))
}

/// Generates the header and implementation of one Datapool.
pub fn create_source_code(input: &DatapoolExport<'_>) -> Result<FilePair, ExportError> {
    let stem = file_stem(input.datapool);
    let ctx = ArtifactContext {
        data_block: input.data_block,
        artifact: &stem,
    };

    if input.linkage == Linkage::RemotePublic && input.version < 4 {
        gen_error!(
            ctx,
            "Public Datapool {} requires subversion 4, got {}",
            input.datapool.name,
            input.version
        );
        return Err(ExportError::unsupported(format!(
            "public scope of Datapool '{}' needs Datapool subversion 4 or newer",
            input.datapool.name
        )));
    }
    if let Err(e) = check_datapool(input.datapool) {
        gen_error!(ctx, "{}", e);
        return Err(e);
    }

    let emitter = DatapoolEmitter::new(input);
    let header = emitter.header()?;
    let source = emitter.source()?;
    gen_debug!(
        ctx,
        "Generated Datapool {} ({:?}, subversion {})",
        input.datapool.name,
        input.linkage,
        input.version
    );
    Ok(FilePair {
        stem,
        header,
        source,
    })
}

/// Structural checks done before any text is produced.
fn check_datapool(datapool: &Datapool) -> Result<(), ExportError> {
    if datapool.is_empty() {
        return Err(ExportError::structural(format!(
            "Datapool '{}' has no elements",
            datapool.name
        )));
    }
    for list in &datapool.lists {
        if list.datasets.len() > MAX_DATASETS {
            return Err(ExportError::structural(format!(
                "list '{}' of Datapool '{}' has {} datasets, at most {} are supported",
                list.name,
                datapool.name,
                list.datasets.len(),
                MAX_DATASETS
            )));
        }
        for element in &list.elements {
            check_element(datapool, list, element)?;
        }
    }
    Ok(())
}

fn check_element(datapool: &Datapool, list: &List, element: &Element) -> Result<(), ExportError> {
    let name = || format!("{}::{}::{}", datapool.name, list.name, element.name);

    let factor_ok = element.factor.is_finite()
        && rounded_f64(element.factor).is_ok_and(|f| f > 0.0 && f.is_finite());
    if !factor_ok {
        return Err(ExportError::structural(format!(
            "element '{}' has an invalid scaling factor {}",
            name(),
            element.factor
        )));
    }

    if element.dataset_values.len() != list.datasets.len() {
        return Err(ExportError::structural(format!(
            "element '{}' has {} dataset values for {} datasets",
            name(),
            element.dataset_values.len(),
            list.datasets.len()
        )));
    }

    let count = element.value_count() as usize;
    let contents = [&element.default, &element.min, &element.max]
        .into_iter()
        .chain(element.dataset_values.iter());
    for content in contents {
        if content.len() != count {
            return Err(ExportError::structural(format!(
                "element '{}' expects {} values, content has {}",
                name(),
                count,
                content.len()
            )));
        }
        if let Some(v) = content.iter().find(|v| v.value_type() != element.value_type) {
            return Err(ExportError::structural(format!(
                "element '{}' is {:?} but holds a {:?} value",
                name(),
                element.value_type,
                v.value_type()
            )));
        }
    }
    Ok(())
}

struct DatapoolEmitter<'a> {
    input: &'a DatapoolExport<'a>,
    dp: &'a Datapool,
    /// Symbol-safe Datapool name as written in the configuration.
    name: &'a str,
    upper: String,
    placement: RamPlacement,
}

impl<'a> DatapoolEmitter<'a> {
    fn new(input: &'a DatapoolExport<'a>) -> Self {
        Self {
            input,
            dp: input.datapool,
            name: &input.datapool.name,
            upper: upper(&input.datapool.name),
            placement: RamPlacement::for_datapool(input.datapool),
        }
    }

    fn is_local(&self) -> bool {
        !self.input.linkage.is_remote()
    }

    fn wrapper_macros(&self) -> bool {
        self.input.version >= 3
    }

    fn has_remote_info(&self) -> bool {
        self.input.version >= 4 || self.input.linkage.is_remote()
    }

    fn has_scratch_buffer(&self) -> bool {
        self.input.version >= 5 && self.is_local() && self.dp.kind.is_nvm()
    }

    fn scaling_enabled(&self) -> bool {
        self.input.scaling_support && self.input.version >= 5 && self.is_local()
    }

    fn non_empty_lists(&self) -> impl Iterator<Item = &'a List> {
        self.dp.lists.iter().filter(|l| !l.elements.is_empty())
    }

    fn list_type(&self, list: &List) -> String {
        format!("T_{}_{}_Values", self.name, list.name)
    }

    fn values_type(&self) -> String {
        format!("T_{}_DataPool_Values", self.name)
    }

    fn values_var(&self) -> String {
        format!("gt_{}_DataPoolValues", self.name)
    }

    fn definition_var(&self) -> String {
        format!("gt_{}_DataPool", self.name)
    }

    fn scratch_buffer_size(&self) -> u32 {
        self.dp
            .lists
            .iter()
            .map(|l| l.data_size() + if l.nvm_crc_active { 2 } else { 0 })
            .max()
            .unwrap_or(0)
            .max(1)
    }

    // --- Header ---

    fn header(&self) -> Result<SourceFile, ExportError> {
        let stem = file_stem(self.dp);
        let mut h = open_header(
            &stem,
            &format!("Definition of Datapool {}", self.name),
            &[RUNTIME_HEADER],
            self.input.project_id,
        );

        h.blank();
        h.push(format!(
            "#define {}_DATA_POOL_INDEX ({}U)",
            self.upper, self.input.index_in_application
        ));
        h.push(format!(
            "#define {}_NUMBER_OF_LISTS ({}U)",
            self.upper,
            self.dp.lists.len()
        ));
        h.blank();
        for (i, list) in self.dp.lists.iter().enumerate() {
            h.push(format!(
                "#define {}_LIST_INDEX_{} ({}U)",
                self.upper,
                upper(&list.name),
                i
            ));
        }
        for list in &self.dp.lists {
            let l = upper(&list.name);
            h.blank();
            h.push(format!(
                "#define {}_{}_NUMBER_OF_ELEMENTS ({}U)",
                self.upper,
                l,
                list.elements.len()
            ));
            for (i, element) in list.elements.iter().enumerate() {
                h.push(format!(
                    "#define {}_{}_INDEX_{} ({}U)",
                    self.upper,
                    l,
                    upper(&element.name),
                    i
                ));
            }
            h.push(format!(
                "#define {}_{}_NUMBER_OF_DATASETS ({}U)",
                self.upper,
                l,
                list.datasets.len()
            ));
        }

        if self.scaling_enabled() {
            self.scaling_macros(&mut h)?;
        }

        if self.is_local() {
            h.section("Types");
            for list in self.non_empty_lists() {
                h.push("typedef struct");
                let mut members: Vec<String> = vec!["{".into()];
                members.extend(
                    list.elements
                        .iter()
                        .map(|e| format!("   {}", member_declaration(e))),
                );
                h.extend(members);
                h.push(format!("}} {};", self.list_type(list)));
                h.blank();
            }
            h.push("typedef struct");
            h.push("{");
            for list in self.non_empty_lists() {
                h.push(format!("   {} t_{};", self.list_type(list), list.name));
            }
            h.push(format!("}} {};", self.values_type()));
        }

        h.section("Global Variables");
        if self.is_local() {
            self.placement.place(
                &mut h,
                self.wrapper_macros(),
                vec![format!("extern {} {};", self.values_type(), self.values_var())],
            );
        }
        h.push(format!(
            "extern const T_osy_dpa_data_pool {};",
            self.definition_var()
        ));

        close_header(&mut h);
        Ok(h)
    }

    fn scaling_macros(&self, h: &mut SourceFile) -> Result<(), ExportError> {
        let mut emitted_section = false;
        for list in &self.dp.lists {
            for element in list.elements.iter().filter(|e| e.is_scaled()) {
                if !emitted_section {
                    h.section("Scaling");
                    emitted_section = true;
                }
                let factor = format_f64(element.factor)?;
                let offset = format_f64(element.offset)?;
                let base = format!(
                    "{}_{}_{}",
                    self.upper,
                    upper(&list.name),
                    upper(&element.name)
                );
                let (params, cell) = if element.is_array() {
                    (
                        "(index)",
                        format!(
                            "{}.t_{}.{}[(index)]",
                            self.values_var(),
                            list.name,
                            member_name(element)
                        ),
                    )
                } else {
                    (
                        "()",
                        format!("{}.t_{}.{}", self.values_var(), list.name, member_name(element)),
                    )
                };
                let set_params = if element.is_array() {
                    "(index, value)"
                } else {
                    "(value)"
                };
                h.push(format!(
                    "#define {}_GET_SCALED{} (((float64){} * {}) + {})",
                    base, params, cell, factor, offset
                ));
                h.push(format!(
                    "#define {}_SET_SCALED{} ({} = ({})(((value) - {}) / {}))",
                    base,
                    set_params,
                    cell,
                    c_type(element.value_type),
                    offset,
                    factor
                ));
            }
        }
        Ok(())
    }

    // --- Implementation ---

    fn source(&self) -> Result<SourceFile, ExportError> {
        let stem = file_stem(self.dp);
        let mut c = open_source(
            &stem,
            &format!("Definition of Datapool {}", self.name),
            &[],
            self.input.project_id,
        );

        if self.is_local() {
            c.section("Global Variables");
            let mut lines = vec![format!("{} {} =", self.values_type(), self.values_var())];
            let mut rows = Vec::new();
            for list in self.non_empty_lists() {
                let cells = self.content_rows(list, |e| &e.default)?;
                rows.push(Row::nested(braced(&cells)).comment(list.name.clone()));
            }
            let mut body = braced(&rows);
            if let Some(last) = body.last_mut() {
                last.push(';');
            }
            lines.extend(body);
            self.placement.place(&mut c, self.wrapper_macros(), lines);
        }

        c.section("Module Global Constants");
        for list in &self.dp.lists {
            self.list_tables(&mut c, list)?;
        }
        self.list_definitions(&mut c);

        if self.has_remote_info() {
            c.blank();
            c.initializer(
                &format!("static const T_osy_dpa_remote_info mt_{}_RemoteInfo", self.name),
                &[
                    Row::new(format!("{}U", self.input.owner_process_id))
                        .comment("process ID of owning application"),
                    Row::new(format!("{}U", self.input.index_in_owner))
                        .comment("index of Datapool in owning application"),
                ],
            );
        }

        if self.has_scratch_buffer() {
            c.blank();
            self.placement.place(
                &mut c,
                self.wrapper_macros(),
                vec![format!(
                    "static uint8 mau8_{}_NvmScratchBuffer[{}];",
                    self.name,
                    self.scratch_buffer_size()
                )],
            );
        }

        c.section("Global Constants");
        c.initializer(
            &format!("const T_osy_dpa_data_pool {}", self.definition_var()),
            &self.definition_rows(),
        );
        Ok(c)
    }

    /// One row per element holding the selected content.
    fn content_rows<F>(&self, list: &List, select: F) -> Result<Vec<Row>, ExportError>
    where
        F: Fn(&Element) -> &Content,
    {
        list.elements
            .iter()
            .map(|e| Ok(Row::new(content_literal(e, select(e))?).comment(e.name.clone())))
            .collect()
    }

    fn list_tables(&self, c: &mut SourceFile, list: &List) -> Result<(), ExportError> {
        if list.elements.is_empty() {
            return Ok(());
        }
        let list_type = self.list_type(list);
        let prefix = format!("{}_{}", self.name, list.name);

        if self.is_local() {
            c.blank();
            c.initializer(
                &format!("static const {} mt_{}_MinValues", list_type, prefix),
                &self.content_rows(list, |e| &e.min)?,
            );
            c.blank();
            c.initializer(
                &format!("static const {} mt_{}_MaxValues", list_type, prefix),
                &self.content_rows(list, |e| &e.max)?,
            );
            if !list.datasets.is_empty() {
                let mut rows = Vec::with_capacity(list.datasets.len());
                for (i, dataset) in list.datasets.iter().enumerate() {
                    let cells = self.content_rows(list, |e| &e.dataset_values[i])?;
                    rows.push(Row::nested(braced(&cells)).comment(dataset.name.clone()));
                }
                c.blank();
                c.initializer(
                    &format!(
                        "static const {} mat_{}_DataSetValues[{}]",
                        list_type,
                        prefix,
                        list.datasets.len()
                    ),
                    &rows,
                );
            }
        }

        let rows: Vec<Row> = list
            .elements
            .iter()
            .map(|e| Row::new(self.element_definition(list, e)).comment(e.name.clone()))
            .collect();
        c.blank();
        c.initializer(
            &format!(
                "static const T_osy_dpa_element_definition mat_{}_ElementDefinitions[{}]",
                prefix,
                list.elements.len()
            ),
            &rows,
        );
        Ok(())
    }

    fn element_definition(&self, list: &List, element: &Element) -> String {
        let member = if element.is_array() {
            format!("{}[0]", member_name(element))
        } else {
            member_name(element)
        };
        let cell = |var: String| {
            if self.is_local() {
                format!("&{}.{}", var, member)
            } else {
                "NULL".to_string()
            }
        };
        let prefix = format!("{}_{}", self.name, list.name);
        inline_braced(&[
            element_type_tag(element.value_type, element.is_array()),
            flag(element.diag_event_call).to_string(),
            format!("{}U", element.size()),
            cell(format!("{}.t_{}", self.values_var(), list.name)),
            cell(format!("mt_{}_MinValues", prefix)),
            cell(format!("mt_{}_MaxValues", prefix)),
        ])
    }

    fn list_definitions(&self, c: &mut SourceFile) {
        let rows: Vec<Row> = self
            .dp
            .lists
            .iter()
            .map(|list| {
                let prefix = format!("{}_{}", self.name, list.name);
                let has_elements = !list.elements.is_empty();
                let elements = if has_elements {
                    Reference::slice(&format!("mat_{}_ElementDefinitions", prefix), 0, 1)
                } else {
                    Reference::Absent
                };
                let datasets = if has_elements && self.is_local() {
                    Reference::slice(
                        &format!("mat_{}_DataSetValues", prefix),
                        0,
                        list.datasets.len(),
                    )
                } else {
                    Reference::Absent
                };
                let values = if has_elements && self.is_local() {
                    Reference::Single(format!("{}.t_{}", self.values_var(), list.name))
                } else {
                    Reference::Absent
                };
                let fields = vec![
                    Row::new(format!("{}U", list.elements.len())).comment("number of elements"),
                    Row::new(format!("{}U", list.datasets.len())).comment("number of datasets"),
                    Row::new(format!("0x{:08X}UL", list.nvm_start_address))
                        .comment("NVM start address"),
                    Row::new(format!("{}UL", list.nvm_size)).comment("NVM size"),
                    Row::new(flag(list.nvm_crc_active)).comment("CRC active"),
                    Row::new(elements.render()),
                    Row::new(datasets.render()),
                    Row::new(values.render()),
                ];
                Row::nested(braced(&fields)).comment(list.name.clone())
            })
            .collect();
        c.blank();
        c.initializer(
            &format!(
                "static const T_osy_dpa_list_definition mat_{}_ListDefinitions[{}]",
                self.name,
                self.dp.lists.len()
            ),
            &rows,
        );
    }

    fn definition_rows(&self) -> Vec<Row> {
        let [major, minor, release] = self.dp.version;
        let mut rows = vec![
            Row::new(format!(
                "{{ 0x{:02X}U, 0x{:02X}U, 0x{:02X}U }}",
                major, minor, release
            ))
            .comment("Datapool version"),
            Row::new(self.input.linkage.render(self.input.version)).comment("linkage"),
            Row::new(flag(self.dp.is_safety)).comment("safety relevant"),
            Row::new(format!("{}U", self.dp.lists.len())).comment("number of lists"),
            Row::new(format!("&mat_{}_ListDefinitions[0]", self.name)),
        ];
        if self.has_remote_info() {
            rows.push(Row::new(format!("&mt_{}_RemoteInfo", self.name)));
        }
        if self.input.version >= 5 {
            if self.has_scratch_buffer() {
                rows.push(Row::new(format!("&mau8_{}_NvmScratchBuffer[0]", self.name)));
                rows.push(
                    Row::new(format!("{}U", self.scratch_buffer_size()))
                        .comment("NVM scratch buffer size"),
                );
            } else {
                rows.push(Row::new("NULL"));
                rows.push(Row::new("0U").comment("NVM scratch buffer size"));
            }
        }
        rows.push(Row::new(format!("0x{:08X}UL", self.dp.nvm_start_address)).comment("NVM start address"));
        rows.push(Row::new(format!("{}UL", self.dp.nvm_size)).comment("NVM size"));
        rows
    }
}

/// One literal for scalars, a braced list for arrays.
fn content_literal(element: &Element, content: &Content) -> Result<String, ExportError> {
    let literals = content
        .iter()
        .map(format_value)
        .collect::<Result<Vec<_>, _>>()?;
    if element.is_array() {
        Ok(inline_braced(&literals))
    } else {
        Ok(literals.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use nodegen_model::{DataSet, DatapoolKind, Value};

    fn measurements() -> Datapool {
        let mut dp = Datapool::new("Sensors", DatapoolKind::Generic, Some(0));
        let mut list = List::new("Measurements");
        list.elements.push(Element::scalar(
            "Speed",
            Value::U8(10),
            Value::U8(0),
            Value::U8(255),
        ));
        dp.lists.push(list);
        dp
    }

    fn export<'a>(dp: &'a Datapool, id: &'a ProjectId, version: u16, linkage: Linkage) -> DatapoolExport<'a> {
        DatapoolExport {
            data_block: "App",
            datapool: dp,
            index_in_application: 0,
            version,
            scaling_support: true,
            linkage,
            owner_process_id: 1,
            index_in_owner: 0,
            project_id: id,
        }
    }

    #[test]
    fn test_single_element_local_datapool() {
        let dp = measurements();
        let id = ProjectId::compute("sensors").unwrap();
        let pair = create_source_code(&export(&dp, &id, 5, Linkage::Local)).unwrap();

        assert_eq!(pair.stem, "sensors_data_pool");
        assert!(pair.header.contains("#define SENSORS_NUMBER_OF_LISTS (1U)"));
        assert!(pair.header.contains("#define SENSORS_MEASUREMENTS_NUMBER_OF_ELEMENTS (1U)"));
        assert!(pair.header.contains("#define SENSORS_MEASUREMENTS_INDEX_SPEED (0U)"));
        assert!(pair.header.contains("   uint8 u8_Speed;"));

        let c = pair.source.render();
        assert!(c.contains("static const T_Sensors_Measurements_Values mt_Sensors_Measurements_MinValues =\n{\n   0U /* Speed */\n};"));
        assert!(c.contains("static const T_Sensors_Measurements_Values mt_Sensors_Measurements_MaxValues =\n{\n   255U /* Speed */\n};"));
        assert!(c.contains(
            "static const T_osy_dpa_element_definition mat_Sensors_Measurements_ElementDefinitions[1] =\n{\n   { OSY_DPA_ELEMENT_TYPE_UINT8, 0U, 1U, &gt_Sensors_DataPoolValues.t_Measurements.u8_Speed, &mt_Sensors_Measurements_MinValues.u8_Speed, &mt_Sensors_Measurements_MaxValues.u8_Speed } /* Speed */\n};"
        ));
        assert!(c.contains("OSY_DPA_DATA_POOL_LOCAL"));
        assert!(c.contains("      10U /* Speed */"));
    }

    #[test]
    fn test_placement_by_subversion() {
        let dp = measurements();
        let id = ProjectId::compute("sensors").unwrap();
        let old = create_source_code(&export(&dp, &id, 2, Linkage::Local)).unwrap();
        assert!(old.source.contains(
            "OSY_DPA_NON_SAFE_RAM_DATA T_Sensors_DataPool_Values gt_Sensors_DataPoolValues ="
        ));
        assert!(!old.source.contains("OSY_DPA_DATA_POOL_LOCAL"));
        assert!(!old.source.contains("RemoteInfo"));

        let new = create_source_code(&export(&dp, &id, 3, Linkage::Local)).unwrap();
        assert!(new.source.contains("OSY_NON_SAFE_RAM_DATA_START"));
        assert!(new.header.contains("OSY_NON_SAFE_RAM_DATA_STOP"));
    }

    #[test]
    fn test_remote_info_presence() {
        let dp = measurements();
        let id = ProjectId::compute("sensors").unwrap();
        let remote_v3 = create_source_code(&export(&dp, &id, 3, Linkage::Remote)).unwrap();
        assert!(remote_v3.source.contains("mt_Sensors_RemoteInfo"));
        assert!(remote_v3.source.contains("   1U, /* linkage */"));
        // remote Datapools have no value storage
        assert!(!remote_v3.header.contains("gt_Sensors_DataPoolValues"));
        assert!(remote_v3.source.contains("{ OSY_DPA_ELEMENT_TYPE_UINT8, 0U, 1U, NULL, NULL, NULL }"));

        let local_v4 = create_source_code(&export(&dp, &id, 4, Linkage::Local)).unwrap();
        assert!(local_v4.source.contains("&mt_Sensors_RemoteInfo"));
    }

    #[test]
    fn test_public_scope_needs_subversion_4() {
        let dp = measurements();
        let id = ProjectId::compute("sensors").unwrap();
        let err = create_source_code(&export(&dp, &id, 3, Linkage::RemotePublic)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        assert!(create_source_code(&export(&dp, &id, 4, Linkage::RemotePublic)).is_ok());
    }

    #[test]
    fn test_nvm_scratch_buffer() {
        let mut dp = measurements();
        dp.kind = DatapoolKind::Nvm;
        dp.lists[0].nvm_crc_active = true;
        dp.lists[0].elements.push(Element::scalar(
            "Odometer",
            Value::U32(0),
            Value::U32(0),
            Value::U32(u32::MAX),
        ));
        let id = ProjectId::compute("sensors").unwrap();
        let v5 = create_source_code(&export(&dp, &id, 5, Linkage::Local)).unwrap();
        // 1 + 4 data bytes plus 2 CRC bytes
        assert!(v5.source.contains("static uint8 mau8_Sensors_NvmScratchBuffer[7];"));
        let v4 = create_source_code(&export(&dp, &id, 4, Linkage::Local)).unwrap();
        assert!(!v4.source.contains("NvmScratchBuffer"));
    }

    #[test]
    fn test_scaling_macros() {
        let mut dp = measurements();
        dp.lists[0].elements[0].factor = 0.5;
        dp.lists[0].elements[0].offset = -40.0;
        let id = ProjectId::compute("sensors").unwrap();

        let pair = create_source_code(&export(&dp, &id, 5, Linkage::Local)).unwrap();
        assert!(pair.header.contains(
            "#define SENSORS_MEASUREMENTS_SPEED_GET_SCALED() (((float64)gt_Sensors_DataPoolValues.t_Measurements.u8_Speed * 0.5) + -40.0)"
        ));
        assert!(pair.header.contains("SENSORS_MEASUREMENTS_SPEED_SET_SCALED(value)"));

        let mut disabled = export(&dp, &id, 5, Linkage::Local);
        disabled.scaling_support = false;
        assert!(!create_source_code(&disabled).unwrap().header.contains("_GET_SCALED"));
        assert!(!create_source_code(&export(&dp, &id, 4, Linkage::Local))
            .unwrap()
            .header
            .contains("_GET_SCALED"));
    }

    #[test]
    fn test_invalid_factor_names_element() {
        let id = ProjectId::compute("sensors").unwrap();
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut dp = measurements();
            dp.lists[0].elements[0].factor = factor;
            let err = create_source_code(&export(&dp, &id, 5, Linkage::Local)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Structural);
            assert!(err.to_string().contains("Sensors::Measurements::Speed"));
        }
    }

    #[test]
    fn test_too_many_datasets() {
        let mut dp = measurements();
        let list = &mut dp.lists[0];
        for i in 0..256 {
            list.datasets.push(DataSet {
                name: format!("Set{}", i),
                comment: String::new(),
            });
            list.elements[0].dataset_values.push(vec![Value::U8(0)]);
        }
        let id = ProjectId::compute("sensors").unwrap();
        let err = create_source_code(&export(&dp, &id, 5, Linkage::Local)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_datasets_and_arrays() {
        let mut dp = measurements();
        let list = &mut dp.lists[0];
        let mut data = Element::scalar("Data", Value::S32(i32::MIN), Value::S32(i32::MIN), Value::S32(5));
        data.array_size = Some(2);
        data.default = vec![Value::S32(1), Value::S32(2)];
        data.min = vec![Value::S32(i32::MIN); 2];
        data.max = vec![Value::S32(5); 2];
        data.dataset_values = vec![vec![Value::S32(3), Value::S32(4)]];
        list.elements[0].dataset_values = vec![vec![Value::U8(7)]];
        list.elements.push(data);
        list.datasets.push(DataSet {
            name: "Factory".into(),
            comment: String::new(),
        });

        let id = ProjectId::compute("sensors").unwrap();
        let pair = create_source_code(&export(&dp, &id, 5, Linkage::Local)).unwrap();
        let c = pair.source.render();
        assert!(c.contains("mat_Sensors_Measurements_DataSetValues[1]"));
        assert!(c.contains("      { 3L, 4L } /* Data */"));
        assert!(c.contains("   { (-2147483647L-1L), (-2147483647L-1L) } /* Data */"));
        assert!(c.contains("&gt_Sensors_DataPoolValues.t_Measurements.as32_Data[0]"));
        assert!(pair.header.contains("   sint32 as32_Data[2];"));
    }

    #[test]
    fn test_content_type_mismatch() {
        let mut dp = measurements();
        dp.lists[0].elements[0].max = vec![Value::U16(255)];
        let id = ProjectId::compute("sensors").unwrap();
        let err = create_source_code(&export(&dp, &id, 5, Linkage::Local)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }
}
