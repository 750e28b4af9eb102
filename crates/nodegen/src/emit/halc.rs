// crates/nodegen/src/emit/halc.rs

//! Hardware channel configuration of one safety variant
//! (`halc_config_safe.h/.c` or `halc_config_nonsafe.h/.c`).

use crate::emit::datapool;
use crate::emit::{close_header, open_header, open_source};
use crate::error::ExportError;
use crate::log::{ArtifactContext, gen_debug, gen_error};
use crate::util::naming::{c_type, type_prefix, upper};
use crate::util::writer::inline_braced;
use crate::util::{FilePair, ProjectId, Reference, Row, SourceFile, format_value};
use nodegen_model::{
    Datapool, HalcChannel, HalcConfig, HalcDomain, HalcParameter, HalcVariant, SafetyMode, Value,
};

/// Runtime header declaring the hardware configuration types.
pub const RUNTIME_HEADER: &str = "osy_hal_configuration.h";

/// Everything the HALC emitter needs for one variant.
#[derive(Debug, Clone)]
pub struct HalcExport<'a> {
    pub data_block: &'a str,
    pub config: &'a HalcConfig,
    pub variant: HalcVariant,
    /// The HALC Datapool holding the runtime values of this variant.
    pub datapool: &'a Datapool,
    /// HALC subversion (see [`crate::version::halc`]).
    pub version: u16,
    pub project_id: &'a ProjectId,
}

pub fn file_stem(variant: HalcVariant) -> &'static str {
    match variant {
        HalcVariant::Safe => "halc_config_safe",
        HalcVariant::NonSafe => "halc_config_nonsafe",
    }
}

pub fn config_symbol(variant: HalcVariant) -> String {
    format!("gt_{}_Configuration", file_stem(variant))
}

fn variant_tag(variant: HalcVariant) -> &'static str {
    match variant {
        HalcVariant::Safe => "OSY_HAL_VARIANT_SAFE",
        HalcVariant::NonSafe => "OSY_HAL_VARIANT_NON_SAFE",
    }
}

fn safety_mode_tag(mode: SafetyMode) -> &'static str {
    match mode {
        SafetyMode::TwoLevelsWithDropping => "OSY_HAL_SAFETY_MODE_TWO_LEVELS_WITH_DROPPING",
        SafetyMode::TwoLevelsWithoutDropping => "OSY_HAL_SAFETY_MODE_TWO_LEVELS_WITHOUT_DROPPING",
        SafetyMode::OneLevelAllSafe => "OSY_HAL_SAFETY_MODE_ONE_LEVEL_ALL_SAFE",
        SafetyMode::OneLevelAllNonSafe => "OSY_HAL_SAFETY_MODE_ONE_LEVEL_ALL_NON_SAFE",
    }
}

/// True if the domain gets its own sub-structure in the configuration.
pub fn domain_emitted(domain: &HalcDomain, mode: SafetyMode) -> bool {
    !domain.channels.is_empty()
        || !domain.parameters.is_empty()
        || mode == SafetyMode::TwoLevelsWithoutDropping
}

/// The channels of `domain` that appear in the configuration of `variant`.
pub fn visible_channels(
    domain: &HalcDomain,
    mode: SafetyMode,
    variant: HalcVariant,
) -> Vec<&HalcChannel> {
    domain
        .channels
        .iter()
        .filter(|c| mode.channel_visible(c.safety_relevant, variant))
        .collect()
}

pub fn create_source_code(input: &HalcExport<'_>) -> Result<FilePair, ExportError> {
    let stem = file_stem(input.variant);
    let ctx = ArtifactContext {
        data_block: input.data_block,
        artifact: stem,
    };
    let emitter = HalcEmitter {
        input,
        prefix: stem,
        upper: upper(stem),
    };
    let header = emitter.header();
    let source = emitter.source().inspect_err(|e| gen_error!(ctx, "{}", e))?;
    gen_debug!(
        ctx,
        "Generated {} domains, subversion {}",
        emitter.domains().count(),
        input.version
    );
    Ok(FilePair {
        stem: stem.to_string(),
        header,
        source,
    })
}

struct HalcEmitter<'a> {
    input: &'a HalcExport<'a>,
    prefix: &'static str,
    upper: String,
}

impl<'a> HalcEmitter<'a> {
    fn mode(&self) -> SafetyMode {
        self.input.config.safety_mode
    }

    fn domains(&self) -> impl Iterator<Item = &'a HalcDomain> + use<'a> {
        let mode = self.input.config.safety_mode;
        self.input
            .config
            .domains
            .iter()
            .filter(move |d| domain_emitted(d, mode))
    }

    fn channel_type(&self, domain: &HalcDomain) -> String {
        format!("T_{}_{}_Channel", self.prefix, domain.name)
    }

    fn header(&self) -> SourceFile {
        let datapool_header = format!("{}.h", datapool::file_stem(self.input.datapool));
        let brief = match self.input.variant {
            HalcVariant::Safe => "Safe hardware channel configuration",
            HalcVariant::NonSafe => "Non-safe hardware channel configuration",
        };
        let mut h = open_header(
            self.prefix,
            brief,
            &[RUNTIME_HEADER, &datapool_header],
            self.input.project_id,
        );
        h.blank();
        h.push(format!(
            "#define {}_NUMBER_OF_DOMAINS ({}U)",
            self.upper,
            self.domains().count()
        ));
        for domain in self.domains() {
            h.push(format!(
                "#define {}_{}_NUMBER_OF_CHANNELS ({}U)",
                self.upper,
                upper(&domain.name),
                visible_channels(domain, self.mode(), self.input.variant).len()
            ));
        }

        h.section("Types");
        for domain in self.domains() {
            h.blank();
            h.push("typedef struct");
            h.push("{");
            h.push("   uint32 u32_UseCase;");
            for parameter in &domain.parameters {
                h.push(format!("   {}", parameter_declaration(parameter)));
            }
            h.push(format!("}} {};", self.channel_type(domain)));
        }

        h.section("Global Constants");
        h.push(format!(
            "extern const T_osy_hal_configuration {};",
            config_symbol(self.input.variant)
        ));
        close_header(&mut h);
        h
    }

    fn source(&self) -> Result<SourceFile, ExportError> {
        let mut c = open_source(self.prefix, "Hardware channel configuration", &[], self.input.project_id);

        c.section("Module Global Constants");
        let mut domain_rows = Vec::new();
        for domain in self.domains() {
            let channels = visible_channels(domain, self.mode(), self.input.variant);
            let single = format!("mt_{}_{}_Channel", self.prefix, domain.name);
            let array = format!("mat_{}_{}_Channels", self.prefix, domain.name);
            let reference = match channels.as_slice() {
                [] if domain.channels.is_empty() && !domain.parameters.is_empty() => {
                    let name = format!("mt_{}_{}_DomainValues", self.prefix, domain.name);
                    let values = self.record(domain, 0, &domain.domain_values, "domain values")?;
                    c.blank();
                    c.push(format!("static const {} {} = {};", self.channel_type(domain), name, values));
                    Reference::Single(name)
                }
                [channel] => {
                    let values = self.record(domain, channel.use_case, &channel.values, &channel.name)?;
                    c.blank();
                    c.push(format!(
                        "static const {} {} = {}; /* {} */",
                        self.channel_type(domain),
                        single,
                        values,
                        channel.name
                    ));
                    Reference::select(1, &single, &array)
                }
                _ => {
                    let rows = channels
                        .iter()
                        .map(|ch| -> Result<Row, ExportError> {
                            Ok(Row::new(self.record(domain, ch.use_case, &ch.values, &ch.name)?)
                                .comment(ch.name.clone()))
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    if !rows.is_empty() {
                        c.blank();
                        c.initializer(
                            &format!(
                                "static const {} {}[{}]",
                                self.channel_type(domain),
                                array,
                                rows.len()
                            ),
                            &rows,
                        );
                    }
                    Reference::select(rows.len(), &single, &array)
                }
            };
            domain_rows.push(
                Row::new(inline_braced(&[format!("{}U", channels.len()), reference.render()]))
                    .comment(domain.name.clone()),
            );
        }

        let domains_array = format!("mat_{}_Domains", self.prefix);
        if !domain_rows.is_empty() {
            c.blank();
            c.initializer(
                &format!(
                    "static const T_osy_hal_domain_configuration {}[{}]",
                    domains_array,
                    domain_rows.len()
                ),
                &domain_rows,
            );
        }

        c.section("Global Constants");
        c.initializer(
            &format!(
                "const T_osy_hal_configuration {}",
                config_symbol(self.input.variant)
            ),
            &[
                Row::new(variant_tag(self.input.variant)),
                Row::new(safety_mode_tag(self.mode())),
                Row::new(format!("&gt_{}_DataPool", self.input.datapool.name)),
                Row::new(format!("{}U", domain_rows.len())).comment("number of domains"),
                Row::new(Reference::slice(&domains_array, 0, domain_rows.len()).render()),
            ],
        );
        Ok(c)
    }

    /// `{ useCaseUL, param values... }` of one channel.
    fn record(
        &self,
        domain: &HalcDomain,
        use_case: u32,
        values: &[Value],
        owner: &str,
    ) -> Result<String, ExportError> {
        if values.len() != domain.parameters.len() {
            return Err(ExportError::structural(format!(
                "{} of domain '{}' has {} values for {} parameters",
                owner,
                domain.name,
                values.len(),
                domain.parameters.len()
            )));
        }
        let mut fields = vec![format!("{}UL", use_case)];
        for (parameter, value) in domain.parameters.iter().zip(values) {
            if value.value_type() != parameter.value_type {
                return Err(ExportError::structural(format!(
                    "{} of domain '{}': parameter '{}' expects {:?}, found {:?}",
                    owner,
                    domain.name,
                    parameter.name,
                    parameter.value_type,
                    value.value_type()
                )));
            }
            fields.push(format_value(value)?);
        }
        Ok(inline_braced(&fields))
    }
}

fn parameter_declaration(parameter: &HalcParameter) -> String {
    format!(
        "{} {}_{};",
        c_type(parameter.value_type),
        type_prefix(parameter.value_type, false),
        parameter.name
    )
}
