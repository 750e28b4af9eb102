// crates/nodegen/src/emit/mod.rs

//! Per-domain emitters. Each turns a read-only part of the snapshot into a
//! [`FilePair`](crate::util::FilePair) held in memory; writing is left to the
//! caller.

pub mod canopen;
pub mod canopen_init;
pub mod comm;
pub mod datapool;
pub mod halc;
pub mod init;

use crate::util::naming::upper;
use crate::util::{ProjectId, SourceFile};
use nodegen_model::Datapool;

/// Runtime header every generated file includes first.
pub const BASE_TYPES_HEADER: &str = "stwtypes.h";

/// Memory region for mutable data of a safe or non-safe Datapool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RamPlacement {
    Safe,
    NonSafe,
}

impl RamPlacement {
    pub fn for_datapool(datapool: &Datapool) -> Self {
        if datapool.is_safety {
            RamPlacement::Safe
        } else {
            RamPlacement::NonSafe
        }
    }

    /// Prefix qualifier used by older runtimes.
    pub fn qualifier(self) -> &'static str {
        match self {
            RamPlacement::Safe => "OSY_DPA_SAFE_RAM_DATA",
            RamPlacement::NonSafe => "OSY_DPA_NON_SAFE_RAM_DATA",
        }
    }

    pub fn start_macro(self) -> &'static str {
        match self {
            RamPlacement::Safe => "OSY_SAFE_RAM_DATA_START",
            RamPlacement::NonSafe => "OSY_NON_SAFE_RAM_DATA_START",
        }
    }

    pub fn stop_macro(self) -> &'static str {
        match self {
            RamPlacement::Safe => "OSY_SAFE_RAM_DATA_STOP",
            RamPlacement::NonSafe => "OSY_NON_SAFE_RAM_DATA_STOP",
        }
    }

    /// Appends `declaration` placed in this region, either between the
    /// START/STOP wrapper macros or with the prefix qualifier.
    pub(crate) fn place(self, file: &mut SourceFile, wrapper_macros: bool, declaration: Vec<String>) {
        if wrapper_macros {
            file.push(self.start_macro());
            file.extend(declaration);
            file.push(self.stop_macro());
        } else {
            let mut lines = declaration.into_iter();
            if let Some(first) = lines.next() {
                // the storage class stays in front of the qualifier
                let storage = ["extern ", "static "]
                    .into_iter()
                    .find(|s| first.starts_with(s));
                let placed = match storage {
                    Some(s) => format!("{}{} {}", s, self.qualifier(), &first[s.len()..]),
                    None => format!("{} {}", self.qualifier(), first),
                };
                file.push(placed);
            }
            file.extend(lines);
        }
    }
}

/// Opening part of a header: file comment, include guard, includes and the
/// ProjectId define. The caller continues with its own sections and ends
/// with [`close_header`].
pub(crate) fn open_header(stem: &str, brief: &str, includes: &[&str], id: &ProjectId) -> SourceFile {
    let mut file = SourceFile::new();
    file.file_comment(brief, &[]);
    file.open_guard(&format!("{}_H", upper(stem)));

    file.section("Includes");
    file.push(format!("#include \"{}\"", BASE_TYPES_HEADER));
    for include in includes {
        file.push(format!("#include \"{}\"", include));
    }

    file.open_extern_c();
    file.section("Defines");
    file.extend(id.define_lines(stem));
    file
}

pub(crate) fn close_header(file: &mut SourceFile) {
    file.close_extern_c();
    file.close_guard();
}

/// Opening part of an implementation file, ending with the ProjectId check.
pub(crate) fn open_source(stem: &str, brief: &str, includes: &[&str], id: &ProjectId) -> SourceFile {
    let mut file = SourceFile::new();
    file.file_comment(brief, &[]);

    file.section("Includes");
    file.push(format!("#include \"{}\"", BASE_TYPES_HEADER));
    file.push(format!("#include \"{}.h\"", stem));
    for include in includes {
        file.push(format!("#include \"{}\"", include));
    }

    file.section("Defines");
    file.push("///check for correct version of the generated header");
    file.push(id.check_line(stem));
    file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_placement() {
        let mut file = SourceFile::new();
        RamPlacement::Safe.place(&mut file, false, vec!["uint8 au8_X[2];".into()]);
        assert_eq!(file.lines(), ["OSY_DPA_SAFE_RAM_DATA uint8 au8_X[2];"]);
    }

    #[test]
    fn test_prefix_placement_keeps_storage_class_first() {
        let mut file = SourceFile::new();
        RamPlacement::NonSafe.place(&mut file, false, vec!["extern uint8 au8_X[2];".into()]);
        assert_eq!(file.lines(), ["extern OSY_DPA_NON_SAFE_RAM_DATA uint8 au8_X[2];"]);

        let mut file = SourceFile::new();
        RamPlacement::Safe.place(&mut file, false, vec!["static uint8 mau8_X[2];".into()]);
        assert_eq!(file.lines(), ["static OSY_DPA_SAFE_RAM_DATA uint8 mau8_X[2];"]);
    }

    #[test]
    fn test_wrapper_placement() {
        let mut file = SourceFile::new();
        RamPlacement::NonSafe.place(&mut file, true, vec!["uint8 au8_X[2];".into()]);
        assert_eq!(
            file.lines(),
            [
                "OSY_NON_SAFE_RAM_DATA_START",
                "uint8 au8_X[2];",
                "OSY_NON_SAFE_RAM_DATA_STOP"
            ]
        );
    }

    #[test]
    fn test_pair_skeleton_shares_project_id() {
        let id = ProjectId::compute("demo").unwrap();
        let mut header = open_header("demo_data_pool", "Demo", &["osy_dpa_data_pool.h"], &id);
        close_header(&mut header);
        let source = open_source("demo_data_pool", "Demo", &[], &id);
        let check = id.check_line("demo_data_pool");
        assert!(header.contains(&format!("#define {} ", check)));
        assert!(source.lines().iter().any(|l| *l == check));
        assert!(header.contains("#ifndef DEMO_DATA_POOL_H"));
        assert_eq!(header.lines().last().map(String::as_str), Some("#endif"));
    }
}
