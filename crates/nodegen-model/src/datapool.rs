// crates/nodegen-model/src/datapool.rs

//! Datapools: typed, named collections of variable lists.

use serde::{Deserialize, Serialize};

/// Numeric type of a Datapool element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValueType {
    U8,
    S8,
    U16,
    S16,
    U32,
    S32,
    U64,
    S64,
    F32,
    F64,
}

impl ValueType {
    /// Size of one value of this type in bytes.
    pub fn size(self) -> u32 {
        match self {
            ValueType::U8 | ValueType::S8 => 1,
            ValueType::U16 | ValueType::S16 => 2,
            ValueType::U32 | ValueType::S32 | ValueType::F32 => 4,
            ValueType::U64 | ValueType::S64 | ValueType::F64 => 8,
        }
    }
}

/// A single typed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    U8(u8),
    S8(i8),
    U16(u16),
    S16(i16),
    U32(u32),
    S32(i32),
    U64(u64),
    S64(i64),
    F32(f32),
    F64(f64),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::U8(_) => ValueType::U8,
            Value::S8(_) => ValueType::S8,
            Value::U16(_) => ValueType::U16,
            Value::S16(_) => ValueType::S16,
            Value::U32(_) => ValueType::U32,
            Value::S32(_) => ValueType::S32,
            Value::U64(_) => ValueType::U64,
            Value::S64(_) => ValueType::S64,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
        }
    }
}

/// Value content of an element: one entry for scalars, `array_size` entries for arrays.
pub type Content = Vec<Value>;

/// Access rights of an element from the diagnostic side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Access {
    ReadOnly,
    #[default]
    ReadWrite,
}

/// One variable of a Datapool list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    pub value_type: ValueType,
    /// `Some(n)` for arrays of `n` values.
    #[serde(default)]
    pub array_size: Option<u32>,
    pub default: Content,
    pub min: Content,
    pub max: Content,
    /// One content per dataset of the owning list.
    #[serde(default)]
    pub dataset_values: Vec<Content>,
    #[serde(default = "default_factor")]
    pub factor: f64,
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub access: Access,
    /// Whether the runtime notifies the diagnostic side on changes.
    #[serde(default)]
    pub diag_event_call: bool,
    #[serde(default)]
    pub nvm_start_address: u32,
}

fn default_factor() -> f64 {
    1.0
}

impl Element {
    /// Creates a scalar element with default, min and max set.
    pub fn scalar(name: &str, default: Value, min: Value, max: Value) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            value_type: default.value_type(),
            array_size: None,
            default: vec![default],
            min: vec![min],
            max: vec![max],
            dataset_values: Vec::new(),
            factor: 1.0,
            offset: 0.0,
            unit: String::new(),
            access: Access::ReadWrite,
            diag_event_call: false,
            nvm_start_address: 0,
        }
    }

    pub fn is_array(&self) -> bool {
        self.array_size.is_some()
    }

    /// Number of values held by this element.
    pub fn value_count(&self) -> u32 {
        self.array_size.unwrap_or(1)
    }

    /// Size of the element in bytes.
    pub fn size(&self) -> u32 {
        self.value_type.size() * self.value_count()
    }

    /// True if reading the raw value needs a factor/offset conversion.
    pub fn is_scaled(&self) -> bool {
        self.factor != 1.0 || self.offset != 0.0
    }
}

/// Name and comment of a dataset (an alternative value set of a list).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataSet {
    pub name: String,
    #[serde(default)]
    pub comment: String,
}

/// An ordered group of elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct List {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub nvm_start_address: u32,
    #[serde(default)]
    pub nvm_size: u32,
    #[serde(default)]
    pub nvm_crc_active: bool,
    pub elements: Vec<Element>,
    #[serde(default)]
    pub datasets: Vec<DataSet>,
}

impl List {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sum of the element sizes in bytes.
    pub fn data_size(&self) -> u32 {
        self.elements.iter().map(Element::size).sum()
    }
}

/// Role of a Datapool within the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatapoolKind {
    Generic,
    Nvm,
    Com,
    Halc,
    HalcNvm,
}

impl DatapoolKind {
    /// True for the kinds stored in non-volatile memory.
    pub fn is_nvm(self) -> bool {
        matches!(self, DatapoolKind::Nvm | DatapoolKind::HalcNvm)
    }

    pub fn is_halc(self) -> bool {
        matches!(self, DatapoolKind::Halc | DatapoolKind::HalcNvm)
    }
}

/// A Datapool as configured in the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapool {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    pub kind: DatapoolKind,
    #[serde(default)]
    pub is_safety: bool,
    #[serde(default)]
    pub version: [u8; 3],
    /// Index of the owning Data Block.
    pub owner: Option<usize>,
    #[serde(default = "default_private")]
    pub scope_is_private: bool,
    #[serde(default)]
    pub nvm_start_address: u32,
    #[serde(default)]
    pub nvm_size: u32,
    pub lists: Vec<List>,
}

fn default_private() -> bool {
    true
}

impl Datapool {
    /// Creates an empty, private Datapool.
    pub fn new(name: &str, kind: DatapoolKind, owner: Option<usize>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            kind,
            is_safety: false,
            version: [1, 0, 0],
            owner,
            scope_is_private: true,
            nvm_start_address: 0,
            nvm_size: 0,
            lists: Vec::new(),
        }
    }

    /// Total number of elements over all lists.
    pub fn element_count(&self) -> usize {
        self.lists.iter().map(|l| l.elements.len()).sum()
    }

    /// A Datapool without any element generates no code.
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }
}
