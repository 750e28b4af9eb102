// crates/nodegen/src/util/naming.rs

//! Identifier conventions of the generated C code.

use nodegen_model::{Element, ValueType};

pub fn upper(name: &str) -> String {
    name.to_ascii_uppercase()
}

pub fn lower(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Runtime library type name.
pub fn c_type(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::U8 => "uint8",
        ValueType::S8 => "sint8",
        ValueType::U16 => "uint16",
        ValueType::S16 => "sint16",
        ValueType::U32 => "uint32",
        ValueType::S32 => "sint32",
        ValueType::U64 => "uint64",
        ValueType::S64 => "sint64",
        ValueType::F32 => "float32",
        ValueType::F64 => "float64",
    }
}

/// Type prefix of a variable name, `a` marks arrays.
pub fn type_prefix(value_type: ValueType, is_array: bool) -> String {
    let base = match value_type {
        ValueType::U8 => "u8",
        ValueType::S8 => "s8",
        ValueType::U16 => "u16",
        ValueType::S16 => "s16",
        ValueType::U32 => "u32",
        ValueType::S32 => "s32",
        ValueType::U64 => "u64",
        ValueType::S64 => "s64",
        ValueType::F32 => "f32",
        ValueType::F64 => "f64",
    };
    if is_array {
        format!("a{}", base)
    } else {
        base.to_string()
    }
}

/// Struct member name of an element, e.g. `u8_Speed`.
pub fn member_name(element: &Element) -> String {
    format!(
        "{}_{}",
        type_prefix(element.value_type, element.is_array()),
        element.name
    )
}

/// Struct member declaration of an element, e.g. `uint8 au8_Data[4];`.
pub fn member_declaration(element: &Element) -> String {
    match element.array_size {
        Some(n) => format!("{} {}[{}];", c_type(element.value_type), member_name(element), n),
        None => format!("{} {};", c_type(element.value_type), member_name(element)),
    }
}

/// Element type tag of the runtime's element descriptor.
pub fn element_type_tag(value_type: ValueType, is_array: bool) -> String {
    let base = match value_type {
        ValueType::U8 => "UINT8",
        ValueType::S8 => "SINT8",
        ValueType::U16 => "UINT16",
        ValueType::S16 => "SINT16",
        ValueType::U32 => "UINT32",
        ValueType::S32 => "SINT32",
        ValueType::U64 => "UINT64",
        ValueType::S64 => "SINT64",
        ValueType::F32 => "FLOAT32",
        ValueType::F64 => "FLOAT64",
    };
    if is_array {
        format!("OSY_DPA_ELEMENT_TYPE_A{}", base)
    } else {
        format!("OSY_DPA_ELEMENT_TYPE_{}", base)
    }
}

/// `CAN1` style name of a zero-based CAN interface number.
pub fn can_bus_name(interface: u8) -> String {
    format!("CAN{}", u16::from(interface) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodegen_model::Value;

    #[test]
    fn test_member_declarations() {
        let mut element = Element::scalar("Speed", Value::U8(0), Value::U8(0), Value::U8(1));
        assert_eq!(member_declaration(&element), "uint8 u8_Speed;");
        element.array_size = Some(4);
        assert_eq!(member_name(&element), "au8_Speed");
        assert_eq!(member_declaration(&element), "uint8 au8_Speed[4];");
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(element_type_tag(ValueType::S32, false), "OSY_DPA_ELEMENT_TYPE_SINT32");
        assert_eq!(element_type_tag(ValueType::F64, true), "OSY_DPA_ELEMENT_TYPE_AFLOAT64");
    }

    #[test]
    fn test_can_bus_name_is_one_based() {
        assert_eq!(can_bus_name(0), "CAN1");
        assert_eq!(can_bus_name(255), "CAN256");
    }
}
