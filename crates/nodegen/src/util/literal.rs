// crates/nodegen/src/util/literal.rs

//! C literal formatting for Datapool and HALC values.

use core::fmt;
use nodegen_model::Value;

/// A value that has no C literal representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralError {
    /// Infinite or NaN floating point value.
    NotFinite { value: f64 },
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralError::NotFinite { value } => {
                write!(f, "value {} cannot be written as a C literal", value)
            }
        }
    }
}

impl std::error::Error for LiteralError {}

/// Formats a value with the suffix matching its width.
///
/// Integers: `U` for 8/16 bit unsigned, `UL` / `ULL` for 32/64 bit unsigned,
/// none for 8/16 bit signed, `L` / `LL` for 32/64 bit signed. The minimum of a
/// signed type is written as `(MIN+1)-1`.
pub fn format_value(value: &Value) -> Result<String, LiteralError> {
    Ok(match *value {
        Value::U8(v) => format!("{}U", v),
        Value::U16(v) => format!("{}U", v),
        Value::U32(v) => format!("{}UL", v),
        Value::U64(v) => format!("{}ULL", v),
        Value::S8(v) => format_signed(v.into(), i8::MIN.into(), ""),
        Value::S16(v) => format_signed(v.into(), i16::MIN.into(), ""),
        Value::S32(v) => format_signed(v.into(), i32::MIN.into(), "L"),
        Value::S64(v) => format_signed(v, i64::MIN, "LL"),
        Value::F32(v) => format_f32(v)?,
        Value::F64(v) => format_f64(v)?,
    })
}

fn format_signed(value: i64, min: i64, suffix: &str) -> String {
    if value == min {
        // the literal MIN is a negated constant one past the type's maximum
        format!("({}{}-1{})", value + 1, suffix, suffix)
    } else {
        format!("{}{}", value, suffix)
    }
}

/// Formats a double in the canonical general format.
pub fn format_f64(value: f64) -> Result<String, LiteralError> {
    if !value.is_finite() {
        return Err(LiteralError::NotFinite { value });
    }
    Ok(general_format(&format!("{}", value), &format!("{:e}", value)))
}

/// Formats a float in the canonical general format with an `F` suffix.
pub fn format_f32(value: f32) -> Result<String, LiteralError> {
    if !value.is_finite() {
        return Err(LiteralError::NotFinite {
            value: value.into(),
        });
    }
    Ok(format!(
        "{}F",
        general_format(&format!("{}", value), &format!("{:e}", value))
    ))
}

/// Shortest round-trip digits; positional notation for exponents in -5..16,
/// scientific otherwise. A decimal point is always present.
fn general_format(positional: &str, scientific: &str) -> String {
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let exp: i32 = exponent.parse().unwrap_or(0);
    if (-5..16).contains(&exp) {
        with_decimal_point(positional)
    } else {
        format!("{}e{}", with_decimal_point(mantissa), exponent)
    }
}

fn with_decimal_point(digits: &str) -> String {
    if digits.contains('.') {
        digits.to_string()
    } else {
        format!("{}.0", digits)
    }
}

/// Returns the value a double literal stands for once the C compiler has
/// read it back.
pub fn rounded_f64(value: f64) -> Result<f64, LiteralError> {
    let literal = format_f64(value)?;
    literal
        .parse::<f64>()
        .map_err(|_| LiteralError::NotFinite { value })
}

/// `0x05U` style byte literal.
pub fn hex_byte(byte: u8) -> String {
    format!("0x{:02X}U", byte)
}

/// `0x00000180UL` style 32 bit literal.
pub fn hex_u32(value: u32) -> String {
    format!("0x{:08X}UL", value)
}

/// Boolean as `0U` / `1U`.
pub fn flag(value: bool) -> &'static str {
    if value { "1U" } else { "0U" }
}
