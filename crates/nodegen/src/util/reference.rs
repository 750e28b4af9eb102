// crates/nodegen/src/util/reference.rs

use core::fmt;

/// A pointer initializer in generated C: nothing, one object or the start of an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// Rendered as `NULL`.
    Absent,
    /// Rendered as `&name`.
    Single(String),
    /// Rendered as `&array[first]`.
    Many { array: String, first: usize },
}

impl Reference {
    /// Picks the reference to `count` objects that are declared as a plain
    /// variable `single` when there is one of them and as `array` otherwise.
    pub fn select(count: usize, single: &str, array: &str) -> Self {
        match count {
            0 => Reference::Absent,
            1 => Reference::Single(single.to_string()),
            _ => Reference::Many {
                array: array.to_string(),
                first: 0,
            },
        }
    }

    /// `count` entries of `array` starting at `first`.
    pub fn slice(array: &str, first: usize, count: usize) -> Self {
        if count == 0 {
            Reference::Absent
        } else {
            Reference::Many {
                array: array.to_string(),
                first,
            }
        }
    }

    /// A single object that may not exist.
    pub fn optional(name: Option<&str>) -> Self {
        match name {
            Some(n) => Reference::Single(n.to_string()),
            None => Reference::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Reference::Absent)
    }

    pub fn render(&self) -> String {
        match self {
            Reference::Absent => "NULL".to_string(),
            Reference::Single(name) => format!("&{}", name),
            Reference::Many { array, first } => format!("&{}[{}]", array, first),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_by_count() {
        assert_eq!(Reference::select(0, "mt_Ch", "mat_Ch").render(), "NULL");
        assert_eq!(Reference::select(1, "mt_Ch", "mat_Ch").render(), "&mt_Ch");
        assert_eq!(Reference::select(3, "mt_Ch", "mat_Ch").render(), "&mat_Ch[0]");
    }

    #[test]
    fn test_slice_offset() {
        assert_eq!(Reference::slice("mat_Sig", 4, 2).to_string(), "&mat_Sig[4]");
        assert!(Reference::slice("mat_Sig", 4, 0).is_absent());
    }
}
