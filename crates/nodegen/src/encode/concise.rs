// crates/nodegen/src/encode/concise.rs

//! Concise DCF: the compact SDO write sequence a CANopen manager replays to
//! configure one device at startup.
//!
//! Layout (all multi-byte fields little endian):
//!
//! | field         | size |
//! |---------------|------|
//! | entry count   | 4    |
//! | per entry: index | 2 |
//! | per entry: sub-index | 1 |
//! | per entry: payload length | 4 |
//! | per entry: payload | n |

use crate::util::literal::hex_byte;

/// Fixed part of one serialized entry (index, sub-index, length).
pub const ENTRY_OVERHEAD: usize = 7;

/// Size of the leading entry count.
pub const COUNT_SIZE: usize = 4;

/// One SDO write of a concise DCF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConciseEntry {
    pub index: u16,
    pub sub_index: u8,
    pub payload: Vec<u8>,
    pub comment: String,
}

impl ConciseEntry {
    pub fn u8(index: u16, sub_index: u8, value: u8, comment: impl Into<String>) -> Self {
        Self {
            index,
            sub_index,
            payload: vec![value],
            comment: comment.into(),
        }
    }

    pub fn u16(index: u16, sub_index: u8, value: u16, comment: impl Into<String>) -> Self {
        Self {
            index,
            sub_index,
            payload: value.to_le_bytes().to_vec(),
            comment: comment.into(),
        }
    }

    pub fn u32(index: u16, sub_index: u8, value: u32, comment: impl Into<String>) -> Self {
        Self {
            index,
            sub_index,
            payload: value.to_le_bytes().to_vec(),
            comment: comment.into(),
        }
    }

    /// Serialized size of this entry.
    pub fn encoded_len(&self) -> usize {
        ENTRY_OVERHEAD + self.payload.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.index.to_le_bytes());
        out.push(self.sub_index);
        out.extend_from_slice(&(self.payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.payload);
        out
    }
}

/// The ordered entries for one device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConciseDcf {
    entries: Vec<ConciseEntry>,
}

impl ConciseDcf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ConciseEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ConciseEntry] {
        &self.entries
    }

    /// Total size in bytes: `4 + 7N + sum(payload sizes)`.
    pub fn size(&self) -> usize {
        COUNT_SIZE + self.entries.iter().map(ConciseEntry::encoded_len).sum::<usize>()
    }

    #[cfg(test)]
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        out.extend_from_slice(&(self.entries.len() as u32).to_le_bytes());
        for entry in &self.entries {
            out.extend(entry.to_bytes());
        }
        out
    }

    /// Array initializer rows: the entry count, then one row per entry with
    /// its comment.
    ///
    /// Comments of 1, 2 and 4 byte payloads line up in one column; other
    /// payload sizes are not padded.
    pub fn render_lines(&self) -> Vec<String> {
        let mut rows = Vec::with_capacity(self.entries.len() + 1);
        let count = (self.entries.len() as u32).to_le_bytes();
        rows.push((count.to_vec(), "number of entries".to_string(), 0));
        for entry in &self.entries {
            let padding = match entry.payload.len() {
                1 => 21,
                2 => 14,
                _ => 0,
            };
            let comment = format!(
                "0x{:04X}:{:02X} {}",
                entry.index, entry.sub_index, entry.comment
            );
            rows.push((entry.to_bytes(), comment, padding));
        }

        let last = rows.len() - 1;
        rows.into_iter()
            .enumerate()
            .map(|(i, (bytes, comment, padding))| {
                let values: Vec<String> = bytes.into_iter().map(hex_byte).collect();
                let separator = if i == last { " " } else { "," };
                format!(
                    "{}{}{} /* {} */",
                    values.join(", "),
                    separator,
                    " ".repeat(padding),
                    comment
                )
            })
            .collect()
    }
}
