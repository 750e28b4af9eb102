// crates/nodegen/src/encode/signal.rs

//! Bit-packed CAN signal descriptors and multiplex grouping.

use core::fmt;
use nodegen_model::{ByteOrder, CanSignal, MuxRole};

/// Highest start bit a descriptor can carry (64 byte payload).
pub const MAX_START_BIT: u16 = 511;

/// Longest signal a descriptor can carry.
pub const MAX_BIT_LENGTH: u16 = 64;

/// A signal that does not fit the packed descriptor layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEncodeError {
    StartBitOutOfRange(u16),
    InvalidLength(u16),
    ElementIndexOutOfRange(u32),
}

impl fmt::Display for SignalEncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalEncodeError::StartBitOutOfRange(bit) => {
                write!(f, "start bit {} exceeds {}", bit, MAX_START_BIT)
            }
            SignalEncodeError::InvalidLength(len) => {
                write!(f, "bit length {} outside 1..={}", len, MAX_BIT_LENGTH)
            }
            SignalEncodeError::ElementIndexOutOfRange(index) => {
                write!(f, "element index {} does not fit 16 bits", index)
            }
        }
    }
}

impl std::error::Error for SignalEncodeError {}

/// One signal as stored in the runtime's `uint32` descriptor table.
///
/// | bits  | content        |
/// |-------|----------------|
/// | 0-8   | start bit      |
/// | 9-14  | length - 1     |
/// | 15    | Motorola order |
/// | 16-31 | element index  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalDescriptor {
    pub start_bit: u16,
    pub bit_length: u16,
    pub motorola: bool,
    pub element_index: u16,
}

impl SignalDescriptor {
    pub fn from_signal(signal: &CanSignal) -> Result<Self, SignalEncodeError> {
        if signal.bit_start > MAX_START_BIT {
            return Err(SignalEncodeError::StartBitOutOfRange(signal.bit_start));
        }
        if signal.bit_length == 0 || signal.bit_length > MAX_BIT_LENGTH {
            return Err(SignalEncodeError::InvalidLength(signal.bit_length));
        }
        let element_index = u16::try_from(signal.element_index)
            .map_err(|_| SignalEncodeError::ElementIndexOutOfRange(signal.element_index))?;
        Ok(Self {
            start_bit: signal.bit_start,
            bit_length: signal.bit_length,
            motorola: signal.byte_order == ByteOrder::Motorola,
            element_index,
        })
    }

    pub fn encode(&self) -> u32 {
        u32::from(self.start_bit & 0x1FF)
            | (u32::from((self.bit_length - 1) & 0x3F) << 9)
            | (u32::from(self.motorola) << 15)
            | (u32::from(self.element_index) << 16)
    }

    #[cfg(test)]
    fn decode(raw: u32) -> Self {
        Self {
            start_bit: (raw & 0x1FF) as u16,
            bit_length: ((raw >> 9) & 0x3F) as u16 + 1,
            motorola: (raw >> 15) & 1 == 1,
            element_index: (raw >> 16) as u16,
        }
    }
}

/// Signals transmitted for one multiplexer value, as indices into the
/// message's signal list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuxGroup {
    pub value: u16,
    pub signals: Vec<usize>,
}

/// Partitions the signals of a message by multiplexer value.
///
/// Groups are ordered by ascending value. Each group starts with the
/// multiplexer, followed by the signals multiplexed on that value and then by
/// the signals that are always present, each in message order. A multiplexer
/// without multiplexed signals yields a single group at value 0. Messages
/// without a multiplexer yield one group with every signal, messages without
/// signals yield none.
pub fn group_by_mux(signals: &[CanSignal]) -> Vec<MuxGroup> {
    if signals.is_empty() {
        return Vec::new();
    }
    let Some(mux_index) = signals.iter().position(|s| s.mux == MuxRole::Multiplexer) else {
        return vec![MuxGroup {
            value: 0,
            signals: (0..signals.len()).collect(),
        }];
    };

    let always: Vec<usize> = signals
        .iter()
        .enumerate()
        .filter(|(_, s)| s.mux == MuxRole::None)
        .map(|(i, _)| i)
        .collect();

    let mut values: Vec<u16> = signals
        .iter()
        .filter_map(|s| match s.mux {
            MuxRole::Multiplexed(v) => Some(v),
            _ => None,
        })
        .collect();
    values.sort_unstable();
    values.dedup();
    if values.is_empty() {
        values.push(0);
    }

    values
        .into_iter()
        .map(|value| {
            let mut members = vec![mux_index];
            members.extend(
                signals
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.mux == MuxRole::Multiplexed(value))
                    .map(|(i, _)| i),
            );
            members.extend(always.iter().copied());
            MuxGroup {
                value,
                signals: members,
            }
        })
        .collect()
}
