//! Size constants used across the frame and record layers.
//!
//! IMPORTANT: these describe logical/text budgets, not wire-frame byte
//! counts — frames are variable-length (see [`crate::frame::Frame::length`]).

/// Maximum bytes of data a single `Text` frame may carry.
pub const TEXT_CHUNK_MAX: usize = 0x80;

/// Maximum bytes of text material (summed across all fields) in one record.
pub const RECORD_TEXT_MAX: usize = 376;

/// At most this many wrapped chunks are taken from one logical line.
pub const TEXT_CHUNKS_PER_LINE_MAX: usize = 3;

/// `Text` frame type when `address < TEXT_HIGH_ADDRESS_THRESHOLD`.
pub const TEXT_TYPE_LOW: u8 = 0x80;

/// `Text` frame type when `address >= TEXT_HIGH_ADDRESS_THRESHOLD`.
pub const TEXT_TYPE_HIGH: u8 = 0x81;

/// Address threshold at which `Text` frames switch from `TEXT_TYPE_LOW` to
/// `TEXT_TYPE_HIGH`, wrapping the address field modulo this value.
pub const TEXT_HIGH_ADDRESS_THRESHOLD: u16 = 0x100;
