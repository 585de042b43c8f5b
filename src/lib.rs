//! # Organizer Link
//!
//! This crate implements the serial wire protocol used by a family of pocket
//! organizer ("digital diary") devices to exchange directory data —
//! telephone entries, business cards, memos, calendars, schedule items,
//! reminders, to-dos, and expenses — with a host computer.
//!
//! It provides two symmetric halves of the same protocol engine:
//!
//! - [`decoder`] passively reconstructs synchronization events, frames, and
//!   records from a captured UART byte stream and emits annotations to a
//!   caller-supplied sink. It never fails: malformed input is logged and the
//!   decoder keeps going.
//! - [`sender`] actively drives a duplex byte channel: handshake, frame
//!   emission under software flow control, per-frame acknowledgement, and a
//!   complete transmission session. Any wire-level surprise is fatal for the
//!   session.
//!
//! Both halves are built from the same lower layers:
//!
//! - [`char_map`] — the bijection between device byte codes and Unicode.
//! - [`frame`] — the byte-level frame codec and the typed frame taxonomy.
//! - [`record`] — conversion between ordered frame sequences and typed
//!   records.
//!
//! ## Using with `std`
//!
//! This library targets `std` directly. The concrete [`sender::SerialChannel`]
//! that drives a real port is gated behind the `serial` feature:
//!
//! ```toml
//! organizer-link = { version = "0.1", features = ["serial"] }
//! ```
//!
//! Without it, only the abstract [`sender::Channel`] trait and the pure
//! codec/record/decoder layers are compiled.

/// Bijection between device byte codes and Unicode, with the unit separator
/// used as an intra-record field delimiter.
pub mod char_map;
/// Decoder state machine: UART byte stream in, annotations out.
pub mod decoder;
/// Library error and result types.
pub mod error;
/// Wire-level frame codec and the typed frame taxonomy.
pub mod frame;
/// Size constants shared by the frame and record layers.
pub mod len;
/// Logging convenience helpers.
pub mod logging;
mod macros;
/// Conversion between ordered frame sequences and typed records.
pub mod record;
/// Sender state machine: handshake, flow control, acknowledgement.
pub mod sender;

pub use error::{Error, Result};

/// Frame start marker on the wire (`:`).
pub const FRAME_START: u8 = 0x3A;
/// Carriage return, first byte of the sender's handshake.
pub const CR: u8 = 0x0D;
/// Line feed, second byte of the sender's handshake.
pub const LF: u8 = 0x0A;
/// Software flow control: receiver asks the sender to pause.
pub const XON: u8 = 0x11;
/// Software flow control: receiver asks the sender to resume.
pub const XOFF: u8 = 0x13;
/// Per-frame positive acknowledgement from the receiver.
pub const ACK: u8 = 0x23;
/// Per-frame negative acknowledgement from the receiver.
pub const NACK: u8 = 0x3F;

/// Computes a frame's checksum over its length, type, address, and data
/// bytes.
///
/// `negate8(length + type + addr_hi + addr_lo + Σ data)` where
/// `negate8(x) = ((0xFF - (x & 0xFF)) + 1) & 0xFF`, i.e. the two's-complement
/// negation of the truncated sum.
pub fn checksum(length: u8, frame_type: u8, address: u16, data: &[u8]) -> u8 {
    let [addr_lo, addr_hi] = address.to_le_bytes();
    let mut sum = length as u32 + frame_type as u32 + addr_lo as u32 + addr_hi as u32;
    for &b in data {
        sum += b as u32;
    }
    negate8(sum as u8)
}

fn negate8(x: u8) -> u8 {
    (0xFFu8.wrapping_sub(x)).wrapping_add(1)
}
