//! Crate-wide error and result types.
//!
//! One variant per cause in the protocol's error taxonomy: decoder errors are
//! recoverable (the decoder logs and keeps going), sender errors are fatal
//! for the transmission session.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Errors arising from the frame codec, record layer, decoder, and sender.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A frame's stored checksum did not match the recomputed value.
    #[error("bad checksum: expected {expected:#04x}, found {found:#04x}")]
    BadChecksum { expected: u8, found: u8 },

    /// `recognize` fell through to the generic, unrecognized frame kind.
    #[error("unknown frame: type={frame_type:#04x} address={address:#06x} length={length}")]
    UnknownFrame {
        frame_type: u8,
        address: u16,
        length: u8,
    },

    /// A record group was opened without a [`Directory`](crate::frame::Directory) frame, or with
    /// an unrecognized one.
    #[error("unknown record: no recognized directory frame opened this group")]
    UnknownRecord,

    /// A record's frames were missing a field its invariants require.
    #[error("malformed record: {0}")]
    MalformedRecord(&'static str),

    /// A `char` has no corresponding device byte code.
    #[error("character {0:?} has no device encoding")]
    UnencodableChar(char),

    /// More than 376 bytes of text material in a single record.
    #[error("record text too long: {len} bytes exceeds the {max} byte limit")]
    RecordTooLong { len: usize, max: usize },

    /// The sender saw an unexpected byte, or a short write, where none was
    /// allowed.
    #[error("protocol violation: {0}")]
    ProtocolViolation(&'static str),

    /// An I/O error from the underlying channel, propagated unchanged.
    #[error("channel I/O error: {0}")]
    ChannelIo(String),
}

impl Error {
    /// Shorthand for [`Error::ProtocolViolation`] carrying the offending byte.
    pub fn unexpected_byte(context: &'static str, byte: u8) -> Self {
        log::warn!(
            "{}: protocol violation in {context}: unexpected byte {byte:#04x}",
            crate::logging::LOG_PREFIX
        );
        Self::ProtocolViolation(context)
    }
}

#[cfg(feature = "serial")]
impl From<serialport::Error> for Error {
    fn from(err: serialport::Error) -> Self {
        Self::ChannelIo(format!("{err}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::ChannelIo(format!("{err}"))
    }
}
