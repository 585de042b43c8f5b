//! Wire-level frame codec and the typed frame taxonomy.
//!
//! [`Frame`] is the atomic protocol unit: a length-prefixed, type-tagged,
//! address-qualified byte record terminated by a checksum, wire-encoded as
//! `:` followed by ASCII hex pairs. [`FrameKind`] classifies a `Frame` into
//! one of the concrete variants below, each of which exposes domain-level
//! accessors over the frame's raw bytes.

pub mod color;
pub mod date;
pub mod day_color_highlight;
pub mod day_highlight;
pub mod directory;
pub mod end;
pub mod illustration;
pub mod priority;
pub mod text;
pub mod time;

pub use color::{Color, ColorValue};
pub use date::{DeadlineDate, Date};
pub use day_color_highlight::DayColorHighlight;
pub use day_highlight::DayHighlight;
pub use directory::{Directory, DirectoryKind};
pub use end::{EndOfRecord, EndOfTransmission};
pub use illustration::Illustration;
pub use priority::{Priority, PriorityValue};
pub use text::Text;
pub use time::{Alarm, DeadlineTime, StartEndTime, Time, ToDoAlarm};

use crate::char_map::{self, DecodedChar};
use crate::error::Result;
use crate::FRAME_START;

/// Decodes a frame's raw data bytes into text, for the frame kinds whose
/// data is a device-encoded string (`Date`, `Time`, `Text`, ...).
pub(crate) fn decode_text(data: &[u8]) -> String {
    data.iter()
        .map(|&b| match char_map::decode(b) {
            DecodedChar::Char(c) => c,
            DecodedChar::UnitSeparator => DecodedChar::UNIT_SEPARATOR,
            DecodedChar::NewLine => '\n',
            DecodedChar::Placeholder(_) => char::REPLACEMENT_CHARACTER,
        })
        .collect()
}

/// Encodes text into device bytes. The unit separator (`\u{1F}`) maps to
/// `0x0A` directly, bypassing [`char_map::encode`]'s normal rejection of
/// that scalar, since this is the one context the crate itself emits it in.
pub(crate) fn encode_text(s: &str) -> Result<Vec<u8>> {
    s.chars()
        .map(|c| match c {
            DecodedChar::UNIT_SEPARATOR => Ok(0x0A),
            c => char_map::encode(c),
        })
        .collect()
}

/// The atomic protocol unit. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    length: u8,
    frame_type: u8,
    address: u16,
    data: Vec<u8>,
    checksum: u8,
}

impl Frame {
    /// Builds a frame, computing its checksum from the supplied fields.
    ///
    /// `data.len()` must fit in a `u8`; callers within this crate never
    /// exceed that (the largest frame, `DayColorHighlight`, is 32 bytes).
    pub fn new(frame_type: u8, address: u16, data: Vec<u8>) -> Self {
        debug_assert!(data.len() <= u8::MAX as usize);
        let length = data.len() as u8;
        let checksum = crate::checksum(length, frame_type, address, &data);
        Self {
            length,
            frame_type,
            address,
            data,
            checksum,
        }
    }

    /// Builds a frame from already-known wire fields without recomputing the
    /// checksum, e.g. one just produced by [`FrameBuilder`] off the wire
    /// (where the stored checksum may legitimately be wrong).
    pub fn from_wire_parts(length: u8, frame_type: u8, address: u16, data: Vec<u8>, checksum: u8) -> Self {
        Self {
            length,
            frame_type,
            address,
            data,
            checksum,
        }
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn frame_type(&self) -> u8 {
        self.frame_type
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Recomputes the checksum from this frame's fields and compares it to
    /// the stored value.
    pub fn verify_checksum(&self) -> bool {
        self.checksum == crate::checksum(self.length, self.frame_type, self.address, &self.data)
    }

    /// Serializes this frame to its wire form: `:` followed by two
    /// upper-case ASCII hex digits for each of length, type, address (low
    /// byte first), each data byte, and the checksum.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(3 + 2 * (4 + self.data.len()));
        out.push(FRAME_START);
        push_hex(&mut out, self.length);
        push_hex(&mut out, self.frame_type);
        let [addr_lo, addr_hi] = self.address.to_le_bytes();
        push_hex(&mut out, addr_lo);
        push_hex(&mut out, addr_hi);
        for &b in &self.data {
            push_hex(&mut out, b);
        }
        push_hex(&mut out, self.checksum);
        out
    }

    /// Classifies this frame into a [`FrameKind`], consuming it.
    pub fn kind(self) -> FrameKind {
        recognize(self)
    }
}

fn push_hex(out: &mut Vec<u8>, byte: u8) {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    out.push(DIGITS[(byte >> 4) as usize]);
    out.push(DIGITS[(byte & 0xF) as usize]);
}

/// Which wire field a [`FrameBuilder::push`] call just finished consuming.
#[derive(Debug)]
pub enum FrameBuilderStep {
    Length,
    Type,
    AddressLow,
    AddressHigh,
    Data,
    /// The checksum byte was consumed and a complete frame was assembled.
    Checksum(Frame),
}

/// Incrementally assembles a [`Frame`] from already-decoded bytes (not ASCII
/// hex digits — the caller decodes hex pairs into binary bytes first).
///
/// State advances `Length -> Type -> AddressLow -> AddressHigh -> Data* ->
/// Checksum`, looping back to `Length` once a frame is emitted. Zero data
/// bytes are expected when `length == 0`, in which case the state skips
/// straight from `AddressHigh` to `Checksum`.
#[derive(Debug, Default)]
pub struct FrameBuilder {
    length: Option<u8>,
    frame_type: Option<u8>,
    address_low: Option<u8>,
    address: Option<u16>,
    data: Vec<u8>,
    remaining: usize,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one decoded byte into the assembler.
    pub fn push(&mut self, byte: u8) -> FrameBuilderStep {
        if self.length.is_none() {
            self.length = Some(byte);
            self.remaining = byte as usize;
            return FrameBuilderStep::Length;
        }
        if self.frame_type.is_none() {
            self.frame_type = Some(byte);
            return FrameBuilderStep::Type;
        }
        if self.address_low.is_none() {
            self.address_low = Some(byte);
            return FrameBuilderStep::AddressLow;
        }
        if self.address.is_none() {
            self.address = Some(u16::from_le_bytes([self.address_low.unwrap_or(0), byte]));
            return FrameBuilderStep::AddressHigh;
        }
        if self.remaining > 0 {
            self.data.push(byte);
            self.remaining -= 1;
            return FrameBuilderStep::Data;
        }
        let frame = Frame::from_wire_parts(
            self.length.unwrap_or(0),
            self.frame_type.unwrap_or(0),
            self.address.unwrap_or(0),
            std::mem::take(&mut self.data),
            byte,
        );
        *self = Self::default();
        FrameBuilderStep::Checksum(frame)
    }
}

/// A closed tagged union over every concrete frame variant the protocol
/// defines. `Unknown` is the fallback for any `(length, type, address,
/// data)` tuple none of the other variants recognize.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameKind {
    Directory(Directory),
    Color(Color),
    Priority(Priority),
    Date(Date),
    DeadlineDate(DeadlineDate),
    Time(Time),
    StartEndTime(StartEndTime),
    DeadlineTime(DeadlineTime),
    ToDoAlarm(ToDoAlarm),
    Alarm(Alarm),
    DayHighlight(DayHighlight),
    DayColorHighlight(DayColorHighlight),
    Illustration(Illustration),
    Text(Text),
    EndOfRecord(EndOfRecord),
    EndOfTransmission(EndOfTransmission),
    Unknown(Frame),
}

crate::inner_enum!(FrameKind, Directory);
crate::inner_enum!(FrameKind, Color);
crate::inner_enum!(FrameKind, Priority);
crate::inner_enum!(FrameKind, Date);
crate::inner_enum!(FrameKind, DeadlineDate);
crate::inner_enum!(FrameKind, Time);
crate::inner_enum!(FrameKind, StartEndTime);
crate::inner_enum!(FrameKind, DeadlineTime);
crate::inner_enum!(FrameKind, ToDoAlarm);
crate::inner_enum!(FrameKind, Alarm);
crate::inner_enum!(FrameKind, DayHighlight);
crate::inner_enum!(FrameKind, DayColorHighlight);
crate::inner_enum!(FrameKind, Illustration);
crate::inner_enum!(FrameKind, Text);
crate::inner_enum!(FrameKind, EndOfRecord);
crate::inner_enum!(FrameKind, EndOfTransmission);

impl FrameKind {
    /// Does this kind open a record group (any directory variant)?
    pub fn as_directory_kind(&self) -> Option<DirectoryKind> {
        self.as_directory().map(Directory::kind)
    }
}

/// Classifies a frame's `(length, type, address, data)` into a [`FrameKind`],
/// scanning variants most-specific first as the wire table requires —
/// specialized directory payloads before the generic `Directory`.
pub fn recognize(frame: Frame) -> FrameKind {
    if Directory::matches(&frame) {
        return FrameKind::Directory(Directory::from_frame(frame));
    }
    if Color::matches(&frame) {
        return FrameKind::Color(Color::from_frame(frame));
    }
    if Priority::matches(&frame) {
        return FrameKind::Priority(Priority::from_frame(frame));
    }
    if DeadlineDate::matches(&frame) {
        return FrameKind::DeadlineDate(DeadlineDate::from_frame(frame));
    }
    if Date::matches(&frame) {
        return FrameKind::Date(Date::from_frame(frame));
    }
    if StartEndTime::matches(&frame) {
        return FrameKind::StartEndTime(StartEndTime::from_frame(frame));
    }
    if Time::matches(&frame) {
        return FrameKind::Time(Time::from_frame(frame));
    }
    if DeadlineTime::matches(&frame) {
        return FrameKind::DeadlineTime(DeadlineTime::from_frame(frame));
    }
    if ToDoAlarm::matches(&frame) {
        return FrameKind::ToDoAlarm(ToDoAlarm::from_frame(frame));
    }
    if Alarm::matches(&frame) {
        return FrameKind::Alarm(Alarm::from_frame(frame));
    }
    if DayHighlight::matches(&frame) {
        return FrameKind::DayHighlight(DayHighlight::from_frame(frame));
    }
    if DayColorHighlight::matches(&frame) {
        return FrameKind::DayColorHighlight(DayColorHighlight::from_frame(frame));
    }
    if Illustration::matches(&frame) {
        return FrameKind::Illustration(Illustration::from_frame(frame));
    }
    if EndOfRecord::matches(&frame) {
        return FrameKind::EndOfRecord(EndOfRecord::from_frame(frame));
    }
    if EndOfTransmission::matches(&frame) {
        return FrameKind::EndOfTransmission(EndOfTransmission::from_frame(frame));
    }
    if Text::matches(&frame) {
        return FrameKind::Text(Text::from_frame(frame));
    }
    FrameKind::Unknown(frame)
}
