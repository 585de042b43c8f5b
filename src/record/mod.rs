//! Conversion between ordered frame sequences and typed records.
//!
//! Each variant below owns a `from_frames`/`to_frames` pair. `from_frames`
//! consumes every frame between a `Directory` and the next `EndOfRecord`
//! (the directory and terminator themselves are handled one layer up, by
//! [`crate::decoder`] and [`crate::sender`]); `to_frames` is its inverse,
//! deterministic emission order per record.

mod business_card;
mod calendar;
mod expense;
mod memo;
mod reminder;
mod schedule;
mod telephone;
mod todo;

pub use business_card::BusinessCard;
pub use calendar::Calendar;
pub use expense::Expense;
pub use memo::Memo;
pub use reminder::Reminder;
pub use schedule::Schedule;
pub use telephone::Telephone;
pub use todo::ToDo;

use crate::char_map::DecodedChar;
use crate::error::{Error, Result};
use crate::frame::{DirectoryKind, Frame, FrameKind, Text};

/// A logical entity reconstructed from an ordered run of frames.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Telephone(Telephone),
    BusinessCard(BusinessCard),
    Memo(Memo),
    Calendar(Calendar),
    Schedule(Schedule),
    Reminder(Reminder),
    ToDo(ToDo),
    Expense(Expense),
}

crate::inner_enum!(Record, Telephone);
crate::inner_enum!(Record, BusinessCard);
crate::inner_enum!(Record, Memo);
crate::inner_enum!(Record, Calendar);
crate::inner_enum!(Record, Schedule);
crate::inner_enum!(Record, Reminder);
crate::inner_enum!(Record, ToDo);
crate::inner_enum!(Record, Expense);

impl Record {
    /// The directory kind that opens this record's frame group.
    pub fn directory_kind(&self) -> DirectoryKind {
        match self {
            Self::Telephone(_) => DirectoryKind::Telephone,
            Self::BusinessCard(_) => DirectoryKind::BusinessCard,
            Self::Memo(_) => DirectoryKind::Memo,
            Self::Calendar(_) => DirectoryKind::Calendar,
            Self::Schedule(_) => DirectoryKind::Schedule,
            Self::Reminder(_) => DirectoryKind::Reminder,
            Self::ToDo(_) => DirectoryKind::ToDo,
            Self::Expense(_) => DirectoryKind::Expense,
        }
    }

    /// Builds the record a directory of `kind` announces from the frames
    /// that follow it, up to (not including) `EndOfRecord`.
    pub fn from_frames(kind: DirectoryKind, frames: &[FrameKind]) -> Result<Self> {
        match kind {
            DirectoryKind::Telephone => Telephone::from_frames(frames).map(Self::Telephone),
            DirectoryKind::BusinessCard => BusinessCard::from_frames(frames).map(Self::BusinessCard),
            DirectoryKind::Memo => Memo::from_frames(frames).map(Self::Memo),
            DirectoryKind::Calendar => Calendar::from_frames(frames).map(Self::Calendar),
            DirectoryKind::Schedule => Schedule::from_frames(frames).map(Self::Schedule),
            DirectoryKind::Reminder => Reminder::from_frames(frames).map(Self::Reminder),
            DirectoryKind::ToDo => ToDo::from_frames(frames).map(Self::ToDo),
            DirectoryKind::Expense => Expense::from_frames(frames).map(Self::Expense),
            DirectoryKind::Generic => Err(Error::UnknownRecord),
        }
    }

    pub fn to_frames(&self) -> Vec<Frame> {
        match self {
            Self::Telephone(r) => r.to_frames(),
            Self::BusinessCard(r) => r.to_frames(),
            Self::Memo(r) => r.to_frames(),
            Self::Calendar(r) => r.to_frames(),
            Self::Schedule(r) => r.to_frames(),
            Self::Reminder(r) => r.to_frames(),
            Self::ToDo(r) => r.to_frames(),
            Self::Expense(r) => r.to_frames(),
        }
    }
}

/// Concatenates every `Text` frame's decoded chunk, in order, into one
/// string — the inverse of [`Text::from_text_list`]'s wrapping.
pub(crate) fn accumulate_text(frames: &[FrameKind]) -> String {
    let mut text = String::new();
    for f in frames {
        if let Some(t) = f.as_text() {
            text.push_str(&t.text());
        }
    }
    text
}

/// Splits accumulated text on the unit separator into ordered fields.
/// Trailing empty fields are discarded entirely; an empty field between two
/// non-empty ones is kept as `None`.
pub(crate) fn split_fields(text: &str) -> Vec<Option<String>> {
    let mut parts: Vec<&str> = text.split(DecodedChar::UNIT_SEPARATOR).collect();
    while parts.last().is_some_and(|s| s.is_empty()) {
        parts.pop();
    }
    parts
        .into_iter()
        .map(|s| if s.is_empty() { None } else { Some(s.to_string()) })
        .collect()
}

pub(crate) fn field_at(fields: &[Option<String>], idx: usize) -> Option<String> {
    fields.get(idx).cloned().flatten()
}

/// Encodes an ordered list of optional fields as `Text` frames. Trailing
/// `None`s are dropped before wrapping; interior `None`s become empty
/// fields so the unit-separator count is preserved.
pub(crate) fn encode_fields(fields: &[Option<&str>]) -> Result<Vec<Frame>> {
    let mut values: Vec<&str> = fields.iter().map(|f| f.unwrap_or("")).collect();
    while values.last() == Some(&"") {
        values.pop();
    }
    if values.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Text::from_text_list(&values)?.into_iter().map(Text::into_frame).collect())
}
