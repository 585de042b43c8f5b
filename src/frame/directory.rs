//! Directory frames: the payload that opens a record group and announces
//! which concrete record type follows.

use super::Frame;

const LENGTH: u8 = 0x2;
const TYPE: u8 = 0x00;
const ADDRESS: u16 = 0x0200;

/// Which record type a [`Directory`] frame announces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectoryKind {
    /// Generic directory payload (`[0, 0]`) with no specific record type.
    Generic,
    Telephone,
    BusinessCard,
    Memo,
    Calendar,
    Schedule,
    Reminder,
    ToDo,
    Expense,
}

impl DirectoryKind {
    fn data(self) -> [u8; 2] {
        match self {
            Self::Generic => [0x00, 0x00],
            Self::Telephone => [0x90, 0x00],
            Self::BusinessCard => [0xC0, 0x00],
            Self::Memo => [0xA0, 0x00],
            Self::Calendar => [0x80, 0x00],
            Self::Schedule => [0xB0, 0x00],
            Self::Reminder => [0x91, 0x00],
            Self::ToDo => [0xC1, 0x00],
            Self::Expense => [0x92, 0x00],
        }
    }

    fn from_data(data: &[u8]) -> Option<Self> {
        match data {
            [0x00, 0x00] => Some(Self::Generic),
            [0x90, 0x00] => Some(Self::Telephone),
            [0xC0, 0x00] => Some(Self::BusinessCard),
            [0xA0, 0x00] => Some(Self::Memo),
            [0x80, 0x00] => Some(Self::Calendar),
            [0xB0, 0x00] => Some(Self::Schedule),
            [0x91, 0x00] => Some(Self::Reminder),
            [0xC1, 0x00] => Some(Self::ToDo),
            [0x92, 0x00] => Some(Self::Expense),
            _ => None,
        }
    }
}

/// A frame that opens a record group. The 9 specialized directory payloads
/// from the wire table (`TelephoneDirectory`, `CalendarDirectory`, ...) are
/// collapsed into one struct carrying a [`DirectoryKind`] tag, since they
/// differ only in their 2-byte data payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directory(Frame);

impl Directory {
    pub fn matches(frame: &Frame) -> bool {
        frame.length() == LENGTH
            && frame.frame_type() == TYPE
            && frame.address() == ADDRESS
            && DirectoryKind::from_data(frame.data()).is_some()
    }

    pub(crate) fn from_frame(frame: Frame) -> Self {
        Self(frame)
    }

    /// Builds the directory frame that opens a record group of `kind`.
    pub fn build(kind: DirectoryKind) -> Self {
        Self(Frame::new(TYPE, ADDRESS, kind.data().to_vec()))
    }

    pub fn kind(&self) -> DirectoryKind {
        DirectoryKind::from_data(self.0.data()).unwrap_or(DirectoryKind::Generic)
    }

    pub fn frame(&self) -> &Frame {
        &self.0
    }

    pub fn into_frame(self) -> Frame {
        self.0
    }
}
