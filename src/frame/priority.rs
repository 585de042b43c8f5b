//! Priority frames: a single-byte To-Do urgency tag.

use super::{ColorValue, Frame};

const LENGTH: u8 = 0x1;
const TYPE: u8 = 0x72;
const ADDRESS: u16 = 0x0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriorityValue {
    A = 0x10,
    B = 0x20,
    C = 0x30,
}

impl PriorityValue {
    fn from_code(code: u8) -> Option<Self> {
        match code {
            0x10 => Some(Self::A),
            0x20 => Some(Self::B),
            0x30 => Some(Self::C),
            _ => None,
        }
    }

    /// The color a priority is conventionally displayed in on-device.
    pub fn color(self) -> ColorValue {
        match self {
            Self::A => ColorValue::Orange,
            Self::B => ColorValue::Blue,
            Self::C => ColorValue::Green,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Priority(Frame);

impl Priority {
    pub fn matches(frame: &Frame) -> bool {
        frame.length() == LENGTH
            && frame.frame_type() == TYPE
            && frame.address() == ADDRESS
            && frame
                .data()
                .first()
                .copied()
                .and_then(PriorityValue::from_code)
                .is_some()
    }

    pub(crate) fn from_frame(frame: Frame) -> Self {
        Self(frame)
    }

    pub fn build(priority: PriorityValue) -> Self {
        Self(Frame::new(TYPE, ADDRESS, vec![priority as u8]))
    }

    pub fn priority(&self) -> PriorityValue {
        PriorityValue::from_code(self.0.data()[0]).unwrap_or(PriorityValue::A)
    }

    pub fn color(&self) -> ColorValue {
        self.priority().color()
    }

    pub fn frame(&self) -> &Frame {
        &self.0
    }

    pub fn into_frame(self) -> Frame {
        self.0
    }
}
