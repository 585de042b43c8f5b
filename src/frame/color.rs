//! Color frames: a single-byte record-level color tag.

use super::Frame;

const LENGTH: u8 = 0x1;
const TYPE: u8 = 0x71;
const ADDRESS: u16 = 0x0000;

/// The three colors a record (or a single day, via [`super::DayColorHighlight`])
/// can be tagged with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorValue {
    Blue = 0x01,
    Orange = 0x02,
    Green = 0x04,
}

impl ColorValue {
    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::Blue),
            0x02 => Some(Self::Orange),
            0x04 => Some(Self::Green),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Color(Frame);

impl Color {
    pub fn matches(frame: &Frame) -> bool {
        frame.length() == LENGTH
            && frame.frame_type() == TYPE
            && frame.address() == ADDRESS
            && frame.data().first().copied().and_then(ColorValue::from_code).is_some()
    }

    pub(crate) fn from_frame(frame: Frame) -> Self {
        Self(frame)
    }

    pub fn build(color: ColorValue) -> Self {
        Self(Frame::new(TYPE, ADDRESS, vec![color as u8]))
    }

    pub fn color(&self) -> ColorValue {
        ColorValue::from_code(self.0.data()[0]).unwrap_or(ColorValue::Blue)
    }

    pub fn frame(&self) -> &Frame {
        &self.0
    }

    pub fn into_frame(self) -> Frame {
        self.0
    }
}
