//! Free-form memo entries.

use super::{accumulate_text, encode_fields};
use crate::error::Result;
use crate::frame::{Color, ColorValue, Frame, FrameKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memo {
    pub text: String,
    pub color: Option<ColorValue>,
}

impl Memo {
    pub(crate) fn from_frames(frames: &[FrameKind]) -> Result<Self> {
        let color = frames.iter().find_map(FrameKind::as_color).map(Color::color);
        Ok(Self {
            text: accumulate_text(frames),
            color,
        })
    }

    pub(crate) fn to_frames(&self) -> Vec<Frame> {
        let mut frames = Vec::new();
        if let Some(color) = self.color {
            frames.push(Color::build(color).into_frame());
        }
        frames.extend(encode_fields(&[Some(self.text.as_str())]).expect("memo text fits the record text budget"));
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame as WireFrame;

    #[test]
    fn test_memo_round_trip() {
        let record = Memo {
            text: "Buy milk".to_string(),
            color: Some(ColorValue::Orange),
        };
        let kinds: Vec<FrameKind> = record.to_frames().into_iter().map(WireFrame::kind).collect();
        let rebuilt = Memo::from_frames(&kinds).unwrap();
        assert_eq!(rebuilt, record);
    }

    #[test]
    fn test_memo_without_color() {
        let record = Memo {
            text: "no color".to_string(),
            color: None,
        };
        let kinds: Vec<FrameKind> = record.to_frames().into_iter().map(WireFrame::kind).collect();
        let rebuilt = Memo::from_frames(&kinds).unwrap();
        assert_eq!(rebuilt, record);
    }
}
