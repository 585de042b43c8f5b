//! Telephone directory entries.

use super::{accumulate_text, encode_fields, field_at, split_fields};
use crate::error::{Error, Result};
use crate::frame::{Color, ColorValue, Frame, FrameKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Telephone {
    pub name: String,
    pub number: Option<String>,
    pub address: Option<String>,
    pub field1: Option<String>,
    pub field2: Option<String>,
    pub field3: Option<String>,
    pub field4: Option<String>,
    pub field5: Option<String>,
    pub field6: Option<String>,
    pub color: Option<ColorValue>,
}

impl Telephone {
    /// Joins the non-empty free-form fields with `\n`. Not itself a wire
    /// field — a derived accessor mirroring the device's own "memo" view
    /// over `field1..field6`.
    pub fn memo(&self) -> String {
        [
            &self.field1,
            &self.field2,
            &self.field3,
            &self.field4,
            &self.field5,
            &self.field6,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
    }

    pub(crate) fn from_frames(frames: &[FrameKind]) -> Result<Self> {
        let color = frames.iter().find_map(FrameKind::as_color).map(Color::color);
        let fields = split_fields(&accumulate_text(frames));
        let name = field_at(&fields, 0).ok_or(Error::MalformedRecord("telephone: missing name"))?;
        Ok(Self {
            name,
            number: field_at(&fields, 1),
            address: field_at(&fields, 2),
            field1: field_at(&fields, 3),
            field2: field_at(&fields, 4),
            field3: field_at(&fields, 5),
            field4: field_at(&fields, 6),
            field5: field_at(&fields, 7),
            field6: field_at(&fields, 8),
            color,
        })
    }

    pub(crate) fn to_frames(&self) -> Vec<Frame> {
        let mut frames = Vec::new();
        if let Some(color) = self.color {
            frames.push(Color::build(color).into_frame());
        }
        let text_fields = [
            Some(self.name.as_str()),
            self.number.as_deref(),
            self.address.as_deref(),
            self.field1.as_deref(),
            self.field2.as_deref(),
            self.field3.as_deref(),
            self.field4.as_deref(),
            self.field5.as_deref(),
            self.field6.as_deref(),
        ];
        frames.extend(encode_fields(&text_fields).expect("telephone fields fit the record text budget"));
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame as WireFrame;

    fn kinds(record: &Telephone) -> Vec<FrameKind> {
        record.to_frames().into_iter().map(WireFrame::kind).collect()
    }

    #[test]
    fn test_telephone_round_trip() {
        let record = Telephone {
            name: "John Doe".to_string(),
            number: Some("123-456".to_string()),
            address: Some("Nowhere St".to_string()),
            field1: None,
            field2: None,
            field3: None,
            field4: None,
            field5: None,
            field6: None,
            color: Some(ColorValue::Green),
        };
        let rebuilt = Telephone::from_frames(&kinds(&record)).unwrap();
        assert_eq!(rebuilt, record);
    }

    #[test]
    fn test_telephone_memo_joins_fields() {
        let record = Telephone {
            name: "John Doe".to_string(),
            number: None,
            address: None,
            field1: Some("a".to_string()),
            field2: None,
            field3: Some("c".to_string()),
            field4: None,
            field5: None,
            field6: None,
            color: None,
        };
        assert_eq!(record.memo(), "a\nc");
    }

    #[test]
    fn test_telephone_missing_name() {
        let err = Telephone::from_frames(&[]).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }
}
