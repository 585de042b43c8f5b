//! Business card directory entries.

use super::{accumulate_text, encode_fields, field_at, split_fields};
use crate::error::{Error, Result};
use crate::frame::{Color, ColorValue, Frame, FrameKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusinessCard {
    pub employer: String,
    pub name: String,
    pub telephone_number: Option<String>,
    pub telex_number: Option<String>,
    pub fax_number: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub po_box: Option<String>,
    pub address: Option<String>,
    pub memo: Option<String>,
    pub color: Option<ColorValue>,
}

impl BusinessCard {
    pub(crate) fn from_frames(frames: &[FrameKind]) -> Result<Self> {
        let color = frames.iter().find_map(FrameKind::as_color).map(Color::color);
        let fields = split_fields(&accumulate_text(frames));
        let employer = field_at(&fields, 0).ok_or(Error::MalformedRecord("business card: missing employer"))?;
        let name = field_at(&fields, 1).ok_or(Error::MalformedRecord("business card: missing name"))?;
        Ok(Self {
            employer,
            name,
            telephone_number: field_at(&fields, 2),
            telex_number: field_at(&fields, 3),
            fax_number: field_at(&fields, 4),
            position: field_at(&fields, 5),
            department: field_at(&fields, 6),
            po_box: field_at(&fields, 7),
            address: field_at(&fields, 8),
            memo: field_at(&fields, 9),
            color,
        })
    }

    pub(crate) fn to_frames(&self) -> Vec<Frame> {
        let mut frames = Vec::new();
        if let Some(color) = self.color {
            frames.push(Color::build(color).into_frame());
        }
        let text_fields = [
            Some(self.employer.as_str()),
            Some(self.name.as_str()),
            self.telephone_number.as_deref(),
            self.telex_number.as_deref(),
            self.fax_number.as_deref(),
            self.position.as_deref(),
            self.department.as_deref(),
            self.po_box.as_deref(),
            self.address.as_deref(),
            self.memo.as_deref(),
        ];
        frames.extend(encode_fields(&text_fields).expect("business card fields fit the record text budget"));
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame as WireFrame;

    #[test]
    fn test_business_card_round_trip() {
        let record = BusinessCard {
            employer: "Acme".to_string(),
            name: "Wile Coyote".to_string(),
            telephone_number: Some("555-1234".to_string()),
            telex_number: None,
            fax_number: None,
            position: Some("Engineer".to_string()),
            department: None,
            po_box: None,
            address: Some("Desert Rd".to_string()),
            memo: None,
            color: Some(ColorValue::Blue),
        };
        let kinds: Vec<FrameKind> = record.to_frames().into_iter().map(WireFrame::kind).collect();
        let rebuilt = BusinessCard::from_frames(&kinds).unwrap();
        assert_eq!(rebuilt, record);
    }

    #[test]
    fn test_business_card_missing_name() {
        let err = BusinessCard::from_frames(&[]).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }
}
