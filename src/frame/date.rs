//! Date frames: ASCII `YYYY-MM-DD` with `-`-padded components standing in
//! for an absent year, month, or day.

use chrono::NaiveDate;

use super::{decode_text, encode_text, Frame};
use crate::error::Result;

const LENGTH: u8 = 0xA;
const TYPE: u8 = 0xF0;
const ADDRESS: u16 = 0x0000;

fn format_component(value: Option<u32>, width: usize) -> String {
    match value {
        Some(v) => format!("{:0width$}", v, width = width),
        None => "-".repeat(width),
    }
}

fn parse_component(s: &str) -> Option<i64> {
    if s.bytes().all(|b| b == b'-') {
        None
    } else {
        s.parse().ok()
    }
}

fn build_text(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> String {
    format!(
        "{}-{}-{}",
        format_component(year.map(|y| y as u32), 4),
        format_component(month, 2),
        format_component(day, 2)
    )
}

fn parse_text(text: &str) -> (Option<i32>, Option<u32>, Option<u32>) {
    let year = text.get(0..4).and_then(parse_component).map(|y| y as i32);
    let month = text.get(5..7).and_then(parse_component).map(|m| m as u32);
    let day = text.get(8..10).and_then(parse_component).map(|d| d as u32);
    (year, month, day)
}

macro_rules! date_frame {
    ($name:ident, $type:expr) => {
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(Frame);

        impl $name {
            pub fn matches(frame: &Frame) -> bool {
                frame.length() == LENGTH && frame.frame_type() == $type && frame.address() == ADDRESS
            }

            pub(crate) fn from_frame(frame: Frame) -> Self {
                Self(frame)
            }

            /// Builds a date frame; any component left `None` is encoded as
            /// the `-`-padded placeholder for that field.
            pub fn from_ymd(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Result<Self> {
                let data = encode_text(&build_text(year, month, day))?;
                Ok(Self(Frame::new($type, ADDRESS, data)))
            }

            pub fn from_date(date: NaiveDate) -> Result<Self> {
                use chrono::Datelike;
                Self::from_ymd(Some(date.year()), Some(date.month()), Some(date.day()))
            }

            pub fn year(&self) -> Option<i32> {
                parse_text(&decode_text(self.0.data())).0
            }

            pub fn month(&self) -> Option<u32> {
                parse_text(&decode_text(self.0.data())).1
            }

            pub fn day(&self) -> Option<u32> {
                parse_text(&decode_text(self.0.data())).2
            }

            /// The full date, if year, month, and day are all present.
            pub fn date(&self) -> Option<NaiveDate> {
                let (year, month, day) = parse_text(&decode_text(self.0.data()));
                NaiveDate::from_ymd_opt(year?, month?, day?)
            }

            pub fn frame(&self) -> &Frame {
                &self.0
            }

            pub fn into_frame(self) -> Frame {
                self.0
            }
        }
    };
}

date_frame!(Date, TYPE);
date_frame!(DeadlineDate, 0xF4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_full_roundtrip() {
        let date = Date::from_ymd(Some(2021), Some(12), Some(1)).unwrap();
        assert_eq!(date.year(), Some(2021));
        assert_eq!(date.month(), Some(12));
        assert_eq!(date.day(), Some(1));
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2021, 12, 1));
        assert!(date.frame().verify_checksum());
    }

    #[test]
    fn test_date_partial() {
        let date = Date::from_ymd(None, Some(5), None).unwrap();
        assert_eq!(date.year(), None);
        assert_eq!(date.month(), Some(5));
        assert_eq!(date.day(), None);
        assert_eq!(date.date(), None);
    }

    #[test]
    fn test_deadline_date_distinct_type() {
        let deadline = DeadlineDate::from_ymd(Some(2021), Some(2), Some(25)).unwrap();
        assert_eq!(deadline.frame().frame_type(), 0xF4);
        assert!(!Date::matches(deadline.frame()));
        assert!(DeadlineDate::matches(deadline.frame()));
    }
}
