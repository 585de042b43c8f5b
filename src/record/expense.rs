//! Expense ledger entries.
//!
//! Unlike the other dated records, an expense's date travels as the first
//! text field (`YYYYMMDD`, no separators) rather than as a `Date` frame —
//! confirmed against the reference implementation's `Expense.from_frames`,
//! which slices `date_str[0:4]`/`[4:6]`/`[6:8]` out of the accumulated text.

use chrono::NaiveDate;

use super::{accumulate_text, encode_fields, field_at, split_fields};
use crate::error::{Error, Result};
use crate::frame::{Color, ColorValue, Frame, FrameKind};

#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub date: NaiveDate,
    pub amount: f64,
    pub payment_type: Option<String>,
    pub expense_type: Option<String>,
    pub rcpt: Option<String>,
    pub bus: Option<String>,
    pub description: Option<String>,
    pub color: Option<ColorValue>,
}

fn parse_yyyymmdd(s: &str) -> Result<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedRecord("expense: date is not YYYYMMDD"));
    }
    let year: i32 = s[0..4].parse().map_err(|_| Error::MalformedRecord("expense: bad year"))?;
    let month: u32 = s[4..6].parse().map_err(|_| Error::MalformedRecord("expense: bad month"))?;
    let day: u32 = s[6..8].parse().map_err(|_| Error::MalformedRecord("expense: bad day"))?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::MalformedRecord("expense: date out of range"))
}

impl Expense {
    pub(crate) fn from_frames(frames: &[FrameKind]) -> Result<Self> {
        let color = frames.iter().find_map(FrameKind::as_color).map(Color::color);
        let fields = split_fields(&accumulate_text(frames));

        let date_str = field_at(&fields, 0).ok_or(Error::MalformedRecord("expense: missing date"))?;
        let date = parse_yyyymmdd(&date_str)?;
        let amount_str = field_at(&fields, 1).ok_or(Error::MalformedRecord("expense: missing amount"))?;
        let amount: f64 = amount_str.parse().map_err(|_| Error::MalformedRecord("expense: amount is not a number"))?;

        Ok(Self {
            date,
            amount,
            payment_type: field_at(&fields, 2),
            expense_type: field_at(&fields, 3),
            rcpt: field_at(&fields, 4),
            bus: field_at(&fields, 5),
            description: field_at(&fields, 6),
            color,
        })
    }

    pub(crate) fn to_frames(&self) -> Vec<Frame> {
        let mut frames = Vec::new();
        if let Some(color) = self.color {
            frames.push(Color::build(color).into_frame());
        }
        let date_str = self.date.format("%Y%m%d").to_string();
        let amount_str = self.amount.to_string();
        let text_fields = [
            Some(date_str.as_str()),
            Some(amount_str.as_str()),
            self.payment_type.as_deref(),
            self.expense_type.as_deref(),
            self.rcpt.as_deref(),
            self.bus.as_deref(),
            self.description.as_deref(),
        ];
        frames.extend(encode_fields(&text_fields).expect("expense fields fit the record text budget"));
        frames
    }
}
