//! Monthly calendar entries: a day-highlight bitmap plus an optional
//! per-day color overlay.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::frame::{ColorValue, Date, DayColorHighlight, DayHighlight, Frame, FrameKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calendar {
    pub year: i32,
    pub month: u32,
    pub days: BTreeSet<u32>,
    pub colors: Option<Vec<ColorValue>>,
}

impl Calendar {
    pub(crate) fn from_frames(frames: &[FrameKind]) -> Result<Self> {
        let date = frames
            .iter()
            .find_map(FrameKind::as_date)
            .ok_or(Error::MalformedRecord("calendar: missing date frame"))?;
        let year = date.year().ok_or(Error::MalformedRecord("calendar: missing year"))?;
        let month = date.month().ok_or(Error::MalformedRecord("calendar: missing month"))?;

        let mut days = BTreeSet::new();
        let mut colors = None;
        for f in frames {
            if let Some(highlight) = f.as_day_highlight() {
                days.extend(highlight.days());
            }
            if let Some(highlight) = f.as_day_color_highlight() {
                days.extend(highlight.days());
                colors = Some(highlight.colors());
            }
        }

        Ok(Self { year, month, days, colors })
    }

    pub(crate) fn to_frames(&self) -> Vec<Frame> {
        let mut frames = vec![
            Date::from_ymd(Some(self.year), Some(self.month), Some(1))
                .expect("calendar year/month always encode")
                .into_frame(),
            DayHighlight::from_days(&self.days)
                .expect("calendar days are always 1..=31")
                .into_frame(),
        ];
        if let Some(colors) = &self.colors {
            frames.push(
                DayColorHighlight::from_days_and_colors(&self.days, colors)
                    .expect("calendar colors are always 1..=31")
                    .into_frame(),
            );
        }
        frames
    }
}
