//! Schedule entries: a dated appointment with an optional time range, alarm,
//! and icon.

use chrono::{NaiveDate, NaiveTime};

use super::accumulate_text;
use crate::error::{Error, Result};
use crate::frame::{Alarm, Color, ColorValue, Date, Frame, FrameKind, Illustration, StartEndTime, Text, Time};

#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub alarm_time: Option<NaiveTime>,
    pub illustration: Option<u8>,
    pub description: Option<String>,
    pub color: Option<ColorValue>,
}

impl Schedule {
    pub(crate) fn from_frames(frames: &[FrameKind]) -> Result<Self> {
        let mut date = None;
        let mut start_time = None;
        let mut end_time = None;
        let mut alarm_time = None;
        let mut illustration = None;
        let mut color = None;

        // `Time`/`StartEndTime` may both appear across frame revisions; the
        // one seen last in frame order wins.
        for f in frames {
            if let Some(d) = f.as_date() {
                date = d.date();
            } else if let Some(t) = f.as_start_end_time() {
                start_time = Some(t.start_time()?);
                end_time = Some(t.end_time()?);
            } else if let Some(t) = f.as_time() {
                start_time = Some(t.time()?);
                end_time = None;
            } else if let Some(a) = f.as_alarm() {
                alarm_time = Some(a.time()?);
            } else if let Some(i) = f.as_illustration() {
                illustration = Some(i.number());
            } else if let Some(c) = f.as_color() {
                color = Some(c.color());
            }
        }

        let date = date.ok_or(Error::MalformedRecord("schedule: missing date"))?;
        let description = {
            let text = accumulate_text(frames);
            (!text.is_empty()).then_some(text)
        };
        if start_time.is_none() && description.is_none() {
            return Err(Error::MalformedRecord("schedule: missing both start_time and description"));
        }

        Ok(Self {
            date,
            start_time,
            end_time,
            alarm_time,
            illustration,
            description,
            color,
        })
    }

    pub(crate) fn to_frames(&self) -> Vec<Frame> {
        let mut frames = vec![Date::from_date(self.date).expect("schedule date always encodes").into_frame()];

        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                frames.push(StartEndTime::build(start, end).expect("schedule start/end always encode").into_frame());
            }
            (Some(start), None) => {
                frames.push(Time::from_time(start).expect("schedule start always encodes").into_frame());
            }
            (None, _) => {}
        }
        if let Some(alarm) = self.alarm_time {
            frames.push(Alarm::from_time(alarm).expect("schedule alarm always encodes").into_frame());
        }
        if let Some(illustration) = self.illustration {
            frames.push(Illustration::build(illustration).into_frame());
        }
        if let Some(color) = self.color {
            frames.push(Color::build(color).into_frame());
        }
        if let Some(description) = &self.description {
            frames.extend(
                Text::from_text(description)
                    .expect("schedule description fits the record text budget")
                    .into_iter()
                    .map(Text::into_frame),
            );
        }
        frames
    }
}
