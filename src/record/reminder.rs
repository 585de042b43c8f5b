//! Recurring reminder entries: an optional month/day, an optional alarm, and
//! a required description.

use chrono::NaiveTime;

use super::accumulate_text;
use crate::error::{Error, Result};
use crate::frame::{Alarm, Color, ColorValue, Date, Frame, FrameKind, Text};

#[derive(Clone, Debug, PartialEq)]
pub struct Reminder {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub alarm_time: Option<NaiveTime>,
    pub description: String,
    pub color: Option<ColorValue>,
}

impl Reminder {
    pub(crate) fn from_frames(frames: &[FrameKind]) -> Result<Self> {
        let mut year = None;
        let mut month = None;
        let mut day = None;
        let mut alarm_time = None;
        let mut color = None;

        for f in frames {
            if let Some(d) = f.as_date() {
                year = d.year();
                month = d.month();
                day = d.day();
            } else if let Some(a) = f.as_alarm() {
                alarm_time = Some(a.time()?);
            } else if let Some(c) = f.as_color() {
                color = Some(c.color());
            }
        }

        let description = accumulate_text(frames);
        if description.is_empty() {
            return Err(Error::MalformedRecord("reminder: missing description"));
        }

        Ok(Self {
            year,
            month,
            day,
            alarm_time,
            description,
            color,
        })
    }

    pub(crate) fn to_frames(&self) -> Vec<Frame> {
        let mut frames = vec![
            Date::from_ymd(self.year, self.month, self.day)
                .expect("reminder date always encodes")
                .into_frame(),
        ];
        if let Some(alarm) = self.alarm_time {
            frames.push(Alarm::from_time(alarm).expect("reminder alarm always encodes").into_frame());
        }
        frames.extend(
            Text::from_text(&self.description)
                .expect("reminder description fits the record text budget")
                .into_iter()
                .map(Text::into_frame),
        );
        if let Some(color) = self.color {
            frames.push(Color::build(color).into_frame());
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame as WireFrame;

    fn kinds(record: &Reminder) -> Vec<FrameKind> {
        record.to_frames().into_iter().map(WireFrame::kind).collect()
    }

    #[test]
    fn test_reminder_round_trip() {
        let record = Reminder {
            year: None,
            month: Some(3),
            day: Some(14),
            alarm_time: Some(NaiveTime::from_hms_opt(7, 30, 0).unwrap()),
            description: "Pi day".to_string(),
            color: Some(ColorValue::Green),
        };
        let rebuilt = Reminder::from_frames(&kinds(&record)).unwrap();
        assert_eq!(rebuilt, record);
    }

    #[test]
    fn test_reminder_missing_description() {
        let record = Reminder {
            year: None,
            month: None,
            day: None,
            alarm_time: None,
            description: String::new(),
            color: None,
        };
        let err = Reminder::from_frames(&record.to_frames().into_iter().map(WireFrame::kind).collect::<Vec<_>>())
            .unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }
}
