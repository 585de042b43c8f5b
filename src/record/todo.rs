//! To-do entries: an optional deadline, an optional checked-off date, a
//! required description, and an optional priority.

use chrono::{NaiveDate, NaiveTime};

use super::accumulate_text;
use crate::error::{Error, Result};
use crate::frame::{Date, DeadlineDate, DeadlineTime, Frame, FrameKind, Priority, PriorityValue, Text, ToDoAlarm};

#[derive(Clone, Debug, PartialEq)]
pub struct ToDo {
    pub deadline_date: Option<NaiveDate>,
    pub deadline_time: Option<NaiveTime>,
    pub alarm: Option<NaiveTime>,
    pub checked_date: Option<NaiveDate>,
    pub checked_time: Option<NaiveTime>,
    pub description: String,
    pub priority: Option<PriorityValue>,
}

impl ToDo {
    pub(crate) fn from_frames(frames: &[FrameKind]) -> Result<Self> {
        let mut deadline_date = None;
        let mut deadline_time = None;
        let mut alarm = None;
        let mut checked_date = None;
        let mut checked_time = None;
        let mut priority = None;

        for f in frames {
            if let Some(d) = f.as_deadline_date() {
                deadline_date = d.date();
            } else if let Some(t) = f.as_deadline_time() {
                deadline_time = Some(t.time()?);
            } else if let Some(a) = f.as_todo_alarm() {
                alarm = Some(a.time()?);
            } else if let Some(d) = f.as_date() {
                checked_date = d.date();
            } else if let Some(t) = f.as_time() {
                checked_time = Some(t.time()?);
            } else if let Some(p) = f.as_priority() {
                priority = Some(p.priority());
            }
        }

        if (deadline_time.is_some() || alarm.is_some()) && deadline_date.is_none() {
            return Err(Error::MalformedRecord("to-do: deadline_time/alarm require deadline_date"));
        }
        if checked_time.is_some() && (checked_date.is_none() || deadline_date.is_none()) {
            return Err(Error::MalformedRecord("to-do: checked_time requires checked_date and deadline_date"));
        }

        let description = accumulate_text(frames);
        if description.is_empty() {
            return Err(Error::MalformedRecord("to-do: missing description"));
        }

        Ok(Self {
            deadline_date,
            deadline_time,
            alarm,
            checked_date,
            checked_time,
            description,
            priority,
        })
    }

    pub(crate) fn to_frames(&self) -> Vec<Frame> {
        let mut frames = Vec::new();
        if let Some(date) = self.deadline_date {
            frames.push(DeadlineDate::from_date(date).expect("to-do deadline date always encodes").into_frame());
        }
        if let Some(time) = self.deadline_time {
            frames.push(DeadlineTime::from_time(time).expect("to-do deadline time always encodes").into_frame());
        }
        if let Some(alarm) = self.alarm {
            frames.push(ToDoAlarm::from_time(alarm).expect("to-do alarm always encodes").into_frame());
        }
        if let Some(date) = self.checked_date {
            frames.push(Date::from_date(date).expect("to-do checked date always encodes").into_frame());
        }
        if let Some(time) = self.checked_time {
            frames.push(crate::frame::Time::from_time(time).expect("to-do checked time always encodes").into_frame());
        }
        if let Some(priority) = self.priority {
            frames.push(Priority::build(priority).into_frame());
        }
        frames.extend(
            Text::from_text(&self.description)
                .expect("to-do description fits the record text budget")
                .into_iter()
                .map(Text::into_frame),
        );
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame as WireFrame;

    fn kinds(record: &ToDo) -> Vec<FrameKind> {
        record.to_frames().into_iter().map(WireFrame::kind).collect()
    }

    #[test]
    fn test_todo_round_trip() {
        let record = ToDo {
            deadline_date: NaiveDate::from_ymd_opt(2021, 2, 25),
            deadline_time: NaiveTime::from_hms_opt(22, 11, 0),
            alarm: NaiveTime::from_hms_opt(21, 11, 0),
            checked_date: None,
            checked_time: None,
            description: "Do something".to_string(),
            priority: Some(PriorityValue::B),
        };
        let rebuilt = ToDo::from_frames(&kinds(&record)).unwrap();
        assert_eq!(rebuilt, record);
    }

    #[test]
    fn test_todo_deadline_time_requires_deadline_date() {
        let record = ToDo {
            deadline_date: None,
            deadline_time: NaiveTime::from_hms_opt(12, 0, 0),
            alarm: None,
            checked_date: None,
            checked_time: None,
            description: "orphaned deadline time".to_string(),
            priority: None,
        };
        let err = ToDo::from_frames(&kinds(&record)).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_todo_checked_time_requires_both_dates() {
        let record = ToDo {
            deadline_date: None,
            deadline_time: None,
            alarm: None,
            checked_date: NaiveDate::from_ymd_opt(2021, 1, 1),
            checked_time: NaiveTime::from_hms_opt(8, 0, 0),
            description: "orphaned checked time".to_string(),
            priority: None,
        };
        let err = ToDo::from_frames(&kinds(&record)).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }
}
