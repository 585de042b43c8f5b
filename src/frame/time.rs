//! Time frames: ASCII `HH:MM`, and the combined `HH:MM~HH:MM` start/end pair.

use chrono::NaiveTime;

use super::{decode_text, encode_text, Frame};
use crate::error::{Error, Result};

const LENGTH: u8 = 0x5;
const ADDRESS: u16 = 0x0000;

fn parse_hhmm(text: &str) -> Result<NaiveTime> {
    let (hour, minute) = text
        .split_once(':')
        .ok_or(Error::MalformedRecord("time frame missing ':'"))?;
    let hour: u32 = hour
        .parse()
        .map_err(|_| Error::MalformedRecord("time frame hour is not a number"))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| Error::MalformedRecord("time frame minute is not a number"))?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(Error::MalformedRecord("time frame out of range"))
}

macro_rules! time_frame {
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

            pub fn from_time(time: NaiveTime) -> Result<Self> {
                use chrono::Timelike;
                let text = format!("{:02}:{:02}", time.hour(), time.minute());
                Ok(Self(Frame::new($type, ADDRESS, encode_text(&text)?)))
            }

            pub fn time(&self) -> Result<NaiveTime> {
                parse_hhmm(&decode_text(self.0.data()))
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

time_frame!(Time, 0xE0);
time_frame!(DeadlineTime, 0xE4);
time_frame!(ToDoAlarm, 0xC4);
time_frame!(Alarm, 0xC0);

const START_END_LENGTH: u8 = 0xB;
const START_END_TYPE: u8 = 0xE0;

/// A combined start/end time, e.g. for a `Schedule` entry with both ends
/// known. Shares its type code with [`Time`] but is disjoint on length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartEndTime(Frame);

impl StartEndTime {
    pub fn matches(frame: &Frame) -> bool {
        frame.length() == START_END_LENGTH && frame.frame_type() == START_END_TYPE && frame.address() == ADDRESS
    }

    pub(crate) fn from_frame(frame: Frame) -> Self {
        Self(frame)
    }

    pub fn build(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        use chrono::Timelike;
        let text = format!(
            "{:02}:{:02}~{:02}:{:02}",
            start.hour(),
            start.minute(),
            end.hour(),
            end.minute()
        );
        Ok(Self(Frame::new(START_END_TYPE, ADDRESS, encode_text(&text)?)))
    }

    pub fn start_time(&self) -> Result<NaiveTime> {
        Ok(self.split()?.0)
    }

    pub fn end_time(&self) -> Result<NaiveTime> {
        Ok(self.split()?.1)
    }

    fn split(&self) -> Result<(NaiveTime, NaiveTime)> {
        let text = decode_text(self.0.data());
        let (start, end) = text
            .split_once('~')
            .ok_or(Error::MalformedRecord("start/end time frame missing '~'"))?;
        Ok((parse_hhmm(start)?, parse_hhmm(end)?))
    }

    pub fn frame(&self) -> &Frame {
        &self.0
    }

    pub fn into_frame(self) -> Frame {
        self.0
    }
}
