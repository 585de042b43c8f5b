//! Day color & highlight frames: a per-day color plus highlight flag for an
//! entire month (31 days, byte 32 unused).

use std::collections::BTreeSet;

use super::{ColorValue, Frame};
use crate::error::{Error, Result};

const LENGTH: u8 = 0x20;
const TYPE: u8 = 0x78;
const ADDRESS: u16 = 0x0000;
const DAYS: usize = 31;
const HIGHLIGHT_BIT: u8 = 0x80;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayColorHighlight(Frame);

impl DayColorHighlight {
    pub fn matches(frame: &Frame) -> bool {
        frame.length() == LENGTH && frame.frame_type() == TYPE && frame.address() == ADDRESS
    }

    pub(crate) fn from_frame(frame: Frame) -> Self {
        Self(frame)
    }

    /// `colors[i]` is day `i+1`'s color; `days` is the set of highlighted
    /// days. The wire bytes are stored day-31-first (index 0 = day 31), so
    /// the logical array built here is reversed before framing.
    pub fn from_days_and_colors(days: &BTreeSet<u32>, colors: &[ColorValue]) -> Result<Self> {
        if colors.len() > DAYS {
            return Err(Error::MalformedRecord("day color highlight: too many colors"));
        }
        if days.iter().any(|&d| !(1..=31).contains(&d)) {
            return Err(Error::MalformedRecord("day color highlight: day out of range 1..=31"));
        }
        let mut data = [0u8; LENGTH as usize];
        for &day in days {
            data[(day - 1) as usize] |= HIGHLIGHT_BIT;
        }
        for (idx, &color) in colors.iter().enumerate() {
            data[idx] |= color as u8;
        }
        data.reverse();
        Ok(Self(Frame::new(TYPE, ADDRESS, data.to_vec())))
    }

    fn per_day(&self) -> impl Iterator<Item = (Option<ColorValue>, bool)> + '_ {
        self.0.data().iter().rev().take(DAYS).map(|&byte| {
            (ColorValue::from_code(byte & 0x7F), byte & HIGHLIGHT_BIT != 0)
        })
    }

    /// The set of days (1..=31) flagged as highlighted.
    pub fn days(&self) -> BTreeSet<u32> {
        self.per_day()
            .enumerate()
            .filter_map(|(idx, (_, highlighted))| highlighted.then(|| idx as u32 + 1))
            .collect()
    }

    /// Each of the 31 days' color, day 1 first. A day whose byte carries no
    /// recognized color bit (never assigned one by `from_days_and_colors`)
    /// falls back to `Blue`, matching the device's convention of treating
    /// zero as the default color rather than "no color".
    pub fn colors(&self) -> Vec<ColorValue> {
        self.per_day()
            .map(|(color, _)| color.unwrap_or(ColorValue::Blue))
            .collect()
    }

    pub fn frame(&self) -> &Frame {
        &self.0
    }

    pub fn into_frame(self) -> Frame {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_color_highlight_roundtrip() {
        let days: BTreeSet<u32> = [1, 15, 31].into_iter().collect();
        let colors = vec![ColorValue::Blue, ColorValue::Orange, ColorValue::Green];
        let frame = DayColorHighlight::from_days_and_colors(&days, &colors).unwrap();
        assert_eq!(frame.days(), days);
        assert_eq!(&frame.colors()[..3], &colors[..]);
    }
}
