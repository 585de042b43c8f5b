//! Text frames: device-encoded string material, split across one or more
//! frames with contiguously increasing addresses.
//!
//! A record's text fields are joined with a unit separator and wrapped into
//! frames of at most 128 bytes each; the wrap never splits a `char` (the
//! device charset is pure single-codepoint ASCII, so `char` boundaries are
//! grapheme boundaries here) and never strips whitespace. Lines that are not
//! the field's last line get a trailing newline byte baked onto every chunk
//! of that line, reproducing how frames concatenate back into the original
//! text on decode.

use super::{decode_text, encode_text, Frame};
use crate::char_map::DecodedChar;
use crate::error::{Error, Result};
use crate::len;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text(Frame);

impl Text {
    pub fn matches(frame: &Frame) -> bool {
        frame.frame_type() == len::TEXT_TYPE_LOW || frame.frame_type() == len::TEXT_TYPE_HIGH
    }

    pub(crate) fn from_frame(frame: Frame) -> Self {
        Self(frame)
    }

    /// This frame's own chunk of decoded text (not the whole field — callers
    /// reconstructing a record's fields concatenate consecutive `Text`
    /// frames themselves, see [`crate::record`]).
    pub fn text(&self) -> String {
        decode_text(self.0.data())
    }

    pub fn frame(&self) -> &Frame {
        &self.0
    }

    pub fn into_frame(self) -> Frame {
        self.0
    }

    /// Splits `text` into one or more `Text` frames.
    pub fn from_text(text: &str) -> Result<Vec<Text>> {
        Self::from_text_list(&[text])
    }

    /// Splits an ordered list of logical string fields into `Text` frames,
    /// joining non-last fields with a trailing unit separator before
    /// wrapping.
    pub fn from_text_list(fields: &[&str]) -> Result<Vec<Text>> {
        let total: usize = fields.iter().map(|s| s.chars().count()).sum();
        if total > len::RECORD_TEXT_MAX {
            return Err(Error::RecordTooLong {
                len: total,
                max: len::RECORD_TEXT_MAX,
            });
        }

        let mut frames = Vec::new();
        let mut address: u32 = 0;
        let field_count = fields.len();
        for (idx, field) in fields.iter().enumerate() {
            let mut text = (*field).to_string();
            if idx + 1 != field_count {
                text.push(DecodedChar::UNIT_SEPARATOR);
            }
            address = chunk_field(&text, address, &mut frames)?;
        }
        Ok(frames)
    }
}

fn chunk_field(text: &str, mut address: u32, frames: &mut Vec<Text>) -> Result<u32> {
    let lines: Vec<&str> = text.split('\n').collect();
    let last_line_idx = lines.len() - 1;
    for (line_idx, line) in lines.iter().enumerate() {
        let line_is_last = line_idx == last_line_idx;
        let chunks = wrap_preserving_whitespace(line, len::TEXT_CHUNK_MAX);
        for chunk in chunks.iter().take(len::TEXT_CHUNKS_PER_LINE_MAX) {
            let mut data = encode_text(chunk)?;
            if !line_is_last {
                data.push(0x0D);
            }
            let length = data.len() as u32;
            let (frame_type, frame_address) = text_type_and_address(address);
            frames.push(Text(Frame::new(frame_type, frame_address, data)));
            address += length;
        }
    }
    Ok(address)
}

fn text_type_and_address(address: u32) -> (u8, u16) {
    let threshold = len::TEXT_HIGH_ADDRESS_THRESHOLD as u32;
    if address >= threshold {
        (len::TEXT_TYPE_HIGH, (address % threshold) as u16)
    } else {
        (len::TEXT_TYPE_LOW, address as u16)
    }
}

/// Word-wraps `line` to at most `width` `char`s per chunk, preserving
/// whitespace and never splitting inside a word unless the word alone
/// exceeds `width`.
fn wrap_preserving_whitespace(line: &str, width: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }
    let chars: Vec<char> = line.chars().collect();
    let mut chunks = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        let mut end = (pos + width).min(chars.len());
        if end < chars.len() {
            if let Some(ws) = (pos..end).rev().find(|&i| chars[i].is_whitespace()) {
                end = ws + 1;
            }
        }
        chunks.push(chars[pos..end].iter().collect());
        pos = end;
    }
    chunks
}
