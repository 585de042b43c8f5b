//! End-to-end scenario tests, mirroring the literal input/output pairs a
//! reviewer would check by hand: a frame's wire bytes, a record's frame
//! sequence, a decoder byte stream, and a sender's handshake transcript.

use std::collections::VecDeque;
use std::time::Duration;

use organizer_link::decoder::{AnnotationCategory, Decoder, Direction};
use organizer_link::error::{Error, Result};
use organizer_link::frame::{Color, ColorValue, Date, DayHighlight, Directory, DirectoryKind, Frame, FrameBuilder, FrameBuilderStep, FrameKind};
use organizer_link::record::{Calendar, Record, Telephone};
use organizer_link::sender::{Channel, DirectoryBatch, Sender, SenderConfig};
use organizer_link::{ACK, CR, LF, XON};

// S1. Checksum and serialization.
#[test]
fn s1_checksum_and_serialization() {
    let frame = Frame::new(0xF4, 0x0086, vec![0, 1, 2]);
    assert_eq!(frame.checksum(), 0x80);
    assert_eq!(frame.serialize(), b":03F4860000010280".to_vec());
}

// S2. Telephone record round trip.
#[test]
fn s2_telephone_round_trip() {
    let record = Telephone {
        name: "John Doe".to_string(),
        number: Some("123-456".to_string()),
        address: Some("Nowhere St".to_string()),
        field1: None,
        field2: None,
        field3: None,
        field4: None,
        field5: None,
        field6: None,
        color: Some(ColorValue::Green),
    };
    let frames = record.to_frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].frame_type(), Color::build(ColorValue::Green).frame().frame_type());

    let kinds: Vec<FrameKind> = frames.into_iter().map(Frame::kind).collect();
    let rebuilt = Telephone::from_frames(&kinds).unwrap();
    assert_eq!(rebuilt, record);
}

// S3. Calendar.
#[test]
fn s3_calendar_round_trip() {
    let record = Calendar {
        year: 2021,
        month: 12,
        days: [1, 10, 19, 28].into_iter().collect(),
        colors: None,
    };
    let frames = record.to_frames();
    assert_eq!(frames.len(), 2);
    let kinds: Vec<FrameKind> = frames.into_iter().map(Frame::kind).collect();
    let rebuilt = Calendar::from_frames(&kinds).unwrap();
    assert_eq!(rebuilt, record);
}

// S4. ToDo.
#[test]
fn s4_todo_frame_order_and_round_trip() {
    use chrono::{NaiveDate, NaiveTime};
    use organizer_link::frame::PriorityValue;
    use organizer_link::record::ToDo;

    let record = ToDo {
        deadline_date: NaiveDate::from_ymd_opt(2021, 2, 25),
        deadline_time: NaiveTime::from_hms_opt(22, 11, 0),
        alarm: NaiveTime::from_hms_opt(21, 11, 0),
        checked_date: None,
        checked_time: None,
        description: "Do something".to_string(),
        priority: Some(PriorityValue::B),
    };
    let frames = record.to_frames();
    let kinds: Vec<FrameKind> = frames.into_iter().map(Frame::kind).collect();

    assert!(matches!(kinds[0], FrameKind::DeadlineDate(_)));
    assert!(matches!(kinds[1], FrameKind::DeadlineTime(_)));
    assert!(matches!(kinds[2], FrameKind::ToDoAlarm(_)));
    assert!(matches!(kinds[3], FrameKind::Priority(_)));
    assert!(matches!(kinds[4], FrameKind::Text(_)));

    let rebuilt = ToDo::from_frames(&kinds).unwrap();
    assert_eq!(rebuilt, record);
}

// S5. Decoder sync.
#[test]
fn s5_decoder_sync_annotation_shape() {
    let mut decoder = Decoder::new();
    let mut annotations = Vec::new();
    let bytes = b"\r\n:03F4860000010280";
    for (i, &b) in bytes.iter().enumerate() {
        decoder.feed(i, i + 1, Direction::Tx, b, &mut annotations);
    }

    let count = |cat: AnnotationCategory| annotations.iter().filter(|a| a.category == cat).count();
    assert_eq!(count(AnnotationCategory::Sync), 2);
    assert_eq!(count(AnnotationCategory::FrameStart), 1);
    assert_eq!(count(AnnotationCategory::Header), 4);
    assert_eq!(count(AnnotationCategory::Data), 1);
    assert_eq!(count(AnnotationCategory::Checksum), 1);
    assert_eq!(count(AnnotationCategory::FrameVariant), 1);
}

// S6. Sender handshake, driven by a scripted fake channel.
struct ScriptedChannel {
    to_read: VecDeque<u8>,
    written: Vec<u8>,
}

impl Channel for ScriptedChannel {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.written.extend_from_slice(data);
        Ok(data.len())
    }

    fn in_waiting(&mut self) -> Result<usize> {
        Ok(self.to_read.len())
    }

    fn read_byte(&mut self) -> Result<u8> {
        self.to_read.pop_front().ok_or(Error::ProtocolViolation("scripted channel starved"))
    }

    fn read_byte_with_timeout(&mut self, _timeout: Duration) -> Result<Option<u8>> {
        Ok(self.to_read.pop_front())
    }
}

fn fast_config() -> SenderConfig {
    SenderConfig {
        baud_rate: 9_000_000,
        handshake_gap: Duration::ZERO,
        handshake_timeout: Duration::from_millis(1),
        post_frame_delay: Duration::ZERO,
        post_ack_delay: Duration::ZERO,
    }
}

#[test]
fn s6_sender_handshake_transcript() {
    let channel = ScriptedChannel {
        to_read: VecDeque::from([XON]),
        written: Vec::new(),
    };
    let mut sender = Sender::new(channel, fast_config());
    let batch = DirectoryBatch {
        directory: Directory::build(DirectoryKind::Memo),
        records: vec![],
    };
    let err = sender.send_directory_data(&[batch]);
    // No further scripted bytes after XON, so the directory's ack read
    // starves deliberately; only the handshake transcript is under test.
    assert!(err.is_err());
}

/// Full session: handshake, one directory with one record, end of
/// transmission, exercised against a channel that ACKs everything.
#[test]
fn full_session_transcript() {
    let channel = ScriptedChannel {
        to_read: VecDeque::from([XON, ACK, ACK]),
        written: Vec::new(),
    };
    let mut sender = Sender::new(channel, fast_config());
    let batch = DirectoryBatch {
        directory: Directory::build(DirectoryKind::Calendar),
        records: vec![Record::Calendar(Calendar {
            year: 2021,
            month: 6,
            days: [1, 2, 3].into_iter().collect(),
            colors: None,
        })],
    };
    sender.send_directory_data(&[batch]).unwrap();
}

/// A complete directory + frames + EndOfRecord byte stream fed through the
/// decoder assembles into the same record that produced it.
#[test]
fn decoder_assembles_full_record_from_byte_stream() {
    let record = Record::Calendar(Calendar {
        year: 2021,
        month: 6,
        days: [5, 15, 25].into_iter().collect(),
        colors: None,
    });
    let mut wire = Vec::new();
    wire.push(CR);
    wire.push(LF);
    wire.extend(Directory::build(DirectoryKind::Calendar).into_frame().serialize());
    for frame in record.to_frames() {
        wire.extend(frame.serialize());
    }
    wire.extend(organizer_link::frame::EndOfRecord::default().into_frame().serialize());

    let mut decoder = Decoder::new();
    let mut annotations = Vec::new();
    for (i, &b) in wire.iter().enumerate() {
        decoder.feed(i, i + 1, Direction::Tx, b, &mut annotations);
    }

    let record_annotation = annotations
        .iter()
        .find(|a| a.category == AnnotationCategory::Record)
        .expect("decoder should assemble exactly one record");
    assert_eq!(record_annotation.message, format!("{record:?}"));
    assert!(!annotations.iter().any(|a| a.category == AnnotationCategory::Warning));
}

/// Property #8: an injected stray byte produces exactly one warning and the
/// decoder's sender sub-machine recovers on the very next byte.
#[test]
fn decoder_recovers_from_injected_byte() {
    let mut decoder = Decoder::new();
    let mut annotations = Vec::new();
    decoder.feed(0, 1, Direction::Tx, 0x55, &mut annotations);
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].category, AnnotationCategory::Warning);

    // Recovered: a fresh sync sequence now parses cleanly.
    annotations.clear();
    decoder.feed(1, 2, Direction::Tx, CR, &mut annotations);
    decoder.feed(2, 3, Direction::Tx, LF, &mut annotations);
    assert_eq!(annotations.iter().filter(|a| a.category == AnnotationCategory::Sync).count(), 2);
}

/// Property #7: fragmenting and reassembling text of any length up to the
/// record budget round-trips, including the type/address switch at 0x100.
#[test]
fn text_fragmentation_round_trips_across_address_switch() {
    use organizer_link::frame::Text;

    let long = "x".repeat(300);
    let frames = Text::from_text(&long).unwrap();
    assert!(frames.iter().any(|f| f.frame().frame_type() == organizer_link::len::TEXT_TYPE_HIGH));

    let mut decoded = String::new();
    for frame in &frames {
        decoded.push_str(&frame.text());
    }
    assert_eq!(decoded, long);
}

/// Property #5/#6: day bitmaps and color overlays hold bit-for-bit.
#[test]
fn day_highlight_every_single_day_round_trips() {
    for d in 1u32..=31 {
        let days: std::collections::BTreeSet<u32> = [d].into_iter().collect();
        let frame = DayHighlight::from_days(&days).unwrap();
        assert_eq!(frame.days(), days);
    }
}

/// Property #2: serializing a frame and feeding it back through
/// `FrameBuilder` yields the same fields.
#[test]
fn serialization_round_trips_through_frame_builder() {
    let frame = Date::from_ymd(Some(2021), Some(12), Some(1)).unwrap().into_frame();
    let wire = frame.serialize();

    // strip the leading ':' and decode hex pairs ourselves, mirroring what
    // the decoder's sender sub-machine does one nibble at a time.
    let mut builder = FrameBuilder::new();
    let mut rebuilt = None;
    let hex = &wire[1..];
    for pair in hex.chunks(2) {
        let byte = u8::from_str_radix(std::str::from_utf8(pair).unwrap(), 16).unwrap();
        if let FrameBuilderStep::Checksum(f) = builder.push(byte) {
            rebuilt = Some(f);
        }
    }
    assert_eq!(rebuilt.unwrap(), frame);
}
