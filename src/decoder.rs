//! Decoder state machine: consumes a captured UART byte stream one byte at a
//! time and emits annotations describing sync events, frame pieces, typed
//! frames, and assembled records.
//!
//! Three layers run side by side: a stateless receiver sub-machine
//! classifies control bytes (XON/XOFF/ACK/NACK); a sender sub-machine walks
//! sync -> frame header -> data -> checksum and hands completed frames to
//! the record aggregator, which groups them by `Directory`/`EndOfRecord`
//! boundaries. The decoder never stops on malformed input — every anomaly
//! is logged and annotated, and the state machine recovers on the next byte.

use serde::Serialize;

use crate::frame::{Frame, FrameBuilder, FrameBuilderStep, FrameKind};
use crate::logging::LOG_PREFIX;
use crate::record::Record;
use crate::{CR, LF};

/// Which side of the wire a decoded byte came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// The organizer (or a tool emulating it), driving the sender state
    /// machine: sync bytes, frame bytes.
    Tx,
    /// The host, driving the receiver state machine: XON/XOFF/ACK/NACK.
    Rx,
}

/// What kind of decoder event an [`Annotation`] describes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum AnnotationCategory {
    /// Half of the `CR LF` handshake sync sequence.
    Sync,
    /// The `:` byte that opens a frame.
    FrameStart,
    /// One header field (`length`, `type`, `addr_lo`, `addr_hi`).
    Header,
    /// The frame's data region, coalesced into a single span.
    Data,
    /// The frame's checksum byte.
    Checksum,
    /// A fully recognized frame, spanning its whole wire encoding.
    FrameVariant,
    /// A completed logical record.
    Record,
    /// A receiver control byte (XON/XOFF/ACK/NACK).
    ReceiverControl,
    /// A recoverable anomaly: bad checksum, unknown frame, unknown record,
    /// or an unexpected byte.
    Warning,
}

/// One decoder emission: a byte range tagged with what it means. Serializes
/// to JSON directly, for hosts that want the annotation stream as data
/// rather than rendered inline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub sample_start: usize,
    pub sample_end: usize,
    pub category: AnnotationCategory,
    pub message: String,
}

/// Sink for decoder emissions. The analyzer host this spec doesn't model
/// implements this to collect or render annotations as they're produced.
pub trait AnnotationSink {
    fn emit(&mut self, annotation: Annotation);
}

impl AnnotationSink for Vec<Annotation> {
    fn emit(&mut self, annotation: Annotation) {
        self.push(annotation);
    }
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

/// The sender sub-machine's state.
enum SenderState {
    AwaitSync1OrFrameStart,
    AwaitSync2,
    InFrame {
        builder: FrameBuilder,
        frame_start: usize,
        pending_nibble: Option<(u8, usize)>,
        data_span: Option<(usize, usize)>,
    },
}

/// The record aggregator's state.
enum AggregatorState {
    AwaitDirectoryOrFrame,
    AwaitStart,
    InFrames,
}

/// Consumes one tagged byte at a time; all state is local, so a single
/// instance drives one decode pass start to finish.
pub struct Decoder {
    sender_state: SenderState,
    aggregator_state: AggregatorState,
    directory_kind: Option<crate::frame::DirectoryKind>,
    group_start: usize,
    group_frames: Vec<FrameKind>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            sender_state: SenderState::AwaitSync1OrFrameStart,
            aggregator_state: AggregatorState::AwaitDirectoryOrFrame,
            directory_kind: None,
            group_start: 0,
            group_frames: Vec::new(),
        }
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one byte, tagged with its sample span and direction, into the
    /// decoder, emitting zero or more annotations to `sink`.
    pub fn feed(&mut self, sample_start: usize, sample_end: usize, direction: Direction, byte: u8, sink: &mut impl AnnotationSink) {
        match direction {
            Direction::Rx => self.feed_rx(sample_start, sample_end, byte, sink),
            Direction::Tx => self.feed_tx(sample_start, sample_end, byte, sink),
        }
    }

    fn feed_rx(&mut self, sample_start: usize, sample_end: usize, byte: u8, sink: &mut impl AnnotationSink) {
        let label = match byte {
            crate::XON => Some("XON"),
            crate::XOFF => Some("XOFF"),
            crate::ACK => Some("ACK"),
            crate::NACK => Some("NACK"),
            _ => None,
        };
        match label {
            Some(label) => {
                log::trace!("{LOG_PREFIX}: receiver byte {label}");
                sink.emit(Annotation {
                    sample_start,
                    sample_end,
                    category: AnnotationCategory::ReceiverControl,
                    message: label.to_string(),
                });
            }
            None => {
                log::warn!("{LOG_PREFIX}: unexpected receiver byte {byte:#04x}");
                sink.emit(Annotation {
                    sample_start,
                    sample_end,
                    category: AnnotationCategory::Warning,
                    message: format!("unexpected receiver byte {byte:#04x}"),
                });
            }
        }
    }

    fn feed_tx(&mut self, sample_start: usize, sample_end: usize, byte: u8, sink: &mut impl AnnotationSink) {
        match &mut self.sender_state {
            SenderState::AwaitSync1OrFrameStart => {
                if byte == CR {
                    sink.emit(Annotation {
                        sample_start,
                        sample_end,
                        category: AnnotationCategory::Sync,
                        message: "sync 1/2".to_string(),
                    });
                    self.sender_state = SenderState::AwaitSync2;
                } else if byte == crate::FRAME_START {
                    sink.emit(Annotation {
                        sample_start,
                        sample_end,
                        category: AnnotationCategory::FrameStart,
                        message: "frame start".to_string(),
                    });
                    self.sender_state = SenderState::InFrame {
                        builder: FrameBuilder::new(),
                        frame_start: sample_start,
                        pending_nibble: None,
                        data_span: None,
                    };
                } else {
                    log::warn!("{LOG_PREFIX}: unexpected byte {byte:#04x} in AwaitSync1OrFrameStart");
                    sink.emit(Annotation {
                        sample_start,
                        sample_end,
                        category: AnnotationCategory::Warning,
                        message: format!("unexpected byte {byte:#04x} while awaiting sync or frame start"),
                    });
                }
            }
            SenderState::AwaitSync2 => {
                if byte == LF {
                    sink.emit(Annotation {
                        sample_start,
                        sample_end,
                        category: AnnotationCategory::Sync,
                        message: "sync 2/2".to_string(),
                    });
                } else {
                    log::warn!("{LOG_PREFIX}: expected LF to close sync, got {byte:#04x}");
                    sink.emit(Annotation {
                        sample_start,
                        sample_end,
                        category: AnnotationCategory::Warning,
                        message: format!("expected LF to close sync, got {byte:#04x}"),
                    });
                }
                self.sender_state = SenderState::AwaitSync1OrFrameStart;
            }
            SenderState::InFrame { .. } => self.feed_frame_byte(sample_start, sample_end, byte, sink),
        }
    }

    fn feed_frame_byte(&mut self, sample_start: usize, sample_end: usize, byte: u8, sink: &mut impl AnnotationSink) {
        let Some(digit) = hex_digit(byte) else {
            log::warn!("{LOG_PREFIX}: non-hex byte {byte:#04x} inside frame, abandoning frame");
            sink.emit(Annotation {
                sample_start,
                sample_end,
                category: AnnotationCategory::Warning,
                message: format!("non-hex byte {byte:#04x} inside frame"),
            });
            self.sender_state = SenderState::AwaitSync1OrFrameStart;
            return;
        };

        let SenderState::InFrame { pending_nibble, .. } = &mut self.sender_state else {
            unreachable!("feed_frame_byte called outside InFrame")
        };

        let Some((high, nibble_start)) = *pending_nibble else {
            *pending_nibble = Some((digit, sample_start));
            return;
        };
        *pending_nibble = None;
        let value = (high << 4) | digit;
        self.push_frame_byte(nibble_start, sample_end, value, sink);
    }

    fn push_frame_byte(&mut self, byte_start: usize, byte_end: usize, value: u8, sink: &mut impl AnnotationSink) {
        let SenderState::InFrame {
            builder,
            frame_start,
            data_span,
            ..
        } = &mut self.sender_state
        else {
            unreachable!("push_frame_byte called outside InFrame")
        };
        let frame_start = *frame_start;
        let step = builder.push(value);

        match step {
            FrameBuilderStep::Length => sink.emit(header_annotation(byte_start, byte_end, "length")),
            FrameBuilderStep::Type => sink.emit(header_annotation(byte_start, byte_end, "type")),
            FrameBuilderStep::AddressLow => sink.emit(header_annotation(byte_start, byte_end, "address low")),
            FrameBuilderStep::AddressHigh => sink.emit(header_annotation(byte_start, byte_end, "address high")),
            FrameBuilderStep::Data => {
                *data_span = Some(match *data_span {
                    Some((start, _)) => (start, byte_end),
                    None => (byte_start, byte_end),
                });
            }
            FrameBuilderStep::Checksum(frame) => {
                if let Some((start, end)) = data_span.take() {
                    sink.emit(Annotation {
                        sample_start: start,
                        sample_end: end,
                        category: AnnotationCategory::Data,
                        message: "data".to_string(),
                    });
                }
                sink.emit(Annotation {
                    sample_start: byte_start,
                    sample_end: byte_end,
                    category: AnnotationCategory::Checksum,
                    message: "checksum".to_string(),
                });
                self.sender_state = SenderState::AwaitSync1OrFrameStart;
                self.finish_frame(frame, frame_start, byte_end, sink);
            }
        }
    }

    fn finish_frame(&mut self, frame: Frame, frame_start: usize, frame_end: usize, sink: &mut impl AnnotationSink) {
        if !frame.verify_checksum() {
            log::warn!("{LOG_PREFIX}: bad checksum on frame at sample {frame_start}");
            sink.emit(Annotation {
                sample_start: frame_start,
                sample_end: frame_end,
                category: AnnotationCategory::Warning,
                message: "bad checksum".to_string(),
            });
        }

        let kind = frame.kind();
        if let FrameKind::Unknown(_) = &kind {
            log::warn!("{LOG_PREFIX}: unrecognized frame at sample {frame_start}");
            sink.emit(Annotation {
                sample_start: frame_start,
                sample_end: frame_end,
                category: AnnotationCategory::Warning,
                message: "unknown frame".to_string(),
            });
        } else {
            log::debug!("{LOG_PREFIX}: recognized frame at sample {frame_start}");
            sink.emit(Annotation {
                sample_start: frame_start,
                sample_end: frame_end,
                category: AnnotationCategory::FrameVariant,
                message: format!("{kind:?}"),
            });
        }

        self.aggregate(kind, frame_start, frame_end, sink);
    }

    /// Groups recognized frames by `Directory`/`EndOfRecord` boundaries. A
    /// record group that doesn't open with a `Directory` frame is treated as
    /// an unknown record rather than a protocol error — the reference
    /// decoder falls through the same way rather than raising.
    fn aggregate(&mut self, kind: FrameKind, frame_start: usize, frame_end: usize, sink: &mut impl AnnotationSink) {
        match self.aggregator_state {
            AggregatorState::AwaitDirectoryOrFrame => {
                if let Some(directory_kind) = kind.as_directory_kind() {
                    self.directory_kind = Some(directory_kind);
                    self.aggregator_state = AggregatorState::AwaitStart;
                } else {
                    self.directory_kind = None;
                    self.group_start = frame_start;
                    self.group_frames.clear();
                    self.group_frames.push(kind);
                    self.aggregator_state = AggregatorState::InFrames;
                }
            }
            AggregatorState::AwaitStart => {
                self.group_start = frame_start;
                self.group_frames.clear();
                self.group_frames.push(kind);
                self.aggregator_state = AggregatorState::InFrames;
            }
            AggregatorState::InFrames => {
                if let FrameKind::EndOfRecord(_) = &kind {
                    self.close_group(frame_end, sink);
                } else {
                    self.group_frames.push(kind);
                }
            }
        }
    }

    fn close_group(&mut self, frame_end: usize, sink: &mut impl AnnotationSink) {
        let directory_kind = self.directory_kind.unwrap_or(crate::frame::DirectoryKind::Generic);
        match Record::from_frames(directory_kind, &self.group_frames) {
            Ok(record) => {
                log::debug!("{LOG_PREFIX}: assembled record at sample {}", self.group_start);
                sink.emit(Annotation {
                    sample_start: self.group_start,
                    sample_end: frame_end,
                    category: AnnotationCategory::Record,
                    message: format!("{record:?}"),
                });
            }
            Err(err) => {
                log::warn!("{LOG_PREFIX}: unknown record: {err}");
                sink.emit(Annotation {
                    sample_start: self.group_start,
                    sample_end: frame_end,
                    category: AnnotationCategory::Warning,
                    message: format!("unknown record: {err}"),
                });
            }
        }
        self.aggregator_state = AggregatorState::AwaitDirectoryOrFrame;
        self.directory_kind = None;
        self.group_frames.clear();
    }
}

fn header_annotation(sample_start: usize, sample_end: usize, field: &str) -> Annotation {
    Annotation {
        sample_start,
        sample_end,
        category: AnnotationCategory::Header,
        message: field.to_string(),
    }
}
