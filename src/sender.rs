//! Sender state machine: drives a duplex byte channel through the
//! handshake, flow-controlled frame emission, and per-frame acknowledgement
//! that make up a transmission session.
//!
//! Unlike the decoder, any wire-level surprise here is fatal for the
//! session — there is no peer to recover from, only a device that expects
//! a well-formed transcript.

use std::collections::VecDeque;
use std::thread::sleep;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::frame::{Directory, EndOfRecord, EndOfTransmission, Frame};
use crate::logging::LOG_PREFIX;
use crate::record::Record;
use crate::{ACK, CR, LF, NACK, XOFF, XON};

/// An abstract duplex byte channel, matching the four primitives the sender
/// needs: a blocking (possibly short) write, a non-blocking pending-byte
/// count, a blocking single-byte read, and a single-byte read with an
/// out-of-band timeout.
pub trait Channel {
    /// Writes `data`, returning how many bytes were actually accepted. A
    /// short write (`< data.len()`) is the caller's signal to fail.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Bytes immediately available to read without blocking.
    fn in_waiting(&mut self) -> Result<usize>;

    /// Blocks until one byte is available.
    fn read_byte(&mut self) -> Result<u8>;

    /// Blocks up to `timeout` for one byte; `None` on timeout.
    fn read_byte_with_timeout(&mut self, timeout: Duration) -> Result<Option<u8>>;
}

/// Tunable timing, matching a typical organizer's serial link defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SenderConfig {
    /// Line rate, used only to derive the inter-byte pacing delay.
    pub baud_rate: u32,
    /// Delay between writing `CR` and `LF` during handshake.
    pub handshake_gap: Duration,
    /// How long to wait for `XON` after each handshake attempt.
    pub handshake_timeout: Duration,
    /// Settle delay after writing a full frame.
    pub post_frame_delay: Duration,
    /// Settle delay after receiving `ACK`.
    pub post_ack_delay: Duration,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            handshake_gap: Duration::from_millis(10),
            handshake_timeout: Duration::from_millis(200),
            post_frame_delay: Duration::from_millis(40),
            post_ack_delay: Duration::from_millis(30),
        }
    }
}

impl SenderConfig {
    /// ~10 bits' duration at the configured baud rate, giving the receiver
    /// time to assert `XOFF` between writes.
    fn inter_byte_delay(&self) -> Duration {
        Duration::from_secs_f64(9.0 / self.baud_rate as f64)
    }
}

/// One directory's worth of records to transmit, in emission order.
pub struct DirectoryBatch {
    pub directory: Directory,
    pub records: Vec<Record>,
}

/// Drives a [`Channel`] through a complete transmission session.
pub struct Sender<C: Channel> {
    channel: C,
    config: SenderConfig,
    /// Bytes seen while polling for `XOFF`/`XON` that were neither — these
    /// are acks/nacks that arrived early and belong to the next frame
    /// boundary, not the flow-control layer.
    pending: VecDeque<u8>,
}

impl<C: Channel> Sender<C> {
    pub fn new(channel: C, config: SenderConfig) -> Self {
        Self {
            channel,
            config,
            pending: VecDeque::new(),
        }
    }

    /// Sends every directory batch, then [`EndOfTransmission`], and
    /// terminates the session. No acknowledgement is expected for the final
    /// frame.
    pub fn send_directory_data(&mut self, batches: &[DirectoryBatch]) -> Result<()> {
        self.sync()?;
        for batch in batches {
            log::debug!("{LOG_PREFIX}: sending directory {:?}", batch.directory.kind());
            self.send_directory(&batch.directory)?;
            for record in &batch.records {
                self.send_record(record)?;
            }
        }
        self.send_frame(&EndOfTransmission::default().into_frame())?;
        log::debug!("{LOG_PREFIX}: transmission session complete");
        Ok(())
    }

    /// Repeats `CR`, 10ms gap, `LF`, wait up to `handshake_timeout` for
    /// `XON`, until the receiver answers or a non-`XON` byte arrives.
    fn sync(&mut self) -> Result<()> {
        loop {
            log::trace!("{LOG_PREFIX}: handshake: writing CR");
            self.write_raw(&[CR])?;
            sleep(self.config.handshake_gap);
            log::trace!("{LOG_PREFIX}: handshake: writing LF");
            self.write_raw(&[LF])?;
            match self.channel.read_byte_with_timeout(self.config.handshake_timeout)? {
                Some(XON) => {
                    log::debug!("{LOG_PREFIX}: handshake complete");
                    return Ok(());
                }
                Some(byte) => return Err(Error::unexpected_byte("handshake", byte)),
                None => {
                    log::trace!("{LOG_PREFIX}: handshake timed out, retrying");
                    continue;
                }
            }
        }
    }

    fn send_directory(&mut self, directory: &Directory) -> Result<()> {
        self.send_frame(&directory.clone().into_frame())?;
        self.wait_for_ack()
    }

    fn send_record(&mut self, record: &Record) -> Result<()> {
        for frame in record.to_frames() {
            self.send_frame(&frame)?;
        }
        self.send_frame(&EndOfRecord::default().into_frame())?;
        self.wait_for_ack()
    }

    fn send_frame(&mut self, frame: &Frame) -> Result<()> {
        self.write_flow_controlled(&frame.serialize())?;
        sleep(self.config.post_frame_delay);
        Ok(())
    }

    /// Writes `bytes` one at a time, pausing on `XOFF` and resuming on
    /// `XON`; any other byte seen while polling is stashed for the next
    /// acknowledgement read.
    fn write_flow_controlled(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.await_clear_to_send()?;
            self.write_raw(&[byte])?;
            sleep(self.config.inter_byte_delay());
        }
        Ok(())
    }

    fn await_clear_to_send(&mut self) -> Result<()> {
        let mut paused = false;
        loop {
            if !paused && self.channel.in_waiting()? == 0 {
                return Ok(());
            }
            let byte = self.channel.read_byte()?;
            match byte {
                XOFF => {
                    log::trace!("{LOG_PREFIX}: XOFF, pausing writes");
                    paused = true;
                }
                XON => {
                    log::trace!("{LOG_PREFIX}: XON, resuming writes");
                    return Ok(());
                }
                other => self.pending.push_back(other),
            }
        }
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        let written = self.channel.write(bytes)?;
        if written != bytes.len() {
            return Err(Error::ProtocolViolation("short write"));
        }
        Ok(())
    }

    fn wait_for_ack(&mut self) -> Result<()> {
        let byte = match self.pending.pop_front() {
            Some(byte) => byte,
            None => self.channel.read_byte()?,
        };
        match byte {
            ACK => {
                log::trace!("{LOG_PREFIX}: ACK");
                sleep(self.config.post_ack_delay);
                Ok(())
            }
            NACK => {
                log::warn!("{LOG_PREFIX}: NACK received, aborting session");
                Err(Error::ProtocolViolation("NACK received"))
            }
            other => Err(Error::unexpected_byte("acknowledgement", other)),
        }
    }
}

/// Adapts a real [`serialport::SerialPort`] to [`Channel`].
#[cfg(feature = "serial")]
pub struct SerialChannel {
    port: Box<dyn serialport::SerialPort>,
}

#[cfg(feature = "serial")]
impl SerialChannel {
    pub fn open(path: &str, config: &SenderConfig) -> Result<Self> {
        let port = serialport::new(path, config.baud_rate)
            .data_bits(serialport::DataBits::Seven)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .open()?;
        Ok(Self { port })
    }
}

#[cfg(feature = "serial")]
impl Channel for SerialChannel {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        use std::io::Write;
        Ok(self.port.write(data)?)
    }

    fn in_waiting(&mut self) -> Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn read_byte(&mut self) -> Result<u8> {
        use std::io::Read;
        let mut buf = [0u8; 1];
        self.port.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn read_byte_with_timeout(&mut self, timeout: Duration) -> Result<Option<u8>> {
        use std::io::Read;
        self.port.set_timeout(timeout)?;
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(err) if err.kind() == std::io::ErrorKind::TimedOut => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{ColorValue, DirectoryKind};
    use crate::record::Telephone;

    /// A scripted fake channel: reads are served from a fixed queue, writes
    /// are recorded for later inspection.
    struct FakeChannel {
        to_read: VecDeque<u8>,
        written: Vec<u8>,
    }

    impl FakeChannel {
        fn new(to_read: &[u8]) -> Self {
            Self {
                to_read: to_read.iter().copied().collect(),
                written: Vec::new(),
            }
        }
    }

    impl Channel for FakeChannel {
        fn write(&mut self, data: &[u8]) -> Result<usize> {
            self.written.extend_from_slice(data);
            Ok(data.len())
        }

        fn in_waiting(&mut self) -> Result<usize> {
            Ok(self.to_read.len())
        }

        fn read_byte(&mut self) -> Result<u8> {
            self.to_read.pop_front().ok_or(Error::ProtocolViolation("fake channel starved"))
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
    fn test_handshake_s6() {
        let channel = FakeChannel::new(&[XON]);
        let mut sender = Sender::new(channel, fast_config());
        sender.sync().unwrap();
        assert_eq!(sender.channel.written, vec![CR, LF]);
    }

    /// A channel whose handshake read times out a fixed number of times
    /// before answering `XON`, to exercise the sync retry loop.
    struct FlakyHandshakeChannel {
        timeouts_remaining: u32,
        written: Vec<u8>,
    }

    impl Channel for FlakyHandshakeChannel {
        fn write(&mut self, data: &[u8]) -> Result<usize> {
            self.written.extend_from_slice(data);
            Ok(data.len())
        }

        fn in_waiting(&mut self) -> Result<usize> {
            Ok(0)
        }

        fn read_byte(&mut self) -> Result<u8> {
            Ok(ACK)
        }

        fn read_byte_with_timeout(&mut self, _timeout: Duration) -> Result<Option<u8>> {
            if self.timeouts_remaining > 0 {
                self.timeouts_remaining -= 1;
                Ok(None)
            } else {
                Ok(Some(XON))
            }
        }
    }

    #[test]
    fn test_handshake_retries_on_timeout() {
        let channel = FlakyHandshakeChannel {
            timeouts_remaining: 2,
            written: Vec::new(),
        };
        let mut sender = Sender::new(channel, fast_config());
        sender.sync().unwrap();
        assert_eq!(sender.channel.written, vec![CR, LF, CR, LF, CR, LF]);
    }

    #[test]
    fn test_handshake_rejects_unexpected_byte() {
        let channel = FakeChannel::new(&[0x55]);
        let mut sender = Sender::new(channel, fast_config());
        let err = sender.sync().unwrap_err();
        assert!(matches!(err, Error::ProtocolViolation(_)));
    }

    #[test]
    fn test_send_directory_data_full_session() {
        // XON for handshake, then ACK after the directory frame, ACK after
        // the record's EndOfRecord.
        let channel = FakeChannel::new(&[XON, ACK, ACK]);
        let mut sender = Sender::new(channel, fast_config());
        let batch = DirectoryBatch {
            directory: Directory::build(DirectoryKind::Telephone),
            records: vec![Record::Telephone(Telephone {
                color: Some(ColorValue::Blue),
                name: "John Doe".to_string(),
                number: Some("123-456".to_string()),
                address: None,
                field1: None,
                field2: None,
                field3: None,
                field4: None,
                field5: None,
                field6: None,
            })],
        };
        sender.send_directory_data(&[batch]).unwrap();

        let written = sender.channel.written.clone();
        assert!(written.starts_with(&[CR, LF]));
        assert!(written.ends_with(&EndOfTransmission::default().into_frame().serialize()));
    }

    #[test]
    fn test_nack_is_fatal() {
        let channel = FakeChannel::new(&[XON, NACK]);
        let mut sender = Sender::new(channel, fast_config());
        let batch = DirectoryBatch {
            directory: Directory::build(DirectoryKind::Memo),
            records: vec![],
        };
        let err = sender.send_directory_data(&[batch]).unwrap_err();
        assert!(matches!(err, Error::ProtocolViolation(_)));
    }

    #[test]
    fn test_xoff_xon_buffers_other_bytes() {
        // During the directory frame's write, XOFF then XON interrupt, and
        // an ACK arrives early — it should be stashed and consumed by the
        // following wait_for_ack rather than misread as flow control.
        let channel = FakeChannel::new(&[XON, XOFF, ACK, XON]);
        let mut sender = Sender::new(channel, fast_config());
        sender.sync().unwrap();
        let directory = Directory::build(DirectoryKind::Calendar);
        sender.send_directory(&directory).unwrap();
        assert!(sender.pending.is_empty());
    }
}
