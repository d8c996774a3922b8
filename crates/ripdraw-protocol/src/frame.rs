//! Frame transport.
//!
//! Requests and responses share one frame layout, all fields little-endian:
//!
//! ```text
//! +--------+--------+--------+---------------------+----------+
//! | cmd_id |  seq   |  len   | payload[0..len]     | checksum |
//! |  u16   |  u16   |  u16   | (status u16 first   |   u16    |
//! |        |        |        |  in responses)      |          |
//! +--------+--------+--------+---------------------+----------+
//! ```
//!
//! The checksum is the sum of every preceding byte, truncated to 16 bits.
//!
//! Responses are not assumed to arrive frame-aligned. The receiver slides a
//! two-byte window over the stream until it sees the id of the command in
//! flight, and only then trusts the rest of the header.

use std::io;

use bytes::{BufMut, BytesMut};
use log::{debug, trace, warn};

use crate::channel::Channel;
use crate::constants::*;
use crate::error::{ProtocolError, Result};
use crate::session::Session;

/// Sum of all bytes, truncated to 16 bits.
pub fn checksum(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |sum, &byte| sum.wrapping_add(u16::from(byte)))
}

/// The fixed six-byte frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Command the frame belongs to.
    pub command_id: u16,
    /// Sequence number correlating a response with its request.
    pub sequence: u16,
    /// Bytes between the header and the checksum.
    pub payload_len: u16,
}

impl FrameHeader {
    /// Parse a header from its wire bytes.
    pub fn parse(bytes: &[u8; HEADER_SIZE]) -> Self {
        FrameHeader {
            command_id: u16::from_le_bytes([bytes[POS_COMMAND], bytes[POS_COMMAND + 1]]),
            sequence: u16::from_le_bytes([bytes[POS_SEQUENCE], bytes[POS_SEQUENCE + 1]]),
            payload_len: u16::from_le_bytes([bytes[POS_LENGTH], bytes[POS_LENGTH + 1]]),
        }
    }

    /// Wire bytes of this header.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[POS_COMMAND..POS_COMMAND + 2].copy_from_slice(&self.command_id.to_le_bytes());
        bytes[POS_SEQUENCE..POS_SEQUENCE + 2].copy_from_slice(&self.sequence.to_le_bytes());
        bytes[POS_LENGTH..POS_LENGTH + 2].copy_from_slice(&self.payload_len.to_le_bytes());
        bytes
    }
}

/// Encode a complete frame around `payload`.
///
/// For responses the payload must start with the status word.
pub fn encode_frame(command_id: u16, sequence: u16, payload: &[u8]) -> Result<Vec<u8>> {
    let payload_len = u16::try_from(payload.len()).map_err(|_| ProtocolError::FrameTooLong {
        max: u16::MAX as usize,
        actual: payload.len(),
    })?;
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len() + CHECKSUM_SIZE);
    buf.put_u16_le(command_id);
    buf.put_u16_le(sequence);
    buf.put_u16_le(payload_len);
    buf.put_slice(payload);
    let sum = checksum(&buf);
    buf.put_u16_le(sum);
    Ok(buf.to_vec())
}

/// Split a complete frame into header and payload, verifying the length
/// field and the checksum.
pub fn parse_frame(frame: &[u8]) -> Result<(FrameHeader, &[u8])> {
    if frame.len() < HEADER_SIZE + CHECKSUM_SIZE {
        return Err(ProtocolError::out_of_bounds(
            0,
            HEADER_SIZE + CHECKSUM_SIZE,
            frame.len(),
        ));
    }
    let mut header_bytes = [0u8; HEADER_SIZE];
    header_bytes.copy_from_slice(&frame[..HEADER_SIZE]);
    let header = FrameHeader::parse(&header_bytes);

    let checksum_offset = HEADER_SIZE + header.payload_len as usize;
    if frame.len() != checksum_offset + CHECKSUM_SIZE {
        return Err(ProtocolError::out_of_bounds(
            HEADER_SIZE,
            header.payload_len as usize + CHECKSUM_SIZE,
            frame.len(),
        ));
    }
    verify_checksum(frame, checksum_offset)?;
    Ok((header, &frame[HEADER_SIZE..checksum_offset]))
}

/// Compare the checksum stored at `checksum_offset` with the sum of the
/// bytes before it.
fn verify_checksum(frame: &[u8], checksum_offset: usize) -> Result<()> {
    let carried = u16::from_le_bytes([frame[checksum_offset], frame[checksum_offset + 1]]);
    let computed = checksum(&frame[..checksum_offset]);
    if carried != computed {
        return Err(ProtocolError::ChecksumMismatch {
            expected: carried,
            actual: computed,
        });
    }
    Ok(())
}

/// Format bytes as space-separated hex.
pub(crate) fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

impl<C: Channel> Session<C> {
    /// Complete the request under construction and write it to the channel.
    ///
    /// Fills in the payload length, appends the checksum and writes the
    /// whole frame. A request can only be sent once.
    pub fn finalize_and_send(&mut self) -> Result<()> {
        if self.sealed {
            return Err(ProtocolError::Buffer(
                "request already sent; begin a new request".to_string(),
            ));
        }
        if self.poisoned {
            return Err(ProtocolError::Buffer(
                "request failed to encode; begin a new request".to_string(),
            ));
        }
        let size = self.request.size();
        if size < HEADER_SIZE {
            return Err(ProtocolError::Buffer(format!(
                "request of {} bytes has no header",
                size
            )));
        }
        let payload_len = size - HEADER_SIZE;
        let len_word = u16::try_from(payload_len).map_err(|_| ProtocolError::FrameTooLong {
            max: u16::MAX as usize,
            actual: payload_len,
        })?;
        self.request.overwrite(POS_LENGTH, &len_word.to_le_bytes())?;
        let sum = checksum(self.request.as_slice());
        self.request.append_word(sum)?;
        self.sealed = true;

        debug!(
            "sending {} seq {} ({} payload bytes)",
            describe_command(self.last_command),
            self.sequence,
            payload_len
        );
        if self.config.verbosity >= 2 {
            debug!(
                "write {} bytes: {}",
                self.request.size(),
                hex_dump(self.request.as_slice())
            );
        }

        self.channel
            .write_exact(self.request.as_slice())
            .map_err(ProtocolError::TransportWrite)?;
        self.channel.flush().map_err(ProtocolError::TransportWrite)
    }

    /// Receive and validate the response to the request in flight.
    ///
    /// Bytes are discarded one at a time until the command id of the last
    /// request appears, bounded by the configured resync attempts. A read
    /// timeout while scanning counts as one attempt. The header's sequence
    /// number, the payload length cap and the checksum are then checked, and
    /// a nonzero status is reported as [`ProtocolError::Device`].
    ///
    /// Only a device status error leaves the frame readable through
    /// [`Session::response`].
    pub fn receive(&mut self) -> Result<()> {
        match self.receive_frame() {
            Err(e @ ProtocolError::Device { .. }) => Err(e),
            Err(e) => {
                self.response.clear();
                Err(e)
            }
            Ok(()) => Ok(()),
        }
    }

    fn receive_frame(&mut self) -> Result<()> {
        self.response.clear();
        let expected = self.last_command;

        let mut attempts = 0u32;
        let mut window = [0u8; 2];
        self.pause();
        self.read_scanning(&mut window, &mut attempts)?;

        while u16::from_le_bytes(window) != expected {
            self.count_attempt(&mut attempts)?;
            if self.config.verbosity >= 3 {
                trace!(
                    "resync: window {:02X} {:02X} does not match 0x{:04X}",
                    window[0],
                    window[1],
                    expected
                );
            }
            self.pause();
            window[0] = window[1];
            self.read_scanning(&mut window[1..], &mut attempts)?;
        }
        if attempts > 0 {
            warn!(
                "response to 0x{:04X} found after {} resync attempts",
                expected, attempts
            );
        }

        let mut header_bytes = [0u8; HEADER_SIZE];
        header_bytes[..2].copy_from_slice(&window);
        self.channel
            .read_exact(&mut header_bytes[2..])
            .map_err(ProtocolError::TransportRead)?;
        let header = FrameHeader::parse(&header_bytes);

        if header.sequence != self.sequence {
            warn!(
                "response to 0x{:04X} carries sequence {}, expected {}",
                expected, header.sequence, self.sequence
            );
            return Err(ProtocolError::SequenceMismatch {
                expected: self.sequence,
                actual: header.sequence,
            });
        }
        if header.payload_len > self.config.max_response_payload {
            return Err(ProtocolError::FrameTooLong {
                max: self.config.max_response_payload as usize,
                actual: header.payload_len as usize,
            });
        }

        let payload_len = header.payload_len as usize;
        let checksum_offset = HEADER_SIZE + payload_len;
        let total = checksum_offset + CHECKSUM_SIZE;
        self.response.ensure_capacity(total)?;
        self.response
            .region_mut(0, HEADER_SIZE)?
            .copy_from_slice(&header_bytes);
        let body = self
            .response
            .region_mut(HEADER_SIZE, payload_len + CHECKSUM_SIZE)?;
        self.channel
            .read_exact(body)
            .map_err(ProtocolError::TransportRead)?;
        self.response.set_size(total)?;

        if self.config.verbosity >= 2 {
            debug!(
                "read {} bytes: {}",
                total,
                hex_dump(self.response.as_slice())
            );
        }

        verify_checksum(self.response.as_slice(), checksum_offset)?;

        if payload_len < STATUS_SIZE {
            return Err(ProtocolError::out_of_bounds(
                POS_STATUS,
                STATUS_SIZE,
                checksum_offset,
            ));
        }
        let status = self.response().read_word(POS_STATUS)?;
        self.last_status = status;
        if status != STATUS_OK {
            warn!(
                "device rejected {} with status 0x{:04X}",
                describe_command(expected),
                status
            );
            return Err(ProtocolError::Device { status });
        }

        debug!(
            "received response to {} seq {} ({} payload bytes)",
            describe_command(expected),
            header.sequence,
            payload_len
        );
        Ok(())
    }

    /// Read while scanning for a header, retrying timeouts as attempts.
    fn read_scanning(&mut self, buf: &mut [u8], attempts: &mut u32) -> Result<()> {
        loop {
            match self.channel.read_exact(buf) {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                    self.count_attempt(attempts)?;
                    if self.config.verbosity >= 3 {
                        trace!("resync: read timed out");
                    }
                    self.pause();
                }
                Err(e) => return Err(ProtocolError::TransportRead(e)),
            }
        }
    }

    fn count_attempt(&self, attempts: &mut u32) -> Result<()> {
        if *attempts >= self.config.resync_attempts {
            warn!(
                "no response header for command 0x{:04X} after {} attempts",
                self.last_command, attempts
            );
            return Err(ProtocolError::Timeout {
                attempts: *attempts,
            });
        }
        *attempts += 1;
        Ok(())
    }

    fn pause(&self) {
        let delay = self.config.resync_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_wraps() {
        assert_eq!(checksum(&[]), 0);
        assert_eq!(checksum(&[1, 2, 3]), 6);
        assert_eq!(checksum(&[0xFF; 300]), (0xFFu32 * 300 % 0x10000) as u16);
    }

    #[test]
    fn test_header_roundtrip() {
        let header = FrameHeader {
            command_id: 0x3631,
            sequence: 7,
            payload_len: 0x0102,
        };
        let bytes = header.to_bytes();
        assert_eq!(bytes, [0x31, 0x36, 7, 0, 0x02, 0x01]);
        assert_eq!(FrameHeader::parse(&bytes), header);
    }

    #[test]
    fn test_encode_frame_layout() {
        let frame = encode_frame(0x3931, 1, &[0, 0, 0xAA]).unwrap();
        assert_eq!(frame.len(), HEADER_SIZE + 3 + CHECKSUM_SIZE);
        assert_eq!(&frame[..HEADER_SIZE], &[0x31, 0x39, 1, 0, 3, 0]);
        let sum = checksum(&frame[..frame.len() - 2]);
        assert_eq!(&frame[frame.len() - 2..], &sum.to_le_bytes());
    }

    #[test]
    fn test_parse_frame() {
        let frame = encode_frame(0x3131, 42, &[5, 0, 1]).unwrap();
        let (header, payload) = parse_frame(&frame).unwrap();
        assert_eq!(header.command_id, 0x3131);
        assert_eq!(header.sequence, 42);
        assert_eq!(payload, &[5, 0, 1]);
    }

    #[test]
    fn test_parse_frame_rejects_corruption() {
        let mut frame = encode_frame(0x3131, 1, &[1, 2, 3, 4]).unwrap();
        frame[7] ^= 0x40;
        assert!(matches!(
            parse_frame(&frame),
            Err(ProtocolError::ChecksumMismatch { .. })
        ));

        let frame = encode_frame(0x3131, 1, &[1, 2, 3, 4]).unwrap();
        assert!(matches!(
            parse_frame(&frame[..frame.len() - 1]),
            Err(ProtocolError::OutOfBounds { .. })
        ));
        assert!(parse_frame(&[0x31]).is_err());
    }

    #[test]
    fn test_hex_dump() {
        assert_eq!(hex_dump(&[0x00, 0xAB, 0x1F]), "00 AB 1F");
        assert_eq!(hex_dump(&[]), "");
    }
}
