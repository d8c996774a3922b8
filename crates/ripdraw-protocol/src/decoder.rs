//! Response decoding.
//!
//! A [`Response`] borrows the last validated frame from its session. Field
//! offsets are frame offsets: the status word sits at [`POS_STATUS`] and
//! command results start at [`POS_DATA`]. Every read is bounds-checked
//! against the header and payload; the trailing checksum is not readable.

use bytes::Buf;

use crate::constants::*;
use crate::error::{ProtocolError, Result};
use crate::types::{Event, EventType};

/// Read-only view of a validated response frame.
#[derive(Debug, Clone, Copy)]
pub struct Response<'a> {
    frame: &'a [u8],
}

impl<'a> Response<'a> {
    /// Wrap header and payload bytes, without the checksum.
    pub fn new(frame: &'a [u8]) -> Self {
        Response { frame }
    }

    /// Header and payload bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.frame
    }

    /// Number of readable bytes.
    pub fn len(&self) -> usize {
        self.frame.len()
    }

    /// Whether the view holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    /// Command id from the header.
    pub fn command_id(&self) -> Result<u16> {
        self.read_word(POS_COMMAND)
    }

    /// Sequence number from the header.
    pub fn sequence(&self) -> Result<u16> {
        self.read_word(POS_SEQUENCE)
    }

    /// Device status word.
    pub fn status(&self) -> Result<u16> {
        self.read_word(POS_STATUS)
    }

    /// Payload after the status word.
    pub fn data(&self) -> &'a [u8] {
        self.frame.get(POS_DATA..).unwrap_or(&[])
    }

    fn field(&self, offset: usize, width: usize) -> Result<&'a [u8]> {
        let end = offset
            .checked_add(width)
            .ok_or_else(|| ProtocolError::out_of_bounds(offset, width, self.frame.len()))?;
        self.frame
            .get(offset..end)
            .ok_or_else(|| ProtocolError::out_of_bounds(offset, width, self.frame.len()))
    }

    /// Read one byte.
    pub fn read_byte(&self, offset: usize) -> Result<u8> {
        Ok(self.field(offset, 1)?[0])
    }

    /// Read a little-endian word.
    pub fn read_word(&self, offset: usize) -> Result<u16> {
        let bytes = self.field(offset, 2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a length-prefixed blob whose bytes start at `offset`.
    ///
    /// The 16-bit length is read from `offset - 2`. Returns an owned copy.
    pub fn read_data(&self, offset: usize) -> Result<Vec<u8>> {
        let prefix = offset
            .checked_sub(2)
            .ok_or_else(|| ProtocolError::out_of_bounds(offset, 2, self.frame.len()))?;
        let len = self.read_word(prefix)? as usize;
        Ok(self.field(offset, len)?.to_vec())
    }

    /// Read a length-prefixed UTF-8 string whose bytes start at `offset`.
    pub fn read_text(&self, offset: usize) -> Result<String> {
        let bytes = self.read_data(offset)?;
        String::from_utf8(bytes).map_err(|_| ProtocolError::InvalidUtf8 { offset })
    }

    /// Decode an event batch starting at `offset`.
    ///
    /// Layout: `count` word; if nonzero a shared `has_more` word, then for
    /// each record a `length` word (covering the type byte and the data),
    /// the type byte and `length - 1` data bytes.
    ///
    /// Returns the events and the number of bytes consumed. Any overrun or
    /// zero-length record fails the whole batch with
    /// [`ProtocolError::OutOfBounds`].
    pub fn read_event_batch(&self, offset: usize) -> Result<(Vec<Event>, usize)> {
        let size = self.frame.len();
        let mut cursor = self
            .frame
            .get(offset..)
            .ok_or_else(|| ProtocolError::out_of_bounds(offset, 2, size))?;
        let start = cursor.remaining();

        if cursor.remaining() < 2 {
            return Err(ProtocolError::out_of_bounds(offset, 2, size));
        }
        let count = cursor.get_u16_le();
        if count == 0 {
            return Ok((Vec::new(), 2));
        }

        if cursor.remaining() < 2 {
            return Err(ProtocolError::out_of_bounds(offset + 2, 2, size));
        }
        let has_more = cursor.get_u16_le() != 0;

        let mut events = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let record = offset + start - cursor.remaining();
            if cursor.remaining() < 2 {
                return Err(ProtocolError::out_of_bounds(record, 2, size));
            }
            let len = cursor.get_u16_le() as usize;
            // The length covers the type byte, so zero cannot describe a record.
            if len == 0 || cursor.remaining() < len {
                return Err(ProtocolError::out_of_bounds(record + 2, len.max(1), size));
            }
            let event_type = EventType::from(cursor.get_u8());
            let mut data = vec![0u8; len - 1];
            cursor.copy_to_slice(&mut data);
            events.push(Event {
                event_type,
                data,
                has_more,
            });
        }

        Ok((events, start - cursor.remaining()))
    }
}
