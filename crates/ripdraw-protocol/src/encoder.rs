//! Request encoding.
//!
//! Typed fields are appended to the request buffer in wire order. All
//! multi-byte values are little-endian.
//!
//! [`RequestBuilder`] chains the appends for one command. The first failing
//! append is remembered and reported once by [`RequestBuilder::send`] or
//! [`RequestBuilder::call`]; a request that failed to encode is never
//! written to the channel.

use crate::buffer::FrameBuffer;
use crate::channel::Channel;
use crate::decoder::Response;
use crate::error::{ProtocolError, Result};
use crate::session::Session;
use crate::types::{Color, Direction, HDirection, Position, Size};

impl FrameBuffer {
    /// Append an unsigned byte.
    pub fn append_byte(&mut self, value: u8) -> Result<()> {
        self.extend_from_slice(&[value])
    }

    /// Append an unsigned 16-bit word, little-endian.
    pub fn append_word(&mut self, value: u16) -> Result<()> {
        self.extend_from_slice(&value.to_le_bytes())
    }

    /// Append a flag as a single byte, 0 or 1.
    pub fn append_flag(&mut self, value: bool) -> Result<()> {
        self.append_byte(u8::from(value))
    }

    /// Append a color as red, green, blue, alpha.
    pub fn append_color(&mut self, color: Color) -> Result<()> {
        self.extend_from_slice(&color.to_bytes())
    }

    /// Append a horizontal direction as one byte.
    pub fn append_hdirection(&mut self, direction: HDirection) -> Result<()> {
        self.append_byte(direction.into())
    }

    /// Append a stacking direction as one byte.
    pub fn append_direction(&mut self, direction: Direction) -> Result<()> {
        self.append_byte(direction.into())
    }

    /// Append a string as a 16-bit length prefix followed by its bytes.
    /// No terminator is written.
    pub fn append_string(&mut self, value: &str) -> Result<()> {
        self.append_blob(value.as_bytes())
    }

    /// Append bytes behind a 16-bit length prefix.
    pub fn append_blob(&mut self, bytes: &[u8]) -> Result<()> {
        let len = u16::try_from(bytes.len()).map_err(|_| ProtocolError::FrameTooLong {
            max: u16::MAX as usize,
            actual: bytes.len(),
        })?;
        self.append_word(len)?;
        self.extend_from_slice(bytes)
    }

    /// Append raw bytes without a length prefix. The count must already
    /// have been written by the caller.
    pub fn append_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes)
    }
}

/// Builder for one request frame.
///
/// Created by [`Session::begin_request`], which has already written the
/// header. Each method appends one field.
#[must_use = "a request is only sent by `send` or `call`"]
pub struct RequestBuilder<'s, C: Channel> {
    session: &'s mut Session<C>,
    error: Option<ProtocolError>,
}

impl<'s, C: Channel> RequestBuilder<'s, C> {
    pub(crate) fn new(session: &'s mut Session<C>, error: Option<ProtocolError>) -> Self {
        RequestBuilder { session, error }
    }

    fn append(mut self, f: impl FnOnce(&mut FrameBuffer) -> Result<()>) -> Self {
        if self.error.is_none() {
            if let Err(e) = f(self.session.request_buffer_mut()) {
                self.session.poison_request();
                self.error = Some(e);
            }
        }
        self
    }

    /// Append an unsigned byte.
    pub fn byte(self, value: u8) -> Self {
        self.append(|b| b.append_byte(value))
    }

    /// Append a 16-bit word.
    pub fn word(self, value: u16) -> Self {
        self.append(|b| b.append_word(value))
    }

    /// Append a flag byte.
    pub fn flag(self, value: bool) -> Self {
        self.append(|b| b.append_flag(value))
    }

    /// Append a color.
    pub fn color(self, color: Color) -> Self {
        self.append(|b| b.append_color(color))
    }

    /// Append a horizontal direction.
    pub fn hdirection(self, direction: HDirection) -> Self {
        self.append(|b| b.append_hdirection(direction))
    }

    /// Append a stacking direction.
    pub fn direction(self, direction: Direction) -> Self {
        self.append(|b| b.append_direction(direction))
    }

    /// Append a length-prefixed string.
    pub fn string(self, value: &str) -> Self {
        self.append(|b| b.append_string(value))
    }

    /// Append length-prefixed bytes.
    pub fn blob(self, bytes: &[u8]) -> Self {
        self.append(|b| b.append_blob(bytes))
    }

    /// Append raw bytes.
    pub fn raw(self, bytes: &[u8]) -> Self {
        self.append(|b| b.append_raw(bytes))
    }

    /// Append a position as x then y.
    pub fn position(self, position: Position) -> Self {
        self.word(position.x).word(position.y)
    }

    /// Append a size as width then height.
    pub fn size(self, size: Size) -> Self {
        self.word(size.width).word(size.height)
    }

    /// Finalize and write the request without waiting for a response.
    pub fn send(self) -> Result<()> {
        if let Some(e) = self.error {
            return Err(e);
        }
        self.session.finalize_and_send()
    }

    /// Send the request and check its response, which carries nothing but
    /// the status.
    pub fn execute(self) -> Result<()> {
        self.call().map(|_| ())
    }

    /// Send the request and receive its validated response.
    pub fn call(self) -> Result<Response<'s>> {
        let RequestBuilder { session, error } = self;
        if let Some(e) = error {
            return Err(e);
        }
        session.finalize_and_send()?;
        session.receive()?;
        let session: &'s Session<C> = session;
        Ok(session.response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_scalars() {
        let mut buffer = FrameBuffer::new();
        buffer.append_byte(0xAB).unwrap();
        buffer.append_word(0x1234).unwrap();
        buffer.append_flag(true).unwrap();
        buffer.append_flag(false).unwrap();
        assert_eq!(buffer.as_slice(), &[0xAB, 0x34, 0x12, 1, 0]);
    }

    #[test]
    fn test_append_color_and_directions() {
        let mut buffer = FrameBuffer::new();
        buffer.append_color(Color::new(10, 20, 30, 40)).unwrap();
        buffer.append_hdirection(HDirection::Right).unwrap();
        buffer.append_direction(Direction::Horizontal).unwrap();
        assert_eq!(buffer.as_slice(), &[10, 20, 30, 40, 1, 0]);
    }

    #[test]
    fn test_append_string() {
        let mut buffer = FrameBuffer::new();
        buffer.append_string("blue-on").unwrap();
        assert_eq!(&buffer.as_slice()[..2], &[7, 0]);
        assert_eq!(&buffer.as_slice()[2..], b"blue-on");

        buffer.clear();
        buffer.append_string("").unwrap();
        assert_eq!(buffer.as_slice(), &[0, 0]);
    }

    #[test]
    fn test_append_raw_has_no_prefix() {
        let mut buffer = FrameBuffer::new();
        buffer.append_raw(&[1, 2, 3]).unwrap();
        assert_eq!(buffer.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_append_oversized_string() {
        let mut buffer = FrameBuffer::new();
        let text = "x".repeat(70_000);
        assert!(matches!(
            buffer.append_string(&text),
            Err(ProtocolError::FrameTooLong { actual: 70_000, .. })
        ));
        assert!(buffer.is_empty());
    }
}
