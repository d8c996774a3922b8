//! The session: one open connection to a display.
//!
//! A session owns its channel and two reusable frame buffers. Exactly one
//! request is in flight at a time: [`Session::begin_request`] starts a frame,
//! the returned builder appends fields and sends it, and
//! [`Session::receive`] validates the matching response.
//!
//! Sessions are not shared between threads; wrap one in a mutex, or open one
//! session per connection.

use log::debug;

use crate::buffer::FrameBuffer;
use crate::channel::Channel;
use crate::config::SessionConfig;
use crate::constants::CHECKSUM_SIZE;
use crate::decoder::Response;
use crate::encoder::RequestBuilder;
use crate::error::{ProtocolError, Result};

/// An open connection to a display.
#[derive(Debug)]
pub struct Session<C: Channel> {
    pub(crate) channel: C,
    pub(crate) config: SessionConfig,
    pub(crate) sequence: u16,
    pub(crate) last_command: u16,
    pub(crate) last_status: u16,
    pub(crate) request: FrameBuffer,
    pub(crate) response: FrameBuffer,
    /// Set once the current request has been finalized.
    pub(crate) sealed: bool,
    /// Set when a field could not be appended to the current request.
    pub(crate) poisoned: bool,
}

impl<C: Channel> Session<C> {
    /// Start a session on an already-open channel.
    pub fn with_channel(channel: C, config: SessionConfig) -> Self {
        Session {
            channel,
            config,
            sequence: 0,
            last_command: 0,
            last_status: 0,
            request: FrameBuffer::new(),
            response: FrameBuffer::new(),
            sealed: false,
            poisoned: false,
        }
    }

    /// Start a new request for `command`.
    ///
    /// Clears both buffers, advances the sequence number (wrapping at 16
    /// bits) and writes the header with a zero length placeholder.
    pub fn begin_request(&mut self, command: impl Into<u16>) -> RequestBuilder<'_, C> {
        let command = command.into();
        self.request.clear();
        self.response.clear();
        self.sealed = false;
        self.last_command = command;
        self.sequence = self.sequence.wrapping_add(1);

        let sequence = self.sequence;
        let header = self
            .request
            .append_word(command)
            .and_then(|_| self.request.append_word(sequence))
            .and_then(|_| self.request.append_word(0));
        self.poisoned = header.is_err();
        RequestBuilder::new(self, header.err())
    }

    pub(crate) fn request_buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.request
    }

    /// Refuse to send the current request; its buffer is incomplete.
    pub(crate) fn poison_request(&mut self) {
        self.poisoned = true;
    }

    /// The last validated response, without its checksum.
    ///
    /// Empty until a response has been received, and after a receive that
    /// failed before the status word was checked.
    pub fn response(&self) -> Response<'_> {
        let frame = self.response.as_slice();
        let end = frame.len().saturating_sub(CHECKSUM_SIZE);
        Response::new(&frame[..end])
    }

    /// The request frame under construction or last sent.
    pub fn request(&self) -> &[u8] {
        self.request.as_slice()
    }

    /// Sequence number of the current request.
    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Command id of the current request.
    pub fn last_command(&self) -> u16 {
        self.last_command
    }

    /// Status word of the last received response.
    pub fn last_status(&self) -> u16 {
        self.last_status
    }

    /// Diagnostic level.
    pub fn verbosity(&self) -> u8 {
        self.config.verbosity
    }

    /// Change the diagnostic level.
    pub fn set_verbosity(&mut self, verbosity: u8) {
        self.config.verbosity = verbosity;
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The underlying channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// The underlying channel, mutably.
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Flush the channel and release the session.
    ///
    /// The channel is dropped afterwards, closing the device.
    pub fn close(mut self) -> Result<()> {
        debug!("closing session after {} requests", self.sequence);
        self.request.release();
        self.response.release();
        self.channel.flush().map_err(ProtocolError::TransportWrite)
    }

    /// Give back the channel without flushing.
    pub fn into_channel(self) -> C {
        self.channel
    }
}
