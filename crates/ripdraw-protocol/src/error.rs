//! Protocol error types.

use thiserror::Error;

/// Errors that can occur while exchanging frames with the display.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Growing a frame buffer failed.
    #[error("failed to allocate {requested} bytes for frame buffer")]
    Allocation {
        /// Capacity that was requested.
        requested: usize,
    },

    /// A frame buffer is in a state that does not allow the operation.
    #[error("invalid buffer state: {0}")]
    Buffer(String),

    /// Writing the request frame to the channel failed.
    #[error("failed to write request: {0}")]
    TransportWrite(#[source] std::io::Error),

    /// Reading the response frame from the channel failed.
    #[error("failed to read response: {0}")]
    TransportRead(#[source] std::io::Error),

    /// No response header for the issued command was found in the stream.
    #[error("timeout: no response header after {attempts} resync attempts")]
    Timeout {
        /// Number of bytes discarded while scanning.
        attempts: u32,
    },

    /// The response header carries a sequence number other than the one issued.
    #[error("sequence number mismatch: expected {expected}, got {actual}")]
    SequenceMismatch {
        /// Sequence number of the outstanding request.
        expected: u16,
        /// Sequence number found in the response.
        actual: u16,
    },

    /// The response checksum does not match its contents.
    #[error("checksum mismatch: frame carries 0x{expected:04X}, computed 0x{actual:04X}")]
    ChecksumMismatch {
        /// Checksum transmitted in the frame.
        expected: u16,
        /// Checksum computed over the received bytes.
        actual: u16,
    },

    /// The device answered with a nonzero status.
    #[error("device returned failure status 0x{status:04X}")]
    Device {
        /// Raw status code; its meaning is device specific.
        status: u16,
    },

    /// A field lies outside the received response.
    #[error("response too short: {width} bytes at offset {offset} exceed {size} bytes received")]
    OutOfBounds {
        /// Offset of the field.
        offset: usize,
        /// Width of the field in bytes.
        width: usize,
        /// Number of bytes in the response.
        size: usize,
    },

    /// Frame payload exceeds the allowed length.
    #[error("frame too long: maximum {max} payload bytes, got {actual}")]
    FrameTooLong {
        /// Maximum allowed payload length.
        max: usize,
        /// Actual payload length.
        actual: usize,
    },

    /// A command was given inconsistent arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Text returned by the device is not valid UTF-8.
    #[error("invalid UTF-8 in text field at offset {offset}")]
    InvalidUtf8 {
        /// Offset of the text field.
        offset: usize,
    },

    /// The serial device could not be opened.
    #[error("failed to open {port}: {reason}")]
    Open {
        /// Port that was opened.
        port: String,
        /// Reason reported by the serial driver.
        reason: String,
    },
}

impl ProtocolError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ProtocolError::InvalidArgument(message.into())
    }

    /// Create an out-of-bounds error for a field read.
    pub fn out_of_bounds(offset: usize, width: usize, size: usize) -> Self {
        ProtocolError::OutOfBounds {
            offset,
            width,
            size,
        }
    }

    /// Whether the connection should be closed and reopened before
    /// issuing further commands.
    ///
    /// Every other error only fails the command in flight.
    pub fn is_connection_fatal(&self) -> bool {
        matches!(self, ProtocolError::Timeout { .. })
    }

    /// Device status code, if the device rejected the command.
    pub fn device_status(&self) -> Option<u16> {
        match self {
            ProtocolError::Device { status } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
