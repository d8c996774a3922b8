//! Byte-stream channel between host and display.
//!
//! The session only needs blocking "write everything" and "read exactly n
//! bytes" operations. Any `std::io::Read + std::io::Write` value (a serial
//! port, a TCP stream, a pipe) is a channel.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// A duplex byte stream used by a session.
pub trait Channel {
    /// Write all bytes, blocking until done.
    fn write_exact(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Fill `buf` completely, blocking until done.
    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()>;

    /// Flush buffered output.
    fn flush(&mut self) -> io::Result<()>;
}

impl<T: Read + Write> Channel for T {
    fn write_exact(&mut self, bytes: &[u8]) -> io::Result<()> {
        Write::write_all(self, bytes)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        Read::read_exact(self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(self)
    }
}

/// In-memory channel.
///
/// Bytes queued with [`MemoryChannel::push_inbound`] are returned by reads;
/// everything written is captured for inspection. Reading past the queued
/// bytes fails with `UnexpectedEof`, like a closed stream.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    inbound: VecDeque<u8>,
    outbound: Vec<u8>,
}

impl MemoryChannel {
    /// Create an empty channel.
    pub fn new() -> Self {
        MemoryChannel::default()
    }

    /// Queue bytes for the host to read.
    pub fn push_inbound(&mut self, bytes: &[u8]) {
        self.inbound.extend(bytes);
    }

    /// Number of queued bytes not yet read.
    pub fn pending_inbound(&self) -> usize {
        self.inbound.len()
    }

    /// Everything written so far.
    pub fn outbound(&self) -> &[u8] {
        &self.outbound
    }

    /// Take everything written so far.
    pub fn take_outbound(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.outbound)
    }
}

impl Read for MemoryChannel {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.inbound.len());
        for (slot, byte) in buf.iter_mut().zip(self.inbound.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

impl Write for MemoryChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.outbound.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_channel_roundtrip() {
        let mut channel = MemoryChannel::new();
        channel.push_inbound(&[1, 2, 3, 4]);

        let mut buf = [0u8; 3];
        Channel::read_exact(&mut channel, &mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(channel.pending_inbound(), 1);

        Channel::write_exact(&mut channel, &[9, 8]).unwrap();
        assert_eq!(channel.outbound(), &[9, 8]);
        assert_eq!(channel.take_outbound(), vec![9, 8]);
        assert!(channel.outbound().is_empty());
    }

    #[test]
    fn test_memory_channel_eof() {
        let mut channel = MemoryChannel::new();
        channel.push_inbound(&[1]);
        let mut buf = [0u8; 2];
        let err = Channel::read_exact(&mut channel, &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
