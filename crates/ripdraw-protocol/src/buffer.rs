//! Growable frame buffer.
//!
//! Requests and responses are assembled in buffers owned by the session and
//! reused across commands. A buffer tracks two sizes:
//!
//! - `capacity`: bytes allocated (and zero-initialised) so far; only grows.
//! - `size`: bytes logically in use; managed by the code building or reading
//!   the frame.

use crate::error::{ProtocolError, Result};

/// Smallest allocation made when a buffer grows.
pub const MIN_ALLOCATION: usize = 32;

/// A capacity-tracked byte buffer for one frame.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    data: Vec<u8>,
    size: usize,
}

impl FrameBuffer {
    /// Create an empty buffer. Nothing is allocated until the first growth.
    pub fn new() -> Self {
        FrameBuffer {
            data: Vec::new(),
            size: 0,
        }
    }

    /// Allocated bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes in use.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether no bytes are in use.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Set the number of bytes in use.
    pub fn set_size(&mut self, size: usize) -> Result<()> {
        if size > self.capacity() {
            return Err(ProtocolError::Buffer(format!(
                "size {} exceeds capacity {}",
                size,
                self.capacity()
            )));
        }
        self.size = size;
        Ok(())
    }

    /// Mark the buffer empty. Allocated bytes are kept for reuse.
    pub fn clear(&mut self) {
        self.size = 0;
    }

    /// Guarantee `capacity() >= required`.
    ///
    /// Growth allocates `max(required, MIN_ALLOCATION)` bytes and keeps the
    /// existing content. Never shrinks.
    pub fn ensure_capacity(&mut self, required: usize) -> Result<()> {
        if self.data.len() >= required {
            return Ok(());
        }
        let target = required.max(MIN_ALLOCATION);
        self.data
            .try_reserve_exact(target - self.data.len())
            .map_err(|_| ProtocolError::Allocation { requested: target })?;
        self.data.resize(target, 0);
        Ok(())
    }

    /// Bytes in use.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.size]
    }

    /// Append bytes after the used region, growing as needed.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.size + bytes.len();
        self.ensure_capacity(end)?;
        self.data[self.size..end].copy_from_slice(bytes);
        self.size = end;
        Ok(())
    }

    /// Overwrite bytes inside the used region.
    pub fn overwrite(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        let end = offset + bytes.len();
        if end > self.size {
            return Err(ProtocolError::Buffer(format!(
                "overwrite of {} bytes at offset {} past size {}",
                bytes.len(),
                offset,
                self.size
            )));
        }
        self.data[offset..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Writable region `[start, start + len)`, growing the buffer to cover it.
    /// The used size is not changed.
    pub(crate) fn region_mut(&mut self, start: usize, len: usize) -> Result<&mut [u8]> {
        let end = start + len;
        self.ensure_capacity(end)?;
        Ok(&mut self.data[start..end])
    }

    /// Free the allocation.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.size = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_allocation() {
        let buffer = FrameBuffer::new();
        assert_eq!(buffer.capacity(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_minimum_allocation() {
        let mut buffer = FrameBuffer::new();
        buffer.ensure_capacity(1).unwrap();
        assert_eq!(buffer.capacity(), MIN_ALLOCATION);

        buffer.ensure_capacity(100).unwrap();
        assert_eq!(buffer.capacity(), 100);
    }

    #[test]
    fn test_capacity_never_shrinks() {
        let mut buffer = FrameBuffer::new();
        buffer.ensure_capacity(64).unwrap();
        for required in [64, 40, 10, 0] {
            buffer.ensure_capacity(required).unwrap();
            assert_eq!(buffer.capacity(), 64);
        }
    }

    #[test]
    fn test_growth_preserves_content() {
        let mut buffer = FrameBuffer::new();
        buffer.extend_from_slice(&[1, 2, 3]).unwrap();
        buffer.ensure_capacity(500).unwrap();
        assert_eq!(buffer.as_slice(), &[1, 2, 3]);

        buffer.extend_from_slice(&[0xAA; 600]).unwrap();
        assert_eq!(buffer.size(), 603);
        assert_eq!(&buffer.as_slice()[..3], &[1, 2, 3]);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buffer = FrameBuffer::new();
        buffer.extend_from_slice(&[7; 40]).unwrap();
        let capacity = buffer.capacity();
        buffer.clear();
        assert_eq!(buffer.size(), 0);
        assert_eq!(buffer.capacity(), capacity);
    }

    #[test]
    fn test_set_size_bounds() {
        let mut buffer = FrameBuffer::new();
        buffer.ensure_capacity(8).unwrap();
        assert!(buffer.set_size(32).is_ok());
        assert!(matches!(buffer.set_size(33), Err(ProtocolError::Buffer(_))));
    }

    #[test]
    fn test_overwrite_inside_size_only() {
        let mut buffer = FrameBuffer::new();
        buffer.extend_from_slice(&[0, 0, 0, 0]).unwrap();
        buffer.overwrite(2, &[9, 9]).unwrap();
        assert_eq!(buffer.as_slice(), &[0, 0, 9, 9]);
        assert!(buffer.overwrite(3, &[1, 1]).is_err());
    }

    #[test]
    fn test_release() {
        let mut buffer = FrameBuffer::new();
        buffer.extend_from_slice(&[1; 10]).unwrap();
        buffer.release();
        assert_eq!(buffer.capacity(), 0);
        assert_eq!(buffer.size(), 0);
    }
}
