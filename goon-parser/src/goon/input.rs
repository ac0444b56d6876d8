//! Pull-based input channel
//!
//!     The grammar engine does not receive the source text as an argument. It pulls bytes
//!     from the session's channel, in chunks of whatever size it likes, until a read
//!     returns zero. Zero is the only end-of-input signal and, once reached, every further
//!     read keeps returning zero.
//!
//!     The whole source is installed before the engine runs. There is no way to feed more
//!     bytes in the middle of a parse.

/// Chunk size used by [InputChannel::read_to_end].
pub const READ_CHUNK: usize = 4096;

/// A single in-memory buffer served front to back.
#[derive(Debug, Clone, Default)]
pub struct InputChannel {
    buffer: Vec<u8>,
    offset: usize,
}

impl InputChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the backing buffer and rewinds to its start.
    pub fn install(&mut self, bytes: &[u8]) {
        self.buffer.clear();
        self.buffer.extend_from_slice(bytes);
        self.offset = 0;
    }

    /// Empties the channel. Reads return zero until the next `install`.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.offset = 0;
    }

    /// Copies up to `buf.len()` unread bytes into `buf` and returns how many were copied.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let unread = &self.buffer[self.offset..];
        let count = unread.len().min(buf.len());
        buf[..count].copy_from_slice(&unread[..count]);
        self.offset += count;
        count
    }

    /// Drains everything that is left through [read](Self::read).
    pub fn read_to_end(&mut self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.remaining());
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let count = self.read(&mut chunk);
            if count == 0 {
                return out;
            }
            out.extend_from_slice(&chunk[..count]);
        }
    }

    /// Bytes not yet served.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Bytes served so far.
    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_in_chunks() {
        let mut channel = InputChannel::new();
        channel.install(b"x = 5\n");

        let mut buf = [0u8; 4];
        assert_eq!(channel.read(&mut buf), 4);
        assert_eq!(&buf, b"x = ");
        assert_eq!(channel.remaining(), 2);

        assert_eq!(channel.read(&mut buf), 2);
        assert_eq!(&buf[..2], b"5\n");
        assert_eq!(channel.position(), 6);
    }

    #[test]
    fn test_end_of_input_is_idempotent() {
        let mut channel = InputChannel::new();
        channel.install(b"ab");
        let mut buf = [0u8; 8];
        assert_eq!(channel.read(&mut buf), 2);
        for _ in 0..3 {
            assert_eq!(channel.read(&mut buf), 0);
        }
        assert!(channel.is_exhausted());
    }

    #[test]
    fn test_zero_length_read_does_not_advance() {
        let mut channel = InputChannel::new();
        channel.install(b"abc");
        assert_eq!(channel.read(&mut []), 0);
        assert_eq!(channel.position(), 0);
    }

    #[test]
    fn test_read_to_end_spans_chunks() {
        let source = vec![b'7'; READ_CHUNK * 2 + 17];
        let mut channel = InputChannel::new();
        channel.install(&source);
        assert_eq!(channel.read_to_end(), source);
        assert_eq!(channel.read_to_end(), Vec::<u8>::new());
    }

    #[test]
    fn test_install_rewinds() {
        let mut channel = InputChannel::new();
        channel.install(b"first");
        channel.read_to_end();
        channel.install(b"second");
        assert_eq!(channel.position(), 0);
        assert_eq!(channel.read_to_end(), b"second".to_vec());

        channel.clear();
        assert_eq!(channel.read(&mut [0u8; 4]), 0);
    }
}
