//! Owned frame splitter for a single byte stream.
//!
//! Bundles an overwrite-enabled [`RingBuffer`] with its delimiters so a
//! reader loop only has to hand over whatever chunk it just received.
//!
//! ```
//! use ringframe::{FrameSplitter, SplitterConfig};
//!
//! let mut splitter = FrameSplitter::new(SplitterConfig::default()).unwrap();
//! let frames = splitter.feed_collect(b"$GPGGA,1\r\n$GPRMC");
//! assert_eq!(frames, vec![b"$GPGGA,1".to_vec()]);
//! assert_eq!(splitter.pending(), b"$GPRMC".to_vec());
//! ```

use crate::circular_buffer::RingBuffer;
use crate::error::{Result, RingError};
use crate::extractor::FrameExtractor;

pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitterConfig {
    /// Bytes held for the frame being assembled. Longer frames lose their
    /// oldest bytes.
    pub capacity: usize,
    /// Tried in order after every byte; the first match ends the frame.
    pub delimiters: Vec<Vec<u8>>,
    /// Keep the matched delimiter at the end of each frame.
    pub include_separator: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        SplitterConfig {
            capacity: DEFAULT_CAPACITY,
            delimiters: vec![b"\r\n".to_vec()],
            include_separator: false,
        }
    }
}

impl SplitterConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replaces the delimiter list.
    pub fn with_delimiters<I, D>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Vec<u8>>,
    {
        self.delimiters = delimiters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_include_separator(mut self, include_separator: bool) -> Self {
        self.include_separator = include_separator;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(RingError::InvalidCapacity(self.capacity));
        }
        if self.delimiters.is_empty() || self.delimiters.iter().any(Vec::is_empty) {
            return Err(RingError::EmptyDelimiter);
        }
        Ok(())
    }
}

pub struct FrameSplitter {
    buffer: RingBuffer,
    delimiters: Vec<Vec<u8>>,
    include_separator: bool,
    frames_emitted: u64,
}

impl FrameSplitter {
    pub fn new(config: SplitterConfig) -> Result<Self> {
        config.validate()?;
        let buffer = RingBuffer::with_overwrite(config.capacity, true)?;
        tracing::debug!(
            capacity = config.capacity,
            delimiters = config.delimiters.len(),
            include_separator = config.include_separator,
            "frame splitter created"
        );
        Ok(FrameSplitter {
            buffer,
            delimiters: config.delimiters,
            include_separator: config.include_separator,
            frames_emitted: 0,
        })
    }

    /// Feeds a chunk, calling `on_frame` for each frame it completes.
    pub fn feed<F>(&mut self, chunk: &[u8], on_frame: F) -> usize
    where
        F: FnMut(Vec<u8>),
    {
        let frames = self.buffer.feed_and_extract(
            chunk,
            self.delimiters.as_slice(),
            self.include_separator,
            on_frame,
        );
        self.frames_emitted += frames as u64;
        frames
    }

    pub fn feed_collect(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        self.feed(chunk, |frame| frames.push(frame));
        frames
    }

    /// Bytes received since the last frame.
    pub fn pending(&self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    /// Drops a partially assembled frame.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rejects_empty_delimiters() {
        let config = SplitterConfig::default().with_delimiters(Vec::<Vec<u8>>::new());
        assert_eq!(config.validate(), Err(RingError::EmptyDelimiter));

        let config = SplitterConfig::default().with_delimiters([b"".to_vec(), b"\n".to_vec()]);
        assert!(matches!(FrameSplitter::new(config), Err(RingError::EmptyDelimiter)));
    }

    #[test]
    fn test_config_rejects_zero_capacity() {
        let config = SplitterConfig::default().with_capacity(0);
        assert!(matches!(FrameSplitter::new(config), Err(RingError::InvalidCapacity(0))));
    }

    #[test]
    fn test_frames_across_chunks() {
        let config = SplitterConfig::default()
            .with_delimiters([b";".to_vec()])
            .with_include_separator(true);
        let mut splitter = FrameSplitter::new(config).unwrap();

        assert!(splitter.feed_collect(b"ab").is_empty());
        assert_eq!(splitter.feed_collect(b"c;de;f"), vec![b"abc;".to_vec(), b"de;".to_vec()]);
        assert_eq!(splitter.pending(), b"f".to_vec());
        assert_eq!(splitter.frames_emitted(), 2);

        splitter.reset();
        assert!(splitter.pending().is_empty());
    }

    #[test]
    fn test_oversized_frame_keeps_newest_bytes() {
        let config = SplitterConfig::default()
            .with_capacity(4)
            .with_delimiters([b"\n".to_vec()]);
        let mut splitter = FrameSplitter::new(config).unwrap();
        assert_eq!(splitter.feed_collect(b"abcdef\n"), vec![b"def".to_vec()]);
    }
}
