//! Delimiter matching and frame flushing on top of [`RingBuffer`].
//!
//! A frame is everything accumulated in the buffer when a delimiter shows up
//! at its tail. A match always empties the buffer, so in streaming use the
//! buffer holds only the frame currently being assembled.

use crate::circular_buffer::RingBuffer;

pub trait FrameExtractor {
    /// Whether the newest `pattern.len()` bytes equal `pattern`.
    ///
    /// An empty pattern always matches.
    fn ends_with(&self, pattern: &[u8]) -> bool;

    /// Flushes the whole buffer as one frame if it ends with `pattern`.
    ///
    /// With `include_separator` false the trailing delimiter is left out of
    /// the frame. On a match the buffer is cleared regardless of what the
    /// frame contains; on no match it is left untouched and `None` returned.
    fn flush_if_ends_with(&mut self, pattern: &[u8], include_separator: bool) -> Option<Vec<u8>>;

    /// Like [`flush_if_ends_with`](Self::flush_if_ends_with), trying each
    /// pattern in order. The first matching pattern wins.
    fn flush_if_ends_with_any<P: AsRef<[u8]>>(
        &mut self,
        patterns: &[P],
        include_separator: bool,
    ) -> Option<Vec<u8>>;

    /// Pushes `bytes` one at a time, evicting the oldest stored byte when
    /// full, and checks for a delimiter after every byte. Each completed
    /// frame is handed to `on_frame` before feeding continues.
    ///
    /// Returns the number of frames emitted.
    fn feed_and_extract<P, F>(
        &mut self,
        bytes: &[u8],
        patterns: &[P],
        include_separator: bool,
        on_frame: F,
    ) -> usize
    where
        P: AsRef<[u8]>,
        F: FnMut(Vec<u8>);
}

impl FrameExtractor for RingBuffer {
    fn ends_with(&self, pattern: &[u8]) -> bool {
        if pattern.len() > self.len() {
            return false;
        }
        pattern
            .iter()
            .rev()
            .enumerate()
            .all(|(i, &expected)| self.read_at_back_unchecked(i) == expected)
    }

    fn flush_if_ends_with(&mut self, pattern: &[u8], include_separator: bool) -> Option<Vec<u8>> {
        if !self.ends_with(pattern) {
            return None;
        }
        let take = if include_separator {
            self.len()
        } else {
            self.len() - pattern.len()
        };
        let mut frame = Vec::with_capacity(take);
        frame.extend((0..take).map(|i| self.read_at_front_unchecked(i)));
        self.clear();
        Some(frame)
    }

    fn flush_if_ends_with_any<P: AsRef<[u8]>>(
        &mut self,
        patterns: &[P],
        include_separator: bool,
    ) -> Option<Vec<u8>> {
        let (index, pattern) = patterns
            .iter()
            .map(|pattern| pattern.as_ref())
            .enumerate()
            .find(|(_, pattern)| self.ends_with(pattern))?;
        let frame = self.flush_if_ends_with(pattern, include_separator)?;
        tracing::debug!(delimiter = index, len = frame.len(), "frame flushed");
        Some(frame)
    }

    fn feed_and_extract<P, F>(
        &mut self,
        bytes: &[u8],
        patterns: &[P],
        include_separator: bool,
        mut on_frame: F,
    ) -> usize
    where
        P: AsRef<[u8]>,
        F: FnMut(Vec<u8>),
    {
        let mut frames = 0;
        for &byte in bytes {
            self.push_overwrite(byte);
            if let Some(frame) = self.flush_if_ends_with_any(patterns, include_separator) {
                frames += 1;
                on_frame(frame);
            }
        }
        frames
    }
}
