//! # ringframe
//!
//! Fixed-capacity circular byte buffer and a delimiter-based frame extractor
//! built on it, for turning serial-style byte streams into packets.
//!
//! ```
//! use ringframe::{FrameExtractor, RingBuffer};
//!
//! let mut buf = RingBuffer::with_overwrite(64, true).unwrap();
//! let mut frames = Vec::new();
//! buf.feed_and_extract(b"ping\nhello\n", &[b"\n"], false, |frame| frames.push(frame));
//! assert_eq!(frames, vec![b"ping".to_vec(), b"hello".to_vec()]);
//! ```

pub mod circular_buffer;
pub mod error;
pub mod extractor;
pub mod splitter;

pub use circular_buffer::{IntoByte, RingBuffer};
pub use error::{Result, RingError};
pub use extractor::FrameExtractor;
pub use splitter::{FrameSplitter, SplitterConfig};
