//! Fixed-capacity circular byte buffer.
//!
//! Bytes live at physical index `(head + i) % capacity` for logical position
//! `i` in `0..len`. Everything outside that window is stale and never read.

use crate::error::{Result, RingError};

/// Conversion of an integer argument into a byte, failing with
/// [`RingError::InvalidByteValue`] when it does not fit in `0..=255`.
pub trait IntoByte: Copy {
    fn into_byte(self) -> Result<u8>;
}

impl IntoByte for u8 {
    fn into_byte(self) -> Result<u8> {
        Ok(self)
    }
}

macro_rules! impl_into_byte {
    ($($t:ty),*) => {
        $(
            impl IntoByte for $t {
                fn into_byte(self) -> Result<u8> {
                    u8::try_from(self).map_err(|_| RingError::InvalidByteValue(self as i128))
                }
            }
        )*
    };
}

impl_into_byte!(i8, i16, i32, i64, i128, isize, u16, u32, u64, usize);

#[derive(Clone, Debug)]
pub struct RingBuffer {
    buffer: Box<[u8]>,
    capacity: usize,
    head: usize,
    len: usize,
    overwrite: bool,
}

impl RingBuffer {
    /// Creates an empty buffer that rejects pushes once full.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_overwrite(capacity, false)
    }

    /// Creates an empty buffer with the given default overwrite policy.
    pub fn with_overwrite(capacity: usize, overwrite: bool) -> Result<Self> {
        if capacity == 0 {
            return Err(RingError::InvalidCapacity(capacity));
        }
        tracing::debug!(capacity, overwrite, "ring buffer created");
        Ok(RingBuffer {
            buffer: vec![0; capacity].into_boxed_slice(),
            capacity,
            head: 0,
            len: 0,
            overwrite,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn free_space(&self) -> usize {
        self.capacity - self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Default policy used by [`push_byte`](Self::push_byte) and [`extend`](Self::extend).
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
    }

    /// Forgets all stored bytes without touching the storage.
    pub fn clear(&mut self) {
        tracing::trace!(dropped = self.len, "ring buffer cleared");
        self.head = 0;
        self.len = 0;
    }

    fn front_index(&self, index: usize) -> usize {
        (self.head + index % self.capacity) % self.capacity
    }

    fn back_index(&self, index: usize) -> usize {
        // len <= capacity, so this never underflows even for an empty buffer.
        let offset = (self.len + self.capacity - 1 - index % self.capacity) % self.capacity;
        (self.head + offset) % self.capacity
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(RingError::IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Byte at logical position `index` counted from the oldest byte.
    pub fn read_at_front(&self, index: usize) -> Result<u8> {
        self.check_index(index)?;
        Ok(self.read_at_front_unchecked(index))
    }

    /// Byte at logical position `index` counted from the newest byte.
    pub fn read_at_back(&self, index: usize) -> Result<u8> {
        self.check_index(index)?;
        Ok(self.read_at_back_unchecked(index))
    }

    /// Like [`read_at_front`](Self::read_at_front) without the bound check.
    ///
    /// Out-of-range indices wrap around the storage and return stale bytes.
    pub fn read_at_front_unchecked(&self, index: usize) -> u8 {
        self.buffer[self.front_index(index)]
    }

    /// Like [`read_at_back`](Self::read_at_back) without the bound check.
    pub fn read_at_back_unchecked(&self, index: usize) -> u8 {
        self.buffer[self.back_index(index)]
    }

    pub fn write_at_front<V: IntoByte>(&mut self, index: usize, value: V) -> Result<()> {
        self.check_index(index)?;
        let value = value.into_byte()?;
        let slot = self.front_index(index);
        self.buffer[slot] = value;
        Ok(())
    }

    pub fn write_at_back<V: IntoByte>(&mut self, index: usize, value: V) -> Result<()> {
        self.check_index(index)?;
        let value = value.into_byte()?;
        let slot = self.back_index(index);
        self.buffer[slot] = value;
        Ok(())
    }

    /// Removes and returns the oldest byte.
    pub fn shift_byte(&mut self) -> Result<u8> {
        if self.len == 0 {
            return Err(RingError::BufferEmpty);
        }
        let value = self.buffer[self.head];
        self.head = (self.head + 1) % self.capacity;
        self.len -= 1;
        Ok(value)
    }

    /// Appends a byte using the buffer's default overwrite policy.
    pub fn push_byte<V: IntoByte>(&mut self, value: V) -> Result<()> {
        self.push_byte_with(value, self.overwrite)
    }

    /// Appends a byte with an explicit overwrite policy for this call only.
    pub fn push_byte_with<V: IntoByte>(&mut self, value: V, overwrite: bool) -> Result<()> {
        let value = value.into_byte()?;
        if self.is_full() && !overwrite {
            return Err(RingError::BufferFull {
                capacity: self.capacity,
            });
        }
        self.push_overwrite(value);
        Ok(())
    }

    /// Appends a byte, evicting the oldest one when the buffer is full.
    pub fn push_overwrite(&mut self, value: u8) {
        if self.is_full() {
            tracing::trace!(
                evicted = self.buffer[self.head],
                "ring buffer full, overwriting oldest byte"
            );
            self.buffer[self.head] = value;
            self.head = (self.head + 1) % self.capacity;
        } else {
            let slot = self.front_index(self.len);
            self.buffer[slot] = value;
            self.len += 1;
        }
    }

    /// Appends all of `data` using the default overwrite policy.
    ///
    /// Without overwrite nothing is written unless the whole slice fits.
    pub fn extend(&mut self, data: &[u8]) -> Result<()> {
        if !self.overwrite && data.len() > self.free_space() {
            return Err(RingError::BufferFull {
                capacity: self.capacity,
            });
        }
        for &byte in data {
            self.push_overwrite(byte);
        }
        Ok(())
    }

    /// Removes a run of bytes from the front.
    ///
    /// * `None` drains everything stored.
    /// * `Some(n)` with `n > 0` removes exactly `n` bytes.
    /// * `Some(-k)` removes all but the newest `k` bytes.
    /// * `Some(0)` fails with [`RingError::InvalidCount`].
    pub fn shift_sequence(&mut self, count: Option<isize>) -> Result<Vec<u8>> {
        let take = match count {
            None => self.len,
            Some(0) => return Err(RingError::InvalidCount),
            Some(n) if n > 0 => {
                let requested = n.unsigned_abs();
                if requested > self.len {
                    return Err(RingError::InsufficientData {
                        requested,
                        available: self.len,
                    });
                }
                requested
            }
            Some(n) => {
                let keep = n.unsigned_abs();
                if keep >= self.len {
                    return Err(RingError::InsufficientData {
                        requested: keep,
                        available: self.len,
                    });
                }
                self.len - keep
            }
        };

        let mut out = Vec::with_capacity(take);
        for _ in 0..take {
            out.push(self.shift_byte()?);
        }
        Ok(out)
    }

    /// Removes and returns everything stored, oldest first.
    pub fn drain(&mut self) -> Vec<u8> {
        let out = self.to_vec();
        self.clear();
        out
    }

    /// Stored bytes, oldest first, without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len).map(move |i| self.read_at_front_unchecked(i))
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(RingBuffer::new(0).unwrap_err(), RingError::InvalidCapacity(0));
    }

    #[test]
    fn test_wraparound_indexing() {
        let mut buf = RingBuffer::new(4).unwrap();
        buf.extend(&[1, 2, 3]).unwrap();
        buf.shift_byte().unwrap();
        buf.shift_byte().unwrap();
        buf.extend(&[4, 5, 6]).unwrap();

        // head is now at physical slot 2, data wraps past the end
        assert_eq!(buf.to_vec(), vec![3, 4, 5, 6]);
        assert_eq!(buf.read_at_front(0), Ok(3));
        assert_eq!(buf.read_at_front(3), Ok(6));
        assert_eq!(buf.read_at_back(0), Ok(6));
        assert_eq!(buf.read_at_back(3), Ok(3));
    }

    #[test]
    fn test_unchecked_reads_wrap_huge_indices() {
        let mut buf = RingBuffer::new(3).unwrap();
        buf.extend(&[1, 2]).unwrap();
        buf.shift_byte().unwrap();

        // head is 1; usize::MAX % 3 == 0, so both land on a live byte
        assert_eq!(buf.read_at_front_unchecked(usize::MAX), 2);
        assert_eq!(buf.read_at_back_unchecked(usize::MAX), 2);
    }

    #[test]
    fn test_back_index_on_empty_buffer_does_not_panic() {
        let buf = RingBuffer::new(3).unwrap();
        let _ = buf.read_at_back_unchecked(0);
        let _ = buf.read_at_back_unchecked(7);
    }

    #[test]
    fn test_into_byte_bounds() {
        assert_eq!(255i32.into_byte(), Ok(255));
        assert_eq!(0usize.into_byte(), Ok(0));
        assert_eq!(256i32.into_byte(), Err(RingError::InvalidByteValue(256)));
        assert_eq!((-1i64).into_byte(), Err(RingError::InvalidByteValue(-1)));
    }

    #[test]
    fn test_clear_keeps_capacity_and_policy() {
        let mut buf = RingBuffer::with_overwrite(2, true).unwrap();
        buf.extend(&[9, 9, 9]).unwrap();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 2);
        assert!(buf.overwrite());
        assert_eq!(buf.shift_byte(), Err(RingError::BufferEmpty));
    }
}
