//! Byte sources for the decoder.
//!
//! The decoder only needs to read single bytes, peek one byte ahead, and read
//! exactly `n` bytes or learn that fewer are available. [`SliceRead`] serves
//! borrowed buffers; [`IoRead`] adapts any [`std::io::Read`]. Wrap unbuffered
//! readers (files, sockets) in a [`std::io::BufReader`], since tags are read
//! one byte at a time.

use crate::{Error, Result};
use std::io::{self, Read as _};

/// A source of encoded bytes.
pub trait Read {
    /// Consumes the next byte, or returns `None` at the end of input.
    fn next(&mut self) -> Result<Option<u8>>;

    /// Returns the next byte without consuming it.
    fn peek(&mut self) -> Result<Option<u8>>;

    /// Fills `buf` completely or fails with [`Error::Truncated`].
    fn read_exact(&mut self, buf: &mut [u8], expected: &'static str) -> Result<()>;

    /// Reads exactly `len` bytes into a new buffer or fails with [`Error::Truncated`].
    ///
    /// Implementations must not trust `len` for allocation: a hostile length
    /// prefix should fail on missing data, not on allocating it.
    fn read_vec(&mut self, len: u64, expected: &'static str) -> Result<Vec<u8>>;

    /// Number of bytes consumed so far.
    fn offset(&self) -> u64;
}

/// Reads from a borrowed byte slice.
pub struct SliceRead<'a> {
    slice: &'a [u8],
    index: usize,
}

impl<'a> SliceRead<'a> {
    pub fn new(slice: &'a [u8]) -> Self {
        SliceRead { slice, index: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.slice[self.index..]
    }
}

impl<'a> Read for SliceRead<'a> {
    #[inline]
    fn next(&mut self) -> Result<Option<u8>> {
        let byte = self.slice.get(self.index).copied();
        if byte.is_some() {
            self.index += 1;
        }
        Ok(byte)
    }

    #[inline]
    fn peek(&mut self) -> Result<Option<u8>> {
        Ok(self.slice.get(self.index).copied())
    }

    fn read_exact(&mut self, buf: &mut [u8], expected: &'static str) -> Result<()> {
        let end = self.index + buf.len();
        let src = self
            .slice
            .get(self.index..end)
            .ok_or_else(|| Error::truncated(self.offset(), expected))?;
        buf.copy_from_slice(src);
        self.index = end;
        Ok(())
    }

    fn read_vec(&mut self, len: u64, expected: &'static str) -> Result<Vec<u8>> {
        let available = self.slice.len() - self.index;
        let len = match usize::try_from(len) {
            Ok(len) if len <= available => len,
            _ => return Err(Error::truncated(self.offset(), expected)),
        };
        let out = self.slice[self.index..self.index + len].to_vec();
        self.index += len;
        Ok(out)
    }

    fn offset(&self) -> u64 {
        self.index as u64
    }
}

/// Reads from any [`std::io::Read`], keeping one byte of lookahead.
pub struct IoRead<R> {
    reader: R,
    peeked: Option<u8>,
    offset: u64,
}

impl<R: io::Read> IoRead<R> {
    pub fn new(reader: R) -> Self {
        IoRead {
            reader,
            peeked: None,
            offset: 0,
        }
    }

    /// Returns the underlying reader. A byte that was peeked but not consumed is lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fetch(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io(&e)),
            }
        }
    }
}

impl<R: io::Read> Read for IoRead<R> {
    fn next(&mut self) -> Result<Option<u8>> {
        let byte = match self.peeked.take() {
            Some(byte) => Some(byte),
            None => self.fetch()?,
        };
        if byte.is_some() {
            self.offset += 1;
        }
        Ok(byte)
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = self.fetch()?;
        }
        Ok(self.peeked)
    }

    fn read_exact(&mut self, buf: &mut [u8], expected: &'static str) -> Result<()> {
        let start = self.offset;
        let mut filled = 0;
        if !buf.is_empty() {
            if let Some(byte) = self.peeked.take() {
                buf[0] = byte;
                filled = 1;
            }
        }
        match self.reader.read_exact(&mut buf[filled..]) {
            Ok(()) => {
                self.offset += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(Error::truncated(start, expected))
            }
            Err(e) => Err(Error::io(&e)),
        }
    }

    fn read_vec(&mut self, len: u64, expected: &'static str) -> Result<Vec<u8>> {
        let start = self.offset;
        let mut out = Vec::new();
        let mut remaining = len;
        if remaining > 0 {
            if let Some(byte) = self.peeked.take() {
                out.push(byte);
                remaining -= 1;
            }
        }
        (&mut self.reader)
            .take(remaining)
            .read_to_end(&mut out)
            .map_err(|e| Error::io(&e))?;
        self.offset += out.len() as u64;
        if (out.len() as u64) < len {
            return Err(Error::truncated(start, expected));
        }
        Ok(out)
    }

    fn offset(&self) -> u64 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_slice_read_bytes() {
        let mut read = SliceRead::new(&[1, 2, 3, 4]);
        assert_eq!(read.peek().unwrap(), Some(1));
        assert_eq!(read.next().unwrap(), Some(1));

        let mut buf = [0u8; 2];
        read.read_exact(&mut buf, "pair").unwrap();
        assert_eq!(buf, [2, 3]);
        assert_eq!(read.offset(), 3);
        assert_eq!(read.remaining(), &[4]);
    }

    #[test]
    fn test_slice_read_truncation() {
        let mut read = SliceRead::new(&[1, 2]);
        let err = read.read_vec(3, "payload").unwrap_err();
        assert_eq!(err, Error::truncated(0, "payload"));

        let err = read.read_vec(u64::MAX, "payload").unwrap_err();
        assert!(matches!(err, Error::Truncated { .. }));
        assert_eq!(read.offset(), 0);
    }

    #[test]
    fn test_io_read_with_lookahead() {
        let mut read = IoRead::new(Cursor::new(vec![9, 8, 7, 6]));
        assert_eq!(read.peek().unwrap(), Some(9));
        assert_eq!(read.offset(), 0);

        let mut buf = [0u8; 2];
        read.read_exact(&mut buf, "pair").unwrap();
        assert_eq!(buf, [9, 8]);

        assert_eq!(read.peek().unwrap(), Some(7));
        assert_eq!(read.read_vec(2, "rest").unwrap(), vec![7, 6]);
        assert_eq!(read.offset(), 4);
        assert_eq!(read.next().unwrap(), None);
    }

    #[test]
    fn test_io_read_huge_length_fails_without_allocating() {
        let mut read = IoRead::new(Cursor::new(vec![1, 2, 3]));
        let err = read.read_vec(u64::MAX, "blob payload").unwrap_err();
        assert_eq!(err, Error::truncated(0, "blob payload"));
    }
}
