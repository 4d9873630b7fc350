//! Pull-based byte sources.
//!
//! A [`Document`] hands out bytes in two steps: [`request_bytes`] makes up to
//! `count` more bytes available and reports how many arrived, then
//! [`next_byte`] takes them one at a time. The request is the only await
//! point of a tokenizer run; everything after it is synchronous.
//!
//! [`request_bytes`]: Document::request_bytes
//! [`next_byte`]: Document::next_byte

use core::{cmp, convert::Infallible};

use bstr::BStr;

use crate::error::OutOfRange;

/// A byte source the tokenizer pulls from.
///
/// Invariants an implementation must keep:
/// - bytes reported by `request_bytes` stay available to `next_byte` until
///   they are taken;
/// - asking for more than remains is allowed and yields a short count;
/// - once the input is exhausted, `request_bytes` keeps returning `Ok(0)`.
#[allow(async_fn_in_trait)]
pub trait Document {
    /// Failure of the underlying read primitive (I/O, cancellation, ...).
    type Error: core::error::Error;

    /// Makes up to `count` further bytes available. Returns the number of
    /// bytes that became available, `0` at the end of input.
    async fn request_bytes(&mut self, count: usize) -> Result<usize, Self::Error>;

    /// Takes the next requested byte.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if no requested byte is left.
    fn next_byte(&mut self) -> Result<u8, OutOfRange>;
}

/// An in-memory document over a byte slice.
///
/// Serves as many bytes as asked for per request.
#[derive(Debug, Clone)]
pub struct SliceDocument<'a> {
    bytes: &'a [u8],
    read: usize,
    consumed: usize,
}

impl<'a> SliceDocument<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            read: 0,
            consumed: 0,
        }
    }

    /// Bytes delivered by `request_bytes` so far.
    #[must_use]
    pub fn bytes_read(&self) -> usize {
        self.read
    }

    /// Bytes taken by `next_byte` so far.
    #[must_use]
    pub fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    /// The bytes not yet consumed, requested or not.
    #[must_use]
    pub fn remaining(&self) -> &'a BStr {
        BStr::new(&self.bytes[self.consumed..])
    }

    fn serve(&mut self, count: usize) -> usize {
        let n = cmp::min(count, self.bytes.len() - self.read);
        self.read += n;
        n
    }
}

impl<'a> From<&'a str> for SliceDocument<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for SliceDocument<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl Document for SliceDocument<'_> {
    type Error = Infallible;

    async fn request_bytes(&mut self, count: usize) -> Result<usize, Infallible> {
        Ok(self.serve(count))
    }

    fn next_byte(&mut self) -> Result<u8, OutOfRange> {
        if self.consumed >= self.read {
            return Err(OutOfRange);
        }
        let byte = self.bytes[self.consumed];
        self.consumed += 1;
        Ok(byte)
    }
}

/// An in-memory document that delivers at most `chunk` bytes per request.
///
/// Multi-byte sequences end up split across requests, the way they are
/// when bytes trickle in from a socket.
#[derive(Debug, Clone)]
pub struct ChunkedDocument<'a> {
    inner: SliceDocument<'a>,
    chunk: usize,
}

impl<'a> ChunkedDocument<'a> {
    /// A `chunk` of zero is treated as one.
    #[must_use]
    pub fn new(bytes: &'a [u8], chunk: usize) -> Self {
        Self {
            inner: SliceDocument::new(bytes),
            chunk: chunk.max(1),
        }
    }

    #[must_use]
    pub fn bytes_read(&self) -> usize {
        self.inner.bytes_read()
    }

    #[must_use]
    pub fn bytes_consumed(&self) -> usize {
        self.inner.bytes_consumed()
    }
}

impl Document for ChunkedDocument<'_> {
    type Error = Infallible;

    async fn request_bytes(&mut self, count: usize) -> Result<usize, Infallible> {
        Ok(self.inner.serve(cmp::min(count, self.chunk)))
    }

    fn next_byte(&mut self) -> Result<u8, OutOfRange> {
        self.inner.next_byte()
    }
}

#[cfg(feature = "tokio")]
pub use reader::ReaderDocument;

#[cfg(feature = "tokio")]
mod reader {
    use alloc::{collections::VecDeque, vec::Vec};

    use tokio::io::{AsyncRead, AsyncReadExt};

    use super::Document;
    use crate::error::OutOfRange;

    /// Upper bound on the bytes one request reads.
    const MAX_READ: usize = 8 * 1024;

    /// A document over any [`AsyncRead`].
    ///
    /// Each request performs at most one `read` of at most 8 KiB on the
    /// reader, so a request may come back short; the decoder asks again when
    /// it needs more.
    /// Cancellation and timeouts are whatever the reader implements.
    #[derive(Debug)]
    pub struct ReaderDocument<R> {
        reader: R,
        pending: VecDeque<u8>,
        scratch: Vec<u8>,
        finished: bool,
        read: u64,
        consumed: u64,
    }

    impl<R: AsyncRead + Unpin> ReaderDocument<R> {
        pub fn new(reader: R) -> Self {
            Self {
                reader,
                pending: VecDeque::new(),
                scratch: Vec::new(),
                finished: false,
                read: 0,
                consumed: 0,
            }
        }

        #[must_use]
        pub fn bytes_read(&self) -> u64 {
            self.read
        }

        #[must_use]
        pub fn bytes_consumed(&self) -> u64 {
            self.consumed
        }

        pub fn into_inner(self) -> R {
            self.reader
        }
    }

    impl<R: AsyncRead + Unpin> Document for ReaderDocument<R> {
        type Error = std::io::Error;

        async fn request_bytes(&mut self, count: usize) -> Result<usize, std::io::Error> {
            if self.finished || count == 0 {
                return Ok(0);
            }
            let count = count.min(MAX_READ);
            if self.scratch.len() < count {
                self.scratch.resize(count, 0);
            }
            let n = self.reader.read(&mut self.scratch[..count]).await?;
            if n == 0 {
                self.finished = true;
            }
            self.pending.extend(&self.scratch[..n]);
            self.read += n as u64;
            Ok(n)
        }

        fn next_byte(&mut self) -> Result<u8, OutOfRange> {
            let byte = self.pending.pop_front().ok_or(OutOfRange)?;
            self.consumed += 1;
            Ok(byte)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::block_on;

    #[test]
    fn slice_document_serves_short_counts_then_zero() {
        let mut doc = SliceDocument::from("abc");
        assert_eq!(block_on(doc.request_bytes(2)), Ok(2));
        assert_eq!(block_on(doc.request_bytes(5)), Ok(1));
        assert_eq!(block_on(doc.request_bytes(5)), Ok(0));
        assert_eq!(block_on(doc.request_bytes(5)), Ok(0));
        assert_eq!(doc.bytes_read(), 3);
    }

    #[test]
    fn next_byte_requires_a_prior_request() {
        let mut doc = SliceDocument::from("ab");
        assert_eq!(doc.next_byte(), Err(OutOfRange));
        assert_eq!(block_on(doc.request_bytes(1)), Ok(1));
        assert_eq!(doc.next_byte(), Ok(b'a'));
        assert_eq!(doc.next_byte(), Err(OutOfRange));
        assert_eq!(doc.bytes_consumed(), 1);
        assert_eq!(doc.remaining(), "b");
    }

    #[test]
    fn chunked_document_caps_each_request() {
        let mut doc = ChunkedDocument::new("héllo".as_bytes(), 2);
        assert_eq!(block_on(doc.request_bytes(10)), Ok(2));
        assert_eq!(block_on(doc.request_bytes(10)), Ok(2));
        assert_eq!(block_on(doc.request_bytes(10)), Ok(2));
        assert_eq!(block_on(doc.request_bytes(10)), Ok(0));
        assert_eq!(doc.bytes_read(), 6);
    }

    #[test]
    fn chunk_of_zero_still_makes_progress() {
        let mut doc = ChunkedDocument::new(b"x", 0);
        assert_eq!(block_on(doc.request_bytes(4)), Ok(1));
    }
}
