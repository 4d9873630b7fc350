//! Incremental UTF-8 decoding on top of a [`Document`].
//!
//! The decoder keeps a running count of bytes the document has already made
//! available but that have not been taken yet, so it never requests bytes it
//! already holds. A sequence whose continuation bytes land in a later read
//! is completed by requesting exactly the missing count.

use alloc::vec::Vec;

use bstr::BString;

use crate::{
    document::Document,
    error::{OutOfRange, TokenizeError},
    options::DEFAULT_READ_AHEAD,
};

/// Outcome of one decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadResult {
    /// The document has no more bytes.
    EndOfInput,
    /// One decoded scalar and the number of bytes still buffered after it.
    Codepoint { ch: char, buffered: usize },
}

impl ReadResult {
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput)
    }

    #[must_use]
    pub fn codepoint(&self) -> Option<char> {
        match self {
            Self::Codepoint { ch, .. } => Some(*ch),
            Self::EndOfInput => None,
        }
    }

    #[must_use]
    pub fn buffered(&self) -> usize {
        match self {
            Self::Codepoint { buffered, .. } => *buffered,
            Self::EndOfInput => 0,
        }
    }
}

/// Streaming UTF-8 decoder.
#[derive(Debug, Clone)]
pub struct Utf8Decoder {
    available: usize,
    offset: u64,
    read_ahead: usize,
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_READ_AHEAD)
    }
}

/// Smallest value a sequence of `len` bytes may encode.
fn shortest_form_floor(len: usize) -> u32 {
    match len {
        2 => 0x80,
        3 => 0x800,
        _ => 0x1_0000,
    }
}

impl Utf8Decoder {
    /// `read_ahead` is the byte count requested whenever nothing is
    /// buffered; zero is treated as one.
    #[must_use]
    pub fn new(read_ahead: usize) -> Self {
        Self {
            available: 0,
            offset: 0,
            read_ahead: read_ahead.max(1),
        }
    }

    /// Bytes made available by the document and not yet decoded.
    #[must_use]
    pub fn available(&self) -> usize {
        self.available
    }

    /// Byte offset of the next byte to decode.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Decodes the next scalar.
    ///
    /// # Errors
    ///
    /// Every error is fatal for the run. A read can fail, a sequence can be
    /// cut off by the end of input, a byte can be unable to lead or continue
    /// a sequence, and a sequence can be overlong or decode to something
    /// that is not a Unicode scalar.
    pub async fn decode<D: Document>(
        &mut self,
        document: &mut D,
    ) -> Result<ReadResult, TokenizeError<D::Error>> {
        if self.available == 0 {
            self.available = document
                .request_bytes(self.read_ahead)
                .await
                .map_err(TokenizeError::Document)?;
            if self.available == 0 {
                return Ok(ReadResult::EndOfInput);
            }
        }

        let start = self.offset;
        let lead = self.take(document)?;
        let (len, high) = match lead {
            0x00..=0x7F => {
                return Ok(ReadResult::Codepoint {
                    ch: char::from(lead),
                    buffered: self.available,
                });
            }
            0xC0..=0xDF => (2, lead & 0x1F),
            0xE0..=0xEF => (3, lead & 0x0F),
            0xF0..=0xF7 => (4, lead & 0x07),
            _ => {
                return Err(TokenizeError::InvalidLeadByte {
                    offset: start,
                    byte: lead,
                });
            }
        };

        let continuation = len - 1;
        while self.available < continuation {
            let arrived = document
                .request_bytes(continuation - self.available)
                .await
                .map_err(TokenizeError::Document)?;
            if arrived == 0 {
                let mut bytes = Vec::with_capacity(len);
                bytes.push(lead);
                while self.available > 0 {
                    bytes.push(self.take(document)?);
                }
                return Err(TokenizeError::MalformedSequence {
                    offset: start,
                    expected: len,
                    bytes: BString::from(bytes),
                });
            }
            self.available += arrived;
        }

        let mut bytes = [lead, 0, 0, 0];
        let mut value = u32::from(high);
        for i in 1..len {
            let byte = self.take(document)?;
            bytes[i] = byte;
            if byte & 0xC0 != 0x80 {
                return Err(TokenizeError::InvalidContinuation {
                    offset: start,
                    bytes: BString::from(&bytes[..=i]),
                });
            }
            value = (value << 6) | u32::from(byte & 0x3F);
        }
        if value < shortest_form_floor(len) {
            return Err(TokenizeError::OverlongEncoding {
                offset: start,
                value,
            });
        }
        let Some(ch) = char::from_u32(value) else {
            return Err(TokenizeError::InvalidCodepoint {
                offset: start,
                value,
            });
        };
        Ok(ReadResult::Codepoint {
            ch,
            buffered: self.available,
        })
    }

    /// Byte count requested whenever nothing is buffered.
    #[must_use]
    pub fn read_ahead(&self) -> usize {
        self.read_ahead
    }

    fn take<D: Document>(&mut self, document: &mut D) -> Result<u8, OutOfRange> {
        let byte = document.next_byte()?;
        self.available -= 1;
        self.offset += 1;
        Ok(byte)
    }
}
