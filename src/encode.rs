//! A module for all encoding needs.
use crate::bits::BitPacker;
use crate::error::{LzwError, Result};
use crate::tree::Tree;
use crate::{Code, Variant, MAX_CODESIZE};

use log::{debug, trace};
use std::io::{self, BufRead, Write};

#[cfg(feature = "async")]
use futures::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// An incremental LZW encoder writing into `W`.
///
/// The clear code is written on construction. Data is added with [`consume`] in chunks of any
/// size, and [`finish`] terminates the code stream. Dropping the encoder without finishing it
/// leaves an incomplete stream in the sink.
///
/// [`consume`]: #method.consume
/// [`finish`]: #method.finish
pub struct Encoder<W> {
    /// The configured minimal code size.
    min_size: u8,
    /// The container convention.
    variant: Variant,
    /// The current encoding symbol tree.
    tree: Tree,
    /// The code corresponding to the currently read characters, if any were read yet.
    current_code: Option<Code>,
    /// The clear code for resetting the dictionary.
    clear_code: Code,
    /// The current code length.
    code_size: u8,
    /// The largest code that may be allocated with the current code length.
    limit: Code,
    /// Lowers the limit of each code length.
    limit_reduction: Code,
    /// The bit buffer for encoding.
    buffer: BitPacker<W>,
}

/// An adapter writing the code stream into an asynchronous sink.
///
/// See [`Encoder::into_async`] on how to create this type.
///
/// [`Encoder::into_async`]: struct.Encoder.html#method.into_async
#[cfg(feature = "async")]
pub struct IntoAsync<W> {
    encoder: Encoder<Vec<u8>>,
    writer: W,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder for symbols of `min_size` bits.
    ///
    /// The size must be between 1 and 8. GIF requires at least 2, TIFF always uses 8.
    pub fn new(writer: W, min_size: u8, variant: Variant) -> Result<Self> {
        if !(1..=8).contains(&min_size) {
            return Err(LzwError::InvalidConfiguration { code_size: min_size });
        }

        let clear_code = 1 << min_size;
        let code_size = min_size + 1;
        let limit_reduction = variant.limit_reduction();
        let mut encoder = Encoder {
            min_size,
            variant,
            tree: Tree::new(min_size),
            current_code: None,
            clear_code,
            code_size,
            limit: max_code(code_size, limit_reduction),
            limit_reduction,
            buffer: BitPacker::new(writer, variant.bit_order()),
        };

        debug!("starting {:?} code stream with {}-bit symbols", variant, min_size);
        encoder.buffer_code(clear_code)?;
        Ok(encoder)
    }

    /// Encode more symbols.
    ///
    /// The pending match is kept between calls so splitting the input differently does not
    /// change the output. Fails if a symbol is outside the alphabet, all symbols before it are
    /// encoded.
    pub fn consume(&mut self, symbols: &[u8]) -> Result<()> {
        for &ch in symbols {
            if self.min_size < 8 && ch >= 1 << self.min_size {
                return Err(LzwError::InvalidSymbol {
                    symbol: ch,
                    code_size: self.min_size,
                });
            }

            match self.tree.find(self.current_code, ch) {
                Some(code) => self.current_code = Some(code),
                None => {
                    // Every single symbol is found, so there is always a prefix here.
                    if let Some(prefix) = self.current_code {
                        self.push_code(prefix, ch)?;
                    }
                    self.current_code = Some(Code::from(ch));
                }
            }
        }

        Ok(())
    }

    /// Encode all data from a reader, returning the number of bytes read.
    ///
    /// This will drain the supplied reader. It will not encode an end marker.
    pub fn consume_from(&mut self, mut read: impl BufRead) -> Result<usize> {
        let mut bytes_read = 0;
        loop {
            let data = match read.fill_buf() {
                Ok(data) => data,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(LzwError::Read(err)),
            };

            if data.is_empty() {
                return Ok(bytes_read);
            }

            let len = data.len();
            self.consume(data)?;
            read.consume(len);
            bytes_read += len;
        }
    }

    /// Encode all data from a reader and terminate the stream.
    pub fn encode_all(mut self, read: impl BufRead) -> Result<W> {
        self.consume_from(read)?;
        self.finish()
    }

    /// Write the pending match and the end code, then flush the sink.
    pub fn finish(mut self) -> Result<W> {
        if let Some(code) = self.current_code.take() {
            self.buffer_code(code)?;

            // When reading this code, the decoder will add an extra entry to its table before
            // reading the end code. Thusly, it may increase its code size based on this
            // additional entry.
            if self.tree.next_code() > usize::from(self.limit) && self.code_size < MAX_CODESIZE {
                self.bump_code_size();
            }
        }

        let end = self.end_code();
        self.buffer_code(end)?;
        self.buffer.flush()?;
        debug!("finished code stream with {}-bit codes", self.code_size);
        Ok(self.buffer.into_inner())
    }

    /// The configured size of the symbols.
    pub fn min_code_size(&self) -> u8 {
        self.min_size
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The sink. Some codes may still be buffered and not written to it yet.
    pub fn get_ref(&self) -> &W {
        self.buffer.get_ref()
    }

    /// The sink. Writing to it corrupts the code stream.
    pub fn get_mut(&mut self) -> &mut W {
        self.buffer.get_mut()
    }

    /// Emit the longest match and add its extension by `ch` to the dictionary.
    fn push_code(&mut self, prefix: Code, ch: u8) -> Result<()> {
        self.buffer_code(prefix)?;

        let new_code = self.tree.insert(prefix, ch);
        if new_code > self.limit {
            if self.code_size == MAX_CODESIZE {
                self.buffer_code(self.clear_code)?;
                self.tree.reset(self.min_size);
                self.code_size = self.min_size + 1;
                self.limit = max_code(self.code_size, self.limit_reduction);
                debug!("dictionary full, restarting with {}-bit codes", self.code_size);
            } else {
                self.bump_code_size();
            }
        }

        Ok(())
    }

    fn bump_code_size(&mut self) {
        self.code_size += 1;
        self.limit = max_code(self.code_size, self.limit_reduction);
        trace!("code size increased to {} bits", self.code_size);
    }

    fn end_code(&self) -> Code {
        self.clear_code + 1
    }

    fn buffer_code(&mut self, code: Code) -> Result<()> {
        debug_assert!(u32::from(code) < 1 << self.code_size);
        self.buffer.write_bits(code, self.code_size)?;
        Ok(())
    }
}

#[cfg(feature = "async")]
impl Encoder<Vec<u8>> {
    /// Construct an encoder into an asynchronous writer.
    ///
    /// Bytes already in the vector are written first.
    pub fn into_async<W: AsyncWrite + Unpin>(self, writer: W) -> IntoAsync<W> {
        IntoAsync {
            encoder: self,
            writer,
        }
    }
}

#[cfg(feature = "async")]
impl<W: AsyncWrite + Unpin> IntoAsync<W> {
    /// Encode data from a reader and an end marker, returning the writer.
    pub async fn encode_all(mut self, mut read: impl AsyncBufRead + Unpin) -> Result<W> {
        loop {
            let data = read.fill_buf().await.map_err(LzwError::Read)?;
            if data.is_empty() {
                break;
            }

            let len = data.len();
            self.encoder.consume(data)?;
            read.consume_unpin(len);
            self.write_out().await?;
        }

        let IntoAsync { encoder, mut writer } = self;
        let tail = encoder.finish()?;
        writer.write_all(&tail[..]).await?;
        writer.flush().await?;
        Ok(writer)
    }

    async fn write_out(&mut self) -> Result<()> {
        let pending = self.encoder.get_mut();
        if !pending.is_empty() {
            self.writer.write_all(&pending[..]).await?;
            pending.clear();
        }
        Ok(())
    }
}

/// The largest code allowed with `code_size` bits.
fn max_code(code_size: u8, reduction: Code) -> Code {
    ((1 << code_size) - 1) - reduction
}
