//! Packing of variable width codes into bytes.
use crate::BitOrder;
use std::io::{self, Write};

/// Widest code the packer accepts.
const MAX_WIDTH: u8 = 16;

/// Accumulates codes of varying width and writes the completed bytes to a sink.
pub struct BitPacker<W> {
    /// The order in which bits fill a byte.
    order: BitOrder,
    /// The buffer bits.
    buffer: u64,
    /// The number of valid buffer bits.
    bits_in_buffer: u8,
    writer: W,
}

impl<W: Write> BitPacker<W> {
    pub fn new(writer: W, order: BitOrder) -> Self {
        BitPacker {
            order,
            buffer: 0,
            bits_in_buffer: 0,
            writer,
        }
    }

    /// Append the `width` low bits of `code`.
    ///
    /// Completed bytes are written once the buffer runs out of room for another code, so a
    /// failure of the sink may be reported for an earlier code.
    pub fn write_bits(&mut self, code: u16, width: u8) -> io::Result<()> {
        debug_assert!(width > 0 && width <= MAX_WIDTH);
        let code = u64::from(code) & ((1u64 << width) - 1);

        match self.order {
            BitOrder::Msb => {
                let shift = 64 - self.bits_in_buffer - width;
                self.buffer |= code << shift;
            }
            BitOrder::Lsb => {
                self.buffer |= code << self.bits_in_buffer;
            }
        }
        self.bits_in_buffer += width;

        if self.bits_in_buffer + MAX_WIDTH > 64 {
            self.push_out()?;
        }

        Ok(())
    }

    /// Pad the last partial byte with zeros and write out everything.
    pub fn flush(&mut self) -> io::Result<()> {
        let to_byte = self.bits_in_buffer.wrapping_neg() & 0x7;
        self.bits_in_buffer += to_byte;
        self.push_out()?;
        self.writer.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Recover the sink. Bits that were not flushed are lost.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write all full bytes of the buffer.
    fn push_out(&mut self) -> io::Result<()> {
        let count = usize::from(self.bits_in_buffer / 8);
        if count == 0 {
            return Ok(());
        }

        let mut bytes = [0u8; 8];
        match self.order {
            BitOrder::Msb => {
                for (i, b) in bytes[..count].iter_mut().enumerate() {
                    *b = (self.buffer >> (56 - 8 * i)) as u8;
                }
            }
            BitOrder::Lsb => {
                for (i, b) in bytes[..count].iter_mut().enumerate() {
                    *b = (self.buffer >> (8 * i)) as u8;
                }
            }
        }
        self.writer.write_all(&bytes[..count])?;

        // A full buffer can not be shifted by its width in one step.
        let consumed = 8 * count as u32;
        self.buffer = match self.order {
            BitOrder::Msb => self.buffer.checked_shl(consumed).unwrap_or(0),
            BitOrder::Lsb => self.buffer.checked_shr(consumed).unwrap_or(0),
        };
        self.bits_in_buffer -= 8 * count as u8;
        Ok(())
    }
}
