//! # Incremental LZW encoder for GIF and TIFF
//!
//! This crate provides an [`Encoder`] that turns a stream of symbols into variable-width LZW
//! codes and packs them into a byte sink. The data may be fed in chunks of any size over many
//! calls, the output does not depend on how the input was split.
//!
//! The code stream starts with a clear code and ends with an end code which are defined as
//! follows:
//!
//!  * `CLEAR_CODE == 1 << code_size`
//!  * `END_CODE   == CLEAR_CODE + 1`
//!
//! Codes start out `code_size + 1` bits wide and grow up to 12 bits. When the dictionary would
//! need a thirteenth bit the encoder emits another clear code and starts over.
//!
//! Two container conventions are supported, see [`Variant`]. GIF packs codes least significant
//! bit first, TIFF packs them most significant bit first and switches to a wider code one entry
//! earlier.
//!
//! Examplary use of the encoder:
//!
//! ```
//! use welch::{Encoder, Variant};
//! let data = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let mut enc = Encoder::new(Vec::new(), 8, Variant::Gif).unwrap();
//! enc.consume(&data[..12]).unwrap();
//! enc.consume(&data[12..]).unwrap();
//! let compressed = enc.finish().unwrap();
//! assert!(!compressed.is_empty());
//! ```
pub(crate) const MAX_CODESIZE: u8 = 12;
pub(crate) const MAX_ENTRIES: usize = 1 << MAX_CODESIZE as usize;

/// Alias for a LZW code point
pub(crate) type Code = u16;

/// The order of bits in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitOrder {
    /// The most significant bit is processed first.
    Msb,
    /// The least significant bit is processed first.
    Lsb,
}

/// The container convention the code stream has to be compatible with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Codes are packed least significant bit first and the code size switches when the next
    /// code no longer fits.
    Gif,
    /// Codes are packed most significant bit first and the code size switches one code early.
    ///
    /// Widely deployed TIFF decoders grow their code size one entry before it is required. The
    /// encoder has to do the same to stay in sync with them.
    Tiff,
}

impl Variant {
    /// The bit order of the packed codes.
    pub fn bit_order(self) -> BitOrder {
        match self {
            Variant::Gif => BitOrder::Lsb,
            Variant::Tiff => BitOrder::Msb,
        }
    }

    /// By how much the largest code of each width is lowered.
    pub(crate) fn limit_reduction(self) -> Code {
        match self {
            Variant::Gif => 0,
            Variant::Tiff => 1,
        }
    }
}

pub mod bits;
pub mod encode;
mod error;
mod tree;

pub use crate::encode::Encoder;
#[cfg(feature = "async")]
pub use crate::encode::IntoAsync;
pub use crate::error::{LzwError, Result};

#[cfg(test)]
mod tests {
    use super::{BitOrder, Variant};

    #[test]
    fn variants_resolve_bit_order() {
        assert_eq!(Variant::Gif.bit_order(), BitOrder::Lsb);
        assert_eq!(Variant::Tiff.bit_order(), BitOrder::Msb);
        assert_eq!(Variant::Gif.limit_reduction(), 0);
        assert_eq!(Variant::Tiff.limit_reduction(), 1);
    }
}
