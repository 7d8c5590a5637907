use std::io;
use thiserror::Error;

/// Errors that can occur while encoding.
#[derive(Error, Debug)]
pub enum LzwError {
    /// The alphabet width is not one that GIF or TIFF can describe.
    #[error("invalid code size {code_size}, expected a value between 1 and 8")]
    InvalidConfiguration { code_size: u8 },
    /// A symbol does not fit into the configured alphabet.
    #[error("symbol {symbol} is out of range for a code size of {code_size}")]
    InvalidSymbol { symbol: u8, code_size: u8 },
    /// Reading the input failed.
    #[error("I/O error while reading the input")]
    Read(#[source] io::Error),
    /// The underlying sink failed. The encoder must be discarded.
    #[error("I/O error while writing the code stream")]
    Sink(#[from] io::Error),
}

/// Result type of all fallible encoder operations.
pub type Result<T> = core::result::Result<T, LzwError>;

impl From<LzwError> for io::Error {
    fn from(err: LzwError) -> Self {
        match err {
            LzwError::Sink(e) | LzwError::Read(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidInput, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LzwError;
    use std::io;

    #[test]
    fn sink_errors_pass_through_unchanged() {
        let err = LzwError::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        let back = io::Error::from(err);
        assert_eq!(back.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn configuration_errors_become_invalid_input() {
        let err = io::Error::from(LzwError::InvalidConfiguration { code_size: 9 });
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains('9'));
    }
}
