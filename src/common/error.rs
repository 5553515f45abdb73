use std::fmt::{Debug, Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum DecodeError {
    // Caller misuse
    OutOfBounds,
    EmptyRegion,
    RaggedGrid,
    NoSymbolFits,

    // Symbol structure
    SymbolNotFound,
    InvalidGridSize,
    InvalidInfo,
    InvalidFormatInfo,
    InvalidVersionInfo,
    CodewordMismatch,

    // Bit stream
    UnsupportedMode,
    StreamTruncated,
    InvalidChunk,
    InvalidCharset,

    // Error correction
    TooManyErrors,

    // Reed-Solomon internals, mapped to TooManyErrors at the block boundary
    SingularLocator,
    DivisionFailed,
    DegreeMismatch,
    BadErrorLocation,

    // Galois arithmetic misuse, indicates a bug rather than bad input
    ZeroDivisor,
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            Self::OutOfBounds => "Coordinates outside the grid",
            Self::EmptyRegion => "Region width and height must be at least 1",
            Self::RaggedGrid => "Rows have differing lengths",
            Self::NoSymbolFits => "No symbol large enough for the data",

            Self::SymbolNotFound => "Symbol not found",
            Self::InvalidGridSize => "Grid size does not match any symbol version",
            Self::InvalidInfo => "Info bits beyond correction capacity",
            Self::InvalidFormatInfo => "Invalid format info detected",
            Self::InvalidVersionInfo => "Invalid version info detected",
            Self::CodewordMismatch => "Codeword stream does not match version capacity",

            Self::UnsupportedMode => "Unsupported mode indicator",
            Self::StreamTruncated => "Bit stream ended mid-segment",
            Self::InvalidChunk => "Encoded chunk out of range",
            Self::InvalidCharset => "Unknown or unsupported character set",

            Self::TooManyErrors => "Too many errors to correct successfully",

            Self::SingularLocator => "Error locator is singular",
            Self::DivisionFailed => "Polynomial division failed to reduce degree",
            Self::DegreeMismatch => "Root count does not match locator degree",
            Self::BadErrorLocation => "Bad error location",

            Self::ZeroDivisor => "Division by zero in field arithmetic",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for DecodeError {}

pub type DecodeResult<T> = Result<T, DecodeError>;
