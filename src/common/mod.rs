pub mod bits;
pub mod charset;
pub mod decoded;
pub mod ec;
pub mod error;
pub mod matrix;
pub mod pattern;

pub use bits::{BitArray, BitStream};
pub use charset::CharacterSet;
pub use decoded::{DecodeHints, DecoderMetadata, DecoderResult, StructuredAppend};
pub use ec::{galois, poly::GfPoly, rectify_info, ReedSolomon};
pub use error::{DecodeError, DecodeResult};
pub use matrix::BitMatrix;
