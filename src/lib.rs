//! Core decoding engine for 2D matrix symbologies: bit containers, Galois
//! field arithmetic with Reed-Solomon correction, and the full QR decode
//! pipeline from sampled module grid to text.

pub mod common;
pub mod datamatrix;
pub mod qr;

pub use common::bits::{BitArray, BitStream};
pub use common::charset::CharacterSet;
pub use common::decoded::{DecodeHints, DecoderMetadata, DecoderResult, StructuredAppend};
pub use common::error::{DecodeError, DecodeResult};
pub use common::matrix::BitMatrix;
pub use datamatrix::{SymbolInfo, SymbolShape};
pub use qr::{decode, ECLevel, MaskPattern, Version};
