pub mod galois;
pub mod poly;

mod decoder;

pub use decoder::ReedSolomon;

use crate::common::error::{DecodeError, DecodeResult};

// Rectifier for protected info words
//------------------------------------------------------------------------------

/// Recovers a BCH/Golay-protected info word by minimum Hamming distance
/// against the set of valid sequences. The code's full error-correcting
/// capacity is `err_capacity` bits.
pub fn rectify_info(info: u32, valid_sequences: &[u32], err_capacity: u32) -> DecodeResult<u32> {
    let best = *valid_sequences
        .iter()
        .min_by_key(|&n| (info ^ n).count_ones())
        .ok_or(DecodeError::InvalidInfo)?;

    if (info ^ best).count_ones() <= err_capacity {
        Ok(best)
    } else {
        Err(DecodeError::InvalidInfo)
    }
}

#[cfg(test)]
mod rectify_info_tests {
    use super::rectify_info;
    use crate::common::error::DecodeError;

    static VALID: [u32; 4] = [0b000000, 0b010111, 0b101011, 0b111100];

    #[test]
    fn test_exact_match() {
        assert_eq!(rectify_info(0b010111, &VALID, 1), Ok(0b010111));
    }

    #[test]
    fn test_one_bit_off() {
        assert_eq!(rectify_info(0b010101, &VALID, 1), Ok(0b010111));
    }

    #[test]
    fn test_beyond_capacity() {
        assert_eq!(rectify_info(0b001100, &VALID, 1), Err(DecodeError::InvalidInfo));
    }
}
