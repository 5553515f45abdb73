pub mod blocks;
pub mod codec;
pub mod mask;
pub mod metadata;
pub mod parser;

pub use mask::MaskPattern;
pub use metadata::{ECLevel, Version};
pub use parser::SymbolParser;

use blocks::DataBlock;
use codec::decode_bitstream;

use crate::common::decoded::{DecodeHints, DecoderMetadata, DecoderResult};
use crate::common::ec::galois::qr_field;
use crate::common::ec::ReedSolomon;
use crate::common::error::{DecodeError, DecodeResult};
use crate::common::matrix::BitMatrix;

// Decoder
//------------------------------------------------------------------------------

/// Decodes a sampled module grid. Tries the straight orientation first; if
/// that fails and the mirrored orientation reads a self-consistent version
/// and format, retries on the transpose and annotates the result. The error
/// surfaced on failure is always the straight pass's.
pub fn decode(bits: &BitMatrix, hints: &DecodeHints) -> DecodeResult<DecoderResult> {
    let mut parser = SymbolParser::new(bits)?;

    let straight_error = match decode_with_parser(&mut parser, hints) {
        Ok(result) => return Ok(result),
        Err(e) => e,
    };

    // Probe the mirrored orientation before committing to a transpose
    parser.remask();
    parser.set_mirror(true);
    if parser.read_version().is_ok() && parser.read_format_info().is_ok() {
        parser.mirror();
        if let Ok(mut result) = decode_with_parser(&mut parser, hints) {
            result.other = Some(DecoderMetadata { mirrored: true });
            return Ok(result);
        }
    }

    Err(straight_error)
}

fn decode_with_parser(
    parser: &mut SymbolParser,
    hints: &DecodeHints,
) -> DecodeResult<DecoderResult> {
    let version = parser.read_version()?;
    let (ecl, _) = parser.read_format_info()?;
    let raw = parser.read_codewords()?;

    let blocks = DataBlock::build(&raw, version, ecl)?;
    let total_data: usize = blocks.iter().map(DataBlock::num_data_codewords).sum();

    let rs = ReedSolomon::new(qr_field());
    let mut data = Vec::with_capacity(total_data);
    let mut errors_corrected = 0;
    for block in &blocks {
        errors_corrected += correct_block(&rs, block, &mut data)?;
    }

    let mut result = decode_bitstream(&data, version, ecl, hints)?;
    result.errors_corrected = errors_corrected;
    Ok(result)
}

/// Runs one block through the corrector and appends its data codewords.
/// Reed-Solomon internals surface as the checksum error here.
fn correct_block(
    rs: &ReedSolomon,
    block: &DataBlock,
    data: &mut Vec<u8>,
) -> DecodeResult<usize> {
    let mut words: Vec<u32> = block.codewords().iter().map(|&b| b as u32).collect();
    let two_s = words.len() - block.num_data_codewords();
    let corrected = rs.correct(&mut words, two_s).map_err(|_| DecodeError::TooManyErrors)?;
    data.extend(words[..block.num_data_codewords()].iter().map(|&w| w as u8));
    Ok(corrected)
}
