use super::charset::CharacterSet;

// Decoder output
//------------------------------------------------------------------------------

/// Structured-append marker: this symbol's position in a multi-symbol
/// sequence and the parity byte shared by all of them. Reassembly is the
/// caller's concern.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct StructuredAppend {
    pub sequence: u8,
    pub parity: u8,
}

/// Out-of-band signals about how the symbol was read.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct DecoderMetadata {
    /// The symbol was mirror-printed and read through its transpose.
    pub mirrored: bool,
}

/// Everything a successful decode produces: the corrected data codewords,
/// the interpreted text, byte-mode segments as raw bytes, and bookkeeping
/// about the error correction that was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderResult {
    pub raw_bytes: Vec<u8>,
    pub text: String,
    pub byte_segments: Vec<Vec<u8>>,
    /// Error-correction level the symbol was encoded at, e.g. "L"
    pub ec_level: String,
    pub errors_corrected: usize,
    /// Erasure count; stays 0 for symbologies without erasure decoding
    pub erasures: usize,
    pub charset: CharacterSet,
    pub structured_append: Option<StructuredAppend>,
    pub other: Option<DecoderMetadata>,
}

impl DecoderResult {
    pub fn mirrored(&self) -> bool {
        self.other.is_some_and(|m| m.mirrored)
    }
}

// Decode hints
//------------------------------------------------------------------------------

/// Caller-supplied hints. A character set hint replaces the ISO-8859-1
/// default for byte segments; an in-stream ECI designator still wins.
#[derive(Debug, Default, Copy, Clone)]
pub struct DecodeHints {
    pub character_set: Option<CharacterSet>,
}
