use super::metadata::{ECLevel, Version};
use crate::common::bits::BitStream;
use crate::common::charset::CharacterSet;
use crate::common::decoded::{DecodeHints, DecoderResult, StructuredAppend};
use crate::common::error::{DecodeError, DecodeResult};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Terminator = 0b0000,
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    StructuredAppend = 0b0011,
    Byte = 0b0100,
    Fnc1First = 0b0101,
    Eci = 0b0111,
    Kanji = 0b1000,
    Fnc1Second = 0b1001,
    Hanzi = 0b1101,
}

impl Mode {
    pub fn from_bits(bits: u16) -> DecodeResult<Self> {
        match bits {
            0b0000 => Ok(Self::Terminator),
            0b0001 => Ok(Self::Numeric),
            0b0010 => Ok(Self::Alphanumeric),
            0b0011 => Ok(Self::StructuredAppend),
            0b0100 => Ok(Self::Byte),
            0b0101 => Ok(Self::Fnc1First),
            0b0111 => Ok(Self::Eci),
            0b1000 => Ok(Self::Kanji),
            0b1001 => Ok(Self::Fnc1Second),
            0b1101 => Ok(Self::Hanzi),
            _ => Err(DecodeError::UnsupportedMode),
        }
    }

    /// Width of the character count field for this mode at this version.
    pub fn char_count_bits(self, version: Version) -> usize {
        let class = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Self::Numeric => [10, 12, 14][class],
            Self::Alphanumeric => [9, 11, 13][class],
            Self::Byte => [8, 16, 16][class],
            Self::Kanji | Self::Hanzi => [8, 10, 12][class],
            _ => 0,
        }
    }
}

static ALPHANUMERIC_CHARS: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// ASCII group separator, what FNC1 turns a lone '%' into.
const GS: char = '\u{1D}';

// Bit stream interpreter
//------------------------------------------------------------------------------

/// Interprets the corrected data codewords as a mode-segmented bit stream
/// and assembles the final text and byte segments.
pub fn decode_bitstream(
    data: &[u8],
    version: Version,
    ecl: ECLevel,
    hints: &DecodeHints,
) -> DecodeResult<DecoderResult> {
    let mut bits = BitStream::from(data);
    let mut text = String::new();
    let mut byte_segments: Vec<Vec<u8>> = Vec::new();
    let mut structured_append = None;
    let mut fnc1 = false;
    // ISO-8859-1 unless the caller hints otherwise; an ECI designator
    // overrides both
    let mut charset = hints.character_set.unwrap_or(CharacterSet::Iso8859_1);

    loop {
        // Shorter-than-terminator padding ends the stream
        let mode = if bits.remaining() < 4 {
            Mode::Terminator
        } else {
            Mode::from_bits(bits.take_bits(4).ok_or(DecodeError::StreamTruncated)?)?
        };

        match mode {
            Mode::Terminator => break,
            Mode::Numeric => {
                let count = take_count(&mut bits, mode, version)?;
                take_numeric(&mut bits, count, &mut text)?;
            }
            Mode::Alphanumeric => {
                let count = take_count(&mut bits, mode, version)?;
                take_alphanumeric(&mut bits, count, fnc1, &mut text)?;
            }
            Mode::Byte => {
                let count = take_count(&mut bits, mode, version)?;
                let mut bytes = Vec::with_capacity(count);
                for _ in 0..count {
                    bytes.push(bits.take_bits(8).ok_or(DecodeError::StreamTruncated)? as u8);
                }
                text.push_str(&charset.decode(&bytes));
                byte_segments.push(bytes);
            }
            Mode::Kanji => {
                let count = take_count(&mut bits, mode, version)?;
                take_kanji(&mut bits, count, &mut text)?;
            }
            Mode::Hanzi => {
                // A subset indicator precedes the count; only GB2312 is
                // assigned
                let subset = bits.take_bits(4).ok_or(DecodeError::StreamTruncated)?;
                if subset != 1 {
                    return Err(DecodeError::UnsupportedMode);
                }
                let count = take_count(&mut bits, mode, version)?;
                take_hanzi(&mut bits, count, &mut text)?;
            }
            Mode::Eci => {
                let value = take_eci_value(&mut bits)?;
                charset = CharacterSet::from_eci(value)?;
            }
            Mode::StructuredAppend => {
                let sequence = bits.take_bits(8).ok_or(DecodeError::StreamTruncated)? as u8;
                let parity = bits.take_bits(8).ok_or(DecodeError::StreamTruncated)? as u8;
                structured_append = Some(StructuredAppend { sequence, parity });
            }
            Mode::Fnc1First | Mode::Fnc1Second => {
                fnc1 = true;
            }
        }
    }

    Ok(DecoderResult {
        raw_bytes: data.to_vec(),
        text,
        byte_segments,
        ec_level: ecl.to_string(),
        errors_corrected: 0,
        erasures: 0,
        charset,
        structured_append,
        other: None,
    })
}

fn take_count(bits: &mut BitStream, mode: Mode, version: Version) -> DecodeResult<usize> {
    let width = mode.char_count_bits(version);
    debug_assert!(width > 0, "Mode {mode:?} has no count field");
    Ok(bits.take_bits(width).ok_or(DecodeError::StreamTruncated)? as usize)
}

fn take_numeric(bits: &mut BitStream, mut count: usize, text: &mut String) -> DecodeResult<()> {
    while count > 0 {
        let (digits, width, limit) = match count {
            1 => (1, 4, 10),
            2 => (2, 7, 100),
            _ => (3, 10, 1000),
        };
        let chunk = bits.take_bits(width).ok_or(DecodeError::StreamTruncated)?;
        if chunk >= limit {
            return Err(DecodeError::InvalidChunk);
        }
        let mut buf = [0u8; 3];
        let mut value = chunk;
        for i in (0..digits).rev() {
            buf[i] = b'0' + (value % 10) as u8;
            value /= 10;
        }
        for &b in &buf[..digits] {
            text.push(b as char);
        }
        count -= digits;
    }
    Ok(())
}

fn take_alphanumeric(
    bits: &mut BitStream,
    mut count: usize,
    fnc1: bool,
    text: &mut String,
) -> DecodeResult<()> {
    let start = text.len();
    while count > 0 {
        if count > 1 {
            let pair = bits.take_bits(11).ok_or(DecodeError::StreamTruncated)?;
            if pair >= 45 * 45 {
                return Err(DecodeError::InvalidChunk);
            }
            text.push(ALPHANUMERIC_CHARS[(pair / 45) as usize] as char);
            text.push(ALPHANUMERIC_CHARS[(pair % 45) as usize] as char);
            count -= 2;
        } else {
            let single = bits.take_bits(6).ok_or(DecodeError::StreamTruncated)?;
            if single >= 45 {
                return Err(DecodeError::InvalidChunk);
            }
            text.push(ALPHANUMERIC_CHARS[single as usize] as char);
            count -= 1;
        }
    }

    // Under FNC1, %% is a literal percent and a lone % is the GS separator
    if fnc1 {
        let segment: String = text.split_off(start);
        let mut rewritten = String::with_capacity(segment.len());
        let mut chars = segment.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == '%' {
                if chars.peek() == Some(&'%') {
                    chars.next();
                    rewritten.push('%');
                } else {
                    rewritten.push(GS);
                }
            } else {
                rewritten.push(ch);
            }
        }
        text.push_str(&rewritten);
    }
    Ok(())
}

fn take_kanji(bits: &mut BitStream, count: usize, text: &mut String) -> DecodeResult<()> {
    let mut sjis = Vec::with_capacity(count * 2);
    for _ in 0..count {
        let chunk = bits.take_bits(13).ok_or(DecodeError::StreamTruncated)? as u32;
        let assembled = ((chunk / 0xC0) << 8) | (chunk % 0xC0);
        let sjw = if assembled < 0x1F00 { assembled + 0x8140 } else { assembled + 0xC140 };
        sjis.push((sjw >> 8) as u8);
        sjis.push((sjw & 0xFF) as u8);
    }
    text.push_str(&CharacterSet::ShiftJis.decode(&sjis));
    Ok(())
}

fn take_hanzi(bits: &mut BitStream, count: usize, text: &mut String) -> DecodeResult<()> {
    let mut gb = Vec::with_capacity(count * 2);
    for _ in 0..count {
        let chunk = bits.take_bits(13).ok_or(DecodeError::StreamTruncated)? as u32;
        let assembled = ((chunk / 0x60) << 8) | (chunk % 0x60);
        let word = if assembled < 0x0A00 { assembled + 0xA1A1 } else { assembled + 0xA6A1 };
        gb.push((word >> 8) as u8);
        gb.push((word & 0xFF) as u8);
    }
    text.push_str(&CharacterSet::Gb2312.decode(&gb));
    Ok(())
}

/// ECI designator: 1, 2 or 3 bytes, the leading bits of the first byte
/// selecting the width.
fn take_eci_value(bits: &mut BitStream) -> DecodeResult<u32> {
    let first = bits.take_bits(8).ok_or(DecodeError::StreamTruncated)? as u32;
    if first & 0x80 == 0 {
        return Ok(first & 0x7F);
    }
    if first & 0xC0 == 0x80 {
        let second = bits.take_bits(8).ok_or(DecodeError::StreamTruncated)? as u32;
        return Ok(((first & 0x3F) << 8) | second);
    }
    if first & 0xE0 == 0xC0 {
        let rest = bits.take_bits(16).ok_or(DecodeError::StreamTruncated)? as u32;
        return Ok(((first & 0x1F) << 16) | rest);
    }
    Err(DecodeError::InvalidCharset)
}
