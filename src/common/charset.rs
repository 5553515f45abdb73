use std::fmt::{Display, Formatter};

use crate::common::error::{DecodeError, DecodeResult};

// Character set
//------------------------------------------------------------------------------

/// Text encodings a symbol payload can select, by default or through an ECI
/// designator. Byte segments are interpreted in the active set; Kanji and
/// Hanzi segments force Shift JIS and GB 2312 for their own content.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum CharacterSet {
    Iso8859_1,
    ShiftJis,
    Gb2312,
    Utf8,
    Ascii,
}

impl CharacterSet {
    /// Maps an ECI designator to a character set.
    pub fn from_eci(value: u32) -> DecodeResult<Self> {
        match value {
            1 | 3 => Ok(Self::Iso8859_1),
            20 => Ok(Self::ShiftJis),
            26 => Ok(Self::Utf8),
            27 | 170 => Ok(Self::Ascii),
            29 => Ok(Self::Gb2312),
            _ => Err(DecodeError::InvalidCharset),
        }
    }

    /// Decodes `bytes` into text. Malformed sequences are replaced rather
    /// than failing: the payload already passed error correction, so at this
    /// point lossy text is more useful than none.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            // Latin-1 maps bytes to the first 256 code points directly; the
            // WHATWG table encoding_rs implements aliases it to windows-1252
            Self::Iso8859_1 => bytes.iter().map(|&b| b as char).collect(),
            Self::Ascii => bytes.iter().map(|&b| (b & 0x7F) as char).collect(),
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::ShiftJis => {
                let (text, _, _) = encoding_rs::SHIFT_JIS.decode(bytes);
                text.into_owned()
            }
            Self::Gb2312 => {
                let (text, _, _) = encoding_rs::GB18030.decode(bytes);
                text.into_owned()
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Iso8859_1 => "ISO-8859-1",
            Self::ShiftJis => "Shift_JIS",
            Self::Gb2312 => "GB2312",
            Self::Utf8 => "UTF-8",
            Self::Ascii => "US-ASCII",
        }
    }
}

impl Display for CharacterSet {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
