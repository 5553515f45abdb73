use std::fmt::{Display, Formatter};

use super::mask::MaskPattern;
use crate::common::matrix::BitMatrix;

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ECLevel {
    L,
    M,
    Q,
    H,
}

impl ECLevel {
    /// The two format-info bits encoding this level.
    pub fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }

    pub fn from_format_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b01 => Self::L,
            0b00 => Self::M,
            0b11 => Self::Q,
            _ => Self::H,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::L => 0,
            Self::M => 1,
            Self::Q => 2,
            Self::H => 3,
        }
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        })
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct Version(usize);

impl Version {
    pub fn new(number: usize) -> Self {
        debug_assert!((1..=40).contains(&number), "Invalid version: {number}");
        Self(number)
    }

    pub fn number(self) -> usize {
        self.0
    }

    pub fn width(self) -> usize {
        17 + 4 * self.0
    }

    pub fn from_width(width: usize) -> Option<Self> {
        if (21..=177).contains(&width) && width % 4 == 1 {
            Some(Self((width - 17) / 4))
        } else {
            None
        }
    }

    /// Row/column coordinates of the alignment pattern centers.
    pub fn alignment_centers(self) -> &'static [usize] {
        ALIGNMENT_CENTERS[self.0 - 1]
    }

    pub fn ec_blocks(self, ecl: ECLevel) -> &'static ECBlocks {
        &EC_BLOCKS[self.0 - 1][ecl.index()]
    }

    pub fn total_codewords(self) -> usize {
        self.ec_blocks(ECLevel::L).total_codewords()
    }

    /// A mask of every function module: finder patterns with separators and
    /// format areas, timing patterns, alignment patterns, and the version
    /// info blocks. Codeword extraction walks everything else.
    pub fn function_pattern(self) -> BitMatrix {
        let dim = self.width();
        let mut bits = BitMatrix::square(dim);

        // Finder patterns, separators, format info and the dark module
        mark(&mut bits, 0, 0, 9, 9);
        mark(&mut bits, dim - 8, 0, 8, 9);
        mark(&mut bits, 0, dim - 8, 9, 8);

        // Alignment patterns, skipping the three finder corners
        let centers = self.alignment_centers();
        let max = centers.len();
        for (i, &cy) in centers.iter().enumerate() {
            for (j, &cx) in centers.iter().enumerate() {
                if (i == 0 && (j == 0 || j == max - 1)) || (i == max - 1 && j == 0) {
                    continue;
                }
                mark(&mut bits, cx - 2, cy - 2, 5, 5);
            }
        }

        // Timing patterns
        mark(&mut bits, 6, 9, 1, dim - 17);
        mark(&mut bits, 9, 6, dim - 17, 1);

        // Version info
        if self.0 > 6 {
            mark(&mut bits, dim - 11, 0, 3, 6);
            mark(&mut bits, 0, dim - 11, 6, 3);
        }

        bits
    }
}

fn mark(bits: &mut BitMatrix, left: usize, top: usize, width: usize, height: usize) {
    for y in top..top + height {
        for x in left..left + width {
            bits.set(x, y, true);
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Error correction block structure
//------------------------------------------------------------------------------

/// Block structure for one version and EC level: every block carries
/// `ec_codewords_per_block` parity codewords; data codewords are split over
/// up to two group sizes, shorter group first.
#[derive(Debug)]
pub struct ECBlocks {
    ec_codewords_per_block: usize,
    groups: [(usize, usize); 2],
}

impl ECBlocks {
    const fn new(ec: usize, c1: usize, d1: usize, c2: usize, d2: usize) -> Self {
        Self { ec_codewords_per_block: ec, groups: [(c1, d1), (c2, d2)] }
    }

    pub fn ec_codewords_per_block(&self) -> usize {
        self.ec_codewords_per_block
    }

    /// (block count, data codewords per block) pairs; the second may be
    /// empty.
    pub fn groups(&self) -> [(usize, usize); 2] {
        self.groups
    }

    pub fn total_blocks(&self) -> usize {
        self.groups[0].0 + self.groups[1].0
    }

    pub fn total_data_codewords(&self) -> usize {
        self.groups[0].0 * self.groups[0].1 + self.groups[1].0 * self.groups[1].1
    }

    pub fn total_codewords(&self) -> usize {
        self.total_data_codewords() + self.total_blocks() * self.ec_codewords_per_block
    }
}

// Format & version info protection
//------------------------------------------------------------------------------

/// XOR mask applied to the 15-bit format word before it is printed.
pub static FORMAT_MASK: u32 = 0x5412;

/// BCH(15,5) corrects up to 3 bit errors.
pub static FORMAT_ERROR_CAPACITY: u32 = 3;

/// Golay(18,6) corrects up to 3 bit errors.
pub static VERSION_ERROR_CAPACITY: u32 = 3;

/// Check bits below the 6-bit version number in the version word.
pub static VERSION_ERROR_BIT_LEN: u32 = 12;

/// The 32 valid format sequences as printed (mask already applied), indexed
/// by (EC level bits << 3) | mask pattern.
pub static FORMAT_INFOS_QR: [u32; 32] = [
    0x5412, 0x5125, 0x5E7C, 0x5B4B, 0x45F9, 0x40CE, 0x4F97, 0x4AA0, 0x77C4, 0x72F3, 0x7DAA,
    0x789D, 0x662F, 0x6318, 0x6C41, 0x6976, 0x1689, 0x13BE, 0x1CE7, 0x19D0, 0x0762, 0x0255,
    0x0D0C, 0x083B, 0x355F, 0x3068, 0x3F31, 0x3A06, 0x24B4, 0x2183, 0x2EDA, 0x2BED,
];

/// The 34 valid version sequences for versions 7 through 40.
pub static VERSION_INFOS: [u32; 34] = [
    0x07C94, 0x085BC, 0x09A99, 0x0A4D3, 0x0BBF6, 0x0C762, 0x0D847, 0x0E60D, 0x0F928, 0x10B78,
    0x1145D, 0x12A17, 0x13532, 0x149A6, 0x15683, 0x168C9, 0x177EC, 0x18EC4, 0x191E1, 0x1AFAB,
    0x1B08E, 0x1CC1A, 0x1D33F, 0x1ED75, 0x1F250, 0x209D5, 0x216F0, 0x228BA, 0x2379F, 0x24B0B,
    0x2542E, 0x26A64, 0x27541, 0x28C69,
];

/// Splits an unmasked format word into its EC level and mask pattern.
pub fn parse_format_info(format: u32) -> (ECLevel, MaskPattern) {
    let ecl = ECLevel::from_format_bits(format >> 13);
    let mask = MaskPattern::new(((format >> 10) & 0b111) as u8);
    (ecl, mask)
}

// Format & version info coordinates
//------------------------------------------------------------------------------
//
// (row, column) pairs in most-significant-bit-first read order. Negative
// coordinates wrap around the far edge of the symbol.

pub static FORMAT_INFO_COORDS_MAIN: [(i32, i32); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_SIDE: [(i32, i32); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

pub static VERSION_INFO_COORDS_TR: [(i32, i32); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

pub static VERSION_INFO_COORDS_BL: [(i32, i32); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];

// Alignment pattern centers
//------------------------------------------------------------------------------

static ALIGNMENT_CENTERS: [&[usize]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

// Error correction block table
//------------------------------------------------------------------------------
//
// Rows are versions 1-40, columns the levels L, M, Q, H.

#[rustfmt::skip]
static EC_BLOCKS: [[ECBlocks; 4]; 40] = [
    [ECBlocks::new(7, 1, 19, 0, 0), ECBlocks::new(10, 1, 16, 0, 0), ECBlocks::new(13, 1, 13, 0, 0), ECBlocks::new(17, 1, 9, 0, 0)],
    [ECBlocks::new(10, 1, 34, 0, 0), ECBlocks::new(16, 1, 28, 0, 0), ECBlocks::new(22, 1, 22, 0, 0), ECBlocks::new(28, 1, 16, 0, 0)],
    [ECBlocks::new(15, 1, 55, 0, 0), ECBlocks::new(26, 1, 44, 0, 0), ECBlocks::new(18, 2, 17, 0, 0), ECBlocks::new(22, 2, 13, 0, 0)],
    [ECBlocks::new(20, 1, 80, 0, 0), ECBlocks::new(18, 2, 32, 0, 0), ECBlocks::new(26, 2, 24, 0, 0), ECBlocks::new(16, 4, 9, 0, 0)],
    [ECBlocks::new(26, 1, 108, 0, 0), ECBlocks::new(24, 2, 43, 0, 0), ECBlocks::new(18, 2, 15, 2, 16), ECBlocks::new(22, 2, 11, 2, 12)],
    [ECBlocks::new(18, 2, 68, 0, 0), ECBlocks::new(16, 4, 27, 0, 0), ECBlocks::new(24, 4, 19, 0, 0), ECBlocks::new(28, 4, 15, 0, 0)],
    [ECBlocks::new(20, 2, 78, 0, 0), ECBlocks::new(18, 4, 31, 0, 0), ECBlocks::new(18, 2, 14, 4, 15), ECBlocks::new(26, 4, 13, 1, 14)],
    [ECBlocks::new(24, 2, 97, 0, 0), ECBlocks::new(22, 2, 38, 2, 39), ECBlocks::new(22, 4, 18, 2, 19), ECBlocks::new(26, 4, 14, 2, 15)],
    [ECBlocks::new(30, 2, 116, 0, 0), ECBlocks::new(22, 3, 36, 2, 37), ECBlocks::new(20, 4, 16, 4, 17), ECBlocks::new(24, 4, 12, 4, 13)],
    [ECBlocks::new(18, 2, 68, 2, 69), ECBlocks::new(26, 4, 43, 1, 44), ECBlocks::new(24, 6, 19, 2, 20), ECBlocks::new(28, 6, 15, 2, 16)],
    [ECBlocks::new(20, 4, 81, 0, 0), ECBlocks::new(30, 1, 50, 4, 51), ECBlocks::new(28, 4, 22, 4, 23), ECBlocks::new(24, 3, 12, 8, 13)],
    [ECBlocks::new(24, 2, 92, 2, 93), ECBlocks::new(22, 6, 36, 2, 37), ECBlocks::new(26, 4, 20, 6, 21), ECBlocks::new(28, 7, 14, 4, 15)],
    [ECBlocks::new(26, 4, 107, 0, 0), ECBlocks::new(22, 8, 37, 1, 38), ECBlocks::new(24, 8, 20, 4, 21), ECBlocks::new(22, 12, 11, 4, 12)],
    [ECBlocks::new(30, 3, 115, 1, 116), ECBlocks::new(24, 4, 40, 5, 41), ECBlocks::new(20, 11, 16, 5, 17), ECBlocks::new(24, 11, 12, 5, 13)],
    [ECBlocks::new(22, 5, 87, 1, 88), ECBlocks::new(24, 5, 41, 5, 42), ECBlocks::new(30, 5, 24, 7, 25), ECBlocks::new(24, 11, 12, 7, 13)],
    [ECBlocks::new(24, 5, 98, 1, 99), ECBlocks::new(28, 7, 45, 3, 46), ECBlocks::new(24, 15, 19, 2, 20), ECBlocks::new(30, 3, 15, 13, 16)],
    [ECBlocks::new(28, 1, 107, 5, 108), ECBlocks::new(28, 10, 46, 1, 47), ECBlocks::new(28, 1, 22, 15, 23), ECBlocks::new(28, 2, 14, 17, 15)],
    [ECBlocks::new(30, 5, 120, 1, 121), ECBlocks::new(26, 9, 43, 4, 44), ECBlocks::new(28, 17, 22, 1, 23), ECBlocks::new(28, 2, 14, 19, 15)],
    [ECBlocks::new(28, 3, 113, 4, 114), ECBlocks::new(26, 3, 44, 11, 45), ECBlocks::new(26, 17, 21, 4, 22), ECBlocks::new(26, 9, 13, 16, 14)],
    [ECBlocks::new(28, 3, 107, 5, 108), ECBlocks::new(26, 3, 41, 13, 42), ECBlocks::new(30, 15, 24, 5, 25), ECBlocks::new(28, 15, 15, 10, 16)],
    [ECBlocks::new(28, 4, 116, 4, 117), ECBlocks::new(26, 17, 42, 0, 0), ECBlocks::new(28, 17, 22, 6, 23), ECBlocks::new(30, 19, 16, 6, 17)],
    [ECBlocks::new(28, 2, 111, 7, 112), ECBlocks::new(28, 17, 46, 0, 0), ECBlocks::new(30, 7, 24, 16, 25), ECBlocks::new(24, 34, 13, 0, 0)],
    [ECBlocks::new(30, 4, 121, 5, 122), ECBlocks::new(28, 4, 47, 14, 48), ECBlocks::new(30, 11, 24, 14, 25), ECBlocks::new(30, 16, 15, 14, 16)],
    [ECBlocks::new(30, 6, 117, 4, 118), ECBlocks::new(28, 6, 45, 14, 46), ECBlocks::new(30, 11, 24, 16, 25), ECBlocks::new(30, 30, 16, 2, 17)],
    [ECBlocks::new(26, 8, 106, 4, 107), ECBlocks::new(28, 8, 47, 13, 48), ECBlocks::new(30, 7, 24, 22, 25), ECBlocks::new(30, 22, 15, 13, 16)],
    [ECBlocks::new(28, 10, 114, 2, 115), ECBlocks::new(28, 19, 46, 4, 47), ECBlocks::new(28, 28, 22, 6, 23), ECBlocks::new(30, 33, 16, 4, 17)],
    [ECBlocks::new(30, 8, 122, 4, 123), ECBlocks::new(28, 22, 45, 3, 46), ECBlocks::new(30, 8, 23, 26, 24), ECBlocks::new(30, 12, 15, 28, 16)],
    [ECBlocks::new(30, 3, 117, 10, 118), ECBlocks::new(28, 3, 45, 23, 46), ECBlocks::new(30, 4, 24, 31, 25), ECBlocks::new(30, 11, 15, 31, 16)],
    [ECBlocks::new(30, 7, 116, 7, 117), ECBlocks::new(28, 21, 45, 7, 46), ECBlocks::new(30, 1, 23, 37, 24), ECBlocks::new(30, 19, 15, 26, 16)],
    [ECBlocks::new(30, 5, 115, 10, 116), ECBlocks::new(28, 19, 47, 10, 48), ECBlocks::new(30, 15, 24, 25, 25), ECBlocks::new(30, 23, 15, 25, 16)],
    [ECBlocks::new(30, 13, 115, 3, 116), ECBlocks::new(28, 2, 46, 29, 47), ECBlocks::new(30, 42, 24, 1, 25), ECBlocks::new(30, 23, 15, 28, 16)],
    [ECBlocks::new(30, 17, 115, 0, 0), ECBlocks::new(28, 10, 46, 23, 47), ECBlocks::new(30, 10, 24, 35, 25), ECBlocks::new(30, 19, 15, 35, 16)],
    [ECBlocks::new(30, 17, 115, 1, 116), ECBlocks::new(28, 14, 46, 21, 47), ECBlocks::new(30, 29, 24, 19, 25), ECBlocks::new(30, 11, 15, 46, 16)],
    [ECBlocks::new(30, 13, 115, 6, 116), ECBlocks::new(28, 14, 46, 23, 47), ECBlocks::new(30, 44, 24, 7, 25), ECBlocks::new(30, 59, 16, 1, 17)],
    [ECBlocks::new(30, 12, 121, 7, 122), ECBlocks::new(28, 12, 47, 26, 48), ECBlocks::new(30, 39, 24, 14, 25), ECBlocks::new(30, 22, 15, 41, 16)],
    [ECBlocks::new(30, 6, 121, 14, 122), ECBlocks::new(28, 6, 47, 34, 48), ECBlocks::new(30, 46, 24, 10, 25), ECBlocks::new(30, 2, 15, 64, 16)],
    [ECBlocks::new(30, 17, 122, 4, 123), ECBlocks::new(28, 29, 46, 14, 47), ECBlocks::new(30, 49, 24, 10, 25), ECBlocks::new(30, 24, 15, 46, 16)],
    [ECBlocks::new(30, 4, 122, 18, 123), ECBlocks::new(28, 13, 46, 32, 47), ECBlocks::new(30, 48, 24, 14, 25), ECBlocks::new(30, 42, 15, 32, 16)],
    [ECBlocks::new(30, 20, 117, 4, 118), ECBlocks::new(28, 40, 47, 7, 48), ECBlocks::new(30, 43, 24, 22, 25), ECBlocks::new(30, 10, 15, 67, 16)],
    [ECBlocks::new(30, 19, 118, 6, 119), ECBlocks::new(28, 18, 47, 31, 48), ECBlocks::new(30, 34, 24, 34, 25), ECBlocks::new(30, 20, 15, 61, 16)],
];
