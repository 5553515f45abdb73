use super::mask::MaskPattern;
use super::metadata::{
    parse_format_info, ECLevel, Version, FORMAT_ERROR_CAPACITY, FORMAT_INFOS_QR,
    FORMAT_INFO_COORDS_MAIN, FORMAT_INFO_COORDS_SIDE, FORMAT_MASK, VERSION_ERROR_BIT_LEN,
    VERSION_ERROR_CAPACITY, VERSION_INFOS, VERSION_INFO_COORDS_BL, VERSION_INFO_COORDS_TR,
};
use crate::common::ec::rectify_info;
use crate::common::error::{DecodeError, DecodeResult};
use crate::common::matrix::BitMatrix;

// Symbol parser
//------------------------------------------------------------------------------

/// Walks a sampled module grid: reads the protected format and version
/// words, undoes the data mask, and extracts the raw codeword stream in the
/// serpentine two-column order.
///
/// `set_mirror(true)` swaps the coordinates format and version are read
/// from, so a mirror-printed symbol can be probed before committing to the
/// transpose; `mirror()` performs the transpose itself.
#[derive(Debug)]
pub struct SymbolParser {
    grid: BitMatrix,
    version: Option<Version>,
    format: Option<(ECLevel, MaskPattern)>,
    applied_mask: Option<MaskPattern>,
    mirror: bool,
}

impl SymbolParser {
    pub fn new(bits: &BitMatrix) -> DecodeResult<Self> {
        let width = bits.width();
        if bits.height() != width || Version::from_width(width).is_none() {
            return Err(DecodeError::InvalidGridSize);
        }
        Ok(Self {
            grid: bits.clone(),
            version: None,
            format: None,
            applied_mask: None,
            mirror: false,
        })
    }

    /// Module at (row, column); negative coordinates wrap around the far
    /// edge.
    fn get(&self, r: i32, c: i32) -> bool {
        let w = self.grid.width() as i32;
        debug_assert!(-w <= r && r < w, "Row {r} outside symbol");
        debug_assert!(-w <= c && c < w, "Column {c} outside symbol");
        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        self.grid.get(c as usize, r as usize)
    }

    fn get_number(&self, coords: &[(i32, i32)]) -> u32 {
        let mut num = 0;
        for &(r, c) in coords {
            let bit = if self.mirror { self.get(c, r) } else { self.get(r, c) };
            num = (num << 1) | bit as u32;
        }
        num
    }

    /// Swaps the format/version read coordinates for a mirrored probe and
    /// drops anything already parsed.
    pub fn set_mirror(&mut self, mirror: bool) {
        self.version = None;
        self.format = None;
        self.mirror = mirror;
    }

    /// Reflects the stored grid across its main diagonal.
    pub fn mirror(&mut self) {
        self.grid = self.grid.transpose();
    }

    pub fn read_version(&mut self) -> DecodeResult<Version> {
        if let Some(version) = self.version {
            return Ok(version);
        }

        let number = (self.grid.width() - 17) / 4;
        if number <= 6 {
            let version = Version::new(number);
            self.version = Some(version);
            return Ok(version);
        }

        // The printed version blocks must agree with the sampled dimension
        for coords in [&VERSION_INFO_COORDS_BL, &VERSION_INFO_COORDS_TR] {
            let raw = self.get_number(coords);
            if let Ok(code) = rectify_info(raw, &VERSION_INFOS, VERSION_ERROR_CAPACITY) {
                if (code >> VERSION_ERROR_BIT_LEN) as usize == number {
                    let version = Version::new(number);
                    self.version = Some(version);
                    return Ok(version);
                }
            }
        }
        Err(DecodeError::InvalidVersionInfo)
    }

    pub fn read_format_info(&mut self) -> DecodeResult<(ECLevel, MaskPattern)> {
        if let Some(format) = self.format {
            return Ok(format);
        }

        let main = self.get_number(&FORMAT_INFO_COORDS_MAIN);
        let code = rectify_info(main, &FORMAT_INFOS_QR, FORMAT_ERROR_CAPACITY)
            .or_else(|_| {
                let side = self.get_number(&FORMAT_INFO_COORDS_SIDE);
                rectify_info(side, &FORMAT_INFOS_QR, FORMAT_ERROR_CAPACITY)
            })
            .or(Err(DecodeError::InvalidFormatInfo))?;

        let format = parse_format_info(code ^ FORMAT_MASK);
        self.format = Some(format);
        Ok(format)
    }

    fn apply_mask(&mut self, mask: MaskPattern, version: Version) {
        let mask_fn = mask.mask_function();
        let fp = version.function_pattern();
        let w = self.grid.width();
        for r in 0..w {
            for c in 0..w {
                if !fp.get(c, r) && mask_fn(r as i32, c as i32) {
                    self.grid.flip(c, r);
                }
            }
        }
    }

    /// Re-applies the data mask undone by `read_codewords`, restoring the
    /// grid to its sampled state. A no-op if no mask has been applied.
    pub fn remask(&mut self) {
        if let Some(mask) = self.applied_mask.take() {
            if let Some(version) = self.version {
                self.apply_mask(mask, version);
            }
        }
    }

    /// Unmasks the data region and collects codewords along the serpentine
    /// walk, most significant bit first, skipping function modules.
    pub fn read_codewords(&mut self) -> DecodeResult<Vec<u8>> {
        let version = self.read_version()?;
        let (_, mask) = self.read_format_info()?;

        self.apply_mask(mask, version);
        self.applied_mask = Some(mask);

        let fp = version.function_pattern();
        let total = version.total_codewords();
        let mut codewords = Vec::with_capacity(total);
        let mut current = 0u8;
        let mut bit_count = 0;
        for (r, c) in RegionIter::new(self.grid.width()) {
            if fp.get(c, r) {
                continue;
            }
            current = (current << 1) | self.grid.get(c, r) as u8;
            bit_count += 1;
            if bit_count == 8 {
                codewords.push(current);
                current = 0;
                bit_count = 0;
            }
        }
        if codewords.len() != total {
            return Err(DecodeError::CodewordMismatch);
        }
        Ok(codewords)
    }
}

// Encoding region iterator
//------------------------------------------------------------------------------

/// Yields (row, column) over the symbol's two-column strips: right to left,
/// bottom-to-top then top-to-bottom alternating, skipping the vertical
/// timing column. Function modules are yielded too; the caller filters them.
pub struct RegionIter {
    r: i32,
    c: i32,
    width: i32,
    vert_timing_col: i32,
}

impl RegionIter {
    pub fn new(width: usize) -> Self {
        let w = width as i32;
        Self { r: w - 1, c: w - 1, width: w, vert_timing_col: 6 }
    }
}

impl Iterator for RegionIter {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        let res = (self.r as usize, self.c as usize);

        // Columns left of the timing column behave as if shifted right by one
        let adjusted_col = if self.c <= self.vert_timing_col { self.c + 1 } else { self.c };
        let col_type = (self.width - adjusted_col) % 4;
        match col_type {
            2 if self.r > 0 => {
                self.r -= 1;
                self.c += 1;
            }
            0 if self.r < self.width - 1 => {
                self.r += 1;
                self.c += 1;
            }
            0 | 2 if self.c == self.vert_timing_col + 1 => {
                self.c -= 2;
            }
            _ => {
                self.c -= 1;
            }
        }
        Some(res)
    }
}

#[cfg(test)]
mod region_iter_tests {
    use std::collections::HashSet;

    use super::RegionIter;
    use crate::qr::metadata::Version;

    #[test]
    fn test_starts_bottom_right_moving_up() {
        let mut iter = RegionIter::new(21);
        assert_eq!(iter.next(), Some((20, 20)));
        assert_eq!(iter.next(), Some((20, 19)));
        assert_eq!(iter.next(), Some((19, 20)));
        assert_eq!(iter.next(), Some((19, 19)));
    }

    #[test]
    fn test_covers_every_non_timing_cell_once() {
        for v in [1, 2, 7, 14] {
            let w = Version::new(v).width();
            let cells: Vec<_> = RegionIter::new(w).collect();
            let unique: HashSet<_> = cells.iter().copied().collect();
            assert_eq!(cells.len(), unique.len(), "version {v} revisits a cell");
            assert_eq!(cells.len(), w * (w - 1), "version {v} misses cells");
            assert!(cells.iter().all(|&(_, c)| c != 6), "version {v} enters timing column");
        }
    }

    #[test]
    fn test_data_cell_count_matches_capacity() {
        for v in 1..=40 {
            let ver = Version::new(v);
            let fp = ver.function_pattern();
            let data_cells =
                RegionIter::new(ver.width()).filter(|&(r, c)| !fp.get(c, r)).count();
            assert_eq!(data_cells / 8, ver.total_codewords(), "version {v}");
        }
    }
}
