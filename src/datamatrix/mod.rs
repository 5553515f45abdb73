use crate::common::error::{DecodeError, DecodeResult};

// Data Matrix symbol geometries
//------------------------------------------------------------------------------

/// Constrains which symbol geometries a lookup may pick.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum SymbolShape {
    #[default]
    Auto,
    ForceSquare,
    ForceRectangle,
}

/// One standard Data Matrix symbol geometry: overall size, data region
/// layout, and Reed-Solomon block structure.
#[derive(Debug, PartialEq, Eq)]
pub struct SymbolInfo {
    rectangular: bool,
    data_capacity: usize,
    error_codewords: usize,
    matrix_width: usize,
    matrix_height: usize,
    data_regions: usize,
    rs_block_data: usize,
    rs_block_error: usize,
}

impl SymbolInfo {
    const fn new(
        rectangular: bool,
        data_capacity: usize,
        error_codewords: usize,
        matrix_width: usize,
        matrix_height: usize,
        data_regions: usize,
    ) -> Self {
        Self {
            rectangular,
            data_capacity,
            error_codewords,
            matrix_width,
            matrix_height,
            data_regions,
            rs_block_data: data_capacity,
            rs_block_error: error_codewords,
        }
    }

    const fn with_rs_blocks(
        data_capacity: usize,
        error_codewords: usize,
        matrix_width: usize,
        matrix_height: usize,
        data_regions: usize,
        rs_block_data: usize,
        rs_block_error: usize,
    ) -> Self {
        Self {
            rectangular: false,
            data_capacity,
            error_codewords,
            matrix_width,
            matrix_height,
            data_regions,
            rs_block_data,
            rs_block_error,
        }
    }

    /// Smallest symbol that holds `data_codewords`, or `None` when even the
    /// largest cannot.
    pub fn lookup(data_codewords: usize) -> Option<&'static SymbolInfo> {
        Self::lookup_with_shape(data_codewords, SymbolShape::Auto)
    }

    pub fn lookup_with_shape(
        data_codewords: usize,
        shape: SymbolShape,
    ) -> Option<&'static SymbolInfo> {
        PROD_SYMBOLS.iter().find(|symbol| {
            let shape_ok = match shape {
                SymbolShape::Auto => true,
                SymbolShape::ForceSquare => !symbol.rectangular,
                SymbolShape::ForceRectangle => symbol.rectangular,
            };
            shape_ok && symbol.data_capacity >= data_codewords
        })
    }

    /// Like [`lookup_with_shape`](Self::lookup_with_shape), but a hard
    /// failure for callers that cannot proceed without a symbol.
    pub fn lookup_strict(
        data_codewords: usize,
        shape: SymbolShape,
    ) -> DecodeResult<&'static SymbolInfo> {
        Self::lookup_with_shape(data_codewords, shape).ok_or(DecodeError::NoSymbolFits)
    }

    pub fn is_rectangular(&self) -> bool {
        self.rectangular
    }

    pub fn data_capacity(&self) -> usize {
        self.data_capacity
    }

    pub fn error_codewords(&self) -> usize {
        self.error_codewords
    }

    pub fn total_codewords(&self) -> usize {
        self.data_capacity + self.error_codewords
    }

    fn horizontal_data_regions(&self) -> usize {
        match self.data_regions {
            1 => 1,
            2 | 4 => 2,
            16 => 4,
            _ => 6,
        }
    }

    fn vertical_data_regions(&self) -> usize {
        match self.data_regions {
            1 | 2 => 1,
            4 => 2,
            16 => 4,
            _ => 6,
        }
    }

    /// Width of the data area, excluding alignment patterns.
    pub fn symbol_data_width(&self) -> usize {
        self.horizontal_data_regions() * self.matrix_width
    }

    pub fn symbol_data_height(&self) -> usize {
        self.vertical_data_regions() * self.matrix_height
    }

    /// Full symbol width including the finder and alignment patterns.
    pub fn symbol_width(&self) -> usize {
        self.symbol_data_width() + self.horizontal_data_regions() * 2
    }

    pub fn symbol_height(&self) -> usize {
        self.symbol_data_height() + self.vertical_data_regions() * 2
    }

    pub fn interleaved_block_count(&self) -> usize {
        self.error_codewords / self.rs_block_error
    }

    /// Data codewords in interleaved block `index` (1-based). Only the
    /// largest symbol has uneven blocks.
    pub fn data_length_for_interleaved_block(&self, index: usize) -> usize {
        if self.data_capacity == 1558 {
            if index <= 8 {
                156
            } else {
                155
            }
        } else {
            self.rs_block_data
        }
    }

    pub fn error_length_for_interleaved_block(&self) -> usize {
        self.rs_block_error
    }
}

static PROD_SYMBOLS: [SymbolInfo; 30] = [
    SymbolInfo::new(false, 3, 5, 8, 8, 1),
    SymbolInfo::new(false, 5, 7, 10, 10, 1),
    SymbolInfo::new(true, 5, 7, 16, 6, 1),
    SymbolInfo::new(false, 8, 10, 12, 12, 1),
    SymbolInfo::new(true, 10, 11, 14, 6, 2),
    SymbolInfo::new(false, 12, 12, 14, 14, 1),
    SymbolInfo::new(true, 16, 14, 24, 10, 1),
    SymbolInfo::new(false, 18, 14, 16, 16, 1),
    SymbolInfo::new(false, 22, 18, 18, 18, 1),
    SymbolInfo::new(true, 22, 18, 16, 10, 2),
    SymbolInfo::new(false, 30, 20, 20, 20, 1),
    SymbolInfo::new(true, 32, 24, 16, 14, 2),
    SymbolInfo::new(false, 36, 24, 22, 22, 1),
    SymbolInfo::new(false, 44, 28, 24, 24, 1),
    SymbolInfo::new(true, 49, 28, 22, 14, 2),
    SymbolInfo::new(false, 62, 36, 14, 14, 4),
    SymbolInfo::new(false, 86, 42, 16, 16, 4),
    SymbolInfo::new(false, 114, 48, 18, 18, 4),
    SymbolInfo::new(false, 144, 56, 20, 20, 4),
    SymbolInfo::new(false, 174, 68, 22, 22, 4),
    SymbolInfo::with_rs_blocks(204, 84, 24, 24, 4, 102, 42),
    SymbolInfo::with_rs_blocks(280, 112, 14, 14, 16, 140, 56),
    SymbolInfo::with_rs_blocks(368, 144, 16, 16, 16, 92, 36),
    SymbolInfo::with_rs_blocks(456, 192, 18, 18, 16, 114, 48),
    SymbolInfo::with_rs_blocks(576, 224, 20, 20, 16, 144, 56),
    SymbolInfo::with_rs_blocks(696, 272, 22, 22, 16, 174, 68),
    SymbolInfo::with_rs_blocks(816, 336, 24, 24, 16, 136, 56),
    SymbolInfo::with_rs_blocks(1050, 408, 18, 18, 36, 175, 68),
    SymbolInfo::with_rs_blocks(1304, 496, 20, 20, 36, 163, 62),
    SymbolInfo::with_rs_blocks(1558, 620, 22, 22, 36, 156, 62),
];

#[cfg(test)]
mod symbol_info_tests {
    use super::*;

    #[test]
    fn test_lookup_smallest_fit() {
        let symbol = SymbolInfo::lookup(3).unwrap();
        assert_eq!((symbol.symbol_width(), symbol.symbol_height()), (10, 10));
        assert_eq!((symbol.symbol_data_width(), symbol.symbol_data_height()), (8, 8));
        assert_eq!(symbol.error_codewords(), 5);
    }

    #[test]
    fn test_lookup_force_rectangle() {
        let symbol = SymbolInfo::lookup_with_shape(3, SymbolShape::ForceRectangle).unwrap();
        assert_eq!((symbol.symbol_width(), symbol.symbol_height()), (18, 8));
        assert_eq!((symbol.symbol_data_width(), symbol.symbol_data_height()), (16, 6));
        assert_eq!(symbol.error_codewords(), 7);
    }

    #[test]
    fn test_lookup_force_square() {
        let symbol = SymbolInfo::lookup_with_shape(9, SymbolShape::ForceSquare).unwrap();
        assert_eq!((symbol.symbol_width(), symbol.symbol_height()), (16, 16));
        assert_eq!((symbol.symbol_data_width(), symbol.symbol_data_height()), (14, 14));
        assert_eq!(symbol.error_codewords(), 12);
    }

    #[test]
    fn test_lookup_too_large() {
        assert!(SymbolInfo::lookup(1559).is_none());
        assert_eq!(
            SymbolInfo::lookup_strict(1559, SymbolShape::Auto),
            Err(DecodeError::NoSymbolFits)
        );
        assert!(SymbolInfo::lookup(1558).is_some());
    }

    #[test]
    fn test_capacity_matches_geometry() {
        // The data region bit count must hold exactly the codewords, modulo
        // the handful of unused bits in some geometries
        for symbol in &PROD_SYMBOLS {
            let bits = symbol.symbol_data_width() * symbol.symbol_data_height();
            assert_eq!(bits / 8, symbol.total_codewords(), "{}x{}", symbol.symbol_width(), symbol.symbol_height());
        }
    }

    #[test]
    fn test_interleaved_blocks() {
        // 52x52 splits into two RS blocks
        let symbol = SymbolInfo::lookup(204).unwrap();
        assert_eq!(symbol.interleaved_block_count(), 2);
        assert_eq!(symbol.data_length_for_interleaved_block(1), 102);

        // 144x144: ten blocks, the first eight one codeword longer
        let symbol = SymbolInfo::lookup(1558).unwrap();
        assert_eq!(symbol.interleaved_block_count(), 10);
        assert_eq!(symbol.data_length_for_interleaved_block(1), 156);
        assert_eq!(symbol.data_length_for_interleaved_block(9), 155);
        assert_eq!(symbol.error_length_for_interleaved_block(), 62);
        let total: usize =
            (1..=10).map(|i| symbol.data_length_for_interleaved_block(i)).sum();
        assert_eq!(total, symbol.data_capacity());
    }

    #[test]
    fn test_symbols_ordered_by_capacity() {
        for pair in PROD_SYMBOLS.windows(2) {
            assert!(pair[0].data_capacity() <= pair[1].data_capacity());
        }
    }
}
