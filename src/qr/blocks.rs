use super::metadata::{ECLevel, Version};
use crate::common::error::{DecodeError, DecodeResult};

// Data blocks
//------------------------------------------------------------------------------

/// One error-correction block: `codewords` holds the data codewords followed
/// by the block's parity codewords.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DataBlock {
    num_data_codewords: usize,
    codewords: Vec<u8>,
}

impl DataBlock {
    pub fn num_data_codewords(&self) -> usize {
        self.num_data_codewords
    }

    pub fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    pub fn codewords_mut(&mut self) -> &mut Vec<u8> {
        &mut self.codewords
    }

    /// De-interleaves the raw codeword stream into per-block data + parity,
    /// in canonical block order with the shorter blocks first. The stream is
    /// laid out column-major: one codeword per block in rotation, data
    /// first, then all the parity.
    pub fn build(raw: &[u8], version: Version, ecl: ECLevel) -> DecodeResult<Vec<DataBlock>> {
        let ec_blocks = version.ec_blocks(ecl);
        if raw.len() != ec_blocks.total_codewords() {
            return Err(DecodeError::CodewordMismatch);
        }

        let ec_len = ec_blocks.ec_codewords_per_block();
        let [(c1, d1), (c2, d2)] = ec_blocks.groups();
        debug_assert!(c2 == 0 || d2 == d1 + 1, "Long blocks carry exactly one extra codeword");

        let total_blocks = c1 + c2;
        let data_len = ec_blocks.total_data_codewords();
        let short_rows = c1 * d1 + c2 * d1;

        let mut blocks: Vec<Vec<u8>> = (0..total_blocks)
            .map(|i| {
                let data = if i < c1 { d1 } else { d2 };
                Vec::with_capacity(data + ec_len)
            })
            .collect();

        // Data rows every block participates in
        raw[..short_rows]
            .chunks(total_blocks)
            .for_each(|row| row.iter().enumerate().for_each(|(i, &cw)| blocks[i].push(cw)));
        // The extra data codeword of each long block
        if c2 > 0 {
            raw[short_rows..data_len]
                .iter()
                .enumerate()
                .for_each(|(i, &cw)| blocks[c1 + i].push(cw));
        }
        // Parity rows
        raw[data_len..]
            .chunks(total_blocks)
            .for_each(|row| row.iter().enumerate().for_each(|(i, &cw)| blocks[i].push(cw)));

        Ok(blocks
            .into_iter()
            .map(|codewords| DataBlock {
                num_data_codewords: codewords.len() - ec_len,
                codewords,
            })
            .collect())
    }
}

#[cfg(test)]
mod data_block_tests {
    use super::*;

    /// Inverse of `DataBlock::build` for manufacturing test streams.
    pub(crate) fn interleave(blocks: &[(Vec<u8>, Vec<u8>)]) -> Vec<u8> {
        let mut out = Vec::new();
        let max_data = blocks.iter().map(|(d, _)| d.len()).max().unwrap();
        for i in 0..max_data {
            for (data, _) in blocks {
                if let Some(&cw) = data.get(i) {
                    out.push(cw);
                }
            }
        }
        let ec_len = blocks[0].1.len();
        for i in 0..ec_len {
            for (_, ec) in blocks {
                out.push(ec[i]);
            }
        }
        out
    }

    #[test]
    fn test_single_block() {
        // Version 1-L: one block, 19 data + 7 parity
        let raw: Vec<u8> = (0..26).collect();
        let blocks = DataBlock::build(&raw, Version::new(1), ECLevel::L).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].num_data_codewords(), 19);
        assert_eq!(blocks[0].codewords(), &raw[..]);
    }

    #[test]
    fn test_wrong_length() {
        let raw = vec![0u8; 25];
        assert_eq!(
            DataBlock::build(&raw, Version::new(1), ECLevel::L),
            Err(DecodeError::CodewordMismatch)
        );
    }

    #[test]
    fn test_even_blocks_roundtrip() {
        // Version 3-Q: two blocks of 17 data + 18 parity each
        let block_a: Vec<u8> = (0..17).collect();
        let block_b: Vec<u8> = (100..117).collect();
        let ec_a: Vec<u8> = (200..218).collect();
        let ec_b: Vec<u8> = (230..248).collect();
        let raw = interleave(&[(block_a.clone(), ec_a.clone()), (block_b.clone(), ec_b.clone())]);

        let blocks = DataBlock::build(&raw, Version::new(3), ECLevel::Q).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(&blocks[0].codewords()[..17], &block_a[..]);
        assert_eq!(&blocks[0].codewords()[17..], &ec_a[..]);
        assert_eq!(&blocks[1].codewords()[..17], &block_b[..]);
        assert_eq!(&blocks[1].codewords()[17..], &ec_b[..]);
    }

    #[test]
    fn test_uneven_blocks_short_first() {
        // Version 5-Q: 2 blocks of 15 data + 2 blocks of 16 data, 18 parity
        let short_a: Vec<u8> = (0..15).collect();
        let short_b: Vec<u8> = (20..35).collect();
        let long_a: Vec<u8> = (40..56).collect();
        let long_b: Vec<u8> = (60..76).collect();
        let parity: Vec<Vec<u8>> = (0..4).map(|b| (0..18).map(|i| 100 + b * 20 + i).collect()).collect();

        let raw = interleave(&[
            (short_a.clone(), parity[0].clone()),
            (short_b.clone(), parity[1].clone()),
            (long_a.clone(), parity[2].clone()),
            (long_b.clone(), parity[3].clone()),
        ]);
        let blocks = DataBlock::build(&raw, Version::new(5), ECLevel::Q).unwrap();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].num_data_codewords(), 15);
        assert_eq!(blocks[1].num_data_codewords(), 15);
        assert_eq!(blocks[2].num_data_codewords(), 16);
        assert_eq!(blocks[3].num_data_codewords(), 16);
        assert_eq!(&blocks[2].codewords()[..16], &long_a[..]);
        assert_eq!(&blocks[3].codewords()[16..], &parity[3][..]);
        // Totals reconcile with the raw stream
        let sum: usize = blocks.iter().map(|b| b.codewords().len()).sum();
        assert_eq!(sum, raw.len());
    }
}
