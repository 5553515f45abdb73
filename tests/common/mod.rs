#![allow(dead_code)]

//! Minimal QR builder used to manufacture module grids for the decoder
//! tests. Single segment, mode picked from the content.

use gridcode::common::ec::galois::qr_field;
use gridcode::common::ec::poly::GfPoly;
use gridcode::qr::codec::Mode;
use gridcode::qr::metadata::{
    ECLevel, Version, FORMAT_INFOS_QR, FORMAT_INFO_COORDS_MAIN, FORMAT_INFO_COORDS_SIDE,
    VERSION_INFOS, VERSION_INFO_COORDS_BL, VERSION_INFO_COORDS_TR,
};
use gridcode::qr::parser::RegionIter;
use gridcode::qr::MaskPattern;
use gridcode::{BitMatrix, BitStream};

use image::{GrayImage, Luma};

static ALPHANUMERIC_CHARS: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

pub fn encode_qr(data: &str, ver: Version, ecl: ECLevel, mask: MaskPattern) -> BitMatrix {
    let stream = build_codeword_stream(data.as_bytes(), ver, ecl);

    let dim = ver.width();
    let mut matrix = BitMatrix::square(dim);
    draw_function_patterns(&mut matrix, ver);
    write_format_info(&mut matrix, ecl, mask);
    write_version_info(&mut matrix, ver);
    place_data(&mut matrix, ver, mask, &stream);
    matrix
}

// Segment encoding
//------------------------------------------------------------------------------

fn pick_mode(bytes: &[u8]) -> Mode {
    if bytes.iter().all(u8::is_ascii_digit) {
        Mode::Numeric
    } else if bytes.iter().all(|b| ALPHANUMERIC_CHARS.contains(b)) {
        Mode::Alphanumeric
    } else {
        Mode::Byte
    }
}

fn alphanumeric_value(b: u8) -> u16 {
    ALPHANUMERIC_CHARS.iter().position(|&c| c == b).unwrap() as u16
}

fn build_codeword_stream(bytes: &[u8], ver: Version, ecl: ECLevel) -> Vec<u8> {
    let mode = pick_mode(bytes);
    let mut bs = BitStream::new();
    bs.push_bits(mode as u8, 4);

    let count = match mode {
        Mode::Byte => bytes.len(),
        _ => std::str::from_utf8(bytes).unwrap().chars().count(),
    };
    bs.push_bits(count as u16, mode.char_count_bits(ver));

    match mode {
        Mode::Numeric => {
            for chunk in bytes.chunks(3) {
                let value: u16 = chunk.iter().fold(0, |v, &b| v * 10 + (b - b'0') as u16);
                bs.push_bits(value, chunk.len() * 3 + 1);
            }
        }
        Mode::Alphanumeric => {
            for chunk in bytes.chunks(2) {
                if chunk.len() == 2 {
                    bs.push_bits(alphanumeric_value(chunk[0]) * 45 + alphanumeric_value(chunk[1]), 11);
                } else {
                    bs.push_bits(alphanumeric_value(chunk[0]), 6);
                }
            }
        }
        _ => {
            for &b in bytes {
                bs.push_bits(b, 8);
            }
        }
    }

    let ec_blocks = ver.ec_blocks(ecl);
    let capacity_bits = ec_blocks.total_data_codewords() * 8;
    assert!(bs.len() <= capacity_bits, "data does not fit version {ver} at level {ecl}");

    // Terminator, byte alignment, then alternating pad codewords
    bs.push_bits(0u8, (capacity_bits - bs.len()).min(4));
    if bs.len() % 8 != 0 {
        bs.push_bits(0u8, 8 - bs.len() % 8);
    }
    let mut pad = [0xECu8, 0x11].into_iter().cycle();
    while bs.len() < capacity_bits {
        bs.push_bits(pad.next().unwrap(), 8);
    }

    blockify_and_interleave(bs.data(), ver, ecl)
}

// Error correction and interleaving
//------------------------------------------------------------------------------

pub fn rs_parity(data: &[u8], ec_len: usize) -> Vec<u8> {
    let field = qr_field();
    let mut generator = GfPoly::new(field, vec![1]);
    for i in 0..ec_len {
        generator = generator.multiply(&GfPoly::new(field, vec![1, field.exp(i)]));
    }
    let coefficients = data.iter().map(|&b| b as u32).collect();
    let info = GfPoly::new(field, coefficients).multiply_by_monomial(ec_len, 1);
    let (_, remainder) = info.divide(&generator).unwrap();

    let mut parity = vec![0u8; ec_len];
    if !remainder.is_zero() {
        for d in 0..=remainder.degree() {
            parity[ec_len - 1 - d] = remainder.coefficient(d) as u8;
        }
    }
    parity
}

fn blockify_and_interleave(data: &[u8], ver: Version, ecl: ECLevel) -> Vec<u8> {
    let ec_blocks = ver.ec_blocks(ecl);
    let ec_len = ec_blocks.ec_codewords_per_block();
    let [(c1, d1), (c2, d2)] = ec_blocks.groups();

    let mut blocks: Vec<(Vec<u8>, Vec<u8>)> = Vec::with_capacity(c1 + c2);
    let mut offset = 0;
    for (count, data_len) in [(c1, d1), (c2, d2)] {
        for _ in 0..count {
            let block = data[offset..offset + data_len].to_vec();
            offset += data_len;
            let parity = rs_parity(&block, ec_len);
            blocks.push((block, parity));
        }
    }

    let mut stream = Vec::with_capacity(ec_blocks.total_codewords());
    let max_data = d1.max(d2);
    for i in 0..max_data {
        for (block, _) in &blocks {
            if let Some(&cw) = block.get(i) {
                stream.push(cw);
            }
        }
    }
    for i in 0..ec_len {
        for (_, parity) in &blocks {
            stream.push(parity[i]);
        }
    }
    stream
}

// Module placement
//------------------------------------------------------------------------------

fn set_wrapped(matrix: &mut BitMatrix, r: i32, c: i32, bit: bool) {
    let w = matrix.width() as i32;
    let r = if r < 0 { r + w } else { r };
    let c = if c < 0 { c + w } else { c };
    matrix.set(c as usize, r as usize, bit);
}

fn draw_function_patterns(matrix: &mut BitMatrix, ver: Version) {
    let dim = ver.width();
    draw_finder(matrix, 0, 0);
    draw_finder(matrix, dim - 7, 0);
    draw_finder(matrix, 0, dim - 7);

    for i in 8..dim - 8 {
        let dark = i % 2 == 0;
        matrix.set(i, 6, dark);
        matrix.set(6, i, dark);
    }

    let centers = ver.alignment_centers();
    let max = centers.len();
    for (i, &cy) in centers.iter().enumerate() {
        for (j, &cx) in centers.iter().enumerate() {
            if (i == 0 && (j == 0 || j == max - 1)) || (i == max - 1 && j == 0) {
                continue;
            }
            draw_alignment(matrix, cx, cy);
        }
    }

    // Dark module beside the bottom-left finder
    matrix.set(8, dim - 8, true);
}

fn draw_finder(matrix: &mut BitMatrix, left: usize, top: usize) {
    for dy in 0..7 {
        for dx in 0..7 {
            let ring = dx == 0 || dx == 6 || dy == 0 || dy == 6;
            let core = (2..=4).contains(&dx) && (2..=4).contains(&dy);
            matrix.set(left + dx, top + dy, ring || core);
        }
    }
}

fn draw_alignment(matrix: &mut BitMatrix, cx: usize, cy: usize) {
    for dy in -2i32..=2 {
        for dx in -2i32..=2 {
            let dark = dx.abs() == 2 || dy.abs() == 2 || (dx == 0 && dy == 0);
            matrix.set((cx as i32 + dx) as usize, (cy as i32 + dy) as usize, dark);
        }
    }
}

fn write_format_info(matrix: &mut BitMatrix, ecl: ECLevel, mask: MaskPattern) {
    let index = (ecl.format_bits() << 3) | *mask as u32;
    let code = FORMAT_INFOS_QR[index as usize];
    for (i, &(r, c)) in FORMAT_INFO_COORDS_MAIN.iter().enumerate() {
        set_wrapped(matrix, r, c, (code >> (14 - i)) & 1 == 1);
    }
    for (i, &(r, c)) in FORMAT_INFO_COORDS_SIDE.iter().enumerate() {
        set_wrapped(matrix, r, c, (code >> (14 - i)) & 1 == 1);
    }
}

fn write_version_info(matrix: &mut BitMatrix, ver: Version) {
    if ver.number() < 7 {
        return;
    }
    let code = VERSION_INFOS[ver.number() - 7];
    for (i, &(r, c)) in VERSION_INFO_COORDS_BL.iter().enumerate() {
        set_wrapped(matrix, r, c, (code >> (17 - i)) & 1 == 1);
    }
    for (i, &(r, c)) in VERSION_INFO_COORDS_TR.iter().enumerate() {
        set_wrapped(matrix, r, c, (code >> (17 - i)) & 1 == 1);
    }
}

fn place_data(matrix: &mut BitMatrix, ver: Version, mask: MaskPattern, stream: &[u8]) {
    let fp = ver.function_pattern();
    let mask_fn = mask.mask_function();
    let total_bits = stream.len() * 8;
    let mut bit_idx = 0;
    for (r, c) in RegionIter::new(ver.width()) {
        if fp.get(c, r) {
            continue;
        }
        let bit = if bit_idx < total_bits {
            (stream[bit_idx / 8] >> (7 - bit_idx % 8)) & 1 == 1
        } else {
            false
        };
        bit_idx += 1;
        matrix.set(c, r, bit ^ mask_fn(r as i32, c as i32));
    }
}

// Rendering
//------------------------------------------------------------------------------

/// A clean grayscale rendering, `mod_size` pixels per module with a quiet
/// zone, for the image-adapter tests.
pub fn render_gray(matrix: &BitMatrix, mod_size: u32, quiet: u32) -> GrayImage {
    let dim = matrix.width() as u32;
    let full = (dim + 2 * quiet) * mod_size;
    let mut img = GrayImage::from_pixel(full, full, Luma([255u8]));
    for y in 0..dim {
        for x in 0..dim {
            if matrix.get(x as usize, y as usize) {
                for py in 0..mod_size {
                    for px in 0..mod_size {
                        img.put_pixel(
                            (quiet + x) * mod_size + px,
                            (quiet + y) * mod_size + py,
                            Luma([0u8]),
                        );
                    }
                }
            }
        }
    }
    img
}
