use once_cell::sync::Lazy;

use crate::common::error::{DecodeError, DecodeResult};

// Galois field
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum FieldKind {
    // GF(2^m): addition is XOR, elements reduced by the primitive polynomial
    Binary,
    // GF(p) for prime p: addition and subtraction are modular
    Prime,
}

/// A finite field with precomputed log/antilog tables. Binary extension
/// fields GF(2^m) and the prime field GF(929) used by PDF417 share this one
/// representation; the distinction is internal to `add` and `sub`.
///
/// `generator_base` is the exponent the first syndrome is evaluated at:
/// some symbologies (Data Matrix, Aztec, MaxiCode, PDF417) start at α^1
/// rather than α^0 and need the extra Xi⁻¹ factor in Forney's formula.
#[derive(Debug, PartialEq, Eq)]
pub struct Field {
    size: usize,
    generator_base: usize,
    kind: FieldKind,
    // Antilog table doubled so products of two logs index without a modulo
    exp: Vec<u32>,
    log: Vec<u32>,
}

impl Field {
    /// GF(2^m) for the primitive polynomial `primitive` of degree m,
    /// `size` = 2^m.
    fn binary(primitive: u32, size: usize, generator_base: usize) -> Self {
        let order = size - 1;
        let mut exp = vec![0u32; 2 * order];
        let mut log = vec![0u32; size];
        let mut x = 1u32;
        for i in 0..order {
            exp[i] = x;
            exp[i + order] = x;
            log[x as usize] = i as u32;
            x <<= 1;
            if x as usize & size != 0 {
                x ^= primitive;
                x &= size as u32 - 1;
            }
        }
        Self { size, generator_base, kind: FieldKind::Binary, exp, log }
    }

    /// GF(p) for prime `modulus`, with multiplicative `generator`.
    fn prime(modulus: usize, generator: u32, generator_base: usize) -> Self {
        let order = modulus - 1;
        let mut exp = vec![0u32; 2 * order];
        let mut log = vec![0u32; modulus];
        let mut x = 1u64;
        for i in 0..order {
            exp[i] = x as u32;
            exp[i + order] = x as u32;
            log[x as usize] = i as u32;
            x = x * generator as u64 % modulus as u64;
        }
        Self { size: modulus, generator_base, kind: FieldKind::Prime, exp, log }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn generator_base(&self) -> usize {
        self.generator_base
    }

    pub fn add(&self, a: u32, b: u32) -> u32 {
        match self.kind {
            FieldKind::Binary => a ^ b,
            FieldKind::Prime => (a + b) % self.size as u32,
        }
    }

    pub fn sub(&self, a: u32, b: u32) -> u32 {
        match self.kind {
            FieldKind::Binary => a ^ b,
            FieldKind::Prime => (self.size as u32 + a - b) % self.size as u32,
        }
    }

    pub fn multiply(&self, a: u32, b: u32) -> u32 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[(self.log[a as usize] + self.log[b as usize]) as usize]
    }

    /// α^i, cyclic in the group order.
    pub fn exp(&self, i: usize) -> u32 {
        self.exp[i % (self.size - 1)]
    }

    pub fn log(&self, a: u32) -> u32 {
        debug_assert!(a != 0, "log(0) is undefined");
        self.log[a as usize]
    }

    pub fn inverse(&self, a: u32) -> DecodeResult<u32> {
        if a == 0 {
            return Err(DecodeError::ZeroDivisor);
        }
        Ok(self.exp[self.size - 1 - self.log[a as usize] as usize])
    }
}

// Field instances
//------------------------------------------------------------------------------

static QR_FIELD: Lazy<Field> = Lazy::new(|| Field::binary(0x011D, 256, 0));
static DATA_MATRIX_FIELD: Lazy<Field> = Lazy::new(|| Field::binary(0x012D, 256, 1));
static AZTEC_PARAM: Lazy<Field> = Lazy::new(|| Field::binary(0x13, 16, 1));
static AZTEC_DATA_6: Lazy<Field> = Lazy::new(|| Field::binary(0x43, 64, 1));
static AZTEC_DATA_10: Lazy<Field> = Lazy::new(|| Field::binary(0x409, 1024, 1));
static AZTEC_DATA_12: Lazy<Field> = Lazy::new(|| Field::binary(0x1069, 4096, 1));
static PDF417_FIELD: Lazy<Field> = Lazy::new(|| Field::prime(929, 3, 1));

/// GF(256) over x^8 + x^4 + x^3 + x^2 + 1, syndromes from α^0.
pub fn qr_field() -> &'static Field {
    &QR_FIELD
}

/// GF(256) over x^8 + x^5 + x^3 + x^2 + 1, syndromes from α^1.
pub fn data_matrix_field() -> &'static Field {
    &DATA_MATRIX_FIELD
}

/// GF(16), Aztec mode-message parameters.
pub fn aztec_param_field() -> &'static Field {
    &AZTEC_PARAM
}

pub fn aztec_data_6() -> &'static Field {
    &AZTEC_DATA_6
}

pub fn aztec_data_8() -> &'static Field {
    &DATA_MATRIX_FIELD
}

pub fn aztec_data_10() -> &'static Field {
    &AZTEC_DATA_10
}

pub fn aztec_data_12() -> &'static Field {
    &AZTEC_DATA_12
}

/// GF(64), same field as the 6-bit Aztec data words.
pub fn maxicode_field() -> &'static Field {
    &AZTEC_DATA_6
}

/// The prime field GF(929) with generator 3.
pub fn pdf417_field() -> &'static Field {
    &PDF417_FIELD
}
