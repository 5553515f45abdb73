use super::galois::Field;
use super::poly::GfPoly;
use crate::common::error::{DecodeError, DecodeResult};

// Reed-Solomon decoder
//------------------------------------------------------------------------------

/// Corrects errors in a received codeword vector over any [`Field`]. The
/// locator polynomial comes out of the Euclidean algorithm, its roots out of
/// a Chien search, and the error magnitudes out of Forney's formula. Works
/// unchanged for the binary fields and for the PDF417 prime field.
#[derive(Debug)]
pub struct ReedSolomon {
    field: &'static Field,
}

impl ReedSolomon {
    pub fn new(field: &'static Field) -> Self {
        Self { field }
    }

    /// Corrects up to `two_s / 2` errors in place and returns how many were
    /// corrected. Fails without producing a silent miscorrection when the
    /// errors exceed capacity: the Chien root count must match the locator
    /// degree, so a wrong locator is rejected rather than applied.
    pub fn correct(&self, received: &mut [u32], two_s: usize) -> DecodeResult<usize> {
        let field = self.field;
        let poly = GfPoly::new(field, received.to_vec());

        // Syndromes, stored high-order first
        let mut syndromes = vec![0u32; two_s];
        let mut no_error = true;
        for i in 0..two_s {
            let eval = poly.evaluate_at(field.exp(i + field.generator_base()));
            syndromes[two_s - 1 - i] = eval;
            if eval != 0 {
                no_error = false;
            }
        }
        if no_error {
            return Ok(0);
        }

        let syndrome_poly = GfPoly::new(field, syndromes);
        let monomial = GfPoly::monomial(field, two_s, 1);
        let (sigma, omega) = self.run_euclidean(&monomial, &syndrome_poly, two_s)?;

        let locations = self.find_error_locations(&sigma)?;
        let magnitudes = self.find_error_magnitudes(&omega, &locations)?;

        for (&location, &magnitude) in locations.iter().zip(&magnitudes) {
            let log = field.log(location) as usize;
            if log >= received.len() {
                return Err(DecodeError::BadErrorLocation);
            }
            let position = received.len() - 1 - log;
            received[position] = field.sub(received[position], magnitude);
        }

        // A corrected vector must have all-zero syndromes; anything else
        // means the errors were beyond capacity.
        let check = GfPoly::new(field, received.to_vec());
        for i in 0..two_s {
            if check.evaluate_at(field.exp(i + field.generator_base())) != 0 {
                return Err(DecodeError::TooManyErrors);
            }
        }
        Ok(locations.len())
    }

    /// Extended Euclidean algorithm on (x^twoS, S(x)), stopping once
    /// 2·deg(r) < twoS. Returns the normalized locator σ and evaluator ω.
    fn run_euclidean(
        &self,
        a: &GfPoly,
        b: &GfPoly,
        two_s: usize,
    ) -> DecodeResult<(GfPoly, GfPoly)> {
        let field = self.field;
        let mut r_last = a.clone();
        let mut r = b.clone();
        let mut t_last = GfPoly::zero(field);
        let mut t = GfPoly::new(field, vec![1]);

        while 2 * r.degree() >= two_s {
            let r_last_last = r_last;
            let t_last_last = t_last;
            r_last = r;
            t_last = t;

            if r_last.is_zero() {
                return Err(DecodeError::SingularLocator);
            }
            let (q, remainder) = r_last_last.divide(&r_last)?;
            r = remainder;
            t = t_last_last.sub(&q.multiply(&t_last));

            if !r.is_zero() && r.degree() >= r_last.degree() {
                return Err(DecodeError::DivisionFailed);
            }
        }

        let sigma_tilde_at_zero = t.coefficient(0);
        if sigma_tilde_at_zero == 0 {
            return Err(DecodeError::SingularLocator);
        }
        let inverse = field.inverse(sigma_tilde_at_zero)?;
        let sigma = t.scale(inverse);
        let omega = r.scale(inverse);
        Ok((sigma, omega))
    }

    /// Chien search: the error locations are the inverses of σ's roots.
    fn find_error_locations(&self, sigma: &GfPoly) -> DecodeResult<Vec<u32>> {
        let field = self.field;
        let num_errors = sigma.degree();
        let mut locations = Vec::with_capacity(num_errors);
        for i in 1..field.size() {
            if locations.len() >= num_errors {
                break;
            }
            if sigma.evaluate_at(i as u32) == 0 {
                locations.push(field.inverse(i as u32)?);
            }
        }
        if locations.len() != num_errors {
            return Err(DecodeError::DegreeMismatch);
        }
        Ok(locations)
    }

    /// Forney's formula: Yᵢ = ω(Xᵢ⁻¹) / ∏_{j≠i} (1 − Xⱼ·Xᵢ⁻¹), with an extra
    /// Xᵢ⁻¹ factor when syndromes start at α^1.
    fn find_error_magnitudes(
        &self,
        omega: &GfPoly,
        locations: &[u32],
    ) -> DecodeResult<Vec<u32>> {
        let field = self.field;
        let s = locations.len();
        let mut magnitudes = Vec::with_capacity(s);
        for i in 0..s {
            let xi_inverse = field.inverse(locations[i])?;
            let mut denominator = 1;
            for j in 0..s {
                if i == j {
                    continue;
                }
                // In characteristic 2 this subtraction is a plain XOR with 1;
                // older JVM-hosted implementations carry a bit-twiddled
                // workaround here, which this platform does not need.
                let term = field.sub(1, field.multiply(locations[j], xi_inverse));
                denominator = field.multiply(denominator, term);
            }
            let mut magnitude =
                field.multiply(omega.evaluate_at(xi_inverse), field.inverse(denominator)?);
            if field.generator_base() != 0 {
                magnitude = field.multiply(magnitude, xi_inverse);
            }
            magnitudes.push(magnitude);
        }
        Ok(magnitudes)
    }
}
