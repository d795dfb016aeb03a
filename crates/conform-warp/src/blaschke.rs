use std::ops::{BitOr, MulAssign};

use conform_fixed::Complex;

use crate::moebius::{ComplexMap, MobiusTransform};

/// Maximum number of factors a [`BlaschkeMap`] holds; appends beyond this
/// are dropped.
pub const MAX_FACTORS: usize = 6;

/// A finite Blaschke-type product of Möbius factors plus a framing transform.
///
/// Evaluation at `z` multiplies together the *outputs* `factor_i(z)` (complex
/// multiplication, not function composition, per the definition of a Blaschke
/// product) and then applies the framing transform to the result. With no
/// factors the product leaves `z` untouched, so a default-constructed map is
/// the identity map of the plane.
///
/// Factor storage is a fixed-capacity array with an explicit count: no
/// allocation happens at construction or during evaluation, and appending
/// past [`MAX_FACTORS`] is a silent no-op (a documented limitation, not a
/// fault).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlaschkeMap {
    factors: [MobiusTransform; MAX_FACTORS],
    len: usize,
    framing: MobiusTransform,
}

impl BlaschkeMap {
    /// Creates the empty product, which evaluates as the identity map.
    pub const fn new() -> BlaschkeMap {
        BlaschkeMap {
            factors: [MobiusTransform::IDENTITY; MAX_FACTORS],
            len: 0,
            framing: MobiusTransform::IDENTITY,
        }
    }

    /// Creates a product with one initial factor.
    pub const fn from_factor(factor: MobiusTransform) -> BlaschkeMap {
        let mut map = BlaschkeMap::new();
        map.factors[0] = factor;
        map.len = 1;
        map
    }

    /// Creates a product with two initial factors.
    pub const fn from_factors(first: MobiusTransform, second: MobiusTransform) -> BlaschkeMap {
        let mut map = BlaschkeMap::from_factor(first);
        map.factors[1] = second;
        map.len = 2;
        map
    }

    /// Appends a factor; at capacity the append is a silent no-op.
    pub fn push(&mut self, factor: MobiusTransform) {
        if self.len < MAX_FACTORS {
            self.factors[self.len] = factor;
            self.len += 1;
        }
    }

    /// The number of active factors.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the product has no factors.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for BlaschkeMap {
    fn default() -> BlaschkeMap {
        BlaschkeMap::new()
    }
}

/// Multiply-accumulate of a single factor, `map *= factor`.
impl MulAssign<MobiusTransform> for BlaschkeMap {
    fn mul_assign(&mut self, rhs: MobiusTransform) {
        self.push(rhs);
    }
}

/// Multiply-accumulate of another product's factors.
///
/// Only the operand's factors are appended; its framing transform is not
/// carried over.
impl MulAssign<&BlaschkeMap> for BlaschkeMap {
    fn mul_assign(&mut self, rhs: &BlaschkeMap) {
        for factor in &rhs.factors[..rhs.len] {
            self.push(*factor);
        }
    }
}

/// Output-side framing: `(m | map)(z) = m(map(z))`.
///
/// The Möbius operand post-processes the product's output by composing onto
/// the framing field; the factors are untouched.
impl BitOr<BlaschkeMap> for MobiusTransform {
    type Output = BlaschkeMap;

    fn bitor(self, rhs: BlaschkeMap) -> BlaschkeMap {
        BlaschkeMap {
            framing: self.compose(&rhs.framing),
            ..rhs
        }
    }
}

/// Input-side framing: `(map | m)(z) = map(m(z))`.
///
/// The Möbius operand transforms the input coordinate before the product is
/// evaluated, by substituting into every factor; the framing field is
/// untouched.
impl BitOr<MobiusTransform> for BlaschkeMap {
    type Output = BlaschkeMap;

    fn bitor(mut self, rhs: MobiusTransform) -> BlaschkeMap {
        for factor in &mut self.factors[..self.len] {
            *factor = factor.compose(&rhs);
        }
        self
    }
}

impl ComplexMap for BlaschkeMap {
    fn eval(&self, z: Complex) -> Complex {
        let w = if self.len == 0 {
            z
        } else {
            let mut w = self.factors[0].apply(z);
            for factor in &self.factors[1..self.len] {
                w = w * factor.apply(z);
            }
            w
        };
        if self.framing.is_identity() {
            w
        } else {
            self.framing.apply(w)
        }
    }
}
