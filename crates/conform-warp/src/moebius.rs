use conform_fixed::{Complex, Fixed};
use num_traits::Zero;

/// A map of the complex plane, evaluated pointwise.
///
/// Both [`MobiusTransform`] and [`BlaschkeMap`](crate::BlaschkeMap) implement
/// this; the renderer is generic over it, so dispatch is resolved at compile
/// time and stays out of the per-pixel path.
pub trait ComplexMap {
    /// Evaluates the map at `z`.
    fn eval(&self, z: Complex) -> Complex;
}

/// Fractional-linear transformation `z -> (a z + b) / (c z + d)`.
///
/// The map is invertible when `ad - bc != 0`; the type does not enforce this.
/// Evaluation guards its denominator against an exact zero, and
/// [`MobiusTransform::invert`] falls back to the identity on a degenerate
/// determinant, so neither operation can fault.
///
/// The `is_identity` flag is set only by [`MobiusTransform::IDENTITY`]. A
/// numerically identical map built from explicit coefficients is *not*
/// recognized as the identity; the flag records provenance, not value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MobiusTransform {
    a: Complex,
    b: Complex,
    c: Complex,
    d: Complex,
    is_identity: bool,
}

impl MobiusTransform {
    /// The identity map, `a = d = 1`, `b = c = 0`.
    pub const IDENTITY: MobiusTransform = MobiusTransform {
        a: Complex::ONE,
        b: Complex::ZERO,
        c: Complex::ZERO,
        d: Complex::ONE,
        is_identity: true,
    };

    /// Creates a transform from its four coefficients.
    pub const fn new(a: Complex, b: Complex, c: Complex, d: Complex) -> MobiusTransform {
        MobiusTransform {
            a,
            b,
            c,
            d,
            is_identity: false,
        }
    }

    /// The canonical hyperbolic isometry of the unit disk for the parameter
    /// `zeta`: `z -> (z - zeta) / (1 - conj(zeta) z)` up to coefficient
    /// normalization, here `(1, -zeta, -conj(zeta), 1)`.
    pub const fn hyperbolic_isometry(zeta: Complex) -> MobiusTransform {
        MobiusTransform::new(
            Complex::ONE,
            Complex::new(
                Fixed::from_raw(-zeta.re.raw()),
                Fixed::from_raw(-zeta.im.raw()),
            ),
            Complex::new(
                Fixed::from_raw(-zeta.re.raw()),
                zeta.im,
            ),
            Complex::ONE,
        )
    }

    /// Whether this transform was constructed as the identity.
    pub const fn is_identity(&self) -> bool {
        self.is_identity
    }

    /// Applies the transform to a point.
    ///
    /// The denominator is routed through the divide-zero guard before the
    /// division, so a pole evaluates to a large finite value instead of
    /// faulting.
    pub fn apply(&self, z: Complex) -> Complex {
        let num = self.a * z + self.b;
        let den = (self.c * z + self.d).nudge_if_zero();
        num / den
    }

    /// Composes two transforms; `t.compose(&s)` applies `s` first, then `t`,
    /// matching function composition `(t ∘ s)(z) = t(s(z))`.
    ///
    /// The coefficients are the 2x2 matrix product of the operands'
    /// coefficient matrices. Composition is associative but not commutative.
    pub fn compose(&self, other: &MobiusTransform) -> MobiusTransform {
        if self.is_identity {
            return *other;
        }
        if other.is_identity {
            return *self;
        }
        MobiusTransform::new(
            self.a * other.a + self.b * other.c,
            self.a * other.b + self.b * other.d,
            self.c * other.a + self.d * other.c,
            self.c * other.b + self.d * other.d,
        )
    }

    /// The inverse transform.
    ///
    /// For determinant `ad - bc` exactly zero the map is not invertible and
    /// the identity is returned as the defined fallback.
    pub fn invert(&self) -> MobiusTransform {
        if self.is_identity {
            return *self;
        }
        let det = self.a * self.d - self.b * self.c;
        if det.is_zero() {
            return MobiusTransform::IDENTITY;
        }
        MobiusTransform::new(self.d / det, -self.b / det, -self.c / det, self.a / det)
    }
}

impl ComplexMap for MobiusTransform {
    fn eval(&self, z: Complex) -> Complex {
        self.apply(z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_close(a: Complex, b: Complex, tol_raw: i32) {
        let dre = (a.re - b.re).abs().raw();
        let dim = (a.im - b.im).abs().raw();
        assert!(
            dre <= tol_raw && dim <= tol_raw,
            "{a} != {b} (tolerance {tol_raw} raw)"
        );
    }

    fn sample_points() -> Vec<Complex> {
        vec![
            Complex::ZERO,
            Complex::ONE,
            Complex::I,
            Complex::from_f32(0.25, -0.75),
            Complex::from_f32(-1.5, 0.5),
        ]
    }

    #[test]
    fn identity_applies_as_identity() {
        for z in sample_points() {
            assert_eq!(MobiusTransform::IDENTITY.apply(z), z);
        }
    }

    #[test]
    fn identity_flag_records_provenance_not_value() {
        let numerically_identity = MobiusTransform::new(
            Complex::ONE,
            Complex::ZERO,
            Complex::ZERO,
            Complex::ONE,
        );
        assert!(!numerically_identity.is_identity());
        assert!(MobiusTransform::IDENTITY.is_identity());
        // it still behaves as the identity pointwise
        for z in sample_points() {
            assert_eq!(numerically_identity.apply(z), z);
        }
    }

    #[test]
    fn inverse_round_trips_well_conditioned_transforms() {
        let t = MobiusTransform::new(
            Complex::from_f32(1.5, 0.0),
            Complex::from_f32(0.25, 0.5),
            Complex::from_f32(0.0, 0.125),
            Complex::ONE,
        );
        let inv = t.invert();
        for z in [
            Complex::from_f32(0.25, 0.25),
            Complex::from_f32(-0.5, 0.75),
            Complex::ZERO,
        ] {
            assert_close(inv.apply(t.apply(z)), z, 256);
        }
    }

    #[test]
    fn degenerate_determinant_inverts_to_identity() {
        // rank-1 coefficient matrix: ad == bc
        let t = MobiusTransform::new(
            Complex::from_f32(1.0, 0.0),
            Complex::from_f32(2.0, 0.0),
            Complex::from_f32(2.0, 0.0),
            Complex::from_f32(4.0, 0.0),
        );
        assert!(t.invert().is_identity());
    }

    #[test]
    fn compose_applies_right_operand_first() {
        // t doubles, s translates by 1: (t ∘ s)(z) = 2(z + 1)
        let t = MobiusTransform::new(
            Complex::from_f32(2.0, 0.0),
            Complex::ZERO,
            Complex::ZERO,
            Complex::ONE,
        );
        let s = MobiusTransform::new(Complex::ONE, Complex::ONE, Complex::ZERO, Complex::ONE);
        let ts = t.compose(&s);
        assert_eq!(ts.apply(Complex::ZERO), Complex::from_f32(2.0, 0.0));
        assert_eq!(ts.apply(Complex::ONE), Complex::from_f32(4.0, 0.0));
        // the other order translates after doubling
        let st = s.compose(&t);
        assert_eq!(st.apply(Complex::ONE), Complex::from_f32(3.0, 0.0));
    }

    #[test]
    fn composition_is_associative_within_tolerance() {
        let mut rng = StdRng::seed_from_u64(7);
        let coeff = |rng: &mut StdRng| {
            Complex::from_f32(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0))
        };
        for _ in 0..32 {
            let t = MobiusTransform::new(
                coeff(&mut rng),
                coeff(&mut rng),
                coeff(&mut rng),
                coeff(&mut rng),
            );
            let s = MobiusTransform::new(
                coeff(&mut rng),
                coeff(&mut rng),
                coeff(&mut rng),
                coeff(&mut rng),
            );
            let r = MobiusTransform::new(
                coeff(&mut rng),
                coeff(&mut rng),
                coeff(&mut rng),
                coeff(&mut rng),
            );
            let left = t.compose(&s).compose(&r);
            let right = t.compose(&s.compose(&r));
            // the coefficient matrices agree up to fixed-point rounding
            assert_close(left.a, right.a, 64);
            assert_close(left.b, right.b, 64);
            assert_close(left.c, right.c, 64);
            assert_close(left.d, right.d, 64);
        }
    }

    #[test]
    fn hyperbolic_isometry_sends_its_parameter_to_zero() {
        let zeta = Complex::from_f32(0.5, 0.25);
        let iso = MobiusTransform::hyperbolic_isometry(zeta);
        assert_close(iso.apply(zeta), Complex::ZERO, 8);
        // the origin goes to -zeta
        assert_close(iso.apply(Complex::ZERO), -zeta, 8);
    }

    #[test]
    fn apply_survives_its_pole() {
        // pole at z = 1 for (z + 1) / (z - 1)
        let t = MobiusTransform::new(
            Complex::ONE,
            Complex::ONE,
            Complex::ONE,
            -Complex::ONE,
        );
        // guarded division returns a defined (large) value, not a fault
        let _ = t.apply(Complex::ONE);
    }
}
