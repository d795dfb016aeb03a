use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Zero};

use crate::Fixed;

/// Complex number with [`Fixed`] real and imaginary parts.
///
/// Arithmetic follows the usual complex field rules built from fixed-point
/// operations. Division is total: a denominator whose squared norm rounds to
/// exactly zero is nudged by one ULP before dividing, so no operand can fault.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Complex {
    /// Real part.
    pub re: Fixed,
    /// Imaginary part.
    pub im: Fixed,
}

impl Complex {
    /// The additive identity.
    pub const ZERO: Complex = Complex::new(Fixed::ZERO, Fixed::ZERO);

    /// The multiplicative identity.
    pub const ONE: Complex = Complex::new(Fixed::ONE, Fixed::ZERO);

    /// The imaginary unit.
    pub const I: Complex = Complex::new(Fixed::ZERO, Fixed::ONE);

    /// Creates a complex number from fixed-point parts.
    pub const fn new(re: Fixed, im: Fixed) -> Complex {
        Complex { re, im }
    }

    /// Creates a complex number from float parts, rounding each to the
    /// nearest representable fixed-point value.
    pub fn from_f32(re: f32, im: f32) -> Complex {
        Complex::new(Fixed::from_f32(re), Fixed::from_f32(im))
    }

    /// The complex conjugate.
    pub const fn conj(self) -> Complex {
        Complex::new(self.re, Fixed::from_raw(-self.im.raw()))
    }

    /// The squared magnitude `re² + im²`.
    pub fn norm_sqr(self) -> Fixed {
        self.re * self.re + self.im * self.im
    }

    /// The divide-zero guard: shifts an exact-zero value off the origin.
    ///
    /// When both components are exactly zero, each is replaced by one ULP so
    /// the value can serve as a divisor. Any other value passes through
    /// unchanged. Every division on the warping hot path routes its
    /// denominator through this guard.
    pub fn nudge_if_zero(self) -> Complex {
        if self.re.is_zero() && self.im.is_zero() {
            Complex::new(Fixed::EPSILON, Fixed::EPSILON)
        } else {
            self
        }
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Complex) {
        *self = *self + rhs;
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl SubAssign for Complex {
    fn sub_assign(&mut self, rhs: Complex) {
        *self = *self - rhs;
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl MulAssign for Complex {
    fn mul_assign(&mut self, rhs: Complex) {
        *self = *self * rhs;
    }
}

/// Scaling by a fixed-point scalar.
impl Mul<Fixed> for Complex {
    type Output = Complex;

    fn mul(self, rhs: Fixed) -> Complex {
        Complex::new(self.re * rhs, self.im * rhs)
    }
}

impl Div for Complex {
    type Output = Complex;

    fn div(self, rhs: Complex) -> Complex {
        let mut den = rhs.norm_sqr();
        if den.is_zero() {
            den = Fixed::EPSILON;
        }
        Complex::new(
            (self.re * rhs.re + self.im * rhs.im) / den,
            (self.im * rhs.re - self.re * rhs.im) / den,
        )
    }
}

impl Zero for Complex {
    fn zero() -> Complex {
        Complex::ZERO
    }

    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }
}

impl One for Complex {
    fn one() -> Complex {
        Complex::ONE
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < Fixed::ZERO {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}
