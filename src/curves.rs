//! Core functions for math over Elliptic Curves over Finite Fields,
//! especially the ability to define Points on Curves and perform
//! addition, doubling and scalar multiplication.
//!
//! Arithmetic is variable-time. Do not use it where timing side channels
//! on the scalar matter.

use crate::error::{KeyError, Result};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) s.t. a * x + b * y == gcd
#[must_use]
pub fn extended_euclidean_algorithm(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    (old_r, old_s, old_t)
}

/// Returns the modular inverse m s.t. (a * m) % modulus == 1, or `None` when
/// `a` shares a factor with `modulus` (in particular when `a ≡ 0`) or the
/// modulus is zero.
#[must_use]
pub fn mod_inv(a: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    if modulus.is_zero() {
        return None;
    }
    let m = BigInt::from(modulus.clone());
    let (gcd, x, _) = extended_euclidean_algorithm(&BigInt::from(a % modulus), &m);
    if !gcd.is_one() {
        return None;
    }
    x.mod_floor(&m).to_biguint()
}

/// Elliptic Curve over the field of integers modulo a prime.
/// Points on the curve satisfy y^2 = x^3 + a*x + b (mod p).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    pub p: BigUint,
    pub a: BigUint,
    pub b: BigUint,
}

/// An affine point (x, y) on a Curve, or the point at infinity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    #[must_use]
    pub const fn new(x: BigUint, y: BigUint) -> Self {
        Point::Affine { x, y }
    }

    #[must_use]
    #[inline]
    pub const fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    #[must_use]
    pub const fn x(&self) -> Option<&BigUint> {
        match self {
            Point::Affine { x, .. } => Some(x),
            Point::Infinity => None,
        }
    }

    #[must_use]
    pub const fn y(&self) -> Option<&BigUint> {
        match self {
            Point::Affine { y, .. } => Some(y),
            Point::Infinity => None,
        }
    }
}

impl Curve {
    pub const fn new(p: BigUint, a: BigUint, b: BigUint) -> Self {
        Curve { p, a, b }
    }

    /// (lhs - rhs) mod p
    fn sub(&self, lhs: &BigUint, rhs: &BigUint) -> BigUint {
        let p = &self.p;
        ((lhs % p) + p - (rhs % p)) % p
    }

    /// Coordinates reduced into [0, p), or `None` for the point at infinity
    fn reduced(&self, pt: &Point) -> Option<(BigUint, BigUint)> {
        match pt {
            Point::Affine { x, y } => Some((x % &self.p, y % &self.p)),
            Point::Infinity => None,
        }
    }

    /// Whether `pt` satisfies the curve equation. The point at infinity is on every curve.
    /// No affine point lies on a curve over a zero modulus.
    #[must_use]
    pub fn contains(&self, pt: &Point) -> bool {
        let Point::Affine { x, y } = pt else {
            return true;
        };
        let p = &self.p;
        if p.is_zero() || x >= p || y >= p {
            return false;
        }
        let lhs = (y * y) % p;
        let rhs = (x * x * x + &self.a * x + &self.b) % p;
        lhs == rhs
    }

    /// Additive inverse: (x, -y)
    #[must_use]
    pub fn negate(&self, pt: &Point) -> Point {
        match self.reduced(pt) {
            Some((x, y)) => {
                let y = self.sub(&BigUint::zero(), &y);
                Point::new(x, y)
            }
            None => Point::Infinity,
        }
    }

    /// Finish an addition given the slope `m` of the line through (x1, y1) and (x2, _)
    fn chord(&self, m: &BigUint, x1: &BigUint, x2: &BigUint, y1: &BigUint) -> Point {
        let p = &self.p;
        let rx = self.sub(&((m * m) % p), &((x1 + x2) % p));
        let ry = self.sub(&((m * self.sub(x1, &rx)) % p), y1);
        Point::new(rx, ry)
    }

    /// Point doubling via the tangent slope (3x^2 + a) / 2y
    #[must_use]
    pub fn double(&self, pt: &Point) -> Point {
        let Some((x, y)) = self.reduced(pt) else {
            return Point::Infinity;
        };
        let p = &self.p;
        let numerator = (&x * &x * 3u32 + &self.a) % p;
        let denominator = (&y + &y) % p;
        // Vertical tangent at y = 0
        let Some(inv) = mod_inv(&denominator, p) else {
            return Point::Infinity;
        };
        let m = (numerator * inv) % p;
        self.chord(&m, &x, &x, &y)
    }

    /// Point addition, covering the identity, inverse and doubling cases
    #[must_use]
    pub fn add(&self, lhs: &Point, rhs: &Point) -> Point {
        let Some((x1, y1)) = self.reduced(lhs) else {
            return rhs.clone();
        };
        let Some((x2, y2)) = self.reduced(rhs) else {
            return lhs.clone();
        };

        if x1 == x2 {
            if y1 == y2 {
                return self.double(lhs);
            }
            return Point::Infinity;
        }

        let p = &self.p;
        let numerator = self.sub(&y2, &y1);
        let denominator = self.sub(&x2, &x1);
        let Some(inv) = mod_inv(&denominator, p) else {
            return Point::Infinity;
        };
        let m = (numerator * inv) % p;
        self.chord(&m, &x1, &x2, &y1)
    }

    /// Double-and-add over the bits of `k`, most significant bit first.
    /// `k` is used as given; see [`Generator::scalar_mul`] for the reduced form.
    #[must_use]
    pub fn mul(&self, k: &BigUint, pt: &Point) -> Point {
        let mut result = Point::Infinity;
        for i in (0..k.bits()).rev() {
            result = self.double(&result);
            if k.bit(i) {
                result = self.add(&result, pt);
            }
        }
        result
    }
}

/// A generator over a curve: the base point, its (pre-computed) order and the cofactor
#[derive(Debug, Clone)]
pub struct Generator {
    pub curve: Curve,
    pub g: Point,  // A generator point on the curve
    pub n: BigUint, // The order of the generating point, so 0*G = n*G = INF
    pub h: BigUint, // Cofactor
}

impl Generator {
    #[must_use]
    pub const fn new(curve: Curve, g: Point, n: BigUint, h: BigUint) -> Self {
        Generator { curve, g, n, h }
    }

    /// k * P with `k` reduced modulo the group order first, so any multiple
    /// of `n` (including zero) yields the point at infinity.
    #[must_use]
    pub fn scalar_mul(&self, k: &BigUint, pt: &Point) -> Point {
        self.curve.mul(&(k % &self.n), pt)
    }

    /// k * G
    #[must_use]
    pub fn mul_base(&self, k: &BigUint) -> Point {
        self.scalar_mul(k, &self.g)
    }

    /// Sanity checks on the domain parameters. Only meaningful once, at construction.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(KeyError::InvalidCurveParameter(msg.to_string()));
        let Curve { p, a, b } = &self.curve;

        if *p < BigUint::from(5u32) || p.is_even() {
            return invalid("field modulus must be an odd prime");
        }
        if a >= p || b >= p {
            return invalid("curve coefficients must be reduced modulo p");
        }
        if ((a * a * a * 4u32 + b * b * 27u32) % p).is_zero() {
            return invalid("curve is singular");
        }
        if self.n.is_zero() || self.n.is_even() {
            return invalid("group order must be an odd prime");
        }
        if self.h.is_zero() {
            return invalid("cofactor must be non-zero");
        }
        if self.g.is_infinity() || !self.curve.contains(&self.g) {
            return invalid("generator is not on the curve");
        }
        if !self.curve.mul(&self.n, &self.g).is_infinity() {
            return invalid("generator order does not match n");
        }
        Ok(())
    }
}
