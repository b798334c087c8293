//! Affine curve points and Jacobian-coordinate group arithmetic.
//!
//! The reference design (starkbank/ecdsa-go) represents every point as a
//! single `(X, Y, Z)` triple and overloads `Z == 0` and `Y == 0` to both mean
//! "point at infinity" depending on context (see spec.md §3, §9). That's the
//! kind of ambiguity worth designing out: the public `Point` type here is a
//! tagged `Infinity | Affine(x, y)`, and Jacobian coordinates are an
//! arithmetic-only implementation detail that never escapes this module.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// A point on a short-Weierstrass curve, or the identity element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    pub fn affine(x: BigUint, y: BigUint) -> Self {
        Point::Affine { x, y }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    pub fn x(&self) -> Option<&BigUint> {
        match self {
            Point::Affine { x, .. } => Some(x),
            Point::Infinity => None,
        }
    }

    pub fn y(&self) -> Option<&BigUint> {
        match self {
            Point::Affine { y, .. } => Some(y),
            Point::Infinity => None,
        }
    }
}

/// Jacobian-projective representation: affine `(X/Z^2, Y/Z^3)`.
///
/// `y == 0` is the internal infinity sentinel, matching every formula in
/// spec.md §4.1 (`jacobianDouble`, `jacobianAdd`, `jacobianMultiply` all
/// branch on `p.Y == 0`, independent of `Z`).
#[derive(Clone, Debug)]
struct Jacobian {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl Jacobian {
    fn infinity() -> Self {
        Jacobian { x: BigUint::zero(), y: BigUint::zero(), z: BigUint::one() }
    }

    fn is_infinity(&self) -> bool {
        self.y.is_zero()
    }
}

fn to_jacobian(p: &Point) -> Jacobian {
    match p {
        Point::Infinity => Jacobian { x: BigUint::zero(), y: BigUint::zero(), z: BigUint::zero() },
        Point::Affine { x, y } => Jacobian { x: x.clone(), y: y.clone(), z: BigUint::one() },
    }
}

fn from_jacobian(p: &Jacobian, modulus: &BigUint) -> Point {
    if p.is_infinity() {
        return Point::Infinity;
    }
    let z_inv = crate::bigint::mod_inverse(&p.z, modulus);
    let z_inv2 = (&z_inv * &z_inv) % modulus;
    let z_inv3 = (&z_inv2 * &z_inv) % modulus;
    let x = (&p.x * &z_inv2) % modulus;
    let y = (&p.y * &z_inv3) % modulus;
    Point::Affine { x, y }
}

fn jacobian_double(p: &Jacobian, a: &BigUint, modulus: &BigUint) -> Jacobian {
    if p.y.is_zero() {
        return Jacobian { x: BigUint::zero(), y: BigUint::zero(), z: BigUint::zero() };
    }

    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);
    let four = BigUint::from(4u32);
    let eight = BigUint::from(8u32);

    let ysq = (&p.y * &p.y) % modulus;
    let s = (&four * &p.x * &ysq) % modulus;
    let m = (&three * &p.x * &p.x + a * (&p.z * &p.z * &p.z * &p.z)) % modulus;

    let x_new = (&m * &m + modulus * modulus - &two * &s % modulus) % modulus;
    let y_new = {
        let term1 = (&s + modulus - &x_new % modulus) % modulus * &m % modulus;
        let term2 = (&eight * &ysq * &ysq) % modulus;
        (term1 + modulus - term2 % modulus) % modulus
    };
    let z_new = (&two * &p.y * &p.z) % modulus;

    Jacobian { x: x_new, y: y_new, z: z_new }
}

fn jacobian_add(p: &Jacobian, q: &Jacobian, a: &BigUint, modulus: &BigUint) -> Jacobian {
    if p.y.is_zero() {
        return q.clone();
    }
    if q.y.is_zero() {
        return p.clone();
    }

    let u1 = (&p.x * &q.z * &q.z) % modulus;
    let u2 = (&q.x * &p.z * &p.z) % modulus;
    let s1 = (&p.y * &q.z * &q.z * &q.z) % modulus;
    let s2 = (&q.y * &p.z * &p.z * &p.z) % modulus;

    if u1 == u2 {
        if s1 != s2 {
            return Jacobian { x: BigUint::zero(), y: BigUint::zero(), z: BigUint::one() };
        }
        return jacobian_double(p, a, modulus);
    }

    let h = (&u2 + modulus - &u1 % modulus) % modulus;
    let r = (&s2 + modulus - &s1 % modulus) % modulus;
    let h2 = (&h * &h) % modulus;
    let h3 = (&h * &h2) % modulus;
    let u1h2 = (&u1 * &h2) % modulus;

    let two = BigUint::from(2u32);
    let x_new = {
        let rhs = (&h3 + &two * &u1h2 % modulus) % modulus;
        (&r * &r + modulus - rhs % modulus) % modulus
    };
    let y_new = {
        let term1 = (&u1h2 + modulus - &x_new % modulus) % modulus * &r % modulus;
        let term2 = (&s1 * &h3) % modulus;
        (term1 + modulus - term2 % modulus) % modulus
    };
    let z_new = (&h * &p.z * &q.z) % modulus;

    Jacobian { x: x_new, y: y_new, z: z_new }
}

/// Double-and-add, left-to-right (MSB-first). The reference design recurses
/// to a depth of `log2(N)` (roughly the curve's bit width); spec.md §9
/// explicitly allows rewriting that recursion iteratively so long as the
/// result is identical, which this does.
fn jacobian_multiply(p: &Jacobian, n: &BigUint, order: &BigUint, a: &BigUint, modulus: &BigUint) -> Jacobian {
    if p.y.is_zero() || n.is_zero() {
        return Jacobian::infinity();
    }

    let n = if n >= order { n % order } else { n.clone() };
    if n.is_zero() {
        return Jacobian::infinity();
    }
    if n == BigUint::one() {
        return p.clone();
    }

    let nbits = n.bits();
    let mut acc = p.clone();
    for i in (0..nbits - 1).rev() {
        acc = jacobian_double(&acc, a, modulus);
        if n.bit(i) {
            acc = jacobian_add(&acc, p, a, modulus);
        }
    }
    acc
}

/// Scalar multiplication `n * p` in the group defined by `(a, modulus)`,
/// reducing `n` modulo `order` first.
pub fn multiply(p: &Point, n: &BigUint, order: &BigUint, a: &BigUint, modulus: &BigUint) -> Point {
    from_jacobian(&jacobian_multiply(&to_jacobian(p), n, order, a, modulus), modulus)
}

/// Point addition `p + q` in the group defined by `(a, modulus)`.
pub fn add(p: &Point, q: &Point, a: &BigUint, modulus: &BigUint) -> Point {
    from_jacobian(&jacobian_add(&to_jacobian(p), &to_jacobian(q), a, modulus), modulus)
}
