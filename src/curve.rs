//! Named short-Weierstrass curves and the process-wide curve registry.

use num_bigint::BigUint;
use once_cell::sync::Lazy;
use std::sync::RwLock;

use crate::bigint::{hex_digit_len, uint_from_hex};
use crate::error::{Error, Result};
use crate::point::Point;

/// Parameters of a short-Weierstrass curve `y^2 = x^3 + A*x + B (mod P)`,
/// plus its generator, group order, and naming metadata (spec.md §3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    pub name: &'static str,
    pub nist_name: Option<&'static str>,
    pub oid: Vec<u64>,
    pub a: BigUint,
    pub b: BigUint,
    pub p: BigUint,
    pub n: BigUint,
    pub gx: BigUint,
    pub gy: BigUint,
}

impl Curve {
    fn from_hex(
        name: &'static str,
        nist_name: Option<&'static str>,
        oid: &[u64],
        a_hex: &str,
        b_hex: &str,
        p_hex: &str,
        n_hex: &str,
        gx_hex: &str,
        gy_hex: &str,
    ) -> Self {
        Curve {
            name,
            nist_name,
            oid: oid.to_vec(),
            a: uint_from_hex(a_hex),
            b: uint_from_hex(b_hex),
            p: uint_from_hex(p_hex),
            n: uint_from_hex(n_hex),
            gx: uint_from_hex(gx_hex),
            gy: uint_from_hex(gy_hex),
        }
    }

    /// The Bitcoin curve: `y^2 = x^3 + 7`.
    pub fn secp256k1() -> Self {
        Curve::from_hex(
            "secp256k1",
            None,
            &[1, 3, 132, 0, 10],
            "0000000000000000000000000000000000000000000000000000000000000000",
            "0000000000000000000000000000000000000000000000000000000000000007",
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        )
    }

    /// Also known as P-256.
    pub fn prime256v1() -> Self {
        Curve::from_hex(
            "prime256v1",
            Some("P-256"),
            &[1, 2, 840, 10045, 3, 1, 7],
            "ffffffff00000001000000000000000000000000fffffffffffffffffffffffc",
            "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
            "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
            "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
            "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
            "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
        )
    }

    /// The curve's generator point.
    pub fn generator(&self) -> Point {
        Point::affine(self.gx.clone(), self.gy.clone())
    }

    /// Byte length needed to encode `N`; drives fixed-width hex padding of
    /// SEC1-encoded points (spec.md §4.2).
    pub fn length(&self) -> usize {
        (1 + hex_digit_len(&self.n)) / 2
    }

    /// Whether `p` satisfies `y^2 = x^3 + A*x + B (mod P)`, with both
    /// coordinates required to lie in `[0, P-1]` (spec.md §4.8).
    pub fn contains(&self, p: &Point) -> bool {
        let (x, y) = match (p.x(), p.y()) {
            (Some(x), Some(y)) => (x, y),
            _ => return false,
        };
        if x >= &self.p || y >= &self.p {
            return false;
        }

        let rhs = (&(x * x * x) + &self.a * x + &self.b) % &self.p;
        let lhs = (y * y) % &self.p;
        lhs == rhs
    }
}

static REGISTRY: Lazy<RwLock<Vec<Curve>>> =
    Lazy::new(|| RwLock::new(vec![Curve::secp256k1(), Curve::prime256v1()]));

/// Registers an additional curve at process scope. The registry is
/// append-only (spec.md §4.2, §5): concurrent readers always see a
/// consistent snapshot, and concurrent `add_curve` calls serialize on the
/// registry's write lock.
pub fn add_curve(curve: Curve) {
    log::debug!("registering curve {}", curve.name);
    REGISTRY
        .write()
        .expect("curve registry lock poisoned")
        .push(curve);
}

/// Looks up a registered curve by its exact OID. A miss is fatal and lists
/// every registered curve's name (spec.md §4.2).
pub fn curve_by_oid(oid: &[u64]) -> Result<Curve> {
    let registry = REGISTRY.read().expect("curve registry lock poisoned");
    for curve in registry.iter() {
        if curve.oid == oid {
            log::trace!("resolved oid {:?} to curve {}", oid, curve.name);
            return Ok(curve.clone());
        }
    }

    let known = registry.iter().map(|c| c.name.to_string()).collect();
    log::warn!("no curve registered for oid {:?}", oid);
    Err(Error::UnknownCurve { oid: oid.to_vec(), known })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_on_curve() {
        for curve in [Curve::secp256k1(), Curve::prime256v1()] {
            assert!(curve.contains(&curve.generator()), "{} generator off-curve", curve.name);
        }
    }

    #[test]
    fn oid_lookup() {
        assert_eq!(curve_by_oid(&[1, 3, 132, 0, 10]).unwrap().name, "secp256k1");
        assert_eq!(curve_by_oid(&[1, 2, 840, 10045, 3, 1, 7]).unwrap().name, "prime256v1");
        assert!(curve_by_oid(&[9, 9, 9]).is_err());
    }

    #[test]
    fn curve_length_is_32_for_both_builtins() {
        assert_eq!(Curve::secp256k1().length(), 32);
        assert_eq!(Curve::prime256v1().length(), 32);
    }
}
