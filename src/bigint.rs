//! Thin facade over `num-bigint`.
//!
//! Per the spec this is not a from-scratch bignum implementation: it just
//! gives the rest of the crate hex I/O and the specific modular-inverse
//! recurrence the reference design uses, in one place.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Lower-case, even-length hex of `n`, with no leading `0x`.
///
/// Matches `HexFromInt` in the reference design: always even length, never
/// upper-case, never stripped of meaningful leading zero nibbles beyond
/// what's needed for an even digit count.
pub fn hex_from_uint(n: &BigUint) -> String {
    let s = n.to_str_radix(16);
    if s.len() % 2 == 1 {
        format!("0{}", s)
    } else {
        s
    }
}

/// Parses a hex string (no `0x` prefix) into a `BigUint`. Empty input is zero.
pub fn uint_from_hex(s: &str) -> BigUint {
    if s.is_empty() {
        return BigUint::zero();
    }
    BigUint::parse_bytes(s.as_bytes(), 16).unwrap_or_else(BigUint::zero)
}

/// Number of hex digits needed to represent `n` (at least one).
pub fn hex_digit_len(n: &BigUint) -> usize {
    n.to_str_radix(16).len()
}

/// Modular inverse via the extended Euclidean recurrence specified in
/// spec.md §4.1: maintain `(lm, hm, low, high)` starting at
/// `(1, 0, x mod n, n)`, reducing until `low <= 1`.
///
/// Returns 0 (a sentinel the caller must not multiply by) when `x` is 0,
/// matching the reference design's `Inv`.
pub fn mod_inverse(x: &BigUint, n: &BigUint) -> BigUint {
    if x.is_zero() {
        return BigUint::zero();
    }

    let n_signed = BigInt::from(n.clone());
    let mut lm = BigInt::one();
    let mut hm = BigInt::zero();
    let mut low = BigInt::from(x.mod_floor(n));
    let mut high = n_signed.clone();

    while low > BigInt::one() {
        let r = &high / &low;
        let nm = &hm - &lm * &r;
        let nw = &high - &low * &r;
        high = low;
        hm = lm;
        low = nw;
        lm = nm;
    }

    let result = lm.mod_floor(&n_signed);
    result.to_biguint().expect("mod_floor by a positive modulus is always non-negative")
}

/// `base^exp mod modulus`.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exp, modulus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let n = BigUint::from(4095u32);
        let h = hex_from_uint(&n);
        assert_eq!(h, "0fff");
        assert_eq!(uint_from_hex(&h), n);
    }

    #[test]
    fn inverse_of_zero_is_zero() {
        assert_eq!(mod_inverse(&BigUint::zero(), &BigUint::from(17u32)), BigUint::zero());
    }

    #[test]
    fn inverse_matches_definition() {
        let n = BigUint::from(17u32);
        let x = BigUint::from(5u32);
        let inv = mod_inverse(&x, &n);
        assert_eq!((x * inv) % n, BigUint::one());
    }
}
