//! Sign and verify (spec.md §4.7).

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::bigint::mod_inverse;
use crate::point;
use crate::private_key::PrivateKey;
use crate::public_key::PublicKey;
use crate::services::{Hasher, Rng, Sha256Hasher, SystemRng};
use crate::signature::Signature;

/// Signs `message` under `private_key`, drawing a fresh nonce per attempt
/// and retrying in the vanishingly unlikely event both `r` and `s` land on
/// zero (spec.md §4.7).
pub fn sign(message: &[u8], private_key: &PrivateKey) -> Signature {
    sign_with(message, private_key, &Sha256Hasher, &SystemRng)
}

/// Same as [`sign`], with the hash and nonce services supplied explicitly.
pub fn sign_with(message: &[u8], private_key: &PrivateKey, hasher: &dyn Hasher, rng: &dyn Rng) -> Signature {
    let digest = hasher.hash(message);
    let number_message = BigUint::from_bytes_be(&digest);
    let curve = &private_key.curve;
    let one = BigUint::one();

    let mut attempt = 0u32;
    loop {
        attempt += 1;
        log::trace!("sign attempt {} on curve {}", attempt, curve.name);
        let random_num = rng.between(&one, &(&curve.n - &one));
        let rand_sign_point = point::multiply(&curve.generator(), &random_num, &curve.n, &curve.a, &curve.p);
        let r = rand_sign_point.x().expect("scalar multiple of a finite-order generator is affine") % &curve.n;

        let inv = mod_inverse(&random_num, &curve.n);
        let s = (&r * &private_key.secret + &number_message) * inv % &curve.n;

        if !r.is_zero() || !s.is_zero() {
            return Signature::new(r, s);
        }
    }
}

/// Verifies `signature` over `message` against `public_key` (spec.md §4.7).
/// Never raises on well-typed input; malformed `r`/`s` ranges simply fail
/// verification.
pub fn verify(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    verify_with(message, signature, public_key, &Sha256Hasher)
}

/// Same as [`verify`], with the hash service supplied explicitly.
pub fn verify_with(message: &[u8], signature: &Signature, public_key: &PublicKey, hasher: &dyn Hasher) -> bool {
    let curve = &public_key.curve;
    let one = BigUint::one();
    let max = &curve.n - &one;

    if signature.r < one || signature.r > max {
        return false;
    }
    if signature.s < one || signature.s > max {
        return false;
    }

    let digest = hasher.hash(message);
    let number_message = BigUint::from_bytes_be(&digest);

    let inv = mod_inverse(&signature.s, &curve.n);

    let nu1 = &number_message * &inv % &curve.n;
    let u1 = point::multiply(&curve.generator(), &nu1, &curve.n, &curve.a, &curve.p);

    let nu2 = &signature.r * &inv % &curve.n;
    let u2 = point::multiply(&public_key.point, &nu2, &curve.n, &curve.a, &curve.p);

    let v = point::add(&u1, &u2, &curve.a, &curve.p);
    if v.is_infinity() {
        return false;
    }

    let v_x = v.x().expect("non-infinity point is affine");
    (v_x % &curve.n) == signature.r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;

    #[test]
    fn round_trip_verifies() {
        let sk = PrivateKey::generate(Curve::secp256k1(), &SystemRng);
        let pk = sk.public_key();
        let sig = sign(b"This is the right message", &sk);
        assert!(verify(b"This is the right message", &sig, &pk));
    }

    #[test]
    fn wrong_message_is_rejected() {
        let sk = PrivateKey::generate(Curve::secp256k1(), &SystemRng);
        let pk = sk.public_key();
        let sig = sign(b"This is the right message", &sk);
        assert!(!verify(b"This is the wrong message", &sig, &pk));
    }

    #[test]
    fn zero_signature_is_rejected() {
        let sk = PrivateKey::generate(Curve::prime256v1(), &SystemRng);
        let pk = sk.public_key();
        let sig = Signature::new(BigUint::zero(), BigUint::zero());
        assert!(!verify(b"anything", &sig, &pk));
    }

    #[test]
    fn signature_from_another_key_is_rejected() {
        let sk1 = PrivateKey::generate(Curve::secp256k1(), &SystemRng);
        let sk2 = PrivateKey::generate(Curve::secp256k1(), &SystemRng);
        let sig = sign(b"message", &sk1);
        assert!(!verify(b"message", &sig, &sk2.public_key()));
    }
}
