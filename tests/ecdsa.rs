use ecdsa_curves::curve::Curve;
use ecdsa_curves::private_key::PrivateKey;
use ecdsa_curves::public_key::PublicKey;
use ecdsa_curves::services::SystemRng;
use ecdsa_curves::signature::Signature;
use ecdsa_curves::{ecdsa, Point};
use num_bigint::BigUint;
use num_traits::One;

#[test]
fn secret_one_on_secp256k1_produces_the_generator() {
    let key = PrivateKey::with_secret(Curve::secp256k1(), BigUint::one());
    assert_eq!(key.public_key().point, Curve::secp256k1().generator());
}

#[test]
fn zero_signature_is_rejected_on_prime256v1() {
    let sk = PrivateKey::generate(Curve::prime256v1(), &SystemRng);
    let pk = sk.public_key();
    let bogus = Signature::new(BigUint::from(0u32), BigUint::from(0u32));
    assert!(!ecdsa::verify(b"hello", &bogus, &pk));
}

#[test]
fn oid_lookup_scenarios() {
    assert_eq!(Curve::secp256k1().oid, vec![1, 3, 132, 0, 10]);
    assert_eq!(Curve::prime256v1().oid, vec![1, 2, 840, 10045, 3, 1, 7]);
}

#[test]
fn sec1_point_roundtrips_through_der_and_pem() {
    let _ = env_logger::try_init();

    let sk = PrivateKey::generate(Curve::secp256k1(), &SystemRng);
    let pk = sk.public_key();

    let sec1 = pk.to_string(true);
    let from_sec1 = PublicKey::from_string(&sec1, Curve::secp256k1(), true).unwrap();
    assert_eq!(from_sec1, pk);

    let der = pk.to_der();
    assert_eq!(PublicKey::from_der(&der).unwrap(), pk);

    let pem = pk.to_pem();
    assert_eq!(PublicKey::from_pem(&pem).unwrap(), pk);
}

#[test]
fn infinity_is_never_constructed_from_a_valid_keypair() {
    let sk = PrivateKey::generate(Curve::secp256k1(), &SystemRng);
    assert!(!matches!(sk.public_key().point, Point::Infinity));
}

/// Mirrors the reference design's `TestMany`: a full
/// generate/sign/encode/decode/verify loop run repeatedly with fresh
/// randomness (spec.md §8's stress property).
#[test]
fn stress_generate_sign_encode_decode_verify() {
    for _ in 0..1000 {
        let sk1 = PrivateKey::generate(Curve::secp256k1(), &SystemRng);
        let pk1 = sk1.public_key();

        let sk2 = PrivateKey::from_pem(&sk1.to_pem()).unwrap();
        let pk2 = PublicKey::from_pem(&pk1.to_pem()).unwrap();

        let message = b"test";
        let sig_b64 = ecdsa::sign(message, &sk2).to_base64();
        let sig = Signature::from_base64(&sig_b64).unwrap();

        assert!(ecdsa::verify(message, &sig, &pk2));
    }
}
