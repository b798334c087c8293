use ecdsa_curves::curve::Curve;
use ecdsa_curves::ecdsa;
use ecdsa_curves::private_key::PrivateKey;
use ecdsa_curves::services::SystemRng;
use proptest::prelude::*;

fn arb_curve() -> impl Strategy<Value = Curve> {
    prop_oneof![Just(Curve::secp256k1()), Just(Curve::prime256v1())]
}

proptest! {
    /// Sign/verify round trip under a random key and message (spec.md §8
    /// correctness property).
    #[test]
    fn sign_then_verify_succeeds(curve in arb_curve(), message in ".{0,200}") {
        let sk = PrivateKey::generate(curve, &SystemRng);
        let pk = sk.public_key();
        let sig = ecdsa::sign(message.as_bytes(), &sk);
        prop_assert!(ecdsa::verify(message.as_bytes(), &sig, &pk));
    }

    /// A signature never verifies against a message other than the one it
    /// was produced over (spec.md §8 wrong-message property).
    #[test]
    fn verify_rejects_any_other_message(curve in arb_curve(), a in ".{1,50}", b in ".{1,50}") {
        prop_assume!(a != b);
        let sk = PrivateKey::generate(curve, &SystemRng);
        let pk = sk.public_key();
        let sig = ecdsa::sign(a.as_bytes(), &sk);
        prop_assert!(!ecdsa::verify(b.as_bytes(), &sig, &pk));
    }

    /// Every generated public key point satisfies the curve equation
    /// (spec.md §8 on-curve invariant).
    #[test]
    fn generated_public_key_is_on_curve(curve in arb_curve()) {
        let sk = PrivateKey::generate(curve.clone(), &SystemRng);
        prop_assert!(curve.contains(&sk.public_key().point));
    }

    /// Private keys round-trip through PEM byte-for-byte.
    #[test]
    fn private_key_pem_roundtrip(curve in arb_curve()) {
        let sk = PrivateKey::generate(curve, &SystemRng);
        let decoded = PrivateKey::from_pem(&sk.to_pem()).unwrap();
        prop_assert_eq!(decoded, sk);
    }
}
