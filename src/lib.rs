//! ECDSA over short-Weierstrass prime-field curves.
//!
//! Generates key pairs, signs and verifies messages, and serializes keys
//! and signatures in the formats mainstream TLS tooling expects: DER, PEM,
//! and SEC1 uncompressed points.
//!
//! ```no_run
//! use ecdsa_curves::{curve::Curve, ecdsa, private_key::PrivateKey, services::SystemRng};
//!
//! let sk = PrivateKey::generate(Curve::secp256k1(), &SystemRng);
//! let pk = sk.public_key();
//! let sig = ecdsa::sign(b"hello", &sk);
//! assert!(ecdsa::verify(b"hello", &sig, &pk));
//! ```

pub mod bigint;
pub mod curve;
pub mod der;
pub mod ecdsa;
pub mod error;
pub mod pem;
pub mod point;
pub mod private_key;
pub mod public_key;
pub mod services;
pub mod signature;

pub use curve::Curve;
pub use ecdsa::{sign, sign_with, verify, verify_with};
pub use error::{Error, Result};
pub use point::Point;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
