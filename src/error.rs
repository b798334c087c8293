//! Crate-wide error type.
//!
//! The reference design this crate follows (starkbank/ecdsa-go) panics on
//! the fatal conditions below. A library should never terminate its caller's
//! process, so every one of those conditions is instead a variant here and
//! is returned through `Result`.

use num_bigint::BigInt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown curve with oid {oid:?}; the following are registered: {known:?}")]
    UnknownCurve { oid: Vec<u64>, known: Vec<String> },

    #[error("Malformed DER: {0}")]
    MalformedDer(String),

    #[error("Private keys should start with a '1' flag, but a '{found}' was found instead")]
    PrivateKeyFlagMismatch { found: BigInt },

    #[error("The Public Key Object Identifier (OID) should be {expected:?}, but {found:?} was found instead")]
    PublicKeyOidMismatch { expected: Vec<u64>, found: Vec<u64> },

    #[error("The public key described inside the private key file doesn't match the actual public key of the pair")]
    KeyInconsistent,

    #[error("Invalid point: {0}")]
    InvalidPoint(String),

    #[error("Malformed PEM: {0}")]
    Pem(String),
}
