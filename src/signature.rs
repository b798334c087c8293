//! ECDSA-Sig-Value: `SEQUENCE { INTEGER r, INTEGER s }` (spec.md §4.4, RFC 3279).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use num_bigint::{BigInt, BigUint};

use crate::der::{self, Tag};
use crate::error::{Error, Result};

/// An ECDSA signature. Equality is structural over `(r, s)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: BigUint,
    pub s: BigUint,
}

impl Signature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Signature { r, s }
    }

    pub fn to_der(&self) -> Vec<u8> {
        let hex = der::encode_constructed(
            Tag::Sequence,
            &[
                der::encode_integer(&BigInt::from(self.r.clone())),
                der::encode_integer(&BigInt::from(self.s.clone())),
            ],
        );
        der::to_bytes(&hex).expect("hex produced by this module's own encoder is always valid")
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_der())
    }

    pub fn from_der(data: &[u8]) -> Result<Self> {
        let hex = der::from_bytes(data);
        let node = der::parse_der(&hex)?;
        let children = node.as_sequence()?;
        if children.len() != 2 {
            return Err(Error::MalformedDer(format!(
                "expected 2 integers in ECDSA-Sig-Value, found {}",
                children.len()
            )));
        }

        let r = non_negative(children[0].as_integer()?)?;
        let s = non_negative(children[1].as_integer()?)?;
        Ok(Signature { r, s })
    }

    pub fn from_base64(s: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(s)
            .map_err(|e| Error::MalformedDer(format!("invalid base64 signature: {}", e)))?;
        Self::from_der(&bytes)
    }
}

fn non_negative(n: &BigInt) -> Result<BigUint> {
    n.to_biguint()
        .ok_or_else(|| Error::MalformedDer("ECDSA-Sig-Value component must be non-negative".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn der_roundtrip() {
        let sig = Signature::new(BigUint::from(12345u32), BigUint::from(67890u32));
        let der = sig.to_der();
        assert_eq!(Signature::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn base64_roundtrip() {
        let sig = Signature::new(BigUint::from(1u32), BigUint::from(2u32));
        let b64 = sig.to_base64();
        assert_eq!(Signature::from_base64(&b64).unwrap(), sig);
    }

    #[test]
    fn rejects_wrong_arity() {
        let hex = der::encode_constructed(Tag::Sequence, &[der::encode_integer(&BigInt::from(1))]);
        let bytes = der::to_bytes(&hex).unwrap();
        assert!(Signature::from_der(&bytes).is_err());
    }
}
