//! SEC1 EC Private Key framing (spec.md §4.5, RFC 5915).

use num_bigint::BigUint;
use num_traits::One;

use crate::bigint::{hex_from_uint, uint_from_hex};
use crate::curve::{self, Curve};
use crate::der::{self, Tag};
use crate::error::{Error, Result};
use crate::pem;
use crate::point;
use crate::public_key::PublicKey;
use crate::services::Rng;

const PEM_LABEL: &str = "EC PRIVATE KEY";
const PARAMETERS_PREAMBLE_LABEL: &str = "EC PARAMETERS";

/// An EC private key: a secret scalar plus the curve it's defined over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    pub curve: Curve,
    pub secret: BigUint,
}

impl PrivateKey {
    pub fn with_secret(curve: Curve, secret: BigUint) -> Self {
        PrivateKey { curve, secret }
    }

    /// Draws a fresh secret uniformly from `[1, N-1]` via `rng` (spec.md §4.5).
    pub fn generate(curve: Curve, rng: &dyn Rng) -> Self {
        let one = BigUint::one();
        let secret = rng.between(&one, &(&curve.n - &one));
        PrivateKey { curve, secret }
    }

    pub fn public_key(&self) -> PublicKey {
        let point = point::multiply(&self.curve.generator(), &self.secret, &self.curve.n, &self.curve.a, &self.curve.p);
        PublicKey { point, curve: self.curve.clone() }
    }

    pub fn to_string(&self) -> String {
        hex_from_uint(&self.secret)
    }

    pub fn from_string(str: &str, curve: Curve) -> Self {
        PrivateKey { curve, secret: uint_from_hex(str) }
    }

    pub fn to_der(&self) -> Vec<u8> {
        let public_key_string = self.public_key().to_string(true);
        let secret_hex = format!("{:0>width$}", hex_from_uint(&self.secret), width = 2 * self.curve.length());
        let hex = der::encode_constructed(
            Tag::Sequence,
            &[
                der::encode_integer(&num_bigint::BigInt::one()),
                der::encode_raw(Tag::OctetString, &secret_hex),
                der::encode_constructed(Tag::OidContainer, &[der::encode_oid(&self.curve.oid).expect("registered curve OID is well-formed")]),
                der::encode_constructed(Tag::PointContainer, &[der::encode_raw(Tag::BitString, &public_key_string)]),
            ],
        );
        der::to_bytes(&hex).expect("hex produced by this module's own encoder is always valid")
    }

    pub fn to_pem(&self) -> String {
        pem::encode(PEM_LABEL, &self.to_der())
    }

    pub fn from_pem(pem: &str) -> Result<Self> {
        let der = pem::decode_tolerating_preamble(pem, PEM_LABEL, Some(PARAMETERS_PREAMBLE_LABEL))?;
        Self::from_der(&der)
    }

    pub fn from_der(data: &[u8]) -> Result<Self> {
        let hex = der::from_bytes(data);
        let node = der::parse_der(&hex)?;
        let fields = node.as_sequence()?;
        if fields.len() != 4 {
            return Err(Error::MalformedDer(format!(
                "expected 4 fields in SEC1 EC Private Key, found {}",
                fields.len()
            )));
        }

        let flag = fields[0].as_integer()?;
        if *flag != num_bigint::BigInt::one() {
            log::warn!("private key flag mismatch: found {}", flag);
            return Err(Error::PrivateKeyFlagMismatch { found: flag.clone() });
        }

        let secret_hex = fields[1].as_raw()?;
        let curve_oid = fields[2].as_oid_container()?;
        let curve_oid = curve_oid
            .first()
            .ok_or_else(|| Error::MalformedDer("missing curve OID in SEC1 EC Private Key".into()))?
            .as_oid()?;
        let curve = curve::curve_by_oid(curve_oid)?;

        let public_key_string = fields[3].as_point_container()?;
        let public_key_string = public_key_string
            .first()
            .ok_or_else(|| Error::MalformedDer("missing public key in SEC1 EC Private Key".into()))?
            .as_raw()?;

        let private_key = Self::from_string(secret_hex, curve);
        if private_key.public_key().to_string(true) != public_key_string {
            log::warn!("embedded public key does not match the decoded private key's own public key");
            return Err(Error::KeyInconsistent);
        }
        log::debug!("decoded private key for curve {}", private_key.curve.name);
        Ok(private_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SystemRng;

    #[test]
    fn secret_one_on_secp256k1_is_the_generator() {
        let key = PrivateKey::with_secret(Curve::secp256k1(), BigUint::one());
        assert_eq!(key.public_key().point, Curve::secp256k1().generator());
    }

    #[test]
    fn der_roundtrip() {
        let key = PrivateKey::generate(Curve::prime256v1(), &SystemRng);
        let der = key.to_der();
        let decoded = PrivateKey::from_der(&der).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn pem_roundtrip() {
        let key = PrivateKey::generate(Curve::secp256k1(), &SystemRng);
        let pem = key.to_pem();
        assert!(pem.contains("BEGIN EC PRIVATE KEY"));
        let decoded = PrivateKey::from_pem(&pem).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn hex_roundtrip() {
        let key = PrivateKey::generate(Curve::secp256k1(), &SystemRng);
        let s = key.to_string();
        let decoded = PrivateKey::from_string(&s, key.curve.clone());
        assert_eq!(decoded.secret, key.secret);
    }

    #[test]
    fn tampered_secret_is_rejected_on_decode() {
        let key = PrivateKey::generate(Curve::secp256k1(), &SystemRng);
        let mut der = key.to_der();
        let last = der.len() - 1;
        der[last] ^= 0xff;
        assert!(PrivateKey::from_der(&der).is_err());
    }
}
