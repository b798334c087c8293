//! SubjectPublicKeyInfo-framed EC public keys (spec.md §4.6, RFC 5480).

use num_traits::Zero;

use crate::bigint::{hex_from_uint, uint_from_hex};
use crate::curve::{self, Curve};
use crate::der::{self, Tag};
use crate::error::{Error, Result};
use crate::pem;
use crate::point::{self, Point};

const EC_PUBLIC_KEY_OID: [u64; 6] = [1, 2, 840, 10045, 2, 1];
const PEM_LABEL: &str = "PUBLIC KEY";

/// An EC public key: a curve point plus the curve it lives on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub point: Point,
    pub curve: Curve,
}

impl PublicKey {
    /// SEC1 encoding: `x || y`, each zero-padded to `curve.length()` bytes,
    /// with the DER BIT STRING's "00 unused bits" byte and the `04`
    /// uncompressed-point marker prepended when `encoded` (spec.md §4.6).
    pub fn to_string(&self, encoded: bool) -> String {
        let width = 2 * self.curve.length();
        let (x, y) = (
            self.point.x().expect("public key point is always affine"),
            self.point.y().expect("public key point is always affine"),
        );
        let body = format!("{:0>width$}{:0>width$}", hex_from_uint(x), hex_from_uint(y), width = width);
        if encoded {
            format!("0004{}", body)
        } else {
            body
        }
    }

    pub fn to_der(&self) -> Vec<u8> {
        let algorithm_id = der::encode_constructed(
            Tag::Sequence,
            &[
                der::encode_oid(&EC_PUBLIC_KEY_OID).expect("built-in OID is well-formed"),
                der::encode_oid(&self.curve.oid).expect("registered curve OID is well-formed"),
            ],
        );
        let hex = der::encode_constructed(
            Tag::Sequence,
            &[algorithm_id, der::encode_raw(Tag::BitString, &self.to_string(true))],
        );
        der::to_bytes(&hex).expect("hex produced by this module's own encoder is always valid")
    }

    pub fn to_pem(&self) -> String {
        pem::encode(PEM_LABEL, &self.to_der())
    }

    pub fn from_pem(pem: &str) -> Result<Self> {
        let der = pem::decode(pem, PEM_LABEL)?;
        Self::from_der(&der)
    }

    pub fn from_der(data: &[u8]) -> Result<Self> {
        let hex = der::from_bytes(data);
        let node = der::parse_der(&hex)?;
        let top = node.as_sequence()?;
        if top.len() != 2 {
            return Err(Error::MalformedDer(format!(
                "expected 2 elements in SubjectPublicKeyInfo, found {}",
                top.len()
            )));
        }

        let algorithm_id = top[0].as_sequence()?;
        if algorithm_id.len() != 2 {
            return Err(Error::MalformedDer(format!(
                "expected 2 OIDs in AlgorithmIdentifier, found {}",
                algorithm_id.len()
            )));
        }
        let public_key_oid = algorithm_id[0].as_oid()?;
        if public_key_oid != EC_PUBLIC_KEY_OID {
            log::warn!("public key oid mismatch: expected {:?}, found {:?}", EC_PUBLIC_KEY_OID, public_key_oid);
            return Err(Error::PublicKeyOidMismatch {
                expected: EC_PUBLIC_KEY_OID.to_vec(),
                found: public_key_oid.to_vec(),
            });
        }
        let curve = curve::curve_by_oid(algorithm_id[1].as_oid()?)?;

        let point_hex = top[1].as_raw()?;
        let public_key = Self::from_string(point_hex, curve, true)?;
        log::debug!("decoded public key for curve {}", public_key.curve.name);
        Ok(public_key)
    }

    /// Parses a SEC1 point string (with or without the `04` marker) for
    /// `curve`. When `validate` is set, rejects points off-curve, at
    /// infinity, or outside the prime-order subgroup (spec.md §4.8).
    pub fn from_string(str: &str, curve: Curve, validate: bool) -> Result<Self> {
        let base_length = 2 * curve.length();
        let str = if str.len() > 2 * base_length && str.starts_with("0004") {
            &str[4..]
        } else {
            str
        };
        if str.len() != 2 * base_length {
            return Err(Error::InvalidPoint(format!(
                "expected {} hex characters for curve {}, found {}",
                2 * base_length,
                curve.name,
                str.len()
            )));
        }

        let x = uint_from_hex(&str[..base_length]);
        let y = uint_from_hex(&str[base_length..]);
        let public_point = Point::affine(x, y);

        let public_key = PublicKey { point: public_point, curve };
        if !validate {
            return Ok(public_key);
        }

        let y = public_key.point.y().expect("just constructed as affine");
        if y.is_zero() {
            log::warn!("public key point is at infinity");
            return Err(Error::InvalidPoint("public key point is at infinity".into()));
        }
        if !public_key.curve.contains(&public_key.point) {
            log::warn!("point is not valid for curve {}", public_key.curve.name);
            return Err(Error::InvalidPoint(format!(
                "point is not valid for curve {}",
                public_key.curve.name
            )));
        }
        let order_multiple = point::multiply(
            &public_key.point,
            &public_key.curve.n,
            &public_key.curve.n,
            &public_key.curve.a,
            &public_key.curve.p,
        );
        if !order_multiple.is_infinity() {
            log::warn!("point * {}.n is not at infinity", public_key.curve.name);
            return Err(Error::InvalidPoint(format!(
                "point * {}.n is not at infinity",
                public_key.curve.name
            )));
        }
        Ok(public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;

    fn generator_key(curve: Curve) -> PublicKey {
        PublicKey { point: curve.generator(), curve }
    }

    #[test]
    fn sec1_roundtrip() {
        let key = generator_key(Curve::secp256k1());
        let encoded = key.to_string(true);
        let decoded = PublicKey::from_string(&encoded, Curve::secp256k1(), true).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn der_roundtrip() {
        let key = generator_key(Curve::prime256v1());
        let der = key.to_der();
        let decoded = PublicKey::from_der(&der).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn pem_roundtrip() {
        let key = generator_key(Curve::secp256k1());
        let pem = key.to_pem();
        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));
        let decoded = PublicKey::from_pem(&pem).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn off_curve_point_is_rejected() {
        let curve = Curve::secp256k1();
        let bogus = format!("{:064x}{:064x}", 1u32, 1u32);
        assert!(PublicKey::from_string(&bogus, curve, true).is_err());
    }

    #[test]
    fn wrong_algorithm_oid_is_rejected() {
        let curve = Curve::secp256k1();
        let bad_oid = der::encode_oid(&[1, 2, 3]).unwrap();
        let hex = der::encode_constructed(
            Tag::Sequence,
            &[
                der::encode_constructed(
                    Tag::Sequence,
                    &[bad_oid, der::encode_oid(&curve.oid).unwrap()],
                ),
                der::encode_raw(Tag::BitString, &generator_key(curve).to_string(true)),
            ],
        );
        let bytes = der::to_bytes(&hex).unwrap();
        assert!(matches!(PublicKey::from_der(&bytes), Err(Error::PublicKeyOidMismatch { .. })));
    }
}
