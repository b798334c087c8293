//! PEM ASCII armor (RFC 7468): base64 of DER bytes wrapped in typed
//! `BEGIN`/`END` markers, 64 columns per line (spec.md §4.5, §4.6).
//!
//! The reference design parses this with a hand-written regex built from a
//! template string (`utils/pem.go`'s `GetPemContent`); this crate does the
//! same thing with the `regex` crate rather than string-splicing by hand.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;

use crate::error::{Error, Result};

const LINE_WIDTH: usize = 64;

/// Wraps `der` as base64 between `-----BEGIN {label}-----` / `-----END
/// {label}-----` markers, 64 base64 characters per line.
pub fn encode(label: &str, der: &[u8]) -> String {
    let body = STANDARD.encode(der);
    let mut out = format!("-----BEGIN {}-----\n", label);
    for line in body.as_bytes().chunks(LINE_WIDTH) {
        out.push_str(std::str::from_utf8(line).expect("base64 output is ASCII"));
        out.push('\n');
    }
    out.push_str(&format!("-----END {}-----\n", label));
    out
}

/// Extracts and base64-decodes the body of the `label` block.
pub fn decode(pem: &str, label: &str) -> Result<Vec<u8>> {
    decode_tolerating_preamble(pem, label, None)
}

/// Same as [`decode`], but additionally tolerates one optional preceding
/// block under `preamble_label` (e.g. `EC PARAMETERS` ahead of an `EC
/// PRIVATE KEY`), which is matched and discarded.
pub fn decode_tolerating_preamble(pem: &str, label: &str, preamble_label: Option<&str>) -> Result<Vec<u8>> {
    let begin = format!("-----BEGIN {}-----", regex::escape(label));
    let end = format!("-----END {}-----", regex::escape(label));

    let pattern = match preamble_label {
        Some(preamble) => format!(
            "(?s)^\\s*(?:-----BEGIN {pre}-----.*?-----END {pre}-----\\s*)?{begin}\\s*(.*?)\\s*{end}\\s*$",
            pre = regex::escape(preamble),
            begin = begin,
            end = end,
        ),
        None => format!("(?s)^\\s*{begin}\\s*(.*?)\\s*{end}\\s*$", begin = begin, end = end),
    };

    let re = Regex::new(&pattern).expect("generated PEM pattern is a valid regex");
    let captures = re
        .captures(pem.trim())
        .ok_or_else(|| Error::Pem(format!("no {} block found", label)))?;

    let body: String = captures[1].chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(body)
        .map_err(|e| Error::Pem(format!("invalid base64 body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let der = b"some arbitrary DER-shaped bytes, long enough to wrap a couple of lines if encoded as base64 text".to_vec();
        let pem = encode("EC PRIVATE KEY", &der);
        assert!(pem.lines().nth(1).unwrap().len() <= LINE_WIDTH);
        let decoded = decode(&pem, "EC PRIVATE KEY").unwrap();
        assert_eq!(decoded, der);
    }

    #[test]
    fn tolerates_ec_parameters_preamble() {
        let der = b"hello world".to_vec();
        let key_pem = encode("EC PRIVATE KEY", &der);
        let with_preamble = format!(
            "-----BEGIN EC PARAMETERS-----\nBggqhkjOPQMBBw==\n-----END EC PARAMETERS-----\n{}",
            key_pem
        );
        let decoded = decode_tolerating_preamble(&with_preamble, "EC PRIVATE KEY", Some("EC PARAMETERS")).unwrap();
        assert_eq!(decoded, der);
    }

    #[test]
    fn wrong_label_is_rejected() {
        let der = b"hello world".to_vec();
        let pem = encode("PUBLIC KEY", &der);
        assert!(decode(&pem, "EC PRIVATE KEY").is_err());
    }
}
