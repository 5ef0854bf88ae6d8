//! # Group Arithmetic
//!
//! A thin adapter over `curve25519-dalek`'s Ristretto group. Everything the
//! protocol knows about elliptic curves goes through this file: canonical
//! 32-byte encodings, base-point multiplication, hash-to-scalar, and random
//! scalar sampling. The rest of the crate treats `Scalar` and
//! `RistrettoPoint` as opaque values with `+`, `-`, and `*`.
//!
//! Ristretto gives us a prime-order group with a canonical encoding — no
//! cofactor, no low-order points, no "same point, two encodings" ambiguity.
//! That last property is load-bearing: fingerprints and envelope parsing
//! both rely on every group element having exactly one byte representation.
//!
//! All operations that touch a private scalar are constant-time, courtesy
//! of dalek. Don't add shortcuts here.

use curve25519_dalek::ristretto::CompressedRistretto;
use rand::rngs::OsRng;
use sha2::Sha512;

use crate::config::{POINT_LENGTH, SCALAR_LENGTH};
use crate::error::Error;

pub use curve25519_dalek::ristretto::RistrettoPoint;
pub use curve25519_dalek::scalar::Scalar;

/// Canonical 32-byte encoding of a point.
pub fn encode_point(point: &RistrettoPoint) -> [u8; POINT_LENGTH] {
    point.compress().to_bytes()
}

/// Decode a point from its canonical 32-byte encoding.
///
/// Fails with [`Error::TruncatedData`] on a wrong-length buffer and
/// [`Error::MalformedEncoding`] if the bytes are not a valid Ristretto
/// encoding. Never produces a point from a non-canonical input.
pub fn decode_point(bytes: &[u8]) -> Result<RistrettoPoint, Error> {
    if bytes.len() != POINT_LENGTH {
        return Err(Error::TruncatedData {
            expected: POINT_LENGTH,
            got: bytes.len(),
        });
    }
    CompressedRistretto::from_slice(bytes)
        .map_err(|_| Error::MalformedEncoding)?
        .decompress()
        .ok_or(Error::MalformedEncoding)
}

/// Canonical 32-byte little-endian encoding of a scalar.
pub fn encode_scalar(scalar: &Scalar) -> [u8; SCALAR_LENGTH] {
    scalar.to_bytes()
}

/// Decode a scalar from 32 little-endian bytes.
///
/// The value must already be reduced modulo the group order; anything else
/// fails with [`Error::MalformedEncoding`]. Accepting unreduced scalars
/// would give the same signature multiple byte forms, which the text format
/// cannot tolerate.
pub fn decode_scalar(bytes: &[u8]) -> Result<Scalar, Error> {
    if bytes.len() != SCALAR_LENGTH {
        return Err(Error::TruncatedData {
            expected: SCALAR_LENGTH,
            got: bytes.len(),
        });
    }
    let mut arr = [0u8; SCALAR_LENGTH];
    arr.copy_from_slice(bytes);
    Option::from(Scalar::from_canonical_bytes(arr)).ok_or(Error::MalformedEncoding)
}

/// Multiply the group's fixed generator by a scalar.
pub fn mul_base(scalar: &Scalar) -> RistrettoPoint {
    RistrettoPoint::mul_base(scalar)
}

/// Reduce a 512-bit hash state to a uniformly distributed scalar.
///
/// The wide (64-byte) reduction keeps the output distribution negligibly
/// far from uniform over the group order.
pub fn scalar_from_hash(hash: Sha512) -> Scalar {
    Scalar::from_hash(hash)
}

/// Sample a uniformly random scalar from the OS CSPRNG.
pub fn random_scalar() -> Scalar {
    Scalar::random(&mut OsRng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Digest;

    #[test]
    fn point_roundtrip() {
        let p = mul_base(&random_scalar());
        let bytes = encode_point(&p);
        assert_eq!(decode_point(&bytes).unwrap(), p);
    }

    #[test]
    fn scalar_roundtrip() {
        let s = random_scalar();
        let bytes = encode_scalar(&s);
        assert_eq!(decode_scalar(&bytes).unwrap(), s);
    }

    #[test]
    fn noncanonical_scalar_rejected() {
        // All-ones is far above the group order.
        assert_eq!(decode_scalar(&[0xFF; 32]), Err(Error::MalformedEncoding));
    }

    #[test]
    fn invalid_point_rejected() {
        // The field encoding embedded here is non-canonical, so Ristretto
        // must refuse to decompress it.
        assert_eq!(decode_point(&[0xFF; 32]), Err(Error::MalformedEncoding));
    }

    #[test]
    fn wrong_length_is_truncation_not_garbage() {
        assert_eq!(
            decode_scalar(&[0u8; 31]),
            Err(Error::TruncatedData { expected: 32, got: 31 })
        );
        assert_eq!(
            decode_point(&[0u8; 33]),
            Err(Error::TruncatedData { expected: 32, got: 33 })
        );
    }

    #[test]
    fn hash_to_scalar_is_deterministic() {
        let mut h1 = Sha512::new();
        h1.update(b"same input");
        let mut h2 = Sha512::new();
        h2.update(b"same input");
        assert_eq!(scalar_from_hash(h1), scalar_from_hash(h2));
    }
}
