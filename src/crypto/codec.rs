//! # Signature Codec
//!
//! Fixed-layout packing of a ring signature, plus the Z85 text armor that
//! lets the packed bytes travel as a single printable line.
//!
//! The binary layout is rigid:
//!
//! ```text
//! challenge (32) || response[0] (32) || … || response[n-1] (32)
//! ```
//!
//! Total length 32·(n+1) for a ring of n. There are no tags, no lengths, no
//! self-description — the reader must already know the ring size, and any
//! other byte count is an error. Rigidity is what makes the encoding
//! injective: one signature, one byte string, one text line.
//!
//! The armor is Z85 (RFC-less but well specified by ZeroMQ): dense,
//! printable, and free of whitespace and quote characters, so an armored
//! signature is always exactly one envelope line. Packed signatures are not
//! generally a multiple of 4 bytes, so this protocol additionally pins the
//! padding strategy of the `z85` crate; other Z85 implementations pad
//! differently and will not interoperate.

use crate::config::SCALAR_LENGTH;
use crate::crypto::group;
use crate::crypto::ring_sig::RingSignature;
use crate::error::Error;

/// Pack a signature into its fixed binary layout.
pub fn pack(signature: &RingSignature) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(SCALAR_LENGTH * (signature.ring_size() + 1));
    bytes.extend_from_slice(&group::encode_scalar(&signature.challenge));
    for response in &signature.ring_responses {
        bytes.extend_from_slice(&group::encode_scalar(response));
    }
    bytes
}

/// Unpack a signature for a ring of `ring_size` members.
///
/// Fails with [`Error::TruncatedData`] unless the buffer is exactly
/// 32·(ring_size+1) bytes, and with [`Error::MalformedEncoding`] if any
/// 32-byte slice is not a canonically reduced scalar.
pub fn unpack(bytes: &[u8], ring_size: usize) -> Result<RingSignature, Error> {
    let expected = SCALAR_LENGTH * (ring_size + 1);
    if bytes.len() != expected {
        return Err(Error::TruncatedData {
            expected,
            got: bytes.len(),
        });
    }

    let mut scalars = bytes.chunks_exact(SCALAR_LENGTH);
    let challenge = group::decode_scalar(scalars.next().expect("length checked above"))?;
    let ring_responses = scalars
        .map(group::decode_scalar)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RingSignature {
        challenge,
        ring_responses,
    })
}

/// Armor bytes as a single printable Z85 line.
pub fn armor(bytes: &[u8]) -> String {
    z85::encode(bytes)
}

/// Decode Z85 armor. Any character outside the Z85 alphabet, or a length
/// the padding scheme cannot account for, is a parse error.
pub fn unarmor(text: &str) -> Result<Vec<u8>, Error> {
    z85::decode(text).map_err(|_| Error::ParseError("signature line is not valid Z85"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{group, ring_sig};

    fn sample_signature(ring_size: usize) -> RingSignature {
        let secrets: Vec<_> = (0..ring_size).map(|_| group::random_scalar()).collect();
        let ring: Vec<_> = secrets.iter().map(group::mul_base).collect();
        ring_sig::sign(b"codec test", &ring, &secrets[0], 0).unwrap()
    }

    #[test]
    fn pack_layout_is_fixed_width() {
        for n in [1, 2, 7] {
            let sig = sample_signature(n);
            assert_eq!(pack(&sig).len(), 32 * (n + 1));
        }
    }

    #[test]
    fn pack_unpack_roundtrip() {
        let sig = sample_signature(3);
        let bytes = pack(&sig);
        assert_eq!(unpack(&bytes, 3).unwrap(), sig);
    }

    #[test]
    fn unpack_rejects_wrong_length() {
        let sig = sample_signature(2);
        let mut bytes = pack(&sig);

        assert_eq!(
            unpack(&bytes, 3),
            Err(Error::TruncatedData { expected: 128, got: 96 })
        );

        bytes.pop();
        assert_eq!(
            unpack(&bytes, 2),
            Err(Error::TruncatedData { expected: 96, got: 95 })
        );
    }

    #[test]
    fn unpack_rejects_noncanonical_scalars() {
        let sig = sample_signature(2);
        let mut bytes = pack(&sig);
        // Blow out the last response scalar to a value above the group order.
        let len = bytes.len();
        bytes[len - 32..].fill(0xFF);
        assert_eq!(unpack(&bytes, 2), Err(Error::MalformedEncoding));
    }

    #[test]
    fn armor_roundtrip_is_single_line() {
        let sig = sample_signature(4);
        let bytes = pack(&sig);
        let line = armor(&bytes);
        assert!(!line.contains(char::is_whitespace));
        assert_eq!(unarmor(&line).unwrap(), bytes);
    }

    #[test]
    fn unarmor_rejects_foreign_characters() {
        // Space and backslash are outside the Z85 alphabet.
        assert!(unarmor("hello world").is_err());
        assert!(unarmor("abc\\def").is_err());
    }
}
