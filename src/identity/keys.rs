//! # Keys and Certificates
//!
//! A public key here is a *certificate*: key material plus the identity its
//! holder claims, plus a self-attestation binding the two. A certificate is
//! a simple package that can be shared, imported, and listed in a ring with
//! no side channel for "whose key is this" — and the attestation is what
//! stops a mistaken or malicious party from re-labelling key material with
//! somebody else's name in transit.
//!
//! The attestation is the one-member case of the ring construction: an
//! ordinary Schnorr signature by the key over its own identity and
//! keypoint. Reusing the ring engine keeps this crate at exactly one
//! signature scheme.
//!
//! ## Certificate text form
//!
//! ```text
//! [Ada Lovelace <ada@example.org> <Zebra 1.0> 4A…C3 91…0B]
//! ```
//!
//! Square brackets around: name, `<email>`, `<version>`, 64 uppercase hex
//! chars of keypoint, 128 uppercase hex chars of packed attestation. The
//! name may contain nearly arbitrary characters including spaces and angle
//! brackets, so the line is parsed **from the back**: the fixed-width hex
//! fields first, then the exact version token, then the email (which can
//! contain no spaces), and whatever remains is the name. Parsed front to
//! back the format would be ambiguous; back to front it is bijective.
//! None of the fields may contain newlines, so a list of certificates is
//! just a newline-separated string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::{
    ATTESTATION_CONTEXT, ATTESTATION_HEX_LENGTH, FINGERPRINT_GROUP_LENGTH, KEYPOINT_HEX_LENGTH,
    VERSION_ONE,
};
use crate::crypto::codec;
use crate::crypto::group::{self, RistrettoPoint, Scalar};
use crate::crypto::ring_sig::{self, RingSignature};
use crate::error::Error;
use crate::identity::holder::Identity;

/// The protocol version a key or message was produced under. Kept explicit
/// in both certificates and envelopes so the format can evolve without
/// breaking old signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProtocolVersion {
    ZebraOne,
}

impl ProtocolVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolVersion::ZebraOne => VERSION_ONE,
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            VERSION_ONE => Ok(ProtocolVersion::ZebraOne),
            _ => Err(Error::ParseError("unknown version tag")),
        }
    }
}

/// The bytes a key signs to claim an identity. The context prefix makes a
/// stolen attestation request recognizable on sight, and the 0xFF
/// sentinels (not valid in UTF-8 text, so never produced by a field) make
/// the concatenation injective.
fn attestation_bytes(
    holder: &Identity,
    version: ProtocolVersion,
    keypoint: &RistrettoPoint,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        ATTESTATION_CONTEXT.len() + holder.name().len() + holder.email().len() + 64,
    );
    bytes.extend_from_slice(ATTESTATION_CONTEXT);
    bytes.extend_from_slice(holder.name().as_bytes());
    bytes.push(0xFF);
    bytes.extend_from_slice(holder.email().as_bytes());
    bytes.push(0xFF);
    bytes.extend_from_slice(version.as_str().as_bytes());
    bytes.extend_from_slice(&group::encode_point(keypoint));
    bytes
}

/// A complete public-key certificate: everything needed to share a key,
/// list it in a ring, or verify a signature that names it.
///
/// A constructed `PublicKey`'s attestation *may not be valid* — parsing
/// from text checks it, but certificates arriving through other channels
/// must be checked with [`PublicKey::verify_attestation`] before anything
/// depends on the identity claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub(crate) holder: Identity,
    pub(crate) version: ProtocolVersion,
    pub(crate) keypoint: RistrettoPoint,
    pub(crate) holder_attestation: RingSignature,
}

impl PublicKey {
    pub fn holder(&self) -> &Identity {
        &self.holder
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn keypoint(&self) -> RistrettoPoint {
        self.keypoint
    }

    /// Check that the holder of this key's private half really claimed
    /// this identity for this keypoint.
    ///
    /// Returns `bool`, not `Result`: a failed attestation is an expected,
    /// recoverable outcome while verifying a message from untrusted text.
    /// Callers must reject an entire ring signature if any member fails
    /// this check.
    pub fn verify_attestation(&self) -> bool {
        if self.holder_attestation.ring_size() != 1 {
            return false;
        }
        ring_sig::verify(
            &self.holder_attestation,
            &[self.keypoint],
            &attestation_bytes(&self.holder, self.version, &self.keypoint),
        )
    }

    /// The canonical byte serialization of the whole certificate, the
    /// input to fingerprinting. One certificate, one byte string.
    fn canonical_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("serialization into an unbounded vec cannot fail")
    }

    /// The display fingerprint: Z85 over a SHA-256 of the canonical
    /// certificate bytes, split into four 10-character groups.
    ///
    /// Deterministic — identical certificates always fingerprint
    /// identically, and any change to any field (down to whitespace in a
    /// name) produces an unrelated fingerprint. For human comparison only;
    /// cryptographic equality means comparing certificates, not
    /// fingerprints.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.canonical_bytes());
        let encoded = codec::armor(&digest);
        encoded
            .as_bytes()
            .chunks(FINGERPRINT_GROUP_LENGTH)
            .map(|group| std::str::from_utf8(group).expect("Z85 output is ASCII"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} <{}> <{}> {} {}]",
            self.holder.name(),
            self.holder.email(),
            self.version,
            hex::encode_upper(group::encode_point(&self.keypoint)),
            hex::encode_upper(codec::pack(&self.holder_attestation)),
        )
    }
}

fn decode_upper_hex(field: &[u8]) -> Result<Vec<u8>, Error> {
    if !field
        .iter()
        .all(|&b| matches!(b, b'0'..=b'9' | b'A'..=b'F'))
    {
        return Err(Error::ParseError("hex fields must be uppercase hex"));
    }
    hex::decode(field).map_err(|_| Error::ParseError("hex fields must be uppercase hex"))
}

impl FromStr for PublicKey {
    type Err = Error;

    /// Parse the bracketed text form, back to front, and verify the
    /// attestation. Any deviation from the grammar — wrong widths, wrong
    /// character classes, a version tag we don't know — is rejected.
    fn from_str(s: &str) -> Result<PublicKey, Error> {
        let inner = s
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or(Error::ParseError("certificate must be enclosed in brackets"))?;
        let bytes = inner.as_bytes();

        // Fixed-width tail first. All cut points are verified ASCII, so
        // the later str conversion of the head cannot land mid-codepoint.
        let too_short = Error::ParseError("certificate is too short");
        let att_start = bytes.len().checked_sub(ATTESTATION_HEX_LENGTH).ok_or(too_short.clone())?;
        let key_start = att_start
            .checked_sub(1 + KEYPOINT_HEX_LENGTH)
            .ok_or(too_short.clone())?;
        let version_token = format!("<{VERSION_ONE}>");
        let version_start = key_start
            .checked_sub(1 + version_token.len())
            .ok_or(too_short.clone())?;
        let head_end = version_start.checked_sub(1).ok_or(too_short)?;

        if bytes[att_start - 1] != b' ' || bytes[key_start - 1] != b' ' || bytes[head_end] != b' ' {
            return Err(Error::ParseError("certificate fields must be space-separated"));
        }
        if &bytes[version_start..key_start - 1] != version_token.as_bytes() {
            return Err(Error::ParseError("unknown version tag"));
        }

        let keypoint_bytes = decode_upper_hex(&bytes[key_start..att_start - 1])?;
        let attestation_bytes = decode_upper_hex(&bytes[att_start..])?;

        // Head is "name <email>"; the email can contain no spaces, so the
        // last " <" is unambiguous even if the name contains brackets.
        let head = std::str::from_utf8(&bytes[..head_end])
            .map_err(|_| Error::ParseError("certificate is not valid UTF-8"))?;
        let head = head
            .strip_suffix('>')
            .ok_or(Error::ParseError("email must be enclosed in angle brackets"))?;
        let sep = head
            .rfind(" <")
            .ok_or(Error::ParseError("email must be enclosed in angle brackets"))?;
        let holder = Identity::new(&head[..sep], &head[sep + 2..])?;

        let certificate = PublicKey {
            holder,
            version: ProtocolVersion::ZebraOne,
            keypoint: group::decode_point(&keypoint_bytes)?,
            holder_attestation: codec::unpack(&attestation_bytes, 1)?,
        };

        if !certificate.verify_attestation() {
            return Err(Error::AttestationInvalid);
        }
        Ok(certificate)
    }
}

/// A private key: the secret scalar plus the identity it will attest to.
///
/// Exists only transiently in memory while signing; persistence belongs to
/// a storage collaborator. The scalar is zeroized on every drop path.
///
/// The attestation is computed once at generation and cached here, so a
/// keypair has exactly one canonical public certificate — attestations are
/// randomized, and regenerating one per export would mint an endless
/// stream of certificates that fingerprint differently.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    holder: Identity,
    secret: Scalar,
    holder_attestation: RingSignature,
}

impl PrivateKey {
    /// Generate a fresh key for `holder` from the OS CSPRNG.
    pub fn generate(holder: Identity) -> Self {
        let secret = group::random_scalar();
        let keypoint = group::mul_base(&secret);
        let holder_attestation = ring_sig::sign(
            &attestation_bytes(&holder, ProtocolVersion::ZebraOne, &keypoint),
            &[keypoint],
            &secret,
            0,
        )
        .expect("a one-member ring of the key's own point is always signable");

        PrivateKey {
            holder,
            secret,
            holder_attestation,
        }
    }

    pub fn holder(&self) -> &Identity {
        &self.holder
    }

    /// The certificate for this key.
    pub fn public(&self) -> PublicKey {
        PublicKey {
            holder: self.holder.clone(),
            version: ProtocolVersion::ZebraOne,
            keypoint: group::mul_base(&self.secret),
            holder_attestation: self.holder_attestation.clone(),
        }
    }

    pub(crate) fn secret(&self) -> &Scalar {
        &self.secret
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The scalar never appears in debug output, not even truncated.
        write!(f, "PrivateKey(holder={:?})", self.holder)
    }
}
