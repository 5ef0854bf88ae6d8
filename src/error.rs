//! # Error Taxonomy
//!
//! Every fallible operation in the protocol returns one of these. The split
//! matters to callers: a `ParseError` means "this text is not a signed
//! message at all", while a cryptographic verification failure means "this
//! *is* a signed message, and the signature is bad." The latter is an
//! expected, recoverable outcome, so it is deliberately **not** an error —
//! verification returns `bool`, and nothing in this enum represents it.
//!
//! Decoding errors are surfaced immediately and locally. The inputs are
//! static text, so there is never anything to retry.

use thiserror::Error;

/// Errors produced while decoding, parsing, or constructing protocol data.
///
/// Messages are intentionally terse — error text from this crate ends up in
/// front ends shown to people pasting signed messages around, and a wall of
/// internal detail helps nobody.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A 32-byte chunk did not decode to a canonical scalar or a valid
    /// Ristretto point. Covers non-canonical scalars (value ≥ the group
    /// order) as well as byte strings that are not a point encoding at all.
    #[error("bytes do not encode a canonical scalar or group element")]
    MalformedEncoding,

    /// A packed signature had the wrong total length. The layout is rigid
    /// (32 bytes per scalar, ring size + 1 scalars), so any other length
    /// means the data was cut short or padded.
    #[error("packed signature length mismatch: expected {expected} bytes, got {got}")]
    TruncatedData { expected: usize, got: usize },

    /// The text violates the envelope or certificate grammar. The reason
    /// names the first rule that failed, for diagnostics; callers should
    /// treat all parse errors alike.
    #[error("parse error: {0}")]
    ParseError(&'static str),

    /// A certificate's self-signature does not bind its identity to its
    /// keypoint. The key material may be fine; the identity claim is not.
    #[error("certificate self-attestation is invalid")]
    AttestationInvalid,

    /// A ring handed to the signing boundary is unusable: empty, containing
    /// duplicate keypoints, or inconsistent with the signer's key or index.
    #[error("invalid ring: {0}")]
    InvalidRing(&'static str),
}
