//! # Ring Signature Engine
//!
//! The cryptographic heart of the protocol: a hash-chained ring signature
//! in the AOS / "Zero to Monero" style. A signer proves knowledge of the
//! secret scalar for exactly one position in an ordered ring of keypoints,
//! without revealing which position.
//!
//! The construction walks the ring with a chain of challenges. For each
//! position `i`, the next challenge is
//!
//! ```text
//! c[i+1] = H(base || r[i]·G + c[i]·K[i])
//! ```
//!
//! where `base` binds the message and the exact ordered ring. The signer
//! fills every other position with random responses, then closes the chain
//! at their own position using the secret key: `r = a − c·x`. Without a
//! secret key for some position, that equation has no solution, and the
//! chain cannot close. A verifier just replays the chain from the anchor
//! challenge `c[0]` and checks that it comes back around to the same value.
//!
//! A ring of size one degenerates to an ordinary Schnorr signature. The
//! certificate attestation in [`crate::identity`] is exactly that case, so
//! this module is the only signature scheme in the crate.

use sha2::{Digest, Sha512};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use zeroize::Zeroize;

use crate::config::RING_DOMAIN_TAG;
use crate::crypto::group::{self, RistrettoPoint, Scalar};
use crate::error::Error;

/// A ring signature: the anchor challenge plus one response per ring
/// member, in ring order. Which member produced it is not recoverable from
/// the contents — that is the point.
///
/// The keypoints themselves are *not* part of this value; a signature is
/// only meaningful alongside the ordered ring it was made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct RingSignature {
    pub(crate) challenge: Scalar,
    pub(crate) ring_responses: Vec<Scalar>,
}

impl RingSignature {
    /// The ring size this signature was produced for.
    pub fn ring_size(&self) -> usize {
        self.ring_responses.len()
    }
}

/// The hash state binding a message to its exact, ordered ring. Signing and
/// verification must build this identically, byte for byte, or nothing
/// verifies.
fn base_hash(message: &[u8], ring: &[RistrettoPoint]) -> Sha512 {
    let mut hash = Sha512::new_with_prefix(RING_DOMAIN_TAG);
    hash.update(message);
    for keypoint in ring {
        hash.update(group::encode_point(keypoint));
    }
    hash
}

/// One step of the challenge chain: `H(base || point)` reduced to a scalar.
fn chain_challenge(base: &Sha512, point: &RistrettoPoint) -> Scalar {
    let mut hash = base.clone();
    hash.update(group::encode_point(point));
    group::scalar_from_hash(hash)
}

/// True if any two ring members share a keypoint. A duplicated member makes
/// the anonymity set ambiguous, so such rings are rejected outright.
pub(crate) fn has_duplicate_keypoints(ring: &[RistrettoPoint]) -> bool {
    let mut seen = BTreeSet::new();
    ring.iter().any(|k| !seen.insert(group::encode_point(k)))
}

/// Produce a ring signature over `message` by the holder of `secret`,
/// positioned at `signer_index` in the ordered `ring`.
///
/// The ring must be non-empty, free of duplicate keypoints, and
/// `ring[signer_index]` must be the public keypoint of `secret` — anything
/// else fails with [`Error::InvalidRing`] before any cryptography runs.
pub fn sign(
    message: &[u8],
    ring: &[RistrettoPoint],
    secret: &Scalar,
    signer_index: usize,
) -> Result<RingSignature, Error> {
    let ring_size = ring.len();
    if ring_size == 0 {
        return Err(Error::InvalidRing("ring is empty"));
    }
    if signer_index >= ring_size {
        return Err(Error::InvalidRing("signer index is out of range"));
    }
    if has_duplicate_keypoints(ring) {
        return Err(Error::InvalidRing("ring contains a duplicate keypoint"));
    }
    if group::mul_base(secret) != ring[signer_index] {
        return Err(Error::InvalidRing(
            "private key does not match the keypoint at the signer index",
        ));
    }

    tracing::debug!(ring_size, "producing ring signature");

    let base = base_hash(message, ring);

    // Random responses everywhere; the signer's will be overwritten when
    // the chain closes.
    let mut responses: Vec<Scalar> = (0..ring_size).map(|_| group::random_scalar()).collect();
    let mut challenges = vec![Scalar::ZERO; ring_size];

    // The nonce commitment a·G seeds the chain at the position after the
    // signer; each later step folds in r[i]·G + c[i]·K[i].
    let nonce = group::random_scalar();
    let mut link = group::mul_base(&nonce);

    for offset in 1..=ring_size {
        let i = (signer_index + offset) % ring_size;
        challenges[i] = chain_challenge(&base, &link);
        link = group::mul_base(&responses[i]) + challenges[i] * ring[i];
    }

    // Close the chain: with r = a − c·x we get r·G + c·K = a·G, so the
    // challenge after the signer recomputes to exactly the value the nonce
    // seeded. This is the step that needs the private key.
    responses[signer_index] = nonce - challenges[signer_index] * secret;

    Ok(RingSignature {
        challenge: challenges[0],
        ring_responses: responses,
    })
}

/// Check a ring signature over `message` against the ordered `ring`.
///
/// Returns a plain `bool`: an invalid signature is an expected outcome, not
/// an exceptional one. The result reveals nothing about which ring position
/// signed. Rings with duplicate keypoints, or signatures whose response
/// count disagrees with the ring, verify as `false`.
///
/// This checks only the chain arithmetic. Whole-message verification also
/// requires every ring member's certificate attestation to hold; that check
/// lives with the certificates, in [`crate::envelope`].
pub fn verify(signature: &RingSignature, ring: &[RistrettoPoint], message: &[u8]) -> bool {
    if ring.is_empty() || signature.ring_responses.len() != ring.len() {
        return false;
    }
    if has_duplicate_keypoints(ring) {
        return false;
    }

    let base = base_hash(message, ring);
    let mut challenge = signature.challenge;

    for (keypoint, response) in ring.iter().zip(&signature.ring_responses) {
        let link = group::mul_base(response) + challenge * keypoint;
        challenge = chain_challenge(&base, &link);
    }

    // The chain must come back around to the anchor exactly.
    challenge == signature.challenge
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair() -> (Scalar, RistrettoPoint) {
        let secret = group::random_scalar();
        let point = group::mul_base(&secret);
        (secret, point)
    }

    fn ring_of(size: usize) -> Vec<(Scalar, RistrettoPoint)> {
        (0..size).map(|_| keypair()).collect()
    }

    #[test]
    fn signatures_verify_for_every_ring_size_and_index() {
        for size in 1..=20 {
            let members = ring_of(size);
            let ring: Vec<RistrettoPoint> = members.iter().map(|(_, k)| *k).collect();

            // Exhaustive over signer positions for small rings, spot-checked
            // for larger ones.
            let indices: Vec<usize> = if size <= 5 {
                (0..size).collect()
            } else {
                vec![0, size / 2, size - 1]
            };

            for index in indices {
                let sig = sign(b"the meeting is at noon", &ring, &members[index].0, index)
                    .unwrap();
                assert!(
                    verify(&sig, &ring, b"the meeting is at noon"),
                    "ring size {size}, signer {index}"
                );
            }
        }
    }

    #[test]
    fn single_member_ring_is_plain_schnorr() {
        let (secret, point) = keypair();
        let sig = sign(b"just me", &[point], &secret, 0).unwrap();
        assert!(verify(&sig, &[point], b"just me"));
        assert!(!verify(&sig, &[point], b"not me"));
    }

    #[test]
    fn tampered_message_fails() {
        let members = ring_of(3);
        let ring: Vec<RistrettoPoint> = members.iter().map(|(_, k)| *k).collect();
        let sig = sign(b"hello world", &ring, &members[1].0, 1).unwrap();

        assert!(verify(&sig, &ring, b"hello world"));
        assert!(!verify(&sig, &ring, b"hello World"));
    }

    #[test]
    fn reordered_ring_fails() {
        let members = ring_of(3);
        let ring: Vec<RistrettoPoint> = members.iter().map(|(_, k)| *k).collect();
        let sig = sign(b"order matters", &ring, &members[0].0, 0).unwrap();

        let mut shuffled = ring.clone();
        shuffled.swap(1, 2);
        assert!(!verify(&sig, &shuffled, b"order matters"));
    }

    #[test]
    fn swapped_keypoint_fails() {
        let members = ring_of(3);
        let mut ring: Vec<RistrettoPoint> = members.iter().map(|(_, k)| *k).collect();
        let sig = sign(b"membership matters", &ring, &members[2].0, 2).unwrap();

        let (_, stranger) = keypair();
        ring[0] = stranger;
        assert!(!verify(&sig, &ring, b"membership matters"));
    }

    #[test]
    fn mixed_signature_parts_fail() {
        let members = ring_of(2);
        let ring: Vec<RistrettoPoint> = members.iter().map(|(_, k)| *k).collect();
        let sig_a = sign(b"message a", &ring, &members[0].0, 0).unwrap();
        let sig_b = sign(b"message b", &ring, &members[0].0, 0).unwrap();

        let franken = RingSignature {
            challenge: sig_a.challenge,
            ring_responses: sig_b.ring_responses.clone(),
        };
        assert!(!verify(&franken, &ring, b"message a"));
        assert!(!verify(&franken, &ring, b"message b"));
    }

    #[test]
    fn duplicate_keypoints_rejected() {
        let (secret, point) = keypair();
        let (_, other) = keypair();
        let ring = vec![point, other, point];

        assert_eq!(
            sign(b"ambiguous", &ring, &secret, 0),
            Err(Error::InvalidRing("ring contains a duplicate keypoint"))
        );

        // A signature over a clean ring must not verify against one with
        // duplicates either.
        let clean = vec![point, other];
        let sig = sign(b"ambiguous", &clean, &secret, 0).unwrap();
        let padded = RingSignature {
            challenge: sig.challenge,
            ring_responses: vec![
                sig.ring_responses[0],
                sig.ring_responses[1],
                sig.ring_responses[0],
            ],
        };
        assert!(!verify(&padded, &ring, b"ambiguous"));
    }

    #[test]
    fn signer_misuse_is_reported() {
        let members = ring_of(2);
        let ring: Vec<RistrettoPoint> = members.iter().map(|(_, k)| *k).collect();

        assert_eq!(
            sign(b"x", &ring, &members[0].0, 2),
            Err(Error::InvalidRing("signer index is out of range"))
        );
        assert_eq!(
            sign(b"x", &ring, &members[0].0, 1),
            Err(Error::InvalidRing(
                "private key does not match the keypoint at the signer index"
            ))
        );
        assert_eq!(
            sign(b"x", &[], &members[0].0, 0),
            Err(Error::InvalidRing("ring is empty"))
        );
    }

    #[test]
    fn signatures_are_randomized() {
        let members = ring_of(2);
        let ring: Vec<RistrettoPoint> = members.iter().map(|(_, k)| *k).collect();
        let sig1 = sign(b"same message", &ring, &members[0].0, 0).unwrap();
        let sig2 = sign(b"same message", &ring, &members[0].0, 0).unwrap();
        assert_ne!(sig1, sig2);
    }
}
