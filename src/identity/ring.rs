//! # Rings
//!
//! An ordered anonymity set of certificates. Order is load-bearing twice
//! over: it fixes the challenge-chaining order inside the cryptography and
//! the line order in the text envelope. Two rings with the same members in
//! different orders are different rings, and a signature made against one
//! does not verify against the other.

use crate::crypto::group::RistrettoPoint;
use crate::crypto::ring_sig;
use crate::error::Error;
use crate::identity::keys::PublicKey;

/// An ordered, duplicate-free sequence of certificates, length ≥ 1.
///
/// A one-member ring is legal but gives no anonymity — the signature
/// degenerates to an ordinary one. Meaningful deniability starts at two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    members: Vec<PublicKey>,
}

impl Ring {
    /// Build a ring, preserving the given order.
    ///
    /// Rejects empty rings and rings with duplicate keypoints — a
    /// duplicated member would make the anonymity set ambiguous. Duplicate
    /// *identities* on distinct keys are allowed; people have more than
    /// one key.
    pub fn new(members: Vec<PublicKey>) -> Result<Ring, Error> {
        if members.is_empty() {
            return Err(Error::InvalidRing("ring is empty"));
        }
        let keypoints: Vec<RistrettoPoint> = members.iter().map(|m| m.keypoint()).collect();
        if ring_sig::has_duplicate_keypoints(&keypoints) {
            return Err(Error::InvalidRing("ring contains a duplicate keypoint"));
        }
        Ok(Ring { members })
    }

    pub fn members(&self) -> &[PublicKey] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        // Construction forbids empty rings; kept for API completeness.
        self.members.is_empty()
    }

    /// The position of a certificate in this ring, by full certificate
    /// equality. Signers use this to locate their own index.
    pub fn position_of(&self, member: &PublicKey) -> Option<usize> {
        self.members.iter().position(|m| m == member)
    }

    pub(crate) fn keypoints(&self) -> Vec<RistrettoPoint> {
        self.members.iter().map(|m| m.keypoint()).collect()
    }
}
