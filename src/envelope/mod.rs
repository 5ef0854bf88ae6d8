//! # Signed-Message Envelopes
//!
//! The canonical text document a signed message travels in. A person can
//! read it, paste it anywhere plain text survives, and hand it back to the
//! app for verification — and the app can parse it back deterministically,
//! byte for byte.
//!
//! The shape, with M message lines and N ring members:
//!
//! ```text
//! The following message has been signed using Zebra 1.0:
//! """
//! <message body, M ≥ 1 lines, verbatim>
//! """
//!
//! It was signed by someone with a private key corresponding to one of these fingerprints:
//!
//! <name> <email> <fingerprint>          ← N lines, ring order
//!
//! <one Z85 line: certificates + packed signature>
//!
//! To verify this signature, paste this entire message into the Zebra app …
//! ```
//!
//! The message body may contain any text at all — blank lines, more quote
//! fences, whatever. That works because the parser never scans for
//! delimiters inside the body: the fixed lines at the top are located from
//! the start, everything below the body is located from the *end* (the
//! armored payload says how many ring lines to expect), and the body is
//! whatever remains in the middle. One struct, one string, a bijection
//! between them.
//!
//! The armored payload carries the full certificate ring alongside the
//! packed signature. The human-readable ring listing is redundant with it
//! on purpose: parsing recomputes each member's display line (name, email,
//! fingerprint) from the certificates and requires an exact match, so
//! nothing in the listing can be quietly relabelled.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use crate::config::{
    ENVELOPE_FOOTER, ENVELOPE_HEADER, FINGERPRINTS_HEADER, MIN_ENVELOPE_LINES, QUOTE_FENCE,
};
use crate::crypto::codec;
use crate::crypto::ring_sig::{self, RingSignature};
use crate::error::Error;
use crate::identity::{PrivateKey, PublicKey, Ring};

/// A message bound to the ring it was signed against. Construct one by
/// signing, or by parsing envelope text; the two are exact inverses.
///
/// Parsing success means the document is well-formed — it says nothing
/// about the cryptography. Call [`SignedMessage::verify`] for that.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedMessage {
    message: String,
    ring: Ring,
    signature: RingSignature,
}

/// The outcome of [`verify_envelope`]: the structural parse succeeded, and
/// `valid` reports the cryptographic result. An invalid signature is a
/// normal outcome, not an error — callers show the message either way,
/// with the verdict next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedEnvelope {
    pub valid: bool,
    pub message: String,
    pub ring: Vec<PublicKey>,
}

/// One ring member's line in the envelope listing.
fn member_line(member: &PublicKey) -> String {
    format!(
        "{} <{}> {}",
        member.holder().name(),
        member.holder().email(),
        member.fingerprint()
    )
}

impl SignedMessage {
    /// Sign `message` against `ring`, as the member at `signer_index`.
    ///
    /// The certificate at `signer_index` must be the public half of
    /// `signer`, and the ring must be usable (non-empty, duplicate-free) —
    /// violations fail with [`Error::InvalidRing`].
    pub fn sign(
        message: &str,
        ring: Ring,
        signer: &PrivateKey,
        signer_index: usize,
    ) -> Result<SignedMessage, Error> {
        let signature = ring_sig::sign(
            message.as_bytes(),
            &ring.keypoints(),
            signer.secret(),
            signer_index,
        )?;
        Ok(SignedMessage {
            message: message.to_string(),
            ring,
            signature,
        })
    }

    /// The signed text, exactly as it appears between the quote fences.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Check the whole document cryptographically: every member's
    /// certificate must attest its identity, and the ring signature must
    /// verify over the message and the ordered ring.
    ///
    /// Both checks are mandatory. A signature whose arithmetic holds but
    /// whose certificates are self-inconsistent is worthless — the
    /// identities shown to the reader would be unsubstantiated.
    ///
    /// Returns `bool` and reveals nothing about which member signed.
    pub fn verify(&self) -> bool {
        for member in self.ring.members() {
            if !member.verify_attestation() {
                tracing::debug!("rejecting envelope: a ring member's attestation fails");
                return false;
            }
        }
        ring_sig::verify(&self.signature, &self.ring.keypoints(), self.message.as_bytes())
    }

    /// The armored payload line: the serialized certificate ring followed
    /// by the fixed-layout packed signature, as one Z85 string.
    fn seal_payload(&self) -> String {
        let mut bytes = bincode::serialize(self.ring.members())
            .expect("serialization into an unbounded vec cannot fail");
        bytes.extend_from_slice(&codec::pack(&self.signature));
        codec::armor(&bytes)
    }
}

/// Decode the armored payload: certificates first (self-delimiting), then
/// exactly one packed signature for that many members. Trailing or missing
/// bytes are a hard failure.
fn open_payload(line: &str) -> Result<(Vec<PublicKey>, RingSignature), Error> {
    let bytes = codec::unarmor(line)?;
    let mut reader = Cursor::new(&bytes);
    let members: Vec<PublicKey> = bincode::deserialize_from(&mut reader)
        .map_err(|_| Error::ParseError("certificate section does not deserialize"))?;
    let tail = &bytes[reader.position() as usize..];
    let signature = codec::unpack(tail, members.len())?;
    Ok((members, signature))
}

impl fmt::Display for SignedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = vec![
            ENVELOPE_HEADER.to_string(),
            QUOTE_FENCE.to_string(),
            self.message.clone(),
            QUOTE_FENCE.to_string(),
            String::new(),
            FINGERPRINTS_HEADER.to_string(),
            String::new(),
        ];
        for member in self.ring.members() {
            lines.push(member_line(member));
        }
        lines.push(String::new());
        lines.push(self.seal_payload());
        lines.push(String::new());
        lines.push(ENVELOPE_FOOTER.to_string());
        f.write_str(&lines.join("\n"))
    }
}

impl FromStr for SignedMessage {
    type Err = Error;

    /// Parse envelope text. Success means *syntactically correct*, nothing
    /// more — the signature may still be invalid.
    fn from_str(s: &str) -> Result<SignedMessage, Error> {
        let lines: Vec<&str> = s.trim().split('\n').collect();
        let total = lines.len();
        if total < MIN_ENVELOPE_LINES {
            return Err(Error::ParseError("document is shorter than the minimum envelope"));
        }

        // Fixed lines at both ends first; they are cheap and catch almost
        // everything that isn't a signed message at all.
        if lines[0] != ENVELOPE_HEADER {
            return Err(Error::ParseError("missing or altered header line"));
        }
        if lines[1] != QUOTE_FENCE {
            return Err(Error::ParseError("missing opening quote fence"));
        }
        if lines[total - 1] != ENVELOPE_FOOTER {
            return Err(Error::ParseError("missing or altered footer line"));
        }
        if !lines[total - 2].is_empty() || !lines[total - 4].is_empty() {
            return Err(Error::ParseError("missing blank lines around the signature"));
        }

        // The payload names the ring size; every remaining position in the
        // document follows from it.
        let (members, signature) = open_payload(lines[total - 3])?;
        let n = members.len();
        if total < n + MIN_ENVELOPE_LINES - 1 {
            return Err(Error::ParseError("ring listing does not fit the document"));
        }

        // The listing must match the certificates exactly, fingerprints
        // included, in ring order.
        for (j, member) in members.iter().enumerate() {
            if lines[total - 4 - n + j] != member_line(member) {
                return Err(Error::ParseError(
                    "ring listing does not match the signed certificates",
                ));
            }
        }

        if !lines[total - 5 - n].is_empty() || !lines[total - 7 - n].is_empty() {
            return Err(Error::ParseError("missing blank lines around the ring listing"));
        }
        if lines[total - 6 - n] != FINGERPRINTS_HEADER {
            return Err(Error::ParseError("missing or altered fingerprints line"));
        }
        if lines[total - 8 - n] != QUOTE_FENCE {
            return Err(Error::ParseError("missing closing quote fence"));
        }

        let message = lines[2..total - 8 - n].join("\n");
        let ring = Ring::new(members)
            .map_err(|_| Error::ParseError("certificate ring is empty or contains duplicates"))?;

        tracing::trace!(ring_size = n, "parsed signed-message envelope");
        Ok(SignedMessage {
            message,
            ring,
            signature,
        })
    }
}

/// Parse and verify in one step — the operation a front end calls when a
/// user pastes in a signed message.
///
/// Structural failures return `Err`; a well-formed envelope always returns
/// `Ok`, with `valid` carrying the cryptographic verdict. This is how a
/// caller tells "not a signed message" apart from "signed message, but the
/// signature is bad."
pub fn verify_envelope(text: &str) -> Result<VerifiedEnvelope, Error> {
    let signed = SignedMessage::from_str(text)?;
    let valid = signed.verify();
    tracing::debug!(valid, ring_size = signed.ring.len(), "verified envelope");
    Ok(VerifiedEnvelope {
        valid,
        message: signed.message,
        ring: signed.ring.members().to_vec(),
    })
}
