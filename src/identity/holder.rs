//! # Holder Identity
//!
//! The human-readable half of a key certificate: a name and an email
//! address. Purely descriptive — the cryptographic binding to a keypoint
//! happens in the certificate's attestation, not here.
//!
//! Both fields carry character-class invariants, because both get embedded
//! verbatim into single lines of the certificate and envelope grammars:
//!
//! - The **name** may be almost any UTF-8, but no control characters
//!   (newlines included). One identity, one line.
//! - The **email** is restricted to printable, non-whitespace ASCII, and
//!   may be empty. This is a brute-force homoglyph defence: an address that
//!   *looks* like a familiar one must *be* that address, not a visually
//!   identical string from some other alphabet. Real-world addresses almost
//!   never need anything outside this range.
//!
//! The invariants are enforced at every construction site, including
//! deserialization — an `Identity` that exists is an `Identity` that
//! parses.

use serde::{Deserialize, Deserializer, Serialize};
use zeroize::Zeroize;

use crate::error::Error;

/// A claimed holder of a key: name plus email. Immutable once embedded in
/// a certificate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Zeroize)]
pub struct Identity {
    name: String,
    email: String,
}

fn is_printable_ascii(byte: u8) -> bool {
    // 33..=126: everything printable except space. DEL and above excluded.
    (33..=126).contains(&byte)
}

impl Identity {
    /// Build an identity, enforcing the character-class invariants.
    pub fn new(name: &str, email: &str) -> Result<Self, Error> {
        if name.contains(char::is_control) {
            return Err(Error::ParseError("name must not contain control characters"));
        }
        if !email.bytes().all(is_printable_ascii) {
            return Err(Error::ParseError(
                "email must be printable, non-whitespace ASCII",
            ));
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

// Hand-written so the invariants hold for deserialized values too; the
// derived impl would happily accept a newline in a name and break every
// line-oriented format downstream.
impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            email: String,
        }
        let raw = Raw::deserialize(deserializer)?;
        Identity::new(&raw.name, &raw.email).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_identities() {
        let id = Identity::new("Ada Lovelace", "ada@analytical.engine").unwrap();
        assert_eq!(id.name(), "Ada Lovelace");
        assert_eq!(id.email(), "ada@analytical.engine");
    }

    #[test]
    fn accepts_unicode_names_and_empty_email() {
        assert!(Identity::new("Ada 愛", "").is_ok());
    }

    #[test]
    fn rejects_control_characters_in_name() {
        assert!(Identity::new("Ada\nLovelace", "ada@example.org").is_err());
        assert!(Identity::new("Ada\tLovelace", "ada@example.org").is_err());
    }

    #[test]
    fn rejects_nonascii_and_whitespace_email() {
        assert!(Identity::new("Ada", "ada@ex ample.org").is_err());
        assert!(Identity::new("Ada", "ädä@example.org").is_err());
        assert!(Identity::new("Ada", "ada@example.org\n").is_err());
    }

    #[test]
    fn deserialization_reenforces_invariants() {
        let good = Identity::new("Ada", "ada@example.org").unwrap();
        let bytes = bincode::serialize(&good).unwrap();
        let back: Identity = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, good);

        // Serialize a raw pair that violates the name invariant; it must be
        // refused on the way back in.
        #[derive(serde::Serialize)]
        struct Raw {
            name: String,
            email: String,
        }
        let evil = bincode::serialize(&Raw {
            name: "two\nlines".into(),
            email: "a@b.c".into(),
        })
        .unwrap();
        assert!(bincode::deserialize::<Identity>(&evil).is_err());
    }
}
