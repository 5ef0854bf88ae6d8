//! # Protocol Constants
//!
//! Every fixed string and width of the Zebra message format lives here.
//! If you're hardcoding a protocol constant somewhere else, you're doing it
//! wrong.
//!
//! These values *are* the protocol. The envelope is matched line-for-line
//! against the strings below, and the certificate grammar is matched
//! column-for-column against the widths — change any of them and every
//! previously signed message stops verifying as text (the cryptography
//! would still check out, but parsing comes first). That is why the version
//! tag exists: future format changes get a new tag, not an edit to this one.

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

/// The current version tag, embedded in both key certificates and signed
/// messages. Must never contain angle brackets, newlines, or other control
/// characters, or the certificate grammar stops being parsable. Spaces are
/// fine.
pub const VERSION_ONE: &str = "Zebra 1.0";

// ---------------------------------------------------------------------------
// Envelope Fixed Lines
// ---------------------------------------------------------------------------

/// Line 0 of every signed message. The version number doubles as a format
/// escape hatch.
pub const ENVELOPE_HEADER: &str =
    "The following message has been signed using Zebra 1.0:";

/// The fence delimiting the message body on both sides. The body itself may
/// contain anything, including this exact line — the parser works from the
/// document's ends inward, so the fences it checks are located by position,
/// never by content.
pub const QUOTE_FENCE: &str = "\"\"\"";

/// The fixed line separating the message section from the ring listing.
pub const FINGERPRINTS_HEADER: &str =
    "It was signed by someone with a private key corresponding to one of these fingerprints:";

/// The last line of every signed message.
pub const ENVELOPE_FOOTER: &str = "To verify this signature, paste this entire message into the Zebra app (starting with \"The following message\" and ending with this line).";

/// The shortest well-formed envelope: one message line, one ring member,
/// and ten lines of fixed structure around them.
pub const MIN_ENVELOPE_LINES: usize = 12;

// ---------------------------------------------------------------------------
// Encoded Widths
// ---------------------------------------------------------------------------

/// Compressed Ristretto points and canonical scalars are both 32 bytes.
pub const POINT_LENGTH: usize = 32;
pub const SCALAR_LENGTH: usize = 32;

/// A packed attestation is the one-member case of the packed ring signature
/// layout: challenge plus a single response.
pub const ATTESTATION_LENGTH: usize = 2 * SCALAR_LENGTH;

/// Hex widths in the certificate text form (uppercase hex, two chars per
/// byte).
pub const KEYPOINT_HEX_LENGTH: usize = 2 * POINT_LENGTH;
pub const ATTESTATION_HEX_LENGTH: usize = 2 * ATTESTATION_LENGTH;

/// Fingerprints are Z85 over a 32-byte digest: 40 characters, displayed in
/// four 10-character groups separated by single spaces. The Z85 alphabet
/// contains no spaces, so the 43-character display form splits
/// unambiguously even when it follows a name that contains spaces.
pub const FINGERPRINT_GROUPS: usize = 4;
pub const FINGERPRINT_GROUP_LENGTH: usize = 10;
pub const FINGERPRINT_DISPLAY_LENGTH: usize =
    FINGERPRINT_GROUPS * FINGERPRINT_GROUP_LENGTH + (FINGERPRINT_GROUPS - 1);

// ---------------------------------------------------------------------------
// Hash Domains
// ---------------------------------------------------------------------------

/// Prefix for the hash binding a message to its ring. Keeps ring-signature
/// challenges from ever colliding with any other use of the hash function.
pub const RING_DOMAIN_TAG: &[u8] = b"zebra.ring-signature.v1";

/// Prefix for the bytes a key signs to attest its own identity. The scary
/// wording is intentional: if any outside tool ever shows a user these
/// bytes and asks for a signature, something is trying to forge a
/// certificate.
pub const ATTESTATION_CONTEXT: &[u8] = b"!!!DO NOT SIGN THE FOLLOWING MESSAGE. DOING SO IS A SECURITY RISK. SOMEONE IS PROBABLY TRYING TO TRICK YOU!!!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_footer_carry_the_version_tag() {
        // The fixed lines embed the version tag and app name; keep them in
        // sync with VERSION_ONE when cutting a new tag.
        assert!(ENVELOPE_HEADER.contains(VERSION_ONE));
        assert!(ENVELOPE_FOOTER.contains("Zebra"));
    }

    #[test]
    fn fingerprint_display_width() {
        assert_eq!(FINGERPRINT_DISPLAY_LENGTH, 43);
    }

    #[test]
    fn fixed_lines_are_single_lines() {
        for line in [ENVELOPE_HEADER, QUOTE_FENCE, FINGERPRINTS_HEADER, ENVELOPE_FOOTER] {
            assert!(!line.contains('\n'));
        }
        assert!(!VERSION_ONE.contains(['<', '>', '\n']));
    }
}
