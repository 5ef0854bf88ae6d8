//! # Identities, Keys, and Rings
//!
//! Who can sign, and how we name them:
//!
//! - **holder** — the descriptive identity (name + email) with the
//!   character-class invariants that keep it on one line.
//! - **keys** — private keys and public-key certificates, including the
//!   self-attestation that binds identity to key material, the display
//!   fingerprint, and the bracketed text form certificates travel in.
//! - **ring** — the ordered anonymity set a message is signed against.

pub mod holder;
pub mod keys;
pub mod ring;

pub use holder::Identity;
pub use keys::{PrivateKey, ProtocolVersion, PublicKey};
pub use ring::Ring;

/// Generate a fresh keypair for `holder`: the transient private key and
/// its shareable certificate.
pub fn generate_key(holder: Identity) -> (PrivateKey, PublicKey) {
    let private = PrivateKey::generate(holder);
    let public = private.public();
    (private, public)
}
