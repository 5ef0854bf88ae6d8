// Copyright (c) 2026 the Zebra contributors. MIT License.
// See LICENSE for details.

//! # Zebra Protocol — Core Library
//!
//! Zebra lets someone prove that a message was endorsed by *one of* a named
//! set of people, without revealing which one. The proof is a ring
//! signature; the carrier is a plain-text envelope a person can paste into
//! an email, a chat, or a pastebin, and anyone with the app can verify.
//!
//! This crate is the protocol core and nothing else: key certificates, the
//! ring-signature construction, and the canonical text formats. The things
//! around it — UI, encrypted key storage, moving keys between devices —
//! are collaborators that call into this library with text and get text
//! (or a verdict) back.
//!
//! ## Architecture
//!
//! - **crypto** — Ristretto group arithmetic, the hash-chained ring
//!   signature, and the packed-signature codec with its Z85 armor.
//! - **identity** — holder identities, private keys, public-key
//!   certificates with self-attestations, fingerprints, and rings.
//! - **envelope** — the signed-message document: deterministic formatting,
//!   strict parsing, and one-call verification.
//! - **config** — every fixed string and width of the protocol.
//! - **error** — the error taxonomy. Note what is *not* an error: a
//!   well-formed envelope with a bad signature verifies to `false`.
//!
//! ## Design Philosophy
//!
//! 1. One byte representation per value, everywhere. Parsing is exact
//!    inversion of formatting, or it fails.
//! 2. Anonymity is binary. Verification answers "did one of them sign
//!    this", and nothing in any code path narrows down which.
//! 3. Private scalars live in the smallest possible scope and are zeroized
//!    on every exit path.
//! 4. Boring, audited cryptography only — Ristretto and SHA-2, via the
//!    dalek and RustCrypto stacks. No bespoke math.
//!
//! ## Example
//!
//! ```
//! use zebra_protocol::{generate_key, verify_envelope, Identity, Ring, SignedMessage};
//!
//! let (alice_key, alice) = generate_key(Identity::new("Alice", "alice@example.org").unwrap());
//! let (_, bob) = generate_key(Identity::new("Bob", "bob@example.org").unwrap());
//!
//! let ring = Ring::new(vec![alice.clone(), bob]).unwrap();
//! let signed = SignedMessage::sign("the drop is off", ring, &alice_key, 0).unwrap();
//!
//! let outcome = verify_envelope(&signed.to_string()).unwrap();
//! assert!(outcome.valid);
//! assert_eq!(outcome.message, "the drop is off");
//! // Which of the two signed it? The envelope will never say.
//! ```

pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod identity;

// The operations collaborators actually call, at the crate root so nobody
// has to memorize the module hierarchy.
pub use envelope::{verify_envelope, SignedMessage, VerifiedEnvelope};
pub use error::Error;
pub use identity::{generate_key, Identity, PrivateKey, ProtocolVersion, PublicKey, Ring};
