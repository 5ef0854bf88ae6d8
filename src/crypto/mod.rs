//! # Cryptographic Core
//!
//! The three layers under every signed message:
//!
//! - **group** — canonical encodings and arithmetic over the Ristretto
//!   prime-order group. The only file that talks to `curve25519-dalek`.
//! - **ring_sig** — the hash-chained ring signature construction itself.
//! - **codec** — the fixed binary layout of a signature and its Z85 text
//!   armor.
//!
//! Nothing here knows about identities, certificates, or envelopes; those
//! live a layer up. Everything here is deterministic given its inputs
//! (plus the CSPRNG during signing), synchronous, and free of shared state,
//! so concurrent verification needs no coordination.

pub mod codec;
pub mod group;
pub mod ring_sig;

pub use ring_sig::{sign, verify, RingSignature};
