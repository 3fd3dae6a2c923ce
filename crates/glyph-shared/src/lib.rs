//! # glyph-shared
//!
//! Message format and trust layer for Glyph, the ephemeral QR messenger.
//!
//! A [`Message`] is encoded into a tier-tagged payload string that fits in
//! a QR code: `GLY1E:` seals it under a fresh key that travels inside the
//! payload (casual obfuscation, opens without a secret), `GLY1P:` seals it
//! under an Argon2id key derived from a user PIN (confidentiality gated by
//! the shared PIN), and legacy `GLY1:` payloads parse in the clear. Every
//! decode entry point fails to `None` without distinguishing malformed
//! input from a wrong key.
//!
//! All functions here are pure over their inputs and safe to call from
//! multiple threads; the stateful scan ledger enforcing read-once lives in
//! `glyph-store`.

pub mod constants;
pub mod crypto;
pub mod envelope;
pub mod message;

mod error;

pub use envelope::{
    is_encrypted_message, is_logo_qr, is_message, is_pin_protected, is_pin_protected_message,
    Envelope,
};
pub use error::{CryptoError, EnvelopeError, GlyphError};
pub use message::{Expiration, Message, SocialSignature};
