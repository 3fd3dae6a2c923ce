//! The tier-tagged wire envelope.
//!
//! A payload string is always `<TAG>:<standard base64>`. Three tags carry
//! messages: `GLY1:` (legacy, serialized in the clear), `GLY1E:`
//! (embedded-key: the key rides inside the blob, obfuscation only) and
//! `GLY1P:` (key derived from a PIN plus an embedded salt). [`Envelope`]
//! is the single parse step that classifies a string and hands the blob to
//! the matching unseal path.

use crate::constants::{
    LOGO_URL, PIN_TIER_TAGS, SALT_SIZE, SYMMETRIC_KEY_SIZE, TAG_MESSAGE_EMBEDDED,
    TAG_MESSAGE_PIN, TAG_MESSAGE_PLAIN,
};
use crate::crypto;
use crate::error::EnvelopeError;
use crate::message::Message;

/// A classified payload, still sealed.
#[derive(Debug, Clone)]
pub enum Envelope {
    /// `GLY1:` payloads: bincode record, no encryption at all.
    Plain(Vec<u8>),
    /// `GLY1E:` payloads: `key || nonce || ciphertext`; decodable by anyone
    /// holding the payload. A convenience tier, not a confidentiality
    /// boundary.
    EmbeddedKey(Vec<u8>),
    /// `GLY1P:` payloads: `salt || nonce || ciphertext`; opens only with
    /// the PIN.
    PinProtected(Vec<u8>),
}

impl Envelope {
    /// Classify a payload string by its tag and decode the base64 body.
    /// Returns `None` for unknown tags and malformed base64.
    pub fn parse(payload: &str) -> Option<Self> {
        if let Some(body) = payload.strip_prefix(TAG_MESSAGE_PLAIN) {
            return base64_decode(body).map(Self::Plain);
        }
        if let Some(body) = payload.strip_prefix(TAG_MESSAGE_EMBEDDED) {
            return base64_decode(body).map(Self::EmbeddedKey);
        }
        if let Some(body) = payload.strip_prefix(TAG_MESSAGE_PIN) {
            return base64_decode(body).map(Self::PinProtected);
        }
        None
    }
}

impl Message {
    /// Encode under the embedded-key tier (`GLY1E:`).
    ///
    /// A fresh key is generated per message and travels inside the blob, so
    /// the payload opens without any shared secret.
    pub fn encode(&self) -> Result<String, EnvelopeError> {
        let record = bincode::serialize(self).map_err(|_| EnvelopeError::Serialization)?;
        let key = crypto::generate_key();
        let sealed = crypto::encrypt(&key, &record)?;

        let mut blob = Vec::with_capacity(SYMMETRIC_KEY_SIZE + sealed.len());
        blob.extend_from_slice(&key);
        blob.extend_from_slice(&sealed);

        Ok(format!("{}{}", TAG_MESSAGE_EMBEDDED, base64_encode(&blob)))
    }

    /// Encode under the PIN-protected tier (`GLY1P:`).
    ///
    /// The key is derived from the PIN and a fresh salt; the salt is
    /// embedded so the receiver can re-derive with the same PIN.
    pub fn encode_with_pin(&self, pin: &str) -> Result<String, EnvelopeError> {
        let record = bincode::serialize(self).map_err(|_| EnvelopeError::Serialization)?;
        let salt = crypto::generate_salt();
        let key = crypto::derive_key(pin, &salt)?;
        let sealed = crypto::encrypt(&key, &record)?;

        let mut blob = Vec::with_capacity(SALT_SIZE + sealed.len());
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&sealed);

        Ok(format!("{}{}", TAG_MESSAGE_PIN, base64_encode(&blob)))
    }

    /// Decode a payload without a PIN.
    ///
    /// Handles `GLY1:` and `GLY1E:`. Returns `None` for PIN-protected
    /// payloads, unknown tags, malformed base64, truncated blobs and failed
    /// authentication, deliberately without saying which; a wrong guess
    /// learns nothing.
    pub fn decode(payload: &str) -> Option<Message> {
        match Envelope::parse(payload)? {
            Envelope::Plain(record) => bincode::deserialize(&record).ok(),
            Envelope::EmbeddedKey(blob) => {
                if blob.len() < SYMMETRIC_KEY_SIZE {
                    return None;
                }
                let (key_bytes, sealed) = blob.split_at(SYMMETRIC_KEY_SIZE);
                let mut key = [0u8; SYMMETRIC_KEY_SIZE];
                key.copy_from_slice(key_bytes);

                let record = crypto::decrypt(&key, sealed).ok()?;
                bincode::deserialize(&record).ok()
            }
            // Never openable without a PIN, by contract.
            Envelope::PinProtected(_) => None,
        }
    }

    /// Decode a payload, supplying a PIN for the `GLY1P:` tier.
    ///
    /// A wrong PIN derives a wrong key and fails the authentication tag,
    /// yielding `None` exactly like malformed input. For the other tiers
    /// the PIN is ignored and the no-PIN path applies.
    pub fn decode_with_pin(payload: &str, pin: &str) -> Option<Message> {
        match Envelope::parse(payload)? {
            Envelope::PinProtected(blob) => {
                if blob.len() < SALT_SIZE {
                    return None;
                }
                let (salt, sealed) = blob.split_at(SALT_SIZE);
                let key = crypto::derive_key(pin, salt).ok()?;

                let record = crypto::decrypt(&key, sealed).ok()?;
                bincode::deserialize(&record).ok()
            }
            _ => Self::decode(payload),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification predicates (pure string checks, no crypto)
// ---------------------------------------------------------------------------

/// True iff the string is a message payload of any tier.
pub fn is_message(s: &str) -> bool {
    s.starts_with(TAG_MESSAGE_PLAIN)
        || s.starts_with(TAG_MESSAGE_EMBEDDED)
        || s.starts_with(TAG_MESSAGE_PIN)
}

/// True iff the string is an embedded-key encrypted message (`GLY1E:`).
pub fn is_encrypted_message(s: &str) -> bool {
    s.starts_with(TAG_MESSAGE_EMBEDDED)
}

/// True iff the string is a PIN-protected message (`GLY1P:`).
pub fn is_pin_protected_message(s: &str) -> bool {
    s.starts_with(TAG_MESSAGE_PIN)
}

/// True iff the string carries any PIN-tier object: messages plus the
/// sibling kinds (contact card, wallet, recording) that share the
/// convention. Siblings stay opaque here; only their tag is known.
pub fn is_pin_protected(s: &str) -> bool {
    PIN_TIER_TAGS.iter().any(|tag| s.starts_with(tag))
}

/// True iff the string is the marketing QR pointing at the landing page,
/// as printed on posters and stickers. Case-insensitive, with or without
/// a trailing slash.
pub fn is_logo_qr(s: &str) -> bool {
    let lowered = s.trim().to_ascii_lowercase();
    let lowered = lowered.strip_suffix('/').unwrap_or(&lowered);
    lowered == LOGO_URL
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn base64_encode(data: &[u8]) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    STANDARD.encode(data)
}

fn base64_decode(s: &str) -> Option<Vec<u8>> {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    STANDARD.decode(s.trim()).ok()
}
