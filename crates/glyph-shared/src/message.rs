use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::constants::{EXPIRATION_FOREVER, EXPIRATION_READ_ONCE};

/// How a message stops being viewable.
///
/// On the wire this is a single signed integer (`-1` read-once, `-2`
/// forever, `n > 0` a viewing window in seconds); internally the sentinel
/// values never leak past [`Expiration::from_seconds`] /
/// [`Expiration::as_seconds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// Blockable after exactly one successful scan.
    ReadOnce,
    /// Never blocked, never windowed.
    Forever,
    /// Viewing window in seconds from first reveal; advisory to the UI.
    Timed(i64),
}

impl Expiration {
    pub fn from_seconds(secs: i64) -> Self {
        match secs {
            EXPIRATION_READ_ONCE => Self::ReadOnce,
            s if s > 0 => Self::Timed(s),
            // -2, plus any malformed non-positive value a buggy sender
            // produced. Forever is the only mode that cannot lock content.
            _ => Self::Forever,
        }
    }

    pub fn as_seconds(&self) -> i64 {
        match self {
            Self::ReadOnce => EXPIRATION_READ_ONCE,
            Self::Forever => EXPIRATION_FOREVER,
            Self::Timed(s) => *s,
        }
    }
}

// The wire and the database both see the sentinel integer, nothing else.
impl Serialize for Expiration {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_i64(self.as_seconds())
    }
}

impl<'de> Deserialize<'de> for Expiration {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        Ok(Self::from_seconds(i64::deserialize(de)?))
    }
}

/// Social attribution attached by the author: an external platform plus a
/// handle on it. Display-only; this is not a cryptographic signature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialSignature {
    /// Platform name, e.g. `"instagram"`.
    pub platform: String,
    /// Handle without the leading `@`.
    pub handle: String,
}

impl SocialSignature {
    /// Build an attribution, stripping surrounding whitespace and a leading
    /// `@` from the handle.
    pub fn new(platform: impl Into<String>, handle: &str) -> Self {
        let handle = handle.trim();
        let handle = handle.strip_prefix('@').unwrap_or(handle).trim();
        Self {
            platform: platform.into(),
            handle: handle.to_string(),
        }
    }
}

/// A single Glyph message: the unit that gets encoded into a QR payload.
///
/// Identity is the `id` alone: two messages with identical content but
/// different ids are distinct, and equality never inspects content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier, assigned at creation.
    pub id: Uuid,
    /// Text body.
    pub text: Option<String>,
    /// Expiration mode (read-once / forever / timed window).
    pub expiration: Expiration,
    /// Authoring time.
    pub created_at: DateTime<Utc>,
    /// Absolute delivery deadline, independent of the expiration mode.
    pub expires_at: Option<DateTime<Utc>>,
    /// Base64-encoded image blob.
    pub image_data: Option<String>,
    /// Base64-encoded audio blob.
    pub audio_data: Option<String>,
    /// Optional social attribution of the author.
    pub signature: Option<SocialSignature>,
}

impl Message {
    /// Create a text message with a fresh id, created now.
    pub fn new(text: impl Into<String>, expiration: Expiration) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: Some(text.into()),
            expiration,
            created_at: Utc::now(),
            expires_at: None,
            image_data: None,
            audio_data: None,
            signature: None,
        }
    }

    /// True iff the message carries media, in which case the encoded payload
    /// likely exceeds a single QR code and the chunking transport applies.
    pub fn needs_batching(&self) -> bool {
        self.image_data.is_some() || self.audio_data.is_some()
    }

    /// True iff an absolute delivery deadline is set and has passed.
    /// Without a deadline a message never expires by window.
    pub fn is_window_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => deadline < Utc::now(),
            None => false,
        }
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Message {}

impl std::hash::Hash for Message {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
