//! Domain model structs persisted in the local scan ledger.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the UI layer over IPC.

use chrono::{DateTime, Utc};
use glyph_shared::Expiration;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Scan record
// ---------------------------------------------------------------------------

/// One ledger entry per distinct payload string ever scanned on this device.
///
/// Keyed by a fingerprint of the payload string, not the message id: the
/// read-once decision has to be made for payloads the receiver cannot (or
/// may not) decode yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanRecord {
    /// BLAKE3 hex fingerprint of the exact payload string.
    pub payload_hash: String,
    /// Expiration mode captured when the payload was first recorded.
    pub expiration: Expiration,
    /// When this payload was first scanned.
    pub first_seen: DateTime<Utc>,
    /// When this payload was most recently scanned.
    pub last_seen: DateTime<Utc>,
    /// How many times this payload has been recorded.  Monotonic; entries
    /// are never deleted by the ledger itself.
    pub scan_count: u32,
}

// ---------------------------------------------------------------------------
// Block reason
// ---------------------------------------------------------------------------

/// Why a scan is being withheld.
///
/// Distinct from a decode failure: the message could be decoded, but policy
/// says it must not be shown again.  The `Display` text is user-facing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlockReason {
    /// The payload was sent as Read Once and this device already viewed it.
    ReadOnceAlreadyViewed,
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadOnceAlreadyViewed => {
                write!(f, "This message was sent as Read Once and has already been viewed")
            }
        }
    }
}
