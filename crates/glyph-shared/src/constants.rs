/// Application name
pub const APP_NAME: &str = "Glyph";

/// Wire tag for legacy plaintext message payloads
pub const TAG_MESSAGE_PLAIN: &str = "GLY1:";

/// Wire tag for embedded-key encrypted message payloads
pub const TAG_MESSAGE_EMBEDDED: &str = "GLY1E:";

/// Wire tag for PIN-protected message payloads
pub const TAG_MESSAGE_PIN: &str = "GLY1P:";

/// Wire tag for PIN-protected contact cards
pub const TAG_CARD_PIN: &str = "GLYCARD1P:";

/// Wire tag for PIN-protected wallet payloads
pub const TAG_WALLET_PIN: &str = "GLYWALLET1P:";

/// Wire tag for PIN-protected voice recordings
pub const TAG_RECORDING_PIN: &str = "GLYREC1P:";

/// Every tag that carries a PIN-derived key, messages and sibling kinds alike
pub const PIN_TIER_TAGS: [&str; 4] = [
    TAG_MESSAGE_PIN,
    TAG_CARD_PIN,
    TAG_WALLET_PIN,
    TAG_RECORDING_PIN,
];

/// Landing page encoded in the marketing QR posters (not a message payload)
pub const LOGO_URL: &str = "https://glyphapp.io";

/// XChaCha20-Poly1305 nonce size in bytes
pub const NONCE_SIZE: usize = 24;

/// Symmetric key size in bytes (for XChaCha20-Poly1305)
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// KDF salt size in bytes
pub const SALT_SIZE: usize = 32;

/// Argon2id memory cost in KiB (19 MiB)
pub const KDF_M_COST_KIB: u32 = 19_456;

/// Argon2id iteration count
pub const KDF_T_COST: u32 = 2;

/// Argon2id lane count
pub const KDF_P_COST: u32 = 1;

/// `expiration_seconds` wire sentinel: read-once
pub const EXPIRATION_READ_ONCE: i64 = -1;

/// `expiration_seconds` wire sentinel: never expires
pub const EXPIRATION_FOREVER: i64 = -2;

/// Capacity of a single version-40 QR code in binary mode, error correction L.
/// Payloads above this need the external chunking transport.
pub const MAX_SINGLE_QR_BYTES: usize = 2_953;
