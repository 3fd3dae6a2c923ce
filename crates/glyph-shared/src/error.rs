use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlyphError {
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),
}

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed: invalid ciphertext or wrong key")]
    DecryptionFailed,

    #[error("Key derivation failed")]
    KeyDerivationFailed,
}

#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("Message serialization failed")]
    Serialization,

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
