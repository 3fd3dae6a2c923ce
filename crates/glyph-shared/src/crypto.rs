use argon2::{Algorithm, Argon2, Params, Version};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use rand::RngCore;

use crate::constants::{
    KDF_M_COST_KIB, KDF_P_COST, KDF_T_COST, NONCE_SIZE, SALT_SIZE, SYMMETRIC_KEY_SIZE,
};
use crate::error::CryptoError;

pub type SymmetricKey = [u8; SYMMETRIC_KEY_SIZE];

pub fn generate_key() -> SymmetricKey {
    let mut key = [0u8; SYMMETRIC_KEY_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut key);
    key
}

pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

pub fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce);
    nonce
}

pub fn key_to_hex(key: &SymmetricKey) -> String {
    hex::encode(key)
}

// Rejects anything that does not decode to exactly 32 bytes; keys are
// never truncated or padded.
pub fn key_from_hex(s: &str) -> Option<SymmetricKey> {
    let bytes = hex::decode(s.trim()).ok()?;
    if bytes.len() != SYMMETRIC_KEY_SIZE {
        return None;
    }
    let mut key = [0u8; SYMMETRIC_KEY_SIZE];
    key.copy_from_slice(&bytes);
    Some(key)
}

// Seals with a fresh random nonce; output is nonce || ciphertext.
pub fn encrypt(key: &SymmetricKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = XChaCha20Poly1305::new(key.into());
    let nonce_bytes = generate_nonce();
    let nonce = XNonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CryptoError::EncryptionFailed)?;

    let mut output = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    output.extend_from_slice(&nonce_bytes);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

pub fn decrypt(key: &SymmetricKey, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.len() < NONCE_SIZE {
        return Err(CryptoError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = data.split_at(NONCE_SIZE);
    let cipher = XChaCha20Poly1305::new(key.into());
    let nonce = XNonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}

// Argon2id with pinned parameters. The params are part of the wire format:
// changing them breaks every PIN-protected payload already in the wild.
pub fn derive_key(pin: &str, salt: &[u8]) -> Result<SymmetricKey, CryptoError> {
    let params = Params::new(
        KDF_M_COST_KIB,
        KDF_T_COST,
        KDF_P_COST,
        Some(SYMMETRIC_KEY_SIZE),
    )
    .map_err(|_| CryptoError::KeyDerivationFailed)?;

    let mut key = [0u8; SYMMETRIC_KEY_SIZE];
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password_into(pin.as_bytes(), salt, &mut key)
        .map_err(|_| CryptoError::KeyDerivationFailed)?;
    Ok(key)
}

// BLAKE3 hex fingerprint of a payload string. The scan ledger keys on this
// instead of the raw payload so media-heavy payloads are not copied into it.
pub fn hash_payload(payload: &str) -> String {
    blake3::hash(payload.as_bytes()).to_hex().to_string()
}
