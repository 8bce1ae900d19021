//! User-Password hiding (RFC 2865 Section 5.2)
//!
//! The password is padded to a multiple of 16 bytes and XORed with a keystream of
//! MD5 digests. The first block uses MD5(secret + authenticator); every following
//! block uses MD5(secret + previous ciphertext block), in both directions.
//!
//! MD5 is kept only because the wire format requires it.

use thiserror::Error;

/// Keystream block size (one MD5 digest)
pub const BLOCK_SIZE: usize = 16;
/// Longest password RFC 2865 allows in a User-Password attribute
pub const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("Encrypted password length {0} is not a multiple of 16")]
    InvalidLength(usize),
    #[error("Password too long: {0} bytes (max 128)")]
    PasswordTooLong(usize),
}

fn keystream_block(secret: &[u8], salt: &[u8]) -> [u8; BLOCK_SIZE] {
    let mut context = md5::Context::new();
    context.consume(secret);
    context.consume(salt);
    context.compute().0
}

/// Hide a plaintext password for transmission.
///
/// An empty password still produces one 16-byte block.
pub fn encrypt(
    password: &[u8],
    secret: &[u8],
    authenticator: &[u8; 16],
) -> Result<Vec<u8>, CipherError> {
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(CipherError::PasswordTooLong(password.len()));
    }

    let blocks = password.len().div_ceil(BLOCK_SIZE).max(1);
    let mut padded = password.to_vec();
    padded.resize(blocks * BLOCK_SIZE, 0);

    let mut result = Vec::with_capacity(padded.len());
    let mut salt = *authenticator;

    for chunk in padded.chunks(BLOCK_SIZE) {
        let hash = keystream_block(secret, &salt);
        for (i, byte) in chunk.iter().enumerate() {
            salt[i] = byte ^ hash[i];
        }
        result.extend_from_slice(&salt);
    }

    Ok(result)
}

/// Recover a password hidden with [`encrypt`].
///
/// Trailing NUL padding is stripped. An empty input yields an empty password.
pub fn decrypt(
    encrypted: &[u8],
    secret: &[u8],
    authenticator: &[u8; 16],
) -> Result<Vec<u8>, CipherError> {
    if encrypted.len() % BLOCK_SIZE != 0 {
        return Err(CipherError::InvalidLength(encrypted.len()));
    }

    let mut result = Vec::with_capacity(encrypted.len());
    let mut salt: &[u8] = authenticator;

    for chunk in encrypted.chunks(BLOCK_SIZE) {
        let hash = keystream_block(secret, salt);
        result.extend(chunk.iter().zip(hash.iter()).map(|(c, k)| c ^ k));
        // Chaining uses the ciphertext, not the recovered plaintext.
        salt = chunk;
    }

    while result.last() == Some(&0) {
        result.pop();
    }

    Ok(result)
}
