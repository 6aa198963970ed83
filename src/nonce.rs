//! Client nonce generation

use crate::Result;
use rand::rngs::OsRng;
use rand::RngCore;

/// Random bytes per cnonce; rendered as twice as many hex characters
pub const CNONCE_BYTES: usize = 8;

/// Generate a fresh client nonce from the operating system's secure random source.
///
/// # Errors
/// `RandomSource` if the source can't supply the full byte count.
pub fn generate_cnonce() -> Result<String> {
    cnonce_from(&mut OsRng)
}

/// Generate a client nonce using the given generator
pub fn cnonce_from<R: RngCore + ?Sized>(rng: &mut R) -> Result<String> {
    let mut bytes = [0u8; CNONCE_BYTES];
    rng.try_fill_bytes(&mut bytes)?;
    Ok(hex::encode(bytes))
}
