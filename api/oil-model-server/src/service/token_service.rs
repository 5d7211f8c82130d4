use rand::rngs::OsRng;
use rand::RngCore;

pub const TOKEN_LEN: usize = 32;

/// 256 bits from the OS generator, hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_LEN];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
