// src/auth/token.rs
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

const SESSION_TOKEN_BYTES: usize = 32;

/// SHA-256 of a session cookie value; the only form kept in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenHash([u8; 32]);

impl TokenHash {
    pub fn of(raw_token: &str) -> Self {
        let mut out = [0u8; 32];
        out.copy_from_slice(&Sha256::digest(raw_token.as_bytes()));
        Self(out)
    }
}

/// A fresh cookie value and its hash.
pub fn issue_session_token() -> (String, TokenHash) {
    issue_with(&mut OsRng)
}

pub fn issue_with<R: RngCore>(rng: &mut R) -> (String, TokenHash) {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    rng.fill_bytes(&mut bytes);

    let raw = URL_SAFE_NO_PAD.encode(bytes);
    let hash = TokenHash::of(&raw);
    (raw, hash)
}
