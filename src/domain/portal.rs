//! Portal capability tokens
//!
//! A token is a bearer capability binding an anonymous portal client to one
//! pending reservation: anyone holding it may view or complete that
//! reservation, so it must be unguessable and non-enumerable. Only the
//! SHA-256 hash is stored at rest; the raw token is shown exactly once.

use rand::Rng;

/// Token prefix for identification
const TOKEN_PREFIX: &str = "prt_";

/// A freshly issued capability token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The full token (only shown once!)
    pub token: String,
    /// Hash stored on the pending reservation
    pub token_hash: String,
}

/// Generate a new portal token: `prt_<32 random hex chars>`.
///
/// 16 random bytes from the thread-local CSPRNG; not sequential and not
/// derivable from the reservation id.
pub fn issue_token() -> IssuedToken {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 16] = rng.gen();
    let token = format!("{}{}", TOKEN_PREFIX, hex::encode(random_bytes));
    let token_hash = hash_token(&token);
    IssuedToken { token, token_hash }
}

/// Hash a token for storage using SHA-256
pub fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_has_prefix_and_random_part() {
        let issued = issue_token();
        assert!(issued.token.starts_with(TOKEN_PREFIX));
        assert_eq!(issued.token.len(), TOKEN_PREFIX.len() + 32);
    }

    #[test]
    fn tokens_are_unique() {
        let a = issue_token();
        let b = issue_token();
        assert_ne!(a.token, b.token);
        assert_ne!(a.token_hash, b.token_hash);
    }

    #[test]
    fn stored_hash_matches_rehash_of_raw_token() {
        let issued = issue_token();
        assert_eq!(hash_token(&issued.token), issued.token_hash);
    }

    #[test]
    fn hash_is_not_the_token() {
        let issued = issue_token();
        assert_ne!(issued.token, issued.token_hash);
        assert_eq!(issued.token_hash.len(), 64); // sha256 hex
    }
}
