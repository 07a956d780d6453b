//! Secret fingerprinting.
//!
//! Operators compare the logged fingerprint across replicas to confirm they
//! share a signing secret without the secret ever reaching the logs.

use sha2::{Digest, Sha256};

use super::TokenSecret;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the secret's SHA-256 digest as lowercase hex.
#[must_use]
pub fn secret_fingerprint(secret: &TokenSecret) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use zeroize::Zeroizing;

    fn secret(byte: u8) -> TokenSecret {
        TokenSecret(Zeroizing::new(vec![byte; 32]))
    }

    #[rstest]
    fn fingerprint_is_short_lowercase_hex() {
        let fp = secret_fingerprint(&secret(b'a'));
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp, fp.to_lowercase());
    }

    #[rstest]
    fn fingerprint_tracks_secret_contents() {
        assert_eq!(secret_fingerprint(&secret(b'a')), secret_fingerprint(&secret(b'a')));
        assert_ne!(secret_fingerprint(&secret(b'a')), secret_fingerprint(&secret(b'b')));
    }
}
