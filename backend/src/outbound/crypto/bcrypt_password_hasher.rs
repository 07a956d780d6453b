//! bcrypt-backed `PasswordHasher`.
//!
//! Hashing is CPU bound; callers run it on the blocking pool. A decoy hash is
//! computed once at construction so logins for unknown users cost the same
//! as logins with a wrong password.
//!
//! bcrypt reads at most [`PASSWORD_MAX_BYTES`](crate::domain::PASSWORD_MAX_BYTES)
//! bytes of input; registration rejects longer passwords before they get here.

use rand::RngCore;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Lowest work factor bcrypt accepts. Only suitable for tests.
pub const BCRYPT_MIN_COST: u32 = 4;

/// bcrypt password hasher with a fixed work factor.
///
/// # Examples
/// ```
/// use backend::domain::ports::PasswordHasher;
/// use backend::outbound::crypto::{BCRYPT_MIN_COST, BcryptPasswordHasher};
///
/// let hasher = BcryptPasswordHasher::new(BCRYPT_MIN_COST).unwrap();
/// let hash = hasher.hash("hunter2").unwrap();
/// assert!(hasher.verify("hunter2", &hash).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
    decoy: PasswordHash,
}

impl BcryptPasswordHasher {
    /// Build a hasher, precomputing the decoy hash at the same cost.
    pub fn new(cost: u32) -> Result<Self, PasswordHasherError> {
        let mut seed = [0_u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        let decoy = hash_with_cost(&hex::encode(seed), cost)?;
        Ok(Self { cost, decoy })
    }

    /// Hasher using bcrypt's default work factor.
    pub fn with_default_cost() -> Result<Self, PasswordHasherError> {
        Self::new(bcrypt::DEFAULT_COST)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

fn hash_with_cost(password: &str, cost: u32) -> Result<PasswordHash, PasswordHasherError> {
    bcrypt::hash(password, cost)
        .map(PasswordHash::new)
        .map_err(|err| PasswordHasherError::hashing(err.to_string()))
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        hash_with_cost(password, self.cost)
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        bcrypt::verify(password, hash.as_str())
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))
    }

    fn decoy(&self) -> PasswordHash {
        self.decoy.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(BCRYPT_MIN_COST).expect("hasher builds")
    }

    #[rstest]
    fn hashes_verify_only_the_original_password(hasher: BcryptPasswordHasher) {
        let hash = hasher.hash("hunter2").expect("hash");
        assert_ne!(hash.as_str(), "hunter2");
        assert!(hasher.verify("hunter2", &hash).expect("verify"));
        assert!(!hasher.verify("hunter3", &hash).expect("verify"));
    }

    #[rstest]
    fn decoy_rejects_ordinary_passwords(hasher: BcryptPasswordHasher) {
        let decoy = hasher.decoy();
        assert!(!hasher.verify("hunter2", &decoy).expect("verify"));
        assert_eq!(decoy, hasher.decoy());
    }

    #[rstest]
    fn invalid_cost_is_a_hashing_error() {
        let err = BcryptPasswordHasher::new(BCRYPT_MIN_COST - 1).expect_err("cost too low");
        assert!(matches!(err, PasswordHasherError::Hashing { .. }));
    }

    #[rstest]
    fn corrupt_hash_is_a_hashing_error(hasher: BcryptPasswordHasher) {
        let err = hasher
            .verify("hunter2", &PasswordHash::new("not-a-bcrypt-hash"))
            .expect_err("corrupt hash");
        assert!(matches!(err, PasswordHasherError::Hashing { .. }));
    }
}
