//! The password capability. Plaintext passwords enter here and leave as one-way
//! digests; nothing outside this module ever compares a plaintext directly.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// An argon2 digest in PHC string format. Not reversible to the plaintext.
#[derive(Debug, Clone)]
pub struct Digest(pub String);

pub fn hash(plaintext: &str) -> Digest {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .unwrap();
    Digest(hash.to_string())
}

pub fn verify(plaintext: &str, digest: &Digest) -> bool {
    match PasswordHash::new(&digest.0) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_verifies_the_original_plaintext_only() {
        let digest = hash("hunter2");
        assert!(verify("hunter2", &digest));
        assert!(!verify("hunter3", &digest));
    }

    #[test]
    fn digest_is_not_the_plaintext() {
        let digest = hash("hunter2");
        assert_ne!(digest.0, "hunter2");
        assert!(digest.0.starts_with("$argon2"));
    }

    #[test]
    fn malformed_digest_never_verifies() {
        assert!(!verify("hunter2", &Digest("not a phc string".to_owned())));
    }
}
