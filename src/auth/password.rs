//! auth::password
//!
//! PBKDF2-HMAC-SHA256 password hashes.
//!
//! # Format
//!
//! `pbkdf2:sha256:<iterations>$<salt>$<digest-hex>`, the layout werkzeug's
//! `generate_password_hash` writes, so hashes made by either tool verify
//! with the other. The salt is used as its UTF-8 bytes. When the iteration
//! count is left out, [`DEFAULT_ITERATIONS`] applies.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use super::errors::AuthError;

const METHOD: &str = "pbkdf2";
const DIGEST: &str = "sha256";
const DIGEST_LEN: usize = 32;

/// Iteration count for new hashes and for encoded hashes that omit one.
pub const DEFAULT_ITERATIONS: u32 = 600_000;

/// A parsed password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    iterations: u32,
    salt: String,
    digest: [u8; DIGEST_LEN],
}

impl PasswordHash {
    /// Hash a password with a fresh random salt and [`DEFAULT_ITERATIONS`].
    pub fn generate(password: &str) -> Self {
        let salt = uuid::Uuid::new_v4().simple().to_string();
        let digest = derive_key(password, &salt, DEFAULT_ITERATIONS);
        Self {
            iterations: DEFAULT_ITERATIONS,
            salt,
            digest,
        }
    }

    /// Hash a password with an explicit salt and iteration count.
    pub fn derive(password: &str, salt: &str, iterations: u32) -> Result<Self, AuthError> {
        check_salt(salt)?;
        if iterations == 0 {
            return Err(AuthError::MalformedHash(
                "iteration count must be positive".into(),
            ));
        }
        Ok(Self {
            iterations,
            salt: salt.to_string(),
            digest: derive_key(password, salt, iterations),
        })
    }

    /// Parse the `pbkdf2:sha256[:<iterations>]$<salt>$<digest>` form.
    pub fn parse(encoded: &str) -> Result<Self, AuthError> {
        let mut parts = encoded.splitn(3, '$');
        let (Some(method), Some(salt), Some(digest)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::MalformedHash(
                "expected pbkdf2:sha256:<iterations>$<salt>$<digest>".into(),
            ));
        };

        let mut fields = method.split(':');
        let iterations = match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(METHOD), Some(DIGEST), None, None) => DEFAULT_ITERATIONS,
            (Some(METHOD), Some(DIGEST), Some(count), None) => count
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    AuthError::MalformedHash(format!("bad iteration count '{count}'"))
                })?,
            _ => {
                return Err(AuthError::MalformedHash(format!(
                    "unsupported method '{method}'"
                )))
            }
        };

        check_salt(salt)?;

        let digest: [u8; DIGEST_LEN] = hex::decode(digest)
            .map_err(|_| AuthError::MalformedHash("digest is not hex".into()))?
            .try_into()
            .map_err(|_| AuthError::MalformedHash(format!("digest must be {DIGEST_LEN} bytes")))?;

        Ok(Self {
            iterations,
            salt: salt.to_string(),
            digest,
        })
    }

    /// Check a candidate password.
    ///
    /// The digest comparison does not short-circuit.
    pub fn verify(&self, password: &str) -> bool {
        let candidate = derive_key(password, &self.salt, self.iterations);
        candidate
            .iter()
            .zip(self.digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

fn derive_key(password: &str, salt: &str, iterations: u32) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut out);
    out
}

fn check_salt(salt: &str) -> Result<(), AuthError> {
    if salt.is_empty() {
        return Err(AuthError::MalformedHash("salt is empty".into()));
    }
    if salt.contains('$') {
        return Err(AuthError::MalformedHash("salt must not contain '$'".into()));
    }
    Ok(())
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}${}${}",
            METHOD,
            DIGEST,
            self.iterations,
            self.salt,
            hex::encode(self.digest)
        )
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("iterations", &self.iterations)
            .field("digest", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference digest from Python's hashlib.pbkdf2_hmac, the primitive
    // werkzeug builds on.
    const KNOWN: &str = "pbkdf2:sha256:1000$Xy7pQ2rTz9LmN4vB$\
        7bb7e11437315f3ed8255cc5cd18ade03fbab6b79d17ed24f9569fca14b39e74";

    fn quick(password: &str) -> PasswordHash {
        PasswordHash::derive(password, "testsalt", 1_000).unwrap()
    }

    #[test]
    fn generate_then_verify() {
        let hash = PasswordHash::generate("admin123");
        assert!(hash.to_string().starts_with("pbkdf2:sha256:600000$"));
        assert!(hash.verify("admin123"));
    }

    #[test]
    fn known_werkzeug_hash_verifies() {
        let hash = PasswordHash::parse(KNOWN).unwrap();
        assert!(hash.verify("admin123"));
        assert!(!hash.verify("admin124"));
        assert!(!hash.verify(""));
    }

    #[test]
    fn derive_matches_known_digest() {
        let hash = PasswordHash::derive("admin123", "Xy7pQ2rTz9LmN4vB", 1_000).unwrap();
        assert_eq!(hash.to_string(), KNOWN);
    }

    #[test]
    fn display_parses_back() {
        let hash = quick("admin123");
        let parsed = PasswordHash::parse(&hash.to_string()).unwrap();
        assert_eq!(parsed, hash);
        assert!(parsed.verify("admin123"));
    }

    #[test]
    fn iterations_are_part_of_the_hash() {
        let a = PasswordHash::derive("pw", "salt", 1_000).unwrap();
        let b = PasswordHash::derive("pw", "salt", 1_001).unwrap();
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn missing_iteration_count_uses_default() {
        let encoded = format!("pbkdf2:sha256$salt${}", "00".repeat(DIGEST_LEN));
        let hash = PasswordHash::parse(&encoded).unwrap();
        assert_eq!(hash.iterations, DEFAULT_ITERATIONS);
        assert!(hash.to_string().starts_with("pbkdf2:sha256:600000$salt$"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = uuid::Uuid::new_v4().simple().to_string();
        let b = uuid::Uuid::new_v4().simple().to_string();
        assert_ne!(
            PasswordHash::derive("same", &a, 1_000).unwrap(),
            PasswordHash::derive("same", &b, 1_000).unwrap()
        );
    }

    #[test]
    fn parse_rejects_bad_input() {
        let zeros = "00".repeat(DIGEST_LEN);
        assert!(PasswordHash::parse("plaintext").is_err());
        assert!(PasswordHash::parse(&format!("sha256$abc${zeros}")).is_err());
        assert!(PasswordHash::parse(&format!("scrypt:32768:8:1$abc${zeros}")).is_err());
        assert!(PasswordHash::parse(&format!("pbkdf2:sha1:1000$abc${zeros}")).is_err());
        assert!(PasswordHash::parse(&format!("pbkdf2:sha256:0$abc${zeros}")).is_err());
        assert!(PasswordHash::parse(&format!("pbkdf2:sha256:many$abc${zeros}")).is_err());
        assert!(PasswordHash::parse(&format!("pbkdf2:sha256:1000$${zeros}")).is_err());
        assert!(PasswordHash::parse("pbkdf2:sha256:1000$abc$zz").is_err());
        assert!(PasswordHash::parse("pbkdf2:sha256:1000$abc$00").is_err());
        assert!(PasswordHash::parse(&format!("{KNOWN}$extra")).is_err());
    }

    #[test]
    fn derive_rejects_bad_parameters() {
        assert!(PasswordHash::derive("pw", "salt", 0).is_err());
        assert!(PasswordHash::derive("pw", "", 1_000).is_err());
    }

    #[test]
    fn debug_redacts_digest() {
        let hash = quick("pw");
        let debug = format!("{:?}", hash);
        assert!(debug.contains("redacted"));
        assert!(!debug.contains(&hex::encode(hash.digest)));
    }
}
