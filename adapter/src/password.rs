use shared::error::AppResult;

pub fn hash_password(raw: &str) -> AppResult<String> {
    Ok(bcrypt::hash(raw, bcrypt::DEFAULT_COST)?)
}

/// A stored hash that cannot be parsed counts as a mismatch rather
/// than an error, so a corrupted row degrades to a failed login.
pub fn verify_password(raw: &str, hash: &str) -> bool {
    bcrypt::verify(raw, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies() -> anyhow::Result<()> {
        let hash = hash_password("open sesame")?;
        assert!(verify_password("open sesame", &hash));
        Ok(())
    }

    #[test]
    fn wrong_password_does_not_verify() -> anyhow::Result<()> {
        let hash = hash_password("open sesame")?;
        assert!(!verify_password("open Sesame", &hash));
        assert!(!verify_password("", &hash));
        Ok(())
    }

    #[test]
    fn malformed_hash_is_a_mismatch_not_a_panic() {
        assert!(!verify_password("open sesame", "not-a-bcrypt-hash"));
        assert!(!verify_password("open sesame", ""));
    }

    #[test]
    fn hashes_are_salted() -> anyhow::Result<()> {
        let a = hash_password("open sesame")?;
        let b = hash_password("open sesame")?;
        assert_ne!(a, b);
        Ok(())
    }
}
