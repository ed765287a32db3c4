//! Admin credential model.
//!
//! Access to the admin endpoints is gated by a single shared secret that the
//! dashboard echoes back as a bearer credential on every call. There are no
//! sessions and no token issuance; the comparison below is the whole auth
//! model.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Error returned when constructing an [`AdminSecret`] from blank input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("admin secret must not be empty")]
pub struct EmptyAdminSecret;

/// The server-side admin secret.
///
/// The wrapped string is wiped from memory on drop and never printed; logs
/// and `Debug` output only ever see a placeholder.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AdminSecret(String);

impl AdminSecret {
    /// Validate and construct a secret from configuration input.
    pub fn new(secret: impl Into<String>) -> Result<Self, EmptyAdminSecret> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(EmptyAdminSecret);
        }
        Ok(Self(secret))
    }

    /// Generate a random throwaway secret for development builds.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Check a caller-supplied credential against the configured secret.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl std::fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminSecret(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hunter2", "hunter2", true)]
    #[case("hunter2", "hunter3", false)]
    #[case("hunter2", "", false)]
    #[case("hunter2", "Hunter2", false)]
    fn comparison_is_exact(#[case] secret: &str, #[case] candidate: &str, #[case] expected: bool) {
        let secret = AdminSecret::new(secret).expect("valid secret");
        assert_eq!(secret.matches(candidate), expected);
    }

    #[rstest]
    fn blank_secrets_are_rejected() {
        assert_eq!(AdminSecret::new("  "), Err(EmptyAdminSecret));
    }

    #[rstest]
    fn debug_output_redacts_the_value() {
        let secret = AdminSecret::new("hunter2").expect("valid secret");
        assert_eq!(format!("{secret:?}"), "AdminSecret(..)");
    }
}
