use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Shortest code the registry accepts.
pub const MIN_LENGTH: usize = 6;
/// Longest code the registry accepts.
pub const MAX_LENGTH: usize = 8;

/// A validated short code identifying a link.
///
/// Codes are 6-8 characters drawn from `[A-Za-z0-9]` and are case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a new `ShortCode` after trimming and validating the input.
    pub fn new(code: impl AsRef<str>) -> std::result::Result<Self, RegistryError> {
        let code = code.as_ref().trim();
        Self::validate(code)?;
        Ok(Self(code.to_owned()))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (the code generator, or rows read back from a store).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> std::result::Result<(), RegistryError> {
        let len = code.chars().count();
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&len) {
            return Err(RegistryError::InvalidCode(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH, MAX_LENGTH, len
            )));
        }

        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(RegistryError::InvalidCode(format!(
                "must contain only ASCII letters and digits: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ShortCode {
    type Error = RegistryError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortCode> for String {
    fn from(value: ShortCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("abc123").is_ok());
        assert!(ShortCode::new("AbC1234").is_ok());
        assert!(ShortCode::new("Z".repeat(8)).is_ok());
    }

    #[test]
    fn too_short() {
        assert!(ShortCode::new("ab").is_err());
        assert!(ShortCode::new("abcde").is_err());
        assert!(ShortCode::new("").is_err());
    }

    #[test]
    fn too_long() {
        assert!(ShortCode::new("a".repeat(9)).is_err());
        assert!(ShortCode::new("existing1").is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::new("abc def").is_err());
        assert!(ShortCode::new("abc-def").is_err());
        assert!(ShortCode::new("abc_def").is_err());
        assert!(ShortCode::new("abcdé1").is_err());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let code = ShortCode::new("  abc123\n").unwrap();
        assert_eq!(code.as_str(), "abc123");
    }

    #[test]
    fn codes_are_case_sensitive() {
        let lower = ShortCode::new("abcdef").unwrap();
        let upper = ShortCode::new("ABCDEF").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn deserialize_rejects_invalid_codes() {
        let ok: ShortCode = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(ok.as_str(), "abc123");

        assert!(serde_json::from_str::<ShortCode>("\"ab\"").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let code = ShortCode::new("abc123").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"abc123\"");
    }
}
