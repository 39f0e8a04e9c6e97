//! Unsplash access key value object.

use std::fmt;

/// Provider API credential with validation and masking.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey {
    value: String,
}

impl AccessKey {
    /// Creates a key, rejecting empty values and embedded whitespace.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();

        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self { value })
    }

    /// Returns key as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked key for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.value.chars().collect();
        if chars.len() <= 10 {
            return "*".repeat(chars.len());
        }

        let visible_prefix: String = chars[..4].iter().collect();
        let visible_suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessKey")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "yMx72xpmPgx00U6YSBrDPtELZ9KJV48ZIm";

    #[test]
    fn test_valid_key_is_trimmed() {
        let key = AccessKey::new(format!("  {KEY}\n")).unwrap();
        assert_eq!(key.as_str(), KEY);
    }

    #[test]
    fn test_rejects_blank_and_spaced_keys() {
        assert!(AccessKey::new("   ").is_none());
        assert!(AccessKey::new("abc def").is_none());
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let key = AccessKey::new(KEY).unwrap();
        let debug_output = format!("{key:?}");

        assert!(debug_output.contains("..."));
        assert!(!debug_output.contains(KEY));
    }

    #[test]
    fn test_short_key_fully_masked() {
        let key = AccessKey::new("abc").unwrap();
        assert_eq!(key.masked(), "***");
    }

    #[test]
    fn test_masking_counts_characters_not_bytes() {
        let short = AccessKey::new("€€€€€").unwrap();
        assert_eq!(format!("{short}"), "*****");

        let long = AccessKey::new("ключ-доступа-€42").unwrap();
        assert_eq!(long.masked(), "ключ...-€42");
    }
}
