//! Object-key validation and image request locators.
//!
//! The image endpoint only serves keys made of `[A-Za-z0-9._/-]` that cannot
//! walk out of the collage prefix. Because `%` is outside the allowed set,
//! percent-encoded traversal sequences are rejected by the character rule.

/// Default path of the image-bytes endpoint.
pub const DEFAULT_IMAGE_ENDPOINT: &str = "/api/collage/image";

/// Reason a key was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Key is empty.
    Empty,
    /// Key contains `..`.
    Traversal,
    /// Key contains `//`.
    EmptySegment,
    /// Key starts with `/`.
    Absolute,
    /// Key contains a character outside `[A-Za-z0-9._/-]`.
    InvalidCharacter(char),
    /// Key is well formed but not listed in the current manifest.
    NotInManifest,
}

impl std::fmt::Display for KeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("key is empty"),
            Self::Traversal => f.write_str("key contains a parent-directory segment"),
            Self::EmptySegment => f.write_str("key contains an empty path segment"),
            Self::Absolute => f.write_str("key is an absolute path"),
            Self::InvalidCharacter(c) => write!(f, "key contains invalid character {c:?}"),
            Self::NotInManifest => f.write_str("key not found in manifest"),
        }
    }
}

impl std::error::Error for KeyError {}

/// Checks `key` against the image endpoint's format rules.
pub fn validate_key(key: &str) -> Result<(), KeyError> {
    if key.is_empty() {
        return Err(KeyError::Empty);
    }
    if key.contains("..") {
        return Err(KeyError::Traversal);
    }
    if key.contains("//") {
        return Err(KeyError::EmptySegment);
    }
    if key.starts_with('/') {
        return Err(KeyError::Absolute);
    }
    if let Some(c) = key.chars().find(|c| !is_key_char(*c)) {
        return Err(KeyError::InvalidCharacter(c));
    }
    Ok(())
}

/// Returns true when `key` passes [`validate_key`].
pub fn is_valid_key(key: &str) -> bool {
    validate_key(key).is_ok()
}

/// Builds `"{endpoint}?key={key}"` for a valid key.
///
/// Valid keys only contain URL-safe characters except `/`, which is
/// percent-encoded.
pub fn image_locator(endpoint: &str, key: &str) -> Result<String, KeyError> {
    validate_key(key)?;
    Ok(format!("{endpoint}?key={}", key.replace('/', "%2F")))
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/' | '-')
}
