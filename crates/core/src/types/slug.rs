//! URL slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `a-z`, `0-9` and `-`.
    #[error("slug may only contain lowercase letters, digits and hyphens")]
    InvalidCharacter,
    /// The input starts or ends with a hyphen.
    #[error("slug cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A URL-safe identifier for a product or category.
///
/// Slugs appear in public URLs (`/products/slug/gopro-hero6-4k-action-camera`)
/// and must be unique within their collection.
///
/// ## Constraints
///
/// - Length: 1-120 characters
/// - Only lowercase ASCII letters, digits and hyphens
/// - Must not start or end with a hyphen
///
/// ## Examples
///
/// ```
/// use clementine_core::Slug;
///
/// assert!(Slug::parse("mens-long-sleeve-tshirt").is_ok());
/// assert!(Slug::parse("").is_err());          // empty
/// assert!(Slug::parse("Bad Slug").is_err());  // spaces, uppercase
/// assert!(Slug::parse("-leading").is_err());  // edge hyphen
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 120;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 120 characters
    /// - Contains anything other than `a-z`, `0-9`, `-`
    /// - Starts or ends with a hyphen
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return Err(SlugError::InvalidCharacter);
        }

        if s.starts_with('-') || s.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_slugs() {
        assert!(Slug::parse("electronics").is_ok());
        assert!(Slug::parse("home-outdoor").is_ok());
        assert!(Slug::parse("gopro-hero6-4k-action-camera").is_ok());
        assert!(Slug::parse("a").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Slug::parse(""), Err(SlugError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(121);
        assert!(matches!(Slug::parse(&long), Err(SlugError::TooLong { .. })));
    }

    #[test]
    fn test_parse_invalid_characters() {
        assert!(matches!(
            Slug::parse("Has Uppercase"),
            Err(SlugError::InvalidCharacter)
        ));
        assert!(matches!(
            Slug::parse("under_score"),
            Err(SlugError::InvalidCharacter)
        ));
        assert!(matches!(
            Slug::parse("caf\u{e9}"),
            Err(SlugError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_parse_edge_hyphens() {
        assert!(matches!(Slug::parse("-leading"), Err(SlugError::EdgeHyphen)));
        assert!(matches!(
            Slug::parse("trailing-"),
            Err(SlugError::EdgeHyphen)
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let slug = Slug::parse("smartphones").unwrap();
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"smartphones\"");

        let parsed: Slug = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, slug);
    }
}
