//! Extension identifier parsing and validation.
//!
//! Marketplace identifiers have the form `publisher.extension`. The name
//! part may itself contain dots (`foo.bar.baz` is publisher `foo`,
//! extension `bar.baz`), so only the first dot is significant.

use thiserror::Error;

/// A validated `publisher.extension` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionIdentifier {
    publisher: String,
    name: String,
}

/// Error returned when a raw identifier cannot be split into
/// a non-empty publisher and a non-empty extension name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid extension identifier: {raw}. Use the form publisher.extension")]
pub struct InvalidIdentifier {
    /// The (trimmed) input that failed validation.
    pub raw: String,
}

impl ExtensionIdentifier {
    /// Parses a raw identifier, trimming surrounding whitespace and
    /// splitting on the first `.` only.
    pub fn parse(raw: &str) -> Result<Self, InvalidIdentifier> {
        let trimmed = raw.trim();
        match trimmed.split_once('.') {
            Some((publisher, name)) if !publisher.is_empty() && !name.is_empty() => Ok(Self {
                publisher: publisher.to_string(),
                name: name.to_string(),
            }),
            _ => Err(InvalidIdentifier {
                raw: trimmed.to_string(),
            }),
        }
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full `publisher.extension` form.
    pub fn full_id(&self) -> String {
        format!("{}.{}", self.publisher, self.name)
    }
}

impl std::fmt::Display for ExtensionIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.publisher, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_identifier() {
        let id = ExtensionIdentifier::parse("ms-python.python").unwrap();
        assert_eq!(id.publisher(), "ms-python");
        assert_eq!(id.name(), "python");
        assert_eq!(id.full_id(), "ms-python.python");
    }

    #[test]
    fn splits_on_first_dot_only() {
        let id = ExtensionIdentifier::parse("foo.bar.baz").unwrap();
        assert_eq!(id.publisher(), "foo");
        assert_eq!(id.name(), "bar.baz");
    }

    #[test]
    fn trims_whitespace() {
        let id = ExtensionIdentifier::parse("  pub.ext \n").unwrap();
        assert_eq!(id.publisher(), "pub");
        assert_eq!(id.name(), "ext");
    }

    #[test]
    fn no_separator_rejected() {
        let err = ExtensionIdentifier::parse("nodot").unwrap_err();
        assert_eq!(err.raw, "nodot");
    }

    #[test]
    fn empty_publisher_rejected() {
        assert!(ExtensionIdentifier::parse(".name").is_err());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(ExtensionIdentifier::parse("pub.").is_err());
    }

    #[test]
    fn empty_and_whitespace_rejected() {
        assert!(ExtensionIdentifier::parse("").is_err());
        assert!(ExtensionIdentifier::parse("   ").is_err());
        assert!(ExtensionIdentifier::parse(".").is_err());
    }

    #[test]
    fn error_message_names_the_input() {
        let err = ExtensionIdentifier::parse(" nodot ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid extension identifier: nodot. Use the form publisher.extension"
        );
    }
}
