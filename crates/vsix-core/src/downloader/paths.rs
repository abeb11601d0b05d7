//! Cache path convention for downloaded packages.
//!
//! Presence of the file at the computed path is the entire caching
//! mechanism: no metadata, no checksum, no TTL.

use crate::ident::ExtensionIdentifier;
use std::path::{Path, PathBuf};

/// Folder used when no destination directory is configured.
pub const DEFAULT_DESTINATION: &str = "extensions";

/// `{destination}/{publisher}.{name}-{version}.vsix`
pub fn vsix_file_path(destination: &Path, id: &ExtensionIdentifier, version: &str) -> PathBuf {
    destination.join(format!(
        "{}.{}-{}.vsix",
        id.publisher(),
        id.name(),
        version
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_destination_path() {
        let id = ExtensionIdentifier::parse("ms-python.python").unwrap();
        let path = vsix_file_path(Path::new(DEFAULT_DESTINATION), &id, "2024.1.0");
        assert_eq!(
            path,
            Path::new("extensions/ms-python.python-2024.1.0.vsix")
        );
    }

    #[test]
    fn dotted_name_kept_verbatim() {
        let id = ExtensionIdentifier::parse("foo.bar.baz").unwrap();
        let path = vsix_file_path(Path::new("/tmp/out"), &id, "0.1.0");
        assert_eq!(path, Path::new("/tmp/out/foo.bar.baz-0.1.0.vsix"));
    }
}
