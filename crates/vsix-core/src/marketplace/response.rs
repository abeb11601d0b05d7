//! Query response shape and version selection.
//!
//! Only the nested path `results[0].extensions[0].versions[0].version` is
//! consulted. The gallery orders versions newest-first; we trust that
//! ordering instead of sorting by semver, matching the original tool.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub extensions: Vec<ExtensionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ExtensionEntry {
    #[serde(default)]
    pub versions: Vec<VersionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct VersionEntry {
    #[serde(default)]
    pub version: Option<String>,
}

/// Parse the raw query response body.
pub fn parse_query_response(body: &[u8]) -> Result<QueryResponse, serde_json::Error> {
    serde_json::from_slice(body)
}

/// First version of the first extension of the first result, if present.
/// An empty version string counts as absent.
pub fn first_version(resp: &QueryResponse) -> Option<&str> {
    let version = resp
        .results
        .first()?
        .extensions
        .first()?
        .versions
        .first()?
        .version
        .as_deref()?;
    if version.is_empty() {
        None
    } else {
        Some(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> QueryResponse {
        parse_query_response(body.as_bytes()).unwrap()
    }

    #[test]
    fn picks_first_of_each_list() {
        let resp = parse(
            r#"{"results":[{"extensions":[{"versions":[
                {"version":"2.0.0"},{"version":"1.0.0"}
            ]},{"versions":[{"version":"9.9.9"}]}]}]}"#,
        );
        assert_eq!(first_version(&resp), Some("2.0.0"));
    }

    #[test]
    fn empty_results_is_none() {
        assert_eq!(first_version(&parse(r#"{"results":[]}"#)), None);
    }

    #[test]
    fn missing_results_is_none() {
        assert_eq!(first_version(&parse(r#"{}"#)), None);
    }

    #[test]
    fn empty_extensions_is_none() {
        assert_eq!(
            first_version(&parse(r#"{"results":[{"extensions":[]}]}"#)),
            None
        );
    }

    #[test]
    fn empty_versions_is_none() {
        assert_eq!(
            first_version(&parse(r#"{"results":[{"extensions":[{"versions":[]}]}]}"#)),
            None
        );
    }

    #[test]
    fn absent_version_field_is_none() {
        assert_eq!(
            first_version(&parse(r#"{"results":[{"extensions":[{"versions":[{}]}]}]}"#)),
            None
        );
    }

    #[test]
    fn empty_version_string_is_none() {
        assert_eq!(
            first_version(&parse(
                r#"{"results":[{"extensions":[{"versions":[{"version":""}]}]}]}"#
            )),
            None
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        let resp = parse(
            r#"{"results":[{"extensions":[{"publisher":{"publisherName":"x"},
                "versions":[{"version":"1.2.3","files":[]}]}],
                "resultMetadata":[]}]}"#,
        );
        assert_eq!(first_version(&resp), Some("1.2.3"));
    }

    #[test]
    fn non_json_body_fails() {
        assert!(parse_query_response(b"<html>oops</html>").is_err());
    }
}
