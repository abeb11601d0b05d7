//! Marketplace gallery API: endpoints, query payload and response shape.

mod response;

pub use response::{first_version, parse_query_response, QueryResponse};

use crate::ident::ExtensionIdentifier;

/// Criteria filter type for an exact `publisher.extension` name match.
const FILTER_EXACT_NAME: u32 = 7;
/// Query flags requesting version and file metadata in the response.
const QUERY_FLAGS: u32 = 914;

/// Asset name of the installable package in the gallery CDN.
const VSIX_ASSET: &str = "Microsoft.VisualStudio.Services.VSIXPackage";

/// Gallery API locations. Overridable so tests can point at a local server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Base of the gallery query/publisher API.
    pub gallery_base: String,
    /// Host suffix of the per-publisher asset CDN
    /// (`{publisher}.{cdn_host}` serves the default asset endpoint).
    pub cdn_host: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            gallery_base: "https://marketplace.visualstudio.com/_apis/public/gallery".to_string(),
            cdn_host: "gallery.vsassets.io".to_string(),
        }
    }
}

impl Endpoints {
    /// Extension query endpoint (POST).
    pub fn query_url(&self) -> String {
        format!("{}/extensionquery", self.gallery_base)
    }

    /// Platform-qualified vspackage endpoint, used when a target platform
    /// is requested. The platform value is query-encoded.
    pub fn platform_asset_url(
        &self,
        id: &ExtensionIdentifier,
        version: &str,
        platform: &str,
    ) -> String {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("targetPlatform", platform)
            .finish();
        format!(
            "{}/publishers/{}/vsextensions/{}/{}/vspackage?{}",
            self.gallery_base,
            id.publisher(),
            id.name(),
            version,
            query
        )
    }

    /// Default publisher-hosted CDN asset endpoint.
    pub fn cdn_asset_url(&self, id: &ExtensionIdentifier, version: &str) -> String {
        format!(
            "https://{publisher}.{host}/_apis/public/gallery/publisher/{publisher}/extension/{name}/{version}/assetbyname/{asset}",
            publisher = id.publisher(),
            host = self.cdn_host,
            name = id.name(),
            version = version,
            asset = VSIX_ASSET,
        )
    }
}

/// JSON body for the extension query call.
pub fn query_payload(id: &ExtensionIdentifier) -> String {
    serde_json::json!({
        "filters": [{
            "criteria": [
                { "filterType": FILTER_EXACT_NAME, "value": id.full_id() }
            ]
        }],
        "flags": QUERY_FLAGS,
    })
    .to_string()
}

/// Headers for the extension query call (curl sets the User-Agent).
pub fn query_headers() -> [(&'static str, &'static str); 2] {
    [
        ("Content-Type", "application/json"),
        ("Accept", "application/json;api-version=3.0-preview.1"),
    ]
}
