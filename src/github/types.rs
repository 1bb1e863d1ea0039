//! Wire types for the release-hosting REST API.

use serde::{Deserialize, Serialize};

/// A release record as returned by the service
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRelease {
    /// Release ID
    pub id: u64,
    /// Tag the release is keyed by
    pub tag_name: String,
    /// Display name, when set
    pub name: Option<String>,
    /// Commitish the release was cut from
    pub target_commitish: String,
    /// Whether the release is an unpublished draft
    pub draft: bool,
    /// Whether the release is marked as a prerelease
    pub prerelease: bool,
    /// Hypermedia upload endpoint; trim with [`upload_endpoint`] before use
    pub upload_url: String,
    /// Canonical page URL
    pub html_url: String,
    /// Currently attached assets
    #[serde(default)]
    pub assets: Vec<RemoteAsset>,
}

/// An asset attached to a remote release; identity key is `name`
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAsset {
    /// Asset ID
    pub id: u64,
    /// Asset name, unique within the release
    pub name: String,
}

/// An asset record returned by the upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedAsset {
    /// Asset ID
    pub id: u64,
    /// Asset name
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Public download URL
    pub browser_download_url: String,
}

/// A tag reference and the object it points at
#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    /// Fully qualified ref name (`refs/tags/...`)
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Target object
    pub object: RefObject,
}

/// Target object of a reference
#[derive(Debug, Clone, Deserialize)]
pub struct RefObject {
    /// Commit SHA the ref resolves to
    pub sha: String,
    /// Object type reported by the service
    #[serde(rename = "type")]
    pub kind: String,
}

/// Payload for creating a release
#[derive(Debug, Clone, Serialize)]
pub struct NewRelease {
    /// Tag to key the release by
    pub tag_name: String,
    /// Display name
    pub name: String,
    /// Commitish to cut from; omitted so the service picks its default branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
    /// Create as a draft
    pub draft: bool,
    /// Mark as a prerelease
    pub prerelease: bool,
    /// Ask the service to generate release notes
    pub generate_release_notes: bool,
}

/// Payload for updating an existing release
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseUpdate {
    /// Tag to key the release by
    pub tag_name: String,
    /// Commitish the release should point at
    pub target_commitish: String,
    /// Draft flag
    pub draft: bool,
    /// Prerelease flag
    pub prerelease: bool,
}

/// Trim the hypermedia template marker from an advertised upload URL.
///
/// The service returns `.../assets{?name,label}`; everything from the first
/// `{` is template syntax, not part of the endpoint.
pub fn upload_endpoint(raw: &str) -> &str {
    match raw.find('{') {
        Some(pos) => &raw[..pos],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_marker_is_trimmed() {
        assert_eq!(
            upload_endpoint("https://uploads.example/releases/1/assets{?name,label}"),
            "https://uploads.example/releases/1/assets"
        );
    }

    #[test]
    fn plain_urls_pass_through() {
        assert_eq!(
            upload_endpoint("https://uploads.example/releases/1/assets"),
            "https://uploads.example/releases/1/assets"
        );
    }

    #[test]
    fn release_deserializes_from_service_shape() {
        let json = r#"{
            "id": 42,
            "tag_name": "v1.2.3",
            "name": null,
            "target_commitish": "main",
            "draft": false,
            "prerelease": true,
            "upload_url": "https://uploads.example/releases/42/assets{?name,label}",
            "html_url": "https://example.com/releases/v1.2.3",
            "assets": [{"id": 7, "name": "a.zip", "label": "ignored"}]
        }"#;

        let release: RemoteRelease = serde_json::from_str(json).expect("deserialize");
        assert_eq!(release.id, 42);
        assert!(release.name.is_none());
        assert!(release.prerelease);
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].name, "a.zip");
    }

    #[test]
    fn create_payload_omits_unset_commitish() {
        let payload = NewRelease {
            tag_name: "v1".to_string(),
            name: "v1".to_string(),
            target_commitish: None,
            draft: false,
            prerelease: false,
            generate_release_notes: true,
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert!(json.get("target_commitish").is_none());
        assert_eq!(json["generate_release_notes"], true);
    }
}
