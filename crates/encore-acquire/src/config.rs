use std::path::PathBuf;

/// Environment variable overriding the client-version header value.
pub const CLIENT_VERSION_ENV: &str = "ENCORE_UNITY_VERSION";

/// Header the asset servers require on every acquisition request.
const CLIENT_VERSION_HEADER: &str = "X-Unity-Version";

/// Known-good engine build string the servers accept.
const DEFAULT_CLIENT_VERSION: &str = "5.4.5p1";

/// Endpoint bases and local paths for one acquisition pipeline.
#[derive(Debug, Clone)]
pub struct AcquireConfig {
    /// Base of the versioned manifest tree, e.g. `https://host/dl`.
    /// `{manifest_base}/{version}/manifests/...` below it.
    pub manifest_base: String,
    /// Base of the content-addressed store, e.g.
    /// `https://host/dl/resources/Generic`. Blobs live at
    /// `{content_base}/{hash[..2]}/{hash}`.
    pub content_base: String,
    /// Directory the artifact cache lives in.
    pub cache_dir: PathBuf,
    /// Value sent as `X-Unity-Version` on every fetch.
    pub client_version: String,
}

impl AcquireConfig {
    /// Build a config with the client version taken from
    /// [`CLIENT_VERSION_ENV`], falling back to the known default build.
    pub fn new(
        manifest_base: impl Into<String>,
        content_base: impl Into<String>,
        cache_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            manifest_base: manifest_base.into(),
            content_base: content_base.into(),
            cache_dir: cache_dir.into(),
            client_version: std::env::var(CLIENT_VERSION_ENV)
                .unwrap_or_else(|_| DEFAULT_CLIENT_VERSION.to_string()),
        }
    }

    /// Headers every acquisition request must carry.
    pub fn acquisition_headers(&self) -> Vec<(String, String)> {
        vec![(
            CLIENT_VERSION_HEADER.to_string(),
            self.client_version.clone(),
        )]
    }

    pub(crate) fn meta_manifest_url(&self, resource_version: &str) -> String {
        format!(
            "{}/{}/manifests/all_dbmanifest",
            self.manifest_base, resource_version
        )
    }

    pub(crate) fn manifest_url(&self, resource_version: &str, filename: &str) -> String {
        format!(
            "{}/{}/manifests/{}",
            self.manifest_base, resource_version, filename
        )
    }

    pub(crate) fn content_url(&self, prefix: &str, hash: &str) -> String {
        format!("{}/{}/{}", self.content_base, prefix, hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AcquireConfig {
        AcquireConfig {
            manifest_base: "https://assets.example/dl".into(),
            content_base: "https://assets.example/dl/resources/Generic".into(),
            cache_dir: "/tmp/unused".into(),
            client_version: "5.4.5p1".into(),
        }
    }

    #[test]
    fn test_meta_manifest_url() {
        assert_eq!(
            config().meta_manifest_url("10055500"),
            "https://assets.example/dl/10055500/manifests/all_dbmanifest"
        );
    }

    #[test]
    fn test_manifest_url() {
        assert_eq!(
            config().manifest_url("10055500", "f2.db"),
            "https://assets.example/dl/10055500/manifests/f2.db"
        );
    }

    #[test]
    fn test_content_url_is_hash_sharded() {
        assert_eq!(
            config().content_url("bb", "bbb222"),
            "https://assets.example/dl/resources/Generic/bb/bbb222"
        );
    }

    #[test]
    fn test_client_version_header() {
        let headers = config().acquisition_headers();
        assert_eq!(
            headers,
            vec![("X-Unity-Version".to_string(), "5.4.5p1".to_string())]
        );
    }
}
