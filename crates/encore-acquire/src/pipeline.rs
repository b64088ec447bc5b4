//! The acquisition orchestration: resolve a manifest variant, then pull
//! named records out of it content-addressed.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use encore_manifest::{self as manifest, VersionKey};
use tracing::{debug, warn};

use crate::cache::ArtifactCache;
use crate::config::AcquireConfig;
use crate::db::ManifestDb;
use crate::error::{AcquireError, Result};
use crate::fs::{atomic_write, set_mtime};
use crate::net::RemoteTransport;

/// Orchestrates manifest resolution and record acquisition against an
/// injected transport.
///
/// Steps within one operation are strictly sequential; independent
/// operations may run concurrently against the same pipeline. Concurrent
/// cache misses for one key do duplicate work rather than coordinate; the
/// atomic cache write makes that a waste, not a hazard.
pub struct AcquisitionPipeline<T: RemoteTransport> {
    transport: T,
    config: AcquireConfig,
    cache: ArtifactCache,
}

impl<T: RemoteTransport> AcquisitionPipeline<T> {
    pub fn new(transport: T, config: AcquireConfig) -> std::io::Result<Self> {
        let cache = ArtifactCache::open(&config.cache_dir)?;
        Ok(Self {
            transport,
            config,
            cache,
        })
    }

    /// The artifact cache, exposed for administrative invalidation.
    pub fn cache(&self) -> &ArtifactCache {
        &self.cache
    }

    /// The injected transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve the manifest variant for `key` and open it as a queryable
    /// database.
    ///
    /// A cache hit never touches the network. On a miss: fetch the
    /// meta-manifest index, select the variant, fetch its blob, decode the
    /// container, cache the image, open it. Nothing is cached on any
    /// failure path. A failed cache write degrades to a scratch-file
    /// handle rather than failing the caller.
    pub async fn resolve_manifest(&self, key: &VersionKey) -> Result<ManifestDb> {
        if let Some(path) = self.cache.get(key) {
            debug!(key = %key.cache_name(), "manifest cache hit");
            return ManifestDb::open(path).map_err(Into::into);
        }
        debug!(key = %key.cache_name(), "manifest cache miss");

        let headers = self.config.acquisition_headers();

        let index_url = self.config.meta_manifest_url(key.resource_version());
        let index = self.fetch(&index_url, &headers).await?;
        let index_text =
            std::str::from_utf8(&index.bytes).map_err(|_| AcquireError::IndexNotText)?;

        let records = manifest::parse(index_text).map_err(AcquireError::MalformedIndex)?;
        if records.is_empty() {
            return Err(AcquireError::EmptyIndex);
        }

        let record = manifest::select(
            &records,
            key.platform(),
            key.asset_quality(),
            key.sound_quality(),
        )
        .ok_or_else(|| AcquireError::VariantNotFound {
            platform: key.platform().to_string(),
            asset_quality: key.asset_quality().to_string(),
            sound_quality: key.sound_quality().to_string(),
        })?;
        debug!(filename = %record.filename, "selected manifest variant");

        let blob_url = self
            .config
            .manifest_url(key.resource_version(), &record.filename);
        let blob = self.fetch(&blob_url, &headers).await?;
        let decoded = encore_container::decode(&blob.bytes)?;

        match self.cache.put(key, &decoded) {
            Ok(path) => ManifestDb::open(path).map_err(Into::into),
            Err(err) => {
                // Best effort: the response must not depend on cache
                // durability. The cache stays cold for next time.
                warn!(error = %err, "artifact cache write failed; serving from scratch file");
                let mut scratch = tempfile::NamedTempFile::new()?;
                scratch.write_all(&decoded)?;
                ManifestDb::open_scratch(scratch.into_temp_path()).map_err(Into::into)
            }
        }
    }

    /// Fetch the named record's payload out of a resolved manifest and
    /// persist it at `dest` with its provenance mtime.
    pub async fn acquire_named_record(
        &self,
        manifest: &ManifestDb,
        record_name: &str,
        dest: &Path,
    ) -> Result<PathBuf> {
        let entry = manifest
            .lookup(record_name)?
            .ok_or_else(|| AcquireError::RecordNotFound(record_name.to_string()))?;

        // Content-addressed: the hash's first two characters shard the
        // storage path.
        let prefix = entry
            .hash
            .get(0..2)
            .ok_or_else(|| AcquireError::MalformedHash(entry.hash.clone()))?;
        let url = self.config.content_url(prefix, &entry.hash);

        let body = self
            .fetch(&url, &self.config.acquisition_headers())
            .await?;
        let decoded = encore_container::decode(&body.bytes)?;

        atomic_write(dest, &decoded)?;

        // Load-bearing provenance: downstream freshness checks compare
        // this mtime, so the server's Last-Modified wins over the local
        // filesystem default whenever it parsed.
        let mtime = body
            .last_modified
            .map(SystemTime::from)
            .unwrap_or_else(SystemTime::now);
        set_mtime(dest, mtime)?;

        debug!(
            record = record_name,
            dest = %dest.display(),
            bytes = decoded.len(),
            "acquired named record"
        );
        Ok(dest.to_path_buf())
    }

    async fn fetch(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<crate::net::FetchedBody> {
        self.transport
            .fetch(url, headers)
            .await
            .map_err(|e| AcquireError::Transport(e.to_string()))
    }
}
