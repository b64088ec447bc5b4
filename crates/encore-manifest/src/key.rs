/// Identity of one manifest variant: resource version plus the
/// platform/quality tuple it was selected for.
///
/// The key doubles as the artifact cache's filename via [`cache_name`],
/// so it is immutable once built.
///
/// [`cache_name`]: VersionKey::cache_name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionKey {
    resource_version: String,
    platform: String,
    asset_quality: String,
    sound_quality: String,
}

impl VersionKey {
    pub fn new(
        resource_version: impl Into<String>,
        platform: impl Into<String>,
        asset_quality: impl Into<String>,
        sound_quality: impl Into<String>,
    ) -> Self {
        Self {
            resource_version: resource_version.into(),
            platform: platform.into(),
            asset_quality: asset_quality.into(),
            sound_quality: sound_quality.into(),
        }
    }

    pub fn resource_version(&self) -> &str {
        &self.resource_version
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn asset_quality(&self) -> &str {
        &self.asset_quality
    }

    pub fn sound_quality(&self) -> &str {
        &self.sound_quality
    }

    /// Render the cache filename `{version}_{platform}_{asset}_{sound}`.
    ///
    /// The rendering must be injective over the four-tuple: a literal `_`
    /// inside a field would let two distinct keys collide on disk, so `%`
    /// and `_` are percent-escaped within each field before joining.
    pub fn cache_name(&self) -> String {
        [
            &self.resource_version,
            &self.platform,
            &self.asset_quality,
            &self.sound_quality,
        ]
        .map(|f| escape_field(f))
        .join("_")
    }
}

fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '%' => out.push_str("%25"),
            '_' => out.push_str("%5F"),
            c => out.push(c),
        }
    }
    out
}
