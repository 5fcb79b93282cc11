use crate::error::ManifestError;
use std::collections::HashMap;
use std::path::Path;

/// Maps a logical asset path to its public URL.
pub trait AssetResolver: Send + Sync {
    fn url(&self, logical_path: &str) -> String;
}

/// Serves assets under their logical path, without versioning.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainAssets;

impl AssetResolver for PlainAssets {
    fn url(&self, logical_path: &str) -> String {
        logical_path.to_string()
    }
}

/// A webpack-style `manifest.json`: `{ "icons/home.svg": "/build/icons/home.3f2a1c.svg" }`.
#[derive(Debug, Clone, Default)]
pub struct JsonManifest {
    entries: HashMap<String, String>,
}

impl JsonManifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let entries = serde_json::from_str(&content).map_err(|source| ManifestError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for JsonManifest {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl AssetResolver for JsonManifest {
    fn url(&self, logical_path: &str) -> String {
        match self.entries.get(logical_path) {
            Some(url) => url.clone(),
            None => {
                tracing::debug!(logical_path, "asset not in manifest, using logical path");
                logical_path.to_string()
            }
        }
    }
}

/// Final path segment of a URL or path, without query string or fragment.
pub fn file_name_from_url(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = url[..end].trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}
