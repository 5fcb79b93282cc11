use crate::error::ConfigError;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Icon packs and rendering policy, loaded once and read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Configured packs keyed by pack name
    pub icons: BTreeMap<String, PackConfig>,
    /// What `render_icon` does when an icon file is missing
    #[serde(default)]
    pub missing_icon: MissingIconPolicy,
    /// Optional webpack-style `manifest.json` used by packs with `webpack = true`
    #[serde(default)]
    pub manifest: Option<PathBuf>,
}

/// One named source directory of SVG icons.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackConfig {
    /// Sub-directory of `base_dir` holding the icons; the manifest key prefix when `webpack` is set
    pub icon_dir: String,
    /// Base directory of public site assets
    pub base_dir: String,
    #[serde(default, deserialize_with = "dimension")]
    pub width: Option<String>,
    #[serde(default, deserialize_with = "dimension")]
    pub height: Option<String>,
    /// Resolve filenames through the asset manifest
    #[serde(default)]
    pub webpack: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingIconPolicy {
    /// Render a placeholder glyph instead of failing the page
    #[default]
    Fallback,
    /// Propagate [`IconError::IconNotFound`](crate::IconError::IconNotFound)
    Error,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn pack(&self, name: &str) -> Option<&PackConfig> {
        self.icons.get(name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.icons.is_empty() {
            return Err(ConfigError::NoPacks);
        }

        for (name, pack) in &self.icons {
            for (field, value) in [("icon_dir", &pack.icon_dir), ("base_dir", &pack.base_dir)] {
                if value.trim().is_empty() {
                    return Err(ConfigError::EmptyField {
                        pack: name.clone(),
                        field,
                    });
                }
            }
        }

        Ok(())
    }
}

impl PackConfig {
    /// Pack-level `width`/`height` overrides, in that order, skipping unset ones
    pub fn dimensions(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [("width", &self.width), ("height", &self.height)]
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
    }
}

/// Accept `width = "24"` as well as `width = 24`.
fn dimension<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    }))
}
