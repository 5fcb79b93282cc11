use crate::config::{Config, PackConfig};
use crate::error::IconError;
use crate::manifest::{file_name_from_url, AssetResolver};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// An icon located on disk, not yet parsed.
#[derive(Debug, Clone)]
pub struct ResolvedIcon<'a> {
    pub pack_name: String,
    pub name: String,
    pub pack: &'a PackConfig,
    pub path: PathBuf,
}

/// Turns `(pack, icon name)` into a filesystem path.
pub struct IconResolver<'a> {
    config: &'a Config,
    assets: &'a dyn AssetResolver,
}

impl<'a> IconResolver<'a> {
    pub fn new(config: &'a Config, assets: &'a dyn AssetResolver) -> Self {
        Self { config, assets }
    }

    pub fn resolve(&self, pack_name: &str, name: &str) -> Result<ResolvedIcon<'a>, IconError> {
        let pack = self
            .config
            .pack(pack_name)
            .ok_or_else(|| IconError::PackNotFound(pack_name.to_string()))?;

        let path = self.icon_path(pack, name);
        tracing::debug!(pack = pack_name, icon = name, path = %path.display(), "resolved icon path");

        if name.is_empty() || !path.is_file() {
            return Err(IconError::IconNotFound {
                pack: pack_name.to_string(),
                name: name.to_string(),
                path,
            });
        }

        Ok(ResolvedIcon {
            pack_name: pack_name.to_string(),
            name: name.to_string(),
            pack,
            path,
        })
    }

    fn icon_path(&self, pack: &PackConfig, name: &str) -> PathBuf {
        let icon = format!("{}/{}.svg", pack.icon_dir, name);

        if pack.webpack {
            // Only the filename of the public URL is kept; the directory comes from the config.
            let url = self.assets.url(&icon);
            let filename = file_name_from_url(&url);
            tracing::debug!(logical = %icon, %url, "rewrote icon through asset manifest");
            PathBuf::from(format!("{}/{}/{}", pack.base_dir, pack.icon_dir, filename))
        } else {
            PathBuf::from(format!("{}/{}", pack.base_dir, icon))
        }
    }

    /// Icon names (file stems) available in a pack's directory, sorted.
    pub fn available_icons(&self, pack_name: &str) -> Result<Vec<String>, IconError> {
        let pack = self
            .config
            .pack(pack_name)
            .ok_or_else(|| IconError::PackNotFound(pack_name.to_string()))?;

        let dir = Path::new(&pack.base_dir).join(&pack.icon_dir);
        let mut names = Vec::new();

        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| IconError::Io {
                path: dir.clone(),
                source: e.into(),
            })?;

            let path = entry.path();
            let is_svg = path.extension().map(|ext| ext == "svg").unwrap_or(false);
            if !entry.file_type().is_file() || !is_svg {
                continue;
            }

            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{JsonManifest, PlainAssets};
    use std::fs;

    const ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M0 0h24v24H0z"/></svg>"#;

    fn config_for(base: &Path, webpack: bool) -> Config {
        Config::from_toml_str(&format!(
            r#"
            [icons.mdi]
            icon_dir = "icons/mdi"
            base_dir = '{}'
            webpack = {}
            "#,
            base.display(),
            webpack
        ))
        .unwrap()
    }

    #[test]
    fn test_resolve_plain_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("icons/mdi")).unwrap();
        fs::write(dir.path().join("icons/mdi/home.svg"), ICON).unwrap();

        let config = config_for(dir.path(), false);
        let resolver = IconResolver::new(&config, &PlainAssets);
        let icon = resolver.resolve("mdi", "home").unwrap();

        assert_eq!(
            icon.path,
            PathBuf::from(format!("{}/icons/mdi/home.svg", dir.path().display()))
        );
        assert_eq!(icon.pack.icon_dir, "icons/mdi");
        assert_eq!(icon.pack_name, "mdi");
        assert_eq!(icon.name, "home");
    }

    #[test]
    fn test_resolve_through_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("icons/mdi")).unwrap();
        fs::write(dir.path().join("icons/mdi/home.5e1f.svg"), ICON).unwrap();

        let manifest: JsonManifest = [(
            "icons/mdi/home.svg".to_string(),
            "/build/icons/mdi/home.5e1f.svg".to_string(),
        )]
        .into_iter()
        .collect();

        let config = config_for(dir.path(), true);
        let resolver = IconResolver::new(&config, &manifest);
        let icon = resolver.resolve("mdi", "home").unwrap();

        assert_eq!(icon.path.file_name().unwrap(), "home.5e1f.svg");
        assert_eq!(
            icon.path,
            PathBuf::from(format!("{}/icons/mdi/home.5e1f.svg", dir.path().display()))
        );
    }

    #[test]
    fn test_unknown_pack() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), false);
        let resolver = IconResolver::new(&config, &PlainAssets);

        match resolver.resolve("fa", "home") {
            Err(IconError::PackNotFound(pack)) => assert_eq!(pack, "fa"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_icon() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), false);
        let resolver = IconResolver::new(&config, &PlainAssets);

        match resolver.resolve("mdi", "nope") {
            Err(IconError::IconNotFound { pack, name, path }) => {
                assert_eq!(pack, "mdi");
                assert_eq!(name, "nope");
                assert!(path.ends_with("icons/mdi/nope.svg"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_icon_name_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("icons/mdi")).unwrap();
        fs::write(dir.path().join("icons/mdi/.svg"), ICON).unwrap();

        let config = config_for(dir.path(), false);
        let resolver = IconResolver::new(&config, &PlainAssets);

        match resolver.resolve("mdi", "") {
            Err(IconError::IconNotFound { pack, name, .. }) => {
                assert_eq!(pack, "mdi");
                assert!(name.is_empty());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_manifest_entry_keeps_logical_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), true);
        let resolver = IconResolver::new(&config, &PlainAssets);

        match resolver.resolve("mdi", "home") {
            Err(IconError::IconNotFound { path, .. }) => {
                assert!(path.ends_with("icons/mdi/home.svg"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_available_icons() {
        let dir = tempfile::tempdir().unwrap();
        let icons = dir.path().join("icons/mdi");
        fs::create_dir_all(icons.join("nested")).unwrap();
        fs::write(icons.join("zoom.svg"), ICON).unwrap();
        fs::write(icons.join("home.svg"), ICON).unwrap();
        fs::write(icons.join("README.md"), "docs").unwrap();
        fs::write(icons.join("nested/deep.svg"), ICON).unwrap();

        let config = config_for(dir.path(), false);
        let resolver = IconResolver::new(&config, &PlainAssets);

        assert_eq!(resolver.available_icons("mdi").unwrap(), vec!["home", "zoom"]);
        assert!(matches!(
            resolver.available_icons("fa"),
            Err(IconError::PackNotFound(_))
        ));
    }
}
