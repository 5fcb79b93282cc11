use crate::attributes::{merge_into, Attributes};
use crate::config::{Config, MissingIconPolicy};
use crate::error::{ConfigError, IconError};
use crate::manifest::{AssetResolver, JsonManifest, PlainAssets};
use crate::resolver::IconResolver;
use crate::svg_parser::IconDocument;

/// Markup rendered in place of an icon whose file is missing.
pub const FALLBACK_ICON: &str = r#"<svg style="width:24px;height:24px" viewBox="0 0 24 24"><path fill="currentColor" d="M13 14H11V9H13M13 18H11V16H13M1 21H23L12 2L1 21Z" /></svg>"#;

/// Loads icons from the configured packs and renders them as inline markup.
///
/// Holds only read-only configuration; every call parses its own document.
pub struct SvgIcon {
    config: Config,
    assets: Box<dyn AssetResolver>,
}

impl SvgIcon {
    /// Build the service, loading the asset manifest named in the config if there is one
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let assets: Box<dyn AssetResolver> = match &config.manifest {
            Some(path) => {
                let manifest = JsonManifest::load(path)?;
                tracing::debug!(path = %path.display(), entries = manifest.len(), "loaded asset manifest");
                Box::new(manifest)
            }
            None => Box::new(PlainAssets),
        };

        Ok(Self { config, assets })
    }

    pub fn with_assets(config: Config, assets: impl AssetResolver + 'static) -> Self {
        Self {
            config,
            assets: Box::new(assets),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> IconResolver<'_> {
        IconResolver::new(&self.config, self.assets.as_ref())
    }

    /// Locate, parse and merge an icon.
    pub fn load_svg(
        &self,
        pack: &str,
        name: &str,
        attributes: &Attributes,
        styles: &Attributes,
    ) -> Result<IconDocument, IconError> {
        let icon = self.resolver().resolve(pack, name)?;
        let mut document = IconDocument::load(&icon.path)?;
        merge_into(&mut document, Some(icon.pack), attributes, styles);
        Ok(document)
    }

    /// Render an icon as inline markup, without an XML declaration.
    pub fn render_icon(
        &self,
        pack: &str,
        name: &str,
        attributes: &Attributes,
        styles: &Attributes,
    ) -> Result<String, IconError> {
        self.render(pack, name, attributes, styles, false)
    }

    /// Render an icon as markup, optionally with an XML declaration.
    ///
    /// A missing icon file renders [`FALLBACK_ICON`] unless the config sets
    /// `missing_icon = "error"`. Unknown packs and unparsable files always fail.
    pub fn render(
        &self,
        pack: &str,
        name: &str,
        attributes: &Attributes,
        styles: &Attributes,
        include_header: bool,
    ) -> Result<String, IconError> {
        match self.load_svg(pack, name, attributes, styles) {
            Ok(document) => Ok(document.to_xml_string(include_header)),
            Err(err @ IconError::IconNotFound { .. })
                if self.config.missing_icon == MissingIconPolicy::Fallback =>
            {
                tracing::warn!(error = %err, "rendering fallback icon");
                Ok(FALLBACK_ICON.to_string())
            }
            Err(err) => Err(err),
        }
    }
}
