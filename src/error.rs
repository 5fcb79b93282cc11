use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single icon resolution call.
#[derive(Debug, Error)]
pub enum IconError {
    /// The requested pack is not present in the configuration.
    #[error("icon pack \"{0}\" is not configured")]
    PackNotFound(String),

    /// The computed filesystem path does not exist.
    #[error(
        "could not find icon file for \"{name}\" in \"{pack}\" package, path calculated as \"{}\"",
        path.display()
    )]
    IconNotFound {
        pack: String,
        name: String,
        path: PathBuf,
    },

    /// The file exists but is not a usable SVG document.
    #[error("failed to parse SVG icon {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why icon content could not be turned into an [`IconDocument`](crate::IconDocument).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Svg(#[from] usvg::Error),

    #[error("content is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("malformed markup: {0}")]
    Markup(String),

    #[error("document has no root element")]
    MissingRoot,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("at least one icon pack must be configured")]
    NoPacks,

    #[error("icon pack \"{pack}\": `{field}` cannot be empty")]
    EmptyField { pack: String, field: &'static str },

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read asset manifest {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid asset manifest {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
