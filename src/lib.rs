//! Inline SVG icons for server-rendered templates.
//!
//! An icon is looked up by pack and name, read from disk (optionally through a webpack asset
//! manifest), and its root `<svg>` tag is rewritten with merged presentation attributes:
//!
//! ```no_run
//! use svg_icon::{Attributes, Config, SvgIcon};
//!
//! let config = Config::load("svg_icon.toml".as_ref())?;
//! let icons = SvgIcon::new(config)?;
//!
//! let mut attributes = Attributes::new();
//! attributes.insert("class".into(), "icon".into());
//!
//! let markup = icons.render_icon("mdi", "home", &attributes, &Attributes::new())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod attributes;
mod config;
mod error;
mod icon;
pub mod manifest;
mod resolver;
mod svg_parser;

pub use attributes::{Attributes, Presentation};
pub use config::{Config, MissingIconPolicy, PackConfig};
pub use error::{ConfigError, IconError, ManifestError, ParseError};
pub use icon::{SvgIcon, FALLBACK_ICON};
pub use manifest::{AssetResolver, JsonManifest, PlainAssets};
pub use resolver::{IconResolver, ResolvedIcon};
pub use svg_parser::IconDocument;
