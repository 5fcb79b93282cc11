//! Merging of default, document, pack and caller presentation attributes.
//!
//! Every layer overlays the previous one key by key, so the last value written for a key wins.
//! A key keeps the position where it was first inserted.

use crate::config::PackConfig;
use crate::svg_parser::IconDocument;
use indexmap::IndexMap;

/// Ordered attribute or style mapping
pub type Attributes = IndexMap<String, String>;

/// Attributes every icon starts from
pub const DEFAULT_ATTRIBUTES: [(&str, &str); 3] =
    [("width", "16"), ("height", "16"), ("viewBox", "0 0 16 16")];

/// Styles every icon starts from
pub const DEFAULT_STYLES: [(&str, &str); 1] = [("fill", "currentColor")];

/// Presentation attributes that have an equivalent CSS property
const STYLE_ATTRIBUTES: &[&str] = &[
    // font
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    // text
    "direction",
    "letter-spacing",
    "text-decoration",
    "unicode-bidi",
    "word-spacing",
    // viewports
    "clip",
    "color",
    "cursor",
    "display",
    "overflow",
    "visibility",
    // clipping, masking, compositing
    "clip-path",
    "clip-rule",
    "mask",
    "opacity",
    // filter effects
    "enable-background",
    "filter",
    "flood-color",
    "flood-opacity",
    "lighting-color",
    // gradients
    "stop-color",
    "stop-opacity",
    // interactivity
    "pointer-events",
    // color and painting
    "color-interpolation",
    "color-interpolation-filters",
    "color-profile",
    "color-rendering",
    "fill",
    "fill-opacity",
    "fill-rule",
    "image-rendering",
    "marker",
    "marker-end",
    "marker-mid",
    "marker-start",
    "shape-rendering",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "text-rendering",
    // text
    "alignment-baseline",
    "baseline-shift",
    "dominant-baseline",
    "glyph-orientation-horizontal",
    "glyph-orientation-vertical",
    "kerning",
    "text-anchor",
    "writing-mode",
];

/// Presentation attributes whose unitless value means pixels
const LENGTH_STYLE_ATTRIBUTES: &[&str] = &["font-size", "letter-spacing", "word-spacing"];

pub fn is_style_attribute(name: &str) -> bool {
    STYLE_ATTRIBUTES.contains(&name)
}

/// Convert a presentation attribute value to its style declaration value.
///
/// Unitless lengths gain a `px` unit; everything else passes through unchanged.
pub fn convert_style_attribute(name: &str, value: &str) -> String {
    let trimmed = value.trim();
    if LENGTH_STYLE_ATTRIBUTES.contains(&name) && trimmed.parse::<f64>().is_ok() {
        format!("{trimmed}px")
    } else {
        value.to_string()
    }
}

/// Final attribute and style mappings for one icon
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Presentation {
    pub attributes: Attributes,
    pub styles: Attributes,
}

/// Compute the final mappings.
///
/// Attributes: defaults, then the document's own, then the pack's `width`/`height`, then the
/// caller's. Styles: defaults, then the document's own, then the caller's.
pub fn merge(
    document: &IconDocument,
    pack: Option<&PackConfig>,
    attributes: &Attributes,
    styles: &Attributes,
) -> Presentation {
    let mut merged_attributes = defaults(&DEFAULT_ATTRIBUTES);
    overlay(&mut merged_attributes, document.attributes());
    if let Some(pack) = pack {
        overlay(
            &mut merged_attributes,
            pack.dimensions().map(|(k, v)| (k.to_string(), v.to_string())),
        );
    }
    overlay(&mut merged_attributes, attributes);

    let mut merged_styles = defaults(&DEFAULT_STYLES);
    overlay(&mut merged_styles, document.styles());
    overlay(&mut merged_styles, styles);

    Presentation {
        attributes: merged_attributes,
        styles: merged_styles,
    }
}

/// Write merged mappings onto the document's root tag.
///
/// The literal `style` key is skipped and style-capable attributes are set as styles.
/// Styles are applied after attributes, so the style mapping wins for a shared key.
pub fn apply(document: &mut IconDocument, presentation: &Presentation) {
    for (name, value) in &presentation.attributes {
        if name == "style" {
            continue;
        }

        if is_style_attribute(name) {
            document.set_style(name.as_str(), convert_style_attribute(name, value));
            continue;
        }

        document.set_attribute(name.as_str(), value.as_str());
    }

    for (name, value) in &presentation.styles {
        document.set_style(name.as_str(), value.as_str());
    }
}

/// Merge and apply in one step
pub fn merge_into(
    document: &mut IconDocument,
    pack: Option<&PackConfig>,
    attributes: &Attributes,
    styles: &Attributes,
) -> Presentation {
    let presentation = merge(document, pack, attributes, styles);
    apply(document, &presentation);
    presentation
}

fn defaults(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn overlay<I, K, V>(target: &mut Attributes, layer: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    for (key, value) in layer {
        target.insert(key.into(), value.into());
    }
}
