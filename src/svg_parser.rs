use crate::attributes::{convert_style_attribute, is_style_attribute, Attributes};
use crate::error::{IconError, ParseError};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;
use usvg::{Options, Tree};

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

/// A parsed SVG icon whose root tag can be rewritten.
///
/// Only the root element is modelled: its attributes and inline styles live in ordered maps,
/// everything inside it is kept as the source markup.
#[derive(Debug, Clone, PartialEq)]
pub struct IconDocument {
    /// Qualified name of the root element, normally `svg`
    root_name: String,
    attributes: Attributes,
    styles: Attributes,
    /// Markup between the root start tag and the end of the root end tag; `None` for `<svg/>`
    body: Option<String>,
}

impl IconDocument {
    /// Read and parse an SVG file
    pub fn load(path: &Path) -> Result<Self, IconError> {
        let bytes = std::fs::read(path).map_err(|source| IconError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        String::from_utf8(bytes)
            .map_err(ParseError::from)
            .and_then(|content| Self::parse(&content))
            .map_err(|source| IconError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Parse SVG markup.
    ///
    /// A root with a zero or negative `width`/`height` is accepted, since the merged
    /// dimensions replace it.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        match Tree::from_str(content, &Options::default()) {
            Ok(tree) => {
                let size = tree.size();
                tracing::trace!(width = size.width(), height = size.height(), "parsed SVG tree");
            }
            Err(usvg::Error::InvalidSize) => {
                tracing::debug!("SVG root has an invalid size, keeping it for the merge");
            }
            Err(err) => return Err(err.into()),
        }

        let mut reader = Reader::from_str(content);
        let mut depth = 0usize;
        let mut root: Option<(String, Attributes, Attributes)> = None;
        let mut body_start = 0usize;

        loop {
            let event = reader.read_event().map_err(markup_error)?;
            match event {
                Event::Start(start) if root.is_none() => {
                    root = Some(read_root(&start)?);
                    body_start = reader.buffer_position() as usize;
                    depth = 1;
                }
                Event::Empty(start) if root.is_none() => {
                    let (root_name, attributes, styles) = read_root(&start)?;
                    return Ok(Self {
                        root_name,
                        attributes,
                        styles,
                        body: None,
                    });
                }
                Event::Start(_) => depth += 1,
                Event::End(_) if root.is_some() => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Event::Eof => return Err(ParseError::MissingRoot),
                _ => {}
            }
        }

        let body_end = reader.buffer_position() as usize;
        let (root_name, attributes, styles) = root.ok_or(ParseError::MissingRoot)?;

        Ok(Self {
            root_name,
            attributes,
            styles,
            body: Some(content[body_start..body_end].to_string()),
        })
    }

    /// Root tag attributes, excluding `style` and style-capable attributes
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Inline style declarations of the root tag
    pub fn styles(&self) -> &Attributes {
        &self.styles
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn set_style(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.styles.insert(name.into(), value.into());
    }

    /// Serialize the document, optionally with an XML declaration
    pub fn to_xml_string(&self, include_header: bool) -> String {
        let mut out = String::new();

        if include_header {
            out.push_str(XML_HEADER);
        }

        out.push('<');
        out.push_str(&self.root_name);

        for (name, value) in &self.attributes {
            push_attribute(&mut out, name, value);
        }

        if !self.styles.is_empty() {
            let style = self
                .styles
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            push_attribute(&mut out, "style", &style);
        }

        match &self.body {
            Some(body) => {
                out.push('>');
                out.push_str(body);
            }
            None => out.push_str(" />"),
        }

        out
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

/// Split the root tag into its name, plain attributes and styles.
///
/// Style-capable attributes are applied first, then the `style` attribute on top of them.
fn read_root(start: &BytesStart) -> Result<(String, Attributes, Attributes), ParseError> {
    let root_name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Attributes::new();
    let mut styles = Attributes::new();
    let mut inline_style = None;

    for attr in start.attributes() {
        let attr = attr.map_err(markup_error)?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(markup_error)?.into_owned();

        if name == "style" {
            inline_style = Some(value);
        } else if is_style_attribute(&name) {
            let value = convert_style_attribute(&name, &value);
            styles.insert(name, value);
        } else {
            attributes.insert(name, value);
        }
    }

    if let Some(style) = inline_style {
        styles.extend(parse_style(&style));
    }

    Ok((root_name, attributes, styles))
}

/// Parse `fill: red; stroke: blue` into declarations, skipping malformed ones
fn parse_style(style: &str) -> impl Iterator<Item = (String, String)> + '_ {
    style.split(';').filter_map(|declaration| {
        let (name, value) = declaration.split_once(':')?;
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            return None;
        }
        Some((name.to_string(), value.to_string()))
    })
}

fn markup_error(err: impl std::fmt::Display) -> ParseError {
    ParseError::Markup(err.to_string())
}
