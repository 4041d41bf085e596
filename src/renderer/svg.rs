//! Explicit dimensions for rendered SVGs
//!
//! D2 emits responsive SVGs: the root `<svg>` carries a `viewBox` but no
//! `width`/`height`, which collapses to 0x0 in static documentation viewers.
//! [`fix_dimensions`] copies the viewBox extent onto the root tag. Only the
//! root tag's attribute list is touched; the rest of the text is kept as is.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

const NUMBER: &str = r"[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?";

/// A complete viewBox value: `min-x min-y width height`
static VIEWBOX: Lazy<Regex> = Lazy::new(|| {
    let num = NUMBER;
    let sep = r"(?:\s*,\s*|\s+)";
    let pattern = format!(r"^\s*{num}{sep}{num}{sep}({num}){sep}({num})\s*$");
    Regex::new(&pattern).expect("viewBox pattern should compile")
});

/// Reasons a rendered SVG cannot be given explicit dimensions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SvgError {
    #[error("document contains no root element")]
    MissingRoot,
    #[error("root element tag is never closed")]
    UnterminatedRoot,
    #[error("root element is <{0}>, expected <svg>")]
    NotSvg(String),
    #[error("root <svg> has no parseable viewBox")]
    MissingViewBox,
}

/// Ensure the root `<svg>` tag has `width` and `height` attributes
///
/// Returns the input unchanged if the root tag already declares a `width`.
/// Otherwise appends `width="<w>" height="<h>"` taken from the viewBox.
pub fn fix_dimensions(svg: &str) -> Result<String, SvgError> {
    let tag = root_tag(svg)?;
    let tag_text = &svg[tag.clone()];
    let attrs = attributes(tag_text);

    if attrs.iter().any(|(name, _)| *name == "width") {
        return Ok(svg.to_string());
    }

    let view_box = attrs
        .iter()
        .find(|(name, _)| *name == "viewBox")
        .map(|(_, value)| *value)
        .ok_or(SvgError::MissingViewBox)?;
    let caps = VIEWBOX.captures(view_box).ok_or(SvgError::MissingViewBox)?;
    let size = format!(r#" width="{}" height="{}""#, &caps[1], &caps[2]);

    // `tag` ends at the closing `>`; self-closing roots keep their `/`
    let insert_at = if tag_text.ends_with('/') {
        tag.end - 1
    } else {
        tag.end
    };

    let mut fixed = String::with_capacity(svg.len() + size.len());
    fixed.push_str(&svg[..insert_at]);
    fixed.push_str(&size);
    fixed.push_str(&svg[insert_at..]);
    Ok(fixed)
}

/// Attribute `(name, value)` pairs of a start tag, without its closing `>`
///
/// Values are returned without their quotes. Text inside a quoted value is
/// never read as an attribute name.
fn attributes(tag_text: &str) -> Vec<(&str, &str)> {
    let is_name_end = |c: char| c.is_whitespace() || c == '=' || c == '/' || c == '>';
    let mut attrs = Vec::new();

    // Skip `<` and the element name
    let mut rest = tag_text.get(1..).unwrap_or_default();
    rest = &rest[rest.find(is_name_end).unwrap_or(rest.len())..];

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            return attrs;
        }

        let name_len = rest.find(is_name_end).unwrap_or(rest.len()).max(1);
        let name = &rest[..name_len];
        rest = rest[name_len..].trim_start();

        let Some(after_eq) = rest.strip_prefix('=') else {
            attrs.push((name, ""));
            continue;
        };
        rest = after_eq.trim_start();

        let value = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &rest[1..];
                let close = body.find(q).unwrap_or(body.len());
                rest = body.get(close + 1..).unwrap_or_default();
                &body[..close]
            }
            _ => {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let value = &rest[..end];
                rest = &rest[end..];
                value
            }
        };
        attrs.push((name, value));
    }
}

/// Byte range of the root tag, from `<` up to (not including) its closing `>`
///
/// Skips the XML declaration, processing instructions, comments and DOCTYPE.
fn root_tag(svg: &str) -> Result<Range<usize>, SvgError> {
    let mut pos = 0;
    loop {
        let start = svg[pos..]
            .find('<')
            .map(|i| pos + i)
            .ok_or(SvgError::MissingRoot)?;
        let rest = &svg[start..];

        let skip = if rest.starts_with("<?") {
            Some("?>")
        } else if rest.starts_with("<!--") {
            Some("-->")
        } else if rest.starts_with("<!") {
            Some(">")
        } else {
            None
        };
        if let Some(terminator) = skip {
            let end = rest.find(terminator).ok_or(SvgError::MissingRoot)?;
            pos = start + end + terminator.len();
            continue;
        }

        let end = tag_end(rest).ok_or(SvgError::UnterminatedRoot)?;
        let name: String = rest[1..]
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != '/' && *c != '>')
            .collect();
        let local = name.rsplit(':').next().unwrap_or_default();
        if local != "svg" {
            return Err(SvgError::NotSvg(name));
        }
        return Ok(start..start + end);
    }
}

/// Index of the `>` closing the tag at the start of `tag`, ignoring quoted values
fn tag_end(tag: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in tag.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}
