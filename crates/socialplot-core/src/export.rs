//! SVG export
//!
//! Serializes a `Scene` into a standalone SVG 1.1 document.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::axis::fmt;
use crate::colormap::Color;
use crate::error::{validation, ExportError, ExportResult};
use crate::scene::{GroupShape, Scene, Shape, Stroke, TextAnchor, TextShape, Transform};

/// Font family of axis groups
pub const AXIS_FONT_FAMILY: &str = "sans-serif";

/// Writes scenes as SVG documents
#[derive(Clone, Debug, Default)]
pub struct SvgExporter {
    /// Paint the whole canvas before drawing
    background: Option<Color>,
}

impl SvgExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Serialize `scene` to an SVG document
    pub fn to_svg_string(&self, scene: &Scene) -> ExportResult<String> {
        validation::validate_dimensions(scene.width, scene.height)?;

        let mut out = String::new();
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        out.push('\n');
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = scene.width,
            h = scene.height
        );
        if let Some(color) = self.background {
            let _ = writeln!(
                out,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                color.to_hex()
            );
        }
        for shape in &scene.shapes {
            write_shape(&mut out, shape, 1);
        }
        out.push_str("</svg>\n");
        Ok(out)
    }

    /// Write `scene` to `path`, creating parent directories
    pub fn write(&self, scene: &Scene, path: impl AsRef<Path>) -> ExportResult<PathBuf> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() || path.file_name().is_none() {
            return Err(ExportError::InvalidPath {
                path: path.to_path_buf(),
            });
        }

        let document = self.to_svg_string(scene)?;
        let write_err = |source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, document.as_bytes()).map_err(write_err)?;

        info!(path = %path.display(), bytes = document.len(), "Wrote SVG");
        Ok(path.to_path_buf())
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(r#" stroke="{}""#, stroke.color.to_hex());
    if stroke.width != 1.0 {
        let _ = write!(attrs, r#" stroke-width="{}""#, fmt(stroke.width));
    }
    attrs
}

fn paint_attrs(fill: Option<Color>, stroke: Option<&Stroke>) -> String {
    let mut attrs = match fill {
        Some(color) => format!(r#" fill="{}""#, color.to_hex()),
        None => r#" fill="none""#.to_string(),
    };
    if let Some(stroke) = stroke {
        attrs.push_str(&stroke_attrs(stroke));
    }
    attrs
}

fn transform_attr(transform: &Transform) -> String {
    match transform {
        Transform::Translate(x, y) => format!(r#" transform="translate({},{})""#, fmt(*x), fmt(*y)),
        Transform::Rotate(angle) => format!(r#" transform="rotate({})""#, fmt(*angle)),
    }
}

fn write_shape(out: &mut String, shape: &Shape, depth: usize) {
    indent(out, depth);
    match shape {
        Shape::Line(line) => {
            let _ = writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                fmt(line.x1),
                fmt(line.y1),
                fmt(line.x2),
                fmt(line.y2),
                stroke_attrs(&line.stroke)
            );
        }
        Shape::Rect(rect) => {
            let _ = writeln!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
                fmt(rect.x),
                fmt(rect.y),
                fmt(rect.width),
                fmt(rect.height),
                paint_attrs(rect.fill, rect.stroke.as_ref())
            );
        }
        Shape::Path(path) => {
            let _ = writeln!(
                out,
                r#"<path d="{}"{}/>"#,
                path.d,
                paint_attrs(path.fill, path.stroke.as_ref())
            );
        }
        Shape::Text(text) => write_text(out, text),
        Shape::Group(group) => write_group(out, group, depth),
    }
}

fn write_text(out: &mut String, text: &TextShape) {
    let mut attrs = format!(r#" x="{}" y="{}""#, fmt(text.x), fmt(text.y));
    if let Some(dy) = text.dy {
        let _ = write!(attrs, r#" dy="{}em""#, fmt(dy));
    }
    if text.anchor != TextAnchor::Start {
        let _ = write!(attrs, r#" text-anchor="{}""#, text.anchor.as_str());
    }
    if let Some(fill) = text.fill {
        let _ = write!(attrs, r#" fill="{}""#, fill.to_hex());
    }
    if let Some(size) = text.font_size {
        let _ = write!(attrs, r#" font-size="{}""#, fmt(size));
    }
    if let Some(angle) = text.rotate {
        attrs.push_str(&transform_attr(&Transform::Rotate(angle)));
    }
    if text.middle_baseline {
        attrs.push_str(r#" alignment-baseline="middle""#);
    }
    let _ = writeln!(out, "<text{}>{}</text>", attrs, escape_text(&text.content));
}

fn write_group(out: &mut String, group: &GroupShape, depth: usize) {
    let mut attrs = String::new();
    if let Some(class) = &group.class {
        let _ = write!(attrs, r#" class="{}""#, escape_text(class));
    }
    if let Some(transform) = &group.transform {
        attrs.push_str(&transform_attr(transform));
    }
    if let Some(size) = group.font_size {
        let _ = write!(
            attrs,
            r#" font-size="{}" font-family="{}""#,
            fmt(size),
            AXIS_FONT_FAMILY
        );
    }

    if group.children.is_empty() {
        let _ = writeln!(out, "<g{}/>", attrs);
        return;
    }
    let _ = writeln!(out, "<g{}>", attrs);
    for child in &group.children {
        write_shape(out, child, depth + 1);
    }
    indent(out, depth);
    out.push_str("</g>\n");
}

/// Escape XML special characters in text content and attribute values
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
