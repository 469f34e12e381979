//! Retained scene of vector shapes
//!
//! A `Scene` is what a chart renders to: a tree of lines, rectangles, paths
//! and text in pixel coordinates. Exporters walk the tree; nothing here knows
//! about data or scales.

use serde::{Deserialize, Serialize};

use crate::colormap::Color;

/// Stroke paint
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    /// One-pixel stroke
    pub fn solid(color: Color) -> Self {
        Self::new(color, 1.0)
    }
}

/// Horizontal text alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Group transform
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    Translate(f64, f64),
    Rotate(f64),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Stroke,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    /// SVG path data
    pub d: String,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub anchor: TextAnchor,
    pub fill: Option<Color>,
    pub font_size: Option<f64>,
    /// Baseline shift in em
    pub dy: Option<f64>,
    /// Rotation in degrees about the text's coordinate origin
    pub rotate: Option<f64>,
    /// Vertically center the text on `y`
    pub middle_baseline: bool,
}

impl TextShape {
    /// Left-anchored text with inherited styling
    pub fn new(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self {
            x,
            y,
            content: content.into(),
            anchor: TextAnchor::Start,
            fill: None,
            font_size: None,
            dy: None,
            rotate: None,
            middle_baseline: false,
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_dy(mut self, em: f64) -> Self {
        self.dy = Some(em);
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_middle_baseline(mut self) -> Self {
        self.middle_baseline = true;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupShape {
    pub class: Option<String>,
    pub transform: Option<Transform>,
    /// Inherited font attributes (used by axes)
    pub font_size: Option<f64>,
    pub children: Vec<Shape>,
}

impl GroupShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn translated(mut self, x: f64, y: f64) -> Self {
        self.transform = Some(Transform::Translate(x, y));
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn push(&mut self, shape: impl Into<Shape>) {
        self.children.push(shape.into());
    }
}

/// A drawable element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(LineShape),
    Rect(RectShape),
    Path(PathShape),
    Text(TextShape),
    Group(GroupShape),
}

impl Shape {
    /// Straight line segment
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) -> Self {
        Shape::Line(LineShape {
            x1,
            y1,
            x2,
            y2,
            stroke,
        })
    }

    /// Axis-aligned rectangle
    pub fn rect(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    ) -> Self {
        Shape::Rect(RectShape {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        })
    }

    /// Class of a group shape
    pub fn class(&self) -> Option<&str> {
        match self {
            Shape::Group(g) => g.class.as_deref(),
            _ => None,
        }
    }
}

impl From<TextShape> for Shape {
    fn from(text: TextShape) -> Self {
        Shape::Text(text)
    }
}

impl From<GroupShape> for Shape {
    fn from(group: GroupShape) -> Self {
        Shape::Group(group)
    }
}

impl From<PathShape> for Shape {
    fn from(path: PathShape) -> Self {
        Shape::Path(path)
    }
}

/// A complete drawing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    /// Every shape in depth-first order, groups included
    pub fn walk(&self) -> Vec<&Shape> {
        fn visit<'a>(shapes: &'a [Shape], out: &mut Vec<&'a Shape>) {
            for shape in shapes {
                out.push(shape);
                if let Shape::Group(group) = shape {
                    visit(&group.children, out);
                }
            }
        }

        let mut out = Vec::new();
        visit(&self.shapes, &mut out);
        out
    }

    /// Groups carrying `class`
    pub fn groups_with_class(&self, class: &str) -> Vec<&GroupShape> {
        self.walk()
            .into_iter()
            .filter_map(|shape| match shape {
                Shape::Group(g) if g.class.as_deref() == Some(class) => Some(g),
                _ => None,
            })
            .collect()
    }

    /// Text content of every text shape
    pub fn texts(&self) -> Vec<&str> {
        self.walk()
            .into_iter()
            .filter_map(|shape| match shape {
                Shape::Text(t) => Some(t.content.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_descends_into_groups() {
        let mut inner = GroupShape::new().with_class("tick");
        inner.push(TextShape::new(0.0, 9.0, "100"));

        let mut scene = Scene::new(100, 100);
        scene.push(Shape::line(0.0, 0.0, 1.0, 1.0, Stroke::solid(Color::BLACK)));
        scene.push(inner);

        assert_eq!(scene.walk().len(), 3);
        assert_eq!(scene.groups_with_class("tick").len(), 1);
        assert_eq!(scene.texts(), vec!["100"]);
    }

    #[test]
    fn test_text_builder() {
        let text = TextShape::new(1.0, 2.0, "Likes")
            .with_anchor(TextAnchor::End)
            .with_rotation(-90.0)
            .with_fill(Color::BLACK);
        assert_eq!(text.anchor.as_str(), "end");
        assert_eq!(text.rotate, Some(-90.0));
        assert_eq!(text.fill, Some(Color::BLACK));
    }
}
