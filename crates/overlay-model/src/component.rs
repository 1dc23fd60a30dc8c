//! Typed overlay components.
//!
//! Every variant carries exactly the payload and style it needs. Defaults
//! for missing editor fields are applied once, when a job document is
//! normalized (see [`crate::job`]), so nothing downstream has to guess.

use serde::{Deserialize, Serialize};

use crate::color::{Color, Paint};

/// Text drawn when a text component has no text payload.
pub const DEFAULT_TEXT: &str = "Text";

/// Line endpoints used when the payload omits them.
pub const DEFAULT_LINE_START: Point = Point::new(0.0, 0.0);
pub const DEFAULT_LINE_END: Point = Point::new(100.0, 0.0);

/// A position in video pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// One timed visual element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayComponent {
    /// Opaque identifier, unique within a job.
    pub id: String,

    /// Top-left corner. Ignored by lines, which use explicit endpoints.
    pub position: Point,

    /// Box size. Ignored by lines.
    pub size: Size,

    /// Hidden components are never drawn.
    pub visible: bool,

    /// Flat show/hide timestamp list in seconds.
    pub timestamps: Vec<f64>,

    /// Variant payload and style.
    pub kind: OverlayKind,
}

/// Closed set of overlay variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum OverlayKind {
    Rectangle(ShapeStyle),
    /// Drawn as its bounding box; the renderer has no ellipse primitive.
    Circle(ShapeStyle),
    Text(TextOverlay),
    /// Not rendered yet: compositing an image needs a second engine input.
    Picture(PictureOverlay),
    Line(LineOverlay),
}

/// Style shared by rectangles and circles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: Paint,
    pub border_color: Color,
    /// Outline thickness in pixels. No outline when `<= 0`.
    pub border_width: f64,
    /// Fill opacity in `[0, 1]`. Never applied to the outline.
    pub opacity: f64,
    pub shadow: Option<Shadow>,
}

/// Drop shadow approximated by stacked, expanding translucent boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: Color,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f64,
    pub font_color: Color,

    /// Horizontal placement of the text inside the component box.
    pub align: TextAlign,

    /// Box drawn behind the text, covering the component bounds.
    pub background: Option<ShapeStyle>,

    /// Stacked, fading copies of the text drawn underneath it.
    pub shadow: Option<Shadow>,
}

/// Text alignment relative to the component box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PictureOverlay {
    /// Image reference as supplied by the editor (URL or path).
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineOverlay {
    pub start: Point,
    pub end: Point,
    pub style: LineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: Paint::Solid(Color::WHITE),
            border_color: Color::BLACK,
            border_width: 1.0,
            opacity: 1.0,
            shadow: None,
        }
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            offset_x: 0.0,
            offset_y: 0.0,
            blur: 4.0,
            opacity: 0.5,
        }
    }
}

impl Shadow {
    /// Defaults for text shadows, which sit slightly offset by default.
    pub fn text_default() -> Self {
        Self {
            offset_x: 2.0,
            offset_y: 2.0,
            opacity: 0.6,
            ..Self::default()
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            font_color: Color::BLACK,
            align: TextAlign::Left,
            background: None,
            shadow: None,
        }
    }
}

impl TextAlign {
    /// Lenient parse of the editor's `textAlign` value. Unknown values
    /// align left.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "center" | "centre" => TextAlign::Center,
            "right" | "end" => TextAlign::Right,
            _ => TextAlign::Left,
        }
    }
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            style: TextStyle::default(),
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            width: 2.0,
        }
    }
}

impl Default for LineOverlay {
    fn default() -> Self {
        Self {
            start: DEFAULT_LINE_START,
            end: DEFAULT_LINE_END,
            style: LineStyle::default(),
        }
    }
}

impl ShapeStyle {
    fn scale(&mut self, sx: f64, sy: f64) {
        self.border_width *= sx.min(sy);
        if let Some(shadow) = &mut self.shadow {
            shadow.offset_x *= sx;
            shadow.offset_y *= sy;
        }
    }
}

impl OverlayKind {
    /// Stable lowercase variant name, matching the editor's `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayKind::Rectangle(_) => "rectangle",
            OverlayKind::Circle(_) => "circle",
            OverlayKind::Text(_) => "text",
            OverlayKind::Picture(_) => "picture",
            OverlayKind::Line(_) => "line",
        }
    }
}

impl OverlayComponent {
    pub fn new(id: impl Into<String>, kind: OverlayKind) -> Self {
        Self {
            id: id.into(),
            position: Point::default(),
            size: Size::default(),
            visible: true,
            timestamps: Vec::new(),
            kind,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn with_timestamps(mut self, timestamps: impl Into<Vec<f64>>) -> Self {
        self.timestamps = timestamps.into();
        self
    }

    /// Map coordinates authored on a differently-sized canvas into video
    /// pixels. Stroke widths follow the smaller factor, font size the
    /// vertical one.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.position = Point::new(self.position.x * sx, self.position.y * sy);
        self.size = Size::new(self.size.width * sx, self.size.height * sy);
        let stroke = sx.min(sy);

        match &mut self.kind {
            OverlayKind::Rectangle(style) | OverlayKind::Circle(style) => {
                style.scale(sx, sy);
            }
            OverlayKind::Text(text) => {
                text.style.font_size *= sy;
                if let Some(background) = &mut text.style.background {
                    background.scale(sx, sy);
                }
                if let Some(shadow) = &mut text.style.shadow {
                    shadow.offset_x *= sx;
                    shadow.offset_y *= sy;
                }
            }
            OverlayKind::Picture(_) => {}
            OverlayKind::Line(line) => {
                line.start = Point::new(line.start.x * sx, line.start.y * sy);
                line.end = Point::new(line.end.x * sx, line.end.y * sy);
                line.style.width *= stroke;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let shape = ShapeStyle::default();
        assert_eq!(shape.fill, Paint::Solid(Color::WHITE));
        assert_eq!(shape.border_color, Color::BLACK);
        assert_eq!(shape.border_width, 1.0);
        assert_eq!(shape.opacity, 1.0);

        let text = TextOverlay::default();
        assert_eq!(text.text, "Text");
        assert_eq!(text.style.font_size, 16.0);

        let line = LineOverlay::default();
        assert_eq!(line.start, Point::new(0.0, 0.0));
        assert_eq!(line.end, Point::new(100.0, 0.0));
        assert_eq!(line.style.width, 2.0);
        assert_eq!(line.style.color, Color::WHITE);
    }

    #[test]
    fn test_scale_rectangle() {
        let mut component =
            OverlayComponent::new("r1", OverlayKind::Rectangle(ShapeStyle::default()))
                .at(10.0, 20.0)
                .sized(100.0, 50.0);
        component.scale(2.0, 3.0);

        assert_eq!(component.position, Point::new(20.0, 60.0));
        assert_eq!(component.size, Size::new(200.0, 150.0));
        match component.kind {
            OverlayKind::Rectangle(style) => assert_eq!(style.border_width, 2.0),
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_scale_line_and_text() {
        let mut line = OverlayComponent::new("l1", OverlayKind::Line(LineOverlay::default()));
        line.scale(0.5, 2.0);
        match line.kind {
            OverlayKind::Line(l) => {
                assert_eq!(l.end, Point::new(50.0, 0.0));
                assert_eq!(l.style.width, 1.0);
            }
            other => panic!("unexpected variant {other:?}"),
        }

        let mut overlay = TextOverlay::default();
        overlay.style.background = Some(ShapeStyle {
            border_width: 4.0,
            ..ShapeStyle::default()
        });
        overlay.style.shadow = Some(Shadow::text_default());
        let mut text = OverlayComponent::new("t1", OverlayKind::Text(overlay));
        text.scale(1.0, 1.5);
        match text.kind {
            OverlayKind::Text(t) => {
                assert_eq!(t.style.font_size, 24.0);
                assert_eq!(t.style.background.unwrap().border_width, 4.0);
                let shadow = t.style.shadow.unwrap();
                assert_eq!((shadow.offset_x, shadow.offset_y), (2.0, 3.0));
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_text_align_parse() {
        assert_eq!(TextAlign::parse("Center"), TextAlign::Center);
        assert_eq!(TextAlign::parse("right"), TextAlign::Right);
        assert_eq!(TextAlign::parse("justify"), TextAlign::Left);
        assert_eq!(TextStyle::default().align, TextAlign::Left);
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(
            OverlayKind::Picture(PictureOverlay::default()).as_str(),
            "picture"
        );
        assert_eq!(OverlayKind::Circle(ShapeStyle::default()).as_str(), "circle");
    }
}
