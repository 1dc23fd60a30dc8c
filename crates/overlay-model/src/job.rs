//! Editor job documents.
//!
//! The editor posts a loosely-typed JSON document: numbers may arrive as
//! strings, style keys may be missing, unknown keys are common, and any
//! field may carry the wrong JSON type. The wire structs here accept all of
//! that: a value that cannot be read falls back to the field default
//! instead of rejecting the job. [`JobDocument::components`] turns the
//! result into typed [`OverlayComponent`]s with every default applied.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use burnin_common::error::{BurninError, BurninResult};

use crate::color::{Color, Paint};
use crate::component::{
    LineOverlay, LineStyle, OverlayComponent, OverlayKind, PictureOverlay, Point, Shadow,
    ShapeStyle, Size, TextAlign, TextOverlay, TextStyle, DEFAULT_LINE_END, DEFAULT_LINE_START, DEFAULT_TEXT,
};

/// Frame size assumed when the document does not carry one.
pub const DEFAULT_FRAME_WIDTH: u32 = 1920;
pub const DEFAULT_FRAME_HEIGHT: u32 = 1080;

/// A number that may have been serialized as a string, or as garbage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl LooseNumber {
    /// The finite numeric value, if there is one. Strings such as `"12"`
    /// or `"12px"` are accepted.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            LooseNumber::Number(n) => *n,
            LooseNumber::Text(s) => {
                let s = s.trim();
                s.strip_suffix("px").unwrap_or(s).trim().parse::<f64>().ok()?
            }
            LooseNumber::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// Top-level upload document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDocument {
    #[serde(default, deserialize_with = "lenient_nodes")]
    pub nodes: Vec<WireNode>,
    #[serde(default)]
    pub video_width: Option<LooseNumber>,
    #[serde(default)]
    pub video_height: Option<LooseNumber>,
    #[serde(default)]
    pub video_duration: Option<LooseNumber>,
    /// Size of the editor canvas the positions were authored on, when it
    /// differs from the video resolution.
    #[serde(default)]
    pub canvas_width: Option<LooseNumber>,
    #[serde(default)]
    pub canvas_height: Option<LooseNumber>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireNode {
    /// String or number on the wire.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient")]
    pub position: WirePoint,
    #[serde(default)]
    pub width: Option<LooseNumber>,
    #[serde(default)]
    pub height: Option<LooseNumber>,
    #[serde(default, deserialize_with = "lenient")]
    pub data: WireData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WirePoint {
    #[serde(default)]
    pub x: Option<LooseNumber>,
    #[serde(default)]
    pub y: Option<LooseNumber>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireData {
    #[serde(deserialize_with = "lenient")]
    pub timestamps: Vec<LooseNumber>,
    #[serde(deserialize_with = "lenient")]
    pub styles: WireStyles,
    /// Numbers and booleans are rendered as their JSON text.
    #[serde(deserialize_with = "lenient_opt_string")]
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub start_point: Option<WirePoint>,
    #[serde(deserialize_with = "lenient")]
    pub end_point: Option<WirePoint>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub visible: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireStyles {
    #[serde(deserialize_with = "lenient")]
    pub fill_color: Option<String>,
    /// Text only: a background box is drawn when set to anything but `none`.
    #[serde(deserialize_with = "lenient")]
    pub fill_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub border_color: Option<String>,
    pub border_width: Option<LooseNumber>,
    pub opacity: Option<LooseNumber>,
    pub font_size: Option<LooseNumber>,
    #[serde(deserialize_with = "lenient")]
    pub font_color: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub text_align: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub has_shadow: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub shadow_color: Option<String>,
    pub shadow_offset_x: Option<LooseNumber>,
    pub shadow_offset_y: Option<LooseNumber>,
    pub shadow_blur: Option<LooseNumber>,
    pub shadow_opacity: Option<LooseNumber>,
}

/// Read any JSON value; fall back to `T::default()` when it does not fit.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Booleans, `"true"`/`"false"` strings, and `0`/`1`.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 0.0 => Some(false),
            Some(v) if v == 1.0 => Some(true),
            _ => None,
        },
        _ => None,
    })
}

/// A node that is not even an object is dropped; its siblings survive.
fn lenient_nodes<'de, D>(deserializer: D) -> Result<Vec<WireNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        tracing::warn!("Job document `nodes` is not an array, ignoring it");
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<WireNode>(item) {
            Ok(node) => Some(node),
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping unreadable node");
                None
            }
        })
        .collect())
}

fn num(value: &Option<LooseNumber>) -> Option<f64> {
    value.as_ref().and_then(LooseNumber::as_f64)
}

fn color_or(raw: &Option<String>, default: Color) -> Color {
    raw.as_deref().and_then(Color::parse).unwrap_or(default)
}

impl WirePoint {
    fn to_point(&self, default: Point) -> Point {
        Point::new(
            num(&self.x).unwrap_or(default.x),
            num(&self.y).unwrap_or(default.y),
        )
    }
}

impl WireStyles {
    fn shape(&self) -> ShapeStyle {
        let defaults = ShapeStyle::default();
        let shadow = (self.has_shadow == Some(true)).then(|| self.shadow(Shadow::default()));

        ShapeStyle {
            fill: self
                .fill_color
                .as_deref()
                .and_then(Paint::parse)
                .unwrap_or(defaults.fill),
            border_color: color_or(&self.border_color, defaults.border_color),
            border_width: num(&self.border_width).unwrap_or(defaults.border_width),
            opacity: num(&self.opacity)
                .unwrap_or(defaults.opacity)
                .clamp(0.0, 1.0),
            shadow,
        }
    }

    fn text(&self) -> TextStyle {
        let defaults = TextStyle::default();
        let has_background = self
            .fill_type
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty() && !t.trim().eq_ignore_ascii_case("none"));
        let background = self
            .fill_color
            .as_deref()
            .and_then(Paint::parse)
            .filter(|paint| has_background && *paint != Paint::Transparent)
            .map(|fill| ShapeStyle {
                fill,
                // Text boxes carry no outline unless one is asked for.
                border_width: num(&self.border_width).unwrap_or(0.0),
                shadow: None,
                ..self.shape()
            });
        let shadow = (self.has_shadow == Some(true)).then(|| self.shadow(Shadow::text_default()));

        TextStyle {
            font_size: num(&self.font_size).unwrap_or(defaults.font_size),
            font_color: color_or(&self.font_color, defaults.font_color),
            align: self
                .text_align
                .as_deref()
                .map_or(defaults.align, TextAlign::parse),
            background,
            shadow,
        }
    }

    fn shadow(&self, d: Shadow) -> Shadow {
        Shadow {
            color: color_or(&self.shadow_color, d.color),
            offset_x: num(&self.shadow_offset_x).unwrap_or(d.offset_x),
            offset_y: num(&self.shadow_offset_y).unwrap_or(d.offset_y),
            blur: num(&self.shadow_blur).unwrap_or(d.blur),
            opacity: num(&self.shadow_opacity)
                .unwrap_or(d.opacity)
                .clamp(0.0, 1.0),
        }
    }

    fn line(&self) -> LineStyle {
        let defaults = LineStyle::default();
        LineStyle {
            color: color_or(&self.border_color, defaults.color),
            width: num(&self.border_width).unwrap_or(defaults.width),
        }
    }
}

impl WireNode {
    /// Convert to a typed component. Returns `None` for unknown `type`s.
    pub fn normalize(&self) -> Option<OverlayComponent> {
        let data = &self.data;
        let styles = &data.styles;

        let kind = match self.kind.trim().to_ascii_lowercase().as_str() {
            "rectangle" => OverlayKind::Rectangle(styles.shape()),
            "circle" => OverlayKind::Circle(styles.shape()),
            "text" => OverlayKind::Text(TextOverlay {
                text: data
                    .text
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TEXT.to_string()),
                style: styles.text(),
            }),
            "picture" => OverlayKind::Picture(PictureOverlay {
                image: data.image.clone(),
            }),
            "line" => OverlayKind::Line(LineOverlay {
                start: data
                    .start_point
                    .as_ref()
                    .map_or(DEFAULT_LINE_START, |p| p.to_point(DEFAULT_LINE_START)),
                end: data
                    .end_point
                    .as_ref()
                    .map_or(DEFAULT_LINE_END, |p| p.to_point(DEFAULT_LINE_END)),
                style: styles.line(),
            }),
            _ => return None,
        };

        Some(OverlayComponent {
            id: self.id.clone(),
            position: self.position.to_point(Point::default()),
            size: Size::new(
                num(&self.width).unwrap_or(0.0),
                num(&self.height).unwrap_or(0.0),
            ),
            visible: data.visible.unwrap_or(true),
            timestamps: data
                .timestamps
                .iter()
                .filter_map(LooseNumber::as_f64)
                .collect(),
            kind,
        })
    }
}

impl JobDocument {
    pub fn from_json(raw: &str) -> BurninResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| BurninError::job(format!("Invalid job document: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> BurninResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BurninError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn frame_width(&self) -> u32 {
        positive_dimension(&self.video_width).unwrap_or(DEFAULT_FRAME_WIDTH)
    }

    pub fn frame_height(&self) -> u32 {
        positive_dimension(&self.video_height).unwrap_or(DEFAULT_FRAME_HEIGHT)
    }

    /// Whether the document carries its own frame dimensions.
    pub fn has_frame_size(&self) -> bool {
        positive_dimension(&self.video_width).is_some()
            && positive_dimension(&self.video_height).is_some()
    }

    /// Total video duration in seconds; `0` when unknown.
    pub fn duration_secs(&self) -> f64 {
        num(&self.video_duration).unwrap_or(0.0).max(0.0)
    }

    /// Per-axis factor mapping canvas coordinates to video pixels.
    pub fn canvas_scale(&self) -> (f64, f64) {
        let axis = |canvas: &Option<LooseNumber>, video: u32| {
            match num(canvas) {
                Some(c) if c > 0.0 && (c - video as f64).abs() > f64::EPSILON => video as f64 / c,
                _ => 1.0,
            }
        };
        (
            axis(&self.canvas_width, self.frame_width()),
            axis(&self.canvas_height, self.frame_height()),
        )
    }

    /// Typed components in document order. Unknown variants are dropped.
    pub fn components(&self) -> Vec<OverlayComponent> {
        let (sx, sy) = self.canvas_scale();
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let Some(mut component) = node.normalize() else {
                    tracing::warn!(
                        index,
                        id = %node.id,
                        kind = %node.kind,
                        "Dropping component with unknown type"
                    );
                    return None;
                };
                if sx != 1.0 || sy != 1.0 {
                    component.scale(sx, sy);
                }
                Some(component)
            })
            .collect()
    }
}

fn positive_dimension(value: &Option<LooseNumber>) -> Option<u32> {
    num(value)
        .filter(|v| *v >= 1.0)
        .map(|v| v.round().min(u32::MAX as f64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> JobDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_loose_number_accepts_strings() {
        assert_eq!(LooseNumber::Text(" 12.5 ".into()).as_f64(), Some(12.5));
        assert_eq!(LooseNumber::Text("16px".into()).as_f64(), Some(16.0));
        assert_eq!(LooseNumber::Text("wide".into()).as_f64(), None);
        assert_eq!(LooseNumber::Other(json!(true)).as_f64(), None);
    }

    #[test]
    fn test_rectangle_normalization_reads_styles() {
        let job = doc(json!({
            "nodes": [{
                "id": "r1",
                "type": "rectangle",
                "position": {"x": 10, "y": "10"},
                "width": 40,
                "height": 20,
                "data": {
                    "timestamps": [0, 5],
                    "styles": {"fillColor": "#ff0000", "opacity": 0.5, "borderWidth": 2}
                }
            }],
            "video_width": 640,
            "video_height": 360,
            "video_duration": 10
        }));

        let components = job.components();
        assert_eq!(components.len(), 1);
        let c = &components[0];
        assert_eq!(c.position, Point::new(10.0, 10.0));
        assert_eq!(c.size, Size::new(40.0, 20.0));
        assert_eq!(c.timestamps, vec![0.0, 5.0]);
        match &c.kind {
            OverlayKind::Rectangle(style) => {
                assert_eq!(style.fill, Paint::Solid(Color::rgb(255, 0, 0)));
                assert_eq!(style.opacity, 0.5);
                assert_eq!(style.border_width, 2.0);
                assert_eq!(style.border_color, Color::BLACK);
                assert!(style.shadow.is_none());
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_missing_payload_keys_use_defaults() {
        let job = doc(json!({
            "nodes": [
                {"id": "t", "type": "text", "data": {}},
                {"id": "l", "type": "line", "data": {"endPoint": {"y": 40}}},
                {"id": "p", "type": "picture"}
            ]
        }));

        let components = job.components();
        assert_eq!(components.len(), 3);
        match &components[0].kind {
            OverlayKind::Text(text) => {
                assert_eq!(text.text, "Text");
                assert_eq!(text.style.font_size, 16.0);
            }
            other => panic!("unexpected variant {other:?}"),
        }
        match &components[1].kind {
            OverlayKind::Line(line) => {
                assert_eq!(line.start, Point::new(0.0, 0.0));
                assert_eq!(line.end, Point::new(100.0, 40.0));
            }
            other => panic!("unexpected variant {other:?}"),
        }
        assert!(components[0].timestamps.is_empty());
        assert!(matches!(components[2].kind, OverlayKind::Picture(_)));
    }

    #[test]
    fn test_unknown_type_is_dropped_and_order_kept() {
        let job = doc(json!({
            "nodes": [
                {"id": "a", "type": "rectangle"},
                {"id": "b", "type": "hexagon"},
                {"id": "c", "type": "Circle"}
            ]
        }));
        let ids: Vec<_> = job.components().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_bad_values_degrade_instead_of_failing() {
        let job = doc(json!({
            "nodes": [{
                "id": "r",
                "type": "rectangle",
                "data": {
                    "timestamps": [1, "2", null, "soon", 4],
                    "styles": {"fillColor": "chartreuse-ish", "opacity": 7, "borderWidth": "thick"},
                    "visible": false
                }
            }],
            "video_duration": "n/a"
        }));

        assert_eq!(job.duration_secs(), 0.0);
        let c = &job.components()[0];
        assert_eq!(c.timestamps, vec![1.0, 2.0, 4.0]);
        assert!(!c.visible);
        match &c.kind {
            OverlayKind::Rectangle(style) => {
                assert_eq!(style.fill, Paint::Solid(Color::WHITE));
                assert_eq!(style.opacity, 1.0);
                assert_eq!(style.border_width, 1.0);
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_shadow_only_when_enabled() {
        let job = doc(json!({
            "nodes": [{
                "id": "s",
                "type": "rectangle",
                "data": {"styles": {"hasShadow": true, "shadowOffsetX": 3, "shadowColor": "#333"}}
            }]
        }));
        match &job.components()[0].kind {
            OverlayKind::Rectangle(style) => {
                let shadow = style.shadow.expect("shadow enabled");
                assert_eq!(shadow.offset_x, 3.0);
                assert_eq!(shadow.offset_y, 0.0);
                assert_eq!(shadow.blur, 4.0);
                assert_eq!(shadow.color, Color::rgb(0x33, 0x33, 0x33));
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_frame_defaults_and_canvas_scale() {
        let empty = doc(json!({}));
        assert_eq!(empty.frame_width(), 1920);
        assert_eq!(empty.frame_height(), 1080);
        assert!(!empty.has_frame_size());
        assert_eq!(empty.canvas_scale(), (1.0, 1.0));

        let scaled = doc(json!({
            "nodes": [{"id": "r", "type": "rectangle", "position": {"x": 100, "y": 50}, "width": 10, "height": 10}],
            "video_width": 1920,
            "video_height": 1080,
            "canvas_width": 960,
            "canvas_height": 540
        }));
        assert_eq!(scaled.canvas_scale(), (2.0, 2.0));
        let c = &scaled.components()[0];
        assert_eq!(c.position, Point::new(200.0, 100.0));
        assert_eq!(c.size, Size::new(20.0, 20.0));
    }

    #[test]
    fn test_from_json_reports_job_error() {
        let err = JobDocument::from_json("{\"nodes\": [").unwrap_err();
        assert!(matches!(err, BurninError::Job { .. }));
    }

    #[test]
    fn test_numeric_id_and_text_are_stringified() {
        let job = JobDocument::from_json(
            r#"{"nodes": [{"id": 5, "type": "text", "data": {"text": 42, "timestamps": [0, 1]}}]}"#,
        )
        .unwrap();
        let c = &job.components()[0];
        assert_eq!(c.id, "5");
        match &c.kind {
            OverlayKind::Text(text) => assert_eq!(text.text, "42"),
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_null_objects_fall_back_to_defaults() {
        let job = JobDocument::from_json(
            r#"{"nodes": [
                {"id": "a", "type": "rectangle", "position": null, "data": {"styles": null}},
                {"id": "b", "type": "rectangle", "data": null}
            ]}"#,
        )
        .unwrap();
        let components = job.components();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].position, Point::default());
        assert_eq!(
            components[0].kind,
            OverlayKind::Rectangle(ShapeStyle::default())
        );
        assert!(components[1].visible);
        assert!(components[1].timestamps.is_empty());
    }

    #[test]
    fn test_visible_accepts_strings() {
        let job = JobDocument::from_json(
            r#"{"nodes": [
                {"id": "a", "type": "line", "data": {"visible": "false"}},
                {"id": "b", "type": "line", "data": {"visible": "TRUE"}},
                {"id": "c", "type": "line", "data": {"visible": "maybe"}}
            ]}"#,
        )
        .unwrap();
        let visible: Vec<bool> = job.components().iter().map(|c| c.visible).collect();
        assert_eq!(visible, vec![false, true, true]);
    }

    #[test]
    fn test_wrongly_typed_colors_use_defaults() {
        let job = JobDocument::from_json(
            r##"{"nodes": [{"id": "r", "type": "rectangle", "data": {"styles": {
                "fillColor": 16711680, "borderColor": ["#fff"], "hasShadow": "yes"
            }}}]}"##,
        )
        .unwrap();
        match &job.components()[0].kind {
            OverlayKind::Rectangle(style) => {
                assert_eq!(style.fill, Paint::Solid(Color::WHITE));
                assert_eq!(style.border_color, Color::BLACK);
                assert!(style.shadow.is_none());
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_node_and_timestamps_degrade() {
        let job = JobDocument::from_json(
            r#"{"nodes": [
                "garbage",
                {"id": "t", "type": "line", "data": {"timestamps": "0,5", "startPoint": 7}}
            ]}"#,
        )
        .unwrap();
        let components = job.components();
        assert_eq!(components.len(), 1);
        assert!(components[0].timestamps.is_empty());
        match &components[0].kind {
            OverlayKind::Line(line) => assert_eq!(line.start, DEFAULT_LINE_START),
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_text_background_shadow_and_align() {
        let job = doc(json!({
            "nodes": [
                {"id": "t1", "type": "text", "width": 200, "height": 40, "data": {"styles": {
                    "fillType": "solid", "fillColor": "#112233", "opacity": "0.8",
                    "textAlign": "center", "hasShadow": true, "shadowBlur": 6
                }}},
                {"id": "t2", "type": "text", "data": {"styles": {
                    "fillType": "solid", "fillColor": "transparent"
                }}},
                {"id": "t3", "type": "text", "data": {"styles": {"fillColor": "#112233"}}}
            ]
        }));

        let components = job.components();
        let styles: Vec<TextStyle> = components
            .iter()
            .map(|c| match &c.kind {
                OverlayKind::Text(text) => text.style,
                other => panic!("unexpected variant {other:?}"),
            })
            .collect();

        let background = styles[0].background.expect("background requested");
        assert_eq!(background.fill, Paint::Solid(Color::rgb(0x11, 0x22, 0x33)));
        assert_eq!(background.opacity, 0.8);
        assert_eq!(background.border_width, 0.0);
        assert_eq!(styles[0].align, TextAlign::Center);
        let shadow = styles[0].shadow.expect("shadow requested");
        assert_eq!((shadow.offset_x, shadow.offset_y, shadow.blur), (2.0, 2.0, 6.0));
        assert_eq!(shadow.opacity, 0.6);

        assert!(styles[1].background.is_none());
        assert!(styles[2].background.is_none());
        assert_eq!(styles[2].align, TextAlign::Left);
    }
}
