//! Renderer instructions and their ffmpeg filtergraph serialization.
//!
//! Each [`Instruction`] is one time-gated drawing filter. The serializer is
//! the only place that knows ffmpeg syntax; everything upstream works with
//! typed values.

use std::fmt;

use burnin_overlay_model::color::Color;
use burnin_overlay_model::window::VisibilityWindow;

/// Axis-aligned box in integer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// How a box is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxStyle {
    /// Solid fill blended at `opacity`.
    Fill { opacity: f64 },
    /// Outline of the given thickness, fully opaque.
    Outline { thickness: i64 },
}

/// Horizontal position of a text run. Centered and right-aligned text is
/// placed relative to its rendered width, which only the renderer knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextX {
    /// Left edge at the pixel.
    Left(i64),
    /// Horizontal center at the pixel.
    Center(i64),
    /// Right edge at the pixel.
    Right(i64),
}

/// A single drawing operation, active only inside `window`.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    DrawBox {
        rect: PixelRect,
        color: Color,
        style: BoxStyle,
        window: VisibilityWindow,
    },
    DrawText {
        text: String,
        x: TextX,
        y: i64,
        font_size: i64,
        color: Color,
        /// Blended at this opacity when below 1.
        opacity: f64,
        window: VisibilityWindow,
    },
    DrawLine {
        from: (i64, i64),
        to: (i64, i64),
        color: Color,
        thickness: i64,
        window: VisibilityWindow,
    },
}

/// The full program for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderProgram {
    /// No overlays: copy the source streams unmodified.
    Passthrough,
    /// Non-empty, ordered instruction list applied as a single filter chain.
    Filters(Vec<Instruction>),
}

impl Instruction {
    pub fn window(&self) -> VisibilityWindow {
        match self {
            Instruction::DrawBox { window, .. }
            | Instruction::DrawText { window, .. }
            | Instruction::DrawLine { window, .. } => *window,
        }
    }

    /// ffmpeg filter name.
    pub fn filter_name(&self) -> &'static str {
        match self {
            Instruction::DrawBox { .. } => "drawbox",
            Instruction::DrawText { .. } => "drawtext",
            Instruction::DrawLine { .. } => "drawline",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::DrawBox {
                rect,
                color,
                style,
                window,
            } => {
                write!(
                    f,
                    "drawbox=x={}:y={}:w={}:h={}:",
                    rect.x, rect.y, rect.width, rect.height
                )?;
                match style {
                    BoxStyle::Fill { opacity } => {
                        write!(f, "color={color}@{}:t=fill", format_number(*opacity))?
                    }
                    BoxStyle::Outline { thickness } => write!(f, "color={color}:t={thickness}")?,
                }
                write!(f, ":enable='{}'", enable_expr(window))
            }
            Instruction::DrawText {
                text,
                x,
                y,
                font_size,
                color,
                opacity,
                window,
            } => {
                write!(
                    f,
                    "drawtext=text={}:x={x}:y={y}:fontsize={font_size}:fontcolor={color}",
                    escape_text(text)
                )?;
                if *opacity < 1.0 {
                    write!(f, "@{}", format_number(opacity.max(0.0)))?;
                }
                write!(f, ":enable='{}'", enable_expr(window))
            }
            Instruction::DrawLine {
                from,
                to,
                color,
                thickness,
                window,
            } => write!(
                f,
                "drawline=x1={}:y1={}:x2={}:y2={}:color={color}:t={thickness}:enable='{}'",
                from.0,
                from.1,
                to.0,
                to.1,
                enable_expr(window)
            ),
        }
    }
}

impl fmt::Display for TextX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextX::Left(x) => write!(f, "{x}"),
            TextX::Center(x) => write!(f, "{x}-text_w/2"),
            TextX::Right(x) => write!(f, "{x}-text_w"),
        }
    }
}

impl RenderProgram {
    pub fn is_passthrough(&self) -> bool {
        matches!(self, RenderProgram::Passthrough)
    }

    /// Instructions in draw order; empty for pass-through.
    pub fn instructions(&self) -> &[Instruction] {
        match self {
            RenderProgram::Passthrough => &[],
            RenderProgram::Filters(instructions) => instructions,
        }
    }

    /// The `-filter_complex` argument, or `None` for pass-through.
    pub fn filter_graph(&self) -> Option<String> {
        match self {
            RenderProgram::Passthrough => None,
            RenderProgram::Filters(instructions) => Some(
                instructions
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }
}

/// Time gate evaluated by the renderer per frame: `t` is the frame time in
/// seconds from the start of the video.
pub fn enable_expr(window: &VisibilityWindow) -> String {
    format!(
        "between(t,{},{})",
        format_number(window.start),
        format_number(window.end)
    )
}

/// At most three decimals, trailing zeros trimmed: `5`, `0.5`, `2.125`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{value:.3}");
    if s.contains('.') {
        s.truncate(s.trim_end_matches('0').trim_end_matches('.').len());
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Escape a literal for drawtext's `text` option inside a filtergraph.
///
/// Three parsers see the value in turn: drawtext's own expansion (`\`, `%`),
/// the filter option parser (`\`, `'`, `:`), and the filtergraph parser
/// (`\`, `'`, `[`, `]`, `,`, `;`). Each level is backslash-escaped.
pub fn escape_text(text: &str) -> String {
    let expansion = escape_chars(text, &['\\', '%']);
    let option = escape_chars(&expansion, &['\\', '\'', ':']);
    escape_chars(&option, &['\\', '\'', '[', ']', ',', ';'])
}

fn escape_chars(input: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
