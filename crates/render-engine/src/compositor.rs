//! Overlay compositor: turns typed components into an ordered renderer
//! program.
//!
//! Per component: timestamps are resolved into visibility windows, then the
//! variant's synthesis rule emits one group of instructions per window.
//! The assembler concatenates the groups in input order. Nothing here can
//! fail; bad input degrades to fewer instructions.

use burnin_overlay_model::color::Paint;
use burnin_overlay_model::component::{
    LineOverlay, OverlayComponent, OverlayKind, ShapeStyle, TextAlign, TextOverlay,
};
use burnin_overlay_model::window::{resolve, VisibilityWindow};

use crate::filter::{BoxStyle, Instruction, PixelRect, RenderProgram, TextX};

/// Upper bound on the number of stacked boxes used to fake a shadow blur.
const MAX_SHADOW_STEPS: i64 = 6;
const MAX_TEXT_SHADOW_STEPS: i64 = 8;
const MAX_SHADOW_BLUR: f64 = 12.0;

/// One component after compilation, kept for inspection and logging.
#[derive(Debug, Clone)]
pub struct CompiledComponent {
    pub id: String,
    pub variant: &'static str,
    pub windows: Vec<VisibilityWindow>,
    pub instructions: Vec<Instruction>,
}

/// Produce the instructions for one component over the given windows.
///
/// A component with N windows yields N independent time-gated groups.
/// Hidden components, pictures, and degenerate shapes yield nothing.
pub fn synthesize(component: &OverlayComponent, windows: &[VisibilityWindow]) -> Vec<Instruction> {
    if !component.visible || windows.is_empty() {
        return Vec::new();
    }

    match &component.kind {
        OverlayKind::Rectangle(style) => synthesize_shape(component, style, windows),
        // No ellipse primitive in the renderer: a circle is drawn as its
        // bounding box, identical to a rectangle.
        OverlayKind::Circle(style) => synthesize_shape(component, style, windows),
        OverlayKind::Text(text) => synthesize_text(component, text, windows),
        OverlayKind::Picture(_) => Vec::new(),
        OverlayKind::Line(line) => synthesize_line(line, windows),
    }
}

/// Concatenate per-component instructions, preserving component order and
/// window order. An empty result is the pass-through program.
pub fn assemble<I>(per_component: I) -> RenderProgram
where
    I: IntoIterator<Item = Vec<Instruction>>,
{
    let instructions: Vec<Instruction> = per_component.into_iter().flatten().collect();
    if instructions.is_empty() {
        RenderProgram::Passthrough
    } else {
        RenderProgram::Filters(instructions)
    }
}

/// Resolve and synthesize every component, keeping per-component detail.
pub fn compile_components(
    components: &[OverlayComponent],
    duration_secs: f64,
) -> Vec<CompiledComponent> {
    components
        .iter()
        .map(|component| {
            let windows = resolve(&component.timestamps, duration_secs);
            let instructions = synthesize(component, &windows);
            tracing::debug!(
                id = %component.id,
                variant = component.kind.as_str(),
                visible = component.visible,
                windows = windows.len(),
                instructions = instructions.len(),
                "Component compiled"
            );
            CompiledComponent {
                id: component.id.clone(),
                variant: component.kind.as_str(),
                windows,
                instructions,
            }
        })
        .collect()
}

/// Compile components straight to a render program.
pub fn compile(components: &[OverlayComponent], duration_secs: f64) -> RenderProgram {
    let program = assemble(
        compile_components(components, duration_secs)
            .into_iter()
            .map(|compiled| compiled.instructions),
    );
    tracing::info!(
        components = components.len(),
        instructions = program.instructions().len(),
        passthrough = program.is_passthrough(),
        "Render program assembled"
    );
    program
}

fn px(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

fn component_rect(component: &OverlayComponent) -> PixelRect {
    PixelRect {
        x: px(component.position.x),
        y: px(component.position.y),
        width: px(component.size.width),
        height: px(component.size.height),
    }
}

fn synthesize_shape(
    component: &OverlayComponent,
    style: &ShapeStyle,
    windows: &[VisibilityWindow],
) -> Vec<Instruction> {
    let rect = component_rect(component);
    // drawbox reads a zero dimension as "whole frame".
    if rect.width <= 0 || rect.height <= 0 {
        tracing::debug!(id = %component.id, ?rect, "Skipping shape with empty size");
        return Vec::new();
    }

    let mut out = Vec::new();
    for window in windows {
        push_shape(&mut out, rect, style, *window);
    }
    out
}

/// Shadow boxes, then the fill, then the outline, for one window.
fn push_shape(
    out: &mut Vec<Instruction>,
    rect: PixelRect,
    style: &ShapeStyle,
    window: VisibilityWindow,
) {
    if let Some(shadow) = &style.shadow {
        let blur = shadow.blur.clamp(0.0, MAX_SHADOW_BLUR);
        let steps = ((blur / 2.0).ceil() as i64).clamp(1, MAX_SHADOW_STEPS);
        for i in 0..steps {
            out.push(Instruction::DrawBox {
                rect: PixelRect {
                    x: rect.x + px(shadow.offset_x) - i,
                    y: rect.y + px(shadow.offset_y) - i,
                    width: rect.width + 2 * i,
                    height: rect.height + 2 * i,
                },
                color: shadow.color,
                style: BoxStyle::Fill {
                    opacity: fade(shadow.opacity, i, steps),
                },
                window,
            });
        }
    }

    if let Paint::Solid(color) = style.fill {
        out.push(Instruction::DrawBox {
            rect,
            color,
            style: BoxStyle::Fill {
                opacity: style.opacity.clamp(0.0, 1.0),
            },
            window,
        });
    }

    let border = px(style.border_width);
    if border > 0 {
        out.push(Instruction::DrawBox {
            rect,
            color: style.border_color,
            style: BoxStyle::Outline { thickness: border },
            window,
        });
    }
}

/// Alpha of shadow layer `i` out of `steps`, fading outwards.
fn fade(opacity: f64, i: i64, steps: i64) -> f64 {
    opacity * (1.0 - i as f64 / (steps + 1) as f64)
}

fn synthesize_text(
    component: &OverlayComponent,
    text: &TextOverlay,
    windows: &[VisibilityWindow],
) -> Vec<Instruction> {
    let style = &text.style;
    let rect = component_rect(component);
    let y = rect.y;
    let font_size = px(style.font_size).max(1);
    let anchor = |dx: i64| {
        let left = component.position.x;
        match style.align {
            TextAlign::Left => TextX::Left(px(left) + dx),
            TextAlign::Center => TextX::Center(px(left + component.size.width / 2.0) + dx),
            TextAlign::Right => TextX::Right(px(left + component.size.width) + dx),
        }
    };
    let has_box = rect.width > 0 && rect.height > 0;

    let mut out = Vec::new();
    for window in windows {
        if let (Some(background), true) = (&style.background, has_box) {
            push_shape(&mut out, rect, background, *window);
        }

        if let Some(shadow) = &style.shadow {
            let blur = shadow.blur.clamp(0.0, MAX_SHADOW_BLUR);
            let steps = ((blur / 2.0).ceil() as i64).clamp(1, MAX_TEXT_SHADOW_STEPS);
            let (offset_x, offset_y) = (px(shadow.offset_x), px(shadow.offset_y));
            for i in 0..steps {
                // Odd layers spread up-left, even layers down-right.
                let spread = if i % 2 == 1 { -i } else { i };
                out.push(Instruction::DrawText {
                    text: text.text.clone(),
                    x: anchor(offset_x + spread),
                    y: y + offset_y + spread,
                    font_size,
                    color: shadow.color,
                    opacity: fade(shadow.opacity, i, steps),
                    window: *window,
                });
            }
        }

        out.push(Instruction::DrawText {
            text: text.text.clone(),
            x: anchor(0),
            y,
            font_size,
            color: style.font_color,
            opacity: 1.0,
            window: *window,
        });
    }
    out
}

fn synthesize_line(line: &LineOverlay, windows: &[VisibilityWindow]) -> Vec<Instruction> {
    let from = (px(line.start.x), px(line.start.y));
    let to = (px(line.end.x), px(line.end.y));
    let thickness = px(line.style.width).max(1);

    // Stock ffmpeg has no line filter; horizontal and vertical lines are
    // exact as filled boxes centered on the segment.
    let as_box = if from.1 == to.1 {
        Some(PixelRect {
            x: from.0.min(to.0),
            y: from.1 - thickness / 2,
            width: (to.0 - from.0).abs().max(thickness),
            height: thickness,
        })
    } else if from.0 == to.0 {
        Some(PixelRect {
            x: from.0 - thickness / 2,
            y: from.1.min(to.1),
            width: thickness,
            height: (to.1 - from.1).abs(),
        })
    } else {
        None
    };

    windows
        .iter()
        .map(|window| match as_box {
            Some(rect) => Instruction::DrawBox {
                rect,
                color: line.style.color,
                style: BoxStyle::Fill { opacity: 1.0 },
                window: *window,
            },
            None => Instruction::DrawLine {
                from,
                to,
                color: line.style.color,
                thickness,
                window: *window,
            },
        })
        .collect()
}
