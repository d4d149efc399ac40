//! SVG renderer.
//!
//! Serializes a [`Scene`] into a standalone SVG document. Used for
//! previews, snapshot tests and headless export.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use crate::scene::{
    GUIDE_DASH, GUIDE_OPACITY, Guide, GuideKind, Overlay, Scene, SceneBuilder, SceneItem,
    TextBlock, ZoneContent, ZoneGroup,
};
use cardsmith_core::handles::{HANDLE_SIZE, Handle, HandleKind};
use cardsmith_core::zone::{Fill, SerializableColor, Stroke, TextAlign};
use kurbo::{Point, Rect};
use peniko::Color;
use std::fmt::{self, Write};

/// Renderer that produces an SVG document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: Option<String>,
    /// Counter for generated `id`s within one document.
    next_id: usize,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last document built by [`Renderer::build_scene`].
    pub fn svg(&self) -> RenderResult<&str> {
        self.document.as_deref().ok_or(RendererError::NoScene)
    }

    /// Build and return a document in one call.
    pub fn render_to_string(&mut self, ctx: &RenderContext) -> RenderResult<String> {
        let scene = SceneBuilder::build(ctx);
        self.write_document(&scene, ctx)
            .map_err(|e| RendererError::RenderFailed(e.to_string()))
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn write_document(&mut self, scene: &Scene, ctx: &RenderContext) -> Result<String, fmt::Error> {
        self.next_id = 0;
        let (w, h) = (num(scene.surface.width), num(scene.surface.height));
        let mut out = String::new();
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        writeln!(
            out,
            r#"<rect x="0" y="0" width="{w}" height="{h}"{}/>"#,
            fill_attr(ctx.card_color)
        )?;

        for item in &scene.items {
            match item {
                SceneItem::Guide(guide) => write_guide(&mut out, guide, ctx)?,
                SceneItem::TrimBoundary(rect) => {
                    writeln!(
                        out,
                        r#"<rect class="trim"{} fill="none"{}/>"#,
                        rect_attrs(*rect),
                        stroke_attr(ctx.guide_color, 1.0 / ctx.zoom, None)
                    )?;
                }
                SceneItem::Zone(group) => self.write_zone(&mut out, group)?,
                SceneItem::Overlay(overlay) => write_overlay(&mut out, overlay, ctx)?,
            }
        }
        out.push_str("</svg>\n");
        Ok(out)
    }

    fn write_zone(&mut self, out: &mut String, group: &ZoneGroup) -> fmt::Result {
        let [a, b, c, d, e, f] = group.transform.as_coeffs();
        write!(
            out,
            r#"<g data-zone="{}" transform="matrix({} {} {} {} {} {})""#,
            group.id,
            num(a),
            num(b),
            num(c),
            num(d),
            num(e),
            num(f)
        )?;
        if group.opacity < 1.0 {
            write!(out, r#" opacity="{}""#, num(group.opacity))?;
        }
        out.push_str(">\n");

        let mut clipped = false;
        if let Some(clip) = &group.clip {
            let id = self.fresh_id("clip");
            writeln!(
                out,
                r#"<defs><clipPath id="{id}"><rect{} rx="{}"/></clipPath></defs>"#,
                rect_attrs(clip.rect()),
                num(clip.radii().top_left)
            )?;
            writeln!(out, r#"<g clip-path="url(#{id})">"#)?;
            clipped = true;
        }

        match &group.content {
            ZoneContent::Bitmap { source, rect, border } => {
                match source {
                    Some(src) => writeln!(
                        out,
                        r#"<image href="{}"{} preserveAspectRatio="none"/>"#,
                        escape(src),
                        rect_attrs(*rect)
                    )?,
                    None => writeln!(
                        out,
                        r##"<rect class="placeholder"{} fill="#f3f4f6" stroke="#9ca3af" stroke-dasharray="4 4"/>"##,
                        rect_attrs(Rect::from_origin_size(Point::ZERO, group.size))
                    )?,
                }
                if border.is_visible() {
                    writeln!(
                        out,
                        r#"<rect{} fill="none"{}/>"#,
                        rect_attrs(Rect::from_origin_size(Point::ZERO, group.size)),
                        zone_stroke(border)
                    )?;
                }
            }
            ZoneContent::Circle { center, radii, fill, stroke } => {
                let paint = self.paint(out, fill)?;
                writeln!(
                    out,
                    r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}"{}{}/>"#,
                    num(center.x),
                    num(center.y),
                    num(radii.x),
                    num(radii.y),
                    paint,
                    zone_stroke(stroke)
                )?;
            }
            ZoneContent::Rect { rect, radius, fill, stroke } => {
                let paint = self.paint(out, fill)?;
                let rx = if *radius > 0.0 {
                    format!(r#" rx="{}""#, num(*radius))
                } else {
                    String::new()
                };
                writeln!(out, r#"<rect{}{rx}{}{}/>"#, rect_attrs(*rect), paint, zone_stroke(stroke))?;
            }
            ZoneContent::Path { path, fill, stroke } => {
                let paint = self.paint(out, fill)?;
                writeln!(
                    out,
                    r#"<path d="{}"{}{} stroke-linejoin="round" stroke-linecap="round"/>"#,
                    path.to_svg(),
                    paint,
                    zone_stroke(stroke)
                )?;
            }
            ZoneContent::Text(block) => self.write_text(out, block, group)?,
        }

        if clipped {
            out.push_str("</g>\n");
        }
        out.push_str("</g>\n");
        Ok(())
    }

    fn write_text(&mut self, out: &mut String, block: &TextBlock, group: &ZoneGroup) -> fmt::Result {
        if !block.background.is_none() {
            let paint = self.paint(out, &block.background)?;
            writeln!(
                out,
                r#"<rect{}{}/>"#,
                rect_attrs(Rect::from_origin_size(Point::ZERO, group.size)),
                paint
            )?;
        }
        let anchor = match block.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let mut decoration = Vec::new();
        if block.underline {
            decoration.push("underline");
        }
        if block.strikethrough {
            decoration.push("line-through");
        }

        for line in &block.lines {
            write!(
                out,
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}" text-anchor="{anchor}" dominant-baseline="hanging"{}"#,
                num(line.origin.x),
                num(line.origin.y),
                escape(&block.font_family),
                num(block.font_size),
                color_attr("fill", block.color),
            )?;
            if block.bold {
                out.push_str(r#" font-weight="bold""#);
            }
            if block.italic {
                out.push_str(r#" font-style="italic""#);
            }
            if !decoration.is_empty() {
                write!(out, r#" text-decoration="{}""#, decoration.join(" "))?;
            }
            if block.letter_spacing != 0.0 {
                write!(out, r#" letter-spacing="{}""#, num(block.letter_spacing))?;
            }
            writeln!(out, ">{}</text>", escape(&line.text))?;
        }
        Ok(())
    }

    /// Fill attribute for `fill`, emitting gradient defs when needed.
    fn paint(&mut self, out: &mut String, fill: &Fill) -> Result<String, fmt::Error> {
        Ok(match fill {
            Fill::None => r#" fill="none""#.to_string(),
            Fill::Solid { color } => color_attr("fill", *color),
            Fill::Gradient { angle, stops } => {
                let id = self.fresh_id("gradient");
                let (dx, dy) = (angle.to_radians().cos() / 2.0, angle.to_radians().sin() / 2.0);
                writeln!(
                    out,
                    r#"<defs><linearGradient id="{id}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                    num(0.5 - dx),
                    num(0.5 - dy),
                    num(0.5 + dx),
                    num(0.5 + dy)
                )?;
                for stop in stops {
                    writeln!(
                        out,
                        r#"<stop offset="{}"{}/>"#,
                        num(stop.offset.clamp(0.0, 1.0)),
                        color_attr("stop-color", stop.color)
                    )?;
                }
                writeln!(out, "</linearGradient></defs>")?;
                format!(r#" fill="url(#{id})""#)
            }
        })
    }
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        let scene = SceneBuilder::build(ctx);
        match self.write_document(&scene, ctx) {
            Ok(document) => self.document = Some(document),
            Err(e) => {
                log::error!("Failed to write SVG document: {}", e);
                self.document = None;
            }
        }
    }
}

fn write_guide(out: &mut String, guide: &Guide, ctx: &RenderContext) -> fmt::Result {
    let class = match guide.kind {
        GuideKind::Bleed => "bleed",
        GuideKind::Safe => "safe",
    };
    writeln!(
        out,
        r#"<rect class="{class}"{} fill="none" opacity="{}" pointer-events="none"{}/>"#,
        rect_attrs(guide.rect),
        num(GUIDE_OPACITY),
        stroke_attr(ctx.guide_color, 1.0 / ctx.zoom, Some(&GUIDE_DASH[..]))
    )
}

fn write_overlay(out: &mut String, overlay: &Overlay, ctx: &RenderContext) -> fmt::Result {
    let line = 1.0 / ctx.zoom;
    match overlay {
        Overlay::DrawPreview(rect) => writeln!(
            out,
            r#"<rect class="draw-preview"{} fill="none"{}/>"#,
            rect_attrs(*rect),
            stroke_attr(ctx.selection_color, line, Some(&GUIDE_DASH[..]))
        ),
        Overlay::PenPreview(points) => writeln!(
            out,
            r#"<polyline class="pen-preview" points="{}" fill="none"{}/>"#,
            points_attr(points),
            stroke_attr(ctx.selection_color, line, None)
        ),
        Overlay::SelectionOutline(corners) => writeln!(
            out,
            r#"<polygon class="selection" points="{}" fill="none"{}/>"#,
            points_attr(corners),
            stroke_attr(ctx.selection_color, line, None)
        ),
        Overlay::KeyHighlight(corners) => writeln!(
            out,
            r#"<polygon class="key" points="{}" fill="none"{}/>"#,
            points_attr(corners),
            stroke_attr(ctx.key_color, 2.0 * line, None)
        ),
        Overlay::CanvasHighlight(rect) => writeln!(
            out,
            r#"<rect class="key"{} fill="none"{}/>"#,
            rect_attrs(*rect),
            stroke_attr(ctx.key_color, 2.0 * line, None)
        ),
        Overlay::Handles(handles) => {
            for handle in handles {
                write_handle(out, handle, ctx)?;
            }
            Ok(())
        }
    }
}

fn write_handle(out: &mut String, handle: &Handle, ctx: &RenderContext) -> fmt::Result {
    let size = HANDLE_SIZE / ctx.zoom;
    let stroke = stroke_attr(ctx.selection_color, 1.0 / ctx.zoom, None);
    let white = Color::from_rgba8(255, 255, 255, 255);
    match handle.kind {
        HandleKind::Rotate => writeln!(
            out,
            r#"<circle class="handle" cx="{}" cy="{}" r="{}"{}{}/>"#,
            num(handle.position.x),
            num(handle.position.y),
            num(size / 2.0),
            fill_attr(white),
            stroke
        ),
        _ => writeln!(
            out,
            r#"<rect class="handle"{}{}{}/>"#,
            rect_attrs(Rect::from_center_size(handle.position, (size, size))),
            fill_attr(white),
            stroke
        ),
    }
}

fn rect_attrs(rect: Rect) -> String {
    format!(
        r#" x="{}" y="{}" width="{}" height="{}""#,
        num(rect.x0),
        num(rect.y0),
        num(rect.width()),
        num(rect.height())
    )
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `name="#rrggbb"` plus an opacity attribute for translucent colors.
fn color_attr(name: &str, color: SerializableColor) -> String {
    let hex = format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b);
    if color.a == 255 {
        format!(r#" {name}="{hex}""#)
    } else {
        format!(
            r#" {name}="{hex}" {name}-opacity="{}""#,
            num(color.a as f64 / 255.0)
        )
    }
}

fn fill_attr(color: Color) -> String {
    color_attr("fill", color.into())
}

fn stroke_attr(color: Color, width: f64, dash: Option<&[f64]>) -> String {
    let mut attr = color_attr("stroke", color.into());
    let _ = write!(attr, r#" stroke-width="{}""#, num(width));
    if let Some(dash) = dash.filter(|d| !d.is_empty()) {
        let pattern: Vec<String> = dash.iter().map(|d| num(*d)).collect();
        let _ = write!(attr, r#" stroke-dasharray="{}""#, pattern.join(" "));
    }
    attr
}

fn zone_stroke(stroke: &Stroke) -> String {
    if !stroke.is_visible() {
        return r#" stroke="none""#.to_string();
    }
    stroke_attr(stroke.color.into(), stroke.width, Some(stroke.dash.as_slice()))
}

/// Format a number with at most three decimals and no trailing zeros.
fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
