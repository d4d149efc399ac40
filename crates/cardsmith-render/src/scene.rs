//! Backend-neutral scene: the drawable primitives for one card face.

use crate::renderer::RenderContext;
use cardsmith_core::geometry::{fit_contain, fit_cover};
use cardsmith_core::handles::{Handle, get_handles};
use cardsmith_core::selection::KeyElement;
use cardsmith_core::zone::{
    Fill, FontWeight, ImageFit, SerializableColor, Stroke, StyleKind, TextAlign,
    TextStyle, VerticalAlign, Zone, ZoneId, ZoneKind, parse_path_data,
};
use kurbo::{Affine, BezPath, Point, Rect, RoundedRect, Size, Vec2};

/// Dash pattern for guides and previews, in pixels.
pub const GUIDE_DASH: [f64; 2] = [4.0, 4.0];
/// Opacity of the bleed and safe guides.
pub const GUIDE_OPACITY: f64 = 0.5;

/// Which non-interactive guide a rect is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideKind {
    Bleed,
    Safe,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    pub kind: GuideKind,
    pub rect: Rect,
}

/// One drawable line of text, in zone-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Anchor point; `y` is the top of the line box.
    pub origin: Point,
}

/// Fully resolved text content of a zone.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Background fill over the whole zone box.
    pub background: Fill,
    pub lines: Vec<TextLine>,
    pub font_family: String,
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub align: TextAlign,
    pub letter_spacing: f64,
    pub color: SerializableColor,
}

/// Exactly one content primitive per zone, in zone-local coordinates
/// (origin at the zone's top-left, unrotated).
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneContent {
    /// `source` is `None` for image zones without an uploaded image.
    Bitmap {
        source: Option<String>,
        rect: Rect,
        border: Stroke,
    },
    Circle {
        center: Point,
        radii: Vec2,
        fill: Fill,
        stroke: Stroke,
    },
    Rect {
        rect: Rect,
        radius: f64,
        fill: Fill,
        stroke: Stroke,
    },
    Path {
        path: BezPath,
        fill: Fill,
        stroke: Stroke,
    },
    Text(TextBlock),
}

/// A positioned zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneGroup {
    pub id: ZoneId,
    pub kind: ZoneKind,
    /// Zone-local to canvas pixels: translate, then rotate about the center.
    pub transform: Affine,
    pub size: Size,
    pub clip: Option<RoundedRect>,
    pub opacity: f64,
    pub content: ZoneContent,
}

/// Interaction overlays drawn above the zone layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    DrawPreview(Rect),
    PenPreview(Vec<Point>),
    /// Outline of a selected zone (rotated box corners).
    SelectionOutline([Point; 4]),
    Handles(Vec<Handle>),
    KeyHighlight([Point; 4]),
    CanvasHighlight(Rect),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    Guide(Guide),
    /// Trim line; the hit target for the canvas key element.
    TrimBoundary(Rect),
    Zone(ZoneGroup),
    Overlay(Overlay),
}

/// Drawable primitives in paint order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    /// Full card surface including bleed.
    pub surface: Size,
    pub items: Vec<SceneItem>,
}

impl Scene {
    pub fn zone_groups(&self) -> impl Iterator<Item = &ZoneGroup> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Zone(group) => Some(group),
            _ => None,
        })
    }

    pub fn overlays(&self) -> impl Iterator<Item = &Overlay> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Overlay(overlay) => Some(overlay),
            _ => None,
        })
    }
}

/// Builds a [`Scene`] from a render context.
pub struct SceneBuilder;

impl SceneBuilder {
    pub fn build(ctx: &RenderContext) -> Scene {
        let geometry = &ctx.geometry;
        let mut items = Vec::new();

        if ctx.show_guides {
            items.push(SceneItem::Guide(Guide {
                kind: GuideKind::Bleed,
                rect: geometry.outer_rect(),
            }));
        }
        items.push(SceneItem::TrimBoundary(geometry.trim_rect()));
        if ctx.show_guides {
            items.push(SceneItem::Guide(Guide {
                kind: GuideKind::Safe,
                rect: geometry.safe_rect(),
            }));
        }

        let mut ordered: Vec<(i32, &Zone)> = ctx
            .zones
            .iter()
            .enumerate()
            .map(|(i, z)| (z.z_index.unwrap_or(i as i32), z))
            .collect();
        ordered.sort_by_key(|(z, _)| *z);
        for (_, zone) in ordered {
            if !zone.visible {
                continue;
            }
            items.push(SceneItem::Zone(zone_group(ctx, zone)));
        }

        items.extend(overlays(ctx).into_iter().map(SceneItem::Overlay));
        Scene {
            surface: geometry.outer,
            items,
        }
    }
}

fn zone_transform(rect: Rect, rotation: f64) -> Affine {
    let half = Vec2::new(rect.width() / 2.0, rect.height() / 2.0);
    Affine::translate(rect.center().to_vec2())
        * Affine::rotate(rotation.to_radians())
        * Affine::translate(-half)
}

fn outline(rect: Rect, rotation: f64) -> [Point; 4] {
    let t = zone_transform(rect, rotation);
    let (w, h) = (rect.width(), rect.height());
    [
        t * Point::new(0.0, 0.0),
        t * Point::new(w, 0.0),
        t * Point::new(w, h),
        t * Point::new(0.0, h),
    ]
}

fn zone_group(ctx: &RenderContext, zone: &Zone) -> ZoneGroup {
    let rect = ctx.geometry.zone_rect(zone);
    let size = rect.size();
    let local = Rect::from_origin_size(Point::ZERO, size);
    let common = &zone.style.common;
    let radius = common.corner_radius.max(0.0);

    let content = match &zone.style.kind {
        StyleKind::Image(image) => {
            let source = Some(zone.mock_content.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            let natural = source
                .as_deref()
                .and_then(|url| ctx.images.and_then(|images| images.image_size(url)));
            let fitted = match (natural, image.fit) {
                (Some(natural), ImageFit::Cover) => fit_cover(natural, local),
                (Some(natural), ImageFit::Contain) => fit_contain(natural, local),
                (None, _) => local,
            };
            ZoneContent::Bitmap {
                source,
                rect: fitted,
                border: image.border.clone(),
            }
        }
        StyleKind::Shape(shape) => match zone.kind {
            ZoneKind::Circle => ZoneContent::Circle {
                center: local.center(),
                radii: Vec2::new(size.width / 2.0, size.height / 2.0),
                fill: shape.fill.clone(),
                stroke: shape.stroke.clone(),
            },
            ZoneKind::Path => ZoneContent::Path {
                path: scaled_path(zone, shape.path_data.as_deref(), &shape.points, size),
                fill: shape.fill.clone(),
                stroke: shape.stroke.clone(),
            },
            _ => ZoneContent::Rect {
                rect: local,
                radius,
                fill: shape.fill.clone(),
                stroke: shape.stroke.clone(),
            },
        },
        StyleKind::Text(text) => ZoneContent::Text(text_block(
            text,
            &zone.mock_content,
            size,
            common.padding,
        )),
    };

    let clip = match (&content, radius > 0.0) {
        (_, true) => Some(RoundedRect::from_rect(local, radius)),
        (ZoneContent::Bitmap { .. }, false) => Some(RoundedRect::from_rect(local, 0.0)),
        _ => None,
    };

    ZoneGroup {
        id: zone.id,
        kind: zone.kind,
        transform: zone_transform(rect, zone.rotation),
        size,
        clip,
        opacity: common.opacity.clamp(0.0, 1.0),
        content,
    }
}

/// Scale normalized (0–100) path data into a `size` box.
fn scaled_path(zone: &Zone, data: Option<&str>, points: &[f64], size: Size) -> BezPath {
    let scale = Affine::scale_non_uniform(size.width / 100.0, size.height / 100.0);
    let parsed = match data {
        Some(data) => match parse_path_data(data) {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Zone {}: {}", zone.id, e);
                None
            }
        },
        None => None,
    };
    let mut path = parsed.unwrap_or_else(|| {
        let mut path = BezPath::new();
        let mut pairs = points.chunks_exact(2);
        if let Some(first) = pairs.next() {
            path.move_to((first[0], first[1]));
            for p in pairs {
                path.line_to((p[0], p[1]));
            }
        }
        path
    });
    path.apply_affine(scale);
    path
}

fn text_block(style: &TextStyle, content: &str, size: Size, padding: f64) -> TextBlock {
    let text = if style.uppercase {
        content.to_uppercase()
    } else {
        content.to_string()
    };
    let line_height = style.font_size * style.line_height;
    let rows: Vec<&str> = text.lines().collect();
    let total = line_height * rows.len() as f64;

    let top = match style.vertical_align {
        VerticalAlign::Top => padding,
        VerticalAlign::Middle => (size.height - total) / 2.0,
        VerticalAlign::Bottom => size.height - padding - total,
    };
    let x = match style.align {
        TextAlign::Left => padding,
        TextAlign::Center => size.width / 2.0,
        TextAlign::Right => size.width - padding,
    };
    let lines = rows
        .iter()
        .enumerate()
        .map(|(i, row)| TextLine {
            text: row.to_string(),
            origin: Point::new(x, top + i as f64 * line_height),
        })
        .collect();

    TextBlock {
        background: style.background.clone(),
        lines,
        font_family: style.font_family.clone(),
        font_size: style.font_size,
        bold: style.font_weight == FontWeight::Bold,
        italic: style.italic,
        underline: style.underline,
        strikethrough: style.strikethrough,
        align: style.align,
        letter_spacing: style.letter_spacing,
        color: style.color,
    }
}

fn overlays(ctx: &RenderContext) -> Vec<Overlay> {
    let mut out = Vec::new();
    if let Some(rect) = ctx.draw_preview {
        out.push(Overlay::DrawPreview(rect));
    }
    if !ctx.pen_points.is_empty() {
        out.push(Overlay::PenPreview(ctx.pen_points.to_vec()));
    }
    let Some(selection) = ctx.selection else {
        return out;
    };

    let selected: Vec<&Zone> = ctx
        .zones
        .iter()
        .filter(|z| z.visible && selection.contains(z.id))
        .collect();
    for zone in &selected {
        let rect = ctx.geometry.zone_rect(zone);
        out.push(Overlay::SelectionOutline(outline(rect, zone.rotation)));
    }
    if let [zone] = selected.as_slice() {
        if !zone.locked {
            let rect = ctx.geometry.zone_rect(zone);
            out.push(Overlay::Handles(get_handles(zone, rect)));
        }
    }
    match selection.key() {
        Some(KeyElement::Zone(id)) => {
            if let Some(zone) = ctx.zones.iter().find(|z| z.id == id) {
                let rect = ctx.geometry.zone_rect(zone);
                out.push(Overlay::KeyHighlight(outline(rect, zone.rotation)));
            }
        }
        Some(KeyElement::Canvas) => out.push(Overlay::CanvasHighlight(ctx.geometry.trim_rect())),
        None => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape;
    use cardsmith_core::geometry::CardGeometry;
    use cardsmith_core::selection::Selection;
    use cardsmith_core::zone::Side;
    use std::collections::HashMap;

    fn geometry() -> CardGeometry {
        CardGeometry::from_pixels(Size::new(220.0, 320.0), 10.0, 20.0)
    }

    fn zone(kind: ZoneKind) -> Zone {
        Zone::new(kind, Side::Front).with_bounds(0.0, 0.0, 50.0, 50.0)
    }

    #[test]
    fn test_layer_order() {
        let mut a = zone(ZoneKind::Rectangle);
        a.z_index = Some(2);
        let mut b = zone(ZoneKind::Circle);
        b.z_index = Some(1);
        let mut hidden = zone(ZoneKind::Text);
        hidden.visible = false;
        let zones = vec![a.clone(), b.clone(), hidden];

        let scene = SceneBuilder::build(&RenderContext::new(&zones, geometry()));
        assert!(matches!(scene.items[0], SceneItem::Guide(Guide { kind: GuideKind::Bleed, .. })));
        assert!(matches!(scene.items[1], SceneItem::TrimBoundary(_)));
        assert!(matches!(scene.items[2], SceneItem::Guide(Guide { kind: GuideKind::Safe, .. })));
        let ids: Vec<_> = scene.zone_groups().map(|g| g.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn test_guides_can_be_hidden() {
        let zones = vec![];
        let scene = SceneBuilder::build(&RenderContext::new(&zones, geometry()).with_guides(false));
        assert_eq!(scene.items, vec![SceneItem::TrimBoundary(Rect::new(10.0, 10.0, 210.0, 310.0))]);
    }

    #[test]
    fn test_zone_group_transform_and_clip() {
        let mut z = zone(ZoneKind::Rectangle);
        z.style.common.corner_radius = 4.0;
        z.set_rotation(90.0);
        let zones = vec![z];
        let scene = SceneBuilder::build(&RenderContext::new(&zones, geometry()));
        let group = scene.zone_groups().next().unwrap();
        assert_eq!(group.size, Size::new(100.0, 150.0));
        assert!(group.clip.is_some());
        // Local center maps to the zone's canvas center.
        let center = group.transform * Point::new(50.0, 75.0);
        assert!((center - Point::new(60.0, 85.0)).hypot() < 1e-9);
        // Local top-left rotates to the right of the center.
        let corner = group.transform * Point::new(0.0, 0.0);
        assert!((corner - Point::new(135.0, 35.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_bitmap_fit_uses_natural_size() {
        let mut z = zone(ZoneKind::Image);
        z.mock_content = "memory://wide.png".to_string();
        let zones = vec![z];
        let mut images = HashMap::new();
        images.insert("memory://wide.png".to_string(), Size::new(300.0, 150.0));

        let scene = SceneBuilder::build(&RenderContext::new(&zones, geometry()).with_images(&images));
        let group = scene.zone_groups().next().unwrap();
        let ZoneContent::Bitmap { source, rect, .. } = &group.content else {
            panic!("expected bitmap content");
        };
        assert_eq!(source.as_deref(), Some("memory://wide.png"));
        assert_eq!(rect.height(), 150.0);
        assert_eq!(rect.width(), 300.0);
        assert!(group.clip.is_some());
    }

    #[test]
    fn test_empty_image_has_placeholder_source() {
        let zones = vec![zone(ZoneKind::StudentPhoto)];
        let scene = SceneBuilder::build(&RenderContext::new(&zones, geometry()));
        let group = scene.zone_groups().next().unwrap();
        assert!(matches!(&group.content, ZoneContent::Bitmap { source: None, .. }));
    }

    #[test]
    fn test_path_scaled_into_box() {
        let mut z = zone(ZoneKind::Path);
        if let StyleKind::Shape(shape) = &mut z.style.kind {
            shape.path_data = Some("M 0 0 L 100 100".to_string());
        }
        let zones = vec![z];
        let scene = SceneBuilder::build(&RenderContext::new(&zones, geometry()));
        let ZoneContent::Path { path, .. } = &scene.zone_groups().next().unwrap().content else {
            panic!("expected path content");
        };
        assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 100.0, 150.0));
    }

    #[test]
    fn test_text_layout() {
        let mut z = zone(ZoneKind::SchoolName);
        z.mock_content = "North\nCampus".to_string();
        if let StyleKind::Text(text) = &mut z.style.kind {
            text.uppercase = true;
            text.align = TextAlign::Right;
            text.vertical_align = VerticalAlign::Bottom;
            text.font_size = 10.0;
            text.line_height = 1.5;
        }
        z.style.common.padding = 5.0;
        let zones = vec![z];
        let scene = SceneBuilder::build(&RenderContext::new(&zones, geometry()));
        let ZoneContent::Text(block) = &scene.zone_groups().next().unwrap().content else {
            panic!("expected text content");
        };
        assert_eq!(block.lines.len(), 2);
        assert_eq!(block.lines[0].text, "NORTH");
        assert_eq!(block.lines[0].origin, Point::new(95.0, 115.0));
        assert_eq!(block.lines[1].origin, Point::new(95.0, 130.0));
    }

    #[test]
    fn test_selection_overlays() {
        let a = zone(ZoneKind::Rectangle);
        let b = zone(ZoneKind::Circle);
        let zones = vec![a.clone(), b.clone()];

        let mut selection = Selection::new();
        selection.select_only(a.id);
        let scene = SceneBuilder::build(&RenderContext::new(&zones, geometry()).with_selection(Some(&selection)));
        assert!(scene.overlays().any(|o| matches!(o, Overlay::Handles(_))));

        selection.set([a.id, b.id]);
        selection.set_key(Some(KeyElement::Zone(b.id)));
        let scene = SceneBuilder::build(&RenderContext::new(&zones, geometry()).with_selection(Some(&selection)));
        assert!(!scene.overlays().any(|o| matches!(o, Overlay::Handles(_))));
        assert_eq!(
            scene.overlays().filter(|o| matches!(o, Overlay::SelectionOutline(_))).count(),
            2
        );
        assert!(scene.overlays().any(|o| matches!(o, Overlay::KeyHighlight(_))));

        selection.set_key(Some(KeyElement::Canvas));
        let scene = SceneBuilder::build(&RenderContext::new(&zones, geometry()).with_selection(Some(&selection)));
        assert!(scene.overlays().any(|o| matches!(o, Overlay::CanvasHighlight(_))));
    }
}
