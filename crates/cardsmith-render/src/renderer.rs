//! Renderer trait abstraction.

use cardsmith_core::geometry::CardGeometry;
use cardsmith_core::selection::Selection;
use cardsmith_core::zone::Zone;
use cardsmith_core::Designer;
use kurbo::{Point, Rect, Size};
use peniko::Color;
use std::collections::HashMap;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("No scene has been built")]
    NoScene,
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Looks up the natural pixel size of an image by URL.
pub trait ImageResolver {
    fn image_size(&self, url: &str) -> Option<Size>;
}

impl ImageResolver for HashMap<String, Size> {
    fn image_size(&self, url: &str) -> Option<Size> {
        self.get(url).copied()
    }
}

/// Context for rendering one card face.
pub struct RenderContext<'a> {
    /// Zones of the face being rendered, any order.
    pub zones: &'a [Zone],
    /// Pixel geometry of the card.
    pub geometry: CardGeometry,
    /// Draw the bleed and safe-area guides.
    pub show_guides: bool,
    /// Current zoom; handle overlays keep a constant screen size.
    pub zoom: f64,
    pub selection: Option<&'a Selection>,
    /// Live rectangle while drawing.
    pub draw_preview: Option<Rect>,
    /// Points captured so far by the pen tool.
    pub pen_points: &'a [Point],
    pub images: Option<&'a dyn ImageResolver>,
    pub background_color: Color,
    pub card_color: Color,
    pub guide_color: Color,
    pub selection_color: Color,
    /// Highlight color for the alignment key element.
    pub key_color: Color,
}

impl<'a> RenderContext<'a> {
    pub fn new(zones: &'a [Zone], geometry: CardGeometry) -> Self {
        Self {
            zones,
            geometry,
            show_guides: true,
            zoom: 1.0,
            selection: None,
            draw_preview: None,
            pen_points: &[],
            images: None,
            background_color: Color::from_rgba8(243, 244, 246, 255),
            card_color: Color::from_rgba8(255, 255, 255, 255),
            guide_color: Color::from_rgba8(239, 68, 68, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
            key_color: Color::from_rgba8(249, 115, 22, 255),
        }
    }

    /// Context for the designer's current face. `zones` is usually
    /// `designer.live_zones()`.
    pub fn for_designer(designer: &'a Designer, zones: &'a [Zone]) -> Self {
        Self::new(zones, designer.geometry())
            .with_guides(designer.settings().show_guides)
            .with_zoom(designer.viewport().zoom)
            .with_selection(Some(designer.selection()))
            .with_draw_preview(designer.tools().draw_preview())
            .with_pen_points(designer.tools().pen_points())
    }

    pub fn with_guides(mut self, show: bool) -> Self {
        self.show_guides = show;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_selection(mut self, selection: Option<&'a Selection>) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_draw_preview(mut self, rect: Option<Rect>) -> Self {
        self.draw_preview = rect;
        self
    }

    pub fn with_pen_points(mut self, points: &'a [Point]) -> Self {
        self.pen_points = points;
        self
    }

    pub fn with_images(mut self, images: &'a dyn ImageResolver) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Trait for rendering backends.
///
/// The core never depends on a backend; hosts inject one.
pub trait Renderer: Send + Sync {
    /// Build the drawing commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
