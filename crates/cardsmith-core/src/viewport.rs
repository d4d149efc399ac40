//! Viewport zoom/pan and the debounced fit-to-card.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Delay between a dimension change and the viewport re-fit.
pub const FIT_DEBOUNCE: Duration = Duration::from_millis(100);
/// Padding kept around the card when fitting, in screen pixels.
pub const FIT_PADDING: f64 = 40.0;

/// View transform from canvas pixels to screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub offset: Vec2,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Size of the host's drawing surface.
    pub size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 5.0,
            size: Size::new(800.0, 600.0),
        }
    }
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    pub fn screen_to_canvas(&self, point: Point) -> Point {
        self.transform().inverse() * point
    }

    pub fn canvas_to_screen(&self, point: Point) -> Point {
        self.transform() * point
    }

    /// Zoom, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let anchor = self.screen_to_canvas(screen_point);
        self.zoom = new_zoom;
        self.offset += screen_point - self.canvas_to_screen(anchor);
    }

    /// Zoom and center so `bounds` fills the surface minus padding.
    pub fn fit_to_bounds(&mut self, bounds: Rect, padding: f64) {
        if bounds.is_zero_area() {
            self.offset = Vec2::ZERO;
            self.zoom = 1.0;
            return;
        }
        let available = Size::new(
            (self.size.width - padding * 2.0).max(1.0),
            (self.size.height - padding * 2.0).max(1.0),
        );
        let scale_x = available.width / bounds.width();
        let scale_y = available.height / bounds.height();
        self.zoom = scale_x.min(scale_y).clamp(self.min_zoom, self.max_zoom);

        let center = bounds.center();
        self.offset = Vec2::new(
            self.size.width / 2.0 - center.x * self.zoom,
            self.size.height / 2.0 - center.y * self.zoom,
        );
    }
}

/// Trailing-edge debounce for viewport re-fits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitScheduler {
    due: Option<Instant>,
}

impl FitScheduler {
    /// (Re)schedule a fit `FIT_DEBOUNCE` after `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.due = Some(now + FIT_DEBOUNCE);
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Returns true (once) when the scheduled fit is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_centers_card() {
        let mut viewport = Viewport::new(Size::new(500.0, 500.0));
        viewport.fit_to_bounds(Rect::new(0.0, 0.0, 200.0, 400.0), 50.0);
        assert!((viewport.zoom - 1.0).abs() < 1e-9);
        let center = viewport.canvas_to_screen(Point::new(100.0, 200.0));
        assert!((center.x - 250.0).abs() < 1e-9);
        assert!((center.y - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_screen_roundtrip() {
        let mut viewport = Viewport::default();
        viewport.offset = Vec2::new(30.0, -20.0);
        viewport.zoom = 1.5;
        let p = Point::new(123.0, 456.0);
        let back = viewport.canvas_to_screen(viewport.screen_to_canvas(p));
        assert!((back - p).hypot() < 1e-9);
    }

    #[test]
    fn test_zoom_at_keeps_anchor() {
        let mut viewport = Viewport::default();
        let anchor = Point::new(200.0, 100.0);
        let before = viewport.screen_to_canvas(anchor);
        viewport.zoom_at(anchor, 2.0);
        let after = viewport.screen_to_canvas(anchor);
        assert!((before - after).hypot() < 1e-9);
    }

    #[test]
    fn test_fit_scheduler_debounces() {
        let start = Instant::now();
        let mut fit = FitScheduler::default();
        fit.schedule(start);
        assert!(!fit.poll(start + Duration::from_millis(50)));
        fit.schedule(start + Duration::from_millis(50));
        assert!(!fit.poll(start + Duration::from_millis(120)));
        assert!(fit.poll(start + Duration::from_millis(150)));
        assert!(!fit.poll(start + Duration::from_millis(300)));
    }
}
