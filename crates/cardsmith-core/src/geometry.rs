//! Physical card geometry: units, bleed/safe areas, and the zone
//! percentage coordinate system.

use crate::zone::Zone;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Pixels per millimetre at 100% zoom (96 DPI).
pub const PX_PER_MM: f64 = 96.0 / 25.4;

/// Tolerance (in percent) before a photo zone's ratio is corrected.
pub const RATIO_EPSILON: f64 = 0.01;

/// Physical unit for canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Mm,
    Cm,
    In,
}

impl Unit {
    /// Millimetres per one of this unit.
    pub fn mm_per_unit(&self) -> f64 {
        match self {
            Unit::Mm => 1.0,
            Unit::Cm => 10.0,
            Unit::In => 25.4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::In => "in",
        }
    }
}

/// Card orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// Orientation implied by dimensions; `None` for a square card.
    pub fn for_dimensions(width: f64, height: f64) -> Option<Self> {
        if width > height {
            Some(Orientation::Horizontal)
        } else if height > width {
            Some(Orientation::Vertical)
        } else {
            None
        }
    }

    /// Whether `width`×`height` already has this orientation.
    pub fn matches(&self, width: f64, height: f64) -> bool {
        match self {
            Orientation::Horizontal => width > height,
            Orientation::Vertical => height > width,
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn default_show_guides() -> bool {
    true
}

/// Printable dimensions and guide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSettings {
    /// Trim width, in `unit`.
    pub width: f64,
    /// Trim height, in `unit`.
    pub height: f64,
    #[serde(default)]
    pub unit: Unit,
    /// Bleed margin in millimetres.
    #[serde(default)]
    pub bleed: f64,
    /// Safe margin inside the trim line, in millimetres.
    #[serde(default)]
    pub safe_margin: f64,
    #[serde(default = "default_show_guides")]
    pub show_guides: bool,
}

impl Default for CanvasSettings {
    /// CR80 card, portrait.
    fn default() -> Self {
        Self {
            width: 54.0,
            height: 85.6,
            unit: Unit::Mm,
            bleed: 3.0,
            safe_margin: 3.0,
            show_guides: true,
        }
    }
}

impl CanvasSettings {
    pub fn width_mm(&self) -> f64 {
        self.width * self.unit.mm_per_unit()
    }

    pub fn height_mm(&self) -> f64 {
        self.height * self.unit.mm_per_unit()
    }

    /// Width over height of the trim area.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height <= 0.0 {
            return 1.0;
        }
        self.width / self.height
    }

    /// Express the same physical size in another unit.
    ///
    /// Dimensions are rounded to two decimals so repeated conversions do not
    /// drift.
    pub fn convert_unit(&self, to: Unit) -> Self {
        if to == self.unit {
            return self.clone();
        }
        let factor = self.unit.mm_per_unit() / to.mm_per_unit();
        Self {
            width: round2(self.width * factor),
            height: round2(self.height * factor),
            unit: to,
            ..self.clone()
        }
    }

    pub fn orientation(&self) -> Option<Orientation> {
        Orientation::for_dimensions(self.width, self.height)
    }
}

/// Pixel layout of a card face at 100% zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGeometry {
    /// Full canvas size including bleed.
    pub outer: Size,
    /// Inset of the trim line from the outer edge.
    pub bleed_inset: f64,
    /// Inset of the safe area from the outer edge.
    pub safe_inset: f64,
}

impl CardGeometry {
    /// Derive pixel geometry from physical settings.
    pub fn from_settings(settings: &CanvasSettings) -> Self {
        let bleed_mm = settings.bleed.max(0.0);
        Self {
            outer: Size::new(
                (settings.width_mm() + bleed_mm * 2.0) * PX_PER_MM,
                (settings.height_mm() + bleed_mm * 2.0) * PX_PER_MM,
            ),
            bleed_inset: bleed_mm * PX_PER_MM,
            safe_inset: (bleed_mm + settings.safe_margin.max(0.0)) * PX_PER_MM,
        }
    }

    /// Build geometry directly from pixel measurements.
    pub fn from_pixels(outer: Size, bleed_inset: f64, safe_inset: f64) -> Self {
        Self {
            outer,
            bleed_inset,
            safe_inset,
        }
    }

    pub fn outer_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.outer)
    }

    pub fn trim_rect(&self) -> Rect {
        self.outer_rect().inset(-self.bleed_inset)
    }

    pub fn safe_rect(&self) -> Rect {
        self.outer_rect().inset(-self.safe_inset)
    }

    pub fn trim_size(&self) -> Size {
        Size::new(
            (self.outer.width - self.bleed_inset * 2.0).max(0.0),
            (self.outer.height - self.bleed_inset * 2.0).max(0.0),
        )
    }

    /// Convert a percentage-space rect to canvas pixels.
    pub fn percent_to_px_rect(&self, rect: Rect) -> Rect {
        let trim = self.trim_size();
        Rect::new(
            self.bleed_inset + rect.x0 / 100.0 * trim.width,
            self.bleed_inset + rect.y0 / 100.0 * trim.height,
            self.bleed_inset + rect.x1 / 100.0 * trim.width,
            self.bleed_inset + rect.y1 / 100.0 * trim.height,
        )
    }

    /// Pixel rectangle of a zone.
    pub fn zone_rect(&self, zone: &Zone) -> Rect {
        self.percent_to_px_rect(zone.bounds())
    }

    /// Convert a canvas pixel point to trim-relative percentages.
    pub fn px_to_percent(&self, point: Point) -> Point {
        let trim = self.trim_size();
        if trim.width <= 0.0 || trim.height <= 0.0 {
            return Point::ZERO;
        }
        Point::new(
            (point.x - self.bleed_inset) / trim.width * 100.0,
            (point.y - self.bleed_inset) / trim.height * 100.0,
        )
    }

    /// Convert a canvas pixel rect to trim-relative percentages.
    pub fn px_to_percent_rect(&self, rect: Rect) -> Rect {
        let p0 = self.px_to_percent(Point::new(rect.x0, rect.y0));
        let p1 = self.px_to_percent(Point::new(rect.x1, rect.y1));
        Rect::from_points(p0, p1)
    }

    /// Convert a pixel length along the x axis into percent of trim width.
    pub fn px_to_percent_x(&self, dx: f64) -> f64 {
        let w = self.trim_size().width;
        if w <= 0.0 { 0.0 } else { dx / w * 100.0 }
    }

    /// Convert a pixel length along the y axis into percent of trim height.
    pub fn px_to_percent_y(&self, dy: f64) -> f64 {
        let h = self.trim_size().height;
        if h <= 0.0 { 0.0 } else { dy / h * 100.0 }
    }
}

/// Scale `source` to fill `target`, cropping overflow, centered.
pub fn fit_cover(source: Size, target: Rect) -> Rect {
    if source.width <= 0.0 || source.height <= 0.0 {
        return target;
    }
    let scale = (target.width() / source.width).max(target.height() / source.height);
    centered(source, scale, target)
}

/// Scale `source` to fit inside `target`, letterboxed, centered.
pub fn fit_contain(source: Size, target: Rect) -> Rect {
    if source.width <= 0.0 || source.height <= 0.0 {
        return target;
    }
    let scale = (target.width() / source.width).min(target.height() / source.height);
    centered(source, scale, target)
}

fn centered(source: Size, scale: f64, target: Rect) -> Rect {
    let size = Size::new(source.width * scale, source.height * scale);
    let center = target.center();
    Rect::from_center_size(center, size)
}

/// Height (percent) that makes a photo zone physically square on a card
/// whose trim area has width-over-height `aspect`.
pub fn photo_height_for(width: f64, aspect: f64) -> f64 {
    width * aspect
}

/// Re-assert the square-photo invariant over a collection.
///
/// Returns `None` when every `STUDENT_PHOTO` zone is already within
/// `RATIO_EPSILON`; otherwise the corrected collection.
pub fn enforce_photo_ratio(zones: &[Zone], aspect: f64) -> Option<Vec<Zone>> {
    let violates = |z: &Zone| {
        z.kind.is_photo() && (z.height - photo_height_for(z.width, aspect)).abs() > RATIO_EPSILON
    };
    if !zones.iter().any(violates) {
        return None;
    }
    Some(
        zones
            .iter()
            .map(|z| {
                if violates(z) {
                    let mut fixed = z.clone();
                    fixed.height = photo_height_for(z.width, aspect);
                    fixed
                } else {
                    z.clone()
                }
            })
            .collect(),
    )
}
