//! Transform handles and resize constraints.

use crate::zone::{Zone, ZoneId, ZoneKind};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 10.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;
/// Distance from the zone's top edge to the rotation handle.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;
/// Smallest width or height a resize may produce, in pixels.
pub const MIN_ZONE_PX: f64 = 5.0;
/// Rotation snap step (degrees) when snapping is requested.
pub const ROTATION_SNAP: f64 = 15.0;

/// Type of transform handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Corner(Corner),
    Edge(Edge),
    /// Rotation handle (above the top edge).
    Rotate,
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl HandleKind {
    /// Whether dragging this handle moves the left edge.
    fn moves_left(&self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::TopLeft | Corner::BottomLeft) | HandleKind::Edge(Edge::Left)
        )
    }

    fn moves_right(&self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::TopRight | Corner::BottomRight) | HandleKind::Edge(Edge::Right)
        )
    }

    fn moves_top(&self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::TopLeft | Corner::TopRight) | HandleKind::Edge(Edge::Top)
        )
    }

    fn moves_bottom(&self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::BottomLeft | Corner::BottomRight) | HandleKind::Edge(Edge::Bottom)
        )
    }
}

/// A transform handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in canvas pixels.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }
}

/// Handles for a zone whose unrotated pixel box is `rect`.
///
/// Aspect-locked kinds only get corner handles; kinds that cannot rotate get
/// no rotation handle.
pub fn get_handles(zone: &Zone, rect: Rect) -> Vec<Handle> {
    let center = rect.center();
    let half_w = rect.width() / 2.0;
    let half_h = rect.height() / 2.0;
    let (sin_r, cos_r) = zone.rotation.to_radians().sin_cos();
    let place = |dx: f64, dy: f64| {
        Point::new(
            center.x + dx * cos_r - dy * sin_r,
            center.y + dx * sin_r + dy * cos_r,
        )
    };

    let mut handles = vec![
        Handle::new(place(-half_w, -half_h), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(place(half_w, -half_h), HandleKind::Corner(Corner::TopRight)),
        Handle::new(place(-half_w, half_h), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(place(half_w, half_h), HandleKind::Corner(Corner::BottomRight)),
    ];
    if !zone.kind.is_aspect_locked() {
        handles.extend([
            Handle::new(place(0.0, -half_h), HandleKind::Edge(Edge::Top)),
            Handle::new(place(half_w, 0.0), HandleKind::Edge(Edge::Right)),
            Handle::new(place(0.0, half_h), HandleKind::Edge(Edge::Bottom)),
            Handle::new(place(-half_w, 0.0), HandleKind::Edge(Edge::Left)),
        ]);
    }
    if zone.kind.allows_rotation() {
        handles.push(Handle::new(
            place(0.0, -half_h - ROTATE_HANDLE_OFFSET),
            HandleKind::Rotate,
        ));
    }
    handles
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(zone: &Zone, rect: Rect, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(zone, rect)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}

/// Constrain a proposed resize of a `kind` zone from `old` to `new`.
///
/// Aspect-locked kinds keep 1:1 (student photo) or the current ratio. The
/// axis with the larger change drives; the other dimension is recomputed.
/// The top-left of `new` is kept.
pub fn constrain_resize(kind: ZoneKind, old: Rect, new: Rect) -> Rect {
    if !kind.is_aspect_locked() {
        return new;
    }
    let ratio = if kind.is_photo() {
        1.0
    } else if old.height() > 0.0 && old.width() > 0.0 {
        old.width() / old.height()
    } else {
        return new;
    };
    let dw = (new.width() - old.width()).abs();
    let dh = (new.height() - old.height()).abs();
    let size = if dw >= dh {
        Size::new(new.width(), new.width() / ratio)
    } else {
        Size::new(new.height() * ratio, new.height())
    };
    Rect::from_origin_size(new.origin(), size)
}

/// Resize `original` by dragging `handle` by `delta` (zone-local pixels).
///
/// The edge or corner opposite the handle stays fixed. Resizes that would
/// produce a box smaller than `MIN_ZONE_PX` leave `original` unchanged.
pub fn apply_resize(kind: ZoneKind, original: Rect, handle: HandleKind, delta: Vec2) -> Rect {
    let mut proposed = original;
    if handle.moves_left() {
        proposed.x0 += delta.x;
    }
    if handle.moves_right() {
        proposed.x1 += delta.x;
    }
    if handle.moves_top() {
        proposed.y0 += delta.y;
    }
    if handle.moves_bottom() {
        proposed.y1 += delta.y;
    }
    if proposed.width() < MIN_ZONE_PX || proposed.height() < MIN_ZONE_PX {
        return original;
    }

    let size = constrain_resize(kind, original, proposed).size();
    let (x0, x1) = if handle.moves_left() {
        (proposed.x1 - size.width, proposed.x1)
    } else {
        (proposed.x0, proposed.x0 + size.width)
    };
    let (y0, y1) = if handle.moves_top() {
        (proposed.y1 - size.height, proposed.y1)
    } else {
        (proposed.y0, proposed.y0 + size.height)
    };
    Rect::new(x0, y0, x1, y1)
}

/// Rotation (degrees) that points the rotate handle from `center` at `point`.
pub fn rotation_towards(center: Point, point: Point, snap: bool) -> f64 {
    let v = point - center;
    let degrees = v.y.atan2(v.x).to_degrees() + 90.0;
    let degrees = if snap {
        (degrees / ROTATION_SNAP).round() * ROTATION_SNAP
    } else {
        degrees
    };
    degrees.rem_euclid(360.0)
}

/// State of an active pointer manipulation of one zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Manipulation {
    pub zone_id: ZoneId,
    /// The handle being dragged (`None` = moving the whole zone).
    pub handle: Option<HandleKind>,
    pub start: Point,
    pub current: Point,
    /// Unrotated pixel box when the drag started.
    pub original_rect: Rect,
    pub original_rotation: f64,
}

impl Manipulation {
    pub fn new(zone: &Zone, rect: Rect, handle: Option<HandleKind>, start: Point) -> Self {
        Self {
            zone_id: zone.id,
            handle,
            start,
            current: start,
            original_rect: rect,
            original_rotation: zone.rotation,
        }
    }

    pub fn delta(&self) -> Vec2 {
        self.current - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::Side;

    fn zone(kind: ZoneKind) -> Zone {
        Zone::new(kind, Side::Front).with_bounds(10.0, 10.0, 20.0, 20.0)
    }

    #[test]
    fn test_photo_has_no_rotate_handle() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let handles = get_handles(&zone(ZoneKind::StudentPhoto), rect);
        assert_eq!(handles.len(), 4);
        assert!(handles.iter().all(|h| h.kind != HandleKind::Rotate));

        let handles = get_handles(&zone(ZoneKind::Rectangle), rect);
        assert_eq!(handles.len(), 9);
        let rotate = handles.iter().find(|h| h.kind == HandleKind::Rotate).unwrap();
        assert_eq!(rotate.position, Point::new(50.0, -ROTATE_HANDLE_OFFSET));
    }

    #[test]
    fn test_hit_test_handles() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let z = zone(ZoneKind::Text);
        assert_eq!(
            hit_test_handles(&z, rect, Point::new(98.0, 52.0), HANDLE_HIT_TOLERANCE),
            Some(HandleKind::Corner(Corner::BottomRight))
        );
        assert_eq!(hit_test_handles(&z, rect, Point::new(30.0, 30.0), HANDLE_HIT_TOLERANCE), None);
    }

    #[test]
    fn test_constrain_photo_square() {
        let old = Rect::new(0.0, 0.0, 100.0, 100.0);
        let new = Rect::new(0.0, 0.0, 150.0, 110.0);
        let out = constrain_resize(ZoneKind::StudentPhoto, old, new);
        assert_eq!(out.size(), Size::new(150.0, 150.0));
    }

    #[test]
    fn test_constrain_keeps_current_ratio() {
        let old = Rect::new(0.0, 0.0, 200.0, 100.0);
        let new = Rect::new(0.0, 0.0, 210.0, 160.0);
        let out = constrain_resize(ZoneKind::SchoolLogo, old, new);
        assert_eq!(out.size(), Size::new(320.0, 160.0));

        let free = constrain_resize(ZoneKind::Rectangle, old, new);
        assert_eq!(free, new);
    }

    #[test]
    fn test_apply_resize_anchors_opposite_corner() {
        let original = Rect::new(100.0, 100.0, 200.0, 200.0);
        let out = apply_resize(
            ZoneKind::StudentPhoto,
            original,
            HandleKind::Corner(Corner::TopLeft),
            Vec2::new(-50.0, -10.0),
        );
        assert_eq!(out, Rect::new(50.0, 50.0, 200.0, 200.0));
    }

    #[test]
    fn test_apply_resize_rejects_tiny_boxes() {
        let original = Rect::new(0.0, 0.0, 20.0, 20.0);
        let out = apply_resize(
            ZoneKind::Rectangle,
            original,
            HandleKind::Edge(Edge::Right),
            Vec2::new(-18.0, 0.0),
        );
        assert_eq!(out, original);
    }

    #[test]
    fn test_rotation_towards() {
        let c = Point::new(0.0, 0.0);
        assert!((rotation_towards(c, Point::new(0.0, -10.0), false)).abs() < 1e-9);
        assert!((rotation_towards(c, Point::new(10.0, 0.0), false) - 90.0).abs() < 1e-9);
        assert_eq!(rotation_towards(c, Point::new(10.0, -9.0), true), 45.0);
    }
}
