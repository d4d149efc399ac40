//! Zone operations.
//!
//! Every operation is a pure function over the full zone collection (both
//! faces) and returns a new collection. Operations that act on a selection
//! only ever touch zones on the given side. `None` means the input was
//! degenerate and nothing should be committed.

use crate::geometry::{CardGeometry, photo_height_for};
use crate::selection::{KeyElement, Selection};
use crate::zone::{Side, StylePatch, Zone, ZoneId, ZoneKind};
use kurbo::{Point, Rect, Size, Vec2};

/// Offset (percent, both axes) applied to duplicates.
pub const DUPLICATE_OFFSET: f64 = 2.0;
/// Default top-left position (percent) of newly added zones.
pub const DEFAULT_POSITION: f64 = 10.0;
/// Default width (percent) of new photo zones; height is derived.
pub const PHOTO_DEFAULT_WIDTH: f64 = 40.0;
/// Default size (percent) of other new zones.
pub const DEFAULT_SIZE: Size = Size::new(30.0, 40.0);

/// Z-order step direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the front.
    Up,
    /// Towards the back.
    Down,
}

/// Alignment edge or center line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignMode {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

/// Distribution axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Partial top-level geometry update (percentages / degrees).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometryPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
}

/// End state of an interactive drag or transform, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformEnd {
    /// Top-left of the unrotated box.
    pub position: Point,
    /// Box size before scale.
    pub size: Size,
    /// Scale introduced by the transform handles.
    pub scale: Vec2,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl TransformEnd {
    /// A plain move to `position` with no scale.
    pub fn moved(position: Point, size: Size, rotation: f64) -> Self {
        Self {
            position,
            size,
            scale: Vec2::new(1.0, 1.0),
            rotation,
        }
    }
}

/// Rewrite every zone's `z_index` to its collection index.
fn reindex(zones: &mut [Zone]) {
    for (i, zone) in zones.iter_mut().enumerate() {
        zone.z_index = Some(i as i32);
    }
}

fn paint_key(index: usize, zone: &Zone) -> i32 {
    zone.z_index.unwrap_or(index as i32)
}

/// Zones on `side` in paint order: ascending `z_index`, with collection
/// position standing in for a missing index.
pub fn zones_on_side(zones: &[Zone], side: Side) -> Vec<&Zone> {
    let mut ordered: Vec<(i32, &Zone)> = zones
        .iter()
        .enumerate()
        .filter(|(_, z)| z.side == side)
        .map(|(i, z)| (paint_key(i, z), z))
        .collect();
    ordered.sort_by_key(|(z, _)| *z);
    ordered.into_iter().map(|(_, zone)| zone).collect()
}

/// The whole collection rearranged into paint order.
fn in_paint_order(zones: &[Zone]) -> Vec<Zone> {
    let mut ordered: Vec<(i32, &Zone)> = zones.iter().enumerate().map(|(i, z)| (paint_key(i, z), z)).collect();
    ordered.sort_by_key(|(z, _)| *z);
    ordered.into_iter().map(|(_, zone)| zone.clone()).collect()
}

/// Build a new zone of `kind` at the default position. `aspect` is the
/// trim width over height, used to keep photos square.
pub fn new_zone(kind: ZoneKind, side: Side, aspect: f64) -> Zone {
    if kind.is_photo() {
        let height = photo_height_for(PHOTO_DEFAULT_WIDTH, aspect);
        Zone::new(kind, side).with_bounds(DEFAULT_POSITION, DEFAULT_POSITION, PHOTO_DEFAULT_WIDTH, height)
    } else {
        Zone::new(kind, side).with_bounds(
            DEFAULT_POSITION,
            DEFAULT_POSITION,
            DEFAULT_SIZE.width,
            DEFAULT_SIZE.height,
        )
    }
}

/// Append a zone at the top of the z-order.
pub fn insert_zone(zones: &[Zone], mut zone: Zone) -> Vec<Zone> {
    let mut out = zones.to_vec();
    zone.z_index = Some(out.len() as i32);
    out.push(zone);
    out
}

/// Add a default zone of `kind`. Returns the new collection and the new id.
pub fn add_zone(
    zones: &[Zone],
    kind: ZoneKind,
    side: Side,
    aspect: f64,
) -> (Vec<Zone>, ZoneId) {
    let zone = new_zone(kind, side, aspect);
    let id = zone.id;
    (insert_zone(zones, zone), id)
}

/// Duplicate `ids`, preserving their order. Unknown ids are skipped.
pub fn duplicate_zones(zones: &[Zone], ids: &[ZoneId]) -> (Vec<Zone>, Vec<ZoneId>) {
    let mut out = zones.to_vec();
    let mut new_ids = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(source) = zones.iter().find(|z| z.id == *id) else {
            continue;
        };
        let mut copy = source.duplicate();
        copy.x += DUPLICATE_OFFSET;
        copy.y += DUPLICATE_OFFSET;
        copy.z_index = Some(out.len() as i32);
        new_ids.push(copy.id);
        out.push(copy);
    }
    (out, new_ids)
}

/// Remove zones by id, restricted to `side`.
pub fn remove_zones(zones: &[Zone], ids: &[ZoneId], side: Side) -> Vec<Zone> {
    zones
        .iter()
        .filter(|z| !(z.side == side && ids.contains(&z.id)))
        .cloned()
        .collect()
}

/// Swap a zone with its nearest same-side neighbour in paint order.
pub fn move_zone(zones: &[Zone], id: ZoneId, direction: Direction) -> Option<Vec<Zone>> {
    let mut out = in_paint_order(zones);
    let index = out.iter().position(|z| z.id == id)?;
    let side = out[index].side;
    let neighbour = match direction {
        Direction::Up => out
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, z)| z.side == side)
            .map(|(i, _)| i),
        Direction::Down => out[..index]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, z)| z.side == side)
            .map(|(i, _)| i),
    }?;
    out.swap(index, neighbour);
    reindex(&mut out);
    Some(out)
}

/// Move a zone to the very front.
pub fn bring_to_front(zones: &[Zone], id: ZoneId) -> Option<Vec<Zone>> {
    let mut out = in_paint_order(zones);
    let index = out.iter().position(|z| z.id == id)?;
    let zone = out.remove(index);
    out.push(zone);
    reindex(&mut out);
    Some(out)
}

/// Move a zone to the very back.
pub fn send_to_back(zones: &[Zone], id: ZoneId) -> Option<Vec<Zone>> {
    let mut out = in_paint_order(zones);
    let index = out.iter().position(|z| z.id == id)?;
    let zone = out.remove(index);
    out.insert(0, zone);
    reindex(&mut out);
    Some(out)
}

/// Replace-by-id update. `None` if the id is unknown.
pub fn update_zone(zones: &[Zone], id: ZoneId, f: impl FnOnce(&mut Zone)) -> Option<Vec<Zone>> {
    let index = zones.iter().position(|z| z.id == id)?;
    let mut out = zones.to_vec();
    f(&mut out[index]);
    Some(out)
}

/// Merge a style field into a zone. Rotation is mirrored to the zone.
pub fn update_style(zones: &[Zone], id: ZoneId, patch: StylePatch) -> Option<Vec<Zone>> {
    let zone = zones.iter().find(|z| z.id == id)?;
    let mut style = zone.style.clone();
    if let StylePatch::Rotation(degrees) = patch {
        return update_zone(zones, id, |z| z.set_rotation(degrees));
    }
    if !style.apply(patch) {
        log::warn!("Style field does not apply to {:?} zone", zone.kind);
        return None;
    }
    update_zone(zones, id, |z| z.style = style)
}

/// Merge geometry fields into a zone.
pub fn update_geometry(zones: &[Zone], id: ZoneId, patch: GeometryPatch) -> Option<Vec<Zone>> {
    update_zone(zones, id, |z| {
        if let Some(x) = patch.x {
            z.x = x;
        }
        if let Some(y) = patch.y {
            z.y = y;
        }
        if let Some(w) = patch.width {
            z.width = w.max(0.0);
        }
        if let Some(h) = patch.height {
            z.height = h.max(0.0);
        }
        if let Some(r) = patch.rotation {
            z.set_rotation(r);
        }
    })
}

/// Replace a zone's placeholder content.
pub fn set_content(zones: &[Zone], id: ZoneId, content: impl Into<String>) -> Option<Vec<Zone>> {
    let content = content.into();
    update_zone(zones, id, |z| z.mock_content = content)
}

/// Fold the end state of a drag/transform back into percentage geometry.
///
/// Scale is multiplied into width/height so the stored zone always has an
/// implicit scale of 1; rotation is written to both the zone and its style.
pub fn apply_transform(
    zones: &[Zone],
    id: ZoneId,
    end: &TransformEnd,
    geometry: &CardGeometry,
) -> Option<Vec<Zone>> {
    let width_px = end.size.width * end.scale.x.abs();
    let height_px = end.size.height * end.scale.y.abs();
    let origin = geometry.px_to_percent(end.position);
    let width = geometry.px_to_percent_x(width_px);
    let height = geometry.px_to_percent_y(height_px);
    update_zone(zones, id, |z| {
        z.x = origin.x;
        z.y = origin.y;
        z.width = width;
        z.height = height;
        z.set_rotation(end.rotation);
    })
}

fn selected_on_side<'a>(zones: &'a [Zone], selection: &Selection, side: Side) -> Vec<&'a Zone> {
    zones
        .iter()
        .filter(|z| z.side == side && selection.contains(z.id))
        .collect()
}

fn union_bounds<'a>(zones: impl IntoIterator<Item = &'a Zone>) -> Option<Rect> {
    zones
        .into_iter()
        .map(Zone::bounds)
        .reduce(|acc, b| acc.union(b))
}

/// Canvas bounds in percentage space.
pub const CANVAS_FRAME: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

/// Align selected zones on `side` to a reference frame.
///
/// The frame is the canvas for the `Canvas` key element, the key zone's
/// bounds for a zone key element, or the selection's bounding box when no
/// key element is set. The key zone never moves.
pub fn align_zones(
    zones: &[Zone],
    selection: &Selection,
    side: Side,
    mode: AlignMode,
) -> Option<Vec<Zone>> {
    let selected = selected_on_side(zones, selection, side);
    let key_zone = selection
        .key_zone()
        .and_then(|k| selected.iter().find(|z| z.id == k).map(|z| z.id));

    let frame = match (selection.key(), key_zone) {
        (Some(KeyElement::Canvas), _) => {
            if selected.is_empty() {
                return None;
            }
            CANVAS_FRAME
        }
        (_, Some(key)) => {
            if selected.len() < 2 {
                return None;
            }
            selected.iter().find(|z| z.id == key)?.bounds()
        }
        _ => {
            if selected.len() < 2 {
                return None;
            }
            union_bounds(selected.iter().copied())?
        }
    };

    let targets: Vec<ZoneId> = selected
        .iter()
        .map(|z| z.id)
        .filter(|id| Some(*id) != key_zone)
        .collect();

    let mut out = zones.to_vec();
    for zone in out.iter_mut().filter(|z| targets.contains(&z.id)) {
        match mode {
            AlignMode::Left => zone.x = frame.x0,
            AlignMode::Center => zone.x = frame.center().x - zone.width / 2.0,
            AlignMode::Right => zone.x = frame.x1 - zone.width,
            AlignMode::Top => zone.y = frame.y0,
            AlignMode::Middle => zone.y = frame.center().y - zone.height / 2.0,
            AlignMode::Bottom => zone.y = frame.y1 - zone.height,
        }
    }
    Some(out)
}

/// Space selected zones on `side` evenly along `axis`.
///
/// Needs at least three zones. The first and last zones (by leading edge)
/// keep their position; collection order is unchanged.
pub fn distribute_zones(
    zones: &[Zone],
    selection: &Selection,
    side: Side,
    axis: Axis,
) -> Option<Vec<Zone>> {
    let mut selected = selected_on_side(zones, selection, side);
    if selected.len() < 3 {
        return None;
    }
    let lead = |z: &Zone| match axis {
        Axis::Horizontal => z.x,
        Axis::Vertical => z.y,
    };
    let extent = |z: &Zone| match axis {
        Axis::Horizontal => z.width,
        Axis::Vertical => z.height,
    };
    selected.sort_by(|a, b| lead(a).total_cmp(&lead(b)));

    let first = selected[0];
    let last = selected[selected.len() - 1];
    let span = lead(last) + extent(last) - lead(first);
    let gaps = (selected.len() - 1) as f64;
    if span <= 0.0 || gaps == 0.0 {
        return None;
    }
    let total: f64 = selected.iter().map(|z| extent(z)).sum();
    let gap = (span - total) / gaps;

    let mut placements = Vec::with_capacity(selected.len());
    let mut cursor = lead(first);
    for zone in &selected {
        placements.push((zone.id, cursor));
        cursor += extent(zone) + gap;
    }

    let mut out = zones.to_vec();
    for (id, position) in placements {
        if let Some(zone) = out.iter_mut().find(|z| z.id == id) {
            match axis {
                Axis::Horizontal => zone.x = position,
                Axis::Vertical => zone.y = position,
            }
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CanvasSettings;
    use crate::zone::StyleKind;

    fn rect_zone(x: f64, y: f64, w: f64, h: f64) -> Zone {
        Zone::new(ZoneKind::Rectangle, Side::Front).with_bounds(x, y, w, h)
    }

    fn select(ids: &[ZoneId]) -> Selection {
        let mut s = Selection::new();
        s.set(ids.iter().copied());
        s
    }

    #[test]
    fn test_add_zone_defaults() {
        let settings = CanvasSettings::default();
        let (zones, id) = add_zone(&[], ZoneKind::StudentName, Side::Back, settings.aspect_ratio());
        let zone = &zones[0];
        assert_eq!(zone.id, id);
        assert_eq!(zone.side, Side::Back);
        assert_eq!((zone.x, zone.y), (10.0, 10.0));
        assert_eq!((zone.width, zone.height), (30.0, 40.0));
        assert_eq!(zone.mock_content, "John Doe");

        let (zones, _) = add_zone(&zones, ZoneKind::StudentPhoto, Side::Front, settings.aspect_ratio());
        let photo = &zones[1];
        assert_eq!(photo.width, 40.0);
        assert!((photo.height - 40.0 * settings.aspect_ratio()).abs() < 1e-9);
        assert_eq!(photo.z_index, Some(1));
    }

    #[test]
    fn test_duplicate_offsets_and_orders() {
        let a = rect_zone(10.0, 10.0, 5.0, 5.0);
        let b = rect_zone(50.0, 50.0, 5.0, 5.0);
        let zones = vec![a.clone(), b.clone()];

        let (out, new_ids) = duplicate_zones(&zones, &[b.id, a.id]);
        assert_eq!(out.len(), 4);
        assert_eq!(new_ids.len(), 2);
        assert_eq!((out[2].x, out[2].y), (52.0, 52.0));
        assert_eq!((out[3].x, out[3].y), (12.0, 12.0));
        assert_eq!(out[2].id, new_ids[0]);
        assert_ne!(out[2].id, b.id);
    }

    #[test]
    fn test_remove_respects_side() {
        let front = rect_zone(0.0, 0.0, 1.0, 1.0);
        let mut back = rect_zone(0.0, 0.0, 1.0, 1.0);
        back.side = Side::Back;
        let zones = vec![front.clone(), back.clone()];

        let out = remove_zones(&zones, &[front.id, back.id], Side::Front);
        assert_eq!(out, vec![back]);
    }

    #[test]
    fn test_move_zone_reindexes_everything() {
        let a = rect_zone(0.0, 0.0, 1.0, 1.0);
        let b = rect_zone(0.0, 0.0, 1.0, 1.0);
        let c = rect_zone(0.0, 0.0, 1.0, 1.0);
        let zones = vec![a.clone(), b.clone(), c.clone()];

        let out = move_zone(&zones, a.id, Direction::Up).unwrap();
        let ids: Vec<_> = out.iter().map(|z| z.id).collect();
        assert_eq!(ids, vec![b.id, a.id, c.id]);
        let z: Vec<_> = out.iter().map(|z| z.z_index).collect();
        assert_eq!(z, vec![Some(0), Some(1), Some(2)]);

        assert!(move_zone(&zones, a.id, Direction::Down).is_none());
        assert!(move_zone(&zones, c.id, Direction::Up).is_none());
    }

    #[test]
    fn test_move_zone_skips_other_side() {
        let a = rect_zone(0.0, 0.0, 1.0, 1.0);
        let mut other = rect_zone(0.0, 0.0, 1.0, 1.0);
        other.side = Side::Back;
        let b = rect_zone(0.0, 0.0, 1.0, 1.0);
        let zones = vec![a.clone(), other.clone(), b.clone()];

        let out = move_zone(&zones, a.id, Direction::Up).unwrap();
        let ids: Vec<_> = out.iter().map(|z| z.id).collect();
        assert_eq!(ids, vec![b.id, other.id, a.id]);
    }

    #[test]
    fn test_move_zone_follows_stored_z_index() {
        let mut a = rect_zone(0.0, 0.0, 1.0, 1.0);
        a.z_index = Some(2);
        let mut b = rect_zone(0.0, 0.0, 1.0, 1.0);
        b.z_index = Some(1);
        let zones = vec![a.clone(), b.clone()];

        assert!(move_zone(&zones, a.id, Direction::Up).is_none());
        let out = move_zone(&zones, b.id, Direction::Up).unwrap();
        let top = zones_on_side(&out, Side::Front);
        assert_eq!(top.last().map(|z| z.id), Some(b.id));
        let z: Vec<_> = out.iter().map(|z| z.z_index).collect();
        assert_eq!(z, vec![Some(0), Some(1)]);

        let out = send_to_back(&zones, a.id).unwrap();
        assert_eq!(zones_on_side(&out, Side::Front)[0].id, a.id);
        assert!(bring_to_front(&zones, a.id).is_some());
        assert_eq!(zones_on_side(&bring_to_front(&zones, b.id).unwrap(), Side::Front)[1].id, b.id);
    }

    #[test]
    fn test_update_style_rotation_syncs() {
        let a = rect_zone(0.0, 0.0, 1.0, 1.0);
        let out = update_style(&[a.clone()], a.id, StylePatch::Rotation(30.0)).unwrap();
        assert_eq!(out[0].rotation, 30.0);
        assert_eq!(out[0].style.common.rotation, 30.0);

        assert!(update_style(&[a.clone()], a.id, StylePatch::FontSize(3.0)).is_none());
        assert!(matches!(out[0].style.kind, StyleKind::Shape(_)));
    }

    #[test]
    fn test_apply_transform_folds_scale() {
        let geo = CardGeometry::from_pixels(Size::new(200.0, 400.0), 0.0, 0.0);
        let a = rect_zone(0.0, 0.0, 10.0, 10.0);
        let end = TransformEnd {
            position: Point::new(20.0, 40.0),
            size: Size::new(20.0, 40.0),
            scale: Vec2::new(2.0, 0.5),
            rotation: 15.0,
        };
        let out = apply_transform(&[a.clone()], a.id, &end, &geo).unwrap();
        let z = &out[0];
        assert!((z.x - 10.0).abs() < 1e-9);
        assert!((z.y - 10.0).abs() < 1e-9);
        assert!((z.width - 20.0).abs() < 1e-9);
        assert!((z.height - 5.0).abs() < 1e-9);
        assert_eq!(z.style.common.rotation, 15.0);
    }

    #[test]
    fn test_align_left_is_idempotent() {
        let a = rect_zone(10.0, 0.0, 10.0, 10.0);
        let b = rect_zone(40.0, 20.0, 20.0, 10.0);
        let sel = select(&[a.id, b.id]);

        let once = align_zones(&[a.clone(), b.clone()], &sel, Side::Front, AlignMode::Left).unwrap();
        assert_eq!(once[1].x, 10.0);
        let twice = align_zones(&once, &sel, Side::Front, AlignMode::Left).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_align_to_key_zone_keeps_key_fixed() {
        let a = rect_zone(10.0, 10.0, 10.0, 10.0);
        let key = rect_zone(50.0, 60.0, 20.0, 20.0);
        let mut sel = select(&[a.id, key.id]);
        sel.set_key(Some(KeyElement::Zone(key.id)));

        let out = align_zones(&[a.clone(), key.clone()], &sel, Side::Front, AlignMode::Right).unwrap();
        assert_eq!(out[0].x, 60.0);
        assert_eq!(out[1], key);

        let out = align_zones(&[a.clone(), key.clone()], &sel, Side::Front, AlignMode::Middle).unwrap();
        assert_eq!(out[0].y, 65.0);
    }

    #[test]
    fn test_align_to_canvas_single_zone() {
        let a = rect_zone(10.0, 10.0, 20.0, 10.0);
        let mut sel = select(&[a.id]);
        assert!(align_zones(&[a.clone()], &sel, Side::Front, AlignMode::Center).is_none());

        sel.set_key(Some(KeyElement::Canvas));
        let out = align_zones(&[a.clone()], &sel, Side::Front, AlignMode::Center).unwrap();
        assert_eq!(out[0].x, 40.0);
        let out = align_zones(&[a], &sel, Side::Front, AlignMode::Bottom).unwrap();
        assert_eq!(out[0].y, 90.0);
    }

    #[test]
    fn test_align_ignores_other_side() {
        let a = rect_zone(10.0, 0.0, 10.0, 10.0);
        let b = rect_zone(40.0, 0.0, 10.0, 10.0);
        let mut back = rect_zone(70.0, 0.0, 10.0, 10.0);
        back.side = Side::Back;
        let sel = select(&[a.id, b.id, back.id]);

        let out = align_zones(&[a, b, back.clone()], &sel, Side::Front, AlignMode::Right).unwrap();
        assert_eq!(out[0].x, 40.0);
        assert_eq!(out[2], back);
    }

    #[test]
    fn test_distribute_three_zones() {
        let a = rect_zone(0.0, 0.0, 20.0, 10.0);
        let b = rect_zone(30.0, 0.0, 20.0, 10.0);
        let c = rect_zone(80.0, 0.0, 20.0, 10.0);
        let sel = select(&[c.id, a.id, b.id]);

        let out = distribute_zones(&[a, b, c], &sel, Side::Front, Axis::Horizontal).unwrap();
        assert_eq!(out[0].x, 0.0);
        assert!((out[1].x - 40.0).abs() < 1e-9);
        assert_eq!(out[2].x, 80.0);
    }

    #[test]
    fn test_distribute_equal_gaps() {
        let zones = vec![
            rect_zone(0.0, 0.0, 10.0, 10.0),
            rect_zone(55.0, 0.0, 10.0, 10.0),
            rect_zone(15.0, 0.0, 10.0, 10.0),
            rect_zone(90.0, 0.0, 10.0, 10.0),
        ];
        let ids: Vec<_> = zones.iter().map(|z| z.id).collect();
        let sel = select(&ids);

        let out = distribute_zones(&zones, &sel, Side::Front, Axis::Horizontal).unwrap();
        let mut xs: Vec<f64> = out.iter().map(|z| z.x).collect();
        xs.sort_by(f64::total_cmp);
        let gaps: Vec<f64> = xs.windows(2).map(|w| w[1] - (w[0] + 10.0)).collect();
        for g in &gaps {
            assert!((g - gaps[0]).abs() < 1e-9);
        }
        // Collection order is preserved.
        assert_eq!(out.iter().map(|z| z.id).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn test_distribute_degenerate_inputs() {
        let a = rect_zone(0.0, 0.0, 10.0, 10.0);
        let b = rect_zone(0.0, 0.0, 10.0, 10.0);
        let sel = select(&[a.id, b.id]);
        assert!(distribute_zones(&[a.clone(), b.clone()], &sel, Side::Front, Axis::Vertical).is_none());

        let c = rect_zone(0.0, 0.0, 0.0, 0.0);
        let d = rect_zone(0.0, 0.0, 0.0, 0.0);
        let e = rect_zone(0.0, 0.0, 0.0, 0.0);
        let sel = select(&[c.id, d.id, e.id]);
        assert!(distribute_zones(&[c, d, e], &sel, Side::Front, Axis::Vertical).is_none());
    }
}
