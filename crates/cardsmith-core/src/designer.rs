//! Designer controller: owns the zone collection and turns user intent
//! into committed edits.

use crate::geometry::{CanvasSettings, CardGeometry, Orientation, Unit, enforce_photo_ratio};
use crate::handles::{
    HANDLE_HIT_TOLERANCE, HandleKind, Manipulation, apply_resize, hit_test_handles, rotation_towards,
};
use crate::history::{CommitOptions, History};
use crate::input::{KeyEvent, Modifiers};
use crate::media::{CropError, ImageCropper, ImageUploader, UploadError};
use crate::ops::{self, AlignMode, Axis, Direction, GeometryPatch, TransformEnd};
use crate::selection::{KeyElement, Selection};
use crate::shortcuts::{Command, ShortcutRegistry};
use crate::storage::{StorageError, TemplateStore};
use crate::template::PersistedTemplate;
use crate::tools::{Mode, ToolManager};
use crate::viewport::{FIT_PADDING, FitScheduler, Viewport};
use crate::zone::{
    Side, StyleKind, StylePatch, Zone, ZoneId, ZoneKind, normalize_polyline, polyline_to_path_data,
};
use kurbo::{Affine, Point, Rect, Vec2};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Designer errors. Every failing operation leaves the designer unchanged.
#[derive(Debug, Error)]
pub enum DesignerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Crop(#[from] CropError),
    #[error("Unknown zone: {0}")]
    UnknownZone(ZoneId),
}

/// Rotate a vector by `degrees`.
fn rotate_vec(v: Vec2, degrees: f64) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Whether `point` lies inside `rect` rotated by `degrees` about its center.
fn rotated_contains(rect: Rect, degrees: f64, point: Point) -> bool {
    let local = Affine::rotate_about(-degrees.to_radians(), rect.center()) * point;
    rect.contains(local)
}

/// Top-level designer state.
pub struct Designer {
    history: History<Arc<Vec<Zone>>>,
    selection: Selection,
    tools: ToolManager,
    side: Side,
    orientation: Orientation,
    settings: CanvasSettings,
    /// Trim width over height, kept unrounded across unit switches.
    aspect: f64,
    viewport: Viewport,
    fit: FitScheduler,
    /// Host-measured stage geometry; derived from `settings` when unset.
    stage: Option<CardGeometry>,
    manipulation: Option<Manipulation>,
    pointer_modifiers: Modifiers,
}

impl Default for Designer {
    fn default() -> Self {
        Self::new(CanvasSettings::default())
    }
}

impl Designer {
    pub fn new(settings: CanvasSettings) -> Self {
        let orientation = settings.orientation().unwrap_or_default();
        let aspect = settings.aspect_ratio();
        let mut designer = Self {
            history: History::new(Arc::new(Vec::new())),
            selection: Selection::new(),
            tools: ToolManager::new(),
            side: Side::Front,
            orientation,
            settings,
            aspect,
            viewport: Viewport::default(),
            fit: FitScheduler::default(),
            stage: None,
            manipulation: None,
            pointer_modifiers: Modifiers::NONE,
        };
        designer.fit_to_view();
        designer
    }

    pub fn from_template(template: PersistedTemplate) -> Self {
        let mut designer = Self::default();
        designer.load_template(template);
        designer
    }

    // --- state access ---

    /// All zones on both sides, in collection order.
    pub fn zones(&self) -> &[Zone] {
        self.history.present()
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones().iter().find(|z| z.id == id)
    }

    /// Zones on the current side in paint order.
    pub fn side_zones(&self) -> Vec<&Zone> {
        ops::zones_on_side(self.zones(), self.side)
    }

    /// Current-side zones in paint order with any in-progress drag applied.
    pub fn live_zones(&self) -> Vec<Zone> {
        let preview = self
            .manipulation
            .as_ref()
            .and_then(|m| self.manipulation_end(m).map(|end| (m.zone_id, end)));
        let geometry = self.geometry();
        self.side_zones()
            .into_iter()
            .map(|zone| match &preview {
                Some((id, end)) if *id == zone.id => {
                    ops::apply_transform(std::slice::from_ref(zone), zone.id, end, &geometry)
                        .and_then(|mut v| v.pop())
                        .unwrap_or_else(|| zone.clone())
                }
                _ => zone.clone(),
            })
            .collect()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> Mode {
        self.tools.mode()
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn is_fit_pending(&self) -> bool {
        self.fit.is_pending()
    }

    pub fn manipulation(&self) -> Option<&Manipulation> {
        self.manipulation.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History<Arc<Vec<Zone>>> {
        &self.history
    }

    /// Pixel geometry of the card at 100% zoom.
    pub fn geometry(&self) -> CardGeometry {
        self.stage
            .unwrap_or_else(|| CardGeometry::from_settings(&self.settings))
    }

    /// Use host-measured pixel geometry instead of deriving it from settings.
    pub fn set_stage_geometry(&mut self, stage: Option<CardGeometry>) {
        self.stage = stage;
    }

    // --- commits ---

    /// Record a new collection, then re-assert the square-photo invariant
    /// without an extra undo step.
    fn commit(&mut self, zones: Vec<Zone>) -> bool {
        let changed = self.history.commit(Arc::new(zones), CommitOptions::default());
        if changed {
            log::debug!("Committed {} zone(s)", self.zones().len());
            self.repair_photo_ratio();
        }
        changed
    }

    fn repair_photo_ratio(&mut self) {
        if let Some(fixed) = enforce_photo_ratio(self.zones(), self.aspect) {
            log::debug!("Re-asserting student photo ratio");
            self.history.commit(Arc::new(fixed), CommitOptions::skip_history());
        }
    }

    fn commit_if(&mut self, zones: Option<Vec<Zone>>) -> bool {
        match zones {
            Some(zones) => self.commit(zones),
            None => false,
        }
    }

    /// Drop selected ids that no longer exist (after undo/redo).
    fn prune_selection(&mut self) {
        let missing: Vec<ZoneId> = self
            .selection
            .ids()
            .iter()
            .copied()
            .filter(|id| self.zone(*id).is_none_or(|z| z.side != self.side))
            .collect();
        let stale_key = self
            .selection
            .key_zone()
            .filter(|id| self.zone(*id).is_none());
        self.selection.forget(&missing);
        if let Some(key) = stale_key {
            self.selection.forget(&[key]);
        }
    }

    pub fn undo(&mut self) -> bool {
        let done = self.history.undo();
        if done {
            self.manipulation = None;
            self.prune_selection();
            self.repair_photo_ratio();
        }
        done
    }

    pub fn redo(&mut self) -> bool {
        let done = self.history.redo();
        if done {
            self.manipulation = None;
            self.prune_selection();
            self.repair_photo_ratio();
        }
        done
    }

    // --- zone operations ---

    /// Add a default zone of `kind` to the current side and select it.
    pub fn add_zone(&mut self, kind: ZoneKind) -> ZoneId {
        let (zones, id) = ops::add_zone(self.zones(), kind, self.side, self.aspect);
        self.commit(zones);
        self.selection.select_only(id);
        id
    }

    /// Duplicate one zone and select the copy.
    pub fn duplicate_zone(&mut self, id: ZoneId) -> Option<ZoneId> {
        let (zones, new_ids) = ops::duplicate_zones(self.zones(), &[id]);
        let new_id = *new_ids.first()?;
        self.commit(zones);
        self.selection.select_only(new_id);
        Some(new_id)
    }

    /// Duplicate every selected zone on the current side, selecting the
    /// copies in the same relative order.
    pub fn duplicate_selected(&mut self) -> Vec<ZoneId> {
        let ids = self.selected_on_side();
        if ids.is_empty() {
            return Vec::new();
        }
        let (zones, new_ids) = ops::duplicate_zones(self.zones(), &ids);
        self.commit(zones);
        self.selection.set(new_ids.iter().copied());
        new_ids
    }

    pub fn remove_zone(&mut self, id: ZoneId) -> bool {
        let zones = ops::remove_zones(self.zones(), &[id], self.side);
        let removed = self.commit(zones);
        if removed {
            self.selection.forget(&[id]);
        }
        removed
    }

    /// Remove every selected zone on the current side.
    pub fn delete_selected(&mut self) -> bool {
        let ids = self.selected_on_side();
        if ids.is_empty() {
            return false;
        }
        let zones = ops::remove_zones(self.zones(), &ids, self.side);
        let removed = self.commit(zones);
        self.selection.forget(&ids);
        removed
    }

    fn selected_on_side(&self) -> Vec<ZoneId> {
        self.selection
            .ids()
            .iter()
            .copied()
            .filter(|id| self.zone(*id).is_some_and(|z| z.side == self.side))
            .collect()
    }

    pub fn move_zone(&mut self, id: ZoneId, direction: Direction) -> bool {
        let zones = ops::move_zone(self.zones(), id, direction);
        self.commit_if(zones)
    }

    pub fn bring_to_front(&mut self, id: ZoneId) -> bool {
        let zones = ops::bring_to_front(self.zones(), id);
        self.commit_if(zones)
    }

    pub fn send_to_back(&mut self, id: ZoneId) -> bool {
        let zones = ops::send_to_back(self.zones(), id);
        self.commit_if(zones)
    }

    pub fn update_style(&mut self, id: ZoneId, patch: StylePatch) -> bool {
        let zones = ops::update_style(self.zones(), id, patch);
        self.commit_if(zones)
    }

    pub fn update_geometry(&mut self, id: ZoneId, patch: GeometryPatch) -> bool {
        let zones = ops::update_geometry(self.zones(), id, patch);
        self.commit_if(zones)
    }

    pub fn set_content(&mut self, id: ZoneId, content: impl Into<String>) -> bool {
        let zones = ops::set_content(self.zones(), id, content);
        self.commit_if(zones)
    }

    pub fn set_locked(&mut self, id: ZoneId, locked: bool) -> bool {
        let zones = ops::update_zone(self.zones(), id, |z| z.locked = locked);
        self.commit_if(zones)
    }

    pub fn set_visible(&mut self, id: ZoneId, visible: bool) -> bool {
        let zones = ops::update_zone(self.zones(), id, |z| z.visible = visible);
        self.commit_if(zones)
    }

    pub fn align(&mut self, mode: AlignMode) -> bool {
        let zones = ops::align_zones(self.zones(), &self.selection, self.side, mode);
        self.commit_if(zones)
    }

    pub fn distribute(&mut self, axis: Axis) -> bool {
        let zones = ops::distribute_zones(self.zones(), &self.selection, self.side, axis);
        self.commit_if(zones)
    }

    // --- mode and side ---

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.tools.mode() {
            log::debug!("Mode {:?} -> {:?}", self.tools.mode(), mode);
        }
        self.tools.set_mode(mode);
        self.manipulation = None;
    }

    /// Switch the active face; clears selection and key element.
    pub fn switch_side(&mut self, side: Side) {
        if side == self.side {
            return;
        }
        log::debug!("Switching to {:?} side", side);
        self.side = side;
        self.selection.clear();
        self.tools.reset();
        self.manipulation = None;
    }

    pub fn flip_side(&mut self) {
        self.switch_side(self.side.flip());
    }

    // --- pointer interaction ---

    /// Topmost visible zone on the current side under `point`.
    pub fn zone_at(&self, point: Point) -> Option<ZoneId> {
        let geometry = self.geometry();
        self.side_zones()
            .into_iter()
            .rev()
            .filter(|z| z.visible)
            .find(|z| rotated_contains(geometry.zone_rect(z), z.rotation, point))
            .map(|z| z.id)
    }

    fn handle_at(&self, point: Point) -> Option<(ZoneId, HandleKind)> {
        let [id] = self.selection.ids() else {
            return None;
        };
        let zone = self.zone(*id).filter(|z| z.side == self.side && !z.locked)?;
        let rect = self.geometry().zone_rect(zone);
        let tolerance = HANDLE_HIT_TOLERANCE / self.viewport.zoom.max(f64::EPSILON);
        hit_test_handles(zone, rect, point, tolerance).map(|kind| (zone.id, kind))
    }

    fn begin_manipulation(&mut self, id: ZoneId, handle: Option<HandleKind>, point: Point) {
        let geometry = self.geometry();
        if let Some(zone) = self.zone(id) {
            let rect = geometry.zone_rect(zone);
            self.manipulation = Some(Manipulation::new(zone, rect, handle, point));
        }
    }

    /// Pointer pressed at `point` (canvas pixels).
    pub fn pointer_down(&mut self, point: Point, modifiers: Modifiers) {
        self.pointer_modifiers = modifiers;
        match self.tools.mode() {
            Mode::Draw => self.tools.begin_draw(point),
            Mode::Pen => self.tools.add_pen_point(point),
            Mode::Select => {
                if let Some((id, handle)) = self.handle_at(point) {
                    self.begin_manipulation(id, Some(handle), point);
                } else if let Some(id) = self.zone_at(point) {
                    self.click_zone(id, modifiers.shift);
                    let movable = self.zone(id).is_some_and(|z| !z.locked);
                    if movable && !modifiers.shift && self.selection.contains(id) {
                        self.begin_manipulation(id, None, point);
                    }
                } else if self.geometry().trim_rect().contains(point) {
                    self.click_canvas_boundary();
                } else {
                    self.click_empty();
                }
            }
        }
    }

    /// Pointer moved to `point`; updates live previews only.
    pub fn pointer_move(&mut self, point: Point, modifiers: Modifiers) {
        self.pointer_modifiers = modifiers;
        match self.tools.mode() {
            Mode::Draw => self.tools.update_draw(point),
            Mode::Pen => {}
            Mode::Select => {
                if let Some(m) = &mut self.manipulation {
                    m.current = point;
                }
            }
        }
    }

    /// Pointer released at `point`; commits draws and drags.
    pub fn pointer_up(&mut self, point: Point, modifiers: Modifiers) {
        self.pointer_modifiers = modifiers;
        match self.tools.mode() {
            Mode::Draw => {
                if let Some(rect) = self.tools.end_draw(point) {
                    self.commit_drawn_rect(rect);
                }
            }
            Mode::Pen => {}
            Mode::Select => {
                let Some(mut m) = self.manipulation.take() else {
                    return;
                };
                m.current = point;
                if m.delta() == Vec2::ZERO {
                    return;
                }
                if let Some(end) = self.manipulation_end(&m) {
                    self.transform_end(m.zone_id, end);
                }
            }
        }
    }

    /// End state of a manipulation in canvas pixels.
    fn manipulation_end(&self, m: &Manipulation) -> Option<TransformEnd> {
        let zone = self.zone(m.zone_id)?;
        let original = m.original_rect;
        let rotation = m.original_rotation;
        match m.handle {
            None => Some(TransformEnd::moved(
                original.origin() + m.delta(),
                original.size(),
                rotation,
            )),
            Some(HandleKind::Rotate) => {
                if !zone.kind.allows_rotation() {
                    return None;
                }
                let degrees = rotation_towards(original.center(), m.current, self.pointer_modifiers.shift);
                Some(TransformEnd::moved(original.origin(), original.size(), degrees))
            }
            Some(handle) => {
                let local_delta = rotate_vec(m.delta(), -rotation);
                let local = Rect::from_origin_size(Point::ZERO, original.size());
                let resized = apply_resize(zone.kind, local, handle, local_delta);
                // Keep the anchored edge fixed on screen for rotated zones.
                let shift = rotate_vec(resized.center() - local.center(), rotation);
                let rect = Rect::from_center_size(original.center() + shift, resized.size());
                Some(TransformEnd::moved(rect.origin(), rect.size(), rotation))
            }
        }
    }

    fn commit_drawn_rect(&mut self, rect: Rect) {
        let pct = self.geometry().px_to_percent_rect(rect);
        let zone = Zone::new(ZoneKind::Rectangle, self.side).with_bounds(
            pct.x0,
            pct.y0,
            pct.width(),
            pct.height(),
        );
        let id = zone.id;
        let zones = ops::insert_zone(self.zones(), zone);
        self.commit(zones);
        self.selection.select_only(id);
        self.set_mode(Mode::Select);
    }

    /// Finish the pen path. Commits a `PATH` zone when at least two points
    /// were captured; always returns to select mode.
    pub fn finish_path(&mut self) -> Option<ZoneId> {
        let points = self.tools.finish_pen();
        self.set_mode(Mode::Select);
        let points = points?;
        let (bounds, normalized) = normalize_polyline(&points)?;
        let path_data = polyline_to_path_data(&normalized)?;

        let pct = self.geometry().px_to_percent_rect(bounds);
        let mut zone = Zone::new(ZoneKind::Path, self.side).with_bounds(
            pct.x0,
            pct.y0,
            pct.width(),
            pct.height(),
        );
        if let StyleKind::Shape(shape) = &mut zone.style.kind {
            shape.path_data = Some(path_data);
            shape.points = normalized.iter().flat_map(|p| [p.x, p.y]).collect();
        }
        let id = zone.id;
        let zones = ops::insert_zone(self.zones(), zone);
        self.commit(zones);
        self.selection.select_only(id);
        Some(id)
    }

    /// Click on a zone (select mode).
    pub fn click_zone(&mut self, id: ZoneId, shift: bool) {
        if self.zone(id).is_some_and(|z| z.side == self.side) {
            self.selection.click(id, shift);
        }
    }

    /// Click on the trim boundary: toggles the canvas as key element.
    pub fn click_canvas_boundary(&mut self) {
        self.selection.toggle_key(KeyElement::Canvas);
    }

    /// Click outside every zone and the card.
    pub fn click_empty(&mut self) {
        self.selection.clear();
    }

    /// Commit the end of a host-driven drag at `position` (canvas pixels,
    /// top-left of the unrotated box).
    pub fn drag_end(&mut self, id: ZoneId, position: Point) -> bool {
        let geometry = self.geometry();
        let Some(zone) = self.zone(id) else {
            return false;
        };
        let rect = geometry.zone_rect(zone);
        let end = TransformEnd::moved(position, rect.size(), zone.rotation);
        self.transform_end(id, end)
    }

    /// Commit the end of a drag or transform. Locked zones are not moved.
    pub fn transform_end(&mut self, id: ZoneId, end: TransformEnd) -> bool {
        if self.zone(id).is_none_or(|z| z.locked) {
            return false;
        }
        let geometry = self.geometry();
        let zones = ops::apply_transform(self.zones(), id, &end, &geometry);
        self.commit_if(zones)
    }

    // --- keyboard ---

    /// Handle a key press. Returns true if it triggered a command.
    pub fn handle_key(&mut self, event: &KeyEvent, modifiers: Modifiers, text_input_focused: bool) -> bool {
        if text_input_focused {
            return false;
        }
        let Some(command) = ShortcutRegistry::resolve(event, modifiers) else {
            return false;
        };
        match command {
            Command::SetMode(mode) => self.set_mode(mode),
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            Command::DeleteSelected => {
                self.delete_selected();
            }
            Command::DuplicateSelected => {
                self.duplicate_selected();
            }
        }
        true
    }

    // --- canvas settings ---

    /// Set trim dimensions (in the current unit). Orientation follows the
    /// new dimensions and the viewport re-fit is debounced.
    pub fn set_dimensions(&mut self, width: f64, height: f64, now: Instant) {
        if width <= 0.0 || height <= 0.0 {
            log::warn!("Ignoring non-positive dimensions {}x{}", width, height);
            return;
        }
        self.settings.width = width;
        self.settings.height = height;
        self.aspect = self.settings.aspect_ratio();
        if let Some(orientation) = Orientation::for_dimensions(width, height) {
            self.orientation = orientation;
        }
        self.fit.schedule(now);
        self.repair_photo_ratio();
    }

    /// Change the display unit; physical size is unchanged. The photo ratio
    /// keeps using the unrounded aspect.
    pub fn set_unit(&mut self, unit: Unit) {
        self.settings = self.settings.convert_unit(unit);
    }

    /// Set orientation, swapping width and height if they disagree.
    pub fn set_orientation(&mut self, orientation: Orientation, now: Instant) {
        self.orientation = orientation;
        if !orientation.matches(self.settings.width, self.settings.height)
            && self.settings.width != self.settings.height
        {
            std::mem::swap(&mut self.settings.width, &mut self.settings.height);
            self.aspect = if self.aspect > 0.0 { self.aspect.recip() } else { self.settings.aspect_ratio() };
            self.fit.schedule(now);
            self.repair_photo_ratio();
        }
    }

    /// Bleed in millimetres.
    pub fn set_bleed(&mut self, bleed: f64) {
        self.settings.bleed = bleed.max(0.0);
    }

    /// Safe margin in millimetres.
    pub fn set_safe_margin(&mut self, margin: f64) {
        self.settings.safe_margin = margin.max(0.0);
    }

    pub fn set_show_guides(&mut self, show: bool) {
        self.settings.show_guides = show;
    }

    /// Run deferred work. Returns true if the viewport was re-fit.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.fit.poll(now) {
            self.fit_to_view();
            return true;
        }
        false
    }

    pub fn fit_to_view(&mut self) {
        let bounds = self.geometry().outer_rect();
        self.viewport.fit_to_bounds(bounds, FIT_PADDING);
    }

    // --- persistence ---

    /// Snapshot for persistence.
    pub fn template(&self) -> PersistedTemplate {
        PersistedTemplate::new(self.zones().to_vec(), self.orientation, self.settings.clone())
    }

    /// Replace the whole document; history starts over.
    pub fn load_template(&mut self, template: PersistedTemplate) {
        log::info!("Loading template with {} zone(s)", template.zones.len());
        self.settings = template.canvas_settings;
        self.aspect = self.settings.aspect_ratio();
        self.orientation = template.orientation;
        self.history.reset(Arc::new(template.zones));
        self.selection.clear();
        self.tools.set_mode(Mode::Select);
        self.manipulation = None;
        self.side = Side::Front;
        self.repair_photo_ratio();
        self.fit_to_view();
    }

    /// Save through `store`. Local state is never modified.
    pub async fn save(&self, store: &dyn TemplateStore, id: &str) -> Result<(), DesignerError> {
        let template = self.template();
        store.save(id, &template).await?;
        log::info!("Saved template {} ({} zone(s))", id, template.zones.len());
        Ok(())
    }

    /// Load from `store`. On error the current document is kept.
    pub async fn load(&mut self, store: &dyn TemplateStore, id: &str) -> Result<(), DesignerError> {
        let template = store.load(id).await?;
        self.load_template(template);
        Ok(())
    }

    /// Upload a new image for a zone, crop it for photo and image zones when
    /// a cropper is given, then commit the resulting URL as the zone content.
    pub async fn replace_zone_image(
        &mut self,
        id: ZoneId,
        bytes: &[u8],
        path: &str,
        uploader: &dyn ImageUploader,
        cropper: Option<&dyn ImageCropper>,
    ) -> Result<String, DesignerError> {
        let zone = self.zone(id).ok_or(DesignerError::UnknownZone(id))?;
        let kind = zone.kind;
        let rect = self.geometry().zone_rect(zone);

        let mut url = uploader.upload(bytes, path).await?;
        if let Some(cropper) = cropper.filter(|_| kind.wants_crop()) {
            let ratio = if kind.is_photo() || rect.height() <= 0.0 {
                1.0
            } else {
                rect.width() / rect.height()
            };
            url = cropper.crop(&url, ratio).await?;
        }
        log::info!("Replacing image of {:?} zone {}", kind, id);
        self.set_content(id, url.clone());
        Ok(url)
    }
}
