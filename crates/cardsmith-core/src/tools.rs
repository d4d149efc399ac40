//! Interaction modes and in-progress draw/pen state.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Minimum drawn extent (pixels, both axes) for a rectangle to be committed.
pub const MIN_DRAW_EXTENT: f64 = 5.0;

/// Interactive tool governing pointer-event interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    #[default]
    Select,
    Draw,
    Pen,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Select => "Select",
            Mode::Draw => "Draw",
            Mode::Pen => "Pen",
        }
    }
}

/// State of a rectangle-draw drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawState {
    #[default]
    Idle,
    Active { start: Point, current: Point },
}

/// Manages the current mode and its in-progress capture.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    mode: Mode,
    draw: DrawState,
    pen_points: Vec<Point>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode, discarding any in-progress capture.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    /// Drop in-progress draw and pen state.
    pub fn reset(&mut self) {
        self.draw = DrawState::Idle;
        self.pen_points.clear();
    }

    /// Begin a rectangle drag.
    pub fn begin_draw(&mut self, point: Point) {
        self.draw = DrawState::Active {
            start: point,
            current: point,
        };
    }

    /// Update the live end point of a rectangle drag.
    pub fn update_draw(&mut self, point: Point) {
        if let DrawState::Active { current, .. } = &mut self.draw {
            *current = point;
        }
    }

    /// Live preview rectangle, if a drag is active.
    pub fn draw_preview(&self) -> Option<Rect> {
        match self.draw {
            DrawState::Active { start, current } => Some(Rect::from_points(start, current)),
            DrawState::Idle => None,
        }
    }

    /// End a rectangle drag at `point`.
    /// Returns the drawn box if it is at least `MIN_DRAW_EXTENT` on both axes.
    pub fn end_draw(&mut self, point: Point) -> Option<Rect> {
        let DrawState::Active { start, .. } = std::mem::take(&mut self.draw) else {
            return None;
        };
        let rect = Rect::from_points(start, point);
        if rect.width() < MIN_DRAW_EXTENT || rect.height() < MIN_DRAW_EXTENT {
            log::debug!("Discarding draw below minimum extent: {:?}", rect.size());
            return None;
        }
        Some(rect)
    }

    /// Append a pen point.
    pub fn add_pen_point(&mut self, point: Point) {
        self.pen_points.push(point);
    }

    pub fn pen_points(&self) -> &[Point] {
        &self.pen_points
    }

    /// Take the captured pen points if there are at least two.
    /// Fewer points are discarded.
    pub fn finish_pen(&mut self) -> Option<Vec<Point>> {
        let points = std::mem::take(&mut self.pen_points);
        if points.len() < 2 {
            log::debug!("Discarding pen path with {} point(s)", points.len());
            return None;
        }
        Some(points)
    }
}
