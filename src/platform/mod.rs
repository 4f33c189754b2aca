//! Platform abstraction layer
//!
//! Everything the simulation needs from its host:
//! - Shapes on a canvas (create, move, query, delete, recolor)
//! - Held-key input state
//! - One-shot deferred callbacks
//!
//! `headless` provides an in-memory canvas for tests and the CLI runner.

pub mod headless;
pub mod input;
pub mod timer;

use core::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::CreationError;

pub use headless::HeadlessCanvas;
pub use input::{Key, KeyState};
pub use timer::TimerQueue;

/// Opaque handle to a shape owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub u32);

/// Primitive kinds the simulation asks the host to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Oval,
    Rectangle,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Oval => write!(f, "oval"),
            ShapeKind::Rectangle => write!(f, "rectangle"),
        }
    }
}

/// A fill/outline color in host notation (`#RRGGBB`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn hex(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Drawing attributes for a new shape
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub fill: Color,
    pub outline: Color,
    pub outline_width: f32,
    pub tag: Option<&'static str>,
}

/// Axis-aligned bounding box in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box of the given size centered on `center`
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            center.x + width / 2.0,
            center.y + height / 2.0,
        )
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Closed-interval intersection: touching edges count as overlap
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }
}

/// The drawing surface the simulation runs against.
///
/// All calls are synchronous and return immediately; the host guarantees
/// they never interleave with a running tick.
pub trait Canvas {
    /// Current play-field width
    fn width(&self) -> f32;

    /// Current play-field height
    fn height(&self) -> f32;

    fn create_shape(
        &mut self,
        kind: ShapeKind,
        bounds: Bounds,
        style: &Style,
    ) -> Result<ShapeId, CreationError>;

    /// Create a text item centered at `at`
    fn create_text(&mut self, at: Vec2, text: &str, size: u32) -> Result<ShapeId, CreationError>;

    fn set_text(&mut self, id: ShapeId, text: &str);

    fn move_shape(&mut self, id: ShapeId, dx: f32, dy: f32);

    /// Bounding box of a live shape, `None` once deleted
    fn bounds(&self, id: ShapeId) -> Option<Bounds>;

    fn delete(&mut self, id: ShapeId);

    fn set_fill(&mut self, id: ShapeId, color: &Color);

    /// Every shape whose bounding box intersects `area`
    fn query_overlapping(&self, area: Bounds) -> Vec<ShapeId>;

    /// Every live shape carrying `tag`
    fn query_by_tag(&self, tag: &str) -> Vec<ShapeId>;
}
