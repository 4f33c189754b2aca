//! In-memory canvas
//!
//! Keeps shapes in a map keyed by id so queries come back in creation order.
//! Used by the tests and the headless runner; a windowed host implements
//! `Canvas` over its real drawing surface instead.

use std::collections::BTreeMap;

use glam::Vec2;

use super::{Bounds, Canvas, Color, ShapeId, ShapeKind, Style};
use crate::error::CreationError;

#[derive(Debug, Clone)]
struct HeadlessShape {
    kind: ShapeKind,
    bounds: Bounds,
    style: Style,
}

#[derive(Debug, Clone)]
struct HeadlessText {
    at: Vec2,
    text: String,
    size: u32,
}

#[derive(Debug)]
pub struct HeadlessCanvas {
    width: f32,
    height: f32,
    shapes: BTreeMap<ShapeId, HeadlessShape>,
    texts: BTreeMap<ShapeId, HeadlessText>,
    /// Maximum live items before creation fails (simulates host exhaustion)
    capacity: Option<usize>,
    next_id: u32,
}

impl HeadlessCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            shapes: BTreeMap::new(),
            texts: BTreeMap::new(),
            capacity: None,
            next_id: 1,
        }
    }

    /// Canvas that refuses to hold more than `capacity` live items
    pub fn with_capacity_limit(width: f32, height: f32, capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new(width, height)
        }
    }

    pub fn fill(&self, id: ShapeId) -> Option<&Color> {
        self.shapes.get(&id).map(|s| &s.style.fill)
    }

    pub fn kind(&self, id: ShapeId) -> Option<ShapeKind> {
        self.shapes.get(&id).map(|s| s.kind)
    }

    /// Anchor point and font size of a text item
    pub fn text_layout(&self, id: ShapeId) -> Option<(Vec2, u32)> {
        self.texts.get(&id).map(|t| (t.at, t.size))
    }

    pub fn text(&self, id: ShapeId) -> Option<&str> {
        self.texts.get(&id).map(|t| t.text.as_str())
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.values().any(|t| t.text == needle)
    }

    fn live_items(&self) -> usize {
        self.shapes.len() + self.texts.len()
    }

    fn has_room(&self) -> bool {
        self.capacity.is_none_or(|cap| self.live_items() < cap)
    }

    fn allocate_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Canvas for HeadlessCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn create_shape(
        &mut self,
        kind: ShapeKind,
        bounds: Bounds,
        style: &Style,
    ) -> Result<ShapeId, CreationError> {
        if !self.has_room() {
            return Err(CreationError::ShapeUnavailable { kind });
        }
        let id = self.allocate_id();
        self.shapes.insert(
            id,
            HeadlessShape {
                kind,
                bounds,
                style: style.clone(),
            },
        );
        Ok(id)
    }

    fn create_text(&mut self, at: Vec2, text: &str, size: u32) -> Result<ShapeId, CreationError> {
        if !self.has_room() {
            return Err(CreationError::TextUnavailable);
        }
        let id = self.allocate_id();
        self.texts.insert(
            id,
            HeadlessText {
                at,
                text: text.to_string(),
                size,
            },
        );
        Ok(id)
    }

    fn set_text(&mut self, id: ShapeId, text: &str) {
        if let Some(item) = self.texts.get_mut(&id) {
            item.text = text.to_string();
        }
    }

    fn move_shape(&mut self, id: ShapeId, dx: f32, dy: f32) {
        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.bounds = shape.bounds.translated(dx, dy);
        } else if let Some(item) = self.texts.get_mut(&id) {
            item.at += Vec2::new(dx, dy);
        }
    }

    fn bounds(&self, id: ShapeId) -> Option<Bounds> {
        self.shapes.get(&id).map(|s| s.bounds)
    }

    fn delete(&mut self, id: ShapeId) {
        if self.shapes.remove(&id).is_none() {
            self.texts.remove(&id);
        }
    }

    fn set_fill(&mut self, id: ShapeId, color: &Color) {
        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.style.fill = color.clone();
        }
    }

    fn query_overlapping(&self, area: Bounds) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|(_, s)| s.bounds.intersects(&area))
            .map(|(id, _)| *id)
            .collect()
    }

    fn query_by_tag(&self, tag: &str) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|(_, s)| s.style.tag == Some(tag))
            .map(|(id, _)| *id)
            .collect()
    }
}
