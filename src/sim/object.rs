//! Shared capability of every entity drawn on the canvas

use crate::platform::{Bounds, Canvas, ShapeId};

/// An entity backed by exactly one host shape.
///
/// The shape is created when the entity is constructed and released by
/// `delete`; no entity touches another entity's shape.
pub trait GameObject {
    fn shape(&self) -> ShapeId;

    /// Current bounding box, `None` once the shape is gone
    fn position(&self, canvas: &dyn Canvas) -> Option<Bounds> {
        canvas.bounds(self.shape())
    }

    fn move_by(&self, canvas: &mut dyn Canvas, dx: f32, dy: f32) {
        canvas.move_shape(self.shape(), dx, dy);
    }

    fn delete(&self, canvas: &mut dyn Canvas) {
        canvas.delete(self.shape());
    }
}
