//! Bricks: static rectangles that take one to three hits

use glam::Vec2;

use super::object::GameObject;
use crate::consts::*;
use crate::error::CreationError;
use crate::platform::{Bounds, Canvas, Color, ShapeId, ShapeKind, Style};
use crate::settings::Palette;

#[derive(Debug, Clone)]
pub struct Brick {
    shape: ShapeId,
    pub width: f32,
    pub height: f32,
    hits: u8,
    /// Fill per remaining hit count (index 0 = one hit left)
    colors: [Color; 3],
}

impl Brick {
    /// Create a brick centered at `center` that survives `hits - 1` hits
    pub fn spawn(
        canvas: &mut dyn Canvas,
        center: Vec2,
        hits: u8,
        palette: &Palette,
    ) -> Result<Self, CreationError> {
        let hits = hits.clamp(1, BRICK_MAX_HITS);
        let (width, height) = (BRICK_WIDTH, BRICK_HEIGHT);
        let style = Style {
            fill: palette.brick(hits).clone(),
            outline: palette.brick_outline.clone(),
            outline_width: 2.0,
            tag: Some(BRICK_TAG),
        };
        let shape = canvas.create_shape(
            ShapeKind::Rectangle,
            Bounds::centered(center, width, height),
            &style,
        )?;
        Ok(Self {
            shape,
            width,
            height,
            hits,
            colors: palette.bricks.clone(),
        })
    }

    pub fn hits(&self) -> u8 {
        self.hits
    }

    pub fn is_destroyed(&self) -> bool {
        self.hits == 0
    }

    /// Take one hit. Returns `true` when this hit destroyed the brick.
    pub fn hit(&mut self, canvas: &mut dyn Canvas) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.hits -= 1;
        if self.hits == 0 {
            self.delete(canvas);
            log::debug!("Brick {:?} destroyed", self.shape);
            true
        } else {
            let color = &self.colors[usize::from(self.hits) - 1];
            canvas.set_fill(self.shape, color);
            false
        }
    }
}

impl GameObject for Brick {
    fn shape(&self) -> ShapeId {
        self.shape
    }
}
