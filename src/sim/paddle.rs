//! The player's paddle
//!
//! A rectangle pushed left/right by held keys through a tiny velocity
//! integrator (acceleration, friction, speed cap) and stopped dead at the
//! field walls.

use glam::Vec2;

use super::object::GameObject;
use crate::consts::*;
use crate::error::CreationError;
use crate::platform::{Bounds, Canvas, ShapeId, ShapeKind, Style};
use crate::settings::Palette;

#[derive(Debug, Clone)]
pub struct Paddle {
    shape: ShapeId,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub max_speed: f32,
    /// Shape of the ball resting on the paddle before launch
    attached: Option<ShapeId>,
}

impl Paddle {
    /// Create a paddle of `width` centered at `center`
    pub fn spawn(
        canvas: &mut dyn Canvas,
        center: Vec2,
        width: f32,
        palette: &Palette,
    ) -> Result<Self, CreationError> {
        let height = PADDLE_HEIGHT;
        let style = Style {
            fill: palette.paddle_fill.clone(),
            outline: palette.paddle_outline.clone(),
            outline_width: 3.0,
            tag: None,
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
            velocity: 0.0,
            acceleration: PADDLE_ACCELERATION,
            friction: PADDLE_FRICTION,
            max_speed: PADDLE_MAX_SPEED,
            attached: None,
        })
    }

    /// Let a ball ride along until launch
    pub fn attach(&mut self, ball: &impl GameObject) {
        self.attached = Some(ball.shape());
    }

    pub fn detach(&mut self) {
        self.attached = None;
    }

    pub fn attached(&self) -> Option<ShapeId> {
        self.attached
    }

    /// Advance the paddle one tick.
    ///
    /// Both keys held cancel out. Friction applies every tick regardless of
    /// input. A move that would cross a wall is replaced by one that lands
    /// the edge exactly on the wall, with velocity zeroed.
    pub fn update_physics(&mut self, canvas: &mut dyn Canvas, left_pressed: bool, right_pressed: bool) {
        if left_pressed {
            self.velocity -= self.acceleration;
        }
        if right_pressed {
            self.velocity += self.acceleration;
        }

        self.velocity *= self.friction;
        self.velocity = self.velocity.clamp(-self.max_speed, self.max_speed);

        let Some(bounds) = self.position(canvas) else {
            return;
        };
        let width = canvas.width();

        let dx = if bounds.left + self.velocity < 0.0 {
            self.velocity = 0.0;
            -bounds.left
        } else if bounds.right + self.velocity > width {
            self.velocity = 0.0;
            width - bounds.right
        } else if self.velocity.abs() < PADDLE_STOP_THRESHOLD {
            self.velocity = 0.0;
            0.0
        } else {
            self.velocity
        };
        if dx == 0.0 {
            return;
        }

        // The served ball keeps its offset from the paddle, wall snaps included
        self.move_by(canvas, dx, 0.0);
        if let Some(ball) = self.attached {
            canvas.move_shape(ball, dx, 0.0);
        }
    }
}

impl GameObject for Paddle {
    fn shape(&self) -> ShapeId {
        self.shape
    }
}
