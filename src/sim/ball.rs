//! The ball: a circle that moves a fixed step along a diagonal each tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::object::GameObject;
use crate::consts::*;
use crate::error::CreationError;
use crate::platform::{Bounds, Canvas, ShapeId, ShapeKind, Style};
use crate::settings::Palette;

/// One axis of travel. Only the sign is stored; speed supplies magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    pub fn flipped(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Positive => Sign::Negative,
        }
    }

    pub fn value(self) -> f32 {
        match self {
            Sign::Negative => -1.0,
            Sign::Positive => 1.0,
        }
    }

    pub fn from_bool(positive: bool) -> Self {
        if positive { Sign::Positive } else { Sign::Negative }
    }
}

/// Diagonal heading; y grows downward so `Negative` y means "up"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Direction {
    pub x: Sign,
    pub y: Sign,
}

impl Direction {
    /// Up and to the right, the serve heading
    pub const SERVE: Direction = Direction {
        x: Sign::Positive,
        y: Sign::Negative,
    };

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x.value(), self.y.value())
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    shape: ShapeId,
    pub radius: f32,
    pub direction: Direction,
    /// Step length per tick; `None` freezes the ball in place
    pub speed: Option<f32>,
}

impl Ball {
    /// Create a ball centered at `center`, heading up-right at the default speed
    pub fn spawn(
        canvas: &mut dyn Canvas,
        center: Vec2,
        palette: &Palette,
    ) -> Result<Self, CreationError> {
        let radius = BALL_RADIUS;
        let style = Style {
            fill: palette.ball_fill.clone(),
            outline: palette.ball_outline.clone(),
            outline_width: 2.0,
            tag: None,
        };
        let shape = canvas.create_shape(
            ShapeKind::Oval,
            Bounds::centered(center, radius * 2.0, radius * 2.0),
            &style,
        )?;
        Ok(Self {
            shape,
            radius,
            direction: Direction::SERVE,
            speed: Some(BALL_SPEED),
        })
    }

    /// Stop all further movement
    pub fn freeze(&mut self) {
        self.speed = None;
    }

    pub fn is_frozen(&self) -> bool {
        self.speed.is_none()
    }

    /// Bounce off the side and top walls, then advance one step.
    ///
    /// The bottom edge is open; losing the ball is the game loop's call.
    pub fn update(&mut self, canvas: &mut dyn Canvas) {
        let Some(bounds) = self.position(canvas) else {
            return;
        };
        let width = canvas.width();
        if bounds.left <= 0.0 || bounds.right >= width {
            self.direction.x = self.direction.x.flipped();
        }
        if bounds.top <= 0.0 {
            self.direction.y = self.direction.y.flipped();
        }
        if let Some(speed) = self.speed {
            let step = self.direction.as_vec2() * speed;
            self.move_by(canvas, step.x, step.y);
        }
    }
}

impl GameObject for Ball {
    fn shape(&self) -> ShapeId {
        self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessCanvas;
    use crate::settings::Variant;
    use proptest::prelude::*;

    fn ball_at(canvas: &mut HeadlessCanvas, x: f32, y: f32) -> Ball {
        Ball::spawn(canvas, Vec2::new(x, y), &Variant::Classic.palette()).unwrap()
    }

    #[test]
    fn test_moves_along_direction() {
        let mut canvas = HeadlessCanvas::new(FIELD_WIDTH, FIELD_HEIGHT);
        let mut ball = ball_at(&mut canvas, 100.0, 100.0);
        ball.update(&mut canvas);
        let center = ball.position(&canvas).unwrap().center();
        assert_eq!(center, Vec2::new(103.0, 97.0));
    }

    #[test]
    fn test_bounces_off_right_wall() {
        let mut canvas = HeadlessCanvas::new(FIELD_WIDTH, FIELD_HEIGHT);
        let mut ball = ball_at(&mut canvas, FIELD_WIDTH - BALL_RADIUS, 200.0);
        ball.update(&mut canvas);
        assert_eq!(ball.direction.x, Sign::Negative);
        assert_eq!(ball.position(&canvas).unwrap().center().x, FIELD_WIDTH - BALL_RADIUS - 3.0);
    }

    #[test]
    fn test_bounces_off_left_wall_and_ceiling() {
        let mut canvas = HeadlessCanvas::new(FIELD_WIDTH, FIELD_HEIGHT);
        let mut ball = ball_at(&mut canvas, BALL_RADIUS, BALL_RADIUS);
        ball.direction = Direction {
            x: Sign::Negative,
            y: Sign::Negative,
        };
        ball.update(&mut canvas);
        assert_eq!(
            ball.direction,
            Direction {
                x: Sign::Positive,
                y: Sign::Positive
            }
        );
    }

    #[test]
    fn test_bottom_is_open() {
        let mut canvas = HeadlessCanvas::new(FIELD_WIDTH, FIELD_HEIGHT);
        let mut ball = ball_at(&mut canvas, 300.0, FIELD_HEIGHT - BALL_RADIUS);
        ball.direction.y = Sign::Positive;
        ball.update(&mut canvas);
        assert_eq!(ball.direction.y, Sign::Positive);
        assert!(ball.position(&canvas).unwrap().bottom > FIELD_HEIGHT);
    }

    #[test]
    fn test_frozen_ball_stays_put() {
        let mut canvas = HeadlessCanvas::new(FIELD_WIDTH, FIELD_HEIGHT);
        let mut ball = ball_at(&mut canvas, 200.0, 200.0);
        ball.freeze();
        ball.update(&mut canvas);
        assert!(ball.is_frozen());
        assert_eq!(ball.position(&canvas).unwrap().center(), Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_update_after_delete_is_noop() {
        let mut canvas = HeadlessCanvas::new(FIELD_WIDTH, FIELD_HEIGHT);
        let mut ball = ball_at(&mut canvas, 200.0, 200.0);
        ball.delete(&mut canvas);
        ball.update(&mut canvas);
        assert!(ball.position(&canvas).is_none());
    }

    proptest! {
        #[test]
        fn prop_span_stays_within_one_step_of_walls(
            x in BALL_RADIUS..(FIELD_WIDTH - BALL_RADIUS),
            y in BALL_RADIUS..(FIELD_HEIGHT - BALL_RADIUS),
            dx in any::<bool>(),
            dy in any::<bool>(),
            ticks in 1usize..400,
        ) {
            let mut canvas = HeadlessCanvas::new(FIELD_WIDTH, FIELD_HEIGHT);
            let mut ball = ball_at(&mut canvas, x, y);
            ball.direction = Direction { x: Sign::from_bool(dx), y: Sign::from_bool(dy) };
            for _ in 0..ticks {
                ball.update(&mut canvas);
                let b = ball.position(&canvas).unwrap();
                prop_assert!(b.left >= -BALL_SPEED);
                prop_assert!(b.right <= FIELD_WIDTH + BALL_SPEED);
                prop_assert!(b.top >= -BALL_SPEED);
                let v = ball.direction.as_vec2();
                prop_assert!(v.x.abs() == 1.0 && v.y.abs() == 1.0);
            }
        }
    }
}
