//! Ball contact resolution
//!
//! Collisions are found by asking the canvas which shapes overlap the ball's
//! bounding box and mapping them back to entities. Resolution is deliberately
//! coarse: only direction signs change, and several simultaneous contacts
//! collapse into a plain vertical bounce.

use super::ball::Ball;
use super::brick::Brick;
use super::object::GameObject;
use super::paddle::Paddle;
use crate::platform::{Bounds, Canvas, ShapeId};

/// An entity currently overlapping a ball
#[derive(Debug)]
pub enum Contact<'a> {
    Paddle(&'a Paddle),
    Brick(&'a mut Brick),
}

impl GameObject for Contact<'_> {
    fn shape(&self) -> ShapeId {
        match self {
            Contact::Paddle(paddle) => paddle.shape(),
            Contact::Brick(brick) => brick.shape(),
        }
    }
}

impl Ball {
    /// Resolve contact with every overlapping entity.
    ///
    /// Returns `true` if at least one brick was hit (the caller may spawn an
    /// extra ball in response).
    pub fn collide(&mut self, canvas: &mut dyn Canvas, contacts: &mut [Contact<'_>]) -> bool {
        let Some(own) = self.position(canvas) else {
            return false;
        };
        let x = own.center().x;

        match contacts {
            [] => {}
            [single] => {
                if let Some(other) = single.position(canvas) {
                    self.deflect_from(x, &other);
                }
            }
            _ => self.direction.y = self.direction.y.flipped(),
        }

        let mut hit_a_brick = false;
        for contact in contacts.iter_mut() {
            if let Contact::Brick(brick) = contact {
                brick.hit(canvas);
                hit_a_brick = true;
            }
        }
        hit_a_brick
    }

    /// Steer by where the ball's center sits relative to `other`'s span:
    /// past an edge forces the heading away from it, inside bounces vertically.
    fn deflect_from(&mut self, center_x: f32, other: &Bounds) {
        use super::ball::Sign;

        if center_x > other.right {
            self.direction.x = Sign::Positive;
        } else if center_x < other.left {
            self.direction.x = Sign::Negative;
        } else {
            self.direction.y = self.direction.y.flipped();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::platform::HeadlessCanvas;
    use crate::settings::{Palette, Variant};
    use crate::sim::ball::{Direction, Sign};
    use glam::Vec2;

    struct Fixture {
        canvas: HeadlessCanvas,
        palette: Palette,
        paddle: Paddle,
    }

    fn fixture() -> Fixture {
        let palette = Variant::Classic.palette();
        let mut canvas = HeadlessCanvas::new(FIELD_WIDTH, FIELD_HEIGHT);
        let paddle = Paddle::spawn(
            &mut canvas,
            Vec2::new(FIELD_WIDTH / 2.0, PADDLE_Y),
            Variant::Classic.paddle_width(),
            &palette,
        )
        .unwrap();
        Fixture {
            canvas,
            palette,
            paddle,
        }
    }

    fn down(x: Sign) -> Direction {
        Direction { x, y: Sign::Positive }
    }

    #[test]
    fn test_no_contacts_changes_nothing() {
        let mut f = fixture();
        let mut ball = Ball::spawn(&mut f.canvas, Vec2::new(100.0, 200.0), &f.palette).unwrap();
        let before = ball.direction;
        assert!(!ball.collide(&mut f.canvas, &mut []));
        assert_eq!(ball.direction, before);
    }

    #[test]
    fn test_paddle_left_half_bounces_up_and_keeps_heading_left() {
        let mut f = fixture();
        // Paddle spans 245..365; ball center over the left half
        let mut ball = Ball::spawn(&mut f.canvas, Vec2::new(270.0, 312.0), &f.palette).unwrap();
        ball.direction = down(Sign::Negative);

        let hit = ball.collide(&mut f.canvas, &mut [Contact::Paddle(&f.paddle)]);
        assert!(!hit);
        assert_eq!(ball.direction.x, Sign::Negative);
        assert_eq!(ball.direction.y, Sign::Negative);
    }

    #[test]
    fn test_paddle_left_corner_forces_heading_left() {
        let mut f = fixture();
        // Ball center just past the paddle's left edge, travelling right
        let mut ball = Ball::spawn(&mut f.canvas, Vec2::new(240.0, 312.0), &f.palette).unwrap();
        ball.direction = down(Sign::Positive);

        ball.collide(&mut f.canvas, &mut [Contact::Paddle(&f.paddle)]);
        assert_eq!(ball.direction.x, Sign::Negative);
        // Corner hits keep the vertical heading
        assert_eq!(ball.direction.y, Sign::Positive);
    }

    #[test]
    fn test_paddle_right_corner_forces_heading_right() {
        let mut f = fixture();
        let mut ball = Ball::spawn(&mut f.canvas, Vec2::new(370.0, 312.0), &f.palette).unwrap();
        ball.direction = down(Sign::Negative);

        ball.collide(&mut f.canvas, &mut [Contact::Paddle(&f.paddle)]);
        assert_eq!(ball.direction.x, Sign::Positive);
    }

    #[test]
    fn test_single_brick_is_hit() {
        let mut f = fixture();
        let mut brick = Brick::spawn(&mut f.canvas, Vec2::new(100.0, 90.0), 2, &f.palette).unwrap();
        let mut ball = Ball::spawn(&mut f.canvas, Vec2::new(100.0, 105.0), &f.palette).unwrap();
        ball.direction = Direction::SERVE;

        assert!(ball.collide(&mut f.canvas, &mut [Contact::Brick(&mut brick)]));
        assert_eq!(brick.hits(), 1);
        assert_eq!(ball.direction.y, Sign::Positive);
        assert_eq!(ball.direction.x, Sign::Positive);
    }

    #[test]
    fn test_multiple_contacts_flip_vertical_and_hit_every_brick() {
        let mut f = fixture();
        let mut left = Brick::spawn(&mut f.canvas, Vec2::new(80.0, 90.0), 1, &f.palette).unwrap();
        let mut right = Brick::spawn(&mut f.canvas, Vec2::new(155.0, 90.0), 3, &f.palette).unwrap();
        let mut ball = Ball::spawn(&mut f.canvas, Vec2::new(117.5, 105.0), &f.palette).unwrap();
        ball.direction = Direction {
            x: Sign::Negative,
            y: Sign::Negative,
        };

        let hit = ball.collide(
            &mut f.canvas,
            &mut [Contact::Brick(&mut left), Contact::Brick(&mut right)],
        );
        assert!(hit);
        assert_eq!(ball.direction.x, Sign::Negative);
        assert_eq!(ball.direction.y, Sign::Positive);
        assert!(left.is_destroyed());
        assert_eq!(right.hits(), 2);
        assert_eq!(f.canvas.query_by_tag(BRICK_TAG), vec![right.shape()]);
    }

    #[test]
    fn test_paddle_plus_brick_takes_multi_contact_branch() {
        let mut f = fixture();
        let mut brick = Brick::spawn(&mut f.canvas, Vec2::new(200.0, 310.0), 2, &f.palette).unwrap();
        let mut ball = Ball::spawn(&mut f.canvas, Vec2::new(240.0, 315.0), &f.palette).unwrap();
        ball.direction = down(Sign::Positive);

        let hit = ball.collide(
            &mut f.canvas,
            &mut [Contact::Paddle(&f.paddle), Contact::Brick(&mut brick)],
        );
        assert!(hit);
        assert_eq!(ball.direction, Direction { x: Sign::Positive, y: Sign::Negative });
        assert_eq!(brick.hits(), 1);
    }
}
