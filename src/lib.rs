//! Bola-Bola - a paddle-and-bricks arcade game
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (ball, paddle, bricks, game loop)
//! - `platform`: Host abstraction (canvas, held keys, one-shot timers)
//! - `settings`: Data-driven configuration and game variants

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::CreationError;
pub use settings::{Palette, ResumeMode, Settings, Variant};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation interval (~60 ticks per second)
    pub const TICK_INTERVAL_MS: u64 = 16;
    /// Delay between losing the last ball and the next round
    pub const ROUND_RESET_DELAY_MS: u64 = 1000;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 610.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: f32 = 3.0;
    /// Vertical center of a freshly served ball (rests on the paddle top)
    pub const BALL_SERVE_Y: f32 = 310.0;
    /// Concurrent ball cap for multi-ball spawning
    pub const MAX_BALLS: usize = 15;

    /// Paddle defaults
    pub const PADDLE_Y: f32 = 326.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    pub const PADDLE_ACCELERATION: f32 = 1.5;
    pub const PADDLE_FRICTION: f32 = 0.85;
    pub const PADDLE_MAX_SPEED: f32 = 12.0;
    /// Below this speed the paddle snaps to rest
    pub const PADDLE_STOP_THRESHOLD: f32 = 0.1;

    /// Brick defaults
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_MAX_HITS: u8 = 3;
    /// Tag carried by every brick shape (counted to detect a cleared field)
    pub const BRICK_TAG: &str = "brick";
    /// Horizontal inset of the brick grid
    pub const BRICK_MARGIN: f32 = 5.0;
    /// Row centers and their hit points, top to bottom
    pub const BRICK_ROWS: [(f32, u8); 3] = [(50.0, 3), (70.0, 2), (90.0, 1)];

    /// Lives at game start
    pub const START_LIVES: i32 = 3;

    /// Text placement
    pub const HUD_POS: (f32, f32) = (50.0, 20.0);
    pub const HUD_FONT_SIZE: u32 = 15;
    pub const BANNER_POS: (f32, f32) = (300.0, 200.0);
    pub const BANNER_FONT_SIZE: u32 = 40;

    pub const START_BANNER: &str = "Press Space to start";
    pub const WIN_BANNER: &str = "You win! You the Breaker of Bricks.";
    pub const GAME_OVER_BANNER: &str = "You Lose! Game Over!";
}
