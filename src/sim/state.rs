//! Game phases, scheduled events and the entity lookup variant

use serde::{Deserialize, Serialize};

use super::brick::Brick;

/// Current phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting on the paddle, start banner shown, waiting for Space
    AwaitingStart,
    /// Fixed-step ticks running
    Running,
    /// Last ball lost; the next round is scheduled
    RoundResetPending,
    /// Every brick cleared
    Won,
    /// Lives exhausted
    GameOver,
}

impl GamePhase {
    /// No further ticks will ever be scheduled
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::GameOver)
    }
}

/// Deferred callbacks the game schedules on itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Tick,
    ResetRound,
}

/// What an overlapping shape belongs to
#[derive(Debug, Clone)]
pub enum Entity {
    Paddle,
    Brick(Brick),
}

/// How a running tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Next tick scheduled
    Continue,
    /// All balls gone, lives remain; a round reset is scheduled
    RoundLost { lives: i32 },
    /// Lives went negative
    GameOver,
    /// No bricks left
    Won,
}

/// Per-tick bookkeeping, handy for logging and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub bricks_hit: usize,
    pub balls_spawned: usize,
    pub balls_lost: usize,
}
