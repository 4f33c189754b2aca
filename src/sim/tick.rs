//! Fixed-step game loop
//!
//! `Game` owns every piece of mutable state (entities, lives, held keys,
//! pending timers) and advances one tick per scheduled `GameEvent::Tick`.
//! At most one tick is ever pending; the loop ends by not scheduling the
//! next one.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::{Ball, Sign};
use super::brick::Brick;
use super::collision::Contact;
use super::object::GameObject;
use super::paddle::Paddle;
use super::state::{Entity, GameEvent, GamePhase, TickOutcome, TickReport};
use crate::consts::*;
use crate::error::CreationError;
use crate::platform::{Bounds, Canvas, Key, KeyState, ShapeId, TimerQueue};
use crate::settings::{Palette, ResumeMode, Settings};

/// Brick centers and hit points for a field of the given width:
/// columns of three rows (3, 2, 1 hits) from left to right.
pub fn brick_layout(field_width: f32) -> Vec<(Vec2, u8)> {
    let mut layout = Vec::new();
    let mut x = BRICK_MARGIN;
    while x < field_width - BRICK_MARGIN {
        for (y, hits) in BRICK_ROWS {
            layout.push((Vec2::new(x + BRICK_WIDTH / 2.0, y), hits));
        }
        x += BRICK_WIDTH;
    }
    layout
}

pub struct Game<C: Canvas> {
    canvas: C,
    settings: Settings,
    palette: Palette,
    phase: GamePhase,
    lives: i32,
    paddle: Paddle,
    balls: Vec<Ball>,
    /// Paddle and bricks by shape, for mapping overlap queries back to entities
    items: BTreeMap<ShapeId, Entity>,
    keys: KeyState,
    hud: Option<ShapeId>,
    banner: Option<ShapeId>,
    timers: TimerQueue<GameEvent>,
    rng: Pcg32,
    ticks: u64,
    last_report: TickReport,
    last_outcome: Option<TickOutcome>,
}

impl<C: Canvas> Game<C> {
    /// Build the paddle and brick field, serve the first ball and wait for Space
    pub fn new(mut canvas: C, settings: Settings) -> Result<Self, CreationError> {
        let palette = settings.palette();
        let width = canvas.width();

        let paddle = Paddle::spawn(
            &mut canvas,
            Vec2::new(width / 2.0, PADDLE_Y),
            settings.paddle_width(),
            &palette,
        )?;
        let mut items = BTreeMap::new();
        items.insert(paddle.shape(), Entity::Paddle);

        for (center, hits) in brick_layout(width) {
            let brick = Brick::spawn(&mut canvas, center, hits, &palette)?;
            items.insert(brick.shape(), Entity::Brick(brick));
        }

        let mut game = Self {
            canvas,
            rng: Pcg32::seed_from_u64(settings.seed),
            lives: settings.lives,
            settings,
            palette,
            phase: GamePhase::AwaitingStart,
            paddle,
            balls: Vec::new(),
            items,
            keys: KeyState::new(),
            hud: None,
            banner: None,
            timers: TimerQueue::new(),
            ticks: 0,
            last_report: TickReport::default(),
            last_outcome: None,
        };
        game.setup_round(ResumeMode::WaitForStart)?;

        log::info!(
            "Game created: {} bricks, {} lives, variant {}",
            game.brick_count(),
            game.lives,
            game.settings.variant.as_str()
        );
        Ok(game)
    }

    // === Host input ===

    pub fn key_pressed(&mut self, key: Key) {
        self.keys.press(key);
        if key == Key::Space && self.phase == GamePhase::AwaitingStart {
            self.start();
        }
    }

    pub fn key_released(&mut self, key: Key) {
        self.keys.release(key);
    }

    /// Run every event due at or before `now_ms`, one at a time
    pub fn pump(&mut self, now_ms: u64) -> Result<(), CreationError> {
        while let Some(event) = self.timers.pop_due(now_ms) {
            self.handle(event)?;
        }
        Ok(())
    }

    /// Advance the clock by `ms`, running whatever falls due
    pub fn run_for(&mut self, ms: u64) -> Result<(), CreationError> {
        let target = self.timers.now_ms() + ms;
        self.pump(target)
    }

    pub fn handle(&mut self, event: GameEvent) -> Result<(), CreationError> {
        match event {
            GameEvent::Tick => match self.phase {
                GamePhase::AwaitingStart => self.serve_tick(),
                GamePhase::Running => self.last_outcome = Some(self.tick()),
                _ => {}
            },
            GameEvent::ResetRound => {
                if self.phase == GamePhase::RoundResetPending {
                    if let Err(err) = self.setup_round(self.settings.resume) {
                        log::error!("Round setup aborted: {err}");
                        return Err(err);
                    }
                }
            }
        }
        Ok(())
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn bricks(&self) -> impl Iterator<Item = &Brick> {
        self.items.values().filter_map(|e| match e {
            Entity::Brick(brick) => Some(brick),
            Entity::Paddle => None,
        })
    }

    /// Bricks still on the canvas
    pub fn brick_count(&self) -> usize {
        self.canvas.query_by_tag(BRICK_TAG).len()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn timers(&self) -> &TimerQueue<GameEvent> {
        &self.timers
    }

    pub fn banner(&self) -> Option<ShapeId> {
        self.banner
    }

    pub fn hud(&self) -> Option<ShapeId> {
        self.hud
    }

    /// Running ticks executed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    /// How the most recent running tick ended
    pub fn last_outcome(&self) -> Option<TickOutcome> {
        self.last_outcome
    }

    // === Round lifecycle ===

    /// Clear leftover balls, serve a fresh one on the paddle and either wait
    /// for Space or launch right away.
    fn setup_round(&mut self, resume: ResumeMode) -> Result<(), CreationError> {
        for ball in self.balls.drain(..) {
            ball.delete(&mut self.canvas);
        }
        self.paddle.detach();

        self.add_initial_ball()?;
        self.update_lives_text()?;

        match resume {
            ResumeMode::WaitForStart => {
                self.show_banner(START_BANNER)?;
                self.phase = GamePhase::AwaitingStart;
            }
            ResumeMode::Auto => {
                self.paddle.detach();
                self.phase = GamePhase::Running;
            }
        }
        log::info!("Round ready ({} lives, {:?})", self.lives, self.phase);
        self.timers.schedule(self.settings.tick_interval_ms, GameEvent::Tick);
        Ok(())
    }

    /// Launch the served ball. The pending serve tick becomes the first
    /// running tick, so no extra tick is scheduled here.
    fn start(&mut self) {
        if let Some(banner) = self.banner.take() {
            self.canvas.delete(banner);
        }
        self.paddle.detach();
        self.phase = GamePhase::Running;
        log::info!("Round started");
    }

    fn add_initial_ball(&mut self) -> Result<(), CreationError> {
        let paddle = self
            .paddle
            .position(&self.canvas)
            .ok_or(CreationError::PaddleUnavailable)?;
        let center = Vec2::new(paddle.center().x, BALL_SERVE_Y);
        let ball = Ball::spawn(&mut self.canvas, center, &self.palette)?;
        self.paddle.attach(&ball);
        self.balls.push(ball);
        Ok(())
    }

    fn spawn_extra_ball(&mut self, center: Vec2) -> Result<(), CreationError> {
        let mut ball = Ball::spawn(&mut self.canvas, center, &self.palette)?;
        ball.direction.x = Sign::from_bool(self.rng.random_bool(0.5));
        ball.direction.y = Sign::Negative;
        log::debug!("Extra ball spawned at ({:.1}, {:.1})", center.x, center.y);
        self.balls.push(ball);
        Ok(())
    }

    fn update_lives_text(&mut self) -> Result<(), CreationError> {
        let text = format!(" Health: {}", self.lives);
        match self.hud {
            Some(hud) => self.canvas.set_text(hud, &text),
            None => {
                let at = Vec2::new(HUD_POS.0, HUD_POS.1);
                self.hud = Some(self.canvas.create_text(at, &text, HUD_FONT_SIZE)?);
            }
        }
        Ok(())
    }

    fn show_banner(&mut self, text: &str) -> Result<(), CreationError> {
        if let Some(old) = self.banner.take() {
            self.canvas.delete(old);
        }
        let at = Vec2::new(BANNER_POS.0, BANNER_POS.1);
        self.banner = Some(self.canvas.create_text(at, text, BANNER_FONT_SIZE)?);
        Ok(())
    }

    // === Ticks ===

    /// Pre-launch tick: only the paddle (and the ball resting on it) moves
    fn serve_tick(&mut self) {
        let (left, right) = self.keys.horizontal();
        self.paddle.update_physics(&mut self.canvas, left, right);
        self.timers.schedule(self.settings.tick_interval_ms, GameEvent::Tick);
    }

    /// One running tick: paddle, balls, collisions, extra balls, then the
    /// win/lose checks that decide whether another tick is scheduled.
    fn tick(&mut self) -> TickOutcome {
        self.ticks += 1;
        let (left, right) = self.keys.horizontal();
        self.paddle.update_physics(&mut self.canvas, left, right);

        let height = self.canvas.height();
        let mut report = TickReport::default();
        let mut hit_positions = Vec::new();
        {
            let canvas: &mut dyn Canvas = &mut self.canvas;
            let items = &mut self.items;
            let paddle = &self.paddle;

            self.balls.retain_mut(|ball| {
                ball.update(canvas);
                let Some(area) = ball.position(canvas) else {
                    return false;
                };
                if check_collisions(ball, canvas, items, paddle, area) {
                    report.bricks_hit += 1;
                    hit_positions.push(area);
                }
                if area.bottom >= height {
                    ball.delete(canvas);
                    report.balls_lost += 1;
                    return false;
                }
                true
            });
        }

        for area in hit_positions {
            if self.balls.len() >= self.settings.max_balls {
                break;
            }
            match self.spawn_extra_ball(area.center()) {
                Ok(()) => report.balls_spawned += 1,
                Err(err) => log::warn!("Skipped extra ball: {err}"),
            }
        }
        self.last_report = report;

        if self.brick_count() == 0 {
            for ball in &mut self.balls {
                ball.freeze();
            }
            self.phase = GamePhase::Won;
            self.announce(WIN_BANNER);
            log::info!("All bricks cleared after {} ticks", self.ticks);
            TickOutcome::Won
        } else if self.balls.is_empty() {
            self.lives -= 1;
            if self.lives < 0 {
                self.phase = GamePhase::GameOver;
                self.announce(GAME_OVER_BANNER);
                log::info!("Game over after {} ticks", self.ticks);
                TickOutcome::GameOver
            } else {
                self.phase = GamePhase::RoundResetPending;
                self.timers
                    .schedule(self.settings.reset_delay_ms, GameEvent::ResetRound);
                log::info!("Round lost, {} lives left", self.lives);
                TickOutcome::RoundLost { lives: self.lives }
            }
        } else {
            self.timers.schedule(self.settings.tick_interval_ms, GameEvent::Tick);
            TickOutcome::Continue
        }
    }

    /// Terminal banner; the outcome stands even if the host can't draw it
    fn announce(&mut self, text: &str) {
        if let Err(err) = self.show_banner(text) {
            log::warn!("Could not show banner {text:?}: {err}");
        }
    }
}

/// Find the paddle/bricks overlapping `area`, resolve the ball against them
/// and drop destroyed bricks from the lookup map.
fn check_collisions(
    ball: &mut Ball,
    canvas: &mut dyn Canvas,
    items: &mut BTreeMap<ShapeId, Entity>,
    paddle: &Paddle,
    area: Bounds,
) -> bool {
    let overlapping = canvas.query_overlapping(area);
    let mut contacts: Vec<Contact<'_>> = items
        .iter_mut()
        .filter(|(id, _)| overlapping.contains(*id))
        .map(|(_, entity)| match entity {
            Entity::Paddle => Contact::Paddle(paddle),
            Entity::Brick(brick) => Contact::Brick(brick),
        })
        .collect();

    let hit = ball.collide(canvas, &mut contacts);
    drop(contacts);

    if hit {
        items.retain(|_, entity| !matches!(entity, Entity::Brick(brick) if brick.is_destroyed()));
    }
    hit
}
