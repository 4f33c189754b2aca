//! Simulation module
//!
//! All gameplay logic lives here. It talks to the outside world only
//! through `platform::Canvas`:
//! - Fixed step per tick (no delta time)
//! - Seeded RNG only
//! - Stable iteration order (entities keyed by shape id)

pub mod ball;
pub mod brick;
pub mod collision;
pub mod object;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::{Ball, Direction, Sign};
pub use brick::Brick;
pub use collision::Contact;
pub use object::GameObject;
pub use paddle::Paddle;
pub use state::{Entity, GameEvent, GamePhase, TickOutcome, TickReport};
pub use tick::{Game, brick_layout};
