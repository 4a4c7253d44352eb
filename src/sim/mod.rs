//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `dt`, clamped before use
//! - Seeded RNG only (and only for decorative effects)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod block;
pub mod effects;
pub mod grid;
pub mod round;
pub mod state;
pub mod tick;

pub use autoplay::AutoPlayer;
pub use block::{Direction, MovingBlock};
pub use effects::{CelebrationBlock, Effects, FallingCell, Particle, ParticleKind};
pub use grid::StackGrid;
pub use round::Round;
pub use state::{ActiveBlockView, CommitResult, GamePhase, RoundSnapshot};
pub use tick::{TickInput, tick};
