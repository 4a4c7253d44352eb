//! Decorative effects
//!
//! Falling cells, sparkles and the top-row celebration. Driven by commit results and
//! frame time only; nothing here feeds back into scoring or the stack.
//! Positions are in cell units with y pointing up (row 0 at y = 0).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::StackGrid;
use super::state::CommitResult;
use crate::settings::Settings;

/// Downward acceleration in cells/s²
pub const GRAVITY: f32 = 20.0;
/// Effects are dropped once this far below row 0
pub const DESPAWN_DEPTH: f32 = -2.0;

/// A column that missed the stack
#[derive(Debug, Clone, PartialEq)]
pub struct FallingCell {
    pub col: u32,
    /// Row it was committed on
    pub row: u32,
    pub y: f32,
    pub velocity: f32,
}

impl FallingCell {
    /// 1.0 when released, 0.0 three rows down
    pub fn alpha(&self) -> f32 {
        (1.0 - (self.row as f32 - self.y) / 3.0).clamp(0.0, 1.0)
    }
}

/// A stacked cell flung off during the win celebration
#[derive(Debug, Clone, PartialEq)]
pub struct CelebrationBlock {
    pub col: u32,
    pub row: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub spin: f32,
}

/// Particle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Sparkle,
    Minor,
    Major,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// All decorative state for one round
#[derive(Debug, Clone)]
pub struct Effects {
    pub falling: Vec<FallingCell>,
    pub celebration: Vec<CelebrationBlock>,
    pub particles: Vec<Particle>,
    /// Win celebration running; stacked cells are drawn by `celebration` instead
    pub celebrating: bool,
    /// Screen flash intensity, decays to 0
    pub flash: f32,
    max_particles: usize,
    reduced_motion: bool,
    rng: Pcg32,
}

impl Effects {
    pub fn new(seed: u64, max_particles: usize, reduced_motion: bool) -> Self {
        Self {
            falling: Vec::new(),
            celebration: Vec::new(),
            particles: Vec::new(),
            celebrating: false,
            flash: 0.0,
            max_particles,
            reduced_motion,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn from_settings(seed: u64, settings: &Settings) -> Self {
        Self::new(seed, settings.max_particles(), settings.reduced_motion)
    }

    /// Drop everything (round restart)
    pub fn clear(&mut self) {
        self.falling.clear();
        self.celebration.clear();
        self.particles.clear();
        self.celebrating = false;
        self.flash = 0.0;
    }

    pub fn is_idle(&self) -> bool {
        self.falling.is_empty() && self.celebration.is_empty() && self.particles.is_empty()
    }

    /// React to a commit. `grid` is the stack after the commit.
    pub fn on_commit(&mut self, result: &CommitResult, grid: &StackGrid) {
        for &col in &result.fallen {
            self.falling.push(FallingCell {
                col,
                row: result.row,
                y: result.row as f32,
                velocity: 0.0,
            });
        }

        if result.major_prize {
            self.celebrate(grid);
        } else if result.minor_prize {
            let center = Vec2::new(grid.width() as f32 / 2.0, result.row as f32 + 0.5);
            self.burst(center, 24, ParticleKind::Minor);
        } else if result.perfect {
            for &col in &result.aligned {
                let center = Vec2::new(col as f32 + 0.5, result.row as f32 + 0.5);
                self.burst(center, 4, ParticleKind::Sparkle);
            }
        }
    }

    fn celebrate(&mut self, grid: &StackGrid) {
        if self.reduced_motion {
            return;
        }
        self.celebrating = true;
        self.flash = 1.0;
        for (row, col) in grid.all_filled_cells() {
            let vel = Vec2::new(
                self.rng.random_range(-4.0..4.0),
                self.rng.random_range(4.0..12.0),
            );
            let spin: f32 = self.rng.random_range(-6.0..6.0);
            self.celebration.push(CelebrationBlock {
                col,
                row,
                pos: Vec2::new(col as f32, row as f32),
                vel,
                rotation: 0.0,
                spin,
            });
        }
        let center = Vec2::new(grid.width() as f32 / 2.0, grid.height() as f32 - 0.5);
        self.burst(center, 60, ParticleKind::Major);
    }

    fn burst(&mut self, center: Vec2, count: usize, kind: ParticleKind) {
        if self.reduced_motion {
            return;
        }
        for _ in 0..count {
            if self.particles.len() >= self.max_particles {
                break;
            }
            let angle: f32 = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed: f32 = self.rng.random_range(1.0..6.0);
            let life: f32 = self.rng.random_range(0.4..1.2);
            self.particles.push(Particle {
                kind,
                pos: center,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life,
                max_life: life,
                size: self.rng.random_range(0.08..0.2),
            });
        }
    }

    pub fn tick(&mut self, dt: f32) {
        for cell in &mut self.falling {
            cell.velocity += GRAVITY * dt;
            cell.y -= cell.velocity * dt;
        }
        self.falling.retain(|c| c.y > DESPAWN_DEPTH);

        for block in &mut self.celebration {
            block.vel.y -= GRAVITY * dt;
            block.pos += block.vel * dt;
            block.rotation += block.spin * dt;
        }
        self.celebration.retain(|b| b.pos.y > DESPAWN_DEPTH);

        for particle in &mut self.particles {
            particle.vel.y -= GRAVITY * 0.5 * dt;
            particle.pos += particle.vel * dt;
            particle.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);

        self.flash = (self.flash - dt * 0.5).max(0.0);
    }
}
