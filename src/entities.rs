/// All game entity types and the session context. Pure data, no rules.

use crate::kinematics::{Kinematic, ProjectilePool, Rect, Vec2};
use crate::settings::Settings;

// ── Run state ─────────────────────────────────────────────────────────────────

/// Coarse game mode.  Game over is `Inactive` with no ships left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Inactive,
    Active,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    /// The wide "best" bullet with its own allowance and cooldown.
    Special,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    pub velocity: Vec2,
    pub owner: ProjectileOwner,
}

impl Kinematic for Projectile {
    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }
}

// ── Ship & enemies ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub rect: Rect,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// A stationary ship resting on the bottom edge, horizontally centred.
    pub fn centered(width: f32, height: f32, screen_width: f32, screen_height: f32) -> Self {
        Ship {
            rect: Rect::new(
                (screen_width - width) / 2.0,
                screen_height - height,
                width,
                height,
            ),
            moving_left: false,
            moving_right: false,
        }
    }

    /// Where new projectiles appear: the middle of the ship's top edge.
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.rect.centerx(), self.rect.top())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
}

/// The live enemies of the current wave.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Formation {
    pub enemies: Vec<Enemy>,
    /// How many enemies the last build produced.  A formation that was built
    /// empty is never reported as cleared.
    pub built_count: usize,
}

// ── Stats ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stats {
    pub score: u32,
    /// Survives `start()`; only ever grows during the process lifetime.
    pub high_score: u32,
    /// Bumped on every tick that destroys at least one enemy.
    pub level: u32,
    /// Bumped on every wave clear.
    pub wave: u32,
    pub ships_left: u32,
}

impl Stats {
    pub fn new(ship_limit: u32) -> Self {
        Stats {
            score: 0,
            high_score: 0,
            level: 1,
            wave: 1,
            ships_left: ship_limit,
        }
    }

    pub fn reset(&mut self, ship_limit: u32) {
        self.score = 0;
        self.level = 1;
        self.wave = 1;
        self.ships_left = ship_limit;
    }
}

// ── Session context ───────────────────────────────────────────────────────────

/// Everything one game process owns.  Passed by `&mut` into every engine
/// operation; there is no other shared state.
#[derive(Clone, Debug)]
pub struct Session {
    pub settings: Settings,
    pub stats: Stats,
    pub run_state: RunState,
    /// Ticks of life-lost stun left; simulation is frozen while non-zero.
    pub stun_ticks: u32,
    pub paused: bool,
    pub ship: Ship,
    pub bullets: ProjectilePool,
    pub special_bullets: ProjectilePool,
    pub formation: Formation,
    pub play_button: Rect,
    pub frame: u64,
}

impl Session {
    pub fn is_game_over(&self) -> bool {
        self.run_state == RunState::Inactive && self.stats.ships_left == 0
    }

    /// Ticks run the simulation only in this condition.
    pub fn is_simulating(&self) -> bool {
        self.run_state == RunState::Active && self.stun_ticks == 0 && !self.paused
    }
}
