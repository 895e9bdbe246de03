/// Shared motion primitives.
///
/// Positions are plain `f32` world coordinates with the origin in the
/// top-left corner and `y` growing downward.  Nothing in this module checks
/// bounds: each caller decides what leaving the screen means.

use crate::entities::{Projectile, ProjectileOwner};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn centerx(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open containment, left/top edges inclusive.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Move `rect` by `velocity`.
pub fn advance(rect: &mut Rect, velocity: Vec2) {
    rect.x += velocity.x;
    rect.y += velocity.y;
}

/// Anything that moves by a constant velocity each tick.
pub trait Kinematic {
    fn rect_mut(&mut self) -> &mut Rect;
    fn velocity(&self) -> Vec2;

    fn step(&mut self) {
        let velocity = self.velocity();
        advance(self.rect_mut(), velocity);
    }
}

// ── Projectile pools ─────────────────────────────────────────────────────────

/// Parameters of one projectile pool.  Both bullet kinds share the same pool
/// logic and differ only in these values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoolParams {
    pub width: f32,
    pub height: f32,
    /// Upward speed in world units per tick.
    pub speed: f32,
    /// Maximum number of live projectiles.
    pub allowance: u32,
    /// Minimum ticks between two shots.
    pub cooldown_ticks: u32,
}

#[derive(Clone, Debug)]
pub struct ProjectilePool {
    owner: ProjectileOwner,
    params: PoolParams,
    cooldown_left: u32,
    projectiles: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn new(owner: ProjectileOwner, params: PoolParams) -> Self {
        ProjectilePool {
            owner,
            params,
            cooldown_left: 0,
            projectiles: Vec::new(),
        }
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    /// Replace the pool parameters.  Live projectiles pick up the new speed
    /// on their next step.
    pub fn configure(&mut self, params: PoolParams) {
        self.params = params;
        for p in &mut self.projectiles {
            p.velocity = Vec2::new(0.0, -params.speed);
        }
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown_left == 0 && self.projectiles.len() < self.params.allowance as usize
    }

    /// Spawn a projectile whose mid-top sits on `muzzle`.  Returns `false`
    /// when the pool is full or still cooling down.
    pub fn fire(&mut self, muzzle: Vec2) -> bool {
        if !self.can_fire() {
            return false;
        }
        let rect = Rect::new(
            muzzle.x - self.params.width / 2.0,
            muzzle.y,
            self.params.width,
            self.params.height,
        );
        self.projectiles.push(Projectile {
            rect,
            velocity: Vec2::new(0.0, -self.params.speed),
            owner: self.owner,
        });
        self.cooldown_left = self.params.cooldown_ticks;
        true
    }

    /// Step every projectile and count the cooldown down.
    pub fn advance(&mut self) {
        for p in &mut self.projectiles {
            p.step();
        }
        self.cooldown_left = self.cooldown_left.saturating_sub(1);
    }

    /// Drop projectiles that have left through the top edge.
    pub fn prune_exited(&mut self) -> usize {
        let before = self.projectiles.len();
        self.projectiles.retain(|p| p.rect.bottom() > 0.0);
        before - self.projectiles.len()
    }

    /// Keep only the projectiles whose index is not flagged in `removed`.
    pub fn remove_flagged(&mut self, removed: &[bool]) {
        let mut flags = removed.iter();
        self.projectiles
            .retain(|_| !flags.next().copied().unwrap_or(false));
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.cooldown_left = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PoolParams {
        PoolParams {
            width: 4.0,
            height: 10.0,
            speed: 5.0,
            allowance: 2,
            cooldown_ticks: 3,
        }
    }

    #[test]
    fn cooldown_blocks_until_counted_down() {
        let mut pool = ProjectilePool::new(ProjectileOwner::Special, params());
        assert!(pool.fire(Vec2::new(100.0, 500.0)));
        assert!(!pool.fire(Vec2::new(100.0, 500.0)));
        for _ in 0..3 {
            pool.advance();
        }
        assert!(pool.fire(Vec2::new(100.0, 500.0)));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn remove_flagged_keeps_unflagged_order() {
        let mut pool = ProjectilePool::new(
            ProjectileOwner::Player,
            PoolParams { allowance: 5, cooldown_ticks: 0, ..params() },
        );
        for x in [10.0, 20.0, 30.0] {
            pool.fire(Vec2::new(x, 100.0));
        }
        pool.remove_flagged(&[false, true, false]);
        let xs: Vec<f32> = pool.projectiles().iter().map(|p| p.rect.centerx()).collect();
        assert_eq!(xs, vec![10.0, 30.0]);
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }
}
