/// Formation layout and collective movement.

use crate::entities::{Enemy, Formation, Session};
use crate::kinematics::{advance, Rect, Vec2};
use crate::settings::DynamicSettings;

/// Lay enemies out on a grid with one enemy of spacing on every side.
///
/// Starts at `(enemy_width, enemy_height)`, steps by twice the enemy size,
/// and stops a row once `x` reaches `viewport_width - 2 * enemy_width` and the
/// grid once `y` reaches `viewport_height - 3 * enemy_height`.  Sizes too large
/// for the viewport give an empty formation.
pub fn build_formation(
    viewport_width: f32,
    viewport_height: f32,
    enemy_width: f32,
    enemy_height: f32,
) -> Formation {
    if enemy_width <= 0.0 || enemy_height <= 0.0 {
        return Formation::default();
    }

    let mut enemies = Vec::new();
    let max_x = viewport_width - 2.0 * enemy_width;
    let max_y = viewport_height - 3.0 * enemy_height;

    let mut y = enemy_height;
    while y < max_y {
        let mut x = enemy_width;
        while x < max_x {
            enemies.push(Enemy {
                rect: Rect::new(x, y, enemy_width, enemy_height),
            });
            x += 2.0 * enemy_width;
        }
        y += 2.0 * enemy_height;
    }

    let built_count = enemies.len();
    Formation {
        enemies,
        built_count,
    }
}

impl Formation {
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Emptied by kills, as opposed to built empty.
    pub fn is_cleared(&self) -> bool {
        self.built_count > 0 && self.enemies.is_empty()
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
    }

    /// Step every enemy sideways, then flip and drop once if any of them
    /// touches a side edge.  Returns whether the formation flipped.
    pub fn tick(&mut self, dynamic: &mut DynamicSettings, viewport_width: f32) -> bool {
        if self.enemies.is_empty() {
            return false;
        }

        let step = Vec2::new(dynamic.fleet_direction * dynamic.alien_speed, 0.0);
        for enemy in &mut self.enemies {
            advance(&mut enemy.rect, step);
        }

        let at_edge = self
            .enemies
            .iter()
            .any(|e| e.rect.left() <= 0.0 || e.rect.right() >= viewport_width);
        if !at_edge {
            return false;
        }

        let drop = Vec2::new(0.0, dynamic.fleet_drop_speed);
        for enemy in &mut self.enemies {
            advance(&mut enemy.rect, drop);
        }
        dynamic.fleet_direction = -dynamic.fleet_direction;
        true
    }

    pub fn lowest_bottom(&self) -> Option<f32> {
        self.enemies
            .iter()
            .map(|e| e.rect.bottom())
            .reduce(f32::max)
    }
}

/// Replace the session's formation with a freshly built one.
pub fn rebuild(session: &mut Session) {
    let s = &session.settings;
    session.formation = build_formation(
        s.screen_width,
        s.screen_height,
        s.alien_size.width,
        s.alien_size.height,
    );
    if session.formation.is_empty() {
        log::warn!(
            "formation built empty: alien size {}x{} does not fit {}x{}",
            s.alien_size.width,
            s.alien_size.height,
            s.screen_width,
            s.screen_height
        );
    }
}
