/// Per-tick orchestration and player actions.
///
/// `tick` is the only entry point the frame loop calls for simulation.  It
/// gates on the run state, moves everything, then hands over to the
/// collision pass.

use crate::collision::{self, CollisionReport};
use crate::entities::{Formation, ProjectileOwner, RunState, Session, Ship, Stats};
use crate::kinematics::{ProjectilePool, Rect};
use crate::run_state;
use crate::settings::Settings;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build an `Inactive` session showing the play button.  No formation exists
/// until `start()`.
pub fn init_session(settings: Settings) -> Session {
    let ship = Ship::centered(
        settings.ship_size.width,
        settings.ship_size.height,
        settings.screen_width,
        settings.screen_height,
    );
    let play_button = Rect::new(
        (settings.screen_width - settings.play_button.width) / 2.0,
        (settings.screen_height - settings.play_button.height) / 2.0,
        settings.play_button.width,
        settings.play_button.height,
    );
    Session {
        stats: Stats::new(settings.ship_limit),
        run_state: RunState::Inactive,
        stun_ticks: 0,
        paused: false,
        ship,
        bullets: ProjectilePool::new(ProjectileOwner::Player, settings.bullet_params()),
        special_bullets: ProjectilePool::new(
            ProjectileOwner::Special,
            settings.special_bullet_params(),
        ),
        formation: Formation::default(),
        play_button,
        frame: 0,
        settings,
    }
}

// ── Player actions ───────────────────────────────────────────────────────────

pub fn set_moving_left(session: &mut Session, moving: bool) {
    session.ship.moving_left = moving;
}

pub fn set_moving_right(session: &mut Session, moving: bool) {
    session.ship.moving_right = moving;
}

/// Fire a player bullet if the pool has room.  Ignored unless simulating.
pub fn fire_bullet(session: &mut Session) -> bool {
    if !session.is_simulating() {
        return false;
    }
    let muzzle = session.ship.muzzle();
    session.bullets.fire(muzzle)
}

/// Fire a special bullet if its pool has room and has cooled down.
pub fn fire_special_bullet(session: &mut Session) -> bool {
    if !session.is_simulating() {
        return false;
    }
    let muzzle = session.ship.muzzle();
    session.special_bullets.fire(muzzle)
}

pub fn toggle_pause(session: &mut Session) {
    if session.run_state == RunState::Active {
        session.paused = !session.paused;
        log::debug!("paused: {}", session.paused);
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
pub fn tick(session: &mut Session) -> CollisionReport {
    session.frame += 1;

    if session.run_state != RunState::Active || session.paused {
        return CollisionReport::default();
    }
    if run_state::tick_stun(session) {
        return CollisionReport::default();
    }

    // ── 1. Ship ──────────────────────────────────────────────────────────────
    update_ship(session);

    // ── 2. Projectiles ───────────────────────────────────────────────────────
    session.bullets.advance();
    session.special_bullets.advance();

    // ── 3. Formation ─────────────────────────────────────────────────────────
    let width = session.settings.screen_width;
    session
        .formation
        .tick(&mut session.settings.dynamic, width);

    // ── 4. Collisions ────────────────────────────────────────────────────────
    collision::resolve(session)
}

/// Move the ship by its held direction, never past a side edge.
fn update_ship(session: &mut Session) {
    let speed = session.settings.dynamic.ship_speed;
    let width = session.settings.screen_width;
    let ship = &mut session.ship;

    if ship.moving_right && ship.rect.right() < width {
        ship.rect.x = (ship.rect.x + speed).min(width - ship.rect.width);
    }
    if ship.moving_left && ship.rect.left() > 0.0 {
        ship.rect.x = (ship.rect.x - speed).max(0.0);
    }
}
