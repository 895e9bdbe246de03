/// Run state machine: starting a run and losing a life.
///
/// Only these two functions change `Session::run_state`.  Calling either
/// from the wrong state is a driver bug and panics.

use crate::entities::{RunState, Session, Ship};
use crate::formation;

/// Begin a fresh run from `Inactive`.
///
/// # Panics
///
/// Panics if the session is already `Active`.
pub fn start(session: &mut Session) {
    assert_eq!(
        session.run_state,
        RunState::Inactive,
        "start() called while a run is active"
    );

    session.settings.initialize_dynamic_settings();
    let ship_limit = session.settings.ship_limit;
    session.stats.reset(ship_limit);

    session.bullets.clear();
    session.special_bullets.clear();
    sync_pools(session);
    formation::rebuild(session);
    center_ship(session);

    session.stun_ticks = 0;
    session.paused = false;
    session.run_state = RunState::Active;

    log::info!(
        "run started: {} ships, {} enemies",
        session.stats.ships_left,
        session.formation.len()
    );
}

/// Take one ship away after the formation reached the player.
///
/// With ships remaining the board is reset and the session enters a short
/// stun.  On the last ship the session goes `Inactive` and the board is left
/// untouched for the final frame.
///
/// # Panics
///
/// Panics if the session is `Inactive`.
pub fn life_lost(session: &mut Session) {
    assert_eq!(
        session.run_state,
        RunState::Active,
        "life_lost() called without an active run"
    );

    session.stats.ships_left = session.stats.ships_left.saturating_sub(1);

    if session.stats.ships_left > 0 {
        session.bullets.clear();
        session.special_bullets.clear();
        session.formation.clear();
        formation::rebuild(session);
        center_ship(session);
        session.stun_ticks = session.settings.stun_ticks();
        log::info!("ship lost, {} left", session.stats.ships_left);
    } else {
        session.run_state = RunState::Inactive;
        session.ship.moving_left = false;
        session.ship.moving_right = false;
        log::info!(
            "game over: score {} (best {})",
            session.stats.score,
            session.stats.high_score
        );
    }
}

/// Count one frame of stun down.  Returns `true` while still stunned.
pub fn tick_stun(session: &mut Session) -> bool {
    if session.stun_ticks == 0 {
        return false;
    }
    session.stun_ticks -= 1;
    true
}

/// Push the current dynamic settings into both projectile pools.
pub fn sync_pools(session: &mut Session) {
    let bullet = session.settings.bullet_params();
    let special = session.settings.special_bullet_params();
    session.bullets.configure(bullet);
    session.special_bullets.configure(special);
}

/// Put the ship back at its spawn point.  Held movement keys stay held.
fn center_ship(session: &mut Session) {
    let s = &session.settings;
    session.ship.rect = Ship::centered(
        s.ship_size.width,
        s.ship_size.height,
        s.screen_width,
        s.screen_height,
    )
    .rect;
}
