use alien_invasion::compute::*;
use alien_invasion::entities::*;
use alien_invasion::kinematics::{Rect, Vec2};
use alien_invasion::run_state::start;
use alien_invasion::settings::{Settings, Size};

use approx::assert_relative_eq;

fn make_state() -> Session {
    let mut settings = Settings::default();
    settings.alien_size = Size::new(40.0, 40.0);
    settings.initialize_dynamic_settings();
    let mut s = init_session(settings);
    start(&mut s);
    s
}

fn formation_of(rects: &[(f32, f32)]) -> Formation {
    Formation {
        enemies: rects
            .iter()
            .map(|&(x, y)| Enemy { rect: Rect::new(x, y, 40.0, 40.0) })
            .collect(),
        built_count: rects.len(),
    }
}

// ── init_session ──────────────────────────────────────────────────────────────

#[test]
fn init_session_ship_position() {
    let s = init_session(Settings::default());
    assert_eq!(s.ship.rect.x, 570.0); // (1200 - 60) / 2
    assert_eq!(s.ship.rect.y, 752.0); // 800 - 48
    assert!(!s.ship.moving_left);
    assert!(!s.ship.moving_right);
}

#[test]
fn init_session_play_button_centered() {
    let s = init_session(Settings::default());
    assert_eq!(s.play_button, Rect::new(500.0, 375.0, 200.0, 50.0));
}

#[test]
fn tick_increments_frame_even_when_inactive() {
    let mut s = init_session(Settings::default());
    tick(&mut s);
    tick(&mut s);
    assert_eq!(s.frame, 2);
    assert_eq!(s.run_state, RunState::Inactive);
}

// ── ship movement ─────────────────────────────────────────────────────────────

#[test]
fn move_right_by_ship_speed() {
    let mut s = make_state();
    set_moving_right(&mut s, true);
    tick(&mut s);
    assert_relative_eq!(s.ship.rect.x, 571.5);
}

#[test]
fn move_left_by_ship_speed() {
    let mut s = make_state();
    set_moving_left(&mut s, true);
    tick(&mut s);
    assert_relative_eq!(s.ship.rect.x, 568.5);
}

#[test]
fn move_right_clamps_at_edge() {
    let mut s = make_state();
    s.ship.rect.x = 1139.5;
    set_moving_right(&mut s, true);
    tick(&mut s);
    assert_eq!(s.ship.rect.x, 1140.0);
    tick(&mut s);
    assert_eq!(s.ship.rect.x, 1140.0);
}

#[test]
fn move_left_clamps_at_edge() {
    let mut s = make_state();
    s.ship.rect.x = 1.0;
    set_moving_left(&mut s, true);
    tick(&mut s);
    assert_eq!(s.ship.rect.x, 0.0);
    tick(&mut s);
    assert_eq!(s.ship.rect.x, 0.0);
}

#[test]
fn both_directions_cancel_out() {
    let mut s = make_state();
    set_moving_left(&mut s, true);
    set_moving_right(&mut s, true);
    tick(&mut s);
    assert_relative_eq!(s.ship.rect.x, 570.0);
}

// ── firing ────────────────────────────────────────────────────────────────────

#[test]
fn fire_adds_bullet_at_ship_muzzle() {
    let mut s = make_state();
    assert!(fire_bullet(&mut s));
    let b = &s.bullets.projectiles()[0];
    assert_eq!(b.rect.centerx(), 600.0);
    assert_eq!(b.rect.top(), 752.0);
    assert_eq!(b.owner, ProjectileOwner::Player);
}

#[test]
fn fire_capped_by_allowance() {
    let mut s = make_state();
    for _ in 0..3 {
        assert!(fire_bullet(&mut s));
    }
    assert!(!fire_bullet(&mut s));
    assert_eq!(s.bullets.len(), 3);
}

#[test]
fn special_pool_is_independent() {
    let mut s = make_state();
    for _ in 0..3 {
        fire_bullet(&mut s);
    }
    assert!(fire_special_bullet(&mut s));
    assert!(!fire_special_bullet(&mut s)); // allowance 1
    assert_eq!(s.special_bullets.len(), 1);
    assert_eq!(s.special_bullets.projectiles()[0].owner, ProjectileOwner::Special);
    assert_eq!(s.bullets.len(), 3);
}

#[test]
fn fire_ignored_when_inactive() {
    let mut s = init_session(Settings::default());
    assert!(!fire_bullet(&mut s));
    assert!(!fire_special_bullet(&mut s));
    assert!(s.bullets.is_empty());
}

#[test]
fn tick_moves_bullet_up() {
    let mut s = make_state();
    fire_bullet(&mut s);
    tick(&mut s);
    assert_relative_eq!(s.bullets.projectiles()[0].rect.y, 749.5);
}

#[test]
fn bullet_leaves_through_top() {
    let mut s = make_state();
    s.formation = formation_of(&[(1000.0, 100.0)]);
    s.bullets.fire(Vec2::new(600.0, 1.0));
    // bottom at 16, 2.5 per tick: gone once bottom <= 0 after 7 ticks
    for _ in 0..6 {
        tick(&mut s);
    }
    assert_eq!(s.bullets.len(), 1);
    tick(&mut s);
    assert!(s.bullets.is_empty());
}

// ── formation through tick ───────────────────────────────────────────────────

#[test]
fn tick_moves_formation() {
    let mut s = make_state();
    tick(&mut s);
    assert_eq!(s.formation.enemies[0].rect.x, 41.0);
    assert_eq!(s.formation.enemies[0].rect.y, 40.0);
}

#[test]
fn level_counts_ticks_with_kills_not_waves() {
    let mut s = make_state();
    s.formation = formation_of(&[(100.0, 100.0), (300.0, 100.0), (500.0, 100.0)]);

    s.bullets.fire(Vec2::new(120.0, 130.0));
    tick(&mut s);
    assert_eq!(s.stats.level, 2);

    s.bullets.fire(Vec2::new(320.0, 130.0));
    tick(&mut s);
    assert_eq!(s.stats.level, 3);

    tick(&mut s); // no kill
    assert_eq!(s.stats.level, 3);
    assert_eq!(s.stats.wave, 1);
    assert_eq!(s.stats.score, 100);
}

// ── pause ────────────────────────────────────────────────────────────────────

#[test]
fn pause_freezes_simulation() {
    let mut s = make_state();
    toggle_pause(&mut s);
    assert!(s.paused);
    let frozen = s.formation.clone();
    tick(&mut s);
    assert_eq!(s.formation, frozen);
    assert!(!fire_bullet(&mut s));

    toggle_pause(&mut s);
    tick(&mut s);
    assert_ne!(s.formation, frozen);
}

#[test]
fn pause_ignored_when_inactive() {
    let mut s = init_session(Settings::default());
    toggle_pause(&mut s);
    assert!(!s.paused);
}
