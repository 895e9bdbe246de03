use alien_invasion::entities::*;
use alien_invasion::kinematics::{advance, Kinematic, Rect, Vec2};

#[test]
fn entity_clone_and_eq() {
    assert_eq!(RunState::Active, RunState::Active);
    assert_ne!(RunState::Active, RunState::Inactive);
    assert_eq!(ProjectileOwner::Player, ProjectileOwner::Player);
    assert_ne!(ProjectileOwner::Player, ProjectileOwner::Special);

    let enemy = Enemy { rect: Rect::new(1.0, 2.0, 3.0, 4.0) };
    assert_eq!(enemy.clone(), enemy);
}

#[test]
fn ship_centered_on_bottom_edge() {
    let ship = Ship::centered(60.0, 48.0, 1200.0, 800.0);
    assert_eq!(ship.rect, Rect::new(570.0, 752.0, 60.0, 48.0));
    assert_eq!(ship.muzzle(), Vec2::new(600.0, 752.0));
}

#[test]
fn stats_reset_keeps_high_score() {
    let mut stats = Stats::new(3);
    stats.score = 900;
    stats.high_score = 900;
    stats.level = 7;
    stats.wave = 3;
    stats.ships_left = 0;

    stats.reset(5);

    assert_eq!(stats.score, 0);
    assert_eq!(stats.high_score, 900);
    assert_eq!(stats.level, 1);
    assert_eq!(stats.wave, 1);
    assert_eq!(stats.ships_left, 5);
}

#[test]
fn projectile_steps_by_its_velocity() {
    let mut p = Projectile {
        rect: Rect::new(10.0, 100.0, 3.0, 15.0),
        velocity: Vec2::new(0.0, -2.5),
        owner: ProjectileOwner::Player,
    };
    p.step();
    p.step();
    assert_eq!(p.rect.y, 95.0);
    assert_eq!(p.rect.x, 10.0);
}

#[test]
fn advance_ignores_bounds() {
    // Far off screen is still just addition
    let mut r = Rect::new(-500.0, -500.0, 1.0, 1.0);
    advance(&mut r, Vec2::new(-1.0, -1.0));
    assert_eq!(r, Rect::new(-501.0, -501.0, 1.0, 1.0));
}

#[test]
fn rect_contains_is_half_open() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Vec2::new(0.0, 0.0)));
    assert!(r.contains(Vec2::new(9.9, 9.9)));
    assert!(!r.contains(Vec2::new(10.0, 5.0)));
    assert!(!r.contains(Vec2::new(5.0, 10.0)));
}
