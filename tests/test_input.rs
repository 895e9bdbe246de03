use alien_invasion::compute::init_session;
use alien_invasion::entities::{RunState, Session};
use alien_invasion::input::{handle_event, Flow, InputEvent, Key};
use alien_invasion::kinematics::Vec2;
use alien_invasion::settings::Settings;

fn make_session() -> Session {
    init_session(Settings::default())
}

fn press(s: &mut Session, key: Key) -> Flow {
    handle_event(s, InputEvent::KeyDown(key))
}

#[test]
fn quit_events_stop_the_loop() {
    let mut s = make_session();
    assert_eq!(handle_event(&mut s, InputEvent::Quit), Flow::Quit);
    assert_eq!(press(&mut s, Key::Quit), Flow::Quit);
    assert_eq!(press(&mut s, Key::Left), Flow::Continue);
}

#[test]
fn movement_keys_set_and_clear_flags() {
    let mut s = make_session();
    press(&mut s, Key::Left);
    press(&mut s, Key::Right);
    assert!(s.ship.moving_left);
    assert!(s.ship.moving_right);

    handle_event(&mut s, InputEvent::KeyUp(Key::Left));
    assert!(!s.ship.moving_left);
    assert!(s.ship.moving_right);
}

#[test]
fn click_on_play_button_starts_run() {
    let mut s = make_session();
    handle_event(&mut s, InputEvent::PointerDown(Vec2::new(600.0, 400.0)));
    assert_eq!(s.run_state, RunState::Active);
    assert!(!s.formation.is_empty());
}

#[test]
fn click_outside_play_button_does_nothing() {
    let mut s = make_session();
    handle_event(&mut s, InputEvent::PointerDown(Vec2::new(100.0, 100.0)));
    assert_eq!(s.run_state, RunState::Inactive);
}

#[test]
fn click_during_run_does_not_restart() {
    let mut s = make_session();
    press(&mut s, Key::Play);
    s.stats.score = 700;

    handle_event(&mut s, InputEvent::PointerDown(Vec2::new(600.0, 400.0)));
    press(&mut s, Key::Play);

    assert_eq!(s.run_state, RunState::Active);
    assert_eq!(s.stats.score, 700);
}

#[test]
fn fire_keys_only_work_during_run() {
    let mut s = make_session();
    press(&mut s, Key::Fire);
    press(&mut s, Key::FireSpecial);
    assert!(s.bullets.is_empty());
    assert!(s.special_bullets.is_empty());

    press(&mut s, Key::Play);
    press(&mut s, Key::Fire);
    press(&mut s, Key::FireSpecial);
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.special_bullets.len(), 1);
}

#[test]
fn pause_key_toggles() {
    let mut s = make_session();
    press(&mut s, Key::Play);
    press(&mut s, Key::Pause);
    assert!(s.paused);
    press(&mut s, Key::Pause);
    assert!(!s.paused);
}
