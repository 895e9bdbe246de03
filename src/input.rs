/// Abstract input events and how they act on a session.
///
/// The front end translates its own key codes into [`Key`]; this module never
/// sees a terminal event.

use crate::compute::{
    fire_bullet, fire_special_bullet, set_moving_left, set_moving_right, toggle_pause,
};
use crate::entities::{RunState, Session};
use crate::kinematics::Vec2;
use crate::run_state;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    FireSpecial,
    Play,
    Pause,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer press in world coordinates.
    PointerDown(Vec2),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn handle_event(session: &mut Session, event: InputEvent) -> Flow {
    match event {
        InputEvent::Quit | InputEvent::KeyDown(Key::Quit) => return Flow::Quit,
        InputEvent::KeyDown(key) => match key {
            Key::Left => set_moving_left(session, true),
            Key::Right => set_moving_right(session, true),
            Key::Fire => {
                fire_bullet(session);
            }
            Key::FireSpecial => {
                fire_special_bullet(session);
            }
            Key::Play => try_start(session),
            Key::Pause => toggle_pause(session),
            Key::Quit => {}
        },
        InputEvent::KeyUp(key) => match key {
            Key::Left => set_moving_left(session, false),
            Key::Right => set_moving_right(session, false),
            _ => {}
        },
        InputEvent::PointerDown(pos) => {
            if session.play_button.contains(pos) {
                try_start(session);
            }
        }
    }
    Flow::Continue
}

/// The play button only exists while no run is active.
fn try_start(session: &mut Session) {
    if session.run_state == RunState::Inactive {
        run_state::start(session);
    }
}
