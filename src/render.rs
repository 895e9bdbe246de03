/// The renderer contract and the per-frame draw order.
///
/// A renderer only receives rectangles, sprite kinds and text.  It is called
/// once per tick after simulation and never sees `&mut Session`.

use crate::entities::{ProjectileOwner, RunState, Session};
use crate::kinematics::Rect;
use crate::scoreboard::Scoreboard;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Ship,
    Enemy,
    Bullet,
    SpecialBullet,
    PlayButton,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudLabel {
    Score,
    HighScore,
    Level,
    Wave,
    /// Text drawn inside the play button.
    Play,
    GameOver,
    Paused,
}

pub trait Renderer {
    type Error;

    fn clear(&mut self, background: [u8; 3]) -> Result<(), Self::Error>;
    fn draw_entity(&mut self, sprite: Sprite, rect: &Rect) -> Result<(), Self::Error>;
    fn draw_text(&mut self, label: HudLabel, value: &str) -> Result<(), Self::Error>;
    /// Remaining ships, drawn as one icon each.
    fn draw_lives(&mut self, ships: u32) -> Result<(), Self::Error>;
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Draw one complete frame.
pub fn render_frame<R: Renderer>(
    renderer: &mut R,
    session: &Session,
    board: &Scoreboard,
) -> Result<(), R::Error> {
    renderer.clear(session.settings.bg_color)?;

    let projectiles = session
        .bullets
        .projectiles()
        .iter()
        .chain(session.special_bullets.projectiles());
    for p in projectiles {
        let sprite = match p.owner {
            ProjectileOwner::Player => Sprite::Bullet,
            ProjectileOwner::Special => Sprite::SpecialBullet,
        };
        renderer.draw_entity(sprite, &p.rect)?;
    }

    renderer.draw_entity(Sprite::Ship, &session.ship.rect)?;
    for enemy in &session.formation.enemies {
        renderer.draw_entity(Sprite::Enemy, &enemy.rect)?;
    }

    renderer.draw_text(HudLabel::Score, &board.score)?;
    renderer.draw_text(HudLabel::HighScore, &board.high_score)?;
    renderer.draw_text(HudLabel::Level, &board.level)?;
    renderer.draw_text(HudLabel::Wave, &board.wave)?;
    renderer.draw_lives(board.lives)?;

    if session.is_game_over() {
        renderer.draw_text(HudLabel::GameOver, "GAME OVER")?;
    }
    if session.paused {
        renderer.draw_text(HudLabel::Paused, "PAUSED")?;
    }
    if session.run_state == RunState::Inactive {
        renderer.draw_entity(Sprite::PlayButton, &session.play_button)?;
        renderer.draw_text(HudLabel::Play, "PLAY")?;
    }

    renderer.present()
}
