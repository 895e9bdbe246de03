/// Display strings derived from the session.  Read-only; nothing here feeds
/// back into the simulation.

use crate::entities::Session;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: String,
    pub high_score: String,
    pub level: String,
    pub wave: String,
    pub lives: u32,
}

impl Scoreboard {
    pub fn from_session(session: &Session) -> Self {
        let stats = &session.stats;
        Scoreboard {
            score: format_score(stats.score),
            high_score: format_score(stats.high_score),
            level: stats.level.to_string(),
            wave: stats.wave.to_string(),
            lives: stats.ships_left,
        }
    }
}

/// Round to the nearest ten (halves away from zero) and group thousands
/// with commas: `12345` → `"12,350"`.
pub fn format_score(score: u32) -> String {
    let rounded = (u64::from(score) + 5) / 10 * 10;
    let digits = rounded.to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
