/// Collision and scoring: the resolution pass that runs after every
/// kinematics update.
///
/// Removals are always decided against an unmodified view of the entity
/// lists first and applied in a second pass, so no list is mutated while it
/// is being scanned.

use crate::entities::{Enemy, Projectile, RunState, Session};
use crate::formation;
use crate::run_state;

/// What one resolution pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub kills: u32,
    pub wave_cleared: bool,
    pub life_lost: bool,
}

/// Indices to remove, one flag per entity.
#[derive(Debug, PartialEq)]
pub struct Removals {
    pub bullets: Vec<bool>,
    pub special_bullets: Vec<bool>,
    pub enemies: Vec<bool>,
    pub kills: u32,
}

impl Removals {
    pub fn is_empty(&self) -> bool {
        self.kills == 0
    }
}

/// Mark every overlapping projectile/enemy pair.
///
/// Player bullets are scanned before special bullets.  A projectile takes out
/// every live enemy it overlaps; an enemy already taken this pass is skipped,
/// so each entity is removed at most once.
pub fn find_hits(bullets: &[Projectile], special: &[Projectile], enemies: &[Enemy]) -> Removals {
    let mut dead_enemies = vec![false; enemies.len()];
    let mut kills = 0;

    let mut scan = |projectiles: &[Projectile]| -> Vec<bool> {
        projectiles
            .iter()
            .map(|p| {
                let mut hit = false;
                for (ei, enemy) in enemies.iter().enumerate() {
                    if !dead_enemies[ei] && p.rect.overlaps(&enemy.rect) {
                        dead_enemies[ei] = true;
                        kills += 1;
                        hit = true;
                    }
                }
                hit
            })
            .collect()
    };

    let bullets = scan(bullets);
    let special_bullets = scan(special);

    Removals {
        bullets,
        special_bullets,
        enemies: dead_enemies,
        kills,
    }
}

fn apply(session: &mut Session, removals: &Removals) {
    session.bullets.remove_flagged(&removals.bullets);
    session.special_bullets.remove_flagged(&removals.special_bullets);
    let mut flags = removals.enemies.iter();
    session
        .formation
        .enemies
        .retain(|_| !flags.next().copied().unwrap_or(false));
}

/// Run the full resolution pass on an active session.
pub fn resolve(session: &mut Session) -> CollisionReport {
    let mut report = CollisionReport::default();

    // ── 1. Projectiles that left the screen ──────────────────────────────────
    session.bullets.prune_exited();
    session.special_bullets.prune_exited();

    // ── 2. Projectile ↔ enemy ────────────────────────────────────────────────
    let removals = find_hits(
        session.bullets.projectiles(),
        session.special_bullets.projectiles(),
        &session.formation.enemies,
    );

    // ── 3. Score, high score, level ─────────────────────────────────────────
    if !removals.is_empty() {
        apply(session, &removals);
        award(session, removals.kills);
        report.kills = removals.kills;
    }

    // ── 4. Wave clear ────────────────────────────────────────────────────────
    if session.formation.is_cleared() {
        next_wave(session);
        report.wave_cleared = true;
    }

    // ── 5. Enemy ↔ ship ──────────────────────────────────────────────────────
    let ship = session.ship.rect;
    if session
        .formation
        .enemies
        .iter()
        .any(|e| e.rect.overlaps(&ship))
    {
        run_state::life_lost(session);
        report.life_lost = true;
        return report;
    }

    // ── 6. Enemy reached the bottom ──────────────────────────────────────────
    let floor = session.settings.screen_height;
    if session
        .formation
        .lowest_bottom()
        .is_some_and(|bottom| bottom >= floor)
    {
        run_state::life_lost(session);
        report.life_lost = true;
    }

    report
}

fn award(session: &mut Session, kills: u32) {
    let points = session.settings.dynamic.alien_points.saturating_mul(kills);
    let stats = &mut session.stats;
    stats.score = stats.score.saturating_add(points);
    if stats.score > stats.high_score {
        stats.high_score = stats.score;
    }
    stats.level += 1;
    log::debug!("{kills} kill(s), score {}", stats.score);
}

fn next_wave(session: &mut Session) {
    debug_assert_eq!(session.run_state, RunState::Active);

    session.bullets.clear();
    session.special_bullets.clear();
    formation::rebuild(session);

    session.settings.increase_speed();
    session.settings.dynamic.bullets_allowed += 1;
    run_state::sync_pools(session);
    session.stats.wave += 1;

    log::info!(
        "wave cleared, starting wave {} at alien speed {:.2}",
        session.stats.wave,
        session.settings.dynamic.alien_speed
    );
}
