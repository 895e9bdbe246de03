/// Tunable parameters.
///
/// The static part is deserialised from JSON (every field optional, missing
/// fields keep their baseline).  The dynamic part is never read from disk: it
/// is rebuilt from the static part at the start of every run and escalated on
/// every wave clear.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;
use crate::kinematics::PoolParams;

/// What happens to the formation's direction when a new wave is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveDirection {
    /// Carry the last direction over into the next wave.
    #[default]
    Keep,
    /// Always start the next wave moving right.
    Reset,
    /// Reverse whatever the last direction was.
    Flip,
}

/// Width and height of an entity in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }
}

/// Baseline configuration for one projectile pool.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletSettings {
    pub width: f32,
    pub height: f32,
    /// World units travelled upward per tick.
    pub speed: f32,
    /// Maximum live projectiles at run start.
    pub allowed: u32,
    /// Minimum ticks between two shots.
    pub cooldown_ticks: u32,
}

impl Default for BulletSettings {
    fn default() -> Self {
        BulletSettings {
            width: 3.0,
            height: 15.0,
            speed: 2.5,
            allowed: 3,
            cooldown_ticks: 0,
        }
    }
}

impl BulletSettings {
    pub fn special() -> Self {
        BulletSettings {
            width: 180.0,
            height: 15.0,
            speed: 1.5,
            allowed: 1,
            cooldown_ticks: 120,
        }
    }
}

/// Field-by-field overrides for a [`BulletSettings`] read from a file.
#[derive(Deserialize)]
struct BulletOverrides {
    width: Option<f32>,
    height: Option<f32>,
    speed: Option<f32>,
    allowed: Option<u32>,
    cooldown_ticks: Option<u32>,
}

impl BulletOverrides {
    fn apply_to(self, base: BulletSettings) -> BulletSettings {
        BulletSettings {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            speed: self.speed.unwrap_or(base.speed),
            allowed: self.allowed.unwrap_or(base.allowed),
            cooldown_ticks: self.cooldown_ticks.unwrap_or(base.cooldown_ticks),
        }
    }
}

/// Missing fields of the `special_bullet` object keep the special baseline.
fn special_bullet<'de, D>(deserializer: D) -> Result<BulletSettings, D::Error>
where
    D: Deserializer<'de>,
{
    BulletOverrides::deserialize(deserializer).map(|o| o.apply_to(BulletSettings::special()))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Screen ──
    pub screen_width: f32,
    pub screen_height: f32,
    pub bg_color: [u8; 3],
    pub frame_rate: u32,

    // ── Ship ──
    pub ship_size: Size,
    pub ship_speed: f32,
    pub ship_limit: u32,
    /// Real-time length of the stun after losing a life.
    pub life_lost_pause_ms: u64,

    // ── Projectiles ──
    pub bullet: BulletSettings,
    #[serde(deserialize_with = "special_bullet")]
    pub special_bullet: BulletSettings,

    // ── Formation ──
    pub alien_size: Size,
    pub alien_speed: f32,
    pub fleet_drop_speed: f32,
    pub max_alien_speed: Option<f32>,
    pub wave_direction: WaveDirection,

    // ── Escalation ──
    pub speedup_scale: f32,
    pub alien_points: u32,
    pub score_increment: u32,

    pub play_button: Size,

    #[serde(skip)]
    pub dynamic: DynamicSettings,
}

/// The subset of settings that resets every run and grows every wave.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DynamicSettings {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub special_bullet_speed: f32,
    pub alien_speed: f32,
    pub fleet_drop_speed: f32,
    /// +1.0 moves right, -1.0 moves left.
    pub fleet_direction: f32,
    pub alien_points: u32,
    pub bullets_allowed: u32,
    pub special_bullets_allowed: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Settings {
            screen_width: 1200.0,
            screen_height: 800.0,
            bg_color: [230, 230, 230],
            frame_rate: 60,
            ship_size: Size::new(60.0, 48.0),
            ship_speed: 1.5,
            ship_limit: 3,
            life_lost_pause_ms: 1000,
            bullet: BulletSettings::default(),
            special_bullet: BulletSettings::special(),
            alien_size: Size::new(60.0, 58.0),
            alien_speed: 1.0,
            fleet_drop_speed: 10.0,
            max_alien_speed: None,
            wave_direction: WaveDirection::Keep,
            speedup_scale: 1.1,
            alien_points: 50,
            score_increment: 10,
            play_button: Size::new(200.0, 50.0),
            dynamic: DynamicSettings::default(),
        };
        settings.initialize_dynamic_settings();
        settings
    }
}

impl Settings {
    /// Parse settings from JSON.  Missing fields fall back to the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        settings.initialize_dynamic_settings();
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        settings.initialize_dynamic_settings();
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values that would break the simulation's invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
            }
        }

        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("ship_size.width", self.ship_size.width)?;
        positive("ship_size.height", self.ship_size.height)?;
        positive("ship_speed", self.ship_speed)?;
        positive("alien_size.width", self.alien_size.width)?;
        positive("alien_size.height", self.alien_size.height)?;
        positive("alien_speed", self.alien_speed)?;
        positive("bullet.width", self.bullet.width)?;
        positive("bullet.height", self.bullet.height)?;
        positive("bullet.speed", self.bullet.speed)?;
        positive("special_bullet.width", self.special_bullet.width)?;
        positive("special_bullet.height", self.special_bullet.height)?;
        positive("special_bullet.speed", self.special_bullet.speed)?;
        positive("play_button.width", self.play_button.width)?;
        positive("play_button.height", self.play_button.height)?;

        if !(self.fleet_drop_speed.is_finite() && self.fleet_drop_speed >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fleet_drop_speed must not be negative, got {}",
                self.fleet_drop_speed
            )));
        }
        // Escalation must never slow the game down.
        if !(self.speedup_scale.is_finite() && self.speedup_scale >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "speedup_scale must be at least 1.0, got {}",
                self.speedup_scale
            )));
        }
        if let Some(cap) = self.max_alien_speed {
            if !(cap.is_finite() && cap >= self.alien_speed) {
                return Err(ConfigError::Invalid(format!(
                    "max_alien_speed ({cap}) must be at least alien_speed ({})",
                    self.alien_speed
                )));
            }
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::Invalid("frame_rate must be non-zero".into()));
        }
        if self.bullet.allowed == 0 {
            return Err(ConfigError::Invalid("bullet.allowed must be non-zero".into()));
        }
        Ok(())
    }

    /// Reset the dynamic subset to its baseline.
    pub fn initialize_dynamic_settings(&mut self) {
        self.dynamic = DynamicSettings {
            ship_speed: self.ship_speed,
            bullet_speed: self.bullet.speed,
            special_bullet_speed: self.special_bullet.speed,
            alien_speed: self.alien_speed,
            fleet_drop_speed: self.fleet_drop_speed,
            fleet_direction: 1.0,
            alien_points: self.alien_points,
            bullets_allowed: self.bullet.allowed,
            special_bullets_allowed: self.special_bullet.allowed,
        };
    }

    /// Escalate difficulty after a wave clear.
    pub fn increase_speed(&mut self) {
        let scale = self.speedup_scale;
        let d = &mut self.dynamic;

        d.ship_speed *= scale;
        d.bullet_speed *= scale;
        d.special_bullet_speed *= scale;
        d.alien_speed *= scale;
        if let Some(cap) = self.max_alien_speed {
            d.alien_speed = d.alien_speed.min(cap);
        }
        d.alien_points = d.alien_points.saturating_add(self.score_increment);

        match self.wave_direction {
            WaveDirection::Keep => {}
            WaveDirection::Reset => d.fleet_direction = 1.0,
            WaveDirection::Flip => d.fleet_direction = -d.fleet_direction,
        }

        log::debug!(
            "difficulty raised: alien_speed={:.3} alien_points={}",
            d.alien_speed,
            d.alien_points
        );
    }

    /// Number of ticks the stun after a lost life lasts at the configured rate.
    pub fn stun_ticks(&self) -> u32 {
        let ticks = self
            .life_lost_pause_ms
            .saturating_mul(u64::from(self.frame_rate))
            / 1000;
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    pub fn bullet_params(&self) -> PoolParams {
        PoolParams {
            width: self.bullet.width,
            height: self.bullet.height,
            speed: self.dynamic.bullet_speed,
            allowance: self.dynamic.bullets_allowed,
            cooldown_ticks: self.bullet.cooldown_ticks,
        }
    }

    pub fn special_bullet_params(&self) -> PoolParams {
        PoolParams {
            width: self.special_bullet.width,
            height: self.special_bullet.height,
            speed: self.dynamic.special_bullet_speed,
            allowance: self.dynamic.special_bullets_allowed,
            cooldown_ticks: self.special_bullet.cooldown_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stun_ticks_follow_frame_rate() {
        let mut s = Settings::default();
        s.frame_rate = 60;
        s.life_lost_pause_ms = 1000;
        assert_eq!(s.stun_ticks(), 60);
        s.life_lost_pause_ms = 500;
        assert_eq!(s.stun_ticks(), 30);
        s.life_lost_pause_ms = 0;
        assert_eq!(s.stun_ticks(), 0);
    }

    #[test]
    fn huge_pause_saturates_stun_ticks() {
        let mut s = Settings::default();
        s.life_lost_pause_ms = u64::MAX;
        s.frame_rate = 60;
        assert_eq!(s.stun_ticks(), u32::MAX);
    }

    #[test]
    fn flip_direction_on_wave() {
        let mut s = Settings::default();
        s.wave_direction = WaveDirection::Flip;
        s.initialize_dynamic_settings();
        s.increase_speed();
        assert_eq!(s.dynamic.fleet_direction, -1.0);
        s.increase_speed();
        assert_eq!(s.dynamic.fleet_direction, 1.0);
    }
}
