//! Tunable game constants.
//!
//! Every field has a default matching the classic 800×600 layout; a JSON
//! document only needs to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Play field ───────────────────────────────────────────────────────────
    pub field_width: i32,
    pub field_height: i32,
    /// Nominal tick length in milliseconds.  Accumulated by every `step` to
    /// time enemy fire, so the simulation never reads a wall clock.
    pub tick_ms: u32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_speed: i32,
    pub player_width: i32,
    pub player_height: i32,
    pub bullet_speed: i32,
    pub bullet_width: i32,
    pub bullet_height: i32,

    // ── Enemy formation ──────────────────────────────────────────────────────
    pub enemy_speed: i32,
    pub enemy_width: i32,
    pub enemy_height: i32,
    pub enemy_rows: u32,
    pub enemy_cols: u32,
    pub enemy_origin_x: i32,
    pub enemy_origin_y: i32,
    pub enemy_spacing_x: i32,
    pub enemy_spacing_y: i32,
    /// Number of cosmetic sprite variants, assigned per row.
    pub enemy_variants: u8,
    /// Distance from either side wall at which the formation turns around.
    pub formation_margin: i32,
    pub enemy_bullet_speed: i32,
    pub enemy_bullet_width: i32,
    pub enemy_bullet_height: i32,
    /// How far above the shooter's bottom edge an enemy bullet spawns.
    pub enemy_bullet_overlap: i32,
    pub enemy_shoot_interval_ms: u32,

    // ── Barriers ─────────────────────────────────────────────────────────────
    pub barrier_count: u32,
    pub barrier_origin_x: i32,
    pub barrier_spacing: i32,
    /// Barrier top edge sits this far above the bottom of the field.
    pub barrier_y_offset: i32,
    pub barrier_width: i32,
    pub barrier_height: i32,
    pub barrier_damage: i32,
    pub barrier_min_width: i32,

    // ── Scoring & effects ────────────────────────────────────────────────────
    pub kill_score: u32,
    /// Ticks a destroyed enemy stays in the collection as an explosion.
    /// Zero removes it in the same tick it was hit.
    pub destruction_delay_ticks: u32,

    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800,
            field_height: 600,
            tick_ms: 16,

            player_speed: 5,
            player_width: 50,
            player_height: 50,
            bullet_speed: 7,
            bullet_width: 2,
            bullet_height: 10,

            enemy_speed: 2,
            enemy_width: 40,
            enemy_height: 40,
            enemy_rows: 5,
            enemy_cols: 8,
            enemy_origin_x: 100,
            enemy_origin_y: 50,
            enemy_spacing_x: 80,
            enemy_spacing_y: 60,
            enemy_variants: 5,
            formation_margin: 10,
            enemy_bullet_speed: 4,
            enemy_bullet_width: 8,
            enemy_bullet_height: 20,
            enemy_bullet_overlap: 5,
            enemy_shoot_interval_ms: 5000,

            barrier_count: 3,
            barrier_origin_x: 200,
            barrier_spacing: 200,
            barrier_y_offset: 150,
            barrier_width: 100,
            barrier_height: 40,
            barrier_damage: 10,
            barrier_min_width: 20,

            kill_score: 100,
            destruction_delay_ticks: 0,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("enemy_bullet_width", self.enemy_bullet_width),
            ("enemy_bullet_height", self.enemy_bullet_height),
            ("barrier_width", self.barrier_width),
            ("barrier_height", self.barrier_height),
            ("barrier_damage", self.barrier_damage),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v <= 0) {
            return Err(ConfigError::Invalid(format!("{name} must be positive")));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be positive".into()));
        }
        if self.enemy_variants == 0 {
            return Err(ConfigError::Invalid("enemy_variants must be positive".into()));
        }
        if self.player_width > self.field_width {
            return Err(ConfigError::Invalid(format!(
                "player_width {} exceeds field_width {}",
                self.player_width, self.field_width
            )));
        }
        if self.barrier_min_width < 0 || self.barrier_min_width >= self.barrier_width {
            return Err(ConfigError::Invalid(format!(
                "barrier_min_width {} must be in [0, barrier_width {})",
                self.barrier_min_width, self.barrier_width
            )));
        }
        Ok(())
    }

    /// Number of ticks between two enemy shots, rounded up.
    pub fn ticks_per_enemy_shot(&self) -> u32 {
        self.enemy_shoot_interval_ms.div_ceil(self.tick_ms.max(1))
    }
}
