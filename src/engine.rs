//! The simulation engine.
//!
//! `Engine` owns the configuration, the game state and the RNG.  The input
//! layer calls `move_left`, `move_right` and `fire_player`; the tick scheduler
//! calls `step` once per frame; the render layer reads through the accessors.
//! Every call completes synchronously.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::compute;
use crate::config::GameConfig;
use crate::entities::{Barrier, Direction, Enemy, GameState, GameStatus, Player, Projectile};

pub struct Engine {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
}

impl Engine {
    /// Start a new game.  Seeds the RNG from `config.seed` when set.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = compute::init_state(&config);
        Self { config, state, rng }
    }

    /// Resume from an explicit state, e.g. a hand-built scenario.
    pub fn with_state(config: GameConfig, state: GameState, seed: u64) -> Self {
        Self {
            config,
            state,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // ── Input entry points ───────────────────────────────────────────────────

    pub fn move_left(&mut self) {
        self.state = compute::move_player_left(&self.state, &self.config);
    }

    pub fn move_right(&mut self) {
        self.state = compute::move_player_right(&self.state, &self.config);
    }

    pub fn fire_player(&mut self) {
        self.state = compute::player_shoot(&self.state, &self.config);
    }

    // ── Tick entry point ─────────────────────────────────────────────────────

    /// Advance one tick.  A no-op once the game has ended.
    pub fn step(&mut self) {
        self.state = compute::tick(&self.state, &self.config, &mut self.rng);
    }

    // ── Read access for rendering ────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.state.enemies
    }

    pub fn barriers(&self) -> &[Barrier] {
        &self.state.barriers
    }

    pub fn player_bullets(&self) -> &[Projectile] {
        &self.state.player_bullets
    }

    pub fn enemy_bullets(&self) -> &[Projectile] {
        &self.state.enemy_bullets
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }
}
