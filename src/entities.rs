//! All game entity types — pure data, no logic.
//!
//! Every entity is an axis-aligned rectangle anchored at its top-left corner.

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }
}

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    PlayerWon,
    PlayerLost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        *self != GameStatus::Running
    }
}

/// Shared horizontal heading of the whole enemy formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Faction {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    /// Vertical velocity per tick; negative is upward.
    pub vy: i32,
    pub owner: Faction,
}

// ── Player, enemies & barriers ────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub alive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// False once hit.  A dead enemy no longer collides, shoots or steers
    /// the formation; it only lingers for the explosion effect.
    pub alive: bool,
    /// Cosmetic sprite index.
    pub variant: u8,
    /// Ticks left before a dead enemy is dropped from the collection.
    pub removal_ticks: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Barrier {
    pub rect: Rect,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub barriers: Vec<Barrier>,
    /// In creation order.
    pub player_bullets: Vec<Projectile>,
    /// In creation order.
    pub enemy_bullets: Vec<Projectile>,
    pub direction: Direction,
    /// Milliseconds accumulated since the last enemy shot.
    pub since_enemy_shot_ms: u32,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub width: i32,
    pub height: i32,
}

impl GameState {
    pub fn alive_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }
}
