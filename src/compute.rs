//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` plus the `GameConfig` (and, where needed, an RNG handle) and
//! returns a brand-new `GameState`.  Side effects are limited to the injected
//! RNG and log events.
//!
//! Once the status is terminal every function returns an unchanged copy.

use rand::Rng;
use tracing::{debug, info};

use crate::collision::{damage_barrier, overlaps};
use crate::config::GameConfig;
use crate::entities::{
    Barrier, Direction, Enemy, Faction, GameState, GameStatus, Player, Projectile, Rect,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: player centred near the bottom, a full
/// enemy grid and a row of intact barriers.
pub fn init_state(cfg: &GameConfig) -> GameState {
    let player = Player {
        rect: Rect::new(
            cfg.field_width / 2 - cfg.player_width / 2,
            cfg.field_height - 100,
            cfg.player_width,
            cfg.player_height,
        ),
        alive: true,
    };

    let mut enemies = Vec::with_capacity((cfg.enemy_rows * cfg.enemy_cols) as usize);
    for row in 0..cfg.enemy_rows {
        for col in 0..cfg.enemy_cols {
            enemies.push(Enemy {
                rect: Rect::new(
                    cfg.enemy_origin_x + col as i32 * cfg.enemy_spacing_x,
                    cfg.enemy_origin_y + row as i32 * cfg.enemy_spacing_y,
                    cfg.enemy_width,
                    cfg.enemy_height,
                ),
                alive: true,
                variant: (row % cfg.enemy_variants.max(1) as u32) as u8,
                removal_ticks: 0,
            });
        }
    }

    let barriers: Vec<Barrier> = (0..cfg.barrier_count)
        .map(|i| Barrier {
            rect: Rect::new(
                cfg.barrier_origin_x + i as i32 * cfg.barrier_spacing,
                cfg.field_height - cfg.barrier_y_offset,
                cfg.barrier_width,
                cfg.barrier_height,
            ),
        })
        .collect();

    info!(
        enemies = enemies.len(),
        barriers = barriers.len(),
        width = cfg.field_width,
        height = cfg.field_height,
        "game started"
    );

    GameState {
        player,
        enemies,
        barriers,
        player_bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        direction: Direction::Right,
        since_enemy_shot_ms: 0,
        score: 0,
        status: GameStatus::Running,
        frame: 0,
        width: cfg.field_width,
        height: cfg.field_height,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState, cfg: &GameConfig) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }
    let x = (state.player.rect.x - cfg.player_speed).max(0);
    with_player_x(state, x)
}

pub fn move_player_right(state: &GameState, cfg: &GameConfig) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }
    let max_x = state.width - state.player.rect.w;
    let x = (state.player.rect.x + cfg.player_speed).min(max_x);
    with_player_x(state, x)
}

fn with_player_x(state: &GameState, x: i32) -> GameState {
    GameState {
        player: Player {
            rect: Rect { x, ..state.player.rect },
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire a bullet from the player's horizontal centre, just above its top
/// edge.  There is no cap on bullets in flight.
pub fn player_shoot(state: &GameState, cfg: &GameConfig) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }
    let p = &state.player.rect;
    let bullet = Projectile {
        rect: Rect::new(
            p.center_x() - cfg.bullet_width / 2,
            p.top() - cfg.bullet_height,
            cfg.bullet_width,
            cfg.bullet_height,
        ),
        vy: -cfg.bullet_speed,
        owner: Faction::Player,
    };
    let mut player_bullets = state.player_bullets.clone();
    player_bullets.push(bullet);
    GameState {
        player_bullets,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, cfg: &GameConfig, rng: &mut impl Rng) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Player bullets fly up ─────────────────────────────────────────────
    next.player_bullets = advance_player_bullets(next.player_bullets);

    // ── 2. Formation sidesteps ───────────────────────────────────────────────
    next = advance_formation(next, cfg);

    // ── 3. Enemy fire on its interval ────────────────────────────────────────
    next = enemy_fire(next, cfg, rng);

    // ── 4. Enemy bullets fall ────────────────────────────────────────────────
    next.enemy_bullets = advance_enemy_bullets(next.enemy_bullets, next.height);

    // ── 5. Collisions ────────────────────────────────────────────────────────
    next = resolve_collisions(next, cfg);
    if next.status.is_terminal() {
        return next;
    }

    // ── 6. Clear out finished explosions, then check for a win ───────────────
    next.enemies = reap_destroyed(next.enemies);
    if next.enemies.is_empty() {
        info!(score = next.score, frame = next.frame, "all enemies destroyed, player wins");
        next.status = GameStatus::PlayerWon;
    }

    next
}

/// Move player bullets by their velocity; drop any whose bottom edge has
/// left the top of the field.
pub fn advance_player_bullets(bullets: Vec<Projectile>) -> Vec<Projectile> {
    bullets
        .into_iter()
        .map(|b| Projectile {
            rect: Rect { y: b.rect.y + b.vy, ..b.rect },
            ..b
        })
        .filter(|b| b.rect.bottom() >= 0)
        .collect()
}

/// Move enemy bullets by their velocity; drop any whose top edge has passed
/// the bottom of the field.
pub fn advance_enemy_bullets(bullets: Vec<Projectile>, height: i32) -> Vec<Projectile> {
    bullets
        .into_iter()
        .map(|b| Projectile {
            rect: Rect { y: b.rect.y + b.vy, ..b.rect },
            ..b
        })
        .filter(|b| b.rect.top() <= height)
        .collect()
}

/// Flip the formation heading if any live enemy touches a side margin, then
/// shift every enemy one step in the current heading.  No vertical descent.
pub fn advance_formation(mut state: GameState, cfg: &GameConfig) -> GameState {
    if state.enemies.is_empty() {
        return state;
    }

    let heading = state.direction;
    let right_wall = state.width - cfg.formation_margin;
    let breach = state.alive_enemies().find_map(|enemy| {
        if enemy.rect.right() >= right_wall {
            Some(Direction::Left)
        } else if enemy.rect.left() < cfg.formation_margin {
            Some(Direction::Right)
        } else {
            None
        }
    });
    if let Some(direction) = breach {
        state.direction = direction;
    }
    if state.direction != heading {
        debug!(direction = ?state.direction, frame = state.frame, "formation turned");
    }

    let dx = match state.direction {
        Direction::Right => cfg.enemy_speed,
        Direction::Left => -cfg.enemy_speed,
    };
    for enemy in &mut state.enemies {
        enemy.rect.x += dx;
    }
    state
}

/// Accumulate one tick of time; when the fire interval has elapsed, a random
/// live enemy drops a bullet from its bottom edge and the timer restarts.
pub fn enemy_fire(mut state: GameState, cfg: &GameConfig, rng: &mut impl Rng) -> GameState {
    state.since_enemy_shot_ms = state.since_enemy_shot_ms.saturating_add(cfg.tick_ms);
    if state.since_enemy_shot_ms < cfg.enemy_shoot_interval_ms {
        return state;
    }
    state.since_enemy_shot_ms = 0;

    let shooters: Vec<&Enemy> = state.alive_enemies().collect();
    if shooters.is_empty() {
        return state;
    }
    let shooter = shooters[rng.gen_range(0..shooters.len())].rect;
    let bullet = Projectile {
        rect: Rect::new(
            shooter.x + (shooter.w - cfg.enemy_bullet_width) / 2,
            shooter.bottom() - cfg.enemy_bullet_overlap,
            cfg.enemy_bullet_width,
            cfg.enemy_bullet_height,
        ),
        vy: cfg.enemy_bullet_speed,
        owner: Faction::Enemy,
    };
    debug!(x = bullet.rect.x, y = bullet.rect.y, "enemy fired");
    state.enemy_bullets.push(bullet);
    state
}

/// Resolve every bullet against its possible targets.
///
/// Player bullets hit the first live enemy they overlap, otherwise the first
/// barrier.  Enemy bullets hit the player, otherwise the first barrier.  A
/// bullet that hits the player ends the game and stops resolution at once.
pub fn resolve_collisions(mut state: GameState, cfg: &GameConfig) -> GameState {
    debug_assert!(
        !state.status.is_terminal(),
        "resolving collisions after the game has ended"
    );

    // ── Player bullets ↔ enemies, barriers ───────────────────────────────────
    let mut spent: Vec<usize> = Vec::new();
    for (bi, bullet) in state.player_bullets.iter().enumerate() {
        let target = state
            .enemies
            .iter()
            .position(|e| e.alive && overlaps(&bullet.rect, &e.rect));
        if let Some(ei) = target {
            let enemy = &mut state.enemies[ei];
            enemy.alive = false;
            enemy.removal_ticks = cfg.destruction_delay_ticks;
            state.score += cfg.kill_score;
            debug!(x = enemy.rect.x, y = enemy.rect.y, score = state.score, "enemy destroyed");
            spent.push(bi);
            continue;
        }

        let target = state
            .barriers
            .iter()
            .position(|b| overlaps(&bullet.rect, &b.rect));
        if let Some(i) = target {
            hit_barrier(&mut state.barriers, i, cfg);
            spent.push(bi);
        }
    }
    state.player_bullets = remove_indices(state.player_bullets, &spent);

    // ── Enemy bullets ↔ player, barriers ─────────────────────────────────────
    let mut spent: Vec<usize> = Vec::new();
    for (bi, bullet) in state.enemy_bullets.iter().enumerate() {
        if overlaps(&bullet.rect, &state.player.rect) {
            state.player.alive = false;
            state.status = GameStatus::PlayerLost;
            info!(score = state.score, frame = state.frame, "player hit, game over");
            break;
        }

        let target = state
            .barriers
            .iter()
            .position(|b| overlaps(&bullet.rect, &b.rect));
        if let Some(i) = target {
            hit_barrier(&mut state.barriers, i, cfg);
            spent.push(bi);
        }
    }
    state.enemy_bullets = remove_indices(state.enemy_bullets, &spent);

    state
}

fn hit_barrier(barriers: &mut Vec<Barrier>, i: usize, cfg: &GameConfig) {
    debug_assert!(i < barriers.len(), "damaging a barrier that no longer exists");
    match damage_barrier(&barriers[i], cfg.barrier_damage, cfg.barrier_min_width) {
        Some(damaged) => barriers[i] = damaged,
        None => {
            let gone = barriers.remove(i);
            debug!(x = gone.rect.x, y = gone.rect.y, "barrier destroyed");
        }
    }
}

fn remove_indices<T>(items: Vec<T>, spent: &[usize]) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !spent.contains(i))
        .map(|(_, item)| item)
        .collect()
}

/// Drop dead enemies whose explosion has run out; count down the rest.
pub fn reap_destroyed(enemies: Vec<Enemy>) -> Vec<Enemy> {
    enemies
        .into_iter()
        .filter_map(|mut e| {
            if e.alive {
                Some(e)
            } else if e.removal_ticks == 0 {
                None
            } else {
                e.removal_ticks -= 1;
                Some(e)
            }
        })
        .collect()
}
