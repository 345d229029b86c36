//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! engine.  No game logic is performed; this module only translates field
//! coordinates into terminal cells and queues crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::entities::{Enemy, Faction, GameStatus, Projectile, Rect};
use space_invaders::Engine;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_BARRIER: Color = Color::Grey;
const C_BULLET_PLAYER: Color = Color::Yellow;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// One colour and sprite per cosmetic enemy variant.
const ENEMY_SPRITES: [(&str, Color); 5] = [
    ("«▼»", Color::Green),
    ("(◎)", Color::Red),
    ("}▲{", Color::Cyan),
    ("<O>", Color::Magenta),
    ("/-\\", Color::Yellow),
];

// ── Field → terminal mapping ──────────────────────────────────────────────────

/// Maps field coordinates onto the cells inside the border.
/// Row 0 is the HUD, row 1 the top border, the last row the controls hint.
struct Viewport {
    cols: u16,
    rows: u16,
    field_w: i32,
    field_h: i32,
}

impl Viewport {
    fn new(engine: &Engine, width: u16, height: u16) -> Self {
        Viewport {
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
            field_w: engine.config().field_width.max(1),
            field_h: engine.config().field_height.max(1),
        }
    }

    fn col(&self, x: i32) -> u16 {
        let x = x.clamp(0, self.field_w - 1) as i64;
        1 + (x * self.cols as i64 / self.field_w as i64) as u16
    }

    fn row(&self, y: i32) -> u16 {
        let y = y.clamp(0, self.field_h - 1) as i64;
        2 + (y * self.rows as i64 / self.field_h as i64) as u16
    }

    fn visible(&self, r: &Rect) -> bool {
        r.bottom() >= 0 && r.top() < self.field_h
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, engine: &Engine) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(engine, width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, engine)?;

    for barrier in engine.barriers() {
        draw_barrier(out, &view, &barrier.rect)?;
    }
    for enemy in engine.enemies() {
        draw_enemy(out, &view, enemy)?;
    }
    for bullet in engine.player_bullets().iter().chain(engine.enemy_bullets()) {
        draw_bullet(out, &view, bullet)?;
    }
    if engine.player().alive {
        draw_player(out, &view, &engine.player().rect)?;
    }

    draw_controls_hint(out, height)?;

    let banner = match engine.status() {
        GameStatus::Running => None,
        GameStatus::PlayerWon => Some(("YOU WIN", Color::Green)),
        GameStatus::PlayerLost => Some(("GAME OVER", Color::Red)),
    };
    if let Some((message, color)) = banner {
        draw_end_banner(out, width, height, message, color, engine.score())?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;
    let h = height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, engine: &Engine) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", engine.score())))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: &Viewport, rect: &Rect) -> std::io::Result<()> {
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let cx = view.col(rect.center_x());
    let top = view.row(rect.top());
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(cx, top))?;
    out.queue(Print("▲"))?;
    out.queue(cursor::MoveTo(cx.saturating_sub(1).max(1), top + 1))?;
    out.queue(Print("/█\\"))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let cx = view.col(enemy.rect.center_x());
    out.queue(cursor::MoveTo(cx.saturating_sub(1).max(1), view.row(enemy.rect.top())))?;
    if enemy.alive {
        let (sprite, color) = ENEMY_SPRITES[enemy.variant as usize % ENEMY_SPRITES.len()];
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(sprite))?;
    } else {
        out.queue(style::SetForegroundColor(C_EXPLOSION))?;
        out.queue(Print("\\*/"))?;
    }
    Ok(())
}

fn draw_barrier<W: Write>(out: &mut W, view: &Viewport, rect: &Rect) -> std::io::Result<()> {
    let left = view.col(rect.left());
    let right = view.col(rect.right()).max(left + 1);
    let top = view.row(rect.top());
    let bottom = view.row(rect.bottom()).max(top + 1);
    out.queue(style::SetForegroundColor(C_BARRIER))?;
    for row in top..bottom {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print("█".repeat((right - left) as usize)))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, view: &Viewport, bullet: &Projectile) -> std::io::Result<()> {
    if !view.visible(&bullet.rect) {
        return Ok(());
    }
    out.queue(cursor::MoveTo(view.col(bullet.rect.center_x()), view.row(bullet.rect.top())))?;
    match bullet.owner {
        Faction::Player => {
            out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
            out.queue(Print("║"))?;
        }
        Faction::Enemy => {
            out.queue(style::SetForegroundColor(C_BULLET_ENEMY))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── End-of-game overlay ───────────────────────────────────────────────────────

fn draw_end_banner<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    message: &str,
    color: Color,
    score: u32,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", score);
    let cx = width / 2;
    let row = height / 2;

    out.queue(cursor::MoveTo(
        cx.saturating_sub(message.chars().count() as u16 / 2),
        row.saturating_sub(1),
    ))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(message))?;

    out.queue(cursor::MoveTo(
        cx.saturating_sub(score_line.chars().count() as u16 / 2),
        row + 1,
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&score_line))?;

    Ok(())
}
