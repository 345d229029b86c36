mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::info;

use space_invaders::{Engine, GameConfig};

/// Environment variable naming the log file.  Stdout is the game screen, so
/// logs only go to a file and only when asked for.
const LOG_ENV: &str = "INVADERS_LOG";

fn init_logging() -> anyhow::Result<()> {
    let Ok(path) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("create log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config() -> anyhow::Result<GameConfig> {
    match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path).with_context(|| format!("load config {path}")),
        None => Ok(GameConfig::default()),
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

enum Action {
    Left,
    Right,
    Fire,
    Quit,
}

/// Map a key press to an engine action.  Each press (or host key-repeat)
/// yields exactly one call; releases are ignored.
fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Right),
        KeyCode::Char(' ') => Some(Action::Fire),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drain input, step the engine, draw.  Runs until the player quits; after
/// the game ends the final frame stays on screen.
fn game_loop<W: Write>(
    out: &mut W,
    engine: &mut Engine,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let frame = Duration::from_millis(engine.config().tick_ms as u64);

    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else { continue };
            match action_for(&key) {
                Some(Action::Left) => engine.move_left(),
                Some(Action::Right) => engine.move_right(),
                Some(Action::Fire) => engine.fire_player(),
                Some(Action::Quit) => return Ok(()),
                None => {}
            }
        }

        engine.step();
        display::render(out, engine)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Terminal screen ───────────────────────────────────────────────────────────

/// Switch to the alternate screen, run `body`, then put the screen back.
/// The restore runs even when entering the screen or `body` fails.
fn with_game_screen<W: Write, T>(
    out: &mut W,
    body: impl FnOnce(&mut W) -> std::io::Result<T>,
) -> std::io::Result<T> {
    let entered = out
        .execute(terminal::EnterAlternateScreen)
        .and_then(|out| out.execute(cursor::Hide))
        .map(|_| ());

    // Request key-release events where supported so releases can be told
    // apart from presses; other terminals fall back gracefully.
    let keyboard_enhanced = entered.is_ok()
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    let result = entered.and_then(|()| body(out));

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    result
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let config = load_config()?;
    info!(
        seed = ?config.seed,
        ticks_per_enemy_shot = config.ticks_per_enemy_shot(),
        "configuration loaded"
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let mut engine = Engine::new(config);

    terminal::enable_raw_mode().context("enable raw mode")?;
    let result = with_game_screen(&mut out, |out| game_loop(out, &mut engine, &rx));
    let _ = terminal::disable_raw_mode();

    info!(score = engine.score(), status = ?engine.status(), "exiting");
    result.context("game loop")
}
