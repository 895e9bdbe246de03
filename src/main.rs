mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use alien_invasion::compute::{init_session, tick};
use alien_invasion::entities::Session;
use alien_invasion::input::{handle_event, Flow, InputEvent, Key};
use alien_invasion::render::render_frame;
use alien_invasion::scoreboard::Scoreboard;
use alien_invasion::settings::Settings;

use display::TerminalRenderer;

#[derive(Parser)]
#[command(name = "alien_invasion")]
#[command(about = "Shoot down the descending alien fleet before it reaches you")]
struct Args {
    /// JSON file overriding any of the default settings
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Write log output to this file (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_settings: bool,
}

// ── Held-key emulation ────────────────────────────────────────────────────────

/// A movement key counts as held if its last press/repeat event arrived
/// within this window.  Covers terminals that never emit key-release events:
/// OS key-repeat runs at 15 Hz or faster, so the window is refreshed before
/// it expires while the key stays down.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::End | KeyCode::Char('b') | KeyCode::Char('B') => Some(Key::FireSpecial),
        KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Play),
        KeyCode::Char('0') => Some(Key::Pause),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drain input, tick, draw and sleep until a quit event arrives.
///
/// Input model: press events are forwarded as `KeyDown`, release events as
/// `KeyUp`.  Terminals without the keyboard-enhancement protocol never send
/// releases, so movement keys whose last press is older than `HOLD_WINDOW`
/// frames get a synthetic `KeyUp`.
fn game_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let frame = Duration::from_secs_f64(1.0 / f64::from(session.settings.frame_rate));
    let hold_frames = (HOLD_WINDOW.as_secs_f64() / frame.as_secs_f64()).ceil().max(1.0) as u64;

    // Maps each held movement key → the frame it was last seen.
    let mut key_frame: HashMap<Key, u64> = HashMap::new();
    let mut frame_no: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame_no += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let input = match ev {
                Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, .. })
                    if modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    Some(InputEvent::Quit)
                }
                Event::Key(KeyEvent { code, kind, .. }) => map_key(code).and_then(|key| {
                    match kind {
                        KeyEventKind::Press => {
                            key_frame.insert(key, frame_no);
                            Some(InputEvent::KeyDown(key))
                        }
                        // Repeat only refreshes the hold timestamp
                        KeyEventKind::Repeat => {
                            key_frame.insert(key, frame_no);
                            None
                        }
                        KeyEventKind::Release => {
                            key_frame.remove(&key);
                            Some(InputEvent::KeyUp(key))
                        }
                    }
                }),
                Event::Mouse(MouseEvent { kind: MouseEventKind::Down(_), column, row, .. }) => {
                    Some(InputEvent::PointerDown(renderer.cell_to_world(column, row)))
                }
                Event::Resize(cols, rows) => {
                    renderer.resize(cols, rows);
                    None
                }
                _ => None,
            };
            if let Some(input) = input {
                if handle_event(session, input) == Flow::Quit {
                    return Ok(());
                }
            }
        }

        // ── Expire stale movement keys ────────────────────────────────────────
        for key in [Key::Left, Key::Right] {
            let stale = key_frame
                .get(&key)
                .is_some_and(|&last| frame_no.saturating_sub(last) > hold_frames);
            if stale {
                key_frame.remove(&key);
                handle_event(session, InputEvent::KeyUp(key));
            }
        }

        tick(session);

        let board = Scoreboard::from_session(session);
        render_frame(renderer, session, &board)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

/// Logs go to `--log-file` only.  Without one, logging is switched off and
/// `RUST_LOG` is ignored, since stderr shares the screen with the game.
fn log_builder(log_file: Option<&Path>) -> anyhow::Result<env_logger::Builder> {
    let Some(path) = log_file else {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Off);
        return Ok(builder);
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.target(env_logger::Target::Pipe(Box::new(file)));
    Ok(builder)
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    log_builder(log_file)?.init();
    Ok(())
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(fps) = args.fps {
        settings.frame_rate = fps;
    }
    settings.validate().context("invalid command-line overrides")?;
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let settings = load_settings(&args)?;
    if args.dump_settings {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    log::info!(
        "alien_invasion starting: {}x{} world at {} fps",
        settings.screen_width,
        settings.screen_height,
        settings.frame_rate
    );

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    log::debug!("keyboard enhancement: {keyboard_enhanced}");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                log::error!("terminal input failed: {err}");
                break;
            }
        }
    });

    let result = terminal::size().and_then(|(cols, rows)| {
        let mut renderer = TerminalRenderer::new(
            &mut out,
            cols,
            rows,
            settings.screen_width,
            settings.screen_height,
        );
        let mut session = init_session(settings);
        let result = game_loop(&mut renderer, &mut session, &rx);
        log::info!(
            "session finished: best score {}",
            session.stats.high_score
        );
        result
    });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("game loop failed")
}
