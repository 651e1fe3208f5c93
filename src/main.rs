mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use fruit_slash::compute;
use fruit_slash::entities::TrackState;
use fruit_slash::pose::{MousePose, PoseSource};
use fruit_slash::tracker::HandTracker;
use fruit_slash::trail::BladeTrail;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "⚔  FRUIT  SLASH  ⚔";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let lines: &[(&str, Color)] = &[
        ("Swing the blade through the flying fruit.", Color::White),
        ("Chain hits within a second to grow your combo.", Color::White),
        ("", Color::White),
        ("The mouse cursor plays your hand here; the real", Color::DarkGrey),
        ("game reads it from a webcam.", Color::DarkGrey),
        ("", Color::White),
        ("ENTER / SPACE : start      Q / ESC : quit", Color::DarkGrey),
    ];
    for (i, (line, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            cy.saturating_sub(2) + i as u16,
        ))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*line))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) = rx.recv() {
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// One iteration per frame: drain input, sample the pose source, run
/// the tracker → trail → collision → tick pipeline, render, and sleep
/// out the remainder of the tick. Everything runs on this one thread;
/// the only other thread is the blocking event reader.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    clock: Instant,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    let (cols, rows) = terminal::size()?;
    let (w, h) = display::virtual_size(cols, rows);
    let mut state = compute::init_state(w, h, &mut rng);
    let mut pose = MousePose::new(cols, rows);
    let mut tracker = HandTracker::new();
    let mut trail = BladeTrail::new();
    let mut blade_angle = 0.0f32;

    loop {
        let frame_start = Instant::now();
        let now_ms = clock.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Esc => return Ok(false),
                        _ => {}
                    }
                }
                Event::Mouse(me) => pose.on_event(&me),
                Event::Resize(c, r) => {
                    pose.set_grid(c, r);
                    let (w, h) = display::virtual_size(c, r);
                    state.width = w;
                    state.height = h;
                    state.scale_x = w / compute::BASE_WIDTH;
                    state.scale_y = h / compute::BASE_HEIGHT;
                }
                _ => {}
            }
        }

        // ── Gesture pipeline: pose → tracker → trail ──────────────────────────
        let landmarks = pose.sample();
        let hand = tracker.update(landmarks.as_ref());

        // A dropped track must not leave a stale segment behind that
        // keeps slicing fruit with no hand present
        if hand.state == TrackState::Lost {
            trail.clear();
        }

        // ── Trail and collisions only while a hand drives the blade ───────────
        let mut blade_pos = None;
        let mut hits = 0;
        if let Some(pos) = hand.position {
            let p = compute::to_screen(pos, state.width, state.height);
            trail.add_point(p, hand.speed, now_ms);
            blade_pos = Some(p);

            if let Some((p1, p2)) = trail.segment() {
                blade_angle = compute::smooth_angle(
                    blade_angle,
                    compute::cursor_target_angle(p1.pos, p2.pos),
                );
            }

            let (next, h) = compute::check_collisions(&state, trail.segment(), now_ms, &mut rng);
            state = next;
            hits = h;
        }

        if hits > 0 {
            // One-shot slice sound: the terminal bell is our audio boundary
            out.queue(Print('\u{7}'))?;
        }

        // ── World tick ────────────────────────────────────────────────────────
        state = compute::tick(&state, &mut rng, now_ms);

        display::render(out, &state, &trail, &hand, blade_pos, blade_angle, now_ms)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    // Monotonic game clock; all timestamps in the core are milliseconds
    // since this instant.
    let clock = Instant::now();

    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                if game_loop(out, rx, clock)? {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
