//! Headless triage simulator.
//!
//! Runs a scripted session against a live render loop: a slow downward drag
//! that archives the front card, a journal key press, and an undo. Every
//! haptic and commit is logged; run with `RUST_LOG=debug` to see the deck's
//! own lifecycle logging as well.
//!
//! ```text
//! triage-sim [options.toml]
//! ```

use std::path::Path;
use std::thread;
use std::time::Duration;

use glam::Vec2;
use triage_deck::card::{Card, CardId, CommitAction, HapticPulse};
use triage_deck::control::{TriageController, TriageHost};
use triage_deck::deck::{DeckCommand, DeckHandle};
use triage_deck::error::TriageError;
use triage_deck::input::{InputEvent, InputProcessor, MouseButton};
use triage_deck::options::Options;
use triage_deck::render_loop::RenderLoop;
use web_time::Instant;

const CARDS: u64 = 5;

/// Host that records commits and logs every side effect.
#[derive(Default)]
struct LoggingHost {
    committed: Vec<(CardId, CommitAction)>,
}

impl TriageHost for LoggingHost {
    fn haptic(&mut self, pulse: HapticPulse) {
        log::info!("haptic: {pulse:?}");
    }

    fn commit_archive(&mut self, card: CardId) {
        self.committed.push((card, CommitAction::Archive));
    }

    fn commit_journal(&mut self, card: CardId) {
        self.committed.push((card, CommitAction::Journal));
    }

    fn commit_delete(&mut self, card: CardId) {
        self.committed.push((card, CommitAction::Delete));
    }
}

fn main() -> Result<(), TriageError> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };

    let (mut render, events) = RenderLoop::spawn(&options)?;
    let deck = render.handle();
    let mut control =
        TriageController::new(LoggingHost::default(), events, deck.clone());
    control.on_exit_clearance(|card, action| {
        log::info!("card {card} cleared the stack ({})", action.label());
    });

    for i in 0..CARDS {
        deck.send(DeckCommand::Admit(Card::new(
            CardId(i),
            format!("entry-{i}"),
            i as usize,
        )))?;
    }
    settle(&mut control, Duration::from_millis(100));

    let mut input = InputProcessor::with_key_bindings(options.keybindings);
    drag(&mut input, &deck, Vec2::new(0.0, 260.0), Duration::from_millis(600))?;
    settle(&mut control, Duration::from_millis(1500));

    if let Some(command) = input.handle_key_press("KeyJ") {
        deck.send(command)?;
    }
    settle(&mut control, Duration::from_millis(1500));

    if let Some(&(card, action)) = control.host().committed.first() {
        log::info!("undoing {} of card {card}", action.label());
        control.restore(
            Card::new(card, format!("entry-{}", card.0), 0),
            action,
        )?;
        settle(&mut control, Duration::from_millis(800));
    }

    let front = render.snapshot().front().map(|c| c.id);
    log::info!(
        "session done: {} commits, front card {front:?}",
        control.host().committed.len()
    );
    render.shutdown();
    Ok(())
}

/// Press at the origin, move by `offset` over `duration`, then release.
fn drag(
    input: &mut InputProcessor,
    deck: &DeckHandle,
    offset: Vec2,
    duration: Duration,
) -> Result<(), TriageError> {
    const STEPS: u32 = 30;
    let mut feed = |event: InputEvent| -> Result<(), TriageError> {
        match input.handle_event(event, Instant::now()) {
            Some(command) => deck.send(command),
            None => Ok(()),
        }
    };

    feed(InputEvent::CursorMoved { x: 0.0, y: 0.0 })?;
    feed(InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed: true,
    })?;
    for step in 1..=STEPS {
        thread::sleep(duration / STEPS);
        let at = offset * (step as f32 / STEPS as f32);
        feed(InputEvent::CursorMoved { x: at.x, y: at.y })?;
    }
    // Hold still so the release carries no velocity.
    thread::sleep(Duration::from_millis(150));
    feed(InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed: false,
    })
}

/// Handle control events for `duration`.
fn settle<H: TriageHost>(
    control: &mut TriageController<H>,
    duration: Duration,
) {
    let deadline = Instant::now() + duration;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        let _ = control.pump_timeout(remaining);
    }
}
