//! Background render loop that owns a [`TriageDeck`].
//!
//! The deck lives on its own thread and ticks at the configured rate. Each
//! frame's [`DeckSnapshot`] is published through a lock-free triple buffer,
//! so a drawing thread always reads the newest complete frame without
//! waiting on the deck.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use web_time::Instant;

use crate::deck::{ControlEvent, DeckHandle, DeckSnapshot, TriageDeck};
use crate::error::TriageError;
use crate::options::Options;
use crate::util::frame_timing::FrameTiming;

/// A deck ticking on a background thread.
pub struct RenderLoop {
    handle: DeckHandle,
    snapshot: triple_buffer::Output<DeckSnapshot>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl RenderLoop {
    /// Spawn the render thread with an empty deck.
    ///
    /// Returns the loop and the receiving end of the deck's control
    /// channel, ready to hand to a
    /// [`TriageController`](crate::control::TriageController).
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::ThreadSpawn`] if the thread fails to spawn.
    pub fn spawn(
        options: &Options,
    ) -> Result<(Self, mpsc::Receiver<ControlEvent>), TriageError> {
        let (deck, events) = TriageDeck::new(options);
        let handle = deck.handle();
        let (input, output) = triple_buffer::triple_buffer(&deck.snapshot());
        let stop = Arc::new(AtomicBool::new(false));
        let target_fps = options.render_loop.target_fps;

        let thread_stop = Arc::clone(&stop);
        let thread = thread::Builder::new()
            .name("triage-render".into())
            .spawn(move || {
                Self::thread_loop(deck, input, &thread_stop, target_fps);
            })
            .map_err(TriageError::ThreadSpawn)?;
        log::info!("render loop started at {target_fps} fps");

        Ok((
            Self {
                handle,
                snapshot: output,
                stop,
                thread: Some(thread),
            },
            events,
        ))
    }

    /// Sender for commands the deck applies on its next frame.
    #[must_use]
    pub fn handle(&self) -> DeckHandle {
        self.handle.clone()
    }

    /// The newest published frame.
    pub fn snapshot(&mut self) -> &DeckSnapshot {
        self.snapshot.read()
    }

    /// Stop the render thread and wait for it to finish.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("render thread panicked");
            }
        }
    }

    fn thread_loop(
        mut deck: TriageDeck,
        mut output: triple_buffer::Input<DeckSnapshot>,
        stop: &AtomicBool,
        target_fps: u32,
    ) {
        let mut timing = FrameTiming::new(target_fps);
        while !stop.load(Ordering::Acquire) {
            if !timing.should_render() {
                thread::sleep(timing.time_until_next_frame());
                continue;
            }
            deck.tick(Instant::now());
            output.write(deck.snapshot());
            timing.end_frame();
        }
        log::debug!(
            "render loop stopped with {} cards at {:.1} fps",
            deck.len(),
            timing.fps()
        );
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for RenderLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderLoop")
            .field("running", &self.thread.is_some())
            .finish_non_exhaustive()
    }
}
