//! Control context: business side effects driven by deck events.
//!
//! The deck never touches persistence or haptics itself. It raises
//! [`ControlEvent`]s, and a [`TriageController`] turns them into calls on
//! the owner's [`TriageHost`]. Commits fire only from
//! [`ControlEvent::ChoreographyComplete`], never at exit clearance, and each
//! completed card is removed from the deck exactly once.

use std::sync::mpsc;
use std::time::Duration;

use crate::card::{ActionResult, Card, CardId, CommitAction, HapticPulse};
use crate::deck::{ControlEvent, DeckCommand, DeckHandle};
use crate::error::TriageError;

/// Capabilities the owner supplies to the control context.
///
/// Commit calls are fire-and-forget: the controller never learns whether
/// they succeeded. Restoring a card after a failed commit is the owner's
/// call, through [`TriageController::restore`].
pub trait TriageHost {
    /// Play a discrete haptic pulse.
    fn haptic(&mut self, pulse: HapticPulse);
    /// Persist an archive.
    fn commit_archive(&mut self, card: CardId);
    /// Persist a journal entry.
    fn commit_journal(&mut self, card: CardId);
    /// Persist a delete.
    fn commit_delete(&mut self, card: CardId);
}

type CardHook = Box<dyn FnMut(CardId) + Send>;
type ActionHook = Box<dyn FnMut(CardId, CommitAction) + Send>;
type GestureHook = Box<dyn FnMut(CardId, ActionResult) + Send>;

#[derive(Default)]
struct Hooks {
    exit_clearance: Vec<ActionHook>,
    dissolve_visual_complete: Vec<CardHook>,
    choreography_complete: Vec<ActionHook>,
    gesture_end: Vec<GestureHook>,
}

/// Drains deck events and performs their side effects on a host.
pub struct TriageController<H: TriageHost> {
    host: H,
    events: mpsc::Receiver<ControlEvent>,
    deck: DeckHandle,
    hooks: Hooks,
}

impl<H: TriageHost> TriageController<H> {
    /// Controller reading `events` and talking back through `deck`.
    pub fn new(
        host: H,
        events: mpsc::Receiver<ControlEvent>,
        deck: DeckHandle,
    ) -> Self {
        Self {
            host,
            events,
            deck,
            hooks: Hooks::default(),
        }
    }

    /// The owner's host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the owner's host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Called when an exiting card clears space for the cascade.
    pub fn on_exit_clearance(
        &mut self,
        hook: impl FnMut(CardId, CommitAction) + Send + 'static,
    ) {
        self.hooks.exit_clearance.push(Box::new(hook));
    }

    /// Called when a delete dissolve has visually settled.
    pub fn on_dissolve_visual_complete(
        &mut self,
        hook: impl FnMut(CardId) + Send + 'static,
    ) {
        self.hooks.dissolve_visual_complete.push(Box::new(hook));
    }

    /// Called after a committed choreography finishes and the host commit
    /// has been issued.
    pub fn on_choreography_complete(
        &mut self,
        hook: impl FnMut(CardId, CommitAction) + Send + 'static,
    ) {
        self.hooks.choreography_complete.push(Box::new(hook));
    }

    /// Called when a gesture is released and classified.
    pub fn on_gesture_end(
        &mut self,
        hook: impl FnMut(CardId, ActionResult) + Send + 'static,
    ) {
        self.hooks.gesture_end.push(Box::new(hook));
    }

    /// Handle every event already queued. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    /// Wait up to `timeout` for an event, then handle everything queued.
    /// Returns how many events were handled.
    pub fn pump_timeout(&mut self, timeout: Duration) -> usize {
        match self.events.recv_timeout(timeout) {
            Ok(event) => {
                self.dispatch(event);
                1 + self.pump()
            }
            Err(_) => 0,
        }
    }

    /// Undo: bring `card` back at the front, replaying its `prior` exit in
    /// reverse.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::DeckClosed`] if the deck has shut down.
    pub fn restore(
        &self,
        card: Card,
        prior: CommitAction,
    ) -> Result<(), TriageError> {
        self.deck.send(DeckCommand::Restore { card, prior })
    }

    /// Play `action` on the front card.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::DeckClosed`] if the deck has shut down.
    pub fn trigger(&self, action: CommitAction) -> Result<(), TriageError> {
        self.deck.trigger(action)
    }

    fn dispatch(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::ThresholdReached { .. } => {
                self.host.haptic(HapticPulse::Light);
            }
            ControlEvent::GestureEnded { card, result } => {
                for hook in &mut self.hooks.gesture_end {
                    hook(card, result);
                }
            }
            ControlEvent::ExitClearance { card, action } => {
                for hook in &mut self.hooks.exit_clearance {
                    hook(card, action);
                }
            }
            ControlEvent::DissolveVisualComplete { card } => {
                for hook in &mut self.hooks.dissolve_visual_complete {
                    hook(card);
                }
            }
            ControlEvent::ChoreographyComplete { card, action } => {
                self.complete(card, action);
            }
        }
    }

    fn complete(&mut self, card: CardId, action: CommitAction) {
        self.host.haptic(action.haptic());
        match action {
            CommitAction::Archive => self.host.commit_archive(card),
            CommitAction::Journal => self.host.commit_journal(card),
            CommitAction::Delete => self.host.commit_delete(card),
        }
        log::info!("card {card} committed: {}", action.label());
        for hook in &mut self.hooks.choreography_complete {
            hook(card, action);
        }
        if let Err(e) = self.deck.send(DeckCommand::Remove(card)) {
            log::warn!("could not remove card {card}: {e}");
        }
    }
}

impl<H: TriageHost> std::fmt::Debug for TriageController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriageController")
            .field("exit_clearance_hooks", &self.hooks.exit_clearance.len())
            .field(
                "choreography_complete_hooks",
                &self.hooks.choreography_complete.len(),
            )
            .finish_non_exhaustive()
    }
}
