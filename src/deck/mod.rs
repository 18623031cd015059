//! The render-context owner of every card.
//!
//! A [`TriageDeck`] holds each card's animation state and routes commands
//! to whichever component drives it:
//!
//! - pointer gestures go to the front card's [`GestureClassifier`]
//! - triggers and released gestures start an [`ActionChoreographer`] run
//! - rank changes and fade-ins go to the [`StackCascadeController`]
//! - undo goes to the [`EntryAnimator`]
//!
//! [`TriageDeck::tick`] advances every driver on the render clock and turns
//! lifecycle moments into [`ControlEvent`]s on the control channel. Exit
//! clearance closes the gap behind the exiting card right away; the owner
//! removes the card itself after it has committed.

mod command;
mod events;
mod snapshot;

use std::sync::mpsc;

pub use command::{DeckCommand, DeckHandle};
pub use events::ControlEvent;
use rustc_hash::FxHashMap;
pub use snapshot::{CardSnapshot, DeckSnapshot};
use web_time::Instant;

use crate::card::{
    Card, CardAnimationState, CardId, CardPhase, ChoreographyKind,
    CommitAction, ContentRef, Driver, VisualState,
};
use crate::choreography::{
    ActionChoreographer, ChoreographyEvent, EntryAnimator,
};
use crate::error::TriageError;
use crate::gesture::{
    ExitPath, GestureClassifier, GestureOutcome, GestureSample,
};
use crate::options::{GestureOptions, Options};
use crate::stack::StackCascadeController;

struct Slot {
    card: Card,
    /// `None` once the card has cleared the stack.
    rank: Option<usize>,
    state: CardAnimationState,
}

/// All cards of one triage stack plus the components that animate them.
pub struct TriageDeck {
    gesture: GestureOptions,
    cascade: StackCascadeController,
    choreographer: ActionChoreographer,
    entry: EntryAnimator,
    cards: FxHashMap<CardId, Slot>,
    /// Card owned by the live gesture session, if any.
    gesture_card: Option<CardId>,
    events: mpsc::Sender<ControlEvent>,
    inbox_tx: mpsc::Sender<DeckCommand>,
    inbox: mpsc::Receiver<DeckCommand>,
}

impl TriageDeck {
    /// Empty deck plus the receiving end of its control channel.
    #[must_use]
    pub fn new(options: &Options) -> (Self, mpsc::Receiver<ControlEvent>) {
        let (events, events_rx) = mpsc::channel();
        let (inbox_tx, inbox) = mpsc::channel();
        let deck = Self {
            gesture: options.gesture,
            cascade: StackCascadeController::new(options.stack.clone()),
            choreographer: ActionChoreographer::new(options.choreography),
            entry: EntryAnimator::new(options.choreography),
            cards: FxHashMap::default(),
            gesture_card: None,
            events,
            inbox_tx,
            inbox,
        };
        (deck, events_rx)
    }

    /// Sender for commands applied on the next [`tick`](Self::tick).
    #[must_use]
    pub fn handle(&self) -> DeckHandle {
        DeckHandle::new(self.inbox_tx.clone())
    }

    /// Apply one command immediately.
    ///
    /// Commands aimed at a card without content are ignored with a warning;
    /// re-entrant triggers are ignored silently. Neither is an error.
    ///
    /// # Errors
    ///
    /// - [`TriageError::UnknownCard`] if the target card is not in the deck
    /// - [`TriageError::DuplicateCard`] when admitting or restoring a card
    ///   that is already present
    /// - [`TriageError::RankOccupied`] when another card holds the rank
    pub fn execute(
        &mut self,
        command: DeckCommand,
        now: Instant,
    ) -> Result<(), TriageError> {
        match command {
            DeckCommand::Admit(card) => self.admit(card),
            DeckCommand::Remove(id) => self.remove(id, now),
            DeckCommand::Restore { card, prior } => {
                self.restore(card, prior, now)
            }
            DeckCommand::SetRank { card, rank } => {
                self.set_rank(card, rank, now)
            }
            DeckCommand::SetNewlyVisible { card, visible } => {
                self.set_newly_visible(card, visible, now)
            }
            DeckCommand::GestureStart => {
                self.on_gesture_start();
                Ok(())
            }
            DeckCommand::GestureUpdate(sample) => {
                self.on_gesture_update(sample);
                Ok(())
            }
            DeckCommand::GestureEnd(sample) => {
                self.on_gesture_end(sample, now);
                Ok(())
            }
            DeckCommand::Trigger { card, action } => {
                self.trigger(card, action, now)
            }
        }
    }

    /// Apply queued commands, then advance every card to `now`.
    pub fn tick(&mut self, now: Instant) {
        while let Ok(command) = self.inbox.try_recv() {
            if let Err(e) = self.execute(command, now) {
                log::warn!("deck command failed: {e}");
            }
        }

        let mut ids: Vec<CardId> = self.cards.keys().copied().collect();
        ids.sort_unstable();

        let mut cleared = Vec::new();
        for id in ids {
            let Some(slot) = self.cards.get_mut(&id) else {
                continue;
            };
            if matches!(slot.state.driver, Driver::Choreography(_)) {
                if let Some(rank) = self.advance_choreography(id, now) {
                    cleared.push(rank);
                }
            } else {
                let _ = self.cascade.advance(&mut slot.state, now);
            }
        }

        // Deepest first so each gap closes against ranks not yet shifted.
        cleared.sort_unstable_by(|a, b| b.cmp(a));
        for rank in cleared {
            self.close_gap(rank, now);
        }
    }

    // ── Commands ────────────────────────────────────────────────────────

    /// Play the archive choreography on the front card.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn trigger_archive(&mut self, now: Instant) -> Result<(), TriageError> {
        self.trigger(None, CommitAction::Archive, now)
    }

    /// Play the journal choreography on the front card.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn trigger_journal(&mut self, now: Instant) -> Result<(), TriageError> {
        self.trigger(None, CommitAction::Journal, now)
    }

    /// Play the delete choreography on the front card.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn trigger_delete(&mut self, now: Instant) -> Result<(), TriageError> {
        self.trigger(None, CommitAction::Delete, now)
    }

    /// Begin a gesture session on the front card.
    ///
    /// Ignored unless the front card is settled: a card still being
    /// promoted, springing back, or exiting does not accept gestures.
    pub fn on_gesture_start(&mut self) {
        let Some(id) = self.front_card() else {
            log::debug!("gesture start ignored: no front card");
            return;
        };
        let Some(slot) = self.cards.get_mut(&id) else {
            return;
        };
        if !slot.card.has_content() {
            log::warn!("gesture on card {id} ignored: no content reference");
            return;
        }
        if !slot.state.is_settled() {
            log::debug!(
                "gesture start ignored: card {id} is {:?}",
                slot.state.phase()
            );
            return;
        }
        slot.state.driver = Driver::Gesture(GestureClassifier::start(
            self.gesture,
            slot.state.visual.position,
        ));
        self.gesture_card = Some(id);
    }

    /// Feed one motion sample to the live gesture session.
    pub fn on_gesture_update(&mut self, sample: GestureSample) {
        let Some(id) = self.gesture_card else {
            return;
        };
        let Some(slot) = self.cards.get_mut(&id) else {
            return;
        };
        let Driver::Gesture(classifier) = &mut slot.state.driver else {
            return;
        };
        let feedback = classifier.update(sample, &mut slot.state.visual);
        if feedback.threshold_reached {
            self.emit(ControlEvent::ThresholdReached { card: id });
        }
    }

    /// Classify the release and hand the card to its choreography.
    pub fn on_gesture_end(&mut self, sample: GestureSample, now: Instant) {
        let Some(id) = self.gesture_card.take() else {
            return;
        };
        let Some(slot) = self.cards.get_mut(&id) else {
            return;
        };
        let Driver::Gesture(classifier) = &slot.state.driver else {
            return;
        };
        let outcome = classifier.end(sample, &slot.state.visual);
        match outcome {
            GestureOutcome::Cancel => {
                let rest = self.cascade.idle_visual(slot.rank.unwrap_or(0));
                self.choreographer.cancel(&mut slot.state, &rest, now);
            }
            GestureOutcome::Commit { action, path } => {
                let _ = self.choreographer.commit(
                    &mut slot.state,
                    action,
                    path,
                    now,
                );
            }
        }
        log::debug!("gesture on card {id} ended: {outcome:?}");
        self.emit(ControlEvent::GestureEnded {
            card: id,
            result: outcome.result(),
        });
    }

    /// Move a card to `rank`. Setting the rank it already holds (or is
    /// already heading for) does not restart its transition.
    ///
    /// # Errors
    ///
    /// [`TriageError::UnknownCard`] or [`TriageError::RankOccupied`].
    pub fn set_rank(
        &mut self,
        id: CardId,
        rank: usize,
        now: Instant,
    ) -> Result<(), TriageError> {
        let slot = self.cards.get(&id).ok_or(TriageError::UnknownCard(id))?;
        if !slot.card.has_content() {
            log::warn!("set_rank on card {id} ignored: no content reference");
            return Ok(());
        }
        self.check_rank_free(rank, id)?;

        let Some(slot) = self.cards.get_mut(&id) else {
            return Err(TriageError::UnknownCard(id));
        };
        let Some(from) = slot.rank else {
            log::debug!("card {id} has left the stack; rank {rank} ignored");
            return Ok(());
        };
        let _ = self.cascade.set_rank(&mut slot.state, from, rank, now);
        slot.rank = Some(rank);
        Ok(())
    }

    /// Mark a card as newly entered into the visible window. The fade-in
    /// plays at most once per card instance.
    ///
    /// # Errors
    ///
    /// [`TriageError::UnknownCard`].
    pub fn set_newly_visible(
        &mut self,
        id: CardId,
        visible: bool,
        now: Instant,
    ) -> Result<(), TriageError> {
        let slot =
            self.cards.get_mut(&id).ok_or(TriageError::UnknownCard(id))?;
        if !slot.card.has_content() {
            log::warn!(
                "set_newly_visible on card {id} ignored: no content reference"
            );
            return Ok(());
        }
        if let Some(rank) = slot.rank {
            let _ = self
                .cascade
                .set_newly_visible(&mut slot.state, rank, visible, now);
        }
        Ok(())
    }

    fn admit(&mut self, card: Card) -> Result<(), TriageError> {
        if self.cards.contains_key(&card.id) {
            return Err(TriageError::DuplicateCard(card.id));
        }
        self.check_rank_free(card.rank, card.id)?;
        if !card.has_content() {
            log::warn!(
                "card {} admitted without content reference; \
                 it ignores commands",
                card.id
            );
        }
        let state =
            CardAnimationState::settled(self.cascade.idle_visual(card.rank));
        log::debug!(
            "card {} admitted at rank {} ({})",
            card.id,
            card.rank,
            card.content.as_ref().map_or("no content", ContentRef::as_str)
        );
        let _ = self.cards.insert(
            card.id,
            Slot {
                rank: Some(card.rank),
                card,
                state,
            },
        );
        Ok(())
    }

    fn remove(&mut self, id: CardId, now: Instant) -> Result<(), TriageError> {
        let slot = self.cards.remove(&id).ok_or(TriageError::UnknownCard(id))?;
        if self.gesture_card == Some(id) {
            self.gesture_card = None;
        }
        if let Some(rank) = slot.rank {
            self.close_gap(rank, now);
        }
        log::debug!("card {id} removed");
        Ok(())
    }

    fn restore(
        &mut self,
        card: Card,
        prior: CommitAction,
        now: Instant,
    ) -> Result<(), TriageError> {
        if !card.has_content() {
            log::warn!(
                "restore of card {} ignored: no content reference",
                card.id
            );
            return Ok(());
        }
        if self.cards.contains_key(&card.id) {
            return Err(TriageError::DuplicateCard(card.id));
        }

        self.abort_gesture();
        self.open_gap(now);

        let mut state = CardAnimationState::settled(VisualState::REST);
        self.entry.start(&mut state, prior, now);
        log::debug!("card {} restored after {}", card.id, prior.label());
        let _ = self.cards.insert(
            card.id,
            Slot {
                card,
                rank: Some(0),
                state,
            },
        );
        Ok(())
    }

    fn trigger(
        &mut self,
        card: Option<CardId>,
        action: CommitAction,
        now: Instant,
    ) -> Result<(), TriageError> {
        let Some(id) = card.or_else(|| self.front_card()) else {
            log::debug!("{} ignored: no front card", action.label());
            return Ok(());
        };
        let slot =
            self.cards.get_mut(&id).ok_or(TriageError::UnknownCard(id))?;
        if !slot.card.has_content() {
            log::warn!(
                "{} on card {id} ignored: no content reference",
                action.label()
            );
            return Ok(());
        }
        if slot.rank != Some(0) {
            log::debug!(
                "{} ignored: card {id} is not in front",
                action.label()
            );
            return Ok(());
        }
        if slot.state.gesture_active() {
            log::debug!("{} ignored: gesture in progress", action.label());
            return Ok(());
        }
        let _ = self.choreographer.commit(
            &mut slot.state,
            action,
            ExitPath::Canonical,
            now,
        );
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Card at rank 0, if any.
    #[must_use]
    pub fn front_card(&self) -> Option<CardId> {
        self.cards
            .values()
            .find(|slot| slot.rank == Some(0))
            .map(|slot| slot.card.id)
    }

    /// Whether `id` is the active card: the one at rank 0, the only card
    /// that accepts gestures.
    #[must_use]
    pub fn is_active(&self, id: CardId) -> bool {
        self.rank(id) == Some(0)
    }

    /// Current visual state of a card.
    #[must_use]
    pub fn visual_state(&self, id: CardId) -> Option<VisualState> {
        self.cards.get(&id).map(|slot| slot.state.visual)
    }

    /// Lifecycle phase of a card.
    #[must_use]
    pub fn phase(&self, id: CardId) -> Option<CardPhase> {
        self.cards.get(&id).map(|slot| slot.state.phase())
    }

    /// Rank of a card, `None` if unknown or no longer in the stack.
    #[must_use]
    pub fn rank(&self, id: CardId) -> Option<usize> {
        self.cards.get(&id).and_then(|slot| slot.rank)
    }

    /// Number of cards held, including cards still playing an exit.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Frame data for the renderer.
    #[must_use]
    pub fn snapshot(&self) -> DeckSnapshot {
        let mut snapshot = DeckSnapshot {
            cards: self
                .cards
                .values()
                .map(|slot| CardSnapshot {
                    id: slot.card.id,
                    rank: slot.rank,
                    phase: slot.state.phase(),
                    visual: slot.state.visual,
                    visible: slot
                        .rank
                        .is_none_or(|rank| self.cascade.is_visible(rank)),
                })
                .collect(),
        };
        snapshot.sort_for_drawing();
        snapshot
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn emit(&self, event: ControlEvent) {
        // The control side may have gone away; the deck keeps animating.
        let _ = self.events.send(event);
    }

    /// Ranks are unique at every depth: the cascade shifts cards behind an
    /// exit by one, so a shared tail rank would reach the front shared.
    fn check_rank_free(
        &self,
        rank: usize,
        id: CardId,
    ) -> Result<(), TriageError> {
        match self
            .cards
            .values()
            .find(|slot| slot.rank == Some(rank) && slot.card.id != id)
        {
            Some(holder) => Err(TriageError::RankOccupied {
                rank,
                holder: holder.card.id,
            }),
            None => Ok(()),
        }
    }

    /// Advance one choreography-driven card. Returns the rank it vacated if
    /// it cleared the stack this frame.
    fn advance_choreography(
        &mut self,
        id: CardId,
        now: Instant,
    ) -> Option<usize> {
        let slot = self.cards.get_mut(&id)?;
        let events = self.choreographer.advance(&mut slot.state, now);
        let action = match &slot.state.driver {
            Driver::Choreography(run) => match run.kind() {
                ChoreographyKind::Commit(action) => Some(action),
                ChoreographyKind::Cancel | ChoreographyKind::Entry(_) => None,
            },
            Driver::Cascade(_) | Driver::Gesture(_) => None,
        };

        let mut vacated = None;
        for event in events {
            match (event, action) {
                (ChoreographyEvent::ExitClearance, Some(action)) => {
                    vacated = slot.rank.take().or(vacated);
                    let _ = self
                        .events
                        .send(ControlEvent::ExitClearance { card: id, action });
                }
                (ChoreographyEvent::DissolveVisualComplete, _) => {
                    let _ = self.events.send(
                        ControlEvent::DissolveVisualComplete { card: id },
                    );
                }
                (ChoreographyEvent::Completed(_), Some(action)) => {
                    vacated = slot.rank.take().or(vacated);
                    log::debug!("card {id} finished {}", action.label());
                    let _ = self.events.send(
                        ControlEvent::ChoreographyComplete { card: id, action },
                    );
                }
                (ChoreographyEvent::Completed(_), None) => {
                    // Spring-backs and entries end at the front treatment.
                    if let Some(rank) = slot.rank {
                        self.cascade.snap_to_rank(&mut slot.state, 0);
                        let _ = self
                            .cascade
                            .set_rank(&mut slot.state, 0, rank, now);
                    }
                }
                (ChoreographyEvent::ExitClearance, None) => {}
            }
        }
        vacated
    }

    /// Every card behind `vacated` moves up one rank. A card stepping into
    /// the visible window plays its fade-in.
    fn close_gap(&mut self, vacated: usize, now: Instant) {
        let window = self.cascade.options().visible_window;
        let mut behind: Vec<(CardId, usize)> = self
            .cards
            .iter()
            .filter_map(|(id, slot)| {
                slot.rank.filter(|&rank| rank > vacated).map(|rank| (*id, rank))
            })
            .collect();
        behind.sort_unstable_by_key(|&(id, rank)| (rank, id));

        for (id, rank) in behind {
            let Some(slot) = self.cards.get_mut(&id) else {
                continue;
            };
            let to = rank - 1;
            let _ = self.cascade.set_rank(&mut slot.state, rank, to, now);
            if rank == window {
                let _ = self.cascade.set_newly_visible(
                    &mut slot.state,
                    to,
                    true,
                    now,
                );
            }
            slot.rank = Some(to);
        }
    }

    /// Every ranked card moves back one rank to make room at the front.
    fn open_gap(&mut self, now: Instant) {
        let mut ranked: Vec<(CardId, usize)> = self
            .cards
            .iter()
            .filter_map(|(id, slot)| slot.rank.map(|rank| (*id, rank)))
            .collect();
        ranked
            .sort_unstable_by_key(|&(id, rank)| (std::cmp::Reverse(rank), id));

        for (id, rank) in ranked {
            let Some(slot) = self.cards.get_mut(&id) else {
                continue;
            };
            let _ = self.cascade.set_rank(&mut slot.state, rank, rank + 1, now);
            slot.rank = Some(rank + 1);
        }
    }

    /// End the live gesture without classifying it, snapping its card to
    /// its rank.
    fn abort_gesture(&mut self) {
        let Some(id) = self.gesture_card.take() else {
            return;
        };
        if let Some(slot) = self.cards.get_mut(&id) {
            self.cascade
                .snap_to_rank(&mut slot.state, slot.rank.unwrap_or(0));
            log::debug!("gesture on card {id} aborted");
        }
    }
}

impl std::fmt::Debug for TriageDeck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriageDeck")
            .field("cards", &self.cards.len())
            .field("front", &self.front_card())
            .field("gesture_card", &self.gesture_card)
            .finish_non_exhaustive()
    }
}
