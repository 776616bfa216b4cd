//! Per-card flip state and deferred overlay disclosure.
//!
//! Every card owns at most one pending overlay timer. Any transition out of
//! `Revealed`, and any re-entry into it, cancels the previous handle first, and
//! a fired timer is honoured only if its handle is still the one on record.
//! A timer that outlives its reveal cycle therefore can never show an overlay.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, trace};

use crate::deck::ItemId;
use crate::scheduler::{Scheduler, TimerEvent, TimerFired, TimerHandle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardFace {
    #[default]
    Folded,
    Revealed,
}

/// Observable part of a card's reveal state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealSnapshot {
    pub face: CardFace,
    pub overlay_visible: bool,
}

impl RevealSnapshot {
    pub fn is_revealed(&self) -> bool {
        self.face == CardFace::Revealed
    }
}

#[derive(Debug, Default)]
struct RevealState {
    face: CardFace,
    overlay_visible: bool,
    timer: Option<TimerHandle>,
    /// The media start signal already counted for this reveal cycle
    start_signal_seen: bool,
}

impl RevealState {
    fn snapshot(&self) -> RevealSnapshot {
        RevealSnapshot {
            face: self.face,
            overlay_visible: self.overlay_visible,
        }
    }

    fn cancel_timer<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel(handle);
        }
    }
}

/// Reveal records keyed by stable item id, independent of any view node
#[derive(Debug, Default)]
pub struct RevealMachine {
    cards: HashMap<ItemId, RevealState>,
}

impl RevealMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a card that just became navigable
    pub fn track(&mut self, id: ItemId) {
        self.cards.entry(id).or_default();
    }

    pub fn is_tracked(&self, id: &ItemId) -> bool {
        self.cards.contains_key(id)
    }

    pub fn snapshot(&self, id: &ItemId) -> Option<RevealSnapshot> {
        self.cards.get(id).map(RevealState::snapshot)
    }

    pub fn is_revealed(&self, id: &ItemId) -> bool {
        self.snapshot(id).is_some_and(|s| s.is_revealed())
    }

    /// Number of cards with an overlay timer outstanding
    pub fn pending_timers(&self) -> usize {
        self.cards.values().filter(|s| s.timer.is_some()).count()
    }

    /// Flip a tracked card. Returns the face it ended on.
    pub fn toggle<S: Scheduler + ?Sized>(
        &mut self,
        id: &ItemId,
        overlay_delay: Duration,
        scheduler: &mut S,
    ) -> Option<CardFace> {
        let face = self.cards.get(id)?.face;
        match face {
            CardFace::Folded => self.reveal(id, overlay_delay, scheduler),
            CardFace::Revealed => self.fold(id, scheduler),
        };
        self.snapshot(id).map(|s| s.face)
    }

    /// Enter `Revealed` and start the overlay delay from zero.
    ///
    /// Returns `false` if the card is untracked or already revealed.
    pub fn reveal<S: Scheduler + ?Sized>(
        &mut self,
        id: &ItemId,
        overlay_delay: Duration,
        scheduler: &mut S,
    ) -> bool {
        let Some(state) = self.cards.get_mut(id) else {
            return false;
        };
        if state.face == CardFace::Revealed {
            return false;
        }

        state.cancel_timer(scheduler);
        state.face = CardFace::Revealed;
        state.overlay_visible = false;
        state.start_signal_seen = false;
        state.timer = Some(scheduler.schedule_after(overlay_delay, TimerEvent::OverlayDue(id.clone())));
        debug!("Revealed {} (overlay in {:?})", id, overlay_delay);
        true
    }

    /// Enter `Folded`: cancel the timer and hide the overlay unconditionally.
    ///
    /// Returns `false` if the card is untracked or already folded.
    pub fn fold<S: Scheduler + ?Sized>(&mut self, id: &ItemId, scheduler: &mut S) -> bool {
        let Some(state) = self.cards.get_mut(id) else {
            return false;
        };
        if state.face == CardFace::Folded {
            return false;
        }

        state.cancel_timer(scheduler);
        state.face = CardFace::Folded;
        state.overlay_visible = false;
        debug!("Folded {}", id);
        true
    }

    /// Handle a fired overlay timer. Returns the card whose overlay appeared.
    pub fn on_timer(&mut self, fired: &TimerFired) -> Option<ItemId> {
        let TimerEvent::OverlayDue(id) = &fired.event;
        let Some(state) = self.cards.get_mut(id) else {
            trace!("Timer {:?} for untracked card {}", fired.handle, id);
            return None;
        };
        if state.timer != Some(fired.handle) {
            debug!("Ignoring stale overlay timer {:?} for {}", fired.handle, id);
            return None;
        }

        state.timer = None;
        if state.face != CardFace::Revealed || state.overlay_visible {
            return None;
        }
        state.overlay_visible = true;
        debug!("Overlay shown for {} after delay", id);
        Some(id.clone())
    }

    /// Native "started playing" signal. The first one per reveal cycle shows
    /// the overlay if the timer has not already done so.
    pub fn media_started<S: Scheduler + ?Sized>(&mut self, id: &ItemId, scheduler: &mut S) -> bool {
        let Some(state) = self.cards.get_mut(id) else {
            return false;
        };
        if state.face != CardFace::Revealed || state.start_signal_seen {
            return false;
        }
        state.start_signal_seen = true;
        if state.overlay_visible {
            return false;
        }

        state.cancel_timer(scheduler);
        state.overlay_visible = true;
        debug!("Overlay shown for {} on playback start", id);
        true
    }

    /// Toggle the overlay directly. Only allowed while revealed; any pending
    /// timer is cancelled. Returns the new visibility.
    pub fn toggle_overlay<S: Scheduler + ?Sized>(
        &mut self,
        id: &ItemId,
        scheduler: &mut S,
    ) -> Option<bool> {
        let state = self.cards.get_mut(id)?;
        if state.face != CardFace::Revealed {
            return None;
        }
        state.cancel_timer(scheduler);
        state.overlay_visible = !state.overlay_visible;
        Some(state.overlay_visible)
    }

    /// Tear down every record, cancelling all pending timers
    pub fn clear<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        for state in self.cards.values_mut() {
            state.cancel_timer(scheduler);
        }
        self.cards.clear();
    }
}
