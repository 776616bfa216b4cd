//! Session-scoped carousel context.
//!
//! [`Carousel`] owns the deck, the navigation order and every piece of
//! mutable state, together with the view, tray and scheduler it drives. All
//! transitions run synchronously inside the input handlers; the only deferred
//! work is the overlay timer, delivered back through [`Carousel::on_timer`].

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::{AppConfig, CarouselConfig, RevealConfig};
use crate::deck::{DeckSource, Item, ItemId, NavigationOrder};
use crate::draw::{DrawMode, DrawProgress, DrawTracker};
use crate::gesture::{
    GestureCommand, GestureRecognizer, HitTarget, KeyInput, PointerId, PointerOutcome, TapIntent,
};
use crate::nav::{Navigator, WindowPolicy};
use crate::reveal::{CardFace, RevealMachine, RevealSnapshot};
use crate::scheduler::{Scheduler, TimerFired};
use crate::view::{CarouselView, Tray};
use crate::Result;

/// Flip queued behind a tap recenter, issued once the render has settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingFlip {
    slot: usize,
    frames_left: u32,
}

pub struct Carousel<V: CarouselView, T: Tray, S: Scheduler> {
    deck: Vec<Item>,
    index: HashMap<ItemId, usize>,
    order: NavigationOrder,
    nav: Navigator,
    gesture: GestureRecognizer,
    reveal: RevealMachine,
    draw: DrawTracker,
    /// One node per slot, in slot order
    nodes: Vec<V::Node>,
    pending_flip: Option<PendingFlip>,
    compact: bool,
    carousel_config: CarouselConfig,
    reveal_config: RevealConfig,
    rng: StdRng,
    view: V,
    tray: T,
    scheduler: S,
}

impl<V: CarouselView, T: Tray, S: Scheduler> Carousel<V, T, S> {
    /// Build a session over `deck`: shuffle, materialize every card and
    /// center on the first slot.
    ///
    /// `config` is validated first, since configs built in code never pass
    /// through [`AppConfig::load`].
    pub fn new(
        deck: Vec<Item>,
        config: &AppConfig,
        view: V,
        tray: T,
        scheduler: S,
    ) -> Result<Self> {
        config.validate()?;
        let rng = match config.general.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let index = deck
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id.clone(), i))
            .collect();
        let len = deck.len();

        let mut carousel = Self {
            draw: DrawTracker::new(config.draw.mode, len),
            index,
            order: NavigationOrder::identity(0),
            nav: Navigator::new(0, WindowPolicy::from_config(&config.carousel)),
            gesture: GestureRecognizer::new(&config.carousel),
            reveal: RevealMachine::new(),
            nodes: Vec::with_capacity(len),
            pending_flip: None,
            compact: false,
            carousel_config: config.carousel.clone(),
            reveal_config: config.reveal.clone(),
            rng,
            deck,
            view,
            tray,
            scheduler,
        };

        carousel.tray.set_visible(carousel.draw.is_active());
        carousel.build();
        info!(
            "Carousel ready: {} cards, mode {}",
            carousel.deck.len(),
            carousel.draw.mode().label()
        );
        Ok(carousel)
    }

    /// Load the deck from `source` and build a session over it.
    ///
    /// Load failures are returned as-is; they never degrade to an empty deck.
    pub fn load(
        source: &impl DeckSource,
        config: &AppConfig,
        view: V,
        tray: T,
        scheduler: S,
    ) -> Result<Self> {
        let deck = source.load_deck()?;
        Self::new(deck, config, view, tray, scheduler)
    }


    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn deck(&self) -> &[Item] {
        &self.deck
    }

    pub fn order(&self) -> &NavigationOrder {
        &self.order
    }

    pub fn centered(&self) -> usize {
        self.nav.centered()
    }

    pub fn item_at(&self, slot: usize) -> Option<&Item> {
        self.order.deck_index(slot).map(|i| &self.deck[i])
    }

    pub fn centered_item(&self) -> Option<&Item> {
        self.item_at(self.nav.centered())
    }

    pub fn slot_of(&self, id: &ItemId) -> Option<usize> {
        self.index.get(id).and_then(|&i| self.order.slot_of(i))
    }

    pub fn reveal_state(&self, id: &ItemId) -> Option<RevealSnapshot> {
        self.reveal.snapshot(id)
    }

    pub fn mode(&self) -> DrawMode {
        self.draw.mode()
    }

    pub fn progress(&self) -> DrawProgress {
        self.draw.progress()
    }

    pub fn is_drawn(&self, id: &ItemId) -> bool {
        self.draw.is_drawn(id)
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Whether a tap-select flip is waiting for the render to settle
    pub fn has_pending_flip(&self) -> bool {
        self.pending_flip.is_some()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn tray(&self) -> &T {
        &self.tray
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }


    /// Center on `target`, clamped. No render happens if nothing changed.
    pub fn center_on(&mut self, target: i64) -> bool {
        if !self.nav.center_on(target) {
            return false;
        }
        self.after_recenter();
        true
    }

    pub fn step(&mut self, delta: i64) -> bool {
        self.center_on(self.nav.centered() as i64 + delta)
    }


    /// Start a pointer sequence. A queued tap flip is dropped here; the new
    /// sequence decides what happens next.
    pub fn on_pointer_down(&mut self, pointer: PointerId, x: f64, target: HitTarget) -> bool {
        if !self.gesture.pointer_down(pointer, x, target, &self.nav) {
            return false;
        }
        if self.pending_flip.take().is_some() {
            debug!("Pointer down, dropping queued flip");
        }
        true
    }

    pub fn on_pointer_move(&mut self, pointer: PointerId, x: f64) -> bool {
        if !self.gesture.pointer_move(pointer, x, &mut self.nav) {
            return false;
        }
        self.after_recenter();
        true
    }

    pub fn on_pointer_up(&mut self, pointer: PointerId, x: f64) -> PointerOutcome {
        let outcome = self.gesture.pointer_up(pointer, x, self.nav.centered());
        if let PointerOutcome::Tap(intent) = outcome {
            self.handle_tap(intent);
        }
        outcome
    }

    pub fn on_wheel(&mut self, delta: f64) -> bool {
        match self.gesture.wheel(delta) {
            Some(command) => self.run_command(command),
            None => false,
        }
    }

    pub fn on_key(&mut self, key: KeyInput) -> bool {
        let command = self.gesture.key(key);
        self.run_command(command)
    }

    /// Report that a render pass completed. Issues a queued tap flip once
    /// enough passes have gone by. Returns `true` if a flip was issued.
    pub fn on_frame(&mut self) -> bool {
        let Some(mut pending) = self.pending_flip.take() else {
            return false;
        };
        pending.frames_left = pending.frames_left.saturating_sub(1);
        if pending.frames_left > 0 {
            self.pending_flip = Some(pending);
            return false;
        }
        if pending.slot != self.nav.centered() {
            return false;
        }
        self.flip_slot(pending.slot).is_some()
    }

    /// Deliver a fired timer. Returns `true` if an overlay became visible.
    pub fn on_timer(&mut self, fired: TimerFired) -> bool {
        let Some(id) = self.reveal.on_timer(&fired) else {
            return false;
        };
        if let Some(slot) = self.slot_of(&id) {
            self.sync_reveal(slot);
        }
        true
    }

    /// Native playback-start signal for a video card
    pub fn on_media_started(&mut self, id: &ItemId) -> bool {
        let Some(&deck_index) = self.index.get(id) else {
            return false;
        };
        if !self.deck[deck_index].media_kind.has_start_signal() {
            return false;
        }
        if !self.reveal.media_started(id, &mut self.scheduler) {
            return false;
        }
        if let Some(slot) = self.order.slot_of(deck_index) {
            self.sync_reveal(slot);
        }
        true
    }


    /// Flip the centered card. Returns the face it ended on.
    pub fn flip_centered(&mut self) -> Option<CardFace> {
        self.pending_flip = None;
        self.flip_slot(self.nav.centered())
    }

    /// Toggle the centered card's overlay; only works while it is revealed
    pub fn toggle_overlay(&mut self) -> Option<bool> {
        self.toggle_overlay_at(self.nav.centered())
    }

    /// Recenter on a tray entry and reveal it if folded. Unknown ids are ignored.
    pub fn select_from_tray(&mut self, id: &ItemId) -> bool {
        let Some(slot) = self.slot_of(id) else {
            debug!("Tray selection for unknown item {}", id);
            return false;
        };
        self.pending_flip = None;
        self.center_on(slot as i64);
        if !self.reveal.is_revealed(id) {
            self.flip_slot(slot);
        }
        true
    }


    /// Tear everything down and start over with a fresh order.
    ///
    /// Cancels every pending timer, drops the drawn set and the tray, and
    /// centers on the first slot. The deck itself is not reloaded.
    pub fn reshuffle(&mut self) {
        self.pending_flip = None;
        self.gesture.cancel();
        self.reveal.clear(&mut self.scheduler);
        for node in self.nodes.drain(..) {
            self.view.destroy(node);
        }
        self.draw.reset();
        self.tray.clear();
        self.tray.set_visible(self.draw.is_active());
        self.build();
        info!("Reshuffled {} cards", self.deck.len());
    }

    pub fn set_mode(&mut self, mode: DrawMode) {
        self.draw.set_mode(mode);
        self.tray.set_visible(self.draw.is_active());
        self.view.show_progress(self.draw.progress());
    }

    pub fn toggle_mode(&mut self) -> DrawMode {
        let mode = self.draw.mode().toggled();
        self.set_mode(mode);
        mode
    }

    /// Compact viewports get shorter overlay delays on the next reveal
    pub fn set_compact(&mut self, compact: bool) {
        self.compact = compact;
    }


    fn build(&mut self) {
        self.order = NavigationOrder::shuffled(self.deck.len(), &mut self.rng);
        self.nav.reset(self.order.len());

        for deck_index in self.order.iter() {
            let item = &self.deck[deck_index];
            self.reveal.track(item.id.clone());
            let node = self.view.materialize(item);
            self.nodes.push(node);
        }

        self.render_positions();
        self.view.show_progress(self.draw.progress());
    }

    fn after_recenter(&mut self) {
        if let Some(pending) = self.pending_flip {
            if pending.slot != self.nav.centered() {
                debug!("Dropping queued flip for slot {}", pending.slot);
                self.pending_flip = None;
            }
        }
        self.render_positions();
    }

    fn render_positions(&mut self) {
        for (slot, node) in self.nodes.iter().enumerate() {
            let placement = self.nav.placement(slot);
            self.view.apply_transform(node, placement);
            self.view.set_focusable(node, placement.is_center);
        }
    }

    fn run_command(&mut self, command: GestureCommand) -> bool {
        match command {
            GestureCommand::Step(delta) => self.step(delta),
            GestureCommand::FlipCentered => self.flip_centered().is_some(),
            GestureCommand::Reshuffle => {
                self.reshuffle();
                true
            }
        }
    }

    fn handle_tap(&mut self, intent: TapIntent) {
        match intent {
            TapIntent::Select { slot } => {
                self.pending_flip = None;
                if self.center_on(slot as i64)
                    && self.carousel_config.flip_after_select
                    && !self.is_slot_revealed(slot)
                {
                    self.pending_flip = Some(PendingFlip {
                        slot,
                        frames_left: self.carousel_config.flip_settle_frames.max(1),
                    });
                }
            }
            TapIntent::Flip { slot } => {
                self.pending_flip = None;
                self.flip_slot(slot);
            }
            TapIntent::FrontFace { slot } => {
                self.pending_flip = None;
                if self.carousel_config.front_tap_toggles_overlay && self.is_slot_revealed(slot) {
                    self.toggle_overlay_at(slot);
                } else {
                    self.flip_slot(slot);
                }
            }
            TapIntent::PassThrough { .. } | TapIntent::Nothing => {}
        }
    }

    fn is_slot_revealed(&self, slot: usize) -> bool {
        self.item_at(slot)
            .is_some_and(|item| self.reveal.is_revealed(&item.id))
    }

    fn flip_slot(&mut self, slot: usize) -> Option<CardFace> {
        let deck_index = self.order.deck_index(slot)?;
        let item = &self.deck[deck_index];
        let delay = self.reveal_config.overlay_delay(item.media_kind, self.compact);
        let face = self.reveal.toggle(&item.id, delay, &mut self.scheduler)?;

        if let Some(node) = self.nodes.get(slot) {
            if let Some(state) = self.reveal.snapshot(&item.id) {
                self.view.show_reveal(node, state);
            }
            if face == CardFace::Revealed && self.draw.record_reveal(&item.id) {
                self.view.mark_drawn(node, true);
                self.tray.add_to_tray(item);
                self.view.show_progress(self.draw.progress());
            }
        }
        Some(face)
    }

    fn toggle_overlay_at(&mut self, slot: usize) -> Option<bool> {
        let deck_index = self.order.deck_index(slot)?;
        let visible = self
            .reveal
            .toggle_overlay(&self.deck[deck_index].id, &mut self.scheduler)?;
        self.sync_reveal(slot);
        Some(visible)
    }

    fn sync_reveal(&mut self, slot: usize) {
        let Some(deck_index) = self.order.deck_index(slot) else {
            return;
        };
        let id = &self.deck[deck_index].id;
        if let (Some(node), Some(state)) = (self.nodes.get(slot), self.reveal.snapshot(id)) {
            self.view.show_reveal(node, state);
        }
    }
}

impl<V: CarouselView, T: Tray, S: Scheduler> Drop for Carousel<V, T, S> {
    fn drop(&mut self) {
        self.reveal.clear(&mut self.scheduler);
    }
}
