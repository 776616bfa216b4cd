//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::deck::{Item, ItemId, MediaKind};
use crate::draw::DrawProgress;
use crate::nav::SlotPlacement;
use crate::reveal::RevealSnapshot;
use crate::view::{CarouselView, Tray};

/// Everything a [`RecordingView`] was asked to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Materialize(ItemId),
    Transform(usize, SlotPlacement),
    Focusable(usize, bool),
    Destroy(usize),
    Drawn(usize, bool),
    Reveal(usize, RevealSnapshot),
    Progress(DrawProgress),
}

#[derive(Debug, Clone)]
pub struct RecordedNode {
    pub id: ItemId,
    pub placement: Option<SlotPlacement>,
    pub focusable: bool,
    pub drawn: bool,
    pub reveal: RevealSnapshot,
    pub alive: bool,
}

/// View that keeps node state and a log of calls
#[derive(Debug, Default)]
pub struct RecordingView {
    pub nodes: Vec<RecordedNode>,
    pub calls: Vec<ViewCall>,
    pub progress: DrawProgress,
}

impl RecordingView {
    pub fn live_nodes(&self) -> impl Iterator<Item = &RecordedNode> {
        self.nodes.iter().filter(|n| n.alive)
    }

    pub fn node_for(&self, id: &ItemId) -> Option<&RecordedNode> {
        self.live_nodes().find(|n| &n.id == id)
    }

    pub fn transform_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ViewCall::Transform(..)))
            .count()
    }

    /// How many times an overlay was shown for `id`
    pub fn overlay_shows(&self, id: &ItemId) -> usize {
        self.calls
            .iter()
            .filter(|c| match c {
                ViewCall::Reveal(node, state) => {
                    state.overlay_visible && &self.nodes[*node].id == id
                }
                _ => false,
            })
            .count()
    }
}

impl CarouselView for RecordingView {
    type Node = usize;

    fn materialize(&mut self, item: &Item) -> usize {
        self.calls.push(ViewCall::Materialize(item.id.clone()));
        self.nodes.push(RecordedNode {
            id: item.id.clone(),
            placement: None,
            focusable: false,
            drawn: false,
            reveal: RevealSnapshot::default(),
            alive: true,
        });
        self.nodes.len() - 1
    }

    fn apply_transform(&mut self, node: &usize, placement: SlotPlacement) {
        self.calls.push(ViewCall::Transform(*node, placement));
        self.nodes[*node].placement = Some(placement);
    }

    fn set_focusable(&mut self, node: &usize, focusable: bool) {
        self.calls.push(ViewCall::Focusable(*node, focusable));
        self.nodes[*node].focusable = focusable;
    }

    fn destroy(&mut self, node: usize) {
        self.calls.push(ViewCall::Destroy(node));
        self.nodes[node].alive = false;
    }

    fn mark_drawn(&mut self, node: &usize, drawn: bool) {
        self.calls.push(ViewCall::Drawn(*node, drawn));
        self.nodes[*node].drawn = drawn;
    }

    fn show_reveal(&mut self, node: &usize, state: RevealSnapshot) {
        self.calls.push(ViewCall::Reveal(*node, state));
        self.nodes[*node].reveal = state;
    }

    fn show_progress(&mut self, progress: DrawProgress) {
        self.calls.push(ViewCall::Progress(progress));
        self.progress = progress;
    }
}

/// Tray that remembers what it was given
#[derive(Debug, Default)]
pub struct RecordingTray {
    pub items: Vec<ItemId>,
    pub visible: bool,
    pub clears: usize,
}

impl Tray for RecordingTray {
    fn add_to_tray(&mut self, item: &Item) {
        self.items.push(item.id.clone());
    }

    fn clear(&mut self) {
        self.items.clear();
        self.clears += 1;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Deck of image items named `A`, `B`, ...
pub fn letter_deck(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| {
            let letter = char::from(b'A' + i as u8).to_string();
            Item::new(letter.clone(), format!("Card {}", letter), MediaKind::Image)
        })
        .collect()
}
