//! Contracts with the rendering side. The core decides what each card's
//! placement and state are; implementations own everything pixel-level.

use crate::deck::Item;
use crate::draw::DrawProgress;
use crate::nav::SlotPlacement;
use crate::reveal::RevealSnapshot;

/// View layer holding one node per materialized card
pub trait CarouselView {
    type Node;

    fn materialize(&mut self, item: &Item) -> Self::Node;

    /// Position a node relative to the centered card
    fn apply_transform(&mut self, node: &Self::Node, placement: SlotPlacement);

    /// Only the centered card takes keyboard focus
    fn set_focusable(&mut self, node: &Self::Node, focusable: bool);

    fn destroy(&mut self, node: Self::Node);

    /// Drawn badge in no-replace mode
    fn mark_drawn(&mut self, node: &Self::Node, drawn: bool);

    /// Flip face and overlay visibility
    fn show_reveal(&mut self, node: &Self::Node, state: RevealSnapshot);

    /// Progress counter, `drawn/total`
    fn show_progress(&mut self, progress: DrawProgress);
}

/// Persistent tray of drawn items
pub trait Tray {
    fn add_to_tray(&mut self, item: &Item);
    fn clear(&mut self);
    fn set_visible(&mut self, visible: bool);
}
