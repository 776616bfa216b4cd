//! Terminal-side card store. The session pushes placements and reveal state
//! here; widgets read it back at draw time.

use coverdeck_core::deck::Item;
use coverdeck_core::draw::DrawProgress;
use coverdeck_core::nav::SlotPlacement;
use coverdeck_core::reveal::RevealSnapshot;
use coverdeck_core::view::CarouselView;

/// Handle to a materialized card
#[derive(Debug, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct CardNode {
    pub item: Item,
    pub placement: Option<SlotPlacement>,
    pub focusable: bool,
    pub drawn: bool,
    pub reveal: RevealSnapshot,
}

impl CardNode {
    fn new(item: &Item) -> Self {
        Self {
            item: item.clone(),
            placement: None,
            focusable: false,
            drawn: false,
            reveal: RevealSnapshot::default(),
        }
    }

    fn is_paintable(&self) -> bool {
        self.placement.is_some_and(|p| !p.hidden)
    }
}

#[derive(Debug, Default)]
pub struct TerminalView {
    nodes: Vec<Option<CardNode>>,
    free: Vec<usize>,
    progress: DrawProgress,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> DrawProgress {
        self.progress
    }

    /// Live cards in no particular order
    pub fn cards(&self) -> impl Iterator<Item = &CardNode> {
        self.nodes.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.cards().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The card holding focus, i.e. the centered one
    pub fn focused(&self) -> Option<&CardNode> {
        self.cards().find(|c| c.focusable)
    }

    /// Cards to paint, farthest from the center first so nearer cards
    /// end up on top
    pub fn paint_order(&self) -> Vec<&CardNode> {
        let mut cards: Vec<&CardNode> = self.cards().filter(|c| c.is_paintable()).collect();
        cards.sort_by_key(|c| {
            let placement = c.placement.unwrap_or(HIDDEN);
            (std::cmp::Reverse(placement.distance()), placement.offset)
        });
        cards
    }

    fn node_mut(&mut self, node: &NodeId) -> Option<&mut CardNode> {
        self.nodes.get_mut(node.0).and_then(Option::as_mut)
    }
}

const HIDDEN: SlotPlacement = SlotPlacement {
    offset: 0,
    is_center: false,
    outside_window: true,
    hidden: true,
};

impl CarouselView for TerminalView {
    type Node = NodeId;

    fn materialize(&mut self, item: &Item) -> NodeId {
        let card = Some(CardNode::new(item));
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = card;
                NodeId(index)
            }
            None => {
                self.nodes.push(card);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn apply_transform(&mut self, node: &NodeId, placement: SlotPlacement) {
        if let Some(card) = self.node_mut(node) {
            card.placement = Some(placement);
        }
    }

    fn set_focusable(&mut self, node: &NodeId, focusable: bool) {
        if let Some(card) = self.node_mut(node) {
            card.focusable = focusable;
        }
    }

    fn destroy(&mut self, node: NodeId) {
        if let Some(slot) = self.nodes.get_mut(node.0) {
            if slot.take().is_some() {
                self.free.push(node.0);
            }
        }
    }

    fn mark_drawn(&mut self, node: &NodeId, drawn: bool) {
        if let Some(card) = self.node_mut(node) {
            card.drawn = drawn;
        }
    }

    fn show_reveal(&mut self, node: &NodeId, state: RevealSnapshot) {
        if let Some(card) = self.node_mut(node) {
            card.reveal = state;
        }
    }

    fn show_progress(&mut self, progress: DrawProgress) {
        self.progress = progress;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverdeck_core::deck::MediaKind;

    fn item(id: &str) -> Item {
        Item::new(id, id.to_uppercase(), MediaKind::Image)
    }

    fn at(offset: i64) -> SlotPlacement {
        SlotPlacement {
            offset,
            is_center: offset == 0,
            outside_window: offset.abs() > 1,
            hidden: offset.abs() > 2,
        }
    }

    #[test]
    fn test_destroyed_nodes_are_reused() {
        let mut view = TerminalView::new();
        let a = view.materialize(&item("a"));
        let _b = view.materialize(&item("b"));
        view.destroy(a);
        assert_eq!(view.len(), 1);

        let c = view.materialize(&item("c"));
        assert_eq!(c, NodeId(0));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_paint_order_puts_center_last_and_skips_hidden() {
        let mut view = TerminalView::new();
        for (id, offset) in [("a", -1), ("b", 0), ("c", 2), ("d", 3), ("e", 1)] {
            let node = view.materialize(&item(id));
            view.apply_transform(&node, at(offset));
            view.set_focusable(&node, offset == 0);
        }

        let order: Vec<_> = view
            .paint_order()
            .iter()
            .map(|c| c.item.id.as_str().to_string())
            .collect();
        assert_eq!(order, vec!["c", "a", "e", "b"]);
        assert_eq!(view.focused().map(|c| c.item.id.as_str()), Some("b"));
    }

    #[test]
    fn test_stale_node_updates_are_ignored() {
        let mut view = TerminalView::new();
        let a = view.materialize(&item("a"));
        view.destroy(a);
        view.apply_transform(&NodeId(0), at(0));
        view.mark_drawn(&NodeId(7), true);
        assert!(view.is_empty());
    }
}
