//! Screen regions recorded while drawing, used to resolve mouse presses.

use coverdeck_core::deck::ItemId;
use coverdeck_core::gesture::HitTarget;
use ratatui::layout::Rect;

#[derive(Debug, Default, Clone)]
pub struct HitMap {
    carousel: Option<Rect>,
    /// Card regions in paint order; later entries sit on top
    cards: Vec<(Rect, HitTarget)>,
    tray: Vec<(Rect, ItemId)>,
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_carousel_area(&mut self, area: Rect) {
        self.carousel = Some(area);
    }

    pub fn push_card(&mut self, rect: Rect, target: HitTarget) {
        if !rect.is_empty() {
            self.cards.push((rect, target));
        }
    }

    pub fn push_tray(&mut self, rect: Rect, id: ItemId) {
        if !rect.is_empty() {
            self.tray.push((rect, id));
        }
    }

    /// What a press at this cell lands on inside the carousel. Empty space
    /// on the track resolves to [`HitTarget::Track`].
    pub fn carousel_target(&self, column: u16, row: u16) -> Option<HitTarget> {
        let area = self.carousel?;
        if !contains(area, column, row) {
            return None;
        }
        let hit = self
            .cards
            .iter()
            .rev()
            .find(|(rect, _)| contains(*rect, column, row))
            .map(|(_, target)| *target);
        Some(hit.unwrap_or(HitTarget::Track))
    }

    pub fn tray_entry(&self, column: u16, row: u16) -> Option<&ItemId> {
        self.tray
            .iter()
            .find(|(rect, _)| contains(*rect, column, row))
            .map(|(_, id)| id)
    }
}
