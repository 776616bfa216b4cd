use coverdeck_core::deck::{Item, ItemId, MediaKind};
use coverdeck_core::view::Tray;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayEntry {
    pub id: ItemId,
    pub title: String,
    pub media_kind: MediaKind,
}

/// Side panel listing everything drawn since the last reshuffle
#[derive(Debug, Default)]
pub struct TrayPanel {
    entries: Vec<TrayEntry>,
    visible: bool,
}

impl TrayPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TrayEntry] {
        &self.entries
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Tray for TrayPanel {
    fn add_to_tray(&mut self, item: &Item) {
        self.entries.push(TrayEntry {
            id: item.id.clone(),
            title: item.display_title().to_string(),
            media_kind: item.media_kind,
        });
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
