use coverdeck_core::config::{AppConfig, UiConfig};
use coverdeck_core::deck::Item;
use coverdeck_core::gesture::{KeyInput, PointerId, PointerOutcome, TapIntent};
use coverdeck_core::scheduler::{TimerFired, TokioScheduler};
use coverdeck_core::{Carousel, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::hit::HitMap;
use crate::input::{Action, PointerInput};
use crate::keymap::Keymap;
use crate::theme::Theme;
use crate::tray::TrayPanel;
use crate::view::TerminalView;

pub type Session = Carousel<TerminalView, TrayPanel, TokioScheduler>;

/// The terminal only ever has one pointer
const MOUSE: PointerId = 0;

/// Application state
pub struct App {
    pub carousel: Session,
    pub keymap: Keymap,
    pub theme: Theme,
    pub ui: UiConfig,
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
    /// Regions from the last draw
    pub hits: HitMap,
}

impl App {
    /// Build the app over a loaded deck. The returned receiver yields overlay
    /// timers and must be drained into [`App::handle_timer`].
    pub fn new(
        deck: Vec<Item>,
        config: &AppConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<TimerFired>)> {
        let (scheduler, timers) = TokioScheduler::new();
        let carousel =
            Carousel::new(deck, config, TerminalView::new(), TrayPanel::new(), scheduler)?;

        let app = Self {
            carousel,
            keymap: Keymap::from_config(&config.keymap),
            theme: Theme::default(),
            ui: config.ui.clone(),
            should_quit: false,
            status_message: None,
            hits: HitMap::new(),
        };
        Ok((app, timers))
    }

    pub fn handle_timer(&mut self, fired: TimerFired) {
        self.carousel.on_timer(fired);
    }

    /// Called after every completed draw
    pub fn on_frame(&mut self) {
        if self.carousel.on_frame() {
            debug!("Issued queued flip after render");
        }
    }

    pub fn resize(&mut self, width: u16) {
        self.carousel.set_compact(width < self.ui.compact_below_cols);
    }

    pub fn apply_action(&mut self, action: Action) {
        if action == Action::None {
            return;
        }
        self.clear_status();

        match action {
            Action::Quit => self.should_quit = true,
            Action::StepLeft => {
                self.carousel.on_key(KeyInput::Left);
            }
            Action::StepRight => {
                self.carousel.on_key(KeyInput::Right);
            }
            Action::Flip => {
                self.carousel.on_key(KeyInput::Activate);
            }
            Action::ToggleOverlay => {
                if self.carousel.toggle_overlay().is_none() {
                    self.set_status("Flip the card first");
                }
            }
            Action::Reshuffle => {
                self.carousel.on_key(KeyInput::Reshuffle);
                self.set_status("Reshuffled");
            }
            Action::ToggleMode => {
                let mode = self.carousel.toggle_mode();
                self.set_status(format!("Mode: {}", mode.label()));
            }
            Action::OpenLink => {
                let slot = self.carousel.centered();
                self.open_link_at(slot);
            }
            Action::None => {}
        }
    }

    pub fn handle_pointer(&mut self, input: PointerInput) {
        match input {
            PointerInput::Down { x, target } => {
                self.carousel.on_pointer_down(MOUSE, x, target);
            }
            PointerInput::Move { x } => {
                self.carousel.on_pointer_move(MOUSE, x);
            }
            PointerInput::Up { x } => {
                if let PointerOutcome::Tap(TapIntent::PassThrough { slot }) =
                    self.carousel.on_pointer_up(MOUSE, x)
                {
                    self.open_link_at(slot);
                }
            }
            PointerInput::Wheel(delta) => {
                self.carousel.on_wheel(delta);
            }
            PointerInput::TraySelect(id) => {
                self.carousel.select_from_tray(&id);
            }
        }
    }

    /// Link of the card at `slot`, if it has one
    pub fn link_at(&self, slot: usize) -> Option<String> {
        self.carousel.item_at(slot).and_then(|item| item.link.clone())
    }

    fn open_link_at(&mut self, slot: usize) {
        let Some(link) = self.link_at(slot) else {
            self.set_status("No link on this card");
            return;
        };
        match open::that(&link) {
            Ok(()) => {
                info!("Opened {}", link);
                self.set_status(format!("Opened {}", link));
            }
            Err(e) => {
                warn!("Failed to open {}: {}", link, e);
                self.set_status(format!("Failed to open link: {}", e));
            }
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverdeck_core::deck::{ItemId, MediaKind};
    use coverdeck_core::draw::DrawMode;
    use coverdeck_core::gesture::{CardRegion, HitTarget};
    use std::time::Duration;

    fn deck() -> Vec<Item> {
        vec![
            Item::new("a", "Alpha", MediaKind::Image).with_link("https://example.com/a"),
            Item::new("b", "Beta", MediaKind::Video),
            Item::new("c", "Gamma", MediaKind::Image),
        ]
    }

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.general.seed = Some(3);
        config
    }

    fn centered_revealed(app: &App) -> bool {
        app.carousel.view().focused().is_some_and(|c| c.reveal.is_revealed())
    }

    #[tokio::test(start_paused = true)]
    async fn test_flip_then_overlay_via_timer_channel() {
        let (mut app, mut timers) = App::new(deck(), &config()).unwrap();
        app.resize(200);
        app.apply_action(Action::Flip);
        assert!(centered_revealed(&app));

        tokio::time::sleep(Duration::from_millis(1600)).await;
        let fired = timers.recv().await.unwrap();
        app.handle_timer(fired);
        let focused = app.carousel.view().focused().unwrap();
        assert!(focused.reveal.overlay_visible);
    }

    #[tokio::test]
    async fn test_actions_drive_the_carousel() {
        let (mut app, _timers) = App::new(deck(), &config()).unwrap();

        app.apply_action(Action::StepRight);
        app.apply_action(Action::StepRight);
        app.apply_action(Action::StepLeft);
        assert_eq!(app.carousel.centered(), 1);

        app.apply_action(Action::ToggleOverlay);
        assert_eq!(app.status_message.as_deref(), Some("Flip the card first"));

        app.apply_action(Action::ToggleMode);
        assert_eq!(app.carousel.mode(), DrawMode::NoReplace);
        assert!(app.carousel.tray().is_visible());

        app.apply_action(Action::Flip);
        assert_eq!(app.carousel.tray().entries().len(), 1);

        app.apply_action(Action::Reshuffle);
        assert_eq!(app.carousel.centered(), 0);
        assert!(app.carousel.tray().entries().is_empty());

        app.apply_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_tap_side_card_flips_after_two_frames() {
        let (mut app, _timers) = App::new(deck(), &config()).unwrap();
        let target = HitTarget::Card { slot: 2, region: CardRegion::Body };

        app.handle_pointer(PointerInput::Down { x: 500.0, target });
        app.handle_pointer(PointerInput::Up { x: 500.0 });
        assert_eq!(app.carousel.centered(), 2);
        assert!(!centered_revealed(&app));

        app.on_frame();
        app.on_frame();
        assert!(centered_revealed(&app));
    }

    #[tokio::test]
    async fn test_drag_and_wheel() {
        let (mut app, _timers) = App::new(deck(), &config()).unwrap();
        app.handle_pointer(PointerInput::Down { x: 600.0, target: HitTarget::Track });
        app.handle_pointer(PointerInput::Move { x: 460.0 });
        app.handle_pointer(PointerInput::Up { x: 460.0 });
        assert_eq!(app.carousel.centered(), 1);

        app.handle_pointer(PointerInput::Wheel(-10.0));
        assert_eq!(app.carousel.centered(), 0);
    }

    #[tokio::test]
    async fn test_tray_select_recenters() {
        let mut config = config();
        config.draw.mode = DrawMode::NoReplace;
        let (mut app, _timers) = App::new(deck(), &config).unwrap();
        let id = ItemId::new("c");

        app.handle_pointer(PointerInput::TraySelect(id.clone()));
        assert_eq!(app.carousel.centered_item().map(|i| &i.id), Some(&id));
        assert!(centered_revealed(&app));
    }

    #[tokio::test]
    async fn test_link_lookup() {
        let (app, _timers) = App::new(deck(), &config()).unwrap();
        let slot = app.carousel.slot_of(&ItemId::new("a")).unwrap();
        assert_eq!(app.link_at(slot).as_deref(), Some("https://example.com/a"));
        let other = app.carousel.slot_of(&ItemId::new("b")).unwrap();
        assert_eq!(app.link_at(other), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_compact_viewport_threshold() {
        let (mut app, mut timers) = App::new(deck(), &config()).unwrap();
        app.resize(80);
        let start = tokio::time::Instant::now();
        app.apply_action(Action::Flip);
        let fired = timers.recv().await.unwrap();
        app.handle_timer(fired);
        // Longest compact delay is the video's 900ms
        assert!(start.elapsed() <= Duration::from_millis(901));
    }
}
