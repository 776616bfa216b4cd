mod carousel;
mod status_bar;
mod tray;

pub use carousel::{card_rect, CarouselWidget};
pub use status_bar::StatusBarWidget;
pub use tray::TrayWidget;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::hit::HitMap;

const TRAY_WIDTH: u16 = 28;

/// Draw the whole screen and return the regions mouse input resolves against
pub fn draw(frame: &mut Frame, app: &App) -> HitMap {
    let mut hits = HitMap::new();
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg0)), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    if app.carousel.tray().is_visible() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(TRAY_WIDTH)])
            .split(rows[0]);
        CarouselWidget::render(frame, cols[0], app, &mut hits);
        TrayWidget::render(frame, cols[1], app, &mut hits);
    } else {
        CarouselWidget::render(frame, rows[0], app, &mut hits);
    }

    StatusBarWidget::render(frame, rows[1], app);
    hits
}

/// Cut `text` to `width` display columns, marking the cut with an ellipsis
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverdeck_core::config::AppConfig;
    use coverdeck_core::deck::{Item, MediaKind};
    use coverdeck_core::draw::DrawMode;
    use coverdeck_core::gesture::{CardRegion, HitTarget};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn rows(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    fn app(mode: DrawMode) -> App {
        let mut config = AppConfig::default();
        config.general.seed = Some(9);
        config.draw.mode = mode;
        let deck = vec![
            Item::new("a", "Alpha", MediaKind::Image).with_link("https://example.com"),
            Item::new("b", "Beta", MediaKind::Video),
            Item::new("c", "Gamma", MediaKind::Image),
        ];
        App::new(deck, &config).unwrap().0
    }

    fn render(app: &App) -> (HitMap, Vec<String>) {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut hits = HitMap::new();
        terminal
            .draw(|frame| {
                hits = draw(frame, app);
            })
            .unwrap();
        let rows = rows(terminal.backend().buffer());
        (hits, rows)
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("carousel", 5), "caro…");
        assert_eq!(truncate("カルーセル", 5), "カル…");
        assert_eq!(truncate("x", 0), "");
    }

    #[test]
    fn test_status_bar_shows_mode_and_position() {
        let (_, rows) = render(&app(DrawMode::Replace));
        let status = rows.last().unwrap();
        assert!(status.contains("REPLACE | 1/3"));
        assert!(status.contains("q:quit"));
    }

    #[test]
    fn test_centered_card_is_hit_on_top() {
        let (hits, _) = render(&app(DrawMode::Replace));
        assert_eq!(
            hits.carousel_target(40, 11),
            Some(HitTarget::Card { slot: 0, region: CardRegion::Body })
        );
        assert_eq!(
            hits.carousel_target(50, 11),
            Some(HitTarget::Card { slot: 0, region: CardRegion::Body })
        );
        assert_eq!(
            hits.carousel_target(60, 11),
            Some(HitTarget::Card { slot: 1, region: CardRegion::Body })
        );
    }

    #[tokio::test]
    async fn test_revealed_card_shows_front_and_tray_entry() {
        let mut app = app(DrawMode::NoReplace);
        app.apply_action(crate::input::Action::Flip);
        app.apply_action(crate::input::Action::ToggleOverlay);
        let title = app.carousel.centered_item().unwrap().title.clone();

        let (hits, rows) = render(&app);
        assert!(rows.iter().any(|r| r.contains("drawn 1/3")));
        assert!(rows.iter().any(|r| r.contains(&title)));

        // Carousel is narrower with the tray open: 80 - 28 = 52 columns
        assert_eq!(
            hits.carousel_target(26, 11),
            Some(HitTarget::Card { slot: 0, region: CardRegion::Front })
        );
        let id = &app.carousel.centered_item().unwrap().id;
        assert_eq!(hits.tray_entry(60, 1), Some(id));
    }
}
