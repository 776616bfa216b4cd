use coverdeck_core::deck::MediaKind;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::truncate;
use crate::app::App;
use crate::hit::HitMap;

pub struct TrayWidget;

impl TrayWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, hits: &mut HitMap) {
        let theme = &app.theme;
        let entries = app.carousel.tray().entries();
        let centered_id = app.carousel.centered_item().map(|item| &item.id);

        let block = Block::default()
            .title(format!(" Drawn {} ", app.carousel.view().progress()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey1))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Newest entries stay visible when the list outgrows the panel
        let skip = entries.len().saturating_sub(inner.height as usize);
        for (row, entry) in entries.iter().skip(skip).enumerate() {
            let (icon, color) = match entry.media_kind {
                MediaKind::Image => ("▣", theme.info),
                MediaKind::Video => ("▶", theme.video),
            };
            let number = format!("{:>2}. ", skip + row + 1);
            let title_width = (inner.width as usize).saturating_sub(number.len() + 2);

            let mut title_style = Style::default().fg(theme.fg0);
            if centered_id == Some(&entry.id) {
                title_style = title_style.fg(theme.focused).add_modifier(Modifier::BOLD);
            }

            let line = Line::from(vec![
                Span::styled(number, Style::default().fg(theme.grey1)),
                Span::styled(icon, Style::default().fg(color)),
                Span::raw(" "),
                Span::styled(truncate(&entry.title, title_width), title_style),
            ]);
            let rect = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
            frame.render_widget(Paragraph::new(line), rect);
            hits.push_tray(rect, entry.id.clone());
        }
    }
}
