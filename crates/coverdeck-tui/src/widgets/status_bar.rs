use coverdeck_core::draw::DrawMode;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::input::Action;

const HINTS: [(Action, &str); 8] = [
    (Action::StepLeft, "prev"),
    (Action::StepRight, "next"),
    (Action::Flip, "flip"),
    (Action::ToggleOverlay, "info"),
    (Action::Reshuffle, "shuffle"),
    (Action::ToggleMode, "mode"),
    (Action::OpenLink, "link"),
    (Action::Quit, "quit"),
];

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let status_text = Self::status_text(app);

        let help_hint = HINTS
            .iter()
            .filter_map(|(action, label)| {
                app.keymap
                    .hint_for(action)
                    .map(|key| format!("{}:{}", key, label))
            })
            .collect::<Vec<_>>()
            .join(" ");
        let help_hint = format!(" {} ", help_hint);

        let used = status_text.width() + help_hint.width();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    fn status_text(app: &App) -> String {
        let carousel = &app.carousel;
        let mode = carousel.mode();
        let position = if carousel.is_empty() { 0 } else { carousel.centered() + 1 };

        let mut text = format!(
            " {} | {}/{}",
            mode.label().to_uppercase(),
            position,
            carousel.len()
        );
        if mode == DrawMode::NoReplace {
            text.push_str(&format!(" | drawn {}", carousel.view().progress()));
        }
        if let Some(msg) = &app.status_message {
            text.push_str(" | ");
            text.push_str(msg);
        }
        text
    }
}
