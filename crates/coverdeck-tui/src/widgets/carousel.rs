use coverdeck_core::config::UiConfig;
use coverdeck_core::deck::MediaKind;
use coverdeck_core::gesture::{CardRegion, HitTarget};
use coverdeck_core::nav::SlotPlacement;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::truncate;
use crate::app::App;
use crate::hit::HitMap;
use crate::theme::Theme;
use crate::view::CardNode;

/// Rows a card loses per step away from the center, up to three steps
const SHRINK_PER_STEP: u16 = 2;

pub struct CarouselWidget;

impl CarouselWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, hits: &mut HitMap) {
        hits.set_carousel_area(area);
        let view = app.carousel.view();
        let theme = &app.theme;

        if view.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "The deck is empty",
                Style::default().fg(theme.grey1),
            )))
            .alignment(Alignment::Center);
            let row = Rect::new(area.x, area.y + area.height / 2, area.width, area.height.min(1));
            frame.render_widget(empty, row);
            return;
        }

        let centered = app.carousel.centered() as i64;
        for card in view.paint_order() {
            let Some(placement) = card.placement else {
                continue;
            };
            let Some(rect) = card_rect(area, placement, &app.ui) else {
                continue;
            };
            let Ok(slot) = usize::try_from(centered + placement.offset) else {
                continue;
            };
            render_card(frame, rect, card, placement, slot, theme, hits);
        }
    }
}

/// Screen rectangle of a card at `placement`, clipped to `area`.
///
/// Cards sit `card_spacing` columns apart and lose height the further they
/// are from the center. Hidden or fully off-screen cards get `None`.
pub fn card_rect(area: Rect, placement: SlotPlacement, ui: &UiConfig) -> Option<Rect> {
    if placement.hidden || area.is_empty() {
        return None;
    }

    let width = i64::from(ui.card_width.min(area.width));
    let center_x = i64::from(area.x) + i64::from(area.width) / 2;
    let left = center_x + placement.offset * i64::from(ui.card_spacing) - width / 2;
    let clip_left = left.max(i64::from(area.x));
    let clip_right = (left + width).min(i64::from(area.right()));
    if clip_right <= clip_left {
        return None;
    }

    let steps = placement.distance().min(3) as u16;
    let height = area
        .height
        .saturating_sub(steps * SHRINK_PER_STEP)
        .max(area.height.min(5));
    let top = area.y + (area.height - height) / 2;

    Some(Rect::new(
        clip_left as u16,
        top,
        (clip_right - clip_left) as u16,
        height,
    ))
}

fn render_card(
    frame: &mut Frame,
    rect: Rect,
    card: &CardNode,
    placement: SlotPlacement,
    slot: usize,
    theme: &Theme,
    hits: &mut HitMap,
) {
    frame.render_widget(Clear, rect);
    hits.push_card(rect, HitTarget::Card { slot, region: CardRegion::Body });

    let revealed = card.reveal.is_revealed();
    let border_color = if placement.is_center {
        theme.focused
    } else if placement.outside_window {
        theme.grey0
    } else {
        theme.grey2
    };
    let mut style = Style::default().bg(if revealed { theme.card_front } else { theme.card_back });
    if placement.outside_window {
        style = style.add_modifier(Modifier::DIM);
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(style);
    if placement.is_center {
        block = block.border_type(BorderType::Thick);
    }
    if card.drawn {
        block = block.title_bottom(
            Line::from(Span::styled(" ✓ drawn ", Style::default().fg(theme.drawn))).right_aligned(),
        );
    }

    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    if inner.is_empty() {
        return;
    }

    if revealed {
        render_front(frame, inner, card, slot, theme, hits);
    } else {
        render_back(frame, inner, theme);
    }
}

fn render_back(frame: &mut Frame, inner: Rect, theme: &Theme) {
    let pattern = "╱".repeat(inner.width as usize);
    let middle = inner.height / 2;
    let lines: Vec<Line> = (0..inner.height)
        .map(|row| {
            if row == middle {
                Line::from(Span::styled(
                    "?",
                    Style::default().fg(theme.focused).add_modifier(Modifier::BOLD),
                ))
                .centered()
            } else {
                Line::from(Span::styled(pattern.clone(), Style::default().fg(theme.grey0)))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_front(
    frame: &mut Frame,
    inner: Rect,
    card: &CardNode,
    slot: usize,
    theme: &Theme,
    hits: &mut HitMap,
) {
    hits.push_card(inner, HitTarget::Card { slot, region: CardRegion::Front });
    let width = inner.width as usize;
    let item = &card.item;

    let (icon, color) = match item.media_kind {
        MediaKind::Image => ("▣ image", theme.info),
        MediaKind::Video => ("▶ video", theme.video),
    };
    let mut lines = vec![Line::from(Span::styled(icon, Style::default().fg(color)))];
    if let Some(name) = item.sources.src.rsplit('/').next().filter(|s| !s.is_empty()) {
        lines.push(Line::from(Span::styled(
            truncate(name, width),
            Style::default().fg(theme.grey1),
        )));
    }

    let show_link = card.reveal.overlay_visible && item.link.is_some() && inner.height > 1;
    if card.reveal.overlay_visible {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            item.display_title().to_string(),
            Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
        )));
        if let Some(prompt) = &item.prompt {
            lines.push(Line::from(Span::styled(
                prompt.clone(),
                Style::default().fg(theme.fg0),
            )));
        }
    }

    let body = if show_link {
        Rect::new(inner.x, inner.y, inner.width, inner.height - 1)
    } else {
        inner
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), body);

    if show_link {
        let row = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
        let link = Paragraph::new(Line::from(Span::styled(
            truncate("↗ open link", width),
            Style::default().fg(theme.link).add_modifier(Modifier::UNDERLINED),
        )));
        frame.render_widget(link, row);
        hits.push_card(row, HitTarget::Card { slot, region: CardRegion::Link });
    }
}
