//! Feed view: one section at a time as a post card

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};
use std::time::Instant;

use super::colors::{BROWN, GOLD, MUTED, PARCHMENT};
use super::overlays::{self, centered};
use super::panels::{self, PanelContext};
use crate::core::AppCore;
use crate::data::ui_state::HitRegions;

const CARD_WIDTH: u16 = 84;

/// "●●○○○○" style position marker
fn progress_dots(current: usize, total: usize) -> String {
    (0..total)
        .map(|i| if i == current { '●' } else { '○' })
        .collect()
}

pub fn render(core: &AppCore, now: Instant, area: Rect, buf: &mut Buffer) -> HitRegions {
    if area.width == 0 || area.height == 0 {
        return HitRegions::default();
    }
    let sections = &core.catalog.feed.sections;
    let Some(zone) = core.feed_zone() else {
        buf.set_string(area.x, area.y, "Nothing to show", Style::default().fg(MUTED));
        return HitRegions::default();
    };
    let content = core.catalog.zone(zone);
    let profile = &core.catalog.profile;

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let position = format!("{}/{}", core.ui.feed_index + 1, sections.len());
    Line::from(vec![
        Span::styled(
            profile.name.clone(),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", profile.title), Style::default().fg(MUTED)),
    ])
    .render(header, buf);
    let marker = format!("{}  {}", progress_dots(core.ui.feed_index, sections.len()), position);
    let marker_width = marker.chars().count() as u16;
    if header.height > 0 && marker_width < header.width {
        buf.set_string(
            header.x + header.width - marker_width,
            header.y,
            &marker,
            Style::default().fg(PARCHMENT),
        );
    }

    let card_area = centered(body, CARD_WIDTH, body.height);
    let liked = core.ui.is_liked(zone);
    let like_label = if liked { " ♥ Liked " } else { " ♡ Like (l) " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BROWN))
        .title(Span::styled(
            format!(" {} {} ", content.icon, content.heading()),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Span::styled(
            like_label,
            Style::default().fg(if liked { Color::Red } else { MUTED }),
        ));
    let inner = block.inner(card_area);
    block.render(card_area, buf);

    let ctx = PanelContext {
        catalog: &core.catalog,
        avatar: &core.avatar,
        mode: core.mode(),
    };
    panels::render_zone(zone, &ctx, core.ui.panel_scroll, inner, buf);

    if core.ui.like_animating(now) && inner.width > 0 && inner.height > 0 {
        let x = inner.x + inner.width / 2;
        let y = inner.y + inner.height / 2;
        buf.set_string(
            x,
            y,
            "♥",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        );
    }

    Line::from(Span::styled(
        "j/k scroll  s sections  l like",
        Style::default().fg(MUTED),
    ))
    .render(footer, buf);

    if core.ui.show_section_sheet {
        overlays::render_section_sheet(&core.catalog, core.ui.feed_index, area, buf);
    }

    HitRegions::default()
}
