//! Popups drawn over the active view: inventory, quest log, the feed's
//! section sheet and the grid's detail view.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::colors::{BROWN, GOLD, MUTED, PARCHMENT};
use super::panels::{self, PanelContext};
use crate::content::ContentCatalog;
use crate::core::progression::{Milestone, ProgressionState};
use crate::core::zone::ZoneId;

/// Rect of at most `width` x `height` centred in `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn framed(title: &str, area: Rect, buf: &mut Buffer) -> Rect {
    Clear.render(area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(BROWN))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Span::styled(" Esc to close ", Style::default().fg(MUTED)));
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

pub fn render_inventory(catalog: &ContentCatalog, area: Rect, buf: &mut Buffer) {
    let popup = centered(area, 56, catalog.inventory.len() as u16 * 2 + 4);
    let inner = framed("Inventory", popup, buf);

    let mut lines = Vec::new();
    for item in &catalog.inventory {
        lines.push(Line::from(Span::styled(
            format!("◇ {}", item.name),
            Style::default().fg(PARCHMENT).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", item.description),
            Style::default().fg(MUTED),
        )));
    }
    if lines.is_empty() {
        lines.push(Line::from("Your pack is empty"));
    }
    Paragraph::new(lines).wrap(Wrap { trim: false }).render(inner, buf);
}

pub fn render_quest_log(progression: &ProgressionState, area: Rect, buf: &mut Buffer) {
    let popup = centered(area, 60, Milestone::COUNT as u16 * 2 + 4);
    let title = format!(
        "Quest Log {}/{}",
        progression.completed_count(),
        Milestone::COUNT
    );
    let inner = framed(&title, popup, buf);

    let mut lines = Vec::new();
    for milestone in Milestone::ALL {
        let done = progression.is_completed(milestone);
        let (mark, style) = if done {
            ("✓", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        } else {
            ("○", Style::default().fg(PARCHMENT))
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", mark), style),
            Span::styled(milestone.title(), style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", milestone.description()),
            Style::default().fg(MUTED),
        )));
    }
    Paragraph::new(lines).render(inner, buf);
}

pub fn render_section_sheet(catalog: &ContentCatalog, current: usize, area: Rect, buf: &mut Buffer) {
    let sections = &catalog.feed.sections;
    let popup = centered(area, 40, sections.len() as u16 + 2);
    let inner = framed("Jump to", popup, buf);

    let lines: Vec<Line> = sections
        .iter()
        .enumerate()
        .map(|(idx, zone)| {
            let content = catalog.zone(*zone);
            let style = if idx == current {
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(PARCHMENT)
            };
            Line::from(vec![
                Span::styled(format!("{} ", idx + 1), Style::default().fg(MUTED)),
                Span::styled(format!("{} {}", content.icon, content.heading()), style),
            ])
        })
        .collect();
    Paragraph::new(lines).render(inner, buf);
}

pub fn render_detail(zone: ZoneId, ctx: &PanelContext<'_>, scroll: u16, area: Rect, buf: &mut Buffer) {
    let popup = centered(
        area,
        area.width.saturating_sub(8).max(20),
        area.height.saturating_sub(4).max(8),
    );
    let title = ctx.catalog.zone(zone).heading().to_string();
    let inner = framed(&title, popup, buf);
    panels::render_zone(zone, ctx, scroll, inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::catalog;
    use crate::core::progression::ProgressionRules;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.y + area.height)
            .map(|y| {
                (area.x..area.x + area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 60, 10), Rect::new(20, 15, 60, 10));
        assert_eq!(centered(area, 200, 80), area);
    }

    #[test]
    fn test_quest_log_marks_completed() {
        let mut progression = ProgressionState::new(&ProgressionRules::default());
        progression.complete(Milestone::SacredScrolls);

        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        render_quest_log(&progression, area, &mut buf);

        let screen = text(&buf);
        assert!(screen.contains("Quest Log 1/5"));
        assert!(screen.contains("✓ Sacred Scrolls"));
        assert!(screen.contains("○ The Artificer's Tale"));
    }

    #[test]
    fn test_inventory_lists_items() {
        let catalog = catalog();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        render_inventory(&catalog, area, &mut buf);
        assert!(text(&buf).contains("Artificer's Compass"));
    }

    #[test]
    fn test_section_sheet_numbers_sections() {
        let catalog = catalog();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        render_section_sheet(&catalog, 0, area, &mut buf);
        let screen = text(&buf);
        assert!(screen.contains("1 ⌂ Home"));
        assert!(screen.contains("6 ✉ Contact"));
    }
}
