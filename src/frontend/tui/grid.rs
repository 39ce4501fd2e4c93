//! Browse view: a rotating banner over rows of cards

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};
use std::time::Instant;

use super::colors::{BROWN, GOLD, MUTED, PARCHMENT};
use super::overlays;
use super::panels::PanelContext;
use crate::content::Tile;
use crate::core::AppCore;
use crate::data::ui_state::HitRegions;

const BANNER_HEIGHT: u16 = 5;
const TILE_WIDTH: u16 = 26;
const TILE_HEIGHT: u16 = 4;
/// Row title plus a line of tiles
const ROW_HEIGHT: u16 = TILE_HEIGHT + 1;

/// First index to draw so that `selected` stays within `visible` slots
fn window_start(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return selected;
    }
    selected.saturating_sub(visible - 1)
}

fn render_banner(core: &AppCore, area: Rect, buf: &mut Buffer) {
    let profile = &core.catalog.profile;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(BROWN));
    let inner = block.inner(area);
    block.render(area, buf);

    let highlight = if profile.highlights.is_empty() {
        profile.tagline.clone()
    } else {
        let idx = core.ui.banner_index() % profile.highlights.len();
        format!("★ {}", profile.highlights[idx])
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                profile.name.clone(),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", profile.title), Style::default().fg(MUTED)),
        ]),
        Line::from(Span::styled(highlight, Style::default().fg(PARCHMENT))),
    ];
    Paragraph::new(lines).render(inner, buf);
}

fn render_tile(tile: &Tile, selected: bool, area: Rect, buf: &mut Buffer) {
    let border = if selected {
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(BROWN)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border);
    let inner = block.inner(area);
    block.render(area, buf);

    let lines = vec![
        Line::from(Span::styled(
            tile.title.clone(),
            Style::default().fg(PARCHMENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(tile.subtitle.clone(), Style::default().fg(MUTED))),
    ];
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

fn render_rows(core: &AppCore, area: Rect, buf: &mut Buffer) {
    let rows = &core.catalog.grid.rows;
    let visible_rows = (area.height / ROW_HEIGHT) as usize;
    let visible_tiles = ((area.width + 1) / (TILE_WIDTH + 1)).max(1) as usize;
    let first_row = window_start(core.ui.grid_row, visible_rows);

    for (slot, (row_idx, row)) in rows
        .iter()
        .enumerate()
        .skip(first_row)
        .take(visible_rows)
        .enumerate()
    {
        let y = area.y + slot as u16 * ROW_HEIGHT;
        let selected_row = row_idx == core.ui.grid_row;
        let title_style = if selected_row {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(PARCHMENT)
        };
        buf.set_stringn(area.x, y, &row.title, area.width as usize, title_style);

        let tiles = core.catalog.tiles(row.zone);
        let first_tile = if selected_row {
            window_start(core.ui.grid_col, visible_tiles)
        } else {
            0
        };
        for (slot, (tile_idx, tile)) in tiles
            .iter()
            .enumerate()
            .skip(first_tile)
            .take(visible_tiles)
            .enumerate()
        {
            let x = area.x + slot as u16 * (TILE_WIDTH + 1);
            let width = TILE_WIDTH.min(area.x + area.width - x);
            let tile_area = Rect::new(x, y + 1, width, TILE_HEIGHT);
            render_tile(tile, selected_row && tile_idx == core.ui.grid_col, tile_area, buf);
        }
    }
}

pub fn render(core: &AppCore, _now: Instant, area: Rect, buf: &mut Buffer) -> HitRegions {
    let [banner, rows] = Layout::vertical([
        Constraint::Length(BANNER_HEIGHT),
        Constraint::Fill(1),
    ])
    .areas(area);

    render_banner(core, banner, buf);
    render_rows(core, rows, buf);

    if let Some(zone) = core.ui.detail {
        let ctx = PanelContext {
            catalog: &core.catalog,
            avatar: &core.avatar,
            mode: core.mode(),
        };
        overlays::render_detail(zone, &ctx, core.ui.panel_scroll, area, buf);
    }

    HitRegions::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::content::tests::catalog;
    use crate::content::Avatar;
    use crate::core::actions::{Action, Direction};
    use crate::core::zone::ZoneId;
    use std::time::Duration;

    fn screen(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn grid_core() -> AppCore {
        AppCore::new(Config::default(), catalog(), Avatar::placeholder(), None, 120).unwrap()
    }

    #[test]
    fn test_window_start() {
        assert_eq!(window_start(0, 3), 0);
        assert_eq!(window_start(2, 3), 0);
        assert_eq!(window_start(5, 3), 3);
        assert_eq!(window_start(4, 0), 4);
    }

    #[test]
    fn test_rows_and_banner() {
        let core = grid_core();
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        render(&core, Instant::now(), area, &mut buf);

        let text = screen(&buf);
        assert!(text.contains("About Mohammed"));
        assert!(text.contains("Top Certifications"));
        assert!(text.contains("★ AWS Certified DevOps Engineer - Professional"));
        // Selected tile uses a thick border
        assert_eq!(buf[(0, BANNER_HEIGHT + 1)].symbol(), "┏");
    }

    #[test]
    fn test_banner_rotates() {
        let mut core = grid_core();
        let start = Instant::now();
        core.tick(start);
        core.tick(start + Duration::from_secs(5));

        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        render(&core, start, area, &mut buf);
        assert!(screen(&buf).contains("★ Microsoft Certified: Azure AI Engineer Associate"));
    }

    #[test]
    fn test_detail_overlay() {
        let mut core = grid_core();
        let now = Instant::now();
        core.handle_action(Action::GridMove(Direction::Down), now);
        core.handle_action(Action::OpenDetail, now);
        assert_eq!(core.ui.detail, Some(ZoneId::Certifications));

        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        render(&core, now, area, &mut buf);
        assert!(screen(&buf).contains("Esc to close"));
    }
}
