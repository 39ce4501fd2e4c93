//! Pocket view for narrow terminals
//!
//! The same navigator as the adventure view, stacked vertically: header,
//! stat bars, the zone panel, a small map and a taskbar of zone icons.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use std::time::Instant;

use super::colors::{self, BROWN, GOLD, MUTED};
use super::dialog::render_dialog;
use super::hud::Hud;
use super::map::ZoneMap;
use super::overlays;
use super::panels::{self, PanelContext};
use crate::core::progression::Milestone;
use crate::core::zone::ZoneId;
use crate::core::AppCore;
use crate::data::ui_state::{HitRegions, Viewport};

const MAP_HEIGHT: u16 = 9;
const DIALOG_HEIGHT: u16 = 5;

pub fn render(core: &AppCore, now: Instant, area: Rect, buf: &mut Buffer) -> HitRegions {
    let mut regions = HitRegions::default();
    let nav = &core.navigator;
    let current = core.catalog.zone(nav.current_zone());
    let dialog = nav.dialog();

    let map_height = if area.height >= 24 { MAP_HEIGHT } else { 0 };
    let dialog_height = if dialog.is_some() && area.height >= 16 {
        DIALOG_HEIGHT
    } else {
        0
    };
    let [header, hud, panel, dialog_area, map_area, taskbar] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(dialog_height),
        Constraint::Length(map_height),
        Constraint::Length(1),
    ])
    .areas(area);

    Line::from(vec![
        Span::styled(
            format!("{} ", current.icon),
            Style::default().fg(colors::zone_color(&current.color)),
        ),
        Span::styled(
            current.name.clone(),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ),
    ])
    .render(header, buf);

    Hud::new(nav.progression(), Milestone::COUNT).render(hud, buf);

    let ctx = PanelContext {
        catalog: &core.catalog,
        avatar: &core.avatar,
        mode: core.mode(),
    };
    panels::render_zone(nav.current_zone(), &ctx, core.ui.panel_scroll, panel, buf);

    if let Some(dialog) = dialog {
        regions.choices = render_dialog(dialog, dialog_area, buf);
    }

    if map_area.height > 0 {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(BROWN));
        let inner = block.inner(map_area);
        block.render(map_area, buf);
        ZoneMap::new(nav.zones(), &core.catalog, nav.current_zone(), nav.cursor())
            .moving(core.ui.is_moving(now))
            .labels(false)
            .legend(false)
            .render(inner, buf);
        regions.map = Some(Viewport::new(inner.x, inner.y, inner.width, inner.height));
    }

    regions.taskbar = render_taskbar(core, taskbar, buf);

    if core.ui.show_inventory {
        overlays::render_inventory(&core.catalog, area, buf);
    }
    if core.ui.show_quest_log {
        overlays::render_quest_log(nav.progression(), area, buf);
    }

    regions
}

/// One equal-width button per zone in the mobile order
fn render_taskbar(core: &AppCore, area: Rect, buf: &mut Buffer) -> Vec<(Viewport, ZoneId)> {
    let order = &core.catalog.mobile.order;
    if order.is_empty() || area.width == 0 || area.height == 0 {
        return Vec::new();
    }

    let current = core.navigator.current_zone();
    let cell_width = (area.width / order.len() as u16).max(1);
    let mut buttons = Vec::with_capacity(order.len());

    for (idx, zone) in order.iter().enumerate() {
        let x = area.x + idx as u16 * cell_width;
        if x >= area.x + area.width {
            break;
        }
        let width = if idx == order.len() - 1 {
            area.x + area.width - x
        } else {
            cell_width
        };

        let content = core.catalog.zone(*zone);
        let style = if *zone == current {
            Style::default()
                .fg(GOLD)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(MUTED)
        };
        let button = Rect::new(x, area.y, width, 1);
        buf.set_style(button, style);
        let pad = width.saturating_sub(1) / 2;
        buf.set_stringn(x + pad, area.y, &content.icon, (width - pad) as usize, style);

        buttons.push((Viewport::new(x, area.y, width, 1), *zone));
    }
    buttons
}
