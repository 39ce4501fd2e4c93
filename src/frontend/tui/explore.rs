//! Adventure view: HUD, world map, zone panel and dialog box

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Widget},
};
use std::time::Instant;

use super::colors::{BROWN, GOLD};
use super::dialog::render_dialog;
use super::hud::Hud;
use super::map::ZoneMap;
use super::overlays;
use super::panels::{self, PanelContext};
use crate::core::progression::Milestone;
use crate::core::AppCore;
use crate::data::ui_state::{HitRegions, Viewport};

const DIALOG_HEIGHT: u16 = 6;

fn framed(title: &str, area: Rect, buf: &mut Buffer) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BROWN))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

pub fn render(core: &AppCore, now: Instant, area: Rect, buf: &mut Buffer) -> HitRegions {
    let mut regions = HitRegions::default();
    let nav = &core.navigator;
    let dialog = nav.dialog();

    let dialog_height = if dialog.is_some() { DIALOG_HEIGHT } else { 0 };
    let [hud_area, body, dialog_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(dialog_height),
    ])
    .areas(area);

    Hud::new(nav.progression(), Milestone::COUNT).render(hud_area, buf);

    let panel_area = if core.ui.show_map {
        let [map_area, panel_area] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(body);

        let inner = framed("World Map", map_area, buf);
        ZoneMap::new(nav.zones(), &core.catalog, nav.current_zone(), nav.cursor())
            .moving(core.ui.is_moving(now))
            .render(inner, buf);
        regions.map = Some(Viewport::new(inner.x, inner.y, inner.width, inner.height));
        panel_area
    } else {
        body
    };

    let current = core.catalog.zone(nav.current_zone());
    let inner = framed(&current.description, panel_area, buf);
    let ctx = PanelContext {
        catalog: &core.catalog,
        avatar: &core.avatar,
        mode: core.mode(),
    };
    panels::render_zone(nav.current_zone(), &ctx, core.ui.panel_scroll, inner, buf);

    if let Some(dialog) = dialog {
        regions.choices = render_dialog(dialog, dialog_area, buf);
    }

    if core.ui.show_inventory {
        overlays::render_inventory(&core.catalog, area, buf);
    }
    if core.ui.show_quest_log {
        overlays::render_quest_log(nav.progression(), area, buf);
    }

    regions
}
