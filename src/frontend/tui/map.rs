use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::colors::{self, GOLD, MUTED};
use crate::content::ContentCatalog;
use crate::core::zone::{Point, ZoneId, ZoneTable};

/// Top-down zone map projected onto terminal cells
pub struct ZoneMap<'a> {
    zones: &'a ZoneTable,
    catalog: &'a ContentCatalog,
    current: ZoneId,
    cursor: Point,
    /// Cursor recently moved; drawn highlighted
    moving: bool,
    show_labels: bool,
    show_legend: bool,
    cursor_color: Color,
    path_color: Color,
}

impl<'a> ZoneMap<'a> {
    pub fn new(zones: &'a ZoneTable, catalog: &'a ContentCatalog, current: ZoneId, cursor: Point) -> Self {
        Self {
            zones,
            catalog,
            current,
            cursor,
            moving: false,
            show_labels: true,
            show_legend: true,
            cursor_color: Color::Yellow,
            path_color: MUTED,
        }
    }

    pub fn moving(mut self, moving: bool) -> Self {
        self.moving = moving;
        self
    }

    pub fn labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    pub fn legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// Paths between consecutive zones, underneath everything
    fn draw_paths(&self, buf: &mut Buffer, area: Rect) {
        let style = Style::default().fg(self.path_color);
        let anchors: Vec<(u16, u16)> = self
            .zones
            .iter()
            .map(|z| cell_for(z.position, area))
            .collect();

        for pair in anchors.windows(2) {
            let (x0, y0) = (pair[0].0 as i32, pair[0].1 as i32);
            let (x1, y1) = (pair[1].0 as i32, pair[1].1 as i32);
            let steps = (x1 - x0).abs().max((y1 - y0).abs());
            for step in 1..steps {
                let t = step as f64 / steps as f64;
                let x = (x0 as f64 + (x1 - x0) as f64 * t).round() as u16;
                let y = (y0 as f64 + (y1 - y0) as f64 * t).round() as u16;
                if buf[(x, y)].symbol() == " " {
                    buf.set_string(x, y, "·", style);
                }
            }
        }
    }

    fn draw_zones(&self, buf: &mut Buffer, area: Rect) {
        // Labels first so that icons always stay visible
        if self.show_labels {
            for zone in self.zones.iter() {
                let (x, y) = cell_for(zone.position, area);
                let label_x = x + 2;
                let right = area.x + area.width;
                if label_x < right {
                    let style = if zone.id == self.current {
                        Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(MUTED)
                    };
                    buf.set_stringn(label_x, y, &zone.name, (right - label_x) as usize, style);
                }
            }
        }

        for zone in self.zones.iter() {
            let content = self.catalog.zone(zone.id);
            let (x, y) = cell_for(zone.position, area);
            let mut style = Style::default().fg(colors::zone_color(&content.color));
            if zone.id == self.current {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            buf.set_string(x, y, &content.icon, style);
        }
    }

    fn draw_cursor(&self, buf: &mut Buffer, area: Rect) {
        let (x, y) = cell_for(self.cursor, area);
        let (symbol, style) = if self.moving {
            (
                "◈",
                Style::default()
                    .fg(self.cursor_color)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("◆", Style::default().fg(self.cursor_color))
        };
        buf.set_string(x, y, symbol, style);
    }

    fn draw_legend(&self, buf: &mut Buffer, area: Rect) {
        let legend = Line::from(vec![
            Span::styled("◆", Style::default().fg(self.cursor_color)),
            Span::raw(" You  "),
            Span::styled("·", Style::default().fg(self.path_color)),
            Span::raw(" Path"),
        ]);
        let y = area.y + area.height - 1;
        let x = area.x + area.width.saturating_sub(legend.width() as u16);
        buf.set_line(x, y, &legend, area.width);
    }
}

/// Cell covering a map point; the inverse of `Viewport::to_percent`
pub fn cell_for(point: Point, area: Rect) -> (u16, u16) {
    let p = Point::clamped(point.x, point.y);
    let col = ((p.x / Point::MAX) * area.width as f64) as u16;
    let row = ((p.y / Point::MAX) * area.height as f64) as u16;
    (
        area.x + col.min(area.width.saturating_sub(1)),
        area.y + row.min(area.height.saturating_sub(1)),
    )
}

impl Widget for ZoneMap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 3 {
            return;
        }

        self.draw_paths(buf, area);
        self.draw_zones(buf, area);
        if self.show_legend && area.height > 6 {
            self.draw_legend(buf, area);
        }
        self.draw_cursor(buf, area);
    }
}
