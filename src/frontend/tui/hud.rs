//! Level, HP, MP and EXP bars shown above the exploration views.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::colors::{EXPERIENCE, GOLD, HEALTH, MANA, PARCHMENT};
use crate::core::progression::ProgressionState;

/// A single-row bar with its value centred on it
pub struct StatBar {
    label: String,
    current: u32,
    max: u32,
    fill: Color,
    text_color: Color,
}

impl StatBar {
    pub fn new(label: &str, current: u32, max: u32) -> Self {
        Self {
            label: label.to_string(),
            current,
            max,
            fill: Color::Green,
            text_color: Color::White,
        }
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    /// Number of cells filled out of `width`
    fn split_position(&self, width: u16) -> u16 {
        if self.max == 0 {
            return 0;
        }
        let ratio = (self.current as f64 / self.max as f64).clamp(0.0, 1.0);
        (ratio * width as f64) as u16
    }
}

impl Widget for StatBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let label = format!("{} ", self.label);
        let label_width = (label.chars().count() as u16).min(area.width);
        buf.set_stringn(
            area.x,
            area.y,
            &label,
            label_width as usize,
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        );

        let bar = Rect::new(
            area.x + label_width,
            area.y,
            area.width - label_width,
            1,
        );
        if bar.width == 0 {
            return;
        }

        let split = self.split_position(bar.width);
        for i in 0..bar.width {
            let cell = &mut buf[(bar.x + i, bar.y)];
            cell.set_char(' ');
            if i < split {
                cell.set_bg(self.fill);
            } else {
                cell.set_bg(Color::Black);
            }
        }

        let display = format!("{}/{}", self.current, self.max);
        let text_width = display.chars().count() as u16;
        if text_width <= bar.width {
            let start = (bar.width - text_width) / 2;
            for (i, c) in display.chars().enumerate() {
                let x = bar.x + start + i as u16;
                buf[(x, bar.y)].set_char(c).set_fg(self.text_color);
            }
        }
    }
}

/// Level badge plus the three bars, laid out on one row
pub struct Hud<'a> {
    progression: &'a ProgressionState,
    quests_done: usize,
    quests_total: usize,
}

impl<'a> Hud<'a> {
    pub fn new(progression: &'a ProgressionState, quests_total: usize) -> Self {
        Self {
            progression,
            quests_done: progression.completed_count(),
            quests_total,
        }
    }
}

impl Widget for Hud<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let p = self.progression;

        let [badge, hp, mp, exp] = Layout::horizontal([
            Constraint::Length(18),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .spacing(1)
        .areas(Rect { height: 1, ..area });

        Line::from(vec![
            Span::styled(
                format!("Lv {}", p.level),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ◆ {}/{}", self.quests_done, self.quests_total),
                Style::default().fg(PARCHMENT),
            ),
        ])
        .render(badge, buf);

        StatBar::new("HP", p.health, p.max_health)
            .fill(HEALTH)
            .render(hp, buf);
        StatBar::new("MP", p.mana, p.max_mana)
            .fill(MANA)
            .render(mp, buf);
        StatBar::new("EXP", p.experience, p.experience_to_next_level)
            .fill(EXPERIENCE)
            .render(exp, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::progression::ProgressionRules;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_stat_bar_fill() {
        let area = Rect::new(0, 0, 13, 1);
        let mut buf = Buffer::empty(area);
        StatBar::new("HP", 50, 100).fill(Color::Red).render(area, &mut buf);

        // "HP " then a 10 cell bar, half filled
        assert_eq!(buf[(3, 0)].bg, Color::Red);
        assert_eq!(buf[(7, 0)].bg, Color::Red);
        assert_eq!(buf[(8, 0)].bg, Color::Black);
        assert!(row(&buf, 0).contains("50/100"));
    }

    #[test]
    fn test_stat_bar_zero_max() {
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        StatBar::new("MP", 5, 0).render(area, &mut buf);
        assert_eq!(buf[(4, 0)].bg, Color::Black);
    }

    #[test]
    fn test_hud_shows_level_and_bars() {
        let state = ProgressionState::new(&ProgressionRules::default());
        let area = Rect::new(0, 0, 90, 1);
        let mut buf = Buffer::empty(area);
        Hud::new(&state, 5).render(area, &mut buf);

        let text = row(&buf, 0);
        assert!(text.contains("Lv 1"));
        assert!(text.contains("0/5"));
        assert!(text.contains("100/100"));
        assert!(text.contains("50/50"));
        assert!(text.contains("0/100"));
    }
}
