use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::colors::{BROWN, GOLD, PARCHMENT};
use crate::core::dialog::Dialog;
use crate::data::ui_state::Viewport;

/// Speaker box with numbered choices at the bottom
///
/// Returns the row of each choice so clicks can be resolved.
pub fn render_dialog(dialog: &Dialog, area: Rect, buf: &mut Buffer) -> Vec<(Viewport, usize)> {
    if area.width < 4 || area.height < 3 {
        return Vec::new();
    }

    Clear.render(area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BROWN))
        .title(Span::styled(
            format!(" {} ", dialog.speaker),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    block.render(area, buf);

    let choice_rows = (dialog.choices.len() as u16).min(inner.height.saturating_sub(1));
    let message_area = Rect {
        height: inner.height - choice_rows,
        ..inner
    };
    Paragraph::new(dialog.text.as_str())
        .style(Style::default().fg(PARCHMENT))
        .wrap(Wrap { trim: true })
        .render(message_area, buf);

    let mut regions = Vec::new();
    let first_row = inner.y + inner.height - choice_rows;
    for (idx, choice) in dialog.choices.iter().take(choice_rows as usize).enumerate() {
        let row = first_row + idx as u16;
        let line = Line::from(vec![
            Span::styled(
                format!("[{}] ", idx + 1),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("Travel to {}", choice.label), Style::default().fg(PARCHMENT)),
        ]);
        buf.set_line(inner.x, row, &line, inner.width);
        regions.push((Viewport::new(inner.x, row, inner.width, 1), idx));
    }
    regions
}
