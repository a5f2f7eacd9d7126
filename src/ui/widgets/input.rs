//! Input bar: prompt, draft text or placeholder, and cursor.

use ratatui::{
    layout::Position,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::colors;

pub const PLACEHOLDER: &str = "Type your question here...";
const PROMPT: &str = " ▸ ";

pub fn render(
    f: &mut Frame,
    buffer: &str,
    cursor_pos: usize,
    area: ratatui::prelude::Rect,
) {
    let text = if buffer.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(colors::MUTED))
    } else {
        Span::styled(buffer, Style::default().fg(colors::TEXT))
    };
    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
        text,
    ]);
    let block = Block::default()
        .style(Style::default().bg(colors::ELEVATED))
        .borders(Borders::TOP)
        .border_style(Style::default().fg(colors::BORDER))
        .border_type(BorderType::Plain);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(line), inner);

    let before = buffer.get(..cursor_pos).map(|s| s.chars().count()).unwrap_or(0);
    let cursor_x = inner.x + PROMPT.chars().count() as u16 + before as u16;
    let x = cursor_x.min(inner.x + inner.width.saturating_sub(1));
    f.set_cursor_position(Position { x, y: inner.y });
}
