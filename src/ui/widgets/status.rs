//! Status bar: pending requests + shortcuts.

use ratatui::{
    style::Style,
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::colors;

const SHORTCUTS: &str = " Enter send  ↑↓ scroll  Ctrl+L clear  Esc quit ";

fn left_text(pending: usize, spinner_char: char) -> String {
    match pending {
        0 => " Ready".to_string(),
        1 => format!(" {spinner_char} Waiting for an answer…"),
        n => format!(" {spinner_char} Waiting for {n} answers…"),
    }
}

pub fn render(
    f: &mut Frame,
    area: ratatui::prelude::Rect,
    pending: usize,
    spinner_char: char,
) {
    let left = left_text(pending, spinner_char);
    let width = area.width as usize;
    let pad = width.saturating_sub(left.chars().count() + SHORTCUTS.chars().count());
    let line = format!("{}{}{}", left, " ".repeat(pad), SHORTCUTS);
    let span = Span::styled(
        line,
        Style::default().fg(colors::MUTED).bg(colors::ELEVATED),
    );
    f.render_widget(Paragraph::new(span), area);
}

#[cfg(test)]
mod tests {
    use super::left_text;

    #[test]
    fn reports_pending_count() {
        assert_eq!(left_text(0, '⠋'), " Ready");
        assert_eq!(left_text(1, '⠋'), " ⠋ Waiting for an answer…");
        assert_eq!(left_text(3, '⠙'), " ⠙ Waiting for 3 answers…");
    }
}
