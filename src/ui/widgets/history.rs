//! History list: every exchange, newest first, texts shown verbatim.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::session::Exchange;
use crate::ui::theme::{colors, EXCHANGE_GAP};

pub const QUESTION_LABEL: &str = "Question: ";
pub const ANSWER_LABEL: &str = "Answer: ";
const EMPTY_HINT: &str = "No questions yet. Type one below and press Enter.";

/// Project the history into display lines, in stored order.
///
/// Multi-line texts keep their line breaks; continuation lines are indented
/// under the label. Nothing is truncated or interpreted.
pub fn history_lines(history: &[Exchange]) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for (i, exchange) in history.iter().enumerate() {
        if i > 0 {
            for _ in 0..EXCHANGE_GAP {
                lines.push(Line::from(""));
            }
        }
        push_labelled(
            &mut lines,
            QUESTION_LABEL,
            Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
            &exchange.question,
            Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD),
        );
        let answer_style = if exchange.is_error() {
            Style::default().fg(colors::ERROR)
        } else {
            Style::default().fg(colors::TEXT)
        };
        push_labelled(
            &mut lines,
            ANSWER_LABEL,
            Style::default().fg(colors::ACCENT_SOFT).add_modifier(Modifier::BOLD),
            &exchange.answer,
            answer_style,
        );
    }
    lines
}

fn push_labelled<'a>(
    lines: &mut Vec<Line<'a>>,
    label: &'static str,
    label_style: Style,
    text: &'a str,
    text_style: Style,
) {
    let indent = " ".repeat(label.chars().count());
    for (i, part) in text.split('\n').enumerate() {
        let lead = if i == 0 {
            Span::styled(label, label_style)
        } else {
            Span::raw(indent.clone())
        };
        lines.push(Line::from(vec![lead, Span::styled(part, text_style)]));
    }
}

fn block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(colors::BG))
}

fn paragraph(history: &[Exchange]) -> Paragraph<'_> {
    let mut lines = history_lines(history);
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(EMPTY_HINT, Style::default().fg(colors::MUTED))));
    }
    Paragraph::new(lines)
        .style(Style::default().fg(colors::TEXT).bg(colors::BG))
        .wrap(Wrap { trim: false })
}

/// Largest scroll offset that still fills the panel, counted in wrapped rows.
pub fn max_scroll(history: &[Exchange], area: Rect) -> usize {
    let inner = block().inner(area);
    if inner.width == 0 {
        return 0;
    }
    paragraph(history)
        .line_count(inner.width)
        .saturating_sub(inner.height as usize)
}

pub fn render(f: &mut Frame, history: &[Exchange], scroll: usize, area: Rect) {
    let scroll = scroll.min(max_scroll(history, area));
    let block = block();
    let inner = block.inner(area);
    f.render_widget(block, area);

    let para = paragraph(history).scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(para, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use uuid::Uuid;

    fn exchange(question: &str, answer: &str) -> Exchange {
        Exchange {
            id: Uuid::new_v4(),
            question: question.to_string(),
            answer: answer.to_string(),
            failed: false,
        }
    }

    fn failed(question: &str, answer: &str) -> Exchange {
        Exchange { failed: true, ..exchange(question, answer) }
    }

    fn rows(history: &[Exchange], scroll: usize, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, history, scroll, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn empty_history_projects_nothing() {
        assert!(history_lines(&[]).is_empty());
    }

    #[test]
    fn keeps_stored_order_and_verbatim_text() {
        let history = vec![exchange("2+2?", "4"), failed("x", "Error: timeout")];
        let lines = history_lines(&history);
        assert_eq!(
            text(&lines),
            vec![
                "Question: 2+2?",
                "Answer: 4",
                "",
                "Question: x",
                "Answer: Error: timeout",
            ]
        );
    }

    #[test]
    fn multi_line_answers_are_indented_not_rewritten() {
        let history = vec![exchange("list?", "**a**\n- b\n\n`c`")];
        let lines = history_lines(&history);
        assert_eq!(
            text(&lines),
            vec![
                "Question: list?",
                "Answer: **a**",
                "        - b",
                "        ",
                "        `c`",
            ]
        );
    }

    #[test]
    fn failed_answers_use_error_colour() {
        let history = vec![failed("q", "Error: boom"), exchange("q", "fine")];
        let lines = history_lines(&history);
        assert_eq!(lines[1].spans[1].style.fg, Some(colors::ERROR));
        assert_eq!(lines[4].spans[1].style.fg, Some(colors::TEXT));
    }

    #[test]
    fn successful_answer_starting_with_error_is_not_coloured() {
        let history = vec![exchange("what does the log say?", "Error: disk full, it says.")];
        let lines = history_lines(&history);
        assert_eq!(lines[1].spans[1].style.fg, Some(colors::TEXT));
    }

    #[test]
    fn end_of_long_answer_is_reachable() {
        let mut answer = (0..400).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
        answer.push_str(" TAILMARK");
        let history = vec![exchange("long?", &answer)];
        let area = Rect::new(0, 0, 40, 12);

        let max = max_scroll(&history, area);
        // 400 words wrap to far more rows than the 10-row panel holds.
        assert!(max > 50, "max scroll {max}");

        let top = rows(&history, 0, 40, 12);
        assert!(top.iter().any(|r| r.contains("Question: long?")));
        assert!(!top.iter().any(|r| r.contains("TAILMARK")));

        let bottom = rows(&history, max, 40, 12);
        assert!(bottom.iter().any(|r| r.contains("TAILMARK")));
        // Offsets past the end draw the same rows as the last valid one.
        assert_eq!(rows(&history, max + 10_000, 40, 12), bottom);
    }

    #[test]
    fn short_history_does_not_scroll() {
        let history = vec![exchange("2+2?", "4")];
        assert_eq!(max_scroll(&history, Rect::new(0, 0, 40, 12)), 0);
        assert_eq!(max_scroll(&[], Rect::new(0, 0, 40, 12)), 0);
    }
}
