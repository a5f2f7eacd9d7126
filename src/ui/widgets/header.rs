//! Header banner: title, version and the model being asked — boxed.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::colors;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const TITLE: &str = "GPT chat ";
const MODEL_LABEL: &str = "model: ";

/// Truncate to `max_chars` from the end with ellipsis. Single pass over chars.
fn truncate_end(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    if count <= max_chars {
        return s.to_string();
    }
    let take = max_chars.saturating_sub(1);
    let skip = count.saturating_sub(take);
    format!("…{}", s.chars().skip(skip).collect::<String>())
}

pub fn render(f: &mut Frame, model: &str, area: ratatui::prelude::Rect) {
    // Dashes between the corners (╭ and ╮ take 1 each).
    let dash_count = (area.width as usize).saturating_sub(2);
    // Inner content width between "│ " and " │".
    let inner = dash_count.saturating_sub(2);

    let version = format!("(v{VERSION})");
    let title_len = TITLE.chars().count() + version.chars().count();
    let model_max = inner.saturating_sub(title_len + 1 + MODEL_LABEL.chars().count());
    let model_show = truncate_end(model, model_max);
    let pad = inner.saturating_sub(title_len + MODEL_LABEL.chars().count() + model_show.chars().count());

    let border = Style::default().fg(colors::BORDER);
    let lines = vec![
        Line::from(Span::styled(format!("╭{}╮", "─".repeat(dash_count)), border)),
        Line::from(vec![
            Span::styled("│ ", border),
            Span::styled(TITLE, Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(version, Style::default().fg(colors::TEXT_DIM)),
            Span::raw(" ".repeat(pad)),
            Span::styled(MODEL_LABEL, Style::default().fg(colors::MUTED)),
            Span::styled(model_show, Style::default().fg(colors::ACCENT_SOFT)),
            Span::styled(" │", border),
        ]),
        Line::from(Span::styled(format!("╰{}╯", "─".repeat(dash_count)), border)),
    ];

    let para = Paragraph::new(lines).style(Style::default().bg(colors::ELEVATED));
    f.render_widget(para, area);
}
