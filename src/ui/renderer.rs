//! Single-panel render: header, history, input bar, status.

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::app::App;
use crate::ui::layout;
use crate::ui::theme::SPINNER;
use crate::ui::widgets::{history_max_scroll, render_header, render_history, render_input, render_status};

/// Bound the history scroll to what the panel can show in a frame of `area`.
pub fn fit_scroll(area: Rect, app: &mut App) {
    let regions = layout::compute(area);
    let max = history_max_scroll(app.state.session.history(), regions.history);
    app.state.set_max_scroll(max);
}

pub fn render(f: &mut Frame, app: &App, tick: usize) {
    let regions = layout::compute(f.area());
    let spinner_char = SPINNER[tick % SPINNER.len()];

    render_header(f, &app.model, regions.header);
    render_history(f, app.state.session.history(), app.state.scroll, regions.history);
    render_input(
        f,
        app.state.input_buffer(),
        app.state.input_cursor(),
        regions.input,
    );
    render_status(f, regions.status, app.state.session.pending(), spinner_char);
}
