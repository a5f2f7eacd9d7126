//! Single-column layout with inner margin for the history list.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{HEADER_HEIGHT, INPUT_HEIGHT, MARGIN_X, MIN_HISTORY_LINES, STATUS_HEIGHT};

#[derive(Clone, Debug)]
pub struct LayoutRegions {
    pub header: Rect,
    pub history: Rect,
    pub input: Rect,
    pub status: Rect,
}

pub fn compute(area: Rect) -> LayoutRegions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(MIN_HISTORY_LINES),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    let history = Rect {
        x: area.x + MARGIN_X,
        y: chunks[1].y,
        width: area.width.saturating_sub(2 * MARGIN_X),
        height: chunks[1].height,
    };
    LayoutRegions {
        header: chunks[0],
        history,
        input: chunks[2],
        status: chunks[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_without_overlap() {
        let regions = compute(Rect::new(0, 0, 80, 24));
        assert_eq!(regions.header.height, HEADER_HEIGHT);
        assert_eq!(regions.input.height, INPUT_HEIGHT);
        assert_eq!(regions.status.height, STATUS_HEIGHT);
        assert_eq!(regions.history.height, 24 - HEADER_HEIGHT - INPUT_HEIGHT - STATUS_HEIGHT);
        assert_eq!(regions.history.x, MARGIN_X);
        assert_eq!(regions.history.width, 80 - 2 * MARGIN_X);
        assert_eq!(regions.status.y, 23);
    }
}
