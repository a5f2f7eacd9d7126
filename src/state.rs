//! App state: the chat session plus input cursor and history scroll.

use crate::session::ChatSession;

#[derive(Debug, Default)]
pub struct AppState {
    pub session: ChatSession,
    /// Byte offset into the draft.
    pub input_cursor: usize,
    /// First visible row of the history panel.
    pub scroll: usize,
    /// Largest useful `scroll` for the current history and panel size.
    pub max_scroll: usize,
}

impl AppState {
    pub fn input_buffer(&self) -> &str {
        self.session.draft()
    }

    pub fn input_cursor(&self) -> usize {
        self.input_cursor
    }

    pub fn set_max_scroll(&mut self, max: usize) {
        self.max_scroll = max;
        self.scroll = self.scroll.min(max);
    }

    /// Pull the cursor back inside the draft and onto a char boundary.
    pub fn clamp_cursor(&mut self) {
        let draft = self.session.draft();
        let mut pos = self.input_cursor.min(draft.len());
        while !draft.is_char_boundary(pos) {
            pos -= 1;
        }
        self.input_cursor = pos;
    }
}
