//! User actions.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Char(char),
    Backspace,
    Delete,
    ClearInput,
    Submit,

    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,

    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollTop,
}
