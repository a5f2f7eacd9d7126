//! UI layer: layout, theme, renderer, widgets.

mod layout;
mod renderer;
mod theme;

pub mod widgets;

pub use renderer::{fit_scroll, render};
