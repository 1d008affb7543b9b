//! Color scheme for element states.
//!
//! # Color Scheme
//! - **Private**: Cyan, not under version control yet
//! - **Checked in**: Green
//! - **Reserved checkout**: Yellow
//! - **Unreserved checkout**: Magenta

use crate::core::element::ElementState;
use colored::*;

/// Returns a closure that applies the color of `state` to any text
pub fn get_state_color_style(state: ElementState) -> Box<dyn Fn(&str) -> ColoredString> {
    match state {
        ElementState::Private => Box::new(|text: &str| text.cyan()),
        ElementState::CheckedIn => Box::new(|text: &str| text.green()),
        ElementState::CheckedOutReserved => Box::new(|text: &str| text.yellow()),
        ElementState::CheckedOutUnreserved => Box::new(|text: &str| text.magenta()),
    }
}

/// Colored state code padded to a fixed width
pub fn get_aligned_state(state: ElementState) -> ColoredString {
    let color_fn = get_state_color_style(state);
    color_fn(&format!("{:<2}", state.as_str()))
}

/// Path colored by its element state
pub fn get_colored_path(path: &str, state: ElementState) -> ColoredString {
    get_state_color_style(state)(path)
}
