//! Use-Case-Funktionen für Viewport- und Maus-Zustand.

use crate::app::AppState;
use glam::Vec2;

/// Aktualisiert die gespeicherte Viewport-Größe.
///
/// Null-Größen (minimiertes Fenster) werden ignoriert.
pub fn resize(state: &mut AppState, size: [f32; 2]) {
    if size[0] <= 0.0 || size[1] <= 0.0 {
        log::debug!("Viewport-Größe {:?} ignoriert", size);
        return;
    }
    state.viewport_size = size;
}

/// Merkt die letzte Cursorposition.
pub fn set_cursor(state: &mut AppState, pos: Vec2) {
    state.mouse.cursor = pos;
}

/// Setzt, ob die sekundäre Maustaste gehalten wird.
pub fn set_secondary_held(state: &mut AppState, held: bool) {
    state.mouse.secondary_held = held;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_updates_viewport_size() {
        let mut state = AppState::new();

        resize(&mut state, [1920.0, 1080.0]);

        assert_eq!(state.viewport_size, [1920.0, 1080.0]);
    }

    #[test]
    fn resize_ignores_minimized_window() {
        let mut state = AppState::new();
        let before = state.viewport_size;

        resize(&mut state, [0.0, 0.0]);

        assert_eq!(state.viewport_size, before);
    }
}
