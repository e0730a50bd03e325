//! Handler für Kamera, Viewport und Maus-Zustand.

use crate::app::use_cases;
use crate::app::AppState;
use glam::Vec2;

/// Aktualisiert die Viewport-Größe im State.
pub fn set_viewport_size(state: &mut AppState, size: [f32; 2]) {
    use_cases::viewport::resize(state, size);
}

/// Merkt die Cursorposition.
pub fn set_cursor(state: &mut AppState, pos: Vec2) {
    use_cases::viewport::set_cursor(state, pos);
}

/// Setzt den Zustand der sekundären Maustaste.
pub fn set_secondary_held(state: &mut AppState, held: bool) {
    use_cases::viewport::set_secondary_held(state, held);
}

/// Lässt die Kamera um den Ursprung kreisen.
pub fn orbit(state: &mut AppState, delta: Vec2) {
    use_cases::camera::orbit(state, delta);
}

/// Schaltet den Kameramodus weiter.
pub fn cycle_camera_mode(state: &mut AppState) {
    use_cases::camera::cycle_mode(state);
}

/// Führt die Kamera dem ersten Rider nach.
pub fn update_follow_camera(state: &mut AppState) {
    use_cases::camera::follow_rider(state);
}
