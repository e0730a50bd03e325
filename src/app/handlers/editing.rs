//! Handler für Kontrollpunkt-Editing und Streckenstruktur.

use crate::app::AppState;
use glam::Vec2;

/// Greift den Kontrollpunkt unter dem Cursor.
pub fn pick(state: &mut AppState, cursor: Vec2) {
    let input = state.camera.pick_input(cursor, state.viewport());
    state.track.select_ctrl_point(&input);
}

/// Zieht den gegriffenen Kontrollpunkt zur Cursorposition.
pub fn drag(state: &mut AppState, cursor: Vec2) {
    let view = state.camera.view_matrix();
    let projection = state.camera.projection_matrix(state.viewport().aspect());
    state.track.drag_ctrl_point(cursor, &view, &projection);
}

/// Lässt den gegriffenen Kontrollpunkt los.
pub fn clear_selection(state: &mut AppState) {
    state.track.clear_selection();
}

/// Erhöht die Auflösung aller Segmente.
pub fn increase_resolution(state: &mut AppState) {
    state.track.increase_resolution();
}

/// Verringert die Auflösung aller Segmente.
pub fn decrease_resolution(state: &mut AppState) {
    state.track.decrease_resolution();
}

/// Teilt das längste Segment.
pub fn split_longest_segment(state: &mut AppState) {
    if state.track.is_empty() {
        log::warn!("Keine Strecke geladen, nichts zu teilen");
        return;
    }
    state.track.add_curve();
}
