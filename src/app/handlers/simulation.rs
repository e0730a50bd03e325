//! Handler für die Rider-Simulation.

use crate::app::AppState;

/// Bewegt alle Rider um `dt` Sekunden.
pub fn advance(state: &mut AppState, dt: f32) {
    state.track.update(dt);
}

/// Fügt einen Rider am Streckenstart hinzu.
pub fn add_rider(state: &mut AppState) {
    if state.track.is_empty() {
        log::warn!("Keine Strecke geladen, Rider nicht hinzugefügt");
        return;
    }
    state.track.add_rider();
}

/// Entfernt den zuletzt hinzugefügten Rider.
pub fn remove_rider(state: &mut AppState) {
    if state.track.remove_rider().is_none() {
        log::debug!("Kein Rider zum Entfernen");
    }
}
