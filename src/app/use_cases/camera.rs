//! Use-Case-Funktionen für Kamera-Steuerung.

use crate::app::state::SavedView;
use crate::app::AppState;
use crate::core::CameraMode;
use crate::shared::options::{CAMERA_EYE_HEIGHT, CAMERA_FOLLOW_DISTANCE, CAMERA_FOLLOW_HEIGHT};
use glam::{Vec2, Vec3};

/// Lässt die God-Kamera um den Ursprung kreisen.
pub fn orbit(state: &mut AppState, delta: Vec2) {
    state.camera.orbit_by_mouse(delta.x, delta.y);
}

/// Schaltet God → FirstPerson → ThirdPerson → God weiter.
///
/// Beim Verlassen des God-Modus wird die Ansicht gemerkt, die Auswahl
/// gelöst und bei Bedarf ein Rider erzeugt. Beim Zurückkehren wird die
/// gemerkte Ansicht wiederhergestellt.
pub fn cycle_mode(state: &mut AppState) {
    let next = state.camera_mode.next();
    match next {
        CameraMode::FirstPerson => {
            if state.track.is_empty() {
                log::warn!("Keine Strecke geladen, Kameramodus bleibt God");
                return;
            }
            if state.track.rider_count() == 0 {
                state.track.add_rider();
            }
            state.saved_god_view = Some(SavedView {
                position: state.camera.position,
                look: state.camera.look,
            });
            state.track.clear_selection();
        }
        CameraMode::ThirdPerson => {
            state.camera.reset_velocity();
        }
        CameraMode::God => {
            if let Some(view) = state.saved_god_view.take() {
                state.camera.set_view(view.position, view.look);
            }
        }
    }
    state.camera_mode = next;
    log::info!("Kameramodus: {:?}", next);
}

/// Führt die Kamera dem ersten Rider nach (nur in den Rider-Perspektiven).
pub fn follow_rider(state: &mut AppState) {
    let Some(rider) = state.track.riders().first() else {
        return;
    };
    let position = rider.position();
    let heading = rider.heading();

    match state.camera_mode {
        CameraMode::God => {}
        CameraMode::FirstPerson => {
            let eye = position + Vec3::Y * CAMERA_EYE_HEIGHT;
            state.camera.set_view(eye, eye + heading.normalize_or_zero());
        }
        CameraMode::ThirdPerson => {
            let target =
                position - heading * CAMERA_FOLLOW_DISTANCE + Vec3::Y * CAMERA_FOLLOW_HEIGHT;
            state.camera.follow_target(target, position);
        }
    }
}
