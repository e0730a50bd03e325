//! Use-Case-Funktionen für Dateiaktionen.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use crate::app::AppState;
use crate::core::CameraMode;
use crate::xml::{TrackSettings, WindowSettings};
use anyhow::bail;
use std::path::{Path, PathBuf};

/// Lädt eine Settings-Datei und baut die Strecke neu auf.
///
/// Eine fehlende Modell-Datei wird nur gewarnt; die Strecke ist trotzdem nutzbar.
pub fn load_settings(state: &mut AppState, path: String) -> anyhow::Result<()> {
    let path = PathBuf::from(path);
    let settings = crate::xml::load_track_settings(&path)?;

    let track = settings.build_track(state.options.track_params());
    log::info!(
        "Strecke aufgebaut: {} Segmente, Länge {:.2}",
        track.segment_count(),
        track.length()
    );

    if let Some(camera) = settings.camera {
        state.camera.set_view(camera.position, camera.look_at);
    }
    state.camera.reset_velocity();

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    state.model_path = match settings.model_path(base_dir) {
        Ok(model) => Some(model),
        Err(err) => {
            log::warn!("{:#}", err);
            None
        }
    };

    state.track = track;
    state.camera_mode = CameraMode::God;
    state.saved_god_view = None;
    state.settings = Some(settings);
    state.settings_path = Some(path);
    Ok(())
}

/// Speichert das aktuelle Strecken-Layout.
///
/// `None` schreibt in die zuletzt geladene Datei.
pub fn save_settings(state: &mut AppState, path: Option<String>) -> anyhow::Result<()> {
    let target = match path {
        Some(p) => PathBuf::from(p),
        None => match state.settings_path.clone() {
            Some(p) => p,
            None => bail!("Kein Speicherpfad bekannt"),
        },
    };
    if state.track.is_empty() {
        bail!("Keine Strecke zum Speichern");
    }

    let mut settings = state.settings.clone().unwrap_or_else(|| TrackSettings {
        name: "Scene".to_string(),
        window: WindowSettings::default(),
        model_filename: None,
        camera: None,
        curves: Vec::new(),
        light: None,
    });
    settings.capture_track_layout(&state.track);

    crate::xml::save_track_settings(&settings, &target)?;
    state.settings = Some(settings);
    state.settings_path = Some(target);
    Ok(())
}
