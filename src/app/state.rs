//! Application State: zentrale Datenhaltung.

use super::CommandLog;
use crate::core::{Camera3D, CameraMode, Track, Viewport};
use crate::shared::TrackOptions;
use crate::xml::TrackSettings;
use glam::{Vec2, Vec3};
use std::path::PathBuf;

/// Gespeicherte God-Ansicht, die beim Zurückschalten wiederhergestellt wird.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedView {
    pub position: Vec3,
    pub look: Vec3,
}

/// Maus-Zustand zwischen zwei Events.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    /// Letzte bekannte Cursorposition in Pixeln
    pub cursor: Vec2,
    /// Sekundäre Taste gehalten (Orbit aktiv, Picking gesperrt)
    pub secondary_held: bool,
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Die Strecke inkl. Rider und Kontrollpunkt-Auswahl
    pub track: Track,
    /// Kamera
    pub camera: Camera3D,
    /// Aktueller Kameramodus
    pub camera_mode: CameraMode,
    /// God-Ansicht vor dem Wechsel in die Rider-Perspektive
    pub saved_god_view: Option<SavedView>,
    /// Viewport-Größe in Pixeln [Breite, Höhe]
    pub viewport_size: [f32; 2],
    /// Maus-Zustand
    pub mouse: MouseState,
    /// Laufzeit-Optionen
    pub options: TrackOptions,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Zuletzt geladene Settings
    pub settings: Option<TrackSettings>,
    /// Pfad der zuletzt geladenen Settings-Datei
    pub settings_path: Option<PathBuf>,
    /// Gefundenes Rider-Modell (None = Rendering ohne Modell)
    pub model_path: Option<PathBuf>,
}

impl AppState {
    /// Erstellt einen neuen App-State mit leerer Strecke und Standard-Optionen
    pub fn new() -> Self {
        Self::with_options(TrackOptions::default())
    }

    /// Erstellt einen App-State mit den übergebenen Optionen
    pub fn with_options(options: TrackOptions) -> Self {
        let mut camera = Camera3D::new();
        camera.fov_y_deg = options.camera_fov_y_deg;
        camera.orbit_radius = options.camera_orbit_radius;

        Self {
            track: Track::new(options.track_params()),
            camera,
            camera_mode: CameraMode::God,
            saved_god_view: None,
            viewport_size: [1280.0, 720.0],
            mouse: MouseState::default(),
            options,
            command_log: CommandLog::new(),
            settings: None,
            settings_path: None,
            model_path: None,
        }
    }

    /// Name der geladenen Settings (Wurzelelement).
    pub fn settings_name(&self) -> Option<&str> {
        self.settings.as_ref().map(|s| s.name.as_str())
    }

    /// Aktueller Viewport.
    pub fn viewport(&self) -> Viewport {
        Viewport::from_size(self.viewport_size)
    }

    /// Editieren ist nur im God-Modus möglich.
    pub fn is_editing(&self) -> bool {
        self.camera_mode == CameraMode::God
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
