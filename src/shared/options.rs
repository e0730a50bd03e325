//! Zentrale Konfiguration für den Bézier-Track-Editor.
//!
//! `TrackOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Tessellierung ───────────────────────────────────────────────────

/// Standard-Auflösung (Polylinien-Punkte pro Segment).
pub const DEFAULT_RESOLUTION: usize = 75;
/// Kleinste erlaubte Auflösung (darunter keine sichtbare Linie).
pub const MIN_RESOLUTION: usize = 2;
/// Größte erlaubte Auflösung.
pub const MAX_RESOLUTION: usize = 75;

// ── Editor ──────────────────────────────────────────────────────────

/// Radius der Kontrollpunkt-Kugeln (Welteinheiten), zugleich Pick-Radius.
pub const CTRL_POINT_RADIUS: f32 = 0.24;
/// Maximaler Abstand eines gezogenen Ankers zum Start-Anker des Vorgänger-Segments.
pub const ANCHOR_DRAG_LIMIT: f32 = 50.0;
/// Maximaler Abstand eines gezogenen Handles zu seinem Anker.
pub const HANDLE_DRAG_LIMIT: f32 = 25.0;
/// Mindest-Fenstertiefe [0, 1] des Picks, ab der Drag-Unprojektion stabil ist.
pub const DRAG_MIN_DEPTH: f32 = 0.8;
/// Parameter, an dem das längste Segment beim Einfügen geteilt wird.
pub const SPLIT_T: f32 = 0.5;

// ── Simulation ──────────────────────────────────────────────────────

/// Erdbeschleunigung des Energiemodells (Einheitsmasse).
pub const GRAVITY: f32 = 14.0;
/// Startgeschwindigkeit neuer Rider.
pub const RIDER_START_SPEED: f32 = 2.0;
/// Untergrenze der Rider-Geschwindigkeit (verhindert Stehenbleiben am Gipfel).
pub const RIDER_MIN_SPEED: f32 = 2.0;
/// Fester Parameter-Mikroschritt pro Iteration der Rider-Bewegung.
pub const RIDER_T_STEP: f32 = 0.0001;
/// Kleinster zulässiger Mikroschritt.
pub const MIN_T_STEP: f32 = 1e-6;
/// Fester Simulationsschritt des Treibers in Sekunden.
pub const TICK_SECONDS: f32 = 0.01;

// ── Kamera ──────────────────────────────────────────────────────────

/// Vertikales Sichtfeld in Grad.
pub const CAMERA_FOV_Y_DEG: f32 = 45.0;
/// Near-Plane.
pub const CAMERA_NEAR: f32 = 0.1;
/// Far-Plane.
pub const CAMERA_FAR: f32 = 500.0;
/// Radius der Orbit-Bewegung im God-Modus.
pub const CAMERA_ORBIT_RADIUS: f32 = 24.0;
/// Teiler für Maus-Deltas beim Orbit (größer = träger).
pub const CAMERA_ORBIT_DIVISOR: f32 = 3.0;
/// Start-Gierwinkel des Orbits in Grad.
pub const CAMERA_ORBIT_START_YAW_DEG: f32 = 180.0;
/// Federkonstante der Verfolgerkamera.
pub const CAMERA_SPRING_STIFFNESS: f32 = 0.2;
/// Dämpfung der Verfolgerkamera.
pub const CAMERA_SPRING_DAMPING: f32 = 5.0;
/// Masse der Verfolgerkamera.
pub const CAMERA_SPRING_MASS: f32 = 20.0;
/// Augenhöhe über dem Rider in der Ego-Perspektive.
pub const CAMERA_EYE_HEIGHT: f32 = 0.4;
/// Abstand hinter dem Rider in der Verfolgerperspektive.
pub const CAMERA_FOLLOW_DISTANCE: f32 = 4.0;
/// Höhe über dem Rider in der Verfolgerperspektive.
pub const CAMERA_FOLLOW_HEIGHT: f32 = 2.0;

// ── Darstellung ─────────────────────────────────────────────────────

/// Farbe der Streckenlinie (RGBA).
pub const TRACK_LINE_COLOR: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
/// Farbe der Hilfslinien zwischen Anker und Handle.
pub const HANDLE_LINE_COLOR: [f32; 4] = [0.5, 0.5, 0.8, 1.0];
/// Farbe der Anker-Kugeln.
pub const ANCHOR_COLOR: [f32; 4] = [1.0, 0.6, 0.1, 1.0];
/// Farbe der Handle-Kugeln.
pub const HANDLE_COLOR: [f32; 4] = [0.2, 0.6, 1.0, 1.0];
/// Farbe des gegriffenen Kontrollpunkts.
pub const SELECTED_COLOR: [f32; 4] = [1.0, 0.1, 0.1, 1.0];

/// Parameterblock, den der `Track` zur Laufzeit liest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackParams {
    /// Auflösung, mit der neue Segmente tesselliert werden
    pub resolution: usize,
    /// Radius der Kontrollpunkt-Kugeln
    pub ctrl_point_radius: f32,
    /// Erdbeschleunigung
    pub gravity: f32,
    /// Startgeschwindigkeit neuer Rider
    pub start_speed: f32,
    /// Geschwindigkeits-Untergrenze
    pub min_speed: f32,
    /// Parameter-Mikroschritt
    pub t_step: f32,
    /// Drag-Grenze für Anker
    pub anchor_drag_limit: f32,
    /// Drag-Grenze für Handles
    pub handle_drag_limit: f32,
    /// Mindest-Fenstertiefe für Drags
    pub drag_min_depth: f32,
}

impl Default for TrackParams {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            ctrl_point_radius: CTRL_POINT_RADIUS,
            gravity: GRAVITY,
            start_speed: RIDER_START_SPEED,
            min_speed: RIDER_MIN_SPEED,
            t_step: RIDER_T_STEP,
            anchor_drag_limit: ANCHOR_DRAG_LIMIT,
            handle_drag_limit: HANDLE_DRAG_LIMIT,
            drag_min_depth: DRAG_MIN_DEPTH,
        }
    }
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `bezier_track_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackOptions {
    // ── Track ───────────────────────────────────────────────────
    /// Start-Auflösung aller Segmente
    pub resolution: usize,
    /// Radius der Kontrollpunkt-Kugeln (Pick-Radius)
    pub ctrl_point_radius: f32,

    // ── Simulation ──────────────────────────────────────────────
    /// Erdbeschleunigung des Energiemodells
    pub gravity: f32,
    /// Startgeschwindigkeit neuer Rider
    pub rider_start_speed: f32,
    /// Untergrenze der Rider-Geschwindigkeit
    pub rider_min_speed: f32,
    /// Parameter-Mikroschritt der Rider-Bewegung
    pub rider_t_step: f32,
    /// Fester Zeitschritt des Treibers (Sekunden)
    pub tick_seconds: f32,

    // ── Editor ──────────────────────────────────────────────────
    /// Drag-Grenze für Anker
    pub anchor_drag_limit: f32,
    /// Drag-Grenze für Handles
    pub handle_drag_limit: f32,
    /// Mindest-Fenstertiefe für Drags
    pub drag_min_depth: f32,

    // ── Kamera ──────────────────────────────────────────────────
    /// Vertikales Sichtfeld in Grad
    pub camera_fov_y_deg: f32,
    /// Orbit-Radius im God-Modus
    pub camera_orbit_radius: f32,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            ctrl_point_radius: CTRL_POINT_RADIUS,

            gravity: GRAVITY,
            rider_start_speed: RIDER_START_SPEED,
            rider_min_speed: RIDER_MIN_SPEED,
            rider_t_step: RIDER_T_STEP,
            tick_seconds: TICK_SECONDS,

            anchor_drag_limit: ANCHOR_DRAG_LIMIT,
            handle_drag_limit: HANDLE_DRAG_LIMIT,
            drag_min_depth: DRAG_MIN_DEPTH,

            camera_fov_y_deg: CAMERA_FOV_Y_DEG,
            camera_orbit_radius: CAMERA_ORBIT_RADIUS,
        }
    }
}

impl TrackOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("bezier_track_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("bezier_track_editor.toml")
    }

    /// Projiziert die Optionen auf den Parameterblock des `Track`.
    ///
    /// Die Auflösung wird auf `[MIN_RESOLUTION, MAX_RESOLUTION]` begrenzt.
    pub fn track_params(&self) -> TrackParams {
        TrackParams {
            resolution: self.resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION),
            ctrl_point_radius: self.ctrl_point_radius,
            gravity: self.gravity,
            start_speed: self.rider_start_speed,
            min_speed: self.rider_min_speed,
            t_step: self.rider_t_step.max(MIN_T_STEP),
            anchor_drag_limit: self.anchor_drag_limit,
            handle_drag_limit: self.handle_drag_limit,
            drag_min_depth: self.drag_min_depth,
        }
    }
}
