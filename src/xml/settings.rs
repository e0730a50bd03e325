//! Datenmodell der Strecken-Settings und Aufbau der Strecke daraus.

use crate::core::{Curve, Track};
use crate::shared::TrackParams;
use anyhow::{bail, Result};
use glam::{Vec3, Vec4};
use std::path::{Path, PathBuf};

/// Fenster-Vorgaben.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub title: String,
    pub x_pos: i32,
    pub y_pos: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Bezier Track Editor".to_string(),
            x_pos: 0,
            y_pos: 0,
            width: 1280,
            height: 720,
        }
    }
}

/// Startansicht der God-Kamera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Eine Lichtquelle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSettings {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub position: Vec3,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::ONE,
            position: Vec3::new(0.0, 10.0, 0.0),
        }
    }
}

/// Inhalt einer Settings-Datei.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSettings {
    /// Name des Wurzelelements
    pub name: String,
    pub window: WindowSettings,
    /// Dateiname des Rider-Modells, relativ zur Settings-Datei
    pub model_filename: Option<String>,
    pub camera: Option<CameraSettings>,
    /// Erste Kurve mit vier Punkten, jede weitere mit Handle und Anker
    pub curves: Vec<Vec<Vec3>>,
    pub light: Option<LightSettings>,
}

impl TrackSettings {
    /// Baut die geschlossene Strecke aus den Kurven.
    pub fn build_track(&self, params: TrackParams) -> Track {
        let mut track = Track::new(params);
        let mut curves = self.curves.iter();

        if let Some(first) = curves.next() {
            if let [a, b, c, d] = first.as_slice() {
                track.add_first_curve(*a, *b, *c, *d);
            }
        }
        for curve in curves {
            if let [handle_out, anchor] = curve.as_slice() {
                track.add_curve_to_end(*handle_out, *anchor);
            }
        }
        if !track.is_empty() {
            track.add_last_curve();
        }
        track
    }

    /// Übernimmt das aktuelle Layout einer geschlossenen Strecke.
    ///
    /// Das Schluss-Segment wird beim Laden gespiegelt erzeugt und deshalb
    /// nicht geschrieben.
    pub fn capture_track_layout(&mut self, track: &Track) {
        let segments = track.segments();
        let open_count = if track.is_closed() {
            segments.len().saturating_sub(1)
        } else {
            segments.len()
        };

        self.curves = segments
            .iter()
            .take(open_count.max(1))
            .enumerate()
            .map(|(i, segment)| {
                let points = segment.ctrl_points();
                if i == 0 {
                    points.to_vec()
                } else {
                    vec![points[2], points[3]]
                }
            })
            .collect();
        log::debug!(
            "Layout übernommen: {} Kurven, Länge {:.2}",
            self.curves.len(),
            segments.iter().map(Curve::arc_length).sum::<f32>()
        );
    }

    /// Pfad zum Rider-Modell relativ zu `base_dir`.
    ///
    /// Fehlt die Datei, ist das ein behebbarer Fehler: der Aufrufer rendert
    /// dann ohne Modell.
    pub fn model_path(&self, base_dir: &Path) -> Result<PathBuf> {
        let Some(filename) = self.model_filename.as_deref() else {
            bail!("Keine Modell-Datei in den Settings angegeben");
        };
        let path = base_dir.join(filename);
        if !path.is_file() {
            bail!("Modell-Datei '{}' nicht gefunden", path.display());
        }
        Ok(path)
    }
}
