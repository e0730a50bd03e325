//! Render-Szene als expliziter Übergabevertrag zwischen App und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und ein Renderer sie konsumiert.
//! Alle Vertex-Typen sind `Pod` und können direkt hochgeladen werden.

use crate::core::{CameraMode, CtrlPointSlot};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Vertex für Linien-Geometrie (Strecke, Handle-Hilfslinien).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    /// Position im Weltraum
    pub position: [f32; 3],
    /// RGBA-Farbe
    pub color: [f32; 4],
}

impl LineVertex {
    /// Erstellt einen neuen LineVertex.
    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// Instanz-Daten einer Kontrollpunkt-Kugel.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CtrlPointInstance {
    /// Mittelpunkt im Weltraum
    pub center: [f32; 3],
    /// Kugelradius
    pub radius: f32,
    /// RGBA-Farbe
    pub color: [f32; 4],
}

/// Platzierung eines Rider-Modells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiderTransform {
    pub position: Vec3,
    pub orientation: Quat,
    /// Fertige Modellmatrix (Rotation, dann Translation)
    pub model: Mat4,
    pub speed: f32,
}

/// Hervorgehobener Kontrollpunkt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionHighlight {
    pub segment: usize,
    pub slot: CtrlPointSlot,
    pub position: Vec3,
}

/// Read-only Daten für einen Render-Frame.
#[derive(Clone, Debug, Default)]
pub struct RenderScene {
    /// Geschlossener Linienzug aller Segment-Polylinien
    pub track_line: Vec<LineVertex>,
    /// Linienpaare Anker → Handle (nur im God-Modus)
    pub handle_lines: Vec<LineVertex>,
    /// Kontrollpunkt-Kugeln (nur im God-Modus)
    pub ctrl_points: Vec<CtrlPointInstance>,
    /// Rider-Platzierungen
    pub riders: Vec<RiderTransform>,
    /// Aktuell gegriffener Kontrollpunkt
    pub selection: Option<SelectionHighlight>,
    /// Kameramodus dieses Frames
    pub camera_mode: CameraMode,
    /// View-Matrix
    pub view: Mat4,
    /// Projektionsmatrix
    pub projection: Mat4,
    /// Viewport-Größe in Pixeln [Breite, Höhe]
    pub viewport_size: [f32; 2],
}

impl RenderScene {
    /// Gibt zurück, ob eine Strecke für Rendering vorhanden ist.
    pub fn has_track(&self) -> bool {
        !self.track_line.is_empty()
    }

    /// Rohbytes der Streckenlinie für den Upload.
    pub fn track_line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.track_line)
    }
}
