//! Geschlossene Strecke aus kubischen Segmenten mit C1-stetigen Nahtstellen.

use super::control_point_editor::CtrlPointSelection;
use super::cubic_curve::{CubicCurve, Curve};
use super::rider::Rider;
use crate::shared::curve_geometry::{continuity_deviation, reflect_handle};
use crate::shared::options::{
    TrackParams, MAX_RESOLUTION, MIN_RESOLUTION, MIN_T_STEP, SPLIT_T,
};
use glam::Vec3;

/// Zyklische Folge von Segmenten: Ende von Segment `i` = Start von `(i + 1) mod n`.
///
/// Besitzt außerdem die Rider und den Zustand des Kontrollpunkt-Editors.
/// Alle Mutationen laufen über `&mut self` auf einem Thread (Update-Loop).
#[derive(Debug, Clone)]
pub struct Track {
    pub(super) segments: Vec<CubicCurve>,
    pub(super) riders: Vec<Rider>,
    /// Summe der Segment-Bogenlängen
    length: f32,
    /// Gemeinsame Auflösung aller Segmente
    resolution: usize,
    pub(super) params: TrackParams,
    /// Wurde die Schleife mit `add_last_curve` geschlossen?
    closed: bool,
    pub(super) selection: Option<CtrlPointSelection>,
}

impl Default for Track {
    fn default() -> Self {
        Self::new(TrackParams::default())
    }
}

impl Track {
    /// Erstellt eine leere Strecke.
    ///
    /// `t_step` muss positiv sein, sonst käme ein Rider nie voran; zu kleine
    /// Werte werden auf `MIN_T_STEP` angehoben.
    pub fn new(mut params: TrackParams) -> Self {
        debug_assert!(params.t_step > 0.0, "t_step muss positiv sein: {}", params.t_step);
        params.t_step = params.t_step.max(MIN_T_STEP);
        Self {
            segments: Vec::with_capacity(4),
            riders: Vec::new(),
            length: 0.0,
            resolution: params.resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION),
            params,
            closed: false,
            selection: None,
        }
    }

    // ── Aufbau ──────────────────────────────────────────────────────

    /// Legt das erste Segment unverändert an. Die Strecke muss leer sein.
    pub fn add_first_curve(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3) {
        debug_assert!(self.segments.is_empty(), "Strecke ist nicht leer");
        if !self.segments.is_empty() {
            log::warn!("add_first_curve auf nicht-leerer Strecke ignoriert");
            return;
        }
        self.push_segment([a, b, c, d]);
    }

    /// Hängt ein Segment an; das führende Handle wird C1-stetig gespiegelt.
    pub fn add_curve_to_end(&mut self, handle_out: Vec3, anchor: Vec3) {
        debug_assert!(!self.closed, "Strecke ist bereits geschlossen");
        let Some(last) = self.segments.last() else {
            debug_assert!(false, "add_curve_to_end auf leerer Strecke");
            log::warn!("add_curve_to_end auf leerer Strecke ignoriert");
            return;
        };
        let start = last.end();
        let leading = reflect_handle(start, last.ctrl_point(2));
        self.push_segment([start, leading, handle_out, anchor]);
    }

    /// Schließt die Schleife zurück zum Start von Segment 0.
    ///
    /// Beide Handles des Schluss-Segments werden gespiegelt: das führende am
    /// Ende des letzten Segments, das nachlaufende am Start von Segment 0.
    pub fn add_last_curve(&mut self) {
        debug_assert!(!self.closed, "Strecke ist bereits geschlossen");
        let (Some(first), Some(last)) = (self.segments.first(), self.segments.last()) else {
            debug_assert!(false, "add_last_curve auf leerer Strecke");
            log::warn!("add_last_curve auf leerer Strecke ignoriert");
            return;
        };
        let start = last.end();
        let leading = reflect_handle(start, last.ctrl_point(2));
        let end = first.start();
        let trailing = reflect_handle(end, first.ctrl_point(1));
        self.push_segment([start, leading, trailing, end]);
        self.closed = true;
        log::info!(
            "Strecke geschlossen: {} Segmente, Länge {:.2}",
            self.segments.len(),
            self.length
        );
    }

    fn push_segment(&mut self, ctrl_points: [Vec3; 4]) {
        let segment = CubicCurve::with_resolution(ctrl_points, self.resolution);
        self.length += segment.arc_length();
        self.segments.push(segment);
    }

    // ── Strukturelle Änderungen ─────────────────────────────────────

    /// Index des längsten Segments (bei Gleichstand das erste).
    pub fn longest_segment_index(&self) -> Option<usize> {
        let mut longest: Option<(usize, f32)> = None;
        for (i, segment) in self.segments.iter().enumerate() {
            match longest {
                Some((_, len)) if segment.arc_length() <= len => {}
                _ => longest = Some((i, segment.arc_length())),
            }
        }
        longest.map(|(i, _)| i)
    }

    /// Fügt ein Segment ein, indem das längste Segment bei `t = 0.5` geteilt wird.
    ///
    /// Die linke Hälfte behält den Index, die rechte folgt direkt dahinter.
    /// Die angrenzenden Handles der Nachbarsegmente werden an den verkürzten
    /// Handles der Hälften gespiegelt, damit die Nähte C1-stetig bleiben.
    /// Rider werden im selben Schritt umgerechnet. Gibt den geteilten Index zurück.
    pub fn add_curve(&mut self) -> Option<usize> {
        debug_assert!(!self.segments.is_empty(), "add_curve auf leerer Strecke");
        let index = self.longest_segment_index()?;

        for rider in &mut self.riders {
            rider.rebase_for_split(index, SPLIT_T);
        }
        if let Some(selection) = self.selection.as_mut() {
            selection.rebase_for_split(index);
        }

        let (left, right) = self.segments[index].split(SPLIT_T);
        self.segments[index].set_ctrl_points(left);
        self.segments
            .insert(index + 1, CubicCurve::with_resolution(right, self.resolution));

        // Die Hälften haben an den äußeren Ankern kürzere Handles: Nachbarn spiegeln
        let n = self.segments.len();
        if index > 0 || self.closed {
            let prev = self.prev_index(index);
            self.segments[prev].set_ctrl_point(2, reflect_handle(left[0], left[1]));
            self.refresh_riders_on(prev);
        }
        if index + 2 < n || self.closed {
            let next = (index + 2) % n;
            self.segments[next].set_ctrl_point(1, reflect_handle(right[3], right[2]));
            self.refresh_riders_on(next);
        }
        self.recompute_length();

        log::info!(
            "Segment {} geteilt, jetzt {} Segmente (Länge {:.2})",
            index,
            self.segments.len(),
            self.length
        );
        Some(index)
    }

    // ── Auflösung ───────────────────────────────────────────────────

    /// Setzt die Auflösung aller Segmente (begrenzt auf den erlaubten Bereich).
    ///
    /// Gibt `true` zurück, wenn sich die Auflösung geändert hat.
    pub fn set_resolution(&mut self, resolution: usize) -> bool {
        let resolution = resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
        if resolution == self.resolution {
            return false;
        }
        self.resolution = resolution;
        for segment in &mut self.segments {
            segment.set_resolution(resolution);
        }
        log::info!("Auflösung auf {} gesetzt", resolution);
        true
    }

    /// Erhöht die Auflösung um eins (höchstens `MAX_RESOLUTION`).
    pub fn increase_resolution(&mut self) -> bool {
        self.set_resolution(self.resolution + 1)
    }

    /// Verringert die Auflösung um eins (mindestens `MIN_RESOLUTION`).
    pub fn decrease_resolution(&mut self) -> bool {
        self.set_resolution(self.resolution.saturating_sub(1))
    }

    // ── Abfragen ────────────────────────────────────────────────────

    /// Segment `i`.
    pub fn segment(&self, i: usize) -> &CubicCurve {
        &self.segments[i]
    }

    /// Alle Segmente in Streckenreihenfolge.
    pub fn segments(&self) -> &[CubicCurve] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Gemeinsame Auflösung aller Segmente.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Gesamtlänge (Summe der geschätzten Segment-Bogenlängen).
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn ctrl_point_radius(&self) -> f32 {
        self.params.ctrl_point_radius
    }

    pub fn params(&self) -> &TrackParams {
        &self.params
    }

    /// Vorgänger-Index in der Schleife.
    pub fn prev_index(&self, i: usize) -> usize {
        if i == 0 {
            self.segments.len() - 1
        } else {
            i - 1
        }
    }

    /// Nachfolger-Index in der Schleife.
    pub fn next_index(&self, i: usize) -> usize {
        if i + 1 == self.segments.len() {
            0
        } else {
            i + 1
        }
    }

    /// Größte Abweichung von der C1-Spiegelregel über alle Nahtstellen.
    ///
    /// Offene Strecken prüfen nur die inneren Nähte.
    pub fn continuity_error(&self) -> f32 {
        let n = self.segments.len();
        let seams = if self.closed { n } else { n.saturating_sub(1) };
        (0..seams)
            .map(|i| {
                let before = &self.segments[i];
                let after = &self.segments[(i + 1) % n];
                let gap = before.end().distance(after.start());
                gap + continuity_deviation(before.ctrl_point(2), before.end(), after.ctrl_point(1))
            })
            .fold(0.0, f32::max)
    }

    pub(super) fn recompute_length(&mut self) {
        self.length = self.segments.iter().map(Curve::arc_length).sum();
    }
}
