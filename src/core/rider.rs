//! Rider auf der Strecke und ihre energieerhaltende Bewegung.

use super::cubic_curve::{CubicCurve, Curve};
use super::track::Track;
use crate::shared::options::TrackParams;
use glam::{Quat, Vec3};

/// Referenzachse, auf die sich die Ausrichtung eines Riders bezieht.
pub const RIDER_REFERENCE_AXIS: Vec3 = Vec3::X;

/// Ein Objekt, das entlang der Strecke fährt.
#[derive(Debug, Clone, PartialEq)]
pub struct Rider {
    /// Parameter im aktuellen Segment, immer in `[0, 1]`
    pub(super) t: f32,
    /// Index des aktuellen Segments
    pub(super) segment: usize,
    /// Skalare Geschwindigkeit
    pub(super) speed: f32,
    /// Weltposition = `point_at(segment, t)` des letzten Schritts
    pub(super) position: Vec3,
    /// Normalisierte Tangente = `tangent_at(segment, t)` des letzten Schritts
    pub(super) heading: Vec3,
}

impl Rider {
    /// Setzt einen Rider an den Anfang eines Segments.
    pub fn at_segment_start(segment_index: usize, segment: &CubicCurve, speed: f32) -> Self {
        Self {
            t: 0.0,
            segment: segment_index,
            speed,
            position: segment.point_at(0.0),
            heading: segment.tangent_at(0.0),
        }
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn segment(&self) -> usize {
        self.segment
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn heading(&self) -> Vec3 {
        self.heading
    }

    /// Rotation, die die Referenzachse (+X) auf die Fahrtrichtung dreht.
    pub fn orientation(&self) -> Quat {
        if self.heading.length_squared() < 1e-12 {
            return Quat::IDENTITY;
        }
        Quat::from_rotation_arc(RIDER_REFERENCE_AXIS, self.heading.normalize())
    }

    /// Ausrichtung als (Achse, Winkel in Radiant) für Mesh-Platzierung.
    pub fn orientation_axis_angle(&self) -> (Vec3, f32) {
        self.orientation().to_axis_angle()
    }

    /// Rechnet die Position um, wenn Segment `split_index` bei `split_t` geteilt wird.
    ///
    /// Linke Hälfte behält den Index, rechte Hälfte liegt bei `split_index + 1`.
    pub(super) fn rebase_for_split(&mut self, split_index: usize, split_t: f32) {
        if self.segment == split_index {
            if self.t < split_t {
                self.t /= split_t;
            } else {
                self.t = (self.t - split_t) / (1.0 - split_t);
                self.segment += 1;
            }
            self.t = self.t.clamp(0.0, 1.0);
        } else if self.segment > split_index {
            self.segment += 1;
        }
    }

    /// Bewegt den Rider um `speed · dt` Bogenlänge und aktualisiert die Geschwindigkeit.
    ///
    /// Schrittweite ist ein fester Parameter-Mikroschritt. Nach dem Überlaufen
    /// des letzten Segments beginnt der Rider bei Segment 0 und der Tick endet.
    /// Die Geschwindigkeit folgt aus `½v² + g·h = const`, nach unten begrenzt
    /// durch `min_speed`.
    fn advance(&mut self, segments: &[CubicCurve], params: &TrackParams, dt: f32) {
        let mut distance = self.speed * dt;
        let energy = 0.5 * self.speed * self.speed + params.gravity * self.position.y;

        while distance > 0.0 {
            self.t += params.t_step;

            if self.t > 1.0 {
                self.segment += 1;
                self.t = 0.0;

                if self.segment >= segments.len() {
                    self.segment = 0;
                    distance = 0.0;
                }
            }

            let segment = &segments[self.segment];
            let position = segment.point_at(self.t);
            distance -= position.distance(self.position);

            self.position = position;
            self.heading = segment.tangent_at(self.t);
        }

        let v_sqr = 2.0 * (energy - params.gravity * self.position.y);
        self.speed = if v_sqr > params.min_speed * params.min_speed {
            v_sqr.sqrt()
        } else {
            params.min_speed
        };
    }
}

impl Track {
    /// Setzt einen neuen Rider an den Start von Segment 0.
    pub fn add_rider(&mut self) {
        let Some(first) = self.segments.first() else {
            debug_assert!(false, "add_rider auf leerer Strecke");
            log::warn!("add_rider auf leerer Strecke ignoriert");
            return;
        };
        self.riders
            .push(Rider::at_segment_start(0, first, self.params.start_speed));
        log::info!("Rider hinzugefügt ({} aktiv)", self.riders.len());
    }

    /// Entfernt den zuletzt hinzugefügten Rider.
    pub fn remove_rider(&mut self) -> Option<Rider> {
        let removed = self.riders.pop();
        if removed.is_some() {
            log::info!("Rider entfernt ({} aktiv)", self.riders.len());
        }
        removed
    }

    /// Simulationsschritt: bewegt alle Rider um `dt` Sekunden.
    pub fn update(&mut self, dt: f32) {
        if self.segments.is_empty() {
            return;
        }
        let params = self.params;
        for rider in &mut self.riders {
            rider.advance(&self.segments, &params, dt);
        }
    }

    /// Aktualisiert Position und Richtung der Rider auf einem geänderten Segment.
    pub(super) fn refresh_riders_on(&mut self, segment_index: usize) {
        let segment = &self.segments[segment_index];
        for rider in self.riders.iter_mut().filter(|r| r.segment == segment_index) {
            rider.position = segment.point_at(rider.t);
            rider.heading = segment.tangent_at(rider.t);
        }
    }

    pub fn rider(&self, i: usize) -> &Rider {
        &self.riders[i]
    }

    pub fn riders(&self) -> &[Rider] {
        &self.riders
    }

    pub fn rider_count(&self) -> usize {
        self.riders.len()
    }
}
