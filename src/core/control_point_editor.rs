//! Auswahl und Verschieben von Kontrollpunkten per Strahl-Picking.
//!
//! Jedes Segment bietet drei greifbare Punkte: Start-Anker, Start-Handle und
//! End-Handle. Der End-Anker gehört als Start-Anker zum Folgesegment. Nach
//! jedem Verschieben bleibt die Strecke C1-stetig.

use super::camera::{project, unproject, Viewport};
use super::ray::Ray;
use super::track::Track;
use crate::shared::curve_geometry::reflect_handle;
use glam::{Mat4, Vec2, Vec3};

/// Welcher Kontrollpunkt eines Segments gegriffen ist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CtrlPointSlot {
    /// Kontrollpunkt 0, gemeinsam mit dem Ende des Vorgängers
    Anchor,
    /// Kontrollpunkt 1
    LeadingHandle,
    /// Kontrollpunkt 2
    TrailingHandle,
}

impl CtrlPointSlot {
    /// Reihenfolge, in der ein Segment beim Picking geprüft wird.
    pub const ALL: [CtrlPointSlot; 3] = [
        CtrlPointSlot::Anchor,
        CtrlPointSlot::LeadingHandle,
        CtrlPointSlot::TrailingHandle,
    ];

    /// Index im Kontrollpunkt-Array des Segments.
    pub fn index(self) -> usize {
        match self {
            CtrlPointSlot::Anchor => 0,
            CtrlPointSlot::LeadingHandle => 1,
            CtrlPointSlot::TrailingHandle => 2,
        }
    }
}

/// Treffer eines Pick-Strahls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub segment: usize,
    pub slot: CtrlPointSlot,
    /// Strahlparameter des Treffers
    pub ray_depth: f32,
}

/// Aktuell gegriffener Kontrollpunkt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CtrlPointSelection {
    pub segment: usize,
    pub slot: CtrlPointSlot,
    /// Strahlparameter beim Greifen
    pub ray_depth: f32,
    /// Fenstertiefe `[0, 1]` des Trefferpunkts, dient als Zieltiefe beim Ziehen
    pub window_depth: f32,
    /// Viewport zum Zeitpunkt des Greifens
    pub viewport: Viewport,
}

impl CtrlPointSelection {
    /// Hält die Auswahl auf demselben Punkt, wenn Segment `index` geteilt wird.
    ///
    /// Anker und Start-Handle bleiben bei der linken Hälfte, das End-Handle
    /// wandert mit der rechten Hälfte auf `index + 1`.
    pub(super) fn rebase_for_split(&mut self, index: usize) {
        if self.segment > index
            || (self.segment == index && self.slot == CtrlPointSlot::TrailingHandle)
        {
            self.segment += 1;
        }
    }
}

/// Eingabe für einen Pick: Cursor, Viewport und Kamerazustand.
#[derive(Debug, Clone, Copy)]
pub struct PickInput {
    /// Cursor in Pixeln (Ursprung oben links)
    pub cursor: Vec2,
    pub viewport: Viewport,
    pub camera_position: Vec3,
    pub right: Vec3,
    pub down: Vec3,
    pub forward: Vec3,
    /// Vertikales Sichtfeld in Radiant
    pub fov_y: f32,
    pub view: Mat4,
    pub projection: Mat4,
}

impl PickInput {
    /// Strahl von der Kamera durch den Cursor.
    pub fn ray(&self) -> Ray {
        let ndc = self.viewport.cursor_to_ndc(self.cursor);
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.viewport.aspect();
        let direction = self.forward + self.right * (ndc.x * half_width)
            - self.down * (ndc.y * half_height);
        Ray::new(self.camera_position, direction)
    }
}

impl Track {
    /// Nächster Kontrollpunkt, den der Strahl trifft.
    ///
    /// Geprüft werden Anker, Start-Handle und End-Handle jedes Segments.
    /// Bei gleicher Tiefe gewinnt der zuerst gefundene Punkt.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        let radius = self.params.ctrl_point_radius;
        let mut nearest: Option<PickHit> = None;

        for (segment_index, segment) in self.segments.iter().enumerate() {
            for slot in CtrlPointSlot::ALL {
                let Some(depth) = ray.test_sphere(segment.ctrl_point(slot.index()), radius) else {
                    continue;
                };
                if nearest.map_or(true, |hit| depth < hit.ray_depth) {
                    nearest = Some(PickHit {
                        segment: segment_index,
                        slot,
                        ray_depth: depth,
                    });
                }
            }
        }
        nearest
    }

    /// Greift den Kontrollpunkt unter dem Cursor.
    ///
    /// Ohne Treffer bleibt eine bestehende Auswahl unverändert und es wird
    /// `false` zurückgegeben.
    pub fn select_ctrl_point(&mut self, input: &PickInput) -> bool {
        let ray = input.ray();
        let Some(hit) = self.pick(&ray) else {
            log::debug!("Kein Kontrollpunkt unter Cursor {:?}", input.cursor);
            return false;
        };

        let window_depth = project(
            ray.point_at(hit.ray_depth),
            &input.view,
            &input.projection,
            &input.viewport,
        )
        .map_or(0.0, |screen| screen.z);

        self.selection = Some(CtrlPointSelection {
            segment: hit.segment,
            slot: hit.slot,
            ray_depth: hit.ray_depth,
            window_depth,
            viewport: input.viewport,
        });
        log::debug!(
            "Kontrollpunkt gegriffen: Segment {}, {:?}, Tiefe {:.3}",
            hit.segment,
            hit.slot,
            window_depth
        );
        true
    }

    /// Zieht den gegriffenen Punkt zur Cursorposition auf der Greiftiefe.
    ///
    /// Ohne Auswahl oder bei zu geringer Tiefe passiert nichts.
    pub fn drag_ctrl_point(&mut self, cursor: Vec2, view: &Mat4, projection: &Mat4) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        if selection.window_depth <= self.params.drag_min_depth {
            log::trace!(
                "Ziehen unterdrückt: Tiefe {:.3} <= {:.3}",
                selection.window_depth,
                self.params.drag_min_depth
            );
            return false;
        }
        let Some(target) = unproject(
            cursor,
            selection.window_depth,
            view,
            projection,
            &selection.viewport,
        ) else {
            log::warn!("Cursor {:?} nicht in Weltkoordinaten umrechenbar", cursor);
            return false;
        };
        self.move_ctrl_point(target)
    }

    /// Setzt den gegriffenen Punkt auf `target` und stellt C1-Stetigkeit her.
    ///
    /// - Anker: beide Handles wandern mit, der Vorgänger endet am neuen Anker.
    /// - Start-Handle: das End-Handle des Vorgängers wird gespiegelt.
    /// - End-Handle: das Start-Handle des Nachfolgers wird gespiegelt.
    ///
    /// Ziele außerhalb der Reichweite zum Bezugspunkt werden verworfen.
    pub fn move_ctrl_point(&mut self, target: Vec3) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        let current = selection.segment;
        if current >= self.segments.len() {
            debug_assert!(false, "Auswahl zeigt auf fehlendes Segment {}", current);
            self.selection = None;
            return false;
        }
        let prev = self.prev_index(current);
        let next = self.next_index(current);

        match selection.slot {
            CtrlPointSlot::Anchor => {
                if target.distance(self.segments[prev].start()) >= self.params.anchor_drag_limit {
                    log::trace!("Anker-Ziel zu weit vom Vorgänger entfernt");
                    return false;
                }
                let offset = self.segments[current].ctrl_point(1) - self.segments[current].start();
                self.segments[current].edit_ctrl_points(|points| {
                    points[0] = target;
                    points[1] = target + offset;
                });
                self.segments[prev].edit_ctrl_points(|points| {
                    points[3] = target;
                    points[2] = target - offset;
                });
            }
            CtrlPointSlot::LeadingHandle => {
                let anchor = self.segments[current].start();
                if target.distance(anchor) >= self.params.handle_drag_limit {
                    log::trace!("Handle-Ziel zu weit vom Anker entfernt");
                    return false;
                }
                self.segments[current].set_ctrl_point(1, target);
                self.segments[prev].set_ctrl_point(2, reflect_handle(anchor, target));
            }
            CtrlPointSlot::TrailingHandle => {
                let anchor = self.segments[current].end();
                if target.distance(anchor) >= self.params.handle_drag_limit {
                    log::trace!("Handle-Ziel zu weit vom Anker entfernt");
                    return false;
                }
                self.segments[current].set_ctrl_point(2, target);
                self.segments[next].set_ctrl_point(1, reflect_handle(anchor, target));
            }
        }

        self.recompute_length();
        true
    }

    /// Lässt den gegriffenen Punkt los.
    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            log::debug!("Kontrollpunkt losgelassen");
        }
    }

    pub fn selection(&self) -> Option<CtrlPointSelection> {
        self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cubic_curve::Curve;
    use approx::assert_relative_eq;

    fn square_loop() -> Track {
        let mut track = Track::default();
        track.add_first_curve(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(8.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        );
        track.add_curve_to_end(Vec3::new(10.0, 0.0, 8.0), Vec3::new(10.0, 0.0, 10.0));
        track.add_curve_to_end(Vec3::new(2.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 10.0));
        track.add_last_curve();
        track
    }

    fn select(track: &mut Track, segment: usize, slot: CtrlPointSlot) {
        track.selection = Some(CtrlPointSelection {
            segment,
            slot,
            ray_depth: 1.0,
            window_depth: 0.95,
            viewport: Viewport::from_size([800.0, 600.0]),
        });
    }

    fn ray_from_above(point: Vec3) -> Ray {
        Ray::new(point + Vec3::new(0.0, 20.0, 0.0), Vec3::NEG_Y)
    }

    #[test]
    fn pick_hits_single_ctrl_point() {
        let track = square_loop();
        let hit = track
            .pick(&ray_from_above(Vec3::new(8.0, 0.0, 0.0)))
            .expect("Treffer erwartet");
        assert_eq!(hit.segment, 0);
        assert_eq!(hit.slot, CtrlPointSlot::TrailingHandle);
        assert_relative_eq!(hit.ray_depth, 20.0 - track.ctrl_point_radius(), epsilon = 1e-4);
    }

    #[test]
    fn pick_prefers_nearest_along_ray() {
        let mut track = square_loop();
        // Handle von Segment 1 direkt über den Anker von Segment 0 legen
        track.segments[1].set_ctrl_point(1, Vec3::new(0.0, 5.0, 0.0));

        let ray = ray_from_above(Vec3::ZERO);
        let hit = track.pick(&ray).expect("Treffer erwartet");
        assert_eq!(hit.segment, 1);
        assert_eq!(hit.slot, CtrlPointSlot::LeadingHandle);
    }

    #[test]
    fn pick_is_deterministic_on_ties() {
        let track = square_loop();
        // Anker von Segment 0 und End-Anker von Segment 3 fallen zusammen;
        // nur Slot 0 ist greifbar, also gewinnt Segment 0.
        let first = track.pick(&ray_from_above(Vec3::ZERO));
        let second = track.pick(&ray_from_above(Vec3::ZERO));
        assert_eq!(first, second);
        assert_eq!(first.map(|hit| (hit.segment, hit.slot)), Some((0, CtrlPointSlot::Anchor)));
    }

    fn input_from_above(point: Vec3) -> PickInput {
        let viewport = Viewport::from_size([800.0, 600.0]);
        PickInput {
            cursor: Vec2::new(400.0, 300.0),
            viewport,
            camera_position: point + Vec3::new(0.0, 20.0, 0.0),
            right: Vec3::X,
            down: Vec3::Z,
            forward: Vec3::NEG_Y,
            fov_y: 45f32.to_radians(),
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }

    #[test]
    fn select_stores_hit_as_selection() {
        let mut track = square_loop();
        assert!(track.select_ctrl_point(&input_from_above(Vec3::new(2.0, 0.0, 0.0))));
        let selection = track.selection().expect("Auswahl erwartet");
        assert_eq!(selection.segment, 0);
        assert_eq!(selection.slot, CtrlPointSlot::LeadingHandle);
    }

    #[test]
    fn miss_keeps_previous_selection() {
        let mut track = square_loop();
        select(&mut track, 2, CtrlPointSlot::LeadingHandle);
        let before = track.selection();

        assert!(!track.select_ctrl_point(&input_from_above(Vec3::new(50.0, 0.0, 50.0))));
        assert_eq!(track.selection(), before);
    }

    #[test]
    fn moving_anchor_keeps_continuity() {
        let mut track = square_loop();
        select(&mut track, 1, CtrlPointSlot::Anchor);
        let old_offset = track.segment(1).ctrl_point(1) - track.segment(1).start();

        let target = Vec3::new(11.0, 1.0, -1.0);
        assert!(track.move_ctrl_point(target));

        assert_eq!(track.segment(1).start(), target);
        assert_eq!(track.segment(0).end(), target);
        assert!((track.segment(1).ctrl_point(1) - target).abs_diff_eq(old_offset, 1e-5));
        assert_relative_eq!(track.continuity_error(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn moving_leading_handle_reflects_into_previous() {
        let mut track = square_loop();
        select(&mut track, 2, CtrlPointSlot::LeadingHandle);

        let target = Vec3::new(10.0, 2.0, 13.0);
        assert!(track.move_ctrl_point(target));

        let anchor = track.segment(2).start();
        assert_eq!(track.segment(2).ctrl_point(1), target);
        assert!(track
            .segment(1)
            .ctrl_point(2)
            .abs_diff_eq(2.0 * anchor - target, 1e-5));
        assert_relative_eq!(track.continuity_error(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn moving_trailing_handle_reflects_into_next_with_wrap() {
        let mut track = square_loop();
        let last = track.segment_count() - 1;
        select(&mut track, last, CtrlPointSlot::TrailingHandle);

        let target = Vec3::new(-1.0, 1.0, 3.0);
        assert!(track.move_ctrl_point(target));

        assert_eq!(track.segment(last).ctrl_point(2), target);
        assert!(track
            .segment(0)
            .ctrl_point(1)
            .abs_diff_eq(Vec3::new(1.0, -1.0, -3.0), 1e-5));
        assert_relative_eq!(track.continuity_error(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn targets_beyond_reach_are_rejected() {
        let mut track = square_loop();
        let before: Vec<_> = track.segments().iter().map(|s| *s.ctrl_points()).collect();

        select(&mut track, 0, CtrlPointSlot::LeadingHandle);
        assert!(!track.move_ctrl_point(Vec3::new(30.0, 0.0, 0.0)));

        select(&mut track, 0, CtrlPointSlot::Anchor);
        assert!(!track.move_ctrl_point(Vec3::new(0.0, 0.0, 70.0)));

        let after: Vec<_> = track.segments().iter().map(|s| *s.ctrl_points()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn move_updates_track_length() {
        let mut track = square_loop();
        let before = track.length();
        select(&mut track, 1, CtrlPointSlot::Anchor);
        assert!(track.move_ctrl_point(Vec3::new(14.0, 0.0, -4.0)));

        let sum: f32 = track.segments().iter().map(|s| s.arc_length()).sum();
        assert_relative_eq!(track.length(), sum, epsilon = 1e-4);
        assert!(track.length() > before);
    }

    #[test]
    fn edits_without_selection_are_noops() {
        let mut track = square_loop();
        assert!(!track.move_ctrl_point(Vec3::ONE));
        assert!(!track.drag_ctrl_point(Vec2::new(10.0, 10.0), &Mat4::IDENTITY, &Mat4::IDENTITY));
        track.clear_selection();
        assert!(track.selection().is_none());
    }

    #[test]
    fn shallow_selection_does_not_drag() {
        let mut track = square_loop();
        select(&mut track, 0, CtrlPointSlot::LeadingHandle);
        if let Some(selection) = track.selection.as_mut() {
            selection.window_depth = 0.5;
        }
        let before = track.segment(0).ctrl_point(1);
        assert!(!track.drag_ctrl_point(Vec2::new(10.0, 10.0), &Mat4::IDENTITY, &Mat4::IDENTITY));
        assert_eq!(track.segment(0).ctrl_point(1), before);
    }

    #[test]
    fn selection_follows_split() {
        let mut selection = CtrlPointSelection {
            segment: 2,
            slot: CtrlPointSlot::TrailingHandle,
            ray_depth: 1.0,
            window_depth: 0.9,
            viewport: Viewport::from_size([100.0, 100.0]),
        };
        selection.rebase_for_split(2);
        assert_eq!(selection.segment, 3);

        selection.slot = CtrlPointSlot::LeadingHandle;
        selection.rebase_for_split(3);
        assert_eq!(selection.segment, 3);

        selection.rebase_for_split(1);
        assert_eq!(selection.segment, 4);
    }
}
