//! Builder für Render-Szenen aus dem AppState.

use crate::app::AppState;
use crate::core::{CameraMode, Curve, CtrlPointSlot};
use crate::shared::options::{
    ANCHOR_COLOR, HANDLE_COLOR, HANDLE_LINE_COLOR, SELECTED_COLOR, TRACK_LINE_COLOR,
};
use crate::shared::{CtrlPointInstance, LineVertex, RenderScene, RiderTransform, SelectionHighlight};
use glam::Mat4;

/// Baut eine RenderScene aus dem aktuellen AppState.
pub fn build(state: &AppState) -> RenderScene {
    let track = &state.track;
    let editing = state.camera_mode == CameraMode::God;
    let selection = track.selection();

    // Geschlossener Linienzug: Polylinien aller Segmente + Startpunkt
    let mut track_line: Vec<LineVertex> = track
        .segments()
        .iter()
        .flat_map(|segment| segment.polyline().iter())
        .map(|&point| LineVertex::new(point, TRACK_LINE_COLOR))
        .collect();
    if let Some(&first) = track_line.first() {
        track_line.push(first);
    }

    let mut handle_lines = Vec::new();
    let mut ctrl_points = Vec::new();
    if editing {
        let radius = track.ctrl_point_radius();
        for (segment_index, segment) in track.segments().iter().enumerate() {
            let points = segment.ctrl_points();
            handle_lines.push(LineVertex::new(points[0], HANDLE_LINE_COLOR));
            handle_lines.push(LineVertex::new(points[1], HANDLE_LINE_COLOR));
            handle_lines.push(LineVertex::new(points[2], HANDLE_LINE_COLOR));
            handle_lines.push(LineVertex::new(points[3], HANDLE_LINE_COLOR));

            for slot in CtrlPointSlot::ALL {
                let selected = selection
                    .is_some_and(|sel| sel.segment == segment_index && sel.slot == slot);
                let color = if selected {
                    SELECTED_COLOR
                } else if slot == CtrlPointSlot::Anchor {
                    ANCHOR_COLOR
                } else {
                    HANDLE_COLOR
                };
                ctrl_points.push(CtrlPointInstance {
                    center: points[slot.index()].to_array(),
                    radius,
                    color,
                });
            }
        }
    }

    // In der Ego-Perspektive sitzt die Kamera im ersten Rider
    let skip_first = usize::from(state.camera_mode == CameraMode::FirstPerson);
    let riders = track
        .riders()
        .iter()
        .skip(skip_first)
        .map(|rider| {
            let orientation = rider.orientation();
            RiderTransform {
                position: rider.position(),
                orientation,
                model: Mat4::from_rotation_translation(orientation, rider.position()),
                speed: rider.speed(),
            }
        })
        .collect();

    let selection = selection
        .filter(|sel| sel.segment < track.segment_count())
        .map(|sel| SelectionHighlight {
            segment: sel.segment,
            slot: sel.slot,
            position: track.segment(sel.segment).ctrl_point(sel.slot.index()),
        });

    let viewport = state.viewport();
    RenderScene {
        track_line,
        handle_lines,
        ctrl_points,
        riders,
        selection,
        camera_mode: state.camera_mode,
        view: state.camera.view_matrix(),
        projection: state.camera.projection_matrix(viewport.aspect()),
        viewport_size: state.viewport_size,
    }
}
