use bezier_track_editor::core::project;
use bezier_track_editor::{
    AppCommand, AppController, AppIntent, AppState, CameraMode, CtrlPointSlot, Curve,
};
use glam::{Vec2, Vec3};

const HILL_TRACK: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/hill_track.xml");
const INVALID_CURVE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid_curve.xml");

fn loaded_state(controller: &mut AppController) -> AppState {
    let mut state = AppState::new();
    controller
        .handle_intent(
            &mut state,
            AppIntent::SettingsLoadRequested {
                path: HILL_TRACK.to_string(),
            },
        )
        .expect("Fixture sollte ladbar sein");
    state
}

fn cursor_of(state: &AppState, point: Vec3) -> Vec2 {
    let viewport = state.viewport();
    let screen = project(
        point,
        &state.camera.view_matrix(),
        &state.camera.projection_matrix(viewport.aspect()),
        &viewport,
    )
    .expect("Punkt sollte projizierbar sein");
    Vec2::new(screen.x, screen.y)
}

#[test]
fn test_load_requested_builds_closed_track() {
    let mut controller = AppController::new();
    let state = loaded_state(&mut controller);

    assert_eq!(state.settings_name(), Some("Scene"));
    assert_eq!(state.track.segment_count(), 4);
    assert!(state.track.is_closed());
    assert!(state.track.continuity_error() < 1e-4);
    assert!(state.camera.position.abs_diff_eq(Vec3::new(0.0, 10.0, -24.0), 1e-6));
    assert_eq!(state.camera_mode, CameraMode::God);

    match state.command_log.last() {
        Some(AppCommand::LoadSettings { path }) => assert_eq!(path, HILL_TRACK),
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
}

#[test]
fn test_missing_model_is_not_fatal() {
    let mut controller = AppController::new();
    let state = loaded_state(&mut controller);

    assert!(state.model_path.is_none());
    assert!(!state.track.is_empty());
}

#[test]
fn test_invalid_settings_return_error_and_keep_state() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    let result = controller.handle_intent(
        &mut state,
        AppIntent::SettingsLoadRequested {
            path: INVALID_CURVE.to_string(),
        },
    );

    assert!(result.is_err());
    assert!(state.track.is_empty());
    assert!(state.settings.is_none());
}

#[test]
fn test_missing_settings_file_returns_error() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    let result = controller.handle_intent(
        &mut state,
        AppIntent::SettingsLoadRequested {
            path: "/definitiv/nicht/vorhanden.xml".to_string(),
        },
    );

    assert!(result.is_err());
}

#[test]
fn test_tick_moves_rider_and_logs_commands() {
    let mut controller = AppController::new();
    let mut state = loaded_state(&mut controller);

    controller
        .handle_intent(&mut state, AppIntent::RiderAddRequested)
        .expect("RiderAddRequested sollte durchlaufen");
    let start = state.track.rider(0).position();

    for _ in 0..50 {
        controller
            .handle_intent(&mut state, AppIntent::TickElapsed { dt: 0.01 })
            .expect("TickElapsed sollte durchlaufen");
    }

    assert!(state.track.rider(0).position().distance(start) > 0.1);
    assert!(state.track.rider(0).speed() >= 2.0);
    let entries = state.command_log.entries();
    assert_eq!(
        entries[entries.len() - 2..],
        [
            AppCommand::UpdateFollowCamera,
            AppCommand::AdvanceSimulation { dt: 0.01 }
        ]
    );
}

#[test]
fn test_camera_mode_cycle_restores_god_view() {
    let mut controller = AppController::new();
    let mut state = loaded_state(&mut controller);
    let god_position = state.camera.position;

    controller
        .handle_intent(&mut state, AppIntent::CameraModeCycleRequested)
        .expect("Moduswechsel sollte durchlaufen");
    assert_eq!(state.camera_mode, CameraMode::FirstPerson);
    assert_eq!(state.track.rider_count(), 1);

    controller
        .handle_intent(&mut state, AppIntent::TickElapsed { dt: 0.01 })
        .expect("TickElapsed sollte durchlaufen");
    assert!(state.camera.position.distance(god_position) > 1.0);

    controller
        .handle_intent(&mut state, AppIntent::CameraModeCycleRequested)
        .expect("Moduswechsel sollte durchlaufen");
    assert_eq!(state.camera_mode, CameraMode::ThirdPerson);

    controller
        .handle_intent(&mut state, AppIntent::CameraModeCycleRequested)
        .expect("Moduswechsel sollte durchlaufen");
    assert_eq!(state.camera_mode, CameraMode::God);
    assert!(state.camera.position.abs_diff_eq(god_position, 1e-6));
}

#[test]
fn test_editing_intents_only_work_in_god_mode() {
    let mut controller = AppController::new();
    let mut state = loaded_state(&mut controller);

    controller
        .handle_intent(&mut state, AppIntent::SegmentSplitRequested)
        .expect("Split sollte durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::ResolutionDecreaseRequested)
        .expect("Auflösung sollte änderbar sein");
    assert_eq!(state.track.segment_count(), 5);
    assert_eq!(state.track.resolution(), 74);
    assert!(state.track.continuity_error() < 1e-4);

    controller
        .handle_intent(&mut state, AppIntent::CameraModeCycleRequested)
        .expect("Moduswechsel sollte durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::SegmentSplitRequested)
        .expect("Split sollte durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::ResolutionIncreaseRequested)
        .expect("Auflösung sollte durchlaufen");

    assert_eq!(state.track.segment_count(), 5);
    assert_eq!(state.track.resolution(), 74);
}

#[test]
fn test_pick_drag_release_via_mouse_intents() {
    let mut controller = AppController::new();
    let mut state = loaded_state(&mut controller);

    // Anker (0, 5, -8) liegt auf demselben Strahl wie (0, 0, 8), aber näher
    let anchor = state.track.segment(1).start();
    assert!(anchor.abs_diff_eq(Vec3::new(0.0, 5.0, -8.0), 1e-6));
    let cursor = cursor_of(&state, anchor);

    controller
        .handle_intent(&mut state, AppIntent::CursorMoved { pos: cursor })
        .expect("CursorMoved sollte durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::PrimaryPressed)
        .expect("PrimaryPressed sollte durchlaufen");

    let selection = state.track.selection().expect("Anker sollte gegriffen sein");
    assert_eq!(selection.segment, 1);
    assert_eq!(selection.slot, CtrlPointSlot::Anchor);

    controller
        .handle_intent(
            &mut state,
            AppIntent::CursorMoved {
                pos: cursor + Vec2::new(15.0, 0.0),
            },
        )
        .expect("Drag sollte durchlaufen");

    let moved = state.track.segment(1).start();
    assert!(moved.distance(anchor) > 0.01);
    assert!(state.track.segment(0).end().abs_diff_eq(moved, 1e-6));
    assert!(state.track.continuity_error() < 1e-3);

    controller
        .handle_intent(&mut state, AppIntent::PrimaryReleased)
        .expect("PrimaryReleased sollte durchlaufen");
    assert!(state.track.selection().is_none());
}

#[test]
fn test_secondary_button_orbits_instead_of_picking() {
    let mut controller = AppController::new();
    let mut state = loaded_state(&mut controller);
    let yaw = state.camera.orbit_yaw_deg();

    controller
        .handle_intent(&mut state, AppIntent::SecondaryPressed)
        .expect("SecondaryPressed sollte durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::PrimaryPressed)
        .expect("PrimaryPressed sollte durchlaufen");
    assert!(state.track.selection().is_none());

    controller
        .handle_intent(
            &mut state,
            AppIntent::CursorMoved {
                pos: Vec2::new(-30.0, 0.0),
            },
        )
        .expect("Orbit sollte durchlaufen");
    assert!((state.camera.orbit_yaw_deg() - yaw).abs() > 1.0);

    controller
        .handle_intent(&mut state, AppIntent::SecondaryReleased)
        .expect("SecondaryReleased sollte durchlaufen");
    assert!(!state.mouse.secondary_held);
}

#[test]
fn test_cursor_is_tracked_in_rider_view_so_orbit_does_not_jump() {
    let mut controller = AppController::new();
    let mut state = loaded_state(&mut controller);

    controller
        .handle_intent(&mut state, AppIntent::SecondaryPressed)
        .expect("SecondaryPressed sollte durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::CameraModeCycleRequested)
        .expect("Moduswechsel sollte durchlaufen");
    controller
        .handle_intent(
            &mut state,
            AppIntent::CursorMoved {
                pos: Vec2::new(300.0, 200.0),
            },
        )
        .expect("CursorMoved sollte durchlaufen");
    assert_eq!(state.mouse.cursor, Vec2::new(300.0, 200.0));

    for _ in 0..2 {
        controller
            .handle_intent(&mut state, AppIntent::CameraModeCycleRequested)
            .expect("Moduswechsel sollte durchlaufen");
    }
    assert_eq!(state.camera_mode, CameraMode::God);
    let yaw = state.camera.orbit_yaw_deg();

    controller
        .handle_intent(
            &mut state,
            AppIntent::CursorMoved {
                pos: Vec2::new(297.0, 200.0),
            },
        )
        .expect("Orbit sollte durchlaufen");

    // 3 Pixel Delta ergeben genau 1 Grad
    let turned = (state.camera.orbit_yaw_deg() - yaw).rem_euclid(360.0);
    assert!((turned - 1.0).abs() < 1e-3, "Sprung beim Orbit: {turned}");
}

#[test]
fn test_save_then_reload_keeps_layout() {
    let mut controller = AppController::new();
    let mut state = loaded_state(&mut controller);
    controller
        .handle_intent(&mut state, AppIntent::SegmentSplitRequested)
        .expect("Split sollte durchlaufen");

    let path = std::env::temp_dir().join(format!(
        "bezier_track_roundtrip_{}.xml",
        std::process::id()
    ));
    controller
        .handle_intent(
            &mut state,
            AppIntent::SettingsSaveRequested {
                path: Some(path.to_string_lossy().into_owned()),
            },
        )
        .expect("Speichern sollte funktionieren");

    let mut reloaded = AppState::new();
    controller
        .handle_intent(
            &mut reloaded,
            AppIntent::SettingsLoadRequested {
                path: path.to_string_lossy().into_owned(),
            },
        )
        .expect("Gespeicherte Datei sollte ladbar sein");
    let _ = std::fs::remove_file(&path);

    assert_eq!(reloaded.track.segment_count(), state.track.segment_count());
    for (a, b) in reloaded.track.segments().iter().zip(state.track.segments()) {
        for (pa, pb) in a.ctrl_points().iter().zip(b.ctrl_points()) {
            assert!(pa.abs_diff_eq(*pb, 1e-3), "{pa:?} != {pb:?}");
        }
    }
    assert!((reloaded.track.length() - state.track.length()).abs() < 1e-2);
    assert_eq!(
        reloaded.settings.as_ref().and_then(|s| s.model_filename.as_deref()),
        Some("missing_model.ms3d")
    );
}

#[test]
fn test_save_without_path_and_without_loaded_file_fails() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    let result =
        controller.handle_intent(&mut state, AppIntent::SettingsSaveRequested { path: None });

    assert!(result.is_err());
}

#[test]
fn test_render_scene_reflects_loaded_track() {
    let mut controller = AppController::new();
    let mut state = loaded_state(&mut controller);
    controller
        .handle_intent(&mut state, AppIntent::RiderAddRequested)
        .expect("RiderAddRequested sollte durchlaufen");

    let scene = controller.build_render_scene(&state);

    assert!(scene.has_track());
    assert_eq!(
        scene.track_line.len(),
        state.track.segment_count() * state.track.resolution() + 1
    );
    assert_eq!(scene.ctrl_points.len(), 3 * state.track.segment_count());
    assert_eq!(scene.riders.len(), 1);
    assert_eq!(
        scene.track_line[0].position,
        state.track.segment(0).polyline()[0].to_array()
    );
}
