//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
///
/// Editier-Intents wirken nur im God-Modus, in den Rider-Perspektiven
/// ergeben sie keine Commands.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    let editing = state.is_editing();

    match intent {
        AppIntent::SettingsLoadRequested { path } => vec![AppCommand::LoadSettings { path }],
        AppIntent::SettingsSaveRequested { path } => vec![AppCommand::SaveSettings { path }],
        AppIntent::TickElapsed { dt } => vec![
            AppCommand::UpdateFollowCamera,
            AppCommand::AdvanceSimulation { dt },
        ],
        AppIntent::CursorMoved { pos } => {
            // Cursor immer nachführen, Drag und Orbit nur im God-Modus
            let mut commands = Vec::with_capacity(3);
            if editing && state.track.selection().is_some() {
                commands.push(AppCommand::DragCtrlPoint { cursor: pos });
            }
            if editing && state.mouse.secondary_held {
                commands.push(AppCommand::OrbitCamera {
                    delta: state.mouse.cursor - pos,
                });
            }
            commands.push(AppCommand::SetCursor { pos });
            commands
        }
        AppIntent::PrimaryPressed => {
            if editing && !state.mouse.secondary_held {
                vec![AppCommand::PickCtrlPoint {
                    cursor: state.mouse.cursor,
                }]
            } else {
                Vec::new()
            }
        }
        AppIntent::PrimaryReleased | AppIntent::CursorLeftViewport => {
            vec![AppCommand::ClearCtrlPointSelection]
        }
        AppIntent::SecondaryPressed => vec![
            AppCommand::ClearCtrlPointSelection,
            AppCommand::SetSecondaryHeld { held: true },
        ],
        AppIntent::SecondaryReleased => vec![AppCommand::SetSecondaryHeld { held: false }],
        AppIntent::CameraModeCycleRequested => vec![AppCommand::CycleCameraMode],
        AppIntent::ResolutionIncreaseRequested if editing => {
            vec![AppCommand::IncreaseResolution]
        }
        AppIntent::ResolutionDecreaseRequested if editing => {
            vec![AppCommand::DecreaseResolution]
        }
        AppIntent::SegmentSplitRequested if editing => vec![AppCommand::SplitLongestSegment],
        AppIntent::RiderAddRequested if editing => vec![AppCommand::AddRider],
        AppIntent::RiderRemoveRequested if editing => vec![AppCommand::RemoveRider],
        AppIntent::ResolutionIncreaseRequested
        | AppIntent::ResolutionDecreaseRequested
        | AppIntent::SegmentSplitRequested
        | AppIntent::RiderAddRequested
        | AppIntent::RiderRemoveRequested => Vec::new(),
        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],
    }
}
