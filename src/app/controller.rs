//! Application Controller für zentrale Event-Verarbeitung.

use super::render_scene;
use super::{AppCommand, AppIntent, AppState};
use crate::shared::RenderScene;

/// Orchestriert Eingabe-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Datei-I/O ===
            AppCommand::LoadSettings { path } => handlers::file_io::load(state, path)?,
            AppCommand::SaveSettings { path } => handlers::file_io::save(state, path)?,

            // === Simulation ===
            AppCommand::AdvanceSimulation { dt } => handlers::simulation::advance(state, dt),
            AppCommand::AddRider => handlers::simulation::add_rider(state),
            AppCommand::RemoveRider => handlers::simulation::remove_rider(state),

            // === Editing ===
            AppCommand::PickCtrlPoint { cursor } => handlers::editing::pick(state, cursor),
            AppCommand::DragCtrlPoint { cursor } => handlers::editing::drag(state, cursor),
            AppCommand::ClearCtrlPointSelection => handlers::editing::clear_selection(state),
            AppCommand::IncreaseResolution => handlers::editing::increase_resolution(state),
            AppCommand::DecreaseResolution => handlers::editing::decrease_resolution(state),
            AppCommand::SplitLongestSegment => handlers::editing::split_longest_segment(state),

            // === Kamera & Viewport ===
            AppCommand::UpdateFollowCamera => handlers::view::update_follow_camera(state),
            AppCommand::OrbitCamera { delta } => handlers::view::orbit(state, delta),
            AppCommand::CycleCameraMode => handlers::view::cycle_camera_mode(state),
            AppCommand::SetCursor { pos } => handlers::view::set_cursor(state, pos),
            AppCommand::SetSecondaryHeld { held } => {
                handlers::view::set_secondary_held(state, held)
            }
            AppCommand::SetViewportSize { size } => handlers::view::set_viewport_size(state, size),
        }

        Ok(())
    }

    /// Baut die Render-Szene aus dem aktuellen AppState.
    pub fn build_render_scene(&self, state: &AppState) -> RenderScene {
        render_scene::build(state)
    }
}
