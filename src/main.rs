//! Bézier Track Editor.
//!
//! Headless-Treiber: lädt eine Settings-Datei, baut die Strecke, setzt einen
//! Rider ein und simuliert eine feste Anzahl Ticks.

use anyhow::Context;
use bezier_track_editor::{AppController, AppIntent, AppState, TrackOptions};
use serde::Serialize;

const DEFAULT_SETTINGS_PATH: &str = "assets/track.xml";
const DEFAULT_TICKS: u32 = 1000;

/// Zusammenfassung eines Laufs (als JSON auf stdout).
#[derive(Debug, Serialize)]
struct RunSummary {
    settings: String,
    segments: usize,
    resolution: usize,
    track_length: f32,
    ticks: u32,
    simulated_seconds: f32,
    riders: Vec<RiderSummary>,
}

#[derive(Debug, Serialize)]
struct RiderSummary {
    segment: usize,
    t: f32,
    speed: f32,
    position: [f32; 3],
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Bezier Track Editor v{} startet...", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let settings_path = args
        .next()
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let ticks = match args.next() {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("Ungültige Tick-Anzahl: '{}'", raw))?,
        None => DEFAULT_TICKS,
    };

    // Optionen aus TOML laden (oder Standardwerte)
    let options = TrackOptions::load_from_file(&TrackOptions::config_path());
    let tick_seconds = options.tick_seconds;

    let mut state = AppState::with_options(options);
    let mut controller = AppController::new();

    controller
        .handle_intent(
            &mut state,
            AppIntent::SettingsLoadRequested {
                path: settings_path.clone(),
            },
        )
        .with_context(|| format!("Settings '{}' konnten nicht geladen werden", settings_path))?;

    if let Some(window) = state.settings.as_ref().map(|s| s.window.clone()) {
        controller.handle_intent(
            &mut state,
            AppIntent::ViewportResized {
                size: [window.width as f32, window.height as f32],
            },
        )?;
    }
    controller.handle_intent(&mut state, AppIntent::RiderAddRequested)?;

    for tick in 0..ticks {
        controller.handle_intent(&mut state, AppIntent::TickElapsed { dt: tick_seconds })?;
        if tick % 100 == 0 {
            if let Some(rider) = state.track.riders().first() {
                log::debug!(
                    "Tick {}: Segment {}, t = {:.3}, v = {:.3}",
                    tick,
                    rider.segment(),
                    rider.t(),
                    rider.speed()
                );
            }
        }
    }

    let scene = controller.build_render_scene(&state);
    log::info!(
        "Render-Szene: {} Linien-Vertices, {} Kontrollpunkte, {} Rider",
        scene.track_line.len(),
        scene.ctrl_points.len(),
        scene.riders.len()
    );

    let summary = RunSummary {
        settings: state.settings_name().unwrap_or_default().to_string(),
        segments: state.track.segment_count(),
        resolution: state.track.resolution(),
        track_length: state.track.length(),
        ticks,
        simulated_seconds: ticks as f32 * tick_seconds,
        riders: state
            .track
            .riders()
            .iter()
            .map(|rider| RiderSummary {
                segment: rider.segment(),
                t: rider.t(),
                speed: rider.speed(),
                position: rider.position().to_array(),
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
